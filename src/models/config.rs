use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Ordered name-prefix groups restricting which catalog entries
    /// participate in matching when group filters are enabled. Earlier
    /// prefixes take priority on exact-key collisions.
    #[serde(default)]
    pub group_filters: Vec<String>,

    /// Maximum number of nearest-neighbor candidates returned per query.
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

fn default_candidate_limit() -> usize {
    12
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            group_filters: Vec::new(),
            candidate_limit: default_candidate_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file is missing or malformed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        group_filters = config.group_filters.len(),
                        candidate_limit = config.candidate_limit,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.group_filters.is_empty());
        assert_eq!(config.candidate_limit, 12);
    }

    #[test]
    fn test_load_missing_path_uses_defaults() {
        let config = AppConfig::load(None);
        assert_eq!(config.candidate_limit, 12);
    }

    #[test]
    fn test_load_nonexistent_file_uses_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/config.yaml")));
        assert_eq!(config.candidate_limit, 12);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
group_filters:
  - "Color/"
  - "Black/"
candidate_limit: 8
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.group_filters, ["Color/", "Black/"]);
        assert_eq!(config.candidate_limit, 8);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "group_filters: [\"Color/\"]").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.group_filters, ["Color/"]);
        // Unspecified fields keep their defaults
        assert_eq!(config.candidate_limit, 12);
    }
}
