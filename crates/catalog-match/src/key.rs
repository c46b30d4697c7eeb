//! Exact-match identity keys.
//!
//! An exact key is the quantized identity of a color: the exact float values
//! of the RGB channels plus the alpha rounded to two decimals. Two colors
//! with bit-identical RGB and alphas within 0.01 of each other (after
//! independent rounding) produce the same key and are interchangeable for
//! binding purposes.

/// Build the exact-match key for a color.
///
/// RGB channels are formatted with their exact (shortest round-trip) float
/// representation, so any bit difference yields a different key. Alpha is
/// rounded to two decimals, deliberately collapsing values within 0.01.
pub fn exact_key(r: f32, g: f32, b: f32, a: f32) -> String {
    format!("{r}:{g}:{b}:{a:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_colors_share_a_key() {
        assert_eq!(exact_key(0.0, 0.5, 1.0, 1.0), exact_key(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn test_rgb_must_be_bit_identical() {
        let base = exact_key(0.5, 0.5, 0.5, 1.0);
        assert_ne!(base, exact_key(0.5 + f32::EPSILON, 0.5, 0.5, 1.0));
        assert_ne!(base, exact_key(0.5, 0.500001, 0.5, 1.0));
    }

    #[test]
    fn test_alpha_quantized_to_two_decimals() {
        // 0.004 and 0.0 both round to "0.00"
        assert_eq!(exact_key(0.0, 0.0, 0.0, 0.004), exact_key(0.0, 0.0, 0.0, 0.0));
        // 0.504 and 0.496 both round to "0.50"
        assert_eq!(
            exact_key(0.0, 0.0, 0.0, 0.504),
            exact_key(0.0, 0.0, 0.0, 0.496)
        );
        // 0.50 and 0.51 are distinct after rounding
        assert_ne!(
            exact_key(0.0, 0.0, 0.0, 0.50),
            exact_key(0.0, 0.0, 0.0, 0.51)
        );
    }

    #[test]
    fn test_key_is_deterministic_text() {
        assert_eq!(exact_key(0.0, 0.0, 1.0, 1.0), "0:0:1:1.00");
        assert_eq!(exact_key(0.25, 0.5, 0.75, 0.5), "0.25:0.5:0.75:0.50");
    }
}
