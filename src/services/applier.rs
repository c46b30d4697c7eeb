//! Binding application with per-item failure isolation.
//!
//! Between a scan and an apply the document may have drifted: variables get
//! deleted, elements removed, paints replaced or bound by hand. Every target
//! item is therefore re-validated immediately before binding, and a failing
//! item never aborts the rest of the batch.

use std::sync::Arc;

use crate::models::{AggregateOutcome, ApplyOutcome, ObservedColor, ScanResult, VariableId};
use crate::services::host::{CatalogStore, ElementStore, VariableStore};

pub struct BindingApplier {
    catalog: Arc<dyn CatalogStore>,
    elements: Arc<dyn ElementStore>,
    variables: Arc<dyn VariableStore>,
}

impl BindingApplier {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        elements: Arc<dyn ElementStore>,
        variables: Arc<dyn VariableStore>,
    ) -> Self {
        Self {
            catalog,
            elements,
            variables,
        }
    }

    /// Bind every matched item of a scan result onto its element.
    pub async fn apply_all(&self, scan: &ScanResult) -> AggregateOutcome {
        let mut outcome = AggregateOutcome::default();
        for item in &scan.items {
            if let Some(matched) = &item.matched {
                outcome.record(self.apply_item(&item.observed, &matched.id).await);
            }
        }
        tracing::info!(
            applied = outcome.applied_count,
            skipped = outcome.skipped_count,
            failed = outcome.failed_count,
            "Apply pass complete"
        );
        outcome
    }

    /// Bind a chosen variable onto every unmatched item of a scan result
    /// whose hex equals `hex`. Manual override for no-match colors.
    pub async fn apply_one(
        &self,
        scan: &ScanResult,
        hex: &str,
        variable: &VariableId,
    ) -> AggregateOutcome {
        let mut outcome = AggregateOutcome::default();
        for item in &scan.items {
            if item.matched.is_none() && item.observed.hex() == hex {
                outcome.record(self.apply_item(&item.observed, variable).await);
            }
        }
        tracing::info!(
            hex = hex,
            variable = %variable,
            applied = outcome.applied_count,
            skipped = outcome.skipped_count,
            failed = outcome.failed_count,
            "Manual apply complete"
        );
        outcome
    }

    /// Resolve, re-validate and bind one item.
    ///
    /// Resolution misses are failures; an ineligible slot (gone, no longer
    /// solid, or bound in the meantime) is a skip. The skip on already-bound
    /// slots is what makes re-applying the same scan result idempotent.
    async fn apply_item(&self, observed: &ObservedColor, variable: &VariableId) -> ApplyOutcome {
        match self.catalog.variable(variable).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return ApplyOutcome::Failed(format!(
                    "{}: variable {variable} not found",
                    observed.owner_name
                ))
            }
            Err(e) => return ApplyOutcome::Failed(format!("{}: {e}", observed.owner_name)),
        }

        match self.elements.element_exists(&observed.owner).await {
            Ok(true) => {}
            Ok(false) => {
                return ApplyOutcome::Failed(format!(
                    "{}: element {} not found",
                    observed.owner_name, observed.owner
                ))
            }
            Err(e) => return ApplyOutcome::Failed(format!("{}: {e}", observed.owner_name)),
        }

        match self
            .elements
            .paint_slot(&observed.owner, observed.property, observed.index)
            .await
        {
            Ok(Some(slot)) if slot.is_eligible() => {}
            Ok(_) => {
                tracing::debug!(
                    element = %observed.owner,
                    property = %observed.property,
                    index = observed.index,
                    "Slot no longer eligible, skipping"
                );
                return ApplyOutcome::Skipped;
            }
            Err(e) => return ApplyOutcome::Failed(format!("{}: {e}", observed.owner_name)),
        }

        match self
            .variables
            .bind(&observed.owner, observed.property, observed.index, variable)
            .await
        {
            Ok(_) => ApplyOutcome::Applied,
            Err(e) => ApplyOutcome::Failed(format!("{}: {e}", observed.owner_name)),
        }
    }
}
