use std::collections::BTreeMap;

use tracing::warn;

use super::domain::{fields, FormPatch, FormRecord, WizardStep};
use super::persistence::{SnapshotError, SnapshotStore};
use super::submission::{SubmissionError, SubmissionPlan, SubmissionReceipt};
use super::transport::IntakeGateway;
use super::validation::{Rulebook, StepReport};

/// Final-step fields checked at submit time independently of the validity
/// map.
const REQUIRED_AT_SUBMIT: &[&str] = &[fields::ADMIRE_ACCOUNTS];

/// Drives a visitor through the wizard steps in order: owns the accumulated
/// record, the per-step validity map, the current-step pointer, and the
/// submission orchestration.
pub struct WizardController<S> {
    store: S,
    rulebook: Rulebook,
    plan: SubmissionPlan,
    record: FormRecord,
    validity: BTreeMap<WizardStep, bool>,
    current: usize,
    submitting: bool,
}

impl<S: SnapshotStore> WizardController<S> {
    /// Rehydrate from the snapshot store, or start from the template.
    /// Malformed or unreadable snapshots fall back to the template and are
    /// never fatal. Every step is validated once here so restored values are
    /// reflected in the validity map before any interaction.
    pub fn new(store: S) -> Self {
        let record = match store.load() {
            Ok(Some(raw)) => match serde_json::from_str::<FormRecord>(&raw) {
                Ok(record) => record,
                Err(err) => {
                    warn!(%err, "discarding malformed onboarding snapshot");
                    FormRecord::template()
                }
            },
            Ok(None) => FormRecord::template(),
            Err(err) => {
                warn!(%err, "snapshot store unreadable, starting fresh");
                FormRecord::template()
            }
        };

        let mut controller = Self {
            store,
            rulebook: Rulebook::standard(),
            plan: SubmissionPlan::standard(),
            record,
            validity: fail_closed_validity(),
            current: 0,
            submitting: false,
        };
        controller.revalidate_all();
        controller
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::ordered()[self.current]
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Absent entries never occur (the map is seeded all-false), but stay
    /// fail-closed regardless.
    pub fn step_validity(&self, step: WizardStep) -> bool {
        self.validity.get(&step).copied().unwrap_or(false)
    }

    /// Shallow last-write-wins merge followed by the write-through snapshot
    /// save. Validation is not run here; callers validate explicitly with
    /// the new value.
    pub fn update_field(&mut self, patch: FormPatch) -> Result<(), SnapshotError> {
        self.record.apply(patch);
        self.persist()
    }

    /// Run one step's rule set, record its validity, and hand back the
    /// field-level errors.
    pub fn validate_step(&mut self, step: WizardStep) -> StepReport {
        let report = self.rulebook.validate_step(step, &self.record);
        self.validity.insert(step, report.is_valid());
        report
    }

    /// Inline feedback for a single field; also refreshes the owning step's
    /// validity, matching the per-change behavior of the form.
    pub fn touch_field(&mut self, step: WizardStep, field: &str) -> Option<&'static str> {
        let error = self.rulebook.validate_field(step, &self.record, field);
        self.validate_step(step);
        error
    }

    /// Idempotent overwrite of one step's validity flag.
    pub fn set_step_validity(&mut self, step: WizardStep, is_valid: bool) {
        self.validity.insert(step, is_valid);
    }

    /// Advance one step. Refused while the current step is invalid or a
    /// submission is in flight; a no-op on the last step.
    pub fn go_next(&mut self) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        let step = self.current_step();
        if !self.step_validity(step) {
            return Err(WizardError::StepIncomplete { step });
        }
        if self.current + 1 < WizardStep::ordered().len() {
            self.current += 1;
        }
        Ok(())
    }

    /// One step back, no validity gate; a no-op on the first step.
    pub fn go_back(&mut self) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Free navigation to any visited or unvisited step, except while a
    /// submission is in flight.
    pub fn jump_to(&mut self, index: usize) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        if index >= WizardStep::ordered().len() {
            return Err(WizardError::StepOutOfRange(index));
        }
        self.current = index;
        Ok(())
    }

    /// Execute the submission plan from the final step.
    ///
    /// On any failure the record is left untouched and the submitting flag
    /// is cleared so the caller may retry from the top; a retry re-sends the
    /// creation request, which can duplicate the upstream business record
    /// when a later section had failed. Sections already accepted by the
    /// backend are not rolled back.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<SubmissionReceipt, WizardError>
    where
        G: IntakeGateway + ?Sized,
    {
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        if self.current + 1 != WizardStep::ordered().len() {
            return Err(WizardError::NotAtFinalStep);
        }

        let missing: Vec<&'static str> = REQUIRED_AT_SUBMIT
            .iter()
            .copied()
            .filter(|field| self.record.text(field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(WizardError::MissingRequiredFields { fields: missing });
        }

        self.submitting = true;
        let outcome = self.plan.execute(&self.record, gateway).await;
        self.submitting = false;

        let receipt = outcome?;

        if let Err(err) = self.store.clear() {
            warn!(%err, "snapshot survived a successful submission");
        }
        self.record = FormRecord::template();
        self.current = 0;
        self.validity = fail_closed_validity();

        Ok(receipt)
    }

    /// Evaluate every step without touching controller state. Used by the
    /// review CLI and the batch submission endpoint.
    pub fn review(&self) -> Vec<StepReport> {
        WizardStep::ordered()
            .into_iter()
            .map(|step| self.rulebook.validate_step(step, &self.record))
            .collect()
    }

    fn revalidate_all(&mut self) {
        for step in WizardStep::ordered() {
            self.validate_step(step);
        }
    }

    fn persist(&self) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(&self.record)
            .map_err(|err| SnapshotError::Unavailable(err.to_string()))?;
        self.store.save(&raw)
    }
}

fn fail_closed_validity() -> BTreeMap<WizardStep, bool> {
    WizardStep::ordered()
        .into_iter()
        .map(|step| (step, false))
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Please complete \"{}\" before proceeding.", .step.label())]
    StepIncomplete { step: WizardStep },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("step index {0} is out of range")]
    StepOutOfRange(usize),
    #[error("submission is only available from the final step")]
    NotAtFinalStep,
    #[error("Please fill all required fields in the last step: {}", .fields.join(", "))]
    MissingRequiredFields { fields: Vec<&'static str> },
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Snapshot double keeping the blob in memory.
    #[derive(Default)]
    struct MemoryStore {
        blob: Mutex<Option<String>>,
    }

    impl SnapshotStore for MemoryStore {
        fn load(&self) -> Result<Option<String>, SnapshotError> {
            Ok(self.blob.lock().expect("store mutex poisoned").clone())
        }

        fn save(&self, raw: &str) -> Result<(), SnapshotError> {
            *self.blob.lock().expect("store mutex poisoned") = Some(raw.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<(), SnapshotError> {
            *self.blob.lock().expect("store mutex poisoned") = None;
            Ok(())
        }
    }

    #[test]
    fn starts_fail_closed_on_every_step() {
        let controller = WizardController::new(MemoryStore::default());
        for step in WizardStep::ordered() {
            assert!(!controller.step_validity(step), "{} open", step.label());
        }
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn malformed_snapshot_falls_back_to_template() {
        let store = MemoryStore::default();
        store.save("{not json").expect("seed");
        let controller = WizardController::new(store);
        assert_eq!(controller.record(), &FormRecord::template());
    }

    #[test]
    fn go_next_refused_until_step_is_valid() {
        let mut controller = WizardController::new(MemoryStore::default());
        let err = controller.go_next().expect_err("blocked");
        assert!(matches!(err, WizardError::StepIncomplete { .. }));
        assert_eq!(
            err.to_string(),
            "Please complete \"Business Info\" before proceeding."
        );
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn jump_rejects_out_of_range_indexes() {
        let mut controller = WizardController::new(MemoryStore::default());
        assert!(matches!(
            controller.jump_to(9),
            Err(WizardError::StepOutOfRange(9))
        ));
        controller.jump_to(7).expect("in range");
        assert_eq!(controller.current_step(), WizardStep::MarketingBudget);
    }

    #[test]
    fn go_back_is_a_no_op_on_the_first_step() {
        let mut controller = WizardController::new(MemoryStore::default());
        controller.go_back().expect("allowed");
        assert_eq!(controller.current_index(), 0);
    }
}
