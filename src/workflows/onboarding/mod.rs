//! The multi-step onboarding wizard: form record, step rule sets, snapshot
//! persistence, and the ordered submission pipeline against the intake
//! backend.

pub mod controller;
pub mod domain;
pub mod lookup;
pub mod persistence;
pub mod router;
pub mod submission;
pub mod transport;
pub mod validation;

pub use controller::{WizardController, WizardError};
pub use domain::{fields, options, FieldValue, FormPatch, FormRecord, WizardStep};
pub use lookup::{CountryDirectory, LocationSearch, LookupError, QueryDebouncer, QueryToken};
pub use persistence::{FileSnapshotStore, SnapshotError, SnapshotStore};
pub use router::{onboarding_router, OnboardingService};
pub use submission::{
    SectionKind, SubmissionError, SubmissionPlan, SubmissionReceipt, FOREIGN_KEY_FIELD,
};
pub use transport::{
    BackendEnvelope, BusinessKey, HttpIntakeClient, IntakeGateway, TransportError,
    CREATE_BUSINESS_PATH,
};
pub use validation::{Rulebook, StepReport, StepRuleSet};
