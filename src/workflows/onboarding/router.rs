use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{FormRecord, WizardStep};
use super::lookup::CountryDirectory;
use super::submission::{SubmissionError, SubmissionPlan};
use super::transport::IntakeGateway;
use super::validation::Rulebook;

/// Stateless facade behind the batch submission endpoint: validate a full
/// record against every step's rule set, then run the submission plan.
pub struct OnboardingService<G, D> {
    gateway: Arc<G>,
    countries: Arc<D>,
    rulebook: Rulebook,
    plan: SubmissionPlan,
}

impl<G, D> OnboardingService<G, D>
where
    G: IntakeGateway + 'static,
    D: CountryDirectory + 'static,
{
    pub fn new(gateway: Arc<G>, countries: Arc<D>) -> Self {
        Self {
            gateway,
            countries,
            rulebook: Rulebook::standard(),
            plan: SubmissionPlan::standard(),
        }
    }
}

/// Router builder exposing the onboarding endpoints.
pub fn onboarding_router<G, D>(service: Arc<OnboardingService<G, D>>) -> Router
where
    G: IntakeGateway + 'static,
    D: CountryDirectory + 'static,
{
    Router::new()
        .route("/api/v1/onboarding/steps", get(steps_handler))
        .route(
            "/api/v1/onboarding/countries",
            get(countries_handler::<G, D>),
        )
        .route(
            "/api/v1/onboarding/submissions",
            post(submit_handler::<G, D>),
        )
        .with_state(service)
}

async fn steps_handler() -> Response {
    let steps: Vec<_> = WizardStep::ordered()
        .into_iter()
        .map(|step| {
            json!({
                "label": step.label(),
                "fields": step.fields(),
            })
        })
        .collect();
    (StatusCode::OK, axum::Json(json!({ "steps": steps }))).into_response()
}

async fn countries_handler<G, D>(State(service): State<Arc<OnboardingService<G, D>>>) -> Response
where
    G: IntakeGateway + 'static,
    D: CountryDirectory + 'static,
{
    match service.countries.countries().await {
        Ok(names) => (StatusCode::OK, axum::Json(json!({ "countries": names }))).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

async fn submit_handler<G, D>(
    State(service): State<Arc<OnboardingService<G, D>>>,
    axum::Json(record): axum::Json<FormRecord>,
) -> Response
where
    G: IntakeGateway + 'static,
    D: CountryDirectory + 'static,
{
    for step in WizardStep::ordered() {
        let report = service.rulebook.validate_step(step, &record);
        if !report.is_valid() {
            let payload = json!({
                "error": format!("Please complete \"{}\" before proceeding.", step.label()),
                "step": step.label(),
                "fields": report.errors,
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    }

    match service.plan.execute(&record, service.gateway.as_ref()).await {
        Ok(receipt) => {
            let payload = json!({
                "success": true,
                "id": receipt.business_key.0,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let section = match &err {
                SubmissionError::Creation { .. } => WizardStep::BusinessInfo.label(),
                SubmissionError::Section { section, .. } => section.label(),
            };
            let payload = json!({
                "error": err.to_string(),
                "section": section,
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}
