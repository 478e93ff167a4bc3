use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use crate::workflows::onboarding::persistence::SnapshotStore;

use super::directory::{AdminDirectory, DirectoryError};
use super::domain::{BusinessId, BusinessStatus, LoginRequest};
use super::gateway::{DirectoryGateway, SessionGateway};
use super::report::render_business_report;
use super::session::{LoginError, SessionGate};

/// Everything the admin panel endpoints need: the directory view and the
/// session gate in front of it.
pub struct AdminPanelService<G, S, L> {
    pub directory: AdminDirectory<G, L>,
    pub sessions: SessionGate<S>,
}

/// Router builder for the admin review panel. Data routes are refused
/// without a live backend session; login and the session probe stay open.
pub fn admin_router<G, S, L>(service: Arc<AdminPanelService<G, S, L>>) -> Router
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    Router::new()
        .route("/api/v1/admin/login", post(login_handler::<G, S, L>))
        .route("/api/v1/admin/session", get(session_handler::<G, S, L>))
        .route("/api/v1/admin/businesses", get(list_handler::<G, S, L>))
        .route(
            "/api/v1/admin/businesses/:id",
            get(detail_handler::<G, S, L>).delete(delete_handler::<G, S, L>),
        )
        .route(
            "/api/v1/admin/businesses/:id/status",
            post(status_handler::<G, S, L>),
        )
        .route(
            "/api/v1/admin/businesses/:id/report",
            get(report_handler::<G, S, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: BusinessStatus,
}

async fn login_handler<G, S, L>(
    State(service): State<Arc<AdminPanelService<G, S, L>>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    match service.sessions.login(&request).await {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err @ (LoginError::InvalidEmail | LoginError::PasswordTooShort)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        }
    }
}

async fn session_handler<G, S, L>(
    State(service): State<Arc<AdminPanelService<G, S, L>>>,
) -> Response
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    let logged_in = service.sessions.is_authenticated().await;
    (
        StatusCode::OK,
        axum::Json(json!({ "loggedIn": logged_in })),
    )
        .into_response()
}

async fn list_handler<G, S, L>(State(service): State<Arc<AdminPanelService<G, S, L>>>) -> Response
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    if let Some(refusal) = require_session(&service).await {
        return refusal;
    }
    match service.directory.list().await {
        Ok(businesses) => (
            StatusCode::OK,
            axum::Json(json!({ "businesses": businesses })),
        )
            .into_response(),
        Err(err) => directory_error_response(err),
    }
}

async fn detail_handler<G, S, L>(
    State(service): State<Arc<AdminPanelService<G, S, L>>>,
    Path(id): Path<String>,
) -> Response
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    if let Some(refusal) = require_session(&service).await {
        return refusal;
    }
    match service.directory.detail(&BusinessId(id)).await {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

async fn delete_handler<G, S, L>(
    State(service): State<Arc<AdminPanelService<G, S, L>>>,
    Path(id): Path<String>,
) -> Response
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    if let Some(refusal) = require_session(&service).await {
        return refusal;
    }
    match service.directory.delete(&BusinessId(id)) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(err) => directory_error_response(err),
    }
}

async fn status_handler<G, S, L>(
    State(service): State<Arc<AdminPanelService<G, S, L>>>,
    Path(id): Path<String>,
    axum::Json(change): axum::Json<StatusChange>,
) -> Response
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    if let Some(refusal) = require_session(&service).await {
        return refusal;
    }
    service.directory.set_status(&BusinessId(id), change.status);
    let payload = json!({ "success": true, "status": change.status.label() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

async fn report_handler<G, S, L>(
    State(service): State<Arc<AdminPanelService<G, S, L>>>,
    Path(id): Path<String>,
) -> Response
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    if let Some(refusal) = require_session(&service).await {
        return refusal;
    }
    match service.directory.detail(&BusinessId(id)).await {
        Ok(detail) => {
            let html = render_business_report(&detail, Local::now().date_naive());
            Html(html).into_response()
        }
        Err(err) => directory_error_response(err),
    }
}

async fn require_session<G, S, L>(service: &AdminPanelService<G, S, L>) -> Option<Response>
where
    G: DirectoryGateway + 'static,
    S: SessionGateway + 'static,
    L: SnapshotStore + 'static,
{
    if service.sessions.is_authenticated().await {
        None
    } else {
        let payload = json!({ "error": "admin session required" });
        Some((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response())
    }
}

fn directory_error_response(err: DirectoryError) -> Response {
    let status = match &err {
        DirectoryError::NotFound => StatusCode::NOT_FOUND,
        DirectoryError::Gateway(_) => StatusCode::BAD_GATEWAY,
        DirectoryError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
