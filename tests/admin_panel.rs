//! Integration specifications for the admin review panel: the session gate,
//! the hidden-on-delete directory, and the report/listing endpoints.

mod common {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use onboard_ai::workflows::admin::{
        AdminDirectory, AdminPanelService, BusinessDetail, BusinessId, BusinessStatus,
        BusinessSummary, DirectoryGateway, GatewayError, LoginRequest, SessionGate,
        SessionGateway, SocialMediaInfo,
    };
    use onboard_ai::workflows::onboarding::persistence::{SnapshotError, SnapshotStore};

    #[derive(Default, Clone)]
    pub(crate) struct MemoryLedger {
        blob: Arc<Mutex<Option<String>>>,
    }

    impl SnapshotStore for MemoryLedger {
        fn load(&self) -> Result<Option<String>, SnapshotError> {
            Ok(self.blob.lock().expect("ledger mutex poisoned").clone())
        }

        fn save(&self, raw: &str) -> Result<(), SnapshotError> {
            *self.blob.lock().expect("ledger mutex poisoned") = Some(raw.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<(), SnapshotError> {
            *self.blob.lock().expect("ledger mutex poisoned") = None;
            Ok(())
        }
    }

    pub(crate) struct StubDirectory {
        summaries: Vec<BusinessSummary>,
        details: BTreeMap<BusinessId, BusinessDetail>,
    }

    impl StubDirectory {
        pub(crate) fn with_sample_rows() -> Self {
            let mut details = BTreeMap::new();
            details.insert(
                BusinessId("1".to_string()),
                BusinessDetail {
                    id: BusinessId("1".to_string()),
                    business_name: "Acme Studio".to_string(),
                    location: Some("Kathmandu".to_string()),
                    email: Some("owner@acme.test".to_string()),
                    social_media_info: Some(SocialMediaInfo {
                        social_accounts_exist: Some("yes".to_string()),
                        selected_platforms: vec!["Facebook".to_string()],
                        ..SocialMediaInfo::default()
                    }),
                    ..BusinessDetail::default()
                },
            );

            Self {
                summaries: vec![
                    summary("1", "Acme Studio", BusinessStatus::Active),
                    summary("2", "Bloom Bakery", BusinessStatus::Pending),
                    summary("3", "Cedar Cafe", BusinessStatus::Pending),
                ],
                details,
            }
        }
    }

    fn summary(id: &str, name: &str, status: BusinessStatus) -> BusinessSummary {
        BusinessSummary {
            id: BusinessId(id.to_string()),
            business_name: name.to_string(),
            location: Some("Kathmandu".to_string()),
            phone_number: Some("+9779812345678".to_string()),
            status,
            submitted_at: None,
        }
    }

    #[async_trait]
    impl DirectoryGateway for StubDirectory {
        async fn list_businesses(&self) -> Result<Vec<BusinessSummary>, GatewayError> {
            Ok(self.summaries.clone())
        }

        async fn fetch_business(
            &self,
            id: &BusinessId,
        ) -> Result<Option<BusinessDetail>, GatewayError> {
            Ok(self.details.get(id).cloned())
        }
    }

    #[derive(Default)]
    pub(crate) struct StubSessions {
        logged_in: AtomicBool,
        reject_login: bool,
    }

    impl StubSessions {
        pub(crate) fn authenticated() -> Self {
            let sessions = Self::default();
            sessions.logged_in.store(true, Ordering::Relaxed);
            sessions
        }

        pub(crate) fn rejecting() -> Self {
            Self {
                logged_in: AtomicBool::new(false),
                reject_login: true,
            }
        }
    }

    #[async_trait]
    impl SessionGateway for StubSessions {
        async fn login(&self, _request: &LoginRequest) -> Result<(), GatewayError> {
            if self.reject_login {
                return Err(GatewayError::Rejected("Invalid login.".to_string()));
            }
            self.logged_in.store(true, Ordering::Relaxed);
            Ok(())
        }

        async fn check_session(&self) -> Result<bool, GatewayError> {
            Ok(self.logged_in.load(Ordering::Relaxed))
        }
    }

    pub(crate) type Service = AdminPanelService<StubDirectory, StubSessions, MemoryLedger>;

    pub(crate) fn build_service(sessions: StubSessions, ledger: MemoryLedger) -> Arc<Service> {
        Arc::new(AdminPanelService {
            directory: AdminDirectory::new(Arc::new(StubDirectory::with_sample_rows()), Arc::new(ledger)),
            sessions: SessionGate::new(Arc::new(sessions)),
        })
    }
}

mod directory {
    use super::common::*;
    use onboard_ai::workflows::admin::{
        AdminDirectory, BusinessId, BusinessStatus, DirectoryError,
    };
    use std::sync::Arc;

    fn directory(ledger: MemoryLedger) -> AdminDirectory<StubDirectory, MemoryLedger> {
        AdminDirectory::new(
            Arc::new(StubDirectory::with_sample_rows()),
            Arc::new(ledger),
        )
    }

    #[tokio::test]
    async fn deleted_businesses_disappear_and_stay_hidden() {
        let ledger = MemoryLedger::default();
        let first = directory(ledger.clone());
        first.delete(&BusinessId("2".to_string())).expect("delete");

        let names: Vec<_> = first
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|summary| summary.business_name)
            .collect();
        assert_eq!(names, ["Acme Studio", "Cedar Cafe"]);

        // A fresh directory over the same ledger still hides the id.
        let rebuilt = directory(ledger);
        assert_eq!(rebuilt.list().await.expect("list").len(), 2);
        assert!(matches!(
            rebuilt.detail(&BusinessId("2".to_string())).await,
            Err(DirectoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn search_matches_names_case_insensitively() {
        let directory = directory(MemoryLedger::default());
        let hits = directory.search("cAfE").await.expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].business_name, "Cedar Cafe");
    }

    #[tokio::test]
    async fn status_overrides_apply_to_listings_only_locally() {
        let directory = directory(MemoryLedger::default());
        directory.set_status(&BusinessId("3".to_string()), BusinessStatus::Active);

        let listed = directory.list().await.expect("list");
        let cedar = listed
            .iter()
            .find(|summary| summary.id == BusinessId("3".to_string()))
            .expect("cedar row");
        assert_eq!(cedar.status, BusinessStatus::Active);
    }

    #[tokio::test]
    async fn unknown_businesses_are_not_found() {
        let directory = directory(MemoryLedger::default());
        assert!(matches!(
            directory.detail(&BusinessId("missing".to_string())).await,
            Err(DirectoryError::NotFound)
        ));
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use onboard_ai::workflows::admin::admin_router;

    fn authenticated_router() -> axum::Router {
        admin_router(build_service(
            StubSessions::authenticated(),
            MemoryLedger::default(),
        ))
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn data_routes_refuse_unauthenticated_callers() {
        let router = admin_router(build_service(
            StubSessions::default(),
            MemoryLedger::default(),
        ));
        let response = router
            .oneshot(get("/api/v1/admin/businesses"))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn listing_returns_visible_rows() {
        let router = authenticated_router();
        let response = router
            .oneshot(get("/api/v1/admin/businesses"))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        let rows = payload
            .get("businesses")
            .and_then(Value::as_array)
            .expect("rows");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("business_name"), Some(&json!("Acme Studio")));
    }

    #[tokio::test]
    async fn detail_and_report_render_one_business() {
        let router = authenticated_router();

        let response = router
            .clone()
            .oneshot(get("/api/v1/admin/businesses/1"))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload.get("business_name"), Some(&json!("Acme Studio")));

        let response = router
            .oneshot(get("/api/v1/admin/businesses/1/report"))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let html = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(html.contains("<h1>Acme Studio</h1>"));
        assert!(html.contains("Social Media Information"));
    }

    #[tokio::test]
    async fn delete_endpoint_hides_the_business() {
        let router = authenticated_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/admin/businesses/1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(get("/api/v1/admin/businesses/1"))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn status_endpoint_stores_the_override() {
        let router = authenticated_router();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/admin/businesses/2/status")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"status":"active"}"#))
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(get("/api/v1/admin/businesses"))
            .await
            .expect("dispatch");
        let payload = read_json(response).await;
        let rows = payload
            .get("businesses")
            .and_then(Value::as_array)
            .expect("rows");
        let bloom = rows
            .iter()
            .find(|row| row.get("id") == Some(&json!("2")))
            .expect("bloom row");
        assert_eq!(bloom.get("status"), Some(&json!("active")));
    }

    #[tokio::test]
    async fn login_validates_locally_before_the_backend() {
        let router = admin_router(build_service(
            StubSessions::rejecting(),
            MemoryLedger::default(),
        ));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/admin/login")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"email":"not-an-email","password":"secret1"}"#,
                    ))
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json(response).await;
        assert_eq!(payload.get("error"), Some(&json!("Enter a valid email.")));

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/admin/login")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"email":"staff@agency.test","password":"secret1"}"#,
                    ))
                    .expect("request"),
            )
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn session_probe_reflects_the_gate() {
        let router = authenticated_router();
        let response = router
            .oneshot(get("/api/v1/admin/session"))
            .await
            .expect("dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload.get("loggedIn"), Some(&json!(true)));
    }
}
