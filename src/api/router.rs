//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! JSON routes are nested under `/api/`; the HTML portal sits at `/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Cache-Control: no-store → 2. Access log

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the full application router around shared state.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/illnesses", get(endpoints::session::illnesses))
        .route("/session", get(endpoints::session::current))
        .route("/session/register", post(endpoints::session::register))
        .route("/session/logout", post(endpoints::session::logout))
        .route("/journal/record", post(endpoints::journal::record))
        .route("/journal/log", get(endpoints::journal::log))
        .route("/journal/series", get(endpoints::journal::series))
        .route("/journal/graph", get(endpoints::journal::graph))
        .route("/journal/graph.svg", get(endpoints::journal::graph_svg))
        .route("/journal/suggestion", get(endpoints::journal::suggestion))
        .route("/resources", get(endpoints::resources::links));

    let portal = Router::new()
        .route("/", get(endpoints::portal::index))
        .route("/register", post(endpoints::portal::register))
        .route("/record", post(endpoints::portal::record))
        .route("/logout", post(endpoints::portal::logout));

    Router::new()
        .nest("/api", api)
        .merge(portal)
        .with_state(ctx)
        // Layers apply bottom-up: audit is innermost.
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::clock::FixedClock;

    fn test_core_state() -> (Arc<CoreState>, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ));
        (Arc::new(CoreState::with_clock(clock.clone())), clock)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    async fn send(core: &Arc<CoreState>, req: Request<Body>) -> Response<Body> {
        api_router(core.clone()).oneshot(req).await.unwrap()
    }

    async fn register(core: &Arc<CoreState>) {
        let req = json_request(
            "/api/session/register",
            r#"{"username":"sam","password":"pw","chronic_illness":"Migraines"}"#,
        );
        assert_eq!(send(core, req).await.status(), StatusCode::OK);
    }

    async fn record(core: &Arc<CoreState>, severity: i32) -> Response<Body> {
        let body = format!(r#"{{"symptom":"Migraine","severity":{severity},"notes":""}}"#);
        send(core, json_request("/api/journal/record", &body)).await
    }

    #[tokio::test]
    async fn health_succeeds_without_session() {
        let (core, _) = test_core_state();
        let response = send(&core, get_request("/api/health")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["session_active"], false);
    }

    #[tokio::test]
    async fn illnesses_lists_picklist() {
        let (core, _) = test_core_state();
        let json = body_json(send(&core, get_request("/api/illnesses")).await).await;
        let list = json.as_array().unwrap();
        assert_eq!(list.len(), 14);
        assert_eq!(list[0], "Diabetes");
        assert_eq!(list[13], "Other");
    }

    #[tokio::test]
    async fn journal_returns_503_without_session() {
        let (core, _) = test_core_state();
        for uri in ["/api/journal/log", "/api/journal/graph", "/api/journal/suggestion"] {
            let response = send(&core, get_request(uri)).await;
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        }
        let response = record(&core, 5).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NO_SESSION");
    }

    #[tokio::test]
    async fn register_returns_confirmation() {
        let (core, _) = test_core_state();
        let req = json_request(
            "/api/session/register",
            r#"{"username":"sam","chronic_illness":"Other","other_condition":"Lupus"}"#,
        );
        let json = body_json(send(&core, req).await).await;
        assert_eq!(
            json["message"],
            "You have successfully created your portal, sam! You have Lupus."
        );

        let summary = body_json(send(&core, get_request("/api/session")).await).await;
        assert_eq!(summary["portal_title"], "sam's Health Portal");
        assert_eq!(summary["registered_on"], "2024-01-01");
    }

    #[tokio::test]
    async fn register_rejects_blank_username_and_unknown_illness() {
        let (core, _) = test_core_state();
        let blank = json_request(
            "/api/session/register",
            r#"{"username":"  ","chronic_illness":"Asthma"}"#,
        );
        assert_eq!(send(&core, blank).await.status(), StatusCode::BAD_REQUEST);

        let unknown = json_request(
            "/api/session/register",
            r#"{"username":"sam","chronic_illness":"Gout"}"#,
        );
        assert_eq!(send(&core, unknown).await.status(), StatusCode::BAD_REQUEST);
        assert!(!core.is_active());
    }

    #[tokio::test]
    async fn record_rejects_out_of_range_severity() {
        let (core, _) = test_core_state();
        register(&core).await;

        assert_eq!(record(&core, 0).await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(record(&core, 11).await.status(), StatusCode::BAD_REQUEST);
        assert!(core.log_table().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_severity_uses_error_envelope() {
        let (core, _) = test_core_state();
        register(&core).await;

        for body in [
            r#"{"symptom":"Migraine","severity":5.5}"#,
            r#"{"symptom":"Migraine","severity":"high"}"#,
            r#"{"symptom":"Migraine","severity":99999999999}"#,
            r#"{"symptom":"Migraine"}"#,
        ] {
            let response = send(&core, json_request("/api/journal/record", body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "BAD_REQUEST", "{body}");
        }
        assert!(core.log_table().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rising_series_suggests_doctor() {
        let (core, clock) = test_core_state();
        register(&core).await;

        for severity in [3, 5, 9] {
            let response = record(&core, severity).await;
            assert_eq!(response.status(), StatusCode::OK);
            clock.advance_days(1);
        }

        let json = body_json(send(&core, get_request("/api/journal/suggestion")).await).await;
        assert_eq!(json["category"], "RAPID_INCREASE");
        assert_eq!(
            json["message"],
            "It's a good idea to consult a doctor. Your symptoms are increasing rather rapidly."
        );

        let log = body_json(send(&core, get_request("/api/journal/log")).await).await;
        assert_eq!(log["entries"].as_array().unwrap().len(), 3);
        assert_eq!(log["entries"][0]["date"], "2024-01-01");
    }

    #[tokio::test]
    async fn empty_log_graph_is_notice() {
        let (core, _) = test_core_state();
        register(&core).await;

        let json = body_json(send(&core, get_request("/api/journal/graph")).await).await;
        assert_eq!(json["kind"], "no_data");
        assert_eq!(json["message"], "No symptom logs available to display.");

        let svg = send(&core, get_request("/api/journal/graph.svg")).await;
        assert_eq!(svg.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(svg).await["error"]["code"], "NO_DATA");

        let suggestion =
            body_json(send(&core, get_request("/api/journal/suggestion")).await).await;
        assert_eq!(suggestion["category"], "INSUFFICIENT_DATA");
    }

    #[tokio::test]
    async fn graph_svg_served_once_logged() {
        let (core, _) = test_core_state();
        register(&core).await;
        record(&core, 4).await;

        let response = send(&core, get_request("/api/journal/graph.svg")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "image/svg+xml"
        );
        assert!(body_text(response).await.starts_with("<svg"));
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let (core, _) = test_core_state();
        register(&core).await;

        let json = body_json(send(&core, json_request("/api/session/logout", "")).await).await;
        assert_eq!(json["logged_out"], true);
        assert_eq!(json["message"], "You have successfully logged out.");

        let again = body_json(send(&core, json_request("/api/session/logout", "")).await).await;
        assert_eq!(again["logged_out"], false);

        let response = send(&core, get_request("/api/journal/log")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn resources_follow_illness() {
        let (core, _) = test_core_state();
        register(&core).await;
        let json = body_json(send(&core, get_request("/api/resources")).await).await;
        assert_eq!(json["illness"], "Migraines");
        assert!(json["cdc_search"].as_str().unwrap().ends_with("query=Migraines"));
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let (core, _) = test_core_state();
        let response = send(&core, get_request("/api/nonexistent")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn portal_shows_registration_then_portal() {
        let (core, _) = test_core_state();
        let html = body_text(send(&core, get_request("/")).await).await;
        assert!(html.contains("Register to Access Your Health Portal"));

        let response = send(
            &core,
            form_request(
                "/register",
                "username=sam&password=pw&chronic_illness=Heart+Disease&other_condition=",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "/?notice=registered"
        );

        let html = body_text(send(&core, get_request("/?notice=registered")).await).await;
        assert!(html.contains("You have successfully created your portal, sam! You have Heart Disease."));
        assert!(html.contains("Find Doctors Near You"));
    }

    #[tokio::test]
    async fn portal_record_and_graph() {
        let (core, _) = test_core_state();
        register(&core).await;

        let response = send(
            &core,
            form_request("/record", "symptom=Aura&severity=6&notes=bright+light"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let bad = send(&core, form_request("/record", "symptom=Aura&severity=high")).await;
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        send(&core, form_request("/record", "symptom=Halo&severity=9")).await;

        let html = body_text(send(&core, get_request("/?graph=true")).await).await;
        assert!(html.contains("<td>Aura</td>"));
        // one marker per table row
        assert_eq!(html.matches("<circle").count(), html.matches("<tr><td>").count());
        assert_eq!(html.matches("<circle").count(), 2);
        assert!(html.contains("<svg"));
        assert!(html.contains(r#"data-category="RAPID_INCREASE""#));
    }

    #[tokio::test]
    async fn portal_logout_returns_to_registration() {
        let (core, _) = test_core_state();
        register(&core).await;

        let response = send(&core, form_request("/logout", "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(!core.is_active());

        let html = body_text(send(&core, get_request("/?notice=logged_out")).await).await;
        assert!(html.contains("You have successfully logged out."));
        assert!(html.contains("Register to Access Your Health Portal"));
    }
}
