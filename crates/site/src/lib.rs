//! Spaceway marketing site library.
//!
//! This crate provides the site as a library, allowing the router to be
//! tested in-process and reused by the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod marketing;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

use content::LEGAL_SLUGS;
use state::AppState;

/// Build the full application router.
///
/// Layers run outermost first in the order documented on [`middleware`];
/// the Sentry layers are added by the binary.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let auth_context = from_fn_with_state(state.clone(), middleware::auth_context_middleware);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes().route_layer(auth_context))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::csp_nonce_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until every legal page has loaded.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if LEGAL_SLUGS
        .iter()
        .all(|slug| state.content().get_page(slug).is_some())
    {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{
        Request,
        header::{
            CONTENT_DISPOSITION, CONTENT_SECURITY_POLICY, CONTENT_TYPE, COOKIE, LOCATION,
            SET_COOKIE,
        },
    };
    use axum::response::Response;
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::{StubBackend, VALID_PASSWORD};

    async fn test_app() -> (Router, StubBackend) {
        let backend = StubBackend::spawn().await;
        let content_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("content");
        let state = AppState::new(backend.config(), &content_dir).unwrap();
        let static_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
        (app(state, static_dir), backend)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let raw = response.headers()[SET_COOKIE].to_str().unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _backend) = test_app().await;

        let response = app.clone().oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");

        let response = app.oneshot(get("/health/ready", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_home_page_renders_with_security_headers() {
        let (app, _backend) = test_app().await;

        let response = app.oneshot(get("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let csp = response.headers()[CONTENT_SECURITY_POLICY].to_str().unwrap().to_string();
        assert!(csp.contains("script-src 'self' 'nonce-"));
        assert!(response.headers().contains_key("x-request-id"));

        let body = body_text(response).await;
        assert!(body.contains("Spaceway"));
    }

    #[tokio::test]
    async fn test_home_calculator_worked_example() {
        let (app, _backend) = test_app().await;

        let response = app
            .oneshot(get(
                "/?current_price=299&monthly_volume=1000&competitor_price=279",
                None,
            ))
            .await
            .unwrap();
        let body = body_text(response).await;

        assert!(body.contains("₹3,18,060"));
        assert!(body.contains("6.4%"));
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_home() {
        let (app, _backend) = test_app().await;

        let response = app.oneshot(get("/no/such/page", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[tokio::test]
    async fn test_legal_pages() {
        let (app, _backend) = test_app().await;

        for slug in LEGAL_SLUGS {
            let response = app.clone().oneshot(get(&format!("/{slug}"), None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{slug}");
        }
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        let (app, _backend) = test_app().await;

        let response = app.oneshot(get("/dashboard", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_login_logout_flow() {
        let (app, _backend) = test_app().await;

        let body = format!("email=asha%40shop.in&password={VALID_PASSWORD}");
        let response = app.clone().oneshot(post_form("/login", &body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/dashboard");
        let cookie = session_cookie(&response);

        let response = app.clone().oneshot(get("/dashboard", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Asha"));

        let response = app
            .clone()
            .oneshot(post_form("/logout", "", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.headers()[LOCATION], "/login");

        let response = app.oneshot(get("/dashboard", Some(&cookie))).await.unwrap();
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_rejected_login_carries_backend_message() {
        let (app, _backend) = test_app().await;

        let response = app
            .oneshot(post_form("/login", "email=asha%40shop.in&password=wrong-password", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[LOCATION],
            "/login?error=Invalid%20email%20or%20password"
        );
    }

    #[tokio::test]
    async fn test_invalid_login_form_rerenders() {
        let (app, _backend) = test_app().await;

        let response = app
            .oneshot(post_form("/login", "email=nope&password=short", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(response).await;
        assert!(body.contains("Invalid email format"));
        assert!(body.contains("Password must be at least 8 characters"));
    }

    #[tokio::test]
    async fn test_register_with_repeated_services() {
        let (app, _backend) = test_app().await;

        let body = format!(
            "firstName=Asha&lastName=Verma&email=new%40shop.in&password={VALID_PASSWORD}\
             &contact=9876543210&services=pricing-automation&services=gst-services&terms=on"
        );
        let response = app.oneshot(post_form("/register", &body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_unauthorized_registration_goes_to_login() {
        let (app, _backend) = test_app().await;

        let body = format!(
            "firstName=Asha&lastName=Verma&email=locked%40shop.in&password={VALID_PASSWORD}\
             &contact=9876543210&services=gst-services&terms=on"
        );
        let response = app.oneshot(post_form("/register", &body, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login?error=Account%20locked");
    }

    #[tokio::test]
    async fn test_theme_toggle_ignores_header_breaking_return_path() {
        let (app, _backend) = test_app().await;

        let response = app
            .oneshot(post_form("/theme", "return_to=%2Fabout%0D%0ASet-Cookie%3A%20x%3D1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[tokio::test]
    async fn test_theme_toggle_persists() {
        let (app, _backend) = test_app().await;

        let response = app
            .clone()
            .oneshot(post_form("/theme", "return_to=%2Fabout", None))
            .await
            .unwrap();
        assert_eq!(response.headers()[LOCATION], "/about");
        let cookie = session_cookie(&response);

        let response = app.oneshot(get("/about", Some(&cookie))).await.unwrap();
        assert!(body_text(response).await.contains(r#"<html lang="en" class="dark">"#));
    }

    #[tokio::test]
    async fn test_support_request_shows_toast() {
        let (app, _backend) = test_app().await;

        let response = app
            .clone()
            .oneshot(post_form(
                "/support",
                "name=Ravi&email=ravi%40shop.in&subject=Help&message=Prices&priority=high",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.headers()[LOCATION], "/support");
        let cookie = session_cookie(&response);

        let response = app.oneshot(get("/support", Some(&cookie))).await.unwrap();
        assert!(body_text(response).await.contains("get back to you within 4 hours"));
    }

    #[tokio::test]
    async fn test_turnover_report_download() {
        let (app, _backend) = test_app().await;

        let response = app.oneshot(get("/turnover/report.csv?products=20", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
        assert!(
            response.headers()[CONTENT_DISPOSITION]
                .to_str()
                .unwrap()
                .contains("spaceway_turnover_report.csv")
        );
        assert!(body_text(response).await.starts_with("Spaceway Turnover Report"));
    }

    #[tokio::test]
    async fn test_calculator_api() {
        let (app, _backend) = test_app().await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/calculator/pricing",
                &serde_json::json!({
                    "current_price": 299,
                    "monthly_volume": 1000,
                    "competitor_price": 279
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["display"]["optimized_price"], "₹265.05");
        assert_eq!(json["series"][0]["name"], "Current");

        let response = app
            .oneshot(post_json(
                "/api/calculator/turnover",
                &serde_json::json!({
                    "products": 500,
                    "avg_sale": 0,
                    "frequency": 10,
                    "margin": 25,
                    "costs": 15
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["field"], "avg_sale");
    }
}
