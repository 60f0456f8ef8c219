//! Integration tests for the marketing pages, preferences and forms.
//!
//! Run with: cargo test -p spaceway-integration-tests --test site_pages

use reqwest::StatusCode;
use spaceway_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_marketing_pages_render() {
    let ctx = TestContext::new().await;

    for path in [
        "/",
        "/products",
        "/about",
        "/turnover",
        "/support",
        "/demo",
        "/login",
        "/register",
    ] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        assert!(resp.headers().contains_key("content-security-policy"), "{path}");
    }
}

#[tokio::test]
async fn test_legal_pages_and_unknown_paths() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/privacy").await.text().await.expect("Failed to read response");
    assert!(body.contains("Privacy Policy"));
    assert!(body.contains("On this page"));
    assert!(body.contains(r#"href="/terms""#));

    let resp = ctx.get("/pricing-secrets").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let ctx = TestContext::new().await;

    let home = ctx.get("/").await.text().await.expect("Failed to read response");
    let start = home.find("/static/css/derived/main.").expect("stylesheet link");
    let href: String = home
        .get(start..)
        .unwrap_or_default()
        .chars()
        .take_while(|c| *c != '"')
        .collect();

    let resp = ctx.get(&href).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let css = resp.text().await.expect("Failed to read response");
    assert!(css.contains(".h-100"));
}

#[tokio::test]
async fn test_theme_toggle_round_trip() {
    let ctx = TestContext::new().await;

    let body = ctx.get("/products").await.text().await.expect("Failed to read response");
    assert!(body.contains(r#"<html lang="en" class="light">"#));

    let resp = ctx.post_form("/theme", &[("return_to", "/products")]).await;
    assert_eq!(location(&resp), "/products");
    let body = ctx.get("/products").await.text().await.expect("Failed to read response");
    assert!(body.contains(r#"<html lang="en" class="dark">"#));

    ctx.post_form("/theme", &[("return_to", "/products")]).await;
    let body = ctx.get("/products").await.text().await.expect("Failed to read response");
    assert!(body.contains(r#"<html lang="en" class="light">"#));
}

#[tokio::test]
async fn test_theme_toggle_ignores_offsite_return() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form("/theme", &[("return_to", "https://evil.example/")])
        .await;
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn test_demo_request_thanks_visitor() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/demo",
            &[
                ("name", "Ravi Kumar"),
                ("email", "ravi@shop.in"),
                ("phone", ""),
                ("company", "Kumar Textiles"),
                ("message", "Repricing for Flipkart"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/demo");

    let body = ctx.get("/demo").await.text().await.expect("Failed to read response");
    assert!(body.contains("schedule your demo within 24 hours"));

    // The toast is shown once
    let body = ctx.get("/demo").await.text().await.expect("Failed to read response");
    assert!(!body.contains("schedule your demo within 24 hours"));
}

#[tokio::test]
async fn test_support_form_errors_rerender() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/support",
            &[("name", ""), ("email", "ravi"), ("subject", ""), ("message", "")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Name is required"));
    assert!(body.contains("Invalid email format"));
    assert!(body.contains("Message is required"));
}

#[tokio::test]
async fn test_faq_category_tab() {
    let ctx = TestContext::new().await;

    let body = ctx
        .get("/support?category=billing")
        .await
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains(r#"class="tab active" href="/support?category=billing#faq""#));
}
