//! Login gate behavior: presence of a session user decides between
//! delegation and a login redirect carrying a return path.

use context::SessionUser;
use http::StatusCode;
use indoc::indoc;
use integration_tests::{TestApp, location};

#[tokio::test]
async fn anonymous_request_redirects_to_login_with_return_path() {
    let app = TestApp::builder().build();

    let response = app.get("/dashboard", None).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?next=%2Fdashboard");
}

#[tokio::test]
async fn return_path_carries_the_query_string() {
    let app = TestApp::builder().build();

    let response = app.get("/dashboard?tab=alerts&page=2", None).await;

    assert_eq!(
        location(&response),
        "/login?next=%2Fdashboard%3Ftab%3Dalerts%26page%3D2"
    );
}

#[tokio::test]
async fn authenticated_request_reaches_the_handler() {
    let app = TestApp::builder().build();

    let response = app.get("/dashboard", Some(SessionUser::new("jdoe"))).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn configured_login_url_is_honored() {
    let app = TestApp::builder()
        .config(indoc! {r#"
            [gate]
            login_url = "/account/login"
        "#})
        .build();

    let response = app.get("/dashboard", None).await;

    assert_eq!(location(&response), "/account/login?next=%2Fdashboard");
}

#[tokio::test]
async fn decisions_are_idempotent() {
    let app = TestApp::builder().build();

    let first = app.get("/dashboard", None).await;
    let second = app.get("/dashboard", None).await;

    assert_eq!(first.status(), second.status());
    assert_eq!(location(&first), location(&second));
}

#[tokio::test]
async fn public_routes_are_untouched() {
    let app = TestApp::builder().build();

    let response = app.get("/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
}
