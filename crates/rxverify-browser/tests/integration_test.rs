use rxverify_browser::BrowserSession;
use rxverify_core::{BrowserRunConfig, ExecutionMode};

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_session_page_scope_lifecycle() {
    let config = BrowserRunConfig::default();
    let session = BrowserSession::launch(ExecutionMode::Devcontainer, &config)
        .await
        .expect("launch browser session");

    let scope = session.open_page().await.expect("open page scope");
    scope
        .navigate("about:blank")
        .await
        .expect("navigate to blank page");
    assert!(!scope.exists("#does-not-exist").await);
    scope.close().await;

    // Page scopes are independent; a second one opens after the first closed
    let scope = session.open_page().await.expect("open second page scope");
    scope.close().await;

    session.close().await;
}

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_navigation_failure_surfaces_error() {
    let config = BrowserRunConfig::default();
    let session = BrowserSession::launch(ExecutionMode::Devcontainer, &config)
        .await
        .expect("launch browser session");

    let scope = session.open_page().await.expect("open page scope");
    let result = scope
        .navigate("http://localhost:1/unreachable-registry")
        .await;
    assert!(result.is_err());

    scope.close().await;
    session.close().await;
}
