// The dev server is plain static serving over the build output.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use packlab::config::Config;
use packlab::server::router;
use tempfile::TempDir;
use tower::ServiceExt;

fn served_config(tmp: &TempDir) -> Config {
    let out = tmp.path().join("dist");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("index.html"), "<html><body>ok</body></html>").unwrap();
    let mut config = Config::default();
    config.build.output_dir = out;
    config
}

#[tokio::test]
async fn test_serves_built_files() {
    let tmp = TempDir::new().unwrap();
    let app = router(&served_config(&tmp));

    let response = app
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let tmp = TempDir::new().unwrap();
    let app = router(&served_config(&tmp));

    let response = app
        .oneshot(Request::builder().uri("/nope.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
