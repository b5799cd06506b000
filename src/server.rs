//! Development server: static file serving over the build output, nothing
//! else. Failure semantics are the host stack's own (404 from ServeDir,
//! bind errors propagate).

use crate::config::Config;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;

pub fn router(config: &Config) -> Router {
    Router::new().fallback_service(ServeDir::new(&config.build.output_dir))
}

/// Serve the output dir on the configured port until interrupted.
pub async fn serve(config: &Config) -> Result<()> {
    let app = router(config);
    let addr = SocketAddr::from(([127, 0, 0, 1], config.server.port));
    tracing::info!("dev server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dev server to {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
