//! The single static HTTP surface: `GET /` returns the landing page.

use axum::{response::Html, routing::get, Router};
use tracing::{error, info};

use tbx_core::{Error, Result};

const INDEX_HTML: &str = include_str!("../assets/index.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Bind the landing page and serve it on a background task.
///
/// A bind failure is fatal at startup; a serve failure afterwards is logged
/// only — the bot keeps running without the page.
pub async fn spawn(port: u16) -> Result<()> {
    let app = Router::new().route("/", get(index));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(Error::Io)?;
    info!(port, "serving landing page");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!(error = %e, "landing page server failed");
        }
    });

    Ok(())
}
