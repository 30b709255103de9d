// rest/mod.rs — HTTP server for the task-list API.
//
// Endpoints:
//   GET    /todos
//   POST   /todos
//   PATCH  /todos/{id}/toggle
//   PATCH  /todos/{id}
//   DELETE /todos/{id}
//
// Everything else falls through to the compiled client bundle (ServeDir).

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use crate::AppContext;

/// Fixed CORS allow-list: the Vite dev server and the deployed client.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "https://todod.fly.dev"];

/// Bind the listener and serve until the process exits. The store connection
/// must already be established by the caller; nothing is accepted before it.
pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", ctx.config.port).parse()?;
    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server running on http://{addr}");
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let static_dir = ctx.config.static_dir.clone();
    Router::new()
        .route(
            "/todos",
            get(routes::todos::list_todos).post(routes::todos::create_todo),
        )
        .route("/todos/{id}/toggle", patch(routes::todos::toggle_todo))
        .route(
            "/todos/{id}",
            patch(routes::todos::edit_todo).delete(routes::todos::delete_todo),
        )
        .fallback_service(ServeDir::new(static_dir))
        .with_state(ctx)
        .layer(cors_layer())
        .layer(middleware::from_fn(origin_gate))
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .map(|o| HeaderValue::from_static(o))
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(origins)
}

/// Requests without an Origin header pass through untouched; requests with an
/// Origin outside the allow-list are rejected before any handler runs.
async fn origin_gate(req: Request, next: Next) -> Response {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|o| ALLOWED_ORIGINS.contains(&o))
            .unwrap_or(false);
        if !allowed {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "message": "CORS policy does not allow access from this origin."
                })),
            )
                .into_response();
        }
    }
    next.run(req).await
}
