//! HTTP embedding for the Turtle scripting language: one route, no auth,
//! no persistence. Accepts a program as JSON and runs it synchronously
//! against a fresh root context.

use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use turtle_errors::render;
use turtle_interpreter::Canvas;

#[derive(Debug, Deserialize)]
struct RunRequest {
    code: String,
}

#[derive(Debug, Serialize)]
struct RunResponse {
    log: String,
    canvas: Option<Canvas>,
    error: Option<String>,
}

async fn run_program(Json(request): Json<RunRequest>) -> Json<RunResponse> {
    let response = match turtle_interpreter::run(&request.code) {
        Ok((canvas, log)) => RunResponse { log, canvas: Some(canvas), error: None },
        Err(err) => RunResponse { log: String::new(), canvas: None, error: Some(render(&request.code, &err)) },
    };
    Json(response)
}

fn app() -> Router {
    Router::new().route("/", post(run_program)).layer(CorsLayer::permissive()).layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let addr = std::env::var("TURTLE_SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8787".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("failed to bind server address");
    tracing::info!("listening on {addr}");
    axum::serve(listener, app()).await.expect("server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn run_endpoint_returns_log_and_canvas() {
        let body = serde_json::json!({ "code": "println(\"hi\")" }).to_string();
        let request = Request::post("/").header("content-type", "application/json").body(Body::from(body)).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: RunResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.log, "hi\n");
        assert!(parsed.error.is_none());
    }

    #[tokio::test]
    async fn run_endpoint_reports_errors_without_a_canvas() {
        let body = serde_json::json!({ "code": "x = 1 / 0" }).to_string();
        let request = Request::post("/").header("content-type", "application/json").body(Body::from(body)).unwrap();
        let response = app().oneshot(request).await.unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: RunResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(parsed.canvas.is_none());
        assert!(parsed.error.unwrap().contains("division by zero"));
    }
}
