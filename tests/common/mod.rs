//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which builds a full [`AppContext`] around a
//! [`FakeTool`] so route tests never spawn ffmpeg. [`TestHarness::with_server`]
//! starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pf_av::fake::FakeTool;
use pf_av::ToolRegistry;
use pf_core::config::Config;
use pf_server::context::AppContext;
use pf_server::router::build_router;

pub const BOUNDARY: &str = "pixforge-integration-boundary";

/// Test harness wrapping an [`AppContext`] backed by a [`FakeTool`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub tool: Arc<FakeTool>,
}

impl TestHarness {
    /// Harness whose tool probes every upload as `codec`.
    pub fn new(codec: &str) -> Self {
        Self::with_tool(FakeTool::new(codec))
    }

    pub fn with_tool(tool: FakeTool) -> Self {
        Self::with_tool_and_config(tool, Config::default())
    }

    pub fn with_tool_and_config(tool: FakeTool, config: Config) -> Self {
        let tool = Arc::new(tool);
        let ctx = AppContext::new(
            config,
            tool.clone(),
            Arc::new(ToolRegistry::default()),
        );
        Self { ctx, tool }
    }

    pub fn router(&self) -> Router {
        build_router(self.ctx.clone())
    }

    /// Send one request through the router without binding a socket.
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Start an Axum server on a random port.
    pub async fn with_server(codec: &str) -> (Self, SocketAddr) {
        let harness = Self::new(codec);
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// Build a `multipart/form-data` POST with optional `file` and text fields.
pub fn multipart_request(uri: &str, file: Option<&[u8]>, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(data) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"image\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

/// The `detail` message of an error response.
pub async fn detail(response: Response) -> String {
    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("JSON error body");
    body["detail"]
        .as_str()
        .expect("detail is a string")
        .to_string()
}
