//! Stub HTTP agent for transport tests.
//!
//! Serves `POST /move` on an ephemeral localhost port, records every JSON body
//! it receives, and answers with whatever the test's responder returns.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

/// What the stub sends back for one request.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl StubReply {
    /// `200 {"column": n}`
    pub fn column(column: i64) -> Self {
        Self::json(serde_json::json!({ "column": column }))
    }

    pub fn json(value: Value) -> Self {
        Self::raw(value.to_string())
    }

    /// `200` with an arbitrary body, sent as-is even when it is not JSON.
    pub fn raw(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: r#"{"error": "stub"}"#.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = dyn Fn(&Value) -> StubReply + Send + Sync;

#[derive(Clone)]
struct StubState {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn handle_move(state: web::Data<StubState>, body: web::Json<Value>) -> HttpResponse {
    let body = body.into_inner();
    let reply = (state.responder)(&body);
    state.requests.lock().push(body);

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status)
        .content_type("application/json")
        .body(reply.body)
}

/// A running stub agent; stopped when dropped.
pub struct StubAgent {
    url: String,
    requests: Arc<Mutex<Vec<Value>>>,
    handle: ServerHandle,
}

impl StubAgent {
    /// Bind to an ephemeral localhost port and start serving.
    pub async fn start<F>(responder: F) -> std::io::Result<Self>
    where
        F: Fn(&Value) -> StubReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            responder: Arc::new(responder),
            requests: Arc::clone(&requests),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/move", web::post().to(handle_move))
        })
        .workers(2)
        .disable_signals()
        .listen(listener)?
        .run();

        let handle = server.handle();
        let address = url.clone();
        tokio::spawn(async move {
            if let Err(e) = server.await {
                debug!(stub = %address, error = %e, "Stub agent server exited with error");
            }
        });

        Ok(Self {
            url,
            requests,
            handle,
        })
    }

    /// Base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON bodies received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    /// Stop accepting requests and wait for the server to wind down.
    pub async fn stop(&self) {
        self.handle.stop(false).await;
    }
}

impl Drop for StubAgent {
    fn drop(&mut self) {
        // The stop command is sent on call; the returned future only awaits completion.
        let _ = self.handle.stop(false);
    }
}

/// A localhost URL nothing is listening on.
pub fn unused_local_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
