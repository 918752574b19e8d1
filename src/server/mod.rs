//! HTTP server for the EcoQuest API
//!
//! Listens on the configured address (default 127.0.0.1:5000) and serves:
//! - POST /complete_lesson/{id} - Mark a lesson as completed
//! - POST /submit_quiz/{id} - Grade a quiz submission
//! - Read-only catalog and progress endpoints (see [`routes`])
//!
//! Requests are handled one at a time on the server thread. Separate server
//! processes may share one database; the store's constraints keep
//! completions unique between them.

mod auth;
mod routes;
mod types;

pub use auth::{Authenticator, SessionAuthenticator, SESSION_HEADER};
pub use routes::{dispatch, ApiResponse};
pub use types::{LessonSummary, LessonView, OptionView, ProgressView, QuestionView, QuizView};

use std::io::{Cursor, Read};
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Result};
use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, error, info};

use crate::domain::UserId;
use crate::progress::ProgressEngine;
use crate::store::StoreDb;

const MAX_BODY_BYTES: usize = 1024 * 1024; // 1 MiB

/// Everything a request handler needs
#[derive(Clone)]
pub struct AppState {
    pub db: StoreDb,
    pub engine: ProgressEngine,
    pub auth: Arc<dyn Authenticator>,
}

impl AppState {
    /// State backed by `db`, authenticating through its session table
    pub fn new(db: StoreDb) -> Self {
        Self {
            engine: ProgressEngine::new(db.clone()),
            auth: Arc::new(SessionAuthenticator::new(db.clone())),
            db,
        }
    }
}

/// A bound, not yet running, HTTP server
pub struct HttpServer {
    server: Server,
    state: AppState,
}

impl HttpServer {
    /// Bind to `addr` (e.g. "127.0.0.1:5000"; port 0 picks a free port)
    pub fn bind(addr: &str, state: AppState) -> Result<Self> {
        let server = Server::http(addr)
            .map_err(|e| anyhow!("Failed to start server on {}: {}", addr, e))?;
        Ok(Self { server, state })
    }

    /// Address actually bound
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests until the process exits
    pub fn run(self) {
        match self.local_addr() {
            Some(addr) => info!("[ecoquest:http] Server listening on http://{}", addr),
            None => info!("[ecoquest:http] Server listening"),
        }

        for request in self.server.incoming_requests() {
            self.handle(request);
        }
    }

    /// Run the server on a background thread
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    fn handle(&self, mut request: Request) {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or(url.as_str());

        let body = if method == "POST" {
            match read_request_body(&mut request) {
                Ok(body) => body,
                Err(response) => {
                    let _ = request.respond(response);
                    return;
                }
            }
        } else {
            String::new()
        };

        let user = match self.authenticate(&request) {
            Ok(user) => user,
            Err(e) => {
                error!("[ecoquest:http] Session lookup failed: {:#}", e);
                respond_json(request, 500, serde_json::json!({ "error": "internal" }));
                return;
            }
        };

        let response = dispatch(&self.state, &method, path, user, &body);
        debug!("[ecoquest:http] {} {} -> {}", method, path, response.status);
        respond_json(request, response.status, response.body);
    }

    fn authenticate(&self, request: &Request) -> Result<Option<UserId>> {
        let token = request
            .headers()
            .iter()
            .find(|h| h.field.equiv(SESSION_HEADER))
            .map(|h| h.value.as_str().trim())
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => self.state.auth.authenticate(token),
            None => Ok(None),
        }
    }
}

fn json_response(status_code: u16, value: &serde_json::Value) -> Response<Cursor<Vec<u8>>> {
    let body =
        serde_json::to_string(value).unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let mut response = Response::from_string(body).with_status_code(status_code);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(header);
    }
    response
}

fn read_request_body(request: &mut Request) -> Result<String, Response<Cursor<Vec<u8>>>> {
    let mut body = String::new();
    let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
    if let Err(e) = reader.read_to_string(&mut body) {
        error!("[ecoquest:http] Failed to read body: {}", e);
        return Err(json_response(400, &serde_json::json!({ "error": "bad_request" })));
    }

    if body.len() > MAX_BODY_BYTES {
        return Err(json_response(
            413,
            &serde_json::json!({ "error": "payload_too_large" }),
        ));
    }

    Ok(body)
}

fn respond_json(request: Request, status_code: u16, value: serde_json::Value) {
    let _ = request.respond(json_response(status_code, &value));
}
