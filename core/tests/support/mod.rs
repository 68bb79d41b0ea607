//! Helpers shared by the integration test binaries.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mock_server::{AppState, MockConfig};
use webmaster_core::{ClientConfig, HttpRequest, HttpResponse, Transport, TransportError};

pub const TOKEN: &str = "test-token";
pub const BASE_URL: &str = "https://api.webmaster.yandex.net/v4/";

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Transport that answers from a closure and records every request.
///
/// `GET user` is answered with `{"user_id": 42}` unless the closure is
/// installed with `ScriptedTransport::raw`.
pub struct ScriptedTransport {
    handler: Box<Handler>,
    answer_user: bool,
    requests: Mutex<Vec<HttpRequest>>,
    user_lookups: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            answer_user: true,
            requests: Mutex::new(Vec::new()),
            user_lookups: AtomicUsize::new(0),
        })
    }

    /// Every request, `GET user` included, goes to `handler`.
    pub fn raw<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            answer_user: false,
            requests: Mutex::new(Vec::new()),
            user_lookups: AtomicUsize::new(0),
        })
    }

    /// Answers every non-user request with `status` and `body`.
    pub fn fixed(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| Ok(response(status, &body)))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        if request.endpoint == "user" {
            self.user_lookups.fetch_add(1, Ordering::SeqCst);
            if self.answer_user {
                return Ok(response(200, r#"{"user_id": 42}"#));
            }
        }
        (self.handler)(request)
    }
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.to_string(),
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::new(TOKEN)
}

/// Start the mock server on a random port in a background thread.
pub fn spawn_mock(config: MockConfig) -> (SocketAddr, AppState) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let state = AppState::new(config);
    let server_state = state.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, server_state).await
        })
        .unwrap();
    });

    (addr, state)
}

pub fn mock_config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(TOKEN).with_base_url(format!("http://{addr}"))
}
