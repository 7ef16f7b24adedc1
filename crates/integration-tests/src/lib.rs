//! End-to-end tests for fruitvendor.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fruitvendor-integration-tests
//! ```
//!
//! No external services are needed: [`TestServer`] opens a redb database in
//! a temporary directory and serves the real router on an ephemeral port.
//! Tests drive it with the blocking [`HttpClient`] so the service traits are
//! exercised exactly as a remote caller would use them.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::thread::JoinHandle;

use tempfile::TempDir;
use tokio::sync::oneshot;
use url::Url;

use fruitvendor_server::client::HttpClient;
use fruitvendor_server::db::Database;
use fruitvendor_server::state::AppState;

/// A server running on its own thread against a throwaway database.
///
/// Shuts the server down and closes the database when dropped.
pub struct TestServer {
    db: Database,
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
    _dir: TempDir,
}

impl TestServer {
    /// Start a server on `127.0.0.1` with a fresh database.
    ///
    /// # Panics
    ///
    /// Panics if the database or the listener cannot be set up.
    #[must_use]
    pub fn start() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::new(dir.path().join("fruitvendor.redb"));
        db.open().expect("Failed to open database");

        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind to address");
        listener
            .set_nonblocking(true)
            .expect("Failed to set listener non-blocking");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = fruitvendor_server::router(AppState::from_client(&db));
        let (tx, rx) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("Failed to build runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("Failed to adopt listener");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await
                    .expect("Server error");
            });
        });

        Self {
            db,
            addr,
            shutdown: Some(tx),
            thread: Some(thread),
            _dir: dir,
        }
    }

    /// Base URL of the running server.
    ///
    /// # Panics
    ///
    /// Never in practice; the address is always a valid URL authority.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Invalid server URL")
    }

    /// Client connected to this server.
    #[must_use]
    pub fn client(&self) -> HttpClient {
        HttpClient::new(self.url())
    }

    /// The database behind the server, for checking persisted state directly.
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        self.db.close();
    }
}
