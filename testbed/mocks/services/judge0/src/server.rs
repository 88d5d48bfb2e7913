use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::fixtures::ServiceFixture;
use crate::handlers::{create_submission, get_submission, health_check};
use crate::recorder::{MockState, RecordedCreate, RecordedFetch};

pub struct MockServer {
    state: Arc<MockState>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::with_fixture(ServiceFixture::create_test_fixture())
    }

    pub fn with_fixture(fixture: ServiceFixture) -> Self {
        Self {
            state: Arc::new(MockState::new(fixture)),
        }
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/submissions", post(create_submission))
            .route("/submissions/{token}", get(get_submission))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve on `addr` until the process ends
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let addr: SocketAddr = addr.parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Judge0 mock server listening on {}", addr);

        axum::serve(listener, self.router())
            .await
            .map_err(|e| anyhow::anyhow!("Judge0 mock server error: {}", e))
    }

    /// Serve on an ephemeral local port in the background
    pub async fn start(self) -> anyhow::Result<RunningMockServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = self.router();
        tracing::info!("Judge0 mock server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = result {
                tracing::error!("Judge0 mock server error: {}", e);
            }
        });

        Ok(RunningMockServer {
            addr,
            shutdown_tx,
            state: self.state,
        })
    }
}

impl Default for MockServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a mock started with [`MockServer::start`]
pub struct RunningMockServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    state: Arc<MockState>,
}

impl RunningMockServer {
    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn creates(&self) -> Vec<RecordedCreate> {
        self.state.creates()
    }

    pub fn fetches(&self) -> Vec<RecordedFetch> {
        self.state.fetches()
    }

    pub fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            tracing::warn!("Judge0 mock server already stopped");
        }
    }
}
