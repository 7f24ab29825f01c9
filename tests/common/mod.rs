//! Reference backend on a random loopback port, one per test.

use std::net::SocketAddr;

use dish_harness::{app::build_app, harness::ApiClient, state::AppState, telemetry};
use tokio::sync::oneshot;

pub struct TestServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> anyhow::Result<Self> {
        telemetry::init_for_tests();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = build_app(AppState::fake());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await;
        });

        let server = Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        };
        server.wait_ready().await?;
        Ok(server)
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.url()).expect("loopback url is valid")
    }

    async fn wait_ready(&self) -> anyhow::Result<()> {
        let health = format!("{}/api/health", self.url());
        let max_attempts = 20;
        for attempt in 1..=max_attempts {
            match reqwest::get(&health).await {
                Ok(response) if response.status().is_success() => return Ok(()),
                _ if attempt < max_attempts => {
                    tokio::time::sleep(std::time::Duration::from_millis(50)).await
                }
                _ => {}
            }
        }
        anyhow::bail!("server did not become ready after {} attempts", max_attempts)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
