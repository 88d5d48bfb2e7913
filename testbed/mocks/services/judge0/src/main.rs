use judge0_mock::{MockServer, ServiceFixture};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let fixtures_path = env::var("FIXTURES_PATH").unwrap_or_else(|_| "/app/fixtures".to_string());

    let server = if let Ok(fixture_file) =
        fs::read_to_string(format!("{}/judge0-fixture.yaml", fixtures_path))
    {
        tracing::info!("Loading fixtures from {}/judge0-fixture.yaml", fixtures_path);
        MockServer::with_fixture(ServiceFixture::from_yaml(&fixture_file)?)
    } else {
        tracing::info!("No fixture file found, using default test fixture");
        MockServer::new()
    };

    let addr = env::var("JUDGE0_MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:2358".to_string());
    server.serve(&addr).await
}
