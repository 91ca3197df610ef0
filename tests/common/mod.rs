use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use fester_api_rust::auth::{generate_token, Claims};

/// Secret shared between the spawned server and tokens minted in tests.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

static SERVER: OnceLock<Option<TestServer>> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/fester-api-rust");
        cmd.env("PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Spawn the server once per test binary. Returns `None` (and the tests
/// skip) when DATABASE_URL is not set in the environment.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let server = SERVER.get_or_init(|| {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            return None;
        };
        Some(TestServer::spawn(&database_url).expect("failed to spawn server binary"))
    });

    match server {
        Some(server) => {
            server.wait_ready(Duration::from_secs(10)).await?;
            Ok(Some(server))
        }
        None => {
            eprintln!("skipping: DATABASE_URL not set");
            Ok(None)
        }
    }
}

/// Mint a bearer token the spawned server will accept.
pub fn bearer_token() -> String {
    std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);
    generate_token(&Claims::new("tester@fester.test")).expect("token generation")
}

/// Unique product name so reruns never trip the uniqueness constraint.
pub fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Minimal valid creation payload.
pub fn product_payload(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "category": "wall",
        "description": "d",
        "image": "i",
        "fullDescription": "fd",
    })
}
