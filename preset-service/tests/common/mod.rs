use preset_service::config::{AuthConfig, GoogleConfig, PresetConfig, SheetConfig};
use preset_service::startup::Application;
use service_core::config::Config as CoreConfig;
use wiremock::MockServer;

pub const TEST_PASSWORD: &str = "open-sesame";

/// How the archive webhook is wired for a test run.
pub enum WebhookMode {
    /// Point at the mock sheet server.
    Mock,
    /// Point at an address nothing listens on.
    Dead,
    /// Leave unconfigured.
    None,
}

pub struct TestApp {
    pub address: String,
    pub gemini: MockServer,
    pub sheet: MockServer,
}

impl TestApp {
    /// Spawn with a fixed model configured, so generation skips discovery.
    pub async fn spawn() -> Self {
        Self::spawn_inner(Some("gemini-1.5-flash".to_string()), WebhookMode::Mock).await
    }

    /// Spawn without a fixed model, forcing per-request discovery.
    pub async fn spawn_with_discovery() -> Self {
        Self::spawn_inner(None, WebhookMode::Mock).await
    }

    /// Spawn with the archive webhook wired as requested.
    pub async fn spawn_with_webhook(mode: WebhookMode) -> Self {
        Self::spawn_inner(Some("gemini-1.5-flash".to_string()), mode).await
    }

    async fn spawn_inner(model: Option<String>, webhook: WebhookMode) -> Self {
        let gemini = MockServer::start().await;
        let sheet = MockServer::start().await;

        let webhook_url = match webhook {
            WebhookMode::Mock => Some(sheet.uri()),
            WebhookMode::Dead => Some("http://127.0.0.1:9".to_string()),
            WebhookMode::None => None,
        };

        // Use random port for testing (port 0)
        let config = PresetConfig {
            common: CoreConfig { port: 0 },
            auth: AuthConfig {
                app_password: TEST_PASSWORD.to_string(),
            },
            google: GoogleConfig {
                api_key: "test-api-key".to_string(),
                api_base: gemini.uri(),
                model,
            },
            sheet: SheetConfig { webhook_url },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the HTTP server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            gemini,
            sheet,
        }
    }

    /// Submit a generation request with the given password.
    pub async fn post_generate(&self, password: &str, song: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(&self.address)
            .json(&serde_json::json!({ "password": password, "song": song }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Count requests the mock server received for a URL path.
pub async fn requests_to(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == path)
        .count()
}
