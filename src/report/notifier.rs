use {
    crate::config::TelegramCredentials,
    anyhow::{Context, Result, bail},
    async_trait::async_trait,
    reqwest::Client,
    serde::Deserialize,
    std::time::Duration,
};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(20);

/// Delivers a plain-text message somewhere a human will read it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Prints to stdout. Used when no push credentials are configured.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    client: Client,
    credentials: TelegramCredentials,
    base_url: String,
}

impl TelegramNotifier {
    pub fn new(credentials: TelegramCredentials) -> Self {
        Self::with_base_url(credentials, TELEGRAM_API_BASE)
    }

    pub fn with_base_url(credentials: TelegramCredentials, base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(TELEGRAM_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.credentials.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.send_message_url())
            .form(&[("chat_id", self.credentials.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .context("Telegram request failed")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("Telegram returned {}: {}", status, body);
        }

        // A 200 can still carry ok=false
        if let Ok(parsed) = serde_json::from_str::<TelegramResponse>(&body) {
            if !parsed.ok {
                bail!(
                    "Telegram rejected the message: {}",
                    parsed.description.unwrap_or_default()
                );
            }
        }
        Ok(())
    }
}
