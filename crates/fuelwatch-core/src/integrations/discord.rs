//! Discord integration -- post report messages via webhook.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tokio::runtime::Runtime;
use tracing::{debug, warn};
use url::Url;

use crate::error::NotifyError;
use crate::integrations::traits::Notifier;
use crate::storage::NotifyConfig;

const DISCORD_HOSTS: &[&str] = &[
    "discord.com",
    "discordapp.com",
    "ptb.discord.com",
    "canary.discord.com",
];

/// Check that `raw` is usable as a webhook endpoint.
///
/// Requires `https`, except for loopback hosts (local relays, test servers)
/// where `http` is accepted. A host other than Discord's is logged but
/// allowed, so self-hosted relays keep working.
pub fn validate_webhook_url(raw: &str) -> Result<Url, NotifyError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(NotifyError::NotConfigured);
    }

    let invalid = |message: &str| NotifyError::InvalidUrl {
        url: raw.to_string(),
        message: message.to_string(),
    };

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
    let loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]");

    match url.scheme() {
        "https" => {}
        "http" if loopback => {}
        other => return Err(invalid(&format!("scheme must be https, got {other}"))),
    }

    if !loopback && !DISCORD_HOSTS.contains(&host) {
        warn!(host, "webhook host is not a Discord host");
    } else if !loopback && !url.path().starts_with("/api/webhooks/") {
        return Err(invalid("path must start with /api/webhooks/"));
    }

    Ok(url)
}

pub struct DiscordNotifier {
    webhook_url: Url,
    client: Client,
    runtime: Runtime,
}

impl DiscordNotifier {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let webhook_url = validate_webhook_url(webhook_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(NotifyError::Runtime)?;
        Ok(Self {
            webhook_url,
            client,
            runtime,
        })
    }

    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        Self::new(&config.webhook_url, Duration::from_secs(config.timeout_secs))
    }
}

impl Notifier for DiscordNotifier {
    fn name(&self) -> &str {
        "discord"
    }

    /// Post a message to the configured Discord webhook.
    fn send(&self, content: &str) -> Result<(), NotifyError> {
        let body = json!({ "content": content });

        let (status, text) = self.runtime.block_on(async {
            let resp = self
                .client
                .post(self.webhook_url.clone())
                .json(&body)
                .send()
                .await?;
            let status = resp.status();
            let text = if status.is_success() {
                String::new()
            } else {
                resp.text().await.unwrap_or_default()
            };
            Ok::<_, reqwest::Error>((status, text))
        })?;

        if status.is_success() {
            debug!(
                status = status.as_u16(),
                chars = content.chars().count(),
                "webhook accepted message"
            );
            Ok(())
        } else {
            Err(NotifyError::Http {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}
