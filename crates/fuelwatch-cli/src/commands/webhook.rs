use clap::Subcommand;
use fuelwatch_core::integrations::{validate_webhook_url, DiscordNotifier, Notifier};
use fuelwatch_core::report::{char_len, MAX_MESSAGE_LEN};

use super::Context;

#[derive(Subcommand)]
pub enum WebhookAction {
    /// Validate the configured webhook URL without sending anything
    Check,
    /// Post a test message to the configured webhook
    Test {
        /// Message text
        #[arg(long, default_value = "fuelwatch webhook test")]
        message: String,
    },
}

pub fn run(action: WebhookAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    match action {
        WebhookAction::Check => {
            let url = validate_webhook_url(&config.notify.webhook_url)?;
            println!("ok: {}", url.host_str().unwrap_or_default());
        }
        WebhookAction::Test { message } => {
            let len = char_len(&message);
            if len > MAX_MESSAGE_LEN {
                return Err(
                    format!("message is {len} characters, limit is {MAX_MESSAGE_LEN}").into(),
                );
            }
            let notifier = DiscordNotifier::from_config(&config.notify)?;
            notifier.send(&message)?;
            println!("sent");
        }
    }
    Ok(())
}
