pub mod discord;
pub mod recording;
pub mod traits;

pub use discord::{validate_webhook_url, DiscordNotifier};
pub use recording::RecordingNotifier;
pub use traits::Notifier;
