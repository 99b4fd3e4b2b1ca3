use rail_config::NotifierConfig;
use rail_config::definitions::ENV_SLACK_URL;
use rail_models::WebhookMessage;
use rail_utils::request::Request;
use rail_utils::sync::block_on;
use tracing::{debug, warn};

/// Pushes failure messages to an incoming webhook.
///
/// A notifier built without a webhook warns once and then ignores every
/// `notify` call. Delivery failures are logged and never returned.
#[derive(Debug)]
pub struct Notifier {
    webhook_url: Option<String>,
    context: Option<String>,
}

impl Notifier {
    pub fn new(config: NotifierConfig) -> Self {
        if config.webhook_url.is_none() {
            warn!("{ENV_SLACK_URL} is not set, cannot send notification for failures");
        }
        Self {
            webhook_url: config.webhook_url,
            context: config.context,
        }
    }

    pub fn from_env() -> Self {
        Self::new(NotifierConfig::from_env())
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub fn message(&self, text: &str) -> String {
        match &self.context {
            Some(context) => format!("{text}, {context}"),
            None => text.to_owned(),
        }
    }

    pub fn notify(&self, text: &str, channel: Option<&str>) {
        let Some(url) = self.webhook_url.as_deref() else {
            return;
        };

        let message = WebhookMessage::new(&self.message(text), channel);
        match block_on(|| Request::post(url).text_with_data(&message)) {
            Ok(_) => debug!("notification sent to channel {channel:?}"),
            Err(e) => warn!("unable to send notification: {e}"),
        }
    }
}
