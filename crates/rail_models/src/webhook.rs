use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl WebhookMessage {
    pub fn new(text: &str, channel: Option<&str>) -> Self {
        Self {
            text: text.to_owned(),
            channel: channel.map(|c| c.to_owned()),
        }
    }
}
