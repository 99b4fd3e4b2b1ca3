use crate::definitions::{ENV_SLACK_CONTEXT, ENV_SLACK_URL};
use std::env;

#[derive(Debug, Default, Clone)]
pub struct NotifierConfig {
    pub webhook_url: Option<String>,
    pub context: Option<String>,
}

impl NotifierConfig {
    pub fn new(webhook_url: Option<String>, context: Option<String>) -> Self {
        Self {
            webhook_url,
            context,
        }
    }

    pub fn from_env() -> Self {
        Self {
            webhook_url: non_empty_var(ENV_SLACK_URL),
            context: non_empty_var(ENV_SLACK_CONTEXT),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
