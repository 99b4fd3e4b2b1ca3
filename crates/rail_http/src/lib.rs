pub mod client;
pub mod reporter;

pub use client::RunClient;
pub use reporter::{FinishOptions, Reporter};
