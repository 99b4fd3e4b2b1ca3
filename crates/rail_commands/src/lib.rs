mod attach;
mod cases;
pub mod cli;
mod close;
pub mod command;
mod context;
mod delete;
mod notify;
mod publish;
mod purge;
mod screenshots;
mod start;

pub use cli::*;
