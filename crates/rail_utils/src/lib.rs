pub mod request;
pub mod sync;
pub mod term;
