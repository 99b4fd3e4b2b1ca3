pub mod cache;
pub mod logger;
pub mod notifier;
pub mod screenshots;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
