pub mod cases;
pub mod results;
pub mod runs;
pub mod webhook;

pub use cases::*;
pub use results::*;
pub use runs::*;
pub use webhook::*;
