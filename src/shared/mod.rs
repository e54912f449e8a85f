pub mod cancel;
pub mod types;

pub use cancel::*;
pub use types::*;
