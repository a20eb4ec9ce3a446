pub mod error;
pub mod progress;
pub mod score;
pub mod types;

pub use error::*;
pub use progress::*;
pub use score::*;
pub use types::*;
