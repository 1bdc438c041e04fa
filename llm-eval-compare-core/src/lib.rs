pub mod domain;
pub mod error;
pub mod serde_util;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use traits::*;
