pub mod ids;
pub mod config;
pub mod content;
pub mod record;
pub mod run;

pub use ids::*;
pub use config::*;
pub use content::*;
pub use record::*;
pub use run::*;
