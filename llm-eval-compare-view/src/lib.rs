pub mod builder;
pub mod colors;
pub mod cutoff;
pub mod engine;
pub mod formatting;
pub mod indexer;
pub mod navigation;
pub mod selection;
pub mod summarizer;

pub use builder::*;
pub use colors::*;
pub use cutoff::*;
pub use engine::*;
pub use formatting::*;
pub use indexer::*;
pub use navigation::*;
pub use selection::*;
pub use summarizer::*;
