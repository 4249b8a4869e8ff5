pub mod mastery;
pub mod matcher;
pub mod pool;

pub use mastery::{MasteryRecord, ProgressStore};
pub use matcher::{MatchMode, ParsedReading};
pub use pool::SessionPool;
