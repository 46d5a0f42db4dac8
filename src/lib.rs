
pub mod data;
pub mod error;
pub mod context;
pub mod pattern;
pub mod generator;
pub mod miner;
pub mod io;

pub use data::{Item, Itemset, RawSequence, Transaction, Count, Database, SequenceDatabase};
pub use error::InputError;
pub use context::{Context, Parameters};
pub use pattern::Pattern;
pub use miner::{Miner, MsGspMiner, History, PatternLevel, HistoryFormatter};

/// Objects that can be recorded in the log
pub trait Loggable {
    fn log( &self, message: &str, level: tracing::Level );
}
