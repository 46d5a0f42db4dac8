use thiserror::Error;

use crate::Item;

/// Reasons to reject input before mining starts
#[derive( Error, Debug )]
pub enum InputError {
    #[error( "IO error: {0}" )]
    Io( #[from] std::io::Error ),

    #[error( "line {line}: {reason}" )]
    Parse { line: usize, reason: String },

    #[error( "the sequence database is empty" )]
    EmptyDatabase,

    #[error( "sequence {sequence} has no itemsets" )]
    EmptySequence { sequence: usize },

    #[error( "sequence {sequence} contains an empty itemset" )]
    EmptyItemset { sequence: usize },

    #[error( "item {item} occurs more than once in an itemset of sequence {sequence}" )]
    DuplicateItem { sequence: usize, item: Item },

    #[error( "item {item} has no minimum item support" )]
    MissingMis { item: Item },

    #[error( "minimum item support {mis} of item {item} is not within [0, 1]" )]
    InvalidMis { item: Item, mis: f64 },

    #[error( "support difference constraint {0} is not a non-negative number" )]
    InvalidSdc( f64 ),

    #[error( "serialization failed: {0}" )]
    Serialize( #[from] serde_json::Error ),
}

pub type Result<T> = std::result::Result<T, InputError>;
