
mod initial;
mod level2;
mod join;

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::*;

pub use initial::{InitialPass, InitialResult};
pub use level2::Level2Generator;
pub use join::{JoinGenerator, is_anti_monotone};

pub trait CandidateGenerator {
    /// Proposes the candidate patterns of the next level from the patterns of the current level.
    /// Every returned pattern has its support cached.
    fn generate( &self, patterns: &[Pattern], context: &Context ) -> Vec<Pattern>;
}

/// A candidate sequence whose support is not counted yet
#[derive( Debug, Clone, PartialEq )]
pub struct Proposal {
    pub sequence: RawSequence,
    pub min_support: f64,
}

/// Collects the proposals of one level without duplicates.
/// Proposals keep the order in which they were first made.
#[derive( Debug, Default )]
pub struct CandidateSet {
    proposals: Vec<Proposal>,
    seen: FxHashSet<RawSequence>,
}

impl CandidateSet {

    pub fn new() -> CandidateSet {
	CandidateSet::default()
    }

    /// Adds the sequence unless it was proposed before. Returns whether it was added.
    pub fn propose( &mut self, sequence: RawSequence, min_support: f64 ) -> bool {
	if self.seen.contains( &sequence ) {
	    return false;
	}
	self.seen.insert( sequence.clone() );
	self.proposals.push( Proposal{ sequence, min_support } );
	true
    }

    /// Drops all proposals for which the predicate fails
    pub fn retain <F> ( &mut self, keep: F ) where F: Fn( &Proposal ) -> bool {
	self.proposals.retain( |proposal| keep( proposal ));
    }

    pub fn len( &self ) -> usize {
	self.proposals.len()
    }

    pub fn is_empty( &self ) -> bool {
	self.proposals.is_empty()
    }

    pub fn iter( &self ) -> std::slice::Iter<'_, Proposal> {
	self.proposals.iter()
    }

    /// Counts the support of every proposal and turns them into patterns, in proposal order
    pub fn realize <D: Database + Sync> ( self, database: &D ) -> Vec<Pattern> {
	self.proposals.into_par_iter()
	    .map( |proposal| Pattern::new( proposal.sequence, proposal.min_support, database ))
	    .collect()
    }
}

/// Keeps the patterns whose support reaches their minimum support
pub fn extract_frequent( candidates: &[Pattern] ) -> Vec<Pattern> {
    candidates.iter()
	.filter( |pattern| pattern.is_frequent() )
	.cloned()
	.collect()
}
