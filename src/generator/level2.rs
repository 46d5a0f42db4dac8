use tracing::debug;

use crate::*;
use super::{CandidateGenerator, CandidateSet};

/// Pairs the items of L into candidate 2-sequences
pub struct Level2Generator;

impl CandidateGenerator for Level2Generator {

    /// Expects the single item patterns of L in canonical order
    fn generate( &self, patterns: &[Pattern], context: &Context ) -> Vec<Pattern> {
	let mut candidates = CandidateSet::new();
	for (index, low) in patterns.iter().enumerate() {
	    if !low.is_frequent() {
		continue;
	    }
	    let l = low.first_item();
	    let mis = context.mis( l );
	    candidates.propose( vec!( vec!( l ), vec!( l )), mis );

	    for high in &patterns[ index + 1 .. ] {
		let h = high.first_item();
		debug_assert!( context.compare_items( l, h ).is_lt(), "seed items are in canonical order" );
		if high.get_support() < mis || !context.satisfies_sdc( l, h ) {
		    continue;
		}
		candidates.propose( vec!( vec!( l, h )), mis );
		candidates.propose( vec!( vec!( l ), vec!( h )), mis );
		candidates.propose( vec!( vec!( h ), vec!( l )), mis );
	    }
	}
	debug!( "Proposed {} candidates of length 2", candidates.len() );
	candidates.realize( context.get_database() )
    }
}
