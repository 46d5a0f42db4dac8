use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::*;
use crate::pattern::{merge_into_first, merge_into_last, without_item_at};
use super::{CandidateGenerator, CandidateSet, Proposal};

/// Joins frequent (k-1)-sequences into candidate k-sequences for k >= 3
pub struct JoinGenerator;

impl CandidateGenerator for JoinGenerator {

    fn generate( &self, patterns: &[Pattern], context: &Context ) -> Vec<Pattern> {
	// pairs are joined in parallel, the collected order is the sequential one
	let proposals: Vec<Proposal> = patterns.par_iter()
	    .flat_map_iter( |first| patterns.iter().flat_map( move |second| join_pair( first, second, context )))
	    .collect();

	let mut candidates = CandidateSet::new();
	for proposal in proposals {
	    candidates.propose( proposal.sequence, proposal.min_support );
	}
	let joined = candidates.len();

	let frequent: FxHashSet<&RawSequence> = patterns.iter()
	    .map( |pattern| pattern.get_sequence() )
	    .collect();
	candidates.retain( |proposal| is_anti_monotone( proposal, &frequent, context ));
	debug!( "Joined {joined} candidates, {} survive pruning", candidates.len() );

	candidates.realize( context.get_database() )
    }
}

/// Applies the first matching join rule to the ordered pair
fn join_pair( first: &Pattern, second: &Pattern, context: &Context ) -> Vec<Proposal> {
    let head = first.first_item();
    let tail = second.last_item();
    if first.first_item_has_unique_min_mis( context ) && context.mis( tail ) > context.mis( head ) {
	join_on_first_anchor( first, second, context )
    } else if second.last_item_has_unique_min_mis( context ) && context.mis( tail ) < context.mis( head ) {
	join_on_last_anchor( first, second, context )
    } else if first.can_join( second ) && context.satisfies_sdc( head, tail ) {
	let min_support = first.get_min_support().min( context.mis( tail ));
	vec!( Proposal{ sequence: first.join( second, context ), min_support } )
    } else {
	Vec::new()
    }
}

/// The first item of `first` is its unique minimum. Extends `first` by the last item of `second`.
fn join_on_first_anchor( first: &Pattern, second: &Pattern, context: &Context ) -> Vec<Proposal> {
    let item = second.last_item();
    if !context.satisfies_sdc( first.item_at( 1 ), item ) || first.without_item_at( 1 ) != second.without_item_at( -1 ) {
	return Vec::new();
    }
    let min_support = first.get_min_support().min( context.mis( item ));
    let above_last = context.compare_items( item, first.last_item() ).is_gt();

    let mut proposals = Vec::new();
    if second.trailing_itemset_len() == 1 {
	let mut appended = first.get_sequence().clone();
	appended.push( vec!( item ));
	proposals.push( Proposal{ sequence: appended, min_support } );

	if first.length() == 2 && first.size() == 2 && above_last {
	    let mut merged = first.get_sequence().clone();
	    merge_into_last( &mut merged, item, context );
	    proposals.push( Proposal{ sequence: merged, min_support } );
	}
    } else if first.length() > 2 || (first.length() == 2 && first.size() == 1 && above_last) {
	let mut merged = first.get_sequence().clone();
	merge_into_last( &mut merged, item, context );
	proposals.push( Proposal{ sequence: merged, min_support } );
    }
    proposals
}

/// The last item of `second` is its unique minimum. Extends `second` by the first item of `first`.
fn join_on_last_anchor( first: &Pattern, second: &Pattern, context: &Context ) -> Vec<Proposal> {
    let item = first.first_item();
    if !context.satisfies_sdc( item, second.item_at( -2 )) || first.without_item_at( 0 ) != second.without_item_at( -2 ) {
	return Vec::new();
    }
    let min_support = second.get_min_support().min( context.mis( item ));
    let below_first = context.compare_items( item, second.first_item() ).is_lt();

    let mut proposals = Vec::new();
    if first.leading_itemset_len() == 1 {
	let mut prepended = RawSequence::with_capacity( second.size() + 1 );
	prepended.push( vec!( item ));
	prepended.extend( second.get_sequence().iter().cloned() );
	proposals.push( Proposal{ sequence: prepended, min_support } );

	if second.length() == 2 && second.size() == 2 && below_first {
	    let mut merged = second.get_sequence().clone();
	    merge_into_first( &mut merged, item, context );
	    proposals.push( Proposal{ sequence: merged, min_support } );
	}
    } else if second.length() > 2 {
	let mut merged = second.get_sequence().clone();
	merge_into_first( &mut merged, item, context );
	proposals.push( Proposal{ sequence: merged, min_support } );
    }
    proposals
}

/// Returns true if deleting any item, except those whose MIS equals the minimum support of the proposal,
/// leaves a sequence in `frequent`
pub fn is_anti_monotone( proposal: &Proposal, frequent: &FxHashSet<&RawSequence>, context: &Context ) -> bool {
    proposal.sequence.iter().flatten()
	.enumerate()
	.all( |(index, item)| {
	    context.mis( *item ) == proposal.min_support ||
		frequent.contains( &without_item_at( &proposal.sequence, index as isize ))
	})
}
