
mod serialize; // display and serialization of patterns

use crate::*;

pub use serialize::format_sequence;

/// A sequential pattern together with the minimum support it has to reach.
/// Support and count are computed once on creation.
#[derive( Debug, Clone, PartialEq )]
pub struct Pattern {
    sequence: RawSequence,
    /// MIS of the anchor item, the smallest MIS among the items
    min_support: f64,
    count: Count,
    /// fraction of database sequences containing the pattern
    support: f64,
}

impl Pattern {

    /// Creates the pattern and caches its support in the database.
    /// Pre: database is not empty
    pub fn new <D: Database> ( sequence: RawSequence, min_support: f64, database: &D ) -> Pattern {
	debug_assert!( is_well_formed( &sequence ), "malformed pattern {sequence:?}" );
	let count = database.query_support( &sequence );
	Pattern::with_count( sequence, min_support, count, database.len() )
    }

    /// Creates the pattern from a count obtained elsewhere.
    /// Pre: total > 0
    pub fn with_count( sequence: RawSequence, min_support: f64, count: Count, total: usize ) -> Pattern {
	assert!( total > 0, "support is undefined for an empty database" );
	assert!( count as usize <= total, "count {count} exceeds the number of sequences {total}" );
	let support = count as f64 / total as f64;
	Pattern{ sequence, min_support, count, support }
    }

    pub fn get_sequence( &self ) -> &RawSequence {
	&self.sequence
    }

    pub fn get_min_support( &self ) -> f64 {
	self.min_support
    }

    pub fn get_count( &self ) -> Count {
	self.count
    }

    pub fn get_support( &self ) -> f64 {
	self.support
    }

    /// Returns true if the support reaches the minimum support of the pattern
    pub fn is_frequent( &self ) -> bool {
	self.support >= self.min_support
    }

    /// Total number of items
    pub fn length( &self ) -> usize {
	sequence_length( &self.sequence )
    }

    /// Number of itemsets
    pub fn size( &self ) -> usize {
	self.sequence.len()
    }

    pub fn items( &self ) -> impl Iterator<Item = Item> + '_ {
	self.sequence.iter().flatten().copied()
    }

    pub fn first_item( &self ) -> Item {
	*self.sequence.first()
	    .and_then( |itemset| itemset.first() )
	    .expect( "pattern is not empty" )
    }

    pub fn last_item( &self ) -> Item {
	*self.sequence.last()
	    .and_then( |itemset| itemset.last() )
	    .expect( "pattern is not empty" )
    }

    /// Returns the item at the flat position. Negative positions count from the end.
    pub fn item_at( &self, index: isize ) -> Item {
	item_at( &self.sequence, index )
    }

    /// Number of items in the first itemset
    pub fn leading_itemset_len( &self ) -> usize {
	self.sequence.first().map_or( 0, |itemset| itemset.len() )
    }

    /// Number of items in the last itemset
    pub fn trailing_itemset_len( &self ) -> usize {
	self.sequence.last().map_or( 0, |itemset| itemset.len() )
    }

    /// Returns true if the item occurs exactly once and all other items have a strictly greater MIS.
    /// Another item with the same MIS makes the minimum ambiguous.
    pub fn item_has_unique_min_mis( &self, item: Item, context: &Context ) -> bool {
	let item_mis = context.mis( item );
	let mut occurrences = 0;
	for other in self.items() {
	    if other == item {
		occurrences += 1;
		if occurrences > 1 {
		    return false;
		}
	    } else if context.mis( other ) <= item_mis {
		return false;
	    }
	}
	occurrences == 1
    }

    pub fn first_item_has_unique_min_mis( &self, context: &Context ) -> bool {
	self.item_has_unique_min_mis( self.first_item(), context )
    }

    pub fn last_item_has_unique_min_mis( &self, context: &Context ) -> bool {
	self.item_has_unique_min_mis( self.last_item(), context )
    }

    /// Returns a new sequence without the item at the flat position, see [`without_item_at`]
    pub fn without_item_at( &self, index: isize ) -> RawSequence {
	without_item_at( &self.sequence, index )
    }

    /// Returns true if dropping the first item of this pattern and the last item of `other` leaves the same sequence
    pub fn can_join( &self, other: &Pattern ) -> bool {
	self.without_item_at( 0 ) == other.without_item_at( -1 )
    }

    /// Extends this pattern by the last item of `other`.
    /// The item joins the trailing itemset if it shares its itemset in `other`, otherwise it forms a new itemset.
    pub fn join( &self, other: &Pattern, context: &Context ) -> RawSequence {
	let item = other.last_item();
	let mut joined = self.sequence.clone();
	if other.trailing_itemset_len() > 1 {
	    merge_into_last( &mut joined, item, context );
	} else {
	    joined.push( vec!( item ));
	}
	joined
    }
}

/// Total number of items in the sequence
pub fn sequence_length( sequence: &[Itemset] ) -> usize {
    sequence.iter().map( |itemset| itemset.len() ).sum()
}

/// Maps a flat index to a position from the front, counting negative indices from the end
fn resolve_index( length: usize, index: isize ) -> usize {
    let resolved = if index < 0 { length as isize + index } else { index };
    assert!( 0 <= resolved && (resolved as usize) < length,
	     "item index {index} out of range for a sequence of length {length}" );
    resolved as usize
}

/// Returns the item at the flat position. Negative positions count from the end.
pub fn item_at( sequence: &[Itemset], index: isize ) -> Item {
    let position = resolve_index( sequence_length( sequence ), index );
    sequence.iter().flatten()
	.nth( position )
	.copied()
	.expect( "position is within range" )
}

/// Returns a new sequence without the item at the flat position.
/// An itemset that loses its only item is dropped. Negative positions count from the end.
pub fn without_item_at( sequence: &[Itemset], index: isize ) -> RawSequence {
    let mut remaining = Some( resolve_index( sequence_length( sequence ), index ));
    let mut reduced = RawSequence::with_capacity( sequence.len() );
    for itemset in sequence {
	match remaining {
	    Some( offset ) if offset < itemset.len() => {
		let mut kept = itemset.clone();
		kept.remove( offset );
		if !kept.is_empty() {
		    reduced.push( kept );
		}
		remaining = None;
	    },
	    Some( offset ) => {
		reduced.push( itemset.clone() );
		remaining = Some( offset - itemset.len() );
	    },
	    None => reduced.push( itemset.clone() ),
	}
    }
    reduced
}

/// Adds the item to the last itemset and restores MIS order
pub(crate) fn merge_into_last( sequence: &mut RawSequence, item: Item, context: &Context ) {
    let itemset = sequence.last_mut().expect( "sequence is not empty" );
    debug_assert!( !itemset.contains( &item ), "item {item} already in {itemset:?}" );
    itemset.push( item );
    context.sort_itemset( itemset );
}

/// Adds the item to the first itemset and restores MIS order
pub(crate) fn merge_into_first( sequence: &mut RawSequence, item: Item, context: &Context ) {
    let itemset = sequence.first_mut().expect( "sequence is not empty" );
    debug_assert!( !itemset.contains( &item ), "item {item} already in {itemset:?}" );
    itemset.insert( 0, item );
    context.sort_itemset( itemset );
}

/// No empty itemsets, no item twice in an itemset
fn is_well_formed( sequence: &[Itemset] ) -> bool {
    sequence.iter().all( |itemset| {
	!itemset.is_empty() &&
	    itemset.iter().enumerate().all( |(i, item)| !itemset[ i + 1 .. ].contains( item ))
    })
}
