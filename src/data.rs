
use std::iter::IntoIterator;

use bit_set::BitSet;
use rustc_hash::FxHashMap;

pub mod synthetic;

pub type Item = usize;
pub type Count = u64;
/// Items occurring together at one position of a sequence.
/// Patterns keep them in ascending MIS order.
pub type Itemset = Vec<Item>;
/// Ordered list of itemsets
pub type RawSequence = Vec<Itemset>;
/// Itemset of a stored sequence as a set, for fast subset tests
pub type Transaction = BitSet;

pub trait Database {

    /// Adds every sequence produced by the iterator to the database
    fn add <'a, Con> ( &mut self, sequences: Con ) where
	Con: IntoIterator<Item = &'a RawSequence>;

    /// Returns the number of stored sequences that contain the query
    fn query_support( &self, query: &[Itemset] ) -> Count;

    /// Returns the number of stored sequences
    fn len( &self ) -> usize;

    fn is_empty( &self ) -> bool {
	self.len() == 0
    }
}

/// Collections of items that can tell whether they hold all items of an itemset
pub trait ItemContainer {
    fn contains_all( &self, items: &[Item] ) -> bool;
}

impl ItemContainer for Transaction {
    fn contains_all( &self, items: &[Item] ) -> bool {
	items.iter().all( |item| self.contains( *item ))
    }
}

impl ItemContainer for Itemset {
    fn contains_all( &self, items: &[Item] ) -> bool {
	items.iter().all( |item| self.contains( item ))
    }
}

/// Returns true if `small` embeds into `big`, i.e. every itemset of `small` is a subset of a separate itemset of `big` and the order is kept.
/// Matching each itemset as early as possible never rules out a later match, so a single greedy scan decides.
pub fn contains <T: ItemContainer> ( big: &[T], small: &[Itemset] ) -> bool {
    if small.is_empty() {
	return true;
    }
    let mut matched = 0;
    for itemset in big {
	if itemset.contains_all( &small[ matched ] ) {
	    matched += 1;
	    if matched == small.len() {
		return true;
	    }
	}
    }
    false
}

/// Stores every sequence as a list of bit sets.
/// Items are renumbered densely in order of appearance, so the bit sets stay small for sparse item ids.
#[derive( Debug, Default )]
pub struct SequenceDatabase {
    sequences: Vec<Vec<Transaction>>,
    index: FxHashMap<Item, usize>,
    items: Vec<Item>,
}

impl Database for SequenceDatabase {

    fn add <'a, Con> ( &mut self, sequences: Con ) where
	Con: IntoIterator<Item = &'a RawSequence>
    {
	for sequence in sequences.into_iter() {
	    let transactions: Vec<Transaction> = sequence.iter()
		.map( |itemset| itemset.iter().map( |item| self.index_of( *item )).collect() )
		.collect();
	    self.sequences.push( transactions );
	}
    }

    fn query_support( &self, query: &[Itemset] ) -> Count {
	// an unknown item is contained in no sequence
	let Some( query ) = self.translate( query ) else {
	    return 0;
	};
	self.sequences.iter()
	    .filter( |sequence| contains( sequence.as_slice(), &query ))
	    .count() as Count
    }

    fn len( &self ) -> usize {
	self.sequences.len()
    }
}

impl SequenceDatabase {

    pub fn new() -> SequenceDatabase {
	SequenceDatabase{
	    sequences: Vec::new(),
	    index: FxHashMap::default(),
	    items: Vec::new(),
	}
    }

    /// Returns the number of distinct items stored
    pub fn number_items( &self ) -> usize {
	self.items.len()
    }

    fn index_of( &mut self, item: Item ) -> usize {
	let items = &mut self.items;
	*self.index.entry( item ).or_insert_with( || {
	    items.push( item );
	    items.len() - 1
	})
    }

    fn translate( &self, query: &[Itemset] ) -> Option<Vec<Itemset>> {
	query.iter()
	    .map( |itemset| itemset.iter().map( |item| self.index.get( item ).copied() ).collect() )
	    .collect()
    }

    /// Counts, for every item, the number of sequences it occurs in.
    /// Repeated occurrences within one sequence count once.
    pub fn count_items( &self ) -> FxHashMap<Item, Count> {
	let mut counts: FxHashMap<Item, Count> = FxHashMap::default();
	for sequence in &self.sequences {
	    let mut distinct = BitSet::with_capacity( self.items.len() );
	    for transaction in sequence {
		distinct.union_with( transaction );
	    }
	    for index in distinct.iter() {
		*counts.entry( self.items[ index ] ).or_insert( 0 ) += 1;
	    }
	}
	counts
    }
}
