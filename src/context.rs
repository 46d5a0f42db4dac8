
use std::cmp::Ordering;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use crate::*;
use crate::error::Result;

/// Thresholds of a mining run
#[derive( Debug, Clone )]
pub struct Parameters {
    /// minimum item support per item
    mis: FxHashMap<Item, f64>,
    /// maximum difference between the supports of items in one pattern
    sdc: f64,
}

impl Default for Parameters {
    fn default() -> Parameters {
	// without an SDC line every support difference is allowed
	Parameters::new( FxHashMap::default(), f64::MAX )
    }
}

impl Parameters {

    pub fn new( mis: FxHashMap<Item, f64>, sdc: f64 ) -> Parameters {
	Parameters{ mis, sdc }
    }

    pub fn get_mis( &self, item: Item ) -> Option<f64> {
	self.mis.get( &item ).copied()
    }

    pub fn set_mis( &mut self, item: Item, mis: f64 ) {
	self.mis.insert( item, mis );
    }

    pub fn get_sdc( &self ) -> f64 {
	self.sdc
    }

    pub fn set_sdc( &mut self, sdc: f64 ) {
	self.sdc = sdc;
    }

    pub fn iterate_mis<'a>( &'a self ) -> Box<dyn Iterator<Item = (Item, f64)> + 'a> {
	Box::new( self.mis.iter().map( |(item, mis)| (*item, *mis) ))
    }
}

/// Everything a mining run reads: the database, the thresholds and the item supports.
/// Nothing changes after construction, so all components share it by reference.
#[derive( Debug )]
pub struct Context {
    database: SequenceDatabase,
    parameters: Parameters,
    /// number of sequences containing each item
    item_counts: FxHashMap<Item, Count>,
    supports: FxHashMap<Item, f64>,
}

impl Context {

    /// Validates the input, stores the sequences and counts the item supports.
    pub fn new( sequences: Vec<RawSequence>, parameters: Parameters ) -> Result<Context> {
	validate( &sequences, &parameters )?;

	let mut database = SequenceDatabase::new();
	database.add( &sequences );
	let item_counts = database.count_items();
	let total = database.len() as f64;
	let supports: FxHashMap<Item, f64> = item_counts.iter()
	    .map( |(item, count)| (*item, *count as f64 / total) )
	    .collect();

	info!( "Loaded {} sequences over {} items (sdc {})", database.len(), item_counts.len(), parameters.get_sdc() );
	Ok( Context{ database, parameters, item_counts, supports } )
    }

    pub fn get_database( &self ) -> &SequenceDatabase {
	&self.database
    }

    pub fn get_parameters( &self ) -> &Parameters {
	&self.parameters
    }

    pub fn number_sequences( &self ) -> usize {
	self.database.len()
    }

    /// Pre: item has a minimum item support
    pub fn mis( &self, item: Item ) -> f64 {
	self.parameters.get_mis( item ).expect( "items are validated to have a minimum item support" )
    }

    /// Pre: item occurs in the database
    pub fn support( &self, item: Item ) -> f64 {
	*self.supports.get( &item ).expect( "items of patterns occur in the database" )
    }

    /// Pre: item occurs in the database
    pub fn item_count( &self, item: Item ) -> Count {
	*self.item_counts.get( &item ).expect( "items of patterns occur in the database" )
    }

    /// Returns true if the supports of both items differ by at most the SDC
    pub fn satisfies_sdc( &self, left: Item, right: Item ) -> bool {
	(self.support( left ) - self.support( right )).abs() <= self.parameters.get_sdc()
    }

    /// Canonical item order: ascending MIS, equal MIS by ascending item
    pub fn compare_items( &self, left: Item, right: Item ) -> Ordering {
	self.mis( left ).total_cmp( &self.mis( right )).then( left.cmp( &right ))
    }

    pub fn sort_itemset( &self, itemset: &mut Itemset ) {
	itemset.sort_by( |left, right| self.compare_items( *left, *right ));
    }

    /// Returns all items of the database in canonical order
    pub fn items_by_mis( &self ) -> Vec<Item> {
	let mut items: Vec<Item> = self.supports.keys().copied().collect();
	items.sort_by( |left, right| self.compare_items( *left, *right ));
	items
    }
}

/// Checks the invariants the miner relies on
fn validate( sequences: &[RawSequence], parameters: &Parameters ) -> Result<()> {
    if sequences.is_empty() {
	return Err( InputError::EmptyDatabase );
    }
    let sdc = parameters.get_sdc();
    if sdc.is_nan() || sdc < 0.0 {
	return Err( InputError::InvalidSdc( sdc ));
    }
    for (item, mis) in parameters.iterate_mis() {
	if !(0.0 ..= 1.0).contains( &mis ) {
	    return Err( InputError::InvalidMis{ item, mis } );
	}
    }

    for (index, sequence) in sequences.iter().enumerate() {
	if sequence.is_empty() {
	    return Err( InputError::EmptySequence{ sequence: index } );
	}
	for itemset in sequence {
	    if itemset.is_empty() {
		return Err( InputError::EmptyItemset{ sequence: index } );
	    }
	    let mut seen: FxHashSet<Item> = FxHashSet::default();
	    for item in itemset {
		if parameters.get_mis( *item ).is_none() {
		    return Err( InputError::MissingMis{ item: *item } );
		}
		if !seen.insert( *item ) {
		    return Err( InputError::DuplicateItem{ sequence: index, item: *item } );
		}
	    }
	}
    }
    Ok( () )
}

#[cfg(test)]
impl Context {
    /// Builds a context from literal data. Panics on invalid input.
    pub(crate) fn for_test( sequences: Vec<RawSequence>, mis: &[(Item, f64)], sdc: f64 ) -> Context {
	let parameters = Parameters::new( mis.iter().copied().collect(), sdc );
	Context::new( sequences, parameters ).expect( "test input is valid" )
    }
}
