
use bit_set::BitSet;
use rand::prelude::*;
use rustc_hash::FxHashMap;
use statrs::distribution::DiscreteUniform;

use crate::context::Parameters;
use super::{Item, Itemset, RawSequence};

/// Shape of randomly generated sequence databases
#[derive( Debug, Clone )]
pub struct SyntheticConfig {
    /// items are drawn from 0 .. number_items
    pub number_items: usize,
    pub number_sequences: usize,
    /// maximum number of itemsets per sequence
    pub max_sequence_size: usize,
    /// maximum number of items per itemset
    pub max_itemset_size: usize,
    /// MIS values are spread evenly over [low, high)
    pub mis_range: (f64, f64),
}

/// Draws sequence databases and matching parameters.
pub struct SyntheticGenerator {
    config: SyntheticConfig,
    sequence_size: DiscreteUniform,
    itemset_size: DiscreteUniform,
    item: DiscreteUniform,
}

impl SyntheticGenerator {

    pub fn new( config: SyntheticConfig ) -> Result<SyntheticGenerator, String> {
	if config.number_items == 0 {
	    return Err( "synthetic data needs at least one item".to_string() );
	}
	let (low, high) = config.mis_range;
	if !(0.0 <= low && low <= high && high <= 1.0) {
	    return Err( format!( "MIS range [{low}, {high}) is not within [0, 1]" ));
	}
	let max_sequence_size = config.max_sequence_size.max( 1 ) as i64;
	// an itemset cannot hold more distinct items than there are
	let max_itemset_size = config.max_itemset_size.clamp( 1, config.number_items ) as i64;

	let sequence_size = DiscreteUniform::new( 1, max_sequence_size ).map_err( |e| e.to_string() )?;
	let itemset_size = DiscreteUniform::new( 1, max_itemset_size ).map_err( |e| e.to_string() )?;
	let item = DiscreteUniform::new( 0, config.number_items as i64 - 1 ).map_err( |e| e.to_string() )?;
	Ok( SyntheticGenerator{ config, sequence_size, itemset_size, item } )
    }

    pub fn generate_database <R: Rng> ( &self, rng: &mut R ) -> Vec<RawSequence> {
	let mut sequences = Vec::with_capacity( self.config.number_sequences );
	for _ in 0 .. self.config.number_sequences {
	    sequences.push( self.generate_sequence( rng ));
	}
	sequences
    }

    fn generate_sequence <R: Rng> ( &self, rng: &mut R ) -> RawSequence {
	let size: f64 = self.sequence_size.sample( rng );
	let mut sequence = RawSequence::with_capacity( size as usize );
	for _ in 0 .. size as usize {
	    sequence.push( self.generate_itemset( rng ));
	}
	sequence
    }

    fn generate_itemset <R: Rng> ( &self, rng: &mut R ) -> Itemset {
	let size: f64 = self.itemset_size.sample( rng );
	let mut items = BitSet::with_capacity( self.config.number_items );
	while items.len() < size as usize {
	    let item: f64 = self.item.sample( rng );
	    items.insert( item as usize );
	}
	items.iter().collect()
    }

    /// Assigns pairwise distinct MIS values to all items.
    /// The values are evenly spaced over the configured range and handed out in random order.
    pub fn generate_parameters <R: Rng> ( &self, sdc: f64, rng: &mut R ) -> Parameters {
	let mut items: Vec<Item> = (0 .. self.config.number_items).collect();
	items.shuffle( rng );

	let (low, high) = self.config.mis_range;
	let step = (high - low) / self.config.number_items as f64;
	let mis: FxHashMap<Item, f64> = items.iter().enumerate()
	    .map( |(rank, item)| (*item, low + step * rank as f64) )
	    .collect();
	Parameters::new( mis, sdc )
    }
}
