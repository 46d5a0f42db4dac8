
mod serialize; // report and json output of the history
#[cfg(test)]
mod brute_force;

use std::time::Instant;

use tracing::{debug, error, info, info_span, trace, warn, Level};

use crate::*;
use crate::generator::{CandidateGenerator, InitialPass, JoinGenerator, Level2Generator};

pub use serialize::HistoryFormatter;

pub trait Miner {
    /// Mines the frequent patterns of every length and returns them level by level
    fn mine( &mut self, context: &Context ) -> History;
}

/// Level-wise miner with per-item minimum supports
pub struct MsGspMiner {
    max_k: usize,
}

/// Candidates and frequent patterns of one pattern length
#[derive( Debug )]
pub struct PatternLevel {
    k: usize,
    candidates: Vec<Pattern>,
    frequent: Vec<Pattern>,
}

/// Levels of a mining run, ordered by pattern length starting at 1
#[derive( Debug, Default )]
pub struct History {
    levels: Vec<PatternLevel>,
}

impl Miner for MsGspMiner {

    fn mine( &mut self, context: &Context ) -> History {
	let mut history = History::new();
	if self.max_k == 0 {
	    return history;
	}
	let start = Instant::now();
	history.push( self.first_level( context ));

	for k in 2 ..= self.max_k {
	    let previous = history.get_levels().last().expect( "first level is always present" );
	    if previous.get_candidates().is_empty() {
		debug!( "No candidates of length {}, stopping", k - 1 );
		break;
	    }
	    let level = self.next_level( k, previous, context );
	    history.push( level );
	}

	info!( "Found {} frequent patterns in {}ms", history.number_frequent(), start.elapsed().as_millis() );
	history
    }
}

impl MsGspMiner {

    pub fn new( max_k: usize ) -> MsGspMiner {
	MsGspMiner{ max_k }
    }

    fn first_level( &self, context: &Context ) -> PatternLevel {
	let _span = info_span!( "level", k = 1 ).entered();
	let initial = InitialPass::run( context );
	let level = PatternLevel::new( 1, initial.candidates, initial.frequent );
	info!( "{} seed items, {} frequent", level.get_candidates().len(), level.get_frequent().len() );
	level.log( "frequent patterns", Level::DEBUG );
	level
    }

    fn next_level( &self, k: usize, previous: &PatternLevel, context: &Context ) -> PatternLevel {
	let _span = info_span!( "level", k ).entered();
	let start = Instant::now();
	let candidates = if k == 2 {
	    Level2Generator.generate( previous.get_candidates(), context )
	} else {
	    JoinGenerator.generate( previous.get_frequent(), context )
	};
	let frequent = generator::extract_frequent( &candidates );
	let level = PatternLevel::new( k, candidates, frequent );

	info!( "{} candidates, {} frequent in {}ms",
	       level.get_candidates().len(), level.get_frequent().len(), start.elapsed().as_millis() );
	level.log( "frequent patterns", Level::DEBUG );
	level
    }
}

impl PatternLevel {

    pub fn new( k: usize, candidates: Vec<Pattern>, frequent: Vec<Pattern> ) -> PatternLevel {
	PatternLevel{ k, candidates, frequent }
    }

    pub fn get_k( &self ) -> usize {
	self.k
    }

    pub fn get_candidates( &self ) -> &[Pattern] {
	&self.candidates
    }

    pub fn get_frequent( &self ) -> &[Pattern] {
	&self.frequent
    }
}

impl Loggable for PatternLevel {
    fn log( &self, message: &str, level: Level ) {
	let patterns: Vec<String> = self.frequent.iter().map( |pattern| pattern.to_string() ).collect();
	let patterns = patterns.join( " " );
	let k = self.k;
	if level == Level::ERROR {
	    error!( "{message} (length {k}): {patterns}" );
	} else if level == Level::WARN {
	    warn!( "{message} (length {k}): {patterns}" );
	} else if level == Level::INFO {
	    info!( "{message} (length {k}): {patterns}" );
	} else if level == Level::DEBUG {
	    debug!( "{message} (length {k}): {patterns}" );
	} else {
	    trace!( "{message} (length {k}): {patterns}" );
	}
    }
}

impl History {

    pub fn new() -> History {
	History::default()
    }

    pub fn push( &mut self, level: PatternLevel ) {
	debug_assert_eq!( level.get_k(), self.levels.len() + 1, "levels are pushed in order" );
	self.levels.push( level );
    }

    pub fn get_levels( &self ) -> &[PatternLevel] {
	&self.levels
    }

    /// Frequent patterns of length k, empty if mining stopped before
    pub fn get_frequent( &self, k: usize ) -> &[Pattern] {
	k.checked_sub( 1 )
	    .and_then( |index| self.levels.get( index ))
	    .map_or( &[], |level| level.get_frequent() )
    }

    pub fn number_frequent( &self ) -> usize {
	self.levels.iter().map( |level| level.get_frequent().len() ).sum()
    }
}

#[cfg(test)]
mod test {

    use rand::prelude::*;
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::data::synthetic::{SyntheticConfig, SyntheticGenerator};
    use crate::pattern::without_item_at;

    fn sequences( patterns: &[Pattern] ) -> Vec<&RawSequence> {
	patterns.iter().map( |pattern| pattern.get_sequence() ).collect()
    }

    fn fixture() -> Context {
	Context::for_test(
	    vec!(
		vec!( vec!( 1 ), vec!( 2 ), vec!( 3 )),
		vec!( vec!( 1, 2 ), vec!( 3 )),
		vec!( vec!( 1 ), vec!( 3 )),
	    ),
	    &[(1, 0.5), (2, 0.7), (3, 0.5)],
	    1.0
	)
    }

    #[test]
    fn test_supports_of_two_records() {
	let context = Context::for_test(
	    vec!( vec!( vec!( 1 ), vec!( 2 ), vec!( 3 )), vec!( vec!( 1, 2 ), vec!( 3 ))),
	    &[(1, 0.5), (2, 0.5), (3, 0.5)],
	    1.0
	);
	let database = context.get_database();
	assert_eq!( Pattern::new( vec!( vec!( 1 )), 0.5, database ).get_support(), 1.0 );
	assert_eq!( Pattern::new( vec!( vec!( 2 )), 0.5, database ).get_support(), 1.0 );
	assert_eq!( Pattern::new( vec!( vec!( 1 ), vec!( 2 )), 0.5, database ).get_support(), 0.5 );
    }

    #[test]
    fn test_mine_fixture() {
	let context = fixture();
	let history = MsGspMiner::new( 2 ).mine( &context );
	assert_eq!( history.get_levels().len(), 2 );

	// 2 is in L but misses its own MIS
	let first = &history.get_levels()[0];
	assert_eq!( sequences( first.get_candidates() ), vec!( &vec!( vec!( 1 )), &vec!( vec!( 3 )), &vec!( vec!( 2 ))));
	assert_eq!( sequences( history.get_frequent( 1 )), vec!( &vec!( vec!( 1 )), &vec!( vec!( 3 ))));

	let second = &history.get_levels()[1];
	assert_eq!( second.get_candidates().len(), 11 );
	let one_two = second.get_candidates().iter()
	    .find( |pattern| pattern.get_sequence() == &vec!( vec!( 1 ), vec!( 2 )))
	    .unwrap();
	assert_eq!( one_two.get_count(), 1 );
	assert!( !one_two.is_frequent() );
	assert_eq!( sequences( history.get_frequent( 2 )),
		    vec!( &vec!( vec!( 1 ), vec!( 3 )), &vec!( vec!( 2 ), vec!( 3 ))));
	assert_eq!( history.get_frequent( 2 )[1].get_count(), 2 );
	assert_eq!( history.number_frequent(), 4 );
    }

    #[test]
    fn test_stop_after_empty_level() {
	let context = fixture();
	let history = MsGspMiner::new( 10 ).mine( &context );
	// <{2}{2}{3}> is the only candidate of length 3 and does not occur
	let levels = history.get_levels();
	assert_eq!( levels.len(), 4 );
	assert_eq!( sequences( levels[2].get_candidates() ), vec!( &vec!( vec!( 2 ), vec!( 2 ), vec!( 3 ))));
	assert!( levels[2].get_frequent().is_empty() );
	assert!( levels[3].get_candidates().is_empty() );
	assert!( history.get_frequent( 5 ).is_empty() );
	assert!( history.get_frequent( 0 ).is_empty() );
    }

    #[test]
    fn test_no_frequent_items() {
	let context = Context::for_test( vec!( vec!( vec!( 1 )), vec!( vec!( 2 ))), &[(1, 0.9), (2, 0.9)], 1.0 );
	let history = MsGspMiner::new( 5 ).mine( &context );
	assert_eq!( history.get_levels().len(), 1 );
	assert_eq!( history.number_frequent(), 0 );

	assert!( MsGspMiner::new( 0 ).mine( &context ).get_levels().is_empty() );
    }

    fn random_context( seed: u64, sdc: f64 ) -> (Vec<RawSequence>, Context) {
	let generator = SyntheticGenerator::new( SyntheticConfig{
	    number_items: 6,
	    number_sequences: 15,
	    max_sequence_size: 5,
	    max_itemset_size: 3,
	    mis_range: (0.1, 0.5),
	}).unwrap();
	let mut rng = StdRng::seed_from_u64( seed );
	let sequences = generator.generate_database( &mut rng );
	let parameters = generator.generate_parameters( sdc, &mut rng );
	let context = Context::new( sequences.clone(), parameters ).unwrap();
	(sequences, context)
    }

    #[test]
    fn test_frequent_patterns_are_anti_monotone() {
	for seed in 0 .. 5 {
	    let (_, context) = random_context( seed, 1.0 );
	    let history = MsGspMiner::new( 4 ).mine( &context );
	    for level in history.get_levels().iter().skip( 1 ) {
		let previous: FxHashSet<&RawSequence> = history.get_frequent( level.get_k() - 1 ).iter()
		    .map( |pattern| pattern.get_sequence() )
		    .collect();
		for pattern in level.get_frequent() {
		    assert!( pattern.get_support() >= pattern.get_min_support() );
		    for (index, item) in pattern.items().enumerate() {
			if context.mis( item ) != pattern.get_min_support() {
			    let reduced = without_item_at( pattern.get_sequence(), index as isize );
			    assert!( previous.contains( &reduced ), "seed {seed}: {pattern} lacks {reduced:?}" );
			}
		    }
		}
	    }
	}
    }

    fn assert_matches_enumeration( seed: u64, sequences: &[RawSequence], context: &Context, max_k: usize ) {
	let history = MsGspMiner::new( max_k ).mine( context );
	let expected = brute_force::frequent_by_enumeration( sequences, context, max_k );

	for k in 1 ..= max_k {
	    let mined: FxHashSet<RawSequence> = history.get_frequent( k ).iter()
		.map( |pattern| pattern.get_sequence().clone() )
		.collect();
	    assert_eq!( mined.len(), history.get_frequent( k ).len(), "seed {seed}: duplicates of length {k}" );
	    assert_eq!( mined, expected[ k - 1 ], "seed {seed}: frequent patterns of length {k} differ" );
	}
    }

    #[test]
    fn test_matches_enumeration() {
	for seed in 0 .. 10 {
	    let sdc = if seed % 2 == 0 { 1.0 } else { 0.3 };
	    let (sequences, context) = random_context( seed, sdc );
	    assert_matches_enumeration( seed, &sequences, &context, 4 );
	}
    }

    #[test]
    fn test_matches_enumeration_with_tied_mis() {
	for seed in 0 .. 10 {
	    let sdc = if seed % 2 == 0 { 1.0 } else { 0.3 };
	    let (sequences, _) = random_context( seed, sdc );
	    // every MIS value is shared by two items
	    let mut rng = StdRng::seed_from_u64( seed );
	    let mut values = vec!( 0.1, 0.1, 0.2, 0.2, 0.3, 0.3 );
	    values.shuffle( &mut rng );
	    let parameters = Parameters::new( values.into_iter().enumerate().collect(), sdc );
	    let context = Context::new( sequences.clone(), parameters ).unwrap();
	    assert_matches_enumeration( seed, &sequences, &context, 4 );
	}
    }

    #[test]
    fn test_mine_merged_itemsets() {
	// 2 and 3 share a MIS
	let data: Vec<RawSequence> = vec!(
	    vec!( vec!( 1, 2, 3 )),
	    vec!( vec!( 1, 2, 3 ), vec!( 4 )),
	    vec!( vec!( 1, 2 ), vec!( 3 )),
	);
	let context = Context::for_test( data.clone(), &[(1, 0.3), (2, 0.5), (3, 0.5), (4, 0.9)], 1.0 );
	let history = MsGspMiner::new( 4 ).mine( &context );

	let merged = history.get_frequent( 3 ).iter()
	    .find( |pattern| pattern.get_sequence() == &vec!( vec!( 1, 2, 3 )))
	    .unwrap();
	assert_eq!( merged.get_count(), 2 );
	assert!( sequences( history.get_frequent( 4 )).contains( &&vec!( vec!( 1, 2, 3 ), vec!( 4 ))));
	assert_matches_enumeration( 0, &data, &context, 4 );
    }

    #[test]
    fn test_deterministic() {
	let (_, context) = random_context( 42, 0.3 );
	let first = MsGspMiner::new( 4 ).mine( &context );
	let second = MsGspMiner::new( 4 ).mine( &context );
	for (left, right) in first.get_levels().iter().zip( second.get_levels() ) {
	    assert_eq!( left.get_candidates(), right.get_candidates() );
	    assert_eq!( left.get_frequent(), right.get_frequent() );
	}
    }
}
