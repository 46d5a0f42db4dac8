use rustc_hash::FxHashSet;

use crate::*;
use crate::data::contains;

/// Enumerates every sequence of up to `max_k` items over the items of the database
/// and keeps, per length, those reaching the lowest MIS of their items within the SDC.
pub fn frequent_by_enumeration( sequences: &[RawSequence], context: &Context, max_k: usize ) -> Vec<FxHashSet<RawSequence>> {
    let items = context.items_by_mis();
    let mut current: FxHashSet<RawSequence> = items.iter()
	.map( |item| vec!( vec!( *item )))
	.collect();

    let mut levels = Vec::with_capacity( max_k );
    for k in 1 ..= max_k {
	if k > 1 {
	    current = extend( &current, &items, context );
	}
	let frequent = current.iter()
	    .filter( |sequence| is_frequent( sequence, sequences, context ))
	    .cloned()
	    .collect();
	levels.push( frequent );
    }
    levels
}

/// Adds one item to every sequence, either as a new itemset or into the last one
fn extend( sequences: &FxHashSet<RawSequence>, items: &[Item], context: &Context ) -> FxHashSet<RawSequence> {
    let mut extended = FxHashSet::default();
    for sequence in sequences {
	for item in items {
	    let mut appended = sequence.clone();
	    appended.push( vec!( *item ));
	    extended.insert( appended );

	    let mut merged = sequence.clone();
	    let last = merged.last_mut().expect( "enumerated sequences are not empty" );
	    if !last.contains( item ) {
		last.push( *item );
		context.sort_itemset( last );
		extended.insert( merged );
	    }
	}
    }
    extended
}

fn is_frequent( sequence: &[Itemset], records: &[RawSequence], context: &Context ) -> bool {
    let count = records.iter()
	.filter( |record| contains( record.as_slice(), sequence ))
	.count();
    let support = count as f64 / records.len() as f64;

    let items: Vec<Item> = sequence.iter().flatten().copied().collect();
    let min_mis = items.iter().map( |item| context.mis( *item )).fold( f64::INFINITY, f64::min );
    let max_support = items.iter().map( |item| context.support( *item )).fold( f64::NEG_INFINITY, f64::max );
    let min_support = items.iter().map( |item| context.support( *item )).fold( f64::INFINITY, f64::min );
    min_mis <= support && max_support - min_support <= context.get_parameters().get_sdc()
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_enumeration() {
	let sequences: Vec<RawSequence> = vec!(
	    vec!( vec!( 1, 2 ), vec!( 1 )),
	    vec!( vec!( 2 ), vec!( 1 )),
	);
	let context = Context::new( sequences.clone(), Parameters::new( [(1, 0.5), (2, 0.6)].into_iter().collect(), 1.0 )).unwrap();
	let levels = frequent_by_enumeration( &sequences, &context, 2 );

	let expected: FxHashSet<RawSequence> = [vec!( vec!( 1 )), vec!( vec!( 2 ))].into_iter().collect();
	assert_eq!( levels[0], expected );
	// <{1}{1}> and <{1,2}> occur once, which still reaches 0.5
	let expected: FxHashSet<RawSequence> = [
	    vec!( vec!( 2 ), vec!( 1 )),
	    vec!( vec!( 1 ), vec!( 1 )),
	    vec!( vec!( 1, 2 )),
	].into_iter().collect();
	assert_eq!( levels[1], expected );
    }
}
