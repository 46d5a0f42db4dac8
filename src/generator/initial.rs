use tracing::{debug, warn};

use crate::*;

/// Outcome of the first database pass
#[derive( Debug )]
pub struct InitialResult {
    /// single item patterns of L in canonical order, the seeds of level 2
    pub candidates: Vec<Pattern>,
    /// patterns of L that reach their own MIS
    pub frequent: Vec<Pattern>,
    /// MIS of the first item in canonical order that reaches its own MIS
    pub global_threshold: Option<f64>,
}

/// Builds the seed list L and the frequent 1-sequences
pub struct InitialPass;

impl InitialPass {

    pub fn run( context: &Context ) -> InitialResult {
	let items = context.items_by_mis();
	let global_threshold = items.iter()
	    .find( |item| context.support( **item ) >= context.mis( **item ))
	    .map( |item| context.mis( *item ));

	let threshold = match global_threshold {
	    Some( threshold ) => threshold,
	    None => {
		warn!( "No item reaches its minimum item support" );
		return InitialResult{ candidates: Vec::new(), frequent: Vec::new(), global_threshold };
	    },
	};
	debug!( "Global threshold {threshold:.3}" );

	let total = context.number_sequences();
	let candidates: Vec<Pattern> = items.into_iter()
	    .filter( |item| context.support( *item ) >= threshold )
	    .map( |item| Pattern::with_count( vec!( vec!( item )), context.mis( item ), context.item_count( item ), total ))
	    .collect();
	let frequent = generator::extract_frequent( &candidates );

	InitialResult{ candidates, frequent, global_threshold }
    }
}
