use clap::Parser;
use tracing::{info, debug};

use rand::prelude::*;
use statrs::distribution::DiscreteUniform;

use std::time::*;

use seqmine::*;
use seqmine::data::synthetic::{SyntheticConfig, SyntheticGenerator};

/// Times mining and support queries on synthetic sequence databases
#[derive( Parser, Debug )]
#[command( name = "mining_bench", long_about = None )]
struct Args {
    #[arg( long, default_value_t = 1000 )]
    sequences: usize,

    #[arg( long, default_value_t = 50 )]
    items: usize,

    #[arg( long, default_value_t = 8 )]
    max_sequence_size: usize,

    #[arg( long, default_value_t = 4 )]
    max_itemset_size: usize,

    #[arg( short = 'k', long, default_value_t = 4 )]
    max_k: usize,

    #[arg( long, default_value_t = 0 )]
    seed: u64,

    #[arg( long, default_value_t = 0.2 )]
    sdc: f64,

    /// Number of random support queries, 0 skips the query benchmark
    #[arg( long, default_value_t = 10000 )]
    queries: u64,
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    prepare_logging()?;

    let generator = SyntheticGenerator::new( SyntheticConfig{
	number_items: args.items,
	number_sequences: args.sequences,
	max_sequence_size: args.max_sequence_size,
	max_itemset_size: args.max_itemset_size,
	mis_range: (0.01, 0.2),
    })?;
    let mut rng = StdRng::seed_from_u64( args.seed );
    let sequences = generator.generate_database( &mut rng );
    let parameters = generator.generate_parameters( args.sdc, &mut rng );
    let context = Context::new( sequences, parameters ).map_err( |err| err.to_string() )?;

    benchmark_mining( &context, args.max_k );
    if args.queries > 0 {
	info!( "Start benchmark: uniform support queries" );
	let time = benchmark_uniform_queries( &context, args.queries, &mut rng )?;
	info!( "Result: {} uniform queries took {}ms", args.queries, time.as_millis() );
    }

    Result::Ok( () )
}

fn benchmark_mining( context: &Context, max_k: usize ) {
    info!( "Start benchmark: mining up to length {max_k}" );
    let start = Instant::now();
    let history = MsGspMiner::new( max_k ).mine( context );
    let time = start.elapsed();
    for level in history.get_levels() {
	info!( "length {}: {} candidates, {} frequent", level.get_k(), level.get_candidates().len(), level.get_frequent().len() );
    }
    info!( "Result: mining took {}ms", time.as_millis() );
}

fn benchmark_uniform_queries <R: Rng> ( context: &Context, number_queries: u64, rng: &mut R ) -> Result<Duration, String> {
    let universe = context.items_by_mis();
    let max_length = 8;
    // uniform lengths give short queries a shot too
    let length_distribution = DiscreteUniform::new( 1, max_length ).map_err( |e| e.to_string() )?;
    let item_distribution = DiscreteUniform::new( 0, universe.len() as i64 - 1 ).map_err( |e| e.to_string() )?;

    let mut query_time = Duration::new( 0, 0 );
    let mut query_time_buckets = vec!( Duration::new( 0, 0 ); max_length as usize );

    for _ in 0 .. number_queries {
	let query_length: f64 = length_distribution.sample( rng );
	let query_length = query_length as usize;
	let query = generate_random_query( context, &universe, &item_distribution, query_length, rng );

	let start = Instant::now();
	context.get_database().query_support( &query );
	let time_spent = start.elapsed();
	query_time += time_spent;
	query_time_buckets[ query_length - 1 ] += time_spent;
    }

    let length_query_times: Vec<u64> = query_time_buckets.iter().map( |d| d.as_millis() as u64 ).collect();
    debug!( "time by length {length_query_times:?} [ms]" );
    Ok( query_time )
}

/// Draws `length` items, each starting a new itemset with probability one half
fn generate_random_query <R: Rng> ( context: &Context, universe: &[Item], items: &DiscreteUniform, length: usize, rng: &mut R ) -> RawSequence {
    let mut query = RawSequence::new();
    for _ in 0 .. length {
	let index: f64 = items.sample( rng );
	let item = universe[ index as usize ];
	let separate = query.last().map_or( true, |itemset| itemset.contains( &item ));
	if separate || rng.gen_bool( 0.5 ) {
	    query.push( vec!( item ));
	} else if let Some( itemset ) = query.last_mut() {
	    itemset.push( item );
	    context.sort_itemset( itemset );
	}
    }
    query
}

fn prepare_logging() -> Result<(), String> {
    let tracer = tracing_subscriber::fmt::fmt()
        .with_max_level( tracing_subscriber::filter::LevelFilter::INFO )
        .finish();
    tracing::subscriber::set_global_default( tracer ).map_err( |err| err.to_string() )
}
