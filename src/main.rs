use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use seqmine::*;
use seqmine::io::{self, PrettyFormatter};

/// Mines sequential patterns with per-item minimum supports
#[derive( Parser, Debug )]
#[command( name = "miner", version, long_about = None )]
struct Args {
    /// Sequence database, one sequence like <{1, 2}{3}> per line
    #[arg( short, long )]
    data: String,

    /// Parameter file with MIS(<item>) = <value> lines and an optional SDC = <value> line
    #[arg( short, long )]
    parameters: String,

    /// Maximum pattern length
    #[arg( short = 'k', long, default_value_t = 10 )]
    max_k: usize,

    /// Writes the frequent patterns as json to this file
    #[arg( short, long )]
    output: Option<String>,

    /// Logs every level in detail
    #[arg( short, long )]
    verbose: bool,
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    prepare_logging( args.verbose )?;

    let sequences = io::read_database( &args.data ).map_err( |err| err.to_string() )?;
    let parameters = io::read_parameters( &args.parameters ).map_err( |err| err.to_string() )?;
    let context = Context::new( sequences, parameters ).map_err( |err| err.to_string() )?;

    let mut miner = MsGspMiner::new( args.max_k );
    let history = miner.mine( &context );

    let mut formatter = HistoryFormatter::new();
    formatter.show_patterns();
    println!( "{}", formatter.format_pretty( &history ));

    if let Some( path ) = args.output {
	io::write_json( &history, &path ).map_err( |err| err.to_string() )?;
	info!( "Wrote frequent patterns to {path}" );
    }
    Ok( () )
}

fn prepare_logging( verbose: bool ) -> Result<(), String> {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let tracer = tracing_subscriber::fmt::fmt()
        .with_max_level( level )
	.with_writer( std::io::stderr )
        .finish();
    tracing::subscriber::set_global_default( tracer ).map_err( |err| err.to_string() )
}
