use std::path::Path;
use std::fs::File;
use std::io::{BufReader, BufRead, Write};

use crate::{Item, Itemset, RawSequence, Parameters, InputError};
use crate::error::Result;

/// Converts a structure into a string
pub trait PrettyFormatter<T> {
    fn format_pretty( &self, object: &T ) -> String;
}

pub type DataGenerator<T> = Box<dyn Iterator<Item = T>>;

/// One line of a parameter file
#[derive( Debug, Clone, PartialEq )]
pub enum ParameterLine {
    Mis( Item, f64 ),
    Sdc( f64 ),
}

/// Reads a text file line by line and creates data using the converter. Blank lines are skipped.
/// Conversion failures are reported with their line number.
pub fn read_data<T, F>( path: &str, converter: F ) -> Result<DataGenerator<Result<T>>> where
    T: 'static,
    F: Fn( &str ) -> std::result::Result<T, String> + 'static,
{
    let file = File::open( Path::new( path ))?;
    let reader = BufReader::new( file );
    let generator = reader.lines()
	.enumerate()
	.filter_map( move |(index, line)| match line {
	    Err( err ) => Some( Err( InputError::from( err ))),
	    Ok( line ) if line.trim().is_empty() => None,
	    Ok( line ) => Some( converter( line.trim() )
				.map_err( |reason| InputError::Parse{ line: index + 1, reason } )),
	});
    Ok( Box::new( generator ))
}

/// Reads one sequence per line
pub fn read_database( path: &str ) -> Result<Vec<RawSequence>> {
    read_data( path, parse_sequence )?.collect()
}

/// Reads MIS and SDC lines. Without an SDC line every support difference is allowed.
pub fn read_parameters( path: &str ) -> Result<Parameters> {
    let mut parameters = Parameters::default();
    for line in read_data( path, parse_parameter )? {
	match line? {
	    ParameterLine::Mis( item, mis ) => parameters.set_mis( item, mis ),
	    ParameterLine::Sdc( sdc ) => parameters.set_sdc( sdc ),
	}
    }
    Ok( parameters )
}

/// Parses numbers separated by splitter into a vector. Whitespace around numbers is ignored.
pub fn parse_items( line: &str, splitter: &str ) -> std::result::Result<Itemset, String> {
    let mut items = Itemset::new();
    if line.trim().is_empty() {
	return Ok( items );
    }
    for chunk in line.split( splitter ) {
	let chunk = chunk.trim();
	match Item::from_str_radix( chunk, 10 ) {
	    Ok( item ) => items.push( item ),
	    Err( _ ) => return Err( format!( "'{chunk}' is not an item" )),
	}
    }
    Ok( items )
}

/// Parses a sequence of the form <{10, 40, 50}{40, 90}>
pub fn parse_sequence( line: &str ) -> std::result::Result<RawSequence, String> {
    let inner = line.trim()
	.strip_prefix( "<{" )
	.and_then( |rest| rest.strip_suffix( "}>" ))
	.ok_or_else( || format!( "'{line}' is not enclosed in <{{ and }}>" ))?;
    inner.split( "}{" )
	.map( |itemset| parse_items( itemset, "," ))
	.collect()
}

/// Parses `MIS(<item>) = <value>` or `SDC = <value>`
pub fn parse_parameter( line: &str ) -> std::result::Result<ParameterLine, String> {
    let (key, value) = line.split_once( '=' )
	.ok_or_else( || format!( "'{line}' is not of the form <name> = <value>" ))?;
    let value = value.trim();
    let value: f64 = value.parse().map_err( |_| format!( "'{value}' is not a number" ))?;

    let key = key.trim();
    if key == "SDC" {
	return Ok( ParameterLine::Sdc( value ));
    }
    let item = key.strip_prefix( "MIS(" )
	.and_then( |rest| rest.strip_suffix( ')' ))
	.ok_or_else( || format!( "unknown parameter '{key}'" ))?;
    let item = Item::from_str_radix( item.trim(), 10 ).map_err( |_| format!( "'{item}' is not an item" ))?;
    Ok( ParameterLine::Mis( item, value ))
}

/// Creates a string from an iterator over items, e.g. {1,2,3}
pub fn format_items<I: Iterator<Item = Item>>( items: I, left_delimiter: &str, separator: &str, right_delimiter: &str ) -> String {
    let items: Vec<String> = items.map( |item| item.to_string() ).collect();
    let mut output = String::from( left_delimiter );
    output.push_str( items.join( separator ).as_str() );
    output.push_str( right_delimiter );
    output
}

/// Writes a serializeable model to a file
pub fn write_json<M: serde::Serialize>( model: &M, path: &str ) -> Result<()> {
    let json = serde_json::to_string( model )?;
    let mut file = File::create( Path::new( path ))?;
    write!( file, "{json}" )?;
    Ok( () )
}

#[cfg(test)]
mod test {

    use std::path::PathBuf;

    use super::*;

    fn temp_file( name: &str, content: &str ) -> PathBuf {
	let path = std::env::temp_dir().join( format!( "seqmine_{}_{name}", std::process::id() ));
	std::fs::write( &path, content ).unwrap();
	path
    }

    #[test]
    fn test_parse_sequence() {
	assert_eq!( parse_sequence( "<{10, 40, 50}{40, 90}>" ), Ok( vec!( vec!( 10, 40, 50 ), vec!( 40, 90 ))));
	assert_eq!( parse_sequence( "  <{7}>  " ), Ok( vec!( vec!( 7 ))));
	assert_eq!( parse_sequence( "<{1,2}{3}>" ), Ok( vec!( vec!( 1, 2 ), vec!( 3 ))));
	// empty itemsets are left to validation
	assert_eq!( parse_sequence( "<{}>" ), Ok( vec!( vec!() )));
	assert!( parse_sequence( "{1}{2}" ).is_err() );
	assert!( parse_sequence( "<{1, x}>" ).is_err() );
	assert!( parse_sequence( "<{1}{-2}>" ).is_err() );
    }

    #[test]
    fn test_parse_parameter() {
	assert_eq!( parse_parameter( "MIS(10) = 0.43" ), Ok( ParameterLine::Mis( 10, 0.43 )));
	assert_eq!( parse_parameter( "MIS( 3 )=0.1" ), Ok( ParameterLine::Mis( 3, 0.1 )));
	assert_eq!( parse_parameter( "SDC = 0.1" ), Ok( ParameterLine::Sdc( 0.1 )));
	assert!( parse_parameter( "MIS(10) 0.43" ).is_err() );
	assert!( parse_parameter( "MIN(10) = 0.43" ).is_err() );
	assert!( parse_parameter( "SDC = high" ).is_err() );
    }

    #[test]
    fn test_read_files() {
	let data = temp_file( "data.txt", "<{1, 2}{3}>\n\n<{2}{1, 3}>\n" );
	let parameters = temp_file( "para.txt", "MIS(1) = 0.5\nMIS(2) = 0.2\nMIS(3) = 0.3\nSDC = 0.25\n" );

	let sequences = read_database( data.to_str().unwrap() ).unwrap();
	assert_eq!( sequences, vec!( vec!( vec!( 1, 2 ), vec!( 3 )), vec!( vec!( 2 ), vec!( 1, 3 ))));

	let parameters = read_parameters( parameters.to_str().unwrap() ).unwrap();
	assert_eq!( parameters.get_mis( 2 ), Some( 0.2 ));
	assert_eq!( parameters.get_mis( 4 ), None );
	assert_eq!( parameters.get_sdc(), 0.25 );
    }

    #[test]
    fn test_report_line_number() {
	let data = temp_file( "broken.txt", "<{1}>\n\n<{2}{oops}>\n" );
	match read_database( data.to_str().unwrap() ) {
	    Err( InputError::Parse{ line, .. } ) => assert_eq!( line, 3 ),
	    other => panic!( "expected a parse error, got {other:?}" ),
	}
	assert!( matches!( read_database( "/nonexistent/seqmine/data.txt" ), Err( InputError::Io( _ ))));
    }

    #[test]
    fn test_format_items() {
	assert_eq!( format_items( vec!( 1, 2, 3 ).into_iter(), "{", ",", "}" ), "{1,2,3}" );
	assert_eq!( format_items( vec!( 4 ).into_iter(), "", " ", "" ), "4" );
	assert_eq!( format_items( Vec::new().into_iter(), "[", ",", "]" ), "[]" );
    }

    #[test]
    fn test_write_json() {
	let path = std::env::temp_dir().join( format!( "seqmine_{}_out.json", std::process::id() ));
	write_json( &vec!( vec!( 1, 2 ), vec!( 3 )), path.to_str().unwrap() ).unwrap();
	assert_eq!( std::fs::read_to_string( &path ).unwrap(), "[[1,2],[3]]" );
    }
}
