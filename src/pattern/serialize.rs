use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::*;
use crate::io::format_items;

use super::Pattern;

/// Formats a sequence as <{1,2}{3}>
pub fn format_sequence( sequence: &[Itemset] ) -> String {
    let mut output = String::from( "<" );
    for itemset in sequence {
	output.push_str( format_items( itemset.iter().copied(), "{", ",", "}" ).as_str() );
    }
    output.push( '>' );
    output
}

impl fmt::Display for Pattern {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
	write!( f, "{}", format_sequence( &self.sequence ))
    }
}

impl Serialize for Pattern {
    fn serialize<S>( &self, serializer: S ) -> Result<S::Ok, S::Error> where S: Serializer {
	let mut state = serializer.serialize_struct( "Pattern", 4 )?;
	state.serialize_field( "sequence", &self.sequence )?;
	state.serialize_field( "min_support", &self.min_support )?;
	state.serialize_field( "count", &self.count )?;
	state.serialize_field( "support", &self.support )?;
	state.end()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_format_sequence() {
	assert_eq!( format_sequence( &[vec!( 1, 2 ), vec!( 3 )] ), "<{1,2}{3}>" );
	assert_eq!( format_sequence( &[] ), "<>" );
    }

    #[test]
    fn test_serialize_pattern() {
	let pattern = Pattern::with_count( vec!( vec!( 4 ), vec!( 1, 2 )), 0.25, 1, 4 );
	assert_eq!( pattern.to_string(), "<{4}{1,2}>" );
	let json = serde_json::to_value( &pattern ).unwrap();
	assert_eq!( json, serde_json::json!({
	    "sequence": [[4], [1, 2]],
	    "min_support": 0.25,
	    "count": 1,
	    "support": 0.25,
	}));
    }
}
