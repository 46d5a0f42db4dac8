use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::io::PrettyFormatter;

use super::{History, PatternLevel};

/// Prints the number of frequent patterns per length, optionally followed by the patterns
pub struct HistoryFormatter {
    show_patterns: bool,
}

impl PrettyFormatter<History> for HistoryFormatter {

    fn format_pretty( &self, history: &History ) -> String {
	let mut output = String::new();
	for level in history.get_levels() {
	    let frequent = level.get_frequent();
	    output = join_lines( output, format!( "The number of length {} sequential patterns is {}", level.get_k(), frequent.len() ));
	    if self.show_patterns {
		output = frequent.iter()
		    .map( |pattern| format!( "{pattern} Count: {}", pattern.get_count() ))
		    .fold( output, join_lines );
	    }
	    output.push( '\n' );
	}
	output
    }
}

impl Serialize for History {
    fn serialize<S>( &self, serializer: S ) -> Result<S::Ok, S::Error> where S: Serializer {
	self.levels.serialize( serializer )
    }
}

impl Serialize for PatternLevel {
    fn serialize<S>( &self, serializer: S ) -> Result<S::Ok, S::Error> where S: Serializer {
	let mut state = serializer.serialize_struct( "PatternLevel", 3 )?;
	state.serialize_field( "k", &self.k )?;
	state.serialize_field( "number_candidates", &self.candidates.len() )?;
	state.serialize_field( "frequent", &self.frequent )?;
	state.end()
    }
}

fn join_lines( mut accumulator: String, addition: String ) -> String {
    accumulator.push_str( addition.as_str() );
    accumulator.push( '\n' );
    accumulator
}

impl Default for HistoryFormatter {
    fn default() -> HistoryFormatter {
	HistoryFormatter::new()
    }
}

impl HistoryFormatter {
    pub fn new() -> HistoryFormatter {
	HistoryFormatter{
	    show_patterns: false,
	}
    }

    pub fn show_patterns( &mut self ) { self.show_patterns = true; }
}
