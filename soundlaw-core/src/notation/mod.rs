//! Rule notation compiler
//!
//! ```text
//! rule     := oldForm '>' newForm
//! oldForm  := segment ('|' segment)*
//! segment  := slot*
//! slot     := literal | '{' literal+ '}' | 'V' | 'ø' | '-'
//! literal  := baseChar combiningMark?
//! ```
//!
//! A subscript digit after a slot is a coindex. Each half is parsed into
//! slot streams by [`parse_form`], then [`correlate`] pairs the two halves
//! into rewrite steps.

mod correlator;
mod parser;

pub use correlator::{correlate, position_of};
pub use parser::{parse_form, parse_segment, ParsedForm, ParsedSegment, Slot};
