pub use crate::parser::{
    line_checksum, parse_catalog, parse_element_sets, validate_element_set, CatalogError,
    ElementError, ParseError, ParseErrorExt,
};

pub mod parser;

/// Width of each element line, including the trailing checksum digit
pub const TLE_LINE_LEN: usize = 69;
/// Optional prefix on the name line of three-line element (3LE) catalogs
pub const NAME_LINE_PREFIX: &str = "0 ";
