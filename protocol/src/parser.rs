//! A small parser for three-line element catalogs (Celestrak `FORMAT=tle` text)

use crate::{NAME_LINE_PREFIX, TLE_LINE_LEN};
use nom::{
    branch::alt,
    character::complete::{line_ending, not_line_ending, space0},
    combinator::eof,
    error::ErrorKind,
    multi::{fold_many0, many0},
    sequence::terminated,
    Err::Failure,
};
use tracing::debug;
use track_types::prelude::*;

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Invalid element set. {0}")]
    Element(#[from] ElementError),
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

pub trait ParseErrorExt {
    fn is_failure(&self) -> bool;
}

impl<I> ParseErrorExt for nom::Err<ParseError<I>> {
    fn is_failure(&self) -> bool {
        matches!(self, nom::Err::Failure(_))
    }
}

/// Structural problems with a single element record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    #[error("Missing satellite name")]
    MissingName,
    #[error("Element line {line} contains non-ASCII characters")]
    NonAscii { line: u8 },
    #[error("Element line {line} has {found} characters, expected 69")]
    Length { line: u8, found: usize },
    #[error("Element line {line} does not start with '{line} '")]
    LineNumber { line: u8 },
    #[error("Element line {line} checksum is '{found}', computed {computed}")]
    Checksum { line: u8, found: char, computed: u8 },
    #[error("Element lines disagree on the catalog number ('{line1}' vs '{line2}')")]
    CatalogNumber { line1: String, line2: String },
}

/// Errors for a whole catalog document
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error("Unparsable catalog content at line {line}")]
    Unparsable { line: usize },
    #[error("Catalog contains no element sets")]
    Empty,
}

/// Parse every record of a catalog, keeping document order.
///
/// Parsing stops at the first content that isn't a three-line record; the
/// unparsed remainder is returned. A record whose lines fail validation is a
/// `nom::Err::Failure`.
pub fn parse_element_sets(catalog: &str) -> Result<&str, Vec<ElementSet>> {
    let (s, _) = many0(blank_line)(catalog)?;
    let (s, sets) = fold_many0(element_set, Vec::new, |mut sets: Vec<ElementSet>, set| {
        sets.push(set);
        sets
    })(s)?;
    Ok((s, sets))
}

/// Parse a complete catalog document. Anything left over, other than
/// whitespace, is an error, as is a document without records.
pub fn parse_catalog(catalog: &str) -> std::result::Result<Vec<ElementSet>, CatalogError> {
    let line_of = |rest: &str| {
        let consumed = catalog.len() - rest.len();
        catalog[..consumed].matches('\n').count() + 1
    };

    match parse_element_sets(catalog) {
        Ok((rest, sets)) => {
            if !rest.trim().is_empty() {
                return Err(CatalogError::Unparsable {
                    line: line_of(rest),
                });
            }
            if sets.is_empty() {
                return Err(CatalogError::Empty);
            }
            debug!(count = sets.len(), "Parsed element catalog");
            Ok(sets)
        }
        Err(nom::Err::Error(ParseError::Element(e)))
        | Err(nom::Err::Failure(ParseError::Element(e))) => Err(e.into()),
        Err(nom::Err::Error(ParseError::Nom(rest, _)))
        | Err(nom::Err::Failure(ParseError::Nom(rest, _))) => Err(CatalogError::Unparsable {
            line: line_of(rest),
        }),
        // Only the streaming parsers report Incomplete
        Err(nom::Err::Incomplete(_)) => Err(CatalogError::Unparsable { line: 1 }),
    }
}

/// Check the structure of one record and build the element set from it.
///
/// Names are trimmed and lose an optional `"0 "` prefix; lines lose trailing
/// whitespace. Field-level contents are left to the propagator.
pub fn validate_element_set(
    name: &str,
    line1: &str,
    line2: &str,
) -> std::result::Result<ElementSet, ElementError> {
    let name = name.trim();
    let name = name.strip_prefix(NAME_LINE_PREFIX).unwrap_or(name).trim();
    if name.is_empty() {
        return Err(ElementError::MissingName);
    }

    let line1 = validate_line(1, line1)?;
    let line2 = validate_line(2, line2)?;

    // Columns 3-7
    let (catalog1, catalog2) = (&line1[2..7], &line2[2..7]);
    if catalog1 != catalog2 {
        return Err(ElementError::CatalogNumber {
            line1: catalog1.to_owned(),
            line2: catalog2.to_owned(),
        });
    }

    Ok(ElementSet::new(name, line1, line2))
}

/// Modulo-10 checksum over the first 68 columns: digits count their value,
/// minus signs count one, everything else zero.
pub fn line_checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(TLE_LINE_LEN - 1)
        .map(|b| match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

fn validate_line(number: u8, line: &str) -> std::result::Result<&str, ElementError> {
    let line = line.trim_end();
    if !line.is_ascii() {
        return Err(ElementError::NonAscii { line: number });
    }
    if line.len() != TLE_LINE_LEN {
        return Err(ElementError::Length {
            line: number,
            found: line.len(),
        });
    }

    let bytes = line.as_bytes();
    if bytes[0] != b'0' + number || bytes[1] != b' ' {
        return Err(ElementError::LineNumber { line: number });
    }

    let found = bytes[TLE_LINE_LEN - 1];
    let computed = line_checksum(line);
    if !found.is_ascii_digit() || found - b'0' != computed {
        return Err(ElementError::Checksum {
            line: number,
            found: found as char,
            computed,
        });
    }

    Ok(line)
}

fn element_set(s: &str) -> Result<&str, ElementSet> {
    let (s, name) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line1) = not_line_ending(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line2) = not_line_ending(s)?;
    let (s, _) = line_end(s)?;
    let (s, _) = many0(blank_line)(s)?;
    match validate_element_set(name, line1, line2) {
        Ok(set) => Ok((s, set)),
        Err(e) => Err(Failure(e.into())),
    }
}

fn line_end(s: &str) -> Result<&str, &str> {
    alt((line_ending, eof))(s)
}

fn blank_line(s: &str) -> Result<&str, &str> {
    terminated(space0, line_ending)(s)
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}
