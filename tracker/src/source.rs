//! Where element sets come from. Retrieval itself is up to the caller; the
//! tracker only needs a valid `ElementSet` before it can start.

use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, warn};
use track_protocol::{parse_catalog, CatalogError};
use track_types::prelude::ElementSet;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to read element catalog '{}'. {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse element catalog '{}'. {source}", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
    #[error("No element set matching {selection} in '{}'", .path.display())]
    NotFound { path: PathBuf, selection: String },
    #[error("Element source is unavailable. {0}")]
    Unavailable(String),
}

/// Which record of a multi-record catalog to use
#[derive(Debug, Clone, Default)]
pub enum Selection {
    #[default]
    First,
    /// Exact name, after trimming
    Name(String),
    Matches(Regex),
}

impl Selection {
    pub fn select<'a>(&self, sets: &'a [ElementSet]) -> Option<&'a ElementSet> {
        match self {
            Selection::First => sets.first(),
            Selection::Name(name) => sets.iter().find(|s| s.name == name.trim()),
            Selection::Matches(re) => sets.iter().find(|s| re.is_match(&s.name)),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::First => f.write_str("the first record"),
            Selection::Name(n) => write!(f, "name '{n}'"),
            Selection::Matches(re) => write!(f, "pattern '{}'", re.as_str()),
        }
    }
}

/// A capability that produces one element set
pub trait ElementSource {
    fn fetch(&mut self) -> Result<ElementSet, FetchError>;
}

/// Reads a catalog file (Celestrak `FORMAT=tle` text) on every fetch
#[derive(Debug, Clone)]
pub struct CatalogFileSource {
    path: PathBuf,
    selection: Selection,
}

impl CatalogFileSource {
    pub fn new<P: AsRef<Path>>(path: P, selection: Selection) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            selection,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ElementSource for CatalogFileSource {
    fn fetch(&mut self) -> Result<ElementSet, FetchError> {
        let content = fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })?;
        let sets = parse_catalog(&content).map_err(|source| FetchError::Catalog {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = sets.len(), "Loaded element catalog");

        self.selection
            .select(&sets)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                path: self.path.clone(),
                selection: self.selection.to_string(),
            })
    }
}

/// Fetch from `source`, substituting `fallback` if that fails
pub fn fetch_or_fallback<S: ElementSource + ?Sized>(
    source: &mut S,
    fallback: ElementSet,
) -> ElementSet {
    match source.fetch() {
        Ok(set) => set,
        Err(e) => {
            warn!(
                error = %e,
                fallback = %fallback.name,
                "Element source failed, using the fallback element set"
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::nominal;
    use indoc::indoc;
    use std::io::Write;

    const CATALOG: &str = indoc! {r#"
        GEO1
        1 37481U 11019A   23190.45078927 -.00000009  00000-0  00000+0 0  9991
        2 37481   2.3847  40.6385 0001640  70.7486  43.7146  1.00272292 44578
        GEO2
        1 39120U 13011A   23190.50177227 -.00000262  00000-0  00000+0 0  9997
        2 39120   2.3950  38.7964 0001772  68.0002 323.0070  1.00271163 37822
    "#};

    struct Unreachable;

    impl ElementSource for Unreachable {
        fn fetch(&mut self) -> Result<ElementSet, FetchError> {
            Err(FetchError::Unavailable("offline".to_owned()))
        }
    }

    fn catalog_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tracker-source-{}-{name}.txt",
            std::process::id()
        ));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn selection() {
        let sets = track_protocol::parse_catalog(CATALOG).unwrap();
        assert_eq!(Selection::First.select(&sets).unwrap().name, "GEO1");
        assert_eq!(
            Selection::Name(" GEO2 ".to_owned()).select(&sets).unwrap().name,
            "GEO2"
        );
        let re = Regex::new("O2$").unwrap();
        assert_eq!(Selection::Matches(re).select(&sets).unwrap().name, "GEO2");
        assert!(Selection::Name("ISS".to_owned()).select(&sets).is_none());
    }

    #[test]
    fn catalog_file_source() {
        let path = catalog_file("ok", CATALOG);
        let mut src = CatalogFileSource::new(&path, Selection::Name("GEO2".to_owned()));
        assert_eq!(src.fetch().unwrap().catalog_number(), Some("39120"));

        let mut missing = CatalogFileSource::new(&path, Selection::Name("ISS".to_owned()));
        assert!(matches!(missing.fetch(), Err(FetchError::NotFound { .. })));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn fallback_substitution() {
        let fallback = nominal::fallback_element_set();
        assert_eq!(fetch_or_fallback(&mut Unreachable, fallback.clone()), fallback);

        let mut no_file = CatalogFileSource::new("/nonexistent/stations.txt", Selection::First);
        assert!(matches!(no_file.fetch(), Err(FetchError::Io { .. })));
        assert_eq!(fetch_or_fallback(&mut no_file, fallback.clone()), fallback);

        let path = catalog_file("bad", "ISS\nnot an element line\n");
        let mut bad = CatalogFileSource::new(&path, Selection::First);
        assert!(matches!(bad.fetch(), Err(FetchError::Catalog { .. })));
        fs::remove_file(path).unwrap();
    }
}
