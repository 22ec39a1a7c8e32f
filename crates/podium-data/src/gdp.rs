//! GDP-by-country lookup table.
//!
//! Precomputed by an external batch step that averages the GDP column of the
//! polished dataset per NOC code; loaded here as a static input.

use std::{collections::HashMap, path::Path};

use crate::table::LoadError;

/// Error raised when a country code has no GDP entry.
///
/// Kept distinct from generic invalid-parameter errors so callers can tell a
/// typo'd country apart from a malformed request.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown country code '{noc}'")]
pub struct UnknownCountry {
    pub noc: String,
}

/// Country code to GDP mapping.
#[derive(Debug, Clone, Default)]
pub struct GdpTable {
    by_noc: HashMap<String, f64>,
}

impl GdpTable {
    /// Builds a table from `(code, gdp)` pairs.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            by_noc: pairs.into_iter().collect(),
        }
    }

    /// Loads the lookup table from a CSV file with `NOC,GDP` columns.
    pub fn load<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path_display = path.as_ref().display().to_string();
        let unavailable = |source| LoadError::Unavailable {
            path: path_display.clone(),
            source,
        };

        let mut reader = csv::Reader::from_path(path.as_ref()).map_err(&unavailable)?;
        let headers = reader.headers().map_err(&unavailable)?.clone();
        let column = |name: &'static str| -> Result<usize, LoadError> {
            headers.iter().position(|h| h == name).ok_or(LoadError::MissingColumn {
                path: path_display.clone(),
                column: name,
            })
        };
        let noc_idx = column("NOC")?;
        let gdp_idx = column("GDP")?;

        let mut by_noc = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(&unavailable)?;
            let noc = record.get(noc_idx).unwrap_or("").trim();
            let Some(gdp) = record.get(gdp_idx).and_then(|cell| cell.trim().parse().ok()) else {
                continue;
            };
            by_noc.insert(noc.to_owned(), gdp);
        }
        Ok(Self { by_noc })
    }

    /// Looks up the GDP for a country code.
    pub fn lookup(&self, noc: &str) -> Result<f64, UnknownCountry> {
        self.by_noc.get(noc).copied().ok_or_else(|| UnknownCountry {
            noc: noc.to_owned(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_noc.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_noc.is_empty()
    }
}
