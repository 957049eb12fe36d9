//! The flat-file catalog shared by the generator and the simulator
//!
//! One `#` header line (any number of `#` lines are tolerated), then one
//! whitespace-separated row per body:
//!
//! ```text
//! # Name  X(AU)  Y(AU)  Radius(km)  Color(R,G,B)  Mass(kg)  Speed(km/s)  Primary
//! Sun     0.0    0.0    696000.0    255,204,0     1.989e30  0.0          None
//! ```
//!
//! Rows may appear in any order; [`bootstrap`] works out the resolution order.

mod bootstrap;
mod format;

pub use bootstrap::{Bootstrap, BootstrapOptions, BootstrapReport, bootstrap};
pub use format::{CATALOG_HEADER, format_catalog, format_row, parse_catalog, parse_row};

use crate::physics::body::BodyColor;
use crate::physics::math::Scalar;
use std::fmt;
use std::path::{Path, PathBuf};

/// Primary names meaning "orbits nothing", compared case-insensitively
pub const NO_PRIMARY_SENTINELS: [&str; 3] = ["none", "nenhum", "-"];

/// Sentinel the writer emits for root bodies
pub const NO_PRIMARY: &str = "None";

/// One catalog row, in the file's own units
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogRow {
    pub name: String,
    /// AU; absolute for root and star-orbiting bodies, relative to the
    /// primary otherwise
    pub x: Scalar,
    pub y: Scalar,
    /// Kilometres
    pub radius_km: Scalar,
    pub color: BodyColor,
    /// Kilograms
    pub mass: Scalar,
    /// Kilometres per second
    pub speed_km_s: Scalar,
    pub primary: Option<String>,
}

impl CatalogRow {
    /// The primary this row orbits. A row naming itself orbits nothing.
    pub fn primary_name(&self) -> Option<&str> {
        self.primary.as_deref().filter(|primary| *primary != self.name)
    }

    pub fn is_root(&self) -> bool {
        self.primary_name().is_none()
    }
}

/// Interprets a primary column, mapping the sentinels to `None`
pub fn primary_from_column(column: &str) -> Option<String> {
    let is_sentinel = NO_PRIMARY_SENTINELS
        .iter()
        .any(|sentinel| column.eq_ignore_ascii_case(sentinel));

    (!is_sentinel).then(|| column.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowErrorKind {
    ColumnCount(usize),
    Number { column: &'static str, value: String },
    /// Mass and radius must be strictly positive
    NotPositive { column: &'static str, value: Scalar },
    Color(String),
}

/// A rejected catalog line
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the file
    pub line: usize,
    pub kind: RowErrorKind,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RowErrorKind::ColumnCount(found) => {
                write!(f, "line {}: expected 8 columns, found {found}", self.line)
            }
            RowErrorKind::Number { column, value } => {
                write!(f, "line {}: invalid {column} value {value:?}", self.line)
            }
            RowErrorKind::NotPositive { column, value } => {
                write!(f, "line {}: {column} must be positive, got {value}", self.line)
            }
            RowErrorKind::Color(value) => {
                write!(f, "line {}: invalid color {value:?} (expected R,G,B)", self.line)
            }
        }
    }
}

impl std::error::Error for RowError {}

/// Result of parsing a catalog: the good rows plus every rejected line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCatalog {
    pub rows: Vec<CatalogRow>,
    pub rejected: Vec<RowError>,
}

#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file could not be read or written
    Io { path: PathBuf, source: std::io::Error },
    /// Rows exist but none of them can be the star
    NoStar,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, source } => {
                write!(f, "catalog file {}: {source}", path.display())
            }
            CatalogError::NoStar => {
                write!(f, "catalog has no root body to act as the star")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::NoStar => None,
        }
    }
}

/// Reads and parses a catalog file; rejected rows are logged and skipped
pub fn read_catalog(path: impl AsRef<Path>) -> Result<ParsedCatalog, CatalogError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_catalog(&text);
    for rejected in &parsed.rejected {
        bevy::log::warn!("Skipping catalog row in {}: {}", path.display(), rejected);
    }

    Ok(parsed)
}

pub fn write_catalog(path: impl AsRef<Path>, rows: &[CatalogRow]) -> Result<(), CatalogError> {
    let path = path.as_ref();
    std::fs::write(path, format_catalog(rows)).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
