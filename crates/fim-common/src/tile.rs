//! Resolved tile references.

use std::path::{Path, PathBuf};

/// Role of a tile in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Full modeled extent of a reach, painted beneath flood tiles
    Domain,
    /// Flood inundation map for one flow and boundary condition
    Fim,
}

/// A resolved path to a library tile.
///
/// Local libraries yield absolute paths; `/vsi` libraries yield
/// forward-slash GDAL virtual filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileReference {
    pub kind: TileKind,
    pub path: PathBuf,
}

impl TileReference {
    pub fn domain(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: TileKind::Domain,
            path: path.into(),
        }
    }

    pub fn fim(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: TileKind::Fim,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_domain(&self) -> bool {
        self.kind == TileKind::Domain
    }
}

impl std::fmt::Display for TileReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
