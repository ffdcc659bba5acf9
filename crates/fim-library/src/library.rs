//! Library root and tile path resolution.

use std::path::{Path, PathBuf};

use fim_common::{is_vsi_path, normalize_vsi_separators, ControlRow, FimError, FimResult};

/// File name of the optional per-reach domain raster.
pub const DOMAIN_FILE_NAME: &str = "domain.tif";

/// Root folder of a FIM library.
///
/// Local roots are made absolute when constructed. GDAL virtual filesystem
/// roots (`/vsis3/...`, `/vsicurl/...`) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryRoot {
    Local(PathBuf),
    Vsi(String),
}

/// Paths resolved for one control row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTile {
    pub fim: PathBuf,
    pub domain: Option<PathBuf>,
}

impl LibraryRoot {
    /// Build a library root from a user-supplied path.
    pub fn new(raw: &str) -> FimResult<Self> {
        if is_vsi_path(raw) {
            return Ok(LibraryRoot::Vsi(raw.to_string()));
        }
        let absolute = std::path::absolute(raw).map_err(|e| {
            FimError::io(
                format!("error getting absolute path for FIM library directory {}", raw),
                e,
            )
        })?;
        Ok(LibraryRoot::Local(absolute))
    }

    pub fn as_path(&self) -> &Path {
        match self {
            LibraryRoot::Local(path) => path,
            LibraryRoot::Vsi(path) => Path::new(path),
        }
    }

    pub fn is_vsi(&self) -> bool {
        matches!(self, LibraryRoot::Vsi(_))
    }

    /// Resolve the tile path(s) a control row selects.
    ///
    /// `<root>/<reach>/z_<condition>/f_<flow>.tif`, plus
    /// `<root>/<reach>/domain.tif` when `with_domain` is set. The dots of the
    /// boundary condition become underscores. Pure: nothing is checked on disk.
    pub fn resolve(&self, row: &ControlRow, with_domain: bool) -> ResolvedTile {
        let reach_dir = join_segment(self.as_path(), &row.reach_id);
        let fim = join_segment(
            &join_segment(&reach_dir, &row.condition_dir()),
            &row.flow_file_name(),
        );
        let domain = with_domain.then(|| join_segment(&reach_dir, DOMAIN_FILE_NAME));

        if self.is_vsi() {
            // Joining may have introduced native separators
            ResolvedTile {
                fim: to_vsi_path(&fim),
                domain: domain.as_deref().map(to_vsi_path),
            }
        } else {
            ResolvedTile { fim, domain }
        }
    }
}

impl std::fmt::Display for LibraryRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path().display())
    }
}

/// Append `segment` under `base`, never letting a leading separator in the
/// segment replace the base.
fn join_segment(base: &Path, segment: &str) -> PathBuf {
    base.join(segment.trim_start_matches(['/', '\\']))
}

fn to_vsi_path(path: &Path) -> PathBuf {
    PathBuf::from(normalize_vsi_separators(&path.to_string_lossy()))
}
