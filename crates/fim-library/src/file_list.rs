//! Ordered tile list fed to the mosaic builder.
//!
//! The mosaic builder paints later inputs over earlier ones, so domain tiles
//! go first and FIM tiles after them. Within each block the control table
//! order is kept.

use fim_common::{ControlRow, TileReference};
use tracing::debug;

use crate::library::LibraryRoot;

/// Tiles of a composite in layering order, bottom first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedFileList {
    tiles: Vec<TileReference>,
}

impl OrderedFileList {
    /// Resolve every row against the library.
    ///
    /// Each row contributes exactly one FIM tile, and one domain tile when
    /// `with_domain` is set. Nothing is deduplicated or filtered.
    pub fn build(rows: &[ControlRow], root: &LibraryRoot, with_domain: bool) -> Self {
        let mut domain_tiles = Vec::with_capacity(if with_domain { rows.len() } else { 0 });
        let mut fim_tiles = Vec::with_capacity(rows.len());

        for row in rows {
            let resolved = root.resolve(row, with_domain);
            if let Some(domain) = resolved.domain {
                domain_tiles.push(TileReference::domain(domain));
            }
            fim_tiles.push(TileReference::fim(resolved.fim));
        }

        debug!(
            library = %root,
            domain_tiles = domain_tiles.len(),
            fim_tiles = fim_tiles.len(),
            "Resolved control rows to library tiles"
        );

        domain_tiles.append(&mut fim_tiles);
        Self {
            tiles: domain_tiles,
        }
    }

    pub fn tiles(&self) -> &[TileReference] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileReference> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn domain_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_domain()).count()
    }

    pub fn fim_count(&self) -> usize {
        self.tiles.len() - self.domain_count()
    }

    /// Paths as they are written to a GDAL input file list.
    pub fn path_strings(&self) -> Vec<String> {
        self.tiles
            .iter()
            .map(|t| t.path.to_string_lossy().into_owned())
            .collect()
    }

    /// List file body: one path per line, each line `\n` terminated.
    pub fn to_list_text(&self) -> String {
        let mut text = String::new();
        for path in self.path_strings() {
            text.push_str(&path);
            text.push('\n');
        }
        text
    }
}

impl<'a> IntoIterator for &'a OrderedFileList {
    type Item = &'a TileReference;
    type IntoIter = std::slice::Iter<'a, TileReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
