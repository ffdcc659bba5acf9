//! Mosaic assembly state machine.
//!
//! `ListWritten → MosaicBuilt → finalize`. Each state owns the temp artifacts
//! created so far; dropping a state removes them. The list file lives in the
//! system temp directory. The VRT is staged under a hidden name beside the
//! output so that the final rename never crosses filesystems.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fim_common::{is_vsi_path, FimError, FimResult, OutputFormat};
use fim_library::OrderedFileList;
use gdal_tools::MosaicTools;
use tempfile::TempPath;
use tracing::{debug, info};

/// Result of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicOutput {
    /// Where the composite was written
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Number of tiles referenced, domain tiles included
    pub tiles: usize,
    pub domain_tiles: usize,
}

/// Builds a composite from an ordered file list with the given tools.
#[derive(Debug)]
pub struct MosaicAssembler<T> {
    tools: T,
}

impl<T: MosaicTools> MosaicAssembler<T> {
    pub fn new(tools: T) -> Self {
        Self { tools }
    }

    /// Write `files` as a composite at `output` in `format`.
    ///
    /// VRT output is placed with a single rename: readers of `output` see
    /// either nothing (or the previous file) or the complete mosaic. GTiff
    /// and COG output is written in place by the converter, and a failed
    /// conversion can leave a partial file behind.
    pub fn assemble(
        &self,
        files: &OrderedFileList,
        format: OutputFormat,
        output: &Path,
    ) -> FimResult<MosaicOutput> {
        let listed = ListWritten::write(files)?;
        let built = listed.build_mosaic(&self.tools, output)?;
        built.finalize(&self.tools, format, output)?;

        info!(
            output = %output.display(),
            format = %format,
            tiles = files.len(),
            "Composite FIM assembled"
        );

        Ok(MosaicOutput {
            path: output.to_path_buf(),
            format,
            tiles: files.len(),
            domain_tiles: files.domain_count(),
        })
    }
}

/// The file list has been written to a temp file.
struct ListWritten {
    list_file: TempPath,
}

impl ListWritten {
    fn write(files: &OrderedFileList) -> FimResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("fim-inputs-")
            .suffix(".txt")
            .tempfile()
            .map_err(|e| FimError::io("error creating temporary file list", e))?;

        file.write_all(files.to_list_text().as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| {
                FimError::io(
                    format!("error writing file list to {}", file.path().display()),
                    e,
                )
            })?;

        let list_file = file.into_temp_path();
        debug!(
            list_file = %list_file.display(),
            entries = files.len(),
            "Wrote input file list"
        );

        Ok(Self { list_file })
    }

    fn build_mosaic<T: MosaicTools>(self, tools: &T, output: &Path) -> FimResult<MosaicBuilt> {
        let staging_parent = staging_parent(output);
        let mosaic = tempfile::Builder::new()
            .prefix(".fim-")
            .suffix(".vrt")
            .tempfile_in(&staging_parent)
            .map_err(|e| {
                FimError::io(
                    format!(
                        "error creating temporary VRT in {}",
                        staging_parent.display()
                    ),
                    e,
                )
            })?
            .into_temp_path();

        // The name stays reserved by the guard; gdalbuildvrt creates the file
        fs::remove_file(&mosaic).map_err(|e| {
            FimError::io(
                format!("error clearing temporary VRT {}", mosaic.display()),
                e,
            )
        })?;

        debug!(
            list_file = %self.list_file.display(),
            mosaic = %mosaic.display(),
            "Building VRT"
        );
        tools.build_mosaic(&self.list_file, &mosaic)?;

        Ok(MosaicBuilt {
            _list_file: self.list_file,
            mosaic,
        })
    }
}

/// The VRT exists beside the output.
struct MosaicBuilt {
    // Held only so the list file outlives the build
    _list_file: TempPath,
    mosaic: TempPath,
}

impl MosaicBuilt {
    fn finalize<T: MosaicTools>(
        self,
        tools: &T,
        format: OutputFormat,
        output: &Path,
    ) -> FimResult<()> {
        if format.is_virtual() {
            debug!(
                from = %self.mosaic.display(),
                to = %output.display(),
                "Moving staged VRT to final destination"
            );
            fs::rename(&self.mosaic, output).map_err(|e| {
                FimError::io(
                    format!(
                        "error renaming temp file {} to {}",
                        self.mosaic.display(),
                        output.display()
                    ),
                    e,
                )
            })?;
        } else {
            debug!(
                mosaic = %self.mosaic.display(),
                format = %format,
                output = %output.display(),
                "Converting VRT"
            );
            tools.convert(&self.mosaic, format, output)?;
        }

        Ok(())
    }
}

/// Directory the VRT is staged in: the output's parent for local outputs,
/// the system temp directory otherwise.
fn staging_parent(output: &Path) -> PathBuf {
    if is_vsi_path(&output.to_string_lossy()) {
        return std::env::temp_dir();
    }
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
