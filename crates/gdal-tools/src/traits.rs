//! Collaborator traits.

use std::path::Path;

use fim_common::{FimResult, OutputFormat};

/// Answers whether an external program can be run.
pub trait ToolAvailability {
    /// `tool` is the program name as it would be invoked, e.g. "gdalbuildvrt".
    fn is_available(&self, tool: &str) -> bool;
}

/// External raster tools that build and convert mosaics.
///
/// Both operations block until the tool exits.
pub trait MosaicTools {
    /// Program name of the mosaic builder, checked before a run starts.
    fn mosaic_tool(&self) -> &str;

    /// Program name of the format converter, checked when a materialized
    /// format is requested.
    fn convert_tool(&self) -> &str;

    /// Build a virtual mosaic at `output` from the newline-separated paths in
    /// `list_file`. Later paths paint over earlier ones.
    fn build_mosaic(&self, list_file: &Path, output: &Path) -> FimResult<()>;

    /// Render the virtual mosaic `input` to `output` in `format`.
    ///
    /// The destination is written in place; a failure may leave it partial.
    fn convert(&self, input: &Path, format: OutputFormat, output: &Path) -> FimResult<()>;
}

impl<T: ToolAvailability + ?Sized> ToolAvailability for &T {
    fn is_available(&self, tool: &str) -> bool {
        (**self).is_available(tool)
    }
}

impl<T: MosaicTools + ?Sized> MosaicTools for &T {
    fn mosaic_tool(&self) -> &str {
        (**self).mosaic_tool()
    }

    fn convert_tool(&self) -> &str {
        (**self).convert_tool()
    }

    fn build_mosaic(&self, list_file: &Path, output: &Path) -> FimResult<()> {
        (**self).build_mosaic(list_file, output)
    }

    fn convert(&self, input: &Path, format: OutputFormat, output: &Path) -> FimResult<()> {
        (**self).convert(input, format, output)
    }
}
