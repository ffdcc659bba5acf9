//! End-to-end composite FIM pipeline.

use std::path::PathBuf;

use fim_common::{FimError, FimResult, OutputFormat};
use fim_library::{absolute_output_path, ControlTable, LibraryRoot, OrderedFileList};
use gdal_tools::{MosaicTools, ToolAvailability};
use tracing::{debug, info};

use crate::assembler::{MosaicAssembler, MosaicOutput};

/// One composite FIM to build.
#[derive(Debug, Clone)]
pub struct FimRequest {
    /// Library root, local or `/vsi...`
    pub library: String,
    /// Control table path
    pub controls: PathBuf,
    /// Output path; relative paths are resolved against the current directory
    pub output: String,
    pub format: OutputFormat,
    /// Paint each reach's domain.tif beneath the FIM tiles
    pub with_domain: bool,
}

/// Runs requests against a set of tools.
#[derive(Debug)]
pub struct FimPipeline<T, A> {
    tools: T,
    availability: A,
}

impl<T: MosaicTools, A: ToolAvailability> FimPipeline<T, A> {
    pub fn new(tools: T, availability: A) -> Self {
        Self {
            tools,
            availability,
        }
    }

    /// Tools a run in `format` will invoke.
    pub fn required_tools(&self, format: OutputFormat) -> Vec<&str> {
        let mut tools = vec![self.tools.mosaic_tool()];
        if !format.is_virtual() {
            tools.push(self.tools.convert_tool());
        }
        tools
    }

    /// Fail with `MissingTool` for the first required tool that is unavailable.
    pub fn check_tools(&self, format: OutputFormat) -> FimResult<()> {
        for tool in self.required_tools(format) {
            if !self.availability.is_available(tool) {
                return Err(FimError::missing_tool(tool));
            }
            debug!(tool = %tool, "Tool available");
        }
        Ok(())
    }

    /// Build the composite described by `request`.
    ///
    /// Tools are checked before anything is read, and the whole control
    /// table is validated before any path is resolved.
    pub fn run(&self, request: &FimRequest) -> FimResult<MosaicOutput> {
        self.check_tools(request.format)?;

        let output = absolute_output_path(&request.output)?;
        let library = LibraryRoot::new(&request.library)?;

        let table = ControlTable::read(&request.controls)?;
        info!(
            controls = %table.source().display(),
            rows = table.len(),
            library = %library,
            with_domain = request.with_domain,
            "Loaded control table"
        );

        let files = OrderedFileList::build(table.rows(), &library, request.with_domain);

        MosaicAssembler::new(&self.tools).assemble(&files, request.format, &output)
    }
}
