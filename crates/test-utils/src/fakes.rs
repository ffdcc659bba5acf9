//! In-memory fakes for the GDAL collaborators.
//!
//! [`RecordingTools`] behaves like a tiny GDAL: `build_mosaic` writes a
//! pseudo-VRT listing its sources in order and `convert` copies the VRT text
//! behind a driver line. Every call is recorded, and either step can be made
//! to fail.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fim_common::{FimError, FimResult, OutputFormat};
use gdal_tools::{MosaicTools, ToolAvailability};

pub const FAKE_BUILDVRT: &str = "gdalbuildvrt";
pub const FAKE_TRANSLATE: &str = "gdal_translate";

/// A recorded collaborator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    BuildMosaic {
        list_file: PathBuf,
        /// Lines of the list file at the time of the call
        sources: Vec<String>,
        output: PathBuf,
    },
    Convert {
        input: PathBuf,
        format: OutputFormat,
        output: PathBuf,
    },
}

/// Recording [`MosaicTools`] fake.
#[derive(Debug, Default)]
pub struct RecordingTools {
    calls: Mutex<Vec<ToolCall>>,
    build_failure: Option<String>,
    convert_failure: Option<String>,
    partial_output_on_failure: bool,
}

impl RecordingTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `build_mosaic` fail with the given stderr.
    pub fn failing_build(stderr: &str) -> Self {
        Self {
            build_failure: Some(stderr.to_string()),
            ..Self::default()
        }
    }

    /// Make `convert` fail with the given stderr.
    ///
    /// With `leave_partial` the destination is written with junk first, the
    /// way an interrupted `gdal_translate` can leave it.
    pub fn failing_convert(stderr: &str, leave_partial: bool) -> Self {
        Self {
            convert_failure: Some(stderr.to_string()),
            partial_output_on_failure: leave_partial,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn build_calls(&self) -> Vec<ToolCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, ToolCall::BuildMosaic { .. }))
            .collect()
    }

    pub fn convert_calls(&self) -> Vec<ToolCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, ToolCall::Convert { .. }))
            .collect()
    }

    /// Every temp path the fake was handed: list files and staged mosaics.
    pub fn staged_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for call in self.calls() {
            match call {
                ToolCall::BuildMosaic {
                    list_file, output, ..
                } => {
                    paths.push(list_file);
                    paths.push(output);
                }
                ToolCall::Convert { input, .. } => paths.push(input),
            }
        }
        paths
    }

    fn record(&self, call: ToolCall) {
        self.calls.lock().expect("calls lock poisoned").push(call);
    }
}

impl MosaicTools for RecordingTools {
    fn mosaic_tool(&self) -> &str {
        FAKE_BUILDVRT
    }

    fn convert_tool(&self) -> &str {
        FAKE_TRANSLATE
    }

    fn build_mosaic(&self, list_file: &Path, output: &Path) -> FimResult<()> {
        let list = fs::read_to_string(list_file)
            .map_err(|e| FimError::io(format!("fake reading {}", list_file.display()), e))?;
        let sources: Vec<String> = list.lines().map(str::to_string).collect();

        self.record(ToolCall::BuildMosaic {
            list_file: list_file.to_path_buf(),
            sources: sources.clone(),
            output: output.to_path_buf(),
        });

        if let Some(stderr) = &self.build_failure {
            return Err(FimError::ExternalTool {
                tool: FAKE_BUILDVRT.to_string(),
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            });
        }

        fs::write(output, render_vrt(&sources))
            .map_err(|e| FimError::io(format!("fake writing {}", output.display()), e))
    }

    fn convert(&self, input: &Path, format: OutputFormat, output: &Path) -> FimResult<()> {
        self.record(ToolCall::Convert {
            input: input.to_path_buf(),
            format,
            output: output.to_path_buf(),
        });

        if let Some(stderr) = &self.convert_failure {
            if self.partial_output_on_failure {
                let _ = fs::write(output, "PARTIAL");
            }
            return Err(FimError::ExternalTool {
                tool: FAKE_TRANSLATE.to_string(),
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            });
        }

        let vrt = fs::read_to_string(input)
            .map_err(|e| FimError::io(format!("fake reading {}", input.display()), e))?;
        fs::write(output, format!("{}\n{}", format.gdal_driver(), vrt))
            .map_err(|e| FimError::io(format!("fake writing {}", output.display()), e))
    }
}

/// Pseudo-VRT text listing `sources` in order.
pub fn render_vrt(sources: &[String]) -> String {
    let mut text = String::from("<VRTDataset>\n");
    for source in sources {
        text.push_str("  <SourceFilename>");
        text.push_str(source);
        text.push_str("</SourceFilename>\n");
    }
    text.push_str("</VRTDataset>\n");
    text
}

/// Source paths listed in a pseudo-VRT, in order.
pub fn vrt_sources(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            line.trim()
                .strip_prefix("<SourceFilename>")
                .and_then(|rest| rest.strip_suffix("</SourceFilename>"))
                .map(str::to_string)
        })
        .collect()
}

/// [`ToolAvailability`] fake reporting every tool available except those
/// listed as missing. Probes are recorded.
#[derive(Debug, Default)]
pub struct FakeAvailability {
    missing: HashSet<String>,
    probed: Mutex<Vec<String>>,
}

impl FakeAvailability {
    pub fn all_available() -> Self {
        Self::default()
    }

    pub fn missing(tools: &[&str]) -> Self {
        Self {
            missing: tools.iter().map(|t| t.to_string()).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().expect("probe lock poisoned").clone()
    }
}

impl ToolAvailability for FakeAvailability {
    fn is_available(&self, tool: &str) -> bool {
        self.probed
            .lock()
            .expect("probe lock poisoned")
            .push(tool.to_string());
        !self.missing.contains(tool)
    }
}
