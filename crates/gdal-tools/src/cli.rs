//! GDAL command-line implementation of [`MosaicTools`].

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use fim_common::{FimError, FimResult, OutputFormat};
use tracing::{debug, warn};

use crate::config::GdalConfig;
use crate::traits::MosaicTools;

/// Creation options passed to every conversion.
pub const CREATION_OPTIONS: [&str; 2] = ["COMPRESS=LZW", "NUM_THREADS=ALL_CPUS"];

/// Arguments for `gdalbuildvrt`.
pub fn build_vrt_args(list_file: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-input_file_list".into(),
        list_file.as_os_str().to_owned(),
        output.as_os_str().to_owned(),
    ]
}

/// Arguments for `gdal_translate`.
pub fn translate_args(input: &Path, format: OutputFormat, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(2 * CREATION_OPTIONS.len() + 4);
    for option in CREATION_OPTIONS {
        args.push("-co".into());
        args.push(option.into());
    }
    args.push("-of".into());
    args.push(format.gdal_driver().into());
    args.push(input.as_os_str().to_owned());
    args.push(output.as_os_str().to_owned());
    args
}

/// Runs the GDAL programs named in a [`GdalConfig`].
#[derive(Debug, Clone, Default)]
pub struct GdalCli {
    config: GdalConfig,
}

impl GdalCli {
    pub fn new(config: GdalConfig) -> Self {
        Self { config }
    }

    /// Run `program` to completion, capturing stderr for diagnostics.
    ///
    /// `stdout` is either captured and logged at debug, or inherited so
    /// progress output reaches the user as it is written.
    fn run(&self, program: &str, args: &[OsString], stdout: Stdio) -> FimResult<()> {
        debug!(
            command = %format!(
                "{} {}",
                program,
                args.iter()
                    .map(|a| a.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            "Running GDAL tool"
        );

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FimError::missing_tool(program),
                _ => FimError::io(format!("failed to run {}", program), e),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(FimError::ExternalTool {
                tool: program.to_string(),
                status: output.status.to_string(),
                stderr: if stderr.is_empty() {
                    "no diagnostic output".to_string()
                } else {
                    stderr
                },
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(tool = %program, output = %stdout.trim(), "GDAL tool output");
        }
        if !stderr.is_empty() {
            warn!(tool = %program, stderr = %stderr, "GDAL tool reported warnings");
        }

        Ok(())
    }
}

impl MosaicTools for GdalCli {
    fn mosaic_tool(&self) -> &str {
        &self.config.buildvrt_bin
    }

    fn convert_tool(&self) -> &str {
        &self.config.translate_bin
    }

    fn build_mosaic(&self, list_file: &Path, output: &Path) -> FimResult<()> {
        self.run(
            &self.config.buildvrt_bin,
            &build_vrt_args(list_file, output),
            Stdio::piped(),
        )
    }

    fn convert(&self, input: &Path, format: OutputFormat, output: &Path) -> FimResult<()> {
        self.run(
            &self.config.translate_bin,
            &translate_args(input, format, output),
            Stdio::inherit(),
        )
    }
}
