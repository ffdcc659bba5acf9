//! Tool availability probing.

use std::process::{Command, Stdio};

use tracing::debug;

use crate::traits::ToolAvailability;

/// Probes tools by running `<tool> --version`.
///
/// A tool counts as available if it starts and exits successfully.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolAvailability;

impl ToolAvailability for SystemToolAvailability {
    fn is_available(&self, tool: &str) -> bool {
        let status = Command::new(tool)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => {
                debug!(tool = %tool, status = %status, "Probed tool");
                status.success()
            }
            Err(e) => {
                debug!(tool = %tool, error = %e, "Tool could not be started");
                false
            }
        }
    }
}
