//! Output path handling.

use std::path::PathBuf;

use fim_common::{is_vsi_path, FimError, FimResult};

/// Make a user-supplied output path absolute.
///
/// VSI paths are returned untouched. Writing to them is not supported by the
/// mosaic tools in general, but they are not rejected here either.
pub fn absolute_output_path(raw: &str) -> FimResult<PathBuf> {
    if is_vsi_path(raw) {
        return Ok(PathBuf::from(raw));
    }
    std::path::absolute(raw).map_err(|e| {
        FimError::io(
            format!("error getting absolute path for output file {}", raw),
            e,
        )
    })
}
