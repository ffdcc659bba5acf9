//! GDAL virtual filesystem paths.
//!
//! Paths such as `/vsis3/bucket/library` or `/vsicurl/https://...` are handed
//! to GDAL untouched. They are never made absolute and always use `/` as the
//! separator, whatever the host platform.

/// Prefix shared by every GDAL virtual filesystem handler.
pub const VSI_PREFIX: &str = "/vsi";

/// Returns true if `path` names a GDAL virtual filesystem location.
///
/// A backslash-led `\vsi` prefix is also recognized, which is what joining
/// onto a VSI root produces on Windows.
pub fn is_vsi_path(path: &str) -> bool {
    path.starts_with(VSI_PREFIX) || path.starts_with(r"\vsi")
}

/// Rewrite every `\` in a VSI path to `/`.
pub fn normalize_vsi_separators(path: &str) -> String {
    path.replace('\\', "/")
}
