//! Common control table fixtures.

use std::path::{Path, PathBuf};

use fim_common::ControlRow;

/// Header used by the fixture control files.
pub const CONTROL_HEADER: &str = "reach_id,flow,control_stage";

/// Two rows from a real library: one without a downstream condition and one
/// with a 53.5 stage.
pub fn sample_rows() -> Vec<ControlRow> {
    vec![
        ControlRow::new("2821866", "10283", "nd"),
        ControlRow::new("2821867", "11199", "53.5"),
    ]
}

/// FIM paths the sample rows resolve to under `root`.
pub fn sample_fim_paths(root: &Path) -> Vec<PathBuf> {
    vec![
        root.join("2821866").join("z_nd").join("f_10283.tif"),
        root.join("2821867").join("z_53_5").join("f_11199.tif"),
    ]
}

/// Writes a control file with the fixture header followed by `rows`.
///
/// Rows are written as given, so short rows can be produced for shape tests.
pub fn write_control_file(dir: &Path, name: &str, rows: &[&[&str]]) -> PathBuf {
    let mut text = String::from(CONTROL_HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    write_raw_control_file(dir, name, &text)
}

/// Writes a control file with exactly `contents`.
pub fn write_raw_control_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write control file");
    path
}

/// Writes the sample rows as a control file.
pub fn write_sample_control_file(dir: &Path) -> PathBuf {
    write_control_file(
        dir,
        "controls.csv",
        &[&["2821866", "10283", "nd"], &["2821867", "11199", "53.5"]],
    )
}
