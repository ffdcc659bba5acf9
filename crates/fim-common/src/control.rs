//! Control table rows.

/// One data row of a control table.
///
/// Columns beyond the third are ignored when the row is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlRow {
    /// Reach identifier, the top-level library folder
    pub reach_id: String,

    /// Flow value selecting `f_<flow>.tif`
    pub flow: String,

    /// Downstream boundary condition selecting `z_<condition>`, e.g. "53.5" or "nd"
    pub boundary_condition: String,
}

impl ControlRow {
    pub fn new(
        reach_id: impl Into<String>,
        flow: impl Into<String>,
        boundary_condition: impl Into<String>,
    ) -> Self {
        Self {
            reach_id: reach_id.into(),
            flow: flow.into(),
            boundary_condition: boundary_condition.into(),
        }
    }

    /// Boundary condition with every `.` replaced by `_`.
    pub fn normalized_boundary_condition(&self) -> String {
        self.boundary_condition.replace('.', "_")
    }

    /// Folder segment for the boundary condition, e.g. `z_53_5`.
    pub fn condition_dir(&self) -> String {
        format!("z_{}", self.normalized_boundary_condition())
    }

    /// File name of the flow tile, e.g. `f_10283.tif`.
    pub fn flow_file_name(&self) -> String {
        format!("f_{}.tif", self.flow)
    }
}

impl std::fmt::Display for ControlRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.reach_id, self.flow, self.boundary_condition
        )
    }
}
