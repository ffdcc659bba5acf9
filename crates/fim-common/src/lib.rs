//! Common types shared across the flows2fim workspace.

pub mod control;
pub mod error;
pub mod format;
pub mod tile;
pub mod vsi;

pub use control::ControlRow;
pub use error::{FimError, FimResult};
pub use format::OutputFormat;
pub use tile::{TileKind, TileReference};
pub use vsi::{is_vsi_path, normalize_vsi_separators, VSI_PREFIX};
