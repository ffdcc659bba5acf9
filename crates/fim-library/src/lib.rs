//! FIM library access.
//!
//! Turns a control table into the ordered list of library tiles that make
//! up a composite flood inundation map. Everything here is path arithmetic:
//! no tile is opened and no existence check is made. Missing tiles surface
//! when the mosaic builder tries to read them.
//!
//! # Library layout
//!
//! ```text
//! <library>/
//! ├── 2821866/
//! │   ├── z_nd/
//! │   │   ├── f_10283.tif
//! │   │   └── f_11199.tif
//! │   ├── z_53_5/
//! │   │   └── f_10485.tif
//! │   └── domain.tif        (optional)
//! └── 2821867/
//!     └── ...
//! ```

pub mod control;
pub mod file_list;
pub mod library;
pub mod paths;

// Re-exports
pub use control::{ControlTable, MIN_COLUMNS};
pub use file_list::OrderedFileList;
pub use library::{LibraryRoot, ResolvedTile, DOMAIN_FILE_NAME};
pub use paths::absolute_output_path;
