//! Composite FIM assembly.
//!
//! # Architecture
//!
//! ```text
//! FimRequest
//!      │
//!      ├─► ToolAvailability: gdalbuildvrt (+ gdal_translate unless VRT)
//!      │
//!      ├─► ControlTable::read ──► OrderedFileList::build
//!      │
//!      └─► MosaicAssembler
//!               │
//!               ├─► ListWritten    temp list file, one path per line
//!               ├─► MosaicBuilt    staged VRT next to the output
//!               └─► finalize       rename (VRT) or convert (GTiff/COG)
//! ```
//!
//! Temp artifacts are owned by the state values and removed when they drop,
//! on success and on every error path.

pub mod assembler;
pub mod pipeline;

pub use assembler::{MosaicAssembler, MosaicOutput};
pub use pipeline::{FimPipeline, FimRequest};
