//! GDAL collaborators.
//!
//! The mosaic pipeline never touches pixels. It hands file lists to
//! `gdalbuildvrt` and, for materialized outputs, the resulting VRT to
//! `gdal_translate`. Both are reached through the [`MosaicTools`] trait and
//! checked up front through [`ToolAvailability`], so the pipeline can be
//! driven by fakes in tests.

pub mod availability;
pub mod cli;
pub mod config;
pub mod traits;

pub use availability::SystemToolAvailability;
pub use cli::{build_vrt_args, translate_args, GdalCli, CREATION_OPTIONS};
pub use config::GdalConfig;
pub use traits::{MosaicTools, ToolAvailability};
