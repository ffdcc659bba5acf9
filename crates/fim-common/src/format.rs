//! Output raster formats.

use std::fmt;
use std::str::FromStr;

use crate::error::FimError;

/// Output formats a composite FIM can be written in.
///
/// Names follow GDAL driver names and are matched case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// GDAL virtual mosaic, placed by rename
    #[default]
    Vrt,
    /// GeoTIFF
    GTiff,
    /// Cloud optimized GeoTIFF
    Cog,
}

impl OutputFormat {
    /// Parse a format name such as "vrt", "COG" or "GTiff".
    pub fn from_name(s: &str) -> Result<Self, FimError> {
        match s.to_uppercase().as_str() {
            "VRT" => Ok(OutputFormat::Vrt),
            "GTIFF" => Ok(OutputFormat::GTiff),
            "COG" => Ok(OutputFormat::Cog),
            _ => Err(FimError::UnsupportedFormat(s.to_string())),
        }
    }

    /// Driver name passed to `gdal_translate -of`.
    pub fn gdal_driver(&self) -> &'static str {
        match self {
            OutputFormat::Vrt => "VRT",
            OutputFormat::GTiff => "GTiff",
            OutputFormat::Cog => "COG",
        }
    }

    /// Whether this is the virtual mosaic format itself (no conversion needed).
    pub fn is_virtual(&self) -> bool {
        matches!(self, OutputFormat::Vrt)
    }
}

impl FromStr for OutputFormat {
    type Err = FimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gdal_driver())
    }
}
