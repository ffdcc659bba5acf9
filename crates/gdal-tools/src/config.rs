//! GDAL program configuration.

/// Default mosaic builder program.
pub const DEFAULT_BUILDVRT_BIN: &str = "gdalbuildvrt";

/// Default format converter program.
pub const DEFAULT_TRANSLATE_BIN: &str = "gdal_translate";

/// Which GDAL programs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GdalConfig {
    /// Program used to build the VRT mosaic.
    pub buildvrt_bin: String,

    /// Program used to convert the VRT to GTiff/COG.
    pub translate_bin: String,
}

impl Default for GdalConfig {
    fn default() -> Self {
        Self {
            buildvrt_bin: DEFAULT_BUILDVRT_BIN.to_string(),
            translate_bin: DEFAULT_TRANSLATE_BIN.to_string(),
        }
    }
}

impl GdalConfig {
    /// Load configuration from environment variables.
    ///
    /// `GDALBUILDVRT_BIN` and `GDAL_TRANSLATE_BIN` override the program names,
    /// e.g. to point at a specific GDAL install.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = var("GDALBUILDVRT_BIN").filter(|v| !v.trim().is_empty()) {
            config.buildvrt_bin = val;
        }

        if let Some(val) = var("GDAL_TRANSLATE_BIN").filter(|v| !v.trim().is_empty()) {
            config.translate_bin = val;
        }

        config
    }
}
