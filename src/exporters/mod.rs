mod factory;
pub mod paprika;

pub use factory::ExporterFactory;
pub use paprika::PaprikaExporter;

use crate::error::ExportError;
use crate::reader::DEFAULT_TARGET_SERVINGS;
use crate::source::{ImageFetcher, UserPack};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Label the source service is credited with in exported recipes
pub const SOURCE_LABEL: &str = "Sorted Packs";

/// Prefix of the category exported recipes are filed under
pub const CATEGORY_LABEL: &str = "Sorted";

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Paprika,
}

impl ExportFormat {
    /// Name used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Paprika => "paprika",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paprika" => Ok(ExportFormat::Paprika),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Settings shared by every exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExporterSettings {
    /// Serving count whose variants are exported
    pub target_servings: u32,
}

impl Default for ExporterSettings {
    fn default() -> Self {
        Self {
            target_servings: DEFAULT_TARGET_SERVINGS,
        }
    }
}

/// A target recipe format.
///
/// Packs are converted as they arrive and kept until [`Exporter::export`]
/// writes them out.
pub trait Exporter {
    fn format(&self) -> ExportFormat;

    /// Convert every recipe of `pack`, returning how many were added.
    ///
    /// Fails as a whole: on error nothing from this pack is kept.
    fn add_pack(&mut self, pack: &UserPack, images: &ImageFetcher) -> Result<usize, ExportError>;

    /// Number of recipes waiting to be exported
    fn recipe_count(&self) -> usize;

    /// Write all collected recipes below `destination` and return the
    /// written file. The collected recipes are consumed.
    fn export(&mut self, destination: &Path) -> Result<PathBuf, ExportError>;
}
