//! Export recipe packs from the Sorted cooking service into recipe manager
//! archives.
//!
//! The usual entry point is the builder:
//!
//! ```no_run
//! use sorted_export::PackExporter;
//!
//! # fn main() -> Result<(), sorted_export::ExportError> {
//! let summary = PackExporter::builder()
//!     .username("cook@example.com")
//!     .password("secret")
//!     .destination(".")
//!     .build()?
//!     .run()?;
//! println!("Wrote {} recipes to {}", summary.recipes, summary.archive.display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod exporters;
pub mod reader;
pub mod source;

pub use builder::{ExportSummary, PackExporter, PackExporterBuilder};
pub use config::ExporterConfig;
pub use error::ExportError;
pub use exporters::{ExportFormat, Exporter, ExporterFactory, ExporterSettings};
pub use source::{ImageFetcher, RequestContext, SortedClient};
