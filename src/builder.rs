use std::path::PathBuf;
use std::time::Duration;

use log::info;

use crate::config::{ExporterConfig, Timeouts};
use crate::exporters::{ExportFormat, Exporter, ExporterFactory, ExporterSettings};
use crate::source::{ImageFetcher, RequestContext, SortedClient};
use crate::ExportError;

/// Outcome of a completed export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Path of the written archive
    pub archive: PathBuf,
    /// Number of packs exported
    pub packs: usize,
    /// Number of recipes written
    pub recipes: usize,
}

/// Builder for configuring an export run
#[derive(Debug, Default)]
pub struct PackExporterBuilder {
    config: Option<ExporterConfig>,
    username: Option<String>,
    password: Option<String>,
    destination: Option<PathBuf>,
    format: Option<ExportFormat>,
    target_servings: Option<u32>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl PackExporterBuilder {
    /// Start from a loaded configuration instead of the defaults.
    /// Values set on the builder take precedence.
    pub fn config(mut self, config: ExporterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the Sorted account username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the Sorted account password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the directory the archive is written to
    ///
    /// # Example
    /// ```
    /// use sorted_export::PackExporter;
    ///
    /// let builder = PackExporter::builder()
    ///     .username("cook")
    ///     .password("secret")
    ///     .destination("/tmp");
    /// ```
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set the output format
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the serving count whose quantities, times and steps are exported
    pub fn target_servings(mut self, servings: u32) -> Self {
        self.target_servings = Some(servings);
        self
    }

    /// Override the Sorted API base URL
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the overall timeout for each HTTP request
    ///
    /// # Example
    /// ```
    /// use sorted_export::PackExporter;
    /// use std::time::Duration;
    ///
    /// let builder = PackExporter::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Validate the options and prepare an export run
    ///
    /// # Errors
    /// Returns `ExportError` if:
    /// - username or password is missing
    /// - the destination is not an existing directory
    /// - the target serving count is zero
    /// - the configured format is unknown
    pub fn build(self) -> Result<PackExporter, ExportError> {
        let config = self.config.unwrap_or_default();

        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ExportError::Builder("No username specified".to_string()))?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ExportError::Builder("No password specified".to_string()))?;

        let destination = self
            .destination
            .unwrap_or_else(|| PathBuf::from(&config.destination));
        if !destination.is_dir() {
            return Err(ExportError::Builder(format!(
                "Destination {} is not an existing directory",
                destination.display()
            )));
        }

        let target_servings = self.target_servings.unwrap_or(config.target_servings);
        if target_servings == 0 {
            return Err(ExportError::Builder(
                "Target serving count must be at least 1".to_string(),
            ));
        }

        let format = match self.format {
            Some(format) => format,
            None => config.format.parse()?,
        };

        let mut timeouts = config.timeouts();
        if let Some(timeout) = self.timeout {
            timeouts.request = timeout;
        }

        Ok(PackExporter {
            context: RequestContext::new(self.endpoint.unwrap_or(config.endpoint)),
            timeouts,
            username,
            password,
            destination,
            format,
            settings: ExporterSettings { target_servings },
        })
    }
}

/// A validated export run: fetches every pack of the account and writes
/// them into one archive.
pub struct PackExporter {
    context: RequestContext,
    timeouts: Timeouts,
    username: String,
    password: String,
    destination: PathBuf,
    format: ExportFormat,
    settings: ExporterSettings,
}

impl PackExporter {
    /// Creates a new builder for an export run
    pub fn builder() -> PackExporterBuilder {
        PackExporterBuilder::default()
    }

    pub fn destination(&self) -> &PathBuf {
        &self.destination
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Log in, convert every pack in order and write the archive.
    ///
    /// Stops at the first error.
    pub fn run(&self) -> Result<ExportSummary, ExportError> {
        let client = SortedClient::login(
            self.context.clone(),
            self.timeouts,
            &self.username,
            &self.password,
        )?;
        let images = ImageFetcher::new(self.timeouts)?;
        let mut exporter = ExporterFactory::create(self.format, self.settings);

        let packs = client.list_packs()?;
        info!("Found {} packs", packs.len());

        for summary in &packs {
            let pack = client.get_pack(summary.id)?;
            info!("Exporting pack `{}` ({})", pack.pack.name, pack.id);
            exporter.add_pack(&pack, &images)?;
        }

        let recipes = exporter.recipe_count();
        let archive = exporter.export(&self.destination)?;

        Ok(ExportSummary {
            archive,
            packs: packs.len(),
            recipes,
        })
    }
}
