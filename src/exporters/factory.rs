use crate::error::ExportError;
use crate::exporters::{ExportFormat, Exporter, ExporterSettings, PaprikaExporter};

pub struct ExporterFactory;

impl ExporterFactory {
    /// Create the exporter for a format
    pub fn create(format: ExportFormat, settings: ExporterSettings) -> Box<dyn Exporter> {
        match format {
            ExportFormat::Paprika => Box::new(PaprikaExporter::new(settings)),
        }
    }

    /// Create an exporter from a format name as found in configuration
    pub fn create_by_name(
        name: &str,
        settings: ExporterSettings,
    ) -> Result<Box<dyn Exporter>, ExportError> {
        Ok(Self::create(name.parse()?, settings))
    }

    /// List all available format names
    pub fn available_formats() -> Vec<&'static str> {
        vec![ExportFormat::Paprika.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_paprika_exporter() {
        let exporter = ExporterFactory::create(ExportFormat::Paprika, ExporterSettings::default());
        assert_eq!(exporter.format(), ExportFormat::Paprika);
        assert_eq!(exporter.recipe_count(), 0);
    }

    #[test]
    fn test_create_by_name() {
        let exporter =
            ExporterFactory::create_by_name("paprika", ExporterSettings::default()).unwrap();
        assert_eq!(exporter.format(), ExportFormat::Paprika);
    }

    #[test]
    fn test_create_unknown_format() {
        let result = ExporterFactory::create_by_name("unknown", ExporterSettings::default());
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Unknown export format"));
        }
    }

    #[test]
    fn test_available_formats() {
        let formats = ExporterFactory::available_formats();
        assert_eq!(formats, vec!["paprika"]);
    }
}
