use super::PaprikaRecipe;
use crate::error::ExportError;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Name of the container written into the destination directory
pub const ARCHIVE_FILE_NAME: &str = "Recipes.paprikarecipes";

/// Extension of every recipe entry inside the container
pub const ENTRY_EXTENSION: &str = "paprikarecipe";

/// Characters that may not appear in an entry name
const ILLEGAL_FILE_NAME_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Replace characters that are illegal in file names with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_FILE_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Recipes waiting to be written, in the order they were added
#[derive(Debug, Default)]
pub struct Collection {
    recipes: Vec<PaprikaRecipe>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append recipes. Duplicates are kept.
    pub fn add(&mut self, recipes: impl IntoIterator<Item = PaprikaRecipe>) {
        self.recipes.extend(recipes);
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn recipes(&self) -> &[PaprikaRecipe] {
        &self.recipes
    }

    /// Write every recipe as its own gzip entry of
    /// `destination/Recipes.paprikarecipes`, truncating any previous archive.
    ///
    /// The first failure aborts the export and may leave an incomplete file.
    pub fn export(self, destination: &Path) -> Result<PathBuf, ExportError> {
        let path = destination.join(ARCHIVE_FILE_NAME);
        let mut archive = ArchiveWriter::create(&path)?;

        for recipe in &self.recipes {
            let entry = archive.add_entry(recipe)?;
            debug!("Wrote `{}` as {}", recipe.name, entry);
        }

        let entries = archive.finish()?;
        info!("Exported {} recipes to {}", entries, path.display());
        Ok(path)
    }
}

/// Serialize a recipe as tab-indented JSON and gzip it on its own
fn encode_recipe(recipe: &PaprikaRecipe) -> Result<Vec<u8>, ExportError> {
    let encoding_error = |message: String| ExportError::Encoding {
        recipe: recipe.name.clone(),
        message,
    };

    let mut json = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
    recipe
        .serialize(&mut serializer)
        .map_err(|e| encoding_error(format!("failed marshaling recipe: {}", e)))?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| encoding_error(format!("failed compressing recipe: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| encoding_error(format!("failed compressing recipe: {}", e)))
}

/// Where an export currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportPhase {
    Created,
    WritingEntries,
    Finalizing,
    Done,
    Failed,
}

/// Zip container being written.
///
/// If dropped before [`ArchiveWriter::finish`] the zip is still closed, and a
/// failure to do so is only logged.
struct ArchiveWriter {
    path: PathBuf,
    zip: Option<ZipWriter<File>>,
    phase: ExportPhase,
    names: HashSet<String>,
}

impl ArchiveWriter {
    fn create(path: &Path) -> Result<Self, ExportError> {
        let file = File::create(path).map_err(|e| ExportError::Filesystem {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(ArchiveWriter {
            path: path.to_path_buf(),
            zip: Some(ZipWriter::new(file)),
            phase: ExportPhase::Created,
            names: HashSet::new(),
        })
    }

    fn options() -> SimpleFileOptions {
        // Fixed timestamp keeps the container bytes a function of its entries
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
    }

    /// Archive error tagged with the phase it happened in. Leaves the writer
    /// `Failed`.
    fn fail(&mut self, message: String) -> ExportError {
        let error = ExportError::Archive(format!("{} (phase: {:?})", message, self.phase));
        self.phase = ExportPhase::Failed;
        error
    }

    /// Entry name for `base`, suffixed ` (n)` if already taken
    fn unique_name(&mut self, base: &str) -> String {
        let mut name = format!("{}.{}", base, ENTRY_EXTENSION);
        let mut n = 2;
        while self.names.contains(&name) {
            name = format!("{} ({}).{}", base, n, ENTRY_EXTENSION);
            n += 1;
        }
        if n > 2 {
            warn!(
                "Entry name `{}.{}` already used, writing as `{}`",
                base, ENTRY_EXTENSION, name
            );
        }
        self.names.insert(name.clone());
        name
    }

    /// Encode `recipe` and write it as a new entry. Returns the entry name.
    fn add_entry(&mut self, recipe: &PaprikaRecipe) -> Result<String, ExportError> {
        self.phase = ExportPhase::WritingEntries;
        let data = encode_recipe(recipe).map_err(|e| {
            self.phase = ExportPhase::Failed;
            e
        })?;
        self.write_entry(&sanitize_file_name(&recipe.name), &data)
    }

    fn write_entry(&mut self, base: &str, data: &[u8]) -> Result<String, ExportError> {
        let name = self.unique_name(base);
        let Some(zip) = self.zip.as_mut() else {
            let message = format!("archive {} is already closed", self.path.display());
            return Err(self.fail(message));
        };

        let result = zip
            .start_file(name.clone(), Self::options())
            .map_err(|e| format!("failed creating recipe `{}` in archive: {}", name, e))
            .and_then(|_| {
                zip.write_all(data)
                    .map_err(|e| format!("failed writing recipe `{}` to archive: {}", name, e))
            });

        match result {
            Ok(()) => Ok(name),
            Err(message) => Err(self.fail(message)),
        }
    }

    /// Write the central directory and flush the file. Returns the number of
    /// entries written.
    fn finish(mut self) -> Result<usize, ExportError> {
        self.phase = ExportPhase::Finalizing;
        let entries = self.names.len();
        let Some(zip) = self.zip.take() else {
            let message = format!("archive {} is already closed", self.path.display());
            return Err(self.fail(message));
        };

        let file = match zip.finish() {
            Ok(file) => file,
            Err(e) => {
                let message = format!(
                    "failed to close zip writer for {}: {}",
                    self.path.display(),
                    e
                );
                return Err(self.fail(message));
            }
        };
        file.sync_all().map_err(|e| {
            self.phase = ExportPhase::Failed;
            ExportError::Filesystem {
                path: self.path.clone(),
                source: e,
            }
        })?;

        self.phase = ExportPhase::Done;
        Ok(entries)
    }
}

impl Drop for ArchiveWriter {
    fn drop(&mut self) {
        if let Some(zip) = self.zip.take() {
            warn!(
                "Closing incomplete archive {} (phase: {:?})",
                self.path.display(),
                self.phase
            );
            if let Err(e) = zip.finish() {
                warn!("failed to close zip writer for {}: {}", self.path.display(), e);
            }
        }
        debug!("Archive {} closed in phase {:?}", self.path.display(), self.phase);
    }
}
