//! Paprika recipe manager export.
//!
//! Paprika imports a `.paprikarecipes` zip whose entries are gzip-compressed
//! JSON recipes, one per entry.

mod archive;

pub use archive::{sanitize_file_name, Collection, ARCHIVE_FILE_NAME, ENTRY_EXTENSION};

use crate::error::ExportError;
use crate::exporters::{
    ExportFormat, Exporter, ExporterSettings, CATEGORY_LABEL, SOURCE_LABEL,
};
use crate::reader;
use crate::source::{FetchedImage, ImageFetcher, RawRecipe, UserPack};
use chrono::Local;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Timestamp layout Paprika uses for `created`
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A recipe in Paprika's interchange format. Field order is the key order
/// of the written JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaprikaRecipe {
    pub uid: String,
    pub created: String,
    pub hash: String,
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub directions: String,
    pub notes: String,
    pub nutritional_info: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub difficulty: String,
    pub servings: String,
    pub rating: i32,
    pub source: String,
    pub source_url: String,
    pub photo: String,
    pub photo_large: String,
    pub photo_hash: String,
    pub image_url: String,
    pub categories: Vec<String>,
    pub photo_data: String,
}

pub struct PaprikaExporter {
    settings: ExporterSettings,
    collection: Collection,
}

impl PaprikaExporter {
    pub fn new(settings: ExporterSettings) -> Self {
        PaprikaExporter {
            settings,
            collection: Collection::new(),
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Convert one raw recipe, downloading its thumbnail
    pub fn build_recipe(
        &self,
        raw: &RawRecipe,
        pack: &UserPack,
        images: &ImageFetcher,
    ) -> Result<PaprikaRecipe, ExportError> {
        let image = images
            .fetch(&raw.alt_images.thumbnail)
            .map_err(|e| match e {
                ExportError::Network { operation, source } => ExportError::Network {
                    operation: format!(
                        "{} for recipe `{}` in pack `{}`",
                        operation, raw.title, pack.id
                    ),
                    source,
                },
                other => other,
            })?;

        let created = Local::now().format(CREATED_FORMAT).to_string();
        Ok(self.assemble(raw, &pack.pack.name, &image, created))
    }

    fn assemble(
        &self,
        raw: &RawRecipe,
        pack_name: &str,
        image: &FetchedImage,
        created: String,
    ) -> PaprikaRecipe {
        let target = self.settings.target_servings;
        let uid = reader::derive_identifier(&raw.title).to_string();
        let thumbnail = &raw.alt_images.thumbnail;

        PaprikaRecipe {
            photo: format!("{}.{}", uid, reader::image_extension(thumbnail)),
            uid,
            created,
            name: raw.title.clone(),
            ingredients: reader::render_ingredients(&raw.ingredients, target),
            directions: reader::render_method(&raw.method, target),
            total_time: reader::select_cooking_time(&raw.cooking_time, target),
            servings: target.to_string(),
            source: format!("{} - {}", SOURCE_LABEL, pack_name),
            image_url: thumbnail.clone(),
            categories: vec![format!(
                "{} - {}",
                CATEGORY_LABEL,
                reader::title_case(pack_name)
            )],
            photo_data: image.encoded.clone(),
            ..Default::default()
        }
    }
}

impl Exporter for PaprikaExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Paprika
    }

    fn add_pack(&mut self, pack: &UserPack, images: &ImageFetcher) -> Result<usize, ExportError> {
        let recipes = pack
            .pack
            .recipes
            .iter()
            .map(|raw| {
                debug!("Converting recipe `{}` from pack `{}`", raw.title, pack.id);
                self.build_recipe(raw, pack, images)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let count = recipes.len();
        self.collection.add(recipes);
        info!("Converted {} recipes from pack `{}`", count, pack.pack.name);
        Ok(count)
    }

    fn recipe_count(&self) -> usize {
        self.collection.len()
    }

    fn export(&mut self, destination: &Path) -> Result<PathBuf, ExportError> {
        std::mem::take(&mut self.collection).export(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timeouts;
    use crate::source::model::{
        AltImages, CookingTime, Ingredient, IngredientInfo, IngredientType, Method, PackDetail,
        Quantity, Step, Task, Unit,
    };
    use mockito::Server;

    fn raw_recipe(title: &str, thumbnail: &str) -> RawRecipe {
        RawRecipe {
            id: 1,
            title: title.to_string(),
            cooking_time: vec![
                CookingTime {
                    num_people: 2,
                    duration: 20,
                },
                CookingTime {
                    num_people: 4,
                    duration: 35,
                },
            ],
            ingredients: vec![
                Ingredient {
                    ingredient: IngredientInfo {
                        name: "rice noodles".to_string(),
                        kind: IngredientType {
                            id: 1,
                            name: "Grains".to_string(),
                        },
                    },
                    quantities: vec![Quantity {
                        id: 1,
                        unit: Unit {
                            name: "gram".to_string(),
                            plural_abbrev: "g".to_string(),
                            system: "si".to_string(),
                            ..Default::default()
                        },
                        num_people: 2,
                        quantity: 200.0,
                    }],
                },
                Ingredient {
                    ingredient: IngredientInfo {
                        name: "wok".to_string(),
                        kind: IngredientType {
                            id: 2,
                            name: "Equipment".to_string(),
                        },
                    },
                    quantities: vec![],
                },
            ],
            method: Method {
                steps: vec![
                    Step {
                        num_people: 2,
                        tasks: vec![Task {
                            method: "Soak the noodles".to_string(),
                            num_people: 2,
                        }],
                    },
                    Step {
                        num_people: 4,
                        tasks: vec![Task {
                            method: "Soak twice the noodles".to_string(),
                            num_people: 4,
                        }],
                    },
                ],
            },
            alt_images: AltImages {
                thumbnail: thumbnail.to_string(),
            },
            num_people: "2".to_string(),
        }
    }

    fn user_pack(name: &str, recipes: Vec<RawRecipe>) -> UserPack {
        UserPack {
            id: 12,
            pack: PackDetail {
                id: 3,
                name: name.to_string(),
                recipes,
                tags: vec![],
            },
            active: true,
            num_people: 2,
        }
    }

    #[test]
    fn test_assemble_recipe_fields() {
        let exporter = PaprikaExporter::new(ExporterSettings::default());
        let raw = raw_recipe("Pad Thai", "https://cdn.example.com/pad-thai.jpeg");
        let image = FetchedImage::new(b"img".to_vec());

        let recipe = exporter.assemble(
            &raw,
            "quick weeknight",
            &image,
            "2024-01-02 03:04:05".to_string(),
        );

        let uid = reader::derive_identifier("Pad Thai").to_string();
        assert_eq!(recipe.uid, uid);
        assert_eq!(recipe.created, "2024-01-02 03:04:05");
        assert_eq!(recipe.name, "Pad Thai");
        assert_eq!(recipe.ingredients, "200 g rice noodles\n");
        assert_eq!(recipe.directions, "Soak the noodles\n");
        assert_eq!(recipe.total_time, "20 mins");
        assert_eq!(recipe.servings, "2");
        assert_eq!(recipe.source, "Sorted Packs - quick weeknight");
        assert_eq!(recipe.categories, vec!["Sorted - Quick Weeknight"]);
        assert_eq!(recipe.photo, format!("{}.jpeg", uid));
        assert_eq!(recipe.image_url, "https://cdn.example.com/pad-thai.jpeg");
        assert_eq!(recipe.photo_data, "aW1n");
        assert_eq!(recipe.rating, 0);
        assert!(recipe.hash.is_empty());
    }

    #[test]
    fn test_assemble_uses_configured_servings() {
        let exporter = PaprikaExporter::new(ExporterSettings { target_servings: 4 });
        let raw = raw_recipe("Pad Thai", "https://cdn.example.com/pad-thai.jpg");
        let image = FetchedImage::new(Vec::new());

        let recipe = exporter.assemble(&raw, "pack", &image, String::new());
        assert_eq!(recipe.servings, "4");
        assert_eq!(recipe.total_time, "35 mins");
        assert_eq!(recipe.directions, "Soak twice the noodles\n");
        assert_eq!(recipe.ingredients, "0  rice noodles\n");
    }

    #[test]
    fn test_add_pack_fetches_images() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/pad-thai.png")
            .with_status(200)
            .with_body("png")
            .expect(2)
            .create();
        let thumbnail = format!("{}/pad-thai.png", server.url());
        let pack = user_pack(
            "noodles",
            vec![raw_recipe("Pad Thai", &thumbnail), raw_recipe("Pad See Ew", &thumbnail)],
        );

        let images = ImageFetcher::new(Timeouts::default()).unwrap();
        let mut exporter = PaprikaExporter::new(ExporterSettings::default());
        let added = exporter.add_pack(&pack, &images).unwrap();

        assert_eq!(added, 2);
        assert_eq!(exporter.recipe_count(), 2);
        let recipe = &exporter.collection().recipes()[1];
        assert_eq!(recipe.name, "Pad See Ew");
        assert_eq!(recipe.photo_data, "cG5n");
        assert!(recipe.photo.ends_with(".png"));
        mock.assert();
    }

    #[test]
    fn test_add_pack_image_failure_keeps_nothing() {
        let mut server = Server::new();
        let ok = server
            .mock("GET", "/ok.jpg")
            .with_status(200)
            .with_body("jpg")
            .create();
        let broken = server.mock("GET", "/broken.jpg").with_status(500).create();
        let pack = user_pack(
            "mixed",
            vec![
                raw_recipe("Fine", &format!("{}/ok.jpg", server.url())),
                raw_recipe("Broken", &format!("{}/broken.jpg", server.url())),
            ],
        );

        let images = ImageFetcher::new(Timeouts::default()).unwrap();
        let mut exporter = PaprikaExporter::new(ExporterSettings::default());
        let result = exporter.add_pack(&pack, &images);

        match result {
            Err(ExportError::Network { operation, .. }) => {
                assert!(operation.contains("recipe `Broken`"));
                assert!(operation.contains("pack `12`"));
            }
            other => panic!("expected network error, got {:?}", other),
        }
        assert_eq!(exporter.recipe_count(), 0);
        ok.assert();
        broken.assert();
    }

    #[test]
    fn test_export_consumes_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = PaprikaExporter::new(ExporterSettings::default());
        exporter.collection.add(vec![PaprikaRecipe {
            name: "Toast".to_string(),
            ..Default::default()
        }]);

        let path = exporter.export(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(ARCHIVE_FILE_NAME));
        assert_eq!(exporter.recipe_count(), 0);
    }
}
