//! Types mirroring the JSON documents served by the Sorted API.
//!
//! Field names follow the upstream payloads exactly. Arrays and strings that
//! are missing from a payload, or sent as `null`, deserialize as empty.

use serde::{Deserialize, Deserializer, Serialize};

/// Read `null` as the field's zero value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Measurement system name used by metric units
pub const SI_SYSTEM: &str = "si";

/// Ingredient type marking kitchen equipment rather than food
pub const EQUIPMENT_TYPE: &str = "Equipment";

/// A pack subscribed to by the user, as returned by both the pack list and
/// pack detail endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPack {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pack: PackDetail,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_people: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipes: Vec<RawRecipe>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cooking_time: Vec<CookingTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: Method,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_images: AltImages,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_people: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AltImages {
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
}

/// Cooking time for one serving count, in minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CookingTime {
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_people: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredient: IngredientInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantities: Vec<Quantity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, rename = "type", alias = "Type", deserialize_with = "null_as_default")]
    pub kind: IngredientType,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Ingredient {
    /// Whether this entry is something to eat rather than untyped or equipment
    pub fn is_food(&self) -> bool {
        let kind = self.ingredient.kind.name.as_str();
        !kind.is_empty() && kind != EQUIPMENT_TYPE
    }
}

/// Amount of an ingredient for one serving count in one measurement system
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Quantity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: Unit,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_people: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Unit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_abbrev: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plural_abbrev: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Method {
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_people: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_people: u32,
}

/// Login request body
#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response body
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub key: String,
}
