//! Resolves serving-count variants of a raw recipe and renders them as text.

use crate::source::model::{CookingTime, Ingredient, Method, Quantity, SI_SYSTEM};
use uuid::Uuid;

/// Serving count used when none is configured
pub const DEFAULT_TARGET_SERVINGS: u32 = 2;

/// Pick the quantity for `target` servings.
///
/// A metric match is returned as soon as it is seen. Otherwise the last
/// matching variant wins. With no match at all the zero quantity is returned.
pub fn select_quantity(variants: &[Quantity], target: u32) -> Quantity {
    let mut selected = None;
    for quantity in variants.iter().filter(|q| q.num_people == target) {
        if quantity.unit.system == SI_SYSTEM {
            return quantity.clone();
        }
        selected = Some(quantity);
    }
    selected.cloned().unwrap_or_default()
}

/// First cooking time for `target` servings as `"<n> mins"`, or empty.
pub fn select_cooking_time(variants: &[CookingTime], target: u32) -> String {
    variants
        .iter()
        .find(|time| time.num_people == target)
        .map(|time| format!("{} mins", time.duration))
        .unwrap_or_default()
}

/// Render `"<quantity> <unit> <name>"` for the selected quantity variant
pub fn render_ingredient_line(ingredient: &Ingredient, target: u32) -> String {
    let quantity = select_quantity(&ingredient.quantities, target);
    let unit = if quantity.quantity > 1.0 {
        &quantity.unit.plural_abbrev
    } else {
        &quantity.unit.name
    };
    format!(
        "{} {} {}",
        format_quantity(quantity.quantity),
        unit,
        ingredient.ingredient.name
    )
}

/// One line per food ingredient, each terminated by a newline
pub fn render_ingredients(ingredients: &[Ingredient], target: u32) -> String {
    ingredients
        .iter()
        .filter(|ingredient| ingredient.is_food())
        .map(|ingredient| render_ingredient_line(ingredient, target) + "\n")
        .collect()
}

/// Task descriptions of every step for `target` servings, one per line
pub fn render_method(method: &Method, target: u32) -> String {
    method
        .steps
        .iter()
        .filter(|step| step.num_people == target)
        .flat_map(|step| step.tasks.iter())
        .map(|task| format!("{}\n", task.method))
        .collect()
}

/// Shortest decimal form: no trailing zeros, no exponent, no separators
pub fn format_quantity(value: f64) -> String {
    // Display for f64 already prints the shortest round-tripping digits
    format!("{}", value)
}

/// Name-based identifier for a recipe title. Same title, same identifier.
pub fn derive_identifier(title: &str) -> Uuid {
    Uuid::new_v3(&Uuid::nil(), title.as_bytes())
}

/// Extension of an image URL, i.e. everything after its last dot
pub fn image_extension(url: &str) -> &str {
    url.rsplit('.').next().unwrap_or(url)
}

/// Uppercase the first letter of every word.
///
/// A word starts after an ASCII character that is not alphanumeric or `_`,
/// or after any whitespace. Other non-ASCII characters never start a word.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = if c.is_ascii() {
            !(c.is_ascii_alphanumeric() || c == '_')
        } else {
            c.is_whitespace()
        };
    }
    result
}
