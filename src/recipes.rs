//! Recipe catalog backed by a static JSON document.
//!
//! The catalog is read once from disk. Recipes added through
//! [`NewRecipeForm`] only live in memory.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub summary: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("failed to read recipes from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recipes from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Recipe not found")]
    NotFound(u64),

    #[error("validation errors: {0}")]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Reads a JSON array of recipes from `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RecipeError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let recipes: Vec<Recipe> =
            serde_json::from_str(&raw).map_err(|source| RecipeError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(count = recipes.len(), path = %path.display(), "recipes loaded");
        Ok(Self::new(recipes))
    }

    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find(&self, id: u64) -> Result<&Recipe, RecipeError> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or(RecipeError::NotFound(id))
    }

    /// Validates `form` and appends it with the next free id.
    pub fn add(&mut self, form: &NewRecipeForm) -> Result<&Recipe, RecipeError> {
        form.validate()?;

        let id = self.recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.recipes.push(form.to_recipe(id));
        tracing::info!(id, title = %form.title.trim(), "recipe added");
        self.find(id)
    }
}

/// Form data for adding a recipe.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewRecipeForm {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    /// One ingredient per line.
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: String,
    #[validate(custom(function = "validate_steps"))]
    pub steps: String,
}

impl NewRecipeForm {
    pub fn ingredient_lines(&self) -> Vec<String> {
        ingredient_lines(&self.ingredients)
    }

    fn to_recipe(&self, id: u64) -> Recipe {
        let steps = self.steps.trim().to_string();
        Recipe {
            id,
            title: self.title.trim().to_string(),
            summary: steps.lines().next().unwrap_or_default().to_string(),
            image: String::new(),
            ingredients: self.ingredient_lines(),
            instructions: steps,
        }
    }
}

/// Flattens validation errors into one message per form field.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let message = errs.first()?.message.as_ref()?.to_string();
            Some((field.to_string(), message))
        })
        .collect()
}

fn ingredient_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(failure("required", "Recipe title is required"));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &str) -> Result<(), ValidationError> {
    if ingredients.trim().is_empty() {
        return Err(failure("required", "Ingredients are required"));
    }
    if ingredient_lines(ingredients).len() < 2 {
        return Err(failure(
            "too_few",
            "Please list at least two ingredients (one per line)",
        ));
    }
    Ok(())
}

fn validate_steps(steps: &str) -> Result<(), ValidationError> {
    if steps.trim().is_empty() {
        return Err(failure("required", "Preparation steps are required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, ingredients: &str, steps: &str) -> NewRecipeForm {
        NewRecipeForm {
            title: title.into(),
            ingredients: ingredients.into(),
            steps: steps.into(),
        }
    }

    #[test]
    fn blank_form_reports_every_field() {
        let errors = form(" ", "", "\n").validate().unwrap_err();
        let messages = field_messages(&errors);
        assert_eq!(messages["title"], "Recipe title is required");
        assert_eq!(messages["ingredients"], "Ingredients are required");
        assert_eq!(messages["steps"], "Preparation steps are required");
    }

    #[test]
    fn single_ingredient_is_rejected() {
        let errors = form("Toast", "bread\n\n  ", "Toast it.")
            .validate()
            .unwrap_err();
        let messages = field_messages(&errors);
        assert_eq!(
            messages["ingredients"],
            "Please list at least two ingredients (one per line)"
        );
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn valid_form_passes() {
        let f = form("Toast", "bread\nbutter", "Toast it.\nButter it.");
        assert!(f.validate().is_ok());
        assert_eq!(f.ingredient_lines(), vec!["bread", "butter"]);
    }
}
