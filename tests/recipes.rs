use std::io::Write;

use github_user_search::recipes::{field_messages, NewRecipeForm, RecipeCatalog, RecipeError};
use tempfile::NamedTempFile;

const RECIPES: &str = r#"[
  {
    "id": 1,
    "title": "Spaghetti Carbonara",
    "summary": "A classic Italian pasta dish.",
    "image": "https://via.placeholder.com/150",
    "ingredients": ["200g spaghetti", "2 eggs", "50g parmesan"],
    "instructions": "Cook the pasta. Mix eggs and cheese. Combine."
  },
  {
    "id": 4,
    "title": "Chicken Tikka Masala",
    "summary": "Chicken in a spiced curry sauce.",
    "image": "https://via.placeholder.com/150",
    "ingredients": ["chicken", "yogurt", "tomato sauce"],
    "instructions": "Marinate. Grill. Simmer in sauce."
  }
]"#;

fn recipes_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn loads_and_finds_recipes() {
    let file = recipes_file(RECIPES);
    let catalog = RecipeCatalog::load(file.path()).await.unwrap();

    assert_eq!(catalog.list().len(), 2);
    let recipe = catalog.find(4).unwrap();
    assert_eq!(recipe.title, "Chicken Tikka Masala");
    assert_eq!(recipe.ingredients.len(), 3);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let file = recipes_file(RECIPES);
    let catalog = RecipeCatalog::load(file.path()).await.unwrap();

    let err = catalog.find(2).unwrap_err();
    assert!(matches!(err, RecipeError::NotFound(2)));
    assert_eq!(err.to_string(), "Recipe not found");
}

#[tokio::test]
async fn missing_and_malformed_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = RecipeCatalog::load(dir.path().join("nope.json")).await;
    assert!(matches!(missing, Err(RecipeError::Io { .. })));

    let file = recipes_file("{\"not\": \"a list\"}");
    let malformed = RecipeCatalog::load(file.path()).await;
    assert!(matches!(malformed, Err(RecipeError::Parse { .. })));
}

#[tokio::test]
async fn added_recipe_gets_next_id() {
    let file = recipes_file(RECIPES);
    let mut catalog = RecipeCatalog::load(file.path()).await.unwrap();

    let form = NewRecipeForm {
        title: "  Pancakes ".into(),
        ingredients: "flour\n\nmilk\neggs\n".into(),
        steps: "Whisk everything.\nFry in a pan.".into(),
    };
    let added = catalog.add(&form).unwrap();
    assert_eq!(added.id, 5);
    assert_eq!(added.title, "Pancakes");
    assert_eq!(added.ingredients, vec!["flour", "milk", "eggs"]);
    assert_eq!(added.summary, "Whisk everything.");
    assert_eq!(catalog.list().len(), 3);
}

#[test]
fn invalid_recipe_is_not_added() {
    let mut catalog = RecipeCatalog::default();
    let form = NewRecipeForm {
        title: "Soup".into(),
        ingredients: "water".into(),
        steps: String::new(),
    };

    let errors = match catalog.add(&form) {
        Err(RecipeError::Invalid(errors)) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    let messages = field_messages(&errors);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages["steps"], "Preparation steps are required");
    assert!(catalog.list().is_empty());
}
