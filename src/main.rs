use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use github_user_search::cards::{load_cards, UserCard};
use github_user_search::client::{GitHubClient, UserDirectory};
use github_user_search::config::Config;
use github_user_search::recipes::{field_messages, NewRecipeForm, RecipeCatalog, RecipeError};
use github_user_search::session::{SearchSession, SearchState};
use github_user_search::{SearchFilters, UserProfile};

type Input = Lines<BufReader<Stdin>>;

const HELP: &str = "\
commands:
  search            advanced search (username, location, minimum repos)
  more              load the next page of results
  reset             clear the search
  list              show loaded results
  cards             load profile cards for loaded results
  user <login>      show one user's profile
  find <text>       plain text user search
  open <login>      open a profile in the browser
  recipes           list recipes
  recipe <id>       show one recipe
  add-recipe        add a recipe (kept in memory)
  help | quit";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("github_user_search=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let github = Arc::new(GitHubClient::from_config(&config)?);
    let mut session = SearchSession::new(Arc::clone(&github), config.per_page);

    let mut recipes = match RecipeCatalog::load(&config.recipes_path).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("{e}");
            RecipeCatalog::default()
        }
    };

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        let Some(line) = prompt(&mut input, "> ").await? else {
            break;
        };
        let (command, arg) = match line.trim().split_once(char::is_whitespace) {
            Some((c, a)) => (c.to_string(), a.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };

        match command.as_str() {
            "" => {}
            "search" => {
                let username = prompt(&mut input, "Username: ").await?.unwrap_or_default();
                let location = prompt(&mut input, "Location: ").await?.unwrap_or_default();
                let min_repos = prompt(&mut input, "Minimum repositories: ")
                    .await?
                    .unwrap_or_default();
                match SearchFilters::from_input(&username, &location, &min_repos) {
                    Ok(filters) => show_results(session.submit(filters).await),
                    Err(e) => println!("{}", e.user_message()),
                }
            }
            "more" => {
                if session.state().results().has_more {
                    show_results(session.load_more().await);
                } else {
                    println!("No more results.");
                }
            }
            "reset" => {
                session.reset();
                println!("Search cleared.");
            }
            "list" => show_results(session.state()),
            "cards" => {
                let users = session.state().results().items.clone();
                for card in load_cards(Arc::clone(&github), &users).await {
                    match card {
                        UserCard::Loaded(profile) => show_profile(&profile),
                        UserCard::Unavailable { message, .. } => println!("{message}\n"),
                    }
                }
            }
            "user" if !arg.is_empty() => match github.fetch_user(&arg).await {
                Ok(profile) => show_profile(&profile),
                Err(e) => {
                    tracing::error!("Error fetching user: {e}");
                    println!("Looks like we cant find the user");
                }
            },
            "find" if !arg.is_empty() => match github.search_text(&arg).await {
                Ok(page) => {
                    println!("{} users match", page.total_count);
                    for user in page.items {
                        println!("  {}", user.login);
                    }
                }
                Err(e) => {
                    tracing::error!("Error searching users: {e}");
                    println!("{}", e.user_message());
                }
            },
            "open" if !arg.is_empty() => {
                let url = match github.fetch_user(&arg).await {
                    Ok(profile) => profile.html_url,
                    Err(_) => format!("https://github.com/{arg}"),
                };
                if let Err(e) = open::that(&url) {
                    tracing::error!("Failed to open {url}: {e}");
                }
            }
            "recipes" => {
                for recipe in recipes.list() {
                    println!("{:>3}  {} - {}", recipe.id, recipe.title, recipe.summary);
                }
            }
            "recipe" => match arg.parse::<u64>() {
                Ok(id) => match recipes.find(id) {
                    Ok(recipe) => {
                        println!("{}\n\n{}\n\nIngredients:", recipe.title, recipe.summary);
                        for ingredient in &recipe.ingredients {
                            println!("  - {ingredient}");
                        }
                        println!("\nInstructions:\n{}", recipe.instructions);
                    }
                    Err(e) => println!("{e}"),
                },
                Err(_) => println!("usage: recipe <id>"),
            },
            "add-recipe" => {
                let form = read_recipe_form(&mut input).await?;
                match recipes.add(&form) {
                    Ok(recipe) => println!("Recipe added successfully (id {}).", recipe.id),
                    Err(RecipeError::Invalid(errors)) => {
                        for (field, message) in field_messages(&errors) {
                            println!("{field}: {message}");
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            _ => println!("unknown command, try `help`"),
        }
    }

    Ok(())
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    input.next_line().await.context("Failed to read input")
}

/// Reads lines until an empty one.
async fn read_block(input: &mut Input, label: &str) -> Result<String> {
    println!("{label} (finish with an empty line)");
    let mut lines = Vec::new();
    while let Some(line) = input.next_line().await? {
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

async fn read_recipe_form(input: &mut Input) -> Result<NewRecipeForm> {
    let title = prompt(input, "Recipe title: ").await?.unwrap_or_default();
    let ingredients = read_block(input, "Ingredients, one per line").await?;
    let steps = read_block(input, "Preparation steps").await?;
    Ok(NewRecipeForm {
        title,
        ingredients,
        steps,
    })
}

fn show_results(state: &SearchState) {
    if let Some(message) = state.error_message() {
        println!("{message}");
    }

    let results = state.results();
    if results.items.is_empty() {
        if state.error_message().is_none() {
            println!("No results. Enter a username, location, or minimum repository count.");
        }
        return;
    }

    let plural = if results.total_count == 1 { "" } else { "s" };
    println!("Found {} developer{plural}", results.total_count);
    println!(
        "Showing {} of {} results",
        results.items.len(),
        results.total_count
    );
    for user in &results.items {
        println!("  {:>10}  {}", user.id, user.login);
    }
    if results.has_more {
        println!("`more` loads more users ({} remaining)", results.remaining());
    }
}

fn show_profile(profile: &UserProfile) {
    println!("{} (@{})", profile.display_name(), profile.login);
    if let Some(bio) = &profile.bio {
        println!("  {bio}");
    }
    println!(
        "  repos {}  followers {}  following {}",
        profile.public_repos, profile.followers, profile.following
    );
    if let Some(location) = &profile.location {
        println!("  location: {location}");
    }
    if let Some(company) = &profile.company {
        println!("  company: {company}");
    }
    println!("  {}\n", profile.html_url);
}
