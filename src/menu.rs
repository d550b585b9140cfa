//! Interactive text menu.
//!
//! Thin presentation glue over the core contracts: it drives
//! [`NewsClient`] searches, lets the user pick an ordering and toggle flags
//! on a selected article, and funnels every mutation through
//! [`UserState::upsert`] followed by a store save so flag changes are
//! durable. No business rule lives here.

use chrono::NaiveDate;
use std::error::Error;
use std::io::{self, Write};
use tracing::{error, warn};

use crate::api::NewsClient;
use crate::models::Article;
use crate::sort;
use crate::state::UserState;
use crate::store::UserStateStore;

/// Run the menu loop until the user quits. State is saved after every
/// mutation and once more on graceful shutdown.
pub async fn run(client: &NewsClient, store: &UserStateStore) -> Result<(), Box<dyn Error>> {
    let mut state = load_or_create_user(store).await?;

    loop {
        println!();
        println!("=== IBGE News ===");
        println!("1. Search news");
        println!("2. Favorites");
        println!("3. Read");
        println!("4. Saved for later");
        println!("0. Quit");

        match read_option(0, 4)? {
            1 => search(client, store, &mut state).await?,
            2 => show_tracked("Favorites", state.favorites(), store, &mut state).await?,
            3 => show_tracked("Read", state.read(), store, &mut state).await?,
            4 => {
                show_tracked("Saved for later", state.saved_for_later(), store, &mut state)
                    .await?
            }
            0 => {
                println!("Saving and exiting...");
                if let Err(e) = store.save(&state).await {
                    error!(error = %e, "Failed to save state on exit");
                }
                return Ok(());
            }
            _ => {}
        }
    }
}

async fn load_or_create_user(store: &UserStateStore) -> Result<UserState, Box<dyn Error>> {
    if let Some(state) = store.load().await {
        println!("Welcome back, {}!", state.display_name);
        return Ok(state);
    }

    println!("Welcome to the IBGE news tracker!");
    let name = loop {
        let name = prompt("Enter your name or nickname (at least 2 characters): ")?;
        let name = name.trim().to_string();
        if name.chars().count() >= 2 {
            break name;
        }
        println!("Name is too short.");
    };

    let state = UserState::new(name);
    if let Err(e) = store.save(&state).await {
        // The session still works in memory; the next save may succeed.
        error!(error = %e, "Failed to save initial state");
    }
    Ok(state)
}

async fn search(
    client: &NewsClient,
    store: &UserStateStore,
    state: &mut UserState,
) -> Result<(), Box<dyn Error>> {
    println!();
    println!("=== Search ===");
    println!("1. By title");
    println!("2. By keywords");
    println!("3. By date");
    println!("0. Back");

    let results = match read_option(0, 3)? {
        1 => client.search_by_title(&prompt("Title: ")?).await,
        2 => client.search_by_keywords(&prompt("Keywords: ")?).await,
        3 => client.search_by_date(read_past_date()?).await,
        _ => return Ok(()),
    };

    if results.is_empty() {
        println!("No news found.");
        return Ok(());
    }

    let ordered = choose_ordering(&results)?;
    display_articles(&ordered);
    interact(&ordered, store, state).await
}

async fn show_tracked(
    heading: &str,
    articles: Vec<Article>,
    store: &UserStateStore,
    state: &mut UserState,
) -> Result<(), Box<dyn Error>> {
    println!();
    println!("=== {heading} ===");
    if articles.is_empty() {
        println!("Nothing here yet.");
        return Ok(());
    }
    let ordered = choose_ordering(&articles)?;
    display_articles(&ordered);
    interact(&ordered, store, state).await
}

fn choose_ordering(articles: &[Article]) -> Result<Vec<Article>, Box<dyn Error>> {
    println!();
    println!("Order by:");
    println!("1. Title");
    println!("2. Date");
    println!("3. Kind");
    println!("0. Newest id first");

    Ok(match read_option(0, 3)? {
        1 => sort::by_title(articles),
        2 => sort::by_date(articles),
        3 => sort::by_kind(articles),
        _ => sort::by_id(articles),
    })
}

fn display_articles(articles: &[Article]) {
    for (position, article) in articles.iter().enumerate() {
        println!();
        println!("=== Article {} (id {}) ===", position + 1, article.id);
        println!("Title: {}", article.title);
        if !article.summary.is_empty() {
            println!("Summary: {}", article.summary);
        }
        println!("Published: {}", article.published_at.format("%d/%m/%Y %H:%M:%S"));
        println!("Kind: {}", article.kind.label());
        println!("Link: {}", article.link);
        println!(
            "Status: {} | {} | {}",
            if article.is_read { "read" } else { "unread" },
            if article.is_favorite { "favorite" } else { "not favorite" },
            if article.is_saved_for_later { "saved for later" } else { "not saved" },
        );
    }
}

async fn interact(
    articles: &[Article],
    store: &UserStateStore,
    state: &mut UserState,
) -> Result<(), Box<dyn Error>> {
    loop {
        println!();
        println!("Actions:");
        println!("1. Toggle favorite");
        println!("2. Toggle read");
        println!("3. Toggle saved for later");
        println!("0. Back");

        let action = read_option(0, 3)?;
        if action == 0 {
            return Ok(());
        }

        println!("Article number (1 to {}): ", articles.len());
        let index = read_option(1, articles.len() as i64)? as usize - 1;

        // Work on the stored copy when the article is already tracked so its
        // descriptive fields stay authoritative; fall back to the transient
        // fetched record otherwise.
        let mut record = state
            .get(articles[index].id)
            .cloned()
            .unwrap_or_else(|| articles[index].clone());

        match action {
            1 => {
                record.toggle_favorite();
                println!(
                    "Article {}.",
                    if record.is_favorite { "marked as favorite" } else { "unmarked as favorite" }
                );
            }
            2 => {
                record.toggle_read();
                println!(
                    "Article {}.",
                    if record.is_read { "marked as read" } else { "unmarked as read" }
                );
            }
            3 => {
                record.toggle_saved_for_later();
                println!(
                    "Article {}.",
                    if record.is_saved_for_later { "saved for later" } else { "removed from saved" }
                );
            }
            _ => continue,
        }

        state.upsert(record);
        if let Err(e) = store.save(state).await {
            // In-memory edits survive; the user can keep going and the next
            // save may succeed.
            warn!(error = %e, "Failed to persist state after flag change");
            println!("Warning: could not save your changes to disk.");
        }
    }
}

fn read_past_date() -> Result<NaiveDate, Box<dyn Error>> {
    loop {
        let entry = prompt("Date (YYYY-MM-DD): ")?;
        match NaiveDate::parse_from_str(entry.trim(), "%Y-%m-%d") {
            Ok(date) if date <= chrono::Local::now().date_naive() => return Ok(date),
            Ok(_) => println!("The date cannot be in the future."),
            Err(_) => println!("Invalid date, use the format YYYY-MM-DD (example: 2025-06-07)."),
        }
    }
}

fn read_option(min: i64, max: i64) -> Result<i64, Box<dyn Error>> {
    loop {
        let entry = prompt("Choose an option: ")?;
        match entry.trim().parse::<i64>() {
            Ok(option) if (min..=max).contains(&option) => return Ok(option),
            Ok(_) => println!("Option out of range."),
            Err(_) => println!("Invalid input, digits only."),
        }
    }
}

fn prompt(text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
