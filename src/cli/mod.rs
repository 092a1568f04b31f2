mod plan;
mod recipe;
mod shopping;
mod sync;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use jardine_cloud::Client;
use jardine_db::SqliteStore;
use jardine_mealplan::{Coordinator, Reconciled};
use jardine_shared::mealplan::{DAYS_PER_WEEK, weekday_name};
use jardine_shared::{OfflineRemote, RemoteStore};

use crate::config::Config;

pub use plan::render_week;

/// jardine - household meal planner
#[derive(Parser, Debug)]
#[command(name = "jardine")]
#[command(about = "Plan the household's meals week by week", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the plan of one week, or of every week
    Show {
        #[arg(long, value_parser = parse_week)]
        week: Option<usize>,
    },
    /// List weeks with how many days are planned
    Weeks,
    /// Plan a recipe (id or title) on a day
    Assign {
        #[arg(value_parser = parse_week)]
        week: usize,
        #[arg(value_parser = parse_day)]
        day: usize,
        recipe: String,
        /// Plan it even when the recipe is marked as disliked
        #[arg(long)]
        anyway: bool,
    },
    /// Empty a day
    Clear {
        #[arg(value_parser = parse_week)]
        week: usize,
        #[arg(value_parser = parse_day)]
        day: usize,
    },
    /// Toggle granny day (no cooking needed)
    Granny {
        #[arg(value_parser = parse_week)]
        week: usize,
        #[arg(value_parser = parse_day)]
        day: usize,
    },
    /// Toggle eating out
    EatingOut {
        #[arg(value_parser = parse_week)]
        week: usize,
        #[arg(value_parser = parse_day)]
        day: usize,
    },
    /// Swap the content of two days of the same week
    Swap {
        #[arg(value_parser = parse_week)]
        week: usize,
        #[arg(value_parser = parse_day)]
        a: usize,
        #[arg(value_parser = parse_day)]
        b: usize,
    },
    /// Move a week to another position
    MoveWeek {
        #[arg(value_parser = parse_week)]
        from: usize,
        #[arg(value_parser = parse_week)]
        to: usize,
    },
    /// List the recipe library
    Recipes,
    /// Add a recipe by hand
    AddRecipe {
        title: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// One ingredient line, e.g. "200 g spaghetti" (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        #[arg(long, default_value = "")]
        instructions: String,
    },
    /// Import recipes from their web pages
    Import {
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,
    },
    /// Delete a recipe and empty the days it was planned on
    RemoveRecipe { recipe: String },
    /// Toggle the disliked flag of a recipe
    Dislike { recipe: String },
    /// Shopping list for a week
    Shopping {
        #[arg(value_parser = parse_week)]
        week: usize,
        /// Skip the aggregation function and use the local estimate
        #[arg(long)]
        local: bool,
    },
    /// Pull the shared plan, or push the local one with --push
    Sync {
        #[arg(long)]
        push: bool,
    },
    /// Create the database and apply migrations
    Migrate,
}

/// 1-based week number to index.
pub fn parse_week(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("`{value}` is not a week number (1, 2, ...)")),
    }
}

/// 1-based day number or weekday name (`tuesday`, `tue`) to index.
pub fn parse_day(value: &str) -> Result<usize, String> {
    let value = value.trim();

    if let Ok(n) = value.parse::<usize>() {
        if (1..=DAYS_PER_WEEK).contains(&n) {
            return Ok(n - 1);
        }

        return Err(format!("day must be between 1 and {DAYS_PER_WEEK}"));
    }

    let lower = value.to_lowercase();
    (0..DAYS_PER_WEEK)
        .find(|i| {
            let name = weekday_name(*i).to_lowercase();
            lower.len() >= 3 && name.starts_with(&lower)
        })
        .ok_or_else(|| format!("`{value}` is not a day (1-7 or a weekday name)"))
}

/// Planner opened for one command: the local snapshot, reconciled with the
/// remote one when sync is on.
pub struct Session {
    pub coordinator: Coordinator,
    pub client: Option<Client>,
    pub reconciled: Option<Reconciled>,
}

impl Session {
    pub async fn open(config: &Config, reconcile: bool) -> anyhow::Result<Self> {
        let store = SqliteStore::connect(&config.storage.database_url, &config.storage.key).await?;

        let client = if config.remote.enabled {
            Some(Client::new(
                &config.remote.base_url,
                &config.remote.api_key,
                Duration::from_secs(config.remote.timeout_secs),
            )?)
        } else {
            None
        };

        let remote: Arc<dyn RemoteStore> = match &client {
            Some(client) => Arc::new(client.clone()),
            None => Arc::new(OfflineRemote),
        };

        let mut coordinator =
            Coordinator::start(Arc::new(store), remote, config.coordinator_options()).await;

        let reconciled = if reconcile && client.is_some() {
            Some(coordinator.reconcile().await)
        } else {
            None
        };

        Ok(Self {
            coordinator,
            client,
            reconciled,
        })
    }

    /// Waits for the pending push so nothing is lost when the process exits.
    pub async fn close(self) {
        self.coordinator.flush().await;
    }
}

pub async fn run(config: &Config, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    if command == Command::Migrate {
        return sync::migrate(config, out).await;
    }

    let reconcile = command != Command::Sync { push: true };
    let mut session = Session::open(config, reconcile).await?;

    let result = match command {
        Command::Show { week } => plan::show(&session, week, out),
        Command::Weeks => plan::weeks(&session, out),
        Command::Assign {
            week,
            day,
            recipe,
            anyway,
        } => plan::assign(&mut session, week, day, &recipe, anyway, out).await,
        Command::Clear { week, day } => plan::clear(&mut session, week, day, out).await,
        Command::Granny { week, day } => plan::granny(&mut session, week, day, out).await,
        Command::EatingOut { week, day } => plan::eating_out(&mut session, week, day, out).await,
        Command::Swap { week, a, b } => plan::swap(&mut session, week, a, b, out).await,
        Command::MoveWeek { from, to } => plan::move_week(&mut session, from, to, out).await,
        Command::Recipes => recipe::list(&session, out),
        Command::AddRecipe {
            title,
            url,
            image_url,
            ingredients,
            instructions,
        } => {
            let input = jardine_recipe::CreateInput {
                title,
                url,
                image_url,
                ingredients,
                instructions,
            };
            recipe::add(&mut session, input, out).await
        }
        Command::Import { urls } => recipe::import(&mut session, &urls, out).await,
        Command::RemoveRecipe { recipe } => recipe::remove(&mut session, &recipe, out).await,
        Command::Dislike { recipe } => recipe::dislike(&mut session, &recipe, out).await,
        Command::Shopping { week, local } => {
            shopping::shopping(&session, week, local, config.shopping.local_fallback, out).await
        }
        Command::Sync { push } => sync::sync(&mut session, push, out).await,
        Command::Migrate => Ok(()),
    };

    session.close().await;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_week() {
        assert_eq!(parse_week("1"), Ok(0));
        assert_eq!(parse_week("12"), Ok(11));
        assert!(parse_week("0").is_err());
        assert!(parse_week("next").is_err());
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("1"), Ok(0));
        assert_eq!(parse_day("7"), Ok(6));
        assert_eq!(parse_day("Tuesday"), Ok(1));
        assert_eq!(parse_day("sun"), Ok(6));
        assert!(parse_day("8").is_err());
        assert!(parse_day("t").is_err());
        assert!(parse_day("someday").is_err());
    }

    #[test]
    fn test_cli_parses_commands() {
        let cli = Cli::try_parse_from(["jardine", "assign", "2", "fri", "Pasta", "--anyway"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Assign {
                week: 1,
                day: 4,
                recipe: "Pasta".to_string(),
                anyway: true,
            }
        );

        let cli = Cli::try_parse_from(["jardine", "--config", "x.toml", "show"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
        assert_eq!(cli.command, Command::Show { week: None });

        assert!(Cli::try_parse_from(["jardine", "import"]).is_err());
        assert!(Cli::try_parse_from(["jardine", "clear", "1", "8"]).is_err());
    }
}
