/// Command line driver for the StreakPath habit tracker
///
/// This file sets up logging, parses command line arguments, opens the
/// habit database and runs one command against the store.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use streakpath::{
    parse_day, parse_month, today, validate_markable_day, AppError, CompletionStatus, HabitId,
    HabitIcon, Identity, MonthSummary, Streak, StreakPath, COLOR_PALETTE,
};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".streakpath");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("streakpath");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("streakpath");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".streakpath");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if let Ok(()) = std::fs::create_dir_all(potential_path) {
            // Test if we can write to this directory
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join("habits.db"));
            }
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("streakpath");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habits.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for StreakPath
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Act as a signed-in account (enables remote sync)
    #[arg(long)]
    signed_in: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List habits grouped by group name
    List {
        /// Only show habits whose name or group contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List the groups available for new habits
    Groups,

    /// Create a habit
    Add {
        name: String,
        #[arg(long, default_value = "Activity")]
        icon: String,
        #[arg(long, default_value = COLOR_PALETTE[0])]
        color: String,
        #[arg(long)]
        group: Option<String>,
    },

    /// Advance a day to its next status (done, fail, skip, unmarked)
    Toggle {
        habit_id: String,
        /// Day to toggle (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a habit permanently
    Delete { habit_id: String },

    /// Show progress for one habit
    Show {
        habit_id: String,
        /// Month to summarise (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("streakpath={}", log_level))
        .with_writer(std::io::stderr) // keep stdout for command output
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let identity = if args.signed_in {
        Identity::signed_in()
    } else {
        Identity::guest()
    };
    let app = StreakPath::open(db_path, Arc::new(identity)).await?;

    run(&app, args.command).await?;
    Ok(())
}

async fn run(app: &StreakPath, command: Command) -> Result<(), AppError> {
    let store = app.store();

    match command {
        Command::List { search } => {
            let sections = store.sections(&search).await;
            if sections.is_empty() {
                if search.is_empty() {
                    println!("No habits yet. Start one today!");
                } else {
                    println!("No habits found matching your search.");
                }
            }

            let today = today();
            for section in sections {
                println!("{}", section.title);
                for habit in section.habits {
                    let mark = match habit.status_on(today) {
                        Some(CompletionStatus::Done) => "completed today".to_string(),
                        Some(status) => status.to_string(),
                        None => "-".to_string(),
                    };
                    println!("  {}  {} [{}]  {}", habit.id, habit.name, habit.icon_glyph().name(), mark);
                }
            }
        }
        Command::Groups => {
            for group in store.group_choices().await {
                println!("{}", group);
            }
        }
        Command::Add { name, icon, color, group } => {
            if HabitIcon::resolve(&icon) == HabitIcon::Circle {
                tracing::warn!("Unknown icon '{}', it will be drawn as Circle", icon);
            }
            match store.create(&name, &icon, &color, group.as_deref()).await {
                Some(habit) => println!("Created habit '{}' ({})", habit.name, habit.id),
                None => println!("Habit name cannot be empty"),
            }
        }
        Command::Toggle { habit_id, date } => {
            let today = today();
            let date = match date {
                Some(date) => parse_day(&date)?,
                None => today,
            };
            validate_markable_day(date, today)?;

            match store.toggle_completion(&HabitId::from_string(&habit_id), date).await {
                Some(habit) => {
                    let status = habit
                        .status_on(date)
                        .map_or("unmarked".to_string(), |s| s.to_string());
                    println!("{} on {}: {}", habit.name, date, status);
                }
                None => println!("Habit not found: {}", habit_id),
            }
        }
        Command::Delete { habit_id } => {
            if store.delete(&HabitId::from_string(&habit_id)).await {
                println!("Deleted habit {}", habit_id);
            } else {
                println!("Habit not found: {}", habit_id);
            }
        }
        Command::Show { habit_id, month } => {
            let Some(habit) = store.habit(&HabitId::from_string(&habit_id)).await else {
                println!("Habit not found: {}", habit_id);
                return Ok(());
            };

            let today = today();
            let (year, month) = match month {
                Some(month) => parse_month(&month)?,
                None => {
                    use chrono::Datelike;
                    (today.year(), today.month())
                }
            };

            let summary = MonthSummary::for_month(&habit, year, month);
            let streak = Streak::calculate(&habit, today);

            println!("{} ({})", habit.name, habit.group_name());
            println!(
                "{}: {} done of {} marked ({} fail, {} skip)",
                summary.month, summary.done, summary.total, summary.fail, summary.skip
            );
            println!(
                "Current streak: {} day{}, longest: {}, completion rate: {:.0}%",
                streak.current_streak,
                if streak.current_streak == 1 { "" } else { "s" },
                streak.longest_streak,
                streak.completion_rate * 100.0
            );
        }
    }

    Ok(())
}
