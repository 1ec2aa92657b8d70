use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use services::{AppServices, Clock, LogSpeech, MoodDetectorConfig, ServicesConfig};
use smart_learn_core::model::{Language, LessonId, Mood, SubjectId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod db;

/// Smart Learn - bilingual lessons, quizzes and progress tracking
#[derive(Parser)]
#[command(name = "smart-learn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bilingual learning companion", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// SQLite database URL or path
    #[arg(
        long = "db",
        env = "SMART_LEARN_DB_URL",
        default_value = "sqlite://smart-learn.sqlite3",
        global = true
    )]
    db_url: String,

    /// Content catalog JSON (the bundled sample catalog if omitted)
    #[arg(long, env = "SMART_LEARN_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show streak, totals, achievements and the resume position
    Status,

    /// List classes, or the subjects of one class with completion counts
    Classes {
        /// Class number (1-12)
        class: Option<u32>,
    },

    /// Show a lesson in the current language
    Lesson {
        subject: SubjectId,
        lesson: LessonId,
        /// Mark the lesson complete (or run it to completion when it has no quiz)
        #[arg(long)]
        complete: bool,
        /// Read the lesson aloud
        #[arg(long)]
        read_aloud: bool,
    },

    /// Answer a lesson's quiz non-interactively
    Quiz {
        subject: SubjectId,
        lesson: LessonId,
        /// Zero-based option index per question, comma separated
        #[arg(long, value_delimiter = ',')]
        answers: Vec<usize>,
    },

    /// Add study minutes to the total time spent
    Time { minutes: u32 },

    /// Detect a mood (simulated) or pick one, then show a study suggestion
    Mood {
        /// Pick this mood instead of detecting: happy, bored, stressed, neutral
        #[arg(long, value_parser = parse_mood)]
        pick: Option<Mood>,
        /// Simulated detection time in milliseconds
        #[arg(long, default_value = "2000")]
        delay_ms: u64,
    },

    /// Show completed lessons with their scores
    Progress,

    /// Show or change the display language
    Language {
        /// `en` or `ta`; toggles when omitted
        language: Option<Language>,
    },

    /// Delete all progress
    Reset,
}

fn parse_mood(raw: &str) -> Result<Mood, String> {
    Mood::from_tag(&raw.trim().to_lowercase())
        .ok_or_else(|| format!("unknown mood {raw:?} (expected happy, bored, stressed or neutral)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let db_url = db::normalize_sqlite_url(&cli.db_url);
    db::prepare_sqlite_file(&db_url)?;
    debug!(%db_url, "opening database");

    let catalog = match &cli.catalog {
        Some(path) => services::load_catalog_file(path)?,
        None => services::bundled_catalog()?,
    };

    let mut config = ServicesConfig::default();
    if let Commands::Mood { delay_ms, .. } = &cli.command {
        config.mood = MoodDetectorConfig {
            delay: Duration::from_millis(*delay_ms),
        };
    }

    let app = AppServices::new_sqlite(
        &db_url,
        Clock::default_clock(),
        catalog,
        config,
        Arc::new(LogSpeech::new()),
    )
    .await?;

    match cli.command {
        Commands::Status => commands::status(&app).await?,
        Commands::Classes { class } => commands::classes(&app, class).await?,
        Commands::Lesson {
            subject,
            lesson,
            complete,
            read_aloud,
        } => commands::lesson(&app, subject, lesson, complete, read_aloud).await?,
        Commands::Quiz {
            subject,
            lesson,
            answers,
        } => commands::quiz(&app, subject, lesson, &answers).await?,
        Commands::Time { minutes } => commands::time(&app, minutes).await?,
        Commands::Mood { pick, .. } => commands::mood(&app, pick).await?,
        Commands::Progress => commands::progress(&app).await?,
        Commands::Language { language } => commands::language(&app, language).await?,
        Commands::Reset => commands::reset(&app).await?,
    }

    Ok(())
}
