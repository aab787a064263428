//! Lernio command line: CSV ingestion, training, and recommendation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use lernio_core::{Engine, Interactions, RecommendationRequest};
use tracing_subscriber::EnvFilter;

mod evaluate;
mod ingest;
mod settings;

use settings::Settings;

/// Latent-factor course recommendations from enrollment exports.
#[derive(Parser, Debug)]
#[command(name = "lernio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file; LERNIO_* environment variables override it.
    #[arg(long, default_value = "lernio.toml", env = "LERNIO_CONFIG")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on an enrollment export and print ranked recommendations for
    /// one user.
    Recommend {
        /// Path to the enrollment CSV (UserID, CourseIDs columns).
        #[arg(short, long, env = "LERNIO_DATA")]
        data: String,

        /// User identifier to recommend for.
        #[arg(short, long)]
        user: String,

        /// Number of courses to return (defaults to the configured value).
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Emit JSON instead of a formatted list.
        #[arg(long)]
        json: bool,
    },

    /// Print dataset statistics for an enrollment export.
    Stats {
        /// Path to the enrollment CSV.
        #[arg(short, long, env = "LERNIO_DATA")]
        data: String,
    },

    /// Leave-last-out offline evaluation of recommendation quality.
    Evaluate {
        /// Path to the enrollment CSV.
        #[arg(short, long, env = "LERNIO_DATA")]
        data: String,

        /// Recommendation list length to evaluate at.
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;

    match cli.command {
        Command::Recommend {
            data,
            user,
            count,
            json,
        } => cmd_recommend(&settings, &data, &user, count, json),
        Command::Stats { data } => cmd_stats(&data),
        Command::Evaluate { data, count } => cmd_evaluate(&settings, &data, count),
    }
}

fn cmd_recommend(
    settings: &Settings,
    data: &str,
    user: &str,
    count: Option<usize>,
    json: bool,
) -> Result<()> {
    let records = ingest::load_records(data)?;
    tracing::info!(records = records.len(), path = data, "loaded enrollment export");

    let engine = Engine::train(&records, &settings.model_config())
        .context("failed to train the recommendation model")?;

    let request =
        RecommendationRequest::new(user, count.unwrap_or(settings.recommendations));
    let picks = engine
        .recommend(&request)
        .with_context(|| format!("no recommendations for user '{user}'"))?;

    if json {
        println!("{}", serde_json::to_string(&picks)?);
        return Ok(());
    }

    if picks.is_empty() {
        println!("No courses left to recommend for {user}.");
        return Ok(());
    }

    println!("{} {}", "Recommendations for".bold(), user.green());
    for (position, course) in picks.iter().enumerate() {
        println!("  {}. {}", position + 1, course.green());
    }
    Ok(())
}

fn cmd_stats(data: &str) -> Result<()> {
    let records = ingest::load_records(data)?;
    let interactions = Interactions::from_records(&records)
        .context("failed to build the interaction matrix")?;

    let users = interactions.user_count();
    let courses = interactions.course_count();
    let enrollments = interactions.enrollment_count();
    #[allow(clippy::cast_precision_loss)] // Reason: dataset dimensions are far below 2^52
    let density = if users * courses == 0 {
        0.0
    } else {
        enrollments as f64 / (users * courses) as f64
    };

    println!("{} {}", "Dataset:".bold(), data.green());
    println!("  Users:       {users}");
    println!("  Courses:     {courses}");
    println!("  Enrollments: {enrollments}");
    println!("  Density:     {:.2}%", density * 100.0);
    Ok(())
}

fn cmd_evaluate(settings: &Settings, data: &str, count: Option<usize>) -> Result<()> {
    let records = ingest::load_records(data)?;
    tracing::info!(records = records.len(), path = data, "loaded enrollment export");
    let count = count.unwrap_or(settings.recommendations);

    let evaluation = evaluate::leave_last_out(&records, &settings.model_config(), count)?;

    println!("{}", "Leave-last-out evaluation".bold());
    println!("  Evaluated users: {}", evaluation.evaluated_users);
    println!("  Hit rate @{count}:     {:.3}", evaluation.hit_rate);
    println!("  Mean recall @{count}:  {:.3}", evaluation.mean_recall);
    Ok(())
}
