use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use timetable_cache::{CacheConfig, RedisCache, invalidate};
use timetable_cli::seeder::{self, SeedConfig};
use timetable_db::{DatabaseConfig, PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "timetable-cli")]
#[command(about = "Timetable CLI - Administrative tools for the Timetable API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with groups, reference data and schedules
    Seed {
        /// Number of student groups to create
        #[arg(short = 'g', long, default_value = "8")]
        groups: usize,

        /// Number of teachers to create
        #[arg(short = 't', long, default_value = "20")]
        teachers: usize,

        /// Number of buildings to create
        #[arg(long, default_value = "2")]
        buildings: usize,

        /// Number of classrooms per building
        #[arg(long, default_value = "10")]
        classrooms: usize,

        /// First day to schedule (defaults to this week's Monday)
        #[arg(short = 's', long)]
        start: Option<NaiveDate>,

        /// Number of weeks to schedule
        #[arg(short = 'w', long, default_value = "4")]
        weeks: u32,

        /// Probability that a lesson is split between the two sub-groups
        #[arg(long, default_value = "0.3", value_parser = parse_probability)]
        split_probability: f64,
    },
    /// Delete all schedule and reference data
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Drop every cached schedule response from Redis
    FlushCache {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed {
            groups,
            teachers,
            buildings,
            classrooms,
            start,
            weeks,
            split_probability,
        } => {
            let today = start.unwrap_or_else(|| Local::now().date_naive());
            let config = SeedConfig::from_week_of(today, weeks)
                .with_groups(groups)
                .with_teachers(teachers)
                .with_classrooms(buildings, classrooms)
                .with_split_probability(split_probability);

            handle_seed(&connect().await, &config).await
        }
        Commands::Clear { yes } => handle_clear(&connect().await, yes).await,
        Commands::FlushCache { yes } => handle_flush_cache(yes).await,
    }
}

fn parse_probability(value: &str) -> Result<f64, String> {
    let probability: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(format!("`{value}` is not between 0 and 1"));
    }
    Ok(probability)
}

async fn connect() -> PgPool {
    init_db_pool(&DatabaseConfig::from_env()).await
}

fn confirm(prompt: &str, yes: bool) -> bool {
    if yes {
        return true;
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

async fn handle_seed(pool: &PgPool, config: &SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }

    flush_cached_schedules().await;
}

async fn handle_clear(pool: &PgPool, yes: bool) {
    if !confirm("Delete all schedule data?", yes) {
        println!("Aborted.");
        return;
    }

    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing data: {}", e);
        std::process::exit(1);
    }

    flush_cached_schedules().await;
}

async fn handle_flush_cache(yes: bool) {
    if !confirm("Drop all cached schedules?", yes) {
        println!("Aborted.");
        return;
    }

    flush_cached_schedules().await;
}

/// Cached responses would outlive the rows they were built from.
async fn flush_cached_schedules() {
    let config = CacheConfig::from_env();
    let Some(url) = config.redis_url.as_deref() else {
        println!("ℹ️  REDIS_URL not set, no cache to flush");
        return;
    };

    match RedisCache::new(url, config.default_ttl()).await {
        Ok(cache) => {
            let deleted = invalidate::schedules(Some(&cache)).await;
            println!("🧹 Flushed {} cached schedules", deleted);
        }
        Err(e) => eprintln!("⚠️  Could not connect to Redis: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probability() {
        assert_eq!(parse_probability("0.25"), Ok(0.25));
        assert_eq!(parse_probability("1"), Ok(1.0));
        assert!(parse_probability("NaN").is_err());
        assert!(parse_probability("inf").is_err());
        assert!(parse_probability("1.5").is_err());
        assert!(parse_probability("-0.1").is_err());
        assert!(parse_probability("often").is_err());
    }

    #[test]
    fn test_cli_rejects_nan_split_probability() {
        let parsed = Cli::try_parse_from(["timetable-cli", "seed", "--split-probability", "NaN"]);
        assert!(parsed.is_err());
    }
}
