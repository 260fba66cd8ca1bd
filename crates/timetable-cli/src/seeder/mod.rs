//! Database seeding for development and demos.
//!
//! Data is generated in parallel with Rayon and inserted in batched
//! multi-row `INSERT`s, one transaction per stage.

pub mod models;
pub mod reference;
pub mod schedules;

pub use models::{ReferenceIds, ScheduleSeed, SeedConfig};

use sqlx::PgPool;
use std::time::Instant;

/// Row counts reported after a full seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub groups: usize,
    pub lessons: u64,
}

/// Seeds reference data and then schedules for every seeded group.
pub async fn seed_all(
    db: &PgPool,
    config: &SeedConfig,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Starting database seed...\n");

    let (groups, refs) = reference::seed_reference_data(db, config).await?;
    let lessons = schedules::seed_schedules(db, config, &groups, &refs).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Groups:  {}", groups.len());
    println!("   Lessons: {}", lessons);

    Ok(SeedSummary {
        groups: groups.len(),
        lessons,
    })
}

/// Empties every schedule table and resets their ID sequences.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing schedule data...");

    sqlx::query(
        "TRUNCATE schedules, student_groups, specialties, classrooms, buildings, \
         teachers, subjects, lesson_times, weekdays RESTART IDENTITY CASCADE",
    )
    .execute(db)
    .await?;

    println!("   ✓ Cleared in {:?}", start_time.elapsed());
    Ok(())
}
