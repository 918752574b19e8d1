//! Seed command implementation

use anyhow::Result;

use ecoquest::config::Config;
use ecoquest::seed::seed_sample_data;

/// Insert the sample catalog into the configured database
pub fn seed_command(config: &Config) -> Result<()> {
    let db = super::open_store(config)?;
    let report = seed_sample_data(&db)?;

    if report.lessons == 0 {
        println!("Lessons already exist, nothing added.");
    } else {
        println!(
            "Sample lessons added successfully! ({} lessons, {} questions)",
            report.lessons, report.questions
        );
    }
    Ok(())
}
