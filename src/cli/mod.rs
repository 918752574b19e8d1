//! CLI command implementations

pub mod init;
pub mod seed;
pub mod serve;
pub mod status;
pub mod user;

use anyhow::Result;

use ecoquest::config::Config;
use ecoquest::store::StoreDb;

/// Open the database named by the configuration
fn open_store(config: &Config) -> Result<StoreDb> {
    StoreDb::open(&config.database_path())
}
