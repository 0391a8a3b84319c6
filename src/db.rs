use anyhow::{Context, Result};
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::store::{EmployeeStore, MemoryEmployeeStore, MySqlEmployeeStore};

pub async fn init_db(database_url: &str) -> Result<MySqlPool> {
    let pool = MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

/// Pick the employee store: MySQL when `DATABASE_URL` is set, memory otherwise.
pub async fn init_store(config: &Config) -> Result<Arc<dyn EmployeeStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = init_db(url).await?;
            info!("Using MySQL employee store");
            Ok(Arc::new(MySqlEmployeeStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set, employee records are kept in memory only");
            Ok(Arc::new(MemoryEmployeeStore::new()))
        }
    }
}
