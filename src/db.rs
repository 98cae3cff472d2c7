use crate::error::{MealError, Result};
use crate::storage::Storage;
use crate::types::{Ingredients, Meal};
use async_trait::async_trait;
use libsql::{Builder, Connection, Database};
use std::env;
use tracing::{debug, info};

/// Meal catalog backed by a Turso/libSQL database
pub struct LibsqlStorage {
    db: Database,
    table: String,
}

impl LibsqlStorage {
    /// Connect to Turso using LIBSQL_URL and LIBSQL_AUTH_TOKEN. The table
    /// name comes from configuration; `run_migrations` only provisions the
    /// default table, a custom one is expected to exist already.
    pub async fn from_env(table: &str) -> Result<Self> {
        let url = env::var("LIBSQL_URL").map_err(|_| MealError::Database {
            message: "LIBSQL_URL environment variable not set".to_string(),
        })?;

        let auth_token = env::var("LIBSQL_AUTH_TOKEN").map_err(|_| MealError::Database {
            message: "LIBSQL_AUTH_TOKEN environment variable not set".to_string(),
        })?;

        info!("Connecting to Turso database at {}", url);

        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| MealError::Database {
                message: format!("Failed to connect to database: {e}"),
            })?;

        Ok(Self {
            db,
            table: table.to_string(),
        })
    }

    async fn get_connection(&self) -> Result<Connection> {
        self.db.connect().map_err(|e| MealError::Database {
            message: format!("Failed to get database connection: {e}"),
        })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");

        let conn = self.get_connection().await?;

        let migration_sql = include_str!("../migrations/001_create_meals.sql");

        conn.execute_batch(migration_sql)
            .await
            .map_err(|e| MealError::Database {
                message: format!("Failed to run migrations: {e}"),
            })?;

        info!("Database migrations completed successfully");
        Ok(())
    }
}

#[async_trait]
impl Storage for LibsqlStorage {
    async fn read_all(&self) -> Result<Vec<Meal>> {
        let conn = self.get_connection().await?;

        let sql = format!("SELECT meal, ingredients FROM {}", self.table);
        let mut rows = conn
            .query(&sql, libsql::params![])
            .await
            .map_err(|e| MealError::Database {
                message: format!("Failed to query meals: {e}"),
            })?;

        let mut meals = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| MealError::Database {
            message: format!("Failed to read row: {e}"),
        })? {
            let name: String = row.get(0).map_err(|e| MealError::Database {
                message: format!("Failed to get meal name: {e}"),
            })?;
            let raw: String = row.get(1).map_err(|e| MealError::Database {
                message: format!("Failed to get ingredients: {e}"),
            })?;

            let ingredients: Ingredients = serde_json::from_str(&raw)?;
            meals.push(Meal { name, ingredients });
        }

        debug!("Read {} meals from {}", meals.len(), self.table);
        Ok(meals)
    }

    async fn add_meal(&self, meal: &Meal) -> Result<()> {
        let conn = self.get_connection().await?;

        let ingredients = serde_json::to_string(&meal.ingredients)?;

        // Upsert keyed by meal name, keeping the original created_at
        let sql = format!(
            "INSERT OR REPLACE INTO {table} (meal, ingredients, created_at, updated_at) \
             VALUES (?, ?, COALESCE((SELECT created_at FROM {table} WHERE meal = ?), datetime('now')), datetime('now'))",
            table = self.table
        );
        conn.execute(
            &sql,
            libsql::params![meal.name.as_str(), ingredients, meal.name.as_str()],
        )
        .await
        .map_err(|e| MealError::Database {
            message: format!("Failed to upsert meal: {e}"),
        })?;

        debug!("Stored meal: {}", meal.name);
        Ok(())
    }
}
