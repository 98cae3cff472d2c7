use crate::error::Result;
use crate::types::Meal;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Storage trait for the meal catalog
#[async_trait]
pub trait Storage: Send + Sync {
    /// Every meal currently stored, ingredients fully populated.
    /// No ordering guarantee.
    async fn read_all(&self) -> Result<Vec<Meal>>;

    /// Persist a meal, keyed by name. Re-adding a name overwrites the
    /// stored meal.
    async fn add_meal(&self, meal: &Meal) -> Result<()>;
}

/// In-memory storage implementation for development/testing
pub struct InMemoryStorage {
    meals: Arc<Mutex<HashMap<String, Meal>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            meals: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn read_all(&self) -> Result<Vec<Meal>> {
        let meals = self.meals.lock().unwrap();
        Ok(meals.values().cloned().collect())
    }

    async fn add_meal(&self, meal: &Meal) -> Result<()> {
        let mut meals = self.meals.lock().unwrap();
        meals.insert(meal.name.clone(), meal.clone());

        debug!("Stored meal: {}", meal.name);
        Ok(())
    }
}
