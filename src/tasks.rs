use crate::config::Config;
use crate::error::{MealError, Result};
use crate::notifier::{Notifier, TwilioNotifier};
use crate::shopping::{format_report, select_and_aggregate};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Default, Deserialize)]
pub struct NotifyParams {
    /// Meals to draw; falls back to the configured count
    pub count: Option<usize>,
}

/// Summary of one selection-and-notify run
#[derive(Debug, Serialize)]
pub struct NotifyRunResult {
    pub meals_in_catalog: usize,
    pub meals_selected: usize,
    pub lines: usize,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
}

/// Read the catalog, draw this week's meals, and text the shopping list.
///
/// The pipeline either completes end to end or fails as a whole; a failed
/// send surfaces to the caller and nothing is recorded as partially done.
#[instrument(skip(storage, notifier))]
pub async fn notify_run(
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    to: &str,
    count: usize,
) -> Result<NotifyRunResult> {
    if count == 0 {
        return Err(MealError::Config(
            "meal count must be at least 1".to_string(),
        ));
    }

    info!("Reading meal catalog");
    let catalog = storage.read_all().await?;

    // ThreadRng is !Send, so keep it scoped out of the await below
    let lines = {
        let mut rng = rand::thread_rng();
        select_and_aggregate(&catalog, count, &mut rng)?
    };
    let body = format_report(&lines);

    info!(
        "Selected {} meals from a catalog of {} ({} shopping list lines)",
        count,
        catalog.len(),
        lines.len()
    );

    notifier.send(&body, to).await?;

    Ok(NotifyRunResult {
        meals_in_catalog: catalog.len(),
        meals_selected: count,
        lines: lines.len(),
        recipient: to.to_string(),
        sent_at: Utc::now(),
    })
}

/// Resolve configuration and run the notify pipeline once, the way the
/// invoked trigger does. Configuration is read fresh per invocation.
pub async fn notify_from_env(
    storage: Arc<dyn Storage>,
    params: NotifyParams,
) -> Result<NotifyRunResult> {
    let config = Config::from_env()?;
    let notifier: Arc<dyn Notifier> = Arc::new(TwilioNotifier::new(&config.delivery));
    let count = params.count.unwrap_or(config.catalog.meal_count);

    notify_run(storage, notifier, &config.delivery.customer_phone, count).await
}
