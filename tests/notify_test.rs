use async_trait::async_trait;
use meal_sms::error::{MealError, Result as MealResult};
use meal_sms::notifier::Notifier;
use meal_sms::storage::{InMemoryStorage, Storage};
use meal_sms::tasks::notify_run;
use meal_sms::types::{Ingredients, Meal, Quantity};
use std::sync::{Arc, Mutex};

/// Captures sent messages instead of delivering them
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, body: &str, to: &str) -> MealResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((body.to_string(), to.to_string()));
        Ok(())
    }
}

/// Rejects every send, like a transport with bad credentials
struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _body: &str, _to: &str) -> MealResult<()> {
        Err(MealError::Delivery {
            status: 401,
            message: "authentication failed".to_string(),
        })
    }
}

fn meal(name: &str, ingredients: &[(&str, &str)]) -> Meal {
    let mut map = Ingredients::new();
    for (ingredient, quantity) in ingredients {
        map.insert(ingredient.to_string(), Quantity::Text(quantity.to_string()));
    }
    Meal {
        name: name.to_string(),
        ingredients: map,
    }
}

#[tokio::test]
async fn notify_sends_the_formatted_report() {
    let storage = Arc::new(InMemoryStorage::new());
    storage
        .add_meal(&meal("Tacos", &[("tortilla", "4"), ("beef", "500g")]))
        .await
        .unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let result = notify_run(storage, notifier.clone(), "+15551234567", 3)
        .await
        .unwrap();

    assert_eq!(result.meals_in_catalog, 1);
    assert_eq!(result.meals_selected, 3);
    assert_eq!(result.lines, 6);
    assert_eq!(result.recipient, "+15551234567");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (body, to) = &sent[0];
    assert_eq!(to, "+15551234567");
    // One meal in the catalog, so all three draws repeat it
    assert_eq!(
        body,
        "tortilla : 4\nbeef : 500g\ntortilla : 4\nbeef : 500g\ntortilla : 4\nbeef : 500g\n"
    );
}

#[tokio::test]
async fn empty_catalog_fails_without_sending() {
    let storage = Arc::new(InMemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let result = notify_run(storage, notifier.clone(), "+15551234567", 4).await;

    assert!(matches!(result, Err(MealError::EmptyCatalog)));
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delivery_failure_propagates() {
    let storage = Arc::new(InMemoryStorage::new());
    storage
        .add_meal(&meal("Tacos", &[("tortilla", "4")]))
        .await
        .unwrap();

    let result = notify_run(storage, Arc::new(FailingNotifier), "+15551234567", 4).await;

    assert!(matches!(
        result,
        Err(MealError::Delivery { status: 401, .. })
    ));
}

#[tokio::test]
async fn zero_count_is_rejected() {
    let storage = Arc::new(InMemoryStorage::new());
    storage
        .add_meal(&meal("Tacos", &[("tortilla", "4")]))
        .await
        .unwrap();
    let notifier = Arc::new(RecordingNotifier::default());

    let result = notify_run(storage, notifier.clone(), "+15551234567", 0).await;

    assert!(matches!(result, Err(MealError::Config(_))));
    assert!(notifier.sent.lock().unwrap().is_empty());
}
