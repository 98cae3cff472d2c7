use crate::error::{MealError, Result};
use crate::storage::Storage;
use crate::tasks::{notify_from_env, NotifyParams};
use crate::types::{Ingredients, Meal};
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Extension, Json as AxumJson, Router,
};
use hyper::Server;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "meal-sms",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Creation payload. Both fields are required; validation fails closed on
/// anything missing or empty.
#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub meal: Option<String>,
    pub ingredients: Option<Ingredients>,
}

impl CreateMealRequest {
    fn into_meal(self) -> Result<Meal> {
        let name = match self.meal {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(MealError::MissingField("meal".to_string())),
        };
        let ingredients = match self.ingredients {
            Some(ingredients) if !ingredients.is_empty() => ingredients,
            _ => return Err(MealError::MissingField("ingredients".to_string())),
        };

        Ok(Meal { name, ingredients })
    }
}

async fn create_meal(
    Extension(storage): Extension<Arc<dyn Storage>>,
    AxumJson(request): AxumJson<CreateMealRequest>,
) -> impl IntoResponse {
    let meal = match request.into_meal() {
        Ok(meal) => meal,
        Err(e) => {
            warn!("Rejected meal creation: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "missing data" })),
            );
        }
    };

    match storage.add_meal(&meal).await {
        Ok(()) => {
            info!("meal: {}, ingredients: {:?}", meal.name, meal.ingredients);
            (
                StatusCode::OK,
                Json(json!({ "message": format!("{} successfully added.", meal.name) })),
            )
        }
        Err(e) => {
            error!("Failed to store meal: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": e.to_string() })),
            )
        }
    }
}

async fn list_meals(Extension(storage): Extension<Arc<dyn Storage>>) -> impl IntoResponse {
    match storage.read_all().await {
        Ok(meals) => (StatusCode::OK, Json(json!(meals))),
        Err(e) => {
            error!("Failed to read meals: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": e.to_string() })),
            )
        }
    }
}

async fn notify_once(
    Extension(storage): Extension<Arc<dyn Storage>>,
    AxumJson(params): AxumJson<NotifyParams>,
) -> axum::response::Response {
    match notify_from_env(storage, params).await {
        Ok(result) => AxumJson(result).into_response(),
        Err(e) => {
            error!("Notify run failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Create the HTTP server with all routes
pub fn create_server(storage: Arc<dyn Storage>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/meals", get(list_meals).post(create_meal))
        // Invoked-trigger analog of the scheduled notify event
        .route("/admin/notify-once", post(notify_once))
        .layer(Extension(storage))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(
    storage: Arc<dyn Storage>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app = create_server(storage);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("🚀 HTTP server running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("🍽  Meals API:    http://localhost:{port}/meals");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
