use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{wardrobe_insights, wardrobe_stats, RecommendationEngine};
use crate::models::{
    ErrorResponse, GarmentId, HealthResponse, InsightsResponse, ItemRecommendationsResponse,
    RecommendRequest,
};
use crate::services::{GarmentRepository, RepositoryError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    /// Absent when no database is configured
    pub repository: Option<Arc<dyn GarmentRepository>>,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route(
            "/users/{user_id}/items/{item_id}/recommendations",
            web::get().to(item_recommendations),
        )
        .route("/users/{user_id}/insights", web::get().to(insights));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = match &state.repository {
        Some(repository) => repository.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend for a garment and wardrobe supplied in the body
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "item": { "id": 1, "name": "Oxford Shirt", "category": "Tops", "color": "white" },
///   "wardrobe": [ { "id": 2, "name": "Chinos", "category": "Bottoms", "color": "beige" } ]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Recommending for item {} against {} wardrobe items",
        req.item.id,
        req.wardrobe.len()
    );

    let result = state.engine.recommend(&req.item, &req.wardrobe).await;

    HttpResponse::Ok().json(result)
}

/// Recommend for a stored garment against the rest of its owner's wardrobe
///
/// GET /api/v1/users/{user_id}/items/{item_id}/recommendations
async fn item_recommendations(
    state: web::Data<AppState>,
    path: web::Path<(i64, GarmentId)>,
) -> impl Responder {
    let (user_id, item_id) = path.into_inner();

    let Some(repository) = &state.repository else {
        return no_repository();
    };

    let item = match repository.get_item(user_id, item_id).await {
        Ok(item) => item,
        Err(e) => return repository_failure("Failed to fetch item", e),
    };

    let wardrobe = match repository.list_items_excluding(user_id, item_id).await {
        Ok(wardrobe) => wardrobe,
        Err(e) => return repository_failure("Failed to fetch wardrobe", e),
    };

    tracing::info!(
        "Recommending for item {} of user {} against {} wardrobe items",
        item_id,
        user_id,
        wardrobe.len()
    );

    let recommendations = state.engine.recommend(&item, &wardrobe).await;

    HttpResponse::Ok().json(ItemRecommendationsResponse {
        item,
        recommendations,
    })
}

/// Wardrobe-level insights and statistics
///
/// GET /api/v1/users/{user_id}/insights
async fn insights(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let user_id = path.into_inner();

    let Some(repository) = &state.repository else {
        return no_repository();
    };

    let wardrobe = match repository.list_items(user_id).await {
        Ok(wardrobe) => wardrobe,
        Err(e) => return repository_failure("Failed to fetch wardrobe", e),
    };

    HttpResponse::Ok().json(InsightsResponse {
        user_id,
        insights: wardrobe_insights(&wardrobe),
        stats: wardrobe_stats(&wardrobe),
    })
}

fn no_repository() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "Wardrobe storage unavailable".to_string(),
        message: "No database is configured for stored wardrobes".to_string(),
        status_code: 503,
    })
}

fn repository_failure(context: &str, e: RepositoryError) -> HttpResponse {
    match e {
        RepositoryError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message,
            status_code: 404,
        }),
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: context.to_string(),
                message: other.to_string(),
                status_code: 500,
            })
        }
    }
}
