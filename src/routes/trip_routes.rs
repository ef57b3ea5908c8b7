use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{
    CreateTripPlanRequest, EndTripRequest, EndTripResponse, StartTripRequest,
    TripComparisonResponse, TripPlanResponse, TripResponse,
};
use crate::dto::truck_dto::{ApiResponse, LocationResponse};
use crate::services::routing_service::RoutingService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_trip))
        .route("/end", post(end_trip))
        .route("/plan", post(create_trip_plan))
        .route("/:id", get(get_trip))
        .route("/:id/route", get(get_trip_route))
        .route("/:id/comparison", get(get_trip_comparison))
}

async fn start_trip(
    State(state): State<AppState>,
    Json(request): Json<StartTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.hub.clone());
    let response = controller.start(request).await?;
    Ok(Json(response))
}

async fn end_trip(
    State(state): State<AppState>,
    Json(request): Json<EndTripRequest>,
) -> Result<Json<ApiResponse<EndTripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.hub.clone());
    let response = controller.end(request).await?;
    Ok(Json(response))
}

async fn create_trip_plan(
    State(state): State<AppState>,
    Json(request): Json<CreateTripPlanRequest>,
) -> Result<Json<ApiResponse<TripPlanResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.hub.clone());
    let routing = RoutingService::new(&state.config);
    let response = controller.create_plan(request, routing).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TripResponse>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.hub.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn get_trip_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.hub.clone());
    let response = controller.route(id).await?;
    Ok(Json(response))
}

async fn get_trip_comparison(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TripComparisonResponse>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.hub.clone());
    let response = controller.comparison(id).await?;
    Ok(Json(response))
}
