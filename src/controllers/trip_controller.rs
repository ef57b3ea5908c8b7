use crate::dto::trip_dto::{
    CreateTripPlanRequest, EndTripRequest, EndTripResponse, StartTripRequest,
    TripComparisonResponse, TripPlanResponse, TripResponse,
};
use crate::dto::truck_dto::{ApiResponse, LocationResponse};
use crate::models::trip_plan::TripPlan;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::plan_repository::PlanRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::services::broadcast_service::BroadcastHub;
use crate::services::routing_service::RoutingService;
use crate::services::trip_service::TripService;
use crate::utils::errors::AppError;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

pub struct TripController {
    pool: PgPool,
    hub: BroadcastHub,
}

impl TripController {
    pub fn new(pool: PgPool, hub: BroadcastHub) -> Self {
        Self { pool, hub }
    }

    pub async fn start(
        &self,
        request: StartTripRequest,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;

        let service = TripService::new(self.pool.clone(), self.hub.clone());
        let trip = service.start_trip(&request.vin, request.plan_id).await?;

        Ok(ApiResponse::success_with_message(
            trip.into(),
            "Trip iniciado exitosamente".to_string(),
        ))
    }

    pub async fn end(
        &self,
        request: EndTripRequest,
    ) -> Result<ApiResponse<EndTripResponse>, AppError> {
        let service = TripService::new(self.pool.clone(), self.hub.clone());
        let (trip, comparison) = service.end_trip(request.trip_id).await?;

        let response = EndTripResponse {
            trip: trip.into(),
            comparison: comparison.map(TripComparisonResponse::from),
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Trip finalizado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, trip_id: i64) -> Result<TripResponse, AppError> {
        let repository = TripRepository::new(self.pool.clone());
        let trip = repository
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip no encontrado".to_string()))?;

        Ok(trip.into())
    }

    /// Ruta recorrida: fixes del trip en orden ascendente de timestamp
    pub async fn route(&self, trip_id: i64) -> Result<Vec<LocationResponse>, AppError> {
        let repository = TripRepository::new(self.pool.clone());
        repository
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip no encontrado".to_string()))?;

        let locations = LocationRepository::new(self.pool.clone());
        let fixes = locations.fixes_for_trip(trip_id).await?;
        Ok(fixes.into_iter().map(LocationResponse::from).collect())
    }

    pub async fn comparison(&self, trip_id: i64) -> Result<TripComparisonResponse, AppError> {
        let plans = PlanRepository::new(self.pool.clone());
        let cmp = plans.find_comparison(trip_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("No comparison recorded for trip {}", trip_id))
        })?;

        Ok(cmp.into())
    }

    /// Crear un plan de ruta entre dos lugares por nombre, usando el
    /// proveedor externo de geocoding/ruteo
    pub async fn create_plan(
        &self,
        request: CreateTripPlanRequest,
        routing: RoutingService,
    ) -> Result<ApiResponse<TripPlanResponse>, AppError> {
        request.validate()?;

        let origin = routing
            .geocode_place(&request.origin_place)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;
        let destination = routing
            .geocode_place(&request.destination_place)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let (expected_distance_km, expected_duration_minutes) = routing
            .route_estimate(origin, destination)
            .await
            .map_err(|e| AppError::ExternalApi(e.to_string()))?;

        let expected_avg_speed_kmh =
            TripPlan::expected_speed_from(expected_distance_km, expected_duration_minutes);

        let plans = PlanRepository::new(self.pool.clone());
        let plan = plans
            .create(
                request.origin_place,
                request.destination_place,
                origin.0,
                origin.1,
                destination.0,
                destination.1,
                expected_distance_km,
                expected_duration_minutes,
                expected_avg_speed_kmh,
            )
            .await?;

        self.hub.publish(&json!({
            "type": "trip_plan_created",
            "plan_id": plan.plan_id,
            "origin_name": plan.origin_name.clone(),
            "destination_name": plan.destination_name.clone(),
            "expected_distance_km": plan.expected_distance_km,
            "expected_duration_minutes": plan.expected_duration_minutes,
            "expected_avg_speed_kmh": plan.expected_avg_speed_kmh,
        }));

        Ok(ApiResponse::success_with_message(
            plan.into(),
            "Plan de trip creado exitosamente".to_string(),
        ))
    }
}
