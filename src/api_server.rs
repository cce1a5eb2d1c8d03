// Axum API Server Module
//
// Purpose: JSON API, PDF/markdown downloads and HTML pages over the soil
// report pipeline (Nominatim geocoding + SoilGrids lookups)

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::crops::CROP_PROFILES;
use crate::error::{Result, SoilError};
use crate::recommendations::planting_schedule;
use crate::recommendations::schedule::scheduled_crops;
use crate::report::{export_pdf, markdown, SoilReport};
use crate::services::ReportService;
use crate::soil::{Location, SoilMeasurement};
use crate::web::handlers::pages;

const CACHE_CAPACITY: u64 = 10_000;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
    /// Normalised query text -> location
    pub locations: Cache<String, Location>,
    /// Coordinate key -> measured soil (estimates are never cached)
    pub measurements: Cache<String, SoilMeasurement>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing HTTP clients...");
        let service = Arc::new(ReportService::new(config)?);

        tracing::info!("Initializing Moka caches...");
        let locations = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();
        let measurements = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            service,
            locations,
            measurements,
        })
    }

    pub async fn locate(&self, query: &str) -> Result<Location> {
        let cache_key = query.trim().to_lowercase();
        if let Some(cached) = self.locations.get(&cache_key).await {
            tracing::debug!("Cache hit for location '{}'", cache_key);
            return Ok(cached);
        }

        let location = self.service.locate(query).await?;
        self.locations.insert(cache_key, location.clone()).await;
        Ok(location)
    }

    pub async fn measure(&self, location: &Location) -> SoilMeasurement {
        let cache_key = location.coordinate_key();
        if let Some(cached) = self.measurements.get(&cache_key).await {
            tracing::debug!("Cache hit for soil at {}", cache_key);
            return cached;
        }

        let measurement = self.service.measure(location).await;
        if !measurement.is_estimated() {
            self.measurements.insert(cache_key, measurement).await;
        }
        measurement
    }

    /// Resolve the request target and build its report.
    pub async fn report(&self, target: &ReportQuery) -> Result<SoilReport> {
        let location = self.resolve(target).await?;
        let measurement = self.measure(&location).await;
        Ok(SoilReport::build(location, measurement, chrono::Utc::now().date_naive()))
    }

    async fn resolve(&self, target: &ReportQuery) -> Result<Location> {
        match (target.lat, target.lon) {
            (Some(lat), Some(lon)) => match target.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Location::new(lat, lon, name),
                _ => Location::current(lat, lon),
            },
            _ => self.locate(target.q.as_deref().unwrap_or("")).await,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // JSON API
        .route("/api/geocode", get(geocode))
        .route("/api/soil", get(soil))
        .route("/api/report", get(report_json))
        .route("/api/report/pdf", get(report_pdf))
        .route("/api/report/markdown", get(report_markdown))
        .route("/api/crops", get(list_crops))
        .route("/api/crops/:name/schedule", get(crop_schedule))

        // HTML pages (HTMX fragments for hx-get requests)
        .route("/", get(pages::home_page))
        .route("/report", get(pages::report_page))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CoordinateQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Either a free-text `q` or explicit `lat`/`lon` (with optional `name`).
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReportQuery {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub name: Option<String>,
}

impl ReportQuery {
    /// Query string that reproduces this target, for download links.
    pub fn to_query_string(&self) -> String {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                let mut qs = format!("lat={}&lon={}", lat, lon);
                if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
                    qs.push_str(&format!("&name={}", urlencoding::encode(name)));
                }
                qs
            }
            _ => format!("q={}", urlencoding::encode(self.q.as_deref().unwrap_or(""))),
        }
    }
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn geocode(
    State(state): State<AppState>,
    Query(params): Query<GeocodeQuery>,
) -> std::result::Result<Json<Location>, AppError> {
    let location = state.locate(params.q.as_deref().unwrap_or("")).await?;
    Ok(Json(location))
}

async fn soil(
    State(state): State<AppState>,
    params: std::result::Result<Query<CoordinateQuery>, QueryRejection>,
) -> std::result::Result<Json<SoilMeasurement>, AppError> {
    let Query(params) = params?;
    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return Err(AppError::BadRequest(
            "Both lat and lon query parameters are required".to_string(),
        ));
    };
    let location = Location::current(lat, lon)?;
    Ok(Json(state.measure(&location).await))
}

async fn report_json(
    State(state): State<AppState>,
    target: std::result::Result<Query<ReportQuery>, QueryRejection>,
) -> std::result::Result<Json<SoilReport>, AppError> {
    let Query(target) = target?;
    Ok(Json(state.report(&target).await?))
}

async fn report_pdf(
    State(state): State<AppState>,
    target: std::result::Result<Query<ReportQuery>, QueryRejection>,
) -> std::result::Result<Response, AppError> {
    let Query(target) = target?;
    let report = state.report(&target).await?;
    let export = export_pdf(&report)?;

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.filename))
            .map_err(|e| AppError::Internal(format!("Invalid filename header: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

async fn report_markdown(
    State(state): State<AppState>,
    target: std::result::Result<Query<ReportQuery>, QueryRejection>,
) -> std::result::Result<Response, AppError> {
    let Query(target) = target?;
    let report = state.report(&target).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown::render(&report),
    )
        .into_response())
}

async fn list_crops() -> impl IntoResponse {
    Json(serde_json::json!({
        "crops": CROP_PROFILES,
        "scheduled": scheduled_crops(),
    }))
}

async fn crop_schedule(Path(name): Path<String>) -> impl IntoResponse {
    Json(planting_schedule(&name))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
    Internal(String),
}

impl From<SoilError> for AppError {
    fn from(err: SoilError) -> Self {
        let message = err.to_string();
        match err {
            SoilError::EmptyQuery | SoilError::InvalidCoordinates { .. } => {
                AppError::BadRequest(message)
            }
            SoilError::LocationNotFound(_) => AppError::NotFound(message),
            SoilError::Http(_)
            | SoilError::UpstreamStatus { .. }
            | SoilError::Decode(_)
            | SoilError::EmptySoilData => AppError::Upstream(message),
            SoilError::Pdf(_) | SoilError::Io(_) => AppError::Internal(message),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            tracing::error!("{}: {}", status, message);
        }

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let status = |e: SoilError| AppError::from(e).into_response().status();
        assert_eq!(status(SoilError::EmptyQuery), StatusCode::BAD_REQUEST);
        assert_eq!(status(SoilError::LocationNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(SoilError::UpstreamStatus { status: 503, url: "u".into() }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status(SoilError::Pdf("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_report_query_string() {
        let by_name = ReportQuery { q: Some("São Paulo, BR".into()), ..Default::default() };
        assert_eq!(by_name.to_query_string(), "q=S%C3%A3o%20Paulo%2C%20BR");

        let by_coords = ReportQuery {
            lat: Some(1.5),
            lon: Some(-2.25),
            name: Some("Farm A".into()),
            ..Default::default()
        };
        assert_eq!(by_coords.to_query_string(), "lat=1.5&lon=-2.25&name=Farm%20A");
    }
}
