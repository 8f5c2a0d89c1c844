//! JSON HTTP server.
//!
//! Exposes the catalog read-only over HTTP for a browser front end (map
//! page, collection list, detail and stats pages).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/wines` | Filtered listing (`type`, `favorite`, `region`, `country`, `keyword`) |
//! | `GET`  | `/wines/{id}` | One wine with pairings |
//! | `GET`  | `/facets` | Types, regions, countries |
//! | `GET`  | `/stats` | Collection statistics |
//! | `GET`  | `/map` | Markers and viewport, same filters as `/wines` |
//! | `GET`  | `/distance` | Haversine distance (`lat1`, `lng1`, `lat2`, `lng2`) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "invalid wine type 'blue'" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a statically hosted
//! front end can call the API.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::dataset::Catalog;
use crate::facets::{facets, Facets};
use crate::geo::{calculate_distance, validate_coordinates};
use crate::get::WineDetail;
use crate::map::{map_view, MapView};
use crate::models::{FilterCriteria, WineType};
use crate::search::{search_wines, WineListResponse};
use crate::stats::{collection_stats, current_year, CollectionStats};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}

/// Builds the router with all endpoints and middleware.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/wines", get(handle_list_wines))
        .route("/wines/{id}", get(handle_get_wine))
        .route("/facets", get(handle_facets))
        .route("/stats", get(handle_stats))
        .route("/map", get(handle_map))
        .route("/distance", get(handle_distance))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Binds to `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config, catalog: Catalog) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let wines = catalog.len();
    let app = router(AppState::new(config.clone(), catalog));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, wines, "serving wine catalog");
    println!("Cellar Map listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (`"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

// ============ Query parsing ============

/// Raw filter query string. Every value arrives as text so blank values
/// (`?type=`) mean "no constraint" instead of failing to parse.
#[derive(Debug, Default, Deserialize)]
pub struct WineQuery {
    #[serde(rename = "type")]
    pub wine_type: Option<String>,
    pub favorite: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub keyword: Option<String>,
}

impl TryFrom<WineQuery> for FilterCriteria {
    type Error = AppError;

    fn try_from(q: WineQuery) -> Result<Self, Self::Error> {
        let wine_type = match blank_to_none(q.wine_type.map(|t| t.trim().to_string())) {
            Some(t) => Some(t.parse::<WineType>().map_err(bad_request)?),
            None => None,
        };
        let favorite = match blank_to_none(q.favorite.map(|f| f.trim().to_string())) {
            Some(f) => Some(match f.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                other => {
                    return Err(bad_request(format!(
                        "invalid favorite '{}'. Must be true or false.",
                        other
                    )))
                }
            }),
            None => None,
        };

        Ok(FilterCriteria {
            wine_type,
            favorite,
            region: blank_to_none(q.region),
            country: blank_to_none(q.country),
            keyword: blank_to_none(q.keyword),
        })
    }
}

/// Empty strings mean "unconstrained". Text criteria are otherwise passed
/// through untouched so HTTP matches the library and CLI.
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /wines ============

async fn handle_list_wines(
    State(state): State<AppState>,
    query: Result<Query<WineQuery>, QueryRejection>,
) -> Result<Json<WineListResponse>, AppError> {
    let Query(query) = query?;
    let criteria = FilterCriteria::try_from(query)?;
    Ok(Json(search_wines(&state.catalog, &criteria)))
}

// ============ GET /wines/{id} ============

async fn handle_get_wine(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WineDetail>, AppError> {
    let wine = state
        .catalog
        .wine_by_id(&id)
        .ok_or_else(|| not_found(format!("wine not found: {}", id)))?;
    Ok(Json(WineDetail::new(wine, current_year())))
}

// ============ GET /facets ============

async fn handle_facets(State(state): State<AppState>) -> Response {
    // Serialized here, while the borrow of the catalog is alive.
    Json::<Facets<'_>>(facets(&state.catalog)).into_response()
}

// ============ GET /stats ============

async fn handle_stats(State(state): State<AppState>) -> Json<CollectionStats> {
    Json(collection_stats(state.catalog.all_wines(), current_year()))
}

// ============ GET /map ============

async fn handle_map(
    State(state): State<AppState>,
    query: Result<Query<WineQuery>, QueryRejection>,
) -> Result<Json<MapView>, AppError> {
    let Query(query) = query?;
    let criteria = FilterCriteria::try_from(query)?;
    let wines = crate::filter::filter_wines(state.catalog.all_wines(), &criteria);
    Ok(Json(map_view(wines, &state.config.map)))
}

// ============ GET /distance ============

#[derive(Debug, Deserialize)]
struct DistanceQuery {
    lat1: f64,
    lng1: f64,
    lat2: f64,
    lng2: f64,
}

#[derive(Serialize)]
struct DistanceResponse {
    km: f64,
}

async fn handle_distance(
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> Result<Json<DistanceResponse>, AppError> {
    let Query(q) = query?;
    for (lat, lng) in [(q.lat1, q.lng1), (q.lat2, q.lng2)] {
        if !validate_coordinates(lat, lng) {
            return Err(bad_request(format!(
                "invalid coordinates: lat {}, lng {}",
                lat, lng
            )));
        }
    }
    Ok(Json(DistanceResponse {
        km: calculate_distance(q.lat1, q.lng1, q.lat2, q.lng2),
    }))
}
