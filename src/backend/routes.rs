use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use card_benefits::{
    BenefitResult, CalcOptions, Catalog, Category, CreditCard, Error, FilterOptions, SortOption,
    SpendingProfile, evaluate, evaluate_all, rank, top,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    catalog: Arc<Catalog>,
}

impl AppState {
    pub(crate) fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/cards", get(list_cards))
        .route("/api/categories", get(list_categories))
        .route("/api/calculate", post(calculate))
        .route("/api/cards/:id/calculate", post(calculate_card))
        .with_state(state)
}

/// Wraps library errors so handlers can use `?`.
pub(crate) struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::UnknownCard(_) => StatusCode::NOT_FOUND,
            Error::Profile(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Request bodies are decoded here rather than by the `Json` extractor so a
/// malformed profile surfaces as `Error::Profile`.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(Error::Profile)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CalculateRequest {
    pub(crate) profile: SpendingProfile,
    #[serde(default)]
    pub(crate) options: CalcOptions,
    #[serde(default)]
    pub(crate) sort: SortOption,
    #[serde(default)]
    pub(crate) filter: Option<FilterOptions>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CardCalculateRequest {
    pub(crate) profile: SpendingProfile,
    #[serde(default)]
    pub(crate) options: CalcOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryView {
    key: &'static str,
    label: &'static str,
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_cards(State(state): State<AppState>) -> Json<Vec<CreditCard>> {
    Json(state.catalog.cards().to_vec())
}

async fn list_categories() -> Json<Vec<CategoryView>> {
    Json(
        Category::ALL
            .iter()
            .map(|category| CategoryView {
                key: category.key(),
                label: category.label(),
            })
            .collect(),
    )
}

async fn calculate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<BenefitResult>>, ApiError> {
    let request: CalculateRequest = parse_body(&body)?;
    let results = match &request.filter {
        Some(filter) => {
            let filtered = state.catalog.filter(filter);
            evaluate_all(filtered.cards(), &request.profile, &request.options)
        }
        None => evaluate_all(state.catalog.cards(), &request.profile, &request.options),
    };
    debug!(results = results.len(), sort = %request.sort, "calculated benefits");
    Ok(Json(top(rank(results, request.sort), request.limit)))
}

async fn calculate_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<BenefitResult>, ApiError> {
    let request: CardCalculateRequest = parse_body(&body)?;
    let card = state
        .catalog
        .get(&id)
        .ok_or_else(|| Error::UnknownCard(id.clone()))?;
    Ok(Json(evaluate(card, &request.profile, &request.options)))
}
