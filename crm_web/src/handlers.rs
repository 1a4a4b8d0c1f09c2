use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use crm::{
    domain::customer::{CustomerId, CustomerPayload, CustomerRepository},
    Assets,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    customers: Arc<dyn CustomerRepository>,
    assets: Arc<Assets>,
}

impl AppState {
    pub fn new(customers: impl CustomerRepository + 'static, assets: Assets) -> Self {
        Self {
            customers: Arc::new(customers),
            assets: Arc::new(assets),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/", get(index))
        .route("/postman", get(postman))
        .route("/customers", get(customer_index).post(customer_store))
        .route(
            "/customers/:id",
            get(customer_show)
                .put(customer_update)
                .delete(customer_delete),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn customer_id(id: Result<Path<i64>, PathRejection>) -> Result<CustomerId, ApiError> {
    id.map(|Path(id)| CustomerId::from(id))
        .map_err(|_| ApiError::InvalidIdentifier)
}

/// Content-Type に関係なくボディをJSONとして読む
fn customer_payload(body: &[u8]) -> Result<CustomerPayload, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

async fn ping() -> &'static str {
    "pong"
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    tokio::fs::read_to_string(&state.assets.index)
        .await
        .map(Html)
        .map_err(|_| ApiError::FileNotFound)
}

async fn postman(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = tokio::fs::read_to_string(&state.assets.postman)
        .await
        .map_err(|_| ApiError::FileNotFound)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

async fn customer_index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "data": state.customers.find_all().await }))
}

async fn customer_show(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let customer = state.customers.find_by_id(customer_id(id)?).await?;
    Ok(Json(json!({ "data": { "customer": customer } })))
}

async fn customer_store(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payload = customer_payload(&body)?;
    let customer = state.customers.create(payload.validate()?).await;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "data": { "customer": customer } })),
    ))
}

async fn customer_update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = customer_id(id)?;
    // ボディより先に存在確認する
    state.customers.find_by_id(id).await?;
    let payload = customer_payload(&body)?;
    let customer = state.customers.update(id, payload.validate()?).await?;
    Ok(Json(json!({ "data": customer })))
}

async fn customer_delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    state.customers.delete(customer_id(id)?).await?;
    Ok(Json(json!({ "message": "Customer deleted successfully!" })))
}
