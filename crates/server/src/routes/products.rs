//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection}},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use fruitvendor_core::{Error, Product, ProductId};

use super::{blocking, path_id};
use crate::error::Result;
use crate::state::AppState;

/// Body of `GET /api/products`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Body of every response that carries a single product.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// Body of `POST /api/products` and `PATCH /api/products/{id}`.
///
/// The product's own JSON form never carries the token, so create requests
/// send it alongside.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProductRequest {
    pub product: Option<Product>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

/// Query string of `DELETE /api/products/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub token: String,
}

/// List all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let service = state.products();
    let products = blocking(move || service.products()).await?;
    Ok(Json(ProductsResponse { products }))
}

/// Fetch one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    path: std::result::Result<Path<ProductId>, PathRejection>,
) -> Result<Json<ProductResponse>> {
    let id = path_id(path, Error::ProductIdRequired)?;
    let service = state.products();
    let product = blocking(move || service.product(&id)).await?;
    Ok(Json(ProductResponse { product }))
}

/// Create a product. The stored `mod_time` is always assigned by the service.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>> {
    let Json(request) = payload?;
    let mut product = request.product.ok_or(Error::ProductRequired)?;
    product.token = request.token;
    product.mod_time = Product::default().mod_time;

    let service = state.products();
    let product = blocking(move || {
        service.create_product(&mut product)?;
        Ok(product)
    })
    .await?;

    Ok(Json(ProductResponse { product }))
}

/// Overwrite the descriptive fields of a product.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    path: std::result::Result<Path<ProductId>, PathRejection>,
    payload: std::result::Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>> {
    let id = path_id(path, Error::ProductIdRequired)?;
    let Json(request) = payload?;
    let product = request.product.ok_or(Error::ProductRequired)?;

    let service = state.products();
    let product = blocking(move || service.update_product(&id, &product)).await?;
    Ok(Json(ProductResponse { product }))
}

/// Delete a product.
#[instrument(skip(state, params))]
pub async fn delete(
    State(state): State<AppState>,
    path: std::result::Result<Path<ProductId>, PathRejection>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Value>> {
    let id = path_id(path, Error::ProductIdRequired)?;
    let service = state.products();
    blocking(move || service.delete_product(&id, &params.token)).await?;
    Ok(Json(json!({})))
}
