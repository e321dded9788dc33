//! Resource API Endpoints
//! Mission: Create / read / update / delete handlers shared by every collection

use super::{
    pagination::{Page, PageParams, PageRequest},
    Record, Resource, ResourceStore,
};
use crate::error::{Ack, ApiBody, ApiError, ApiPath, ApiQuery};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, info};

/// Handler state for one collection
pub struct ResourceState<R> {
    pub store: ResourceStore<R>,
    pub max_page_limit: Option<u32>,
}

impl<R> Clone for ResourceState<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            max_page_limit: self.max_page_limit,
        }
    }
}

impl<R: Resource> ResourceState<R> {
    pub fn new(store: ResourceStore<R>, max_page_limit: Option<u32>) -> Self {
        Self {
            store,
            max_page_limit,
        }
    }
}

/// GET /<collection> - every record
pub async fn list_all<R: Resource>(
    State(state): State<ResourceState<R>>,
) -> Result<Json<Vec<Record<R>>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// GET /<collection>?page=&limit= - one page plus the collection size
pub async fn list_page<R: Resource>(
    State(state): State<ResourceState<R>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<Page<Record<R>>>, ApiError> {
    let request = PageRequest::from_params(&params, state.max_page_limit)?;

    let items = state.store.page(request.limit, request.offset()).await?;
    let total_count = state.store.count().await?;

    debug!(
        table = R::TABLE,
        page = request.page,
        limit = request.limit,
        returned = items.len(),
        total_count,
        "Served page"
    );

    Ok(Json(Page { items, total_count }))
}

/// GET /<collection>/:id
pub async fn get_one<R: Resource>(
    State(state): State<ResourceState<R>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Record<R>>, ApiError> {
    state
        .store
        .find(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(R::NOT_FOUND))
}

/// POST /<collection>
pub async fn create<R: Resource>(
    State(state): State<ResourceState<R>>,
    ApiBody(fields): ApiBody<R>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.store.insert(&fields).await?;
    info!(table = R::TABLE, id, "Record created");

    Ok((StatusCode::CREATED, Ack::new("Data added successfully")))
}

/// PUT /<collection>/:id - full replacement; an unknown id is still a success
pub async fn update<R: Resource>(
    State(state): State<ResourceState<R>>,
    ApiPath(id): ApiPath<i64>,
    ApiBody(fields): ApiBody<R>,
) -> Result<Json<Ack>, ApiError> {
    let touched = state.store.update(id, &fields).await?;
    info!(table = R::TABLE, id, touched, "Record updated");

    Ok(Ack::new("Data updated successfully"))
}

/// DELETE /<collection>/:id - succeeds whether or not the row existed
pub async fn delete<R: Resource>(
    State(state): State<ResourceState<R>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Ack>, ApiError> {
    let removed = state.store.delete(id).await?;
    info!(table = R::TABLE, id, removed, "Record deleted");

    Ok(Ack::new("Data deleted successfully"))
}
