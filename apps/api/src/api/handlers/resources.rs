use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::api::errors::ApiError;
use crate::api::middleware::ActiveSession;
use crate::api::state::AppState;
use crate::domain::repositories::RepositoryError;
use crate::domain::resource::{Properties, Resource, ResourceChanges};

/// Request body for creating a resource
#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    pub name: String,
    pub properties: Properties,
}

/// Request body for updating a resource
#[derive(Debug, Default, Deserialize)]
pub struct UpdateResourceRequest {
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// A resource as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub resource_id: String,
    pub name: String,
    pub properties: Properties,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        Self {
            resource_id: resource.id().to_string(),
            name: resource.name().to_string(),
            properties: resource.properties().clone(),
        }
    }
}

/// Response for listing resources
#[derive(Debug, Serialize)]
pub struct ResourceListResponse {
    pub items: Vec<ResourceResponse>,
    pub total: usize,
}

impl From<Vec<Resource>> for ResourceListResponse {
    fn from(resources: Vec<Resource>) -> Self {
        let items: Vec<ResourceResponse> = resources.into_iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn require_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        warn!("Resource ID is missing in the request");
        return Err(ApiError::bad_request("Resource ID is required."));
    }
    Ok(())
}

/// Looks up a resource that a write is about to target
async fn find_existing(state: &AppState, id: &str, failure: &str) -> Result<Resource, ApiError> {
    state
        .resources
        .get(id)
        .await
        .map_err(|e| {
            error!(id, error = %e, "Error fetching resource");
            ApiError::internal_server_error(failure)
        })?
        .ok_or_else(|| {
            warn!(id, "Resource does not exist");
            ApiError::not_found("Resource not found.")
        })
}

/// Create a new resource
///
/// POST /resources
pub async fn create_resource(
    State(state): State<AppState>,
    _session: ActiveSession,
    WithRejection(Json(req), _): WithRejection<Json<CreateResourceRequest>, ApiError>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    const FAILURE: &str = "Failed to create resource.";
    info!(name = %req.name, "Received request to create resource");

    let existing = state.resources.get_by_name(&req.name).await.map_err(|e| {
        error!(name = %req.name, error = %e, "Error checking for existing resource");
        ApiError::internal_server_error(FAILURE)
    })?;
    if existing.is_some() {
        warn!(name = %req.name, "Resource already exists");
        return Err(ApiError::conflict("Resource already exists."));
    }

    // id is assigned here, before the insert
    let resource = Resource::new(req.name, req.properties);

    let created = state.resources.create(&resource).await.map_err(|e| match e {
        RepositoryError::Conflict(detail) => {
            warn!(name = resource.name(), %detail, "Resource name taken concurrently");
            ApiError::conflict("Resource already exists.")
        }
        other => {
            error!(name = resource.name(), error = %other, "Failed to create resource");
            ApiError::internal_server_error(FAILURE)
        }
    })?;

    info!(id = created.id(), "Resource created successfully");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List all resources
///
/// GET /resources
pub async fn list_resources(
    State(state): State<AppState>,
    _session: ActiveSession,
) -> Result<Json<ResourceListResponse>, ApiError> {
    info!("Received request to fetch all resources");

    let resources = state.resources.list_all().await.map_err(|e| {
        error!(error = %e, "Error while fetching all resources");
        ApiError::internal_server_error("Failed to fetch all resources.")
    })?;

    info!(count = resources.len(), "Successfully retrieved resources");
    Ok(Json(resources.into()))
}

/// Get a resource by ID
///
/// GET /resources/:id
pub async fn get_resource(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(id): Path<String>,
) -> Result<Json<ResourceResponse>, ApiError> {
    info!(id = %id, "Received request to get resource");
    require_id(&id)?;

    let resource = find_existing(&state, &id, "Failed to retrieve resource.").await?;

    info!(id = %id, "Successfully retrieved resource");
    Ok(Json(resource.into()))
}

/// Update a resource
///
/// PUT /resources/:id
///
/// A supplied `properties` map replaces the stored map entirely.
pub async fn update_resource(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(id): Path<String>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateResourceRequest>, ApiError>,
) -> Result<Json<ResourceResponse>, ApiError> {
    const FAILURE: &str = "Failed to update resource.";
    info!(id = %id, "Received request to update resource");
    require_id(&id)?;

    find_existing(&state, &id, FAILURE).await?;

    let changes = ResourceChanges {
        properties: req.properties,
    };
    let updated = state
        .resources
        .update(&id, &changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound(_) => {
                warn!(id = %id, "Resource disappeared before update");
                ApiError::not_found("Resource not found.")
            }
            other => {
                error!(id = %id, error = %other, "Failed to update resource");
                ApiError::internal_server_error(FAILURE)
            }
        })?;

    info!(id = %id, "Resource updated successfully");
    Ok(Json(updated.into()))
}

/// Delete a resource
///
/// DELETE /resources/:id
pub async fn delete_resource(
    State(state): State<AppState>,
    _session: ActiveSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    const FAILURE: &str = "Failed to delete resource.";
    info!(id = %id, "Received request to delete resource");
    require_id(&id)?;

    find_existing(&state, &id, FAILURE).await?;

    state.resources.delete(&id).await.map_err(|e| match e {
        RepositoryError::NotFound(_) => {
            warn!(id = %id, "Resource disappeared before delete");
            ApiError::not_found("Resource not found.")
        }
        other => {
            error!(id = %id, error = %other, "Failed to delete resource");
            ApiError::internal_server_error(FAILURE)
        }
    })?;

    info!(id = %id, "Resource deleted successfully");
    Ok(Json(MessageResponse {
        message: "Resource deleted successfully.".to_string(),
    }))
}
