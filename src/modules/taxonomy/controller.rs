use axum::{Json, extract::State, http::StatusCode};
use flashdeck_core::{AppError, ErrorResponse};
use flashdeck_models::{CategoriesResponse, Category, CreateLabelDto, Tag, TagsResponse};
use tracing::instrument;

use super::service::TaxonomyService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "All categories", body = CategoriesResponse)),
    tag = "Taxonomy"
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = TaxonomyService::list_categories(&state).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateLabelDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Taxonomy"
)]
#[instrument(skip(state, dto))]
pub async fn create_category(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLabelDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = TaxonomyService::create_category(&state, Some(&identity), &dto.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// List all tags
#[utoipa::path(
    get,
    path = "/api/tags",
    responses((status = 200, description = "All tags", body = TagsResponse)),
    tag = "Taxonomy"
)]
#[instrument(skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<TagsResponse>, AppError> {
    let tags = TaxonomyService::list_tags(&state).await?;
    Ok(Json(TagsResponse { tags }))
}

/// Create a tag
#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = CreateLabelDto,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Taxonomy"
)]
#[instrument(skip(state, dto))]
pub async fn create_tag(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLabelDto>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    let tag = TaxonomyService::create_tag(&state, Some(&identity), &dto.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}
