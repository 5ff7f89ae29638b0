use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        AuthorRef, BlogDocument, BlogPage, BlogStats, LikeStatus, RecommendationResponse,
        UserProfile, LISTING_EXCERPT_CHARS, RELATED_EXCERPT_CHARS,
    },
    services::{feed, BlogFilter},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub preferences: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    pub author_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    pub reader: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub tag: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub days: Option<u32>,
    pub limit: Option<usize>,
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Trims tags and drops empty ones
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Treats a blank query parameter as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn blog_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Blog {} not found", id))
}

fn user_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Create a reader profile
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    require_text("name", &request.name)?;

    let user = UserProfile::new(request.name.trim().to_string(), request.preferences);
    state.store.insert_user(user.clone()).await?;

    tracing::info!(user_id = %user.id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a reader profile
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;
    Ok(Json(user))
}

/// Replace a reader's preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdatePreferencesRequest>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .store
        .set_preferences(user_id, request.preferences)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    tracing::info!(
        user_id = %user_id,
        preferences = user.preferences.len(),
        "Updated preferences"
    );

    Ok(Json(user))
}

/// Personalized recommendations for a reader
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<LimitQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let limit = params
        .limit
        .unwrap_or(state.config.default_recommendation_limit);

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        limit,
        "Processing recommendation request"
    );

    let response = feed::personalized_feed(state.store.as_ref(), user_id, limit).await?;
    Ok(Json(response))
}

/// Most read recent blogs
pub async fn get_trending(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<TrendingQuery>,
) -> AppResult<Json<Value>> {
    let days = params.days.unwrap_or(state.config.trending_window_days);
    let limit = params.limit.unwrap_or(state.config.trending_limit);

    tracing::info!(request_id = %request_id, days, limit, "Processing trending request");

    let blogs = feed::trending_blogs(state.store.as_ref(), days, limit, Utc::now()).await?;
    Ok(Json(json!({ "trending_blogs": blogs })))
}

/// Blogs related to a blog, with a caller-chosen limit
pub async fn get_related(
    State(state): State<AppState>,
    Path(blog_id): Path<Uuid>,
    Query(params): Query<LimitQuery>,
) -> AppResult<Json<Value>> {
    let limit = params.limit.unwrap_or(state.config.related_limit);
    let blogs =
        feed::related_blogs(state.store.as_ref(), blog_id, limit, RELATED_EXCERPT_CHARS).await?;
    Ok(Json(json!({ "related_blogs": blogs })))
}

/// The fixed-size related list shown next to a blog
pub async fn get_blog_related(
    State(state): State<AppState>,
    Path(blog_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let blogs = feed::related_blogs(
        state.store.as_ref(),
        blog_id,
        state.config.blog_related_count,
        LISTING_EXCERPT_CHARS,
    )
    .await?;
    Ok(Json(json!({ "related_blogs": blogs })))
}

/// Publish a blog; its fingerprint is computed here
pub async fn create_blog(
    State(state): State<AppState>,
    Json(request): Json<CreateBlogRequest>,
) -> AppResult<(StatusCode, Json<BlogDocument>)> {
    require_text("title", &request.title)?;
    require_text("content", &request.content)?;

    let author = state
        .store
        .get_user(request.author_id)
        .await?
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown author {}", request.author_id)))?;

    let blog = BlogDocument::new(
        request.title.trim().to_string(),
        request.content,
        clean_tags(request.tags),
        AuthorRef {
            id: author.id,
            name: author.name,
        },
        Utc::now(),
    );
    state.store.insert_blog(blog.clone()).await?;

    tracing::info!(
        blog_id = %blog.id,
        keywords = blog.fingerprint.len(),
        "Created blog"
    );

    Ok((StatusCode::CREATED, Json(blog)))
}

/// List blogs, newest first, filtered and paginated
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<BlogPage>> {
    let filter = BlogFilter {
        tag: non_blank(params.tag),
        author: non_blank(params.author),
        search: non_blank(params.search),
    };
    let page = params.page.unwrap_or(1);
    let per_page = params.limit.unwrap_or(state.config.page_size);

    let blogs = feed::list_blogs(state.store.as_ref(), &filter, page, per_page).await?;
    Ok(Json(blogs))
}

/// Blog counts, including the caller's own when `user_id` is given
pub async fn get_blog_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> AppResult<Json<BlogStats>> {
    let stats = feed::blog_stats(state.store.as_ref(), params.user_id).await?;
    Ok(Json(stats))
}

/// Open a blog, counting the read and recording it for `reader`
pub async fn get_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<Uuid>,
    Query(params): Query<ReadQuery>,
) -> AppResult<Json<BlogDocument>> {
    let blog = feed::read_blog(state.store.as_ref(), blog_id, params.reader, Utc::now()).await?;
    Ok(Json(blog))
}

/// Edit a blog; only its author may do so
pub async fn update_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<Uuid>,
    Json(request): Json<UpdateBlogRequest>,
) -> AppResult<Json<BlogDocument>> {
    require_text("title", &request.title)?;
    require_text("content", &request.content)?;

    let blog = state
        .store
        .update_blog(
            blog_id,
            request.author_id,
            request.title.trim().to_string(),
            request.content,
            clean_tags(request.tags),
            Utc::now(),
        )
        .await?
        .ok_or_else(|| blog_not_found(blog_id))?;

    tracing::info!(blog_id = %blog_id, "Updated blog");

    Ok(Json(blog))
}

/// Delete a blog; only its author may do so
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<Uuid>,
    Query(params): Query<AuthorQuery>,
) -> AppResult<StatusCode> {
    let blog = state
        .store
        .get_blog(blog_id)
        .await?
        .ok_or_else(|| blog_not_found(blog_id))?;

    if blog.author.id != params.author_id {
        return Err(AppError::Forbidden(
            "Not authorized to delete this blog".to_string(),
        ));
    }

    state.store.delete_blog(blog_id).await?;
    tracing::info!(blog_id = %blog_id, "Deleted blog");

    Ok(StatusCode::NO_CONTENT)
}

/// Like or unlike a blog
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(blog_id): Path<Uuid>,
    Json(request): Json<LikeRequest>,
) -> AppResult<Json<LikeStatus>> {
    let blog = state
        .store
        .toggle_like(blog_id, request.user_id)
        .await?
        .ok_or_else(|| blog_not_found(blog_id))?;

    Ok(Json(LikeStatus {
        liked: blog.liked_by.contains(&request.user_id),
        likes: blog.like_count(),
    }))
}
