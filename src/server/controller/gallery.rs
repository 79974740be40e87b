use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::gallery_item::GalleryStatus;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::{
    model::{
        api::{default_entries, ErrorDto, PaginationParams},
        gallery::{
            CreateCommentDto, CreateGalleryItemDto, FavoriteResultDto, GalleryCommentDto,
            GalleryItemDetailsDto, GalleryItemDto, GallerySortDto, PaginatedGalleryItemsDto,
            VoteDto, VoteResultDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            activity::action,
            gallery::{CreateGalleryItemParam, GallerySort, ListGalleryItemsParam},
        },
        service::gallery::GalleryService,
        state::AppState,
    },
};

pub static GALLERY_TAG: &str = "gallery";

#[derive(Deserialize)]
pub struct GalleryQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub category: Option<String>,
    #[serde(default)]
    pub sort: GallerySortDto,
}

/// GET /api/gallery - List approved gallery items
///
/// Logged in callers get their own vote and favorite flag on every item.
#[utoipa::path(
    get,
    path = "/api/gallery",
    tag = GALLERY_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("category" = Option<String>, Query, description = "Only items in this category"),
        ("sort" = Option<GallerySortDto>, Query, description = "newest (default) or top")
    ),
    responses(
        (status = 200, description = "Successfully retrieved gallery items", body = PaginatedGalleryItemsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_items(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<GalleryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;

    let category = query
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let items = GalleryService::new(&state.db)
        .list(
            viewer.map(|v| v.id),
            ListGalleryItemsParam {
                status: GalleryStatus::Approved,
                category,
                sort: GallerySort::from(query.sort),
                page: query.page,
                per_page: query.entries,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(items.into_dto())))
}

/// GET /api/gallery/{id} - Get a gallery item with its comments
///
/// Pending and rejected items are only visible to their author and admins.
#[utoipa::path(
    get,
    path = "/api/gallery/{id}",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved gallery item", body = GalleryItemDetailsDto),
        (status = 404, description = "Gallery item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;

    let details = GalleryService::new(&state.db)
        .get(viewer.as_ref(), id)
        .await?;

    Ok((StatusCode::OK, Json(details.into_dto())))
}

/// POST /api/gallery - Submit a gallery item for moderation
#[utoipa::path(
    post,
    path = "/api/gallery",
    tag = GALLERY_TAG,
    request_body = CreateGalleryItemDto,
    responses(
        (status = 201, description = "Successfully submitted gallery item", body = GalleryItemDto),
        (status = 400, description = "Invalid gallery item data", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateGalleryItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let item = GalleryService::new(&state.db)
        .create(CreateGalleryItemParam::from_dto(user.id, payload)?)
        .await?;

    state
        .activity_logger
        .log(
            user.id,
            action::GALLERY_SUBMIT,
            json!({ "item_id": item.id, "title": item.title }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

/// DELETE /api/gallery/{id} - Delete a gallery item
///
/// # Authentication
/// Requires the item's author or an admin
#[utoipa::path(
    delete,
    path = "/api/gallery/{id}",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted gallery item"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is neither author nor admin", body = ErrorDto),
        (status = 404, description = "Gallery item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    GalleryService::new(&state.db).delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/gallery/{id}/vote - Toggle a vote
///
/// Voting the same way twice removes the vote; voting the other way switches it.
#[utoipa::path(
    post,
    path = "/api/gallery/{id}/vote",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID")
    ),
    request_body = VoteDto,
    responses(
        (status = 200, description = "Vote toggled", body = VoteResultDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Approved gallery item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn vote(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<VoteDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let outcome = GalleryService::new(&state.db)
        .vote(user.id, id, payload.vote_type.into())
        .await?;

    state
        .activity_logger
        .log(
            user.id,
            action::GALLERY_VOTE,
            json!({ "item_id": id, "vote": payload.vote_type }),
        )
        .await;

    Ok((StatusCode::OK, Json(outcome.into_dto())))
}

/// POST /api/gallery/{id}/favorite - Toggle a favorite
#[utoipa::path(
    post,
    path = "/api/gallery/{id}/favorite",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 200, description = "Favorite toggled", body = FavoriteResultDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Approved gallery item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let favorited = GalleryService::new(&state.db)
        .toggle_favorite(user.id, id)
        .await?;

    state
        .activity_logger
        .log(
            user.id,
            action::GALLERY_FAVORITE,
            json!({ "item_id": id, "favorited": favorited }),
        )
        .await;

    Ok((StatusCode::OK, Json(FavoriteResultDto { favorited })))
}

/// GET /api/gallery/favorites - List the caller's favorited items
#[utoipa::path(
    get,
    path = "/api/gallery/favorites",
    tag = GALLERY_TAG,
    responses(
        (status = 200, description = "Successfully retrieved favorites", body = Vec<GalleryItemDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_favorites(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let items = GalleryService::new(&state.db).get_favorites(user.id).await?;

    let items_dto: Vec<_> = items.into_iter().map(|item| item.into_dto()).collect();

    Ok((StatusCode::OK, Json(items_dto)))
}

/// POST /api/gallery/{id}/comments - Comment on an approved item
#[utoipa::path(
    post,
    path = "/api/gallery/{id}/comments",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Successfully added comment", body = GalleryCommentDto),
        (status = 400, description = "Comment empty or too long", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Approved gallery item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_comment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CreateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let comment = GalleryService::new(&state.db)
        .add_comment(user.id, id, &payload.content)
        .await?;

    state
        .activity_logger
        .log(
            user.id,
            action::GALLERY_COMMENT,
            json!({ "item_id": id, "comment_id": comment.id }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(comment.into_dto())))
}

/// DELETE /api/gallery/{id}/comments/{comment_id} - Delete a comment
///
/// # Authentication
/// Requires the comment's author or an admin
#[utoipa::path(
    delete,
    path = "/api/gallery/{id}/comments/{comment_id}",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID"),
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted comment"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is neither author nor admin", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    session: Session,
    Path((id, comment_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    GalleryService::new(&state.db)
        .delete_comment(&user, id, comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/gallery/pending - List items awaiting moderation
#[utoipa::path(
    get,
    path = "/api/admin/gallery/pending",
    tag = GALLERY_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Successfully retrieved pending items", body = PaginatedGalleryItemsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pending_items(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let items = GalleryService::new(&state.db)
        .list(
            None,
            ListGalleryItemsParam {
                status: GalleryStatus::Pending,
                category: None,
                sort: GallerySort::Newest,
                page: pagination.page,
                per_page: pagination.entries,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(items.into_dto())))
}

/// POST /api/admin/gallery/{id}/approve - Approve a pending item
#[utoipa::path(
    post,
    path = "/api/admin/gallery/{id}/approve",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 200, description = "Successfully approved item", body = GalleryItemDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Gallery item not found", body = ErrorDto),
        (status = 409, description = "Gallery item already moderated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let item = GalleryService::new(&state.db)
        .moderate(admin.id, id, true)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// POST /api/admin/gallery/{id}/reject - Reject a pending item
#[utoipa::path(
    post,
    path = "/api/admin/gallery/{id}/reject",
    tag = GALLERY_TAG,
    params(
        ("id" = i32, Path, description = "Gallery item ID")
    ),
    responses(
        (status = 200, description = "Successfully rejected item", body = GalleryItemDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "Gallery item not found", body = ErrorDto),
        (status = 409, description = "Gallery item already moderated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let item = GalleryService::new(&state.db)
        .moderate(admin.id, id, false)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}
