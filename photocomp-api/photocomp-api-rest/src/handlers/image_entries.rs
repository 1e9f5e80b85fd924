use axum::extract::{Path, Query, State};
use photocomp_common::{
    error::Error,
    image_entry::ImageEntryStatus,
    listing::list_page,
    order::{ImageEntrySortField, ImageEntryWithScoreSortField},
    state::ImageEntryDbTrait,
};

use crate::{
    error::ApiError,
    params::{ImageParams, ListingParams},
    response::ApiResponse,
    server::AppState,
    view::{ImageEntryView, ImageEntryWithScoreView},
};

use super::{parse_image_id, view_context};

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<ApiResponse, ApiError> {
    let request = params.listing_request::<ImageEntrySortField>(&state.config)?;
    let filter = params.image_entry_filter(&state.config)?;
    let ctx = view_context(&state, params.image_width(&state.config)?);

    let listing = list_page(&*state.db, request, &filter, &state.token_factory).await?;
    let views: Vec<_> = listing
        .rows
        .into_iter()
        .map(|entry| ImageEntryView::new(entry, &ctx))
        .collect();

    let mut response = ApiResponse::new()
        .with_data("imageEntries", views)?
        .with_pagination(listing.pagination);
    if let Some(token) = listing.random_token {
        response = response.with_data("randomToken", token.to_token_string())?;
    }

    Ok(response)
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ImageParams>,
) -> Result<ApiResponse, ApiError> {
    let image_id = parse_image_id(&id)?;
    let ctx = view_context(&state, params.image_width(&state.config)?);

    let entry = state
        .db
        .get_image_entry(image_id)
        .await?
        .ok_or_else(|| Error::not_found("ImageEntry", image_id))?;

    if !ctx.include_restricted_data && entry.status != ImageEntryStatus::Verified {
        return Err(ApiError::forbidden("Image entry is not verified.")
            .with_user_message("You are not allowed to view this image entry."));
    }

    ApiResponse::new().with_data("imageEntry", ImageEntryView::new(entry, &ctx))
}

pub async fn list_with_score(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<ApiResponse, ApiError> {
    let request = params.listing_request::<ImageEntryWithScoreSortField>(&state.config)?;
    let filter = params.image_entry_filter(&state.config)?;
    let ctx = view_context(&state, params.image_width(&state.config)?);

    let listing = list_page(&*state.db, request, &filter, &state.token_factory).await?;
    let views: Vec<_> = listing
        .rows
        .into_iter()
        .map(|row| ImageEntryWithScoreView::new(row, &ctx))
        .collect();

    let mut response = ApiResponse::new()
        .with_data("imageEntriesWithScore", views)?
        .with_pagination(listing.pagination);
    if let Some(token) = listing.random_token {
        response = response.with_data("randomToken", token.to_token_string())?;
    }

    Ok(response)
}
