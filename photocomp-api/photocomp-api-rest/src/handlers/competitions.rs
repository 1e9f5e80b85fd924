use axum::extract::{Path, Query, State};
use photocomp_common::{
    error::Error,
    listing::list_page,
    order::CompetitionSortField,
    state::CompetitionDbTrait,
};

use crate::{
    error::ApiError, params::ListingParams, response::ApiResponse, server::AppState,
};

use super::parse_competition_id;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<ApiResponse, ApiError> {
    let request = params.listing_request::<CompetitionSortField>(&state.config)?;
    let filter = params.competition_filter()?;

    let listing = list_page(&*state.db, request, &filter, &state.token_factory).await?;

    let mut response = ApiResponse::new()
        .with_data("competitions", &listing.rows)?
        .with_pagination(listing.pagination);
    if let Some(token) = listing.random_token {
        response = response.with_data("randomToken", token.to_token_string())?;
    }

    Ok(response)
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse, ApiError> {
    let competition_id = parse_competition_id(&id)?;

    let competition = state
        .db
        .get_competition(competition_id)
        .await?
        .ok_or_else(|| Error::not_found("Competition", competition_id))?;

    ApiResponse::new().with_data("competition", competition)
}

pub async fn stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse, ApiError> {
    if !state.config.include_restricted_data {
        return Err(ApiError::forbidden("Not allowed to view competition stats.")
            .with_user_message("You are not allowed to view competition stats."));
    }

    let competition_id = parse_competition_id(&id)?;
    let stats = state.db.get_competition_stats(competition_id).await?;

    ApiResponse::new().with_data("competitionStats", stats)
}
