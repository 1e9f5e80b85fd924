use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use photocomp_common::{
    error::Error,
    state::{CompetitionDbTrait, ImageEntryDbTrait, VoteDbTrait},
};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ERROR_VOTE_FROM_IP_ADDRESS_EXISTS, ERROR_VOTING_IS_NOT_OPEN_FOR_COMPETITION},
    extract::ClientIp,
    response::ApiResponse,
    server::AppState,
    view::ImageEntryWithScoreView,
};

use super::view_context;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub image_id: Uuid,
}

pub async fn create(
    State(state): State<AppState>,
    ClientIp(ip_address): ClientIp,
    body: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let Json(VoteRequest { image_id }) =
        body.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;

    let entry = state
        .db
        .get_image_entry(image_id)
        .await?
        .ok_or_else(|| Error::not_found("ImageEntry", image_id))?;

    let competition = state
        .db
        .get_competition(entry.competition_id)
        .await?
        .ok_or_else(|| Error::not_found("Competition", entry.competition_id))?;

    if !competition.is_voting_open(state.now()) {
        debug!(%image_id, competition_id = competition.competition_id, "voting closed");
        return Err(ApiError::forbidden(format!(
            "Voting for competition {} is not open.",
            competition.competition_id
        ))
        .with_user_message("Voting for this competition is not open.")
        .with_error_code(ERROR_VOTING_IS_NOT_OPEN_FOR_COMPETITION));
    }

    match state.db.add_vote(image_id, &ip_address).await {
        Ok(vote) => info!(vote_id = vote.vote_id, %image_id, "vote recorded"),
        Err(Error::Conflict(msg)) => {
            return Err(ApiError::forbidden(msg)
                .with_user_message("IP address has already voted for this image.")
                .with_error_code(ERROR_VOTE_FROM_IP_ADDRESS_EXISTS));
        }
        Err(e) => return Err(e.into()),
    }

    let scored = state
        .db
        .get_image_entry_with_score(image_id)
        .await?
        .ok_or_else(|| Error::not_found("ImageEntry", image_id))?;

    let ctx = view_context(&state, state.config.default_image_width);
    ApiResponse::new().with_data(
        "imageEntryWithScore",
        ImageEntryWithScoreView::new(scored, &ctx),
    )
}
