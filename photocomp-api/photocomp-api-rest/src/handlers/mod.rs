pub mod competitions;
pub mod healthcheck;
pub mod image_entries;
pub mod votes;

use photocomp_common::error::Error;
use uuid::Uuid;

use crate::{params::parse_digits, server::AppState, view::ViewContext};

pub(crate) fn parse_competition_id(raw: &str) -> Result<i32, Error> {
    let id = parse_digits("competitionId", Some(raw), 0, i32::MAX as u64)?;
    Ok(id as i32)
}

pub(crate) fn parse_image_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Error::InvalidInput(format!("imageId [{raw}] is not valid")))
}

pub(crate) fn view_context(state: &AppState, image_width: u64) -> ViewContext<'_> {
    ViewContext {
        include_restricted_data: state.config.include_restricted_data,
        image_base_url: state.config.image_base_url.as_deref(),
        image_width,
    }
}

#[cfg(test)]
mod tests;
