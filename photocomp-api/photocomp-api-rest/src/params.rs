use photocomp_common::{
    common::{
        ordering::{SortField, SortOrder},
        pagination::Pagination,
    },
    error::Error,
    filter::{CompetitionFilter, ImageEntryFilter},
    listing::ListingRequest,
    order::OrderSpec,
};
use serde::Deserialize;

use crate::server::RestConfig;

/// Longest integer accepted for any numeric query value.
const MAX_DIGITS: usize = 15;
const MAX_OFFSET: u64 = 9_999_999_999_999_999;
const MAX_IMAGE_WIDTH: u64 = 1000;

const MAX_RANDOM_TOKEN_CHARS: usize = 512;
const MAX_STATUS_FILTER_CHARS: usize = 128;
const MAX_COMPETITION_ID_FILTER_CHARS: usize = 1024;

/// Raw query string of a listing endpoint.
/// ---
/// Everything stays a string until validated so that the error names the
/// offending parameter instead of surfacing a generic deserialize failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub sort: Option<String>,
    pub random_token: Option<String>,
    pub renew_random_token: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub status_filter: Option<String>,
    pub competition_id_filter: Option<String>,
    pub image_width: Option<String>,
}

impl ListingParams {
    pub fn pagination(&self, config: &RestConfig) -> Result<Pagination, Error> {
        let offset = parse_digits("offset", self.offset.as_deref(), 0, MAX_OFFSET)?;
        let limit = parse_digits(
            "limit",
            self.limit.as_deref(),
            config.default_limit,
            config.max_limit,
        )?;

        Ok(Pagination::new(offset, limit))
    }

    /// The token to resume from; dropped when the client asks for a new view.
    pub fn random_token(&self) -> Result<Option<&str>, Error> {
        let renew = self
            .renew_random_token
            .as_deref()
            .is_some_and(|v| v != "false");
        if renew {
            return Ok(None);
        }

        check_length(
            "randomToken",
            self.random_token.as_deref(),
            MAX_RANDOM_TOKEN_CHARS,
        )
    }

    pub fn listing_request<F: SortField>(
        &self,
        config: &RestConfig,
    ) -> Result<ListingRequest<'_, F>, Error> {
        let sort_order: SortOrder<F> = OrderSpec::<F>::parse_sort(self.sort.as_deref())?;

        Ok(ListingRequest {
            sort_order,
            random_token: self.random_token()?,
            pagination: self.pagination(config)?,
        })
    }

    pub fn competition_filter(&self) -> Result<CompetitionFilter, Error> {
        let statuses = check_length(
            "statusFilter",
            self.status_filter.as_deref(),
            MAX_STATUS_FILTER_CHARS,
        )?;
        CompetitionFilter::from_params(statuses)
    }

    /// Without access to restricted data only verified entries are listed,
    /// whatever status filter was requested.
    pub fn image_entry_filter(&self, config: &RestConfig) -> Result<ImageEntryFilter, Error> {
        let competition_ids = check_length(
            "competitionIdFilter",
            self.competition_id_filter.as_deref(),
            MAX_COMPETITION_ID_FILTER_CHARS,
        )?;
        let statuses = check_length(
            "statusFilter",
            self.status_filter.as_deref(),
            MAX_STATUS_FILTER_CHARS,
        )?;

        let filter = ImageEntryFilter::from_params(competition_ids, statuses)?;
        if config.include_restricted_data {
            Ok(filter)
        } else {
            Ok(ImageEntryFilter::only_verified(filter.competition_ids))
        }
    }

    pub fn image_width(&self, config: &RestConfig) -> Result<u64, Error> {
        parse_digits(
            "imageWidth",
            self.image_width.as_deref(),
            config.default_image_width,
            MAX_IMAGE_WIDTH,
        )
    }
}

/// Query string of the single entry endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParams {
    pub image_width: Option<String>,
}

impl ImageParams {
    pub fn image_width(&self, config: &RestConfig) -> Result<u64, Error> {
        parse_digits(
            "imageWidth",
            self.image_width.as_deref(),
            config.default_image_width,
            MAX_IMAGE_WIDTH,
        )
    }
}

/// Parses an unsigned integer made of ASCII digits only.
/// An absent or empty value yields `default`.
pub(crate) fn parse_digits(
    name: &str,
    raw: Option<&str>,
    default: u64,
    max: u64,
) -> Result<u64, Error> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(default);
    };

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "{name} may only contain digits"
        )));
    }

    if raw.len() > MAX_DIGITS {
        return Err(Error::InvalidInput(format!(
            "{name} may have at most {MAX_DIGITS} digits"
        )));
    }

    let value: u64 = raw
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{name} is not a number")))?;
    if value > max {
        return Err(Error::InvalidInput(format!(
            "{name} must not be larger than {max}"
        )));
    }

    Ok(value)
}

fn check_length<'a>(
    name: &str,
    raw: Option<&'a str>,
    max_chars: usize,
) -> Result<Option<&'a str>, Error> {
    match raw {
        Some(raw) if raw.len() > max_chars => Err(Error::InvalidInput(format!(
            "{name} may have at most {max_chars} characters"
        ))),
        _ => Ok(raw),
    }
}

#[cfg(test)]
mod tests {
    use photocomp_common::{image_entry::ImageEntryStatus, order::ImageEntrySortField};

    use super::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("limit", None, 20, 1000).unwrap(), 20);
        assert_eq!(parse_digits("limit", Some(""), 20, 1000).unwrap(), 20);
        assert_eq!(parse_digits("limit", Some("1000"), 20, 1000).unwrap(), 1000);

        for raw in ["-1", "1.5", "ten", " 3"] {
            let err = parse_digits("limit", Some(raw), 20, 1000).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(m) if m.contains("digits")), "{raw}");
        }

        assert!(parse_digits("limit", Some("1001"), 20, 1000).is_err());
        assert!(parse_digits("offset", Some("1234567890123456"), 0, MAX_OFFSET).is_err());
        assert_eq!(
            parse_digits("offset", Some("123456789012345"), 0, MAX_OFFSET).unwrap(),
            123_456_789_012_345
        );
    }

    #[test]
    fn test_pagination_defaults() {
        let params = ListingParams::default();
        assert_eq!(
            params.pagination(&RestConfig::default()).unwrap(),
            Pagination::new(0, 20)
        );
    }

    #[test]
    fn test_renew_discards_token() {
        let mut params = ListingParams {
            random_token: Some("{}".into()),
            renew_random_token: Some("true".into()),
            ..Default::default()
        };
        assert_eq!(params.random_token().unwrap(), None);

        params.renew_random_token = Some("false".into());
        assert_eq!(params.random_token().unwrap(), Some("{}"));

        params.random_token = Some("x".repeat(MAX_RANDOM_TOKEN_CHARS + 1));
        assert!(params.random_token().is_err());
    }

    #[test]
    fn test_listing_request_validates_sort() {
        let config = RestConfig::default();
        let params = ListingParams {
            sort: Some("rand,firstName".into()),
            ..Default::default()
        };
        let err = params
            .listing_request::<ImageEntrySortField>(&config)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSortCombination));
    }

    #[test]
    fn test_image_entry_filter_is_restricted_by_default() {
        let params = ListingParams {
            status_filter: Some("STATUS_BLOCKED".into()),
            competition_id_filter: Some("2".into()),
            ..Default::default()
        };

        let public = params.image_entry_filter(&RestConfig::default()).unwrap();
        assert_eq!(public.statuses, Some(vec![ImageEntryStatus::Verified]));
        assert_eq!(public.competition_ids, Some(vec![2]));

        let admin = RestConfig {
            include_restricted_data: true,
            ..Default::default()
        };
        let full = params.image_entry_filter(&admin).unwrap();
        assert_eq!(full.statuses, Some(vec![ImageEntryStatus::Blocked]));
    }
}
