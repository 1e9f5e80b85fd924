mod fields;

use tracing::debug;

use crate::{
    common::{
        ordering::{SortField, SortOrder},
        random_order::{RandomOrderToken, RandomOrderTokenFactory},
    },
    error::Error,
};

pub use fields::{CompetitionSortField, ImageEntrySortField, ImageEntryWithScoreSortField};

/// How the rows of a listing must be materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderMode {
    /// The row source orders and slices natively.
    Normal,
    /// Rows come from a seeded shuffle; the token must be echoed back.
    Random(RandomOrderToken),
}

/// Validated ordering for one listing request of resource `F`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSpec<F> {
    sort_order: SortOrder<F>,
    mode: OrderMode,
}

impl<F: SortField> OrderSpec<F> {
    /// Parses the raw `sort` value and rejects `rand` mixed with other fields.
    /// ---
    /// Cheap and side-effect free: callers can validate before counting rows.
    pub fn parse_sort(raw_sort: Option<&str>) -> Result<SortOrder<F>, Error> {
        let sort_order = SortOrder::<F>::from_csv(raw_sort)?;

        if sort_order.contains_random() && sort_order.len() > 1 {
            return Err(Error::InvalidSortCombination);
        }

        Ok(sort_order)
    }

    /// Picks the mode for an already validated order.
    /// `item_count` is the current filtered total, used to size a fresh token.
    pub fn resolve(
        sort_order: SortOrder<F>,
        raw_token: Option<&str>,
        factory: &RandomOrderTokenFactory,
        item_count: u64,
    ) -> Self {
        let mode = if sort_order.contains_random() {
            let token = factory.resolve(raw_token, item_count);
            debug!(
                seed = token.seed(),
                item_count = token.item_count(),
                "random ordering"
            );
            OrderMode::Random(token)
        } else {
            OrderMode::Normal
        };

        Self { sort_order, mode }
    }

    /// Parses and resolves in one step.
    #[cfg(test)]
    fn from_params(
        raw_sort: Option<&str>,
        raw_token: Option<&str>,
        factory: &RandomOrderTokenFactory,
        item_count: u64,
    ) -> Result<Self, Error> {
        let sort_order = Self::parse_sort(raw_sort)?;
        Ok(Self::resolve(sort_order, raw_token, factory, item_count))
    }

    pub fn sort_order(&self) -> &SortOrder<F> {
        &self.sort_order
    }

    pub fn mode(&self) -> &OrderMode {
        &self.mode
    }

    pub fn is_random(&self) -> bool {
        matches!(self.mode, OrderMode::Random(_))
    }

    pub fn random_token(&self) -> Option<&RandomOrderToken> {
        match &self.mode {
            OrderMode::Random(token) => Some(token),
            OrderMode::Normal => None,
        }
    }
}
