use tracing::debug;

use crate::{
    common::{
        ordering::{SortField, SortOrder},
        pagination::{Pagination, StandardPagination},
        random_order::{RandomOrderToken, RandomOrderTokenFactory},
        shuffle,
    },
    error::Error,
    filter::RowFilter,
    order::{OrderMode, OrderSpec},
    state::RowSource,
};

/// One listing request after the query string has been validated.
#[derive(Clone, Debug)]
pub struct ListingRequest<'a, F> {
    pub sort_order: SortOrder<F>,
    /// Token echoed back by the client, if any.
    pub random_token: Option<&'a str>,
    pub pagination: Pagination,
}

#[derive(Clone, Debug)]
pub struct Listing<R> {
    pub rows: Vec<R>,
    pub pagination: StandardPagination,
    /// Set only when the rows were randomly ordered.
    pub random_token: Option<RandomOrderToken>,
}

/// Produces one page of `source`.
/// ---
/// The filtered total is read first so a fresh random token is sized
/// against it. Normal ordering is delegated to the source; random
/// ordering fetches the whole filtered set and slices its shuffle.
pub async fn list_page<S, F, Flt>(
    source: &S,
    request: ListingRequest<'_, F>,
    filter: &Flt,
    factory: &RandomOrderTokenFactory,
) -> Result<Listing<<S as RowSource<F, Flt>>::Row>, Error>
where
    S: RowSource<F, Flt> + ?Sized,
    F: SortField,
    Flt: RowFilter<<S as RowSource<F, Flt>>::Row> + Send + Sync,
{
    let total = source.count(filter).await?;
    let spec = OrderSpec::resolve(request.sort_order, request.random_token, factory, total);

    let rows = match spec.mode() {
        OrderMode::Normal => {
            source
                .fetch_ordered(&request.pagination, spec.sort_order(), filter)
                .await?
        }
        OrderMode::Random(token) => {
            let all = source.fetch_all(filter).await?;
            shuffle::page(&request.pagination, token, &all, filter)
        }
    };

    debug!(
        total,
        returned = rows.len(),
        random = spec.is_random(),
        "listing page"
    );

    Ok(Listing {
        pagination: StandardPagination::new(&request.pagination, rows.len(), total),
        random_token: spec.random_token().copied(),
        rows,
    })
}
