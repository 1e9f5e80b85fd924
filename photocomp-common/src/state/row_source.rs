use async_trait::async_trait;

use crate::{
    common::{ordering::SortOrder, pagination::Pagination},
    error::Error,
};

/// Filtered, orderable rows of one listable resource.
/// ---
/// `F` is the resource's sort field whitelist and `Flt` the filter
/// threaded through from the request. Implementations never interpret
/// `rand`: random ordering is materialized by the caller from `fetch_all`.
#[async_trait]
pub trait RowSource<F, Flt>: Send + Sync
where
    F: Send + Sync + 'static,
    Flt: Send + Sync,
{
    type Row: Clone + Send + Sync + 'static;

    /// Number of rows passing `filter`.
    async fn count(&self, filter: &Flt) -> Result<u64, Error>;

    /// One page of rows passing `filter`, ordered by `sort_order`.
    /// ---
    /// Fields are applied in insertion order of `sort_order`; rows equal
    /// on every field come back in the store's natural order.
    async fn fetch_ordered(
        &self,
        pagination: &Pagination,
        sort_order: &SortOrder<F>,
        filter: &Flt,
    ) -> Result<Vec<Self::Row>, Error>;

    /// Every row passing `filter`, in a stable natural order.
    /// ---
    /// This is the index space random order tokens are shuffled over, so
    /// two calls against unchanged data must return the same sequence.
    async fn fetch_all(&self, filter: &Flt) -> Result<Vec<Self::Row>, Error>;
}
