use std::{cmp::Ordering, fmt::Debug, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A field a resource can be listed by.
/// ---
/// The implementing enum *is* the whitelist: every variant is an allowed
/// sort key and `FromStr` maps the wire name onto it.
pub trait SortField: Copy + Debug + Eq + FromStr + Send + Sync + 'static {
    /// `true` for the `rand` pseudo-field.
    fn is_random(&self) -> bool;
}

/// Rows that can be compared on a single sort field.
pub trait SortKey<F> {
    fn compare_by(&self, other: &Self, field: F) -> Ordering;
}

/// Ordered mapping of sort field to direction.
/// Insertion order is tie-break priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder<F> {
    entries: Vec<(F, SortDirection)>,
}

impl<F> Default for SortOrder<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: SortField> SortOrder<F> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses raw sort tokens (`field` or `-field`) against the whitelist `F`.
    pub fn parse<S: AsRef<str>>(raw_tokens: &[S]) -> Result<Self, Error> {
        let mut order = Self::empty();

        for raw in raw_tokens {
            let raw = raw.as_ref();
            let (name, direction) = match raw.strip_prefix('-') {
                Some(stripped) => (stripped, SortDirection::Descending),
                None => (raw, SortDirection::Ascending),
            };

            let field = name
                .parse::<F>()
                .map_err(|_| Error::InvalidSortField(raw.to_string()))?;

            order.insert(field, direction);
        }

        Ok(order)
    }

    /// Parses the comma separated `sort` query value.
    /// ---
    /// `None` or a blank value yields an empty order.
    pub fn from_csv(raw: Option<&str>) -> Result<Self, Error> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(Self::empty());
        };

        if !raw
            .chars()
            .all(|c| c == '-' || c == ',' || c.is_ascii_alphabetic())
        {
            return Err(Error::InvalidInput(
                "sort may only contain the characters [-a-zA-Z,]".to_string(),
            ));
        }

        let tokens: Vec<&str> = raw.split(',').collect();
        Self::parse(&tokens)
    }

    /// A repeated field keeps its original priority and takes the newer direction.
    fn insert(&mut self, field: F, direction: SortDirection) {
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = direction,
            None => self.entries.push((field, direction)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, SortDirection)> + '_ {
        self.entries.iter().copied()
    }

    pub fn direction_of(&self, field: F) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, d)| *d)
    }

    pub fn contains_random(&self) -> bool {
        self.entries.iter().any(|(f, _)| f.is_random())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stable multi-key sort; rows equal on every key keep their incoming order.
pub fn sort_rows<F, R>(rows: &mut [R], order: &SortOrder<F>)
where
    F: SortField,
    R: SortKey<F>,
{
    if order.is_empty() {
        return;
    }

    rows.sort_by(|a, b| {
        order
            .iter()
            .map(|(field, direction)| direction.apply(a.compare_by(b, field)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}
