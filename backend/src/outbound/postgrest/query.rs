//! PostgREST read query builder.
//!
//! Encodes the small subset of the PostgREST query grammar the adapters use:
//! column projection, `eq` filters, single-column ordering, and row limits.

use std::fmt;

/// Sort direction for [`SelectQuery::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A read against one table.
///
/// # Examples
/// ```
/// use bikecare::outbound::postgrest::{Direction, SelectQuery};
///
/// let query = SelectQuery::from_table("bikes")
///     .eq("user_id", "rider-1")
///     .order_by("created_at", Direction::Descending)
///     .limit(10);
/// assert_eq!(
///     query.query_pairs(),
///     vec![
///         ("select".to_owned(), "*".to_owned()),
///         ("user_id".to_owned(), "eq.rider-1".to_owned()),
///         ("order".to_owned(), "created_at.desc".to_owned()),
///         ("limit".to_owned(), "10".to_owned()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    table: String,
    columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<u32>,
}

impl SelectQuery {
    /// Start a query selecting every column of `table`.
    #[must_use]
    pub fn from_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Restrict the projection to a comma-separated column list.
    #[must_use]
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    /// Keep rows whose `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filters.push((column.into(), format!("eq.{value}")));
        self
    }

    /// Order rows by one column.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    /// Return at most `limit` rows.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Query-string pairs in the order PostgREST receives them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);
        pairs.push((
            "select".to_owned(),
            self.columns.clone().unwrap_or_else(|| "*".to_owned()),
        ));
        pairs.extend(self.filters.iter().cloned());
        if let Some((column, direction)) = &self.order {
            pairs.push(("order".to_owned(), format!("{column}.{}", direction.as_str())));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        pairs
    }
}
