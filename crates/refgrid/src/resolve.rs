//! Resolution of `<name>_ref` fields against reference tables.
//!
//! A reference field `site_ref` resolves against the table whose schema name
//! is `site` (case-insensitive). Each row of that table is a reference row
//! keyed by its `reference` column. Columns that are constant across the
//! table carry nothing that tells reference rows apart and are pruned.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::config::RefgridConfig;
use crate::error::Result;
use crate::table::{ColumnUniqueCounts, RecordTables, Row, StatsCache, Table};

/// Reference field -> reference-row key -> pruned attributes.
pub type MatchingRefValues = IndexMap<String, IndexMap<String, Row>>;

/// Which collection is authoritative when several contain a matching table.
///
/// Indices refer to the collections handed to the resolver.
/// [`Refgrid`](crate::Refgrid) takes record indices and translates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveOrder {
    /// The first collection in caller order wins.
    #[default]
    FirstWins,
    /// The collection at this index is consulted first, then the rest in order.
    Authoritative(usize),
}

/// Resolves reference fields to their reference rows.
#[derive(Debug, Clone, Default)]
pub struct ReferenceResolver {
    config: RefgridConfig,
    order: ResolveOrder,
}

impl ReferenceResolver {
    pub fn new(config: RefgridConfig) -> Self {
        Self {
            config,
            order: ResolveOrder::default(),
        }
    }

    /// Set which collection is authoritative.
    pub fn with_order(mut self, order: ResolveOrder) -> Self {
        self.order = order;
        self
    }

    /// An empty statistics cache using this resolver's null sentinels.
    pub fn stats_cache(&self) -> StatsCache {
        StatsCache::with_sentinels(self.config.null_sentinels.clone())
    }

    /// Resolve every reference field against the first usable table in resolve order.
    ///
    /// Tables without rows have no statistics and are skipped in favour of
    /// later matches. Fields with no usable table are absent from the result.
    /// Missing values are judged by the sentinels of `cache`.
    pub fn find_matching_ref_values<S: AsRef<str>>(
        &self,
        ref_fields: &[S],
        collections: &[RecordTables],
        cache: &mut StatsCache,
    ) -> MatchingRefValues {
        let mut result = MatchingRefValues::new();

        for field in ref_fields {
            let field = field.as_ref();
            let base = self.config.reference_base(field).to_lowercase();

            let rows = self
                .matching_tables(&base, collections)
                .find_map(|table| match self.reference_rows(table, cache) {
                    Ok(rows) => Some(rows),
                    Err(e) => {
                        debug!(field, table = table.name(), error = %e, "skipping reference table");
                        None
                    }
                });

            match rows {
                Some(rows) => {
                    result.insert(field.to_string(), rows);
                }
                None => debug!(field, "no reference table found"),
            }
        }

        result
    }

    /// First table named `base` (lower-cased) in resolve order.
    pub fn find_table<'a>(&'a self, base: &'a str, collections: &'a [RecordTables]) -> Option<&'a Table> {
        self.matching_tables(base, collections).next()
    }

    /// Every table named `base` (lower-cased), in resolve order.
    pub fn matching_tables<'a>(
        &'a self,
        base: &'a str,
        collections: &'a [RecordTables],
    ) -> impl Iterator<Item = &'a Table> + 'a {
        self.ordered(collections).flat_map(move |tables| {
            tables
                .values()
                .filter(move |table| table.name().to_lowercase() == base)
        })
    }

    fn ordered<'a>(&'a self, collections: &'a [RecordTables]) -> impl Iterator<Item = &'a RecordTables> + 'a {
        let first = match self.order {
            ResolveOrder::FirstWins => None,
            ResolveOrder::Authoritative(index) => collections.get(index).map(|c| (index, c)),
        };
        let skip = first.map(|(index, _)| index);

        first
            .map(|(_, c)| c)
            .into_iter()
            .chain(
                collections
                    .iter()
                    .enumerate()
                    .filter(move |(i, _)| Some(*i) != skip)
                    .map(|(_, c)| c),
            )
    }

    /// Map each row's reference key to its informative attributes.
    ///
    /// Fails with [`RefgridError::InvalidTable`](crate::RefgridError::InvalidTable)
    /// when the table has no rows.
    pub fn reference_rows(&self, table: &Table, cache: &mut StatsCache) -> Result<IndexMap<String, Row>> {
        let counts = cache.get_or_compute(table)?;
        // A single row gives no evidence that a column is constant.
        let prune = table.row_count() > 1;

        let mut rows = IndexMap::new();
        for row in &table.data {
            let Some(key) = row.get(&self.config.reference_column).and_then(reference_key) else {
                debug!(table = table.name(), "row without reference key");
                continue;
            };
            rows.insert(key, self.pruned(row, counts, prune));
        }

        Ok(rows)
    }

    fn pruned(&self, row: &Row, counts: &ColumnUniqueCounts, prune: bool) -> Row {
        row.iter()
            .filter(|(column, _)| **column != self.config.reference_column)
            .filter(|(column, _)| !prune || counts.get(column.as_str()).is_none_or(|&count| count > 1))
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect()
    }
}

/// Render a reference value as a map key.
fn reference_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
