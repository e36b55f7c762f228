//! Main Refgrid struct and public API.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combine::{generate_combinations, Combination};
use crate::config::RefgridConfig;
use crate::extract::TableExtractor;
use crate::input::Record;
use crate::resolve::{MatchingRefValues, ReferenceResolver, ResolveOrder};
use crate::table::{RecordTables, StatsCache};

/// Result of reconciling a set of records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Table collections, one per record that had usable tables.
    pub tables: Vec<RecordTables>,
    /// Position in the input records of each collection in `tables`.
    pub sources: Vec<usize>,
    /// Reference rows for every resolved reference field.
    pub ref_values: MatchingRefValues,
    /// Every combination of reference-row keys.
    pub combinations: Vec<Combination>,
}

/// Runs extraction, reference resolution and combination generation.
pub struct Refgrid {
    config: RefgridConfig,
    extractor: TableExtractor,
    resolver: ReferenceResolver,
    order: ResolveOrder,
    cache: StatsCache,
}

impl Refgrid {
    /// Create a Refgrid instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(RefgridConfig::default())
    }

    /// Create a Refgrid instance with custom configuration.
    pub fn with_config(config: RefgridConfig) -> Self {
        let resolver = ReferenceResolver::new(config.clone());
        let cache = resolver.stats_cache();

        Self {
            config,
            extractor: TableExtractor::new(),
            resolver,
            order: ResolveOrder::default(),
            cache,
        }
    }

    /// Set which record's tables are authoritative.
    ///
    /// `Authoritative(i)` names the record at position `i` of the input,
    /// whether or not earlier records carry tables. When that record has no
    /// usable tables the first collection wins.
    pub fn with_order(mut self, order: ResolveOrder) -> Self {
        self.order = order;
        self
    }

    pub fn config(&self) -> &RefgridConfig {
        &self.config
    }

    /// Statistics cache shared across calls.
    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Extract the table collections of `records`.
    pub fn tables(&self, records: &[Record]) -> Vec<RecordTables> {
        self.extractor.extract_tables(records, |_| true)
    }

    /// Resolve `ref_fields` against the tables of `records`.
    pub fn ref_values<S: AsRef<str>>(&mut self, ref_fields: &[S], records: &[Record]) -> MatchingRefValues {
        let (sources, tables) = self.sources(records);
        self.resolve(ref_fields, &tables, &sources)
    }

    /// Run the whole pipeline over `records`.
    pub fn reconcile<S: AsRef<str>>(&mut self, records: &[Record], ref_fields: &[S]) -> Reconciliation {
        let (sources, tables) = self.sources(records);
        let ref_values = self.resolve(ref_fields, &tables, &sources);
        let combinations = generate_combinations(&ref_values);

        info!(
            records = records.len(),
            collections = tables.len(),
            fields = ref_values.len(),
            combinations = combinations.len(),
            "reconciled records"
        );

        Reconciliation {
            tables,
            sources,
            ref_values,
            combinations,
        }
    }

    fn sources(&self, records: &[Record]) -> (Vec<usize>, Vec<RecordTables>) {
        self.extractor.extract_indexed(records, |_| true).into_iter().unzip()
    }

    fn resolve<S: AsRef<str>>(
        &mut self,
        ref_fields: &[S],
        tables: &[RecordTables],
        sources: &[usize],
    ) -> MatchingRefValues {
        let order = collection_order(self.order, sources);
        self.resolver
            .clone()
            .with_order(order)
            .find_matching_ref_values(ref_fields, tables, &mut self.cache)
    }
}

/// Translate a record-indexed order into one over extracted collections.
fn collection_order(order: ResolveOrder, sources: &[usize]) -> ResolveOrder {
    match order {
        ResolveOrder::FirstWins => ResolveOrder::FirstWins,
        ResolveOrder::Authoritative(record) => sources
            .iter()
            .position(|&source| source == record)
            .map_or(ResolveOrder::FirstWins, ResolveOrder::Authoritative),
    }
}

impl Default for Refgrid {
    fn default() -> Self {
        Self::new()
    }
}
