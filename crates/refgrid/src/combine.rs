//! Enumeration of reference-row combinations.

use indexmap::IndexMap;

use crate::resolve::MatchingRefValues;

/// One reference-row key chosen for every reference field, in field order.
pub type Combination = IndexMap<String, String>;

/// Lazy cartesian product over owned factors.
///
/// Yields every ordered selection of one element per factor, rightmost
/// factor varying fastest. No factors yields a single empty selection; any
/// empty factor yields nothing.
#[derive(Debug, Clone)]
pub struct CartesianProduct<T> {
    factors: Vec<Vec<T>>,
    indices: Vec<usize>,
    remaining: usize,
}

impl<T: Clone> CartesianProduct<T> {
    pub fn new(factors: Vec<Vec<T>>) -> Self {
        let remaining = factors
            .iter()
            .try_fold(1usize, |acc, f| acc.checked_mul(f.len()))
            .unwrap_or(usize::MAX);
        let indices = vec![0; factors.len()];
        Self {
            factors,
            indices,
            remaining,
        }
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.factors[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
    }
}

impl<T: Clone> Iterator for CartesianProduct<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self
            .indices
            .iter()
            .zip(&self.factors)
            .map(|(&i, factor)| factor[i].clone())
            .collect();
        self.remaining -= 1;
        self.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Eager cartesian product of `factors`.
pub fn cartesian_product<T: Clone>(factors: &[Vec<T>]) -> Vec<Vec<T>> {
    CartesianProduct::new(factors.to_vec()).collect()
}

/// Stream every combination of reference-row keys across all fields.
pub fn combinations_iter(values: &MatchingRefValues) -> impl Iterator<Item = Combination> + '_ {
    let fields: Vec<&str> = values.keys().map(String::as_str).collect();
    let factors: Vec<Vec<&str>> = values
        .values()
        .map(|rows| rows.keys().map(String::as_str).collect())
        .collect();

    CartesianProduct::new(factors).map(move |keys| {
        fields
            .iter()
            .zip(keys)
            .map(|(field, key)| (field.to_string(), key.to_string()))
            .collect()
    })
}

/// Every combination of reference-row keys across all fields.
///
/// `{}` yields `[{}]`; a field without keys yields `[]`.
pub fn generate_combinations(values: &MatchingRefValues) -> Vec<Combination> {
    combinations_iter(values).collect()
}

/// Cycles through combinations during row-by-row review.
#[derive(Debug, Clone, Default)]
pub struct CombinationCursor {
    combinations: Vec<Combination>,
    position: usize,
}

impl CombinationCursor {
    pub fn new(combinations: Vec<Combination>) -> Self {
        Self {
            combinations,
            position: 0,
        }
    }

    /// Build a cursor over all combinations of `values`.
    pub fn from_ref_values(values: &MatchingRefValues) -> Self {
        Self::new(generate_combinations(values))
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Zero-based index of the current combination.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Combination> {
        self.combinations.get(self.position)
    }

    /// Move to the next combination, wrapping to the first.
    pub fn advance(&mut self) -> Option<&Combination> {
        if self.is_empty() {
            return None;
        }
        self.position = (self.position + 1) % self.len();
        self.current()
    }

    /// Move to the previous combination, wrapping to the last.
    pub fn back(&mut self) -> Option<&Combination> {
        if self.is_empty() {
            return None;
        }
        self.position = self.position.checked_sub(1).unwrap_or(self.len() - 1);
        self.current()
    }

    /// Jump to `combination` if present. Returns whether it was found.
    pub fn seek(&mut self, combination: &Combination) -> bool {
        match self.combinations.iter().position(|c| c == combination) {
            Some(index) => {
                self.position = index;
                true
            }
            None => false,
        }
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }
}
