//! Per-column filter chains and row admission.
//!
//! Each column's ordered filter slots compile into a single predicate,
//! rebuilt eagerly whenever that column's slots mutate — never on use.
//! End users edit filters incrementally, so incomplete slots are expected:
//! they pass through during compilation, and a wholly incomplete filter set
//! makes [`GridState::filter_and_sort_items`] skip filtering defensively
//! rather than show an empty grid.

use std::sync::Arc;

use crate::column::{Column, FilterCondition, FilterOperator, FilterOption};
use crate::config::GridConfiguration;
use crate::rows::IndexedItem;
use crate::state::{GridState, missing_state};
use crate::value::CellValue;

/// Type alias for a column's compiled filter predicate.
pub type FilterChain = Arc<dyn Fn(&CellValue) -> bool + Send + Sync>;

/// The identity chain: admits every value.
pub(crate) fn always_true() -> FilterChain {
    Arc::new(|_| true)
}

/// Folds a column's filter slots, right to left, into a single predicate.
///
/// Invalid slots are skipped (pass-through); they never abort compilation.
/// `Or` slots combine as `chain(v) || predicate(v)`, everything else as
/// `chain(v) && predicate(v)`.
pub(crate) fn build_filter_chain(options: &[FilterOption]) -> FilterChain {
    let mut chain = always_true();
    let total = options.len();

    for (index, option) in options.iter().enumerate().rev() {
        if !option.is_valid(index + 1 == total) {
            continue;
        }

        // Validity guarantees both are present.
        let condition = option.condition.clone().expect("valid slot has a condition");
        let value = option.value.clone().expect("valid slot has a value");
        let rest = chain;

        chain = match option.operator {
            Some(FilterOperator::Or) => Arc::new(move |item_value: &CellValue| {
                rest(item_value) || condition.apply(item_value, &value)
            }),
            _ => Arc::new(move |item_value: &CellValue| {
                rest(item_value) && condition.apply(item_value, &value)
            }),
        };
    }

    chain
}

impl<T: 'static> GridState<T> {
    /// Appends an empty filter slot to a column.
    pub fn add_filter(&self, column: &Column<T>) {
        self.mutate_filters(column, |options| options.push(FilterOption::default()));
    }

    /// Sets the predicate template of one filter slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot index is out of bounds.
    pub fn set_filter_condition(
        &self,
        column: &Column<T>,
        slot: usize,
        condition: FilterCondition,
    ) {
        self.mutate_filters(column, |options| options[slot].condition = Some(condition));
    }

    /// Sets or clears the comparison value of one filter slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot index is out of bounds.
    pub fn set_filter_value(&self, column: &Column<T>, slot: usize, value: Option<CellValue>) {
        self.mutate_filters(column, |options| options[slot].value = value);
    }

    /// Sets or clears the operator joining one slot to the next.
    ///
    /// # Panics
    ///
    /// Panics if the slot index is out of bounds.
    pub fn set_filter_operator(
        &self,
        column: &Column<T>,
        slot: usize,
        operator: Option<FilterOperator>,
    ) {
        self.mutate_filters(column, |options| options[slot].operator = operator);
    }

    /// Removes one filter slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot index is out of bounds.
    pub fn remove_filter(&self, column: &Column<T>, slot: usize) {
        self.mutate_filters(column, |options| {
            options.remove(slot);
        });
    }

    /// A column's current filter slots.
    pub fn filter_options(&self, column: &Column<T>) -> Vec<FilterOption> {
        self.column_state(column.key()).filter_options
    }

    // Every filter-list mutation rebuilds that column's chain immediately;
    // validity stays a read-time check in `filter_and_sort_items`.
    fn mutate_filters(&self, column: &Column<T>, mutate: impl FnOnce(&mut Vec<FilterOption>)) {
        self.update_column_state(column.key(), |state| {
            mutate(&mut state.filter_options);
            state.filter_chain = build_filter_chain(&state.filter_options);
        });
        tracing::trace!(column = column.key(), "filter chain rebuilt");
    }

    /// Returns `true` if any column has at least one filter slot.
    pub fn has_active_filters(&self) -> bool {
        self.column_states
            .read()
            .values()
            .any(|state| !state.filter_options.is_empty())
    }

    /// Returns `true` if every configured filter slot is complete.
    ///
    /// An incomplete slot anywhere makes the whole filter set invalid;
    /// filtering is then skipped rather than risking an empty grid from a
    /// mid-edit filter.
    pub fn filters_are_valid(&self) -> bool {
        self.column_states.read().values().all(|state| {
            let total = state.filter_options.len();
            state
                .filter_options
                .iter()
                .enumerate()
                .all(|(index, option)| option.is_valid(index + 1 == total))
        })
    }

    /// Applies search, filters and sorting to a loaded item list.
    ///
    /// A row is admitted when (a) the search text is empty or some
    /// filterable column's stringified value contains it (trimmed,
    /// case-insensitive), and (b) every column's compiled chain accepts
    /// that column's raw value. The admitted rows are then sorted by the
    /// composed comparator.
    ///
    /// Fast paths: with no search text and no filters the input is returned
    /// sorted; with an invalid filter set the input is returned unmodified.
    pub fn filter_and_sort_items(
        &self,
        items: &[IndexedItem<T>],
        config: &GridConfiguration<T>,
    ) -> Vec<IndexedItem<T>>
    where
        T: Clone,
    {
        let search = self.search_value.read().trim().to_lowercase();
        let sort_chain = self.sort_chain();

        if search.is_empty() && !self.has_active_filters() {
            let mut sorted = items.to_vec();
            sorted.sort_by(|a, b| sort_chain(a, b));
            return sorted;
        }

        if !self.filters_are_valid() {
            tracing::debug!("incomplete filter configuration; returning items unfiltered");
            return items.to_vec();
        }

        // Snapshot the per-column admission data once; the row loop then
        // runs without lock reads or option clones.
        let passes: Vec<(Arc<Column<T>>, bool, Option<FilterChain>)> = {
            let states = self.column_states.read();
            config
                .columns()
                .into_iter()
                .map(|column| {
                    let state = states
                        .get(column.key())
                        .unwrap_or_else(|| missing_state(column.key()));
                    let searchable = column.options().filterable;
                    let chain = (!state.filter_options.is_empty())
                        .then(|| state.filter_chain.clone());
                    (column, searchable, chain)
                })
                .collect()
        };

        let mut admitted: Vec<IndexedItem<T>> = items
            .iter()
            .filter(|item| {
                let mut search_passed = search.is_empty();

                for (column, searchable, chain) in &passes {
                    let wants_search = !search_passed && *searchable;
                    if !wants_search && chain.is_none() {
                        continue;
                    }

                    let value = column.value(item.item());

                    if wants_search && value.contains_ignore_case(&search) {
                        search_passed = true;
                    }

                    if let Some(chain) = chain
                        && !chain(&value)
                    {
                        return false;
                    }
                }

                search_passed
            })
            .cloned()
            .collect();

        admitted.sort_by(|a, b| sort_chain(a, b));
        admitted
    }
}
