//! Multi-column sort specification and the composed comparator.
//!
//! The comparator is rebuilt eagerly whenever the sort specification
//! changes, never lazily per compare: sorting a large item list must not pay
//! a rebuild cost per comparison.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::column::Column;
use crate::rows::IndexedItem;
use crate::state::GridState;

/// Direction of one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// One entry in the ordered sort precedence list.
pub(crate) struct SortOption<T> {
    pub(crate) column: Arc<Column<T>>,
    pub(crate) direction: SortDirection,
}

impl<T> Clone for SortOption<T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            direction: self.direction,
        }
    }
}

/// Type alias for the composed sort comparator.
///
/// Compares by each sort key in precedence order; remaining ties always
/// break by ascending row index, so the order is total and stable even with
/// no explicit sort.
pub(crate) type SortChain<T> =
    Arc<dyn Fn(&IndexedItem<T>, &IndexedItem<T>) -> Ordering + Send + Sync>;

/// Composes the sort comparator for the given precedence list.
///
/// Direction flips the comparison result, not the input order. Value
/// comparison follows each column's native value type (see
/// [`CellValue::compare`](crate::CellValue::compare)).
pub(crate) fn build_sort_chain<T: 'static>(options: &[SortOption<T>]) -> SortChain<T> {
    let options = options.to_vec();
    Arc::new(move |a: &IndexedItem<T>, b: &IndexedItem<T>| {
        for option in &options {
            let ordering = option
                .column
                .value(a.item())
                .compare(&option.column.value(b.item()));
            let ordering = match option.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.row_index().cmp(&b.row_index())
    })
}

impl<T: 'static> GridState<T> {
    /// Cycles a column through its sort states: unset → ascending →
    /// descending → unset.
    ///
    /// A new sort key appends at the tail of the precedence list; a column
    /// already sorted advances through its own states in place, never
    /// promoted to primary. The composed comparator is rebuilt on every
    /// change.
    pub fn toggle_sort(&self, column: &Arc<Column<T>>) {
        let mut options = self.sort_options.write();

        match options
            .iter()
            .position(|option| option.column.key() == column.key())
        {
            None => options.push(SortOption {
                column: column.clone(),
                direction: SortDirection::Ascending,
            }),
            Some(index) => match options[index].direction {
                SortDirection::Ascending => {
                    options[index].direction = SortDirection::Descending;
                }
                SortDirection::Descending => {
                    options.remove(index);
                }
            },
        }

        let chain = build_sort_chain(&options);
        drop(options);
        *self.sort_chain.write() = chain;
        tracing::debug!(column = column.key(), "sort specification changed, comparator rebuilt");
    }

    /// Removes every sort key and restores the row-index order.
    pub fn clear_sort(&self) {
        self.sort_options.write().clear();
        *self.sort_chain.write() = build_sort_chain::<T>(&[]);
    }

    /// The active sort keys in precedence order.
    pub fn sort_options(&self) -> Vec<(String, SortDirection)> {
        self.sort_options
            .read()
            .iter()
            .map(|option| (option.column.key().to_string(), option.direction))
            .collect()
    }

    /// Reports whether a column is sorted: its direction plus its 1-based
    /// position in the precedence list, for header indicators.
    pub fn is_sorting_on(&self, key: &str) -> Option<(SortDirection, usize)> {
        let options = self.sort_options.read();
        options
            .iter()
            .position(|option| option.column.key() == key)
            .map(|index| (options[index].direction, index + 1))
    }

    /// The current composed comparator.
    pub(crate) fn sort_chain(&self) -> SortChain<T> {
        self.sort_chain.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfiguration;
    use crate::rows::inject_row_indexes;

    #[derive(Clone)]
    struct Item {
        name: String,
        age: f64,
    }

    fn setup() -> (GridConfiguration<Item>, Vec<IndexedItem<Item>>) {
        let mut config = GridConfiguration::new();
        config.add_text_column("name", |item: &Item| item.name.clone());
        config.add_number_column("age", |item: &Item| item.age);

        let items = inject_row_indexes(vec![
            Item {
                name: "Charlie".to_string(),
                age: 35.0,
            },
            Item {
                name: "Alice".to_string(),
                age: 30.0,
            },
            Item {
                name: "Bob".to_string(),
                age: 30.0,
            },
            Item {
                name: "Alice".to_string(),
                age: 20.0,
            },
        ]);

        (config, items)
    }

    fn sorted_names(state: &GridState<Item>, items: &[IndexedItem<Item>]) -> Vec<String> {
        let chain = state.sort_chain();
        let mut items = items.to_vec();
        items.sort_by(|a, b| chain(a, b));
        items.iter().map(|i| i.item().name.clone()).collect()
    }

    #[test]
    fn test_default_chain_orders_by_row_index() {
        let (config, items) = setup();
        let state = config.default_state();

        let names = sorted_names(&state, &items);
        assert_eq!(names, vec!["Charlie", "Alice", "Bob", "Alice"]);
    }

    #[test]
    fn test_toggle_cycle_returns_to_unset() {
        let (config, _) = setup();
        let state = config.default_state();
        let name = config.column("name").unwrap();

        state.toggle_sort(&name);
        assert_eq!(
            state.is_sorting_on("name"),
            Some((SortDirection::Ascending, 1))
        );

        state.toggle_sort(&name);
        assert_eq!(
            state.is_sorting_on("name"),
            Some((SortDirection::Descending, 1))
        );

        state.toggle_sort(&name);
        assert_eq!(state.is_sorting_on("name"), None);
        assert!(state.sort_options().is_empty());
    }

    #[test]
    fn test_ascending_then_descending() {
        let (config, items) = setup();
        let state = config.default_state();
        let age = config.column("age").unwrap();

        state.toggle_sort(&age);
        assert_eq!(
            sorted_names(&state, &items),
            vec!["Alice", "Alice", "Bob", "Charlie"]
        );

        state.toggle_sort(&age);
        assert_eq!(
            sorted_names(&state, &items),
            vec!["Charlie", "Alice", "Bob", "Alice"]
        );
    }

    #[test]
    fn test_second_key_appends_at_tail() {
        let (config, items) = setup();
        let state = config.default_state();
        let age = config.column("age").unwrap();
        let name = config.column("name").unwrap();

        state.toggle_sort(&age);
        state.toggle_sort(&name);

        assert_eq!(
            state.sort_options(),
            vec![
                ("age".to_string(), SortDirection::Ascending),
                ("name".to_string(), SortDirection::Ascending),
            ]
        );
        assert_eq!(state.is_sorting_on("name"), Some((SortDirection::Ascending, 2)));

        // Age stays the primary key; name breaks the 30/30 tie.
        assert_eq!(
            sorted_names(&state, &items),
            vec!["Alice", "Alice", "Bob", "Charlie"]
        );

        // Advancing the existing age key flips it in place, not to the tail.
        state.toggle_sort(&age);
        assert_eq!(
            state.sort_options(),
            vec![
                ("age".to_string(), SortDirection::Descending),
                ("name".to_string(), SortDirection::Ascending),
            ]
        );
    }

    #[test]
    fn test_row_index_breaks_remaining_ties() {
        let (config, items) = setup();
        let state = config.default_state();
        let age = config.column("age").unwrap();

        state.toggle_sort(&age);
        let chain = state.sort_chain();
        let mut sorted = items.clone();
        sorted.sort_by(|a, b| chain(a, b));

        // Alice (row 1) and Bob (row 2) share age 30; row index decides.
        assert_eq!(sorted[1].row_index(), 1);
        assert_eq!(sorted[2].row_index(), 2);
    }

    #[test]
    fn test_clear_sort() {
        let (config, items) = setup();
        let state = config.default_state();
        let age = config.column("age").unwrap();

        state.toggle_sort(&age);
        state.clear_sort();

        assert!(state.sort_options().is_empty());
        assert_eq!(
            sorted_names(&state, &items),
            vec!["Charlie", "Alice", "Bob", "Alice"]
        );
    }
}
