//! Incremental materialization of visible rows for virtualized scrolling.
//!
//! The builder keeps the previously materialized `[min, max)` range and one
//! row-descriptor list per pin group. When the requested window shifts, only
//! the rows entering the range are built; rows leaving it are dropped from
//! the matching end. Retained descriptors keep their identity (`Arc`), so a
//! renderer can diff by pointer. The three pin-group lists are mutated in
//! lockstep and stay index-aligned: the descriptor at position `i` in every
//! list describes the same row.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::column::Column;
use crate::config::GridConfiguration;
use crate::rows::{IndexedItem, RowIndex};
use crate::state::{ColumnGroups, GridState};

/// A renderer-facing description of one row within one pin group.
#[derive(Debug)]
pub struct RowDescriptor<T> {
    row_index: RowIndex,
    absolute_index: usize,
    item: Arc<IndexedItem<T>>,
    columns: Vec<Arc<Column<T>>>,
    column_start_index: usize,
}

impl<T> RowDescriptor<T> {
    /// The row's stable identifier, for selection/hover/error lookups.
    pub fn row_index(&self) -> RowIndex {
        self.row_index
    }

    /// The row's position in the filtered+sorted list, for vertical offset.
    pub fn absolute_index(&self) -> usize {
        self.absolute_index
    }

    /// The row's data item.
    pub fn item(&self) -> &Arc<IndexedItem<T>> {
        &self.item
    }

    /// The pin group's visible columns, in user-adjusted order.
    pub fn columns(&self) -> &[Arc<Column<T>>] {
        &self.columns
    }

    /// The index of this group's first column across all pin groups,
    /// for positional continuity (e.g. ARIA column indexes).
    pub fn column_start_index(&self) -> usize {
        self.column_start_index
    }
}

/// The materialized rows, one list per pin group.
#[derive(Debug)]
pub struct PinnedRows<T> {
    /// Rows for the left pin group.
    pub left: VecDeque<Arc<RowDescriptor<T>>>,
    /// Rows for the centre group.
    pub centre: VecDeque<Arc<RowDescriptor<T>>>,
    /// Rows for the right pin group.
    pub right: VecDeque<Arc<RowDescriptor<T>>>,
}

impl<T> PinnedRows<T> {
    fn new() -> Self {
        Self {
            left: VecDeque::new(),
            centre: VecDeque::new(),
            right: VecDeque::new(),
        }
    }

    fn clear(&mut self) {
        self.left.clear();
        self.centre.clear();
        self.right.clear();
    }

    fn drop_front(&mut self, count: usize) {
        for _ in 0..count {
            self.left.pop_front();
            self.centre.pop_front();
            self.right.pop_front();
        }
    }

    fn drop_back(&mut self, count: usize) {
        for _ in 0..count {
            self.left.pop_back();
            self.centre.pop_back();
            self.right.pop_back();
        }
    }

    /// Number of materialized rows.
    pub fn len(&self) -> usize {
        self.centre.len()
    }

    /// Returns `true` when no rows are materialized.
    pub fn is_empty(&self) -> bool {
        self.centre.is_empty()
    }
}

/// Builds and incrementally maintains the visible row window.
///
/// Owns the filtered+sorted item snapshot for one rendering surface. Column
/// layout mutations (pin, order, visibility) are not observed by retained
/// rows; call [`invalidate`](Self::invalidate) after such changes so the
/// next build starts fresh.
pub struct RowWindowBuilder<T> {
    config: Arc<GridConfiguration<T>>,
    state: Arc<GridState<T>>,
    items: Vec<Arc<IndexedItem<T>>>,
    last_min: usize,
    last_max: usize,
    rows: PinnedRows<T>,
}

impl<T: 'static> RowWindowBuilder<T> {
    /// Creates a builder over a configuration and its session state.
    pub fn new(config: Arc<GridConfiguration<T>>, state: Arc<GridState<T>>) -> Self {
        Self {
            config,
            state,
            items: Vec::new(),
            last_min: 0,
            last_max: 0,
            rows: PinnedRows::new(),
        }
    }

    /// Replaces the item snapshot (typically the output of
    /// [`GridState::filter_and_sort_items`]) and resets the window.
    pub fn set_items(&mut self, items: Vec<IndexedItem<T>>) {
        self.items = items.into_iter().map(Arc::new).collect();
        self.invalidate();
    }

    /// Number of rows in the snapshot.
    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    /// The currently materialized `[min, max)` range.
    pub fn window_range(&self) -> (usize, usize) {
        (self.last_min, self.last_max)
    }

    /// Drops all materialized rows; the next build starts fresh.
    ///
    /// Required after column layout mutations (pin, order, visibility).
    pub fn invalidate(&mut self) {
        self.rows.clear();
        self.last_min = 0;
        self.last_max = 0;
    }

    /// Materializes the window `[new_min, new_max)`, reusing overlapping
    /// rows from the previous window.
    ///
    /// Scrolling forward drops rows from the front and appends the new tail;
    /// scrolling backward drops from the back and prepends the new head; a
    /// disjoint request rebuilds everything. The range is clamped to the
    /// snapshot length.
    pub fn build_window(&mut self, new_min: usize, new_max: usize) -> &PinnedRows<T> {
        let new_max = new_max.min(self.items.len());
        let new_min = new_min.min(new_max);

        let groups = self.state.column_groups(&self.config);
        let centre_start = groups.left.len();
        let right_start = centre_start + groups.centre.len();

        let overlap_start = new_min.max(self.last_min);
        let overlap_end = new_max.min(self.last_max);

        if overlap_start >= overlap_end {
            // Nothing to reuse.
            self.rows.clear();
            for index in new_min..new_max {
                self.push_row_back(index, &groups, centre_start, right_start);
            }
        } else {
            self.rows.drop_front(overlap_start - self.last_min);
            self.rows.drop_back(self.last_max - overlap_end);

            for index in (new_min..overlap_start).rev() {
                self.push_row_front(index, &groups, centre_start, right_start);
            }
            for index in overlap_end..new_max {
                self.push_row_back(index, &groups, centre_start, right_start);
            }
        }

        tracing::trace!(
            new_min,
            new_max,
            reused = overlap_end.saturating_sub(overlap_start),
            "row window built"
        );

        self.last_min = new_min;
        self.last_max = new_max;
        &self.rows
    }

    /// The materialized rows for the current window.
    pub fn rows(&self) -> &PinnedRows<T> {
        &self.rows
    }

    fn descriptor(
        &self,
        index: usize,
        columns: &[Arc<Column<T>>],
        column_start_index: usize,
    ) -> Arc<RowDescriptor<T>> {
        let item = self.items[index].clone();
        Arc::new(RowDescriptor {
            row_index: item.row_index(),
            absolute_index: index,
            item,
            columns: columns.to_vec(),
            column_start_index,
        })
    }

    fn push_row_back(
        &mut self,
        index: usize,
        groups: &ColumnGroups<T>,
        centre_start: usize,
        right_start: usize,
    ) {
        let left_row = self.descriptor(index, &groups.left, 0);
        let centre_row = self.descriptor(index, &groups.centre, centre_start);
        let right_row = self.descriptor(index, &groups.right, right_start);
        self.rows.left.push_back(left_row);
        self.rows.centre.push_back(centre_row);
        self.rows.right.push_back(right_row);
    }

    fn push_row_front(
        &mut self,
        index: usize,
        groups: &ColumnGroups<T>,
        centre_start: usize,
        right_start: usize,
    ) {
        let left_row = self.descriptor(index, &groups.left, 0);
        let centre_row = self.descriptor(index, &groups.centre, centre_start);
        let right_row = self.descriptor(index, &groups.right, right_start);
        self.rows.left.push_front(left_row);
        self.rows.centre.push_front(centre_row);
        self.rows.right.push_front(right_row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Pin;
    use crate::rows::inject_row_indexes;

    #[derive(Clone)]
    struct Item {
        index: f64,
    }

    fn setup() -> RowWindowBuilder<Item> {
        let mut config = GridConfiguration::new();
        config.add_number_column("index", |item: &Item| item.index);
        config.add_text_column("label", |item: &Item| format!("row {}", item.index));
        let config = Arc::new(config);
        let state = Arc::new(config.default_state());

        let mut builder = RowWindowBuilder::new(config, state);
        builder.set_items(inject_row_indexes(
            (0..100).map(|index| Item { index: index as f64 }).collect(),
        ));
        builder
    }

    fn centre_ids(rows: &PinnedRows<Item>) -> Vec<RowIndex> {
        rows.centre.iter().map(|row| row.row_index()).collect()
    }

    #[test]
    fn test_initial_build() {
        let mut builder = setup();
        let rows = builder.build_window(0, 20);

        assert_eq!(rows.len(), 20);
        assert_eq!(centre_ids(rows), (0..20).collect::<Vec<_>>());
        assert_eq!(rows.centre[0].absolute_index(), 0);
        assert_eq!(builder.window_range(), (0, 20));
    }

    #[test]
    fn test_forward_scroll_reuses_overlap() {
        let mut builder = setup();
        builder.build_window(0, 20);
        let retained: Vec<_> = builder.rows().centre.iter().skip(5).cloned().collect();

        let rows = builder.build_window(5, 25);
        assert_eq!(centre_ids(rows), (5..25).collect::<Vec<_>>());

        // Rows 5..20 keep their identity; only 20..25 are new.
        for (kept, descriptor) in retained.iter().zip(rows.centre.iter()) {
            assert!(Arc::ptr_eq(kept, descriptor));
        }
        assert_eq!(retained.len(), 15);
    }

    #[test]
    fn test_backward_scroll_prepends() {
        let mut builder = setup();
        builder.build_window(20, 40);
        let retained: Vec<_> = builder.rows().centre.iter().take(10).cloned().collect();

        let rows = builder.build_window(10, 30);
        assert_eq!(centre_ids(rows), (10..30).collect::<Vec<_>>());

        // Rows 20..30 keep their identity at the tail of the new window.
        for (kept, descriptor) in retained.iter().zip(rows.centre.iter().skip(10)) {
            assert!(Arc::ptr_eq(kept, descriptor));
        }
    }

    #[test]
    fn test_disjoint_window_rebuilds() {
        let mut builder = setup();
        builder.build_window(0, 20);
        let old_first = builder.rows().centre[0].clone();

        let rows = builder.build_window(50, 70);
        assert_eq!(centre_ids(rows), (50..70).collect::<Vec<_>>());
        assert!(!Arc::ptr_eq(&old_first, &rows.centre[0]));
    }

    #[test]
    fn test_window_clamps_to_item_count() {
        let mut builder = setup();
        let rows = builder.build_window(90, 120);
        assert_eq!(centre_ids(rows), (90..100).collect::<Vec<_>>());
        assert_eq!(builder.window_range(), (90, 100));
    }

    #[test]
    fn test_shrinking_window_drops_both_ends() {
        let mut builder = setup();
        builder.build_window(0, 30);
        let rows = builder.build_window(5, 15);
        assert_eq!(centre_ids(rows), (5..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_pin_groups_stay_aligned() {
        let mut config = GridConfiguration::new();
        config.add_number_column("index", |item: &Item| item.index);
        config.add_text_column("label", |item: &Item| format!("row {}", item.index));
        let pinned = config.add_text_column("pinned", |item: &Item| item.index.to_string());
        pinned.set_options(|options| options.pin = Pin::Left);
        let config = Arc::new(config);
        let state = Arc::new(config.default_state());

        let mut builder = RowWindowBuilder::new(config.clone(), state);
        builder.set_items(inject_row_indexes(
            (0..50).map(|index| Item { index: index as f64 }).collect(),
        ));

        builder.build_window(0, 10);
        builder.build_window(5, 15);
        builder.build_window(2, 12);
        let rows = builder.rows();

        assert_eq!(rows.left.len(), rows.centre.len());
        assert_eq!(rows.left.len(), rows.right.len());
        for (left, centre) in rows.left.iter().zip(rows.centre.iter()) {
            assert_eq!(left.row_index(), centre.row_index());
            assert_eq!(left.absolute_index(), centre.absolute_index());
        }
    }

    #[test]
    fn test_column_start_indexes_run_across_groups() {
        let mut config = GridConfiguration::new();
        let a = config.add_number_column("a", |item: &Item| item.index);
        config.add_number_column("b", |item: &Item| item.index);
        config.add_number_column("c", |item: &Item| item.index);
        a.set_options(|options| options.pin = Pin::Left);
        let config = Arc::new(config);
        let state = Arc::new(config.default_state());

        let mut builder = RowWindowBuilder::new(config, state);
        builder.set_items(inject_row_indexes(vec![Item { index: 0.0 }]));

        let rows = builder.build_window(0, 1);
        assert_eq!(rows.left[0].column_start_index(), 0);
        assert_eq!(rows.left[0].columns().len(), 1);
        assert_eq!(rows.centre[0].column_start_index(), 1);
        assert_eq!(rows.centre[0].columns().len(), 2);
        assert_eq!(rows.right[0].column_start_index(), 3);
        assert_eq!(rows.right[0].columns().len(), 0);
    }

    #[test]
    fn test_set_items_resets_window() {
        let mut builder = setup();
        builder.build_window(0, 20);
        builder.set_items(inject_row_indexes(vec![Item { index: 1.0 }]));
        assert_eq!(builder.window_range(), (0, 0));
        assert!(builder.rows().is_empty());
        assert_eq!(builder.row_count(), 1);
    }
}
