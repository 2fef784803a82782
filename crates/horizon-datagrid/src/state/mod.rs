//! Mutable, per-session grid state.
//!
//! A [`GridState`] holds everything a user adjusts during a session: column
//! width/pin/visibility/order, the active sort specification, per-column
//! filter lists, search text, and transient interaction tracking (hover,
//! drag, cell edit, selection, validation errors).
//!
//! State is keyed by column key and owns no column identity, so it can be
//! captured and restored independently of the column objects (see
//! [`crate::layout`]). All mutators take `&self`: a header view, a body view
//! and a drag controller share one `Arc<GridState>`, and every mutation runs
//! to completion before the next event is processed.

mod drag;
mod filter;
mod sort;

pub use drag::ColumnDragController;
pub use filter::FilterChain;
pub use sort::SortDirection;

pub(crate) use sort::{SortChain, SortOption, build_sort_chain};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::column::{Column, ColumnKind, FilterOption, Pin};
use crate::config::GridConfiguration;
use crate::rows::RowIndex;

/// Per-column, per-session state.
///
/// Returned snapshots are copies; mutations go through [`GridState`]
/// methods so derived data (the compiled filter chain, the order
/// permutation) stays consistent.
#[derive(Clone)]
pub struct ColumnState {
    /// Current width in layout units.
    pub width: f32,
    /// Current pin group.
    pub pin: Pin,
    /// Whether the column is hidden.
    pub hidden: bool,
    /// Position in the user-adjustable column order. Order values across
    /// all columns always form a dense permutation of `0..column_count`.
    pub order: usize,
    /// The column's ordered filter slots.
    pub filter_options: Vec<FilterOption>,
    /// Predicate compiled from `filter_options`; always derived, never
    /// hand-edited.
    pub(crate) filter_chain: FilterChain,
}

impl fmt::Debug for ColumnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnState")
            .field("width", &self.width)
            .field("pin", &self.pin)
            .field("hidden", &self.hidden)
            .field("order", &self.order)
            .field("filter_options", &self.filter_options.len())
            .finish_non_exhaustive()
    }
}

/// Identifies one cell by row identity and column key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// The row's stable identifier.
    pub row: RowIndex,
    /// The column key.
    pub column: String,
}

/// Columns grouped by their current pin, each group ordered by the
/// user-adjustable order.
#[derive(Debug)]
pub struct ColumnGroups<T> {
    /// Columns pinned left.
    pub left: Vec<Arc<Column<T>>>,
    /// Scrolling centre columns.
    pub centre: Vec<Arc<Column<T>>>,
    /// Columns pinned right.
    pub right: Vec<Arc<Column<T>>>,
}

impl<T> ColumnGroups<T> {
    /// The group for a pin side.
    pub fn group(&self, pin: Pin) -> &[Arc<Column<T>>] {
        match pin {
            Pin::Left => &self.left,
            Pin::Centre => &self.centre,
            Pin::Right => &self.right,
        }
    }

    /// Total column count across the three groups.
    pub fn len(&self) -> usize {
        self.left.len() + self.centre.len() + self.right.len()
    }

    /// Returns `true` if no group has columns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summed widths of the visible columns per pin group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnSizes {
    /// Width of the left pin group.
    pub left: f32,
    /// Width of the centre group.
    pub centre: f32,
    /// Width of the right pin group.
    pub right: f32,
}

impl ColumnSizes {
    /// Combined width across all groups.
    pub fn total(&self) -> f32 {
        self.left + self.centre + self.right
    }
}

/// Mutable, per-session state for one rendering surface.
pub struct GridState<T> {
    pub(crate) search_value: RwLock<String>,
    pub(crate) sort_options: RwLock<Vec<SortOption<T>>>,
    pub(crate) sort_chain: RwLock<SortChain<T>>,
    pub(crate) column_states: RwLock<HashMap<String, ColumnState>>,
    row_hovered: RwLock<Option<RowIndex>>,
    column_dragged: RwLock<Option<String>>,
    cell_edited: RwLock<Option<CellRef>>,
    selected_rows: RwLock<HashSet<RowIndex>>,
    cell_errors: RwLock<HashMap<RowIndex, HashSet<String>>>,
}

impl<T> fmt::Debug for GridState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("columns", &self.column_states.read().len())
            .field("sorted_on", &self.sort_options.read().len())
            .field("search_value", &*self.search_value.read())
            .finish_non_exhaustive()
    }
}

pub(crate) fn missing_state(key: &str) -> ! {
    panic!("no column state for key `{key}`; the column is not part of the owning configuration")
}

impl<T: 'static> GridState<T> {
    /// Builds the state from a configuration's defaults.
    ///
    /// Prefer [`GridConfiguration::default_state`].
    pub fn from_configuration(config: &GridConfiguration<T>) -> Self {
        let mut column_states = HashMap::new();
        for (index, column) in config.columns().iter().enumerate() {
            let options = column.options();
            column_states.insert(
                column.key().to_string(),
                ColumnState {
                    width: options.width,
                    pin: options.pin,
                    hidden: options.hidden,
                    order: index,
                    filter_options: Vec::new(),
                    filter_chain: filter::always_true(),
                },
            );
        }

        Self {
            search_value: RwLock::new(String::new()),
            sort_options: RwLock::new(Vec::new()),
            sort_chain: RwLock::new(build_sort_chain::<T>(&[])),
            column_states: RwLock::new(column_states),
            row_hovered: RwLock::new(None),
            column_dragged: RwLock::new(None),
            cell_edited: RwLock::new(None),
            selected_rows: RwLock::new(HashSet::new()),
            cell_errors: RwLock::new(HashMap::new()),
        }
    }

    /// Number of columns the state tracks.
    pub fn column_count(&self) -> usize {
        self.column_states.read().len()
    }

    /// A snapshot of one column's state.
    ///
    /// # Panics
    ///
    /// Panics if the key is not part of the owning configuration (a
    /// programming error, not a recoverable condition).
    pub fn column_state(&self, key: &str) -> ColumnState {
        self.column_states
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(|| missing_state(key))
    }

    pub(crate) fn update_column_state<R>(
        &self,
        key: &str,
        update: impl FnOnce(&mut ColumnState) -> R,
    ) -> R {
        let mut states = self.column_states.write();
        let state = states.get_mut(key).unwrap_or_else(|| missing_state(key));
        update(state)
    }

    // -------------------------------------------------------------------------
    // Column display state
    // -------------------------------------------------------------------------

    /// Sets a column's width.
    pub fn set_column_width(&self, key: &str, width: f32) {
        self.update_column_state(key, |state| state.width = width);
    }

    /// Sets a column's hidden flag.
    pub fn set_column_hidden(&self, key: &str, hidden: bool) {
        self.update_column_state(key, |state| state.hidden = hidden);
    }

    /// Moves a column to another pin group.
    ///
    /// Selection columns are forced to the left pin; attempts to move one
    /// are ignored.
    pub fn set_column_pin(&self, column: &Column<T>, pin: Pin) {
        if column.kind() == ColumnKind::Select && pin != Pin::Left {
            tracing::debug!(column = column.key(), "selection column pin is fixed to left");
            return;
        }
        self.update_column_state(column.key(), |state| state.pin = pin);
    }

    /// Sum of all column widths, hidden columns included.
    pub fn total_width(&self) -> f32 {
        self.column_states
            .read()
            .values()
            .map(|state| state.width)
            .sum()
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Sets the search text applied by [`filter_and_sort_items`](Self::filter_and_sort_items).
    pub fn set_search_value(&self, value: impl Into<String>) {
        *self.search_value.write() = value.into();
    }

    /// The current search text.
    pub fn search_value(&self) -> String {
        self.search_value.read().clone()
    }

    // -------------------------------------------------------------------------
    // Interaction tracking
    // -------------------------------------------------------------------------

    /// Records which row the pointer is over, if any.
    pub fn set_row_hovered(&self, row: Option<RowIndex>) {
        *self.row_hovered.write() = row;
    }

    /// The row currently hovered.
    pub fn row_hovered(&self) -> Option<RowIndex> {
        *self.row_hovered.read()
    }

    /// Records which column is being dragged, if any.
    pub fn set_column_dragged(&self, key: Option<&str>) {
        *self.column_dragged.write() = key.map(str::to_string);
    }

    /// The key of the column currently being dragged.
    pub fn column_dragged(&self) -> Option<String> {
        self.column_dragged.read().clone()
    }

    /// Marks a cell as being edited.
    pub fn begin_cell_edit(&self, row: RowIndex, column_key: impl Into<String>) {
        *self.cell_edited.write() = Some(CellRef {
            row,
            column: column_key.into(),
        });
    }

    /// Clears the cell-edit marker.
    pub fn end_cell_edit(&self) {
        *self.cell_edited.write() = None;
    }

    /// The cell currently being edited, if any.
    pub fn cell_edited(&self) -> Option<CellRef> {
        self.cell_edited.read().clone()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggles a row's selection, returning the new state.
    pub fn toggle_row_selected(&self, row: RowIndex) -> bool {
        let mut selected = self.selected_rows.write();
        if selected.remove(&row) {
            false
        } else {
            selected.insert(row);
            true
        }
    }

    /// Sets a row's selection explicitly.
    pub fn set_row_selected(&self, row: RowIndex, is_selected: bool) {
        let mut selected = self.selected_rows.write();
        if is_selected {
            selected.insert(row);
        } else {
            selected.remove(&row);
        }
    }

    /// Returns `true` if the row is selected.
    pub fn is_row_selected(&self, row: RowIndex) -> bool {
        self.selected_rows.read().contains(&row)
    }

    /// All selected rows, ascending by row index.
    pub fn selected_rows(&self) -> Vec<RowIndex> {
        let mut rows: Vec<RowIndex> = self.selected_rows.read().iter().copied().collect();
        rows.sort_unstable();
        rows
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        self.selected_rows.write().clear();
    }

    // -------------------------------------------------------------------------
    // Cell validation errors
    // -------------------------------------------------------------------------

    /// Records a validation error for one cell.
    pub fn add_cell_error(&self, row: RowIndex, column_key: impl Into<String>) {
        self.cell_errors
            .write()
            .entry(row)
            .or_default()
            .insert(column_key.into());
    }

    /// Clears a validation error for one cell.
    pub fn remove_cell_error(&self, row: RowIndex, column_key: &str) {
        let mut errors = self.cell_errors.write();
        if let Some(columns) = errors.get_mut(&row) {
            columns.remove(column_key);
            if columns.is_empty() {
                errors.remove(&row);
            }
        }
    }

    /// Returns `true` if the cell has a recorded error.
    pub fn cell_has_error(&self, row: RowIndex, column_key: &str) -> bool {
        self.cell_errors
            .read()
            .get(&row)
            .is_some_and(|columns| columns.contains(column_key))
    }

    /// Rows with at least one cell error, ascending by row index.
    pub fn rows_with_errors(&self) -> Vec<RowIndex> {
        let mut rows: Vec<RowIndex> = self.cell_errors.read().keys().copied().collect();
        rows.sort_unstable();
        rows
    }

    // -------------------------------------------------------------------------
    // Column views
    // -------------------------------------------------------------------------

    fn order_of(&self, key: &str) -> usize {
        self.column_states
            .read()
            .get(key)
            .unwrap_or_else(|| missing_state(key))
            .order
    }

    /// The visible columns in user-adjusted order.
    pub fn visible_columns(&self, config: &GridConfiguration<T>) -> Vec<Arc<Column<T>>> {
        let states = self.column_states.read();
        let mut columns: Vec<Arc<Column<T>>> = config
            .columns()
            .into_iter()
            .filter(|column| {
                !states
                    .get(column.key())
                    .unwrap_or_else(|| missing_state(column.key()))
                    .hidden
            })
            .collect();
        columns.sort_by_key(|column| {
            states
                .get(column.key())
                .map(|state| state.order)
                .unwrap_or(usize::MAX)
        });
        columns
    }

    /// The filterable columns, in configuration order.
    pub fn filterable_columns(&self, config: &GridConfiguration<T>) -> Vec<Arc<Column<T>>> {
        config
            .columns()
            .into_iter()
            .filter(|column| column.options().filterable)
            .collect()
    }

    /// The columns surfaced in column-management UI, in configuration order.
    pub fn manageable_columns(&self, config: &GridConfiguration<T>) -> Vec<Arc<Column<T>>> {
        config
            .columns()
            .into_iter()
            .filter(|column| column.options().manageable)
            .collect()
    }

    /// Visible columns grouped by current pin, each group ordered by the
    /// user-adjustable order.
    pub fn column_groups(&self, config: &GridConfiguration<T>) -> ColumnGroups<T> {
        let mut groups = ColumnGroups {
            left: Vec::new(),
            centre: Vec::new(),
            right: Vec::new(),
        };

        for column in self.visible_columns(config) {
            let pin = self.column_state(column.key()).pin;
            match pin {
                Pin::Left => groups.left.push(column),
                Pin::Centre => groups.centre.push(column),
                Pin::Right => groups.right.push(column),
            }
        }

        groups
    }

    /// Summed visible widths per pin group.
    pub fn column_sizes(&self, config: &GridConfiguration<T>) -> ColumnSizes {
        let groups = self.column_groups(config);
        let states = self.column_states.read();
        let sum = |columns: &[Arc<Column<T>>]| {
            columns
                .iter()
                .map(|column| {
                    states
                        .get(column.key())
                        .unwrap_or_else(|| missing_state(column.key()))
                        .width
                })
                .sum()
        };

        ColumnSizes {
            left: sum(&groups.left),
            centre: sum(&groups.centre),
            right: sum(&groups.right),
        }
    }

    // -------------------------------------------------------------------------
    // Column reordering
    // -------------------------------------------------------------------------

    /// Moves the dragged column to the target column's order, shifting the
    /// columns in between by one.
    ///
    /// Keeps order values a dense permutation of `0..column_count` in
    /// O(column count). Safe to apply on every intermediate drag step.
    pub fn rearrange_column_orders(&self, dragged: &Column<T>, target: &Column<T>) {
        let mut states = self.column_states.write();
        let from = states
            .get(dragged.key())
            .unwrap_or_else(|| missing_state(dragged.key()))
            .order;
        let to = states
            .get(target.key())
            .unwrap_or_else(|| missing_state(target.key()))
            .order;

        if from == to {
            return;
        }

        if to > from {
            // Moving later: everything in (from, to] shifts one earlier.
            for state in states.values_mut() {
                if state.order > from && state.order <= to {
                    state.order -= 1;
                }
            }
        } else {
            // Moving earlier: everything in [to, from) shifts one later.
            for state in states.values_mut() {
                if state.order >= to && state.order < from {
                    state.order += 1;
                }
            }
        }

        if let Some(state) = states.get_mut(dragged.key()) {
            state.order = to;
        }

        tracing::debug!(
            dragged = dragged.key(),
            target = target.key(),
            from,
            to,
            "column orders rearranged"
        );
    }
}
