//! Drag-based column reordering.
//!
//! The controller tracks one drag sequence over a single pointer axis
//! (X for horizontal grids, Y for vertical). Hit-testing is the caller's
//! job: each move reports the column currently under the pointer, and the
//! controller decides whether to apply a reorder. Reorders are applied
//! incrementally on every qualifying move, so an abandoned drag never
//! leaves order values corrupted — `drag_end` only clears tracking.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::column::Column;
use crate::state::GridState;

/// Drives column reordering for one grid surface.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_datagrid::config::GridConfiguration;
/// use horizon_datagrid::state::ColumnDragController;
///
/// struct Row { a: f64 }
///
/// let mut config = GridConfiguration::new();
/// let first = config.add_number_column("first", |row: &Row| row.a);
/// let second = config.add_number_column("second", |row: &Row| row.a);
/// let state = Arc::new(config.default_state());
///
/// let controller = ColumnDragController::new(state.clone());
/// controller.drag_start(&first, 0.0);
/// controller.drag_move(150.0, Some(&second));
/// controller.drag_end();
///
/// assert_eq!(state.column_state("first").order, 1);
/// assert_eq!(state.column_state("second").order, 0);
/// ```
pub struct ColumnDragController<T> {
    state: Arc<GridState<T>>,
    dragged: RwLock<Option<Arc<Column<T>>>>,
    target: RwLock<Option<Arc<Column<T>>>>,
    last_pos: RwLock<f32>,
}

impl<T: 'static> ColumnDragController<T> {
    /// Creates a controller mutating the given state.
    pub fn new(state: Arc<GridState<T>>) -> Self {
        Self {
            state,
            dragged: RwLock::new(None),
            target: RwLock::new(None),
            last_pos: RwLock::new(0.0),
        }
    }

    /// Begins a drag on a column at the given axis coordinate.
    pub fn drag_start(&self, column: &Arc<Column<T>>, pos: f32) {
        *self.dragged.write() = Some(column.clone());
        *self.last_pos.write() = pos;
        self.state.set_column_dragged(Some(column.key()));
        tracing::trace!(column = column.key(), pos, "column drag started");
    }

    /// Processes a drag movement.
    ///
    /// `column_under_pointer` is the hit-test result for the new coordinate;
    /// `None` (pointer between columns or outside the grid) is ignored.
    pub fn drag_move(&self, pos: f32, column_under_pointer: Option<&Arc<Column<T>>>) {
        let Some(dragged) = self.dragged.read().clone() else {
            return;
        };
        let Some(hit) = column_under_pointer else {
            return;
        };

        // Re-entering the column we already swapped with only counts once
        // the pointer has reversed direction; otherwise the order would
        // oscillate at the boundary between the two columns.
        let current_target = self.target.read().clone();
        if let Some(target) = &current_target
            && target.key() == hit.key()
            && !self.is_moving_away_from_dragged(pos, &dragged, target)
        {
            *self.last_pos.write() = pos;
            return;
        }

        *self.target.write() = Some(hit.clone());

        if !hit.options().draggable {
            return;
        }

        if hit.key() == dragged.key() {
            return;
        }

        self.state.rearrange_column_orders(&dragged, hit);
        *self.last_pos.write() = pos;
    }

    /// Ends the drag, clearing all transient tracking.
    pub fn drag_end(&self) {
        *self.dragged.write() = None;
        *self.target.write() = None;
        self.state.set_column_dragged(None);
        tracing::trace!("column drag ended");
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragged.read().is_some()
    }

    /// The column being dragged, if any.
    pub fn dragged_column(&self) -> Option<Arc<Column<T>>> {
        self.dragged.read().clone()
    }

    // The previous reorder placed the dragged column on one side of the
    // target; only a direction reversal means the pointer genuinely left
    // and came back.
    fn is_moving_away_from_dragged(
        &self,
        pos: f32,
        dragged: &Column<T>,
        target: &Column<T>,
    ) -> bool {
        let dragged_order = self.state.column_state(dragged.key()).order;
        let target_order = self.state.column_state(target.key()).order;
        let last_pos = *self.last_pos.read();

        if pos > last_pos {
            return target_order > dragged_order;
        }

        if last_pos > pos {
            return dragged_order > target_order;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfiguration;

    struct Item {
        value: f64,
    }

    fn setup() -> (
        GridConfiguration<Item>,
        Arc<GridState<Item>>,
        ColumnDragController<Item>,
    ) {
        let mut config = GridConfiguration::new();
        config.add_number_column("a", |item: &Item| item.value);
        config.add_number_column("b", |item: &Item| item.value);
        config.add_number_column("c", |item: &Item| item.value);
        let state = Arc::new(config.default_state());
        let controller = ColumnDragController::new(state.clone());
        (config, state, controller)
    }

    #[test]
    fn test_drag_swaps_orders() {
        let (config, state, controller) = setup();
        let a = config.column("a").unwrap();
        let c = config.column("c").unwrap();

        controller.drag_start(&a, 0.0);
        assert_eq!(state.column_dragged().as_deref(), Some("a"));

        controller.drag_move(250.0, Some(&c));
        assert_eq!(state.column_state("a").order, 2);
        assert_eq!(state.column_state("b").order, 0);
        assert_eq!(state.column_state("c").order, 1);

        controller.drag_end();
        assert!(state.column_dragged().is_none());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_same_target_does_not_oscillate() {
        let (config, state, controller) = setup();
        let a = config.column("a").unwrap();
        let b = config.column("b").unwrap();

        controller.drag_start(&a, 0.0);
        controller.drag_move(120.0, Some(&b));
        assert_eq!(state.column_state("a").order, 1);
        assert_eq!(state.column_state("b").order, 0);

        // Still moving right over the same target: no re-trigger.
        controller.drag_move(130.0, Some(&b));
        assert_eq!(state.column_state("a").order, 1);
        assert_eq!(state.column_state("b").order, 0);
    }

    #[test]
    fn test_direction_reversal_retriggers() {
        let (config, state, controller) = setup();
        let a = config.column("a").unwrap();
        let b = config.column("b").unwrap();

        controller.drag_start(&a, 0.0);
        controller.drag_move(120.0, Some(&b));
        assert_eq!(state.column_state("a").order, 1);

        // Pointer reverses back over b: the swap re-applies.
        controller.drag_move(40.0, Some(&b));
        assert_eq!(state.column_state("a").order, 0);
        assert_eq!(state.column_state("b").order, 1);
    }

    #[test]
    fn test_non_draggable_target_is_ignored() {
        let mut config = GridConfiguration::new();
        config.add_number_column("a", |item: &Item| item.value);
        let action = config.with_action_column().unwrap();
        let state = Arc::new(config.default_state());
        let controller = ColumnDragController::new(state.clone());
        let a = config.column("a").unwrap();

        controller.drag_start(&a, 0.0);
        controller.drag_move(150.0, Some(&action));

        assert_eq!(state.column_state("a").order, 0);
        assert_eq!(state.column_state(action.key()).order, 1);
    }

    #[test]
    fn test_missed_hit_test_is_ignored() {
        let (config, state, controller) = setup();
        let a = config.column("a").unwrap();

        controller.drag_start(&a, 0.0);
        controller.drag_move(500.0, None);
        assert_eq!(state.column_state("a").order, 0);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let (config, state, controller) = setup();
        let b = config.column("b").unwrap();

        controller.drag_move(100.0, Some(&b));
        assert_eq!(state.column_state("b").order, 1);
    }

    #[test]
    fn test_abandoned_drag_leaves_valid_orders() {
        let (config, state, controller) = setup();
        let a = config.column("a").unwrap();
        let c = config.column("c").unwrap();

        controller.drag_start(&a, 0.0);
        controller.drag_move(250.0, Some(&c));
        // No drag_end: orders must already be a valid permutation.
        let mut orders: Vec<usize> = ["a", "b", "c"]
            .iter()
            .map(|key| state.column_state(key).order)
            .collect();
        orders.sort_unstable();
        assert_eq!(orders, vec![0, 1, 2]);
    }
}
