//! Grid configuration: the ordered column registry for one dataset shape.
//!
//! A configuration is built once during application setup and then frozen;
//! it may be shared read-only (via `Arc`) across any number of
//! [`GridState`](crate::state::GridState) instances. Per-session adjustments
//! (widths, pins, order, filters) never touch the configuration.
//!
//! # Example
//!
//! ```
//! use horizon_datagrid::config::GridConfiguration;
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut config = GridConfiguration::new();
//! config.add_text_column("name", |person: &Person| person.name.clone());
//! config.add_number_column("age", |person: &Person| person.age as f64);
//! let action = config.with_action_column().unwrap();
//! action.add_action("Delete", |_person| { /* ... */ });
//!
//! // Action column composes last regardless of registration order.
//! assert_eq!(config.columns().last().unwrap().key(), "actions");
//!
//! let state = config.default_state();
//! assert_eq!(state.column_count(), 3);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::state::GridState;

/// Key assigned to the built-in action column.
pub const ACTION_COLUMN_KEY: &str = "actions";

/// Key assigned to the built-in selection column.
pub const SELECT_COLUMN_KEY: &str = "selected";

/// Type alias for a row-level action callback.
pub type RowActionFn<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Type alias for a row-level route resolver.
pub type RowRouteFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

enum RowInteraction<T> {
    Action(RowActionFn<T>),
    Route(RowRouteFn<T>),
}

/// An ordered registry of columns for one dataset shape.
///
/// Insertion order is the default column order. The optional selection and
/// action columns compose at fixed ends of the [`columns`](Self::columns)
/// view: selection first, action last, regardless of registration order.
pub struct GridConfiguration<T> {
    columns: Vec<Arc<Column<T>>>,
    select_column: Option<Arc<Column<T>>>,
    action_column: Option<Arc<Column<T>>>,
    row_interaction: Option<RowInteraction<T>>,
}

impl<T: 'static> Default for GridConfiguration<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for GridConfiguration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridConfiguration")
            .field(
                "columns",
                &self.columns().iter().map(|c| c.key().to_string()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl<T: 'static> GridConfiguration<T> {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            select_column: None,
            action_column: None,
            row_interaction: None,
        }
    }

    /// Appends a text column, returning it for chained configuration.
    ///
    /// # Panics
    ///
    /// Panics if the key is already registered (a programming error).
    pub fn add_text_column<F>(&mut self, key: impl Into<String>, extract: F) -> Arc<Column<T>>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.register(Column::text(key, extract))
    }

    /// Appends a number column, returning it for chained configuration.
    ///
    /// # Panics
    ///
    /// Panics if the key is already registered (a programming error).
    pub fn add_number_column<F>(&mut self, key: impl Into<String>, extract: F) -> Arc<Column<T>>
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        self.register(Column::number(key, extract))
    }

    /// Appends an already-built column.
    ///
    /// # Panics
    ///
    /// Panics if the key is already registered (a programming error).
    pub fn add_column(&mut self, column: Column<T>) -> Arc<Column<T>> {
        self.register(column)
    }

    fn register(&mut self, column: Column<T>) -> Arc<Column<T>> {
        self.assert_unique_key(column.key());
        let column = Arc::new(column);
        self.columns.push(column.clone());
        column
    }

    fn assert_unique_key(&self, key: &str) {
        let taken = self.columns.iter().any(|c| c.key() == key)
            || self.select_column.as_ref().is_some_and(|c| c.key() == key)
            || self.action_column.as_ref().is_some_and(|c| c.key() == key);
        assert!(!taken, "duplicate column key `{key}` in grid configuration");
    }

    /// Adds the action column, which always composes last.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActionColumnAlreadyDefined`] if called twice.
    pub fn with_action_column(&mut self) -> Result<Arc<Column<T>>> {
        if self.action_column.is_some() {
            return Err(Error::ActionColumnAlreadyDefined);
        }
        self.assert_unique_key(ACTION_COLUMN_KEY);
        let column = Arc::new(Column::action(ACTION_COLUMN_KEY));
        self.action_column = Some(column.clone());
        Ok(column)
    }

    /// Adds the selection column, which always composes first.
    ///
    /// Idempotent: a second call returns the existing selection column.
    pub fn with_select_column(&mut self) -> Arc<Column<T>> {
        if let Some(existing) = &self.select_column {
            return existing.clone();
        }
        self.assert_unique_key(SELECT_COLUMN_KEY);
        let column = Arc::new(Column::select(SELECT_COLUMN_KEY));
        self.select_column = Some(column.clone());
        column
    }

    /// Registers a row-level action invoked when a row is activated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowInteractionAlreadyDefined`] if a row action or
    /// row route is already set; the two are mutually exclusive.
    pub fn with_row_action<F>(&mut self, action: F) -> Result<()>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        if self.row_interaction.is_some() {
            return Err(Error::RowInteractionAlreadyDefined);
        }
        self.row_interaction = Some(RowInteraction::Action(Arc::new(action)));
        Ok(())
    }

    /// Registers a row-level route resolved when a row is activated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowInteractionAlreadyDefined`] if a row action or
    /// row route is already set; the two are mutually exclusive.
    pub fn with_row_route<F>(&mut self, route: F) -> Result<()>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        if self.row_interaction.is_some() {
            return Err(Error::RowInteractionAlreadyDefined);
        }
        self.row_interaction = Some(RowInteraction::Route(Arc::new(route)));
        Ok(())
    }

    /// The registered row action, if any.
    pub fn row_action(&self) -> Option<RowActionFn<T>> {
        match &self.row_interaction {
            Some(RowInteraction::Action(action)) => Some(action.clone()),
            _ => None,
        }
    }

    /// The registered row route, if any.
    pub fn row_route(&self) -> Option<RowRouteFn<T>> {
        match &self.row_interaction {
            Some(RowInteraction::Route(route)) => Some(route.clone()),
            _ => None,
        }
    }

    /// The composed, configuration-time column order: selection column
    /// first, registered columns in insertion order, action column last.
    ///
    /// This is distinct from the user-adjustable order kept in grid state.
    pub fn columns(&self) -> Vec<Arc<Column<T>>> {
        let mut columns = Vec::with_capacity(
            self.columns.len()
                + usize::from(self.select_column.is_some())
                + usize::from(self.action_column.is_some()),
        );
        if let Some(select) = &self.select_column {
            columns.push(select.clone());
        }
        columns.extend(self.columns.iter().cloned());
        if let Some(action) = &self.action_column {
            columns.push(action.clone());
        }
        columns
    }

    /// Looks up a column by key across the composed view.
    pub fn column(&self, key: &str) -> Option<Arc<Column<T>>> {
        self.columns().into_iter().find(|c| c.key() == key)
    }

    /// Total number of columns in the composed view.
    pub fn column_count(&self) -> usize {
        self.columns.len()
            + usize::from(self.select_column.is_some())
            + usize::from(self.action_column.is_some())
    }

    /// Materializes a fresh per-session state from the columns' defaults.
    ///
    /// Width, pin and hidden flags come from each column's options; `order`
    /// is the positional index in the composed view; filter lists start
    /// empty.
    pub fn default_state(&self) -> GridState<T> {
        GridState::from_configuration(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Pin;

    struct Item {
        name: String,
        index: f64,
    }

    #[test]
    fn test_add_columns_in_order() {
        let mut config = GridConfiguration::new();
        config.add_text_column("name", |item: &Item| item.name.clone());
        config.add_number_column("index", |item: &Item| item.index);

        let columns = config.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].key(), "name");
        assert_eq!(columns[1].key(), "index");
    }

    #[test]
    fn test_action_column_composes_last() {
        let mut config = GridConfiguration::new();
        config.with_action_column().unwrap();
        config.add_number_column("index", |item: &Item| item.index);

        let columns = config.columns();
        assert_eq!(columns.last().unwrap().key(), ACTION_COLUMN_KEY);
    }

    #[test]
    fn test_action_column_singleton() {
        let mut config = GridConfiguration::<Item>::new();
        config.with_action_column().unwrap();
        assert!(matches!(
            config.with_action_column(),
            Err(Error::ActionColumnAlreadyDefined)
        ));
    }

    #[test]
    fn test_select_column_composes_first_and_is_idempotent() {
        let mut config = GridConfiguration::new();
        config.add_number_column("index", |item: &Item| item.index);
        let select = config.with_select_column();
        let again = config.with_select_column();

        assert!(Arc::ptr_eq(&select, &again));
        let columns = config.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].key(), SELECT_COLUMN_KEY);
        assert_eq!(columns[0].options().pin, Pin::Left);
    }

    #[test]
    fn test_row_action_and_route_are_mutually_exclusive() {
        let mut config = GridConfiguration::<Item>::new();
        config.with_row_action(|_| {}).unwrap();
        assert!(config.row_action().is_some());
        assert!(config.row_route().is_none());

        assert!(matches!(
            config.with_row_action(|_| {}),
            Err(Error::RowInteractionAlreadyDefined)
        ));
        assert!(matches!(
            config.with_row_route(|_| "/".to_string()),
            Err(Error::RowInteractionAlreadyDefined)
        ));
    }

    #[test]
    fn test_row_route_blocks_row_action() {
        let mut config = GridConfiguration::<Item>::new();
        config.with_row_route(|_| "/".to_string()).unwrap();
        assert!(config.row_route().is_some());
        assert!(matches!(
            config.with_row_action(|_| {}),
            Err(Error::RowInteractionAlreadyDefined)
        ));
    }

    #[test]
    #[should_panic(expected = "duplicate column key")]
    fn test_duplicate_key_panics() {
        let mut config = GridConfiguration::new();
        config.add_text_column("name", |item: &Item| item.name.clone());
        config.add_text_column("name", |item: &Item| item.name.clone());
    }
}
