//! Horizon DataGrid - a renderer-agnostic data-grid engine.
//!
//! The engine manages column definitions, per-session grid state
//! (sort/filter/pin/order/selection), composed filter and sort chains, drag
//! based column reordering, and incremental materialization of visible rows
//! for virtualized scrolling. It produces the data and ordering decisions a
//! renderer consumes; pixels, input widgets, routing and theming are the
//! embedding application's business.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_datagrid::prelude::*;
//!
//! #[derive(Clone)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! // Describe the dataset shape once.
//! let mut config = GridConfiguration::new();
//! config.add_text_column("name", |person: &Person| person.name.clone());
//! config.add_number_column("age", |person: &Person| person.age as f64);
//! let config = Arc::new(config);
//!
//! // Per-session state, seeded from the configuration's defaults.
//! let state = Arc::new(config.default_state());
//! state.toggle_sort(&config.column("age").unwrap());
//!
//! // Load a dataset and materialize the first screen of rows.
//! let items = inject_row_indexes(vec![
//!     Person { name: "Alice".into(), age: 30 },
//!     Person { name: "Bob".into(), age: 25 },
//! ]);
//! let visible = state.filter_and_sort_items(&items, &config);
//!
//! let mut window = RowWindowBuilder::new(config.clone(), state.clone());
//! window.set_items(visible);
//! let rows = window.build_window(0, 2);
//! assert_eq!(rows.centre[0].item().item().name, "Bob");
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod layout;
pub mod rows;
pub mod state;
pub mod value;
pub mod window;

pub use column::{Column, ColumnKind, ColumnOptions, GridWidth, Pin};
pub use config::GridConfiguration;
pub use error::{Error, Result};
pub use layout::GridLayout;
pub use rows::{IndexedItem, RowIndex, inject_row_indexes};
pub use state::{GridState, SortDirection};
pub use value::CellValue;
pub use window::RowWindowBuilder;

/// Prelude module for Horizon DataGrid.
///
/// Re-exports the types most applications need:
///
/// ```ignore
/// use horizon_datagrid::prelude::*;
/// ```
pub mod prelude {
    // Configuration and columns
    pub use crate::column::{
        Alignment, Column, ColumnKind, ColumnOptions, FilterCatalog, FilterCondition,
        FilterOperator, FilterOption, GridWidth, Pin,
    };
    pub use crate::config::GridConfiguration;

    // Session state
    pub use crate::state::{
        CellRef, ColumnDragController, ColumnGroups, ColumnSizes, ColumnState, GridState,
        SortDirection,
    };

    // Rows and values
    pub use crate::rows::{IndexedItem, RowIndex, inject_row_indexes};
    pub use crate::value::CellValue;

    // Virtualized row windows
    pub use crate::window::{PinnedRows, RowDescriptor, RowWindowBuilder};

    // Persisted layouts
    pub use crate::layout::{ColumnLayout, GridLayout};

    // Errors
    pub use crate::error::{Error, Result};
}
