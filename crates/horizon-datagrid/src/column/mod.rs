//! Column model: typed descriptors mapping data items to renderable values.
//!
//! A [`Column`] pairs an immutable identity (key, kind, value extractor)
//! with mutable display/interaction [`ColumnOptions`]. Concrete variants
//! (text, number, action, select) are constructors that refine the option
//! defaults; capability checks elsewhere in the engine read option flags,
//! never the kind tag.
//!
//! # Example
//!
//! ```
//! use horizon_datagrid::column::Column;
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let name = Column::text("name", |person: &Person| person.name.clone());
//! let age = Column::number("age", |person: &Person| person.age as f64);
//!
//! assert_eq!(name.key(), "name");
//! assert!(age.options().sortable);
//! ```

mod filter;
mod options;
mod rules;

pub use filter::{FilterCatalog, FilterCondition, FilterOperator, FilterOption, PredicateFn};
pub use options::{Alignment, ColumnOptions, GridWidth, Pin};
pub use rules::{RuleOutcome, ValidationRule, number_in_range};

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::CellValue;

/// Type alias for a column's value extractor.
///
/// Must be pure and total over well-formed items; callers are expected to
/// supply complete items.
pub type ValueExtractor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Type alias for a column's in-place value setter.
pub type ValueSetter<T> = Arc<dyn Fn(&mut T, CellValue) + Send + Sync>;

/// Type alias for a per-cell action callback.
pub type CellActionFn<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Type alias for a per-cell route resolver.
pub type CellRouteFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// The concrete variant of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// String-valued column.
    Text,
    /// Numeric column.
    Number,
    /// Per-cell action buttons; never filterable or sortable.
    Action,
    /// Checkbox-style selection column; forced to the left pin.
    Select,
}

/// What a cell action does when activated.
pub enum CellActionBehaviour<T> {
    /// Invoke a callback with the row's item.
    Invoke(CellActionFn<T>),
    /// Navigate to a route resolved from the row's item.
    Navigate(CellRouteFn<T>),
}

impl<T> Clone for CellActionBehaviour<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Invoke(f) => Self::Invoke(f.clone()),
            Self::Navigate(f) => Self::Navigate(f.clone()),
        }
    }
}

impl<T> fmt::Debug for CellActionBehaviour<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoke(_) => write!(f, "Invoke"),
            Self::Navigate(_) => write!(f, "Navigate"),
        }
    }
}

/// One entry in an action column's ordered action list.
#[derive(Debug)]
pub struct CellAction<T> {
    label: String,
    behaviour: CellActionBehaviour<T>,
}

impl<T> Clone for CellAction<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            behaviour: self.behaviour.clone(),
        }
    }
}

impl<T> CellAction<T> {
    /// The label shown on the action.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The action's behaviour.
    pub fn behaviour(&self) -> &CellActionBehaviour<T> {
        &self.behaviour
    }
}

/// A typed descriptor mapping a data item to a renderable value, plus
/// display and interaction options.
///
/// Identity (`key`, `kind`, extractor) is immutable; options sit behind a
/// lock so `Arc<Column>` handles returned from a configuration can still be
/// chained-configured. Later option writes win per field.
pub struct Column<T> {
    key: String,
    kind: ColumnKind,
    extract: ValueExtractor<T>,
    options: RwLock<ColumnOptions>,
    filter_catalog: Option<FilterCatalog>,
    actions: RwLock<Vec<CellAction<T>>>,
    value_setter: RwLock<Option<ValueSetter<T>>>,
    rules: RwLock<Vec<ValidationRule>>,
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("options", &*self.options.read())
            .finish_non_exhaustive()
    }
}

impl<T> Column<T> {
    fn new(
        key: impl Into<String>,
        kind: ColumnKind,
        extract: ValueExtractor<T>,
        options: ColumnOptions,
        filter_catalog: Option<FilterCatalog>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            extract,
            options: RwLock::new(options),
            filter_catalog,
            actions: RwLock::new(Vec::new()),
            value_setter: RwLock::new(None),
            rules: RwLock::new(Vec::new()),
        }
    }

    /// Creates a text column.
    pub fn text<F>(key: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let options = ColumnOptions::new().with_sort_icons(
            "mdi-sort-alphabetical-ascending",
            "mdi-sort-alphabetical-descending",
        );
        Self::new(
            key,
            ColumnKind::Text,
            Arc::new(move |item: &T| CellValue::Text(extract(item))),
            options,
            Some(FilterCatalog::text()),
        )
    }

    /// Creates a number column.
    pub fn number<F>(key: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        let options = ColumnOptions::new()
            .with_width(GridWidth::Small)
            .with_alignment(Alignment::Centre)
            .with_sort_icons("mdi-sort-numeric-ascending", "mdi-sort-numeric-descending");
        Self::new(
            key,
            ColumnKind::Number,
            Arc::new(move |item: &T| CellValue::Number(extract(item))),
            options,
            Some(FilterCatalog::number()),
        )
    }

    /// Creates an action column.
    ///
    /// Action columns carry per-cell actions instead of data: never
    /// filterable, sortable or manageable, not a drop target, name hidden,
    /// pinned right.
    pub fn action(key: impl Into<String>) -> Self {
        let options = ColumnOptions::new()
            .with_width(GridWidth::Small)
            .with_pin(Pin::Right)
            .with_filterable(false)
            .with_sortable(false)
            .with_manageable(false)
            .with_draggable(false)
            .with_hide_name(true);
        Self::new(
            key,
            ColumnKind::Action,
            Arc::new(|_: &T| CellValue::Empty),
            options,
            None,
        )
    }

    /// Creates a selection column.
    ///
    /// Selection state lives in grid state, not in items, so the extractor
    /// yields no value. Never filterable, sortable or manageable, name
    /// hidden, forced to the left pin.
    pub fn select(key: impl Into<String>) -> Self {
        let options = ColumnOptions::new()
            .with_width(GridWidth::Small)
            .with_pin(Pin::Left)
            .with_filterable(false)
            .with_sortable(false)
            .with_manageable(false)
            .with_hide_name(true);
        Self::new(
            key,
            ColumnKind::Select,
            Arc::new(|_: &T| CellValue::Empty),
            options,
            None,
        )
    }

    /// The column's unique key within its configuration.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The column's variant.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Extracts the renderable value for an item.
    pub fn value(&self, item: &T) -> CellValue {
        (self.extract)(item)
    }

    /// A snapshot of the current options.
    pub fn options(&self) -> ColumnOptions {
        self.options.read().clone()
    }

    /// Merges changes into the options. Later calls win per field.
    pub fn set_options(&self, update: impl FnOnce(&mut ColumnOptions)) -> &Self {
        update(&mut self.options.write());
        self
    }

    /// The column's filter predicate catalog, if it is filterable.
    pub fn filter_catalog(&self) -> Option<&FilterCatalog> {
        self.filter_catalog.as_ref()
    }

    /// Appends a callback action. Only consumed for action columns.
    pub fn add_action<F>(&self, label: impl Into<String>, on_activate: F) -> &Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.actions.write().push(CellAction {
            label: label.into(),
            behaviour: CellActionBehaviour::Invoke(Arc::new(on_activate)),
        });
        self
    }

    /// Appends a navigation action. Only consumed for action columns.
    pub fn add_route<F>(&self, label: impl Into<String>, to: F) -> &Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.actions.write().push(CellAction {
            label: label.into(),
            behaviour: CellActionBehaviour::Navigate(Arc::new(to)),
        });
        self
    }

    /// The ordered action list.
    pub fn actions(&self) -> Vec<CellAction<T>> {
        self.actions.read().clone()
    }

    /// Installs a setter enabling in-place cell editing.
    pub fn set_value_setter<F>(&self, setter: F) -> &Self
    where
        F: Fn(&mut T, CellValue) + Send + Sync + 'static,
    {
        *self.value_setter.write() = Some(Arc::new(setter));
        self
    }

    /// Returns `true` when a value setter is installed.
    pub fn is_editable(&self) -> bool {
        self.value_setter.read().is_some()
    }

    /// Writes a value into an item via the installed setter, if any.
    pub fn set_value(&self, item: &mut T, value: CellValue) {
        let setter = self.value_setter.read().clone();
        if let Some(setter) = setter {
            setter(item, value);
        }
    }

    /// Appends validation rules.
    pub fn add_rules(&self, rules: impl IntoIterator<Item = ValidationRule>) -> &Self {
        self.rules.write().extend(rules);
        self
    }

    /// Runs the column's rules against a value, returning the first failure.
    pub fn validate(&self, value: &CellValue) -> RuleOutcome {
        for rule in self.rules.read().iter() {
            let outcome = rule(value);
            if !outcome.is_valid() {
                return outcome;
            }
        }
        RuleOutcome::Valid
    }
}
