//! Filter predicate catalogs.
//!
//! Each filterable column variant carries a catalog of named predicate
//! templates. A filter slot in grid state pairs one template with a
//! user-supplied comparison value and an operator joining it to the next
//! slot; the state compiles the slots into a single predicate chain.

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// Type alias for a filter predicate.
///
/// Receives the cell value and the user-entered comparison value; returns
/// `true` if the cell passes.
pub type PredicateFn = Arc<dyn Fn(&CellValue, &CellValue) -> bool + Send + Sync>;

/// How a filter slot combines with the chain built from the slots after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Both this slot and the rest of the chain must pass.
    And,
    /// Either this slot or the rest of the chain must pass.
    Or,
}

/// A named predicate template offered by a column's filter catalog.
#[derive(Clone)]
pub struct FilterCondition {
    name: String,
    predicate: PredicateFn,
}

impl FilterCondition {
    /// Creates a condition from a name and predicate.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&CellValue, &CellValue) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// The display name of the condition.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the predicate to a cell value and a comparison value.
    pub fn apply(&self, item_value: &CellValue, filter_value: &CellValue) -> bool {
        (self.predicate)(item_value, filter_value)
    }
}

impl fmt::Debug for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCondition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An ordered set of predicate templates for one column variant.
#[derive(Debug, Clone, Default)]
pub struct FilterCatalog {
    conditions: Vec<FilterCondition>,
}

impl FilterCatalog {
    /// Name of the text `contains` condition.
    pub const CONTAINS: &'static str = "contains";
    /// Name of the numeric `less than` condition.
    pub const LESS_THAN: &'static str = "less than";
    /// Name of the numeric `greater than` condition.
    pub const GREATER_THAN: &'static str = "greater than";

    /// Creates a catalog from a list of conditions.
    pub fn new(conditions: Vec<FilterCondition>) -> Self {
        Self { conditions }
    }

    /// The catalog for text columns: `contains` (trimmed, case-insensitive).
    pub fn text() -> Self {
        Self::new(vec![FilterCondition::new(
            Self::CONTAINS,
            |item: &CellValue, value: &CellValue| {
                item.contains_ignore_case(&value.to_display_string())
            },
        )])
    }

    /// The catalog for number columns: `less than` and `greater than`.
    pub fn number() -> Self {
        Self::new(vec![
            FilterCondition::new(Self::LESS_THAN, |item: &CellValue, value: &CellValue| {
                match (item.as_number(), value.as_number()) {
                    (Some(item), Some(value)) => item < value,
                    _ => false,
                }
            }),
            FilterCondition::new(Self::GREATER_THAN, |item: &CellValue, value: &CellValue| {
                match (item.as_number(), value.as_number()) {
                    (Some(item), Some(value)) => item > value,
                    _ => false,
                }
            }),
        ])
    }

    /// All conditions, in catalog order.
    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    /// Looks up a condition by name.
    pub fn condition(&self, name: &str) -> Option<&FilterCondition> {
        self.conditions.iter().find(|c| c.name() == name)
    }
}

/// One slot in a column's ordered filter list.
///
/// A slot is valid once its condition and value are set; the operator is
/// additionally required for every slot except the last (a trailing operator
/// has nothing to combine with and is ignored).
#[derive(Debug, Clone, Default)]
pub struct FilterOption {
    /// The selected predicate template, if any.
    pub condition: Option<FilterCondition>,
    /// The user-entered comparison value, if any.
    pub value: Option<CellValue>,
    /// How this slot combines with the next one.
    pub operator: Option<FilterOperator>,
}

impl FilterOption {
    /// Returns `true` if the slot is complete enough to filter with.
    ///
    /// `is_last` relaxes the operator requirement for the final slot.
    pub fn is_valid(&self, is_last: bool) -> bool {
        let core = self.condition.is_some() && self.value.is_some();
        if is_last { core } else { core && self.operator.is_some() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_catalog_contains() {
        let catalog = FilterCatalog::text();
        let contains = catalog.condition(FilterCatalog::CONTAINS).unwrap();
        assert!(contains.apply(&CellValue::from(" Apple "), &CellValue::from("app")));
        assert!(!contains.apply(&CellValue::from("Apple"), &CellValue::from("pear")));
    }

    #[test]
    fn test_number_catalog_bounds() {
        let catalog = FilterCatalog::number();
        let less = catalog.condition(FilterCatalog::LESS_THAN).unwrap();
        let greater = catalog.condition(FilterCatalog::GREATER_THAN).unwrap();
        assert!(less.apply(&CellValue::from(5), &CellValue::from(10)));
        assert!(!less.apply(&CellValue::from(10), &CellValue::from(10)));
        assert!(greater.apply(&CellValue::from(15), &CellValue::from(10)));
        assert!(!greater.apply(&CellValue::from("text"), &CellValue::from(10)));
    }

    #[test]
    fn test_option_validity() {
        let catalog = FilterCatalog::number();
        let mut option = FilterOption::default();
        assert!(!option.is_valid(true));

        option.condition = catalog.condition(FilterCatalog::LESS_THAN).cloned();
        option.value = Some(CellValue::from(3));
        assert!(option.is_valid(true));
        // Non-final slots also need the operator.
        assert!(!option.is_valid(false));

        option.operator = Some(FilterOperator::And);
        assert!(option.is_valid(false));
    }
}
