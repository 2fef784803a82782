//! Cell validation rules.
//!
//! Rules are attached to columns and run against edited cell values. The
//! engine does not decide what to do with a failure; callers typically record
//! it via [`GridState::add_cell_error`](crate::state::GridState::add_cell_error).

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// The result of running a validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RuleOutcome {
    /// The value is acceptable.
    #[default]
    Valid,
    /// The value is rejected, with a message for the renderer.
    Invalid(String),
}

impl RuleOutcome {
    /// Returns `true` for `Valid`.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid(message) => write!(f, "{message}"),
        }
    }
}

/// Type alias for a validation rule.
pub type ValidationRule = Arc<dyn Fn(&CellValue) -> RuleOutcome + Send + Sync>;

/// A rule accepting numbers within a range.
///
/// Empty and non-numeric values pass: a missing value is not a range
/// violation.
pub fn number_in_range(
    min: f64,
    max: f64,
    min_inclusive: bool,
    max_inclusive: bool,
) -> ValidationRule {
    Arc::new(move |value: &CellValue| {
        let Some(number) = value.as_number() else {
            return RuleOutcome::Valid;
        };

        if number < min || (number == min && !min_inclusive) {
            return RuleOutcome::Invalid("Invalid, too small".to_string());
        }

        if number > max || (number == max && !max_inclusive) {
            return RuleOutcome::Invalid("Invalid, too big".to_string());
        }

        RuleOutcome::Valid
    })
}
