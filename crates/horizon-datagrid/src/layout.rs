//! Persisted column layouts.
//!
//! A [`GridLayout`] is a serializable snapshot of the per-column display
//! state (width, pin, visibility, order). An external settings store decides
//! where and how it is kept; the engine's contract is only that re-applying
//! a previously captured snapshot reproduces identical column grouping and
//! size outputs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::Pin;
use crate::state::GridState;

/// The persisted display state of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Column width in layout units.
    pub width: f32,
    /// Pin group.
    pub pin: Pin,
    /// Hidden flag.
    pub hidden: bool,
    /// Position in the user-adjusted order.
    pub order: usize,
}

/// A serializable snapshot of a grid's column layout, keyed by column key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridLayout {
    /// Per-column layout entries.
    pub columns: HashMap<String, ColumnLayout>,
}

impl GridLayout {
    /// Serializes the layout to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserializes a layout from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl<T> GridState<T> {
    /// Captures the current column layout for persistence.
    pub fn capture_layout(&self) -> GridLayout {
        let columns = self
            .column_states
            .read()
            .iter()
            .map(|(key, state)| {
                (
                    key.clone(),
                    ColumnLayout {
                        width: state.width,
                        pin: state.pin,
                        hidden: state.hidden,
                        order: state.order,
                    },
                )
            })
            .collect();

        GridLayout { columns }
    }

    /// Re-applies a previously captured layout.
    ///
    /// Entries for keys the state does not track are ignored; tracked
    /// columns missing from the snapshot keep their current state. Filter
    /// and sort specifications are untouched.
    pub fn apply_layout(&self, layout: &GridLayout) {
        let mut states = self.column_states.write();
        let mut applied = 0usize;

        for (key, entry) in &layout.columns {
            if let Some(state) = states.get_mut(key) {
                state.width = entry.width;
                state.pin = entry.pin;
                state.hidden = entry.hidden;
                state.order = entry.order;
                applied += 1;
            }
        }

        tracing::debug!(applied, "column layout restored");
    }
}
