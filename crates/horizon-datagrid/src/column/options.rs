//! Display and interaction options for columns.
//!
//! Options are a typed struct with defaults resolved at construction.
//! Column variants override a subset of the defaults; applications adjust
//! the rest through [`Column::set_options`](super::Column::set_options) or
//! the `with_*` builders here.

use serde::{Deserialize, Serialize};

/// Preset column widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridWidth {
    /// 100 units.
    Small,
    /// 200 units.
    Medium,
    /// 400 units.
    Large,
    /// 750 units.
    XLarge,
}

impl GridWidth {
    /// The width in layout units.
    pub const fn units(self) -> f32 {
        match self {
            Self::Small => 100.0,
            Self::Medium => 200.0,
            Self::Large => 400.0,
            Self::XLarge => 750.0,
        }
    }
}

impl From<GridWidth> for f32 {
    fn from(width: GridWidth) -> Self {
        width.units()
    }
}

/// The fixed horizontal group a column renders in, independent of its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    /// Pinned to the left edge.
    Left,
    /// The scrolling centre group.
    #[default]
    Centre,
    /// Pinned to the right edge.
    Right,
}

/// Horizontal alignment of cell content, as a renderer hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Align to the start edge.
    #[default]
    Left,
    /// Centre the content.
    Centre,
    /// Align to the end edge.
    Right,
}

impl Alignment {
    /// The flexbox-style keyword renderers expect.
    pub const fn as_render_hint(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Centre => "center",
            Self::Right => "end",
        }
    }
}

/// Options controlling how a column displays and what interactions it allows.
///
/// Defaults: medium width, centre pin, visible, left-aligned, filterable,
/// sortable, interactable, manageable, draggable, name shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOptions {
    /// Default width in layout units.
    pub width: f32,
    /// Default pin group.
    pub pin: Pin,
    /// Whether the column starts hidden.
    pub hidden: bool,
    /// Cell content alignment.
    pub alignment: Alignment,
    /// Whether the column participates in filtering and search.
    pub filterable: bool,
    /// Whether the column participates in sorting.
    pub sortable: bool,
    /// Whether cells accept pointer interaction.
    pub interactable: bool,
    /// Whether the column appears in column-management UI.
    pub manageable: bool,
    /// Whether the column is a valid drag-reorder drop target.
    pub draggable: bool,
    /// Whether the header hides the column name.
    pub hide_name: bool,
    /// Icon identifier for the ascending sort indicator.
    pub asc_icon: String,
    /// Icon identifier for the descending sort indicator.
    pub desc_icon: String,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnOptions {
    /// Creates options with the standard defaults.
    pub fn new() -> Self {
        Self {
            width: GridWidth::Medium.units(),
            pin: Pin::Centre,
            hidden: false,
            alignment: Alignment::Left,
            filterable: true,
            sortable: true,
            interactable: true,
            manageable: true,
            draggable: true,
            hide_name: false,
            asc_icon: "mdi-sort-ascending".to_string(),
            desc_icon: "mdi-sort-descending".to_string(),
        }
    }

    /// Sets the width.
    pub fn with_width(mut self, width: impl Into<f32>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the pin group.
    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pin = pin;
        self
    }

    /// Sets the hidden flag.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Sets the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the filterable flag.
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Sets the sortable flag.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets the manageable flag.
    pub fn with_manageable(mut self, manageable: bool) -> Self {
        self.manageable = manageable;
        self
    }

    /// Sets the drop-target flag.
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Sets whether the header hides the column name.
    pub fn with_hide_name(mut self, hide_name: bool) -> Self {
        self.hide_name = hide_name;
        self
    }

    /// Sets the sort indicator icon identifiers.
    pub fn with_sort_icons(
        mut self,
        asc_icon: impl Into<String>,
        desc_icon: impl Into<String>,
    ) -> Self {
        self.asc_icon = asc_icon.into();
        self.desc_icon = desc_icon.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ColumnOptions::new();
        assert_eq!(options.width, 200.0);
        assert_eq!(options.pin, Pin::Centre);
        assert!(!options.hidden);
        assert!(options.filterable);
        assert!(options.sortable);
        assert!(options.manageable);
        assert!(options.draggable);
        assert!(!options.hide_name);
    }

    #[test]
    fn test_builder_methods() {
        let options = ColumnOptions::new()
            .with_width(GridWidth::Large)
            .with_pin(Pin::Right)
            .with_sortable(false);
        assert_eq!(options.width, 400.0);
        assert_eq!(options.pin, Pin::Right);
        assert!(!options.sortable);
    }

    #[test]
    fn test_alignment_render_hint() {
        assert_eq!(Alignment::Left.as_render_hint(), "start");
        assert_eq!(Alignment::Centre.as_render_hint(), "center");
        assert_eq!(Alignment::Right.as_render_hint(), "end");
    }
}
