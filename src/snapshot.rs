/// A read-only snapshot of the layout host's state, taken once per reflow pass.
///
/// The engine never reads host state any other way, so every pass sees one consistent view
/// of scroll position, viewport, and configuration.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSnapshot {
    pub total_items: usize,
    /// Viewport size along the scroll axis.
    pub viewport_extent: u32,
    /// Current scroll offset. May be out of bounds; the engine clamps it.
    pub scroll_position: i64,
    /// Space between adjacent items.
    pub spacing: u32,
    /// Extra margin rendered beyond both edges of the viewport.
    pub overhang: u32,
    /// Size assumed for items before any measurement exists.
    pub default_item_size: u32,
}

impl LayoutSnapshot {
    pub fn new(total_items: usize, viewport_extent: u32, default_item_size: u32) -> Self {
        Self {
            total_items,
            viewport_extent,
            scroll_position: 0,
            spacing: 0,
            overhang: 0,
            default_item_size,
        }
    }

    pub fn with_total_items(mut self, total_items: usize) -> Self {
        self.total_items = total_items;
        self
    }

    pub fn with_viewport_extent(mut self, viewport_extent: u32) -> Self {
        self.viewport_extent = viewport_extent;
        self
    }

    pub fn with_scroll_position(mut self, scroll_position: i64) -> Self {
        self.scroll_position = scroll_position;
        self
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_overhang(mut self, overhang: u32) -> Self {
        self.overhang = overhang;
        self
    }

    pub fn with_default_item_size(mut self, default_item_size: u32) -> Self {
        self.default_item_size = default_item_size;
        self
    }

    /// Zero items or a zero-sized viewport: nothing can be windowed.
    pub fn is_degenerate(&self) -> bool {
        self.total_items == 0 || self.viewport_extent == 0
    }
}
