use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::Direction;

/// A raw box measured by the host for one item.
///
/// Margins default to zero. With `feature = "serde"`, field names follow the host's
/// camelCase payloads (`marginTop`, ...) and missing fields deserialize as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ItemMeasurement {
    pub width: u32,
    pub height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
}

impl ItemMeasurement {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A measurement that only carries a size on `direction`'s axis.
    pub fn along(direction: Direction, size: u32) -> Self {
        match direction {
            Direction::Vertical => Self::new(0, size),
            Direction::Horizontal => Self::new(size, 0),
        }
    }

    /// Sets margins in CSS order: top, right, bottom, left.
    pub fn with_margins(mut self, top: u32, right: u32, bottom: u32, left: u32) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    pub fn outer_width(&self) -> u32 {
        self.width
            .saturating_add(self.margin_left)
            .saturating_add(self.margin_right)
    }

    pub fn outer_height(&self) -> u32 {
        self.height
            .saturating_add(self.margin_top)
            .saturating_add(self.margin_bottom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MeasurementError {
    #[error("measurement key {key:?} is not an item index")]
    InvalidKey { key: String },
}

/// Validates a string-keyed measurement payload into `(index, measurement)` pairs.
///
/// Hosts that receive measurements keyed by arbitrary identifiers (e.g. a JSON object) should
/// pass them through here before calling `WindowEngine::update_item_sizes`. Keys may carry
/// surrounding whitespace; anything else that is not a non-negative integer is rejected.
pub fn parse_measurements<K, I>(
    entries: I,
) -> Result<Vec<(usize, ItemMeasurement)>, MeasurementError>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, ItemMeasurement)>,
{
    entries
        .into_iter()
        .map(|(key, measurement)| {
            let key = key.as_ref();
            key.trim()
                .parse::<usize>()
                .map(|index| (index, measurement))
                .map_err(|_| MeasurementError::InvalidKey {
                    key: key.to_string(),
                })
        })
        .collect()
}
