//! Container size arithmetic.
//!
//! Sizes are always whole rows of [`ROW_WIDTH`] slots between [`MIN_SIZE`]
//! and [`MAX_SIZE`]. Storage persists upgrades, not sizes; see
//! [`echest_storage::size_for_upgrades`] for that conversion.

use crate::error::{CoreError, CoreResult};

/// Slots per row.
pub const ROW_WIDTH: u32 = 9;

/// Smallest normalized size (one row).
pub const MIN_SIZE: u32 = 9;

/// Largest normalized size (six rows).
pub const MAX_SIZE: u32 = 54;

/// Largest row count an admin may request.
pub const MAX_ROWS: u32 = MAX_SIZE / ROW_WIDTH;

/// Rounds `size` down to a whole row and clamps it to `[9, 54]`.
///
/// ```
/// use echest_core::policy::normalize;
///
/// assert_eq!(normalize(5), 9);
/// assert_eq!(normalize(40), 36);
/// assert_eq!(normalize(100), 54);
/// ```
#[must_use]
pub fn normalize(size: i64) -> u32 {
    let rows = size.div_euclid(i64::from(ROW_WIDTH));
    let rounded = rows.saturating_mul(i64::from(ROW_WIDTH));
    // clamped into [9, 54], so the cast cannot truncate
    rounded.clamp(i64::from(MIN_SIZE), i64::from(MAX_SIZE)) as u32
}

/// Converts an admin's row count into a size.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRows`] unless `1 <= rows <= 6`.
pub fn rows_to_size(rows: u32) -> CoreResult<u32> {
    if (1..=MAX_ROWS).contains(&rows) {
        Ok(rows * ROW_WIDTH)
    } else {
        Err(CoreError::InvalidRows { rows })
    }
}

/// Size after adding `count` upgrades to `current`, capped at [`MAX_SIZE`].
#[must_use]
pub fn upgraded_size(current: u32, count: u32) -> u32 {
    current
        .saturating_add(count.saturating_mul(ROW_WIDTH))
        .min(MAX_SIZE)
}

/// Result of applying upgrades to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// The container grew; the caller should consume the upgrade item.
    Changed {
        /// Size before the upgrade.
        from: u32,
        /// Size after the upgrade.
        to: u32,
    },
    /// The container was already at [`MAX_SIZE`]; nothing was written.
    Unchanged,
    /// The container should have grown but the new size was not stored.
    /// The caller should keep the upgrade item.
    WriteFailed {
        /// Size before the upgrade.
        from: u32,
        /// Size that could not be stored.
        to: u32,
    },
}

impl UpgradeOutcome {
    /// Returns true if the size changed.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}
