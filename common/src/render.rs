//! Screen regions, dirty tracking and the steady-state redraw cadence.
//!
//! The host runtime owns the layer tree: the face only marks regions dirty and
//! paints a region when asked. [`DirtyRegions`] is a bitmask so a full set of
//! pending redraws fits in one `u16`.

use chrono::Timelike;

use crate::power::TickUnit;

// =============================================================================
// Regions
// =============================================================================

/// A paintable region of the face. Each maps to one host layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Region {
    /// Dial and tick marks.
    Background = 0,
    /// Invisible layer whose paint callback chases the free quadrants.
    Indicators = 1,
    Date = 2,
    Battery = 3,
    Bluetooth = 4,
    HourHand = 5,
    MinuteHand = 6,
    SecondHand = 7,
    /// Centre cap covering the hand pivots.
    Center = 8,
}

impl Region {
    /// Paint order, back to front.
    pub const Z_ORDER: [Self; 9] = [
        Self::Background,
        Self::Indicators,
        Self::Date,
        Self::Battery,
        Self::Bluetooth,
        Self::HourHand,
        Self::MinuteHand,
        Self::SecondHand,
        Self::Center,
    ];

    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u8
    }

    /// Short name for logs and the debug page.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Indicators => "indicators",
            Self::Date => "date",
            Self::Battery => "battery",
            Self::Bluetooth => "bluetooth",
            Self::HourHand => "hour",
            Self::MinuteHand => "minute",
            Self::SecondHand => "second",
            Self::Center => "center",
        }
    }
}

// =============================================================================
// Dirty Region Set
// =============================================================================

/// Set of regions waiting for a repaint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DirtyRegions(u16);

impl DirtyRegions {
    pub const EMPTY: Self = Self(0);

    /// Every region.
    pub const ALL: Self = {
        let mut bits = 0;
        let mut i = 0;
        while i < Region::Z_ORDER.len() {
            bits |= Region::Z_ORDER[i].bit();
            i += 1;
        }
        Self(bits)
    };

    #[inline]
    pub const fn insert(
        &mut self,
        region: Region,
    ) {
        self.0 |= region.bit();
    }

    #[inline]
    pub const fn remove(
        &mut self,
        region: Region,
    ) {
        self.0 &= !region.bit();
    }

    #[inline]
    pub const fn contains(
        &self,
        region: Region,
    ) -> bool {
        self.0 & region.bit() != 0
    }

    /// Builder form of [`insert`](Self::insert).
    #[inline]
    #[must_use]
    pub const fn with(
        mut self,
        region: Region,
    ) -> Self {
        self.insert(region);
        self
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Merge another set into this one.
    #[inline]
    pub const fn extend(
        &mut self,
        other: Self,
    ) {
        self.0 |= other.0;
    }

    /// Take every pending region, leaving the set empty.
    #[inline]
    pub const fn take(&mut self) -> Self {
        let taken = *self;
        self.0 = 0;
        taken
    }

    /// Regions in paint order.
    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        Region::Z_ORDER.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Region> for DirtyRegions {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for region in iter {
            set.insert(region);
        }
        set
    }
}

// =============================================================================
// Steady-State Cadence
// =============================================================================

/// Regions a tick redraws once the startup animation has finished.
///
/// Per-second ticks:
/// - second hand every tick
/// - minute hand and indicator chase when the second is a multiple of ten
/// - hour hand when the minute hand redraws and the minute is even
/// - date at exactly 00:00:00
///
/// Per-minute ticks redraw the minute hand and indicators every tick, the hour hand
/// on even minutes and the date at 00:00.
pub fn tick_regions<T: Timelike>(
    now: &T,
    unit: TickUnit,
) -> DirtyRegions {
    let mut regions = DirtyRegions::EMPTY;

    let minute_due = match unit {
        TickUnit::Second => {
            regions.insert(Region::SecondHand);
            now.second() % 10 == 0
        }
        TickUnit::Minute => true,
    };

    if minute_due {
        regions.insert(Region::MinuteHand);
        regions.insert(Region::Indicators);
        if now.minute() % 2 == 0 {
            regions.insert(Region::HourHand);
        }
    }

    let midnight = now.hour() == 0 && now.minute() == 0 && (unit == TickUnit::Minute || now.second() == 0);
    if midnight {
        regions.insert(Region::Date);
    }

    regions
}

// =============================================================================
// Unit Tests
// =============================================================================
