use core::fmt::{Display, Formatter};
use core::ops::Range;
use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};

/// One of the four fixed time-of-day categories.
///
/// The hour ranges are half-open and together cover 0..24 exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Morning,
    Daytime,
    Evening,
    Night,
}

impl Bucket {
    /// Hours of the day that fall into this bucket.
    #[must_use]
    pub const fn hours(self) -> Range<u32> {
        match self {
            Self::Morning => 6..12,
            Self::Daytime => 12..18,
            Self::Evening => 18..24,
            Self::Night => 0..6,
        }
    }

    /// Classify an hour of day. Returns `None` for hours outside 0..24.
    #[must_use]
    pub fn for_hour(hour: u32) -> Option<Self> {
        Self::iter().find(|bucket| bucket.hours().contains(&hour))
    }

    /// Label shown on the card.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Morning => "🌞 Morning",
            Self::Daytime => "🌆 Daytime",
            Self::Evening => "🌃 Evening",
            Self::Night => "🌙 Night",
        }
    }

    /// Whether this bucket counts toward the "early" side of the label.
    #[must_use]
    pub const fn is_day_side(self) -> bool {
        matches!(self, Self::Morning | Self::Daytime)
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Commit count and share for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    pub bucket: Bucket,
    pub name: &'static str,
    pub count: u64,
    pub percent: u32,
}

impl TimeBucket {
    /// Build a bucket entry, computing its share of `total`.
    ///
    /// `total` must be non-zero; callers reject empty distributions before getting here.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "commit counts are far below 2^52")]
    #[expect(clippy::cast_possible_truncation, reason = "the rounded share is within 0..=100")]
    #[expect(clippy::cast_sign_loss, reason = "the share is never negative")]
    pub fn new(bucket: Bucket, count: u64, total: u64) -> Self {
        debug_assert!(total > 0, "total must be non-zero");
        let percent = (count as f64 / total as f64 * 100.0).round() as u32;

        Self {
            bucket,
            name: bucket.display_name(),
            count,
            percent,
        }
    }
}
