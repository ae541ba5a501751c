//! Ordinal achievement tiers derived from zone-weighted load minutes.

/// Inclusive floor of each tier in load minutes, lowest tier first.
///
/// A load belongs to the highest tier whose floor it reaches:
/// `floor <= load < next floor`, the top tier open-ended.
pub const TIER_FLOORS: [i64; 5] = [0, 150, 300, 600, 1000];

/// Tier names, lowest first, indexed in step with [`TIER_FLOORS`].
pub const TIER_NAMES: [&str; 5] = [
    "Enerģijas ražotājs",
    "Labsajūtas meistars",
    "Metabolisma Inženieris",
    "Izturības Arhitekts",
    "Kaizen Leģenda",
];

/// Band edges shaded behind the comparison chart; threshold lines are drawn
/// at the interior edges.
pub const CHART_BANDS: [i64; 4] = [0, 150, 300, 1000];

/// One of the five achievement tiers.
///
/// | Load minutes   | Level | Name                   |
/// |----------------|-------|------------------------|
/// | [0, 150)       | 1     | Enerģijas ražotājs     |
/// | [150, 300)     | 2     | Labsajūtas meistars    |
/// | [300, 600)     | 3     | Metabolisma Inženieris |
/// | [600, 1000)    | 4     | Izturības Arhitekts    |
/// | [1000, ∞)      | 5     | Kaizen Leģenda         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier {
    index: usize,
}

impl Tier {
    /// 1-based ordinal level.
    pub fn level(self) -> usize {
        self.index + 1
    }

    pub fn name(self) -> &'static str {
        TIER_NAMES[self.index]
    }

    /// Inclusive lower bound in load minutes.
    pub fn floor(self) -> i64 {
        TIER_FLOORS[self.index]
    }

    /// Exclusive upper bound, `None` for the open-ended top tier.
    pub fn ceiling(self) -> Option<i64> {
        TIER_FLOORS.get(self.index + 1).copied()
    }
}

/// Maps load minutes to a tier.
///
/// Total over all inputs: a negative load is a precondition violation and
/// clamps to zero.
pub fn classify(load_minutes: i64) -> Tier {
    let load = load_minutes.max(0);
    let index = TIER_FLOORS
        .iter()
        .rposition(|&floor| load >= floor)
        .unwrap_or(0);
    Tier { index }
}
