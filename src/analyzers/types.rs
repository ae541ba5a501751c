//! Data types used by the comparison pipeline.

use chrono::NaiveDate;

use crate::analyzers::tier::Tier;

/// Load score and session count for one athlete (one input table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteAggregate {
    /// File stem of the source table.
    pub name: String,
    /// Sessions whose type is cardio-relevant (not in the excluded set).
    pub counted_sessions: usize,
    /// Zone-weighted minutes over every session, excluded types included.
    pub load_minutes: i64,
}

/// An athlete's aggregate with its tier attached, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedAthlete {
    pub aggregate: AthleteAggregate,
    pub tier: Tier,
}

/// Span of parseable workout days, used only for report labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateSpan {
    pub fn from_days(days: impl IntoIterator<Item = NaiveDate>) -> Option<DateSpan> {
        days.into_iter().fold(None, |span, day| {
            Some(match span {
                None => DateSpan {
                    first: day,
                    last: day,
                },
                Some(s) => DateSpan {
                    first: s.first.min(day),
                    last: s.last.max(day),
                },
            })
        })
    }

    /// Widens either span to cover both; `None` inputs contribute nothing.
    pub fn merge(a: Option<DateSpan>, b: Option<DateSpan>) -> Option<DateSpan> {
        match (a, b) {
            (Some(a), Some(b)) => Some(DateSpan {
                first: a.first.min(b.first),
                last: a.last.max(b.last),
            }),
            (span, None) | (None, span) => span,
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.first.format("%d.%m.%Y"),
            self.last.format("%d.%m.%Y")
        )
    }
}
