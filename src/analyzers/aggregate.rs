use crate::analyzers::tier::classify;
use crate::analyzers::types::{AthleteAggregate, RankedAthlete};
use crate::normalize::WorkoutSession;

/// Workout types that do not count toward the session total, matched
/// case-insensitively. Sessions of these types still contribute their zone
/// minutes to the load score.
pub const EXCLUDED_WORKOUT_TYPES: [&str; 7] = [
    "strength",
    "other",
    "strength training",
    "pilates",
    "yoga",
    "training",
    "meditation",
];

/// An untyped session is not excluded: it counts.
fn is_excluded(workout_type: Option<&str>) -> bool {
    match workout_type {
        Some(t) => {
            let t = t.trim().to_lowercase();
            EXCLUDED_WORKOUT_TYPES.contains(&t.as_str())
        }
        None => false,
    }
}

/// Aggregates one athlete's sessions into a session count and load score.
///
/// The session count skips excluded types. The minute sum does not: zone
/// time earns load regardless of how the session was labeled, so
/// `load_minutes` runs over every session with absent minutes as zero,
/// weighting zone-3 double, truncated to whole minutes.
pub fn aggregate_athlete(name: &str, sessions: &[WorkoutSession]) -> AthleteAggregate {
    let counted_sessions = sessions
        .iter()
        .filter(|s| !is_excluded(s.workout_type.as_deref()))
        .count();

    let zone2: f64 = sessions.iter().filter_map(|s| s.zone2_minutes).sum();
    let zone3: f64 = sessions.iter().filter_map(|s| s.zone3_minutes).sum();
    let load_minutes = (zone2 + zone3 * 2.0) as i64;

    AthleteAggregate {
        name: name.to_string(),
        counted_sessions,
        load_minutes,
    }
}

/// Sorts aggregates ascending by load, ties by name, and attaches each one's
/// tier. Sorting is for display only; tiers come from absolute thresholds.
pub fn rank(mut aggregates: Vec<AthleteAggregate>) -> Vec<RankedAthlete> {
    aggregates.sort_by(|a, b| {
        a.load_minutes
            .cmp(&b.load_minutes)
            .then_with(|| a.name.cmp(&b.name))
    });
    aggregates
        .into_iter()
        .map(|aggregate| {
            let tier = classify(aggregate.load_minutes);
            RankedAthlete { aggregate, tier }
        })
        .collect()
}
