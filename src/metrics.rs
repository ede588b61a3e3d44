use crate::i18n::{self, Language};
use crate::models::{AggregateStats, DerivedPoint, SleepSession};

/// Offset spread (population std dev, minutes) divides by this before it is
/// subtracted from 100, so a ~200-minute spread bottoms out the score.
pub const DEFAULT_CONSISTENCY_DIVISOR: f64 = 2.0;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Projects one session into its chart point. A wake time at or before the
/// bed time flows through as a zero or negative duration, never an error.
pub fn derive_session_point(session: &SleepSession, lang: Language) -> DerivedPoint {
    let duration_ms = (session.wake_time - session.bed_time).num_milliseconds();

    DerivedPoint {
        label: i18n::short_date_label(session.date, lang),
        duration_hours: round1(duration_ms as f64 / MS_PER_HOUR),
        quality: session.quality,
        bedtime_offset_minutes: bedtime_offset_minutes(session),
    }
}

/// Projects the newest-first session log into points running oldest to
/// newest, left to right.
pub fn derive_points(sessions: &[SleepSession], lang: Language) -> Vec<DerivedPoint> {
    let mut points: Vec<DerivedPoint> = sessions
        .iter()
        .map(|session| derive_session_point(session, lang))
        .collect();
    points.reverse();
    points
}

/// Summary metrics over a point collection. Empty input yields all-zero
/// stats.
pub fn aggregate(points: &[DerivedPoint]) -> AggregateStats {
    aggregate_with_divisor(points, DEFAULT_CONSISTENCY_DIVISOR)
}

/// Same as [`aggregate`] with an explicit consistency divisor, which must
/// be positive.
pub fn aggregate_with_divisor(points: &[DerivedPoint], divisor: f64) -> AggregateStats {
    debug_assert!(divisor > 0.0, "consistency divisor must be positive");

    if points.is_empty() {
        return AggregateStats::default();
    }

    let count = points.len() as f64;
    let mut duration_sum = 0.0;
    let mut quality_sum = 0.0;
    for point in points {
        duration_sum += point.duration_hours;
        quality_sum += f64::from(point.quality);
    }

    AggregateStats {
        avg_duration_hours: duration_sum / count,
        avg_quality: quality_sum / count,
        consistency_score: consistency_score(points, divisor),
    }
}

// 100 at zero spread, clamped to 0-100. Population variance: divisor is the
// point count, not count - 1.
fn consistency_score(points: &[DerivedPoint], divisor: f64) -> f64 {
    let count = points.len() as f64;

    let mut offset_sum = 0.0;
    for point in points {
        offset_sum += f64::from(point.bedtime_offset_minutes);
    }
    let mean = offset_sum / count;

    let mut squared_sum = 0.0;
    for point in points {
        let diff = f64::from(point.bedtime_offset_minutes) - mean;
        squared_sum += diff * diff;
    }
    let std_dev = (squared_sum / count).sqrt();

    (100.0 - std_dev / divisor).clamp(0.0, 100.0)
}

// Minutes from midnight of the bed clock time, remapped into (-720, 720] so
// 23:30 (-30) and 00:15 (15) sit next to each other. 12:00 stays 720.
fn bedtime_offset_minutes(session: &SleepSession) -> i32 {
    use chrono::Timelike;

    let clock = session.bed_time.time();
    let minutes = (clock.hour() * 60 + clock.minute()) as i32;
    if minutes > 720 {
        minutes - 1440
    } else {
        minutes
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
