use crate::errors::{AppError, ValidationError};
use crate::models::{Mood, NewSessionRequest, SessionLog, SleepSession};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use rand::Rng;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};
use uuid::Uuid;

const SEED_NIGHTS: usize = 14;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("SOMNIA_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/sessions.json"))
}

/// Loads the session log, seeding fresh demo data when the file is missing
/// or unusable. Stored sessions that fail validation are dropped, not fatal.
pub async fn load_log(path: &Path) -> SessionLog {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<SessionLog>(&bytes) {
            Ok(log) => drop_invalid(log),
            Err(err) => {
                error!("failed to parse session file: {err}");
                seed_log()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no session file found, seeding demo data");
            seed_log()
        }
        Err(err) => {
            error!("failed to read session file: {err}");
            seed_log()
        }
    }
}

pub async fn persist_log(path: &Path, log: &SessionLog) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(log).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

fn drop_invalid(mut log: SessionLog) -> SessionLog {
    log.sessions.retain(|session| match validate_session(session) {
        Ok(()) => true,
        Err(err) => {
            warn!("dropping stored session: {err}");
            false
        }
    });
    log
}

pub fn validate_session(session: &SleepSession) -> Result<(), ValidationError> {
    if session.wake_time <= session.bed_time {
        return Err(ValidationError::WakeNotAfterBed {
            id: session.id.clone(),
        });
    }
    if !(1..=10).contains(&session.quality) {
        return Err(ValidationError::QualityOutOfRange {
            id: session.id.clone(),
            quality: session.quality,
        });
    }
    Ok(())
}

/// Turns a form submission into a validated session. A session's `date` is
/// always the morning the sleeper woke.
pub fn session_from_request(request: NewSessionRequest) -> Result<SleepSession, ValidationError> {
    let id = Uuid::new_v4().to_string();
    let bed_time = parse_timestamp(&id, "bed_time", &request.bed_time)?;
    let wake_time = parse_timestamp(&id, "wake_time", &request.wake_time)?;

    let session = SleepSession {
        date: wake_time.date(),
        id,
        bed_time,
        wake_time,
        quality: request.quality,
        mood: request.mood,
        notes: request.notes,
    };
    validate_session(&session)?;
    Ok(session)
}

fn parse_timestamp(
    id: &str,
    field: &'static str,
    value: &str,
) -> Result<NaiveDateTime, ValidationError> {
    // datetime-local inputs omit seconds; stored timestamps carry them.
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| ValidationError::MalformedTimestamp {
            id: id.to_string(),
            field,
        })
}

/// Fourteen nights of demo data ending today, newest first. Bedtimes fall
/// between 22:00 and 01:59, wake times between 06:00 and 08:59.
pub fn seed_log() -> SessionLog {
    let mut rng = rand::thread_rng();
    let today = Local::now().date_naive();

    let mut sessions = Vec::with_capacity(SEED_NIGHTS);
    for night in 0..SEED_NIGHTS {
        let morning = today - Duration::days((SEED_NIGHTS - 1 - night) as i64);
        let evening_start = (morning - Duration::days(1)).and_time(NaiveTime::MIN);

        let bed_time = evening_start + Duration::minutes(rng.gen_range(22 * 60..26 * 60));
        let wake_time =
            morning.and_time(NaiveTime::MIN) + Duration::minutes(rng.gen_range(6 * 60..9 * 60));

        sessions.push(SleepSession {
            id: format!("seed-{night}"),
            date: morning,
            bed_time,
            wake_time,
            quality: rng.gen_range(5..=9),
            mood: if rng.gen_bool(0.5) {
                Mood::Rested
            } else {
                Mood::Tired
            },
            notes: if night % 3 == 0 {
                "Had coffee too late.".to_string()
            } else {
                "Read a book before bed.".to_string()
            },
        });
    }

    sessions.reverse();
    SessionLog { sessions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(bed: &str, wake: &str, quality: u8) -> NewSessionRequest {
        NewSessionRequest {
            bed_time: bed.to_string(),
            wake_time: wake.to_string(),
            quality,
            mood: Mood::Neutral,
            notes: String::new(),
        }
    }

    #[test]
    fn form_submission_is_dated_by_the_wake_morning() {
        let session =
            session_from_request(request("2024-01-01T23:00", "2024-01-02T06:30:00", 8)).unwrap();
        assert_eq!(session.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(session.bed_time.format("%H:%M").to_string(), "23:00");
        assert!(!session.id.is_empty());
    }

    #[test]
    fn malformed_timestamp_is_rejected_with_the_field_name() {
        let err = session_from_request(request("last tuesday", "2024-01-02T06:30", 8)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedTimestamp {
                field: "bed_time",
                ..
            }
        ));
    }

    #[test]
    fn wake_at_or_before_bed_is_rejected() {
        let err =
            session_from_request(request("2024-01-02T06:30", "2024-01-01T23:00", 8)).unwrap_err();
        assert!(matches!(err, ValidationError::WakeNotAfterBed { .. }));

        let same = session_from_request(request("2024-01-02T06:30", "2024-01-02T06:30", 8));
        assert!(same.is_err());
    }

    #[test]
    fn quality_outside_range_is_rejected() {
        for quality in [0, 11] {
            let err =
                session_from_request(request("2024-01-01T23:00", "2024-01-02T06:30", quality))
                    .unwrap_err();
            assert!(matches!(err, ValidationError::QualityOutOfRange { .. }));
        }
    }

    #[test]
    fn seed_log_is_fourteen_valid_nights_newest_first() {
        let log = seed_log();
        assert_eq!(log.sessions.len(), SEED_NIGHTS);

        for pair in log.sessions.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
        for session in &log.sessions {
            validate_session(session).unwrap();
            assert_eq!(session.date, session.wake_time.date());
            assert!((1..=10).contains(&session.quality));
        }
        assert_eq!(log.sessions[0].date, Local::now().date_naive());
    }
}
