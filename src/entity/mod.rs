//! SeaORM entities.
//!
//! Kept separate from `crate::models`: storage queries these and converts the
//! rows into business models with the `into_*` methods.

pub mod prelude;

pub mod announcements;
pub mod assignments;
pub mod attendances;
pub mod classes;
pub mod files;
pub mod materials;
pub mod schedules;
pub mod subjects;
pub mod submissions;
pub mod system_settings;
pub mod system_settings_audit;
pub mod topics;
pub mod users;

use chrono::{DateTime, Utc};

/// Unix seconds to UTC, falling back to the epoch for out-of-range values.
pub(crate) fn to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}
