//! The webcash epoch and time conversions.
//!
//! All persisted times are unsigned seconds past the webcash epoch,
//! 2022-01-01T00:00:00Z. External time values are translated at the
//! library boundary; nothing else in the core does date arithmetic.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};
use wbc_core::{Error, Result};

/// The webcash epoch, 2022-01-01T00:00:00Z, in POSIX seconds.
pub const WC_EPOCH: u64 = 1_641_067_200;

/// Convert seconds past the webcash epoch to a UTC timestamp.
///
/// Fails with `Error::Overflow` when the shifted value leaves the POSIX
/// range and `Error::DbCorrupt` when the calendar conversion rejects it.
pub fn epoch_to_utc(seconds_past_epoch: u64) -> Result<DateTime<Utc>> {
    let posix = WC_EPOCH
        .checked_add(seconds_past_epoch)
        .ok_or(Error::Overflow)?;
    let posix = i64::try_from(posix).map_err(|_| Error::Overflow)?;
    Utc.timestamp_opt(posix, 0).single().ok_or(Error::DbCorrupt)
}

/// Convert a system time to seconds past the webcash epoch.
///
/// Times earlier than the epoch are `Error::InvalidArgument`; the scheme
/// did not exist before it, so such stamps cannot be genuine.
pub fn system_to_epoch(time: SystemTime) -> Result<u64> {
    let posix = time
        .duration_since(UNIX_EPOCH)
        .map_err(|_| Error::InvalidArgument)?
        .as_secs();
    posix.checked_sub(WC_EPOCH).ok_or(Error::InvalidArgument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn epoch_zero_is_new_year_2022() {
        let when = epoch_to_utc(0).unwrap();
        assert_eq!(when.to_rfc3339(), "2022-01-01T00:00:00+00:00");
    }

    #[test]
    fn epoch_conversion_round_trips() {
        let when = epoch_to_utc(86_400).unwrap();
        assert_eq!(when.timestamp() as u64, WC_EPOCH + 86_400);
    }

    #[test]
    fn shifted_overflow_is_reported() {
        assert_eq!(epoch_to_utc(u64::MAX), Err(Error::Overflow));
        assert_eq!(epoch_to_utc(i64::MAX as u64), Err(Error::Overflow));
    }

    #[test]
    fn pre_epoch_times_are_rejected() {
        let before = UNIX_EPOCH + Duration::from_secs(WC_EPOCH - 1);
        assert_eq!(system_to_epoch(before), Err(Error::InvalidArgument));
        let at_epoch = UNIX_EPOCH + Duration::from_secs(WC_EPOCH);
        assert_eq!(system_to_epoch(at_epoch), Ok(0));
        let after = UNIX_EPOCH + Duration::from_secs(WC_EPOCH + 5);
        assert_eq!(system_to_epoch(after), Ok(5));
    }
}
