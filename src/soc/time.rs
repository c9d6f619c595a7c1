use crate::error::{TraceError, TraceResult};

const MINUTES_PER_HOUR: f64 = 60.0;

/// Converts an `HH:MM` time of day into fractional hours (`hour + minute / 60`).
///
/// Both parts must be integers; surrounding whitespace and a sign are
/// accepted. Values are not range-checked, so `"25:75"` is `26.25`.
///
/// # Errors
///
/// Returns `TraceError::InvalidTime` if the value is not two
/// colon-separated integers.
pub fn hours_of_day(value: &str) -> TraceResult<f64> {
    let invalid = || TraceError::InvalidTime {
        value: value.to_string(),
    };

    let mut parts = value.split(':');
    let (Some(hour), Some(minute), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let hour: i32 = hour.trim().parse().map_err(|_| invalid())?;
    let minute: i32 = minute.trim().parse().map_err(|_| invalid())?;

    Ok(f64::from(hour) + f64::from(minute) / MINUTES_PER_HOUR)
}

/// Hours elapsed from `previous` to `current`.
///
/// No wraparound handling: a gap crossing midnight comes out negative.
///
/// # Errors
///
/// Returns `TraceError::InvalidTime` if either value fails to parse.
pub fn time_gap(previous: &str, current: &str) -> TraceResult<f64> {
    Ok(hours_of_day(current)? - hours_of_day(previous)?)
}
