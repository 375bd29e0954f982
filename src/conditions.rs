//! # Derived Tide Conditions
//!
//! Interprets a windowed water-level time series. Two computations, both over
//! a 14-hour window centered on "now" (`now - 7h .. now + 7h`):
//!
//! - [`current_conditions`] walks the predicted water level (`wlp`) series
//!   and classifies the trend: the last observation strictly before now is
//!   the current value, and comparing it against the first observation at or
//!   after now decides rising versus falling.
//! - [`last_next_hilo`] reads the hi-lo extrema series (`wlp-hilo`), which
//!   the API returns as exactly the most recent past extremum and the nearest
//!   future one for this window. The lower of the two values is labeled low
//!   tide and the higher high tide, independent of temporal order.
//!
//! Both convert values to the configured display unit before any comparison.
//! An unexpected series shape (no observation on one side of now, fewer than
//! two hi-lo events) is an explicit [`Error::DataShape`]; missing events are
//! never synthesized.

use chrono::{DateTime, Duration, Utc};

use crate::config::{Language, Unit};
use crate::error::{Error, Result};
use crate::station::{Conditions, HiLoEvent, Observation, Trend};

/// Half-width of the observation window around "now".
pub const WINDOW_HOURS: i64 = 7;

/// The `from`/`to` bounds to request observations for.
pub fn window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        now - Duration::hours(WINDOW_HOURS),
        now + Duration::hours(WINDOW_HOURS),
    )
}

/// Classify the current tide trend from a `wlp` series window.
///
/// Observations are walked in chronological order. Equal values on both
/// sides of now classify as falling.
pub fn current_conditions(
    observations: &[Observation],
    now: DateTime<Utc>,
    unit: Unit,
) -> Result<Conditions> {
    let mut previous: Option<(DateTime<Utc>, f64)> = None;
    let mut next: Option<f64> = None;
    // Window extrema, tracked alongside the scan.
    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;

    for observation in observations {
        let value = unit.convert(observation.value);
        lowest = lowest.min(value);
        highest = highest.max(value);
        if observation.event_date < now {
            previous = Some((observation.event_date, value));
        } else if next.is_none() {
            next = Some(value);
        }
    }
    let _ = (lowest, highest);

    let (event_date, value) = previous.ok_or_else(|| {
        Error::DataShape("no water-level observation before the requested instant".to_string())
    })?;
    let next = next.ok_or_else(|| {
        Error::DataShape("no water-level observation after the requested instant".to_string())
    })?;

    let status = if value < next {
        Trend::Rising
    } else {
        Trend::Falling
    };
    Ok(Conditions {
        value,
        event_date,
        status,
    })
}

/// Label the two hi-lo extrema bracketing "now".
///
/// Expects the `wlp-hilo` query for the standard window to return exactly the
/// last past and next future extremum; only the first two observations are
/// inspected. QC flag and series id are dropped from the output.
pub fn last_next_hilo(
    observations: &[Observation],
    language: Language,
    unit: Unit,
) -> Result<(HiLoEvent, HiLoEvent)> {
    if observations.len() < 2 {
        return Err(Error::DataShape(format!(
            "expected two hi-lo events in the window, got {}",
            observations.len()
        )));
    }
    let first = &observations[0];
    let second = &observations[1];
    let first_value = unit.convert(first.value);
    let second_value = unit.convert(second.value);

    let (low_label, high_label) = language.tide_labels();
    let (first_label, second_label) = if first_value <= second_value {
        (low_label, high_label)
    } else {
        (high_label, low_label)
    };

    Ok((
        HiLoEvent {
            event_date: first.event_date,
            value: first_value,
            event: first_label.to_string(),
        },
        HiLoEvent {
            event_date: second.event_date,
            value: second_value,
            event: second_label.to_string(),
        },
    ))
}
