//! Slot location and proximity suggestions.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use sofra_corpus::{AvailabilitySlot, SelectionTarget};

/// Parse a `HH:MM` (or `HH:MM:SS`) time-of-day string.
fn parse_time(time: &str) -> Option<NaiveTime> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()
}

fn parse_zone(timezone: &str) -> Option<Tz> {
    let trimmed = timezone.trim();
    match trimmed.parse() {
        Ok(zone) => Some(zone),
        Err(_) => {
            tracing::debug!(timezone = trimmed, "unrecognized IANA zone");
            None
        }
    }
}

/// Find the slot whose start matches `date` + `time` in `timezone`.
///
/// The comparison renders each slot's start back in the caller's zone and
/// matches calendar date plus time-of-day at minute precision, so instants
/// stored with any offset resolve correctly. Malformed date, time, or zone
/// strings are treated as "no match," never as an error. Slot lists may
/// arrive unsorted; the first match in list order wins.
#[must_use]
pub fn find_slot_for_time<'a>(
    slots: &'a [AvailabilitySlot],
    date: &str,
    time: &str,
    timezone: &str,
) -> Option<&'a AvailabilitySlot> {
    let zone = parse_zone(timezone)?;
    let target_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let target_time = parse_time(time)?;

    slots.iter().find(|slot| {
        let local = slot.start.with_timezone(&zone);
        local.date_naive() == target_date
            && local.hour() == target_time.hour()
            && local.minute() == target_time.minute()
    })
}

/// Resolve a selection target into an absolute instant.
///
/// Returns `None` for malformed fields or local times that do not exist in
/// the zone (spring-forward gaps); ambiguous times resolve to the earlier
/// instant.
#[must_use]
pub fn resolve_target(target: &SelectionTarget) -> Option<DateTime<Utc>> {
    let zone = parse_zone(&target.timezone)?;
    let date = NaiveDate::parse_from_str(target.date.trim(), "%Y-%m-%d").ok()?;
    let time = parse_time(&target.time)?;
    zone.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Return up to `count` slots closest to `target`, nearest first.
///
/// Ordering is by absolute distance between slot start and the target
/// instant; equidistant slots keep their original list order (stable sort).
/// The input is never reordered in place and `count` is clamped to
/// `[0, slots.len()]`.
#[must_use]
pub fn suggested_slots(
    slots: &[AvailabilitySlot],
    target: DateTime<Utc>,
    count: usize,
) -> Vec<AvailabilitySlot> {
    let mut ordered: Vec<&AvailabilitySlot> = slots.iter().collect();
    ordered.sort_by_key(|slot| (slot.start - target).num_seconds().abs());
    ordered
        .into_iter()
        .take(count.min(slots.len()))
        .cloned()
        .collect()
}
