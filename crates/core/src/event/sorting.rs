use super::types::Event;

/// Sorts events newest first by creation time.
///
/// The sort is stable, so events created at the same instant keep their
/// relative order.
pub fn sort_events_newest_first(events: &mut [Event]) {
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Returns true if `events` is in non-increasing creation-time order.
pub fn is_newest_first(events: &[Event]) -> bool {
    events
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at)
}
