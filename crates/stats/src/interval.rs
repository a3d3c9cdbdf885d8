//! Interval union over task execution slots.

use buildscope_core::TimeSlot;

use crate::statistics::saturating_sum;

/// Wall-clock time covered by the union of `slots`.
///
/// Overlapping, touching and nested slots are counted once, so the result is
/// the serial-equivalent duration of a set of possibly concurrent tasks.
pub fn non_parallel_duration(slots: &[TimeSlot]) -> i64 {
    saturating_sum(merge_slots(slots).iter().map(TimeSlot::duration))
}

/// Sum of the individual slot durations.
pub fn total_duration(slots: &[TimeSlot]) -> i64 {
    saturating_sum(slots.iter().map(TimeSlot::duration))
}

/// Share of task time that ran concurrently with other tasks (percent,
/// rounded down). `None` when the slots have no duration at all.
pub fn parallel_rate(slots: &[TimeSlot]) -> Option<i64> {
    let total = total_duration(slots);
    if total == 0 {
        return None;
    }
    let serial = non_parallel_duration(slots);
    Some(((total as i128 - serial as i128) * 100 / total as i128) as i64)
}

/// Merge `slots` into disjoint ranges ordered by start.
pub fn merge_slots(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut sorted = slots.to_vec();
    sorted.sort_by_key(|slot| (slot.started_at(), slot.finished_at()));

    let mut merged: Vec<(i64, i64)> = Vec::new();
    for slot in sorted {
        match merged.last_mut() {
            Some((_, end)) if slot.started_at() <= *end => {
                *end = (*end).max(slot.finished_at());
            }
            _ => merged.push((slot.started_at(), slot.finished_at())),
        }
    }

    merged
        .into_iter()
        .filter_map(|(start, end)| TimeSlot::new(start, end).ok())
        .collect()
}
