//! The merger (component C6): combines events from two logs that were
//! never on the same clock into one consistently-ordered timeline.
//!
//! Two logs recorded independently — one per thread, one per CPU, whatever
//! the deployment — agree on nothing except that each one's own events are
//! internally ordered. Lining them up requires (1) deciding what the time
//! offset between the two logs' origins actually is, and (2) applying that
//! offset to one side before a stable sort interleaves the two event
//! streams. This module owns the offset heuristic; [`crate::log::Log::merge`]
//! owns remapping types/tracks and replaying the combined stream back into
//! a ring.

mod __test__;

use crate::clock::TimeSample;

/// If the two logs' cycle-to-nanosecond rates agree this closely, and the
/// CPU-clock-derived offset agrees with the OS-clock-derived offset this
/// closely, the CPU-derived offset is used (it's immune to wall-clock
/// adjustments mid-run); otherwise the OS-clock offset is used.
const RATE_AGREEMENT_EPSILON: f64 = 1e-2;
const OFFSET_AGREEMENT_EPSILON_NS: f64 = 100.0;

/// Computes the time offset, in seconds, to add to `src`'s event
/// timestamps so they line up with `dst`'s timeline.
///
/// Two independent estimates of "how much later did src start than dst"
/// are available: the difference between the two wall-clock samples taken
/// at each log's `init_time`, and the difference between the two cycle
/// counts at `init_time` scaled by the average of the two logs' measured
/// nanoseconds-per-cycle rates. When both estimates agree, the cycle-based
/// one wins, since it isn't subject to wall-clock step adjustments that can
/// happen between the two inits; otherwise the wall-clock estimate is used
/// as the more conservative fallback.
pub fn clock_offset_seconds(
    dst_init: TimeSample,
    dst_nsec_per_cpu_clock: f64,
    src_init: TimeSample,
    src_nsec_per_cpu_clock: f64,
) -> f64 {
    let dt_os_ns = src_init.os_nsec as f64 - dst_init.os_nsec as f64;
    let dt_cpu_ns = (src_init.cpu as f64 - dst_init.cpu as f64)
        * 0.5
        * (src_nsec_per_cpu_clock + dst_nsec_per_cpu_clock);

    let rates_agree = (src_nsec_per_cpu_clock - dst_nsec_per_cpu_clock).abs() < RATE_AGREEMENT_EPSILON;
    let offsets_agree = (dt_os_ns - dt_cpu_ns).abs() < OFFSET_AGREEMENT_EPSILON_NS;

    let dt_ns = if rates_agree && offsets_agree { dt_cpu_ns } else { dt_os_ns };
    dt_ns * 1e-9
}

/// A minimal view of a decoded event, generic enough for the sort/shift
/// step to operate on without depending on [`crate::log`]'s richer
/// `DecodedEvent` (which also carries resolved type/track names).
pub trait Timestamped {
    fn time(&self) -> f64;
    fn set_time(&mut self, t: f64);
}

/// Applies the clock offset and produces one ascending-by-time sequence
/// from `dst_events` (already in dst's frame) and `src_events` (in src's
/// local frame). Per the offset's sign: a positive offset means src
/// started later, so it's src's events that get shifted forward to land
/// in dst's frame; a negative offset shifts dst's events instead, leaving
/// src's (which started first) as the frame of reference.
pub fn merge_sorted<T: Timestamped>(mut dst_events: Vec<T>, mut src_events: Vec<T>, dt_seconds: f64) -> Vec<T> {
    if dt_seconds > 0.0 {
        for e in src_events.iter_mut() {
            e.set_time(e.time() + dt_seconds);
        }
    } else if dt_seconds < 0.0 {
        for e in dst_events.iter_mut() {
            e.set_time(e.time() + dt_seconds);
        }
    }
    dst_events.append(&mut src_events);
    dst_events.sort_by(|a, b| a.time().partial_cmp(&b.time()).expect("event times are never NaN"));
    dst_events
}
