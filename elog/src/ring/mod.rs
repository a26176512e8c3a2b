//! The event ring (component C4): fixed-capacity, power-of-two, single
//! writer, no locks.
//!
//! This is the hot path. `emit` does three things and nothing else: stamp
//! a time, compute a slot from a monotonic sequence counter, and write the
//! record into that slot — unconditionally, even if the log has stopped
//! "counting" events (see below). There is no bounds check against a fill
//! level because there is no fill level: the ring always holds exactly
//! `capacity` records once it has seen at least `capacity` emits, and
//! older records are silently overwritten by newer ones at the same slot.
//! This is flight-recorder semantics, not a queue: nothing ever blocks on a
//! full ring, and nothing is ever dropped from the "front" — it is just
//! overwritten at the back.
//!
//! A capacity of zero is legal: it degrades the ring into a no-op sink,
//! useful for disabling collection entirely without special-casing the
//! call sites that emit into it.

mod __test__;

use crate::codec::MAX_PAYLOAD_BYTES;

/// One hot-path record: a timestamp already converted to seconds elapsed
/// since the owning log's `init_time`, the type/track indices assigned at
/// registration time, and the type's encoded payload bytes. Fixed size, so
/// the ring can be a flat `Vec` with no per-record allocation.
///
/// Storing `time` as seconds rather than a raw cycle count is what lets
/// [`crate::merge`] shift and re-sort events from a different clock domain
/// without having to know anything about where they originally came from —
/// by the time an event is sitting in the ring, its time is already in the
/// same units every other event in every log uses.
#[derive(Debug, Clone, Copy)]
pub struct EventRecord {
    pub time: f64,
    pub type_index: u32,
    pub track_index: u32,
    pub data: [u8; MAX_PAYLOAD_BYTES],
    pub data_len: u8,
}

impl Default for EventRecord {
    fn default() -> Self {
        EventRecord {
            time: 0.0,
            type_index: 0,
            track_index: 0,
            data: [0u8; MAX_PAYLOAD_BYTES],
            data_len: 0,
        }
    }
}

/// The ring buffer itself: rounds `requested_capacity` up to the next
/// power of two (0 stays 0) so slot selection is a bitmask instead of a
/// modulo.
#[derive(Debug, Clone)]
pub struct EventRing {
    capacity: usize,
    mask: usize,
    slots: Vec<EventRecord>,
    n_total_events: u64,
}

impl EventRing {
    pub fn new(requested_capacity: usize) -> Self {
        let capacity = if requested_capacity == 0 {
            0
        } else {
            requested_capacity.next_power_of_two()
        };
        EventRing {
            capacity,
            mask: capacity.saturating_sub(1),
            slots: vec![EventRecord::default(); capacity],
            n_total_events: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn n_total_events(&self) -> u64 {
        self.n_total_events
    }

    /// Writes `record` into the ring and advances the sequence counter if
    /// `n_total_events + 1 <= disable_limit`.
    ///
    /// The write happens first, unconditionally (as long as `capacity >
    /// 0`): an emit that lands exactly on the disable limit is recorded —
    /// only the *next* one, which would push the count past the limit, is
    /// silently dropped. Once the counter stops advancing, every
    /// subsequent emit keeps landing on (and overwriting) the same frozen
    /// slot, which is the intended "recording has stopped" end state
    /// rather than a special case.
    #[inline]
    pub fn emit(&mut self, record: EventRecord, disable_limit: u64) {
        if self.capacity == 0 {
            return;
        }
        let slot = (self.n_total_events as usize) & self.mask;
        self.slots[slot] = record;
        if self.n_total_events + 1 <= disable_limit {
            self.n_total_events += 1;
        }
    }

    /// Returns the currently-live records, oldest first, without
    /// consuming them.
    pub fn peek(&self) -> Vec<&EventRecord> {
        let n = self.n_total_events.min(self.capacity as u64) as usize;
        if n == 0 {
            return Vec::new();
        }
        let start = self.n_total_events - n as u64;
        (0..n)
            .map(|i| {
                let seq = start + i as u64;
                &self.slots[(seq as usize) & self.mask]
            })
            .collect()
    }
}
