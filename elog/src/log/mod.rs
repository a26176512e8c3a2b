//! `Log`: the facade that wires the time source, registry, ring, codec,
//! renderer, merger, and wire format together into the single type a
//! caller actually uses.
//!
//! None of the other modules in this crate know about each other —
//! [`crate::ring`] doesn't know how payloads are encoded, [`crate::merge`]
//! doesn't know how types are registered. `Log` is where that knowledge
//! lives: it owns one of each collaborator and is the only thing that
//! calls across module boundaries.


use std::io::{Read, Write};

use crate::clock::{ClockSource, SystemClock, TimeSample};
use crate::codec::{decode_args, encode_enum_args, ArgValue, MAX_PAYLOAD_BYTES};
use crate::error::Result;
use crate::merge::{clock_offset_seconds, merge_sorted, Timestamped};
use crate::registry::Registry;
use crate::render::render_event;
use crate::ring::{EventRecord, EventRing};
use crate::wire;

/// One event, fully resolved: its elapsed time since the log's `init_time`
/// (in seconds), the type/track it belongs to, and its arguments decoded
/// from the payload's descriptor-coded bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    pub time: f64,
    pub type_index: u32,
    pub track_index: u32,
    pub args: Vec<ArgValue>,
}

/// Wraps a [`DecodedEvent`] so [`crate::merge::merge_sorted`] can shift and
/// sort it without depending on this module.
struct TsEvent(DecodedEvent);

impl Timestamped for TsEvent {
    fn time(&self) -> f64 {
        self.0.time
    }
    fn set_time(&mut self, t: f64) {
        self.0.time = t;
    }
}

/// A single event log: one ring, one type/track registry, one clock.
///
/// Every method that mutates a `Log` (`emit`, `register_type`,
/// `register_track`, `merge`) assumes a single writer — see the crate's
/// concurrency notes. Reads (`peek`, `serialize`, `format_event`) are plain
/// `&self` methods and may run concurrently with each other, but not with a
/// writer; `Log` itself carries no internal locking to enforce that.
pub struct Log {
    clock: Box<dyn ClockSource>,
    registry: Registry,
    ring: EventRing,
    disable_limit: u64,
    init_time: TimeSample,
    /// Zeroed (`cpu == 0`) until the first `serialize` or merge-inherit;
    /// used as the sentinel for "this log has never been serialized or
    /// merged into" in `merge`'s clock-inheritance special case.
    serialize_time: TimeSample,
    nsec_per_cpu_clock: f64,
}

impl Log {
    /// Creates a log with the given ring capacity (rounded up to the next
    /// power of two; 0 is legal and disables collection) and the default,
    /// portable [`SystemClock`].
    pub fn init(capacity: usize) -> Self {
        Self::with_clock(capacity, Box::new(SystemClock::new()))
    }

    /// Like [`Log::init`], but with a caller-supplied clock source — useful
    /// for tests, or a host that can read a real hardware cycle counter.
    pub fn with_clock(capacity: usize, clock: Box<dyn ClockSource>) -> Self {
        let init_time = TimeSample::take(clock.as_ref());
        Log {
            clock,
            registry: Registry::new(),
            ring: EventRing::new(capacity),
            // Disabled by default: a log collects until explicitly capped,
            // matching the original implementation's `~0ULL` default.
            disable_limit: u64::MAX,
            init_time,
            serialize_time: TimeSample::default(),
            nsec_per_cpu_clock: 1.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn n_total_events(&self) -> u64 {
        self.ring.n_total_events()
    }

    pub fn init_time(&self) -> TimeSample {
        self.init_time
    }

    /// Caps the number of events ever counted by this log; once reached,
    /// the ring stops advancing (see [`crate::ring::EventRing::emit`]).
    /// Defaults to `u64::MAX` (effectively disabled).
    pub fn set_disable_limit(&mut self, limit: u64) {
        self.disable_limit = limit;
    }

    pub fn register_type(&mut self, format: &str, function: Option<&str>) -> u32 {
        self.registry.register_type(format, function)
    }

    /// Registers a type with an explicit descriptor instead of inferring one
    /// from `format`; needed for [`crate::codec::descriptor::ENUM`]-valued
    /// arguments, since no format string ever infers that code on its own.
    pub fn register_type_with_descriptor(&mut self, format: &str, format_args: &str, function: Option<&str>) -> u32 {
        self.registry.register_type_with_descriptor(format, format_args, function)
    }

    pub fn register_track(&mut self, name: &str) -> u32 {
        self.registry.register_track(name)
    }

    /// Records one event. This is the hot path: one clock read, one
    /// payload encode into a stack buffer, one ring write. Never blocks,
    /// never allocates (the `Vec<String>` growth in a type's
    /// `enum_strings` table is the one exception, and only on the first
    /// few occurrences of a new enum value for that type).
    #[inline]
    pub fn emit(&mut self, type_index: u32, track_index: u32, args: &[ArgValue]) {
        if self.ring.capacity() == 0 {
            return;
        }
        debug_assert!(
            self.registry.type_by_index(type_index).is_some(),
            "{}",
            crate::error::ElogError::BadTypeIndex(type_index)
        );
        debug_assert!(
            self.registry.track_by_index(track_index).is_some(),
            "{}",
            crate::error::ElogError::BadTrackIndex(track_index)
        );
        let now_cycles = self.clock.now_cycles();
        let time = (now_cycles as f64 - self.init_time.cpu as f64) * self.nsec_per_cpu_clock * 1e-9;

        let mut data = [0u8; MAX_PAYLOAD_BYTES];
        let data_len = match self.registry.type_by_index_mut(type_index) {
            Some(t) => encode_enum_args(&t.format_args, args, &mut t.enum_strings, &mut data) as u8,
            None => 0,
        };

        self.ring.emit(
            EventRecord {
                time,
                type_index,
                track_index,
                data,
                data_len,
            },
            self.disable_limit,
        );
    }

    /// Returns every currently-live event, oldest first, fully decoded.
    pub fn peek(&self) -> Vec<DecodedEvent> {
        self.ring
            .peek()
            .into_iter()
            .map(|r| self.decode_record(r))
            .collect()
    }

    fn decode_record(&self, r: &EventRecord) -> DecodedEvent {
        let (format_args, enum_strings): (&str, &[String]) = match self.registry.type_by_index(r.type_index) {
            Some(t) => (t.format_args.as_str(), t.enum_strings.as_slice()),
            None => ("", &[]),
        };
        let args = decode_args(format_args, &r.data[..r.data_len as usize], enum_strings).unwrap_or_default();
        DecodedEvent {
            time: r.time,
            type_index: r.type_index,
            track_index: r.track_index,
            args,
        }
    }

    /// Renders `event` using its type's format string.
    pub fn format_event(&self, event: &DecodedEvent) -> String {
        let format = self
            .registry
            .type_by_index(event.type_index)
            .map(|t| t.format.as_str())
            .unwrap_or("");
        render_event(format, &event.args)
    }

    /// Resolves `event`'s track index to the track's name, e.g. `"default"`
    /// for track 0 or whatever name was passed to `register_track`.
    pub fn format_track(&self, event: &DecodedEvent) -> &str {
        self.registry
            .track_by_index(event.track_index)
            .map(|t| t.name.as_str())
            .unwrap_or("")
    }

    fn encode_for_ring(&mut self, dec: &DecodedEvent) -> EventRecord {
        let mut data = [0u8; MAX_PAYLOAD_BYTES];
        let data_len = match self.registry.type_by_index_mut(dec.type_index) {
            Some(t) => encode_enum_args(&t.format_args, &dec.args, &mut t.enum_strings, &mut data) as u8,
            None => 0,
        };
        EventRecord {
            time: dec.time,
            type_index: dec.type_index,
            track_index: dec.track_index,
            data,
            data_len,
        }
    }

    /// Merges `src`'s events into `self`, remapping `src`'s types into
    /// `self`'s registry and aligning the two clocks. Track indices are
    /// copied verbatim from `src` (see spec.md §4.4: the merge's only two
    /// transformations are the type remap and the clock shift — track
    /// indices pass through unmodified, same as the original `elog_merge`).
    ///
    /// If `self` has never been serialized or merged into before (its
    /// `serialize_time` is still the zero sentinel from `init`), it
    /// inherits `src`'s `init_time`, `serialize_time`, and
    /// `nsec_per_cpu_clock` first — this is what lets a freshly-created
    /// "collector" log merge real per-thread logs into itself without
    /// having to fake up its own calibration samples.
    pub fn merge(&mut self, src: &Log) {
        if self.serialize_time.cpu == 0 {
            self.init_time = src.init_time;
            self.serialize_time = src.serialize_time;
            self.nsec_per_cpu_clock = src.nsec_per_cpu_clock;
        }

        let dt = clock_offset_seconds(self.init_time, self.nsec_per_cpu_clock, src.init_time, src.nsec_per_cpu_clock);

        let dst_events = self.peek();
        let src_events = src.peek();

        let mut type_remap = vec![0u32; src.registry.types().len()];
        for (i, t) in src.registry.types().iter().enumerate() {
            type_remap[i] = self.registry.adopt_type(&t.format, &t.format_args);
        }

        let dst_wrapped: Vec<TsEvent> = dst_events.into_iter().map(TsEvent).collect();
        let src_wrapped: Vec<TsEvent> = src_events
            .into_iter()
            .map(|mut e| {
                e.type_index = type_remap[e.type_index as usize];
                TsEvent(e)
            })
            .collect();

        let merged = merge_sorted(dst_wrapped, src_wrapped, dt);

        let mut new_ring = EventRing::new(self.ring.capacity());
        for TsEvent(dec) in merged {
            let record = self.encode_for_ring(&dec);
            // A merge replays an already-bounded set of events; it isn't a
            // fresh recording session, so the per-session disable limit
            // doesn't apply to the replay itself.
            new_ring.emit(record, u64::MAX);
        }
        self.ring = new_ring;
    }

    /// Serializes this log to `w` in the versioned binary envelope (see
    /// [`crate::wire`]), first taking a fresh wall-clock/cycle sample as
    /// the envelope's `serialize_time`.
    pub fn serialize<W: Write>(&mut self, w: &mut W) -> Result<()> {
        self.serialize_time = TimeSample::take(self.clock.as_ref());
        wire::write_log(self, w)
    }

    /// Reconstructs a `Log` from bytes written by [`Log::serialize`].
    /// The reconstructed log uses [`SystemClock`] going forward (its
    /// `init_time`/`nsec_per_cpu_clock` come from the envelope, not from a
    /// live clock read) and has no disable limit set.
    pub fn deserialize<R: Read>(r: &mut R) -> Result<Log> {
        wire::read_log(r)
    }

    // -- accessors used by `wire`; not part of the public surface. --

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn serialize_time(&self) -> TimeSample {
        self.serialize_time
    }

    pub(crate) fn nsec_per_cpu_clock(&self) -> f64 {
        self.nsec_per_cpu_clock
    }

    pub(crate) fn from_parts(
        ring_capacity: usize,
        registry: Registry,
        events: Vec<DecodedEvent>,
        init_time: TimeSample,
        serialize_time: TimeSample,
        nsec_per_cpu_clock: f64,
    ) -> Log {
        let mut log = Log {
            clock: Box::new(SystemClock::new()),
            registry,
            ring: EventRing::new(ring_capacity),
            disable_limit: u64::MAX,
            init_time,
            serialize_time,
            nsec_per_cpu_clock,
        };
        for dec in events {
            let record = log.encode_for_ring(&dec);
            log.ring.emit(record, u64::MAX);
        }
        log
    }
}
