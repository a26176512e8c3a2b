//! The time source collaborator (component C1).
//!
//! `elog` needs two numbers to timestamp an event: a cheap, monotonic
//! "cycle" counter sampled on every `emit`, and an absolute wall-clock
//! reading in nanoseconds sampled once per log (at `init` and again at
//! `serialize`). The ratio between how fast the two advance,
//! `nsec_per_cpu_clock`, is what lets a merge line up two logs that were
//! never on the same clock to begin with.
//!
//! A real deployment on bare metal would read the CPU's timestamp counter
//! directly; that register isn't something Rust's standard library (or any
//! crate in this workspace) exposes portably, so the default source here is
//! built from [`std::time::Instant`] and [`chrono`] instead. Anything that
//! behaves like a monotonic counter plus a wall clock satisfies the merge
//! and serialize algorithms, which never assume a particular tick rate —
//! they derive it from two samples. A host with access to `rdtsc` can
//! supply its own [`ClockSource`].


/// A monotonic cycle counter paired with a wall-clock nanosecond reading.
///
/// `now_cycles` must be monotonically non-decreasing for a single
/// `ClockSource` instance; `elog` does not require it to match any
/// particular unit (cycles, nanoseconds, anything) as long as the mapping
/// to nanoseconds stays linear over the life of the log.
pub trait ClockSource: Send + Sync {
    /// A monotonic counter, cheap enough to call on every emit.
    fn now_cycles(&self) -> u64;

    /// Nanoseconds since the Unix epoch.
    fn now_os_nsec(&self) -> u64;
}

/// The default [`ClockSource`]: [`std::time::Instant`] for cycles,
/// [`chrono::Utc`] for wall-clock nanoseconds.
#[derive(Debug)]
pub struct SystemClock {
    start: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    #[inline]
    fn now_cycles(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    #[inline]
    fn now_os_nsec(&self) -> u64 {
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0) as u64
    }
}

/// A single (wall-clock, cycle-counter) sample pair.
///
/// Every `LogMain` records one of these at `init` (`init_time`) and takes a
/// fresh one whenever it's about to be serialized (`serialize_time`); the
/// pair of samples is what the merge and serialize algorithms use to derive
/// `nsec_per_cpu_clock` and cross-log clock offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSample {
    pub os_nsec: u64,
    pub cpu: u64,
}

impl TimeSample {
    pub fn take(clock: &dyn ClockSource) -> Self {
        // Sample cycles first: if scheduling jitter stalls us between the
        // two reads, it inflates the apparent cpu-to-os-time ratio rather
        // than producing a negative one.
        let cpu = clock.now_cycles();
        let os_nsec = clock.now_os_nsec();
        TimeSample { os_nsec, cpu }
    }
}
