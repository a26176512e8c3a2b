//! A low-overhead binary event log for in-process tracing of
//! high-frequency events on SMP systems.
//!
//! An `elog` [`Log`](log::Log) is a fixed-capacity ring of fixed-width
//! event records, meant to sit in the hot path of a system that emits far
//! more events than anyone wants to store or look at individually — it
//! keeps the most recent `capacity` events and overwrites the rest. The
//! typical deployment keeps one `Log` per thread (or per CPU) with no
//! locking between them, and combines them after the fact with
//! [`Log::merge`](log::Log::merge), which also lines up the two logs'
//! otherwise-unrelated clocks.
//!
//! ```
//! use elog::codec::ArgValue;
//! use elog::log::Log;
//!
//! let mut log = Log::init(1024);
//! let ty = log.register_type("request id=%d path=%s", None);
//! log.emit(ty, 0, &[ArgValue::U32(7), ArgValue::Str("/healthz".into())]);
//!
//! for event in log.peek() {
//!     println!("{}", log.format_event(&event));
//! }
//! ```
//!
//! # Modules
//!
//! - [`clock`] — the monotonic-cycle/wall-clock time source.
//! - [`codec`] — the descriptor-driven payload encoder/decoder.
//! - [`registry`] — event type and track interning.
//! - [`ring`] — the fixed-capacity event ring itself.
//! - [`render`] — turns a decoded event back into a string.
//! - [`merge`] — clock alignment and time-ordered interleaving.
//! - [`wire`] — the versioned binary serialization envelope.
//! - [`log`] — [`Log`](log::Log), the facade tying all of the above together.
//!
//! # Non-goals
//!
//! `elog` does not provide an allocator, a cache-aligned container, a
//! general-purpose hash map, a full printf implementation, an SMP runtime,
//! a CLI, file packaging, or a graphical viewer; it also does not log
//! anything about its own operation (no self-referential tracing layer).
//! These are all either the host application's responsibility or outside
//! this crate's scope — see `DESIGN.md` for the reasoning behind each.

pub mod clock;
pub mod codec;
pub mod error;
pub mod log;
pub mod merge;
pub mod registry;
pub mod render;
pub mod ring;
pub mod wire;

pub use error::{ElogError, Result};
pub use log::{DecodedEvent, Log};
