//! Event type and track registries (component C3).
//!
//! Both registries are append-only, dense-indexed tables: an event's type
//! and track are `u32` indices into these `Vec`s, not strings, so the hot
//! path never touches a string at emit time. The two registries differ in
//! one important way: types are deduplicated by format string (emitting
//! the same call site twice must not grow the type table), tracks are not
//! (two threads calling `register_track("worker")` get two distinct track
//! entries — the name is a label, not an identity).


use std::collections::HashMap;

use crate::codec::infer_descriptor;

/// A registered event kind: its format string (for rendering), the
/// descriptor derived from that format (for the codec), and the table of
/// enum-argument strings interned for events of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct EventType {
    /// The format string used to dedup and render this type. If the type
    /// was registered with a `function` annotation, this is
    /// `"{function} {format}"`, matching the original implementation's
    /// convention of folding the function name into the dedup key.
    pub format: String,
    /// One descriptor code per argument, derived from `format` at
    /// registration time (see [`crate::codec::infer_descriptor`]).
    pub format_args: String,
    /// Strings interned for [`crate::codec::descriptor::ENUM`] arguments of
    /// events of this type, indexed by the `u32` each such argument stores.
    pub enum_strings: Vec<String>,
}

/// A named grouping for events, e.g. one per thread or subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
}

/// The type and track tables for one log.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: Vec<EventType>,
    types_by_format: HashMap<String, u32>,
    tracks: Vec<Track>,
}

impl Registry {
    /// A fresh registry with track 0 pre-registered as `"default"`,
    /// mirroring the original implementation's always-present default
    /// track.
    pub fn new() -> Self {
        let mut reg = Registry {
            types: Vec::new(),
            types_by_format: HashMap::new(),
            tracks: Vec::new(),
        };
        reg.register_track("default");
        reg
    }

    /// Registers an event type for `format`, optionally annotated with the
    /// function it belongs to. If this (function, format) pair — or this
    /// bare format, if no function was given — has already been
    /// registered, returns the existing index instead of creating a
    /// duplicate.
    pub fn register_type(&mut self, format: &str, function: Option<&str>) -> u32 {
        let key = match function {
            Some(f) => format!("{f} {format}"),
            None => format.to_string(),
        };
        if let Some(&idx) = self.types_by_format.get(&key) {
            return idx;
        }
        let format_args = infer_descriptor(format);
        let idx = self.types.len() as u32;
        self.types.push(EventType {
            format: key.clone(),
            format_args,
            enum_strings: Vec::new(),
        });
        self.types_by_format.insert(key, idx);
        idx
    }

    /// Registers an event type with an explicit descriptor, bypassing
    /// inference entirely. This is the only way to register a type whose
    /// payload uses [`crate::codec::descriptor::ENUM`] (`t`): no format
    /// string scan ever produces that code on its own (spec.md §4.2 lists
    /// it only as something a caller supplies directly), so a type that
    /// wants to render an enum-valued argument has to hand its descriptor
    /// in explicitly. Dedup and the function-annotation prefix behave
    /// exactly as in [`Registry::register_type`]; a caller-supplied
    /// descriptor always takes precedence over inference, per spec.md §4.2.
    pub fn register_type_with_descriptor(&mut self, format: &str, format_args: &str, function: Option<&str>) -> u32 {
        let key = match function {
            Some(f) => format!("{f} {format}"),
            None => format.to_string(),
        };
        if let Some(&idx) = self.types_by_format.get(&key) {
            return idx;
        }
        let idx = self.types.len() as u32;
        self.types.push(EventType {
            format: key.clone(),
            format_args: format_args.to_string(),
            enum_strings: Vec::new(),
        });
        self.types_by_format.insert(key, idx);
        idx
    }

    /// Registers a new track, always creating a new entry (no dedup).
    pub fn register_track(&mut self, name: &str) -> u32 {
        let idx = self.tracks.len() as u32;
        self.tracks.push(Track { name: name.to_string() });
        idx
    }

    pub fn type_by_index(&self, idx: u32) -> Option<&EventType> {
        self.types.get(idx as usize)
    }

    pub fn type_by_index_mut(&mut self, idx: u32) -> Option<&mut EventType> {
        self.types.get_mut(idx as usize)
    }

    pub fn track_by_index(&self, idx: u32) -> Option<&Track> {
        self.tracks.get(idx as usize)
    }

    pub fn types(&self) -> &[EventType] {
        &self.types
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Adopts a type from another registry during a merge: deduplicates by
    /// `format` exactly like [`Registry::register_type`], but when no
    /// existing entry matches, creates one with `format_args` supplied
    /// verbatim (the source registry already derived it once; re-deriving
    /// it from `format` would be redundant and, since `format` here may
    /// carry a function prefix, would infer from the wrong string).
    pub fn adopt_type(&mut self, format: &str, format_args: &str) -> u32 {
        if let Some(&idx) = self.types_by_format.get(format) {
            return idx;
        }
        let idx = self.types.len() as u32;
        self.types.push(EventType {
            format: format.to_string(),
            format_args: format_args.to_string(),
            enum_strings: Vec::new(),
        });
        self.types_by_format.insert(format.to_string(), idx);
        idx
    }

    /// Rebuilds a registry from already-decoded type and track tables, as
    /// done when deserializing a log: the dedup index is reconstructed from
    /// whatever types are present, so a subsequent `register_type` against
    /// a deserialized log still dedups correctly.
    pub fn from_parts(types: Vec<EventType>, tracks: Vec<Track>) -> Self {
        let mut types_by_format = HashMap::with_capacity(types.len());
        for (idx, t) in types.iter().enumerate() {
            types_by_format.entry(t.format.clone()).or_insert(idx as u32);
        }
        Registry {
            types,
            types_by_format,
            tracks,
        }
    }
}
