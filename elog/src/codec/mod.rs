//! The self-describing payload codec (component C2).
//!
//! Every event type carries a *descriptor*: a short string of single-byte
//! codes, one per argument, that says how to read that argument's bytes out
//! of a record's fixed-size payload. The descriptor is derived once, from
//! the type's printf-style format string, at `register_type` time — the
//! hot path never re-parses the format string, it only ever walks the
//! already-computed descriptor.
//!
//! Reads and writes against the payload are unaligned: the fixed-size
//! buffer is a plain `[u8; N]`, and fields of different widths get packed
//! back to back with no padding, so a `u64` can easily start on a
//! non-8-byte boundary. `byteorder`'s slice-based API handles this directly
//! (it has never assumed alignment), which is why it's used here instead of
//! hand-rolled `read_unaligned::<T>` pointer casts.

mod __test__;

use byteorder::{ByteOrder, LittleEndian};

/// Size of the fixed payload area carried inline in every [`crate::ring::EventRecord`].
///
/// Large enough for a handful of scalar arguments or one short inline
/// string; an event whose encoded payload would overflow this is a caller
/// bug, caught by `debug_assert!` in [`encode_args`] and silently truncated
/// in release builds (matching the hot path's "never panics in production"
/// posture, spec.md §7).
pub const MAX_PAYLOAD_BYTES: usize = 64;

/// One decoded/encoded argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    /// An index into the owning [`crate::registry::EventType`]'s
    /// `enum_strings` table, resolved to the string it names.
    Enum(String),
}

/// Descriptor codes, one byte per argument, in [`crate::registry::EventType::format_args`].
pub mod descriptor {
    pub const U8: u8 = b'0';
    pub const U16: u8 = b'1';
    pub const U32: u8 = b'2';
    pub const U64: u8 = b'3';
    pub const F32: u8 = b'e';
    pub const F64: u8 = b'f';
    pub const STR: u8 = b's';
    pub const ENUM: u8 = b't';
}

/// Derives a descriptor string from a printf-style format string.
///
/// Matches the original implementation's inference loop
/// (`elog_event_type_register` in `clib/elog.c`) exactly: only the single
/// character immediately following `%` is inspected, with no scan past
/// width/flag/precision characters to find a "real" conversion letter.
/// `%f` becomes [`descriptor::F64`], `%s` becomes [`descriptor::STR`], and
/// `%d`/`%x`/`%u` — along with anything else, including a flag or width
/// digit immediately after `%` (e.g. the `0` in `%05d`, or the `-` in
/// `%-10s`) — default to [`descriptor::U32`], the same `default: case 'd':
/// case 'x': case 'u':` grouping the original's `switch` uses. This means a
/// flag/width-prefixed `%s` or `%f` is misclassified as an integer, exactly
/// as in the original; `format_args` supplied explicitly at registration
/// (see [`crate::registry::Registry::register_type_with_descriptor`])
/// bypasses this inference entirely. `%%` is a literal percent and consumes
/// no argument, per spec.md §4.2.
pub fn infer_descriptor(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '%' {
            i += 1;
            continue;
        }
        if i + 1 >= chars.len() {
            i += 1;
            continue;
        }
        match chars[i + 1] {
            '%' => {}
            'f' => out.push(descriptor::F64 as char),
            's' => out.push(descriptor::STR as char),
            _ => out.push(descriptor::U32 as char),
        }
        i += 2;
    }
    out
}

/// Encodes `args` into `buf` according to `desc`, interning any string
/// arguments whose descriptor code is [`descriptor::ENUM`] into
/// `enum_strings` (appending new ones, never deduplicating — every enum
/// argument gets its own slot, matching spec.md §4.2's "index assigned at
/// encode time" rule). Inline [`descriptor::STR`] arguments are written
/// NUL-terminated directly into `buf`.
///
/// Returns the number of bytes written. In debug builds, writing past
/// `buf`'s end panics via `debug_assert!`; in release builds the payload is
/// silently truncated, matching the hot path's never-panics posture.
pub fn encode_args(desc: &str, args: &[ArgValue], buf: &mut [u8; MAX_PAYLOAD_BYTES]) -> usize {
    let mut off = 0usize;
    for (code, arg) in desc.bytes().zip(args.iter()) {
        off = encode_one(code, arg, buf, off);
    }
    off
}

fn encode_one(code: u8, arg: &ArgValue, buf: &mut [u8; MAX_PAYLOAD_BYTES], off: usize) -> usize {
    match (code, arg) {
        (descriptor::U8, ArgValue::U8(v)) => {
            debug_assert!(off + 1 <= MAX_PAYLOAD_BYTES, "payload overflow");
            if off + 1 <= MAX_PAYLOAD_BYTES {
                buf[off] = *v;
            }
            off + 1
        }
        (descriptor::U16, ArgValue::U16(v)) => {
            debug_assert!(off + 2 <= MAX_PAYLOAD_BYTES, "payload overflow");
            if off + 2 <= MAX_PAYLOAD_BYTES {
                LittleEndian::write_u16(&mut buf[off..off + 2], *v);
            }
            off + 2
        }
        (descriptor::U32, ArgValue::U32(v)) => {
            debug_assert!(off + 4 <= MAX_PAYLOAD_BYTES, "payload overflow");
            if off + 4 <= MAX_PAYLOAD_BYTES {
                LittleEndian::write_u32(&mut buf[off..off + 4], *v);
            }
            off + 4
        }
        (descriptor::U64, ArgValue::U64(v)) => {
            debug_assert!(off + 8 <= MAX_PAYLOAD_BYTES, "payload overflow");
            if off + 8 <= MAX_PAYLOAD_BYTES {
                LittleEndian::write_u64(&mut buf[off..off + 8], *v);
            }
            off + 8
        }
        (descriptor::F32, ArgValue::F32(v)) => {
            debug_assert!(off + 4 <= MAX_PAYLOAD_BYTES, "payload overflow");
            if off + 4 <= MAX_PAYLOAD_BYTES {
                LittleEndian::write_f32(&mut buf[off..off + 4], *v);
            }
            off + 4
        }
        (descriptor::F64, ArgValue::F64(v)) => {
            debug_assert!(off + 8 <= MAX_PAYLOAD_BYTES, "payload overflow");
            if off + 8 <= MAX_PAYLOAD_BYTES {
                LittleEndian::write_f64(&mut buf[off..off + 8], *v);
            }
            off + 8
        }
        (descriptor::STR, ArgValue::Str(s)) => {
            let bytes = s.as_bytes();
            let n = bytes.len() + 1; // + NUL
            debug_assert!(off + n <= MAX_PAYLOAD_BYTES, "payload overflow");
            let avail = MAX_PAYLOAD_BYTES.saturating_sub(off);
            let copy = bytes.len().min(avail.saturating_sub(1));
            buf[off..off + copy].copy_from_slice(&bytes[..copy]);
            if off + copy < MAX_PAYLOAD_BYTES {
                buf[off + copy] = 0;
            }
            off + n
        }
        (descriptor::ENUM, ArgValue::Enum(s)) => {
            // The caller is responsible for interning `s` into
            // `enum_strings` and passing the resulting index back as a
            // `U32`; `encode_args` only handles scalar widths for `t`.
            // This arm exists so callers can round-trip `ArgValue::Enum`
            // through `encode_enum_args` below.
            let _ = s;
            off
        }
        _ => off,
    }
}

/// Like [`encode_args`], but resolves [`ArgValue::Enum`] arguments against
/// `enum_strings` (appending the string and using its new index) before
/// encoding, so a `t`-coded field actually gets a `u32` index written.
pub fn encode_enum_args(
    desc: &str,
    args: &[ArgValue],
    enum_strings: &mut Vec<String>,
    buf: &mut [u8; MAX_PAYLOAD_BYTES],
) -> usize {
    let mut off = 0usize;
    for (code, arg) in desc.bytes().zip(args.iter()) {
        if code == descriptor::ENUM {
            if let ArgValue::Enum(s) = arg {
                let idx = enum_strings.len() as u32;
                enum_strings.push(s.clone());
                off = encode_one(descriptor::U32, &ArgValue::U32(idx), buf, off);
                continue;
            }
        }
        off = encode_one(code, arg, buf, off);
    }
    off
}

/// Decodes the arguments described by `desc` out of `buf`, resolving
/// [`descriptor::ENUM`] fields against `enum_strings`.
///
/// Malformed input (a descriptor code not in [`descriptor`], or an inline
/// string missing its NUL terminator) yields an error rather than a panic,
/// since decode runs on data that may have crossed a process boundary via
/// [`crate::wire`].
pub fn decode_args(desc: &str, buf: &[u8], enum_strings: &[String]) -> crate::error::Result<Vec<ArgValue>> {
    let mut out = Vec::with_capacity(desc.len());
    let mut off = 0usize;
    for code in desc.bytes() {
        let (value, next_off) = decode_one(code, buf, off, enum_strings)?;
        out.push(value);
        off = next_off;
    }
    Ok(out)
}

fn decode_one(
    code: u8,
    buf: &[u8],
    off: usize,
    enum_strings: &[String],
) -> crate::error::Result<(ArgValue, usize)> {
    use crate::error::ElogError;
    let need = |n: usize| -> crate::error::Result<()> {
        if off + n > buf.len() {
            Err(ElogError::Truncated {
                offset: off,
                needed: off + n - buf.len(),
            })
        } else {
            Ok(())
        }
    };
    match code {
        descriptor::U8 => {
            need(1)?;
            Ok((ArgValue::U8(buf[off]), off + 1))
        }
        descriptor::U16 => {
            need(2)?;
            Ok((ArgValue::U16(LittleEndian::read_u16(&buf[off..off + 2])), off + 2))
        }
        descriptor::U32 => {
            need(4)?;
            Ok((ArgValue::U32(LittleEndian::read_u32(&buf[off..off + 4])), off + 4))
        }
        descriptor::U64 => {
            need(8)?;
            Ok((ArgValue::U64(LittleEndian::read_u64(&buf[off..off + 8])), off + 8))
        }
        descriptor::F32 => {
            need(4)?;
            Ok((ArgValue::F32(LittleEndian::read_f32(&buf[off..off + 4])), off + 4))
        }
        descriptor::F64 => {
            need(8)?;
            Ok((ArgValue::F64(LittleEndian::read_f64(&buf[off..off + 8])), off + 8))
        }
        descriptor::STR => {
            let nul = buf[off..]
                .iter()
                .position(|&b| b == 0)
                .ok_or(ElogError::UnterminatedString)?;
            let s = std::str::from_utf8(&buf[off..off + nul])?.to_string();
            Ok((ArgValue::Str(s), off + nul + 1))
        }
        descriptor::ENUM => {
            need(4)?;
            let idx = LittleEndian::read_u32(&buf[off..off + 4]) as usize;
            let s = enum_strings.get(idx).cloned().unwrap_or_default();
            Ok((ArgValue::Enum(s), off + 4))
        }
        other => Err(ElogError::UnknownDescriptor(other)),
    }
}
