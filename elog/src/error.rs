use thiserror::Error;

/// Failures surfaced by the visible-failure paths of `elog`: serializing a
/// log to bytes, and reconstructing one from bytes someone else produced.
///
/// The hot path (`Log::emit`) never returns this type — ring overflow and
/// disable-limit drops are silent by design (see `ring` and `log`).
#[derive(Debug, Error)]
pub enum ElogError {
    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 7], found: [u8; 7] },

    #[error("truncated input: needed {needed} more byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("unknown payload descriptor code {0:#04x}")]
    UnknownDescriptor(u8),

    #[error("event type index {0} out of range")]
    BadTypeIndex(u32),

    #[error("track index {0} out of range")]
    BadTrackIndex(u32),

    #[error("malformed string: missing NUL terminator")]
    UnterminatedString,

    #[error("malformed string: invalid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ElogError>;
