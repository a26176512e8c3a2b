//! The renderer (component C5): turns a format string plus decoded
//! arguments back into a human-readable line.
//!
//! `elog` intentionally does not depend on an external `printf`-style
//! formatting crate — none of the example code in this workspace's
//! ecosystem pulls one in either, because this corner of the format-string
//! mini-language (`%d %x %u %f %s %%`, with most width/flag characters
//! just skipped over) is small enough that owning it is cheaper than
//! adopting a dependency for it.
//!
//! This renderer's format-string walk is deliberately *not* the same
//! algorithm as registration-time descriptor inference
//! (see [`crate::codec::infer_descriptor`]): that function is a literal
//! port of the original implementation's naive "look at one character past
//! `%`" classification, kept faithful to the ground truth on purpose, even
//! where it misclassifies a flag/width-prefixed `%s`/`%f` as an integer.
//! This renderer has no such original to match — the source program hands
//! its format strings to a real external formatter, which spec.md places
//! out of scope — so it scans past flag/width/precision characters to find
//! a directive's actual conversion letter, because that's what it takes to
//! render something like `%05d` correctly instead of leaving stray digits
//! in the output. See `DESIGN.md` for the full reasoning.

mod __test__;

use crate::codec::ArgValue;

fn numeric_as_string(v: &ArgValue) -> String {
    match v {
        ArgValue::U8(n) => n.to_string(),
        ArgValue::U16(n) => n.to_string(),
        ArgValue::U32(n) => n.to_string(),
        ArgValue::U64(n) => n.to_string(),
        ArgValue::F32(n) => n.to_string(),
        ArgValue::F64(n) => n.to_string(),
        ArgValue::Str(s) => s.clone(),
        ArgValue::Enum(s) => s.clone(),
    }
}

fn numeric_as_hex(v: &ArgValue) -> String {
    match v {
        ArgValue::U8(n) => format!("{n:x}"),
        ArgValue::U16(n) => format!("{n:x}"),
        ArgValue::U32(n) => format!("{n:x}"),
        ArgValue::U64(n) => format!("{n:x}"),
        other => numeric_as_string(other),
    }
}

/// Renders `format` against `args`, consuming one argument per `%`
/// conversion (`%%` is a literal percent and consumes none). Arguments are
/// matched positionally, the same order the descriptor that produced them
/// was derived in; a conversion with no remaining argument is rendered as
/// `<missing>` rather than panicking, since rendering runs on data that may
/// have been serialized and reloaded from elsewhere.
pub fn render_event(format: &str, args: &[ArgValue]) -> String {
    let mut out = String::with_capacity(format.len() + 16);
    let mut arg_iter = args.iter();
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        loop {
            match chars.next() {
                None => return out,
                Some('%') => {
                    out.push('%');
                    break;
                }
                Some('d') | Some('u') => {
                    out.push_str(&next_arg(&mut arg_iter, numeric_as_string));
                    break;
                }
                Some('x') => {
                    out.push_str(&next_arg(&mut arg_iter, numeric_as_hex));
                    break;
                }
                Some('f') => {
                    out.push_str(&next_arg(&mut arg_iter, numeric_as_string));
                    break;
                }
                Some('s') => {
                    out.push_str(&next_arg(&mut arg_iter, numeric_as_string));
                    break;
                }
                Some(c) if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' => continue,
                Some(_unknown) => {
                    out.push_str(&next_arg(&mut arg_iter, numeric_as_string));
                    break;
                }
            }
        }
    }
    out
}

fn next_arg<'a>(it: &mut std::slice::Iter<'a, ArgValue>, f: impl Fn(&ArgValue) -> String) -> String {
    match it.next() {
        Some(v) => f(v),
        None => "<missing>".to_string(),
    }
}
