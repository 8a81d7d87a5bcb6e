//! Owned argument values and their canonical literal rendering.
//!
//! The engine's generators hand this crate fully owned values; nothing here
//! needs a heap or an interpreter session. `Value` therefore owns all of its
//! data and can be freely cloned, serialized, or stored inside a
//! `Signature`'s default table.

use std::fmt::{self, Write};

use num_bigint::BigInt;

/// A generated value passed to a scripted callable.
///
/// Variants cover the literal shapes argument generation produces. The
/// insertion order of `Dict` pairs is preserved so that rendered calls are
/// stable across runs.
///
/// # Rendering
///
/// [`Value::repr`] produces the scripting layer's canonical literal form,
/// which is what failure reports embed: shortest round-tripping floats,
/// quote-selecting string literals, and a trailing comma for one-element
/// tuples.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    /// The null singleton.
    None,
    /// Boolean, rendered `True` / `False`.
    Bool(bool),
    /// Machine-width integer.
    Int(i64),
    /// Arbitrary-precision integer (larger than i64).
    BigInt(BigInt),
    /// 64-bit IEEE 754 float.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Byte string.
    Bytes(Vec<u8>),
    /// Mutable sequence.
    List(Vec<Self>),
    /// Immutable sequence.
    Tuple(Vec<Self>),
    /// Insertion-ordered mapping, stored as pairs.
    Dict(Vec<(Self, Self)>),
}

impl Value {
    /// Writes the canonical literal form of this value to `f`.
    pub fn repr_fmt<W: Write>(&self, f: &mut W) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::BigInt(i) => write!(f, "{i}"),
            Self::Float(x) => f.write_str(&float_repr(*x)),
            Self::Str(s) => string_repr_fmt(s, f),
            Self::Bytes(b) => bytes_repr_fmt(b, f),
            Self::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.repr_fmt(f)?;
                }
                f.write_char(']')
            }
            Self::Tuple(items) => {
                f.write_char('(')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.repr_fmt(f)?;
                }
                // one-element tuples need the trailing comma to stay tuples
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Self::Dict(pairs) => {
                f.write_char('{')?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    key.repr_fmt(f)?;
                    f.write_str(": ")?;
                    value.repr_fmt(f)?;
                }
                f.write_char('}')
            }
        }
    }

    /// Returns the canonical literal form of this value as a `String`.
    #[must_use]
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.repr_fmt(&mut out).expect("formatting into a String cannot fail");
        out
    }
}

/// Returns a string representation of a float matching the scripting
/// layer's `repr()` behavior.
///
/// Uses the `ryu` crate, which produces the shortest decimal representation
/// that round-trips through `f64` parsing. Special values render lowercase
/// (`inf`, `-inf`, `nan`) and whole numbers keep a `.0` suffix.
fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }

    let mut buffer = ryu::Buffer::new();
    fix_ryu_exponent(buffer.format(f))
}

/// Fixes ryu's exponent format to match the scripting layer.
///
/// ryu produces "1e20" where the target format is "1e+20" for positive
/// exponents. Also ensures a ".0" suffix for outputs like "3".
fn fix_ryu_exponent(s: &str) -> String {
    if let Some(e_pos) = s.find('e') {
        let (mantissa, exp_part) = s.split_at(e_pos);
        let exp = &exp_part[1..];
        if !exp.starts_with('-') {
            return format!("{mantissa}e+{exp}");
        }
        return s.to_string();
    }

    if !s.contains('.') {
        return format!("{s}.0");
    }

    s.to_string()
}

/// Writes a quote-selecting string literal.
///
/// Single quotes are preferred; a string containing a single quote but no
/// double quote switches to double quotes instead of escaping.
fn string_repr_fmt<W: Write>(s: &str, f: &mut W) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Writes a bytes literal (`b'...'`), escaping non-printable bytes.
fn bytes_repr_fmt<W: Write>(bytes: &[u8], f: &mut W) -> fmt::Result {
    f.write_str("b'")?;
    for &b in bytes {
        match b {
            b'\\' => f.write_str("\\\\")?,
            b'\'' => f.write_str("\\'")?,
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\t' => f.write_str("\\t")?,
            0x20..=0x7e => f.write_char(b as char)?,
            _ => write!(f, "\\x{b:02x}")?,
        }
    }
    f.write_char('\'')
}
