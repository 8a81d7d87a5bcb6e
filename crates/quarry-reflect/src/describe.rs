//! Stable display strings for callables and rendered calls.
//!
//! Failure reports name the callable under test on every line they print,
//! so the rules here are deterministic per callable value and never fail:
//! when an anonymous expression's source cannot be recovered, the output
//! degrades to a placeholder instead of propagating an error.

use std::fmt::{self, Write};

use crate::{
    callable::{Callable, CallableKind, CodeSpan},
    signature::BoundCall,
};

/// Display fallback for anonymous expressions whose source is gone.
pub(crate) const LAMBDA_PLACEHOLDER: &str = "<lambda>";

/// Returns the stable display string for a callable.
///
/// Shape rules, in priority order:
/// - class-level access renders `Owner.name`;
/// - an instance-bound method renders `{instance repr}.name`, with the
///   generic `<Owner object>` tag when the instance declares no repr;
/// - a named function renders its declared name verbatim (local variable
///   names the caller used never participate);
/// - an anonymous expression renders its recovered source text, trimmed.
#[must_use]
pub(crate) fn describe(callable: &Callable) -> String {
    let mut out = String::new();
    describe_fmt(callable, &mut out).expect("formatting into a String cannot fail");
    out
}

/// Writes the display string for a callable to `f`.
pub(crate) fn describe_fmt<W: Write>(callable: &Callable, f: &mut W) -> fmt::Result {
    match callable.kind() {
        CallableKind::Function { name } => f.write_str(name),
        CallableKind::ClassMethod { owner, name } => write!(f, "{owner}.{name}"),
        CallableKind::BoundMethod {
            owner,
            receiver_repr,
            name,
        } => match receiver_repr {
            Some(repr) => write!(f, "{repr}.{name}"),
            None => write!(f, "<{owner} object>.{name}"),
        },
        CallableKind::Lambda { module, span } => match recovered_source(module.as_deref(), *span) {
            Some(text) => f.write_str(text),
            None => f.write_str(LAMBDA_PLACEHOLDER),
        },
    }
}

/// Best-effort recovery of an expression's source text.
///
/// Degrades to `None` when the module source is gone, the span falls
/// outside it or off a character boundary, or the slice trims to nothing.
fn recovered_source(module: Option<&str>, span: Option<CodeSpan>) -> Option<&str> {
    let module = module?;
    let span = span?;
    let text = module.get(span.start as usize..span.end as usize)?;
    let text = text.trim();
    if text.is_empty() { None } else { Some(text) }
}

/// Renders a bound call for a failure report, e.g. `choose(1, 2, key='x')`.
///
/// Canonical positional arguments come first, then residual named arguments
/// as `name=value`, every value in its canonical literal form.
#[must_use]
pub fn format_call(callable: &Callable, bound: &BoundCall) -> String {
    let mut out = String::new();
    describe_fmt(callable, &mut out).expect("formatting into a String cannot fail");
    out.push('(');
    let mut first = true;
    for arg in &bound.args {
        if !first {
            out.push_str(", ");
        }
        first = false;
        arg.repr_fmt(&mut out).expect("formatting into a String cannot fail");
    }
    for (key, value) in &bound.kwargs {
        if !first {
            out.push_str(", ");
        }
        first = false;
        write!(out, "{key}=").expect("formatting into a String cannot fail");
        value.repr_fmt(&mut out).expect("formatting into a String cannot fail");
    }
    out.push(')');
    out
}
