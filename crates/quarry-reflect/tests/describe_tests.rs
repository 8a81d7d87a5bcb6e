//! Tests for callable display strings and failure-report call rendering.
//!
//! The describer must be deterministic per callable value, never fail, and
//! never leak the local binding name a caller happened to use.

use pretty_assertions::assert_eq;
use quarry_reflect::{BoundCall, CallArgs, Callable, CodeSpan, ParamSlot, Signature, Value, format_call};

fn plain_sig(names: &[&str]) -> Signature {
    Signature::new(names.iter().map(|n| ParamSlot::name(*n)).collect(), vec![], None, None)
}

// =============================================================================
// 1. Named functions
// =============================================================================

/// A named function describes as its declared name, nothing more.
#[test]
fn named_function_describes_as_declared_name() {
    let f = Callable::function("list_sorting_is_idempotent", plain_sig(&["xs"]));
    assert_eq!(f.describe(), "list_sorting_is_idempotent");
}

/// The local variable a caller binds the callable to never participates:
/// two references to the same value describe identically.
#[test]
fn local_binding_names_are_ignored() {
    let original = Callable::function("probe", plain_sig(&["x"]));
    let alias = original.clone();
    assert_eq!(alias.describe(), "probe");
    assert_eq!(alias.describe(), original.describe());
}

// =============================================================================
// 2. Methods
// =============================================================================

/// Class-level access renders owner type and member name.
#[test]
fn class_method_includes_owner_type() {
    let bar = Callable::class_method("Foo", "bar", plain_sig(&["cls"]));
    assert_eq!(bar.describe(), "Foo.bar");
}

/// An instance-bound method uses the instance's own display string.
#[test]
fn bound_method_uses_instance_repr() {
    let baz = Callable::bound_method("Foo", Some("SoNotFoo()"), "baz", plain_sig(&["self"]));
    assert_eq!(baz.describe(), "SoNotFoo().baz");
}

/// An instance without a display string of its own gets the generic tag.
#[test]
fn bound_method_falls_back_to_generic_tag() {
    let baz = Callable::bound_method("Foo", None, "baz", plain_sig(&["self"]));
    assert_eq!(baz.describe(), "<Foo object>.baz");
}

// =============================================================================
// 3. Anonymous expressions
// =============================================================================

const MODULE: &str = "key = lambda x: True\n";

/// An anonymous expression describes as its source text, trimmed.
#[test]
fn lambda_source_is_recovered_and_trimmed() {
    // span deliberately includes the surrounding whitespace
    let f = Callable::lambda(Some(MODULE), Some(CodeSpan::new(5, 20)), plain_sig(&["x"]));
    assert_eq!(f.describe(), "lambda x: True");
}

/// Two references to the same expression describe identically.
#[test]
fn same_expression_describes_identically() {
    let first = Callable::lambda(Some(MODULE), Some(CodeSpan::new(6, 20)), plain_sig(&["x"]));
    let second = Callable::lambda(Some(MODULE), Some(CodeSpan::new(6, 20)), plain_sig(&["x"]));
    assert_eq!(first.describe(), second.describe());
    assert_eq!(first.describe(), "lambda x: True");
}

/// A dynamically constructed expression has no source; describing still
/// succeeds with the placeholder.
#[test]
fn dynamic_expression_uses_placeholder() {
    let f = Callable::lambda(None, None, plain_sig(&["t"]));
    assert_eq!(f.describe(), "<lambda>");
}

/// A span that runs past the module source degrades to the placeholder.
#[test]
fn out_of_bounds_span_degrades() {
    let f = Callable::lambda(Some(MODULE), Some(CodeSpan::new(6, 10_000)), plain_sig(&["x"]));
    assert_eq!(f.describe(), "<lambda>");
}

/// A span that splits a multi-byte character degrades to the placeholder.
#[test]
fn misaligned_span_degrades() {
    let module = "λ = lambda x: x\n";
    let f = Callable::lambda(Some(module), Some(CodeSpan::new(1, 15)), plain_sig(&["x"]));
    assert_eq!(f.describe(), "<lambda>");
}

/// A span covering only whitespace degrades to the placeholder.
#[test]
fn blank_span_degrades() {
    let f = Callable::lambda(Some(MODULE), Some(CodeSpan::new(3, 4)), plain_sig(&["x"]));
    assert_eq!(f.describe(), "<lambda>");
}

/// Describing is stable across repeated calls on the same value.
#[test]
fn describe_is_deterministic() {
    let f = Callable::lambda(Some(MODULE), Some(CodeSpan::new(6, 20)), plain_sig(&["x"]));
    assert_eq!(f.describe(), f.describe());
}

// =============================================================================
// 4. Shape names
// =============================================================================

/// Shape names are stable strings for structured logging.
#[test]
fn shape_names_are_stable() {
    assert_eq!(Callable::function("f", plain_sig(&[])).shape_name(), "Function");
    assert_eq!(
        Callable::class_method("T", "m", plain_sig(&["cls"])).shape_name(),
        "ClassMethod"
    );
    assert_eq!(
        Callable::bound_method("T", None, "m", plain_sig(&["self"])).shape_name(),
        "BoundMethod"
    );
    assert_eq!(Callable::lambda(None, None, plain_sig(&[])).shape_name(), "Lambda");
}

// =============================================================================
// 5. Rendered calls
// =============================================================================

/// A canonical call renders positional values in literal form.
#[test]
fn format_call_renders_positional_arguments() {
    let choose = Callable::function("choose", plain_sig(&["n", "label"]));
    let bound = choose
        .normalize(CallArgs::positional(vec![
            Value::Int(2),
            Value::Str("pivot".to_string()),
        ]))
        .unwrap();
    assert_eq!(format_call(&choose, &bound), "choose(2, 'pivot')");
}

/// Residual keywords render as `name=value` after the positional values.
#[test]
fn format_call_renders_residual_keywords() {
    let sig = Signature::new(vec![ParamSlot::name("n")], vec![], None, Some("rest".into()));
    let f = Callable::function("sample", sig);
    let bound = f
        .normalize(CallArgs::mixed(
            vec![Value::Int(1)],
            [("seed", Value::Int(7)), ("label", Value::Str("x".to_string()))],
        ))
        .unwrap();
    assert_eq!(format_call(&f, &bound), "sample(1, seed=7, label='x')");
}

/// A zero-argument call renders bare parentheses.
#[test]
fn format_call_renders_empty_call() {
    let f = Callable::function("probe", plain_sig(&[]));
    let bound = f.normalize(CallArgs::Empty).unwrap();
    assert_eq!(format_call(&f, &bound), "probe()");
}

/// Calls on methods render through the same display rules as `describe`.
#[test]
fn format_call_uses_describer_rules() {
    let baz = Callable::bound_method("Foo", Some("SoNotFoo()"), "baz", plain_sig(&["self", "x"]));
    let bound = baz.normalize(CallArgs::positional(vec![Value::Int(3)])).unwrap();
    assert_eq!(format_call(&baz, &bound), "SoNotFoo().baz(3)");
}

// =============================================================================
// 6. Serialized models
// =============================================================================

/// Callables round-trip through serde, spans included.
#[test]
fn callable_roundtrips_through_serde() {
    let f = Callable::lambda(Some(MODULE), Some(CodeSpan::new(6, 20)), plain_sig(&["x"]));
    let json = serde_json::to_string(&f).unwrap();
    let back: Callable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, f);
    assert_eq!(back.describe(), "lambda x: True");
}

/// `BoundCall` default is the empty call, usable as a building block.
#[test]
fn empty_bound_call_renders_empty() {
    let f = Callable::function("f", plain_sig(&[]));
    assert_eq!(format_call(&f, &BoundCall::default()), "f()");
}
