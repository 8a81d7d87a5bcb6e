//! Tests for `Value::repr`, the canonical literal forms embedded in
//! failure reports.

use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use quarry_reflect::Value;

// =============================================================================
// 1. Scalars
// =============================================================================

#[test]
fn repr_none() {
    assert_eq!(Value::None.repr(), "None");
}

#[test]
fn repr_booleans() {
    assert_eq!(Value::Bool(true).repr(), "True");
    assert_eq!(Value::Bool(false).repr(), "False");
}

#[test]
fn repr_integers() {
    assert_eq!(Value::Int(0).repr(), "0");
    assert_eq!(Value::Int(-42).repr(), "-42");
}

#[test]
fn repr_big_integers() {
    let big: BigInt = "123456789012345678901234567890".parse().unwrap();
    assert_eq!(Value::BigInt(big).repr(), "123456789012345678901234567890");
}

/// Whole floats keep their decimal point; exponents carry an explicit sign.
#[test]
fn repr_floats() {
    assert_eq!(Value::Float(1.0).repr(), "1.0");
    assert_eq!(Value::Float(0.5).repr(), "0.5");
    assert_eq!(Value::Float(-2.25).repr(), "-2.25");
    assert_eq!(Value::Float(1e20).repr(), "1e+20");
    assert_eq!(Value::Float(1e-7).repr(), "1e-7");
}

#[test]
fn repr_float_special_values() {
    assert_eq!(Value::Float(f64::NAN).repr(), "nan");
    assert_eq!(Value::Float(f64::INFINITY).repr(), "inf");
    assert_eq!(Value::Float(f64::NEG_INFINITY).repr(), "-inf");
}

// =============================================================================
// 2. Strings and bytes
// =============================================================================

/// Plain strings prefer single quotes.
#[test]
fn repr_string_single_quoted() {
    assert_eq!(Value::Str("hello".to_string()).repr(), "'hello'");
}

/// A string containing a single quote switches to double quotes.
#[test]
fn repr_string_switches_quotes() {
    assert_eq!(Value::Str("it's".to_string()).repr(), "\"it's\"");
}

/// Double quotes inside stay unescaped under single quoting.
#[test]
fn repr_string_keeps_double_quotes() {
    assert_eq!(Value::Str("say \"hi\"".to_string()).repr(), "'say \"hi\"'");
}

/// With both quote kinds present, single quoting wins and escapes.
#[test]
fn repr_string_escapes_when_both_quotes_present() {
    assert_eq!(Value::Str("'x' or \"y\"".to_string()).repr(), "'\\'x\\' or \"y\"'");
}

#[test]
fn repr_string_escapes_control_characters() {
    assert_eq!(Value::Str("a\nb\tc".to_string()).repr(), "'a\\nb\\tc'");
    assert_eq!(Value::Str("\u{1}".to_string()).repr(), "'\\x01'");
}

#[test]
fn repr_bytes() {
    assert_eq!(Value::Bytes(b"ab".to_vec()).repr(), "b'ab'");
    assert_eq!(Value::Bytes(vec![0, 10, 65]).repr(), "b'\\x00\\nA'");
}

// =============================================================================
// 3. Containers
// =============================================================================

#[test]
fn repr_lists() {
    assert_eq!(Value::List(vec![]).repr(), "[]");
    assert_eq!(Value::List(vec![Value::Int(1), Value::Int(2)]).repr(), "[1, 2]");
}

/// One-element tuples keep the trailing comma that makes them tuples.
#[test]
fn repr_tuples() {
    assert_eq!(Value::Tuple(vec![]).repr(), "()");
    assert_eq!(Value::Tuple(vec![Value::Int(1)]).repr(), "(1,)");
    assert_eq!(Value::Tuple(vec![Value::Int(1), Value::Int(2)]).repr(), "(1, 2)");
}

#[test]
fn repr_dicts() {
    assert_eq!(Value::Dict(vec![]).repr(), "{}");
    let d = Value::Dict(vec![
        (Value::Str("a".to_string()), Value::Int(1)),
        (Value::Str("b".to_string()), Value::Int(2)),
    ]);
    assert_eq!(d.repr(), "{'a': 1, 'b': 2}");
}

#[test]
fn repr_nested_containers() {
    let v = Value::List(vec![
        Value::Tuple(vec![Value::Int(1), Value::Str("x".to_string())]),
        Value::Dict(vec![(Value::Int(2), Value::List(vec![Value::None]))]),
    ]);
    assert_eq!(v.repr(), "[(1, 'x'), {2: [None]}]");
}
