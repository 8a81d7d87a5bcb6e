#![doc = include_str!("../../../README.md")]

mod args;
mod callable;
mod describe;
mod error;
mod signature;
mod value;

pub use crate::{
    args::{CallArgs, Kwargs},
    callable::{Callable, CallableKind, CodeSpan},
    describe::format_call,
    error::{BindError, BindErrorKind, BindResult},
    signature::{BoundCall, ParamSlot, Signature},
    value::Value,
};
