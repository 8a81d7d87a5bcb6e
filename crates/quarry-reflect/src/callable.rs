//! The engine's model of a scripted test function.
//!
//! A [`Callable`] bundles the shape a callable was obtained in (its
//! [`CallableKind`]) with the parameter list it declares. The declared
//! signature still contains the receiver slot for methods; extraction via
//! [`Callable::signature`] removes it, since the binder never expects the
//! caller to supply a receiver that is already bound.

use crate::{
    args::CallArgs,
    describe,
    error::BindResult,
    signature::{BoundCall, Signature},
};

/// Byte range of an expression within its defining module's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CodeSpan {
    /// Byte offset of the first character.
    pub start: u32,
    /// Byte offset one past the last character.
    pub end: u32,
}

impl CodeSpan {
    /// Creates a span from byte offsets.
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// The shape a callable value was obtained in.
///
/// A closed set: the describer matches exhaustively, so a new shape is a
/// compile-time gap rather than a silent fallback. The same underlying
/// function can legitimately appear in different shapes over its lifetime
/// (before and after being bound to an instance), which is why callers
/// classify at the point of use instead of caching.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::IntoStaticStr)]
pub enum CallableKind {
    /// A named function declared at module (or nested) scope.
    Function {
        /// Declared name.
        name: Box<str>,
    },
    /// A method accessed through its owner type; the receiver is the type.
    ClassMethod {
        /// Owner type name.
        owner: Box<str>,
        /// Declared method name.
        name: Box<str>,
    },
    /// A method bound to a live instance.
    BoundMethod {
        /// Owner type name, used for the fallback display tag.
        owner: Box<str>,
        /// The instance's own display string, when it declares one.
        receiver_repr: Option<Box<str>>,
        /// Declared method name.
        name: Box<str>,
    },
    /// An anonymous inline expression.
    ///
    /// `module` is the defining module's source text when still available
    /// and `span` the byte range of the expression within it. Both are
    /// absent for dynamically constructed callables, in which case
    /// describing falls back to a placeholder.
    Lambda {
        /// Defining module source, if available.
        module: Option<Box<str>>,
        /// Byte range of the expression within `module`.
        span: Option<CodeSpan>,
    },
}

/// A scripted callable as the trial harness sees it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Callable {
    kind: CallableKind,
    /// Declared parameter shape, receiver slot included for methods.
    declared: Signature,
}

impl Callable {
    /// Creates a named free function.
    #[must_use]
    pub fn function(name: impl Into<Box<str>>, declared: Signature) -> Self {
        Self {
            kind: CallableKind::Function { name: name.into() },
            declared,
        }
    }

    /// Creates a method accessed through its owner type.
    ///
    /// `declared` includes the receiver slot; extraction removes it.
    #[must_use]
    pub fn class_method(owner: impl Into<Box<str>>, name: impl Into<Box<str>>, declared: Signature) -> Self {
        Self {
            kind: CallableKind::ClassMethod {
                owner: owner.into(),
                name: name.into(),
            },
            declared,
        }
    }

    /// Creates a method bound to a live instance.
    ///
    /// `receiver_repr` is the instance's own display string, or `None` when
    /// the instance declares none. `declared` includes the receiver slot.
    #[must_use]
    pub fn bound_method(
        owner: impl Into<Box<str>>,
        receiver_repr: Option<&str>,
        name: impl Into<Box<str>>,
        declared: Signature,
    ) -> Self {
        Self {
            kind: CallableKind::BoundMethod {
                owner: owner.into(),
                receiver_repr: receiver_repr.map(Into::into),
                name: name.into(),
            },
            declared,
        }
    }

    /// Creates an anonymous inline expression.
    #[must_use]
    pub fn lambda(module: Option<&str>, span: Option<CodeSpan>, declared: Signature) -> Self {
        Self {
            kind: CallableKind::Lambda {
                module: module.map(Into::into),
                span,
            },
            declared,
        }
    }

    /// Returns the shape this callable was obtained in.
    #[must_use]
    pub fn kind(&self) -> &CallableKind {
        &self.kind
    }

    /// Returns the stable shape name, for structured logging.
    #[must_use]
    pub fn shape_name(&self) -> &'static str {
        (&self.kind).into()
    }

    /// Returns the declared parameter shape, receiver slot included.
    #[must_use]
    pub fn declared_signature(&self) -> &Signature {
        &self.declared
    }

    /// Derives the canonical parameter descriptor for this callable.
    ///
    /// For class-level and instance-bound methods the receiver slot is
    /// excluded: it is supplied by the binding the callable already
    /// carries, never by the caller.
    ///
    /// # Panics
    /// Panics for a bound callable declared without a receiver slot; that
    /// is a programming error in the layer that built the callable.
    #[must_use]
    pub fn signature(&self) -> Signature {
        match &self.kind {
            CallableKind::Function { .. } | CallableKind::Lambda { .. } => self.declared.clone(),
            CallableKind::ClassMethod { .. } | CallableKind::BoundMethod { .. } => self.declared.without_receiver(),
        }
    }

    /// Returns the bare name used in binding error messages.
    #[must_use]
    pub fn bind_name(&self) -> &str {
        match &self.kind {
            CallableKind::Function { name }
            | CallableKind::ClassMethod { name, .. }
            | CallableKind::BoundMethod { name, .. } => name,
            CallableKind::Lambda { .. } => describe::LAMBDA_PLACEHOLDER,
        }
    }

    /// Binds a request against this callable's extracted descriptor.
    pub fn normalize(&self, call: CallArgs) -> BindResult<BoundCall> {
        self.signature().bind(call, self.bind_name())
    }

    /// Returns the stable display string for this callable.
    #[must_use]
    pub fn describe(&self) -> String {
        describe::describe(self)
    }
}
