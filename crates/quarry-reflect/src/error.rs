//! Binding failures and their rendered messages.
//!
//! Every way a call shape can fail to bind is one variant of a closed
//! taxonomy, so the harness can branch on the kind while users see the
//! scripting layer's native message wording. Binding errors mean the test
//! harness itself presented an impossible call, so callers surface them as
//! setup errors rather than counterexamples.

use std::fmt::{self, Display};

/// Result type alias for operations that can fail to bind.
pub type BindResult<T> = Result<T, BindError>;

/// A failed attempt to bind arguments against a callable's parameters.
///
/// Carries the callable's display name (as used in the rendered message) and
/// the machine-readable [`BindErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BindError {
    callable: Box<str>,
    kind: BindErrorKind,
}

/// The closed set of binding failures.
///
/// The `IntoStaticStr` derive supplies stable variant names for structured
/// logging by the harness.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::IntoStaticStr)]
pub enum BindErrorKind {
    /// A non-defaulted, non-variadic parameter received no value. Names the
    /// first such slot in declaration order.
    MissingRequiredArgument {
        /// Rendered slot name (pattern slots render as `(a, b)`).
        name: Box<str>,
    },
    /// More positional values than declared slots, with no variadic
    /// positional collector to absorb them.
    TooManyPositionalArguments {
        /// Positional values supplied.
        given: usize,
        /// Declared positional capacity.
        limit: usize,
    },
    /// A named argument's key names a slot already filled positionally.
    PositionalKeywordCollision {
        /// The colliding parameter name.
        name: Box<str>,
    },
    /// Named-argument keys matching no declared parameter, on a callable
    /// without a variadic named collector. All offenders reported together.
    UnexpectedKeywordArguments {
        /// Offending keys, in presentation order.
        names: Vec<Box<str>>,
    },
    /// An attempt to bind a destructuring-pattern slot through its synthetic
    /// key; pattern slots can only be supplied positionally.
    KeywordNotPermittedForPattern {
        /// Zero-based index of the pattern slot.
        index: usize,
    },
}

impl BindError {
    /// Creates an error for a required parameter that received no value.
    #[must_use]
    pub(crate) fn missing_argument(callable: &str, name: String) -> Self {
        Self {
            callable: callable.into(),
            kind: BindErrorKind::MissingRequiredArgument { name: name.into() },
        }
    }

    /// Creates an error for excess positional arguments.
    #[must_use]
    pub(crate) fn too_many_positional(callable: &str, limit: usize, given: usize) -> Self {
        Self {
            callable: callable.into(),
            kind: BindErrorKind::TooManyPositionalArguments { given, limit },
        }
    }

    /// Creates an error for a keyword colliding with a positionally filled slot.
    #[must_use]
    pub(crate) fn multiple_values(callable: &str, name: &str) -> Self {
        Self {
            callable: callable.into(),
            kind: BindErrorKind::PositionalKeywordCollision { name: name.into() },
        }
    }

    /// Creates an error reporting every unmatched keyword together.
    #[must_use]
    pub(crate) fn unexpected_keywords(callable: &str, names: Vec<Box<str>>) -> Self {
        debug_assert!(!names.is_empty(), "at least one offending keyword required");
        Self {
            callable: callable.into(),
            kind: BindErrorKind::UnexpectedKeywordArguments { names },
        }
    }

    /// Creates an error for a keyword aimed at a destructuring-pattern slot.
    #[must_use]
    pub(crate) fn pattern_keyword(callable: &str, index: usize) -> Self {
        Self {
            callable: callable.into(),
            kind: BindErrorKind::KeywordNotPermittedForPattern { index },
        }
    }

    /// Returns the display name of the callable the binding was for.
    #[must_use]
    pub fn callable(&self) -> &str {
        &self.callable
    }

    /// Returns the machine-readable failure kind.
    #[must_use]
    pub fn kind(&self) -> &BindErrorKind {
        &self.kind
    }

    /// Returns the stable variant name of the failure kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }
}

impl Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callable = &self.callable;
        match &self.kind {
            BindErrorKind::MissingRequiredArgument { name } => {
                write!(f, "{callable}() missing 1 required positional argument: '{name}'")
            }
            BindErrorKind::TooManyPositionalArguments { given, limit } => {
                let takes_word = if *limit == 1 { "argument" } else { "arguments" };
                let given_word = if *given == 1 { "was" } else { "were" };
                write!(
                    f,
                    "{callable}() takes {limit} positional {takes_word} but {given} {given_word} given"
                )
            }
            BindErrorKind::PositionalKeywordCollision { name } => {
                write!(f, "{callable}() got multiple values for argument '{name}'")
            }
            BindErrorKind::UnexpectedKeywordArguments { names } => {
                if let [name] = names.as_slice() {
                    write!(f, "{callable}() got an unexpected keyword argument '{name}'")
                } else {
                    write!(
                        f,
                        "{callable}() got unexpected keyword arguments {}",
                        format_param_names(names)
                    )
                }
            }
            BindErrorKind::KeywordNotPermittedForPattern { index } => {
                write!(
                    f,
                    "{callable}() got keyword argument '.{index}' for a destructured parameter, \
                     which can only be passed positionally"
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Formats a list of quoted parameter names for error messages.
///
/// Examples:
/// - `["a"]` -> `'a'`
/// - `["a", "b"]` -> `'a' and 'b'`
/// - `["a", "b", "c"]` -> `'a', 'b' and 'c'`
fn format_param_names(names: &[Box<str>]) -> String {
    match names {
        [] => String::new(),
        [only] => format!("'{only}'"),
        [first, second] => format!("'{first}' and '{second}'"),
        [rest @ .., last] => {
            let rest: Vec<_> = rest.iter().map(|n| format!("'{n}'")).collect();
            format!("{} and '{last}'", rest.join(", "))
        }
    }
}
