//! Binding-request shapes: positional values plus named arguments.
//!
//! The trial harness presents generated values in whatever split the current
//! dispatch chose, so the request type has to carry both halves. Variants for
//! the common zero-to-two argument calls avoid a heap allocation on the vast
//! majority of trials.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::value::Value;

/// Named arguments, keyed by parameter name.
///
/// Insertion order is preserved so residual keywords and error messages come
/// out in presentation order.
pub type Kwargs = IndexMap<Box<str>, Value, ahash::RandomState>;

/// Positional storage sized for the common small-arity calls.
pub(crate) type PosValues = SmallVec<[Value; 4]>;

/// Arguments for one candidate invocation.
///
/// Built by [`CallArgs::new`], which collapses to the smallest variant that
/// holds the request.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum CallArgs {
    /// No arguments at all.
    #[default]
    Empty,
    /// One positional argument.
    One(Value),
    /// Two positional arguments.
    Two(Value, Value),
    /// Three or more positional arguments, no named ones.
    Args(PosValues),
    /// Named arguments only.
    Kwargs(Kwargs),
    /// Positional and named arguments together.
    ArgsKwargs {
        /// Positional values, in order.
        args: PosValues,
        /// Named values, keys unique.
        kwargs: Kwargs,
    },
}

impl CallArgs {
    /// Creates a request from a positional sequence and a named mapping,
    /// collapsing to the smallest variant that can hold it.
    #[must_use]
    pub fn new(args: Vec<Value>, kwargs: Kwargs) -> Self {
        if !kwargs.is_empty() {
            if args.is_empty() {
                return Self::Kwargs(kwargs);
            }
            return Self::ArgsKwargs {
                args: PosValues::from_vec(args),
                kwargs,
            };
        }
        if args.len() > 2 {
            return Self::Args(PosValues::from_vec(args));
        }
        let mut iter = args.into_iter();
        match (iter.next(), iter.next()) {
            (Some(first), Some(second)) => Self::Two(first, second),
            (Some(first), None) => Self::One(first),
            _ => Self::Empty,
        }
    }

    /// Creates a purely positional request.
    #[must_use]
    pub fn positional(args: Vec<Value>) -> Self {
        Self::new(args, Kwargs::default())
    }

    /// Creates a purely named request from `(name, value)` pairs.
    #[must_use]
    pub fn keywords<K: Into<Box<str>>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::new(Vec::new(), collect_kwargs(pairs))
    }

    /// Creates a mixed request from positional values and `(name, value)` pairs.
    #[must_use]
    pub fn mixed<K: Into<Box<str>>>(args: Vec<Value>, pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::new(args, collect_kwargs(pairs))
    }

    /// Returns the number of positional values in the request.
    #[must_use]
    pub fn positional_len(&self) -> usize {
        match self {
            Self::Empty | Self::Kwargs(_) => 0,
            Self::One(_) => 1,
            Self::Two(_, _) => 2,
            Self::Args(args) | Self::ArgsKwargs { args, .. } => args.len(),
        }
    }

    /// Returns the number of named values in the request.
    #[must_use]
    pub fn keyword_len(&self) -> usize {
        match self {
            Self::Kwargs(kwargs) | Self::ArgsKwargs { kwargs, .. } => kwargs.len(),
            _ => 0,
        }
    }

    /// Returns the total number of supplied values.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.positional_len() + self.keyword_len()
    }

    /// Splits into a positional iterator and the named mapping without
    /// allocating for the small-arity variants.
    pub(crate) fn into_parts(self) -> (ArgPosIter, Kwargs) {
        match self {
            Self::Empty => (ArgPosIter::Empty, Kwargs::default()),
            Self::One(v) => (ArgPosIter::One(Some(v)), Kwargs::default()),
            Self::Two(v1, v2) => (ArgPosIter::Two(Some(v1), Some(v2)), Kwargs::default()),
            Self::Args(args) => (ArgPosIter::Small(args.into_iter()), Kwargs::default()),
            Self::Kwargs(kwargs) => (ArgPosIter::Empty, kwargs),
            Self::ArgsKwargs { args, kwargs } => (ArgPosIter::Small(args.into_iter()), kwargs),
        }
    }
}

/// Collects `(name, value)` pairs into [`Kwargs`]; a repeated name keeps the
/// last value, matching mapping-literal semantics.
fn collect_kwargs<K: Into<Box<str>>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Kwargs {
    pairs.into_iter().map(|(key, value)| (key.into(), value)).collect()
}

/// Iterator over positional values without allocation for small arities.
pub(crate) enum ArgPosIter {
    Empty,
    One(Option<Value>),
    Two(Option<Value>, Option<Value>),
    Small(smallvec::IntoIter<[Value; 4]>),
}

impl Iterator for ArgPosIter {
    type Item = Value;

    #[inline]
    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Empty => None,
            Self::One(v) => v.take(),
            Self::Two(v1, v2) => v1.take().or_else(|| v2.take()),
            Self::Small(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Empty => (0, Some(0)),
            Self::One(v) => {
                let n = usize::from(v.is_some());
                (n, Some(n))
            }
            Self::Two(v1, v2) => {
                let n = usize::from(v1.is_some()) + usize::from(v2.is_some());
                (n, Some(n))
            }
            Self::Small(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for ArgPosIter {}
