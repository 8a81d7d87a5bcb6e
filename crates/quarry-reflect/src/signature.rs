//! Parameter descriptors and the argument binding algorithm.
//!
//! A [`Signature`] is the canonical description of what a scripted callable
//! declares: ordered parameter slots, trailing defaults, and the optional
//! variadic collectors. [`Signature::bind`] reproduces the scripting layer's
//! own call-binding precedence over that description, turning a
//! positional/keyword request into the canonical all-positional form the
//! engine invokes with.

use crate::{
    args::{CallArgs, Kwargs},
    error::{BindError, BindResult},
    value::Value,
};

/// One declared parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParamSlot {
    /// A plain named parameter, bindable positionally or by keyword.
    Name(Box<str>),
    /// A destructuring (tuple) pattern of nested sub-names.
    ///
    /// Pattern slots have no parameter name of their own and can only be
    /// supplied positionally. Their synthetic key is `.{index}` where
    /// `index` is the slot's position; presenting that key in a request is
    /// rejected by the binder.
    Pattern(Vec<ParamSlot>),
}

impl ParamSlot {
    /// Creates a named slot.
    #[must_use]
    pub fn name(name: impl Into<Box<str>>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a destructuring-pattern slot from its sub-slots.
    #[must_use]
    pub fn pattern(sub: Vec<Self>) -> Self {
        Self::Pattern(sub)
    }

    /// Returns whether this slot is a destructuring pattern.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    /// Returns whether a keyword key binds this slot. Pattern slots never
    /// match; their sub-names are not parameter names.
    fn matches(&self, key: &str) -> bool {
        match self {
            Self::Name(name) => &**name == key,
            Self::Pattern(_) => false,
        }
    }

    /// Renders the slot as it appears in a declaration, e.g. `x` or `(a, b)`.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Name(name) => name.to_string(),
            Self::Pattern(sub) => {
                let inner: Vec<_> = sub.iter().map(Self::display).collect();
                format!("({})", inner.join(", "))
            }
        }
    }
}

/// How involved binding needs to be for a signature, precomputed once.
///
/// The all-positional request shapes that dominate trial dispatch skip the
/// full algorithm when the signature allows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
enum BindMode {
    /// No defaults and no variadic collectors: a positional request either
    /// matches the slot count exactly or fails on the count alone.
    #[default]
    Simple,
    /// Only trailing defaults: a positional request fills slots left to
    /// right and the remainder comes from the default table.
    SimpleWithDefaults,
    /// Everything else takes the full algorithm.
    Complex,
}

/// The canonical parameter descriptor for a scripted callable.
///
/// Derived once per callable and immutable afterwards. The slot order is
/// declaration order with any bound receiver already excluded; `defaults`
/// aligns with the trailing slots.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Signature {
    /// Declared parameter slots in order.
    params: Vec<ParamSlot>,
    /// Default values for the trailing subset of `params`.
    defaults: Vec<Value>,
    /// Variadic positional collector name, e.g. `args` in `def f(*args)`.
    ///
    /// When present, excess positional arguments pass through positionally
    /// after the declared slots.
    var_args: Option<Box<str>>,
    /// Variadic named collector name, e.g. `rest` in `def f(**rest)`.
    ///
    /// When present, named arguments matching no declared parameter collect
    /// into the residual mapping instead of being rejected.
    var_kwargs: Option<Box<str>>,
    /// How simple the signature is, used for fast paths when binding.
    bind_mode: BindMode,
}

impl Signature {
    /// Creates a signature from declared slots, trailing defaults, and the
    /// optional variadic collector names.
    ///
    /// # Panics
    /// Panics if more defaults than slots are supplied; that is a
    /// malformed declaration, not a bindable state.
    #[must_use]
    pub fn new(
        params: Vec<ParamSlot>,
        defaults: Vec<Value>,
        var_args: Option<Box<str>>,
        var_kwargs: Option<Box<str>>,
    ) -> Self {
        assert!(
            defaults.len() <= params.len(),
            "signature declares {} defaults for {} parameters",
            defaults.len(),
            params.len()
        );

        let bind_mode = if var_args.is_some() || var_kwargs.is_some() {
            BindMode::Complex
        } else if defaults.is_empty() {
            BindMode::Simple
        } else {
            BindMode::SimpleWithDefaults
        };

        Self {
            params,
            defaults,
            var_args,
            var_kwargs,
            bind_mode,
        }
    }

    /// Returns the declared slots in order.
    #[must_use]
    pub fn params(&self) -> &[ParamSlot] {
        &self.params
    }

    /// Returns the defaults for the trailing slots.
    #[must_use]
    pub fn defaults(&self) -> &[Value] {
        &self.defaults
    }

    /// Returns the variadic positional collector name, if declared.
    #[must_use]
    pub fn var_args(&self) -> Option<&str> {
        self.var_args.as_deref()
    }

    /// Returns the variadic named collector name, if declared.
    #[must_use]
    pub fn var_kwargs(&self) -> Option<&str> {
        self.var_kwargs.as_deref()
    }

    /// Returns whether excess positional arguments pass through.
    #[must_use]
    pub fn has_variadic_positional(&self) -> bool {
        self.var_args.is_some()
    }

    /// Returns whether unmatched named arguments collect into a residual.
    #[must_use]
    pub fn has_variadic_named(&self) -> bool {
        self.var_kwargs.is_some()
    }

    /// Returns the number of declared slots.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Returns the number of slots that must receive a value.
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.params.len() - self.defaults.len()
    }

    /// Returns a copy of this signature with the leading receiver slot
    /// removed, for callables whose receiver is already bound.
    ///
    /// # Panics
    /// Panics if there is no slot to remove; a bound callable that declares
    /// no receiver is a programming error in the layer that built it.
    pub(crate) fn without_receiver(&self) -> Self {
        assert!(
            !self.params.is_empty(),
            "bound callable must declare a receiver parameter"
        );
        let params = self.params[1..].to_vec();
        let mut defaults = self.defaults.clone();
        if defaults.len() > params.len() {
            // only possible when every slot, receiver included, had a default
            defaults.remove(0);
        }
        Self::new(params, defaults, self.var_args.clone(), self.var_kwargs.clone())
    }

    /// Binds a request against this descriptor.
    ///
    /// `func` is the callable's display name, used only in error messages.
    ///
    /// The algorithm reproduces the scripting layer's precedence:
    /// 1. Excess positional arguments are rejected up front unless a
    ///    variadic positional collector absorbs them.
    /// 2. Positional values fill slots left to right with no gaps.
    /// 3. Named arguments are consumed in insertion order; a key for a slot
    ///    already filled positionally is a collision, a pattern slot's
    ///    synthetic key is rejected, and keys matching nothing either join
    ///    the residual or are reported together as unexpected.
    /// 4. Unfilled slots take their trailing default; the first one without
    ///    a default fails the binding.
    ///
    /// On success, invoking the callable with the returned canonical form is
    /// observably equivalent to invoking it with the original request.
    pub fn bind(&self, call: CallArgs, func: &str) -> BindResult<BoundCall> {
        if self.bind_mode != BindMode::Complex && call.keyword_len() == 0 {
            return self.bind_positional_only(call, func);
        }
        self.bind_full(call, func)
    }

    /// Fast path for purely positional requests against signatures with no
    /// variadic collectors: fill left to right, append defaults, and only
    /// the count can go wrong.
    fn bind_positional_only(&self, call: CallArgs, func: &str) -> BindResult<BoundCall> {
        debug_assert_ne!(self.bind_mode, BindMode::Complex);
        let (pos_iter, _) = call.into_parts();
        let given = pos_iter.len();
        let limit = self.params.len();

        if given > limit {
            return Err(BindError::too_many_positional(func, limit, given));
        }

        let mut args = Vec::with_capacity(limit);
        args.extend(pos_iter);

        if given < limit {
            let first_default = limit - self.defaults.len();
            if given < first_default {
                return Err(BindError::missing_argument(func, self.params[given].display()));
            }
            for slot in given..limit {
                args.push(self.defaults[slot - first_default].clone());
            }
        }

        Ok(BoundCall {
            args,
            kwargs: Kwargs::default(),
        })
    }

    /// The full binding algorithm, for signatures with variadic collectors
    /// or requests that carry named arguments.
    fn bind_full(&self, call: CallArgs, func: &str) -> BindResult<BoundCall> {
        let (mut pos_iter, keyword_args) = call.into_parts();
        let given = pos_iter.len();
        let limit = self.params.len();

        if self.var_args.is_none() && given > limit {
            return Err(BindError::too_many_positional(func, limit, given));
        }

        // 1. Fill declared slots left to right from the positional values;
        // anything past the last slot is variadic overflow.
        let mut slots: Vec<Option<Value>> = Vec::with_capacity(limit);
        for _ in 0..limit {
            slots.push(pos_iter.next());
        }
        let filled_positionally = given.min(limit);
        let overflow: Vec<Value> = pos_iter.collect();

        // 2. Consume named arguments in insertion order. Collisions and
        // pattern-key violations fail fast; unmatched keys are gathered so
        // they can all be reported in one error.
        let mut residual = Kwargs::default();
        let mut offending: Vec<Box<str>> = Vec::new();
        for (key, value) in keyword_args {
            if let Some(index) = self.params.iter().position(|slot| slot.matches(&key)) {
                if index < filled_positionally {
                    return Err(BindError::multiple_values(func, &key));
                }
                slots[index] = Some(value);
            } else if let Some(index) = self.pattern_index_for_key(&key) {
                return Err(BindError::pattern_keyword(func, index));
            } else if self.var_kwargs.is_some() {
                residual.insert(key, value);
            } else {
                offending.push(key);
            }
        }
        if !offending.is_empty() {
            return Err(BindError::unexpected_keywords(func, offending));
        }

        // 3. Resolve remaining slots from the trailing defaults; the first
        // slot with neither a value nor a default fails the binding.
        let first_default = limit - self.defaults.len();
        let mut args = Vec::with_capacity(limit + overflow.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(value) => args.push(value),
                None if index >= first_default => args.push(self.defaults[index - first_default].clone()),
                None => return Err(BindError::missing_argument(func, self.params[index].display())),
            }
        }
        args.extend(overflow);

        Ok(BoundCall { args, kwargs: residual })
    }

    /// Maps a synthetic `.{index}` key to its pattern slot, if the key
    /// addresses one. Keys of that shape naming anything else fall through
    /// to the unknown-keyword handling.
    fn pattern_index_for_key(&self, key: &str) -> Option<usize> {
        let index: usize = key.strip_prefix('.')?.parse().ok()?;
        match self.params.get(index) {
            Some(ParamSlot::Pattern(_)) => Some(index),
            _ => None,
        }
    }
}

/// A successfully bound call in canonical form.
///
/// `args` holds one value per declared slot in order (defaults substituted
/// where the request supplied nothing), with any variadic-positional
/// overflow appended. `kwargs` holds the residual named arguments and is
/// non-empty only for signatures with a variadic named collector.
///
/// Every value from the original request appears exactly once across the
/// two fields; nothing is dropped or duplicated.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct BoundCall {
    /// Canonical positional arguments.
    pub args: Vec<Value>,
    /// Residual named arguments.
    pub kwargs: Kwargs,
}

impl BoundCall {
    /// Returns the total number of values carried by the bound call.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.args.len() + self.kwargs.len()
    }
}
