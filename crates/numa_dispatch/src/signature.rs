//! Signatures: parameter patterns plus an implementation.

use std::fmt;
use std::sync::Arc;

use numa_value::{invalid_signature, MathResult, Value};
use smallvec::SmallVec;

use crate::callee::Callee;
use crate::pattern::{Param, TypePattern};

/// Implementation of one signature.
///
/// Receives the already converted arguments and a [`Callee`] handle for
/// re-entering the dispatcher.
pub type Implementation = Arc<dyn Fn(&Callee<'_>, &[Value]) -> MathResult + Send + Sync>;

/// Ordered parameters plus an implementation.
#[derive(Clone)]
pub struct Signature {
    params: SmallVec<[Param; 4]>,
    implementation: Implementation,
}

impl Signature {
    /// Build a signature. Only the last parameter may be variadic.
    pub fn new<F>(params: impl IntoIterator<Item = Param>, implementation: F) -> MathResult<Self>
    where
        F: Fn(&Callee<'_>, &[Value]) -> MathResult + Send + Sync + 'static,
    {
        let params: SmallVec<[Param; 4]> = params.into_iter().collect();
        if let Some(position) = params.iter().position(|p| p.variadic) {
            if position + 1 != params.len() {
                return Err(invalid_signature(
                    &join_params(&params),
                    "only the last parameter may be variadic",
                ));
            }
        }
        Ok(Signature {
            params,
            implementation: Arc::new(implementation),
        })
    }

    /// Parse a comma separated parameter list such as
    /// `"number, number | BigNumber"` or `"Matrix, ...any"`.
    ///
    /// An empty string declares a function without parameters.
    pub fn parse<F>(text: &str, implementation: F) -> MathResult<Self>
    where
        F: Fn(&Callee<'_>, &[Value]) -> MathResult + Send + Sync + 'static,
    {
        let mut params: SmallVec<[Param; 4]> = SmallVec::new();
        if !text.trim().is_empty() {
            for part in text.split(',').map(str::trim) {
                let (variadic, pattern_text) = match part.strip_prefix("...") {
                    Some(rest) => (true, rest),
                    None => (false, part),
                };
                let pattern = TypePattern::parse(pattern_text).ok_or_else(|| {
                    invalid_signature(text, format!("unknown type \"{pattern_text}\""))
                })?;
                params.push(Param { pattern, variadic });
            }
        }
        Self::new(params, implementation)
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    pub fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(|p| p.variadic)
    }

    /// Accepted argument counts: `(min, max)`, `max` unbounded when
    /// variadic. A variadic parameter takes at least one argument.
    pub fn arity(&self) -> (usize, Option<usize>) {
        let n = self.params.len();
        if self.is_variadic() {
            (n, None)
        } else {
            (n, Some(n))
        }
    }

    pub fn accepts_count(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && max.map_or(true, |max| count <= max)
    }

    /// Pattern for argument `i`; trailing arguments share the variadic one.
    pub fn pattern_for(&self, i: usize) -> Option<&TypePattern> {
        match self.params.get(i) {
            Some(param) => Some(&param.pattern),
            None if self.is_variadic() => self.params.last().map(|p| &p.pattern),
            None => None,
        }
    }

    /// Ranking among exact matches; lower is more specific.
    pub(crate) fn specificity(&self) -> (bool, u32) {
        (
            self.is_variadic(),
            self.params.iter().map(|p| p.pattern.specificity()).sum(),
        )
    }

    #[inline]
    pub(crate) fn implementation(&self) -> &Implementation {
        &self.implementation
    }
}

fn join_params(params: &[Param]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_params(&self.params))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("params", &join_params(&self.params))
            .finish_non_exhaustive()
    }
}
