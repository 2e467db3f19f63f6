//! The function table and the call path.

use std::borrow::Cow;

use numa_value::{unknown_function, ConversionTable, Kind, MathResult, Value};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::callee::Callee;
use crate::function::{KindKey, TypedFunction};
use crate::signature::Signature;
use crate::stack::ensure_sufficient_stack;

/// Registry of named typed functions sharing one conversion table.
///
/// Build it once, register every function, then share it by reference.
/// Resolution caches are per function and fill lazily.
#[derive(Debug)]
pub struct Dispatcher {
    functions: FxHashMap<String, TypedFunction>,
    conversions: ConversionTable,
}

impl Dispatcher {
    pub fn new(conversions: ConversionTable) -> Self {
        Dispatcher {
            functions: FxHashMap::default(),
            conversions,
        }
    }

    #[inline]
    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// Add `signatures` to the function `name`, creating it if needed.
    ///
    /// Fails if a signature repeats an existing parameter list or if the
    /// function has already resolved a call.
    pub fn register(&mut self, name: &str, signatures: Vec<Signature>) -> MathResult<()> {
        tracing::debug!(function = name, count = signatures.len(), "registering signatures");
        self.functions
            .entry(name.to_string())
            .or_insert_with(|| TypedFunction::new(name))
            .add(signatures)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    #[inline]
    pub fn function(&self, name: &str) -> Option<&TypedFunction> {
        self.functions.get(name)
    }

    /// Registered names, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve and run `name` on `args`.
    #[tracing::instrument(level = "trace", skip(self, args), fields(argc = args.len()))]
    pub fn invoke(&self, name: &str, args: &[Value]) -> MathResult {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| unknown_function(name))?;
        self.call(function, args)
    }

    /// Resolve `name` for `kinds` without running it.
    pub fn find(&self, name: &str, kinds: &[Kind]) -> MathResult<BoundSignature<'_>> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| unknown_function(name))?;
        self.bind(function, kinds)
    }

    pub(crate) fn call(&self, function: &TypedFunction, args: &[Value]) -> MathResult {
        let kinds: KindKey = args.iter().map(Value::kind).collect();
        self.bind(function, &kinds)?.call(args)
    }

    pub(crate) fn bind<'d>(
        &'d self,
        function: &'d TypedFunction,
        kinds: &[Kind],
    ) -> MathResult<BoundSignature<'d>> {
        let resolution = function.resolve(kinds, &self.conversions)?;
        Ok(BoundSignature {
            callee: Callee::new(self, function),
            signature: &function.signatures()[resolution.signature],
            index: resolution.signature,
            conversions: resolution.conversions,
            cost: resolution.cost,
        })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ConversionTable::standard())
    }
}

/// A signature resolved for one kind tuple, callable many times.
///
/// Arguments passed to [`BoundSignature::call`] are expected to have the
/// kinds it was resolved for; each is converted to its planned target.
#[derive(Debug, Clone)]
pub struct BoundSignature<'d> {
    callee: Callee<'d>,
    signature: &'d Signature,
    index: usize,
    conversions: SmallVec<[Option<Kind>; 4]>,
    cost: u32,
}

impl<'d> BoundSignature<'d> {
    #[inline]
    pub fn signature(&self) -> &'d Signature {
        self.signature
    }

    /// Registration index of the signature within its function.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Whether the call needs no conversion.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.conversions.iter().all(Option::is_none)
    }

    /// Per-argument conversion targets.
    #[inline]
    pub fn conversions(&self) -> &[Option<Kind>] {
        &self.conversions
    }

    /// Convert the arguments as planned and run the implementation.
    pub fn call(&self, args: &[Value]) -> MathResult {
        let args: Cow<'_, [Value]> = if self.is_exact() {
            Cow::Borrowed(args)
        } else {
            let table = self.callee.conversions();
            Cow::Owned(
                args.iter()
                    .enumerate()
                    .map(|(i, arg)| match self.conversions.get(i).copied().flatten() {
                        Some(target) => table.convert(arg, target),
                        None => Ok(arg.clone()),
                    })
                    .collect::<MathResult<Vec<_>>>()?,
            )
        };
        let implementation = self.signature.implementation();
        ensure_sufficient_stack(|| implementation(&self.callee, &args))
    }
}
