//! Named multi-signature functions and their resolution cache.

use std::sync::atomic::{AtomicBool, Ordering};

use numa_value::{
    duplicate_signature, no_matching_signature, registration_closed, wrong_arg_count,
    ConversionTable, Kind, MathResult,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::signature::Signature;

/// Argument kind tuple; the resolution cache key.
pub type KindKey = SmallVec<[Kind; 4]>;

/// Outcome of resolving one kind tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Index of the chosen signature in registration order.
    pub signature: usize,
    /// Conversion target per argument; `None` keeps the argument as is.
    pub conversions: SmallVec<[Option<Kind>; 4]>,
    /// Total conversion cost; 0 for an exact match.
    pub cost: u32,
}

impl Resolution {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.cost == 0
    }
}

/// A named function: its signatures in registration order plus a cache from
/// argument kinds to the resolved signature.
pub struct TypedFunction {
    name: String,
    signatures: Vec<Signature>,
    cache: RwLock<FxHashMap<KindKey, Resolution>>,
    /// Set by the first resolution; no signatures may be added afterwards.
    sealed: AtomicBool,
}

impl TypedFunction {
    pub(crate) fn new(name: &str) -> Self {
        TypedFunction {
            name: name.to_string(),
            signatures: Vec::new(),
            cache: RwLock::new(FxHashMap::default()),
            sealed: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Append signatures, rejecting duplicates and late registration.
    pub(crate) fn add(&mut self, signatures: Vec<Signature>) -> MathResult<()> {
        if self.sealed.load(Ordering::Acquire) {
            return Err(registration_closed(&self.name));
        }
        for signature in signatures {
            if self
                .signatures
                .iter()
                .any(|existing| existing.params() == signature.params())
            {
                return Err(duplicate_signature(&self.name, &signature.to_string()));
            }
            self.signatures.push(signature);
        }
        Ok(())
    }

    /// Smallest and largest accepted argument count over all signatures.
    pub fn arity_range(&self) -> (usize, Option<usize>) {
        let min = self
            .signatures
            .iter()
            .map(|s| s.arity().0)
            .min()
            .unwrap_or(0);
        let max = self
            .signatures
            .iter()
            .try_fold(0, |max: usize, s| s.arity().1.map(|m| max.max(m)));
        (min, max)
    }

    /// Number of kind tuples resolved so far.
    pub fn cached_resolutions(&self) -> usize {
        self.cache.read().len()
    }

    /// Resolve `kinds` to a signature, consulting and filling the cache.
    ///
    /// The cache lock is released before returning, so implementations never
    /// run under it.
    pub(crate) fn resolve(&self, kinds: &[Kind], table: &ConversionTable) -> MathResult<Resolution> {
        self.sealed.store(true, Ordering::Release);
        if let Some(hit) = self.cache.read().get(kinds) {
            return Ok(hit.clone());
        }

        let resolution = self.search(kinds, table)?;
        tracing::debug!(
            function = %self.name,
            ?kinds,
            signature = %self.signatures[resolution.signature],
            cost = resolution.cost,
            "resolved signature"
        );
        self.cache
            .write()
            .insert(kinds.iter().copied().collect(), resolution.clone());
        Ok(resolution)
    }

    fn search(&self, kinds: &[Kind], table: &ConversionTable) -> MathResult<Resolution> {
        let count = kinds.len();
        let candidates: SmallVec<[usize; 8]> = (0..self.signatures.len())
            .filter(|&i| self.signatures[i].accepts_count(count))
            .collect();
        if candidates.is_empty() {
            let (min, max) = self.arity_range();
            return Err(wrong_arg_count(&self.name, count, min, max));
        }

        // Exact matches: most specific first, then registration order.
        let exact = candidates
            .iter()
            .copied()
            .filter(|&i| {
                let signature = &self.signatures[i];
                kinds.iter().enumerate().all(|(a, &kind)| {
                    signature
                        .pattern_for(a)
                        .is_some_and(|pattern| pattern.matches(kind))
                })
            })
            .min_by_key(|&i| (self.signatures[i].specificity(), i));
        if let Some(signature) = exact {
            return Ok(Resolution {
                signature,
                conversions: SmallVec::from_elem(None, count),
                cost: 0,
            });
        }

        // Conversions: lowest total cost, then registration order.
        let mut best: Option<Resolution> = None;
        for &i in &candidates {
            let Some((cost, conversions)) = self.conversion_plan(i, kinds, table) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| cost < b.cost) {
                best = Some(Resolution {
                    signature: i,
                    conversions,
                    cost,
                });
            }
        }

        best.ok_or_else(|| {
            no_matching_signature(
                &self.name,
                kinds,
                self.signatures.iter().map(ToString::to_string).collect(),
            )
        })
    }

    /// Total cost and per-argument targets for signature `i`, or `None` if
    /// some argument cannot reach its pattern.
    fn conversion_plan(
        &self,
        i: usize,
        kinds: &[Kind],
        table: &ConversionTable,
    ) -> Option<(u32, SmallVec<[Option<Kind>; 4]>)> {
        let signature = &self.signatures[i];
        let mut total = 0u32;
        let mut conversions = SmallVec::with_capacity(kinds.len());
        for (a, &kind) in kinds.iter().enumerate() {
            let (cost, target) = signature.pattern_for(a)?.conversion_cost(kind, table)?;
            total = total.saturating_add(cost);
            conversions.push((target != kind).then_some(target));
        }
        Some((total, conversions))
    }
}

impl std::fmt::Debug for TypedFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedFunction")
            .field("name", &self.name)
            .field("signatures", &self.signatures)
            .field("cached", &self.cached_resolutions())
            .finish()
    }
}
