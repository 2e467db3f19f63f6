//! Type patterns: what a signature parameter accepts.

use std::fmt;

use numa_value::{ConversionTable, Kind};
use smallvec::SmallVec;

/// Matcher for one argument position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypePattern {
    /// Exactly one kind.
    Exact(Kind),
    /// Any of several kinds, kept sorted by table order.
    Union(SmallVec<[Kind; 4]>),
    /// Every kind.
    Any,
}

impl TypePattern {
    /// Union of `kinds`; collapses to `Exact` for a single kind.
    pub fn union(kinds: impl IntoIterator<Item = Kind>) -> Self {
        let mut kinds: SmallVec<[Kind; 4]> = kinds.into_iter().collect();
        kinds.sort_unstable();
        kinds.dedup();
        match kinds.as_slice() {
            [kind] => TypePattern::Exact(*kind),
            _ => TypePattern::Union(kinds),
        }
    }

    /// Parse `number`, `number | BigNumber`, `Matrix` or `any`.
    ///
    /// `Matrix` stands for both matrix kinds.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "any" {
            return Some(TypePattern::Any);
        }
        let mut kinds: SmallVec<[Kind; 4]> = SmallVec::new();
        for name in text.split('|').map(str::trim) {
            if name == "Matrix" {
                kinds.extend([Kind::DenseMatrix, Kind::SparseMatrix]);
            } else {
                kinds.push(Kind::from_name(name)?);
            }
        }
        Some(Self::union(kinds))
    }

    /// Whether `kind` matches without conversion.
    pub fn matches(&self, kind: Kind) -> bool {
        match self {
            TypePattern::Exact(k) => *k == kind,
            TypePattern::Union(kinds) => kinds.contains(&kind),
            TypePattern::Any => true,
        }
    }

    /// Exact kinds rank before unions, unions before `any`.
    pub fn specificity(&self) -> u32 {
        match self {
            TypePattern::Exact(_) => 0,
            TypePattern::Union(_) => 1,
            TypePattern::Any => 2,
        }
    }

    /// Cheapest way to make `kind` match: the cost and the target kind.
    ///
    /// A direct match costs 0 and keeps the kind. `None` when no member is
    /// reachable through `table`.
    pub fn conversion_cost(&self, kind: Kind, table: &ConversionTable) -> Option<(u32, Kind)> {
        if self.matches(kind) {
            return Some((0, kind));
        }
        let members: &[Kind] = match self {
            TypePattern::Exact(k) => std::slice::from_ref(k),
            TypePattern::Union(kinds) => kinds,
            TypePattern::Any => return Some((0, kind)),
        };
        members
            .iter()
            .filter_map(|&target| table.cost(kind, target).map(|cost| (cost, target)))
            .min_by_key(|&(cost, target)| (cost, target.slot()))
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePattern::Exact(kind) => write!(f, "{kind}"),
            TypePattern::Union(kinds) => {
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{kind}")?;
                }
                Ok(())
            }
            TypePattern::Any => f.write_str("any"),
        }
    }
}

/// One signature parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub pattern: TypePattern,
    /// Matches one or more trailing arguments.
    pub variadic: bool,
}

impl Param {
    pub const fn new(pattern: TypePattern) -> Self {
        Param {
            pattern,
            variadic: false,
        }
    }

    pub const fn rest(pattern: TypePattern) -> Self {
        Param {
            pattern,
            variadic: true,
        }
    }

    pub const fn exact(kind: Kind) -> Self {
        Param::new(TypePattern::Exact(kind))
    }

    pub const fn any() -> Self {
        Param::new(TypePattern::Any)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            f.write_str("...")?;
        }
        write!(f, "{}", self.pattern)
    }
}

#[cfg(test)]
mod tests;
