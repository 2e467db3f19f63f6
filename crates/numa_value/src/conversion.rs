//! Implicit conversions between scalar kinds.
//!
//! A [`ConversionTable`] holds the direct widening rules and the all-pairs
//! cheapest paths between kinds. Dispatch uses [`ConversionTable::cost`] to
//! rank signatures and [`ConversionTable::convert`] to apply the winner's
//! conversions; the matrix suite uses [`ConversionTable::common_kind`] to
//! homogenize operands.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use crate::errors::{conversion_failed, invalid_signature, MathError, MathResult};
use crate::kind::Kind;
use crate::value::Value;

/// Largest integer a `number` represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Conversion function of a rule. Receives a value of the rule's `from`
/// kind and returns a value of its `to` kind.
pub type ConvertFn = fn(&Value) -> MathResult;

/// One direct conversion edge.
#[derive(Clone, Copy, Debug)]
pub struct ConversionRule {
    pub from: Kind,
    pub to: Kind,
    /// Ranking cost; at least 1.
    pub cost: u32,
    pub convert: ConvertFn,
}

impl ConversionRule {
    pub const fn new(from: Kind, to: Kind, cost: u32, convert: ConvertFn) -> Self {
        ConversionRule {
            from,
            to,
            cost,
            convert,
        }
    }
}

type Grid<T> = [[T; Kind::COUNT]; Kind::COUNT];

/// Direct conversion rules plus precomputed cheapest paths.
#[derive(Clone, Debug)]
pub struct ConversionTable {
    rules: Vec<ConversionRule>,
    /// Rule index of the direct edge `from -> to`.
    direct: Grid<Option<usize>>,
    /// Cheapest total cost `from -> to`.
    cost: Grid<Option<u32>>,
    /// First hop on the cheapest path `from -> to`.
    next: Grid<Option<Kind>>,
}

impl ConversionTable {
    /// Build a table from direct rules.
    ///
    /// Rejects rules with cost 0, rules from a kind to itself and two rules
    /// for the same pair, so no zero-cost cycle can exist.
    pub fn new(rules: Vec<ConversionRule>) -> MathResult<Self> {
        let mut direct: Grid<Option<usize>> = [[None; Kind::COUNT]; Kind::COUNT];
        for (i, rule) in rules.iter().enumerate() {
            let text = format!("{} -> {}", rule.from, rule.to);
            if rule.cost == 0 {
                return Err(invalid_signature(&text, "conversion cost must be at least 1"));
            }
            if rule.from == rule.to {
                return Err(invalid_signature(&text, "conversion to the same kind"));
            }
            let slot = &mut direct[rule.from.slot()][rule.to.slot()];
            if slot.is_some() {
                return Err(invalid_signature(&text, "conversion registered twice"));
            }
            *slot = Some(i);
        }
        Ok(Self::with_paths(rules, direct))
    }

    /// A table without any conversion; only exact matches dispatch.
    pub fn empty() -> Self {
        Self::with_paths(Vec::new(), [[None; Kind::COUNT]; Kind::COUNT])
    }

    /// The standard widening conversions.
    pub fn standard() -> Self {
        // The standard rules have distinct pairs and positive costs.
        Self::new(standard_rules()).unwrap_or_else(|_| Self::empty())
    }

    fn with_paths(rules: Vec<ConversionRule>, direct: Grid<Option<usize>>) -> Self {
        let mut cost: Grid<Option<u32>> = [[None; Kind::COUNT]; Kind::COUNT];
        let mut next: Grid<Option<Kind>> = [[None; Kind::COUNT]; Kind::COUNT];
        for kind in Kind::ALL {
            cost[kind.slot()][kind.slot()] = Some(0);
            next[kind.slot()][kind.slot()] = Some(kind);
        }
        for rule in &rules {
            cost[rule.from.slot()][rule.to.slot()] = Some(rule.cost);
            next[rule.from.slot()][rule.to.slot()] = Some(rule.to);
        }

        // Floyd-Warshall over the kind graph.
        for k in 0..Kind::COUNT {
            for i in 0..Kind::COUNT {
                let Some(ik) = cost[i][k] else { continue };
                for j in 0..Kind::COUNT {
                    let Some(kj) = cost[k][j] else { continue };
                    let through = ik.saturating_add(kj);
                    if cost[i][j].map_or(true, |current| through < current) {
                        cost[i][j] = Some(through);
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        tracing::debug!(rules = rules.len(), "built conversion table");
        ConversionTable {
            rules,
            direct,
            cost,
            next,
        }
    }

    /// Direct rules in registration order.
    #[inline]
    pub fn rules(&self) -> &[ConversionRule] {
        &self.rules
    }

    /// Cheapest total cost of converting `from` into `to`; `Some(0)` when
    /// they are equal and `None` when no path exists.
    #[inline]
    pub fn cost(&self, from: Kind, to: Kind) -> Option<u32> {
        self.cost[from.slot()][to.slot()]
    }

    /// Convert `value` into `to` along the cheapest path.
    pub fn convert(&self, value: &Value, to: Kind) -> MathResult {
        let from = value.kind();
        if from == to {
            return Ok(value.clone());
        }
        let mut current = value.clone();
        let mut at = from;
        while at != to {
            let hop = self.next[at.slot()][to.slot()]
                .ok_or_else(|| conversion_failed(from, to, "no conversion path"))?;
            let rule = self.direct[at.slot()][hop.slot()]
                .map(|i| &self.rules[i])
                .ok_or_else(|| conversion_failed(at, hop, "no conversion path"))?;
            current = (rule.convert)(&current)?;
            at = hop;
        }
        Ok(current)
    }

    /// The scalar kind both `a` and `b` reach with the lowest combined cost.
    ///
    /// Ties go to the kind declared first in [`Kind::ALL`]. Matrix kinds are
    /// never a common kind.
    pub fn common_kind(&self, a: Kind, b: Kind) -> Option<Kind> {
        if a == b {
            return Some(a);
        }
        let mut best: Option<(u32, Kind)> = None;
        for target in Kind::ALL.into_iter().filter(|kind| !kind.is_matrix()) {
            let (Some(ca), Some(cb)) = (self.cost(a, target), self.cost(b, target)) else {
                continue;
            };
            let total = ca.saturating_add(cb);
            if best.map_or(true, |(cost, _)| total < cost) {
                best = Some((total, target));
            }
        }
        best.map(|(_, kind)| kind)
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Standard rules. Lower cost means preferred: widening between numeric
/// kinds first, parsing text next, booleans last.
pub fn standard_rules() -> Vec<ConversionRule> {
    use Kind::{BigInt as Int, BigNumber as Big, Boolean as Bool, Complex as Cx, Fraction as Frac};
    use Kind::{Number as Num, Text};

    vec![
        ConversionRule::new(Num, Big, 1, number_to_big_number),
        ConversionRule::new(Num, Cx, 2, number_to_complex),
        ConversionRule::new(Big, Cx, 3, big_number_to_complex),
        ConversionRule::new(Int, Num, 4, bigint_to_number),
        ConversionRule::new(Int, Big, 5, bigint_to_big_number),
        ConversionRule::new(Int, Frac, 6, bigint_to_fraction),
        ConversionRule::new(Frac, Big, 7, fraction_to_big_number),
        ConversionRule::new(Frac, Cx, 8, fraction_to_complex),
        ConversionRule::new(Num, Frac, 9, number_to_fraction),
        ConversionRule::new(Text, Num, 10, text_to_number),
        ConversionRule::new(Text, Big, 11, text_to_big_number),
        ConversionRule::new(Text, Int, 12, text_to_bigint),
        ConversionRule::new(Text, Frac, 13, text_to_fraction),
        ConversionRule::new(Text, Cx, 14, text_to_complex),
        ConversionRule::new(Bool, Num, 15, boolean_to_number),
        ConversionRule::new(Bool, Big, 16, boolean_to_big_number),
        ConversionRule::new(Bool, Int, 17, boolean_to_bigint),
        ConversionRule::new(Bool, Frac, 18, boolean_to_fraction),
        ConversionRule::new(Bool, Text, 19, boolean_to_text),
    ]
}

// Rule implementations

fn unexpected(value: &Value, to: Kind) -> MathError {
    conversion_failed(value.kind(), to, "unexpected source value")
}

fn number_to_big_number(value: &Value) -> MathResult {
    let Value::Number(x) = value else {
        return Err(unexpected(value, Kind::BigNumber));
    };
    BigDecimal::from_f64(*x)
        .map(Value::big_number)
        .ok_or_else(|| conversion_failed(Kind::Number, Kind::BigNumber, format!("{x} is not finite")))
}

fn number_to_complex(value: &Value) -> MathResult {
    let Value::Number(x) = value else {
        return Err(unexpected(value, Kind::Complex));
    };
    Ok(Value::complex(*x, 0.0))
}

fn big_number_to_complex(value: &Value) -> MathResult {
    let Value::BigNumber(d) = value else {
        return Err(unexpected(value, Kind::Complex));
    };
    let re = d
        .to_f64()
        .ok_or_else(|| conversion_failed(Kind::BigNumber, Kind::Complex, "out of range"))?;
    Ok(Value::complex(re, 0.0))
}

fn bigint_to_number(value: &Value) -> MathResult {
    let Value::BigInt(n) = value else {
        return Err(unexpected(value, Kind::Number));
    };
    if n.abs() > BigInt::from(MAX_SAFE_INTEGER) {
        return Err(conversion_failed(
            Kind::BigInt,
            Kind::Number,
            format!("{} exceeds the safe integer range", **n),
        ));
    }
    n.to_f64()
        .map(Value::Number)
        .ok_or_else(|| conversion_failed(Kind::BigInt, Kind::Number, "out of range"))
}

fn bigint_to_big_number(value: &Value) -> MathResult {
    let Value::BigInt(n) = value else {
        return Err(unexpected(value, Kind::BigNumber));
    };
    Ok(Value::big_number(BigDecimal::new((**n).clone(), 0)))
}

fn bigint_to_fraction(value: &Value) -> MathResult {
    let Value::BigInt(n) = value else {
        return Err(unexpected(value, Kind::Fraction));
    };
    Ok(Value::fraction(BigRational::from_integer((**n).clone())))
}

/// Exact fraction of a decimal: its digits over a power of ten.
pub fn decimal_to_fraction(d: &BigDecimal) -> BigRational {
    let (digits, scale) = d.as_bigint_and_exponent();
    let power = num_traits::pow(BigInt::from(10), scale.unsigned_abs() as usize);
    if scale >= 0 {
        BigRational::new(digits, power)
    } else {
        BigRational::from_integer(digits * power)
    }
}

fn fraction_to_big_number(value: &Value) -> MathResult {
    let Value::Fraction(q) = value else {
        return Err(unexpected(value, Kind::BigNumber));
    };
    let numer = BigDecimal::new(q.numer().clone(), 0);
    let denom = BigDecimal::new(q.denom().clone(), 0);
    Ok(Value::big_number(numer / denom))
}

fn fraction_to_complex(value: &Value) -> MathResult {
    let Value::Fraction(q) = value else {
        return Err(unexpected(value, Kind::Complex));
    };
    let re = q
        .to_f64()
        .ok_or_else(|| conversion_failed(Kind::Fraction, Kind::Complex, "out of range"))?;
    Ok(Value::complex(re, 0.0))
}

fn number_to_fraction(value: &Value) -> MathResult {
    let Value::Number(x) = value else {
        return Err(unexpected(value, Kind::Fraction));
    };
    BigRational::from_float(*x)
        .map(Value::fraction)
        .ok_or_else(|| conversion_failed(Kind::Number, Kind::Fraction, format!("{x} is not finite")))
}

fn text_of(value: &Value, to: Kind) -> MathResult<&str> {
    value
        .as_str()
        .map(str::trim)
        .ok_or_else(|| unexpected(value, to))
}

fn parse_failed(text: &str, to: Kind) -> MathError {
    conversion_failed(Kind::Text, to, format!("\"{text}\" is not a valid {to}"))
}

fn text_to_number(value: &Value) -> MathResult {
    let text = text_of(value, Kind::Number)?;
    text.parse::<f64>()
        .map(Value::Number)
        .map_err(|_| parse_failed(text, Kind::Number))
}

fn text_to_big_number(value: &Value) -> MathResult {
    let text = text_of(value, Kind::BigNumber)?;
    BigDecimal::from_str(text)
        .map(Value::big_number)
        .map_err(|_| parse_failed(text, Kind::BigNumber))
}

fn text_to_bigint(value: &Value) -> MathResult {
    let text = text_of(value, Kind::BigInt)?;
    BigInt::from_str(text)
        .map(Value::bigint)
        .map_err(|_| parse_failed(text, Kind::BigInt))
}

fn text_to_fraction(value: &Value) -> MathResult {
    let text = text_of(value, Kind::Fraction)?;
    if let Ok(q) = BigRational::from_str(text) {
        return Ok(Value::fraction(q));
    }
    BigDecimal::from_str(text)
        .map(|d| Value::fraction(decimal_to_fraction(&d)))
        .map_err(|_| parse_failed(text, Kind::Fraction))
}

fn text_to_complex(value: &Value) -> MathResult {
    let text = text_of(value, Kind::Complex)?;
    parse_complex(text)
        .map(Value::Complex)
        .ok_or_else(|| parse_failed(text, Kind::Complex))
}

/// Parse `a`, `bi`, `a+bi` or `a-bi` (whitespace allowed around the sign).
fn parse_complex(text: &str) -> Option<Complex64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let Some(body) = compact.strip_suffix('i') else {
        return compact.parse::<f64>().ok().map(|re| Complex64::new(re, 0.0));
    };

    // Split at the last sign that is neither leading nor an exponent sign.
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    let imaginary = |part: &str| match part {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => part.parse::<f64>().ok(),
    };

    match split {
        Some(at) => {
            let re = body[..at].parse::<f64>().ok()?;
            let im = imaginary(&body[at..])?;
            Some(Complex64::new(re, im))
        }
        None => imaginary(body).map(|im| Complex64::new(0.0, im)),
    }
}

fn boolean_of(value: &Value, to: Kind) -> MathResult<bool> {
    value.as_bool().ok_or_else(|| unexpected(value, to))
}

fn boolean_to_number(value: &Value) -> MathResult {
    let b = boolean_of(value, Kind::Number)?;
    Ok(Value::Number(if b { 1.0 } else { 0.0 }))
}

fn boolean_to_big_number(value: &Value) -> MathResult {
    let b = boolean_of(value, Kind::BigNumber)?;
    Ok(Value::big_number(if b { BigDecimal::one() } else { BigDecimal::zero() }))
}

fn boolean_to_bigint(value: &Value) -> MathResult {
    let b = boolean_of(value, Kind::BigInt)?;
    Ok(Value::bigint(if b { BigInt::one() } else { BigInt::zero() }))
}

fn boolean_to_fraction(value: &Value) -> MathResult {
    let b = boolean_of(value, Kind::Fraction)?;
    Ok(Value::fraction(if b {
        BigRational::one()
    } else {
        BigRational::zero()
    }))
}

fn boolean_to_text(value: &Value) -> MathResult {
    let b = boolean_of(value, Kind::Text)?;
    Ok(Value::text(b.to_string()))
}
