//! Scalar operations as the matrix algorithms apply them.

use std::borrow::Cow;

use numa_dispatch::{BoundSignature, Callee, Dispatcher};
use numa_value::{unknown_function, ElementKind, Kind, MathResult, Value};

/// A registered binary function, applied to pairs of elements.
#[derive(Clone, Copy, Debug)]
pub struct ScalarOp<'d> {
    dispatcher: &'d Dispatcher,
    name: &'d str,
}

impl<'d> ScalarOp<'d> {
    /// Look up `name` in `dispatcher`.
    pub fn new(dispatcher: &'d Dispatcher, name: &'d str) -> MathResult<Self> {
        if !dispatcher.contains(name) {
            return Err(unknown_function(name));
        }
        Ok(ScalarOp { dispatcher, name })
    }

    /// The function `callee` is running; how matrix signatures reach the
    /// scalar signatures of their own function.
    pub fn from_callee(callee: &Callee<'d>) -> Self {
        ScalarOp {
            dispatcher: callee.dispatcher(),
            name: callee.name(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'d str {
        self.name
    }

    #[inline]
    pub fn dispatcher(&self) -> &'d Dispatcher {
        self.dispatcher
    }

    /// Dispatch one pair.
    pub fn call(&self, x: &Value, y: &Value) -> MathResult {
        self.dispatcher.invoke(self.name, &[x.clone(), y.clone()])
    }

    /// Resolve once for a kind pair.
    pub fn find(&self, x: Kind, y: Kind) -> MathResult<BoundSignature<'d>> {
        self.dispatcher.find(self.name, &[x, y])
    }
}

/// A [`ScalarOp`] prepared for one pair of element datatypes.
///
/// With two uniform datatypes that share a common kind, the operation is
/// resolved once for `(common, common)` and elements are converted to the
/// common kind before each call; implicit zeros are the zero of that kind.
/// Otherwise every pair is dispatched on its own kinds and each side's
/// implicit zero follows its own datatype.
#[derive(Clone, Debug)]
pub struct Combiner<'d> {
    op: ScalarOp<'d>,
    bound: Option<(Kind, BoundSignature<'d>)>,
    zero_left: Value,
    zero_right: Value,
}

impl<'d> Combiner<'d> {
    pub fn new(op: ScalarOp<'d>, left: ElementKind, right: ElementKind) -> Self {
        let common = left
            .uniform()
            .zip(right.uniform())
            .and_then(|(a, b)| op.dispatcher.conversions().common_kind(a, b))
            .and_then(|kind| Some((kind, Value::zero_of(kind)?)));
        if let Some((kind, zero)) = common {
            match op.find(kind, kind) {
                Ok(bound) => {
                    return Combiner {
                        op,
                        bound: Some((kind, bound)),
                        zero_left: zero.clone(),
                        zero_right: zero,
                    };
                }
                Err(err) => {
                    tracing::trace!(op = op.name, %kind, %err, "no homogeneous signature");
                }
            }
        }
        Combiner {
            op,
            bound: None,
            zero_left: zero_of_datatype(left),
            zero_right: zero_of_datatype(right),
        }
    }

    /// Prepared for a matrix datatype on the left and a scalar on the right.
    pub fn with_scalar(op: ScalarOp<'d>, matrix: ElementKind, scalar: &Value) -> Self {
        Self::new(op, matrix, ElementKind::Uniform(scalar.kind()))
    }

    /// Prepared for a scalar on the left and a matrix datatype on the right.
    pub fn scalar_with(op: ScalarOp<'d>, scalar: &Value, matrix: ElementKind) -> Self {
        Self::new(op, ElementKind::Uniform(scalar.kind()), matrix)
    }

    /// Common kind the operation was resolved for, if homogenized.
    pub fn kind(&self) -> Option<Kind> {
        self.bound.as_ref().map(|(kind, _)| *kind)
    }

    #[inline]
    pub fn op(&self) -> ScalarOp<'d> {
        self.op
    }

    /// Implicit zero of the left operand.
    #[inline]
    pub fn zero_left(&self) -> &Value {
        &self.zero_left
    }

    /// Implicit zero of the right operand.
    #[inline]
    pub fn zero_right(&self) -> &Value {
        &self.zero_right
    }

    /// `op(x, y)`.
    pub fn apply(&self, x: &Value, y: &Value) -> MathResult {
        match &self.bound {
            Some((kind, bound)) => {
                let table = self.op.dispatcher.conversions();
                let x = homogenize(table, x, *kind)?;
                let y = homogenize(table, y, *kind)?;
                bound.call(&[x.into_owned(), y.into_owned()])
            }
            None => self.op.call(x, y),
        }
    }

    /// Whether `op(0, 0)` is zero. A failing probe counts as not zero, so
    /// the error surfaces on the positions that actually need the value.
    pub fn preserves_zero(&self) -> bool {
        self.zero_result().is_some_and(|result| result.is_zero())
    }

    /// `op(0, 0)`, or `None` when the operation fails on zeros.
    pub fn zero_result(&self) -> Option<Value> {
        self.apply(&self.zero_left, &self.zero_right).ok()
    }
}

fn homogenize<'v>(
    table: &numa_value::ConversionTable,
    value: &'v Value,
    kind: Kind,
) -> MathResult<Cow<'v, Value>> {
    if value.kind() == kind {
        Ok(Cow::Borrowed(value))
    } else {
        table.convert(value, kind).map(Cow::Owned)
    }
}

/// Zero of a uniform datatype, `number` zero otherwise.
pub(crate) fn zero_of_datatype(datatype: ElementKind) -> Value {
    datatype
        .uniform()
        .and_then(Value::zero_of)
        .unwrap_or(Value::Number(0.0))
}
