//! `MathContext` and its builder.

use numa_dispatch::{BoundSignature, Dispatcher, Signature};
use numa_matrix::{access, elementwise, ScalarOp, Selector};
use numa_value::{ConversionTable, DenseMatrix, Kind, MathResult, SparseMatrix, Storage, Value};

use crate::config::MathConfig;
use crate::functions;

/// Builder for [`MathContext`].
///
/// Standard functions are registered first, then the functions added with
/// [`ContextBuilder::function`] in the order given. Extra signatures for a
/// standard name extend that function.
#[derive(Default)]
pub struct ContextBuilder {
    config: MathConfig,
    conversions: Option<ConversionTable>,
    functions: Vec<(String, Vec<Signature>)>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration the standard functions are built with.
    #[must_use]
    pub fn config(mut self, config: MathConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the standard conversion table.
    #[must_use]
    pub fn conversions(mut self, table: ConversionTable) -> Self {
        self.conversions = Some(table);
        self
    }

    /// Register additional signatures under `name`.
    #[must_use]
    pub fn function(mut self, name: impl Into<String>, signatures: Vec<Signature>) -> Self {
        self.functions.push((name.into(), signatures));
        self
    }

    /// Validate the configuration and register every function.
    pub fn build(self) -> MathResult<MathContext> {
        self.config.validate()?;
        let mut dispatcher = Dispatcher::new(self.conversions.unwrap_or_default());
        functions::register_all(&mut dispatcher, &self.config)?;
        for (name, signatures) in self.functions {
            dispatcher.register(&name, signatures)?;
        }
        tracing::debug!(
            rel_tol = self.config.rel_tol,
            abs_tol = self.config.abs_tol,
            matrix = %self.config.matrix,
            number = %self.config.number,
            "built math context"
        );
        Ok(MathContext {
            dispatcher,
            config: self.config,
        })
    }
}

/// A dispatcher with the standard functions plus the configuration they
/// were built with.
pub struct MathContext {
    dispatcher: Dispatcher,
    config: MathConfig,
}

impl MathContext {
    /// Context with the default configuration and conversions.
    pub fn new() -> MathResult<Self> {
        ContextBuilder::new().build()
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &MathConfig {
        &self.config
    }

    #[inline]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Call function `name` with `args`.
    pub fn invoke(&self, name: &str, args: &[Value]) -> MathResult {
        self.dispatcher.invoke(name, args)
    }

    /// Resolve the signature `name` would run for arguments of `kinds`.
    pub fn find(&self, name: &str, kinds: &[Kind]) -> MathResult<BoundSignature<'_>> {
        self.dispatcher.find(name, kinds)
    }

    /// Apply the binary function `name` elementwise to two operands, at
    /// least one of them a matrix.
    pub fn elementwise(&self, name: &str, a: &Value, b: &Value) -> MathResult {
        let op = ScalarOp::new(&self.dispatcher, name)?;
        elementwise(op, a, b)
    }

    /// Matrix of the configured storage from equally long rows.
    pub fn matrix(&self, rows: Vec<Vec<Value>>) -> MathResult {
        let dense = DenseMatrix::from_rows(rows)?;
        match self.config.matrix {
            Storage::Dense => Ok(Value::dense(dense)),
            Storage::Sparse => dense.to_sparse().map(Value::sparse),
        }
    }

    /// Zero matrix of the configured storage and number kind.
    pub fn zeros(&self, size: &[usize]) -> MathResult {
        let args: Vec<Value> = size.iter().map(|&n| Value::number(n as f64)).collect();
        self.invoke("zeros", &args)
    }

    /// Read `object` through `selector`.
    pub fn access(&self, object: &Value, selector: Selector<'_>) -> MathResult {
        access(object, selector)
    }

    /// Empty sparse matrix declaring the configured number kind.
    pub fn sparse_zeros(&self, rows: usize, columns: usize) -> Value {
        Value::sparse(SparseMatrix::zeros(rows, columns, Some(self.config.number)))
    }
}
