//! The handle an implementation receives to re-enter the dispatcher.

use numa_value::{ConversionTable, Kind, MathResult, Value};

use crate::dispatcher::{BoundSignature, Dispatcher};
use crate::function::TypedFunction;

/// Re-entry handle passed to every implementation.
///
/// `call_self` resolves the running function again for new arguments, which
/// is how a matrix signature applies the scalar signature of the same
/// function to each element.
#[derive(Clone, Copy)]
pub struct Callee<'d> {
    dispatcher: &'d Dispatcher,
    function: &'d TypedFunction,
}

impl<'d> Callee<'d> {
    pub(crate) fn new(dispatcher: &'d Dispatcher, function: &'d TypedFunction) -> Self {
        Callee {
            dispatcher,
            function,
        }
    }

    /// Name of the running function.
    #[inline]
    pub fn name(&self) -> &'d str {
        self.function.name()
    }

    #[inline]
    pub fn dispatcher(&self) -> &'d Dispatcher {
        self.dispatcher
    }

    #[inline]
    pub fn conversions(&self) -> &'d ConversionTable {
        self.dispatcher.conversions()
    }

    /// Invoke the running function with new arguments.
    pub fn call_self(&self, args: &[Value]) -> MathResult {
        self.dispatcher.call(self.function, args)
    }

    /// Invoke another registered function.
    pub fn invoke(&self, name: &str, args: &[Value]) -> MathResult {
        self.dispatcher.invoke(name, args)
    }

    /// Resolve the running function for `kinds` once, to call it many times.
    pub fn find_self(&self, kinds: &[Kind]) -> MathResult<BoundSignature<'d>> {
        self.dispatcher.bind(self.function, kinds)
    }

    /// Resolve another function for `kinds`.
    pub fn find(&self, name: &str, kinds: &[Kind]) -> MathResult<BoundSignature<'d>> {
        self.dispatcher.find(name, kinds)
    }
}

impl std::fmt::Debug for Callee<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callee")
            .field("function", &self.function.name())
            .finish_non_exhaustive()
    }
}
