use core::fmt::Debug;
use core::hash::Hash;

/// An atomic unit of the alphabet being compressed.
///
/// Anything that can be cloned, compared, ordered and hashed qualifies. The ordering is what
/// makes tree construction deterministic: leaves enter the priority queue in symbol order.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> Symbol for T {}

/// Renders a symbol for error messages.
pub(crate) fn describe<S: Symbol>(symbol: &S) -> String {
    format!("{:?}", symbol)
}
