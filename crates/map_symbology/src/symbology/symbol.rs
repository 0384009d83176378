//! The symbol trait
//!
//! Every symbol is a value-type property store that round-trips through a
//! [`Config`] subtree. The `Any` seam lets a [`Style`](super::Style)
//! recover the concrete type from its type-erased symbol list.

use std::any::Any;
use std::fmt::Debug;

use crate::config::ConfigBlock;

/// A typed bundle of style properties.
///
/// Implementors are plain data: cloneable, debuggable, and serializable
/// through [`ConfigBlock`]. The tag identifies the symbol type inside a
/// style's configuration document (e.g. `"render"`).
pub trait Symbol: Any + Debug + ConfigBlock {
    /// Configuration key this symbol type serializes under
    fn tag(&self) -> &'static str;

    /// Upcast for concrete-type recovery
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for concrete-type recovery
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone through the trait object
    fn boxed_clone(&self) -> Box<dyn Symbol>;
}

impl Clone for Box<dyn Symbol> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}
