//! Symbology subsystem
//!
//! Styles describe how map features are rendered. A [`Style`] aggregates
//! typed symbols, each covering one aspect of rendering (the render-state
//! symbol lives in [`render`]); the [`registry`] maps symbol tags to
//! constructors and stylesheet parsers so styles can be built by name.

pub mod registry;
pub mod render;
pub mod style;
pub mod symbol;

pub use registry::{SymbolFactory, SymbolRegistry};
pub use render::{DepthOffsetOptions, RenderSymbol};
pub use style::Style;
pub use symbol::Symbol;
