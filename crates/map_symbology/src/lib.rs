//! # Map Symbology
//!
//! Style symbology for 3D map rendering. Styles bundle typed symbols
//! (property stores describing one aspect of how features render) and
//! round-trip through a generic configuration tree or a flat CSS-like
//! stylesheet syntax.
//!
//! ## Features
//!
//! - **Render symbol**: depth test, lighting, culling, render order/bin,
//!   transparency, decals, crease angle, altitude cutoff, depth offset
//! - **Set-or-unset properties**: unset properties are omitted from
//!   serialization and default only on read
//! - **Stylesheet parsing**: `render-*` declarations with per-field
//!   coercion policies that degrade gracefully on malformed input
//! - **Unit-bearing quantities**: distances and angles with suffix parsing
//! - **Deferred expressions**: per-feature numeric expressions like
//!   `[priority] * 2`
//!
//! ## Quick Start
//!
//! ```rust
//! use map_symbology::prelude::*;
//!
//! let sheet = StyleSheet::from_css_str(
//!     "buildings { render-transparent: true; render-max-altitude: 10km; }",
//! )?;
//!
//! let style = sheet.style("buildings").unwrap();
//! let render = style.get::<RenderSymbol>().unwrap();
//! assert!(render.transparent());
//! # Ok::<(), map_symbology::StyleSheetError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod foundation;
pub mod stylesheet;
pub mod symbology;

pub use config::{Config, ConfigBlock, ConfigError};
pub use stylesheet::{StyleSheet, StyleSheetError};

/// Common imports for symbology users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigBlock},
        foundation::{
            expression::{NumericExpression, VariableResolver},
            units::{Angle, AngularUnit, Distance, LinearUnit},
        },
        stylesheet::{StyleSheet, StyleSheetError},
        symbology::{DepthOffsetOptions, RenderSymbol, Style, Symbol},
    };
}
