//! Symbol type registry
//!
//! Maps symbol tags to constructors and stylesheet parsers so style
//! loaders can instantiate symbols by name. The built-in `render` symbol
//! registers itself when the table first initializes; downstream crates
//! add their own types with [`register_symbol`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use log::debug;
use once_cell::sync::Lazy;

use crate::config::Config;
use crate::symbology::render::RenderSymbol;
use crate::symbology::style::Style;
use crate::symbology::symbol::Symbol;

/// Constructor and parser entry points for one symbol type
#[derive(Clone, Copy)]
pub struct SymbolFactory {
    tag: &'static str,
    sld_prefix: &'static str,
    create: fn(&Config) -> Box<dyn Symbol>,
    parse_sld: fn(&Config, &mut Style),
}

impl SymbolFactory {
    /// Describe a symbol type.
    ///
    /// `tag` is the configuration-tree key the type serializes under;
    /// `sld_prefix` is the prefix its flat stylesheet keys share (used
    /// only to report unrecognized declarations).
    pub const fn new(
        tag: &'static str,
        sld_prefix: &'static str,
        create: fn(&Config) -> Box<dyn Symbol>,
        parse_sld: fn(&Config, &mut Style),
    ) -> Self {
        Self {
            tag,
            sld_prefix,
            create,
            parse_sld,
        }
    }

    /// The configuration-tree tag
    pub fn tag(&self) -> &'static str {
        self.tag
    }
}

impl std::fmt::Debug for SymbolFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolFactory").field("tag", &self.tag).finish()
    }
}

/// Registry of symbol types, keyed by tag
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    factories: Vec<SymbolFactory>,
}

impl SymbolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(SymbolFactory::new(
            "render",
            "render-",
            |conf| Box::new(RenderSymbol::from_config(conf)),
            RenderSymbol::parse_sld,
        ));
        registry
    }

    /// Register a symbol type, replacing any prior entry with the same tag
    pub fn register(&mut self, factory: SymbolFactory) {
        if let Some(existing) = self.factories.iter_mut().find(|f| f.tag == factory.tag) {
            *existing = factory;
        } else {
            self.factories.push(factory);
        }
    }

    /// Instantiate a symbol by tag from a configuration subtree
    pub fn create(&self, tag: &str, conf: &Config) -> Option<Box<dyn Symbol>> {
        self.factories
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| (f.create)(conf))
    }

    /// Offer a flat stylesheet declaration to every registered parser.
    ///
    /// Each parser applies at most one property and ignores keys it does
    /// not own, so dispatch order only matters between symbol types that
    /// claim the same key. Returns whether any registered type claims the
    /// declaration's key prefix.
    pub fn parse_declaration(&self, c: &Config, style: &mut Style) -> bool {
        let key = c.key().trim().to_ascii_lowercase();
        let mut recognized = false;
        for factory in &self.factories {
            if key.starts_with(factory.sld_prefix) {
                recognized = true;
            }
            (factory.parse_sld)(c, style);
        }
        if !recognized {
            debug!("ignoring unrecognized style declaration {:?}", c.key());
        }
        recognized
    }
}

static REGISTRY: Lazy<RwLock<SymbolRegistry>> =
    Lazy::new(|| RwLock::new(SymbolRegistry::with_builtins()));

fn read_registry() -> RwLockReadGuard<'static, SymbolRegistry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

/// Register a symbol type with the process-wide registry
pub fn register_symbol(factory: SymbolFactory) {
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(factory);
}

/// Instantiate a symbol by tag using the process-wide registry
pub fn create_symbol(tag: &str, conf: &Config) -> Option<Box<dyn Symbol>> {
    read_registry().create(tag, conf)
}

/// Dispatch a flat stylesheet declaration through the process-wide
/// registry; returns whether any symbol type recognized the key prefix
pub fn parse_declaration(c: &Config, style: &mut Style) -> bool {
    read_registry().parse_declaration(c, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_render_symbol_by_tag() {
        let mut conf = Config::new("render");
        conf.add_pair("transparent", true);

        let symbol = create_symbol("render", &conf).unwrap();
        assert_eq!(symbol.tag(), "render");
        let render = symbol.as_any().downcast_ref::<RenderSymbol>().unwrap();
        assert!(render.transparent());
    }

    #[test]
    fn test_create_unknown_tag_is_none() {
        assert!(create_symbol("sparkles", &Config::new("sparkles")).is_none());
    }

    #[test]
    fn test_parse_declaration_dispatch() {
        let mut style = Style::new("test");
        let handled = parse_declaration(&Config::pair("render-decal", "true"), &mut style);
        assert!(handled);
        assert!(style.get::<RenderSymbol>().unwrap().decal());

        let handled = parse_declaration(&Config::pair("stroke-width", "2px"), &mut style);
        assert!(!handled);
    }
}
