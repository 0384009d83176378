//! Style aggregate
//!
//! A [`Style`] is a named collection of symbols, at most one instance per
//! concrete symbol type. Symbols are stored type-erased; typed access
//! goes through the `Any` downcast seam on [`Symbol`].

use log::debug;

use crate::config::Config;
use crate::symbology::registry;
use crate::symbology::symbol::Symbol;

/// A named set of symbols describing how features render
#[derive(Debug, Clone, Default)]
pub struct Style {
    name: String,
    symbols: Vec<Box<dyn Symbol>>,
}

impl Style {
    /// Create an empty style
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: Vec::new(),
        }
    }

    /// The style's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the style
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// All symbols, in insertion order
    pub fn symbols(&self) -> &[Box<dyn Symbol>] {
        &self.symbols
    }

    /// Whether this style carries no symbols
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Append a symbol
    pub fn add_symbol(&mut self, symbol: Box<dyn Symbol>) {
        self.symbols.push(symbol);
    }

    /// The symbol of type `S`, if this style has one
    pub fn get<S: Symbol>(&self) -> Option<&S> {
        self.symbols.iter().find_map(|s| s.as_any().downcast_ref::<S>())
    }

    /// Mutable access to the symbol of type `S`, if this style has one
    pub fn get_mut<S: Symbol>(&mut self) -> Option<&mut S> {
        self.symbols
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<S>())
    }

    /// The symbol of type `S`, default-constructed and inserted on first
    /// access
    pub fn get_or_create<S: Symbol + Default>(&mut self) -> &mut S {
        if !self.symbols.iter().any(|s| s.as_any().is::<S>()) {
            self.symbols.push(Box::new(S::default()));
        }
        self.symbols
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<S>())
            .expect("symbol of this type was just inserted")
    }

    /// Serialize to a configuration document: one child per symbol,
    /// keyed by the style name
    pub fn get_config(&self) -> Config {
        let mut conf = Config::new(&self.name);
        for symbol in &self.symbols {
            conf.add(symbol.get_config());
        }
        conf
    }

    /// Build a style from a configuration document, instantiating each
    /// child subtree through the symbol registry. Subtrees with no
    /// registered symbol type are skipped.
    pub fn from_config(conf: &Config) -> Self {
        let mut style = Self::new(conf.key());
        for child in conf.children() {
            match registry::create_symbol(child.key(), child) {
                Some(symbol) => style.symbols.push(symbol),
                None => debug!("no symbol type registered for {:?}, skipping", child.key()),
            }
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::render::RenderSymbol;

    #[test]
    fn test_get_returns_none_before_creation() {
        let style = Style::new("empty");
        assert!(style.get::<RenderSymbol>().is_none());
        assert!(style.is_empty());
    }

    #[test]
    fn test_get_or_create_inserts_once() {
        let mut style = Style::new("test");
        style.get_or_create::<RenderSymbol>().set_decal(true);
        style.get_or_create::<RenderSymbol>().set_transparent(true);

        assert_eq!(style.symbols().len(), 1);
        let symbol = style.get::<RenderSymbol>().unwrap();
        assert!(symbol.decal());
        assert!(symbol.transparent());
    }

    #[test]
    fn test_config_round_trip() {
        let mut style = Style::new("buildings");
        style.get_or_create::<RenderSymbol>().set_clip_plane(1);

        let conf = style.get_config();
        assert_eq!(conf.key(), "buildings");
        assert_eq!(conf.children().len(), 1);
        assert_eq!(conf.children()[0].key(), "render");

        let rebuilt = Style::from_config(&conf);
        assert_eq!(rebuilt.name(), "buildings");
        assert_eq!(rebuilt.get::<RenderSymbol>().unwrap().clip_plane(), 1);
    }

    #[test]
    fn test_from_config_skips_unknown_symbol_tags() {
        let mut conf = Config::new("mixed");
        conf.add(Config::new("no-such-symbol"));
        let style = Style::from_config(&conf);
        assert!(style.is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut style = Style::new("original");
        style.get_or_create::<RenderSymbol>().set_clip_plane(5);

        let mut copy = style.clone();
        copy.get_mut::<RenderSymbol>().unwrap().set_clip_plane(9);

        assert_eq!(style.get::<RenderSymbol>().unwrap().clip_plane(), 5);
        assert_eq!(copy.get::<RenderSymbol>().unwrap().clip_plane(), 9);
    }
}
