//! Stylesheet loading
//!
//! A [`StyleSheet`] is an ordered collection of named styles. Sheets load
//! from three formats, dispatched on file extension:
//! - `.css`: flat CSS-like text, `selector { render-lighting: false; }`,
//!   each declaration dispatched through the symbol registry
//! - `.ron` / `.toml`: a serialized [`Config`] document, one child per
//!   style
//!
//! Declaration keys no symbol type recognizes are ignored (logged at
//! `debug`); structural problems in the text itself are reported as
//! [`StyleSheetError::Syntax`] with a line number.

use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::symbology::registry;
use crate::symbology::style::Style;

/// Errors from stylesheet loading and saving
#[derive(thiserror::Error, Debug)]
pub enum StyleSheetError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed stylesheet text
    #[error("syntax error at line {line}: {message}")]
    Syntax {
        /// 1-based line number in the stylesheet text
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Configuration document error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unsupported format
    #[error("unsupported stylesheet format: {0}")]
    UnsupportedFormat(String),
}

/// An ordered collection of named styles
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: Vec<Style>,
}

impl StyleSheet {
    /// Create an empty stylesheet
    pub fn new() -> Self {
        Self::default()
    }

    /// All styles, in declaration order
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the sheet has no styles
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Look up a style by name
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name() == name)
    }

    /// Mutable lookup by name
    pub fn style_mut(&mut self, name: &str) -> Option<&mut Style> {
        self.styles.iter_mut().find(|s| s.name() == name)
    }

    /// Add a style, replacing any existing style with the same name
    pub fn add_style(&mut self, style: Style) {
        if let Some(existing) = self.style_mut(style.name()) {
            *existing = style;
        } else {
            self.styles.push(style);
        }
    }

    /// Parse CSS-like stylesheet text.
    ///
    /// Block and line comments are stripped first. Text containing no
    /// blocks at all is treated as the declaration list of a single style
    /// named `default`.
    pub fn from_css_str(text: &str) -> Result<Self, StyleSheetError> {
        let cleaned = strip_comments(text);
        let mut sheet = Self::new();

        if !cleaned.contains('{') {
            if !cleaned.trim().is_empty() {
                sheet.add_style(parse_block("default", &cleaned, 1)?);
            }
            return Ok(sheet);
        }

        let mut line = 1usize;
        let mut selector = String::new();
        let mut chars = cleaned.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\n' => {
                    line += 1;
                    selector.push(ch);
                }
                '{' => {
                    let name = selector.trim().to_string();
                    if name.is_empty() {
                        return Err(StyleSheetError::Syntax {
                            line,
                            message: "missing selector before '{'".to_string(),
                        });
                    }
                    let block_line = line;
                    let mut body = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(StyleSheetError::Syntax {
                                    line,
                                    message: "nested '{' inside style block".to_string(),
                                });
                            }
                            '\n' => {
                                line += 1;
                                body.push(c);
                            }
                            _ => body.push(c),
                        }
                    }
                    if !closed {
                        return Err(StyleSheetError::Syntax {
                            line: block_line,
                            message: format!("unterminated style block {name:?}"),
                        });
                    }
                    sheet.add_style(parse_block(&name, &body, block_line)?);
                    selector.clear();
                }
                '}' => {
                    return Err(StyleSheetError::Syntax {
                        line,
                        message: "unmatched '}'".to_string(),
                    });
                }
                _ => selector.push(ch),
            }
        }
        if !selector.trim().is_empty() {
            return Err(StyleSheetError::Syntax {
                line,
                message: format!("expected '{{' after selector {:?}", selector.trim()),
            });
        }
        Ok(sheet)
    }

    /// Serialize to a configuration document keyed `styles`, one child
    /// per style
    pub fn get_config(&self) -> Config {
        let mut conf = Config::new("styles");
        for style in &self.styles {
            conf.add(style.get_config());
        }
        conf
    }

    /// Build a stylesheet from a configuration document
    pub fn from_config(conf: &Config) -> Self {
        let mut sheet = Self::new();
        for child in conf.children() {
            sheet.add_style(Style::from_config(child));
        }
        sheet
    }

    /// Load a stylesheet from a `.css`, `.ron`, or `.toml` file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, StyleSheetError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("css") => {
                let text = std::fs::read_to_string(path)?;
                Self::from_css_str(&text)
            }
            Some("ron" | "toml") => Ok(Self::from_config(&Config::load_from_file(path)?)),
            _ => Err(StyleSheetError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }

    /// Save the stylesheet's configuration document to a `.ron` or
    /// `.toml` file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), StyleSheetError> {
        Ok(self.get_config().save_to_file(path)?)
    }
}

/// Parse one declaration block into a style
fn parse_block(name: &str, body: &str, start_line: usize) -> Result<Style, StyleSheetError> {
    let mut style = Style::new(name);
    let mut line = start_line;
    for decl in body.split(';') {
        let leading_newlines = decl
            .chars()
            .take_while(|c| c.is_whitespace())
            .filter(|&c| c == '\n')
            .count();
        let decl_line = line + leading_newlines;
        line += decl.matches('\n').count();

        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        let Some((key, value)) = decl.split_once(':') else {
            return Err(StyleSheetError::Syntax {
                line: decl_line,
                message: format!("declaration {decl:?} is missing ':'"),
            });
        };
        registry::parse_declaration(&Config::pair(key.trim(), value.trim()), &mut style);
    }
    Ok(style)
}

/// Remove `/* */` and `//` comments, preserving newlines so error line
/// numbers stay accurate
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '/' {
            match chars.peek() {
                Some('*') => {
                    chars.next();
                    let mut prev = ' ';
                    for c in chars.by_ref() {
                        if c == '\n' {
                            out.push('\n');
                        }
                        if prev == '*' && c == '/' {
                            break;
                        }
                        prev = c;
                    }
                    continue;
                }
                Some('/') => {
                    for c in chars.by_ref() {
                        if c == '\n' {
                            out.push('\n');
                            break;
                        }
                    }
                    continue;
                }
                _ => {}
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::units::{Distance, LinearUnit};
    use crate::symbology::render::RenderSymbol;
    use approx::assert_relative_eq;

    #[test]
    fn test_css_block_populates_render_symbol() {
        let css = r#"
buildings {
    render-lighting:              false;
    render-transparent:           true;
    render-bin:                   DepthSortedBin;
    render-order:                 [height] / 10;
    render-min-alpha:             0.5;
    render-depth-offset-min-bias: 5m;
    render-max-altitude:          10km;
}
"#;
        let sheet = StyleSheet::from_css_str(css).unwrap();
        assert_eq!(sheet.len(), 1);

        let symbol = sheet.style("buildings").unwrap().get::<RenderSymbol>().unwrap();
        assert!(!symbol.lighting());
        assert!(symbol.transparent());
        assert_eq!(symbol.render_bin(), Some("DepthSortedBin"));
        assert_eq!(symbol.order().to_string(), "[height] / 10");
        assert_relative_eq!(symbol.min_alpha(), 0.5);
        assert_relative_eq!(symbol.max_altitude().as_meters(), 10_000.0);

        let offset = symbol.depth_offset().unwrap();
        assert_eq!(offset.min_bias(), Distance::new(5.0, LinearUnit::Meters));
        assert!(!offset.automatic());
    }

    #[test]
    fn test_multiple_styles_keep_order() {
        let css = "roads { render-decal: true; } water { render-transparent: true; }";
        let sheet = StyleSheet::from_css_str(css).unwrap();
        let names: Vec<&str> = sheet.styles().iter().map(Style::name).collect();
        assert_eq!(names, ["roads", "water"]);
    }

    #[test]
    fn test_bare_declarations_become_default_style() {
        let sheet = StyleSheet::from_css_str("render-lighting: false;").unwrap();
        let symbol = sheet.style("default").unwrap().get::<RenderSymbol>().unwrap();
        assert!(!symbol.lighting());
    }

    #[test]
    fn test_unknown_declarations_are_tolerated() {
        let css = "s { stroke: #ffcc00; stroke-width: 2px; render-decal: true; }";
        let sheet = StyleSheet::from_css_str(css).unwrap();
        assert!(sheet.style("s").unwrap().get::<RenderSymbol>().unwrap().decal());
    }

    #[test]
    fn test_comments_are_stripped() {
        let css = r#"
/* block comment
   spanning lines */
s {
    // disable lighting for flat shading
    render-lighting: false; /* trailing */
}
"#;
        let sheet = StyleSheet::from_css_str(css).unwrap();
        assert!(!sheet.style("s").unwrap().get::<RenderSymbol>().unwrap().lighting());
    }

    #[test]
    fn test_missing_colon_reports_line() {
        let css = "s {\n    render-lighting: false;\n    render-decal true;\n}";
        match StyleSheet::from_css_str(css) {
            Err(StyleSheetError::Syntax { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_block_is_error() {
        assert!(matches!(
            StyleSheet::from_css_str("s { render-decal: true;"),
            Err(StyleSheetError::Syntax { .. })
        ));
    }

    #[test]
    fn test_unmatched_brace_is_error() {
        assert!(matches!(
            StyleSheet::from_css_str("} s { }"),
            Err(StyleSheetError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_config_round_trip() {
        let css = "towers { render-clip-plane: 2; render-max-crease-angle: 30deg; }";
        let sheet = StyleSheet::from_css_str(css).unwrap();

        let conf = sheet.get_config();
        let rebuilt = StyleSheet::from_config(&conf);
        assert_eq!(rebuilt.get_config(), conf);

        let symbol = rebuilt.style("towers").unwrap().get::<RenderSymbol>().unwrap();
        assert_eq!(symbol.clip_plane(), 2);
        assert_relative_eq!(symbol.max_crease_angle().as_degrees(), 30.0);
    }
}
