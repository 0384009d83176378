//! Render-state symbol
//!
//! [`RenderSymbol`] carries the rendering hints a style can attach to
//! feature geometry: depth testing, lighting, backface culling, render
//! order and bin, transparency, decal mode, crease angle, altitude cutoff,
//! and the nested depth-offset options. Every property is independently
//! set-or-unset; unset properties are omitted from serialization and only
//! fall back to their documented default when read through the typed
//! accessor.
//!
//! Three coercion policies apply when parsing stylesheet declarations,
//! chosen per field:
//! 1. booleans, integers, floats, expressions: default-fallback on failure
//! 2. strings: assigned verbatim, no validation
//! 3. unit-bearing quantities: left entirely untouched on failure

use std::any::Any;

use log::trace;

use crate::config::{Config, ConfigBlock};
use crate::foundation::expression::NumericExpression;
use crate::foundation::units::{Angle, AngularUnit, Distance, LinearUnit};
use crate::symbology::style::Style;
use crate::symbology::symbol::Symbol;

const DEFAULT_DEPTH_TEST: bool = true;
const DEFAULT_LIGHTING: bool = true;
const DEFAULT_BACKFACE_CULLING: bool = true;
const DEFAULT_CLIP_PLANE: u32 = 0;
const DEFAULT_MIN_ALPHA: f32 = 0.0;
const DEFAULT_TRANSPARENT: bool = false;
const DEFAULT_DECAL: bool = false;

const DEFAULT_OFFSET_ENABLED: bool = true;
const DEFAULT_OFFSET_AUTOMATIC: bool = true;
const DEFAULT_OFFSET_MIN_BIAS_M: f64 = 100.0;
const DEFAULT_OFFSET_MAX_BIAS_M: f64 = 10_000.0;
const DEFAULT_OFFSET_MIN_RANGE_M: f64 = 1_000.0;
const DEFAULT_OFFSET_MAX_RANGE_M: f64 = 10_000_000.0;

/// Depth-offset configuration nested inside [`RenderSymbol`].
///
/// Controls the bias applied against the depth buffer to keep coincident
/// geometry (roads draped on terrain, outlines on faces) from z-fighting.
/// Bias and range are unit-bearing distances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthOffsetOptions {
    enabled: Option<bool>,
    automatic: Option<bool>,
    min_bias: Option<Distance>,
    max_bias: Option<Distance>,
    min_range: Option<Distance>,
    max_range: Option<Distance>,
}

impl DepthOffsetOptions {
    /// Whether depth offsetting is applied (default `true`)
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(DEFAULT_OFFSET_ENABLED)
    }

    /// Whether the minimum bias is computed from geometry rather than
    /// taken from [`min_bias`](Self::min_bias) (default `true`)
    pub fn automatic(&self) -> bool {
        self.automatic.unwrap_or(DEFAULT_OFFSET_AUTOMATIC)
    }

    /// Bias applied at [`min_range`](Self::min_range) (default 100 m)
    pub fn min_bias(&self) -> Distance {
        self.min_bias
            .unwrap_or_else(|| Distance::new(DEFAULT_OFFSET_MIN_BIAS_M, LinearUnit::Meters))
    }

    /// Bias applied at [`max_range`](Self::max_range) (default 10 000 m)
    pub fn max_bias(&self) -> Distance {
        self.max_bias
            .unwrap_or_else(|| Distance::new(DEFAULT_OFFSET_MAX_BIAS_M, LinearUnit::Meters))
    }

    /// Camera range at which the minimum bias applies (default 1 000 m)
    pub fn min_range(&self) -> Distance {
        self.min_range
            .unwrap_or_else(|| Distance::new(DEFAULT_OFFSET_MIN_RANGE_M, LinearUnit::Meters))
    }

    /// Camera range at which the maximum bias applies (default 10 000 000 m)
    pub fn max_range(&self) -> Distance {
        self.max_range
            .unwrap_or_else(|| Distance::new(DEFAULT_OFFSET_MAX_RANGE_M, LinearUnit::Meters))
    }

    /// Set whether depth offsetting is applied
    pub fn set_enabled(&mut self, v: bool) {
        self.enabled = Some(v);
    }

    /// Set automatic bias computation
    pub fn set_automatic(&mut self, v: bool) {
        self.automatic = Some(v);
    }

    /// Set the minimum bias
    pub fn set_min_bias(&mut self, v: Distance) {
        self.min_bias = Some(v);
    }

    /// Set the maximum bias
    pub fn set_max_bias(&mut self, v: Distance) {
        self.max_bias = Some(v);
    }

    /// Set the minimum range
    pub fn set_min_range(&mut self, v: Distance) {
        self.min_range = Some(v);
    }

    /// Set the maximum range
    pub fn set_max_range(&mut self, v: Distance) {
        self.max_range = Some(v);
    }
}

impl ConfigBlock for DepthOffsetOptions {
    fn get_config(&self) -> Config {
        let mut conf = Config::new("depth_offset");
        conf.add_if_set("enabled", &self.enabled);
        conf.add_if_set("auto", &self.automatic);
        conf.add_if_set("min_bias", &self.min_bias);
        conf.add_if_set("max_bias", &self.max_bias);
        conf.add_if_set("min_range", &self.min_range);
        conf.add_if_set("max_range", &self.max_range);
        conf
    }

    fn merge_config(&mut self, conf: &Config) {
        conf.get_if_set("enabled", &mut self.enabled);
        conf.get_if_set("auto", &mut self.automatic);
        conf.get_if_set("min_bias", &mut self.min_bias);
        conf.get_if_set("max_bias", &mut self.max_bias);
        conf.get_if_set("min_range", &mut self.min_range);
        conf.get_if_set("max_range", &mut self.max_range);
    }
}

/// Rendering hints attached to a style.
///
/// A plain property store: no rendering happens here, the scene-graph
/// layer reads the resolved values when it builds render state. Construct
/// with [`RenderSymbol::default`] (all properties unset), by clone, or
/// from a configuration subtree via [`RenderSymbol::from_config`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSymbol {
    depth_test: Option<bool>,
    lighting: Option<bool>,
    depth_offset: Option<DepthOffsetOptions>,
    backface_culling: Option<bool>,
    order: Option<NumericExpression>,
    clip_plane: Option<u32>,
    min_alpha: Option<f32>,
    render_bin: Option<String>,
    transparent: Option<bool>,
    decal: Option<bool>,
    max_crease_angle: Option<Angle>,
    max_altitude: Option<Distance>,
}

impl RenderSymbol {
    /// Construct from a configuration subtree (defaults overlaid with
    /// whatever keys the subtree carries)
    pub fn from_config(conf: &Config) -> Self {
        let mut symbol = Self::default();
        symbol.merge_config(conf);
        symbol
    }

    /// Whether to perform depth-buffer testing (default `true`)
    pub fn depth_test(&self) -> bool {
        self.depth_test.unwrap_or(DEFAULT_DEPTH_TEST)
    }

    /// Raw set-or-unset state of the depth-test property
    pub fn depth_test_opt(&self) -> Option<bool> {
        self.depth_test
    }

    /// Set depth-buffer testing
    pub fn set_depth_test(&mut self, v: bool) {
        self.depth_test = Some(v);
    }

    /// Whether lighting is applied (default `true`)
    pub fn lighting(&self) -> bool {
        self.lighting.unwrap_or(DEFAULT_LIGHTING)
    }

    /// Raw set-or-unset state of the lighting property
    pub fn lighting_opt(&self) -> Option<bool> {
        self.lighting
    }

    /// Set lighting
    pub fn set_lighting(&mut self, v: bool) {
        self.lighting = Some(v);
    }

    /// Depth-offset options, if set
    pub fn depth_offset(&self) -> Option<&DepthOffsetOptions> {
        self.depth_offset.as_ref()
    }

    /// Depth-offset options, created on first access
    pub fn depth_offset_mut(&mut self) -> &mut DepthOffsetOptions {
        self.depth_offset.get_or_insert_with(DepthOffsetOptions::default)
    }

    /// Whether to cull backfacing geometry (default `true`)
    pub fn backface_culling(&self) -> bool {
        self.backface_culling.unwrap_or(DEFAULT_BACKFACE_CULLING)
    }

    /// Raw set-or-unset state of the backface-culling property
    pub fn backface_culling_opt(&self) -> Option<bool> {
        self.backface_culling
    }

    /// Set backface culling
    pub fn set_backface_culling(&mut self, v: bool) {
        self.backface_culling = Some(v);
    }

    /// Render order, evaluated per feature (default literal `0`)
    pub fn order(&self) -> NumericExpression {
        self.order.clone().unwrap_or_else(|| NumericExpression::from(0.0))
    }

    /// Raw set-or-unset state of the order property
    pub fn order_opt(&self) -> Option<&NumericExpression> {
        self.order.as_ref()
    }

    /// Set the render order expression
    pub fn set_order(&mut self, v: NumericExpression) {
        self.order = Some(v);
    }

    /// Hardware clip-plane index to activate (default `0`)
    pub fn clip_plane(&self) -> u32 {
        self.clip_plane.unwrap_or(DEFAULT_CLIP_PLANE)
    }

    /// Raw set-or-unset state of the clip-plane property
    pub fn clip_plane_opt(&self) -> Option<u32> {
        self.clip_plane
    }

    /// Set the clip-plane index
    pub fn set_clip_plane(&mut self, v: u32) {
        self.clip_plane = Some(v);
    }

    /// Minimum alpha below which fragments are discarded (default `0.0`)
    pub fn min_alpha(&self) -> f32 {
        self.min_alpha.unwrap_or(DEFAULT_MIN_ALPHA)
    }

    /// Raw set-or-unset state of the min-alpha property
    pub fn min_alpha_opt(&self) -> Option<f32> {
        self.min_alpha
    }

    /// Set the minimum alpha
    pub fn set_min_alpha(&mut self, v: f32) {
        self.min_alpha = Some(v);
    }

    /// Render bin name, if set (no default)
    pub fn render_bin(&self) -> Option<&str> {
        self.render_bin.as_deref()
    }

    /// Set the render bin name verbatim; the empty string is a valid,
    /// set value
    pub fn set_render_bin(&mut self, v: impl Into<String>) {
        self.render_bin = Some(v.into());
    }

    /// Whether geometry should sort into the transparent pass (default `false`)
    pub fn transparent(&self) -> bool {
        self.transparent.unwrap_or(DEFAULT_TRANSPARENT)
    }

    /// Raw set-or-unset state of the transparent property
    pub fn transparent_opt(&self) -> Option<bool> {
        self.transparent
    }

    /// Set the transparency flag
    pub fn set_transparent(&mut self, v: bool) {
        self.transparent = Some(v);
    }

    /// Whether geometry renders as a decal over terrain (default `false`)
    pub fn decal(&self) -> bool {
        self.decal.unwrap_or(DEFAULT_DECAL)
    }

    /// Raw set-or-unset state of the decal property
    pub fn decal_opt(&self) -> Option<bool> {
        self.decal
    }

    /// Set the decal flag
    pub fn set_decal(&mut self, v: bool) {
        self.decal = Some(v);
    }

    /// Crease angle above which normals are not smoothed (default 0)
    pub fn max_crease_angle(&self) -> Angle {
        self.max_crease_angle
            .unwrap_or_else(|| Angle::new(0.0, AngularUnit::Degrees))
    }

    /// Raw set-or-unset state of the crease-angle property
    pub fn max_crease_angle_opt(&self) -> Option<Angle> {
        self.max_crease_angle
    }

    /// Set the maximum crease angle
    pub fn set_max_crease_angle(&mut self, v: Angle) {
        self.max_crease_angle = Some(v);
    }

    /// Altitude above which geometry is no longer rendered
    /// (default: the maximum representable `f32`, in meters)
    pub fn max_altitude(&self) -> Distance {
        self.max_altitude
            .unwrap_or_else(|| Distance::new(f64::from(f32::MAX), LinearUnit::Meters))
    }

    /// Raw set-or-unset state of the max-altitude property
    pub fn max_altitude_opt(&self) -> Option<Distance> {
        self.max_altitude
    }

    /// Set the maximum altitude
    pub fn set_max_altitude(&mut self, v: Distance) {
        self.max_altitude = Some(v);
    }

    /// Apply one flat stylesheet declaration to `style`.
    ///
    /// Matches the declaration key (case-insensitively) against the
    /// `render-*` key set; on match, the style's render symbol is fetched
    /// or lazily created and exactly one property is assigned from the
    /// declaration value using that property's coercion policy.
    /// Unrecognized keys are ignored without touching `style`.
    pub fn parse_sld(c: &Config, style: &mut Style) {
        let key = c.key().trim().to_ascii_lowercase();
        let value = c.value();
        let defaults = RenderSymbol::default();

        match key.as_str() {
            "render-depth-test" => {
                let v = bool_or(value, defaults.depth_test());
                style.get_or_create::<RenderSymbol>().set_depth_test(v);
            }
            "render-lighting" => {
                let v = bool_or(value, defaults.lighting());
                style.get_or_create::<RenderSymbol>().set_lighting(v);
            }
            "render-depth-offset" => {
                let v = bool_or(value, DepthOffsetOptions::default().enabled());
                style
                    .get_or_create::<RenderSymbol>()
                    .depth_offset_mut()
                    .set_enabled(v);
            }
            "render-depth-offset-min-bias" => {
                let symbol = style.get_or_create::<RenderSymbol>();
                if let Some(d) = parse_distance(value) {
                    symbol.depth_offset_mut().set_min_bias(d);
                }
                // an explicit bias disables automatic bias computation,
                // even when the value failed to parse
                symbol.depth_offset_mut().set_automatic(false);
            }
            "render-depth-offset-max-bias" => {
                if let Some(d) = parse_distance(value) {
                    style
                        .get_or_create::<RenderSymbol>()
                        .depth_offset_mut()
                        .set_max_bias(d);
                }
            }
            "render-depth-offset-min-range" => {
                if let Some(d) = parse_distance(value) {
                    style
                        .get_or_create::<RenderSymbol>()
                        .depth_offset_mut()
                        .set_min_range(d);
                }
            }
            "render-depth-offset-max-range" => {
                if let Some(d) = parse_distance(value) {
                    style
                        .get_or_create::<RenderSymbol>()
                        .depth_offset_mut()
                        .set_max_range(d);
                }
            }
            "render-depth-offset-auto" => {
                let v = bool_or(value, DepthOffsetOptions::default().automatic());
                style
                    .get_or_create::<RenderSymbol>()
                    .depth_offset_mut()
                    .set_automatic(v);
            }
            "render-backface-culling" => {
                let v = bool_or(value, defaults.backface_culling());
                style.get_or_create::<RenderSymbol>().set_backface_culling(v);
            }
            "render-order" => {
                let v = if value.trim().is_empty() {
                    defaults.order()
                } else {
                    NumericExpression::new(value)
                };
                style.get_or_create::<RenderSymbol>().set_order(v);
            }
            "render-clip-plane" => {
                let v = value.trim().parse().unwrap_or_else(|_| defaults.clip_plane());
                style.get_or_create::<RenderSymbol>().set_clip_plane(v);
            }
            "render-min-alpha" => {
                let v = value.trim().parse().unwrap_or_else(|_| defaults.min_alpha());
                style.get_or_create::<RenderSymbol>().set_min_alpha(v);
            }
            "render-bin" => {
                style.get_or_create::<RenderSymbol>().set_render_bin(value);
            }
            "render-transparent" => {
                let v = bool_or(value, defaults.transparent());
                style.get_or_create::<RenderSymbol>().set_transparent(v);
            }
            "render-decal" => {
                let v = bool_or(value, defaults.decal());
                style.get_or_create::<RenderSymbol>().set_decal(v);
            }
            "render-max-crease-angle" => {
                if let Some(a) = parse_angle(value) {
                    style.get_or_create::<RenderSymbol>().set_max_crease_angle(a);
                }
            }
            "render-max-altitude" => {
                if let Some(d) = parse_distance(value) {
                    style.get_or_create::<RenderSymbol>().set_max_altitude(d);
                }
            }
            _ => {}
        }
    }
}

impl ConfigBlock for RenderSymbol {
    fn get_config(&self) -> Config {
        let mut conf = Config::new("render");
        conf.add_if_set("depth_test", &self.depth_test);
        conf.add_if_set("lighting", &self.lighting);
        conf.add_obj_if_set("depth_offset", &self.depth_offset);
        conf.add_if_set("backface_culling", &self.backface_culling);
        conf.add_obj_if_set("order", &self.order);
        conf.add_if_set("clip_plane", &self.clip_plane);
        conf.add_if_set("min_alpha", &self.min_alpha);
        conf.add_if_set("render_bin", &self.render_bin);
        conf.add_if_set("transparent", &self.transparent);
        conf.add_if_set("decal", &self.decal);
        conf.add_if_set("max_crease_angle", &self.max_crease_angle);
        conf.add_if_set("max_altitude", &self.max_altitude);
        conf
    }

    fn merge_config(&mut self, conf: &Config) {
        conf.get_if_set("depth_test", &mut self.depth_test);
        conf.get_if_set("lighting", &mut self.lighting);
        conf.get_obj_if_set("depth_offset", &mut self.depth_offset);
        conf.get_if_set("backface_culling", &mut self.backface_culling);
        conf.get_obj_if_set("order", &mut self.order);
        conf.get_if_set("clip_plane", &mut self.clip_plane);
        conf.get_if_set("min_alpha", &mut self.min_alpha);
        conf.get_if_set("render_bin", &mut self.render_bin);
        conf.get_if_set("transparent", &mut self.transparent);
        conf.get_if_set("decal", &mut self.decal);
        conf.get_if_set("max_crease_angle", &mut self.max_crease_angle);
        conf.get_if_set("max_altitude", &mut self.max_altitude);
    }
}

impl Symbol for RenderSymbol {
    fn tag(&self) -> &'static str {
        "render"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn boxed_clone(&self) -> Box<dyn Symbol> {
        Box::new(self.clone())
    }
}

fn bool_or(value: &str, fallback: bool) -> bool {
    value.trim().parse().unwrap_or(fallback)
}

fn parse_distance(value: &str) -> Option<Distance> {
    let parsed = Distance::parse(value);
    if parsed.is_none() {
        trace!("unparseable distance {value:?}, leaving property untouched");
    }
    parsed
}

fn parse_angle(value: &str) -> Option<Angle> {
    let parsed = Angle::parse(value);
    if parsed.is_none() {
        trace!("unparseable angle {value:?}, leaving property untouched");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn decl(key: &str, value: &str) -> Config {
        Config::pair(key, value)
    }

    fn fully_set_symbol() -> RenderSymbol {
        let mut symbol = RenderSymbol::default();
        symbol.set_depth_test(false);
        symbol.set_lighting(false);
        symbol.set_backface_culling(false);
        symbol.set_order(NumericExpression::new("[priority] + 1"));
        symbol.set_clip_plane(2);
        symbol.set_min_alpha(0.25);
        symbol.set_render_bin("DepthSortedBin");
        symbol.set_transparent(true);
        symbol.set_decal(true);
        symbol.set_max_crease_angle(Angle::new(30.0, AngularUnit::Degrees));
        symbol.set_max_altitude(Distance::new(8.0, LinearUnit::Kilometers));
        let offset = symbol.depth_offset_mut();
        offset.set_enabled(true);
        offset.set_automatic(false);
        offset.set_min_bias(Distance::new(5.0, LinearUnit::Meters));
        offset.set_max_bias(Distance::new(500.0, LinearUnit::Meters));
        offset.set_min_range(Distance::new(1.0, LinearUnit::Kilometers));
        offset.set_max_range(Distance::new(100.0, LinearUnit::Kilometers));
        symbol
    }

    #[test]
    fn test_defaults_through_accessors() {
        let symbol = RenderSymbol::default();
        assert!(symbol.depth_test());
        assert!(symbol.lighting());
        assert!(symbol.backface_culling());
        assert_eq!(symbol.order().literal(), Some(0.0));
        assert_eq!(symbol.clip_plane(), 0);
        assert_relative_eq!(symbol.min_alpha(), 0.0);
        assert_eq!(symbol.render_bin(), None);
        assert!(!symbol.transparent());
        assert!(!symbol.decal());
        assert_relative_eq!(symbol.max_crease_angle().as_degrees(), 0.0);
        assert_relative_eq!(symbol.max_altitude().as_meters(), f64::from(f32::MAX));
        assert!(symbol.depth_offset().is_none());
    }

    #[test]
    fn test_get_config_round_trip() {
        let symbol = fully_set_symbol();
        let conf = symbol.get_config();
        assert_eq!(conf.key(), "render");

        let rebuilt = RenderSymbol::from_config(&conf);
        assert_eq!(rebuilt, symbol);
        assert_eq!(rebuilt.get_config(), conf);
    }

    #[test]
    fn test_get_config_omits_unset_fields() {
        let mut symbol = RenderSymbol::default();
        symbol.set_transparent(true);

        let conf = symbol.get_config();
        assert!(conf.has("transparent"));
        assert!(!conf.has("depth_test"));
        assert!(!conf.has("lighting"));
        assert!(!conf.has("depth_offset"));
        assert!(!conf.has("render_bin"));
        assert_eq!(conf.children().len(), 1);
    }

    #[test]
    fn test_merge_config_is_additive_overlay() {
        let mut symbol = RenderSymbol::default();
        symbol.set_clip_plane(4);
        symbol.set_render_bin("RenderBin");

        let mut overlay = Config::new("render");
        overlay.add_pair("lighting", false);
        symbol.merge_config(&overlay);

        assert_eq!(symbol.lighting_opt(), Some(false));
        assert_eq!(symbol.clip_plane_opt(), Some(4));
        assert_eq!(symbol.render_bin(), Some("RenderBin"));
    }

    #[test]
    fn test_sld_bool_properties() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("render-depth-test", "false"), &mut style);
        RenderSymbol::parse_sld(&decl("render-transparent", "true"), &mut style);

        let symbol = style.get::<RenderSymbol>().unwrap();
        assert!(!symbol.depth_test());
        assert!(symbol.transparent());
    }

    #[test]
    fn test_sld_key_match_is_case_insensitive() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("Render-Lighting", "false"), &mut style);
        assert_eq!(style.get::<RenderSymbol>().unwrap().lighting_opt(), Some(false));
    }

    #[test]
    fn test_sld_unparseable_scalar_falls_back_to_default() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("render-clip-plane", "abc"), &mut style);

        // the property is set (to the default), not left unset
        let symbol = style.get::<RenderSymbol>().unwrap();
        assert_eq!(symbol.clip_plane_opt(), Some(0));
        assert_eq!(symbol.clip_plane(), 0);
    }

    #[test]
    fn test_sld_unparseable_bool_falls_back_to_default() {
        let mut style = Style::new("test");
        style.get_or_create::<RenderSymbol>().set_depth_test(false);
        RenderSymbol::parse_sld(&decl("render-depth-test", "maybe"), &mut style);

        // fallback is the freshly constructed default, not the prior value
        assert!(style.get::<RenderSymbol>().unwrap().depth_test());
    }

    #[test]
    fn test_sld_unparseable_quantity_left_untouched() {
        let mut style = Style::new("test");
        style
            .get_or_create::<RenderSymbol>()
            .set_max_altitude(Distance::new(3.0, LinearUnit::Kilometers));
        RenderSymbol::parse_sld(&decl("render-max-altitude", "very high"), &mut style);

        let symbol = style.get::<RenderSymbol>().unwrap();
        assert_eq!(
            symbol.max_altitude_opt(),
            Some(Distance::new(3.0, LinearUnit::Kilometers))
        );

        // and a previously-unset property stays unset
        let mut fresh = Style::new("fresh");
        fresh.get_or_create::<RenderSymbol>();
        RenderSymbol::parse_sld(&decl("render-max-altitude", "very high"), &mut fresh);
        assert!(fresh.get::<RenderSymbol>().unwrap().max_altitude_opt().is_none());
    }

    #[test]
    fn test_sld_min_bias_disables_automatic() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("render-depth-offset-min-bias", "5m"), &mut style);

        let offset = style.get::<RenderSymbol>().unwrap().depth_offset().unwrap();
        assert_eq!(offset.min_bias(), Distance::new(5.0, LinearUnit::Meters));
        assert!(!offset.automatic());
    }

    #[test]
    fn test_sld_render_bin_assigned_verbatim() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("render-bin", ""), &mut style);

        // the empty string is a defined, set value
        assert_eq!(style.get::<RenderSymbol>().unwrap().render_bin(), Some(""));
    }

    #[test]
    fn test_sld_order_expression_is_deferred() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("render-order", "[level] * 10"), &mut style);

        let order = style.get::<RenderSymbol>().unwrap().order();
        assert_eq!(order.literal(), None);
        assert_eq!(order.to_string(), "[level] * 10");

        // empty value falls back to the default literal
        RenderSymbol::parse_sld(&decl("render-order", "  "), &mut style);
        assert_eq!(style.get::<RenderSymbol>().unwrap().order().literal(), Some(0.0));
    }

    #[test]
    fn test_sld_quantity_units_and_bare_numbers() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("render-max-altitude", "2km"), &mut style);
        RenderSymbol::parse_sld(&decl("render-max-crease-angle", "45"), &mut style);

        let symbol = style.get::<RenderSymbol>().unwrap();
        assert_relative_eq!(symbol.max_altitude().as_meters(), 2000.0);
        assert_eq!(symbol.max_crease_angle(), Angle::new(45.0, AngularUnit::Degrees));
    }

    #[test]
    fn test_sld_unmatched_key_is_ignored() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("unrelated-key", "whatever"), &mut style);
        assert!(style.get::<RenderSymbol>().is_none());
    }

    #[test]
    fn test_sld_unparseable_quantity_does_not_create_symbol() {
        let mut style = Style::new("test");
        RenderSymbol::parse_sld(&decl("render-max-altitude", "junk"), &mut style);
        assert!(style.get::<RenderSymbol>().is_none());
    }
}
