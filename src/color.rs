use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::DashboardConfig;
use crate::regression::CurveType;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#rrggbb` / `#rgb` (leading `#` optional).
pub fn parse_hex(hex: &str) -> Result<Color32> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).map_err(|e| anyhow!("{e}"))?;
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Colour mapping: curve type → Color32
// ---------------------------------------------------------------------------

/// Resolved chart colours for one dashboard configuration.
#[derive(Debug, Clone)]
pub struct ChartColors {
    pub scatter: Color32,
    overlays: BTreeMap<CurveType, Color32>,
    fallback: Vec<Color32>,
}

impl ChartColors {
    /// Curves without a configured (or with an unparsable) colour get a
    /// palette colour by their position in [`CurveType::ALL`].
    pub fn from_config(config: &DashboardConfig) -> Self {
        let overlays = config
            .curve_colors
            .iter()
            .filter_map(|(curve, hex)| match parse_hex(hex) {
                Ok(c) => Some((*curve, c)),
                Err(e) => {
                    log::warn!("Ignoring colour for {curve}: {e:#}");
                    None
                }
            })
            .collect();

        let scatter = parse_hex(&config.scatter_color).unwrap_or_else(|e| {
            log::warn!("Ignoring scatter colour: {e:#}");
            Color32::LIGHT_BLUE
        });

        ChartColors {
            scatter,
            overlays,
            fallback: generate_palette(CurveType::ALL.len()),
        }
    }

    /// Look up the overlay colour for a curve type.
    pub fn overlay(&self, curve: CurveType) -> Color32 {
        self.overlays.get(&curve).copied().unwrap_or_else(|| {
            let idx = CurveType::ALL
                .iter()
                .position(|c| *c == curve)
                .unwrap_or(0);
            self.fallback.get(idx).copied().unwrap_or(Color32::GRAY)
        })
    }

    /// Legend entries (curve label → colour) for the UI. Unknown tokens draw
    /// nothing, so they get no entry.
    pub fn legend_entries(&self, tokens: &[String]) -> Vec<(String, Color32)> {
        tokens
            .iter()
            .filter_map(|t| CurveType::from_token(t))
            .map(|c| (c.to_string(), self.overlay(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_parse() {
        assert_eq!(parse_hex("#ff7300").unwrap(), Color32::from_rgb(0xff, 0x73, 0x00));
        assert_eq!(parse_hex("00b300").unwrap(), Color32::from_rgb(0x00, 0xb3, 0x00));
        assert!(parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn configured_colours_win_and_gaps_fall_back() {
        let mut cfg = DashboardConfig::default();
        cfg.curve_colors.remove(&CurveType::Continuous);
        let colors = ChartColors::from_config(&cfg);

        assert_eq!(colors.overlay(CurveType::Linear), Color32::from_rgb(0xff, 0x73, 0x00));
        assert_eq!(colors.overlay(CurveType::NonLinear), Color32::from_rgb(0x00, 0xb3, 0x00));
        assert_eq!(colors.overlay(CurveType::Continuous), generate_palette(4)[2]);
        assert_eq!(colors.scatter, Color32::from_rgb(0x88, 0x84, 0xd8));
        let legend = colors.legend_entries(&["Linear".to_string(), "Cubic".to_string()]);
        assert_eq!(legend.len(), 1);
        assert_eq!(legend[0].0, "Linear");
    }
}
