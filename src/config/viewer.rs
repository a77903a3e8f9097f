//! Display settings handed to the viewer

use serde::{Deserialize, Serialize};

/// Rendering settings for one layer (foreground or background)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Style {
    pub point_size: f32,
    /// RGB in `[0, 1]`, used when the color mode asks for it
    pub default_color: [f32; 3],
    #[serde(default)]
    pub voxel_size: Option<f32>,
}

/// Initial camera placement
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Viewpoint {
    #[default]
    #[serde(alias = "TOP")]
    Top,
    #[serde(alias = "SIDE")]
    Side,
}

/// Which color source each layer uses.
///
/// `rgb` keeps the colors stored in the file, `def` paints the layer with its
/// style's `default_color`. The first half names the foreground, the second
/// the background.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    #[serde(alias = "RGB_RGB")]
    RgbRgb,
    #[serde(alias = "DEF_RGB")]
    DefRgb,
    #[serde(alias = "DEF_DEF")]
    DefDef,
    #[serde(alias = "RGB_DEF")]
    RgbDef,
}

impl ColorMode {
    /// `(foreground uses default color, background uses default color)`
    #[must_use]
    pub const fn uses_default_color(self) -> (bool, bool) {
        match self {
            Self::RgbRgb => (false, false),
            Self::DefRgb => (true, false),
            Self::DefDef => (true, true),
            Self::RgbDef => (false, true),
        }
    }
}

/// `viewer` section of the configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ViewerConfig {
    #[serde(default)]
    pub viewpoint: Viewpoint,
    /// Size of the box around the object shown from the background
    #[serde(default = "default_view_box")]
    pub view_box: [f32; 3],
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default = "default_foreground_style")]
    pub foreground_style: Style,
    #[serde(default = "default_background_style")]
    pub background_style: Style,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewpoint: Viewpoint::default(),
            view_box: default_view_box(),
            color_mode: ColorMode::default(),
            foreground_style: default_foreground_style(),
            background_style: default_background_style(),
        }
    }
}

fn default_foreground_style() -> Style {
    Style {
        point_size: 8.0,
        default_color: [0.75, 0.0, 0.0],
        voxel_size: None,
    }
}

fn default_background_style() -> Style {
    Style {
        point_size: 5.0,
        default_color: [0.5, 0.5, 0.5],
        voxel_size: Some(0.2),
    }
}

const fn default_view_box() -> [f32; 3] {
    [50.0, 50.0, 50.0]
}

/// Layer style after the color mode has been applied
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub point_size: f32,
    /// `Some` when the layer is painted with a single color
    pub color: Option<[f32; 3]>,
    pub voxel_size: Option<f32>,
}

/// Immutable style value passed to the viewer collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerStyle {
    pub foreground: LayerStyle,
    pub background: LayerStyle,
    pub viewpoint: Viewpoint,
    pub view_box: [f32; 3],
}

impl ViewerConfig {
    /// Apply the color mode to both layers
    #[must_use]
    pub fn resolve(&self) -> ViewerStyle {
        let (fg_default, bg_default) = self.color_mode.uses_default_color();
        ViewerStyle {
            foreground: layer(&self.foreground_style, fg_default),
            background: layer(&self.background_style, bg_default),
            viewpoint: self.viewpoint,
            view_box: self.view_box,
        }
    }

    /// Check sizes and colors
    pub(super) fn validate(&self) -> Result<(), String> {
        for (name, style) in [
            ("foreground_style", &self.foreground_style),
            ("background_style", &self.background_style),
        ] {
            if !(style.point_size.is_finite() && style.point_size > 0.0) {
                return Err(format!("viewer.{name}.point_size must be positive"));
            }
            if let Some(voxel) = style.voxel_size
                && !(voxel.is_finite() && voxel > 0.0)
            {
                return Err(format!("viewer.{name}.voxel_size must be positive"));
            }
            if style.default_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(format!(
                    "viewer.{name}.default_color components must be within [0, 1]"
                ));
            }
        }

        if self.view_box.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err("viewer.view_box extents must be positive".to_string());
        }
        Ok(())
    }
}

fn layer(style: &Style, use_default: bool) -> LayerStyle {
    LayerStyle {
        point_size: style.point_size,
        color: use_default.then_some(style.default_color),
        voxel_size: style.voxel_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_resolution() {
        let mut viewer = ViewerConfig::default();
        assert_eq!(viewer.resolve().foreground.color, None);
        assert_eq!(viewer.resolve().background.color, None);

        viewer.color_mode = ColorMode::DefRgb;
        let style = viewer.resolve();
        assert_eq!(style.foreground.color, Some([0.75, 0.0, 0.0]));
        assert_eq!(style.background.color, None);

        viewer.color_mode = ColorMode::RgbDef;
        let style = viewer.resolve();
        assert_eq!(style.foreground.color, None);
        assert_eq!(style.background.color, Some([0.5, 0.5, 0.5]));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
        assert_eq!(ViewerConfig::default().resolve().background.voxel_size, Some(0.2));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut viewer = ViewerConfig::default();
        viewer.foreground_style.point_size = 0.0;
        assert!(viewer.validate().is_err());

        let mut viewer = ViewerConfig::default();
        viewer.background_style.default_color = [1.5, 0.0, 0.0];
        assert!(viewer.validate().is_err());

        let mut viewer = ViewerConfig::default();
        viewer.background_style.voxel_size = Some(-1.0);
        assert!(viewer.validate().is_err());

        let mut viewer = ViewerConfig::default();
        viewer.view_box = [10.0, 0.0, 10.0];
        assert!(viewer.validate().is_err());
    }

    #[test]
    fn test_color_mode_names() {
        let mode: ColorMode = serde_json::from_str("\"def_def\"").unwrap();
        assert_eq!(mode, ColorMode::DefDef);
        let mode: ColorMode = serde_json::from_str("\"RGB_DEF\"").unwrap();
        assert_eq!(mode, ColorMode::RgbDef);
    }
}
