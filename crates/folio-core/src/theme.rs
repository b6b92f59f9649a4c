//! Reader colour themes
//!
//! Five built-in themes. `default` follows the host's light/dark preference,
//! the rest map to fixed colours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ThemeColorOverrides;
use crate::surface::Rgb;

/// Background and text colour used to paint a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: Rgb,
    pub text: Rgb,
}

const LIGHT: ThemeColors = ThemeColors {
    background: Rgb(0xff, 0xff, 0xff),
    text: Rgb(0x18, 0x18, 0x18),
};

const DARK: ThemeColors = ThemeColors {
    background: Rgb(0x18, 0x18, 0x18),
    text: Rgb(0xf8, 0xf8, 0xf8),
};

const BOOK: ThemeColors = ThemeColors {
    background: Rgb(241, 229, 201),
    text: Rgb(0x00, 0x00, 0x00),
};

const PAPER: ThemeColors = ThemeColors {
    background: Rgb(242, 235, 217),
    text: Rgb(0x00, 0x00, 0x00),
};

/// Host light/dark preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemPreference {
    #[default]
    Light,
    Dark,
}

/// How a theme name turns into colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Static(ThemeColors),
    SystemAdaptive,
}

/// Named theme selectable in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Default,
    Dark,
    Light,
    Book,
    Paper,
}

impl ThemeName {
    pub const ALL: [ThemeName; 5] = [
        ThemeName::Default,
        ThemeName::Dark,
        ThemeName::Light,
        ThemeName::Book,
        ThemeName::Paper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
            ThemeName::Book => "book",
            ThemeName::Paper => "paper",
        }
    }

    pub fn variant(&self) -> ThemeVariant {
        match self {
            ThemeName::Default => ThemeVariant::SystemAdaptive,
            ThemeName::Dark => ThemeVariant::Static(DARK),
            ThemeName::Light => ThemeVariant::Static(LIGHT),
            ThemeName::Book => ThemeVariant::Static(BOOK),
            ThemeName::Paper => ThemeVariant::Static(PAPER),
        }
    }

    /// The theme after this one, wrapping around
    pub fn next(&self) -> ThemeName {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = crate::Error;

    /// Accepts both `dark` and the legacy `theme-dark` spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix("theme-").unwrap_or(&lower);
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| crate::Error::Config(format!("unknown theme '{}'", s)))
    }
}

/// Resolve a theme variant into concrete colours
pub fn resolve_theme(variant: ThemeVariant, preference: SystemPreference) -> ThemeColors {
    match variant {
        ThemeVariant::Static(colors) => colors,
        ThemeVariant::SystemAdaptive => match preference {
            SystemPreference::Light => LIGHT,
            SystemPreference::Dark => DARK,
        },
    }
}

/// Parse a hex color string
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Apply user color overrides on top of resolved colours
pub fn apply_overrides(mut colors: ThemeColors, overrides: &ThemeColorOverrides) -> ThemeColors {
    if let Some(color) = overrides.background.as_deref().and_then(parse_hex_color) {
        colors.background = color;
    }
    if let Some(color) = overrides.text.as_deref().and_then(parse_hex_color) {
        colors.text = color;
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        assert_eq!(parse_hex_color("#ff5500"), Some(Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        assert_eq!(parse_hex_color("#f50"), Some(Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#ééé").is_none());
    }

    #[test]
    fn test_static_themes_ignore_preference() {
        for pref in [SystemPreference::Light, SystemPreference::Dark] {
            assert_eq!(resolve_theme(ThemeName::Book.variant(), pref), BOOK);
            assert_eq!(resolve_theme(ThemeName::Dark.variant(), pref), DARK);
        }
    }

    #[test]
    fn test_default_theme_follows_preference() {
        let variant = ThemeName::Default.variant();
        assert_eq!(variant, ThemeVariant::SystemAdaptive);
        assert_eq!(resolve_theme(variant, SystemPreference::Light), LIGHT);
        assert_eq!(resolve_theme(variant, SystemPreference::Dark), DARK);
    }

    #[test]
    fn test_theme_name_parsing() {
        assert_eq!("paper".parse::<ThemeName>().unwrap(), ThemeName::Paper);
        assert_eq!("theme-book".parse::<ThemeName>().unwrap(), ThemeName::Book);
        assert_eq!(" Dark ".parse::<ThemeName>().unwrap(), ThemeName::Dark);
        assert!("sepia".parse::<ThemeName>().is_err());
    }

    #[test]
    fn test_theme_cycle_wraps() {
        assert_eq!(ThemeName::Default.next(), ThemeName::Dark);
        assert_eq!(ThemeName::Paper.next(), ThemeName::Default);
    }

    #[test]
    fn test_apply_overrides() {
        let overrides = ThemeColorOverrides {
            text: Some("#ff0000".to_string()),
            background: Some("nonsense".to_string()),
        };
        let colors = apply_overrides(PAPER, &overrides);
        assert_eq!(colors.text, Rgb(255, 0, 0));
        assert_eq!(colors.background, PAPER.background);
    }
}
