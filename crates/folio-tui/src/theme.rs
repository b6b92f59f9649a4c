use folio_core::surface::Rgb;
use folio_core::theme::{apply_overrides, resolve_theme, SystemPreference, ThemeColors, ThemeName};
use folio_core::AppConfig;
use ratatui::style::Color;

/// Terminal colour for a surface colour
#[inline]
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Light/dark preference of the host terminal.
///
/// Reads `COLORFGBG` ("fg;bg", background last); terminals that don't set it
/// are assumed light.
pub fn detect_system_preference() -> SystemPreference {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| preference_from_colorfgbg(&value))
        .unwrap_or_default()
}

fn preference_from_colorfgbg(value: &str) -> Option<SystemPreference> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    // ANSI 0-6 and 8 are dark backgrounds
    Some(if bg <= 6 || bg == 8 {
        SystemPreference::Dark
    } else {
        SystemPreference::Light
    })
}

/// Colours for `theme`, with the config file's overrides applied when it is
/// the configured theme.
pub fn theme_colors(config: &AppConfig, theme: ThemeName, preference: SystemPreference) -> ThemeColors {
    let colors = resolve_theme(theme.variant(), preference);
    if theme == config.theme.theme_name() {
        apply_overrides(colors, &config.theme.colors)
    } else {
        colors
    }
}
