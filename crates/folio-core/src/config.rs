use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::theme::{SystemPreference, ThemeName};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (bookmarks, history, log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Light/dark preference used by the `default` theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Ask the host terminal
    #[default]
    Auto,
    Light,
    Dark,
}

impl Appearance {
    /// The fixed preference, or `None` when the host must be asked
    pub fn fixed(&self) -> Option<SystemPreference> {
        match self {
            Appearance::Auto => None,
            Appearance::Light => Some(SystemPreference::Light),
            Appearance::Dark => Some(SystemPreference::Dark),
        }
    }
}

/// Page layout defaults, in surface units (terminal cells for the TUI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Glyph advance multiplier
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Distance between two display lines
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    /// Margin kept free on every side of a page
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Start in single-column mode instead of two-page spreads
    #[serde(default)]
    pub single_column: bool,
    #[serde(default)]
    pub appearance: Appearance,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            line_height: default_line_height(),
            padding: default_padding(),
            single_column: false,
            appearance: Appearance::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name: "default", "dark", "light", "book" or "paper"
    pub name: String,
    /// Optional colour overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

impl ThemeConfig {
    /// Parsed theme name, falling back to `default` for unknown names
    pub fn theme_name(&self) -> ThemeName {
        self.name.parse().unwrap_or_else(|_| {
            warn!("Unknown theme '{}', using default", self.name);
            ThemeName::Default
        })
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "default".to_string()
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub background: Option<String>,
    /// Body and title text
    pub text: Option<String>,
}

/// Easing curve applied to page-turn progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    /// Quadratic ease-in-out
    #[default]
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Animate page turns; when false pages are swapped instantly
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Slide duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while a slide is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the chapter/page status bar
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_status_bar: default_true(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "l", "<C-n>" (Ctrl+n), "<S-Tab>" (Shift+Tab), "<Space>", "gg"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_next_page")]
    pub next_page: String,
    #[serde(default = "default_key_prev_page")]
    pub prev_page: String,
    #[serde(default = "default_key_next_chapter")]
    pub next_chapter: String,
    #[serde(default = "default_key_prev_chapter")]
    pub prev_chapter: String,
    /// Jump to the first page of the chapter
    #[serde(default = "default_key_first_page")]
    pub first_page: String,
    /// Jump to the last page of the chapter
    #[serde(default = "default_key_last_page")]
    pub last_page: String,
    #[serde(default = "default_key_toggle_columns")]
    pub toggle_columns: String,
    #[serde(default = "default_key_cycle_theme")]
    pub cycle_theme: String,
    #[serde(default = "default_key_add_bookmark")]
    pub add_bookmark: String,
    /// Remove the bookmark on the current screen
    #[serde(default = "default_key_remove_bookmark")]
    pub remove_bookmark: String,
    #[serde(default = "default_key_next_bookmark")]
    pub next_bookmark: String,
    #[serde(default = "default_key_prev_bookmark")]
    pub prev_bookmark: String,
    #[serde(default = "default_key_font_larger")]
    pub font_larger: String,
    #[serde(default = "default_key_font_smaller")]
    pub font_smaller: String,
    #[serde(default = "default_key_line_taller")]
    pub line_taller: String,
    #[serde(default = "default_key_line_shorter")]
    pub line_shorter: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_page: default_key_next_page(),
            prev_page: default_key_prev_page(),
            next_chapter: default_key_next_chapter(),
            prev_chapter: default_key_prev_chapter(),
            first_page: default_key_first_page(),
            last_page: default_key_last_page(),
            toggle_columns: default_key_toggle_columns(),
            cycle_theme: default_key_cycle_theme(),
            add_bookmark: default_key_add_bookmark(),
            remove_bookmark: default_key_remove_bookmark(),
            next_bookmark: default_key_next_bookmark(),
            prev_bookmark: default_key_prev_bookmark(),
            font_larger: default_key_font_larger(),
            font_smaller: default_key_font_smaller(),
            line_taller: default_key_line_taller(),
            line_shorter: default_key_line_shorter(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_page() -> String { "l".to_string() }
fn default_key_prev_page() -> String { "h".to_string() }
fn default_key_next_chapter() -> String { "]".to_string() }
fn default_key_prev_chapter() -> String { "[".to_string() }
fn default_key_first_page() -> String { "gg".to_string() }
fn default_key_last_page() -> String { "G".to_string() }
fn default_key_toggle_columns() -> String { "c".to_string() }
fn default_key_cycle_theme() -> String { "t".to_string() }
fn default_key_add_bookmark() -> String { "m".to_string() }
fn default_key_remove_bookmark() -> String { "M".to_string() }
fn default_key_next_bookmark() -> String { "b".to_string() }
fn default_key_prev_bookmark() -> String { "B".to_string() }
fn default_key_font_larger() -> String { "+".to_string() }
fn default_key_font_smaller() -> String { "-".to_string() }
fn default_key_line_taller() -> String { "<C-j>".to_string() }
fn default_key_line_shorter() -> String { "<C-k>".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f64 {
    1.0
}

fn default_line_height() -> f64 {
    1.0
}

fn default_padding() -> f64 {
    2.0
}

fn default_animation_duration() -> u64 {
    150
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it is missing
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Key-value store file holding settings, bookmarks and history
    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.animation.enabled);
        assert_eq!(config.animation.duration_ms, 150);
        assert_eq!(config.animation.easing, EasingType::EaseInOut);
        assert_eq!(config.animation.animation_fps, 60);
        assert_eq!(config.reader.font_size, 1.0);
        assert!(!config.reader.single_column);
        assert_eq!(config.theme.theme_name(), ThemeName::Default);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.keymap.next_page, "l");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.reader.padding, 2.0);
    }

    #[test]
    fn test_theme_as_string() {
        let config = AppConfig::from_toml("theme = \"paper\"").unwrap();
        assert_eq!(config.theme.theme_name(), ThemeName::Paper);
        assert!(config.theme.colors.text.is_none());
    }

    #[test]
    fn test_theme_as_table() {
        let config = AppConfig::from_toml(
            r##"
            [theme]
            name = "book"
            colors = { text = "#333333" }
            "##,
        )
        .unwrap();
        assert_eq!(config.theme.theme_name(), ThemeName::Book);
        assert_eq!(config.theme.colors.text.as_deref(), Some("#333333"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = AppConfig::from_toml("theme = \"neon\"").unwrap();
        assert_eq!(config.theme.theme_name(), ThemeName::Default);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [reader]
            single_column = true
            appearance = "dark"

            [animation]
            easing = "linear"
            duration_ms = 200
            "#,
        )
        .unwrap();
        assert!(config.reader.single_column);
        assert_eq!(config.reader.appearance.fixed(), Some(SystemPreference::Dark));
        assert_eq!(config.reader.line_height, 1.0);
        assert_eq!(config.animation.easing, EasingType::Linear);
        assert_eq!(config.animation.duration_ms, 200);
        assert!(config.animation.enabled);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("reader = 3").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_expand_tilde() {
        let plain = PathBuf::from("/var/lib/folio");
        assert_eq!(expand_tilde(&plain), plain);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(std::path::Path::new("~/books")), home.join("books"));
        }
    }
}
