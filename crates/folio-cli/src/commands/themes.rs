use anyhow::Result;

use folio_core::{
    theme::{resolve_theme, SystemPreference, ThemeName},
    AppConfig,
};

pub fn run(config: &AppConfig, set: Option<&str>) -> Result<()> {
    if let Some(name) = set {
        let theme: ThemeName = name.parse()?;
        let mut updated = config.clone();
        updated.theme.name = theme.to_string();
        updated.save()?;
        println!("Theme set to '{}' in {}", theme, AppConfig::config_path().display());
        return Ok(());
    }

    let current = config.theme.theme_name();
    println!("Themes:\n");
    for theme in ThemeName::ALL {
        let marker = if theme == current { "*" } else { " " };
        let light = resolve_theme(theme.variant(), SystemPreference::Light);
        let dark = resolve_theme(theme.variant(), SystemPreference::Dark);
        if light == dark {
            println!(" {} {:<8} {} on {}", marker, theme, light.text, light.background);
        } else {
            println!(
                " {} {:<8} {} on {} (light), {} on {} (dark)",
                marker, theme, light.text, light.background, dark.text, dark.background
            );
        }
    }

    Ok(())
}
