use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::schedule::{ClassRecord, Customization, FontSize, Rgb};

pub const APP_NAME: &str = "schedule-tui";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub customization: Customization,
    pub export_dir: PathBuf,
    pub classes: Vec<ClassRecord>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigFile::default().resolve()
    }
}

impl Config {
    /// Load `<config_dir>/schedule-tui/config.toml`, or defaults when absent.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).wrap_err_with(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.resolve())
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
}

pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_NAME).join(format!("{APP_NAME}.log")))
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    customization: CustomizationConfig,
    #[serde(default)]
    export: ExportConfig,
    #[serde(default)]
    classes: Vec<ClassRecord>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CustomizationConfig {
    background_color: Option<String>,
    text_color: Option<String>,
    accent_color: Option<String>,
    font_size: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ExportConfig {
    directory: Option<PathBuf>,
}

impl ConfigFile {
    fn resolve(self) -> Config {
        let classes = if self.classes.is_empty() {
            ClassRecord::samples()
        } else {
            self.classes
        };

        Config {
            customization: self.customization.into_customization(),
            export_dir: self.export.directory.unwrap_or_else(default_export_dir),
            classes,
        }
    }
}

impl CustomizationConfig {
    fn into_customization(self) -> Customization {
        let defaults = Customization::default();
        Customization {
            background_color: color_or(
                self.background_color,
                "background_color",
                defaults.background_color,
            ),
            text_color: color_or(self.text_color, "text_color", defaults.text_color),
            accent_color: color_or(self.accent_color, "accent_color", defaults.accent_color),
            font_size: match self.font_size {
                None => defaults.font_size,
                Some(px) => FontSize::from_px(px).unwrap_or_else(|| {
                    tracing::warn!(px, "font_size must be 12, 14, 16 or 18; using default");
                    defaults.font_size
                }),
            },
        }
    }
}

fn color_or(value: Option<String>, key: &str, default: Rgb) -> Rgb {
    let Some(value) = value else {
        return default;
    };
    value.parse().unwrap_or_else(|err| {
        tracing::warn!(key, %err, "invalid color; using default");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults_and_sample_roster() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.customization, Customization::default());
        assert_eq!(config.classes, ClassRecord::samples());
    }

    #[test]
    fn reads_customization_export_dir_and_roster() {
        let config = Config::from_toml(
            r##"
            [customization]
            background_color = "#101820"
            accent_color = "#f2aa4c"
            font_size = 18

            [export]
            directory = "/tmp/schedules"

            [[classes]]
            id = "9"
            code = "HIST300"
            name = "Modern History"
            schedule = "TTH 10:00 AM - 11:30 AM"
            instructor = "Dr. Bloch"
            room = "Hall B"

            [[classes]]
            id = "10"
            code = "SEM1"
            name = "Seminar"
            "##,
        )
        .unwrap();

        assert_eq!(config.customization.background_color, Rgb::new(0x10, 0x18, 0x20));
        assert_eq!(config.customization.text_color, Rgb::BLACK);
        assert_eq!(config.customization.accent_color, Rgb::new(0xf2, 0xaa, 0x4c));
        assert_eq!(config.customization.font_size, FontSize::ExtraLarge);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/schedules"));
        assert_eq!(config.classes.len(), 2);
        assert_eq!(config.classes[0].code, "HIST300");
        assert_eq!(config.classes[1].schedule, None);
        assert_eq!(config.classes[1].room, "");
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = Config::from_toml(
            r##"
            [customization]
            text_color = "teal"
            font_size = 15
            "##,
        )
        .unwrap();
        assert_eq!(config.customization, Customization::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("[customization\nfont_size = ").is_err());
        assert!(Config::from_toml("[customisation]\nfont_size = 12").is_err());
    }
}
