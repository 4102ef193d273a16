use crate::events::AppEvent;
use async_channel::Sender;
use circular_slider::{HandleIcons, IconSource, SliderStyle, SliderValue};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::PathBuf;
use thiserror::Error;

/// 22:00 to 06:00 on a twelve hour dial.
pub const DEFAULT_INITIAL: SliderValue = SliderValue {
    start_angle: 5.0 * PI / 3.0,
    angle_length: 4.0 * PI / 3.0,
};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IconConfig {
    pub start: Option<IconSource>,
    pub stop: Option<IconSource>,
}

impl IconConfig {
    pub fn load(&self) -> HandleIcons {
        HandleIcons {
            start: self.start.as_ref().and_then(IconSource::load),
            stop: self.stop.as_ref().and_then(IconSource::load),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub slider: SliderStyle,
    pub icons: IconConfig,
    pub initial: SliderValue,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slider: SliderStyle::default(),
            icons: IconConfig::default(),
            initial: DEFAULT_INITIAL,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "bedtime").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    let s = builder
        .add_source(
            config::Environment::with_prefix("BEDTIME")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    from_builder(
        config::Config::builder().add_source(config::File::from(config_path).required(false)),
    )
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circular_slider::ClockFormat;
    use circular_slider::icon::Glyph;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        from_builder(
            config::Config::builder()
                .add_source(config::File::from_str(toml, config::FileFormat::Toml)),
        )
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = parse(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.slider.segments.get(), 5);
        assert_eq!(config.slider.radius, 145.0);
        assert!(config.slider.show_clock_face);
        assert_eq!(config.slider.clock_format, ClockFormat::TwelveHour);
        assert_eq!(config.slider.gradient_color_to.to_string(), "#ffcf00");
        assert_eq!(config.icons.start, Some(IconSource::Glyph(Glyph::new("☾"))));
        assert!((config.initial.start_angle - DEFAULT_INITIAL.start_angle).abs() < 1e-12);
        assert!((config.initial.angle_length - DEFAULT_INITIAL.angle_length).abs() < 1e-12);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse(
            r#"
            [slider]
            radius = 100
            clock_format = "24h"
            "#,
        )
        .unwrap();

        assert_eq!(config.slider.radius, 100.0);
        assert_eq!(config.slider.clock_format, ClockFormat::TwentyFourHour);
        assert_eq!(config.slider.stroke_width, 40.0);
        assert_eq!(config.icons, IconConfig::default());
        assert_eq!(config.initial, DEFAULT_INITIAL);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(parse("[slider]\nsegments = 0").is_err());
        assert!(parse("[slider]\nbg_circle_color = \"black\"").is_err());
    }
}
