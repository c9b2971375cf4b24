use serde::{Deserialize, Serialize};

use crate::utils::path::get_config_path;

/// Preferências locais da aplicação (fora do banco de dados)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_window_height() -> f32 {
    800.0
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        let config_path = get_config_path();

        if let Ok(content) = std::fs::read_to_string(&config_path) {
            if let Ok(settings) = toml::from_str(&content) {
                return settings;
            }
        }

        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = get_config_path();
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip() {
        let settings = AppSettings {
            dark_mode: true,
            window_width: 1024.0,
            window_height: 768.0,
        };
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let loaded: AppSettings = toml::from_str(&toml_str).unwrap();
        assert!(loaded.dark_mode);
        assert_eq!(loaded.window_width, 1024.0);
    }

    #[test]
    fn test_campos_ausentes_usam_padrao() {
        let loaded: AppSettings = toml::from_str("dark_mode = true\n").unwrap();
        assert!(loaded.dark_mode);
        assert_eq!(loaded.window_width, 1280.0);
        assert_eq!(loaded.window_height, 800.0);
    }
}
