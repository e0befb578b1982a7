use std::{fs, path::Path};

use crate::{
    domain::skin::extractor::{MAX_SCALE, MIN_SCALE},
    shared::result::AppResult,
};

pub const DEFAULT_SESSION_SERVER_URL: &str = "https://sessionserver.mojang.com/session/minecraft/profile";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    pub session_server_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub default_scale: u32,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            session_server_url: DEFAULT_SESSION_SERVER_URL.to_string(),
            user_agent: format!("SkinUtil/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 10,
            default_scale: 8,
        }
    }
}

impl SkinConfig {
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.default_scale) {
            return Err(format!(
                "default_scale debe estar entre {MIN_SCALE} y {MAX_SCALE} (actual: {})",
                self.default_scale
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs debe ser mayor que 0".to_string());
        }
        if self.session_server_url.trim().is_empty() {
            return Err("session_server_url está vacío".to_string());
        }
        Ok(())
    }
}

pub fn load_skin_config(path: &Path) -> AppResult<SkinConfig> {
    if !path.exists() {
        return Ok(SkinConfig::default());
    }

    let raw = fs::read_to_string(path)
        .map_err(|err| format!("No se pudo leer configuración {}: {err}", path.display()))?;

    let config = serde_json::from_str::<SkinConfig>(&raw)
        .map_err(|err| format!("No se pudo parsear configuración {}: {err}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn save_skin_config(path: &Path, config: &SkinConfig) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "No se pudo crear directorio para configuración {}: {err}",
                parent.display()
            )
        })?;
    }

    let raw = serde_json::to_string_pretty(config)
        .map_err(|err| format!("No se pudo serializar configuración: {err}"))?;

    fs::write(path, raw)
        .map_err(|err| format!("No se pudo guardar configuración {}: {err}", path.display()))?;

    Ok(())
}
