use std::sync::Arc;

use reqwest::blocking::Client;
use uuid::Uuid;

use crate::{
    domain::{
        auth::profile::MinecraftProfile,
        skin::{
            extractor::{extract_part, validate_scale},
            geometry::SkinPart,
            position::{compose_position, SkinPosition, SkinView},
            skin_image::SkinImage,
            texture::SkinTexture,
        },
    },
    infrastructure::{
        filesystem::config::SkinConfig,
        http::{
            client::{build_http_client, fetch_bytes},
            session::fetch_session_profile,
        },
    },
    services::default_skins::{init_default_skins, DefaultSkins},
    shared::error::SkinError,
};

/// Resolves player profiles to textures. Anything that goes wrong while
/// fetching or decoding a skin falls back to the player's default skin.
pub struct SkinLoader {
    client: Client,
    config: SkinConfig,
    defaults: &'static DefaultSkins,
}

impl SkinLoader {
    pub fn new(config: SkinConfig) -> Result<Self, SkinError> {
        config.validate().map_err(SkinError::Config)?;
        let defaults = init_default_skins()?;
        let client = build_http_client(&config)?;
        Ok(Self {
            client,
            config,
            defaults,
        })
    }

    pub fn config(&self) -> &SkinConfig {
        &self.config
    }

    pub fn defaults(&self) -> &'static DefaultSkins {
        self.defaults
    }

    pub fn fetch_profile(&self, id: &str) -> Result<MinecraftProfile, SkinError> {
        let uuid = Uuid::parse_str(id.trim())
            .map_err(|err| SkinError::InvalidArgument(format!("UUID de jugador inválido {id}: {err}")))?;
        fetch_session_profile(&self.client, &self.config.session_server_url, &uuid)
    }

    /// Texture for the player's equipped skin, or the matching default skin.
    pub fn player_skin(&self, profile: &MinecraftProfile) -> Arc<SkinTexture> {
        if let Some(skin) = profile.active_skin() {
            match self.download_skin(skin.url.as_deref().unwrap_or_default(), skin.is_slim()) {
                Ok(texture) => return Arc::new(texture),
                Err(err) => {
                    log::debug!("No se pudo leer la skin de {} ({}): {err}", profile.name, profile.id);
                }
            }
        }
        Arc::clone(self.defaults.for_identifier(&profile.id))
    }

    /// Looks the player up on the session server and loads their skin. A
    /// failed lookup degrades to the default skin for `id`.
    pub fn player_skin_by_id(&self, id: &str) -> Arc<SkinTexture> {
        match self.fetch_profile(id) {
            Ok(profile) => self.player_skin(&profile),
            Err(err) => {
                log::debug!("No se pudo obtener el perfil {id}: {err}");
                Arc::clone(self.defaults.for_identifier(id))
            }
        }
    }

    pub fn player_cape(&self, profile: &MinecraftProfile) -> Option<SkinImage> {
        let url = profile.active_cape_url()?;
        let loaded = fetch_bytes(&self.client, url).and_then(|bytes| {
            image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
                .map_err(|err| SkinError::Decode(format!("No se pudo leer PNG de capa: {err}")))
        });

        match loaded {
            Ok(cape) => Some(SkinImage::new(cape.to_rgba8())),
            Err(err) => {
                log::debug!("No se pudo leer la capa de {} ({}): {err}", profile.name, profile.id);
                None
            }
        }
    }

    pub fn player_skin_part(
        &self,
        profile: &MinecraftProfile,
        part: SkinPart,
        scale: u32,
    ) -> Result<SkinImage, SkinError> {
        validate_scale(scale)?;
        extract_part(&self.player_skin(profile), part, scale)
    }

    pub fn player_skin_position(
        &self,
        profile: &MinecraftProfile,
        position: &SkinPosition,
        scale: u32,
    ) -> Result<SkinImage, SkinError> {
        validate_scale(scale)?;
        compose_position(&self.player_skin(profile), position, scale)
    }

    pub fn player_skin_view(
        &self,
        profile: &MinecraftProfile,
        view: SkinView,
        scale: u32,
    ) -> Result<SkinImage, SkinError> {
        self.player_skin_position(profile, view.position(), scale)
    }

    fn download_skin(&self, url: &str, slim: bool) -> Result<SkinTexture, SkinError> {
        let bytes = fetch_bytes(&self.client, url)?;
        SkinTexture::from_png_bytes(&bytes, slim)
    }
}
