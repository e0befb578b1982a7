use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::shared::error::SkinError;

const ACTIVE_STATE: &str = "ACTIVE";
const SLIM_VARIANT: &str = "SLIM";
const CLASSIC_VARIANT: &str = "CLASSIC";
const TEXTURES_PROPERTY: &str = "textures";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinecraftProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skins: Vec<MinecraftSkin>,
    #[serde(default)]
    pub capes: Vec<MinecraftCape>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinecraftSkin {
    pub id: Option<String>,
    pub state: Option<String>,
    pub url: Option<String>,
    pub variant: Option<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinecraftCape {
    pub id: Option<String>,
    pub state: Option<String>,
    pub url: Option<String>,
    pub alias: Option<String>,
}

impl MinecraftSkin {
    pub fn is_slim(&self) -> bool {
        self.variant
            .as_deref()
            .is_some_and(|variant| variant.eq_ignore_ascii_case(SLIM_VARIANT))
    }
}

fn is_active(state: Option<&str>) -> bool {
    state.map_or(true, |state| state.eq_ignore_ascii_case(ACTIVE_STATE))
}

impl MinecraftProfile {
    /// Equipped skin with a usable URL. Entries without a state count as active.
    pub fn active_skin(&self) -> Option<&MinecraftSkin> {
        self.skins
            .iter()
            .find(|skin| is_active(skin.state.as_deref()) && skin.url.is_some())
    }

    pub fn active_cape_url(&self) -> Option<&str> {
        self.capes
            .iter()
            .find(|cape| is_active(cape.state.as_deref()))
            .and_then(|cape| cape.url.as_deref())
    }

    /// Builds a profile from a session server response, decoding the Base64
    /// `textures` property.
    pub fn from_session(session: SessionProfile) -> Result<Self, SkinError> {
        let mut profile = MinecraftProfile {
            id: session.id,
            name: session.name,
            skins: Vec::new(),
            capes: Vec::new(),
        };

        let Some(property) = session
            .properties
            .into_iter()
            .find(|property| property.name == TEXTURES_PROPERTY)
        else {
            return Ok(profile);
        };

        let raw = STANDARD
            .decode(property.value.trim())
            .map_err(|err| SkinError::Decode(format!("Propiedad textures no es Base64 válido: {err}")))?;
        let payload = serde_json::from_slice::<TexturesPayload>(&raw)
            .map_err(|err| SkinError::Decode(format!("Propiedad textures inválida: {err}")))?;

        if let Some(skin) = payload.textures.skin {
            let slim = skin
                .metadata
                .and_then(|metadata| metadata.model)
                .is_some_and(|model| model.eq_ignore_ascii_case("slim"));
            let variant = if slim { SLIM_VARIANT } else { CLASSIC_VARIANT };
            profile.skins.push(MinecraftSkin {
                id: None,
                state: Some(ACTIVE_STATE.to_string()),
                url: Some(skin.url),
                variant: Some(variant.to_string()),
                alias: None,
            });
        }

        if let Some(cape) = payload.textures.cape {
            profile.capes.push(MinecraftCape {
                id: None,
                state: Some(ACTIVE_STATE.to_string()),
                url: Some(cape.url),
                alias: None,
            });
        }

        Ok(profile)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<SessionProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionProperty {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct TexturesPayload {
    #[serde(default)]
    textures: TextureSet,
}

#[derive(Debug, Default, Deserialize)]
struct TextureSet {
    #[serde(rename = "SKIN")]
    skin: Option<TextureEntry>,
    #[serde(rename = "CAPE")]
    cape: Option<TextureEntry>,
}

#[derive(Debug, Deserialize)]
struct TextureEntry {
    url: String,
    metadata: Option<TextureMetadata>,
}

#[derive(Debug, Deserialize)]
struct TextureMetadata {
    model: Option<String>,
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    use super::{MinecraftProfile, SessionProfile};

    fn session_with_textures(textures: serde_json::Value) -> SessionProfile {
        let payload = serde_json::json!({
            "timestamp": 1700000000000u64,
            "profileId": "069a79f444e94726a5befca90e38aaf5",
            "profileName": "Notch",
            "textures": textures,
        });
        serde_json::from_value(serde_json::json!({
            "id": "069a79f444e94726a5befca90e38aaf5",
            "name": "Notch",
            "properties": [
                { "name": "textures", "value": STANDARD.encode(payload.to_string()) }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn session_textures_map_to_slim_skin_and_cape() {
        let session = session_with_textures(serde_json::json!({
            "SKIN": { "url": "http://textures.minecraft.net/texture/skin", "metadata": { "model": "slim" } },
            "CAPE": { "url": "http://textures.minecraft.net/texture/cape" }
        }));

        let profile = MinecraftProfile::from_session(session).unwrap();
        let skin = profile.active_skin().unwrap();
        assert!(skin.is_slim());
        assert_eq!(skin.url.as_deref(), Some("http://textures.minecraft.net/texture/skin"));
        assert_eq!(
            profile.active_cape_url(),
            Some("http://textures.minecraft.net/texture/cape")
        );
    }

    #[test]
    fn session_without_metadata_is_classic() {
        let session = session_with_textures(serde_json::json!({
            "SKIN": { "url": "http://textures.minecraft.net/texture/classic" }
        }));

        let profile = MinecraftProfile::from_session(session).unwrap();
        assert!(!profile.active_skin().unwrap().is_slim());
        assert!(profile.active_cape_url().is_none());
    }

    #[test]
    fn session_without_textures_has_no_skin() {
        let session: SessionProfile = serde_json::from_value(serde_json::json!({
            "id": "069a79f444e94726a5befca90e38aaf5",
            "name": "Notch"
        }))
        .unwrap();

        let profile = MinecraftProfile::from_session(session).unwrap();
        assert!(profile.active_skin().is_none());
    }

    #[test]
    fn invalid_textures_property_is_a_decode_error() {
        let session: SessionProfile = serde_json::from_value(serde_json::json!({
            "id": "069a79f444e94726a5befca90e38aaf5",
            "name": "Notch",
            "properties": [{ "name": "textures", "value": "%%%" }]
        }))
        .unwrap();

        assert!(MinecraftProfile::from_session(session).is_err());
    }

    #[test]
    fn services_profile_picks_active_entries() {
        let profile: MinecraftProfile = serde_json::from_value(serde_json::json!({
            "id": "069a79f444e94726a5befca90e38aaf5",
            "name": "Notch",
            "skins": [
                { "id": "a", "state": "INACTIVE", "url": "http://example/old", "variant": "CLASSIC" },
                { "id": "b", "state": "ACTIVE", "url": "http://example/new", "variant": "SLIM" }
            ],
            "capes": [{ "id": "c", "state": "INACTIVE", "url": "http://example/cape" }]
        }))
        .unwrap();

        let skin = profile.active_skin().unwrap();
        assert_eq!(skin.id.as_deref(), Some("b"));
        assert!(skin.is_slim());
        assert!(profile.active_cape_url().is_none());
    }
}
