use std::sync::{Arc, OnceLock};

use uuid::Uuid;

use crate::{domain::skin::texture::SkinTexture, shared::error::SkinError};

const STEVE_PNG: &[u8] = include_bytes!("../../assets/steve.png");
const ALEX_PNG: &[u8] = include_bytes!("../../assets/alex.png");

static DEFAULT_SKINS: OnceLock<DefaultSkins> = OnceLock::new();

/// Built-in textures used when a player has no readable skin.
#[derive(Debug, Clone)]
pub struct DefaultSkins {
    steve: Arc<SkinTexture>,
    alex: Arc<SkinTexture>,
}

impl DefaultSkins {
    pub fn load() -> Result<Self, SkinError> {
        let steve = SkinTexture::decode_png(STEVE_PNG, false, true)
            .map_err(|err| SkinError::Config(format!("Skin por defecto steve.png inválida: {err}")))?;
        let alex = SkinTexture::decode_png(ALEX_PNG, true, true)
            .map_err(|err| SkinError::Config(format!("Skin por defecto alex.png inválida: {err}")))?;

        Ok(Self {
            steve: Arc::new(steve),
            alex: Arc::new(alex),
        })
    }

    pub fn steve(&self) -> &Arc<SkinTexture> {
        &self.steve
    }

    pub fn alex(&self) -> &Arc<SkinTexture> {
        &self.alex
    }

    /// Steve for identifiers with an even hash, Alex (slim) for odd ones.
    pub fn for_identifier(&self, identifier: &str) -> &Arc<SkinTexture> {
        if uses_slim_default(identifier) {
            &self.alex
        } else {
            &self.steve
        }
    }
}

/// Loads the process-wide default skins. Meant to run once at startup; later
/// calls return the same instances.
pub fn init_default_skins() -> Result<&'static DefaultSkins, SkinError> {
    if let Some(skins) = DEFAULT_SKINS.get() {
        return Ok(skins);
    }
    let skins = DefaultSkins::load()?;
    log::debug!("Skins por defecto cargadas");
    Ok(DEFAULT_SKINS.get_or_init(|| skins))
}

pub fn uses_slim_default(identifier: &str) -> bool {
    identifier_hash(identifier) & 1 == 1
}

/// Hash compatible with the game: UUIDs use `UUID.hashCode`, anything else the
/// `String.hashCode` of its UTF-16 units.
pub fn identifier_hash(identifier: &str) -> i32 {
    match Uuid::parse_str(identifier.trim()) {
        Ok(uuid) => uuid_hash(&uuid),
        Err(_) => string_hash(identifier),
    }
}

fn uuid_hash(uuid: &Uuid) -> i32 {
    let (most, least) = uuid.as_u64_pair();
    let hilo = most ^ least;
    ((hilo >> 32) as i32) ^ (hilo as i32)
}

fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{identifier_hash, init_default_skins, uses_slim_default, DefaultSkins};

    #[test]
    fn uuid_hash_matches_game_values() {
        assert_eq!(identifier_hash("069a79f4-44e9-4726-a5be-fca90e38aaf5"), -369792882);
        assert_eq!(identifier_hash("069a79f444e94726a5befca90e38aaf5"), -369792882);
        assert_eq!(identifier_hash("853c80ef-3c37-49fd-aa49-938b674adae6"), 1946714239);
        assert_eq!(identifier_hash("00000001-0000-0000-0000-000000000000"), 1);
    }

    #[test]
    fn non_uuid_identifiers_use_string_hash() {
        assert_eq!(identifier_hash("abc"), 96354);
        assert_eq!(identifier_hash("a"), 97);
        assert!(uses_slim_default("a"));
        assert!(!uses_slim_default("abc"));
    }

    #[test]
    fn parity_selects_builtin_skin() {
        let skins = DefaultSkins::load().unwrap();
        assert!(skins.steve().is_default() && !skins.steve().is_slim());
        assert!(skins.alex().is_default() && skins.alex().is_slim());

        let even = "00000000-0000-0000-0000-000000000000";
        let odd = "00000000-0000-0000-0000-000000000001";
        for _ in 0..3 {
            assert!(Arc::ptr_eq(skins.for_identifier(even), skins.steve()));
            assert!(Arc::ptr_eq(skins.for_identifier(odd), skins.alex()));
        }
    }

    #[test]
    fn builtin_skins_are_large_textures() {
        let skins = init_default_skins().unwrap();
        assert!(skins.steve().is_large());
        assert!(skins.alex().is_large());
        assert!(std::ptr::eq(skins, init_default_skins().unwrap()));
    }
}
