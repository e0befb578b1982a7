use reqwest::{blocking::Client, StatusCode};
use uuid::Uuid;

use crate::{
    domain::auth::profile::{MinecraftProfile, SessionProfile},
    shared::error::SkinError,
};

pub fn session_profile_url(base_url: &str, id: &Uuid) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id.simple())
}

pub fn fetch_session_profile(
    client: &Client,
    base_url: &str,
    id: &Uuid,
) -> Result<MinecraftProfile, SkinError> {
    let url = session_profile_url(base_url, id);
    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .map_err(|err| SkinError::Network(format!("No se pudo consultar perfil {id}: {err}")))?;

    // The session server answers 204 for unknown profiles.
    if response.status() == StatusCode::NO_CONTENT {
        return Err(SkinError::Network(format!("No existe perfil para {id}")));
    }

    let session = response
        .error_for_status()
        .map_err(|err| SkinError::Network(format!("El servidor de sesión devolvió error HTTP: {err}")))?
        .json::<SessionProfile>()
        .map_err(|err| SkinError::Decode(format!("No se pudo leer perfil {id}: {err}")))?;

    MinecraftProfile::from_session(session)
}
