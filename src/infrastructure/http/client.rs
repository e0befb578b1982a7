use std::time::Duration;

use reqwest::blocking::Client;

use crate::{infrastructure::filesystem::config::SkinConfig, shared::error::SkinError};

pub fn build_http_client(config: &SkinConfig) -> Result<Client, SkinError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|err| SkinError::Network(format!("No se pudo crear cliente HTTP: {err}")))
}

pub fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, SkinError> {
    let response = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .map_err(|err| SkinError::Network(format!("No se pudo descargar {url}: {err}")))?;

    response
        .bytes()
        .map(|bytes| bytes.to_vec())
        .map_err(|err| SkinError::Network(format!("No se pudo leer respuesta de {url}: {err}")))
}
