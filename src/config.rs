//! # Configuração
//!
//! A origem da API é o único ponto de configuração externo. Lida do ambiente
//! (ou de `.env`, carregado pelo binário com `dotenvy`):
//!
//! ```env
//! SISRESERVAS_API_URL=http://localhost:8080/api
//! SISRESERVAS_SEARCH_DEBOUNCE_MS=500
//! ```

use reqwest::Url;
use std::env;
use std::time::Duration;

use crate::api::{ApiError, ApiResult};

pub const API_URL_VAR: &str = "SISRESERVAS_API_URL";
pub const DEBOUNCE_VAR: &str = "SISRESERVAS_SEARCH_DEBOUNCE_MS";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Configuração do cliente da API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Silêncio exigido antes de disparar a busca textual de clientes
    pub search_debounce: Duration,
}

impl ApiConfig {
    /// Configuração com a URL informada e o debounce padrão
    ///
    /// # Erros
    /// - `InvalidUrl`: se `base_url` não for uma URL absoluta http(s)
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        })
    }

    /// Lê a configuração das variáveis de ambiente do processo
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Lê a configuração de uma fonte arbitrária de variáveis
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let search_debounce = match lookup(DEBOUNCE_VAR) {
            None => DEFAULT_SEARCH_DEBOUNCE,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => {
                    // Não é fatal, seguimos com o padrão
                    tracing::warn!(
                        variable = DEBOUNCE_VAR,
                        value = %raw,
                        error = %e,
                        "Invalid debounce, using default"
                    );
                    DEFAULT_SEARCH_DEBOUNCE
                }
            },
        };

        tracing::debug!(base_url = %base_url, debounce_ms = search_debounce.as_millis() as u64, "API config loaded");

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            search_debounce,
        })
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::invalid_url(raw, e))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::invalid_url(raw, "esperado http:// ou https://"));
    }

    Ok(url)
}
