//! # Erros da camada de serviço
//!
//! Toda falha de uma chamada à API REST chega ao chamador como [`ApiError`].
//! A camada de serviço não traduz nem recupera erros: quem decide a mensagem
//! exibida ao usuário é o controlador da tela.

use std::error::Error;
use thiserror::Error;

/// Erros produzidos pelo [`ApiClient`](super::ApiClient)
#[derive(Error, Debug)]
pub enum ApiError {
    /// Falha de rede/transporte (conexão recusada, DNS, corpo truncado...)
    #[error("Falha de comunicação na operação '{operation}': {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// A API respondeu com um status diferente de 2xx
    #[error("A API respondeu {status} na operação '{operation}': {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    /// O corpo da resposta não corresponde ao tipo esperado
    #[error("Resposta inválida na operação '{operation}': {source}")]
    Decode {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// URL base ou segmento de caminho que não forma uma URL válida
    #[error("URL inválida '{url}': {reason}")]
    InvalidUrl {
        url: String,
        reason: String,
    },
}

impl ApiError {
    /// Cria um erro de transporte a partir do erro do reqwest
    pub fn transport(operation: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            operation: operation.to_string(),
            source,
        }
    }

    /// Cria um erro de status HTTP não-2xx
    pub fn status(operation: &str, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            operation: operation.to_string(),
            status,
            body: body.into(),
        }
    }

    /// Cria um erro de desserialização da resposta
    pub fn decode(operation: &str, source: reqwest::Error) -> Self {
        Self::Decode {
            operation: operation.to_string(),
            source,
        }
    }

    /// Cria um erro de URL inválida
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Nome da operação que falhou, quando houver
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(operation),
            Self::InvalidUrl { .. } => None,
        }
    }

    /// Status HTTP devolvido pela API, se a falha foi desse tipo
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` para recursos inexistentes (404)
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }

    /// Registra o erro com o nível adequado à sua categoria
    pub fn trace(&self) {
        match self {
            Self::Transport { operation, source } => {
                tracing::error!(
                    operation = %operation,
                    error = %source,
                    error_chain = ?source.source(),
                    "Transport error calling API"
                );
            }
            Self::Status { operation, status, body } => {
                tracing::warn!(
                    operation = %operation,
                    status = *status,
                    body = %body,
                    "API returned non-success status"
                );
            }
            Self::Decode { operation, source } => {
                tracing::error!(
                    operation = %operation,
                    error = %source,
                    "Could not decode API response"
                );
            }
            Self::InvalidUrl { url, reason } => {
                tracing::error!(url = %url, reason = %reason, "Invalid API url");
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
