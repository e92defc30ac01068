//! # Módulo API
//!
//! Cliente HTTP da API REST do SisReservas e os serviços tipados por entidade.
//!
//! ## Módulos principais
//!
//! - [`cliente`] - `/clientes` (listar, buscar, criar, atualizar, excluir)
//! - [`profissional`] - `/profissionais` (inclui ativos e ativar/desativar)
//! - [`reserva`] - `/reservas` (inclui filtros e troca de status)
//! - [`errors`] - Erros da camada de serviço
//! - [`middleware`] - Registro de cadeias de erro
//!
//! Cada operação é exatamente uma ida e volta HTTP: sem cache, sem nova
//! tentativa, sem agrupamento. Os erros chegam ao chamador sem tradução.

pub mod cliente;
pub mod errors;
pub mod middleware;
pub mod profissional;
pub mod reserva;

pub use cliente::{ClienteApi, ClienteService};
pub use errors::{ApiError, ApiResult};
pub use profissional::{ProfissionalApi, ProfissionalService};
pub use reserva::{ReservaApi, ReservaService};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;

/// Cliente HTTP compartilhado pelos serviços
///
/// Clonar é barato: o `reqwest::Client` interno é um `Arc`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Cria o cliente a partir da configuração
    ///
    /// Nenhum cabeçalho de autenticação é enviado e não há timeout.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::transport("client.build", e))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn clientes(&self) -> ClienteService {
        ClienteService::new(self.clone())
    }

    pub fn profissionais(&self) -> ProfissionalService {
        ProfissionalService::new(self.clone())
    }

    pub fn reservas(&self) -> ReservaService {
        ReservaService::new(self.clone())
    }

    /// Monta a URL de um recurso; cada segmento é codificado individualmente
    pub(crate) fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_url(self.base_url.as_str(), "URL base não aceita caminho"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET com resposta JSON
    pub(crate) async fn get_json<T>(
        &self,
        operation: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, segments)?.query(query);
        let response = self.execute(operation, request).await?;
        self.decode(operation, response).await
    }

    /// POST/PUT com corpo JSON e resposta JSON
    pub(crate) async fn send_json<B, T>(
        &self,
        operation: &str,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, segments)?.json(body);
        let response = self.execute(operation, request).await?;
        self.decode(operation, response).await
    }

    /// PATCH sem corpo, parâmetros na query, resposta JSON
    pub(crate) async fn patch_query<T>(
        &self,
        operation: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, segments)?.query(query);
        let response = self.execute(operation, request).await?;
        self.decode(operation, response).await
    }

    /// DELETE; o corpo da resposta é ignorado
    pub(crate) async fn delete(&self, operation: &str, segments: &[&str]) -> ApiResult<()> {
        let request = self.request(Method::DELETE, segments)?;
        self.execute(operation, request).await?;
        Ok(())
    }

    fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        Ok(self.http.request(method, self.url(segments)?))
    }

    /// Envia a requisição e converte status não-2xx em erro
    ///
    /// Toda falha é registrada aqui antes de subir ao chamador.
    async fn execute(&self, operation: &str, request: RequestBuilder) -> ApiResult<Response> {
        tracing::debug!(operation = %operation, "Calling API");

        let result = match request.send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::status(operation, status, body))
            }
            Err(e) => Err(ApiError::transport(operation, e)),
        };

        if let Err(ref error) = result {
            error.trace();
        }
        result
    }

    async fn decode<T>(&self, operation: &str, response: Response) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        response.json::<T>().await.map_err(|e| {
            let error = if e.is_decode() {
                ApiError::decode(operation, e)
            } else {
                ApiError::transport(operation, e)
            };
            error.trace();
            error
        })
    }
}
