//! # API de Clientes
//!
//! Rotas de `/clientes`. A busca textual usa a variante dedicada
//! `GET /clientes/buscar?filtro=`.

use async_trait::async_trait;
use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Cliente, ClienteForm};

/// Operações sobre clientes
#[async_trait]
pub trait ClienteApi: Send + Sync {
    /// `GET /clientes`
    async fn list_all(&self) -> ApiResult<Vec<Cliente>>;

    /// `GET /clientes/{id}`
    async fn get_by_id(&self, id: i64) -> ApiResult<Cliente>;

    /// `GET /clientes/email/{email}`
    async fn find_by_email(&self, email: &str) -> ApiResult<Cliente>;

    /// `GET /clientes/buscar?filtro=`
    async fn search(&self, filtro: &str) -> ApiResult<Vec<Cliente>>;

    /// `POST /clientes`
    async fn create(&self, cliente: &ClienteForm) -> ApiResult<Cliente>;

    /// `PUT /clientes/{id}`
    async fn update(&self, id: i64, cliente: &ClienteForm) -> ApiResult<Cliente>;

    /// `DELETE /clientes/{id}`
    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// Implementação HTTP de [`ClienteApi`]
#[derive(Debug, Clone)]
pub struct ClienteService {
    client: ApiClient,
}

impl ClienteService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClienteApi for ClienteService {
    async fn list_all(&self) -> ApiResult<Vec<Cliente>> {
        self.client.get_json("clientes.list_all", &["clientes"], &[]).await
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Cliente> {
        let id = id.to_string();
        self.client
            .get_json("clientes.get_by_id", &["clientes", &id], &[])
            .await
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Cliente> {
        self.client
            .get_json("clientes.find_by_email", &["clientes", "email", email], &[])
            .await
    }

    async fn search(&self, filtro: &str) -> ApiResult<Vec<Cliente>> {
        self.client
            .get_json(
                "clientes.search",
                &["clientes", "buscar"],
                &[("filtro", filtro.to_string())],
            )
            .await
    }

    async fn create(&self, cliente: &ClienteForm) -> ApiResult<Cliente> {
        self.client
            .send_json("clientes.create", Method::POST, &["clientes"], cliente)
            .await
    }

    async fn update(&self, id: i64, cliente: &ClienteForm) -> ApiResult<Cliente> {
        let id = id.to_string();
        self.client
            .send_json("clientes.update", Method::PUT, &["clientes", &id], cliente)
            .await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let id = id.to_string();
        self.client.delete("clientes.delete", &["clientes", &id]).await
    }
}
