//! # API de Profissionais

use async_trait::async_trait;
use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Profissional, ProfissionalForm};

/// Operações sobre profissionais
#[async_trait]
pub trait ProfissionalApi: Send + Sync {
    /// `GET /profissionais`
    async fn list_all(&self) -> ApiResult<Vec<Profissional>>;

    /// `GET /profissionais/ativos`
    async fn list_active(&self) -> ApiResult<Vec<Profissional>>;

    /// `GET /profissionais/{id}`
    async fn get_by_id(&self, id: i64) -> ApiResult<Profissional>;

    /// `GET /profissionais/email/{email}`
    async fn find_by_email(&self, email: &str) -> ApiResult<Profissional>;

    /// `GET /profissionais/especialidade/{nome}`
    async fn list_by_especialidade(&self, especialidade: &str) -> ApiResult<Vec<Profissional>>;

    /// `GET /profissionais/buscar?especialidade=&filtro=`
    ///
    /// Parâmetros ausentes não são enviados.
    async fn search(
        &self,
        especialidade: Option<&str>,
        filtro: Option<&str>,
    ) -> ApiResult<Vec<Profissional>>;

    /// `POST /profissionais`
    async fn create(&self, profissional: &ProfissionalForm) -> ApiResult<Profissional>;

    /// `PUT /profissionais/{id}`
    async fn update(&self, id: i64, profissional: &ProfissionalForm) -> ApiResult<Profissional>;

    /// `PATCH /profissionais/{id}/ativo?ativo=`
    ///
    /// Só altera `ativo`; os demais campos ficam como estão.
    async fn set_active(&self, id: i64, ativo: bool) -> ApiResult<Profissional>;

    /// `DELETE /profissionais/{id}`
    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// Implementação HTTP de [`ProfissionalApi`]
#[derive(Debug, Clone)]
pub struct ProfissionalService {
    client: ApiClient,
}

impl ProfissionalService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfissionalApi for ProfissionalService {
    async fn list_all(&self) -> ApiResult<Vec<Profissional>> {
        self.client
            .get_json("profissionais.list_all", &["profissionais"], &[])
            .await
    }

    async fn list_active(&self) -> ApiResult<Vec<Profissional>> {
        self.client
            .get_json("profissionais.list_active", &["profissionais", "ativos"], &[])
            .await
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Profissional> {
        let id = id.to_string();
        self.client
            .get_json("profissionais.get_by_id", &["profissionais", &id], &[])
            .await
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Profissional> {
        self.client
            .get_json(
                "profissionais.find_by_email",
                &["profissionais", "email", email],
                &[],
            )
            .await
    }

    async fn list_by_especialidade(&self, especialidade: &str) -> ApiResult<Vec<Profissional>> {
        self.client
            .get_json(
                "profissionais.list_by_especialidade",
                &["profissionais", "especialidade", especialidade],
                &[],
            )
            .await
    }

    async fn search(
        &self,
        especialidade: Option<&str>,
        filtro: Option<&str>,
    ) -> ApiResult<Vec<Profissional>> {
        let mut query = Vec::new();
        if let Some(especialidade) = especialidade {
            query.push(("especialidade", especialidade.to_string()));
        }
        if let Some(filtro) = filtro {
            query.push(("filtro", filtro.to_string()));
        }

        self.client
            .get_json("profissionais.search", &["profissionais", "buscar"], &query)
            .await
    }

    async fn create(&self, profissional: &ProfissionalForm) -> ApiResult<Profissional> {
        self.client
            .send_json(
                "profissionais.create",
                Method::POST,
                &["profissionais"],
                profissional,
            )
            .await
    }

    async fn update(&self, id: i64, profissional: &ProfissionalForm) -> ApiResult<Profissional> {
        let id = id.to_string();
        self.client
            .send_json(
                "profissionais.update",
                Method::PUT,
                &["profissionais", &id],
                profissional,
            )
            .await
    }

    async fn set_active(&self, id: i64, ativo: bool) -> ApiResult<Profissional> {
        let id = id.to_string();
        self.client
            .patch_query(
                "profissionais.set_active",
                &["profissionais", &id, "ativo"],
                &[("ativo", ativo.to_string())],
            )
            .await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let id = id.to_string();
        self.client
            .delete("profissionais.delete", &["profissionais", &id])
            .await
    }
}
