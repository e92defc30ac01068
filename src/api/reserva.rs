//! # API de Reservas
//!
//! Rotas de `/reservas`. Criação e atualização recebem o [`ReservaForm`]
//! plano e o expandem para o formato do fio, com cliente e profissional como
//! referências `{ "id": n }`:
//!
//! ```json
//! {
//!   "cliente": { "id": 5 },
//!   "profissional": { "id": 9 },
//!   "data": "2024-03-10",
//!   "hora": "14:30"
//! }
//! ```
//!
//! O corpo nunca leva `status`: a API cria toda reserva como `PENDENTE`.

use async_trait::async_trait;
use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Reserva, ReservaForm, StatusReserva};

/// Operações sobre reservas
#[async_trait]
pub trait ReservaApi: Send + Sync {
    /// `GET /reservas`
    async fn list_all(&self) -> ApiResult<Vec<Reserva>>;

    /// `GET /reservas/{id}`
    async fn get_by_id(&self, id: i64) -> ApiResult<Reserva>;

    /// `GET /reservas/cliente/{id}`
    async fn list_by_cliente(&self, cliente_id: i64) -> ApiResult<Vec<Reserva>>;

    /// `GET /reservas/profissional/{id}`
    async fn list_by_profissional(&self, profissional_id: i64) -> ApiResult<Vec<Reserva>>;

    /// `GET /reservas/data/{data}`
    async fn list_by_date(&self, data: &str) -> ApiResult<Vec<Reserva>>;

    /// `GET /reservas/status/{status}`
    async fn list_by_status(&self, status: StatusReserva) -> ApiResult<Vec<Reserva>>;

    /// `GET /reservas/periodo?dataInicio=&dataFim=`
    async fn list_by_period(&self, data_inicio: &str, data_fim: &str) -> ApiResult<Vec<Reserva>>;

    /// `POST /reservas`
    async fn create(&self, form: &ReservaForm) -> ApiResult<Reserva>;

    /// `PUT /reservas/{id}`
    async fn update(&self, id: i64, form: &ReservaForm) -> ApiResult<Reserva>;

    /// `PATCH /reservas/{id}/status?status=`
    async fn update_status(&self, id: i64, status: StatusReserva) -> ApiResult<Reserva>;

    /// `DELETE /reservas/{id}`
    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// Implementação HTTP de [`ReservaApi`]
#[derive(Debug, Clone)]
pub struct ReservaService {
    client: ApiClient,
}

impl ReservaService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReservaApi for ReservaService {
    async fn list_all(&self) -> ApiResult<Vec<Reserva>> {
        self.client.get_json("reservas.list_all", &["reservas"], &[]).await
    }

    async fn get_by_id(&self, id: i64) -> ApiResult<Reserva> {
        let id = id.to_string();
        self.client
            .get_json("reservas.get_by_id", &["reservas", &id], &[])
            .await
    }

    async fn list_by_cliente(&self, cliente_id: i64) -> ApiResult<Vec<Reserva>> {
        let id = cliente_id.to_string();
        self.client
            .get_json("reservas.list_by_cliente", &["reservas", "cliente", &id], &[])
            .await
    }

    async fn list_by_profissional(&self, profissional_id: i64) -> ApiResult<Vec<Reserva>> {
        let id = profissional_id.to_string();
        self.client
            .get_json(
                "reservas.list_by_profissional",
                &["reservas", "profissional", &id],
                &[],
            )
            .await
    }

    async fn list_by_date(&self, data: &str) -> ApiResult<Vec<Reserva>> {
        self.client
            .get_json("reservas.list_by_date", &["reservas", "data", data], &[])
            .await
    }

    async fn list_by_status(&self, status: StatusReserva) -> ApiResult<Vec<Reserva>> {
        self.client
            .get_json(
                "reservas.list_by_status",
                &["reservas", "status", status.as_str()],
                &[],
            )
            .await
    }

    async fn list_by_period(&self, data_inicio: &str, data_fim: &str) -> ApiResult<Vec<Reserva>> {
        self.client
            .get_json(
                "reservas.list_by_period",
                &["reservas", "periodo"],
                &[
                    ("dataInicio", data_inicio.to_string()),
                    ("dataFim", data_fim.to_string()),
                ],
            )
            .await
    }

    async fn create(&self, form: &ReservaForm) -> ApiResult<Reserva> {
        self.client
            .send_json(
                "reservas.create",
                Method::POST,
                &["reservas"],
                &form.to_payload(),
            )
            .await
    }

    async fn update(&self, id: i64, form: &ReservaForm) -> ApiResult<Reserva> {
        let id = id.to_string();
        self.client
            .send_json(
                "reservas.update",
                Method::PUT,
                &["reservas", &id],
                &form.to_payload(),
            )
            .await
    }

    async fn update_status(&self, id: i64, status: StatusReserva) -> ApiResult<Reserva> {
        let id = id.to_string();
        self.client
            .patch_query(
                "reservas.update_status",
                &["reservas", &id, "status"],
                &[("status", status.as_str().to_string())],
            )
            .await
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let id = id.to_string();
        self.client.delete("reservas.delete", &["reservas", &id]).await
    }
}
