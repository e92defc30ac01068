//! # Fluxo de reservas
//!
//! Controlador da tela de reservas. Mantém as listas de reservas, clientes e
//! profissionais ativos, o formulário de criação/edição e o filtro de status.
//!
//! ## Regras
//!
//! - A carga busca as três listas em paralelo; se qualquer uma falhar, nada é
//!   aplicado e as listas anteriores continuam visíveis.
//! - Criar, editar, excluir e trocar status sempre terminam com uma recarga.
//! - A troca de status não tem restrição local: qualquer par (atual, novo)
//!   é enviado à API.
//! - O filtro de status é só uma projeção da lista já carregada.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{record_failure, ActionOutcome, Confirmation, ViewSignal};
use crate::api::{ApiClient, ClienteApi, ProfissionalApi, ReservaApi};
use crate::models::{Cliente, Profissional, Reserva, ReservaForm, StatusReserva, UnknownStatus};

pub const LOAD_ERROR: &str = "Erro ao carregar dados";
pub const SAVE_ERROR: &str = "Erro ao salvar reserva";
pub const DELETE_ERROR: &str = "Erro ao excluir reserva";
pub const STATUS_ERROR: &str = "Erro ao atualizar status";

pub const DELETE_PROMPT: &str = "Tem certeza que deseja excluir esta reserva?";

/// Filtro de status aplicado sobre a lista carregada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(StatusReserva),
}

impl StatusFilter {
    pub fn matches(&self, status: StatusReserva) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("TODAS"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TODAS" | "ALL" | "" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

/// Reservas cujo status passa no filtro, na ordem original
pub fn filter_by_status(reservas: &[Reserva], filter: StatusFilter) -> Vec<&Reserva> {
    reservas.iter().filter(|r| filter.matches(r.status)).collect()
}

/// Estado da tela de reservas
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReservasState {
    pub reservas: Vec<Reserva>,
    pub clientes: Vec<Cliente>,
    /// Somente profissionais ativos
    pub profissionais: Vec<Profissional>,
    pub loading: bool,
    pub error: Option<String>,
    pub editing: Option<Reserva>,
    pub form_visible: bool,
    pub form: ReservaForm,
    pub status_filter: StatusFilter,
}

/// Controlador da tela de reservas
pub struct ReservasController {
    reservas: Arc<dyn ReservaApi>,
    clientes: Arc<dyn ClienteApi>,
    profissionais: Arc<dyn ProfissionalApi>,
    state: ReservasState,
}

impl ReservasController {
    pub fn new(
        reservas: Arc<dyn ReservaApi>,
        clientes: Arc<dyn ClienteApi>,
        profissionais: Arc<dyn ProfissionalApi>,
    ) -> Self {
        Self {
            reservas,
            clientes,
            profissionais,
            state: ReservasState::default(),
        }
    }

    /// Controlador ligado aos serviços HTTP de `client`
    pub fn from_client(client: &ApiClient) -> Self {
        Self::new(
            Arc::new(client.reservas()),
            Arc::new(client.clientes()),
            Arc::new(client.profissionais()),
        )
    }

    pub fn state(&self) -> &ReservasState {
        &self.state
    }

    /// Reservas visíveis com o filtro atual
    pub fn visible(&self) -> Vec<&Reserva> {
        filter_by_status(&self.state.reservas, self.state.status_filter)
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.state.status_filter = filter;
    }

    /// Carrega reservas, clientes e profissionais ativos em paralelo
    ///
    /// Falha de qualquer uma das três descarta as demais e mantém as listas
    /// anteriores. `loading` volta a `false` em qualquer caso.
    pub async fn load(&mut self) -> ActionOutcome {
        self.state.loading = true;

        let result = tokio::try_join!(
            self.reservas.list_all(),
            self.clientes.list_all(),
            self.profissionais.list_active(),
        );

        let outcome = match result {
            Ok((reservas, clientes, profissionais)) => {
                tracing::debug!(
                    reservas = reservas.len(),
                    clientes = clientes.len(),
                    profissionais = profissionais.len(),
                    "Reservation screen loaded"
                );
                self.state.reservas = reservas;
                self.state.clientes = clientes;
                self.state.profissionais = profissionais;
                self.state.error = None;
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.state.error, LOAD_ERROR, &e);
                ActionOutcome::Failed
            }
        };

        self.state.loading = false;
        outcome
    }

    /// Abre o formulário vazio para uma nova reserva
    pub fn begin_create(&mut self) {
        self.state.editing = None;
        self.state.form = ReservaForm::default();
        self.state.form_visible = true;
    }

    /// Abre o formulário preenchido com `reserva`
    pub fn begin_edit(&mut self, reserva: &Reserva) -> ViewSignal {
        self.state.form = ReservaForm::from_reserva(reserva);
        self.state.editing = Some(reserva.clone());
        self.state.form_visible = true;
        ViewSignal::ScrollToTop
    }

    /// Campos do formulário aberto
    pub fn form_mut(&mut self) -> &mut ReservaForm {
        &mut self.state.form
    }

    /// Fecha o formulário e limpa o item em edição
    pub fn reset_form(&mut self) {
        self.state.form = ReservaForm::default();
        self.state.editing = None;
        self.state.form_visible = false;
    }

    /// Cria ou atualiza conforme haja reserva em edição
    ///
    /// Em caso de falha o formulário continua aberto e preenchido.
    pub async fn submit(&mut self) -> ActionOutcome {
        if let Err(e) = self.state.form.validate() {
            tracing::warn!(error = %e, "Reservation form rejected");
            self.state.error = Some(SAVE_ERROR.to_string());
            return ActionOutcome::Failed;
        }

        let result = match self.state.editing.as_ref().map(|r| r.id) {
            Some(Some(id)) => self.reservas.update(id, &self.state.form).await,
            Some(None) => {
                tracing::warn!("Reservation under edit has no id");
                self.state.error = Some(SAVE_ERROR.to_string());
                return ActionOutcome::Failed;
            }
            None => self.reservas.create(&self.state.form).await,
        };

        match result {
            Ok(saved) => {
                tracing::info!(id = ?saved.id, status = %saved.status, "Reservation saved");
                self.load().await;
                self.reset_form();
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.state.error, SAVE_ERROR, &e);
                ActionOutcome::Failed
            }
        }
    }

    /// Exclui após confirmação explícita
    pub async fn delete(&mut self, id: i64, confirmation: &dyn Confirmation) -> ActionOutcome {
        if !confirmation.confirm(DELETE_PROMPT) {
            return ActionOutcome::Cancelled;
        }

        match self.reservas.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "Reservation deleted");
                self.load().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.state.error, DELETE_ERROR, &e);
                ActionOutcome::Failed
            }
        }
    }

    /// Envia o novo status direto à API, sem passar pelo formulário
    pub async fn change_status(&mut self, id: i64, status: StatusReserva) -> ActionOutcome {
        match self.reservas.update_status(id, status).await {
            Ok(_) => {
                tracing::info!(id, status = %status, "Reservation status changed");
                self.load().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.state.error, STATUS_ERROR, &e);
                ActionOutcome::Failed
            }
        }
    }
}
