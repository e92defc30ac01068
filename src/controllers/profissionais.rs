//! Lista de profissionais com filtro de situação e ativar/desativar.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{record_failure, ActionOutcome, Confirmation, ViewSignal};
use crate::api::{ApiClient, ProfissionalApi};
use crate::models::{Profissional, ProfissionalForm};

pub const LOAD_ERROR: &str = "Erro ao carregar profissionais";
pub const SAVE_ERROR: &str = "Erro ao salvar profissional";
pub const DELETE_ERROR: &str = "Erro ao excluir profissional";
pub const TOGGLE_ERROR: &str = "Erro ao alterar status do profissional";

pub const DELETE_PROMPT: &str = "Tem certeza que deseja excluir este profissional?";

/// Filtro de situação aplicado sobre a lista carregada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtivoFilter {
    #[default]
    Todos,
    Ativos,
    Inativos,
}

impl AtivoFilter {
    pub fn matches(&self, ativo: bool) -> bool {
        match self {
            Self::Todos => true,
            Self::Ativos => ativo,
            Self::Inativos => !ativo,
        }
    }
}

impl fmt::Display for AtivoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Todos => "TODOS",
            Self::Ativos => "ATIVOS",
            Self::Inativos => "INATIVOS",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Filtro desconhecido: '{0}' (use TODOS, ATIVOS ou INATIVOS)")]
pub struct UnknownAtivoFilter(pub String);

impl FromStr for AtivoFilter {
    type Err = UnknownAtivoFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TODOS" => Ok(Self::Todos),
            "ATIVOS" => Ok(Self::Ativos),
            "INATIVOS" => Ok(Self::Inativos),
            _ => Err(UnknownAtivoFilter(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfissionaisState {
    pub profissionais: Vec<Profissional>,
    pub loading: bool,
    pub error: Option<String>,
    pub editing: Option<Profissional>,
    pub form_visible: bool,
    pub form: ProfissionalForm,
    pub filter: AtivoFilter,
}

pub struct ProfissionaisController {
    api: Arc<dyn ProfissionalApi>,
    state: ProfissionaisState,
}

impl ProfissionaisController {
    pub fn new(api: Arc<dyn ProfissionalApi>) -> Self {
        Self {
            api,
            state: ProfissionaisState::default(),
        }
    }

    pub fn from_client(client: &ApiClient) -> Self {
        Self::new(Arc::new(client.profissionais()))
    }

    pub fn state(&self) -> &ProfissionaisState {
        &self.state
    }

    pub fn set_filter(&mut self, filter: AtivoFilter) {
        self.state.filter = filter;
    }

    /// Profissionais que passam no filtro, na ordem da API
    pub fn visible(&self) -> Vec<&Profissional> {
        self.state
            .profissionais
            .iter()
            .filter(|p| self.state.filter.matches(p.ativo))
            .collect()
    }

    pub async fn load(&mut self) -> ActionOutcome {
        self.state.loading = true;
        let outcome = match self.api.list_all().await {
            Ok(profissionais) => {
                tracing::debug!(count = profissionais.len(), "Professionals loaded");
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

    /// Novo formulário; profissionais nascem ativos
    pub fn begin_create(&mut self) {
        self.state.editing = None;
        self.state.form = ProfissionalForm::default();
        self.state.form_visible = true;
    }

    pub fn begin_edit(&mut self, profissional: &Profissional) -> ViewSignal {
        self.state.form = ProfissionalForm::from(profissional);
        self.state.editing = Some(profissional.clone());
        self.state.form_visible = true;
        ViewSignal::ScrollToTop
    }

    pub fn form_mut(&mut self) -> &mut ProfissionalForm {
        &mut self.state.form
    }

    pub fn reset_form(&mut self) {
        self.state.form = ProfissionalForm::default();
        self.state.editing = None;
        self.state.form_visible = false;
    }

    pub async fn submit(&mut self) -> ActionOutcome {
        if let Err(e) = self.state.form.validate() {
            tracing::warn!(error = %e, "Professional form rejected");
            self.state.error = Some(SAVE_ERROR.to_string());
            return ActionOutcome::Failed;
        }

        let result = match self.state.editing.as_ref().map(|p| p.id) {
            Some(Some(id)) => self.api.update(id, &self.state.form).await,
            Some(None) => {
                tracing::warn!("Professional under edit has no id");
                self.state.error = Some(SAVE_ERROR.to_string());
                return ActionOutcome::Failed;
            }
            None => self.api.create(&self.state.form).await,
        };

        match result {
            Ok(saved) => {
                tracing::info!(id = ?saved.id, ativo = saved.ativo, "Professional saved");
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

    /// Inverte `ativo` sem tocar nos demais campos
    ///
    /// # Parâmetros
    ///
    /// * `id` - profissional alvo
    /// * `ativo` - situação atual, como exibida na lista
    pub async fn toggle_active(&mut self, id: i64, ativo: bool) -> ActionOutcome {
        match self.api.set_active(id, !ativo).await {
            Ok(updated) => {
                tracing::info!(id, ativo = updated.ativo, "Professional status toggled");
                self.load().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.state.error, TOGGLE_ERROR, &e);
                ActionOutcome::Failed
            }
        }
    }

    pub async fn delete(&mut self, id: i64, confirmation: &dyn Confirmation) -> ActionOutcome {
        if !confirmation.confirm(DELETE_PROMPT) {
            return ActionOutcome::Cancelled;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "Professional deleted");
                self.load().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.state.error, DELETE_ERROR, &e);
                ActionOutcome::Failed
            }
        }
    }
}
