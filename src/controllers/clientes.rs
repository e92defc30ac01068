//! # Lista de clientes
//!
//! Além do CRUD, a lista tem uma busca textual com debounce: cada mudança do
//! filtro cancela a busca agendada e agenda outra para depois do intervalo
//! de silêncio. Filtro em branco carrega a lista completa.
//!
//! A busca disparada roda destacada e não é cancelada. Uma resposta atrasada
//! ainda sobrescreve a lista, então vale a última resposta, não a última
//! requisição. Quem precisar reagir a essas atualizações em segundo plano
//! assina o canal de revisão com [`ClientesController::subscribe`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use super::{record_failure, ActionOutcome, Confirmation, Debouncer, ViewSignal};
use crate::api::{ApiClient, ClienteApi};
use crate::formatters::apply_phone_mask;
use crate::models::{Cliente, ClienteForm};

pub const LOAD_ERROR: &str = "Erro ao carregar clientes";
pub const SEARCH_ERROR: &str = "Erro ao buscar clientes";
pub const SAVE_ERROR: &str = "Erro ao salvar cliente";
pub const DELETE_ERROR: &str = "Erro ao excluir cliente";

pub const DELETE_PROMPT: &str = "Tem certeza que deseja excluir este cliente?";

/// Estado da lista de clientes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientesState {
    pub clientes: Vec<Cliente>,
    /// Texto digitado no campo de busca
    pub filtro: String,
    pub loading: bool,
    pub error: Option<String>,
    pub editing: Option<Cliente>,
    pub form_visible: bool,
    pub form: ClienteForm,
}

/// Números de sequência dos filtros pedidos e respondidos
#[derive(Debug, Default)]
struct Progress {
    requested: u64,
    answered: u64,
}

struct Shared {
    api: Arc<dyn ClienteApi>,
    state: Mutex<ClientesState>,
    progress: Mutex<Progress>,
    revision: watch::Sender<u64>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ClientesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registra `filtro` como o filtro em vigor e devolve sua sequência
    fn request(&self, filtro: &str) -> u64 {
        self.lock().filtro = filtro.to_string();
        let mut progress = self.progress();
        progress.requested += 1;
        progress.requested
    }

    /// `true` enquanto o último filtro pedido não tiver resposta
    fn is_behind(&self) -> bool {
        let progress = self.progress();
        progress.answered < progress.requested
    }

    /// Busca com `filtro`, ou a lista completa se ele estiver em branco
    ///
    /// `seq` é a sequência devolvida por [`Shared::request`] para esse filtro.
    async fn refresh(&self, filtro: String, seq: u64) -> ActionOutcome {
        self.lock().loading = true;

        let blank = filtro.trim().is_empty();
        let result = if blank {
            self.api.list_all().await
        } else {
            self.api.search(&filtro).await
        };

        let outcome = {
            let mut state = self.lock();
            state.loading = false;
            match result {
                Ok(clientes) => {
                    tracing::debug!(filtro = %filtro, count = clientes.len(), "Client list refreshed");
                    state.clientes = clientes;
                    state.error = None;
                    ActionOutcome::Applied
                }
                Err(e) => {
                    let message = if blank { LOAD_ERROR } else { SEARCH_ERROR };
                    record_failure(&mut state.error, message, &e);
                    ActionOutcome::Failed
                }
            }
        };

        // a revisão sobe junto com `answered` para quem espera em `is_behind`
        let mut progress = self.progress();
        progress.answered = progress.answered.max(seq);
        self.revision.send_modify(|revision| *revision += 1);
        drop(progress);

        outcome
    }

    /// Recarrega com o filtro em vigor
    async fn reload(&self) -> ActionOutcome {
        let filtro = self.lock().filtro.clone();
        let seq = self.progress().requested;
        self.refresh(filtro, seq).await
    }
}

/// Controlador da lista de clientes
pub struct ClientesController {
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl ClientesController {
    /// # Parâmetros
    ///
    /// * `api` - serviço de clientes
    /// * `debounce` - intervalo de silêncio antes de disparar a busca
    pub fn new(api: Arc<dyn ClienteApi>, debounce: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            shared: Arc::new(Shared {
                api,
                state: Mutex::new(ClientesState::default()),
                progress: Mutex::new(Progress::default()),
                revision,
            }),
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn from_client(client: &ApiClient, debounce: Duration) -> Self {
        Self::new(Arc::new(client.clientes()), debounce)
    }

    /// Cópia do estado atual
    pub fn snapshot(&self) -> ClientesState {
        self.shared.lock().clone()
    }

    /// Canal incrementado a cada atualização da lista
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    /// `true` enquanto a busca agendada ainda não disparou
    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// `true` até o último filtro informado ter sua resposta aplicada,
    /// inclusive com a requisição já em voo
    pub fn is_searching(&self) -> bool {
        self.debouncer.is_pending() || self.shared.is_behind()
    }

    /// Carga inicial (ou recarga) com o filtro em vigor
    pub async fn load(&self) -> ActionOutcome {
        self.shared.reload().await
    }

    /// Troca o filtro e agenda a busca com debounce
    ///
    /// Precisa ser chamado dentro de um runtime tokio.
    pub fn set_filter(&mut self, filtro: impl Into<String>) {
        let filtro = filtro.into();
        let seq = self.shared.request(&filtro);

        let shared = Arc::clone(&self.shared);
        self.debouncer.schedule(async move {
            shared.refresh(filtro, seq).await;
        });
    }

    /// Troca o filtro e busca na hora, descartando a busca agendada
    pub async fn apply_filter(&mut self, filtro: impl Into<String>) -> ActionOutcome {
        let filtro = filtro.into();
        self.debouncer.cancel();
        let seq = self.shared.request(&filtro);
        self.shared.refresh(filtro, seq).await
    }

    pub fn begin_create(&self) {
        let mut state = self.shared.lock();
        state.editing = None;
        state.form = ClienteForm::default();
        state.form_visible = true;
    }

    pub fn begin_edit(&self, cliente: &Cliente) -> ViewSignal {
        let mut state = self.shared.lock();
        state.form = ClienteForm::from(cliente);
        state.editing = Some(cliente.clone());
        state.form_visible = true;
        ViewSignal::ScrollToTop
    }

    /// Altera os campos do formulário aberto
    pub fn edit_form(&self, edit: impl FnOnce(&mut ClienteForm)) {
        edit(&mut self.shared.lock().form);
    }

    /// Aplica a máscara de telefone ao valor digitado
    pub fn set_telefone(&self, input: &str) {
        self.shared.lock().form.telefone = apply_phone_mask(input);
    }

    pub fn reset_form(&self) {
        let mut state = self.shared.lock();
        state.form = ClienteForm::default();
        state.editing = None;
        state.form_visible = false;
    }

    /// Cria ou atualiza; em caso de falha o formulário continua aberto
    pub async fn submit(&self) -> ActionOutcome {
        let (editing, form) = {
            let state = self.shared.lock();
            (state.editing.as_ref().map(|c| c.id), state.form.clone())
        };

        if let Err(e) = form.validate() {
            tracing::warn!(error = %e, "Client form rejected");
            self.shared.lock().error = Some(SAVE_ERROR.to_string());
            return ActionOutcome::Failed;
        }

        let result = match editing {
            Some(Some(id)) => self.shared.api.update(id, &form).await,
            Some(None) => {
                tracing::warn!("Client under edit has no id");
                self.shared.lock().error = Some(SAVE_ERROR.to_string());
                return ActionOutcome::Failed;
            }
            None => self.shared.api.create(&form).await,
        };

        match result {
            Ok(saved) => {
                tracing::info!(id = ?saved.id, "Client saved");
                self.shared.reload().await;
                self.reset_form();
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.shared.lock().error, SAVE_ERROR, &e);
                ActionOutcome::Failed
            }
        }
    }

    pub async fn delete(&self, id: i64, confirmation: &dyn Confirmation) -> ActionOutcome {
        if !confirmation.confirm(DELETE_PROMPT) {
            return ActionOutcome::Cancelled;
        }

        match self.shared.api.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "Client deleted");
                self.shared.reload().await;
                ActionOutcome::Applied
            }
            Err(e) => {
                record_failure(&mut self.shared.lock().error, DELETE_ERROR, &e);
                ActionOutcome::Failed
            }
        }
    }
}
