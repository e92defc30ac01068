//! # Controladores de tela
//!
//! Cada tela tem um controlador dono de um registro de estado explícito
//! (listas, `loading`, `error`, formulário, item em edição). Toda mutação é
//! seguida de uma recarga completa: a API é a única fonte de verdade e nada é
//! aplicado de forma otimista.
//!
//! - [`reservas`] - fluxo de reservas (carga conjunta, edição, status, filtro)
//! - [`clientes`] - lista de clientes com busca textual com debounce
//! - [`profissionais`] - lista de profissionais com ativar/desativar
//! - [`debounce`] - tarefa atrasada cancelável

pub mod clientes;
pub mod debounce;
pub mod profissionais;
pub mod reservas;

pub use clientes::{ClientesController, ClientesState};
pub use debounce::Debouncer;
pub use profissionais::{AtivoFilter, ProfissionaisController, ProfissionaisState};
pub use reservas::{ReservasController, ReservasState, StatusFilter};

use crate::api::middleware::log_error_chain;
use crate::api::ApiError;

/// Resultado de uma ação disparada pelo usuário
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A chamada foi aceita pela API (e a tela recarregada, se for o caso)
    Applied,
    /// O usuário recusou a confirmação; nenhuma chamada foi feita
    Cancelled,
    /// A chamada falhou; a mensagem está em `error`
    Failed,
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Efeito de apresentação pedido pelo controlador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSignal {
    /// Rolar a tela até o topo, onde fica o formulário
    ScrollToTop,
}

/// Porta de confirmação interativa (aceitar/cancelar)
pub trait Confirmation: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Grava a mensagem genérica no slot de erro e registra o detalhe
///
/// Falha de rede e status HTTP não são distinguidos para o usuário.
pub(crate) fn record_failure(slot: &mut Option<String>, message: &str, error: &ApiError) {
    let trace_id = log_error_chain(error, Some(message));
    tracing::debug!(trace_id = %trace_id, message, "Action failed");
    *slot = Some(message.to_string());
}
