//! # Registro de cadeias de erro
//!
//! Equivalente ao interceptor de respostas do cliente HTTP: toda falha é
//! registrada com a cadeia completa de causas antes de seguir para o chamador.

use std::error::Error as StdError;
use uuid::Uuid;

/// Registra a cadeia completa de erros e devolve o identificador de rastreio
///
/// # Parâmetros
/// - `error`: Erro a analisar e registrar
/// - `context`: Contexto opcional (por exemplo, a ação do usuário que falhou)
///
/// # Retorna
/// Um `Uuid` v4 presente no registro, útil para correlacionar a mensagem
/// genérica mostrada na tela com o detalhe no log.
pub fn log_error_chain<E>(error: &E, context: Option<&str>) -> Uuid
where
    E: StdError + 'static,
{
    let trace_id = Uuid::new_v4();
    let error_chain = collect_chain(error);

    if let Some(ctx) = context {
        tracing::error!(
            trace_id = %trace_id,
            context = %ctx,
            error_chain = ?error_chain,
            "Error with full chain (with context)"
        );
    } else {
        tracing::error!(
            trace_id = %trace_id,
            error_chain = ?error_chain,
            "Error with full chain"
        );
    }

    trace_id
}

fn collect_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    let mut error_chain = Vec::new();
    let mut current_error: Option<&(dyn StdError + 'static)> = Some(error);

    while let Some(err) = current_error {
        error_chain.push(err.to_string());
        current_error = err.source();
    }

    error_chain
}

/// Registra a falha de um `Result` sem consumi-lo
///
/// ```no_run
/// use sisreservas::api::middleware::ErrorLogExt;
/// use sisreservas::api::ReservaApi;
///
/// # async fn exemplo(api: sisreservas::api::ApiClient) {
/// let _ = api.reservas().list_all().await.log_error_context("listar reservas");
/// # }
/// ```
pub trait ErrorLogExt<T, E> {
    fn log_error_context(self, context: &str) -> Result<T, E>;
}

impl<T, E> ErrorLogExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    fn log_error_context(self, context: &str) -> Result<T, E> {
        if let Err(ref error) = self {
            log_error_chain(error, Some(context));
        }
        self
    }
}
