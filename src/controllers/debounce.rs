//! Tarefa atrasada cancelável.
//!
//! Cada novo agendamento cancela incondicionalmente o anterior que ainda não
//! disparou. O cancelamento só alcança o período de espera: depois de
//! disparada, a tarefa roda destacada e não é mais interrompida.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Agenda `task` para daqui a `delay`, cancelando o agendamento anterior
    ///
    /// Precisa ser chamado dentro de um runtime tokio.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancel() {
            tracing::trace!("Pending debounced task superseded");
        }

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        }));
    }

    /// Cancela a espera pendente; devolve `true` se havia uma
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// `true` enquanto houver uma espera que ainda não disparou
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
