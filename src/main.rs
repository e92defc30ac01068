//! # SisReservas
//!
//! Linha de comando para a API REST do SisReservas: clientes, profissionais e
//! reservas de atendimento.
//!
//! ## Configuração
//!
//! Variáveis de ambiente (ou arquivo `.env`):
//!
//! ```env
//! # Origem da API
//! SISRESERVAS_API_URL=http://localhost:8080/api
//!
//! # Silêncio antes da busca de clientes, em milissegundos
//! SISRESERVAS_SEARCH_DEBOUNCE_MS=500
//!
//! # Logging
//! RUST_LOG=sisreservas=info,reqwest=warn
//! ```
//!
//! ## Execução
//!
//! ```bash
//! # Reservas pendentes
//! sisreservas reservas listar --status PENDENTE
//!
//! # Nova reserva
//! sisreservas reservas criar --cliente 5 --profissional 9 --data 2024-03-10 --hora 14:30
//!
//! # Busca interativa de clientes
//! sisreservas clientes buscar
//!
//! # Outra API
//! sisreservas --api-url http://homolog:8080/api profissionais listar --ativos
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sisreservas::cli::{self, Cli};

/// Ponto de entrada
///
/// 1. Carrega `.env`, se existir
/// 2. Configura o logging com tracing (saída em stderr)
/// 3. Interpreta os argumentos e executa o comando
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sisreservas=info,reqwest=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("SisReservas CLI starting");

    cli::run(cli).await
}
