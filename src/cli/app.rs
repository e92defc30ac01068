//! Estrutura principal da CLI

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use super::output::{Output, OutputFormat};
use super::{clientes, profissionais, reservas};
use crate::api::{ApiClient, ApiError};
use crate::config::ApiConfig;
use crate::controllers::ActionOutcome;

#[derive(Parser)]
#[command(name = "sisreservas")]
#[command(version, about = "Gestão de clientes, profissionais e reservas do SisReservas")]
#[command(propagate_version = true)]
pub struct Cli {
    /// URL base da API REST
    #[arg(long, global = true, env = "SISRESERVAS_API_URL")]
    pub api_url: Option<String>,

    /// Formato de saída
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reservas de atendimento
    #[command(subcommand)]
    Reservas(reservas::ReservaCommands),

    /// Cadastro de clientes
    #[command(subcommand)]
    Clientes(clientes::ClienteCommands),

    /// Cadastro de profissionais
    #[command(subcommand)]
    Profissionais(profissionais::ProfissionalCommands),
}

/// Erros da CLI
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuração inválida: {0}")]
    Config(#[from] ApiError),

    #[error("{0}")]
    Validation(String),

    /// Mensagem genérica deixada pelo controlador
    #[error("{0}")]
    Failed(String),

    #[error("{entity} {id} não encontrado(a)")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Erro de entrada/saída: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

/// Dependências compartilhadas pelos comandos
pub(crate) struct Context {
    pub client: ApiClient,
    pub config: ApiConfig,
    pub output: Output,
}

/// Executa o comando já interpretado
///
/// # Retorna
/// `ExitCode::SUCCESS` se a ação foi aplicada ou cancelada pelo usuário,
/// `ExitCode::FAILURE` caso contrário.
pub async fn run(cli: Cli) -> ExitCode {
    let format = cli.format;

    match execute(cli, Output::new(format)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            Output::new(format).error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli, output: Output) -> CliResult<()> {
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = ApiConfig::new(url)?.with_search_debounce(config.search_debounce);
    }
    tracing::debug!(base_url = %config.base_url, "Using API");

    let client = ApiClient::new(&config)?;
    let ctx = Context {
        client,
        config,
        output,
    };

    match cli.command {
        Commands::Reservas(cmd) => reservas::run(cmd, &ctx).await,
        Commands::Clientes(cmd) => clientes::run(cmd, &ctx).await,
        Commands::Profissionais(cmd) => profissionais::run(cmd, &ctx).await,
    }
}

/// Converte o resultado de uma ação do controlador em resultado da CLI
pub(crate) fn finish(
    ctx: &Context,
    outcome: ActionOutcome,
    error: Option<&str>,
    success: &str,
) -> CliResult<()> {
    match outcome {
        ActionOutcome::Applied => {
            ctx.output.success(success);
            Ok(())
        }
        ActionOutcome::Cancelled => {
            ctx.output.success("Operação cancelada.");
            Ok(())
        }
        ActionOutcome::Failed => Err(CliError::Failed(
            error.unwrap_or("Falha na operação").to_string(),
        )),
    }
}

/// Valida e interpreta uma data no formato YYYY-MM-DD
///
/// # Erros
/// - `Validation`: se o formato da data for inválido
pub(crate) fn validate_date(date_str: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::Validation("Data inválida, use AAAA-MM-DD".to_string()))
}

/// Valida e interpreta uma hora no formato HH:MM
///
/// # Erros
/// - `Validation`: se o formato da hora for inválido
pub(crate) fn validate_time(time_str: &str) -> CliResult<NaiveTime> {
    NaiveTime::parse_from_str(time_str.trim(), "%H:%M")
        .map_err(|_| CliError::Validation("Hora inválida, use HH:MM".to_string()))
}

/// Analisador de argumento: data normalizada para o formato da API
pub(crate) fn parse_date(value: &str) -> CliResult<String> {
    validate_date(value).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Analisador de argumento: hora normalizada para o formato da API
pub(crate) fn parse_time(value: &str) -> CliResult<String> {
    validate_time(value).map(|time| time.format("%H:%M").to_string())
}
