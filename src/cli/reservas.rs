//! Comandos de reservas

use clap::Subcommand;

use super::app::{finish, parse_date, parse_time, CliError, CliResult, Context};
use super::output::confirmation;
use crate::api::middleware::ErrorLogExt;
use crate::api::ReservaApi;
use crate::controllers::reservas::LOAD_ERROR;
use crate::controllers::{ReservasController, StatusFilter};
use crate::models::StatusReserva;

#[derive(Subcommand)]
pub enum ReservaCommands {
    /// Lista as reservas
    Listar {
        /// TODAS, PENDENTE, CONFIRMADA, CANCELADA ou CONCLUIDA
        #[arg(long, short, default_value = "TODAS")]
        status: StatusFilter,
    },

    /// Cria uma reserva (sempre como PENDENTE)
    Criar {
        /// ID do cliente
        #[arg(long)]
        cliente: i64,

        /// ID do profissional
        #[arg(long)]
        profissional: i64,

        /// Data (AAAA-MM-DD)
        #[arg(long, value_parser = parse_date)]
        data: String,

        /// Hora (HH:MM)
        #[arg(long, value_parser = parse_time)]
        hora: String,

        #[arg(long)]
        observacoes: Option<String>,
    },

    /// Altera uma reserva; campos omitidos ficam como estão
    Editar {
        id: i64,

        #[arg(long)]
        cliente: Option<i64>,

        #[arg(long)]
        profissional: Option<i64>,

        #[arg(long, value_parser = parse_date)]
        data: Option<String>,

        #[arg(long, value_parser = parse_time)]
        hora: Option<String>,

        #[arg(long)]
        observacoes: Option<String>,
    },

    /// Troca o status de uma reserva
    Status {
        id: i64,

        /// Novo status
        status: StatusReserva,
    },

    /// Exclui uma reserva
    Excluir {
        id: i64,

        /// Não pedir confirmação
        #[arg(long)]
        sim: bool,
    },

    /// Consulta direta na API por cliente, profissional, data ou status
    #[command(group(clap::ArgGroup::new("criterio").required(true)))]
    Consultar {
        #[arg(long, group = "criterio")]
        cliente: Option<i64>,

        #[arg(long, group = "criterio")]
        profissional: Option<i64>,

        #[arg(long, group = "criterio", value_parser = parse_date)]
        data: Option<String>,

        #[arg(long, group = "criterio")]
        status: Option<StatusReserva>,
    },

    /// Reservas entre duas datas, inclusive
    Periodo {
        #[arg(value_parser = parse_date)]
        inicio: String,

        #[arg(value_parser = parse_date)]
        fim: String,
    },
}

/// Controlador com as três listas já carregadas
async fn loaded(ctx: &Context) -> CliResult<ReservasController> {
    let mut controller = ReservasController::from_client(&ctx.client);
    if !controller.load().await.is_applied() {
        return Err(CliError::Failed(LOAD_ERROR.to_string()));
    }
    Ok(controller)
}

pub(crate) async fn run(cmd: ReservaCommands, ctx: &Context) -> CliResult<()> {
    match cmd {
        ReservaCommands::Listar { status } => {
            let mut controller = loaded(ctx).await?;
            controller.set_status_filter(status);
            ctx.output.reservas(&controller.visible());
            Ok(())
        }

        ReservaCommands::Criar {
            cliente,
            profissional,
            data,
            hora,
            observacoes,
        } => {
            let mut controller = loaded(ctx).await?;
            controller.begin_create();
            let form = controller.form_mut();
            form.cliente_id = cliente;
            form.profissional_id = profissional;
            form.data = data;
            form.hora = hora;
            form.observacoes = observacoes.filter(|o| !o.trim().is_empty());

            let outcome = controller.submit().await;
            finish(ctx, outcome, controller.state().error.as_deref(), "Reserva criada.")
        }

        ReservaCommands::Editar {
            id,
            cliente,
            profissional,
            data,
            hora,
            observacoes,
        } => {
            let mut controller = loaded(ctx).await?;
            let reserva = controller
                .state()
                .reservas
                .iter()
                .find(|r| r.id == Some(id))
                .cloned()
                .ok_or(CliError::NotFound {
                    entity: "Reserva",
                    id,
                })?;

            controller.begin_edit(&reserva);
            let form = controller.form_mut();
            if let Some(cliente) = cliente {
                form.cliente_id = cliente;
            }
            if let Some(profissional) = profissional {
                form.profissional_id = profissional;
            }
            if let Some(data) = data {
                form.data = data;
            }
            if let Some(hora) = hora {
                form.hora = hora;
            }
            if let Some(observacoes) = observacoes {
                form.observacoes = Some(observacoes).filter(|o| !o.trim().is_empty());
            }

            let outcome = controller.submit().await;
            finish(ctx, outcome, controller.state().error.as_deref(), "Reserva atualizada.")
        }

        ReservaCommands::Status { id, status } => {
            let mut controller = loaded(ctx).await?;
            let outcome = controller.change_status(id, status).await;
            finish(
                ctx,
                outcome,
                controller.state().error.as_deref(),
                &format!("Status alterado para {}.", status.label()),
            )
        }

        ReservaCommands::Excluir { id, sim } => {
            let mut controller = loaded(ctx).await?;
            let outcome = controller.delete(id, confirmation(sim).as_ref()).await;
            finish(ctx, outcome, controller.state().error.as_deref(), "Reserva excluída.")
        }

        ReservaCommands::Consultar {
            cliente,
            profissional,
            data,
            status,
        } => {
            let query = match (cliente, profissional, data, status) {
                (Some(id), ..) => Query::Cliente(id),
                (_, Some(id), ..) => Query::Profissional(id),
                (_, _, Some(data), _) => Query::Data(data),
                (_, _, _, Some(status)) => Query::Status(status),
                _ => {
                    return Err(CliError::Validation(
                        "Informe --cliente, --profissional, --data ou --status".to_string(),
                    ))
                }
            };
            query_api(ctx, query).await
        }

        ReservaCommands::Periodo { inicio, fim } => {
            query_api(ctx, Query::Periodo { inicio, fim }).await
        }
    }
}

/// Consultas que vão direto ao serviço, sem passar pelo controlador
enum Query {
    Cliente(i64),
    Profissional(i64),
    Data(String),
    Status(StatusReserva),
    Periodo { inicio: String, fim: String },
}

async fn query_api(ctx: &Context, query: Query) -> CliResult<()> {
    let service = ctx.client.reservas();
    let result = match &query {
        Query::Cliente(id) => service.list_by_cliente(*id).await,
        Query::Profissional(id) => service.list_by_profissional(*id).await,
        Query::Data(data) => service.list_by_date(data).await,
        Query::Status(status) => service.list_by_status(*status).await,
        Query::Periodo { inicio, fim } => service.list_by_period(inicio, fim).await,
    };

    let reservas = result
        .log_error_context(LOAD_ERROR)
        .map_err(|_| CliError::Failed(LOAD_ERROR.to_string()))?;

    ctx.output.reservas(&reservas.iter().collect::<Vec<_>>());
    Ok(())
}
