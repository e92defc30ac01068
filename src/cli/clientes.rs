//! Comandos de clientes

use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::app::{finish, CliError, CliResult, Context};
use super::output::confirmation;
use crate::controllers::clientes::LOAD_ERROR;
use crate::controllers::ClientesController;

#[derive(Subcommand)]
pub enum ClienteCommands {
    /// Lista os clientes, opcionalmente filtrados por nome ou e-mail
    Listar {
        #[arg(long)]
        filtro: Option<String>,
    },

    /// Busca interativa: cada linha digitada vira o novo filtro
    Buscar,

    /// Cadastra um cliente
    Criar {
        #[arg(long)]
        nome: String,

        /// Só os dígitos são considerados; a máscara é aplicada
        #[arg(long)]
        telefone: String,

        #[arg(long)]
        email: String,
    },

    /// Altera um cliente; campos omitidos ficam como estão
    Editar {
        id: i64,

        #[arg(long)]
        nome: Option<String>,

        #[arg(long)]
        telefone: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Exclui um cliente
    Excluir {
        id: i64,

        /// Não pedir confirmação
        #[arg(long)]
        sim: bool,
    },
}

/// Controlador com a lista completa já carregada
async fn loaded(ctx: &Context) -> CliResult<ClientesController> {
    let controller = ClientesController::from_client(&ctx.client, ctx.config.search_debounce);
    if !controller.load().await.is_applied() {
        return Err(CliError::Failed(LOAD_ERROR.to_string()));
    }
    Ok(controller)
}

pub(crate) async fn run(cmd: ClienteCommands, ctx: &Context) -> CliResult<()> {
    match cmd {
        ClienteCommands::Listar { filtro } => {
            let mut controller =
                ClientesController::from_client(&ctx.client, ctx.config.search_debounce);
            let outcome = controller.apply_filter(filtro.unwrap_or_default()).await;
            let state = controller.snapshot();
            if !outcome.is_applied() {
                return Err(CliError::Failed(
                    state.error.unwrap_or_else(|| LOAD_ERROR.to_string()),
                ));
            }
            ctx.output.clientes(&state.clientes);
            Ok(())
        }

        ClienteCommands::Buscar => interactive_search(ctx, loaded(ctx).await?).await,

        ClienteCommands::Criar {
            nome,
            telefone,
            email,
        } => {
            let controller = loaded(ctx).await?;
            controller.begin_create();
            controller.edit_form(|form| {
                form.nome = nome;
                form.email = email;
            });
            controller.set_telefone(&telefone);

            let outcome = controller.submit().await;
            finish(ctx, outcome, controller.snapshot().error.as_deref(), "Cliente cadastrado.")
        }

        ClienteCommands::Editar {
            id,
            nome,
            telefone,
            email,
        } => {
            let controller = loaded(ctx).await?;
            let cliente = controller
                .snapshot()
                .clientes
                .into_iter()
                .find(|c| c.id == Some(id))
                .ok_or(CliError::NotFound {
                    entity: "Cliente",
                    id,
                })?;

            controller.begin_edit(&cliente);
            controller.edit_form(|form| {
                if let Some(nome) = nome {
                    form.nome = nome;
                }
                if let Some(email) = email {
                    form.email = email;
                }
            });
            if let Some(telefone) = telefone {
                controller.set_telefone(&telefone);
            }

            let outcome = controller.submit().await;
            finish(ctx, outcome, controller.snapshot().error.as_deref(), "Cliente atualizado.")
        }

        ClienteCommands::Excluir { id, sim } => {
            let controller = loaded(ctx).await?;
            let outcome = controller.delete(id, confirmation(sim).as_ref()).await;
            finish(ctx, outcome, controller.snapshot().error.as_deref(), "Cliente excluído.")
        }
    }
}

/// Lê filtros da entrada padrão e reimprime a lista a cada atualização
///
/// Termina no fim da entrada, depois que o último filtro digitado tiver
/// resposta, mesmo que a requisição já estivesse em voo.
async fn interactive_search(ctx: &Context, mut controller: ClientesController) -> CliResult<()> {
    ctx.output.clientes(&controller.snapshot().clientes);
    eprintln!("Digite o filtro (nome ou e-mail); linha vazia lista todos. Ctrl+D encerra.");

    let mut revision = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(filtro) => controller.set_filter(filtro),
                None => break,
            },
            changed = revision.changed() => {
                if changed.is_err() {
                    break;
                }
                render(ctx, &controller);
            }
        }
    }

    let mut stale = false;
    while controller.is_searching() {
        if revision.changed().await.is_err() {
            break;
        }
        stale = true;
    }
    if stale || revision.has_changed().unwrap_or(false) {
        render(ctx, &controller);
    }
    Ok(())
}

fn render(ctx: &Context, controller: &ClientesController) {
    let state = controller.snapshot();
    match state.error {
        Some(message) => ctx.output.error(&message),
        None => ctx.output.clientes(&state.clientes),
    }
}
