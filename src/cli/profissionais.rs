//! Comandos de profissionais

use clap::Subcommand;

use super::app::{finish, CliError, CliResult, Context};
use super::output::confirmation;
use crate::controllers::profissionais::LOAD_ERROR;
use crate::controllers::{AtivoFilter, ProfissionaisController};
use crate::formatters::apply_phone_mask;
use crate::models::ProfissionalForm;

#[derive(Subcommand)]
pub enum ProfissionalCommands {
    /// Lista os profissionais
    Listar {
        /// Somente ativos
        #[arg(long, conflicts_with = "inativos")]
        ativos: bool,

        /// Somente inativos
        #[arg(long)]
        inativos: bool,
    },

    /// Cadastra um profissional (ativo, salvo `--inativo`)
    Criar {
        #[arg(long)]
        nome: String,

        #[arg(long)]
        especialidade: String,

        #[arg(long)]
        telefone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        inativo: bool,
    },

    /// Altera um profissional; campos omitidos ficam como estão
    Editar {
        id: i64,

        #[arg(long)]
        nome: Option<String>,

        #[arg(long)]
        especialidade: Option<String>,

        #[arg(long)]
        telefone: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Ativa um profissional inativo, ou desativa um ativo
    Alternar { id: i64 },

    /// Exclui um profissional
    Excluir {
        id: i64,

        /// Não pedir confirmação
        #[arg(long)]
        sim: bool,
    },
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn loaded(ctx: &Context) -> CliResult<ProfissionaisController> {
    let mut controller = ProfissionaisController::from_client(&ctx.client);
    if !controller.load().await.is_applied() {
        return Err(CliError::Failed(LOAD_ERROR.to_string()));
    }
    Ok(controller)
}

pub(crate) async fn run(cmd: ProfissionalCommands, ctx: &Context) -> CliResult<()> {
    let mut controller = loaded(ctx).await?;

    match cmd {
        ProfissionalCommands::Listar { ativos, inativos } => {
            controller.set_filter(match (ativos, inativos) {
                (true, _) => AtivoFilter::Ativos,
                (_, true) => AtivoFilter::Inativos,
                _ => AtivoFilter::Todos,
            });
            ctx.output.profissionais(&controller.visible());
            Ok(())
        }

        ProfissionalCommands::Criar {
            nome,
            especialidade,
            telefone,
            email,
            inativo,
        } => {
            controller.begin_create();
            *controller.form_mut() = ProfissionalForm {
                nome,
                especialidade,
                telefone: optional(telefone).map(|t| apply_phone_mask(&t)),
                email: optional(email),
                ativo: !inativo,
            };

            let outcome = controller.submit().await;
            finish(ctx, outcome, controller.state().error.as_deref(), "Profissional cadastrado.")
        }

        ProfissionalCommands::Editar {
            id,
            nome,
            especialidade,
            telefone,
            email,
        } => {
            let profissional = controller
                .state()
                .profissionais
                .iter()
                .find(|p| p.id == Some(id))
                .cloned()
                .ok_or(CliError::NotFound {
                    entity: "Profissional",
                    id,
                })?;

            controller.begin_edit(&profissional);
            let form = controller.form_mut();
            if let Some(nome) = nome {
                form.nome = nome;
            }
            if let Some(especialidade) = especialidade {
                form.especialidade = especialidade;
            }
            if let Some(telefone) = telefone {
                form.telefone = optional(Some(telefone)).map(|t| apply_phone_mask(&t));
            }
            if let Some(email) = email {
                form.email = optional(Some(email));
            }

            let outcome = controller.submit().await;
            finish(ctx, outcome, controller.state().error.as_deref(), "Profissional atualizado.")
        }

        ProfissionalCommands::Alternar { id } => {
            let ativo = controller
                .state()
                .profissionais
                .iter()
                .find(|p| p.id == Some(id))
                .map(|p| p.ativo)
                .ok_or(CliError::NotFound {
                    entity: "Profissional",
                    id,
                })?;

            let outcome = controller.toggle_active(id, ativo).await;
            let message = if ativo {
                "Profissional desativado."
            } else {
                "Profissional ativado."
            };
            finish(ctx, outcome, controller.state().error.as_deref(), message)
        }

        ProfissionalCommands::Excluir { id, sim } => {
            let outcome = controller.delete(id, confirmation(sim).as_ref()).await;
            finish(ctx, outcome, controller.state().error.as_deref(), "Profissional excluído.")
        }
    }
}
