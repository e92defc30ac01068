//! # Interface de linha de comando
//!
//! Cada grupo de comandos conduz o controlador da tela correspondente e
//! imprime o estado resultante.
//!
//! | Grupo | Comandos |
//! |-------|----------|
//! | `reservas` | `listar`, `criar`, `editar`, `status`, `excluir`, `consultar`, `periodo` |
//! | `clientes` | `listar`, `buscar`, `criar`, `editar`, `excluir` |
//! | `profissionais` | `listar`, `criar`, `editar`, `alternar`, `excluir` |
//!
//! Todos aceitam `--api-url` (ou `SISRESERVAS_API_URL`) e `--format json`.
//! Datas e horas são validadas antes de chegar ao controlador. O código de
//! saída é diferente de zero quando a ação falha.

mod app;
mod clientes;
mod output;
mod profissionais;
mod reservas;

pub use app::{run, Cli, CliError, Commands};
pub use output::{Output, OutputFormat, StdinConfirmation};
