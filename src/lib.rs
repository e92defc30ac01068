//! # SisReservas
//!
//! Cliente da API REST do SisReservas: gestão de clientes, profissionais e
//! reservas de atendimento.
//!
//! ## Módulos principais
//!
//! - [`models`] - Formas trocadas com a API (Cliente, Profissional, Reserva)
//! - [`formatters`] - Telefone, data e data/hora para exibição
//! - [`api`] - Cliente HTTP e serviços tipados por entidade
//! - [`controllers`] - Estado e regras de cada tela
//! - [`config`] - Origem da API e intervalo de debounce
//! - [`cli`] - Comandos do binário `sisreservas`
//!
//! ## Fluxo
//!
//! ```text
//! CLI (clap)
//!     ↓
//! Controladores (estado explícito, recarga após cada mutação)
//!     ↓ ClienteApi / ProfissionalApi / ReservaApi
//! ApiClient (reqwest)
//!     ↓ HTTP/JSON
//! API REST externa
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod controllers;
pub mod formatters;
pub mod models;
