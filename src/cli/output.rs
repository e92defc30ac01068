//! Saída dos comandos: tabelas de texto ou JSON

use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::controllers::Confirmation;
use crate::formatters::{format_display_date, format_display_date_time, format_display_phone};
use crate::models::{Cliente, Profissional, Reserva};

/// Formato de saída
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => println!("{}", serde_json::json!({ "success": true, "message": message })),
        }
    }

    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Erro: {}", message),
            OutputFormat::Json => eprintln!("{}", serde_json::json!({ "success": false, "error": message })),
        }
    }

    fn json<T: Serialize + ?Sized>(&self, data: &T) {
        match serde_json::to_string_pretty(data) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
        }
    }

    pub fn reservas(&self, reservas: &[&Reserva]) {
        if self.is_json() {
            return self.json(reservas);
        }
        if reservas.is_empty() {
            println!("Nenhuma reserva encontrada.");
            return;
        }

        let rows = reservas
            .iter()
            .map(|r| {
                vec![
                    id_cell(r.id),
                    r.cliente.nome.clone(),
                    r.profissional.nome.clone(),
                    format_display_date(&r.data),
                    r.hora.clone(),
                    r.status.label().to_string(),
                    r.observacoes.clone().unwrap_or_default(),
                ]
            })
            .collect::<Vec<_>>();
        print_table(
            &["ID", "Cliente", "Profissional", "Data", "Hora", "Status", "Observações"],
            &rows,
        );
    }

    pub fn clientes(&self, clientes: &[Cliente]) {
        if self.is_json() {
            return self.json(clientes);
        }
        if clientes.is_empty() {
            println!("Nenhum cliente encontrado.");
            return;
        }

        let rows = clientes
            .iter()
            .map(|c| {
                vec![
                    id_cell(c.id),
                    c.nome.clone(),
                    format_display_phone(&c.telefone),
                    c.email.clone(),
                    c.criado_em.as_deref().map(format_display_date_time).unwrap_or_default(),
                ]
            })
            .collect::<Vec<_>>();
        print_table(&["ID", "Nome", "Telefone", "E-mail", "Cadastro"], &rows);
    }

    pub fn profissionais(&self, profissionais: &[&Profissional]) {
        if self.is_json() {
            return self.json(profissionais);
        }
        if profissionais.is_empty() {
            println!("Nenhum profissional encontrado.");
            return;
        }

        let rows = profissionais
            .iter()
            .map(|p| {
                vec![
                    id_cell(p.id),
                    p.nome.clone(),
                    p.especialidade.clone(),
                    p.telefone.as_deref().map(format_display_phone).unwrap_or_default(),
                    p.email.clone().unwrap_or_default(),
                    if p.ativo { "Ativo" } else { "Inativo" }.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        print_table(
            &["ID", "Nome", "Especialidade", "Telefone", "E-mail", "Situação"],
            &rows,
        );
    }
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    out.push_str(&render_line(headers.iter().copied(), &widths));
    out.push('\n');
    out.push_str(&render_line(rule.iter().map(String::as_str), &widths));
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// Confirmação lida da entrada padrão; só `s`/`sim` confirmam
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [s/N] ", message);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "sim")
}

/// Confirmação interativa, ou aceite automático com `--sim`
pub fn confirmation(assume_yes: bool) -> Box<dyn Confirmation> {
    if assume_yes {
        Box::new(|_: &str| true)
    } else {
        Box::new(StdinConfirmation)
    }
}
