//! # Formatação para exibição
//!
//! Funções puras de apresentação. Nenhuma delas falha: quando a entrada não
//! pode ser interpretada, devolvem o texto original.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Quantidade máxima de dígitos num telefone com DDD
pub const MAX_PHONE_DIGITS: usize = 11;

/// Mantém apenas os dígitos ASCII de `input`
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Formata um telefone já gravado no padrão brasileiro
///
/// | Dígitos | Formato |
/// |---------|---------|
/// | 11 | `(DD) DDDDD-DDDD` |
/// | 10 | `(DD) DDDD-DDDD` |
/// | 9 | `DDDDD-DDDD` |
/// | 8 | `DDDD-DDDD` |
///
/// Qualquer outra quantidade devolve `raw` sem alteração.
///
/// ```
/// use sisreservas::formatters::format_display_phone;
///
/// assert_eq!(format_display_phone("11987654321"), "(11) 98765-4321");
/// assert_eq!(format_display_phone("123"), "123");
/// ```
pub fn format_display_phone(raw: &str) -> String {
    let d = digits_only(raw);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        9 => format!("{}-{}", &d[..5], &d[5..]),
        8 => format!("{}-{}", &d[..4], &d[4..]),
        _ => raw.to_string(),
    }
}

/// Máscara aplicada enquanto o usuário digita um telefone
///
/// Descarta o que não é dígito, limita a 11 dígitos e insere `(`, `) ` e `-`
/// conforme a quantidade digitada até o momento.
pub fn apply_phone_mask(input: &str) -> String {
    let mut d = digits_only(input);
    d.truncate(MAX_PHONE_DIGITS);

    match d.len() {
        0..=2 => d,
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// `YYYY-MM-DD` → `DD/MM/YYYY`
pub fn format_display_date(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => iso_date.to_string(),
    }
}

/// Timestamp ISO → `DD/MM/YYYY, HH:MM:SS`
///
/// Aceita RFC 3339 (com fuso, exibido no próprio fuso) e o formato sem fuso
/// que a API usa em `criadoEm`/`atualizadoEm`.
pub fn format_display_date_time(iso_timestamp: &str) -> String {
    const DISPLAY: &str = "%d/%m/%Y, %H:%M:%S";
    let trimmed = iso_timestamp.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return ts.naive_local().format(DISPLAY).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|ts| ts.format(DISPLAY).to_string())
        .unwrap_or_else(|| iso_timestamp.to_string())
}
