//! # Modelo de domínio
//!
//! Formas trocadas com a API REST. Os nomes dos campos seguem o JSON da API
//! (camelCase no fio, snake_case aqui). Datas e horas trafegam como texto
//! (`YYYY-MM-DD` e `HH:mm`) e só são interpretadas na borda de entrada.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tamanho máximo de `nome` (Cliente e Profissional)
pub const MAX_NOME: usize = 100;
/// Tamanho máximo de `email`
pub const MAX_EMAIL: usize = 100;
/// Tamanho máximo de `telefone` já formatado
pub const MAX_TELEFONE: usize = 15;
/// Tamanho máximo de `especialidade`
pub const MAX_ESPECIALIDADE: usize = 50;
/// Tamanho máximo de `observacoes`
pub const MAX_OBSERVACOES: usize = 500;

/// Cliente do estabelecimento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    /// Atribuído pela API na criação
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub telefone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<String>,
}

/// Profissional que presta o serviço
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profissional {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub especialidade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub ativo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atualizado_em: Option<String>,
}

/// Estado de uma reserva
///
/// Não existe restrição de transição do lado do cliente: qualquer estado é
/// alcançável a partir de qualquer outro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusReserva {
    Pendente,
    Confirmada,
    Cancelada,
    Concluida,
}

impl StatusReserva {
    pub const ALL: [StatusReserva; 4] = [
        StatusReserva::Pendente,
        StatusReserva::Confirmada,
        StatusReserva::Cancelada,
        StatusReserva::Concluida,
    ];

    /// Valor usado no fio e nos parâmetros de consulta
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "PENDENTE",
            Self::Confirmada => "CONFIRMADA",
            Self::Cancelada => "CANCELADA",
            Self::Concluida => "CONCLUIDA",
        }
    }

    /// Rótulo para exibição
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::Confirmada => "Confirmada",
            Self::Cancelada => "Cancelada",
            Self::Concluida => "Concluída",
        }
    }
}

impl fmt::Display for StatusReserva {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Status de reserva desconhecido: '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusReserva {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        StatusReserva::ALL
            .into_iter()
            .find(|status| status.as_str() == upper || status.label().to_uppercase() == upper)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Motivo para um formulário não ser enviado
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Campo '{field}' excede {max} caracteres ({len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("Selecione o cliente e o profissional")]
    MissingSelection,
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), FormError> {
    let len = value.chars().count();
    if len > max {
        return Err(FormError::TooLong { field, max, len });
    }
    Ok(())
}

/// Reserva: liga um Cliente e um Profissional a uma data/hora
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserva {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub cliente: Cliente,
    pub profissional: Profissional,
    /// `YYYY-MM-DD`
    pub data: String,
    /// `HH:mm`
    pub hora: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    pub status: StatusReserva,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atualizado_em: Option<String>,
}

/// Formulário de reserva com referências por id
///
/// `cliente_id`/`profissional_id` valem `0` enquanto nada foi selecionado.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservaForm {
    pub cliente_id: i64,
    pub profissional_id: i64,
    pub data: String,
    pub hora: String,
    pub observacoes: Option<String>,
}

impl ReservaForm {
    /// Projeção de uma reserva existente para edição
    pub fn from_reserva(reserva: &Reserva) -> Self {
        Self {
            cliente_id: reserva.cliente.id.unwrap_or_default(),
            profissional_id: reserva.profissional.id.unwrap_or_default(),
            data: reserva.data.clone(),
            hora: reserva.hora.clone(),
            observacoes: reserva.observacoes.clone(),
        }
    }

    /// `true` quando cliente e profissional foram escolhidos
    pub fn has_selection(&self) -> bool {
        self.cliente_id != 0 && self.profissional_id != 0
    }

    /// Exige cliente e profissional escolhidos e `observacoes` dentro do limite
    pub fn validate(&self) -> Result<(), FormError> {
        if !self.has_selection() {
            return Err(FormError::MissingSelection);
        }
        if let Some(observacoes) = &self.observacoes {
            check_len("observacoes", observacoes, MAX_OBSERVACOES)?;
        }
        Ok(())
    }

    /// Corpo enviado em POST/PUT `/reservas`
    pub fn to_payload(&self) -> ReservaPayload {
        ReservaPayload {
            cliente: EntityRef { id: self.cliente_id },
            profissional: EntityRef { id: self.profissional_id },
            data: self.data.clone(),
            hora: self.hora.clone(),
            observacoes: self.observacoes.clone(),
        }
    }
}

/// Referência a uma entidade existente: `{ "id": n }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Corpo de criação/atualização de reserva; nunca leva `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservaPayload {
    pub cliente: EntityRef,
    pub profissional: EntityRef,
    pub data: String,
    pub hora: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Formulário de cliente; também é o corpo de POST/PUT `/clientes`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClienteForm {
    pub nome: String,
    pub telefone: String,
    pub email: String,
}

impl ClienteForm {
    pub fn validate(&self) -> Result<(), FormError> {
        check_len("nome", &self.nome, MAX_NOME)?;
        check_len("telefone", &self.telefone, MAX_TELEFONE)?;
        check_len("email", &self.email, MAX_EMAIL)
    }
}

impl From<&Cliente> for ClienteForm {
    fn from(cliente: &Cliente) -> Self {
        Self {
            nome: cliente.nome.clone(),
            telefone: cliente.telefone.clone(),
            email: cliente.email.clone(),
        }
    }
}

/// Formulário de profissional; também é o corpo de POST/PUT `/profissionais`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfissionalForm {
    pub nome: String,
    pub especialidade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub ativo: bool,
}

impl Default for ProfissionalForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            especialidade: String::new(),
            telefone: None,
            email: None,
            ativo: true,
        }
    }
}

impl ProfissionalForm {
    pub fn validate(&self) -> Result<(), FormError> {
        check_len("nome", &self.nome, MAX_NOME)?;
        check_len("especialidade", &self.especialidade, MAX_ESPECIALIDADE)?;
        if let Some(telefone) = &self.telefone {
            check_len("telefone", telefone, MAX_TELEFONE)?;
        }
        if let Some(email) = &self.email {
            check_len("email", email, MAX_EMAIL)?;
        }
        Ok(())
    }
}

impl From<&Profissional> for ProfissionalForm {
    fn from(profissional: &Profissional) -> Self {
        Self {
            nome: profissional.nome.clone(),
            especialidade: profissional.especialidade.clone(),
            telefone: profissional.telefone.clone(),
            email: profissional.email.clone(),
            ativo: profissional.ativo,
        }
    }
}
