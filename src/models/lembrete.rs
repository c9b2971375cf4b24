use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::id::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Importancia {
    Baixa,
    #[default]
    Media,
    Alta,
}

impl Importancia {
    pub const TODAS: [Importancia; 3] =
        [Importancia::Baixa, Importancia::Media, Importancia::Alta];

    pub fn nome(&self) -> &'static str {
        match self {
            Importancia::Baixa => "Baixa",
            Importancia::Media => "Média",
            Importancia::Alta => "Alta",
        }
    }
}

impl fmt::Display for Importancia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nome())
    }
}

/// Lembrete agendado pela equipe.
///
/// `notificado` marca que o alerta em tela já foi disparado;
/// `visualizado` só muda quando o usuário dá ciência na lista.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lembrete {
    pub id: String,
    pub titulo: String,
    pub descricao: String,
    pub importancia: Importancia,
    pub data_hora: NaiveDateTime,
    pub visualizado: bool,
    pub notificado: bool,
}

impl Lembrete {
    pub fn new(
        titulo: impl Into<String>,
        descricao: impl Into<String>,
        importancia: Importancia,
        data_hora: NaiveDateTime,
    ) -> Self {
        Self {
            id: new_id(),
            titulo: titulo.into(),
            descricao: descricao.into(),
            importancia,
            data_hora,
            visualizado: false,
            notificado: false,
        }
    }

    pub fn vencido(&self, agora: NaiveDateTime) -> bool {
        self.data_hora <= agora
    }

    /// Conta para o selo de não lidos, independente de já ter sido alertado
    pub fn nao_lido(&self, agora: NaiveDateTime) -> bool {
        self.vencido(agora) && !self.visualizado
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn em(dia: u32, hora: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, dia)
            .unwrap()
            .and_hms_opt(hora, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_nao_lido_ignora_notificado() {
        let mut l = Lembrete::new("Prova OBMEP", "", Importancia::Alta, em(10, 8));
        let agora = em(10, 9);

        assert!(l.nao_lido(agora));

        // Alerta disparado, mas sem ciência: continua não lido
        l.notificado = true;
        assert!(l.nao_lido(agora));

        l.visualizado = true;
        assert!(!l.nao_lido(agora));
    }

    #[test]
    fn test_futuro_nao_conta() {
        let l = Lembrete::new("Inscrição OBA", "", Importancia::Baixa, em(20, 8));
        assert!(!l.nao_lido(em(10, 8)));
    }
}
