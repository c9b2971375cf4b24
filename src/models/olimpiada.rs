use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Segmento;
use crate::utils::id::new_id;

/// Situação das inscrições de uma olimpíada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusInscricao {
    #[default]
    Aberta,
    Fechada,
}

impl StatusInscricao {
    pub fn nome(&self) -> &'static str {
        match self {
            StatusInscricao::Aberta => "Aberta",
            StatusInscricao::Fechada => "Fechada",
        }
    }
}

impl fmt::Display for StatusInscricao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nome())
    }
}

/// Fase (etapa) de uma olimpíada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fase {
    pub id: String,
    pub nome: String,
    pub data: Option<NaiveDate>,
}

impl Fase {
    pub fn new(nome: impl Into<String>, data: Option<NaiveDate>) -> Self {
        Self {
            id: new_id(),
            nome: nome.into(),
            data,
        }
    }
}

/// Anotação livre vinculada a uma olimpíada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observacao {
    pub id: String,
    pub texto: String,
    pub data: DateTime<Utc>,
}

/// Olimpíada cadastrada pelo colégio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Olimpiada {
    pub id: String,
    pub nome: String,
    pub site: String,
    pub telefone: String,
    pub email: String,
    /// Credenciais do portal externo; exibição protegida por PIN
    pub login: String,
    pub senha: String,
    pub inicio_inscricao: Option<NaiveDate>,
    pub fim_inscricao: Option<NaiveDate>,
    pub status: StatusInscricao,
    pub custo_escola: f64,
    pub custo_aluno: f64,
    pub segmentos: Vec<Segmento>,
    pub fases: Vec<Fase>,
    pub observacoes: Vec<Observacao>,
}

impl Default for Olimpiada {
    fn default() -> Self {
        Self {
            id: String::new(),
            nome: String::new(),
            site: String::new(),
            telefone: String::new(),
            email: String::new(),
            login: String::new(),
            senha: String::new(),
            inicio_inscricao: None,
            fim_inscricao: None,
            status: StatusInscricao::Aberta,
            custo_escola: 0.0,
            custo_aluno: 0.0,
            segmentos: Vec::new(),
            fases: Vec::new(),
            observacoes: Vec::new(),
        }
    }
}

impl Olimpiada {
    pub fn new(nome: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            nome: nome.into(),
            ..Default::default()
        }
    }

    pub fn inscricoes_abertas(&self) -> bool {
        self.status == StatusInscricao::Aberta
    }

    pub fn atende_segmento(&self, segmento: Segmento) -> bool {
        self.segmentos.contains(&segmento)
    }

    pub fn fase(&self, fase_id: &str) -> Option<&Fase> {
        self.fases.iter().find(|f| f.id == fase_id)
    }

    /// Insere uma anotação no topo da lista (mais recente primeiro)
    pub fn adicionar_observacao(&mut self, texto: impl Into<String>) {
        self.observacoes.insert(
            0,
            Observacao {
                id: new_id(),
                texto: texto.into(),
                data: Utc::now(),
            },
        );
    }

    pub fn remover_observacao(&mut self, obs_id: &str) {
        self.observacoes.retain(|o| o.id != obs_id);
    }

    pub fn validate(&self) -> Result<(), OlimpiadaValidationError> {
        if self.nome.trim().is_empty() {
            return Err(OlimpiadaValidationError::NomeVazio);
        }
        if self.segmentos.is_empty() {
            return Err(OlimpiadaValidationError::SemSegmentos);
        }
        if let (Some(inicio), Some(fim)) = (self.inicio_inscricao, self.fim_inscricao) {
            if fim < inicio {
                return Err(OlimpiadaValidationError::PeriodoInvertido);
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OlimpiadaValidationError {
    #[error("Informe o nome da olimpíada")]
    NomeVazio,
    #[error("Selecione ao menos um segmento")]
    SemSegmentos,
    #[error("O encerramento não pode anteceder o início das inscrições")]
    PeriodoInvertido,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_exige_segmento() {
        let mut o = Olimpiada::new("OBMEP");
        assert!(matches!(
            o.validate(),
            Err(OlimpiadaValidationError::SemSegmentos)
        ));

        o.segmentos.push(Segmento::EnsinoMedio);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn test_validate_periodo() {
        let mut o = Olimpiada::new("OBA");
        o.segmentos.push(Segmento::FundamentalAnosFinais);
        o.inicio_inscricao = NaiveDate::from_ymd_opt(2026, 5, 1);
        o.fim_inscricao = NaiveDate::from_ymd_opt(2026, 4, 1);
        assert!(matches!(
            o.validate(),
            Err(OlimpiadaValidationError::PeriodoInvertido)
        ));
    }

    #[test]
    fn test_observacoes_mais_recente_primeiro() {
        let mut o = Olimpiada::new("OBMEP");
        o.adicionar_observacao("primeira");
        o.adicionar_observacao("segunda");
        assert_eq!(o.observacoes[0].texto, "segunda");
        assert_eq!(o.observacoes[1].texto, "primeira");

        let id = o.observacoes[0].id.clone();
        o.remover_observacao(&id);
        assert_eq!(o.observacoes.len(), 1);
        assert_eq!(o.observacoes[0].texto, "primeira");
    }
}
