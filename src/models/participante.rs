use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Segmento;
use crate::utils::id::new_id;

/// Inscrição de um estudante em uma olimpíada.
///
/// Nome e segmento são copiados da turma no momento da inscrição e
/// permanecem válidos mesmo que a turma seja excluída depois.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participante {
    pub id: String,
    pub olimpiada_id: String,
    pub turma_id: String,
    pub estudante_id: String,
    pub nome: String,
    pub segmento: Segmento,
    pub email: String,
    pub data_inclusao: DateTime<Utc>,
    /// Notas por fase; ausência significa fase sem nota lançada
    pub notas: BTreeMap<String, f64>,
}

impl Participante {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        olimpiada_id: impl Into<String>,
        turma_id: impl Into<String>,
        estudante_id: impl Into<String>,
        nome: impl Into<String>,
        segmento: Segmento,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            olimpiada_id: olimpiada_id.into(),
            turma_id: turma_id.into(),
            estudante_id: estudante_id.into(),
            nome: nome.into(),
            segmento,
            email: email.into(),
            data_inclusao: Utc::now(),
            notas: BTreeMap::new(),
        }
    }

    pub fn nota_da_fase(&self, fase_id: &str) -> Option<f64> {
        self.notas.get(fase_id).copied()
    }

    pub fn tem_nota(&self, fase_id: &str) -> bool {
        self.notas.contains_key(fase_id)
    }

    /// Lança ou limpa a nota de uma fase
    pub fn definir_nota(&mut self, fase_id: &str, valor: Option<f64>) {
        match valor {
            Some(v) => {
                self.notas.insert(fase_id.to_string(), v);
            }
            None => {
                self.notas.remove(fase_id);
            }
        }
    }

    /// Soma de todas as notas lançadas
    pub fn pontuacao_total(&self) -> f64 {
        self.notas.values().sum()
    }

    /// Média das notas lançadas; None se nenhuma fase foi avaliada
    pub fn media_geral(&self) -> Option<f64> {
        if self.notas.is_empty() {
            return None;
        }
        Some(self.pontuacao_total() / self.notas.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participante() -> Participante {
        Participante::new("oli1", "t1", "e1", "Ana Souza", Segmento::EnsinoMedio, "ana@ex.br")
    }

    #[test]
    fn test_definir_e_limpar_nota() {
        let mut p = participante();
        p.definir_nota("f1", Some(80.0));
        p.definir_nota("f2", Some(60.0));
        assert_eq!(p.nota_da_fase("f1"), Some(80.0));
        assert_eq!(p.pontuacao_total(), 140.0);

        p.definir_nota("f1", None);
        assert!(!p.tem_nota("f1"));
        assert_eq!(p.pontuacao_total(), 60.0);
    }

    #[test]
    fn test_media_geral() {
        let mut p = participante();
        assert_eq!(p.media_geral(), None);

        p.definir_nota("f1", Some(10.0));
        p.definir_nota("f2", Some(20.0));
        assert_eq!(p.media_geral(), Some(15.0));
    }
}
