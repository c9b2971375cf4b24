use serde::{Deserialize, Serialize};

use super::Segmento;
use crate::utils::id::new_id;

/// Estudante matriculado em uma turma
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estudante {
    pub id: String,
    pub nome: String,
}

impl Estudante {
    pub fn new(nome: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            nome: nome.into(),
        }
    }
}

/// Turma do colégio, sempre vinculada a um segmento
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turma {
    pub id: String,
    pub nome: String,
    pub segmento: Segmento,
    pub estudantes: Vec<Estudante>,
}

impl Turma {
    pub fn new(nome: impl Into<String>, segmento: Segmento) -> Self {
        Self {
            id: new_id(),
            nome: nome.into(),
            segmento,
            estudantes: Vec::new(),
        }
    }

    pub fn estudante(&self, estudante_id: &str) -> Option<&Estudante> {
        self.estudantes.iter().find(|e| e.id == estudante_id)
    }

    /// Adiciona vários estudantes de uma vez (um nome por linha)
    pub fn adicionar_em_lote(&mut self, lista: &str) -> usize {
        let mut adicionados = 0;
        for linha in lista.lines() {
            let nome = linha.trim();
            if nome.is_empty() {
                continue;
            }
            self.estudantes.push(Estudante::new(nome));
            adicionados += 1;
        }
        adicionados
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adicionar_em_lote_ignora_linhas_vazias() {
        let mut turma = Turma::new("9º Ano A", Segmento::FundamentalAnosFinais);
        let n = turma.adicionar_em_lote("Ana Souza\n\n  \nBruno Lima\n  Carla Dias  ");
        assert_eq!(n, 3);
        assert_eq!(turma.estudantes.len(), 3);
        assert_eq!(turma.estudantes[2].nome, "Carla Dias");
    }
}
