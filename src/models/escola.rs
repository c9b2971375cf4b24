use serde::{Deserialize, Serialize};
use std::fmt;

/// Segmentos de ensino atendidos pelo programa
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segmento {
    #[serde(rename = "Fundamental Anos Iniciais")]
    FundamentalAnosIniciais,
    #[serde(rename = "Fundamental Anos Finais")]
    FundamentalAnosFinais,
    #[serde(rename = "Ensino Médio")]
    EnsinoMedio,
}

impl Segmento {
    pub const TODOS: [Segmento; 3] = [
        Segmento::FundamentalAnosIniciais,
        Segmento::FundamentalAnosFinais,
        Segmento::EnsinoMedio,
    ];

    pub fn nome(&self) -> &'static str {
        match self {
            Segmento::FundamentalAnosIniciais => "Fundamental Anos Iniciais",
            Segmento::FundamentalAnosFinais => "Fundamental Anos Finais",
            Segmento::EnsinoMedio => "Ensino Médio",
        }
    }

    /// Sigla curta para tabelas e etiquetas
    pub fn sigla(&self) -> &'static str {
        match self {
            Segmento::FundamentalAnosIniciais => "FAI",
            Segmento::FundamentalAnosFinais => "FAF",
            Segmento::EnsinoMedio => "EM",
        }
    }
}

impl fmt::Display for Segmento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nome())
    }
}

/// Dados cadastrais do colégio (registro único)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscolaInfo {
    pub nome: String,
    pub cnpj: String,
    pub inep: String,
    pub segmentos_ativos: Vec<Segmento>,
}

impl EscolaInfo {
    /// O colégio já passou pela configuração inicial?
    pub fn configurada(&self) -> bool {
        !self.nome.trim().is_empty() && !self.segmentos_ativos.is_empty()
    }

    pub fn validate(&self) -> Result<(), EscolaValidationError> {
        if self.nome.trim().is_empty() {
            return Err(EscolaValidationError::NomeVazio);
        }
        if self.cnpj.trim().is_empty() {
            return Err(EscolaValidationError::CnpjVazio);
        }
        if self.inep.trim().is_empty() {
            return Err(EscolaValidationError::InepVazio);
        }
        if self.segmentos_ativos.is_empty() {
            return Err(EscolaValidationError::SemSegmentos);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EscolaValidationError {
    #[error("Informe o nome do colégio")]
    NomeVazio,
    #[error("Informe o CNPJ")]
    CnpjVazio,
    #[error("Informe o código INEP")]
    InepVazio,
    #[error("Selecione ao menos um segmento ativo")]
    SemSegmentos,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segmento_serde_usa_nome_completo() {
        let json = serde_json::to_string(&Segmento::EnsinoMedio).unwrap();
        assert_eq!(json, "\"Ensino Médio\"");

        let de: Segmento = serde_json::from_str("\"Fundamental Anos Iniciais\"").unwrap();
        assert_eq!(de, Segmento::FundamentalAnosIniciais);
    }

    #[test]
    fn test_escola_validate() {
        let mut escola = EscolaInfo {
            nome: "Colégio Univap".into(),
            cnpj: "00.000.000/0001-00".into(),
            inep: "12345678".into(),
            segmentos_ativos: vec![Segmento::EnsinoMedio],
        };
        assert!(escola.validate().is_ok());
        assert!(escola.configurada());

        escola.segmentos_ativos.clear();
        assert!(matches!(
            escola.validate(),
            Err(EscolaValidationError::SemSegmentos)
        ));
        assert!(!escola.configurada());
    }
}
