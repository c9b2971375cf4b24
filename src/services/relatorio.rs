//! Conjuntos de dados dos relatórios institucionais.

use std::cmp::Ordering;

use crate::data::AppData;
use crate::models::Segmento;

/// Critério de pontuação do ranking
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CriterioRank {
    /// Soma de todas as fases
    #[default]
    Total,
    /// Nota de uma fase específica
    Fase(String),
}

/// Filtros opcionais compartilhados pelos relatórios
#[derive(Debug, Clone, Default)]
pub struct FiltroRelatorio {
    pub turma_id: Option<String>,
    pub segmento: Option<Segmento>,
}

#[derive(Debug, Clone)]
pub struct LinhaRank {
    pub posicao: usize,
    pub participante_id: String,
    pub nome: String,
    pub turma: String,
    pub pontuacao: f64,
}

#[derive(Debug, Clone)]
pub struct MediaTurma {
    pub turma: String,
    pub media: f64,
}

#[derive(Debug, Clone)]
pub struct VolumeOlimpiada {
    pub olimpiada: String,
    pub inscritos: usize,
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

pub struct RelatorioService;

impl RelatorioService {
    /// Ranking de participantes de uma olimpíada, decrescente e estável
    /// (empates preservam a ordem de inscrição). Turma excluída vira "N/A".
    pub fn ranking(
        data: &AppData,
        olimpiada_id: &str,
        filtro: &FiltroRelatorio,
        criterio: &CriterioRank,
        limite: usize,
    ) -> Vec<LinhaRank> {
        let mut linhas: Vec<LinhaRank> = data
            .participantes
            .iter()
            .filter(|p| p.olimpiada_id == olimpiada_id)
            .filter(|p| filtro.turma_id.as_deref().map_or(true, |t| p.turma_id == t))
            .filter(|p| filtro.segmento.map_or(true, |s| p.segmento == s))
            .map(|p| {
                let pontuacao = match criterio {
                    CriterioRank::Total => p.pontuacao_total(),
                    CriterioRank::Fase(fase_id) => p.nota_da_fase(fase_id).unwrap_or(0.0),
                };
                LinhaRank {
                    posicao: 0,
                    participante_id: p.id.clone(),
                    nome: p.nome.clone(),
                    turma: data.nome_turma(&p.turma_id).unwrap_or("N/A").to_string(),
                    pontuacao,
                }
            })
            .collect();

        // sort_by é estável: empates mantêm a ordem original
        linhas.sort_by(|a, b| desc(a.pontuacao, b.pontuacao));
        linhas.truncate(limite);
        for (i, linha) in linhas.iter_mut().enumerate() {
            linha.posicao = i + 1;
        }
        linhas
    }

    /// Média de pontuação por turma em uma olimpíada: soma de todas as
    /// notas lançadas dividida pela quantidade de notas; 0,0 sem notas.
    pub fn medias_por_turma(data: &AppData, olimpiada_id: &str) -> Vec<MediaTurma> {
        let mut medias: Vec<MediaTurma> = data
            .turmas
            .iter()
            .map(|t| {
                let mut soma = 0.0;
                let mut quantidade = 0usize;
                for p in data
                    .participantes
                    .iter()
                    .filter(|p| p.olimpiada_id == olimpiada_id && p.turma_id == t.id)
                {
                    for nota in p.notas.values() {
                        soma += nota;
                        quantidade += 1;
                    }
                }
                MediaTurma {
                    turma: t.nome.clone(),
                    media: if quantidade > 0 {
                        soma / quantidade as f64
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        medias.sort_by(|a, b| desc(a.media, b.media));
        medias
    }

    /// Total de inscritos por olimpíada, decrescente
    pub fn volume_inscricoes(data: &AppData, filtro: &FiltroRelatorio) -> Vec<VolumeOlimpiada> {
        let mut volumes: Vec<VolumeOlimpiada> = data
            .olimpiadas
            .iter()
            .map(|o| {
                let inscritos = data
                    .participantes
                    .iter()
                    .filter(|p| p.olimpiada_id == o.id)
                    .filter(|p| filtro.turma_id.as_deref().map_or(true, |t| p.turma_id == t))
                    .filter(|p| filtro.segmento.map_or(true, |s| p.segmento == s))
                    .count();
                VolumeOlimpiada {
                    olimpiada: o.nome.clone(),
                    inscritos,
                }
            })
            .collect();

        volumes.sort_by(|a, b| b.inscritos.cmp(&a.inscritos));
        volumes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Olimpiada, Participante, Turma};

    fn com_notas(notas: &[(&str, f64)], nome: &str, oid: &str, tid: &str) -> Participante {
        let mut p = Participante::new(oid, tid, format!("e-{}", nome), nome, Segmento::EnsinoMedio, "");
        for (fase, valor) in notas {
            p.definir_nota(fase, Some(*valor));
        }
        p
    }

    fn base() -> (AppData, String, String) {
        let mut data = AppData::default();
        let turma = Turma::new("3ª Série EM", Segmento::EnsinoMedio);
        let tid = turma.id.clone();
        let mut o = Olimpiada::new("OBMEP");
        o.segmentos.push(Segmento::EnsinoMedio);
        let oid = o.id.clone();
        data.turmas.push(turma);
        data.olimpiadas.push(o);
        (data, oid, tid)
    }

    #[test]
    fn test_ranking_decrescente_e_estavel() {
        let (mut data, oid, tid) = base();
        data.participantes
            .push(com_notas(&[("f1", 80.0)], "Primeiro Empatado", &oid, &tid));
        data.participantes
            .push(com_notas(&[("f1", 80.0)], "Segundo Empatado", &oid, &tid));
        data.participantes
            .push(com_notas(&[("f1", 50.0)], "Terceiro", &oid, &tid));
        data.participantes
            .push(com_notas(&[("f1", 30.0)], "Quarto", &oid, &tid));

        let linhas = RelatorioService::ranking(
            &data,
            &oid,
            &FiltroRelatorio::default(),
            &CriterioRank::Total,
            10,
        );

        let nomes: Vec<&str> = linhas.iter().map(|l| l.nome.as_str()).collect();
        assert_eq!(
            nomes,
            ["Primeiro Empatado", "Segundo Empatado", "Terceiro", "Quarto"]
        );
        assert_eq!(linhas[0].posicao, 1);
        assert_eq!(linhas[3].posicao, 4);
    }

    #[test]
    fn test_ranking_por_fase_e_limite() {
        let (mut data, oid, tid) = base();
        data.participantes
            .push(com_notas(&[("f1", 10.0), ("f2", 90.0)], "A", &oid, &tid));
        data.participantes
            .push(com_notas(&[("f1", 50.0)], "B", &oid, &tid));
        data.participantes.push(com_notas(&[], "C", &oid, &tid));

        let linhas = RelatorioService::ranking(
            &data,
            &oid,
            &FiltroRelatorio::default(),
            &CriterioRank::Fase("f1".into()),
            2,
        );
        assert_eq!(linhas.len(), 2);
        assert_eq!(linhas[0].nome, "B");
        assert_eq!(linhas[0].pontuacao, 50.0);
        // Fase sem nota pontua zero
        assert_eq!(linhas[1].nome, "A");
        assert_eq!(linhas[1].pontuacao, 10.0);
    }

    #[test]
    fn test_ranking_turma_excluida_vira_na() {
        let (mut data, oid, tid) = base();
        data.participantes
            .push(com_notas(&[("f1", 10.0)], "A", &oid, &tid));
        data.turmas.clear();

        let linhas = RelatorioService::ranking(
            &data,
            &oid,
            &FiltroRelatorio::default(),
            &CriterioRank::Total,
            10,
        );
        assert_eq!(linhas[0].turma, "N/A");
    }

    #[test]
    fn test_medias_por_turma() {
        let (mut data, oid, tid) = base();
        data.participantes
            .push(com_notas(&[("f1", 10.0), ("f2", 20.0)], "A", &oid, &tid));
        data.participantes
            .push(com_notas(&[("f1", 30.0)], "B", &oid, &tid));

        let turma_vazia = Turma::new("9º Ano B", Segmento::FundamentalAnosFinais);
        data.turmas.push(turma_vazia);

        let medias = RelatorioService::medias_por_turma(&data, &oid);
        assert_eq!(medias.len(), 2);
        // (10 + 20 + 30) / 3 notas
        assert_eq!(medias[0].turma, "3ª Série EM");
        assert!((medias[0].media - 20.0).abs() < f64::EPSILON);
        assert_eq!(medias[1].media, 0.0);
    }

    #[test]
    fn test_volume_inscricoes_com_filtro() {
        let (mut data, oid, tid) = base();
        let mut o2 = Olimpiada::new("OBA");
        o2.segmentos.push(Segmento::FundamentalAnosFinais);
        let oid2 = o2.id.clone();
        data.olimpiadas.push(o2);

        data.participantes
            .push(com_notas(&[], "A", &oid, &tid));
        data.participantes
            .push(com_notas(&[], "B", &oid, &tid));
        data.participantes
            .push(com_notas(&[], "C", &oid2, &tid));

        let volumes = RelatorioService::volume_inscricoes(&data, &FiltroRelatorio::default());
        assert_eq!(volumes[0].olimpiada, "OBMEP");
        assert_eq!(volumes[0].inscritos, 2);
        assert_eq!(volumes[1].inscritos, 1);

        let filtro = FiltroRelatorio {
            turma_id: None,
            segmento: Some(Segmento::FundamentalAnosIniciais),
        };
        let volumes = RelatorioService::volume_inscricoes(&data, &filtro);
        assert!(volumes.iter().all(|v| v.inscritos == 0));
    }
}
