//! Geração dos relatórios em PDF e exportação da base em JSON.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data::AppData;
use crate::models::{EscolaInfo, Lembrete, Olimpiada, Participante, Turma, Usuario};
use crate::services::relatorio::{LinhaRank, MediaTurma, VolumeOlimpiada};
use crate::utils::date::format_date;

const RODAPE: &str = "Este documento é propriedade do Colégio Univap - Oficina Sapiens";

/// Tipo de relatório institucional
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoRelatorio {
    Ranking,
    Volume,
    Medias,
}

impl TipoRelatorio {
    pub fn display_name(&self) -> &'static str {
        match self {
            TipoRelatorio::Ranking => "Ranking de Participantes",
            TipoRelatorio::Volume => "Relatório Global de Inscrições",
            TipoRelatorio::Medias => "Desempenho por Turma",
        }
    }

    pub fn filename_prefix(&self) -> &'static str {
        match self {
            TipoRelatorio::Ranking => "ranking",
            TipoRelatorio::Volume => "inscricoes",
            TipoRelatorio::Medias => "desempenho",
        }
    }
}

/// Retrato completo da base para o arquivo de exportação
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BaseExport<'a> {
    exportado_em: String,
    escola: &'a EscolaInfo,
    olimpiadas: &'a [Olimpiada],
    turmas: &'a [Turma],
    participantes: &'a [Participante],
    lembretes: &'a [Lembrete],
    usuarios: &'a [Usuario],
}

/// Resultado de uma exportação concluída
#[derive(Debug)]
pub struct ExportResult {
    pub descricao: &'static str,
    pub row_count: usize,
    pub file_size: usize,
}

impl ExportResult {
    pub fn summary(&self) -> String {
        format!(
            "{} exportado: {} linhas, {} bytes",
            self.descricao, self.row_count, self.file_size
        )
    }
}

/// Cursor de escrita em uma página A4; abre páginas novas quando o
/// conteúdo chega perto do rodapé.
struct CursorPdf {
    layer: PdfLayerReference,
    y: Mm,
}

impl CursorPdf {
    fn nova_pagina(doc: &PdfDocumentReference, font: &IndirectFontRef) -> Self {
        let (page, layer) = doc.add_page(Mm(210.0), Mm(297.0), "Conteúdo");
        let layer = doc.get_page(page).get_layer(layer);
        layer.use_text(RODAPE, 7.0, Mm(20.0), Mm(12.0), font);
        Self {
            layer,
            y: Mm(280.0),
        }
    }

    fn avancar(&mut self, altura: Mm) {
        self.y = self.y - altura;
    }

    fn precisa_de_pagina(&self) -> bool {
        self.y < Mm(20.0)
    }
}

pub struct ExportService;

impl ExportService {
    /// Nome de arquivo com carimbo de data/hora
    pub fn generate_filename(tipo: TipoRelatorio) -> String {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        format!("sapiens_{}_{}.pdf", tipo.filename_prefix(), timestamp)
    }

    pub fn json_filename() -> String {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        format!("sapiens_base_{}.json", timestamp)
    }

    /// Exporta a base inteira como JSON legível
    pub fn exportar_base_json(data: &AppData, path: &Path) -> Result<ExportResult> {
        let export = BaseExport {
            exportado_em: Utc::now().to_rfc3339(),
            escola: &data.escola,
            olimpiadas: &data.olimpiadas,
            turmas: &data.turmas,
            participantes: &data.participantes,
            lembretes: &data.lembretes,
            usuarios: &data.usuarios,
        };

        let conteudo =
            serde_json::to_string_pretty(&export).context("Falha ao serializar a base")?;
        std::fs::write(path, &conteudo).context("Falha ao gravar o arquivo")?;

        tracing::info!("Base exportada para {:?}", path);
        Ok(ExportResult {
            descricao: "Base de dados",
            row_count: data.olimpiadas.len() + data.turmas.len() + data.participantes.len(),
            file_size: conteudo.len(),
        })
    }

    /// Ranking em PDF: Pos / Aluno / Turma / Pontuação
    pub fn exportar_ranking_pdf(
        path: &Path,
        nome_olimpiada: &str,
        linhas: &[LinhaRank],
    ) -> Result<ExportResult> {
        let titulo = format!("Ranking de Participantes - {}", nome_olimpiada);
        Self::exportar_tabela_pdf(
            path,
            TipoRelatorio::Ranking,
            &titulo,
            &["Pos", "Nome do Aluno", "Turma", "Pontuação"],
            &[Mm(20.0), Mm(40.0), Mm(120.0), Mm(165.0)],
            linhas.iter().map(|l| {
                vec![
                    format!("{}º", l.posicao),
                    l.nome.clone(),
                    l.turma.clone(),
                    format!("{:.2}", l.pontuacao),
                ]
            }),
        )
    }

    /// Volume de inscrições em PDF: Olimpíada / Total de Inscritos
    pub fn exportar_volume_pdf(path: &Path, volumes: &[VolumeOlimpiada]) -> Result<ExportResult> {
        Self::exportar_tabela_pdf(
            path,
            TipoRelatorio::Volume,
            "Relatório Global de Inscrições",
            &["Nome da Olimpíada", "Total de Inscritos"],
            &[Mm(20.0), Mm(150.0)],
            volumes
                .iter()
                .map(|v| vec![v.olimpiada.clone(), format!("{} alunos", v.inscritos)]),
        )
    }

    /// Médias por turma em PDF: Turma / Média de Pontuação
    pub fn exportar_medias_pdf(
        path: &Path,
        nome_olimpiada: &str,
        medias: &[MediaTurma],
    ) -> Result<ExportResult> {
        let titulo = format!("Desempenho por Turma - {}", nome_olimpiada);
        Self::exportar_tabela_pdf(
            path,
            TipoRelatorio::Medias,
            &titulo,
            &["Identificação da Turma", "Média de Pontuação"],
            &[Mm(20.0), Mm(150.0)],
            medias
                .iter()
                .map(|m| vec![m.turma.clone(), format!("{:.2} pts", m.media)]),
        )
    }

    fn exportar_tabela_pdf(
        path: &Path,
        tipo: TipoRelatorio,
        titulo: &str,
        cabecalhos: &[&str],
        colunas: &[Mm],
        linhas: impl Iterator<Item = Vec<String>>,
    ) -> Result<ExportResult> {
        let (doc, page1, layer1) = PdfDocument::new(titulo, Mm(210.0), Mm(297.0), "Conteúdo");

        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        let margin_left = Mm(20.0);
        let line_height = Mm(5.0);

        let primeira = doc.get_page(page1).get_layer(layer1);
        primeira.use_text(RODAPE, 7.0, margin_left, Mm(12.0), &font);
        let mut cursor = CursorPdf {
            layer: primeira,
            y: Mm(280.0),
        };

        // Cabeçalho institucional
        cursor
            .layer
            .use_text("OFICINA SAPIENS", 18.0, margin_left, cursor.y, &font_bold);
        cursor.avancar(Mm(6.0));
        let gerado = format!(
            "Relatório Institucional - Gerado em {}",
            format_date(Local::now().date_naive())
        );
        cursor.layer.use_text(&gerado, 9.0, margin_left, cursor.y, &font);
        cursor.avancar(Mm(10.0));

        cursor.layer.use_text(titulo, 12.0, margin_left, cursor.y, &font_bold);
        cursor.avancar(Mm(8.0));

        let desenhar_cabecalho = |cursor: &mut CursorPdf| {
            for (texto, x) in cabecalhos.iter().zip(colunas) {
                cursor.layer.use_text(*texto, 10.0, *x, cursor.y, &font_bold);
            }
            cursor.avancar(line_height);
        };
        desenhar_cabecalho(&mut cursor);

        let mut row_count = 0;
        for linha in linhas {
            if cursor.precisa_de_pagina() {
                cursor = CursorPdf::nova_pagina(&doc, &font);
                desenhar_cabecalho(&mut cursor);
            }

            for (texto, x) in linha.iter().zip(colunas) {
                cursor.layer.use_text(texto, 9.0, *x, cursor.y, &font);
            }
            cursor.avancar(line_height);
            row_count += 1;
        }

        let file = File::create(path).context("Falha ao criar o arquivo PDF")?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer).context("Falha ao gravar o PDF")?;
        writer.flush().context("Falha ao gravar o PDF")?;

        let file_size = std::fs::metadata(path)?.len() as usize;
        tracing::info!("Relatório {:?} gerado em {:?}", tipo, path);

        Ok(ExportResult {
            descricao: tipo.display_name(),
            row_count,
            file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_filename() {
        let nome = ExportService::generate_filename(TipoRelatorio::Ranking);
        assert!(nome.starts_with("sapiens_ranking_"));
        assert!(nome.ends_with(".pdf"));
    }

    #[test]
    fn test_exportar_base_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.json");

        let data = AppData::default();
        let resultado = ExportService::exportar_base_json(&data, &path).unwrap();
        assert!(resultado.file_size > 0);

        let conteudo = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&conteudo).unwrap();
        assert_eq!(json["usuarios"].as_array().unwrap().len(), 7);
        assert!(json["exportadoEm"].is_string());
    }

    #[test]
    fn test_exportar_ranking_pdf_gera_arquivo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.pdf");

        let linhas = vec![LinhaRank {
            posicao: 1,
            participante_id: "p1".into(),
            nome: "Ana Souza".into(),
            turma: "3ª Série EM".into(),
            pontuacao: 87.5,
        }];

        let resultado = ExportService::exportar_ranking_pdf(&path, "OBMEP", &linhas).unwrap();
        assert_eq!(resultado.row_count, 1);
        assert!(path.exists());
        assert!(resultado.file_size > 0);
    }

    #[test]
    fn test_exportar_volume_pdf_duas_colunas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volume.pdf");

        let volumes = vec![
            VolumeOlimpiada {
                olimpiada: "OBMEP".into(),
                inscritos: 42,
            },
            VolumeOlimpiada {
                olimpiada: "OBA".into(),
                inscritos: 17,
            },
        ];

        let resultado = ExportService::exportar_volume_pdf(&path, &volumes).unwrap();
        assert_eq!(resultado.row_count, 2);
        assert!(path.exists());
    }
}
