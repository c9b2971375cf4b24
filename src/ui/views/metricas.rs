use egui::{self, RichText};

use crate::data::AppData;
use crate::models::Segmento;
use crate::services::export::{ExportService, TipoRelatorio};
use crate::services::relatorio::{CriterioRank, FiltroRelatorio, RelatorioService};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::date::format_nota;

const LIMITES: [usize; 3] = [10, 25, 50];

/// Relatórios institucionais: ranking, volume e desempenho por turma.
pub struct MetricasView {
    relatorio: TipoRelatorio,
    olimpiada_id: Option<String>,
    filtro: FiltroRelatorio,
    criterio: CriterioRank,
    limite: usize,
}

impl MetricasView {
    pub fn new() -> Self {
        Self {
            relatorio: TipoRelatorio::Ranking,
            olimpiada_id: None,
            filtro: FiltroRelatorio::default(),
            criterio: CriterioRank::Total,
            limite: 10,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        ui.heading(format!("{} Métricas", Icons::CHART));
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            for tipo in [
                TipoRelatorio::Ranking,
                TipoRelatorio::Volume,
                TipoRelatorio::Medias,
            ] {
                if ui
                    .selectable_label(self.relatorio == tipo, tipo.display_name())
                    .clicked()
                {
                    self.relatorio = tipo;
                }
            }
        });

        ui.separator();

        match self.relatorio {
            TipoRelatorio::Ranking => self.mostrar_ranking(ui, state, data),
            TipoRelatorio::Volume => self.mostrar_volume(ui, state, data),
            TipoRelatorio::Medias => self.mostrar_medias(ui, state, data),
        }
    }

    fn seletor_olimpiada(&mut self, ui: &mut egui::Ui, data: &AppData) -> Option<String> {
        ui.horizontal(|ui| {
            ui.label("Olimpíada:");
            let atual = self
                .olimpiada_id
                .as_deref()
                .and_then(|id| data.olimpiada(id))
                .map(|o| o.nome.clone())
                .unwrap_or_else(|| "Selecione".to_string());

            egui::ComboBox::from_id_salt("metricas_olimpiada")
                .selected_text(atual)
                .width(220.0)
                .show_ui(ui, |ui| {
                    for o in &data.olimpiadas {
                        let marcada = self.olimpiada_id.as_deref() == Some(o.id.as_str());
                        if ui.selectable_label(marcada, &o.nome).clicked() {
                            self.olimpiada_id = Some(o.id.clone());
                            self.criterio = CriterioRank::Total;
                            self.filtro.turma_id = None;
                        }
                    }
                });
        });

        self.olimpiada_id
            .clone()
            .filter(|id| data.olimpiada(id).is_some())
    }

    fn filtros_comuns(&mut self, ui: &mut egui::Ui, data: &AppData) {
        ui.horizontal(|ui| {
            ui.label("Segmento:");
            if ui
                .selectable_label(self.filtro.segmento.is_none(), "Todos")
                .clicked()
            {
                self.filtro.segmento = None;
            }
            for segmento in Segmento::TODOS {
                if ui
                    .selectable_label(self.filtro.segmento == Some(segmento), segmento.sigla())
                    .clicked()
                {
                    self.filtro.segmento = Some(segmento);
                }
            }

            ui.separator();

            ui.label("Turma:");
            let turma_texto = self
                .filtro
                .turma_id
                .as_deref()
                .and_then(|id| data.nome_turma(id))
                .unwrap_or("Todas");
            egui::ComboBox::from_id_salt("metricas_turma")
                .selected_text(turma_texto.to_string())
                .width(140.0)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.filtro.turma_id.is_none(), "Todas")
                        .clicked()
                    {
                        self.filtro.turma_id = None;
                    }
                    for turma in &data.turmas {
                        let marcada =
                            self.filtro.turma_id.as_deref() == Some(turma.id.as_str());
                        if ui.selectable_label(marcada, &turma.nome).clicked() {
                            self.filtro.turma_id = Some(turma.id.clone());
                        }
                    }
                });
        });
    }

    fn mostrar_ranking(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        let Some(olimpiada_id) = self.seletor_olimpiada(ui, data) else {
            ui.label(RichText::new("Selecione uma olimpíada").color(Colors::TEXT_MUTED));
            return;
        };

        self.filtros_comuns(ui, data);

        // Critério e tamanho da lista
        ui.horizontal(|ui| {
            ui.label("Critério:");
            if ui
                .selectable_label(self.criterio == CriterioRank::Total, "Pontuação total")
                .clicked()
            {
                self.criterio = CriterioRank::Total;
            }
            if let Some(olimpiada) = data.olimpiada(&olimpiada_id) {
                for fase in &olimpiada.fases {
                    let marcada = self.criterio == CriterioRank::Fase(fase.id.clone());
                    if ui.selectable_label(marcada, &fase.nome).clicked() {
                        self.criterio = CriterioRank::Fase(fase.id.clone());
                    }
                }
            }

            ui.separator();

            ui.label("Top:");
            for limite in LIMITES {
                if ui
                    .selectable_label(self.limite == limite, limite.to_string())
                    .clicked()
                {
                    self.limite = limite;
                }
            }
        });

        let linhas =
            RelatorioService::ranking(data, &olimpiada_id, &self.filtro, &self.criterio, self.limite);

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} posições", linhas.len()))
                    .small()
                    .color(Colors::TEXT_SECONDARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("{} Exportar PDF", Icons::DOCUMENT)).clicked() {
                    let nome_olimpiada = data
                        .olimpiada(&olimpiada_id)
                        .map(|o| o.nome.clone())
                        .unwrap_or_default();
                    Self::salvar_pdf(state, TipoRelatorio::Ranking, |path| {
                        ExportService::exportar_ranking_pdf(path, &nome_olimpiada, &linhas)
                    });
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("grid_ranking")
                .num_columns(4)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Pos").strong());
                    ui.label(RichText::new("Aluno").strong());
                    ui.label(RichText::new("Turma").strong());
                    ui.label(RichText::new("Pontuação").strong());
                    ui.end_row();

                    for linha in &linhas {
                        let pos = match linha.posicao {
                            1 => format!("{} 1º", Icons::TROPHY),
                            p => format!("{}º", p),
                        };
                        if linha.posicao == 1 {
                            ui.label(RichText::new(pos).color(Colors::GOLD));
                        } else {
                            ui.label(pos);
                        }
                        ui.label(&linha.nome);
                        ui.label(&linha.turma);
                        ui.label(format_nota(linha.pontuacao));
                        ui.end_row();
                    }
                });
        });
    }

    fn mostrar_volume(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        self.filtros_comuns(ui, data);

        let volumes = RelatorioService::volume_inscricoes(data, &self.filtro);

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let total: usize = volumes.iter().map(|v| v.inscritos).sum();
            ui.label(
                RichText::new(format!("{} inscrições no total", total))
                    .small()
                    .color(Colors::TEXT_SECONDARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("{} Exportar PDF", Icons::DOCUMENT)).clicked() {
                    Self::salvar_pdf(state, TipoRelatorio::Volume, |path| {
                        ExportService::exportar_volume_pdf(path, &volumes)
                    });
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("grid_volume")
                .num_columns(2)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Olimpíada").strong());
                    ui.label(RichText::new("Inscritos").strong());
                    ui.end_row();

                    for v in &volumes {
                        ui.label(&v.olimpiada);
                        ui.label(format!("{} alunos", v.inscritos));
                        ui.end_row();
                    }
                });
        });
    }

    fn mostrar_medias(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        let Some(olimpiada_id) = self.seletor_olimpiada(ui, data) else {
            ui.label(RichText::new("Selecione uma olimpíada").color(Colors::TEXT_MUTED));
            return;
        };

        let medias = RelatorioService::medias_por_turma(data, &olimpiada_id);

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} turmas", medias.len()))
                    .small()
                    .color(Colors::TEXT_SECONDARY),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("{} Exportar PDF", Icons::DOCUMENT)).clicked() {
                    let nome_olimpiada = data
                        .olimpiada(&olimpiada_id)
                        .map(|o| o.nome.clone())
                        .unwrap_or_default();
                    Self::salvar_pdf(state, TipoRelatorio::Medias, |path| {
                        ExportService::exportar_medias_pdf(path, &nome_olimpiada, &medias)
                    });
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("grid_medias")
                .num_columns(2)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Turma").strong());
                    ui.label(RichText::new("Média de pontuação").strong());
                    ui.end_row();

                    for m in &medias {
                        ui.label(&m.turma);
                        ui.label(format_nota(m.media));
                        ui.end_row();
                    }
                });
        });
    }

    fn salvar_pdf<F>(state: &mut AppState, tipo: TipoRelatorio, exportar: F)
    where
        F: FnOnce(&std::path::Path) -> anyhow::Result<crate::services::export::ExportResult>,
    {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(ExportService::generate_filename(tipo))
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            return;
        };

        match exportar(&path) {
            Ok(resultado) => state.show_success(&resultado.summary()),
            Err(e) => state.show_error(&format!("Falha na exportação: {}", e)),
        }
    }
}
