use egui::{self, RichText};

use crate::data::AppData;
use crate::models::{Olimpiada, Segmento};
use crate::services::auth::{AcaoProtegida, PedidoPin};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::date::{format_currency, format_date};

/// Catálogo de olimpíadas com filtro por segmento.
pub struct OlimpiadasView {
    filtro_segmento: Option<Segmento>,
}

impl OlimpiadasView {
    pub fn new() -> Self {
        Self {
            filtro_segmento: None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        ui.horizontal(|ui| {
            ui.heading(format!("{} Olimpíadas", Icons::TROPHY));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(format!("{} Nova olimpíada", Icons::ADD)).clicked() {
                    state.open_new_olympiad_form();
                }
            });
        });

        ui.add_space(8.0);

        // Filtro por segmento
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.filtro_segmento.is_none(), "Todos")
                .clicked()
            {
                self.filtro_segmento = None;
            }
            for segmento in Segmento::TODOS {
                if ui
                    .selectable_label(self.filtro_segmento == Some(segmento), segmento.sigla())
                    .on_hover_text(segmento.nome())
                    .clicked()
                {
                    self.filtro_segmento = Some(segmento);
                }
            }
        });

        ui.add_space(8.0);

        let visiveis: Vec<&Olimpiada> = data
            .olimpiadas
            .iter()
            .filter(|o| {
                self.filtro_segmento
                    .map_or(true, |s| o.atende_segmento(s))
            })
            .collect();

        ui.label(
            RichText::new(format!("{} olimpíadas", visiveis.len()))
                .small()
                .color(Colors::TEXT_SECONDARY),
        );
        ui.separator();

        let mut editar: Option<String> = None;
        let mut excluir: Option<String> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            if visiveis.is_empty() {
                ui.label(RichText::new("Nenhuma olimpíada cadastrada").color(Colors::TEXT_MUTED));
            }

            for olimpiada in visiveis {
                egui::Frame::none()
                    .fill(ui.visuals().extreme_bg_color)
                    .rounding(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.horizontal(|ui| {
                                    ui.label(RichText::new(&olimpiada.nome).strong());

                                    let (texto, cor) = if olimpiada.inscricoes_abertas() {
                                        ("Inscrições abertas", Colors::SUCCESS)
                                    } else {
                                        ("Inscrições fechadas", Colors::TEXT_MUTED)
                                    };
                                    ui.label(RichText::new(texto).small().color(cor));
                                });

                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(periodo_inscricao(olimpiada))
                                            .small()
                                            .color(Colors::TEXT_SECONDARY),
                                    );
                                    ui.label(
                                        RichText::new(siglas_segmentos(olimpiada))
                                            .small()
                                            .color(Colors::TEXT_SECONDARY),
                                    );
                                    ui.label(
                                        RichText::new(format!(
                                            "Escola: {} · Aluno: {}",
                                            format_currency(olimpiada.custo_escola),
                                            format_currency(olimpiada.custo_aluno)
                                        ))
                                        .small()
                                        .color(Colors::TEXT_MUTED),
                                    );
                                    if !olimpiada.fases.is_empty() {
                                        ui.label(
                                            RichText::new(format!(
                                                "{} fases",
                                                olimpiada.fases.len()
                                            ))
                                            .small()
                                            .color(Colors::TEXT_MUTED),
                                        );
                                    }
                                });
                            });

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui
                                        .small_button(Icons::DELETE)
                                        .on_hover_text("Excluir olimpíada")
                                        .clicked()
                                    {
                                        excluir = Some(olimpiada.id.clone());
                                    }
                                    if ui
                                        .small_button(Icons::EDIT)
                                        .on_hover_text("Editar")
                                        .clicked()
                                    {
                                        editar = Some(olimpiada.id.clone());
                                    }
                                    if !olimpiada.site.is_empty() {
                                        ui.hyperlink_to(Icons::LINK, &olimpiada.site);
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(4.0);
            }
        });

        if let Some(id) = editar {
            state.open_edit_olympiad_form(&id);
        }
        if let Some(id) = excluir {
            state.solicitar_pin(data, PedidoPin::simples(AcaoProtegida::ExcluirOlimpiada(id)));
        }
    }
}

fn periodo_inscricao(olimpiada: &Olimpiada) -> String {
    match (olimpiada.inicio_inscricao, olimpiada.fim_inscricao) {
        (Some(inicio), Some(fim)) => format!("{} a {}", format_date(inicio), format_date(fim)),
        (Some(inicio), None) => format!("a partir de {}", format_date(inicio)),
        (None, Some(fim)) => format!("até {}", format_date(fim)),
        (None, None) => "período não informado".to_string(),
    }
}

fn siglas_segmentos(olimpiada: &Olimpiada) -> String {
    olimpiada
        .segmentos
        .iter()
        .map(|s| s.sigla())
        .collect::<Vec<_>>()
        .join(", ")
}
