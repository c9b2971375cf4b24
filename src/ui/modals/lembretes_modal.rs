use chrono::Local;
use egui::{self, Color32, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::models::{Importancia, Lembrete};
use crate::services::lembretes::LembreteService;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::date::{format_datetime, parse_datetime};

fn cor_importancia(importancia: Importancia) -> Color32 {
    match importancia {
        Importancia::Alta => Colors::ERROR,
        Importancia::Media => Colors::WARNING,
        Importancia::Baixa => Colors::TEXT_MUTED,
    }
}

/// Agenda de lembretes: cadastro, listagem e ciência.
pub struct LembretesModal {
    titulo: String,
    descricao: String,
    importancia: Importancia,
    data_hora_buf: String,
    error_message: Option<String>,
}

impl LembretesModal {
    pub fn new() -> Self {
        Self {
            titulo: String::new(),
            descricao: String::new(),
            importancia: Importancia::Media,
            data_hora_buf: String::new(),
            error_message: None,
        }
    }

    /// Exibe o modal e retorna true quando ele deve fechar
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) -> bool {
        let mut should_close = false;
        let agora = Local::now().naive_local();

        egui::Window::new(format!("{} Lembretes", Icons::BELL))
            .collapsible(false)
            .resizable(true)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(460.0);

                self.secao_novo(ui, state, data, db);
                ui.separator();

                let mut dar_ciencia: Option<String> = None;
                let mut excluir: Option<String> = None;

                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    if data.lembretes.is_empty() {
                        ui.label(RichText::new("Nenhum lembrete cadastrado").color(Colors::TEXT_MUTED));
                    }

                    for lembrete in LembreteService::ordenados(&data.lembretes) {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new("●").color(cor_importancia(lembrete.importancia)),
                            );

                            let titulo = if lembrete.nao_lido(agora) {
                                RichText::new(&lembrete.titulo).strong()
                            } else {
                                RichText::new(&lembrete.titulo)
                            };
                            ui.label(titulo);

                            ui.label(
                                RichText::new(format_datetime(lembrete.data_hora))
                                    .small()
                                    .color(if lembrete.vencido(agora) {
                                        Colors::ERROR
                                    } else {
                                        Colors::TEXT_SECONDARY
                                    }),
                            );

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button(Icons::DELETE).clicked() {
                                        excluir = Some(lembrete.id.clone());
                                    }
                                    if lembrete.nao_lido(agora)
                                        && ui
                                            .small_button(Icons::CHECK)
                                            .on_hover_text("Dar ciência")
                                            .clicked()
                                    {
                                        dar_ciencia = Some(lembrete.id.clone());
                                    }
                                },
                            );
                        });

                        if !lembrete.descricao.is_empty() {
                            ui.label(
                                RichText::new(&lembrete.descricao)
                                    .small()
                                    .color(Colors::TEXT_MUTED),
                            );
                        }
                        ui.add_space(2.0);
                    }
                });

                if let Some(id) = dar_ciencia {
                    LembreteService::dar_ciencia(&mut data.lembretes, &id);
                    data.persist(db);
                }
                if let Some(id) = excluir {
                    data.lembretes.retain(|l| l.id != id);
                    data.persist(db);
                    state.show_success("Lembrete excluído");
                }

                ui.add_space(12.0);
                if ui.button("Fechar").clicked() {
                    self.reset();
                    should_close = true;
                }
            });

        should_close
    }

    fn secao_novo(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        egui::Grid::new("lembrete_form_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Título:");
                ui.add(egui::TextEdit::singleline(&mut self.titulo).desired_width(300.0));
                ui.end_row();

                ui.label("Descrição:");
                ui.add(egui::TextEdit::singleline(&mut self.descricao).desired_width(300.0));
                ui.end_row();

                ui.label("Data e hora:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.data_hora_buf)
                            .hint_text("dd/mm/aaaa hh:mm")
                            .desired_width(140.0),
                    );
                });
                ui.end_row();

                ui.label("Importância:");
                ui.horizontal(|ui| {
                    for opcao in Importancia::TODAS {
                        ui.selectable_value(&mut self.importancia, opcao, opcao.nome());
                    }
                });
                ui.end_row();
            });

        if let Some(ref error) = self.error_message {
            ui.label(RichText::new(error).color(Colors::ERROR));
        }

        if ui.button(format!("{} Adicionar lembrete", Icons::ADD)).clicked() {
            if self.titulo.trim().is_empty() {
                self.error_message = Some("Informe o título".to_string());
                return;
            }
            let Some(data_hora) = parse_datetime(&self.data_hora_buf) else {
                self.error_message =
                    Some("Data inválida (use dd/mm/aaaa hh:mm)".to_string());
                return;
            };

            data.lembretes.push(Lembrete::new(
                self.titulo.trim(),
                self.descricao.trim(),
                self.importancia,
                data_hora,
            ));
            data.persist(db);
            state.show_success("Lembrete adicionado");

            self.titulo.clear();
            self.descricao.clear();
            self.data_hora_buf.clear();
            self.importancia = Importancia::Media;
            self.error_message = None;
        }
    }

    pub fn reset(&mut self) {
        self.error_message = None;
    }
}

/// Aviso de lembrete vencido; um por verificação da agenda.
pub struct LembreteAlerta;

impl LembreteAlerta {
    pub fn show(ctx: &egui::Context, state: &mut AppState, data: &mut AppData, db: &Database) {
        let Some(id) = state.alerta_lembrete_id.clone() else {
            return;
        };
        let Some(lembrete) = data.lembretes.iter().find(|l| l.id == id).cloned() else {
            state.alerta_lembrete_id = None;
            return;
        };

        let mut aberto = true;
        let mut ciente = false;

        egui::Window::new(format!("{} Lembrete vencido", Icons::BELL))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut aberto)
            .show(ctx, |ui| {
                ui.set_min_width(320.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("●").color(cor_importancia(lembrete.importancia)));
                    ui.label(RichText::new(&lembrete.titulo).strong().size(16.0));
                });
                ui.label(
                    RichText::new(format_datetime(lembrete.data_hora))
                        .small()
                        .color(Colors::TEXT_SECONDARY),
                );
                if !lembrete.descricao.is_empty() {
                    ui.add_space(4.0);
                    ui.label(&lembrete.descricao);
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Depois").clicked() {
                        ciente = false;
                        state.alerta_lembrete_id = None;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new(format!("{} Ciente", Icons::CHECK)))
                            .clicked()
                        {
                            ciente = true;
                        }
                    });
                });
            });

        if ciente {
            LembreteService::dar_ciencia(&mut data.lembretes, &id);
            data.persist(db);
            state.alerta_lembrete_id = None;
        } else if !aberto {
            // Fechar sem ciência mantém o lembrete como não lido
            state.alerta_lembrete_id = None;
        }
    }
}
