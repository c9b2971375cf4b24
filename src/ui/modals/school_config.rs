use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::models::{EscolaInfo, Segmento};
use crate::services::auth::{AcaoProtegida, PedidoPin};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Dados institucionais do colégio.
///
/// Depois da primeira configuração os campos ficam travados; editar de
/// novo exige a trava de PIN.
pub struct SchoolConfigModal {
    loaded: bool,
    draft: EscolaInfo,
    desbloqueado: bool,
    error_message: Option<String>,
}

impl SchoolConfigModal {
    pub fn new() -> Self {
        Self {
            loaded: false,
            draft: EscolaInfo::default(),
            desbloqueado: false,
            error_message: None,
        }
    }

    /// Libera a edição dos campos (chamado após o acerto do PIN)
    pub fn desbloquear(&mut self) {
        self.desbloqueado = true;
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

        if !self.loaded {
            self.draft = data.escola.clone();
            // Primeira configuração não tem o que proteger
            self.desbloqueado = !data.escola.configurada();
            self.error_message = None;
            self.loaded = true;
        }

        egui::Window::new(format!("{} Dados do colégio", Icons::SCHOOL))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(400.0);

                if !self.desbloqueado {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("Dados protegidos contra alteração acidental")
                                .color(Colors::TEXT_SECONDARY),
                        );
                        if ui.button(format!("{} Editar", Icons::UNLOCK)).clicked() {
                            state.solicitar_pin(
                                data,
                                PedidoPin::simples(AcaoProtegida::DesbloquearEscola),
                            );
                        }
                    });
                    ui.add_space(8.0);
                }

                ui.add_enabled_ui(self.desbloqueado, |ui| {
                    egui::Grid::new("escola_form_grid")
                        .num_columns(2)
                        .spacing([8.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Nome do colégio:");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.draft.nome)
                                    .desired_width(260.0),
                            );
                            ui.end_row();

                            ui.label("CNPJ:");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.draft.cnpj)
                                    .desired_width(180.0),
                            );
                            ui.end_row();

                            ui.label("Código INEP:");
                            ui.add(
                                egui::TextEdit::singleline(&mut self.draft.inep)
                                    .desired_width(120.0),
                            );
                            ui.end_row();
                        });

                    ui.add_space(8.0);
                    ui.label(RichText::new("Segmentos ativos").strong());
                    ui.horizontal(|ui| {
                        for segmento in Segmento::TODOS {
                            let mut marcado = self.draft.segmentos_ativos.contains(&segmento);
                            if ui
                                .checkbox(&mut marcado, segmento.sigla())
                                .on_hover_text(segmento.nome())
                                .changed()
                            {
                                if marcado {
                                    self.draft.segmentos_ativos.push(segmento);
                                } else {
                                    self.draft.segmentos_ativos.retain(|s| *s != segmento);
                                }
                            }
                        }
                    });
                });

                if let Some(ref error) = self.error_message {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).color(Colors::ERROR));
                }

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("Fechar").clicked() {
                        self.reset();
                        should_close = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.desbloqueado
                            && ui.button(format!("{} Salvar", Icons::SAVE)).clicked()
                        {
                            match self.draft.validate() {
                                Ok(()) => {
                                    data.escola = self.draft.clone();
                                    data.persist(db);
                                    self.reset();
                                    should_close = true;
                                    state.show_success("Dados do colégio salvos!");
                                }
                                Err(e) => {
                                    self.error_message = Some(e.to_string());
                                }
                            }
                        }
                    });
                });
            });

        should_close
    }

    pub fn reset(&mut self) {
        self.loaded = false;
        self.desbloqueado = false;
        self.error_message = None;
    }
}
