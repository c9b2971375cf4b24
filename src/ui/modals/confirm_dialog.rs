use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::ui::{
    state::{AppState, ConfirmAction},
    theme::{Colors, Icons},
};

pub struct ConfirmDialog;

impl ConfirmDialog {
    /// Exibe o diálogo de confirmação e retorna true se a ação foi confirmada
    pub fn show(
        ctx: &egui::Context,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) -> Option<bool> {
        if !state.show_confirm_dialog {
            return None;
        }

        let mut result = None;

        egui::Window::new("Confirmar")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);

                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(Icons::WARNING).size(32.0).color(Colors::WARNING));
                    ui.add_space(8.0);
                    ui.label(&state.confirm_dialog_message);
                });

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        state.close_confirm();
                        result = Some(false);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let confirm_button = ui.button(
                            RichText::new("Confirmar").color(Colors::ERROR)
                        );

                        if confirm_button.clicked() {
                            if let Some(ref action) = state.confirm_dialog_action.clone() {
                                Self::execute_action(action, state, data, db);
                            }
                            state.close_confirm();
                            result = Some(true);
                        }
                    });
                });
            });

        result
    }

    fn execute_action(
        action: &ConfirmAction,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        match action {
            ConfirmAction::ExcluirOlimpiada(id) => {
                let removidos = data.excluir_olimpiada(id);
                data.persist(db);
                state.show_success(&format!(
                    "Olimpíada excluída ({} inscrições removidas)",
                    removidos
                ));
            }
            ConfirmAction::ExcluirTurma(id) => {
                let removidos = data.excluir_turma(id);
                data.persist(db);
                state.show_success(&format!(
                    "Turma excluída ({} inscrições removidas)",
                    removidos
                ));
            }
            ConfirmAction::ExcluirUsuario(email) => {
                let logado = state.email_logado().unwrap_or_default().to_string();
                match data.excluir_usuario(email, &logado) {
                    Ok(()) => {
                        data.persist(db);
                        state.usuario_em_edicao = None;
                        state.show_success("Conta removida");
                    }
                    Err(e) => {
                        state.show_error(&format!("Não foi possível remover: {}", e));
                    }
                }
            }
            ConfirmAction::LimparSistema => match data.limpar_sistema(db) {
                Ok(()) => {
                    state.logout();
                    state.show_success("Sistema restaurado ao estado de fábrica");
                }
                Err(e) => {
                    state.show_error(&format!("Falha ao limpar o sistema: {}", e));
                }
            },
        }
    }
}
