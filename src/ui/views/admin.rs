use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::models::{CARGOS, SENHA_PADRAO};
use crate::services::auth::{AcaoProtegida, PedidoPin};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Administração das contas da equipe.
///
/// Editar ou excluir uma conta alheia exige o PIN duas vezes seguidas.
pub struct AdminView {
    novo_email: String,
    edicao_nome: String,
    edicao_cargo: String,
    edicao_carregada: Option<String>,
}

impl AdminView {
    pub fn new() -> Self {
        Self {
            novo_email: String::new(),
            edicao_nome: String::new(),
            edicao_cargo: String::new(),
            edicao_carregada: None,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        ui.heading(format!("{} Administração", Icons::SETTINGS));
        ui.add_space(8.0);

        // Nova conta, criada com a senha padrão
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.novo_email)
                    .hint_text("email@univap.br")
                    .desired_width(220.0),
            );
            if ui.button(format!("{} Criar conta", Icons::ADD)).clicked() {
                match data.criar_usuario(&self.novo_email) {
                    Ok(()) => {
                        data.persist(db);
                        self.novo_email.clear();
                        state.show_success(&format!(
                            "Conta criada com a senha padrão \"{}\"",
                            SENHA_PADRAO
                        ));
                    }
                    Err(e) => state.show_error(&e.to_string()),
                }
            }
        });

        ui.separator();

        let email_logado = state.email_logado().unwrap_or_default().to_string();
        let mut editar: Option<String> = None;
        let mut excluir: Option<String> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for usuario in &data.usuarios {
                egui::Frame::none()
                    .fill(ui.visuals().extreme_bg_color)
                    .rounding(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.horizontal(|ui| {
                                    ui.label(RichText::new(usuario.nome_exibicao()).strong());
                                    if usuario.email == email_logado {
                                        ui.label(
                                            RichText::new("(você)")
                                                .small()
                                                .color(Colors::INFO),
                                        );
                                    }
                                    if usuario.exige_pin() {
                                        ui.label(
                                            RichText::new(Icons::KEY)
                                                .small()
                                                .color(Colors::SUCCESS),
                                        )
                                        .on_hover_text("PIN definido");
                                    }
                                });
                                ui.label(
                                    RichText::new(format!(
                                        "{} · {}",
                                        usuario.email,
                                        usuario.cargo.as_deref().unwrap_or("sem cargo")
                                    ))
                                    .small()
                                    .color(Colors::TEXT_SECONDARY),
                                );
                            });

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if usuario.email != email_logado
                                        && ui
                                            .small_button(Icons::DELETE)
                                            .on_hover_text("Excluir conta")
                                            .clicked()
                                    {
                                        excluir = Some(usuario.email.clone());
                                    }
                                    if ui
                                        .small_button(Icons::EDIT)
                                        .on_hover_text("Editar nome e cargo")
                                        .clicked()
                                    {
                                        editar = Some(usuario.email.clone());
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(4.0);
            }
        });

        if let Some(email) = editar {
            state.solicitar_pin(data, PedidoPin::duplo(AcaoProtegida::EditarUsuario(email)));
        }
        if let Some(email) = excluir {
            state.solicitar_pin(data, PedidoPin::duplo(AcaoProtegida::ExcluirUsuario(email)));
        }

        self.formulario_edicao(ui.ctx(), state, data, db);
    }

    /// Janela de edição aberta pela liberação da trava
    fn formulario_edicao(
        &mut self,
        ctx: &egui::Context,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        let Some(email) = state.usuario_em_edicao.clone() else {
            self.edicao_carregada = None;
            return;
        };

        if self.edicao_carregada.as_deref() != Some(email.as_str()) {
            let Some(usuario) = data.usuario(&email) else {
                state.usuario_em_edicao = None;
                return;
            };
            self.edicao_nome = usuario.nome.clone().unwrap_or_default();
            self.edicao_cargo = usuario.cargo.clone().unwrap_or_default();
            self.edicao_carregada = Some(email.clone());
        }

        let mut fechar = false;

        egui::Window::new("Editar conta")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                ui.label(RichText::new(&email).small().color(Colors::TEXT_SECONDARY));
                ui.add_space(8.0);

                egui::Grid::new("admin_edicao_grid")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Nome:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.edicao_nome)
                                .desired_width(200.0),
                        );
                        ui.end_row();

                        ui.label("Cargo:");
                        egui::ComboBox::from_id_salt("admin_edicao_cargo")
                            .selected_text(if self.edicao_cargo.is_empty() {
                                "Selecione"
                            } else {
                                self.edicao_cargo.as_str()
                            })
                            .width(180.0)
                            .show_ui(ui, |ui| {
                                for cargo in CARGOS {
                                    ui.selectable_value(
                                        &mut self.edicao_cargo,
                                        cargo.to_string(),
                                        cargo,
                                    );
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        fechar = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(format!("{} Salvar", Icons::SAVE)).clicked() {
                            if let Some(usuario) = data.usuario_mut(&email) {
                                usuario.nome = Some(self.edicao_nome.trim().to_string())
                                    .filter(|n| !n.is_empty());
                                usuario.cargo = Some(self.edicao_cargo.clone())
                                    .filter(|c| !c.is_empty());
                                data.persist(db);
                                state.show_success("Conta atualizada");
                            }
                            fechar = true;
                        }
                    });
                });
            });

        if fechar {
            state.usuario_em_edicao = None;
            self.edicao_carregada = None;
        }
    }
}
