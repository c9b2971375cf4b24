use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::services::auth::{self, AcaoProtegida, PedidoPin};
use crate::services::export::ExportService;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Preferências da conta: PIN, senha, exportação e limpeza do sistema.
pub struct ConfigModal {
    pin_atual: String,
    novo_pin: String,
    senha_atual: String,
    nova_senha: String,
    feedback: Option<(String, bool)>,
}

impl ConfigModal {
    pub fn new() -> Self {
        Self {
            pin_atual: String::new(),
            novo_pin: String::new(),
            senha_atual: String::new(),
            nova_senha: String::new(),
            feedback: None,
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

        egui::Window::new(format!("{} Configurações", Icons::SETTINGS))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(380.0);

                if let Some(usuario) = state
                    .email_logado()
                    .and_then(|email| data.usuario(email))
                {
                    ui.label(RichText::new(usuario.nome_exibicao()).strong().size(16.0));
                    ui.label(
                        RichText::new(&usuario.email)
                            .small()
                            .color(Colors::TEXT_SECONDARY),
                    );
                }
                ui.add_space(8.0);

                ui.checkbox(&mut state.dark_mode, "Tema escuro");
                ui.separator();

                self.secao_pin(ui, state, data, db);
                ui.separator();
                self.secao_senha(ui, state, data, db);
                ui.separator();
                self.secao_manutencao(ui, state, data);

                if let Some((texto, ok)) = &self.feedback {
                    ui.add_space(8.0);
                    let cor = if *ok { Colors::SUCCESS } else { Colors::ERROR };
                    ui.colored_label(cor, texto);
                }

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("Fechar").clicked() {
                        self.reset();
                        should_close = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(format!("{} Sair da conta", Icons::EXIT)).clicked() {
                            self.reset();
                            state.logout();
                            should_close = true;
                        }
                    });
                });
            });

        should_close
    }

    fn secao_pin(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        ui.label(RichText::new(format!("{} PIN de segurança", Icons::KEY)).strong());
        ui.label(
            RichText::new("Protege exclusões e dados sensíveis; 6 dígitos")
                .small()
                .color(Colors::TEXT_MUTED),
        );

        let tem_pin = state
            .email_logado()
            .and_then(|email| data.usuario(email))
            .map(|u| u.exige_pin())
            .unwrap_or(false);

        egui::Grid::new("config_pin_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                if tem_pin {
                    ui.label("PIN atual:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.pin_atual)
                            .password(true)
                            .char_limit(6)
                            .desired_width(100.0),
                    );
                    ui.end_row();
                }

                ui.label("Novo PIN:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.novo_pin)
                        .password(true)
                        .char_limit(6)
                        .desired_width(100.0),
                );
                ui.end_row();
            });

        if ui.button("Salvar PIN").clicked() {
            let email = state.email_logado().unwrap_or_default().to_string();
            let resultado = match data.usuario_mut(&email) {
                Some(usuario) => auth::alterar_pin(usuario, &self.pin_atual, &self.novo_pin),
                None => Err(crate::utils::error::AppError::not_found("Conta")),
            };
            match resultado {
                Ok(()) => {
                    data.persist(db);
                    self.pin_atual.clear();
                    self.novo_pin.clear();
                    self.feedback = Some(("PIN atualizado".to_string(), true));
                }
                Err(e) => {
                    self.feedback = Some((e.to_string(), false));
                }
            }
        }
    }

    fn secao_senha(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        ui.label(RichText::new(format!("{} Senha de acesso", Icons::LOCK)).strong());

        egui::Grid::new("config_senha_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Senha atual:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.senha_atual)
                        .password(true)
                        .desired_width(160.0),
                );
                ui.end_row();

                ui.label("Nova senha:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.nova_senha)
                        .password(true)
                        .desired_width(160.0),
                );
                ui.end_row();
            });

        if ui.button("Salvar senha").clicked() {
            let email = state.email_logado().unwrap_or_default().to_string();
            let resultado = match data.usuario_mut(&email) {
                Some(usuario) => auth::alterar_senha(usuario, &self.senha_atual, &self.nova_senha),
                None => Err(crate::utils::error::AppError::not_found("Conta")),
            };
            match resultado {
                Ok(()) => {
                    data.persist(db);
                    self.senha_atual.clear();
                    self.nova_senha.clear();
                    self.feedback = Some(("Senha atualizada".to_string(), true));
                }
                Err(e) => {
                    self.feedback = Some((e.to_string(), false));
                }
            }
        }
    }

    fn secao_manutencao(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &mut AppData) {
        ui.label(RichText::new("Manutenção").strong());

        if ui
            .button(format!("{} Exportar base (JSON)", Icons::EXPORT))
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name(ExportService::json_filename())
                .add_filter("JSON", &["json"])
                .save_file()
            {
                match ExportService::exportar_base_json(data, &path) {
                    Ok(resultado) => state.show_success(&resultado.summary()),
                    Err(e) => state.show_error(&format!("Falha na exportação: {}", e)),
                }
            }
        }

        if ui
            .button(
                RichText::new(format!("{} Limpar sistema", Icons::WARNING)).color(Colors::ERROR),
            )
            .on_hover_text("Apaga tudo e volta ao estado de fábrica")
            .clicked()
        {
            state.solicitar_pin(data, PedidoPin::duplo(AcaoProtegida::LimparSistema));
        }
    }

    pub fn reset(&mut self) {
        self.pin_atual.clear();
        self.novo_pin.clear();
        self.senha_atual.clear();
        self.nova_senha.clear();
        self.feedback = None;
    }
}
