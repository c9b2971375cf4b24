use egui::{self, RichText};

use crate::data::AppData;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Trava de PIN: a ação pendente só é liberada após o acerto.
///
/// Ações críticas pedem o PIN duas vezes seguidas; fechar o diálogo
/// descarta o pedido sem executar nada.
#[derive(Default)]
pub struct PinVerifyModal {
    input: String,
    erro: Option<String>,
}

impl PinVerifyModal {
    pub fn show(&mut self, ctx: &egui::Context, state: &mut AppState, data: &AppData) {
        if state.pedido_pin.is_none() {
            if !self.input.is_empty() || self.erro.is_some() {
                self.reset();
            }
            return;
        }

        let mut aberto = true;
        let mut verificar = false;

        let segunda_etapa = state
            .pedido_pin
            .as_ref()
            .map(|p| p.exige_segunda_confirmacao())
            .unwrap_or(false);

        egui::Window::new(format!("{} Verificação de PIN", Icons::LOCK))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut aberto)
            .show(ctx, |ui| {
                ui.set_min_width(280.0);

                if segunda_etapa {
                    ui.label(
                        RichText::new("Ação crítica: digite o PIN novamente para confirmar")
                            .color(Colors::WARNING),
                    );
                } else {
                    ui.label("Digite seu PIN de 6 dígitos para continuar");
                }
                ui.add_space(8.0);

                let resposta = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .password(true)
                        .char_limit(6)
                        .hint_text("••••••")
                        .desired_width(f32::INFINITY),
                );
                resposta.request_focus();

                // Mantém apenas dígitos no campo
                self.input.retain(|c| c.is_ascii_digit());

                if let Some(erro) = &self.erro {
                    ui.add_space(4.0);
                    ui.colored_label(Colors::ERROR, erro);
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        state.cancelar_pin();
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let botao = ui.add_enabled(
                            self.input.len() == 6,
                            egui::Button::new(RichText::new("Verificar").color(Colors::PRIMARY)),
                        );
                        if botao.clicked()
                            || (resposta.lost_focus()
                                && ui.input(|i| i.key_pressed(egui::Key::Enter)))
                        {
                            verificar = true;
                        }
                    });
                });

                // Acerto imediato ao completar os 6 dígitos
                if self.input.len() == 6 {
                    verificar = true;
                }
            });

        if !aberto {
            state.cancelar_pin();
        }

        if state.pedido_pin.is_none() {
            self.reset();
            return;
        }

        if verificar && self.input.len() == 6 {
            self.verificar(state, data);
        }
    }

    fn verificar(&mut self, state: &mut AppState, data: &AppData) {
        let correto = state
            .email_logado()
            .and_then(|email| data.usuario(email))
            .map(|u| u.verificar_pin(&self.input))
            .unwrap_or(false);

        if !correto {
            self.input.clear();
            self.erro = Some("PIN incorreto".to_string());
            return;
        }

        self.input.clear();
        self.erro = None;

        if let Some(pedido) = state.pedido_pin.as_mut() {
            if pedido.registrar_acerto() {
                let acao = pedido.acao.clone();
                state.pedido_pin = None;
                state.acao_liberada = Some(acao);
            }
        }
    }

    fn reset(&mut self) {
        self.input.clear();
        self.erro = None;
    }
}
