use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::models::{validar_pin, validar_senha_cadastro, EscolaInfo, Segmento, CARGOS, SENHA_PADRAO};
use crate::ui::{
    state::{AppState, View},
    theme::{Colors, Icons},
};

/// Assistente de primeiro acesso: perfil da conta e dados do colégio.
pub struct SetupView {
    carregado: bool,
    nome: String,
    cargo: String,
    nova_senha: String,
    pin: String,
    escola: EscolaInfo,
    precisa_escola: bool,
    error_message: Option<String>,
}

impl SetupView {
    pub fn new() -> Self {
        Self {
            carregado: false,
            nome: String::new(),
            cargo: String::new(),
            nova_senha: String::new(),
            pin: String::new(),
            escola: EscolaInfo::default(),
            precisa_escola: false,
            error_message: None,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        if !self.carregado {
            if let Some(usuario) = state.email_logado().and_then(|e| data.usuario(e)) {
                self.nome = usuario.nome.clone().unwrap_or_default();
                self.cargo = usuario.cargo.clone().unwrap_or_default();
            }
            self.escola = data.escola.clone();
            self.precisa_escola = !data.escola.configurada();
            self.carregado = true;
        }

        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.heading("Bem-vindo à Oficina Sapiens");
            ui.label(
                RichText::new("Complete seu cadastro antes de começar")
                    .color(Colors::TEXT_SECONDARY),
            );
        });
        ui.add_space(16.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(420.0);

                let senha_padrao = state
                    .email_logado()
                    .and_then(|e| data.usuario(e))
                    .map(|u| u.password == SENHA_PADRAO)
                    .unwrap_or(false);
                self.secao_perfil(ui, senha_padrao);
                if self.precisa_escola {
                    ui.add_space(12.0);
                    self.secao_escola(ui);
                }

                if let Some(ref error) = self.error_message {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).color(Colors::ERROR));
                }

                ui.add_space(16.0);
                if ui
                    .button(RichText::new(format!("{} Concluir", Icons::CHECK)).size(16.0))
                    .clicked()
                {
                    match self.concluir(state, data, db) {
                        Ok(()) => {
                            self.carregado = false;
                            state.show_success("Cadastro concluído!");
                            state.navigate(View::Olimpiadas);
                        }
                        Err(e) => self.error_message = Some(e.to_string()),
                    }
                }
            });
        });
    }

    fn secao_perfil(&mut self, ui: &mut egui::Ui, senha_padrao: bool) {
        ui.group(|ui| {
            ui.label(RichText::new(format!("{} Seu perfil", Icons::PERSON)).strong());

            egui::Grid::new("setup_perfil_grid")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Nome completo:");
                    ui.add(egui::TextEdit::singleline(&mut self.nome).desired_width(240.0));
                    ui.end_row();

                    ui.label("Cargo:");
                    egui::ComboBox::from_id_salt("setup_cargo")
                        .selected_text(if self.cargo.is_empty() {
                            "Selecione"
                        } else {
                            self.cargo.as_str()
                        })
                        .width(200.0)
                        .show_ui(ui, |ui| {
                            for cargo in CARGOS {
                                ui.selectable_value(&mut self.cargo, cargo.to_string(), cargo);
                            }
                        });
                    ui.end_row();
                });

            egui::Grid::new("setup_senha_grid")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    if senha_padrao {
                        ui.label("Nova senha:");
                        ui.horizontal(|ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.nova_senha)
                                    .password(true)
                                    .desired_width(160.0),
                            );
                            ui.label(
                                RichText::new("letras e números, mínimo 6")
                                    .small()
                                    .color(Colors::TEXT_MUTED),
                            );
                        });
                        ui.end_row();
                    }

                    ui.label("PIN:");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.pin)
                                .password(true)
                                .char_limit(6)
                                .desired_width(100.0),
                        );
                        ui.label(
                            RichText::new("6 dígitos, obrigatório; protege exclusões")
                                .small()
                                .color(Colors::TEXT_MUTED),
                        );
                    });
                    ui.end_row();
                });
        });
    }

    fn secao_escola(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(RichText::new(format!("{} Dados do colégio", Icons::SCHOOL)).strong());

            egui::Grid::new("setup_escola_grid")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Nome do colégio:");
                    ui.add(egui::TextEdit::singleline(&mut self.escola.nome).desired_width(240.0));
                    ui.end_row();

                    ui.label("CNPJ:");
                    ui.add(egui::TextEdit::singleline(&mut self.escola.cnpj).desired_width(180.0));
                    ui.end_row();

                    ui.label("Código INEP:");
                    ui.add(egui::TextEdit::singleline(&mut self.escola.inep).desired_width(120.0));
                    ui.end_row();
                });

            ui.label("Segmentos ativos:");
            ui.horizontal(|ui| {
                for segmento in Segmento::TODOS {
                    let mut marcado = self.escola.segmentos_ativos.contains(&segmento);
                    if ui
                        .checkbox(&mut marcado, segmento.sigla())
                        .on_hover_text(segmento.nome())
                        .changed()
                    {
                        if marcado {
                            self.escola.segmentos_ativos.push(segmento);
                        } else {
                            self.escola.segmentos_ativos.retain(|s| *s != segmento);
                        }
                    }
                }
            });
        });
    }

    fn concluir(
        &mut self,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) -> anyhow::Result<()> {
        if self.nome.trim().is_empty() {
            anyhow::bail!("Informe seu nome completo");
        }
        if self.cargo.is_empty() {
            anyhow::bail!("Selecione seu cargo");
        }
        if !self.nova_senha.is_empty() {
            validar_senha_cadastro(&self.nova_senha)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }
        validar_pin(&self.pin).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if self.precisa_escola {
            self.escola
                .validate()
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        }

        let email = state
            .email_logado()
            .ok_or_else(|| anyhow::anyhow!("Sessão expirada"))?
            .to_string();
        let usuario = data
            .usuario_mut(&email)
            .ok_or_else(|| anyhow::anyhow!("Conta não encontrada"))?;

        // Quem ainda usa a senha padrão precisa trocar agora
        if usuario.password == SENHA_PADRAO && self.nova_senha.is_empty() {
            anyhow::bail!("Defina uma nova senha para substituir a padrão");
        }

        usuario.nome = Some(self.nome.trim().to_string());
        usuario.cargo = Some(self.cargo.clone());
        if !self.nova_senha.is_empty() {
            usuario.password = self.nova_senha.clone();
        }
        usuario.pin = Some(self.pin.clone());
        usuario.profile_completed = true;

        if self.precisa_escola {
            data.escola = self.escola.clone();
        }

        data.persist(db);
        tracing::info!("Cadastro inicial concluído por {}", email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::Sessao;

    fn ambiente() -> (SetupView, AppState, AppData, Database) {
        let mut state = AppState::new();
        state.sessao = Some(Sessao {
            email: "guibson@univap.br".to_string(),
        });

        let mut view = SetupView::new();
        view.nome = "Guibson Silva".to_string();
        view.cargo = CARGOS[0].to_string();
        view.nova_senha = "senha123".to_string();

        (view, state, AppData::default(), Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_concluir_exige_pin() {
        let (mut view, mut state, mut data, db) = ambiente();

        let resultado = view.concluir(&mut state, &mut data, &db);
        assert!(resultado.is_err());

        let usuario = data.usuario("guibson@univap.br").unwrap();
        assert!(usuario.pin.is_none());
        assert!(!usuario.profile_completed);
    }

    #[test]
    fn test_concluir_rejeita_pin_curto() {
        let (mut view, mut state, mut data, db) = ambiente();
        view.pin = "123".to_string();

        assert!(view.concluir(&mut state, &mut data, &db).is_err());
        assert!(!data.usuario("guibson@univap.br").unwrap().profile_completed);
    }

    #[test]
    fn test_concluir_grava_pin() {
        let (mut view, mut state, mut data, db) = ambiente();
        view.pin = "123456".to_string();

        view.concluir(&mut state, &mut data, &db).unwrap();

        let usuario = data.usuario("guibson@univap.br").unwrap();
        assert_eq!(usuario.pin.as_deref(), Some("123456"));
        assert!(usuario.profile_completed);
    }
}
