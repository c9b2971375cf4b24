use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::models::{Fase, Olimpiada, Segmento, StatusInscricao};
use crate::services::auth::{AcaoProtegida, PedidoPin};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::date::{format_date, format_datetime_utc, parse_date};

/// Formulário de cadastro e edição de olimpíadas.
///
/// Trabalha sobre uma cópia: nada muda na base até o salvamento. As
/// credenciais do portal externo ficam ocultas em registros existentes
/// e só abrem depois da trava de PIN.
pub struct OlympiadFormModal {
    loaded: bool,
    draft: Olimpiada,
    inicio_buf: String,
    fim_buf: String,
    custo_escola_buf: String,
    custo_aluno_buf: String,
    nova_fase_nome: String,
    nova_fase_data: String,
    nova_observacao: String,
    credenciais_desbloqueadas: bool,
    error_message: Option<String>,
}

impl OlympiadFormModal {
    pub fn new() -> Self {
        Self {
            loaded: false,
            draft: Olimpiada::default(),
            inicio_buf: String::new(),
            fim_buf: String::new(),
            custo_escola_buf: String::new(),
            custo_aluno_buf: String::new(),
            nova_fase_nome: String::new(),
            nova_fase_data: String::new(),
            nova_observacao: String::new(),
            credenciais_desbloqueadas: false,
            error_message: None,
        }
    }

    /// Libera a exibição das credenciais (chamado após o acerto do PIN)
    pub fn desbloquear_credenciais(&mut self) {
        self.credenciais_desbloqueadas = true;
    }

    /// Remove uma anotação da cópia de trabalho (chamado após o PIN)
    pub fn remover_observacao(&mut self, observacao_id: &str) {
        self.draft.remover_observacao(observacao_id);
    }

    pub fn olimpiada_id(&self) -> &str {
        &self.draft.id
    }

    /// Exibe o formulário e retorna true quando ele deve fechar
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) -> bool {
        let mut should_close = false;

        if !self.loaded {
            self.carregar(state, data);
        }

        let editando = state.editing_olimpiada_id.is_some();
        let title = if editando {
            "Editar olimpíada"
        } else {
            "Nova olimpíada"
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(true)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(520.0);
                ui.set_max_height(520.0);

                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.secao_dados_gerais(ui);
                    ui.separator();
                    self.secao_credenciais(ui, state, data);
                    ui.separator();
                    self.secao_segmentos(ui);
                    ui.separator();
                    self.secao_fases(ui);
                    ui.separator();
                    self.secao_observacoes(ui, state, data);
                });

                if let Some(ref error) = self.error_message {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).color(Colors::ERROR));
                }

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        self.reset();
                        should_close = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(format!("{} Salvar", Icons::SAVE)).clicked() {
                            match self.save(data, db) {
                                Ok(_) => {
                                    self.reset();
                                    should_close = true;
                                    state.show_success("Olimpíada salva!");
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

    fn carregar(&mut self, state: &AppState, data: &AppData) {
        match state
            .editing_olimpiada_id
            .as_deref()
            .and_then(|id| data.olimpiada(id))
        {
            Some(existente) => {
                self.draft = existente.clone();
                self.inicio_buf = self.draft.inicio_inscricao.map(format_date).unwrap_or_default();
                self.fim_buf = self.draft.fim_inscricao.map(format_date).unwrap_or_default();
                self.custo_escola_buf = format!("{:.2}", self.draft.custo_escola);
                self.custo_aluno_buf = format!("{:.2}", self.draft.custo_aluno);
                self.credenciais_desbloqueadas = false;
            }
            None => {
                self.draft = Olimpiada::new("");
                self.inicio_buf.clear();
                self.fim_buf.clear();
                self.custo_escola_buf.clear();
                self.custo_aluno_buf.clear();
                // Registro novo ainda não tem segredo a proteger
                self.credenciais_desbloqueadas = true;
            }
        }
        self.nova_fase_nome.clear();
        self.nova_fase_data.clear();
        self.nova_observacao.clear();
        self.error_message = None;
        self.loaded = true;
    }

    fn secao_dados_gerais(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("olimpiada_form_grid")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                ui.label("Nome:");
                ui.add(egui::TextEdit::singleline(&mut self.draft.nome).desired_width(320.0));
                ui.end_row();

                ui.label("Site:");
                ui.add(egui::TextEdit::singleline(&mut self.draft.site).desired_width(320.0));
                ui.end_row();

                ui.label("Telefone:");
                ui.add(egui::TextEdit::singleline(&mut self.draft.telefone).desired_width(160.0));
                ui.end_row();

                ui.label("E-mail:");
                ui.add(egui::TextEdit::singleline(&mut self.draft.email).desired_width(320.0));
                ui.end_row();

                ui.label("Início das inscrições:");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.inicio_buf).desired_width(100.0));
                    ui.label(RichText::new("dd/mm/aaaa").small().color(Colors::TEXT_MUTED));
                });
                ui.end_row();

                ui.label("Fim das inscrições:");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.fim_buf).desired_width(100.0));
                    ui.label(RichText::new("dd/mm/aaaa").small().color(Colors::TEXT_MUTED));
                });
                ui.end_row();

                ui.label("Status das inscrições:");
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.draft.status, StatusInscricao::Aberta, "Aberta");
                    ui.selectable_value(&mut self.draft.status, StatusInscricao::Fechada, "Fechada");
                });
                ui.end_row();

                ui.label("Custo para a escola (R$):");
                ui.add(egui::TextEdit::singleline(&mut self.custo_escola_buf).desired_width(100.0));
                ui.end_row();

                ui.label("Custo por aluno (R$):");
                ui.add(egui::TextEdit::singleline(&mut self.custo_aluno_buf).desired_width(100.0));
                ui.end_row();
            });
    }

    fn secao_credenciais(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        ui.label(RichText::new("Credenciais do portal externo").strong());

        if self.credenciais_desbloqueadas {
            egui::Grid::new("olimpiada_cred_grid")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Login:");
                    ui.add(egui::TextEdit::singleline(&mut self.draft.login).desired_width(240.0));
                    ui.end_row();

                    ui.label("Senha:");
                    ui.add(egui::TextEdit::singleline(&mut self.draft.senha).desired_width(240.0));
                    ui.end_row();
                });
        } else {
            ui.horizontal(|ui| {
                ui.label(RichText::new("••••••••").color(Colors::TEXT_MUTED));
                if ui
                    .button(format!("{} Exibir credenciais", Icons::UNLOCK))
                    .clicked()
                {
                    state.solicitar_pin(
                        data,
                        PedidoPin::simples(AcaoProtegida::DesbloquearCredenciais),
                    );
                }
            });
        }
    }

    fn secao_segmentos(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Segmentos atendidos").strong());
        ui.horizontal(|ui| {
            for segmento in Segmento::TODOS {
                let mut marcado = self.draft.segmentos.contains(&segmento);
                if ui.checkbox(&mut marcado, segmento.sigla()).on_hover_text(segmento.nome()).changed() {
                    if marcado {
                        self.draft.segmentos.push(segmento);
                    } else {
                        self.draft.segmentos.retain(|s| *s != segmento);
                    }
                }
            }
        });
    }

    fn secao_fases(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Fases").strong());

        let mut remover: Option<usize> = None;
        for (i, fase) in self.draft.fases.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(&fase.nome);
                match fase.data {
                    Some(data) => ui.label(
                        RichText::new(format_date(data)).small().color(Colors::TEXT_SECONDARY),
                    ),
                    None => ui.label(RichText::new("sem data").small().color(Colors::TEXT_MUTED)),
                };
                if ui.small_button(Icons::DELETE).clicked() {
                    remover = Some(i);
                }
            });
        }
        if let Some(i) = remover {
            self.draft.fases.remove(i);
        }

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.nova_fase_nome)
                    .hint_text("Nome da fase")
                    .desired_width(160.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.nova_fase_data)
                    .hint_text("dd/mm/aaaa")
                    .desired_width(90.0),
            );
            if ui.button(format!("{} Fase", Icons::ADD)).clicked()
                && !self.nova_fase_nome.trim().is_empty()
            {
                let data = parse_date(&self.nova_fase_data);
                self.draft
                    .fases
                    .push(Fase::new(self.nova_fase_nome.trim(), data));
                self.nova_fase_nome.clear();
                self.nova_fase_data.clear();
            }
        });
    }

    fn secao_observacoes(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        ui.label(RichText::new("Observações").strong());

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.nova_observacao)
                    .hint_text("Nova anotação")
                    .desired_width(320.0),
            );
            if ui.button(format!("{} Anotar", Icons::NOTE)).clicked()
                && !self.nova_observacao.trim().is_empty()
            {
                let texto = self.nova_observacao.trim().to_string();
                self.draft.adicionar_observacao(texto);
                self.nova_observacao.clear();
            }
        });

        // Mais recente no topo
        let mut pedido_remocao: Option<String> = None;
        for obs in &self.draft.observacoes {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format_datetime_utc(obs.data))
                        .small()
                        .color(Colors::TEXT_MUTED),
                );
                ui.label(&obs.texto);
                if ui.small_button(Icons::DELETE).clicked() {
                    pedido_remocao = Some(obs.id.clone());
                }
            });
        }

        if let Some(observacao_id) = pedido_remocao {
            state.solicitar_pin(
                data,
                PedidoPin::simples(AcaoProtegida::RemoverObservacao {
                    olimpiada_id: self.draft.id.clone(),
                    observacao_id,
                }),
            );
        }
    }

    fn save(&mut self, data: &mut AppData, db: &Database) -> anyhow::Result<()> {
        self.draft.nome = self.draft.nome.trim().to_string();

        self.draft.inicio_inscricao = if self.inicio_buf.trim().is_empty() {
            None
        } else {
            Some(
                parse_date(&self.inicio_buf)
                    .ok_or_else(|| anyhow::anyhow!("Data de início inválida (use dd/mm/aaaa)"))?,
            )
        };

        self.draft.fim_inscricao = if self.fim_buf.trim().is_empty() {
            None
        } else {
            Some(
                parse_date(&self.fim_buf)
                    .ok_or_else(|| anyhow::anyhow!("Data de encerramento inválida (use dd/mm/aaaa)"))?,
            )
        };

        self.draft.custo_escola = parse_valor(&self.custo_escola_buf)
            .ok_or_else(|| anyhow::anyhow!("Custo para a escola inválido"))?;
        self.draft.custo_aluno = parse_valor(&self.custo_aluno_buf)
            .ok_or_else(|| anyhow::anyhow!("Custo por aluno inválido"))?;

        self.draft
            .validate()
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        data.salvar_olimpiada(self.draft.clone());
        data.persist(db);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.loaded = false;
        self.error_message = None;
    }
}

/// Aceita vírgula ou ponto como separador decimal; vazio vale zero
fn parse_valor(texto: &str) -> Option<f64> {
    let texto = texto.trim();
    if texto.is_empty() {
        return Some(0.0);
    }
    texto.replace(',', ".").parse::<f64>().ok().filter(|v| *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valor() {
        assert_eq!(parse_valor(""), Some(0.0));
        assert_eq!(parse_valor("12,50"), Some(12.5));
        assert_eq!(parse_valor("12.50"), Some(12.5));
        assert_eq!(parse_valor("-1"), None);
        assert_eq!(parse_valor("abc"), None);
    }
}
