use std::collections::BTreeMap;

use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::models::{Fase, Participante};
use crate::services::auth::{AcaoProtegida, PedidoPin};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::date::format_nota;

/// Edição de uma inscrição: contato e lançamento de notas por fase.
///
/// Limpar uma nota já lançada passa pela trava de PIN; lançar ou
/// corrigir um valor não.
pub struct ParticipanteFormModal {
    loaded: bool,
    draft: Option<Participante>,
    fases: Vec<Fase>,
    nota_bufs: BTreeMap<String, String>,
    error_message: Option<String>,
}

impl ParticipanteFormModal {
    pub fn new() -> Self {
        Self {
            loaded: false,
            draft: None,
            fases: Vec::new(),
            nota_bufs: BTreeMap::new(),
            error_message: None,
        }
    }

    /// Limpa a nota de uma fase na cópia de trabalho (chamado após o PIN)
    pub fn limpar_nota(&mut self, fase_id: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.definir_nota(fase_id, None);
        }
        self.nota_bufs.insert(fase_id.to_string(), String::new());
    }

    pub fn participante_id(&self) -> Option<&str> {
        self.draft.as_ref().map(|p| p.id.as_str())
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

        let Some(mut draft) = self.draft.take() else {
            // Inscrição sumiu da base; nada a editar
            return true;
        };

        egui::Window::new("Editar participante")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(420.0);

                ui.label(RichText::new(&draft.nome).strong().size(16.0));
                ui.label(
                    RichText::new(format!(
                        "{} · {}",
                        draft.segmento.nome(),
                        data.nome_turma(&draft.turma_id).unwrap_or("N/A")
                    ))
                    .small()
                    .color(Colors::TEXT_SECONDARY),
                );
                ui.add_space(8.0);

                egui::Grid::new("participante_form_grid")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("E-mail:");
                        ui.add(egui::TextEdit::singleline(&mut draft.email).desired_width(260.0));
                        ui.end_row();
                    });

                ui.separator();
                ui.label(RichText::new("Notas por fase").strong());

                if self.fases.is_empty() {
                    ui.label(
                        RichText::new("A olimpíada não tem fases cadastradas")
                            .color(Colors::TEXT_MUTED),
                    );
                }

                let mut pedir_limpeza: Option<String> = None;
                egui::Grid::new("participante_notas_grid")
                    .num_columns(3)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for fase in &self.fases {
                            ui.label(&fase.nome);

                            let buf = self.nota_bufs.entry(fase.id.clone()).or_default();
                            ui.add(
                                egui::TextEdit::singleline(buf)
                                    .hint_text("sem nota")
                                    .desired_width(80.0),
                            );

                            if draft.tem_nota(&fase.id) {
                                if ui
                                    .small_button(Icons::DELETE)
                                    .on_hover_text("Limpar nota lançada")
                                    .clicked()
                                {
                                    pedir_limpeza = Some(fase.id.clone());
                                }
                            } else {
                                ui.label("");
                            }
                            ui.end_row();
                        }
                    });

                if let Some(fase_id) = pedir_limpeza {
                    state.solicitar_pin(
                        data,
                        PedidoPin::simples(AcaoProtegida::LimparNota {
                            participante_id: draft.id.clone(),
                            fase_id,
                        }),
                    );
                }

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!(
                        "Pontuação total: {}",
                        format_nota(draft.pontuacao_total())
                    ))
                    .color(Colors::TEXT_SECONDARY),
                );

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
                            match self.save(&mut draft, data, db) {
                                Ok(_) => {
                                    self.reset();
                                    should_close = true;
                                    state.show_success("Participante atualizado!");
                                }
                                Err(e) => {
                                    self.error_message = Some(e.to_string());
                                }
                            }
                        }
                    });
                });
            });

        if !should_close {
            self.draft = Some(draft);
        }

        should_close
    }

    fn carregar(&mut self, state: &AppState, data: &AppData) {
        self.draft = state
            .editing_participante_id
            .as_deref()
            .and_then(|id| data.participante(id))
            .cloned();

        self.fases = self
            .draft
            .as_ref()
            .and_then(|p| data.olimpiada(&p.olimpiada_id))
            .map(|o| o.fases.clone())
            .unwrap_or_default();

        self.nota_bufs = self
            .draft
            .as_ref()
            .map(|p| {
                self.fases
                    .iter()
                    .map(|f| {
                        let texto = p
                            .nota_da_fase(&f.id)
                            .map(|v| format!("{:.1}", v).replace('.', ","))
                            .unwrap_or_default();
                        (f.id.clone(), texto)
                    })
                    .collect()
            })
            .unwrap_or_default();

        self.error_message = None;
        self.loaded = true;
    }

    fn save(&mut self, draft: &mut Participante, data: &mut AppData, db: &Database) -> anyhow::Result<()> {
        for fase in &self.fases {
            let buf = self
                .nota_bufs
                .get(&fase.id)
                .map(|s| s.trim())
                .unwrap_or_default();

            if buf.is_empty() {
                if draft.tem_nota(&fase.id) {
                    return Err(anyhow::anyhow!(
                        "Para limpar a nota de \"{}\" use o botão de limpeza",
                        fase.nome
                    ));
                }
                continue;
            }

            let valor: f64 = buf
                .replace(',', ".")
                .parse()
                .map_err(|_| anyhow::anyhow!("Nota inválida na fase \"{}\"", fase.nome))?;
            if valor < 0.0 {
                return Err(anyhow::anyhow!("A nota não pode ser negativa"));
            }
            draft.definir_nota(&fase.id, Some(valor));
        }

        draft.email = draft.email.trim().to_string();

        if let Some(existente) = data.participante_mut(&draft.id) {
            *existente = draft.clone();
        } else {
            return Err(anyhow::anyhow!("Inscrição não encontrada"));
        }
        data.persist(db);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.loaded = false;
        self.draft = None;
        self.fases.clear();
        self.nota_bufs.clear();
        self.error_message = None;
    }
}
