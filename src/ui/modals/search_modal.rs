use egui::{self, RichText};

use crate::data::AppData;
use crate::services::inscricao::InscricaoService;
use crate::ui::theme::{Colors, Icons};
use crate::utils::date::format_nota;

/// Busca de alunos por nome, agrupada por estudante.
pub struct SearchModal {
    consulta: String,
}

impl SearchModal {
    pub fn new() -> Self {
        Self {
            consulta: String::new(),
        }
    }

    /// Exibe o modal e retorna true quando ele deve fechar
    pub fn show(&mut self, ctx: &egui::Context, data: &AppData) -> bool {
        let mut should_close = false;

        egui::Window::new(format!("{} Buscar aluno", Icons::SEARCH))
            .collapsible(false)
            .resizable(true)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(440.0);

                let resposta = ui.add(
                    egui::TextEdit::singleline(&mut self.consulta)
                        .hint_text("Nome do aluno (mínimo 2 letras)")
                        .desired_width(f32::INFINITY),
                );
                resposta.request_focus();

                ui.add_space(8.0);

                let grupos = InscricaoService::buscar_por_nome(data, &self.consulta);

                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    if self.consulta.trim().len() >= 2 && grupos.is_empty() {
                        ui.label(
                            RichText::new("Nenhum aluno encontrado").color(Colors::TEXT_MUTED),
                        );
                    }

                    for (nome, inscricoes) in &grupos {
                        ui.label(RichText::new(nome).strong());
                        for p in inscricoes {
                            let olimpiada = data
                                .olimpiada(&p.olimpiada_id)
                                .map(|o| o.nome.as_str())
                                .unwrap_or("(olimpíada removida)");
                            ui.horizontal(|ui| {
                                ui.add_space(12.0);
                                ui.label(format!("{} {}", Icons::TROPHY, olimpiada));
                                ui.label(
                                    RichText::new(data.nome_turma(&p.turma_id).unwrap_or("N/A"))
                                        .small()
                                        .color(Colors::TEXT_SECONDARY),
                                );
                                ui.label(
                                    RichText::new(format!(
                                        "{} pts",
                                        format_nota(p.pontuacao_total())
                                    ))
                                    .small()
                                    .color(Colors::TEXT_MUTED),
                                );
                            });
                        }
                        ui.add_space(6.0);
                    }
                });

                ui.add_space(12.0);
                if ui.button("Fechar").clicked() {
                    self.consulta.clear();
                    should_close = true;
                }
            });

        should_close
    }
}
