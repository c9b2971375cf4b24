use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::models::{Segmento, Turma};
use crate::services::auth::{AcaoProtegida, PedidoPin};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

/// Gestão de turmas e de seus alunos.
pub struct TurmasView {
    selecionada: Option<String>,
    nova_turma_nome: String,
    nova_turma_segmento: Segmento,
    novo_aluno: String,
    lote: String,
    mostrar_lote: bool,
}

impl TurmasView {
    pub fn new() -> Self {
        Self {
            selecionada: None,
            nova_turma_nome: String::new(),
            nova_turma_segmento: Segmento::FundamentalAnosIniciais,
            novo_aluno: String::new(),
            lote: String::new(),
            mostrar_lote: false,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        ui.heading(format!("{} Turmas", Icons::PEOPLE));
        ui.add_space(8.0);

        ui.columns(2, |colunas| {
            self.coluna_turmas(&mut colunas[0], state, data, db);
            self.coluna_alunos(&mut colunas[1], state, data, db);
        });
    }

    fn coluna_turmas(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        // Cadastro
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.nova_turma_nome)
                    .hint_text("Nome da turma")
                    .desired_width(140.0),
            );
            egui::ComboBox::from_id_salt("nova_turma_segmento")
                .selected_text(self.nova_turma_segmento.sigla())
                .width(70.0)
                .show_ui(ui, |ui| {
                    for segmento in Segmento::TODOS {
                        ui.selectable_value(
                            &mut self.nova_turma_segmento,
                            segmento,
                            segmento.nome(),
                        );
                    }
                });
            if ui.button(Icons::ADD).on_hover_text("Criar turma").clicked() {
                let nome = self.nova_turma_nome.trim();
                if nome.is_empty() {
                    state.show_error("Informe o nome da turma");
                } else {
                    let turma = Turma::new(nome, self.nova_turma_segmento);
                    self.selecionada = Some(turma.id.clone());
                    data.salvar_turma(turma);
                    data.persist(db);
                    self.nova_turma_nome.clear();
                    state.show_success("Turma criada");
                }
            }
        });

        ui.separator();

        let mut excluir: Option<String> = None;
        egui::ScrollArea::vertical()
            .id_salt("lista_turmas")
            .show(ui, |ui| {
                if data.turmas.is_empty() {
                    ui.label(RichText::new("Nenhuma turma cadastrada").color(Colors::TEXT_MUTED));
                }

                for turma in &data.turmas {
                    ui.horizontal(|ui| {
                        let marcada = self.selecionada.as_deref() == Some(turma.id.as_str());
                        if ui
                            .selectable_label(
                                marcada,
                                format!(
                                    "{} ({}) · {} alunos",
                                    turma.nome,
                                    turma.segmento.sigla(),
                                    turma.estudantes.len()
                                ),
                            )
                            .clicked()
                        {
                            self.selecionada = Some(turma.id.clone());
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .small_button(Icons::DELETE)
                                .on_hover_text("Excluir turma")
                                .clicked()
                            {
                                excluir = Some(turma.id.clone());
                            }
                        });
                    });
                }
            });

        if let Some(id) = excluir {
            state.solicitar_pin(data, PedidoPin::simples(AcaoProtegida::ExcluirTurma(id)));
        }
    }

    fn coluna_alunos(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        let Some(turma_id) = self.selecionada.clone() else {
            ui.label(RichText::new("Selecione uma turma").color(Colors::TEXT_MUTED));
            return;
        };

        let Some(turma) = data.turma(&turma_id) else {
            self.selecionada = None;
            return;
        };
        let nome_turma = turma.nome.clone();
        let total = turma.estudantes.len();

        ui.label(RichText::new(format!("Alunos de {}", nome_turma)).strong());
        ui.label(
            RichText::new(format!("{} alunos", total))
                .small()
                .color(Colors::TEXT_SECONDARY),
        );

        // Inclusão individual
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.novo_aluno)
                    .hint_text("Nome do aluno")
                    .desired_width(180.0),
            );
            if ui.button(Icons::ADD).on_hover_text("Adicionar aluno").clicked() {
                let nome = self.novo_aluno.trim().to_string();
                if nome.is_empty() {
                    state.show_error("Informe o nome do aluno");
                } else if let Some(turma) = data.turma_mut(&turma_id) {
                    turma.adicionar_em_lote(&nome);
                    data.persist(db);
                    self.novo_aluno.clear();
                }
            }

            if ui
                .selectable_label(self.mostrar_lote, "Em lote")
                .on_hover_text("Um nome por linha")
                .clicked()
            {
                self.mostrar_lote = !self.mostrar_lote;
            }
        });

        if self.mostrar_lote {
            ui.add(
                egui::TextEdit::multiline(&mut self.lote)
                    .hint_text("Um nome por linha")
                    .desired_rows(5)
                    .desired_width(f32::INFINITY),
            );
            if ui.button(format!("{} Incluir lista", Icons::ADD)).clicked() {
                if let Some(turma) = data.turma_mut(&turma_id) {
                    let incluidos = turma.adicionar_em_lote(&self.lote);
                    data.persist(db);
                    self.lote.clear();
                    state.show_success(&format!("{} alunos incluídos", incluidos));
                }
            }
        }

        ui.separator();

        let mut remover: Option<String> = None;
        egui::ScrollArea::vertical()
            .id_salt("lista_alunos")
            .show(ui, |ui| {
                if let Some(turma) = data.turma(&turma_id) {
                    for estudante in &turma.estudantes {
                        ui.horizontal(|ui| {
                            ui.label(format!("{} {}", Icons::PERSON, estudante.nome));
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui
                                        .small_button(Icons::DELETE)
                                        .on_hover_text("Remover da turma")
                                        .clicked()
                                    {
                                        remover = Some(estudante.id.clone());
                                    }
                                },
                            );
                        });
                    }
                }
            });

        if let Some(estudante_id) = remover {
            state.solicitar_pin(
                data,
                PedidoPin::simples(AcaoProtegida::ExcluirEstudante {
                    turma_id,
                    estudante_id,
                }),
            );
        }
    }
}
