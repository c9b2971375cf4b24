use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::services::auth::{AcaoProtegida, PedidoPin};
use crate::services::inscricao::InscricaoService;
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::date::format_nota;

/// Inscrições: inclusão individual, em lote e lista por olimpíada.
pub struct ParticipantesView {
    olimpiada_selecionada: Option<String>,
    turma_inscricao: Option<String>,
    estudante_inscricao: Option<String>,
    email_inscricao: String,
    filtro_turma: Option<String>,
}

impl ParticipantesView {
    pub fn new() -> Self {
        Self {
            olimpiada_selecionada: None,
            turma_inscricao: None,
            estudante_inscricao: None,
            email_inscricao: String::new(),
            filtro_turma: None,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        ui.heading(format!("{} Participantes", Icons::PERSON));
        ui.add_space(8.0);

        self.seletor_olimpiada(ui, data);

        let Some(olimpiada_id) = self.olimpiada_selecionada.clone() else {
            ui.add_space(8.0);
            ui.label(RichText::new("Selecione uma olimpíada").color(Colors::TEXT_MUTED));
            return;
        };
        if data.olimpiada(&olimpiada_id).is_none() {
            self.olimpiada_selecionada = None;
            return;
        }

        ui.add_space(8.0);
        self.secao_inscricao(ui, state, data, db, &olimpiada_id);
        ui.separator();
        self.lista_participantes(ui, state, data, &olimpiada_id);
    }

    fn seletor_olimpiada(&mut self, ui: &mut egui::Ui, data: &AppData) {
        ui.horizontal(|ui| {
            ui.label("Olimpíada:");
            let atual = self
                .olimpiada_selecionada
                .as_deref()
                .and_then(|id| data.olimpiada(id))
                .map(|o| o.nome.clone())
                .unwrap_or_else(|| "Selecione".to_string());

            egui::ComboBox::from_id_salt("participantes_olimpiada")
                .selected_text(atual)
                .width(240.0)
                .show_ui(ui, |ui| {
                    for olimpiada in &data.olimpiadas {
                        let marcada =
                            self.olimpiada_selecionada.as_deref() == Some(olimpiada.id.as_str());
                        if ui.selectable_label(marcada, &olimpiada.nome).clicked() {
                            self.olimpiada_selecionada = Some(olimpiada.id.clone());
                            self.turma_inscricao = None;
                            self.estudante_inscricao = None;
                            self.filtro_turma = None;
                        }
                    }
                });
        });
    }

    fn secao_inscricao(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
        olimpiada_id: &str,
    ) {
        ui.label(RichText::new("Nova inscrição").strong());

        // Apenas turmas de segmento atendido pela olimpíada
        let turmas: Vec<(String, String)> = data
            .olimpiada(olimpiada_id)
            .map(|o| {
                data.turmas_compativeis(o)
                    .into_iter()
                    .map(|t| (t.id.clone(), format!("{} ({})", t.nome, t.segmento.sigla())))
                    .collect()
            })
            .unwrap_or_default();

        if turmas.is_empty() {
            ui.label(
                RichText::new("Nenhuma turma compatível com os segmentos desta olimpíada")
                    .color(Colors::TEXT_MUTED),
            );
            return;
        }

        ui.horizontal(|ui| {
            let turma_texto = self
                .turma_inscricao
                .as_deref()
                .and_then(|id| turmas.iter().find(|(tid, _)| tid == id))
                .map(|(_, nome)| nome.clone())
                .unwrap_or_else(|| "Turma".to_string());

            egui::ComboBox::from_id_salt("inscricao_turma")
                .selected_text(turma_texto)
                .width(160.0)
                .show_ui(ui, |ui| {
                    for (id, nome) in &turmas {
                        let marcada = self.turma_inscricao.as_deref() == Some(id.as_str());
                        if ui.selectable_label(marcada, nome).clicked() {
                            self.turma_inscricao = Some(id.clone());
                            self.estudante_inscricao = None;
                        }
                    }
                });

            let estudantes: Vec<(String, String)> = self
                .turma_inscricao
                .as_deref()
                .and_then(|id| data.turma(id))
                .map(|t| {
                    t.estudantes
                        .iter()
                        .map(|e| (e.id.clone(), e.nome.clone()))
                        .collect()
                })
                .unwrap_or_default();

            let estudante_texto = self
                .estudante_inscricao
                .as_deref()
                .and_then(|id| estudantes.iter().find(|(eid, _)| eid == id))
                .map(|(_, nome)| nome.clone())
                .unwrap_or_else(|| "Aluno".to_string());

            egui::ComboBox::from_id_salt("inscricao_estudante")
                .selected_text(estudante_texto)
                .width(160.0)
                .show_ui(ui, |ui| {
                    for (id, nome) in &estudantes {
                        let marcado = self.estudante_inscricao.as_deref() == Some(id.as_str());
                        if ui.selectable_label(marcado, nome).clicked() {
                            self.estudante_inscricao = Some(id.clone());
                        }
                    }
                });

            ui.add(
                egui::TextEdit::singleline(&mut self.email_inscricao)
                    .hint_text("E-mail (opcional)")
                    .desired_width(160.0),
            );

            if ui.button(format!("{} Inscrever", Icons::ADD)).clicked() {
                match (self.turma_inscricao.as_deref(), self.estudante_inscricao.as_deref()) {
                    (Some(turma_id), Some(estudante_id)) => {
                        match InscricaoService::inscrever(
                            data,
                            olimpiada_id,
                            turma_id,
                            estudante_id,
                            &self.email_inscricao,
                        ) {
                            Ok(_) => {
                                data.persist(db);
                                self.estudante_inscricao = None;
                                self.email_inscricao.clear();
                                state.show_success("Inscrição realizada");
                            }
                            Err(e) => state.show_error(&e.to_string()),
                        }
                    }
                    _ => state.show_error("Selecione a turma e o aluno"),
                }
            }

            if ui
                .button(format!("{} Turma inteira", Icons::PEOPLE))
                .on_hover_text("Inscreve todos os alunos da turma; quem já está inscrito é pulado")
                .clicked()
            {
                match self.turma_inscricao.as_deref() {
                    Some(turma_id) => {
                        match InscricaoService::inscrever_turma(data, olimpiada_id, turma_id) {
                            Ok(adicionados) => {
                                data.persist(db);
                                state.show_success(&format!(
                                    "{} alunos inscritos",
                                    adicionados
                                ));
                            }
                            Err(e) => state.show_error(&e.to_string()),
                        }
                    }
                    None => state.show_error("Selecione a turma"),
                }
            }
        });
    }

    fn lista_participantes(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &AppData,
        olimpiada_id: &str,
    ) {
        // Filtro por turma entre as que têm inscritos
        let mut turmas_presentes: Vec<String> = data
            .participantes
            .iter()
            .filter(|p| p.olimpiada_id == olimpiada_id)
            .map(|p| p.turma_id.clone())
            .collect();
        turmas_presentes.sort();
        turmas_presentes.dedup();

        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.filtro_turma.is_none(), "Todas as turmas")
                .clicked()
            {
                self.filtro_turma = None;
            }
            for turma_id in &turmas_presentes {
                if ui
                    .selectable_label(
                        self.filtro_turma.as_deref() == Some(turma_id.as_str()),
                        data.nome_turma(turma_id).unwrap_or("N/A"),
                    )
                    .clicked()
                {
                    self.filtro_turma = Some(turma_id.clone());
                }
            }
        });

        let inscritos: Vec<_> = data
            .participantes
            .iter()
            .filter(|p| p.olimpiada_id == olimpiada_id)
            .filter(|p| {
                self.filtro_turma
                    .as_deref()
                    .map_or(true, |t| p.turma_id == t)
            })
            .collect();

        ui.label(
            RichText::new(format!("{} inscritos", inscritos.len()))
                .small()
                .color(Colors::TEXT_SECONDARY),
        );

        let mut editar: Option<String> = None;
        let mut excluir: Option<String> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for p in inscritos {
                egui::Frame::none()
                    .fill(ui.visuals().extreme_bg_color)
                    .rounding(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(&p.nome).strong());
                                ui.label(
                                    RichText::new(format!(
                                        "{} · {} · {} pts",
                                        data.nome_turma(&p.turma_id).unwrap_or("N/A"),
                                        p.segmento.sigla(),
                                        format_nota(p.pontuacao_total())
                                    ))
                                    .small()
                                    .color(Colors::TEXT_SECONDARY),
                                );
                            });

                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui
                                        .small_button(Icons::DELETE)
                                        .on_hover_text("Excluir inscrição")
                                        .clicked()
                                    {
                                        excluir = Some(p.id.clone());
                                    }
                                    if ui
                                        .small_button(Icons::EDIT)
                                        .on_hover_text("Editar notas e contato")
                                        .clicked()
                                    {
                                        editar = Some(p.id.clone());
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(4.0);
            }
        });

        if let Some(id) = editar {
            state.open_participante_form(&id);
        }
        if let Some(id) = excluir {
            state.solicitar_pin(
                data,
                PedidoPin::simples(AcaoProtegida::ExcluirParticipante(id)),
            );
        }
    }
}
