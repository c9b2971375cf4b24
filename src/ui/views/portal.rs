use egui::{self, RichText};

use crate::data::AppData;
use crate::db::Database;
use crate::services::auth;
use crate::services::inscricao::InscricaoService;
use crate::ui::{
    state::{AppState, View},
    theme::{Colors, Icons},
};
use crate::utils::date::{format_date, format_nota};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AbaPortal {
    #[default]
    Inscricao,
    Consulta,
    Equipe,
}

/// Portal público: auto-inscrição, espaço do candidato e acesso da equipe.
pub struct PortalView {
    aba: AbaPortal,

    // Auto-inscrição
    olimpiada_id: Option<String>,
    turma_id: Option<String>,
    estudante_id: Option<String>,
    email: String,
    confirmando: bool,

    // Espaço do candidato
    consulta_turma_id: Option<String>,
    consulta_estudante_id: Option<String>,
    consulta_email: String,
    consulta_feita: bool,

    // Login da equipe
    login_email: String,
    login_senha: String,
    login_erro: Option<String>,
}

impl PortalView {
    pub fn new() -> Self {
        Self {
            aba: AbaPortal::Inscricao,
            olimpiada_id: None,
            turma_id: None,
            estudante_id: None,
            email: String::new(),
            confirmando: false,
            consulta_turma_id: None,
            consulta_estudante_id: None,
            consulta_email: String::new(),
            consulta_feita: false,
            login_email: String::new(),
            login_senha: String::new(),
            login_erro: None,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.label(
                RichText::new("OFICINA SAPIENS")
                    .size(28.0)
                    .strong()
                    .color(Colors::PRIMARY),
            );
            let subtitulo = if data.escola.configurada() {
                data.escola.nome.clone()
            } else {
                "Programa de olimpíadas do conhecimento".to_string()
            };
            ui.label(RichText::new(subtitulo).color(Colors::TEXT_SECONDARY));
        });

        ui.add_space(12.0);

        ui.horizontal(|ui| {
            ui.add_space(ui.available_width() / 2.0 - 180.0);
            for (aba, rotulo) in [
                (AbaPortal::Inscricao, format!("{} Inscrição", Icons::TROPHY)),
                (AbaPortal::Consulta, format!("{} Minhas participações", Icons::SEARCH)),
                (AbaPortal::Equipe, format!("{} Equipe", Icons::LOCK)),
            ] {
                if ui.selectable_label(self.aba == aba, rotulo).clicked() {
                    self.aba = aba;
                }
            }
        });

        ui.separator();

        match self.aba {
            AbaPortal::Inscricao => self.aba_inscricao(ui, state, data, db),
            AbaPortal::Consulta => self.aba_consulta(ui, data),
            AbaPortal::Equipe => self.aba_equipe(ui, state, data),
        }
    }

    fn aba_inscricao(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
    ) {
        let abertas: Vec<(String, String)> = InscricaoService::listar_abertas(data)
            .into_iter()
            .map(|o| (o.id.clone(), o.nome.clone()))
            .collect();

        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!(
                    "{} olimpíadas com inscrições abertas · {} inscrições realizadas",
                    abertas.len(),
                    data.participantes.len()
                ))
                .small()
                .color(Colors::TEXT_SECONDARY),
            );
        });
        ui.add_space(8.0);

        ui.columns(2, |colunas| {
            self.catalogo(&mut colunas[0], data);
            if abertas.is_empty() {
                colunas[1].add_space(24.0);
                colunas[1].label(
                    RichText::new("Nenhuma olimpíada com inscrições abertas no momento")
                        .color(Colors::TEXT_MUTED),
                );
            } else {
                self.formulario_inscricao(&mut colunas[1], state, data, db, &abertas);
            }
        });
    }

    fn catalogo(&mut self, ui: &mut egui::Ui, data: &AppData) {
        ui.label(RichText::new("Olimpíadas").strong());
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .id_salt("portal_catalogo")
            .show(ui, |ui| {
                if data.olimpiadas.is_empty() {
                    ui.label(
                        RichText::new("Nenhuma olimpíada cadastrada").color(Colors::TEXT_MUTED),
                    );
                }

                for olimpiada in &data.olimpiadas {
                    egui::Frame::none()
                        .fill(ui.visuals().extreme_bg_color)
                        .rounding(4.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&olimpiada.nome).strong());
                                let (rotulo, cor) = if olimpiada.inscricoes_abertas() {
                                    ("Inscrições abertas", Colors::SUCCESS)
                                } else {
                                    ("Inscrições encerradas", Colors::TEXT_MUTED)
                                };
                                ui.label(RichText::new(rotulo).small().color(cor));
                            });
                            if let Some(fim) = olimpiada.fim_inscricao {
                                ui.label(
                                    RichText::new(format!(
                                        "Inscrições até {}",
                                        format_date(fim)
                                    ))
                                    .small()
                                    .color(Colors::TEXT_SECONDARY),
                                );
                            }
                            let siglas = olimpiada
                                .segmentos
                                .iter()
                                .map(|s| s.sigla())
                                .collect::<Vec<_>>()
                                .join(", ");
                            ui.label(
                                RichText::new(siglas).small().color(Colors::TEXT_MUTED),
                            );
                            for fase in &olimpiada.fases {
                                let quando = fase
                                    .data
                                    .map(format_date)
                                    .unwrap_or_else(|| "data a definir".to_string());
                                ui.label(
                                    RichText::new(format!(
                                        "{} {}: {}",
                                        Icons::CALENDAR,
                                        fase.nome,
                                        quando
                                    ))
                                    .small()
                                    .color(Colors::TEXT_SECONDARY),
                                );
                            }
                        });
                    ui.add_space(4.0);
                }
            });
    }

    fn formulario_inscricao(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        data: &mut AppData,
        db: &Database,
        abertas: &[(String, String)],
    ) {
        ui.label(RichText::new("Inscreva-se").strong());
        ui.add_space(4.0);

        egui::Grid::new("portal_inscricao_grid")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                ui.label("Olimpíada:");
                let texto = self
                    .olimpiada_id
                    .as_deref()
                    .and_then(|id| abertas.iter().find(|(oid, _)| oid == id))
                    .map(|(_, nome)| nome.clone())
                    .unwrap_or_else(|| "Selecione".to_string());
                egui::ComboBox::from_id_salt("portal_olimpiada")
                    .selected_text(texto)
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        for (id, nome) in abertas {
                            let marcada = self.olimpiada_id.as_deref() == Some(id.as_str());
                            if ui.selectable_label(marcada, nome).clicked() {
                                self.olimpiada_id = Some(id.clone());
                                self.turma_id = None;
                                self.estudante_id = None;
                            }
                        }
                    });
                ui.end_row();

                ui.label("Turma:");
                // Só turmas de segmento atendido pela olimpíada escolhida
                let turmas: Vec<(String, String)> = self
                    .olimpiada_id
                    .as_deref()
                    .and_then(|id| data.olimpiada(id))
                    .map(|o| {
                        data.turmas_compativeis(o)
                            .into_iter()
                            .map(|t| (t.id.clone(), t.nome.clone()))
                            .collect()
                    })
                    .unwrap_or_default();
                seletor_turma_estudante(
                    ui,
                    "portal_turma",
                    &turmas,
                    &mut self.turma_id,
                    Some(&mut self.estudante_id),
                );
                ui.end_row();

                ui.label("Aluno:");
                let estudantes = estudantes_da_turma(data, self.turma_id.as_deref());
                seletor_turma_estudante(
                    ui,
                    "portal_estudante",
                    &estudantes,
                    &mut self.estudante_id,
                    None,
                );
                ui.end_row();

                ui.label("E-mail:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.email)
                        .hint_text("seu@email.com")
                        .desired_width(200.0),
                );
                ui.end_row();
            });

        ui.add_space(8.0);

        if self.confirmando {
            let aluno = self
                .estudante_id
                .as_deref()
                .zip(self.turma_id.as_deref())
                .and_then(|(eid, tid)| data.turma(tid).and_then(|t| t.estudante(eid)))
                .map(|e| e.nome.clone())
                .unwrap_or_default();
            let olimpiada = self
                .olimpiada_id
                .as_deref()
                .and_then(|id| data.olimpiada(id))
                .map(|o| o.nome.clone())
                .unwrap_or_default();

            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(format!("Inscrever {} na {}?", aluno, olimpiada));
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        if ui.button(format!("{} Confirmar", Icons::CHECK)).clicked() {
                            self.confirmando = false;
                            let resultado = InscricaoService::inscricao_publica(
                                data,
                                self.olimpiada_id.as_deref().unwrap_or(""),
                                self.turma_id.as_deref().unwrap_or(""),
                                self.estudante_id.as_deref().unwrap_or(""),
                                &self.email,
                            );
                            match resultado {
                                Ok(_) => {
                                    data.persist(db);
                                    self.estudante_id = None;
                                    self.email.clear();
                                    state.show_success("Inscrição confirmada! Boa prova.");
                                }
                                Err(e) => state.show_error(&e.to_string()),
                            }
                        }
                        if ui.button("Cancelar").clicked() {
                            self.confirmando = false;
                        }
                    });
                });
        } else if ui
            .button(RichText::new(format!("{} Confirmar inscrição", Icons::CHECK)))
            .clicked()
        {
            let preenchido = self.olimpiada_id.is_some()
                && self.turma_id.is_some()
                && self.estudante_id.is_some()
                && !self.email.trim().is_empty();
            if preenchido {
                self.confirmando = true;
            } else {
                state.show_error("Preencha todos os campos para se inscrever");
            }
        }
    }

    fn aba_consulta(&mut self, ui: &mut egui::Ui, data: &AppData) {
        ui.label(RichText::new("Espaço do candidato").strong());
        ui.label(
            RichText::new("Informe turma, nome e o e-mail usado na inscrição")
                .small()
                .color(Colors::TEXT_SECONDARY),
        );
        ui.add_space(4.0);

        egui::Grid::new("portal_consulta_grid")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                ui.label("Turma:");
                let turmas: Vec<(String, String)> = data
                    .turmas
                    .iter()
                    .map(|t| (t.id.clone(), t.nome.clone()))
                    .collect();
                seletor_turma_estudante(
                    ui,
                    "consulta_turma",
                    &turmas,
                    &mut self.consulta_turma_id,
                    Some(&mut self.consulta_estudante_id),
                );
                ui.end_row();

                ui.label("Aluno:");
                let estudantes = estudantes_da_turma(data, self.consulta_turma_id.as_deref());
                seletor_turma_estudante(
                    ui,
                    "consulta_estudante",
                    &estudantes,
                    &mut self.consulta_estudante_id,
                    None,
                );
                ui.end_row();

                ui.label("E-mail:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.consulta_email)
                        .desired_width(200.0),
                );
                ui.end_row();
            });

        ui.add_space(8.0);
        if ui.button(format!("{} Consultar", Icons::SEARCH)).clicked() {
            self.consulta_feita = true;
        }

        if !self.consulta_feita {
            return;
        }

        let participacoes = InscricaoService::consultar_candidato(
            data,
            self.consulta_turma_id.as_deref().unwrap_or(""),
            self.consulta_estudante_id.as_deref().unwrap_or(""),
            &self.consulta_email,
        );

        ui.separator();
        if participacoes.is_empty() {
            ui.label(
                RichText::new("Nenhuma participação encontrada com esses dados")
                    .color(Colors::TEXT_MUTED),
            );
            return;
        }

        for p in participacoes {
            let olimpiada = data.olimpiada(&p.olimpiada_id);
            let nome_olimpiada = olimpiada.map(|o| o.nome.as_str()).unwrap_or("N/A");

            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("{} {}", Icons::TROPHY, nome_olimpiada)).strong());

                    if let Some(o) = olimpiada {
                        for fase in &o.fases {
                            ui.horizontal(|ui| {
                                ui.label(&fase.nome);
                                match p.nota_da_fase(&fase.id) {
                                    Some(nota) => {
                                        ui.label(
                                            RichText::new(format_nota(nota))
                                                .color(Colors::PRIMARY),
                                        );
                                    }
                                    None => {
                                        ui.label(
                                            RichText::new("aguardando resultado")
                                                .small()
                                                .color(Colors::TEXT_MUTED),
                                        );
                                    }
                                }
                            });
                        }
                    }

                    let media = p
                        .media_geral()
                        .map(format_nota)
                        .unwrap_or_else(|| "-".to_string());
                    ui.label(
                        RichText::new(format!(
                            "Pontuação total: {} · Média: {}",
                            format_nota(p.pontuacao_total()),
                            media
                        ))
                        .small()
                        .color(Colors::TEXT_SECONDARY),
                    );
                });
            ui.add_space(4.0);
        }
    }

    fn aba_equipe(&mut self, ui: &mut egui::Ui, state: &mut AppState, data: &AppData) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(320.0);
            ui.label(RichText::new("Acesso restrito à equipe").strong());
            ui.add_space(8.0);

            ui.add(
                egui::TextEdit::singleline(&mut self.login_email)
                    .hint_text("email@univap.br")
                    .desired_width(f32::INFINITY),
            );
            let senha_resp = ui.add(
                egui::TextEdit::singleline(&mut self.login_senha)
                    .password(true)
                    .hint_text("Senha")
                    .desired_width(f32::INFINITY),
            );

            if let Some(erro) = &self.login_erro {
                ui.add_space(4.0);
                ui.colored_label(Colors::ERROR, erro);
            }

            ui.add_space(8.0);
            let entrar = ui.button(format!("{} Entrar", Icons::KEY)).clicked()
                || (senha_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));

            if entrar {
                match auth::login(data, &self.login_email, &self.login_senha) {
                    Ok(sessao) => {
                        let email = sessao.email.clone();
                        state.sessao = Some(sessao);
                        self.login_email.clear();
                        self.login_senha.clear();
                        self.login_erro = None;

                        // Perfil incompleto ou colégio sem dados: assistente inicial
                        let precisa_setup = data
                            .usuario(&email)
                            .map(|u| !u.profile_completed)
                            .unwrap_or(false)
                            || !data.escola.configurada();
                        state.navigate(if precisa_setup {
                            View::Setup
                        } else {
                            View::Olimpiadas
                        });
                    }
                    Err(e) => {
                        self.login_senha.clear();
                        self.login_erro = Some(e.to_string());
                    }
                }
            }
        });
    }
}

fn estudantes_da_turma(data: &AppData, turma_id: Option<&str>) -> Vec<(String, String)> {
    turma_id
        .and_then(|id| data.turma(id))
        .map(|t| {
            t.estudantes
                .iter()
                .map(|e| (e.id.clone(), e.nome.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Combo de seleção por id; `dependente` é zerado quando a escolha muda
fn seletor_turma_estudante(
    ui: &mut egui::Ui,
    id_salt: &str,
    opcoes: &[(String, String)],
    escolha: &mut Option<String>,
    dependente: Option<&mut Option<String>>,
) {
    let texto = escolha
        .as_deref()
        .and_then(|id| opcoes.iter().find(|(oid, _)| oid == id))
        .map(|(_, nome)| nome.clone())
        .unwrap_or_else(|| "Selecione".to_string());

    let mut mudou = false;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(texto)
        .width(200.0)
        .show_ui(ui, |ui| {
            for (id, nome) in opcoes {
                let marcada = escolha.as_deref() == Some(id.as_str());
                if ui.selectable_label(marcada, nome).clicked() {
                    *escolha = Some(id.clone());
                    mudou = true;
                }
            }
        });

    if mudou {
        if let Some(dependente) = dependente {
            *dependente = None;
        }
    }
}
