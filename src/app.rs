//! Aplicação principal do console Oficina Sapiens

use std::time::Instant;

use chrono::Local;
use eframe::egui;

use crate::data::AppData;
use crate::db::Database;
use crate::models::config::AppSettings;
use crate::services::auth::AcaoProtegida;
use crate::services::lembretes::LembreteService;
use crate::ui::{
    modals::{
        ConfigModal, ConfirmDialog, LembreteAlerta, LembretesModal, OlympiadFormModal,
        ParticipanteFormModal, PinVerifyModal, SchoolConfigModal, SearchModal,
    },
    state::{AppState, ConfirmAction},
    theme::{configure_style, Colors, Icons},
    views::{
        AdminView, MetricasView, OlimpiadasView, ParticipantesView, PortalView, SetupView,
        TurmasView,
    },
    View,
};
use crate::utils::path::get_database_path;

/// Aplicação principal
pub struct SapiensApp {
    db: Database,
    data: AppData,
    state: AppState,
    app_settings: AppSettings,

    // Vistas
    portal: PortalView,
    setup: SetupView,
    olimpiadas: OlimpiadasView,
    participantes: ParticipantesView,
    turmas: TurmasView,
    metricas: MetricasView,
    admin: AdminView,

    // Modais
    olympiad_form: OlympiadFormModal,
    participante_form: ParticipanteFormModal,
    school_config: SchoolConfigModal,
    config_modal: ConfigModal,
    lembretes_modal: LembretesModal,
    search_modal: SearchModal,
    pin_verify: PinVerifyModal,

    // Interno
    ultimo_tick: Instant,
    style_initialized: bool,
}

impl SapiensApp {
    /// Cria a aplicação
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let app_settings = AppSettings::load();

        let db_path = get_database_path();
        tracing::info!("Abrindo banco de dados: {:?}", db_path);

        let db = match Database::open(&db_path) {
            Ok(db) => db,
            Err(e) => {
                tracing::error!("Não foi possível abrir o banco: {}", e);
                // Último recurso: banco em memória para a sessão
                Database::open_in_memory().expect("Não foi possível criar banco em memória")
            }
        };

        let data = AppData::load(&db);

        let mut state = AppState::new();
        state.dark_mode = app_settings.dark_mode;

        Self {
            db,
            data,
            state,
            app_settings,
            portal: PortalView::new(),
            setup: SetupView::new(),
            olimpiadas: OlimpiadasView::new(),
            participantes: ParticipantesView::new(),
            turmas: TurmasView::new(),
            metricas: MetricasView::new(),
            admin: AdminView::new(),
            olympiad_form: OlympiadFormModal::new(),
            participante_form: ParticipanteFormModal::new(),
            school_config: SchoolConfigModal::new(),
            config_modal: ConfigModal::new(),
            lembretes_modal: LembretesModal::new(),
            search_modal: SearchModal::new(),
            pin_verify: PinVerifyModal::default(),
            ultimo_tick: Instant::now(),
            style_initialized: false,
        }
    }

    /// Verificação periódica da agenda; um alerta por vez, só com sessão
    fn tick_lembretes(&mut self, ctx: &egui::Context) {
        if !self.state.autenticado() {
            return;
        }

        if self.ultimo_tick.elapsed() >= LembreteService::INTERVALO {
            self.ultimo_tick = Instant::now();
            if self.state.alerta_lembrete_id.is_none() {
                let agora = Local::now().naive_local();
                if let Some(id) = LembreteService::proximo_alerta(&mut self.data.lembretes, agora) {
                    self.state.alerta_lembrete_id = Some(id);
                    self.data.persist(&self.db);
                }
            }
        }

        ctx.request_repaint_after(LembreteService::INTERVALO);
    }

    /// Executa a ação que a trava de PIN acabou de liberar
    fn executar_acao_liberada(&mut self) {
        let Some(acao) = self.state.acao_liberada.take() else {
            return;
        };

        match acao {
            AcaoProtegida::ExcluirOlimpiada(id) => {
                let nome = self
                    .data
                    .olimpiada(&id)
                    .map(|o| o.nome.clone())
                    .unwrap_or_default();
                self.state.show_confirm(
                    &format!(
                        "Excluir a olimpíada \"{}\"? Todas as inscrições dela serão removidas.",
                        nome
                    ),
                    ConfirmAction::ExcluirOlimpiada(id),
                );
            }
            AcaoProtegida::ExcluirTurma(id) => {
                let nome = self.data.nome_turma(&id).unwrap_or_default().to_string();
                self.state.show_confirm(
                    &format!(
                        "Excluir a turma \"{}\"? Os alunos e as inscrições dela serão removidos.",
                        nome
                    ),
                    ConfirmAction::ExcluirTurma(id),
                );
            }
            AcaoProtegida::ExcluirEstudante {
                turma_id,
                estudante_id,
            } => {
                let removidas = self.data.excluir_estudante(&turma_id, &estudante_id);
                self.data.persist(&self.db);
                self.state.show_success(&format!(
                    "Aluno removido ({} inscrições excluídas)",
                    removidas
                ));
            }
            AcaoProtegida::ExcluirParticipante(id) => {
                self.data.excluir_participante(&id);
                self.data.persist(&self.db);
                self.state.show_success("Inscrição excluída");
            }
            AcaoProtegida::RemoverObservacao {
                olimpiada_id,
                observacao_id,
            } => {
                // Com o formulário aberto a remoção vale na cópia de
                // trabalho; o salvamento decide o destino final
                if self.state.show_olympiad_form
                    && self.olympiad_form.olimpiada_id() == olimpiada_id
                {
                    self.olympiad_form.remover_observacao(&observacao_id);
                } else if let Some(o) = self.data.olimpiada_mut(&olimpiada_id) {
                    o.remover_observacao(&observacao_id);
                    self.data.persist(&self.db);
                }
                self.state.show_success("Observação removida");
            }
            AcaoProtegida::LimparNota {
                participante_id,
                fase_id,
            } => {
                if self.state.show_participante_form
                    && self.participante_form.participante_id()
                        == Some(participante_id.as_str())
                {
                    self.participante_form.limpar_nota(&fase_id);
                } else if let Some(p) = self.data.participante_mut(&participante_id) {
                    p.definir_nota(&fase_id, None);
                    self.data.persist(&self.db);
                }
                self.state.show_success("Nota limpa");
            }
            AcaoProtegida::DesbloquearCredenciais => {
                self.olympiad_form.desbloquear_credenciais();
            }
            AcaoProtegida::DesbloquearEscola => {
                self.school_config.desbloquear();
            }
            AcaoProtegida::EditarUsuario(email) => {
                self.state.usuario_em_edicao = Some(email);
            }
            AcaoProtegida::ExcluirUsuario(email) => {
                self.state.show_confirm(
                    &format!("Excluir a conta {}?", email),
                    ConfirmAction::ExcluirUsuario(email.clone()),
                );
            }
            AcaoProtegida::LimparSistema => {
                self.state.show_confirm(
                    "Apagar todos os dados do sistema? Esta ação não pode ser desfeita.",
                    ConfirmAction::LimparSistema,
                );
            }
        }
    }

    fn topbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("Oficina Sapiens").color(Colors::PRIMARY));
                ui.separator();

                let nav_items = [
                    (View::Olimpiadas, format!("{} Olimpíadas", Icons::TROPHY)),
                    (View::Participantes, format!("{} Participantes", Icons::PERSON)),
                    (View::Turmas, format!("{} Turmas", Icons::PEOPLE)),
                    (View::Metricas, format!("{} Métricas", Icons::CHART)),
                    (View::Admin, format!("{} Administração", Icons::SETTINGS)),
                ];

                for (view, label) in nav_items {
                    if ui
                        .selectable_label(self.state.current_view == view, label)
                        .clicked()
                    {
                        self.state.navigate(view);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_icon = if self.state.dark_mode { "🌙" } else { "☀" };
                    if ui.button(mode_icon).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                    }

                    if ui
                        .button(Icons::SETTINGS)
                        .on_hover_text("Configurações da conta")
                        .clicked()
                    {
                        self.state.show_config_modal = true;
                    }

                    if ui
                        .button(Icons::SCHOOL)
                        .on_hover_text("Dados do colégio")
                        .clicked()
                    {
                        self.state.show_school_config = true;
                    }

                    if ui.button(Icons::SEARCH).on_hover_text("Buscar aluno").clicked() {
                        self.state.show_search = true;
                    }

                    // Sino com o selo de lembretes não lidos
                    let agora = Local::now().naive_local();
                    let nao_lidos = LembreteService::nao_lidos(&self.data.lembretes, agora);
                    let rotulo = if nao_lidos > 0 {
                        format!("{} {}", Icons::BELL, nao_lidos)
                    } else {
                        Icons::BELL.to_string()
                    };
                    let botao = if nao_lidos > 0 {
                        egui::Button::new(egui::RichText::new(rotulo).color(Colors::ACCENT))
                    } else {
                        egui::Button::new(rotulo)
                    };
                    if ui.add(botao).on_hover_text("Lembretes").clicked() {
                        self.state.show_lembretes = true;
                    }

                    ui.separator();
                    if let Some(usuario) =
                        self.state.email_logado().and_then(|e| self.data.usuario(e))
                    {
                        ui.label(
                            egui::RichText::new(usuario.nome_exibicao())
                                .small()
                                .color(Colors::TEXT_SECONDARY),
                        );
                    }
                });
            });
        });
    }

    fn statusbar(&self, ctx: &egui::Context) {
        if let Some(ref status) = self.state.status_message {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                let color = match status.status_type {
                    crate::ui::StatusType::Success => Colors::SUCCESS,
                    crate::ui::StatusType::Error => Colors::ERROR,
                    crate::ui::StatusType::Warning => Colors::WARNING,
                    crate::ui::StatusType::Info => Colors::INFO,
                };
                ui.colored_label(color, &status.text);
            });
        }
    }
}

impl eframe::App for SapiensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.style_initialized {
            configure_style(ctx, self.state.dark_mode);
            self.style_initialized = true;
        }

        // Persiste a preferência de tema quando ela muda
        if self.state.dark_mode != self.app_settings.dark_mode {
            self.app_settings.dark_mode = self.state.dark_mode;
            if let Err(e) = self.app_settings.save() {
                tracing::warn!("Falha ao gravar preferências: {}", e);
            }
            configure_style(ctx, self.state.dark_mode);
        }

        self.state.clear_old_status();
        self.tick_lembretes(ctx);
        self.executar_acao_liberada();

        // Barra de navegação só para a equipe autenticada
        if self.state.autenticado() && self.state.current_view != View::Setup {
            self.topbar(ctx);
        }
        self.statusbar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.state.current_view {
            View::Portal => {
                self.portal
                    .show(ui, &mut self.state, &mut self.data, &self.db);
            }
            View::Setup => {
                self.setup
                    .show(ui, &mut self.state, &mut self.data, &self.db);
            }
            View::Olimpiadas => {
                self.olimpiadas.show(ui, &mut self.state, &self.data);
            }
            View::Participantes => {
                self.participantes
                    .show(ui, &mut self.state, &mut self.data, &self.db);
            }
            View::Turmas => {
                self.turmas
                    .show(ui, &mut self.state, &mut self.data, &self.db);
            }
            View::Metricas => {
                self.metricas.show(ui, &mut self.state, &self.data);
            }
            View::Admin => {
                self.admin
                    .show(ui, &mut self.state, &mut self.data, &self.db);
            }
        });

        // Modais
        if self.state.show_olympiad_form
            && self
                .olympiad_form
                .show(ctx, &mut self.state, &mut self.data, &self.db)
        {
            self.state.close_olympiad_form();
        }

        if self.state.show_participante_form
            && self
                .participante_form
                .show(ctx, &mut self.state, &mut self.data, &self.db)
        {
            self.state.close_participante_form();
        }

        if self.state.show_school_config
            && self
                .school_config
                .show(ctx, &mut self.state, &mut self.data, &self.db)
        {
            self.state.show_school_config = false;
        }

        if self.state.show_config_modal
            && self
                .config_modal
                .show(ctx, &mut self.state, &mut self.data, &self.db)
        {
            self.state.show_config_modal = false;
        }

        if self.state.show_lembretes
            && self
                .lembretes_modal
                .show(ctx, &mut self.state, &mut self.data, &self.db)
        {
            self.state.show_lembretes = false;
        }

        if self.state.show_search && self.search_modal.show(ctx, &self.data) {
            self.state.show_search = false;
        }

        LembreteAlerta::show(ctx, &mut self.state, &mut self.data, &self.db);

        self.pin_verify.show(ctx, &mut self.state, &self.data);

        if self.state.show_confirm_dialog {
            ConfirmDialog::show(ctx, &mut self.state, &mut self.data, &self.db);
        }
    }
}
