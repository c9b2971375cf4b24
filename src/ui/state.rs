use crate::data::AppData;
use crate::services::auth::{AcaoProtegida, PedidoPin, Sessao};

/// Vista atual da aplicação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Portal público (sem autenticação)
    #[default]
    Portal,
    /// Primeiro acesso: perfil e dados do colégio
    Setup,
    Olimpiadas,
    Participantes,
    Turmas,
    Metricas,
    Admin,
}

/// Estado centralizado da aplicação
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,

    /// Sessão autenticada; None = portal público
    pub sessao: Option<Sessao>,

    /// Pedido pendente da trava de PIN
    pub pedido_pin: Option<PedidoPin>,

    /// Ação já liberada pela trava, aguardando execução neste frame
    pub acao_liberada: Option<AcaoProtegida>,

    /// Modais
    pub show_olympiad_form: bool,
    pub editing_olimpiada_id: Option<String>,
    pub show_participante_form: bool,
    pub editing_participante_id: Option<String>,
    pub show_school_config: bool,
    pub show_config_modal: bool,
    pub show_lembretes: bool,
    pub show_search: bool,

    /// Alerta de lembrete vencido (um por vez)
    pub alerta_lembrete_id: Option<String>,

    /// Conta em edição na vista de administração
    pub usuario_em_edicao: Option<String>,

    /// Diálogo de confirmação
    pub show_confirm_dialog: bool,
    pub confirm_dialog_message: String,
    pub confirm_dialog_action: Option<ConfirmAction>,

    pub status_message: Option<StatusMessage>,

    pub dark_mode: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn autenticado(&self) -> bool {
        self.sessao.is_some()
    }

    pub fn email_logado(&self) -> Option<&str> {
        self.sessao.as_ref().map(|s| s.email.as_str())
    }

    /// Encerra a sessão e volta ao portal
    pub fn logout(&mut self) {
        self.sessao = None;
        self.pedido_pin = None;
        self.acao_liberada = None;
        self.show_config_modal = false;
        self.show_lembretes = false;
        self.show_search = false;
        self.alerta_lembrete_id = None;
        self.navigate(View::Portal);
    }

    /// Encaminha uma ação para a trava de PIN.
    ///
    /// Quem não definiu PIN passa direto: a ação é liberada na hora.
    pub fn solicitar_pin(&mut self, data: &AppData, pedido: PedidoPin) {
        let exige = self
            .email_logado()
            .and_then(|email| data.usuario(email))
            .map(|u| u.exige_pin())
            .unwrap_or(false);

        if exige {
            self.pedido_pin = Some(pedido);
        } else {
            self.acao_liberada = Some(pedido.acao);
        }
    }

    /// Fecha a trava sem executar nada
    pub fn cancelar_pin(&mut self) {
        self.pedido_pin = None;
    }

    pub fn open_new_olympiad_form(&mut self) {
        self.editing_olimpiada_id = None;
        self.show_olympiad_form = true;
    }

    pub fn open_edit_olympiad_form(&mut self, olimpiada_id: &str) {
        self.editing_olimpiada_id = Some(olimpiada_id.to_string());
        self.show_olympiad_form = true;
    }

    pub fn close_olympiad_form(&mut self) {
        self.show_olympiad_form = false;
        self.editing_olimpiada_id = None;
    }

    pub fn open_participante_form(&mut self, participante_id: &str) {
        self.editing_participante_id = Some(participante_id.to_string());
        self.show_participante_form = true;
    }

    pub fn close_participante_form(&mut self) {
        self.show_participante_form = false;
        self.editing_participante_id = None;
    }

    /// Exibe diálogo de confirmação
    pub fn show_confirm(&mut self, message: &str, action: ConfirmAction) {
        self.confirm_dialog_message = message.to_string();
        self.confirm_dialog_action = Some(action);
        self.show_confirm_dialog = true;
    }

    pub fn close_confirm(&mut self) {
        self.show_confirm_dialog = false;
        self.confirm_dialog_action = None;
    }

    pub fn show_status(&mut self, message: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: message.to_string(),
            status_type,
            created_at: std::time::Instant::now(),
        });
    }

    pub fn show_success(&mut self, message: &str) {
        self.show_status(message, StatusType::Success);
    }

    pub fn show_error(&mut self, message: &str) {
        self.show_status(message, StatusType::Error);
    }

    /// Remove o aviso de status após alguns segundos
    pub fn clear_old_status(&mut self) {
        if let Some(ref status) = self.status_message {
            if status.created_at.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }
}

/// Ação do diálogo de confirmação
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    ExcluirOlimpiada(String),
    ExcluirTurma(String),
    ExcluirUsuario(String),
    LimparSistema,
}

/// Aviso exibido na barra de status
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub status_type: StatusType,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Success,
    Error,
    Info,
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solicitar_pin_sem_pin_libera_direto() {
        let data = AppData::default();
        let mut state = AppState::new();
        state.sessao = Some(Sessao {
            email: "guibson@univap.br".into(),
        });

        state.solicitar_pin(
            &data,
            PedidoPin::simples(AcaoProtegida::ExcluirTurma("t1".into())),
        );

        assert!(state.pedido_pin.is_none());
        assert_eq!(
            state.acao_liberada,
            Some(AcaoProtegida::ExcluirTurma("t1".into()))
        );
    }

    #[test]
    fn test_solicitar_pin_com_pin_abre_trava() {
        let mut data = AppData::default();
        data.usuario_mut("guibson@univap.br").unwrap().pin = Some("123456".into());

        let mut state = AppState::new();
        state.sessao = Some(Sessao {
            email: "guibson@univap.br".into(),
        });

        state.solicitar_pin(&data, PedidoPin::duplo(AcaoProtegida::LimparSistema));
        assert!(state.pedido_pin.is_some());
        assert!(state.acao_liberada.is_none());

        // Fechar a trava descarta o pedido sem efeito
        state.cancelar_pin();
        assert!(state.pedido_pin.is_none());
        assert!(state.acao_liberada.is_none());
    }

    #[test]
    fn test_logout_limpa_estado_sensivel() {
        let mut state = AppState::new();
        state.sessao = Some(Sessao {
            email: "a@univap.br".into(),
        });
        state.show_config_modal = true;
        state.pedido_pin = Some(PedidoPin::simples(AcaoProtegida::LimparSistema));

        state.logout();
        assert!(!state.autenticado());
        assert!(state.pedido_pin.is_none());
        assert!(!state.show_config_modal);
        assert_eq!(state.current_view, View::Portal);
    }
}
