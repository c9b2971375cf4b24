//! Autenticação da equipe e trava de PIN para ações sensíveis.

use crate::data::AppData;
use crate::models::{normalizar_email, validar_pin, validar_senha_troca, Usuario};
use crate::utils::error::{AppError, AppResult};

/// Sessão autenticada; existe apenas em memória e morre com o processo
#[derive(Debug, Clone)]
pub struct Sessao {
    pub email: String,
}

/// Valida e-mail e senha contra as contas cadastradas
pub fn login(data: &AppData, email: &str, senha: &str) -> AppResult<Sessao> {
    let email = normalizar_email(email);
    let usuario = data
        .usuario(&email)
        .ok_or_else(|| AppError::validation("E-mail ou senha incorretos"))?;

    if usuario.password != senha {
        return Err(AppError::validation("E-mail ou senha incorretos"));
    }

    tracing::info!("Login de {}", email);
    Ok(Sessao { email })
}

/// Troca o PIN; exige o PIN atual quando já existe um
pub fn alterar_pin(
    usuario: &mut Usuario,
    pin_atual: &str,
    novo_pin: &str,
) -> AppResult<()> {
    if let Some(atual) = &usuario.pin {
        if atual != pin_atual {
            return Err(AppError::validation("PIN atual incorreto"));
        }
    }
    validar_pin(novo_pin).map_err(|e| AppError::validation(e.to_string()))?;
    usuario.pin = Some(novo_pin.to_string());
    Ok(())
}

/// Troca a senha; exige a senha atual
pub fn alterar_senha(
    usuario: &mut Usuario,
    senha_atual: &str,
    nova_senha: &str,
) -> AppResult<()> {
    if usuario.password != senha_atual {
        return Err(AppError::validation("Senha atual incorreta"));
    }
    validar_senha_troca(nova_senha).map_err(|e| AppError::validation(e.to_string()))?;
    usuario.password = nova_senha.to_string();
    Ok(())
}

/// Ação que só executa depois da trava de PIN
#[derive(Debug, Clone, PartialEq)]
pub enum AcaoProtegida {
    ExcluirOlimpiada(String),
    RemoverObservacao {
        olimpiada_id: String,
        observacao_id: String,
    },
    ExcluirTurma(String),
    ExcluirEstudante {
        turma_id: String,
        estudante_id: String,
    },
    ExcluirParticipante(String),
    LimparNota {
        participante_id: String,
        fase_id: String,
    },
    DesbloquearCredenciais,
    DesbloquearEscola,
    EditarUsuario(String),
    ExcluirUsuario(String),
    LimparSistema,
}

/// Pedido pendente da trava de PIN.
///
/// Guarda a ação e o progresso da confirmação; ações críticas exigem o
/// PIN correto duas vezes seguidas. Fechar o diálogo descarta o pedido
/// sem efeito algum.
#[derive(Debug, Clone)]
pub struct PedidoPin {
    pub acao: AcaoProtegida,
    pub etapas_necessarias: u8,
    pub etapas_concluidas: u8,
}

impl PedidoPin {
    pub fn simples(acao: AcaoProtegida) -> Self {
        Self {
            acao,
            etapas_necessarias: 1,
            etapas_concluidas: 0,
        }
    }

    pub fn duplo(acao: AcaoProtegida) -> Self {
        Self {
            acao,
            etapas_necessarias: 2,
            etapas_concluidas: 0,
        }
    }

    /// Registra um acerto de PIN; true quando o pedido está liberado
    pub fn registrar_acerto(&mut self) -> bool {
        self.etapas_concluidas += 1;
        self.etapas_concluidas >= self.etapas_necessarias
    }

    pub fn exige_segunda_confirmacao(&self) -> bool {
        self.etapas_necessarias == 2 && self.etapas_concluidas == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_normaliza_email() {
        let data = AppData::default();
        let sessao = login(&data, "  GUIBSON@Univap.br ", "123456").unwrap();
        assert_eq!(sessao.email, "guibson@univap.br");
    }

    #[test]
    fn test_login_senha_errada() {
        let data = AppData::default();
        assert!(login(&data, "guibson@univap.br", "654321").is_err());
        assert!(login(&data, "ninguem@univap.br", "123456").is_err());
    }

    #[test]
    fn test_pedido_duplo_precisa_de_dois_acertos() {
        let mut pedido = PedidoPin::duplo(AcaoProtegida::LimparSistema);
        assert!(!pedido.registrar_acerto());
        assert!(pedido.exige_segunda_confirmacao());
        assert!(pedido.registrar_acerto());
    }

    #[test]
    fn test_pedido_simples_libera_no_primeiro() {
        let mut pedido = PedidoPin::simples(AcaoProtegida::ExcluirTurma("t1".into()));
        assert!(pedido.registrar_acerto());
    }

    #[test]
    fn test_alterar_pin() {
        let mut u = Usuario::new("a@univap.br");

        // Sem PIN definido: não exige o atual
        alterar_pin(&mut u, "", "123456").unwrap();
        assert_eq!(u.pin.as_deref(), Some("123456"));

        // Com PIN: exige o atual correto
        assert!(alterar_pin(&mut u, "000000", "654321").is_err());
        alterar_pin(&mut u, "123456", "654321").unwrap();
        assert_eq!(u.pin.as_deref(), Some("654321"));

        // Formato inválido
        assert!(alterar_pin(&mut u, "654321", "12ab").is_err());
    }

    #[test]
    fn test_alterar_senha() {
        let mut u = Usuario::new("a@univap.br");
        assert!(alterar_senha(&mut u, "errada", "nova123").is_err());
        assert!(alterar_senha(&mut u, "123456", "curta").is_err());

        alterar_senha(&mut u, "123456", "nova123").unwrap();
        assert_eq!(u.password, "nova123");
    }
}
