use serde::{Deserialize, Serialize};

/// Cargos oferecidos no cadastro de perfil
pub const CARGOS: [&str; 6] = [
    "Professor",
    "Diretor",
    "Assistente de Direção",
    "Coordenador",
    "Orientador",
    "Administrativo",
];

/// Senha atribuída a contas recém-criadas e às contas iniciais
pub const SENHA_PADRAO: &str = "123456";

/// Normaliza e-mail para comparação e armazenamento
pub fn normalizar_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Conta de acesso da equipe do colégio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub email: String,
    pub password: String,
    /// PIN de 6 dígitos; None enquanto o usuário não definir um
    pub pin: Option<String>,
    pub nome: Option<String>,
    pub cargo: Option<String>,
    pub profile_completed: bool,
}

impl Usuario {
    pub fn new(email: &str) -> Self {
        Self {
            email: normalizar_email(email),
            password: SENHA_PADRAO.to_string(),
            pin: None,
            nome: None,
            cargo: None,
            profile_completed: false,
        }
    }

    /// Contas pré-cadastradas da equipe
    pub fn contas_iniciais() -> Vec<Usuario> {
        [
            "guibson@univap.br",
            "amanda.cavalca@univap.br",
            "vcarneiro@univap.br",
            "rogusmao@univap.br",
            "rrocha@univap.br",
            "rodrigo.moura@univap.br",
            "aquarius@univap.br",
        ]
        .into_iter()
        .map(Usuario::new)
        .collect()
    }

    pub fn exige_pin(&self) -> bool {
        self.pin.is_some()
    }

    pub fn verificar_pin(&self, tentativa: &str) -> bool {
        match &self.pin {
            Some(pin) => pin == tentativa,
            None => true,
        }
    }

    pub fn nome_exibicao(&self) -> &str {
        self.nome.as_deref().unwrap_or(&self.email)
    }
}

/// PIN válido: exatamente 6 dígitos numéricos
pub fn validar_pin(pin: &str) -> Result<(), UsuarioValidationError> {
    if pin.len() != 6 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(UsuarioValidationError::PinInvalido);
    }
    Ok(())
}

/// Regra de senha do cadastro inicial: mínimo 6 caracteres, letra e número
pub fn validar_senha_cadastro(senha: &str) -> Result<(), UsuarioValidationError> {
    if senha.len() < 6 {
        return Err(UsuarioValidationError::SenhaCurta);
    }
    let tem_letra = senha.chars().any(|c| c.is_alphabetic());
    let tem_digito = senha.chars().any(|c| c.is_ascii_digit());
    if !tem_letra || !tem_digito {
        return Err(UsuarioValidationError::SenhaFraca);
    }
    Ok(())
}

/// Regra de troca de senha: mínimo 6 caracteres
pub fn validar_senha_troca(senha: &str) -> Result<(), UsuarioValidationError> {
    if senha.len() < 6 {
        return Err(UsuarioValidationError::SenhaCurta);
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum UsuarioValidationError {
    #[error("O PIN deve conter exatamente 6 dígitos numéricos")]
    PinInvalido,
    #[error("A senha deve ter no mínimo 6 caracteres")]
    SenhaCurta,
    #[error("A senha deve conter letras e números")]
    SenhaFraca,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizar_email() {
        assert_eq!(normalizar_email("  Guibson@Univap.BR "), "guibson@univap.br");
    }

    #[test]
    fn test_contas_iniciais() {
        let contas = Usuario::contas_iniciais();
        assert_eq!(contas.len(), 7);
        assert!(contas.iter().all(|u| u.password == SENHA_PADRAO));
        assert!(contas.iter().all(|u| u.pin.is_none()));
        assert!(contas.iter().all(|u| !u.profile_completed));
    }

    #[test]
    fn test_verificar_pin_sem_pin_definido() {
        let u = Usuario::new("a@univap.br");
        assert!(u.verificar_pin("qualquer"));

        let mut u = u;
        u.pin = Some("123456".into());
        assert!(u.verificar_pin("123456"));
        assert!(!u.verificar_pin("000000"));
    }

    #[test]
    fn test_validar_pin() {
        assert!(validar_pin("123456").is_ok());
        assert!(validar_pin("12345").is_err());
        assert!(validar_pin("12345a").is_err());
        assert!(validar_pin("1234567").is_err());
    }

    #[test]
    fn test_validar_senha() {
        assert!(validar_senha_cadastro("abc123").is_ok());
        assert!(validar_senha_cadastro("abcdef").is_err());
        assert!(validar_senha_cadastro("123456").is_err());
        assert!(validar_senha_cadastro("a1").is_err());

        assert!(validar_senha_troca("123456").is_ok());
        assert!(validar_senha_troca("12345").is_err());
    }
}
