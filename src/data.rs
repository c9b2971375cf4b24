//! Coleções do sistema e operações de domínio sobre elas.
//!
//! Todo o estado administrado (colégio, olimpíadas, turmas, inscrições,
//! lembretes e contas) vive aqui em memória; cada mutação grava de volta
//! o documento JSON completo de cada coleção.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::{keys, Database};
use crate::models::{
    EscolaInfo, Lembrete, Olimpiada, Participante, Segmento, Turma, Usuario, normalizar_email,
};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct AppData {
    pub escola: EscolaInfo,
    pub olimpiadas: Vec<Olimpiada>,
    pub participantes: Vec<Participante>,
    pub turmas: Vec<Turma>,
    pub lembretes: Vec<Lembrete>,
    pub usuarios: Vec<Usuario>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            escola: EscolaInfo::default(),
            olimpiadas: Vec::new(),
            participantes: Vec::new(),
            turmas: Vec::new(),
            lembretes: Vec::new(),
            usuarios: Usuario::contas_iniciais(),
        }
    }
}

fn load_key<T: DeserializeOwned>(db: &Database, chave: &str) -> Option<T> {
    let valor = match db.get(chave) {
        Ok(v) => v?,
        Err(e) => {
            tracing::error!("Falha ao ler {}: {}", chave, e);
            return None;
        }
    };

    match serde_json::from_str(&valor) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::warn!("Documento inválido em {}: {}", chave, e);
            None
        }
    }
}

fn save_key<T: Serialize>(db: &Database, chave: &str, valor: &T) -> Result<()> {
    let json = serde_json::to_string(valor)?;
    db.set(chave, &json)?;
    Ok(())
}

impl AppData {
    /// Carrega todas as coleções; chave ausente vira o valor padrão
    pub fn load(db: &Database) -> Self {
        let padrao = Self::default();
        Self {
            escola: load_key(db, keys::ESCOLA).unwrap_or(padrao.escola),
            olimpiadas: load_key(db, keys::OLIMPIADAS).unwrap_or_default(),
            participantes: load_key(db, keys::PARTICIPANTES).unwrap_or_default(),
            turmas: load_key(db, keys::TURMAS).unwrap_or_default(),
            lembretes: load_key(db, keys::LEMBRETES).unwrap_or_default(),
            usuarios: load_key(db, keys::USUARIOS).unwrap_or(padrao.usuarios),
        }
    }

    /// Grava o retrato completo de todas as coleções
    pub fn save(&self, db: &Database) -> Result<()> {
        save_key(db, keys::ESCOLA, &self.escola)?;
        save_key(db, keys::OLIMPIADAS, &self.olimpiadas)?;
        save_key(db, keys::PARTICIPANTES, &self.participantes)?;
        save_key(db, keys::TURMAS, &self.turmas)?;
        save_key(db, keys::LEMBRETES, &self.lembretes)?;
        save_key(db, keys::USUARIOS, &self.usuarios)?;
        Ok(())
    }

    /// Grava e registra falhas sem interromper a aplicação
    pub fn persist(&self, db: &Database) {
        if let Err(e) = self.save(db) {
            tracing::error!("Falha ao gravar dados: {}", e);
        }
    }

    // ------------------------------------------------------------
    // Olimpíadas
    // ------------------------------------------------------------

    pub fn olimpiada(&self, id: &str) -> Option<&Olimpiada> {
        self.olimpiadas.iter().find(|o| o.id == id)
    }

    pub fn olimpiada_mut(&mut self, id: &str) -> Option<&mut Olimpiada> {
        self.olimpiadas.iter_mut().find(|o| o.id == id)
    }

    /// Insere ou atualiza pela id
    pub fn salvar_olimpiada(&mut self, olimpiada: Olimpiada) {
        match self.olimpiadas.iter_mut().find(|o| o.id == olimpiada.id) {
            Some(slot) => *slot = olimpiada,
            None => self.olimpiadas.push(olimpiada),
        }
    }

    /// Remove a olimpíada e todas as suas inscrições em um único passo.
    /// Retorna quantas inscrições foram removidas junto.
    pub fn excluir_olimpiada(&mut self, id: &str) -> usize {
        let antes = self.participantes.len();
        self.participantes.retain(|p| p.olimpiada_id != id);
        self.olimpiadas.retain(|o| o.id != id);

        let removidos = antes - self.participantes.len();
        tracing::info!(
            "Olimpíada {} excluída ({} inscrições removidas)",
            id,
            removidos
        );
        removidos
    }

    // ------------------------------------------------------------
    // Turmas e estudantes
    // ------------------------------------------------------------

    pub fn turma(&self, id: &str) -> Option<&Turma> {
        self.turmas.iter().find(|t| t.id == id)
    }

    pub fn turma_mut(&mut self, id: &str) -> Option<&mut Turma> {
        self.turmas.iter_mut().find(|t| t.id == id)
    }

    /// Nome da turma para exibição; None quando a turma foi excluída
    pub fn nome_turma(&self, id: &str) -> Option<&str> {
        self.turma(id).map(|t| t.nome.as_str())
    }

    pub fn salvar_turma(&mut self, turma: Turma) {
        match self.turmas.iter_mut().find(|t| t.id == turma.id) {
            Some(slot) => *slot = turma,
            None => self.turmas.push(turma),
        }
    }

    /// Turmas cujo segmento é atendido pela olimpíada
    pub fn turmas_compativeis(&self, olimpiada: &Olimpiada) -> Vec<&Turma> {
        self.turmas
            .iter()
            .filter(|t| olimpiada.atende_segmento(t.segmento))
            .collect()
    }

    pub fn turmas_do_segmento(&self, segmento: Segmento) -> Vec<&Turma> {
        self.turmas
            .iter()
            .filter(|t| t.segmento == segmento)
            .collect()
    }

    /// Remove a turma e as inscrições de todos os seus estudantes
    pub fn excluir_turma(&mut self, id: &str) -> usize {
        let antes = self.participantes.len();
        self.participantes.retain(|p| p.turma_id != id);
        self.turmas.retain(|t| t.id != id);

        let removidos = antes - self.participantes.len();
        tracing::info!("Turma {} excluída ({} inscrições removidas)", id, removidos);
        removidos
    }

    /// Remove um estudante da turma e as inscrições desse par turma+estudante
    pub fn excluir_estudante(&mut self, turma_id: &str, estudante_id: &str) -> usize {
        if let Some(turma) = self.turma_mut(turma_id) {
            turma.estudantes.retain(|e| e.id != estudante_id);
        }

        let antes = self.participantes.len();
        self.participantes
            .retain(|p| !(p.turma_id == turma_id && p.estudante_id == estudante_id));
        antes - self.participantes.len()
    }

    // ------------------------------------------------------------
    // Participantes
    // ------------------------------------------------------------

    pub fn participante(&self, id: &str) -> Option<&Participante> {
        self.participantes.iter().find(|p| p.id == id)
    }

    pub fn participante_mut(&mut self, id: &str) -> Option<&mut Participante> {
        self.participantes.iter_mut().find(|p| p.id == id)
    }

    /// Já existe inscrição deste estudante nesta olimpíada?
    pub fn inscricao_existe(&self, olimpiada_id: &str, estudante_id: &str) -> bool {
        self.participantes
            .iter()
            .any(|p| p.olimpiada_id == olimpiada_id && p.estudante_id == estudante_id)
    }

    pub fn excluir_participante(&mut self, id: &str) {
        self.participantes.retain(|p| p.id != id);
    }

    // ------------------------------------------------------------
    // Usuários
    // ------------------------------------------------------------

    pub fn usuario(&self, email: &str) -> Option<&Usuario> {
        let email = normalizar_email(email);
        self.usuarios.iter().find(|u| u.email == email)
    }

    pub fn usuario_mut(&mut self, email: &str) -> Option<&mut Usuario> {
        let email = normalizar_email(email);
        self.usuarios.iter_mut().find(|u| u.email == email)
    }

    pub fn salvar_usuario(&mut self, usuario: Usuario) -> AppResult<()> {
        if usuario.email.is_empty() {
            return Err(AppError::validation("Informe o e-mail do usuário"));
        }
        match self.usuarios.iter_mut().find(|u| u.email == usuario.email) {
            Some(slot) => *slot = usuario,
            None => self.usuarios.push(usuario),
        }
        Ok(())
    }

    /// Cria uma conta nova com a senha padrão; e-mail já cadastrado é recusado
    pub fn criar_usuario(&mut self, email: &str) -> AppResult<()> {
        let usuario = Usuario::new(email);
        if usuario.email.is_empty() {
            return Err(AppError::validation("Informe o e-mail do usuário"));
        }
        if self.usuario(&usuario.email).is_some() {
            return Err(AppError::already_exists(format!(
                "Já existe uma conta para {}",
                usuario.email
            )));
        }
        tracing::info!("Conta {} criada", usuario.email);
        self.usuarios.push(usuario);
        Ok(())
    }

    /// Exclui uma conta; a conta autenticada não pode se excluir
    pub fn excluir_usuario(&mut self, email: &str, email_logado: &str) -> AppResult<()> {
        let email = normalizar_email(email);
        if email == normalizar_email(email_logado) {
            return Err(AppError::validation(
                "Não é possível excluir a conta que está em uso",
            ));
        }
        let antes = self.usuarios.len();
        self.usuarios.retain(|u| u.email != email);
        if self.usuarios.len() == antes {
            return Err(AppError::not_found(format!("Usuário {}", email)));
        }
        tracing::info!("Usuário {} excluído", email);
        Ok(())
    }

    // ------------------------------------------------------------
    // Limpeza
    // ------------------------------------------------------------

    /// Apaga tudo e volta ao estado de fábrica (contas iniciais incluídas)
    pub fn limpar_sistema(&mut self, db: &Database) -> Result<()> {
        db.clear()?;
        *self = Self::default();
        self.save(db)?;
        tracing::warn!("Sistema restaurado ao estado inicial");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusInscricao;

    fn base() -> AppData {
        let mut data = AppData::default();

        let mut turma = Turma::new("9º Ano A", Segmento::FundamentalAnosFinais);
        turma.adicionar_em_lote("Ana\nBruno\nCarla");
        let turma_id = turma.id.clone();

        let mut o1 = Olimpiada::new("OBMEP");
        o1.segmentos.push(Segmento::FundamentalAnosFinais);
        let mut o2 = Olimpiada::new("OBA");
        o2.segmentos.push(Segmento::FundamentalAnosFinais);
        o2.status = StatusInscricao::Fechada;

        for o in [&o1, &o2] {
            for e in &turma.estudantes {
                data.participantes.push(Participante::new(
                    &o.id,
                    &turma_id,
                    &e.id,
                    &e.nome,
                    turma.segmento,
                    "",
                ));
            }
        }

        data.turmas.push(turma);
        data.olimpiadas.push(o1);
        data.olimpiadas.push(o2);
        data
    }

    #[test]
    fn test_roundtrip_pelo_banco() {
        let db = Database::open_in_memory().unwrap();
        let data = base();
        data.save(&db).unwrap();

        let lido = AppData::load(&db);
        assert_eq!(lido.olimpiadas.len(), 2);
        assert_eq!(lido.turmas.len(), 1);
        assert_eq!(lido.participantes.len(), 6);
        assert_eq!(lido.usuarios.len(), 7);
    }

    #[test]
    fn test_load_banco_vazio_usa_padroes() {
        let db = Database::open_in_memory().unwrap();
        let data = AppData::load(&db);
        assert!(data.olimpiadas.is_empty());
        assert!(!data.escola.configurada());
        assert_eq!(data.usuarios.len(), 7);
    }

    #[test]
    fn test_excluir_olimpiada_cascateia() {
        let mut data = base();
        let id = data.olimpiadas[0].id.clone();

        let removidos = data.excluir_olimpiada(&id);
        assert_eq!(removidos, 3);
        assert_eq!(data.olimpiadas.len(), 1);
        assert_eq!(data.participantes.len(), 3);
        assert!(data.participantes.iter().all(|p| p.olimpiada_id != id));
    }

    #[test]
    fn test_excluir_turma_cascateia_em_todas_as_olimpiadas() {
        let mut data = base();
        let id = data.turmas[0].id.clone();

        // 3 estudantes x 2 olimpíadas
        let removidos = data.excluir_turma(&id);
        assert_eq!(removidos, 6);
        assert!(data.participantes.is_empty());
        assert!(data.turmas.is_empty());
    }

    #[test]
    fn test_excluir_estudante_remove_so_o_par() {
        let mut data = base();
        let turma_id = data.turmas[0].id.clone();
        let estudante_id = data.turmas[0].estudantes[0].id.clone();

        let removidos = data.excluir_estudante(&turma_id, &estudante_id);
        assert_eq!(removidos, 2);
        assert_eq!(data.participantes.len(), 4);
        assert_eq!(data.turmas[0].estudantes.len(), 2);
    }

    #[test]
    fn test_nao_excluir_propria_conta() {
        let mut data = AppData::default();
        let erro = data.excluir_usuario("guibson@univap.br", "Guibson@univap.br ");
        assert!(erro.is_err());
        assert_eq!(data.usuarios.len(), 7);

        data.excluir_usuario("rrocha@univap.br", "guibson@univap.br")
            .unwrap();
        assert_eq!(data.usuarios.len(), 6);
    }

    #[test]
    fn test_criar_usuario() {
        let mut data = AppData::default();
        data.criar_usuario("novo@univap.br").unwrap();
        assert_eq!(data.usuarios.len(), 8);
        assert!(data.usuario("novo@univap.br").is_some());

        assert!(data.criar_usuario("  ").is_err());
    }

    #[test]
    fn test_criar_usuario_duplicado_preserva_conta() {
        let mut data = AppData::default();
        {
            let usuario = data.usuario_mut("guibson@univap.br").unwrap();
            usuario.pin = Some("123456".to_string());
            usuario.password = "minhasenha1".to_string();
            usuario.profile_completed = true;
        }

        // E-mail repetido, mesmo com caixa e espaços diferentes, é recusado
        let erro = data.criar_usuario(" Guibson@Univap.BR ");
        assert!(matches!(erro, Err(AppError::AlreadyExists(_))));
        assert_eq!(data.usuarios.len(), 7);

        let usuario = data.usuario("guibson@univap.br").unwrap();
        assert_eq!(usuario.pin.as_deref(), Some("123456"));
        assert_eq!(usuario.password, "minhasenha1");
        assert!(usuario.profile_completed);
    }

    #[test]
    fn test_limpar_sistema() {
        let db = Database::open_in_memory().unwrap();
        let mut data = base();
        data.save(&db).unwrap();

        data.limpar_sistema(&db).unwrap();
        assert!(data.olimpiadas.is_empty());
        assert_eq!(data.usuarios.len(), 7);

        let relido = AppData::load(&db);
        assert!(relido.olimpiadas.is_empty());
        assert_eq!(relido.usuarios.len(), 7);
    }

    #[test]
    fn test_turmas_compativeis() {
        let data = base();
        let mut em = Olimpiada::new("ONC");
        em.segmentos.push(Segmento::EnsinoMedio);
        assert!(data.turmas_compativeis(&em).is_empty());
        assert_eq!(data.turmas_compativeis(&data.olimpiadas[0]).len(), 1);
    }
}
