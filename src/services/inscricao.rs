//! Motor de inscrições: equipe, portal público e consultas.

use crate::data::AppData;
use crate::models::{normalizar_email, Olimpiada, Participante};
use crate::utils::error::{AppError, AppResult};

pub struct InscricaoService;

impl InscricaoService {
    /// Inscreve um estudante de uma turma em uma olimpíada.
    ///
    /// Recusa duplicata do par (olimpíada, estudante); nome e segmento
    /// são copiados da turma no ato.
    pub fn inscrever(
        data: &mut AppData,
        olimpiada_id: &str,
        turma_id: &str,
        estudante_id: &str,
        email: &str,
    ) -> AppResult<String> {
        if data.olimpiada(olimpiada_id).is_none() {
            return Err(AppError::not_found("Olimpíada não encontrada"));
        }

        let turma = data
            .turma(turma_id)
            .ok_or_else(|| AppError::not_found("Turma não encontrada"))?;
        let estudante = turma
            .estudante(estudante_id)
            .ok_or_else(|| AppError::not_found("Estudante não encontrado"))?;

        if data.inscricao_existe(olimpiada_id, estudante_id) {
            return Err(AppError::already_exists(format!(
                "{} já está inscrito nesta olimpíada",
                estudante.nome
            )));
        }

        let participante = Participante::new(
            olimpiada_id,
            turma_id,
            estudante_id,
            &estudante.nome,
            turma.segmento,
            email.trim(),
        );
        let id = participante.id.clone();
        data.participantes.push(participante);
        Ok(id)
    }

    /// Inscreve a turma inteira; quem já está inscrito é pulado.
    /// Retorna quantos foram de fato adicionados.
    pub fn inscrever_turma(
        data: &mut AppData,
        olimpiada_id: &str,
        turma_id: &str,
    ) -> AppResult<usize> {
        let turma = data
            .turma(turma_id)
            .ok_or_else(|| AppError::not_found("Turma não encontrada"))?;

        let estudantes: Vec<String> = turma.estudantes.iter().map(|e| e.id.clone()).collect();

        let mut adicionados = 0;
        for estudante_id in estudantes {
            match Self::inscrever(data, olimpiada_id, turma_id, &estudante_id, "") {
                Ok(_) => adicionados += 1,
                Err(AppError::AlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Inscrição em lote: {} estudantes adicionados na olimpíada {}",
            adicionados,
            olimpiada_id
        );
        Ok(adicionados)
    }

    /// Olimpíadas disponíveis para auto-inscrição no portal
    pub fn listar_abertas(data: &AppData) -> Vec<&Olimpiada> {
        data.olimpiadas
            .iter()
            .filter(|o| o.inscricoes_abertas())
            .collect()
    }

    /// Auto-inscrição pelo portal público: todos os campos obrigatórios
    /// e a olimpíada precisa estar com inscrições abertas.
    pub fn inscricao_publica(
        data: &mut AppData,
        olimpiada_id: &str,
        turma_id: &str,
        estudante_id: &str,
        email: &str,
    ) -> AppResult<String> {
        if olimpiada_id.is_empty()
            || turma_id.is_empty()
            || estudante_id.is_empty()
            || email.trim().is_empty()
        {
            return Err(AppError::validation("Preencha todos os campos"));
        }

        let olimpiada = data
            .olimpiada(olimpiada_id)
            .ok_or_else(|| AppError::not_found("Olimpíada não encontrada"))?;
        if !olimpiada.inscricoes_abertas() {
            return Err(AppError::validation(
                "As inscrições desta olimpíada estão encerradas",
            ));
        }

        Self::inscrever(data, olimpiada_id, turma_id, estudante_id, email)
    }

    /// Espaço do candidato: turma e estudante exatos, e-mail normalizado.
    /// Lista vazia significa "nenhuma participação com esses dados".
    pub fn consultar_candidato<'a>(
        data: &'a AppData,
        turma_id: &str,
        estudante_id: &str,
        email: &str,
    ) -> Vec<&'a Participante> {
        let email = normalizar_email(email);
        data.participantes
            .iter()
            .filter(|p| {
                p.turma_id == turma_id
                    && p.estudante_id == estudante_id
                    && normalizar_email(&p.email) == email
            })
            .collect()
    }

    /// Busca da equipe por nome (mínimo 2 caracteres), agrupada por
    /// estudante com todas as suas participações.
    pub fn buscar_por_nome<'a>(
        data: &'a AppData,
        consulta: &str,
    ) -> Vec<(String, Vec<&'a Participante>)> {
        let consulta = consulta.trim().to_lowercase();
        if consulta.len() < 2 {
            return Vec::new();
        }

        let mut grupos: Vec<(String, Vec<&Participante>)> = Vec::new();
        for p in &data.participantes {
            if !p.nome.to_lowercase().contains(&consulta) {
                continue;
            }
            match grupos.iter_mut().find(|(nome, _)| *nome == p.nome) {
                Some((_, lista)) => lista.push(p),
                None => grupos.push((p.nome.clone(), vec![p])),
            }
        }

        grupos.sort_by(|a, b| a.0.cmp(&b.0));
        grupos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Segmento, StatusInscricao, Turma};

    fn base() -> (AppData, String, String, String) {
        let mut data = AppData::default();

        let mut turma = Turma::new("3ª Série EM", Segmento::EnsinoMedio);
        turma.adicionar_em_lote("Ana Souza\nBruno Lima");
        let turma_id = turma.id.clone();
        let estudante_id = turma.estudantes[0].id.clone();

        let mut o = crate::models::Olimpiada::new("OBMEP");
        o.segmentos.push(Segmento::EnsinoMedio);
        let olimpiada_id = o.id.clone();

        data.turmas.push(turma);
        data.olimpiadas.push(o);
        (data, olimpiada_id, turma_id, estudante_id)
    }

    #[test]
    fn test_inscricao_recusa_duplicata() {
        let (mut data, oid, tid, eid) = base();

        InscricaoService::inscrever(&mut data, &oid, &tid, &eid, "ana@ex.br").unwrap();
        let erro = InscricaoService::inscrever(&mut data, &oid, &tid, &eid, "outro@ex.br");
        assert!(matches!(erro, Err(AppError::AlreadyExists(_))));
        assert_eq!(data.participantes.len(), 1);
    }

    #[test]
    fn test_inscricao_copia_nome_e_segmento() {
        let (mut data, oid, tid, eid) = base();
        let id = InscricaoService::inscrever(&mut data, &oid, &tid, &eid, "").unwrap();
        let p = data.participante(&id).unwrap();
        assert_eq!(p.nome, "Ana Souza");
        assert_eq!(p.segmento, Segmento::EnsinoMedio);
        assert!(p.notas.is_empty());
    }

    #[test]
    fn test_inscrever_turma_pula_ja_inscritos() {
        let (mut data, oid, tid, eid) = base();
        InscricaoService::inscrever(&mut data, &oid, &tid, &eid, "").unwrap();

        let adicionados = InscricaoService::inscrever_turma(&mut data, &oid, &tid).unwrap();
        assert_eq!(adicionados, 1);
        assert_eq!(data.participantes.len(), 2);
    }

    #[test]
    fn test_inscricao_publica_exige_campos_e_olimpiada_aberta() {
        let (mut data, oid, tid, eid) = base();

        let erro = InscricaoService::inscricao_publica(&mut data, &oid, &tid, &eid, "  ");
        assert!(matches!(erro, Err(AppError::Validation(_))));

        data.olimpiada_mut(&oid).unwrap().status = StatusInscricao::Fechada;
        let erro = InscricaoService::inscricao_publica(&mut data, &oid, &tid, &eid, "a@b.br");
        assert!(matches!(erro, Err(AppError::Validation(_))));

        data.olimpiada_mut(&oid).unwrap().status = StatusInscricao::Aberta;
        InscricaoService::inscricao_publica(&mut data, &oid, &tid, &eid, "a@b.br").unwrap();
    }

    #[test]
    fn test_listar_abertas() {
        let (mut data, oid, _, _) = base();
        assert_eq!(InscricaoService::listar_abertas(&data).len(), 1);

        data.olimpiada_mut(&oid).unwrap().status = StatusInscricao::Fechada;
        assert!(InscricaoService::listar_abertas(&data).is_empty());
    }

    #[test]
    fn test_consultar_candidato_email_normalizado() {
        let (mut data, oid, tid, eid) = base();
        InscricaoService::inscrever(&mut data, &oid, &tid, &eid, "Ana@Ex.br").unwrap();

        let achados = InscricaoService::consultar_candidato(&data, &tid, &eid, "  ana@ex.br ");
        assert_eq!(achados.len(), 1);

        // E-mail divergente: resultado explícito vazio
        let vazio = InscricaoService::consultar_candidato(&data, &tid, &eid, "outra@ex.br");
        assert!(vazio.is_empty());
    }

    #[test]
    fn test_buscar_por_nome() {
        let (mut data, oid, tid, _) = base();
        InscricaoService::inscrever_turma(&mut data, &oid, &tid).unwrap();

        assert!(InscricaoService::buscar_por_nome(&data, "a").is_empty());

        let grupos = InscricaoService::buscar_por_nome(&data, "ana");
        assert_eq!(grupos.len(), 1);
        assert_eq!(grupos[0].0, "Ana Souza");
        assert_eq!(grupos[0].1.len(), 1);
    }
}
