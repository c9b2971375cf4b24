//! Agenda de lembretes: alerta em tela e selo de não lidos.

use chrono::NaiveDateTime;
use std::time::Duration;

use crate::models::Lembrete;

pub struct LembreteService;

impl LembreteService {
    /// Intervalo entre verificações da agenda
    pub const INTERVALO: Duration = Duration::from_secs(5);

    /// Seleciona no máximo um alerta por verificação: o primeiro lembrete
    /// vencido que ainda não foi anunciado. Marca `notificado` e devolve
    /// a id para a interface exibir o aviso.
    pub fn proximo_alerta(lembretes: &mut [Lembrete], agora: NaiveDateTime) -> Option<String> {
        let lembrete = lembretes
            .iter_mut()
            .find(|l| !l.notificado && l.vencido(agora))?;
        lembrete.notificado = true;
        tracing::info!("Lembrete vencido: {}", lembrete.titulo);
        Some(lembrete.id.clone())
    }

    /// Quantidade exibida no selo do sino
    pub fn nao_lidos(lembretes: &[Lembrete], agora: NaiveDateTime) -> usize {
        lembretes.iter().filter(|l| l.nao_lido(agora)).count()
    }

    /// Ciência explícita do usuário; só aqui `visualizado` muda
    pub fn dar_ciencia(lembretes: &mut [Lembrete], id: &str) -> bool {
        match lembretes.iter_mut().find(|l| l.id == id) {
            Some(l) => {
                l.visualizado = true;
                true
            }
            None => false,
        }
    }

    /// Lista para exibição, do vencimento mais próximo ao mais distante
    pub fn ordenados(lembretes: &[Lembrete]) -> Vec<&Lembrete> {
        let mut lista: Vec<&Lembrete> = lembretes.iter().collect();
        lista.sort_by_key(|l| l.data_hora);
        lista
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Importancia;
    use chrono::NaiveDate;

    fn em(dia: u32, hora: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, dia)
            .unwrap()
            .and_hms_opt(hora, 0, 0)
            .unwrap()
    }

    fn agenda() -> Vec<Lembrete> {
        vec![
            Lembrete::new("Pagar boleto OBMEP", "", Importancia::Alta, em(10, 8)),
            Lembrete::new("Divulgar resultado", "", Importancia::Media, em(10, 9)),
            Lembrete::new("Reunião de pais", "", Importancia::Baixa, em(20, 8)),
        ]
    }

    #[test]
    fn test_um_alerta_por_verificacao() {
        let mut lembretes = agenda();
        let agora = em(10, 10);

        // Dois vencidos, mas só um alerta por vez
        let primeiro = LembreteService::proximo_alerta(&mut lembretes, agora).unwrap();
        assert_eq!(primeiro, lembretes[0].id);
        assert!(lembretes[0].notificado);
        assert!(!lembretes[1].notificado);

        let segundo = LembreteService::proximo_alerta(&mut lembretes, agora).unwrap();
        assert_eq!(segundo, lembretes[1].id);

        // Nada mais vencido por anunciar
        assert!(LembreteService::proximo_alerta(&mut lembretes, agora).is_none());
    }

    #[test]
    fn test_selo_ignora_notificado_sem_ciencia() {
        let mut lembretes = agenda();
        let agora = em(10, 10);

        assert_eq!(LembreteService::nao_lidos(&lembretes, agora), 2);

        LembreteService::proximo_alerta(&mut lembretes, agora);
        assert_eq!(LembreteService::nao_lidos(&lembretes, agora), 2);

        let id = lembretes[0].id.clone();
        assert!(LembreteService::dar_ciencia(&mut lembretes, &id));
        assert_eq!(LembreteService::nao_lidos(&lembretes, agora), 1);
    }

    #[test]
    fn test_ordenacao_por_vencimento() {
        let mut lembretes = agenda();
        lembretes.reverse();

        let ordenados = LembreteService::ordenados(&lembretes);
        assert_eq!(ordenados[0].titulo, "Pagar boleto OBMEP");
        assert_eq!(ordenados[2].titulo, "Reunião de pais");
    }
}
