use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// Interpreta uma data digitada (formato flexível)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Tenta formatos comuns
    let formats = [
        "%Y-%m-%d", // 2026-03-15
        "%d/%m/%Y", // 15/03/2026
        "%d-%m-%Y", // 15-03-2026
        "%Y/%m/%d", // 2026/03/15
    ];

    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    None
}

/// Interpreta data e hora digitadas (ex: "15/03/2026 14:30")
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let formats = [
        "%d/%m/%Y %H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    // Só a data: meia-noite
    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Formata uma data para exibição (pt-BR)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formata data e hora para exibição (pt-BR)
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// Formata um instante UTC no fuso local para exibição
pub fn format_datetime_utc(dt: DateTime<Utc>) -> String {
    format_datetime(dt.with_timezone(&Local).naive_local())
}

/// Formata um valor monetário em reais (pt-BR)
pub fn format_currency(valor: f64) -> String {
    let negativo = valor < 0.0;
    let centavos = (valor.abs() * 100.0).round() as u64;
    let frac = centavos % 100;

    let mut inteiro = (centavos / 100).to_string();
    let mut grupos = String::new();
    while inteiro.len() > 3 {
        let resto = inteiro.split_off(inteiro.len() - 3);
        grupos = if grupos.is_empty() {
            resto
        } else {
            format!("{}.{}", resto, grupos)
        };
    }
    let inteiro = if grupos.is_empty() {
        inteiro
    } else {
        format!("{}.{}", inteiro, grupos)
    };

    let sinal = if negativo { "-" } else { "" };
    format!("{}R$ {},{:02}", sinal, inteiro, frac)
}

/// Formata uma nota com uma casa decimal e vírgula
pub fn format_nota(valor: f64) -> String {
    format!("{:.1}", valor).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-15"),
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
        );
        assert_eq!(
            parse_date("15/03/2026"),
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap())
        );
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("inválido"), None);
    }

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("15/03/2026 14:30").unwrap();
        assert_eq!(format_datetime(dt), "15/03/2026 14:30");

        // Data sem hora cai na meia-noite
        let dt = parse_datetime("15/03/2026").unwrap();
        assert_eq!(format_datetime(dt), "15/03/2026 00:00");
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2026, 11, 3).unwrap();
        assert_eq!(format_date(d), "03/11/2026");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(45.5), "R$ 45,50");
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency(-12.3), "-R$ 12,30");
    }

    #[test]
    fn test_format_nota() {
        assert_eq!(format_nota(80.0), "80,0");
        assert_eq!(format_nota(7.25), "7,2");
    }
}
