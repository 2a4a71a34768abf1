// libs/auth-cell/src/services/password.rs
//
// The legacy derived-password scheme: CEP digits concatenated with the
// two-digit birth day. Deliberately weak, reproduced for compatibility with
// accounts created by the existing web client. Not a template for new auth.
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn digits_of(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CEP digits + zero-padded day of birth, e.g. CEP "01310-100" born on the
/// 5th -> "0131010005".
pub fn derive_password(cep: &str, birth_date: NaiveDate) -> String {
    format!("{}{:02}", digits_of(cep), birth_date.day())
}

/// Strip formatting from a CPF, keeping digits only.
pub fn normalize_cpf(cpf: &str) -> String {
    digits_of(cpf)
}

pub fn validate_cpf(cpf: &str) -> bool {
    normalize_cpf(cpf).len() == 11
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn validate_cep(cep: &str) -> bool {
    digits_of(cep).len() == 8
}

/// A birth date in the future is nonsense; today is accepted.
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> bool {
    birth_date <= today
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_cep_digits_plus_padded_day() {
        let born = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
        assert_eq!(derive_password("01310-100", born), "0131010015");

        let born_early = NaiveDate::from_ymd_opt(1990, 5, 5).unwrap();
        assert_eq!(derive_password("01310100", born_early), "0131010005");
    }

    #[test]
    fn cpf_is_eleven_digits_after_stripping() {
        assert!(validate_cpf("123.456.789-01"));
        assert!(validate_cpf("12345678901"));
        assert!(!validate_cpf("123.456.789"));
        assert_eq!(normalize_cpf("123.456.789-01"), "12345678901");
    }

    #[test]
    fn email_and_cep_shapes() {
        assert!(validate_email("ana@example.com"));
        assert!(!validate_email("ana@example"));
        assert!(!validate_email("not an email"));

        assert!(validate_cep("01310-100"));
        assert!(!validate_cep("0131"));
    }

    #[test]
    fn birth_date_cannot_be_in_the_future() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        assert!(validate_birth_date(today, today));
        assert!(validate_birth_date(today.pred_opt().unwrap(), today));
        assert!(!validate_birth_date(today.succ_opt().unwrap(), today));
    }
}
