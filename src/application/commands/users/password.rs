// src/application/commands/users/password.rs
use crate::application::error::{ApplicationError, ApplicationResult};

pub(super) const MIN_PASSWORD_LENGTH: usize = 8;

pub(super) fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApplicationError::validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_letter && has_digit) {
        return Err(ApplicationError::validation(
            "password must contain at least one letter and one digit",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_password;

    #[test]
    fn accepts_letters_and_digits() {
        assert!(validate_password("secret123").is_ok());
    }

    #[test]
    fn rejects_short_or_single_class() {
        assert!(validate_password("abc12").is_err());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("1234567890").is_err());
    }
}
