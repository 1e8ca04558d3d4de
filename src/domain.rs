use crate::error::EmailError;

const SEPARATOR: char = '@';

/// Extracts the domain part of an email address.
///
/// The returned slice borrows from `email` and keeps its original case.
pub fn validate_email(email: &str) -> Result<&str, EmailError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EmailError::Empty);
    }

    let (local, domain) = email
        .split_once(SEPARATOR)
        .ok_or(EmailError::MissingSeparator)?;

    if local.trim().is_empty() {
        return Err(EmailError::EmptyLocalPart);
    }

    let domain = domain.trim();
    if domain.is_empty() {
        return Err(EmailError::EmptyDomain);
    }

    // split_once only consumed the first separator
    if domain.contains(SEPARATOR) {
        return Err(EmailError::MultipleSeparators);
    }

    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert_eq!(validate_email("user@example.com"), Ok("example.com"));
        assert_eq!(validate_email("user@mail.example.com"), Ok("mail.example.com"));
        assert_eq!(validate_email("user123@example123.com"), Ok("example123.com"));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(validate_email("  user@example.com  "), Ok("example.com"));
        assert_eq!(validate_email("\tuser@ example.com\n"), Ok("example.com"));
    }

    #[test]
    fn test_domain_case_is_preserved() {
        assert_eq!(validate_email("Bob@Example.COM"), Ok("Example.COM"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(validate_email(""), Err(EmailError::Empty));
        assert_eq!(validate_email("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            validate_email("userexample.com"),
            Err(EmailError::MissingSeparator)
        );
    }

    #[test]
    fn test_empty_local_part() {
        assert_eq!(validate_email("@example.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(
            validate_email("   @example.com"),
            Err(EmailError::EmptyLocalPart)
        );
        assert_eq!(validate_email("@"), Err(EmailError::EmptyLocalPart));
    }

    #[test]
    fn test_empty_domain() {
        assert_eq!(validate_email("user@"), Err(EmailError::EmptyDomain));
        assert_eq!(validate_email("user@   "), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_multiple_separators() {
        assert_eq!(
            validate_email("user@domain@extra.com"),
            Err(EmailError::MultipleSeparators)
        );
        assert_eq!(
            validate_email("user@@example.com"),
            Err(EmailError::MultipleSeparators)
        );
    }
}
