use crate::errors::FieldError;

/// Required text field: present and not just whitespace.
pub fn require_text(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
}

/// Genres must be a non-empty list of non-blank entries.
pub fn require_genres(genres: &[String], errors: &mut Vec<FieldError>) {
    if genres.is_empty() || genres.iter().any(|g| g.trim().is_empty()) {
        errors.push(FieldError::new(
            "genres",
            "at least one genre is required".to_string(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_missing() {
        let mut errors = Vec::new();
        require_text("city", "   ", &mut errors);
        require_text("state", "CA", &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "city");
    }

    #[test]
    fn blank_genre_entry_is_rejected() {
        let mut errors = Vec::new();
        require_genres(&["Jazz".into(), "".into()], &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "genres");
    }

    #[test]
    fn populated_genres_pass() {
        let mut errors = Vec::new();
        require_genres(&["Folk".into()], &mut errors);
        assert!(errors.is_empty());
    }
}
