use serde::{Deserialize, Serialize};

/// Name search input. An absent or empty term matches every row.
#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    pub search_term: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        self.search_term.as_deref().unwrap_or("")
    }

    /// `ILIKE` pattern matching the term as a substring.
    pub fn pattern(&self) -> String {
        format!("%{}%", self.term())
    }
}

#[derive(Serialize, Debug)]
pub struct SearchResults<T> {
    pub count: usize,
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_term_matches_everything() {
        let q = SearchQuery { search_term: None };
        assert_eq!(q.pattern(), "%%");
    }

    #[test]
    fn term_is_wrapped_as_substring_pattern() {
        let q = SearchQuery {
            search_term: Some("hop".into()),
        };
        assert_eq!(q.pattern(), "%hop%");
    }
}
