/// Terms from the latest search-box input. Replaced wholesale on every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    terms: Vec<String>,
}

impl SearchState {
    /// Splits on single spaces, as typed. Empty terms survive the split but never match.
    pub fn from_input(raw: &str) -> Self {
        Self {
            terms: raw.split(' ').map(str::to_string).collect(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Input that is empty after trimming: everything is visible.
    pub fn is_clear(&self) -> bool {
        is_clear(&self.terms)
    }
}

pub(crate) fn is_clear<S: AsRef<str>>(terms: &[S]) -> bool {
    terms.iter().all(|t| t.as_ref().trim().is_empty())
}

/// Case-insensitive "any non-empty term is a substring of `text`".
pub(crate) fn contains_any<S: AsRef<str>>(text: &str, terms: &[S]) -> bool {
    let haystack = text.to_lowercase();
    terms
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .any(|t| haystack.contains(&t.to_lowercase()))
}
