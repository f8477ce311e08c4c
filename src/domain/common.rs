/// Provides access to the human-facing title of an entry.
pub trait Titled {
    fn title(&self) -> &str;

    /// Case-insensitive comparison against the entry's title key.
    fn title_matches(&self, other: &str) -> bool {
        title_key(self.title()) == title_key(other)
    }
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Normalises a title into the key used for uniqueness checks.
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_key_ignores_case() {
        assert_eq!(title_key("InCePtIoN"), title_key("inception"));
        assert_eq!(title_key("Ärger"), title_key("ärger"));
    }
}
