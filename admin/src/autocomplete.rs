use shared::Labelled;

/// Text input over a fixed list of `{id, label}` options.
///
/// Typing narrows the suggestions to labels starting with the text; picking
/// one sets the value; dismissing the list puts the selected label back.
#[derive(Debug, Clone)]
pub struct Autocomplete<T: Labelled + Clone> {
    options: Vec<T>,
    text: String,
    selected: Option<T>,
    open: bool,
}

impl<T: Labelled + Clone> Autocomplete<T> {
    pub fn new(options: Vec<T>, selected: Option<T>) -> Self {
        let text = selected.as_ref().map(|s| s.label().to_string()).unwrap_or_default();
        Self {
            options,
            text,
            selected,
            open: false,
        }
    }

    pub fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn type_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.open = true;
    }

    pub fn suggestions(&self) -> Vec<&T> {
        let needle = self.text.trim().to_lowercase();
        self.options
            .iter()
            .filter(|o| needle.is_empty() || o.label().to_lowercase().starts_with(&needle))
            .collect()
    }

    /// Select the option with `id`; returns the new value
    pub fn select(&mut self, id: &str) -> Option<T> {
        let option = self.options.iter().find(|o| o.id() == id).cloned()?;
        self.text = option.label().to_string();
        self.selected = Some(option.clone());
        self.open = false;
        Some(option)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.selected = None;
    }

    pub fn dismiss(&mut self) {
        self.open = false;
        self.text = self
            .selected
            .as_ref()
            .map(|s| s.label().to_string())
            .unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared::Deck;

    fn decks() -> Vec<Deck> {
        ["Kashtira", "Kewl Tune", "Snake-Eye", "Tenpai"]
            .iter()
            .enumerate()
            .map(|(i, label)| Deck {
                id: format!("d{}", i),
                label: label.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_prefix_suggestions() {
        let mut input = Autocomplete::new(decks(), None);
        assert_eq!(input.suggestions().len(), 4);

        input.type_text("k");
        let labels: Vec<&str> = input.suggestions().iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Kashtira", "Kewl Tune"]);

        input.type_text("eye");
        assert!(input.suggestions().is_empty());
    }

    #[test]
    fn test_dismiss_reverts_to_selection() {
        let mut input = Autocomplete::new(decks(), None);
        input.type_text("ten");
        assert_eq!(input.select("d3").unwrap().label, "Tenpai");
        assert_eq!(input.text(), "Tenpai");

        input.type_text("Sna");
        input.dismiss();
        assert_eq!(input.text(), "Tenpai");
        assert!(!input.is_open());
    }

    #[test]
    fn test_dismiss_without_selection_empties_text() {
        let mut input = Autocomplete::new(decks(), None);
        input.type_text("zzz");
        input.dismiss();
        assert_eq!(input.text(), "");
        assert_eq!(input.select("missing"), None);
    }
}
