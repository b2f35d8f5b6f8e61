use crate::forms::image::ImageSelection;
use crate::models::catalog::LabelDraft;
use crate::validation::{validate_field, validate_image};

/// Editor state for decks, tournaments and equipment. Only equipment
/// carries a picture, so the image is checked when `requires_image` is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelForm {
    pub label: String,
    pub image: ImageSelection,
    pub requires_image: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabelFormChange {
    Label(String),
    Image(ImageSelection),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelFormErrors {
    pub label: Option<&'static str>,
    pub image: Option<&'static str>,
}

impl LabelFormErrors {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.image.is_none()
    }

    pub fn clear_for(&mut self, change: &LabelFormChange) {
        match change {
            LabelFormChange::Label(_) => self.label = None,
            LabelFormChange::Image(_) => self.image = None,
        }
    }
}

impl LabelForm {
    pub fn new(requires_image: bool) -> Self {
        Self {
            requires_image,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, change: LabelFormChange) {
        match change {
            LabelFormChange::Label(value) => self.label = value,
            LabelFormChange::Image(value) => self.image = value,
        }
    }

    pub fn validate(&self) -> LabelFormErrors {
        LabelFormErrors {
            label: validate_field(&self.label).message,
            image: if self.requires_image {
                validate_image(&self.image).message
            } else {
                None
            },
        }
    }

    pub fn submit(&self) -> Result<LabelDraft, LabelFormErrors> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(LabelDraft::new(self.label.trim()))
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::REQUIRED_IMAGE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deck_form_ignores_image() {
        let mut form = LabelForm::new(false);
        form.apply(LabelFormChange::Label("Kashtira".into()));
        assert_eq!(form.submit().unwrap().label, "Kashtira");
    }

    #[test]
    fn test_equipment_form_requires_image() {
        let mut form = LabelForm::new(true);
        form.apply(LabelFormChange::Label("Playmat".into()));
        assert_eq!(form.submit().unwrap_err().image, Some(REQUIRED_IMAGE));
    }
}
