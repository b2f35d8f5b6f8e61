//! Field checks used by the editors. Each check yields the message key the
//! form shows under the field.

use crate::forms::image::ImageSelection;

pub const REQUIRED_FIELD: &str = "requiredField";
pub const INVALID_EMAIL: &str = "invalidEmail";
pub const REQUIRED_IMAGE: &str = "requiredImage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub message: Option<&'static str>,
}

impl Validation {
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub const fn invalid(message: &'static str) -> Self {
        Self {
            is_valid: false,
            message: Some(message),
        }
    }
}

pub fn validate_field(value: &str) -> Validation {
    if value.trim().is_empty() {
        Validation::invalid(REQUIRED_FIELD)
    } else {
        Validation::valid()
    }
}

pub fn validate_email(value: &str) -> Validation {
    let value = value.trim();
    if value.is_empty() {
        Validation::invalid(REQUIRED_FIELD)
    } else if !validator::validate_email(value) {
        Validation::invalid(INVALID_EMAIL)
    } else {
        Validation::valid()
    }
}

pub fn validate_object<T>(value: Option<&T>) -> Validation {
    match value {
        Some(_) => Validation::valid(),
        None => Validation::invalid(REQUIRED_FIELD),
    }
}

pub fn validate_image(image: &ImageSelection) -> Validation {
    if image.is_empty() {
        Validation::invalid(REQUIRED_IMAGE)
    } else {
        Validation::valid()
    }
}
