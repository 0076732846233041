// utils/validation.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

/// Numéro au format international : indicatif optionnel, 7 à 15 chiffres
static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{6,14}$").expect("phone number pattern is valid")
});

/// Valider un numéro de téléphone (espaces, tirets et parenthèses tolérés)
pub fn validate_phone_number(phone: &str) -> std::result::Result<(), ValidationError> {
    let compact = normalize_phone_number(phone);

    if !PHONE_NUMBER_RE.is_match(&compact) {
        let mut error = ValidationError::new("phone_number");
        error.message = Some(Cow::from("Invalid phone number"));
        return Err(error);
    }

    Ok(())
}

/// Forme canonique stockée en base
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect()
}

/// Valider une chaîne non vide (les espaces seuls ne comptent pas)
pub fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("cannot be empty"));
        return Err(error);
    }
    Ok(())
}

/// Valider une URL d'image absolue
pub fn validate_image_url(url: &str) -> std::result::Result<(), ValidationError> {
    if !validator::validate_url(url) || !(url.starts_with("http://") || url.starts_with("https://")) {
        let mut error = ValidationError::new("url");
        error.message = Some(Cow::from("Invalid URL format"));
        return Err(error);
    }
    Ok(())
}
