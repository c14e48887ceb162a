use crate::utils::error::{GeocoderError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GeocoderError::validation(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GeocoderError::validation(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(GeocoderError::validation(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(GeocoderError::validation(
            field_name,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GeocoderError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so test containment rather than exclusion.
    if !(value >= min && value <= max) {
        return Err(GeocoderError::validation(
            field_name,
            format!("Value must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

/// ISO 3166-1 alpha-2.
pub fn validate_country_code(field_name: &str, value: &str) -> Result<()> {
    if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GeocoderError::validation(
            field_name,
            format!("Expected a two-letter country code, got '{}'", value),
        ));
    }
    Ok(())
}

pub fn validate_optional<T: ?Sized>(
    value: Option<&T>,
    check: impl FnOnce(&T) -> Result<()>,
) -> Result<()> {
    match value {
        Some(v) => check(v),
        None => Ok(()),
    }
}
