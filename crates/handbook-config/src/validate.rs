//! Field-level validation helpers.

use url::Url;

use crate::ConfigError;

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Parse an absolute `http://` or `https://` URL with a host.
///
/// Returns the reason on failure so callers can wrap it in the error
/// variant that fits the field.
pub(crate) fn parse_http_url(value: &str) -> Result<Url, String> {
    let parsed = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "scheme '{}' not supported, must be http or https",
            parsed.scheme()
        ));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("URL must have a host".to_owned());
    }
    Ok(parsed)
}

/// Parse the site origin.
pub(crate) fn parse_origin(value: &str) -> Result<Url, ConfigError> {
    parse_http_url(value).map_err(|reason| ConfigError::InvalidOrigin {
        value: value.to_owned(),
        reason,
    })
}

/// Check that a slug is a relative content path.
///
/// Returns the reason when the slug is not acceptable.
pub(crate) fn check_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() {
        return Err("slug cannot be empty");
    }
    if slug.starts_with('/') {
        return Err("slug must be relative (no leading '/')");
    }
    if slug.ends_with('/') {
        return Err("slug must not end with '/'");
    }
    if slug.contains('\\') {
        return Err("slug must use '/' as separator");
    }
    if slug.chars().any(char::is_whitespace) {
        return Err("slug must not contain whitespace");
    }
    if slug
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err("slug must not contain empty, '.' or '..' segments");
    }
    Ok(())
}
