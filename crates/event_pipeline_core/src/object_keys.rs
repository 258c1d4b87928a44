use crate::contract::ValidationError;

/// Reverses the URL-style encoding the storage event source applies to
/// object keys: a literal `+` stands for a space, the rest is
/// percent-encoded.
pub fn decode_object_key(raw: &str) -> Result<String, ValidationError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|error| {
            ValidationError::new(format!(
                "Object key '{raw}' does not percent-decode to UTF-8: {error}"
            ))
        })
}
