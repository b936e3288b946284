use thiserror::Error;

/// Failures talking to the page while a dialog holds the overlay.
///
/// None of these reach the caller of `Dialog`; the overlay manager logs them and keeps going.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("No window is available")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Document has no body")]
    NoBody,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

#[cfg(any(feature = "hydrate", feature = "csr"))]
impl From<wasm_bindgen::JsValue> for OverlayError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type OverlayResult<T> = Result<T, OverlayError>;

#[cfg(test)]
mod test {
    use super::OverlayError;

    #[test]
    fn error_messages() {
        assert_eq!(OverlayError::NoBody.to_string(), "Document has no body");
        assert_eq!(
            OverlayError::Dom("style is read only".to_string()).to_string(),
            "DOM call failed: style is read only"
        );
    }
}
