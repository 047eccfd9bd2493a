use thiserror::Error;

/// Errors surfaced by the dropdown engine.
///
/// Geometry problems never show up here: a failed measurement just skips the
/// reposition. What remains are wiring mistakes and bad configuration.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("{component} must be used within a Dropdown")]
    MissingContext { component: &'static str },

    #[error("invalid overlay configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl OverlayError {
    pub fn missing_context(component: &'static str) -> Self {
        OverlayError::MissingContext { component }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_context_names_the_component() {
        let err = OverlayError::missing_context("DropdownMenu");
        assert_eq!(err.to_string(), "DropdownMenu must be used within a Dropdown");
    }
}
