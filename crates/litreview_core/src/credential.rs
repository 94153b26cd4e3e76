use std::fmt;

/// API key for the generation service.
///
/// `Debug` never prints the value, so states, requests and effects can be
/// logged freely.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when nothing but whitespace was entered.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Credential(<empty>)")
        } else {
            write!(f, "Credential(<redacted, {} chars>)", self.0.chars().count())
        }
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_secret() {
        let credential = Credential::new("sk-or-secret");
        let printed = format!("{credential:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("12 chars"));
    }

    #[test]
    fn whitespace_only_is_blank_but_not_empty() {
        let credential = Credential::new("   ");
        assert!(credential.is_blank());
        assert!(!credential.is_empty());
    }
}
