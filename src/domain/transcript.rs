use std::fmt;

/// Raw text returned by the transcription oracle. Casing is left untouched
/// until the caller asks for the normalized form used for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form, as the challenge answer field expects.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
