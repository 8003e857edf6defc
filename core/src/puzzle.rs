use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// A secret phrase and the vector illustration depicting it, one per round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub word: String,
    pub svg: String,
}

impl Puzzle {
    pub fn new(word: impl Into<String>, svg: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            svg: svg.into(),
        }
    }

    /// Decodes the object embedded in raw generator output.
    ///
    /// The generator tends to wrap its answer in prose, so the object is recovered with [`extract_json_object`]
    /// first. Braces inside the object (inline CSS in the SVG, for example) must be balanced for this to work.
    pub fn from_generation_output(text: &str) -> Result<Self, ParseError> {
        let object = extract_json_object(text).ok_or(ParseError::NoJsonObject)?;
        serde_json::from_str(object).map_err(|err| ParseError::InvalidPuzzle(err.to_string()))
    }
}

/// Greedy slice from the first `{` to the last `}` following it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
