use serde::{Deserialize, Serialize};

/// Editor-visible classification of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightCategory {
    Keyword,
    Identifier,
    String,
    Comment,
    Invalid,
    /// No highlighting; never emitted.
    None,
}

impl HighlightCategory {
    /// Categories that can appear in emitted spans.
    pub const EMITTED: [HighlightCategory; 5] = [
        HighlightCategory::Keyword,
        HighlightCategory::Identifier,
        HighlightCategory::String,
        HighlightCategory::Comment,
        HighlightCategory::Invalid,
    ];

    /// Stable style id used by editors and the JSON output.
    pub fn id(&self) -> &'static str {
        match self {
            HighlightCategory::Keyword => "keyword",
            HighlightCategory::Identifier => "identifier",
            HighlightCategory::String => "string",
            HighlightCategory::Comment => "comment",
            HighlightCategory::Invalid => "invalid",
            HighlightCategory::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, HighlightCategory::None)
    }
}

impl std::fmt::Display for HighlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
