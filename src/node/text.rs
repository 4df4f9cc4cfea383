//! Text node type

/// How text content is emitted by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    /// HTML special characters are escaped on output
    #[default]
    Escaped,
    /// Content is already safe markup and is emitted as-is
    Raw,
}

/// Text content node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Text content
    pub content: String,
    /// Output mode
    pub kind: TextKind,
}

impl Text {
    /// Create a text node that is escaped on output
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TextKind::Escaped,
        }
    }

    /// Create a raw text node for sanitized markup
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TextKind::Raw,
        }
    }

    pub fn is_raw(&self) -> bool {
        self.kind == TextKind::Raw
    }

    /// Check if text content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
