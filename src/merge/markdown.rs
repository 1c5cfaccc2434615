//! Markdown document compilation
//!
//! Each preset may carry a free-text instruction document. Applying several
//! presets compiles them into one Markdown file with a level-two heading per
//! preset, in apply order, separated by horizontal rules.
//!
//! ## Example
//!
//! ```
//! use modo::merge::markdown::{compile_document, DocumentSection};
//!
//! let compiled = compile_document(&[
//!     DocumentSection::new("Base", "Be concise."),
//!     DocumentSection::new("Swift", "Use Swift 5.10."),
//! ]);
//! assert_eq!(compiled, "## Base\n\nBe concise.\n\n---\n\n## Swift\n\nUse Swift 5.10.\n");
//! ```

/// Separator placed between two compiled sections
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// One preset's contribution to the compiled document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    /// Heading text, normally the preset's display name
    pub name: String,
    /// Raw document text
    pub content: String,
}

impl DocumentSection {
    /// Create a section from a heading and its body
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Whether the body has any non-whitespace content
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Generate the heading line for a section
fn heading_for(name: &str) -> String {
    format!("## {}", name)
}

/// Compile sections into one document
///
/// Blank sections are skipped. Bodies are trimmed but otherwise copied
/// verbatim. Returns an empty string when nothing survives; otherwise the
/// result ends with exactly one newline.
pub fn compile_document(sections: &[DocumentSection]) -> String {
    let rendered: Vec<String> = sections
        .iter()
        .filter(|section| !section.is_blank())
        .map(|section| format!("{}\n\n{}", heading_for(&section.name), section.content.trim()))
        .collect();

    if rendered.is_empty() {
        return String::new();
    }

    let mut document = rendered.join(SECTION_SEPARATOR);
    document.push('\n');
    document
}
