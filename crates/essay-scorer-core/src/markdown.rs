//! Essay source formats and markdown-to-prose reduction.
//!
//! Uses pulldown-cmark for CommonMark parsing so fenced code, tables, and
//! front matter are recognized structurally rather than by pattern.

use std::borrow::Cow;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the essay text is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EssayFormat {
    /// Plain text, scored as written.
    #[default]
    Plain,
    /// Markdown, reduced to its prose before scoring.
    Markdown,
}

impl EssayFormat {
    /// Pick a format from a file extension (`md` and `markdown` are markdown).
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension.map(str::to_ascii_lowercase).as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::Plain,
        }
    }

    /// The text that gets scored.
    pub fn prose<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::Plain => Cow::Borrowed(text),
            Self::Markdown => Cow::Owned(strip_to_prose(text)),
        }
    }

    /// Lowercase name of the format.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Markdown => "markdown",
        }
    }
}

impl std::fmt::Display for EssayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce markdown to the prose a reader would score.
///
/// Drops front matter, headings, code, tables, images, HTML, and footnote
/// definitions. Keeps link text, emphasis text, blockquotes, and list items.
/// Paragraphs and list items are separated by line breaks so sentence
/// boundaries between them survive.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;

    let mut prose = String::with_capacity(text.len());
    let mut skip_depth: usize = 0;

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(
                Tag::MetadataBlock(_)
                | Tag::Heading { .. }
                | Tag::CodeBlock(_)
                | Tag::Table(_)
                | Tag::Image { .. }
                | Tag::FootnoteDefinition(_),
            ) => skip_depth += 1,
            Event::End(
                TagEnd::MetadataBlock(_)
                | TagEnd::Heading(_)
                | TagEnd::CodeBlock
                | TagEnd::Table
                | TagEnd::Image
                | TagEnd::FootnoteDefinition,
            ) => skip_depth = skip_depth.saturating_sub(1),

            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak if skip_depth == 0 => prose.push(' '),
            Event::HardBreak if skip_depth == 0 => prose.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if skip_depth == 0 => {
                if !prose.ends_with('\n') {
                    prose.push('\n');
                }
            }

            _ => {}
        }
    }

    prose.trim_end().to_string()
}
