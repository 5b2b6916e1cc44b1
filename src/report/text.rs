//! Markdown-lite parsing and measured word wrap
//!
//! Only two markup forms are recognized:
//! - a line whose first non-blank character is `#` is a sub-heading
//! - `**...**` spans are bold inside a paragraph
//!
//! Markers are stripped from the rendered text. Plain and bold runs share
//! one horizontal cursor, so emphasis never forces its own line.

use super::metrics::{text_width, FontStyle};

const BOLD_MARKER: &str = "**";

/// A styled fragment of text
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: FontStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: FontStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One wrappable unit: pieces with no whitespace between them
///
/// A word like `**sis**mica` holds a bold piece followed by a regular one.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub pieces: Vec<Span>,
}

impl Word {
    fn single(span: Span) -> Self {
        Self { pieces: vec![span] }
    }

    /// Width of the word at `size`
    pub fn width(&self, size: f32) -> f32 {
        self.pieces
            .iter()
            .map(|p| text_width(&p.text, p.style, size))
            .sum()
    }

    /// Concatenated text without markers
    pub fn text(&self) -> String {
        self.pieces.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Split plain text into single-style words
pub fn styled_words(text: &str, style: FontStyle) -> Vec<Word> {
    text.split_whitespace()
        .map(|w| Word::single(Span::new(w, style)))
        .collect()
}

/// A parsed line of the interpretation text
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `#`-prefixed line, rendered bold
    Heading(Vec<Word>),
    /// Body text with inline emphasis
    Paragraph(Vec<Word>),
    /// Blank line(s) between paragraphs
    Gap,
}

/// Split interpretation text into headings, paragraphs and gaps
///
/// Consecutive blank lines collapse into one gap; leading and trailing
/// gaps are dropped.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if matches!(blocks.last(), Some(Block::Heading(_) | Block::Paragraph(_))) {
                blocks.push(Block::Gap);
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('#') {
            let title = rest.trim_start_matches('#').replace(BOLD_MARKER, "");
            let words = styled_words(&title, FontStyle::Bold);
            if !words.is_empty() {
                blocks.push(Block::Heading(words));
            }
        } else {
            blocks.push(Block::Paragraph(parse_emphasis(trimmed)));
        }
    }

    if matches!(blocks.last(), Some(Block::Gap)) {
        blocks.pop();
    }
    blocks
}

/// Split a paragraph into words, toggling bold at every `**`
///
/// An unbalanced marker leaves the rest of the line bold.
pub fn parse_emphasis(line: &str) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut bold = false;
    // true when the previous segment ended mid-word
    let mut glued = false;

    for (i, segment) in line.split(BOLD_MARKER).enumerate() {
        if i > 0 {
            bold = !bold;
        }
        if segment.is_empty() {
            continue;
        }
        let style = if bold { FontStyle::Bold } else { FontStyle::Regular };
        let starts_blank = segment.starts_with(char::is_whitespace);

        for (j, piece) in segment.split_whitespace().enumerate() {
            let span = Span::new(piece, style);
            let glue = j == 0 && glued && !starts_blank;
            match words.last_mut() {
                Some(last) if glue => last.pieces.push(span),
                _ => words.push(Word::single(span)),
            }
        }
        glued = !segment.ends_with(char::is_whitespace);
    }
    words
}

/// Width of the inter-word space at `size`
pub fn space_width(size: f32) -> f32 {
    text_width(" ", FontStyle::Regular, size)
}

/// Greedy word wrap against a measured width budget
///
/// No line exceeds `max_width` unless it holds a single word that is
/// wider than the budget on its own.
pub fn wrap_words(words: &[Word], max_width: f32, size: f32) -> Vec<Vec<Word>> {
    let space = space_width(size);
    let mut lines = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut x = 0.0;

    for word in words {
        let w = word.width(size);
        if current.is_empty() {
            x = w;
        } else if x + space + w <= max_width {
            x += space + w;
        } else {
            lines.push(std::mem::take(&mut current));
            x = w;
        }
        current.push(word.clone());
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Merge a wrapped line into positioned runs of uniform style
///
/// Returns `(x_offset, span)` pairs; offsets are relative to the line start.
pub fn line_runs(line: &[Word], size: f32) -> Vec<(f32, Span)> {
    let space = space_width(size);
    let mut runs: Vec<(f32, Span)> = Vec::new();
    let mut x = 0.0;

    for (i, word) in line.iter().enumerate() {
        if i > 0 {
            x += space;
        }
        for (j, piece) in word.pieces.iter().enumerate() {
            let separator = if i > 0 && j == 0 { " " } else { "" };
            let same_style = runs.last().is_some_and(|(_, run)| run.style == piece.style);
            match runs.last_mut() {
                Some((_, run)) if same_style => {
                    run.text.push_str(separator);
                    run.text.push_str(&piece.text);
                }
                _ => runs.push((x, piece.clone())),
            }
            x += text_width(&piece.text, piece.style, size);
        }
    }
    runs
}
