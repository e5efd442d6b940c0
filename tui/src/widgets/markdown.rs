//! Markdown Styling
//!
//! Converts the markdown of detail documents into styled, wrapped lines.
//! Every detail panel goes through the same [`MarkdownStyles`] table so
//! headings, paragraphs, links and list items look alike across the app.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::theme;

/// Shared style overrides for markdown elements
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkdownStyles {
    /// `#` headings
    pub heading: Style,
    /// `##` and deeper headings
    pub subheading: Style,
    /// Paragraph text
    pub paragraph: Style,
    /// Link text
    pub link: Style,
    /// List bullet
    pub list_bullet: Style,
    /// Inline code and code blocks
    pub code: Style,
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        Self {
            heading: Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
            subheading: Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
            paragraph: Style::default().fg(theme::TEXT),
            link: Style::default()
                .fg(theme::LINK_BLUE)
                .add_modifier(Modifier::UNDERLINED),
            list_bullet: Style::default().fg(theme::ACCENT),
            code: Style::default().fg(theme::TIME_AMBER),
        }
    }
}

impl MarkdownStyles {
    /// Same table with paragraph text overridden (per-panel tweak)
    pub fn with_paragraph(mut self, style: Style) -> Self {
        self.paragraph = style;
        self
    }
}

/// A logical (unwrapped) line being assembled
#[derive(Default)]
struct Block {
    indent: String,
    indent_style: Style,
    spans: Vec<(String, Style)>,
}

struct Builder<'s> {
    styles: &'s MarkdownStyles,
    width: usize,
    lines: Vec<Line<'static>>,
    current: Block,
    style_stack: Vec<Style>,
    list_stack: Vec<Option<u64>>,
    link_url: Option<String>,
}

impl<'s> Builder<'s> {
    fn new(styles: &'s MarkdownStyles, width: usize) -> Self {
        Self {
            styles,
            width: width.max(8),
            lines: Vec::new(),
            current: Block::default(),
            style_stack: vec![styles.paragraph],
            list_stack: Vec::new(),
            link_url: None,
        }
    }

    fn style(&self) -> Style {
        self.style_stack
            .last()
            .copied()
            .unwrap_or(self.styles.paragraph)
    }

    fn push_text(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.current.spans.push((text.to_string(), style));
        }
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| l.spans.is_empty()) || self.lines.is_empty() {
            return;
        }
        self.lines.push(Line::default());
    }

    /// Wrap the current block into output lines
    fn flush(&mut self) {
        let block = std::mem::take(&mut self.current);
        if block.spans.is_empty() {
            return;
        }
        let indent_width = block.indent.width();
        let continuation = " ".repeat(indent_width);
        let avail = self.width.saturating_sub(indent_width).max(4);

        let mut line: Vec<Span<'static>> = vec![Span::styled(block.indent, block.indent_style)];
        let mut used = 0usize;

        for (text, style) in block.spans {
            for (i, word) in text.split(' ').enumerate() {
                let needs_space = i > 0;
                let word_width = word.width();
                let space = usize::from(needs_space && used > 0);

                if used > 0 && used + space + word_width > avail {
                    self.lines.push(Line::from(std::mem::take(&mut line)));
                    line.push(Span::raw(continuation.clone()));
                    used = 0;
                } else if space == 1 {
                    line.push(Span::styled(" ", style));
                    used += 1;
                }

                if !word.is_empty() {
                    line.push(Span::styled(word.to_string(), style));
                    used += word_width;
                }
            }
        }
        self.lines.push(Line::from(line));
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                let style = self.style();
                self.push_text(&text, style);
            }
            Event::Code(code) => {
                let style = self.styles.code;
                self.push_text(&code, style);
            }
            Event::SoftBreak => {
                let style = self.style();
                self.push_text(" ", style);
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::styled(
                    "─".repeat(self.width.min(40)),
                    Style::default().fg(theme::DIM_GRAY),
                ));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                let style = if level == HeadingLevel::H1 {
                    self.styles.heading
                } else {
                    self.styles.subheading
                };
                self.style_stack.push(style);
            }
            Tag::Paragraph => self.flush(),
            Tag::List(start) => {
                self.flush();
                self.list_stack.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.list_stack.len().saturating_sub(1);
                let bullet = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let label = format!("{n}. ");
                        *n += 1;
                        label
                    }
                    _ => "• ".to_string(),
                };
                self.current.indent = format!("{}{}", "  ".repeat(depth), bullet);
                self.current.indent_style = self.styles.list_bullet;
            }
            Tag::Emphasis => {
                let style = self.style().add_modifier(Modifier::ITALIC);
                self.style_stack.push(style);
            }
            Tag::Strong => {
                let style = self.style().add_modifier(Modifier::BOLD);
                self.style_stack.push(style);
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.style_stack.push(self.styles.link);
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.style_stack.push(self.styles.code);
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.style_stack.pop();
                self.flush();
                self.blank_line();
            }
            TagEnd::Paragraph => {
                self.flush();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::List(_) => {
                self.flush();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Emphasis | TagEnd::Strong => {
                self.style_stack.pop();
            }
            TagEnd::Link => {
                self.style_stack.pop();
                if let Some(url) = self.link_url.take() {
                    let label: String = self
                        .current
                        .spans
                        .iter()
                        .map(|(t, _)| t.as_str())
                        .collect();
                    let shown = url.strip_prefix("mailto:").unwrap_or(&url);
                    if !label.contains(shown) {
                        let style = Style::default().fg(theme::DIM_GRAY);
                        self.push_text(&format!(" <{shown}>"), style);
                    }
                }
            }
            TagEnd::CodeBlock => {
                self.style_stack.pop();
                let block = std::mem::take(&mut self.current);
                for (text, style) in block.spans {
                    for l in text.lines() {
                        self.lines.push(Line::styled(format!("  {l}"), style));
                    }
                }
                self.blank_line();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Render markdown to styled lines wrapped at `width` columns
pub fn render_markdown(text: &str, width: usize, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    let mut builder = Builder::new(styles, width);
    for event in Parser::new(text) {
        builder.handle(event);
    }
    builder.finish()
}
