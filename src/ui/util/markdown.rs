use pulldown_cmark::{Event as CmarkEvent, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::util::colors;

/// Renders model replies as CommonMark: emphasis, headings, lists, quotes,
/// code and links become styled spans. Every returned line fits in `width`
/// columns; words wider than that are broken by character.
pub fn render(text: &str, width: usize, base: Style) -> Vec<Line<'static>> {
    let mut renderer = Renderer::new(width.max(8), base);
    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        renderer.push(event);
    }
    renderer.finish()
}

/// Wraps text without interpreting any markup. Used for what the user typed.
pub fn plain(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    let width = width.max(8);
    let mut out = Vec::new();
    for raw in text.lines() {
        let mut wrapper = Wrapper::new(String::new(), String::new(), width, &mut out);
        wrapper.text(raw, style);
        wrapper.finish();
    }
    out
}

struct ListLevel {
    next: Option<u64>,
    indent: usize,
}

struct Renderer {
    width: usize,
    base: Style,
    lines: Vec<Line<'static>>,
    styles: Vec<Style>,
    lists: Vec<ListLevel>,
    quotes: usize,
    pending: Vec<(String, Style)>,
    item_prefix: Option<String>,
    link: Option<(String, usize)>,
    in_code_block: bool,
    needs_gap: bool,
}

impl Renderer {
    fn new(width: usize, base: Style) -> Self {
        Self {
            width,
            base,
            lines: Vec::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            quotes: 0,
            pending: Vec::new(),
            item_prefix: None,
            link: None,
            in_code_block: false,
            needs_gap: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn code_style(&self) -> Style {
        self.style().fg(colors::ACCENT)
    }

    fn enter(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.styles.push(style);
    }

    fn quote_prefix(&self) -> String {
        "│ ".repeat(self.quotes)
    }

    fn continuation(&self) -> String {
        let indent = self.lists.last().map_or(0, |l| l.indent);
        format!("{}{}", self.quote_prefix(), " ".repeat(indent))
    }

    fn gap(&mut self) {
        if self.needs_gap && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.needs_gap = false;
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.gap();

        let rest = self.continuation();
        let first = self.item_prefix.take().unwrap_or_else(|| rest.clone());
        let spans = std::mem::take(&mut self.pending);

        let mut wrapper = Wrapper::new(first, rest, self.width, &mut self.lines);
        for (text, style) in &spans {
            wrapper.text(text, *style);
        }
        wrapper.finish();
    }

    fn start_item(&mut self) {
        self.flush();
        let parent = match self.lists.len() {
            0 | 1 => 0,
            n => self.lists[n - 2].indent,
        };
        let Some(level) = self.lists.last_mut() else {
            return;
        };
        let marker = match level.next.as_mut() {
            Some(n) => {
                let marker = format!("{}. ", n);
                *n += 1;
                marker
            }
            None => "• ".to_string(),
        };
        level.indent = parent + marker.width();
        self.item_prefix = Some(format!(
            "{}{}{}",
            self.quote_prefix(),
            " ".repeat(parent),
            marker
        ));
    }

    fn code_lines(&mut self, text: &str) {
        self.gap();
        let prefix = format!("{}  ", self.continuation());
        let style = self.code_style();
        for line in text.lines() {
            let mut wrapper = Wrapper::new(prefix.clone(), prefix.clone(), self.width, &mut self.lines);
            wrapper.word(line, style);
            wrapper.finish();
        }
    }

    fn end_link(&mut self) {
        self.styles.pop();
        let Some((url, start)) = self.link.take() else {
            return;
        };
        let label: String = self
            .pending
            .get(start..)
            .unwrap_or_default()
            .iter()
            .map(|(t, _)| t.as_str())
            .collect();
        if label != url {
            self.pending
                .push((format!(" <{}>", url), self.base.fg(colors::NEUTRAL)));
        }
    }

    fn push(&mut self, event: CmarkEvent) {
        match event {
            CmarkEvent::Start(tag) => match tag {
                Tag::Heading { .. } => {
                    self.flush();
                    let style = self
                        .base
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD);
                    self.styles.push(style);
                }
                Tag::BlockQuote { .. } => {
                    self.flush();
                    self.quotes += 1;
                }
                Tag::CodeBlock(_) => {
                    self.flush();
                    self.in_code_block = true;
                }
                Tag::List(start) => {
                    self.flush();
                    let indent = self.lists.last().map_or(0, |l| l.indent);
                    self.lists.push(ListLevel {
                        next: start,
                        indent,
                    });
                }
                Tag::Item => self.start_item(),
                Tag::Emphasis => self.enter(Modifier::ITALIC),
                Tag::Strong => self.enter(Modifier::BOLD),
                Tag::Strikethrough => self.enter(Modifier::CROSSED_OUT),
                Tag::Link { dest_url, .. } => {
                    self.link = Some((dest_url.into_string(), self.pending.len()));
                    self.enter(Modifier::UNDERLINED);
                }
                _ => {}
            },
            CmarkEvent::End(tag) => match tag {
                TagEnd::Paragraph => {
                    self.flush();
                    if self.lists.is_empty() {
                        self.needs_gap = true;
                    }
                }
                TagEnd::Heading { .. } => {
                    self.flush();
                    self.styles.pop();
                    self.needs_gap = true;
                }
                TagEnd::BlockQuote { .. } => {
                    self.flush();
                    self.quotes = self.quotes.saturating_sub(1);
                    self.needs_gap = true;
                }
                TagEnd::CodeBlock => {
                    self.in_code_block = false;
                    self.needs_gap = true;
                }
                TagEnd::List { .. } => {
                    self.flush();
                    self.lists.pop();
                    if self.lists.is_empty() {
                        self.needs_gap = true;
                    }
                }
                TagEnd::Item => self.flush(),
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                    self.styles.pop();
                }
                TagEnd::Link { .. } => self.end_link(),
                _ => {}
            },
            CmarkEvent::Text(text) => {
                if self.in_code_block {
                    self.code_lines(&text);
                } else {
                    let style = self.style();
                    self.pending.push((text.into_string(), style));
                }
            }
            CmarkEvent::Code(code) => {
                let style = self.code_style();
                self.pending.push((code.into_string(), style));
            }
            CmarkEvent::Html(html) | CmarkEvent::InlineHtml(html) => {
                let style = self.style();
                self.pending
                    .push((html.trim_end_matches('\n').to_string(), style));
            }
            CmarkEvent::SoftBreak => {
                let style = self.style();
                self.pending.push((" ".to_string(), style));
            }
            CmarkEvent::HardBreak => self.flush(),
            CmarkEvent::Rule => {
                self.flush();
                self.gap();
                let rule = "─".repeat(self.width.min(24));
                self.lines
                    .push(Line::from(Span::styled(rule, self.base.fg(colors::MUTED))));
                self.needs_gap = true;
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        self.lines
    }
}

/// Fills lines word by word. The first line starts with `first`, the rest
/// with `rest`.
struct Wrapper<'a> {
    out: &'a mut Vec<Line<'static>>,
    rest: String,
    width: usize,
    current: Vec<Span<'static>>,
    used: usize,
    has_words: bool,
    space: Option<Style>,
}

impl<'a> Wrapper<'a> {
    fn new(first: String, rest: String, width: usize, out: &'a mut Vec<Line<'static>>) -> Self {
        let first = fit(first, width);
        let rest = fit(rest, width);
        let used = first.width();
        Self {
            out,
            rest,
            width,
            current: vec![Span::raw(first)],
            used,
            has_words: false,
            space: None,
        }
    }

    fn text(&mut self, text: &str, style: Style) {
        for (i, word) in text.split(' ').enumerate() {
            if i > 0 && self.has_words {
                self.space = Some(style);
            }
            if !word.is_empty() {
                self.word(word, style);
            }
        }
    }

    fn break_line(&mut self) {
        self.out.push(Line::from(std::mem::take(&mut self.current)));
        self.current.push(Span::raw(self.rest.clone()));
        self.used = self.rest.width();
        self.has_words = false;
        self.space = None;
    }

    fn word(&mut self, word: &str, style: Style) {
        let width = word.width();
        let space = usize::from(self.space.is_some());

        if self.has_words && self.used + space + width > self.width {
            self.break_line();
        } else if let Some(space_style) = self.space.take() {
            self.current.push(Span::styled(" ", space_style));
            self.used += 1;
        }

        if self.used + width <= self.width {
            self.current.push(Span::styled(word.to_string(), style));
            self.used += width;
            self.has_words |= !word.is_empty();
            return;
        }

        let mut chunk = String::new();
        for ch in word.chars() {
            let cw = ch.width().unwrap_or(0);
            if self.used + cw > self.width && (self.has_words || !chunk.is_empty()) {
                if !chunk.is_empty() {
                    self.current
                        .push(Span::styled(std::mem::take(&mut chunk), style));
                }
                self.break_line();
            }
            chunk.push(ch);
            self.used += cw;
        }
        if !chunk.is_empty() {
            self.current.push(Span::styled(chunk, style));
            self.has_words = true;
        }
    }

    fn finish(self) {
        self.out.push(Line::from(self.current));
    }
}

/// Prefixes never take more than half the line.
fn fit(prefix: String, width: usize) -> String {
    if prefix.width() * 2 <= width {
        return prefix;
    }
    let trimmed = prefix.trim_start();
    if trimmed.width() * 2 <= width {
        trimmed.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn span<'a>(lines: &'a [Line], content: &str) -> &'a Span<'a> {
        lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content == content)
            .unwrap()
    }

    #[test]
    fn emphasis_is_styled() {
        let lines = render("Try **vaporwave** or *city pop*", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["Try vaporwave or city pop"]);
        assert!(
            span(&lines, "vaporwave")
                .style
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert!(
            span(&lines, "pop")
                .style
                .add_modifier
                .contains(Modifier::ITALIC)
        );
    }

    #[test]
    fn nested_emphasis_combines() {
        let lines = render("a ***banger*** indeed", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["a banger indeed"]);
        let modifiers = span(&lines, "banger").style.add_modifier;
        assert!(modifiers.contains(Modifier::BOLD | Modifier::ITALIC));
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        let lines = render("5 * 3 stars", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["5 * 3 stars"]);
    }

    #[test]
    fn spaced_asterisks_stay_literal() {
        let lines = render("rate it 4 * 5 * 10", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["rate it 4 * 5 * 10"]);
        assert!(
            lines[0]
                .spans
                .iter()
                .all(|s| !s.style.add_modifier.contains(Modifier::ITALIC))
        );
    }

    #[test]
    fn intraword_underscores_stay_literal() {
        let lines = render("try the lo_fi_hip_hop tag", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["try the lo_fi_hip_hop tag"]);
        assert!(
            lines[0]
                .spans
                .iter()
                .all(|s| !s.style.add_modifier.contains(Modifier::ITALIC))
        );
    }

    #[test]
    fn code_spans_are_literal_and_highlighted() {
        let lines = render("tag it `[verse] *slow*`", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["tag it [verse] *slow*"]);
        assert_eq!(span(&lines, "*slow*").style.fg, Some(colors::ACCENT));
    }

    #[test]
    fn headings_are_bold() {
        let lines = render("## Picks\n\nDrive", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["Picks", "", "Drive"]);
        assert!(
            span(&lines, "Picks")
                .style
                .add_modifier
                .contains(Modifier::BOLD)
        );
    }

    #[test]
    fn paragraphs_are_separated() {
        let lines = render("First idea.\n\nSecond idea.", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["First idea.", "", "Second idea."]);
    }

    #[test]
    fn list_items_get_bullets() {
        let lines = render(
            "- Synthwave\n- Lofi\n\n1. Metal\n2. Ambient",
            80,
            Style::default(),
        );
        assert_eq!(
            text_of(&lines),
            vec!["• Synthwave", "• Lofi", "", "1. Metal", "2. Ambient"]
        );
    }

    #[test]
    fn nested_lists_are_indented() {
        let lines = render("- Retro\n  - Synthwave\n- Lofi", 80, Style::default());
        assert_eq!(
            text_of(&lines),
            vec!["• Retro", "  • Synthwave", "• Lofi"]
        );
    }

    #[test]
    fn long_lines_wrap_under_the_bullet() {
        let lines = render("- one two three four", 9, Style::default());
        assert_eq!(text_of(&lines), vec!["• one two", "  three", "  four"]);
    }

    #[test]
    fn overwide_words_are_split_to_fit() {
        let url = format!("https://suno.com/{}", "a".repeat(60));
        let input = format!("see {}", url);
        let lines = render(&input, 20, Style::default());

        assert!(lines.len() > 2);
        assert!(lines.iter().all(|l| l.width() <= 20));
        let joined: String = text_of(&lines).concat();
        assert_eq!(joined.replace(' ', ""), input.replace(' ', ""));
    }

    #[test]
    fn wide_characters_respect_the_width() {
        let lines = render(&"音".repeat(15), 10, Style::default());
        assert!(lines.iter().all(|l| l.width() <= 10));
        assert_eq!(text_of(&lines).concat(), "音".repeat(15));
    }

    #[test]
    fn plain_text_is_not_interpreted() {
        let lines = plain("play *this* and lo_fi", 80, Style::default());
        assert_eq!(text_of(&lines), vec!["play *this* and lo_fi"]);
    }
}
