// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for `passim search` and `passim inspect`.
//!
//! Results are drawn as boxed blocks. Colors are used only when stdout is a
//! terminal and `NO_COLOR` is unset, so piping keeps the raw highlight
//! markers. `PASSIM_THEME=light` switches to darker tones for light
//! backgrounds.

use passim::{Highlight, Language, Location, ResultSource, SearchResult};
use std::sync::OnceLock;

/// Inner width of a box, between the two `│` borders.
pub const BOX_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Section labels
    Heading,
    /// Borders, anchors, secondary counts
    Muted,
    /// Verse ranges and comment numbers
    Location,
    /// Highlighted match text
    Match,
    Primary,
    Secondary,
}

impl Color {
    fn rgb(self, light: bool) -> (u8, u8, u8) {
        match (self, light) {
            (Color::Heading, false) => (86, 182, 194),
            (Color::Heading, true) => (1, 132, 188),
            (Color::Muted, false) => (92, 99, 112),
            (Color::Muted, true) => (160, 161, 167),
            (Color::Location, false) => (152, 195, 121),
            (Color::Location, true) => (80, 161, 79),
            (Color::Match, false) => (255, 215, 0),
            (Color::Match, true) => (152, 104, 1),
            (Color::Primary, false) => (97, 175, 239),
            (Color::Primary, true) => (64, 120, 242),
            (Color::Secondary, false) => (198, 120, 221),
            (Color::Secondary, true) => (166, 38, 164),
        }
    }

    fn escape(self) -> String {
        let (r, g, b) = self.rgb(light_theme());
        format!("\x1b[38;2;{};{};{}m", r, g, b)
    }
}

fn light_theme() -> bool {
    static LIGHT: OnceLock<bool> = OnceLock::new();
    *LIGHT.get_or_init(|| {
        std::env::var("PASSIM_THEME").is_ok_and(|t| t.eq_ignore_ascii_case("light"))
    })
}

/// Colors only on an interactive stdout without `NO_COLOR`.
pub fn use_colors() -> bool {
    static COLORS: OnceLock<bool> = OnceLock::new();
    *COLORS.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

pub fn paint(color: Color, bold: bool, text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let weight = if bold { BOLD } else { "" };
    format!("{}{}{}{}", weight, color.escape(), text, RESET)
}

// ═══════════════════════════════════════════════════════════════════════════
// LAYOUT
// ═══════════════════════════════════════════════════════════════════════════

/// Display width of `s`, skipping ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    s.chars()
        .filter(|&c| {
            if c == '\x1b' {
                in_escape = true;
            } else if in_escape {
                in_escape = c != 'm';
            } else {
                return true;
            }
            false
        })
        .count()
}

/// Greedy word wrap on visible width. Words longer than `width` get a line
/// of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let len = visible_len(word);
        if line_len > 0 && line_len + 1 + len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += len;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn border(s: &str) -> String {
    paint(Color::Muted, false, s)
}

/// Horizontal rule between `left` and `right` corners, with an optional label.
fn rule(left: char, right: char, label: Option<&str>) {
    let label = label
        .map(|l| format!("─ {} ", paint(Color::Heading, true, l)))
        .unwrap_or_default();
    let fill = "─".repeat(BOX_WIDTH.saturating_sub(visible_len(&label)));
    println!(
        "{}{}{}",
        border(&left.to_string()),
        label,
        border(&format!("{}{}", fill, right))
    );
}

pub fn section_top(label: &str) {
    rule('┌', '┐', Some(label));
}

pub fn section_mid(label: &str) {
    rule('├', '┤', Some(label));
}

pub fn section_bot() {
    rule('└', '┘', None);
}

/// One padded line inside a box.
pub fn row(content: &str) {
    let pad = " ".repeat(BOX_WIDTH.saturating_sub(visible_len(content)));
    println!("{}{}{}{}", border("│"), content, pad, border("│"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RESULTS
// ═══════════════════════════════════════════════════════════════════════════

/// Passage text for the terminal: highlight markers become bold match color
/// and line breaks become a dim `/`. Without colors the markers stay.
pub fn render_passage(html: &str, highlight: &Highlight) -> String {
    if !use_colors() {
        return html.to_string();
    }
    let on = format!("{}{}", BOLD, Color::Match.escape());
    let line_break = format!(" {}/{} ", DIM, RESET);
    html.replace(&highlight.open, &on)
        .replace(&highlight.close, RESET)
        .replace("<br/>", &line_break)
        .replace("<br>", &line_break)
}

fn language_badge(language: Language) -> String {
    match language {
        Language::Primary => paint(Color::Primary, false, "[primary]"),
        Language::Secondary => paint(Color::Secondary, false, "[secondary]"),
    }
}

fn location_label(location: &Location) -> String {
    let text = match location {
        Location::VerseRange { .. } => location.to_string(),
        Location::Comment { ordinal } => format!("comment {}", ordinal),
    };
    paint(Color::Location, false, &text)
}

/// Print one result as a boxed block: heading, location, wrapped passage.
pub fn print_result(result: &SearchResult, highlight: &Highlight) {
    let kind = match result.source {
        ResultSource::Body => "",
        ResultSource::Commentary => " (commentary)",
    };
    section_top(&format!("{} - {}", result.display_id, result.label));
    row(&format!(
        " {} {}{}  {}",
        language_badge(result.language),
        location_label(&result.location),
        kind,
        paint(Color::Muted, false, &result.anchor())
    ));
    section_mid("passage");
    for line in wrap(&render_passage(&result.passage.html, highlight), BOX_WIDTH - 2) {
        row(&format!(" {}", line));
    }
    section_bot();
}

#[cfg(feature = "parallel")]
pub fn progress_style() -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::with_template("{prefix:>10} {bar:40} {pos}/{len} units {msg}")
        .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
        .progress_chars("=> ")
}
