// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for `inspect` and `search`.
//!
//! Only the basic ANSI colors are used, so the output reads the same on light
//! and dark backgrounds. Color is off when stdout is not a TTY or `NO_COLOR`
//! is set.

use gleaner::QueryState;

/// Narrowest panel, so short reports don't look cramped.
const MIN_PANEL_WIDTH: usize = 44;

/// Column for `Panel::field` values.
const KEY_WIDTH: usize = 12;

/// What a piece of text means; mapped to an SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Title,
    Link,
    Good,
    Fair,
    Warn,
    Bad,
    Muted,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Heading => "1;36",
            Tone::Title => "1;96",
            Tone::Link => "34",
            Tone::Good => "32",
            Tone::Fair => "33",
            Tone::Warn => "1;33",
            Tone::Bad => "1;31",
            Tone::Muted => "90",
        }
    }
}

pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

pub fn paint(tone: Tone, text: &str) -> String {
    paint_if(colors_enabled(), tone, text)
}

fn paint_if(enabled: bool, tone: Tone, text: &str) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", tone.sgr(), text)
    } else {
        text.to_string()
    }
}

/// Characters that take up a column; SGR sequences take none.
pub fn display_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // ESC [ ... m
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

pub fn pad_end(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

pub fn pad_start(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(fill), s)
}

/// At most `max` characters, the last one an ellipsis when cut.
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

// ============================================================================
// PANEL
// ============================================================================

enum PanelLine {
    Divider(String),
    Text(String),
}

/// A boxed report, as wide as its widest line.
///
/// ```text
/// ┌─ search-index.json ─────────────────────┐
/// │ records      42                         │
/// ├─ sections ──────────────────────────────┤
/// │ posts        30                         │
/// └─────────────────────────────────────────┘
/// ```
pub struct Panel {
    title: String,
    lines: Vec<PanelLine>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn divider(&mut self, label: &str) -> &mut Self {
        self.lines.push(PanelLine::Divider(label.to_string()));
        self
    }

    /// `key` in a fixed column, then `value`.
    pub fn field(&mut self, key: &str, value: &str) -> &mut Self {
        self.text(&format!("{} {}", pad_end(key, KEY_WIDTH), value))
    }

    pub fn text(&mut self, line: &str) -> &mut Self {
        self.lines.push(PanelLine::Text(line.to_string()));
        self
    }

    pub fn print(&self) {
        print!("{}", self.render(colors_enabled()));
    }

    fn render(&self, colors: bool) -> String {
        let inner = self
            .lines
            .iter()
            .map(|line| match line {
                PanelLine::Text(text) => display_width(text) + 2,
                PanelLine::Divider(label) => display_width(label) + 4,
            })
            .chain([display_width(&self.title) + 4, MIN_PANEL_WIDTH])
            .max()
            .unwrap_or(MIN_PANEL_WIDTH);

        let rule = |left: char, label: &str, right: char| {
            let fill = inner - 3 - display_width(label);
            format!(
                "{}─ {} {}{}\n",
                left,
                paint_if(colors, Tone::Heading, label),
                "─".repeat(fill),
                right
            )
        };

        let mut out = rule('┌', &self.title, '┐');
        for line in &self.lines {
            match line {
                PanelLine::Divider(label) => out.push_str(&rule('├', label, '┤')),
                PanelLine::Text(text) => {
                    out.push_str(&format!("│ {}│\n", pad_end(text, inner - 1)));
                }
            }
        }
        out.push_str(&format!("└{}┘\n", "─".repeat(inner)));
        out
    }
}

// ============================================================================
// LABELS
// ============================================================================

/// Score colored by how much of the threshold it uses up. Lower is better.
pub fn score_badge(score: f64, threshold: f64) -> String {
    let used = if threshold > 0.0 { score / threshold } else { 1.0 };
    let tone = if used <= 1.0 / 3.0 {
        Tone::Good
    } else if used <= 2.0 / 3.0 {
        Tone::Fair
    } else {
        Tone::Muted
    };
    paint(tone, &format!("{:.3}", score))
}

pub fn state_label(state: QueryState) -> String {
    let (tone, label) = match state {
        QueryState::Results => (Tone::Good, "results"),
        QueryState::NoResults => (Tone::Warn, "no results"),
        QueryState::NotReady => (Tone::Bad, "not ready"),
        QueryState::TypeMore => (Tone::Muted, "type more"),
    };
    paint(tone, label)
}

/// Transfer savings of the compressed artifact, e.g. `71% smaller`.
pub fn compression_label(raw: usize, compressed: usize) -> String {
    if raw == 0 {
        return paint(Tone::Muted, "n/a");
    }
    let saved = (1.0 - compressed as f64 / raw as f64) * 100.0;
    if saved >= 0.5 {
        paint(Tone::Good, &format!("{:.0}% smaller", saved))
    } else if saved <= -0.5 {
        paint(Tone::Bad, &format!("{:.0}% larger", -saved))
    } else {
        paint(Tone::Muted, "same size")
    }
}
