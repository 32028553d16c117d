// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning ranked matches into display fragments.
//!
//! Escaping happens per segment. Spans come from the engine, which finds
//! them on the raw text. The text between spans and the text inside spans
//! are escaped separately and only the `<mark>` tags are emitted verbatim. Nothing from the record or the
//! query is ever interpreted as markup, and a span can never end up splitting
//! an entity like `&amp;` in half.
//!
//! ```text
//! raw:     "<b>old text"        query "<b>"
//! spans:   [0..3]
//! html:    "<mark>&lt;b&gt;</mark>old text"
//! ```

use std::iter;

use chrono::{DateTime, FixedOffset};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::config::RenderOptions;
use crate::service::QueryState;
use crate::types::{MatchResult, MatchSpan};

/// One result, ready to drop into the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedResult {
    pub url: String,
    pub title_html: String,
    pub description_html: String,
    pub date_display: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_chips: Vec<String>,
}

/// Maps matches to escaped, highlighted fragments.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render at most `result_limit` matches, highlighting the spans each
    /// match carries.
    pub fn render(&self, results: &[MatchResult]) -> Vec<RenderedResult> {
        results
            .iter()
            .take(self.options.result_limit)
            .map(|result| {
                let record = &result.record;
                let spans = &result.matched_spans;
                RenderedResult {
                    url: record.url.clone(),
                    title_html: highlight(&record.title, &spans.title),
                    description_html: highlight(&record.description, &spans.description),
                    date_display: self.format_date(record.date),
                    tag_chips: record
                        .tags
                        .iter()
                        .map(|t| encode_text(t).into_owned())
                        .collect(),
                }
            })
            .collect()
    }

    /// The result list as one HTML string.
    pub fn render_html(&self, results: &[MatchResult]) -> String {
        self.render(results)
            .iter()
            .map(result_html)
            .collect::<Vec<_>>()
            .join("")
    }

    /// Message markup for the non-result states; `None` for `Results`.
    pub fn status_html(&self, state: QueryState) -> Option<String> {
        self.status_message(state)
            .map(|msg| format!(r#"<div class="search-no-results">{}</div>"#, encode_text(msg)))
    }

    /// Plain-text message for the non-result states.
    pub fn status_message(&self, state: QueryState) -> Option<&str> {
        let messages = &self.options.messages;
        match state {
            QueryState::TypeMore => Some(&messages.type_more),
            QueryState::NotReady => Some(&messages.not_ready),
            QueryState::NoResults => Some(&messages.no_results),
            QueryState::Results => None,
        }
    }

    /// Epoch seconds in the configured locale and offset. Empty when the
    /// timestamp is out of range.
    pub fn format_date(&self, epoch_seconds: f64) -> String {
        if !epoch_seconds.is_finite() {
            return String::new();
        }
        let secs = epoch_seconds.floor();
        let nanos = ((epoch_seconds - secs) * 1e9) as u32;
        let Some(utc) = DateTime::from_timestamp(secs as i64, nanos) else {
            return String::new();
        };
        let Some(offset) = FixedOffset::east_opt(self.options.utc_offset_minutes * 60) else {
            return String::new();
        };
        utc.with_timezone(&offset)
            .format(self.options.locale.pattern())
            .to_string()
    }
}

fn result_html(item: &RenderedResult) -> String {
    let tags: String = item
        .tag_chips
        .iter()
        .map(|chip| format!(r#"<span class="search-tag">{}</span>"#, chip))
        .collect();
    format!(
        concat!(
            r#"<a href="{url}" class="search-result-item">"#,
            r#"<div class="search-result-title">{title}</div>"#,
            r#"<div class="search-result-description">{description}</div>"#,
            r#"<div class="search-result-meta">"#,
            r#"<span class="search-result-date">{date}</span>{tags}"#,
            r#"</div></a>"#
        ),
        url = encode_double_quoted_attribute(&item.url),
        title = item.title_html,
        description = item.description_html,
        date = encode_text(&item.date_display),
        tags = tags,
    )
}

/// Escape `text` and wrap each span (character offsets) in `<mark>`.
///
/// Spans must be sorted and non-overlapping, as `find_spans` returns them.
/// Anything out of order or out of range is skipped.
pub fn highlight(text: &str, spans: &[MatchSpan]) -> String {
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(iter::once(text.len()))
        .collect();
    let char_len = offsets.len() - 1;

    let mut out = String::with_capacity(text.len() + spans.len() * 13);
    let mut cursor = 0;
    for span in spans {
        let start = span.start.min(char_len);
        let end = span.end().min(char_len);
        if start < cursor || start >= end {
            continue;
        }
        out.push_str(&encode_text(&text[offsets[cursor]..offsets[start]]));
        out.push_str("<mark>");
        out.push_str(&encode_text(&text[offsets[start]..offsets[end]]));
        out.push_str("</mark>");
        cursor = end;
    }
    out.push_str(&encode_text(&text[offsets[cursor]..]));
    out
}
