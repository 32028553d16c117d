// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tunables for the query engine, the renderer, and the interaction controller.
//!
//! Everything deserializes from a partial camelCase JSON object, so a host
//! page can pass `{"threshold": 0.4}` and keep every other default. The
//! defaults are the values the published site ships with.

use serde::{Deserialize, Serialize};

use crate::types::Field;

// =============================================================================
// ENGINE
// =============================================================================

/// Relative weight of each field in the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f64,
    pub description: f64,
    pub content: f64,
    pub tags: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 0.4,
            description: 0.3,
            content: 0.2,
            tags: 0.1,
        }
    }
}

impl FieldWeights {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.title,
            Field::Description => self.description,
            Field::Content => self.content,
            Field::Tags => self.tags,
        }
    }

    /// Heaviest weight; exponents are taken relative to it.
    pub fn max(&self) -> f64 {
        Field::ALL
            .iter()
            .map(|f| self.get(*f))
            .fold(0.0_f64, f64::max)
    }
}

/// Query engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub weights: FieldWeights,
    /// Hard cutoff on the aggregate score (and the bitap tolerance per field).
    pub threshold: f64,
    /// Queries shorter than this (in characters) are not run at all.
    pub min_query_len: usize,
    /// Matched character runs shorter than this don't count as a match.
    pub min_match_len: usize,
    /// How many results the presentation layer shows.
    pub result_limit: usize,
    /// Where in a field a match is expected to start.
    pub location: usize,
    /// How far from `location` a match may drift before it stops counting.
    pub distance: usize,
    /// Fold diacritics (café → cafe) before matching.
    pub ignore_diacritics: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            threshold: 0.3,
            min_query_len: 2,
            min_match_len: 2,
            result_limit: 10,
            location: 0,
            distance: 100,
            ignore_diacritics: false,
        }
    }
}

// =============================================================================
// RENDERER
// =============================================================================

/// How `date_display` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateLocale {
    /// `2023. 11. 14.`
    #[default]
    #[serde(rename = "ko-KR")]
    Korean,
    /// `11/14/2023`
    #[serde(rename = "en-US")]
    UnitedStates,
    /// `14/11/2023`
    #[serde(rename = "en-GB")]
    British,
    /// `2023-11-14`
    #[serde(rename = "iso")]
    Iso,
}

impl DateLocale {
    pub fn pattern(self) -> &'static str {
        match self {
            DateLocale::Korean => "%Y. %-m. %-d.",
            DateLocale::UnitedStates => "%-m/%-d/%Y",
            DateLocale::British => "%d/%m/%Y",
            DateLocale::Iso => "%Y-%m-%d",
        }
    }
}

/// Text shown for the three non-result states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusMessages {
    pub type_more: String,
    pub not_ready: String,
    pub no_results: String,
}

impl StatusMessages {
    pub fn korean() -> Self {
        Self {
            type_more: "검색어를 2자 이상 입력해주세요.".to_string(),
            not_ready: "검색 인덱스를 로딩 중입니다...".to_string(),
            no_results: "검색 결과가 없습니다.".to_string(),
        }
    }

    pub fn english() -> Self {
        Self {
            type_more: "Type at least 2 characters to search.".to_string(),
            not_ready: "Search index is loading...".to_string(),
            no_results: "No results found.".to_string(),
        }
    }
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self::korean()
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub locale: DateLocale,
    /// Offset from UTC applied before formatting dates (540 = KST).
    pub utc_offset_minutes: i32,
    pub messages: StatusMessages,
    /// Most results rendered, whatever the caller passes in.
    pub result_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: DateLocale::Korean,
            utc_offset_minutes: 540,
            messages: StatusMessages::default(),
            result_limit: 10,
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Modal overlay or inline dropdown under the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetMode {
    Modal,
    #[default]
    Inline,
}

/// Interaction controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerOptions {
    pub mode: WidgetMode,
    pub debounce_ms: u64,
    /// Key that, with Ctrl or Meta, opens/focuses the search box.
    pub shortcut_key: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            mode: WidgetMode::Inline,
            debounce_ms: 200,
            shortcut_key: "k".to_string(),
        }
    }
}
