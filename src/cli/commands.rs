// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};

use gleaner::build::{run_build, BuildOverrides};
use gleaner::config::{DateLocale, RenderOptions, SearchOptions, StatusMessages};
use gleaner::service::{parse_index, FileSource, Readiness, SearchService};
use gleaner::util::stats::{format_bytes, ArtifactStats};
use gleaner::{QueryState, Renderer, SearchIndex};

use super::display::{
    compression_label, ellipsize, pad_end, pad_start, paint, score_badge, state_label, Panel, Tone,
};

/// Longest section name shown in `inspect` before it is cut.
const KEY_COLUMN: usize = 12;

/// Renderer for terminal output: ISO dates in UTC, English messages.
fn terminal_renderer() -> Renderer {
    Renderer::new(RenderOptions {
        locale: DateLocale::Iso,
        utc_offset_minutes: 0,
        messages: StatusMessages::english(),
        ..RenderOptions::default()
    })
}

fn parse_build_time(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid --build-time {:?} (expected RFC 3339)", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

/// `gleaner index`
pub fn index(input: &Path, output: &Path, no_content: bool, build_time: Option<&str>) -> Result<()> {
    let overrides = BuildOverrides {
        include_content: no_content.then_some(false),
        build_time: build_time.map(parse_build_time).transpose()?,
    };

    let report = run_build(input, output, &overrides)?;

    for skipped in &report.skipped {
        eprintln!("⚠️  skipped {}", skipped);
    }

    let stats = report.stats;
    eprintln!();
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} records │ {} skipped │ {} ({} brotli) │ crc32 {:08x}",
        report.record_count(),
        report.skipped.len(),
        format_bytes(stats.raw_bytes),
        format_bytes(stats.brotli_bytes),
        stats.crc32
    );
    eprintln!("  ✓ {}", report.output_path.display());

    Ok(())
}

/// `gleaner inspect`
pub fn inspect(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let index = parse_index(&bytes).with_context(|| format!("{} is not a search index", file.display()))?;
    let stats = ArtifactStats::measure(&bytes);
    let renderer = terminal_renderer();

    let name = file
        .file_name()
        .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mut panel = Panel::new(name);

    panel
        .field("records", &paint(Tone::Title, &index.len().to_string()))
        .field("tags", &distinct_tags(&index).to_string());
    if let Some((first, last)) = date_range(&index) {
        panel.field(
            "dates",
            &format!("{} → {}", renderer.format_date(first), renderer.format_date(last)),
        );
    }

    panel.divider("sections");
    for (section, count) in section_counts(&index) {
        panel.field(&ellipsize(section, KEY_COLUMN), &pad_start(&count.to_string(), 6));
    }

    panel
        .divider("artifact")
        .field("raw", &format_bytes(stats.raw_bytes))
        .field(
            "brotli",
            &format!(
                "{}  {}",
                pad_end(&format_bytes(stats.brotli_bytes), 10),
                compression_label(stats.raw_bytes, stats.brotli_bytes)
            ),
        )
        .field("crc32", &format!("{:08x}", stats.crc32));
    panel.print();

    Ok(())
}

fn section_counts(index: &SearchIndex) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for record in index.iter() {
        *counts.entry(record.section.as_str()).or_insert(0) += 1;
    }
    counts
}

fn distinct_tags(index: &SearchIndex) -> usize {
    index
        .iter()
        .flat_map(|r| r.tags.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .len()
}

fn date_range(index: &SearchIndex) -> Option<(f64, f64)> {
    let mut dates = index.iter().map(|r| r.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// `gleaner search`
pub fn search(file: &Path, query: &str, limit: usize, json: bool) -> Result<()> {
    let service = SearchService::new(SearchOptions {
        result_limit: limit,
        ..SearchOptions::default()
    });
    if service.load(&FileSource::new(file)) != Readiness::Ready {
        match service.load_error() {
            Some(err) => bail!("{}", err),
            None => bail!("search index {} is not available", file.display()),
        }
    }

    let outcome = service.search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let renderer = terminal_renderer();
    if outcome.state() != QueryState::Results {
        println!(
            "{}  {}",
            state_label(outcome.state()),
            renderer.status_message(outcome.state()).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "{}  {} of {} matches for {:?}",
        state_label(outcome.state()),
        outcome.results().len(),
        outcome.total_matches(),
        query
    );
    println!();
    let threshold = service.options().threshold;
    for (rank, result) in outcome.results().iter().enumerate() {
        let record = &result.record;
        println!(
            "{} {}  {}",
            pad_start(&format!("{}.", rank + 1), 4),
            score_badge(result.score, threshold),
            paint(Tone::Title, &record.title)
        );
        println!(
            "      {}  {}  {}",
            paint(Tone::Link, &record.url),
            paint(Tone::Muted, &record.section),
            renderer.format_date(record.date)
        );
        if !record.description.is_empty() {
            println!("      {}", ellipsize(&record.description, 72));
        }
    }

    Ok(())
}
