//! # Date Aligner
//!
//! Sequential inner join of scored headlines with one or more price series
//! on calendar date.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

use super::AnalysisError;
use crate::data::{PriceBar, PriceSeries, ScoredHeadline};

/// One headline joined with the bar of each price series on its date
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    /// The headline and its score
    pub news: ScoredHeadline,
    /// One bar per price series, in call order
    pub bars: Vec<PriceBar>,
}

impl AlignedRow {
    /// Shared calendar date
    pub fn date(&self) -> NaiveDate {
        self.news.date()
    }
}

/// Rows a price series lost in the join
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesDrop {
    pub name: String,
    pub input_rows: usize,
    pub dropped: usize,
}

/// What the join kept and what it discarded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentReport {
    /// Headline rows in
    pub news_rows: usize,
    /// Headline rows whose date is missing from some price series
    pub news_dropped: usize,
    /// Per price series, in call order
    pub series: Vec<SeriesDrop>,
    /// Rows out
    pub output_rows: usize,
    /// Distinct dates out
    pub dates_kept: usize,
}

/// Aligned rows plus the join report
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedDataset {
    pub rows: Vec<AlignedRow>,
    pub report: AlignmentReport,
}

impl AlignedDataset {
    /// Distinct dates in ascending order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows
            .iter()
            .map(AlignedRow::date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Join headlines with every price series on date
///
/// Joins run in call order: news with the first series, then the result with
/// the next. Only dates present in every input survive. A date that repeats
/// in two inputs yields every pairing.
pub fn align_dates(
    series: &[PriceSeries],
    news: &[ScoredHeadline],
) -> Result<AlignedDataset, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::NoPriceSeries);
    }

    let mut rows: Vec<AlignedRow> = news
        .iter()
        .map(|headline| AlignedRow {
            news: headline.clone(),
            bars: Vec::with_capacity(series.len()),
        })
        .collect();

    for price_series in series {
        let mut by_date: HashMap<NaiveDate, Vec<&PriceBar>> = HashMap::new();
        for bar in &price_series.bars {
            by_date.entry(bar.date).or_default().push(bar);
        }

        rows = rows
            .into_iter()
            .flat_map(|row| {
                let matches = by_date.get(&row.date()).cloned().unwrap_or_default();
                matches.into_iter().map(move |bar| {
                    let mut joined = row.clone();
                    joined.bars.push(*bar);
                    joined
                })
            })
            .collect();
    }

    let kept: BTreeSet<NaiveDate> = rows.iter().map(AlignedRow::date).collect();
    let report = AlignmentReport {
        news_rows: news.len(),
        news_dropped: news.iter().filter(|n| !kept.contains(&n.date())).count(),
        series: series
            .iter()
            .map(|s| SeriesDrop {
                name: s.name.clone(),
                input_rows: s.len(),
                dropped: s.bars.iter().filter(|b| !kept.contains(&b.date)).count(),
            })
            .collect(),
        output_rows: rows.len(),
        dates_kept: kept.len(),
    };

    info!(
        "Aligned {} headlines with {} price series: {} rows over {} dates, {} headlines dropped",
        report.news_rows,
        series.len(),
        report.output_rows,
        report.dates_kept,
        report.news_dropped
    );
    for drop in &report.series {
        info!("  {}: {} of {} bars dropped", drop.name, drop.dropped, drop.input_rows);
    }

    Ok(AlignedDataset { rows, report })
}
