//! Time-series bucketing for the report chart.
//!
//! A span selects a fixed window of whole UTC calendar days ending "today"
//! (offset whole spans back), and every in-window non-comment report lands
//! in exactly one day bucket per its reason category. All date arithmetic
//! is calendar/UTC; two calls with identical inputs produce byte-identical
//! output.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{category::ReportReason, report::ReportRecord};

/// Charting window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Span {
    Week,
    Month,
}

impl Span {
    pub fn days(self) -> u32 {
        match self {
            Span::Week => 7,
            Span::Month => 30,
        }
    }
}

/// An inclusive window of UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// First instant of the window: `start` at 00:00:00.000 UTC.
    pub fn start_at(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Last instant of the window: `end` at 23:59:59.999 UTC.
    pub fn end_at(&self) -> DateTime<Utc> {
        let end_of_day =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("end-of-day time");
        self.end.and_time(end_of_day).and_utc()
    }
}

/// Compute the bucket window: `end` is today minus `offset` whole spans,
/// `start` is `span_days - 1` days earlier. Both ends inclusive.
pub fn window_for(today: NaiveDate, span: Span, offset: u32) -> Window {
    let days = span.days() as i64;
    let end = today - Duration::days(offset as i64 * days);
    let start = end - Duration::days(days - 1);
    Window { start, end }
}

/// One chart series: a reason category and its per-day counts, parallel to
/// the date keys of the owning [`TimeSeries`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonSeries {
    pub reason: ReportReason,
    pub label: &'static str,
    pub color: &'static str,
    pub counts: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub span: Span,
    pub offset: u32,
    /// Full English month name (UTC) of the window start, for display.
    pub start_month: String,
    /// Ascending `YYYY-MM-DD` bucket keys, exactly `span.days()` of them.
    pub date_keys: Vec<String>,
    /// Parallel display labels: day-of-month for month spans, "Mon D" for
    /// week spans; the current day renders as "Today".
    pub display_labels: Vec<String>,
    pub series: Vec<ReasonSeries>,
}

/// Bucket `reports` into the window selected by (`today`, `span`, `offset`).
///
/// Reports with unknown reason values, comment-sentinel rows, malformed
/// timestamps, and rows outside the window are silently dropped — the
/// bucket shape never depends on report volume.
pub fn bucket_reports(
    today: NaiveDate,
    span: Span,
    offset: u32,
    reports: &[ReportRecord],
) -> TimeSeries {
    let window = window_for(today, span, offset);
    let days = span.days() as usize;

    let mut date_keys = Vec::with_capacity(days);
    let mut display_labels = Vec::with_capacity(days);
    let mut day_index: HashMap<NaiveDate, usize> = HashMap::with_capacity(days);

    let mut day = window.start;
    for i in 0..days {
        date_keys.push(day.format("%Y-%m-%d").to_string());
        display_labels.push(match span {
            Span::Month => day.format("%-d").to_string(),
            Span::Week => day.format("%b %-d").to_string(),
        });
        day_index.insert(day, i);
        day = day.succ_opt().expect("calendar overflow");
    }

    // The live week chart ends on the current day.
    if span == Span::Week && offset == 0 {
        if let Some(last) = display_labels.last_mut() {
            *last = "Today".to_string();
        }
    }

    let mut series: Vec<ReasonSeries> = ReportReason::CHARTABLE
        .iter()
        .map(|&reason| ReasonSeries {
            reason,
            label: reason.label(),
            color: reason.color(),
            counts: vec![0; days],
        })
        .collect();

    for report in reports {
        let Some(reason) = report.reason_category() else {
            continue;
        };
        if reason.is_comment() {
            continue;
        }
        let Some(at) = report.created_at_utc() else {
            continue;
        };
        let Some(&bucket) = day_index.get(&at.date_naive()) else {
            continue;
        };
        if let Some(entry) = series.iter_mut().find(|s| s.reason == reason) {
            entry.counts[bucket] += 1;
        }
    }

    TimeSeries {
        span,
        offset,
        start_month: window.start.format("%B").to_string(),
        date_keys,
        display_labels,
        series,
    }
}
