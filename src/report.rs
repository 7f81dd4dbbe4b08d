//! Statistics over recorded entries.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calculator::round_kg;
use crate::guards::RecordedEntry;
use crate::types::Category;

/// Overall total, mean amount per entry and entry count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalSummary {
    pub total: f64,
    /// `None` when there are no entries.
    pub average: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub count: usize,
}

/// Calendar month, 1-based.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parses `YYYY-MM`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

pub fn total_summary(entries: &[RecordedEntry]) -> TotalSummary {
    let count = entries.len();
    let total: f64 = entries.iter().map(|e| e.amount).sum();
    let average = (count > 0).then(|| round_kg(total / count as f64));
    TotalSummary {
        total: round_kg(total),
        average,
        count,
    }
}

/// Totals per category, in `Category` order. Categories with no entries are omitted.
pub fn category_totals<'a>(
    entries: impl IntoIterator<Item = &'a RecordedEntry>,
) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for entry in entries {
        let slot = groups.entry(entry.category).or_insert((0.0, 0));
        slot.0 += entry.amount;
        slot.1 += 1;
    }
    groups
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total: round_kg(total),
            count,
        })
        .collect()
}

pub fn monthly_totals(entries: &[RecordedEntry], month: Month) -> Vec<CategoryTotal> {
    category_totals(entries.iter().filter(|e| month.contains(e.date)))
}

/// Everything the dashboard shows at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: TotalSummary,
    pub categories: Vec<CategoryTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<Month>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Vec<CategoryTotal>>,
}

impl Report {
    pub fn build(entries: &[RecordedEntry], month: Option<Month>) -> Self {
        Self {
            summary: total_summary(entries),
            categories: category_totals(entries),
            month,
            monthly: month.map(|m| monthly_totals(entries, m)),
        }
    }
}
