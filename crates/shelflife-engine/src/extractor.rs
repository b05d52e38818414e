//! Explicit-date extraction from rich product metadata.
//!
//! Unlike the strategy chain this produces a bare date with no confidence.
//! Layers are tried in order and the first one that yields a date wins:
//! explicit date fields, printed date patterns in the name, relative
//! "expires in" phrases, the first category tag, and finally the name
//! itself against the category table.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use shelflife_core::{KeywordTables, ProductMetadata};

use crate::clock::Clock;
use crate::normalize::normalize_text;

pub struct ExplicitDateExtractor {
    tables: Arc<KeywordTables>,
    clock: Arc<dyn Clock>,
}

impl ExplicitDateExtractor {
    #[must_use]
    pub fn new(tables: Arc<KeywordTables>, clock: Arc<dyn Clock>) -> Self {
        Self { tables, clock }
    }

    /// Estimate an expiry date relative to the clock's today. Never fails.
    #[must_use]
    pub fn estimate(&self, metadata: &ProductMetadata) -> NaiveDate {
        self.estimate_at(metadata, self.clock.today())
    }

    #[must_use]
    pub fn estimate_at(&self, metadata: &ProductMetadata, today: NaiveDate) -> NaiveDate {
        if let Some(date) = metadata.first_explicit_date() {
            tracing::debug!(date = %date, "explicit date field");
            return date;
        }

        let text = metadata_text(metadata);
        if let Some(date) = self.printed_date(&text) {
            return date;
        }
        if let Some(days) = self.relative_duration(&text) {
            return add_days(today, days);
        }

        if let Some(tag) = metadata.categories_tags.first() {
            let tag = normalize_text(tag);
            if let Some(category) = self.tables.category_for(&tag) {
                tracing::debug!(tag = %tag, category = %category.name, "category tag matched");
                return add_days(today, category.days);
            }
        }

        let name = normalize_text(metadata.product_name.as_deref().unwrap_or_default());
        let days = self.tables.category_for(&name).map_or_else(
            || {
                tracing::debug!(name = %name, "no category; using default shelf life");
                self.tables.default_days
            },
            |category| category.days,
        );
        add_days(today, days)
    }

    fn printed_date(&self, text: &str) -> Option<NaiveDate> {
        for pattern in &self.tables.date_patterns {
            let Some(caps) = pattern.regex.captures(text) else {
                continue;
            };
            let group = |i: usize| caps.get(i).map(|m| m.as_str());
            let (Some(month), Some(day), Some(year)) = (
                group(pattern.month_group),
                group(pattern.day_group),
                group(pattern.year_group),
            ) else {
                continue;
            };

            match build_date(year, month, day) {
                Some(date) => {
                    tracing::debug!(pattern = %pattern.name, date = %date, "printed date in text");
                    return Some(date);
                }
                None => {
                    tracing::debug!(
                        pattern = %pattern.name,
                        year,
                        month,
                        day,
                        "pattern matched an impossible date"
                    );
                }
            }
        }
        None
    }

    fn relative_duration(&self, text: &str) -> Option<u32> {
        self.tables.duration_patterns.iter().find_map(|pattern| {
            let count: u32 = pattern.regex.captures(text)?.get(1)?.as_str().parse().ok()?;
            let days = count.checked_mul(pattern.unit_days)?;
            tracing::debug!(pattern = %pattern.name, days, "relative duration in text");
            Some(days)
        })
    }
}

fn metadata_text(metadata: &ProductMetadata) -> String {
    let name = metadata.product_name.as_deref().unwrap_or_default();
    let brands = metadata.brands.as_deref().unwrap_or_default();
    normalize_text(&format!("{name} {brands}"))
}

fn build_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = if year.len() == 2 {
        format!("20{year}").parse().ok()?
    } else {
        year.parse().ok()?
    };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn add_days(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
