//! Multiplicative shelf-life modifiers.
//!
//! Each strategy chooses which modifier kinds are eligible, collects the
//! matching factors into a [`ModifierSet`], and applies their product to its
//! base shelf life. Composition is a plain product, so application order is
//! irrelevant.

use shelflife_core::{KeywordTables, Modifier};

/// Product of `factors`; `1.0` when empty.
#[must_use]
pub fn compose<I>(factors: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    factors.into_iter().product()
}

/// Scale `base_days` by `factor`, rounding half up to a whole day.
///
/// Non-finite or non-positive products yield `0`; overflow saturates.
#[must_use]
pub fn apply_factor(base_days: u32, factor: f64) -> u32 {
    let scaled = (f64::from(base_days) * factor).round();
    if !scaled.is_finite() || scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let days = scaled as u32;
        days
    }
}

/// Modifiers that matched one item, with a label for each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierSet {
    applied: Vec<(String, f64)>,
}

impl ModifierSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, label: impl Into<String>, factor: f64) -> Self {
        self.applied.push((label.into(), factor));
        self
    }

    #[must_use]
    pub fn with_packaging(self, tables: &KeywordTables, text: &str) -> Self {
        self.extend("packaging", tables.packaging_for(text))
    }

    #[must_use]
    pub fn with_nutritional(self, tables: &KeywordTables, text: &str) -> Self {
        self.extend("nutritional", tables.nutritional_for(text))
    }

    #[must_use]
    pub fn with_brand(self, brand: &Modifier) -> Self {
        self.with(format!("brand:{}", brand.keyword), brand.factor)
    }

    /// Adds the season covering `month`, if the tables define one.
    #[must_use]
    pub fn with_season(self, tables: &KeywordTables, month: u32) -> Self {
        match tables.season_for_month(month) {
            Some(season) => self.with(format!("season:{}", season.name), season.factor),
            None => self,
        }
    }

    fn extend<'a>(mut self, kind: &str, modifiers: impl Iterator<Item = &'a Modifier>) -> Self {
        self.applied.extend(
            modifiers.map(|m| (format!("{kind}:{}", m.keyword), m.factor)),
        );
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// The composed factor.
    #[must_use]
    pub fn factor(&self) -> f64 {
        compose(self.applied.iter().map(|(_, f)| *f))
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.applied.iter().map(|(l, _)| l.as_str()).collect()
    }

    #[must_use]
    pub fn apply(&self, base_days: u32) -> u32 {
        apply_factor(base_days, self.factor())
    }
}
