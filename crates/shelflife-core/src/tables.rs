//! Keyword, modifier, and date-pattern tables driving expiry estimation.
//!
//! Tables are plain configuration data: [`KeywordTables::builtin`] returns the
//! shipped defaults and [`load_tables`] reads a versioned YAML replacement.
//! Keywords are stored lowercase and matched as whole words of normalized
//! text, tolerating a plural ending (see [`contains_term`]).

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::builtin;
use crate::ConfigError;

/// Largest multiplicative factor any single modifier may carry.
pub const MAX_FACTOR: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub days: u32,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| contains_term(text, k))
    }
}

/// Fixed shelf life for items whose name contains the words of `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOverride {
    pub key: String,
    pub days: u32,
    pub category: String,
}

/// A keyword carrying a multiplicative shelf-life factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub keyword: String,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalItem {
    pub keyword: String,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonFactor {
    pub name: String,
    pub months: Vec<u32>,
    pub factor: f64,
}

/// Raw date pattern as written in the tables file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePatternSpec {
    pub name: String,
    pub pattern: String,
    pub month_group: usize,
    pub day_group: usize,
    pub year_group: usize,
}

/// Raw relative-duration pattern as written in the tables file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPatternSpec {
    pub name: String,
    pub pattern: String,
    pub unit_days: u32,
}

/// On-disk layout of the keyword tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesFile {
    pub version: String,
    pub categories: Vec<CategoryRule>,
    pub default_days: u32,
    #[serde(default)]
    pub overrides: Vec<ItemOverride>,
    #[serde(default)]
    pub packaging: Vec<Modifier>,
    #[serde(default)]
    pub nutritional: Vec<Modifier>,
    pub nutritional_base_days: u32,
    #[serde(default)]
    pub brands: Vec<Modifier>,
    #[serde(default)]
    pub brand_categories: Vec<CategoryRule>,
    #[serde(default)]
    pub seasonal_items: Vec<SeasonalItem>,
    #[serde(default)]
    pub seasons: Vec<SeasonFactor>,
    #[serde(default)]
    pub date_patterns: Vec<DatePatternSpec>,
    #[serde(default)]
    pub duration_patterns: Vec<DurationPatternSpec>,
}

/// A compiled date pattern with the capture groups holding month, day, year.
#[derive(Debug, Clone)]
pub struct DatePattern {
    pub name: String,
    pub regex: Regex,
    pub month_group: usize,
    pub day_group: usize,
    pub year_group: usize,
}

/// A compiled "expires in N <unit>" pattern; group 1 holds N.
#[derive(Debug, Clone)]
pub struct DurationPattern {
    pub name: String,
    pub regex: Regex,
    pub unit_days: u32,
}

/// Validated, compiled keyword tables. Read-only once built.
#[derive(Debug, Clone)]
pub struct KeywordTables {
    pub version: String,
    pub categories: Vec<CategoryRule>,
    pub default_days: u32,
    pub overrides: Vec<ItemOverride>,
    pub packaging: Vec<Modifier>,
    pub nutritional: Vec<Modifier>,
    pub nutritional_base_days: u32,
    pub brands: Vec<Modifier>,
    pub brand_categories: Vec<CategoryRule>,
    pub seasonal_items: Vec<SeasonalItem>,
    pub seasons: Vec<SeasonFactor>,
    pub date_patterns: Vec<DatePattern>,
    pub duration_patterns: Vec<DurationPattern>,
}

impl KeywordTables {
    /// The tables shipped with the engine.
    ///
    /// # Panics
    ///
    /// Panics if the built-in tables fail validation, which is a bug caught
    /// by this crate's tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::compile(builtin_file()).expect("built-in keyword tables are valid")
    }

    /// Parse and validate tables from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML is malformed, a regex does not
    /// compile, or validation fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: TablesFile = serde_yaml::from_str(yaml)?;
        Self::compile(file)
    }

    /// Validate a [`TablesFile`], lowercase its keywords, and compile its patterns.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` or `ConfigError::InvalidPattern`.
    pub fn compile(file: TablesFile) -> Result<Self, ConfigError> {
        let file = lowercase_keys(file);
        validate(&file)?;

        let date_patterns = file
            .date_patterns
            .into_iter()
            .map(compile_date_pattern)
            .collect::<Result<Vec<_>, _>>()?;
        let duration_patterns = file
            .duration_patterns
            .into_iter()
            .map(compile_duration_pattern)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: file.version,
            categories: file.categories,
            default_days: file.default_days,
            overrides: file.overrides,
            packaging: file.packaging,
            nutritional: file.nutritional,
            nutritional_base_days: file.nutritional_base_days,
            brands: file.brands,
            brand_categories: file.brand_categories,
            seasonal_items: file.seasonal_items,
            seasons: file.seasons,
            date_patterns,
            duration_patterns,
        })
    }

    /// First category, in declared order, with a keyword found in `text`.
    #[must_use]
    pub fn category_for(&self, text: &str) -> Option<&CategoryRule> {
        self.categories.iter().find(|c| c.matches(text))
    }

    /// Category whose name equals `name` (case-insensitive).
    #[must_use]
    pub fn category_named(&self, name: &str) -> Option<&CategoryRule> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// The most specific (longest-key) override found in `text`.
    #[must_use]
    pub fn override_for(&self, text: &str) -> Option<&ItemOverride> {
        self.overrides
            .iter()
            .filter(|o| contains_term(text, &o.key))
            .max_by_key(|o| o.key.len())
    }

    /// Packaging modifiers whose keyword appears in `text`, in table order.
    pub fn packaging_for<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Modifier> {
        matching(&self.packaging, text)
    }

    /// Nutritional trait modifiers whose keyword appears in `text`, in table order.
    pub fn nutritional_for<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Modifier> {
        matching(&self.nutritional, text)
    }

    /// First known brand found in `text`.
    #[must_use]
    pub fn brand_for(&self, text: &str) -> Option<&Modifier> {
        self.brands.iter().find(|m| contains_term(text, &m.keyword))
    }

    /// First brand-analysis category with a keyword found in `text`.
    #[must_use]
    pub fn brand_category_for(&self, text: &str) -> Option<&CategoryRule> {
        self.brand_categories.iter().find(|c| c.matches(text))
    }

    #[must_use]
    pub fn seasonal_item_for(&self, text: &str) -> Option<&SeasonalItem> {
        self.seasonal_items
            .iter()
            .find(|s| contains_term(text, &s.keyword))
    }

    /// Season entry covering `month` (1-12), if any.
    #[must_use]
    pub fn season_for_month(&self, month: u32) -> Option<&SeasonFactor> {
        self.seasons.iter().find(|s| s.months.contains(&month))
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Whether `term` occurs in `text` as whole words.
///
/// A match must start and end on a word boundary; a trailing `s`, `es`, or
/// (for terms ending in `y`) `ies` is accepted, so `berry` finds "berries"
/// but `raw` does not find "strawberries".
#[must_use]
pub fn contains_term(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if bounded_match(text, term, &["", "s", "es"]) {
        return true;
    }
    term.strip_suffix('y')
        .is_some_and(|stem| !stem.is_empty() && bounded_match(text, stem, &["ies"]))
}

fn bounded_match(text: &str, needle: &str, endings: &[&str]) -> bool {
    let is_boundary = |c: Option<char>| c.is_none_or(|c| !c.is_alphanumeric());
    text.match_indices(needle).any(|(start, _)| {
        let rest = &text[start + needle.len()..];
        is_boundary(text[..start].chars().next_back())
            && endings.iter().any(|ending| {
                rest.strip_prefix(ending)
                    .is_some_and(|after| is_boundary(after.chars().next()))
            })
    })
}

/// Load and validate keyword tables from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_tables(path: &Path) -> Result<KeywordTables, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TablesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    KeywordTables::from_yaml_str(&content)
}

fn matching<'a>(modifiers: &'a [Modifier], text: &'a str) -> impl Iterator<Item = &'a Modifier> {
    modifiers
        .iter()
        .filter(move |m| contains_term(text, &m.keyword))
}

fn builtin_file() -> TablesFile {
    let rules = |table: &[(&str, u32, &[&str])]| -> Vec<CategoryRule> {
        table
            .iter()
            .map(|(name, days, keywords)| CategoryRule {
                name: (*name).to_string(),
                days: *days,
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect()
    };
    let modifiers = |table: &[(&str, f64)]| -> Vec<Modifier> {
        table
            .iter()
            .map(|(keyword, factor)| Modifier {
                keyword: (*keyword).to_string(),
                factor: *factor,
            })
            .collect()
    };

    TablesFile {
        version: builtin::TABLES_VERSION.to_string(),
        categories: rules(builtin::CATEGORIES),
        default_days: builtin::DEFAULT_DAYS,
        overrides: builtin::OVERRIDES
            .iter()
            .map(|(key, days, category)| ItemOverride {
                key: (*key).to_string(),
                days: *days,
                category: (*category).to_string(),
            })
            .collect(),
        packaging: modifiers(builtin::PACKAGING),
        nutritional: modifiers(builtin::NUTRITIONAL),
        nutritional_base_days: builtin::NUTRITIONAL_BASE_DAYS,
        brands: modifiers(builtin::BRANDS),
        brand_categories: rules(builtin::BRAND_CATEGORIES),
        seasonal_items: builtin::SEASONAL_ITEMS
            .iter()
            .map(|(keyword, days)| SeasonalItem {
                keyword: (*keyword).to_string(),
                days: *days,
            })
            .collect(),
        seasons: builtin::SEASONS
            .iter()
            .map(|(name, months, factor)| SeasonFactor {
                name: (*name).to_string(),
                months: months.to_vec(),
                factor: *factor,
            })
            .collect(),
        date_patterns: builtin::date_patterns()
            .into_iter()
            .map(|(name, pattern, month_group, day_group, year_group)| DatePatternSpec {
                name: name.to_string(),
                pattern,
                month_group,
                day_group,
                year_group,
            })
            .collect(),
        duration_patterns: builtin::DURATION_PATTERNS
            .iter()
            .map(|(name, pattern, unit_days)| DurationPatternSpec {
                name: (*name).to_string(),
                pattern: (*pattern).to_string(),
                unit_days: *unit_days,
            })
            .collect(),
    }
}

fn lowercase_keys(mut file: TablesFile) -> TablesFile {
    let lower = |s: &mut String| *s = s.trim().to_lowercase();
    for rule in file
        .categories
        .iter_mut()
        .chain(file.brand_categories.iter_mut())
    {
        lower(&mut rule.name);
        rule.keywords.iter_mut().for_each(lower);
    }
    for o in &mut file.overrides {
        lower(&mut o.key);
        lower(&mut o.category);
    }
    for m in file
        .packaging
        .iter_mut()
        .chain(file.nutritional.iter_mut())
        .chain(file.brands.iter_mut())
    {
        lower(&mut m.keyword);
    }
    for s in &mut file.seasonal_items {
        lower(&mut s.keyword);
    }
    file
}

fn validate(file: &TablesFile) -> Result<(), ConfigError> {
    let fail = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Validation(msg)) };

    if file.categories.is_empty() {
        return fail("at least one category is required".to_string());
    }
    if file.default_days == 0 {
        return fail("default_days must be positive".to_string());
    }

    for (table, rules) in [
        ("categories", &file.categories),
        ("brand_categories", &file.brand_categories),
    ] {
        let mut seen = HashSet::new();
        for rule in rules {
            if rule.name.is_empty() {
                return fail(format!("{table}: category name must be non-empty"));
            }
            if !seen.insert(rule.name.as_str()) {
                return fail(format!("{table}: duplicate category '{}'", rule.name));
            }
            if rule.keywords.is_empty() || rule.keywords.iter().any(String::is_empty) {
                return fail(format!(
                    "{table}: category '{}' needs non-empty keywords",
                    rule.name
                ));
            }
        }
    }

    for o in &file.overrides {
        if o.key.is_empty() || o.category.is_empty() {
            return fail("overrides: key and category must be non-empty".to_string());
        }
    }

    for (table, modifiers) in [
        ("packaging", &file.packaging),
        ("nutritional", &file.nutritional),
        ("brands", &file.brands),
    ] {
        for m in modifiers {
            if m.keyword.is_empty() {
                return fail(format!("{table}: keyword must be non-empty"));
            }
            if !factor_in_range(m.factor) {
                return fail(format!(
                    "{table}: factor {} for '{}' must be in (0, {MAX_FACTOR}]",
                    m.factor, m.keyword
                ));
            }
        }
    }

    if file.seasonal_items.iter().any(|s| s.keyword.is_empty()) {
        return fail("seasonal_items: keyword must be non-empty".to_string());
    }

    for season in &file.seasons {
        if season.months.iter().any(|m| !(1..=12).contains(m)) {
            return fail(format!(
                "seasons: '{}' has a month outside 1-12",
                season.name
            ));
        }
        if !factor_in_range(season.factor) {
            return fail(format!(
                "seasons: factor {} for '{}' must be in (0, {MAX_FACTOR}]",
                season.factor, season.name
            ));
        }
    }

    if let Some(p) = file.duration_patterns.iter().find(|p| p.unit_days == 0) {
        return fail(format!(
            "duration_patterns: '{}' must have positive unit_days",
            p.name
        ));
    }

    Ok(())
}

fn factor_in_range(factor: f64) -> bool {
    factor > 0.0 && factor <= MAX_FACTOR
}

fn compile_regex(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

fn compile_date_pattern(spec: DatePatternSpec) -> Result<DatePattern, ConfigError> {
    let regex = compile_regex(&spec.name, &spec.pattern)?;
    // captures_len counts the implicit whole-match group 0.
    let groups = regex.captures_len() - 1;
    for group in [spec.month_group, spec.day_group, spec.year_group] {
        if group == 0 || group > groups {
            return Err(ConfigError::Validation(format!(
                "date_patterns: '{}' refers to group {group} but has {groups} groups",
                spec.name
            )));
        }
    }
    Ok(DatePattern {
        name: spec.name,
        regex,
        month_group: spec.month_group,
        day_group: spec.day_group,
        year_group: spec.year_group,
    })
}

fn compile_duration_pattern(spec: DurationPatternSpec) -> Result<DurationPattern, ConfigError> {
    let regex = compile_regex(&spec.name, &spec.pattern)?;
    if regex.captures_len() < 2 {
        return Err(ConfigError::Validation(format!(
            "duration_patterns: '{}' needs a capture group for the count",
            spec.name
        )));
    }
    Ok(DurationPattern {
        name: spec.name,
        regex,
        unit_days: spec.unit_days,
    })
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
