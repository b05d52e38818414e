use super::*;

const MINIMAL_YAML: &str = r#"
version: "test-1"
default_days: 10
nutritional_base_days: 5
categories:
  - name: Dairy
    days: 7
    keywords: [Milk, cheese]
  - name: meat
    days: 3
    keywords: [chicken]
packaging:
  - keyword: Frozen
    factor: 6.0
date_patterns:
  - name: slash
    pattern: '(\d{1,2})/(\d{1,2})/(\d{4})'
    month_group: 1
    day_group: 2
    year_group: 3
duration_patterns:
  - name: days
    pattern: 'expires in (\d+) days'
    unit_days: 1
"#;

#[test]
fn builtin_tables_compile() {
    let tables = KeywordTables::builtin();
    assert_eq!(tables.default_days, 14);
    assert_eq!(tables.date_patterns.len(), 5);
    assert_eq!(tables.duration_patterns.len(), 3);
}

#[test]
fn builtin_dairy_is_seven_days() {
    let tables = KeywordTables::builtin();
    let dairy = tables.category_for("milk").expect("milk should match dairy");
    assert_eq!(dairy.name, "dairy");
    assert_eq!(dairy.days, 7);
}

#[test]
fn category_for_uses_declared_order() {
    let tables = KeywordTables::builtin();
    assert_eq!(tables.category_for("ribeye steak").unwrap().name, "meat");
    assert_eq!(tables.category_for("milk chocolate bar").unwrap().name, "dairy");
}

#[test]
fn processed_foods_win_over_their_fruit_or_vegetable() {
    let tables = KeywordTables::builtin();
    for (text, expected) in [
        ("strawberry jam", "condiments"),
        ("grape jelly", "condiments"),
        ("potato chips", "pantry"),
        ("tomato sauce", "pantry"),
        ("orange juice", "beverages"),
    ] {
        let found = tables.category_for(text).map(|c| c.name.as_str());
        assert_eq!(found, Some(expected), "{text}");
    }
}

#[test]
fn keywords_do_not_match_inside_other_words() {
    let tables = KeywordTables::builtin();
    assert_eq!(tables.category_for("watercress").unwrap().name, "produce");
    assert_eq!(tables.category_for("buttermilk").unwrap().name, "dairy");
    assert!(tables.override_for("buttermilk").is_none());
    assert_eq!(tables.nutritional_for("strawberries").count(), 0);
    assert_eq!(tables.nutritional_for("unsalted butter").count(), 0);
    assert_eq!(tables.category_for("eggplant").unwrap().name, "produce");
}

#[test]
fn plural_forms_match() {
    let tables = KeywordTables::builtin();
    assert_eq!(tables.category_for("strawberries").unwrap().name, "produce");
    assert_eq!(tables.category_for("blueberries").unwrap().name, "produce");
    assert_eq!(tables.category_for("en:dairies").unwrap().name, "dairy");
    assert_eq!(tables.category_for("tomatoes").unwrap().name, "produce");
    assert_eq!(tables.seasonal_item_for("sweet cherries").unwrap().keyword, "cherry");
}

#[test]
fn contains_term_respects_word_boundaries() {
    assert!(contains_term("raw milk", "raw"));
    assert!(contains_term("milk, raw", "raw"));
    assert!(!contains_term("strawberry", "raw"));
    assert!(contains_term("creamy peanut butter", "peanut butter"));
    assert!(!contains_term("peanut buttery", "peanut butter"));
    assert!(contains_term("boar's head ham", "boar's head"));
    assert!(contains_term("mixed berries", "berry"));
    assert!(!contains_term("anything", ""));
}

#[test]
fn category_for_returns_none_for_unknown_text() {
    let tables = KeywordTables::builtin();
    assert!(tables.category_for("zzqx unknown item").is_none());
}

#[test]
fn category_named_is_case_insensitive() {
    let tables = KeywordTables::builtin();
    assert_eq!(tables.category_named(" Dairy ").unwrap().days, 7);
    assert!(tables.category_named("spaceship").is_none());
}

#[test]
fn override_for_prefers_longest_key() {
    let tables = KeywordTables::builtin();
    let o = tables.override_for("creamy peanut butter").unwrap();
    assert_eq!(o.key, "peanut butter");
    assert_eq!(o.days, 180);
}

#[test]
fn packaging_for_returns_all_matches() {
    let tables = KeywordTables::builtin();
    let found: Vec<&str> = tables
        .packaging_for("frozen smoked salmon")
        .map(|m| m.keyword.as_str())
        .collect();
    assert_eq!(found, vec!["frozen", "smoked"]);
}

#[test]
fn season_for_month_covers_every_month() {
    let tables = KeywordTables::builtin();
    for month in 1..=12 {
        assert!(
            tables.season_for_month(month).is_some(),
            "month {month} has no season"
        );
    }
    assert_eq!(tables.season_for_month(7).unwrap().name, "summer");
}

#[test]
fn from_yaml_str_lowercases_keywords() {
    let tables = KeywordTables::from_yaml_str(MINIMAL_YAML).unwrap();
    assert_eq!(tables.version, "test-1");
    assert_eq!(tables.categories[0].name, "dairy");
    assert_eq!(tables.categories[0].keywords, vec!["milk", "cheese"]);
    assert_eq!(tables.packaging[0].keyword, "frozen");
    assert!(tables.overrides.is_empty());
}

#[test]
fn from_yaml_str_rejects_bad_regex() {
    let yaml = MINIMAL_YAML.replace(r"'(\d{1,2})/(\d{1,2})/(\d{4})'", "'(unclosed'");
    let err = KeywordTables::from_yaml_str(&yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidPattern { ref name, .. } if name == "slash"),
        "expected InvalidPattern(slash), got: {err:?}"
    );
}

#[test]
fn from_yaml_str_rejects_group_out_of_range() {
    let yaml = MINIMAL_YAML.replace("year_group: 3", "year_group: 4");
    let err = KeywordTables::from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "got: {err:?}");
}

#[test]
fn from_yaml_str_rejects_factor_above_max() {
    let yaml = MINIMAL_YAML.replace("factor: 6.0", "factor: 25.0");
    let err = KeywordTables::from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("packaging")));
}

#[test]
fn from_yaml_str_rejects_duplicate_category() {
    let yaml = MINIMAL_YAML.replace("name: meat", "name: DAIRY");
    let err = KeywordTables::from_yaml_str(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate")));
}

#[test]
fn from_yaml_str_rejects_malformed_yaml() {
    let err = KeywordTables::from_yaml_str("categories: [").unwrap_err();
    assert!(matches!(err, ConfigError::TablesFileParse(_)));
}

#[test]
fn load_tables_reports_missing_file() {
    let err = load_tables(Path::new("/nonexistent/shelflife-tables.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::TablesFileIo { .. }));
}

#[test]
fn load_tables_reads_file() {
    let path = std::env::temp_dir().join(format!(
        "shelflife-tables-{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, MINIMAL_YAML).unwrap();
    let tables = load_tables(&path);
    std::fs::remove_file(&path).ok();
    assert_eq!(tables.unwrap().default_days, 10);
}

#[test]
fn brand_for_outlives_the_searched_text() {
    let tables = KeywordTables::builtin();
    let brand = {
        let text = String::from("fairlife 2% milk");
        tables.brand_for(&text)
    };
    assert_eq!(brand.map(|b| b.keyword.as_str()), Some("fairlife"));
    assert!(tables.brand_for("store brand milk").is_none());
}
