//! Shipped default keyword tables.
//!
//! All keywords are lowercase and matched as whole words of the normalized
//! item text, plurals included. Category order matters: the first category
//! with a matching keyword wins.

pub(crate) const TABLES_VERSION: &str = "2024.1";

/// `(category, shelf-life days, keywords)`.
///
/// Processed foods precede `produce` so "strawberry jam" or "orange juice"
/// land in their own category rather than on the fruit.
pub(crate) const CATEGORIES: &[(&str, u32, &[&str])] = &[
    (
        "seafood",
        2,
        &[
            "seafood", "fish", "salmon", "tuna", "shrimp", "prawn", "crab", "lobster", "cod",
            "tilapia", "oyster", "mussel", "clam", "scallop",
        ],
    ),
    (
        "meat",
        3,
        &[
            "meat", "chicken", "beef", "pork", "turkey", "lamb", "steak", "sausage", "bacon",
            "veal", "duck", "salami", "pepperoni", "mince",
        ],
    ),
    (
        "dairy",
        7,
        &[
            "dairy", "milk", "buttermilk", "yogurt", "yoghurt", "cheese", "butter", "cream",
            "kefir",
        ],
    ),
    ("eggs", 21, &["egg"]),
    (
        "bakery",
        5,
        &[
            "bread", "bagel", "muffin", "croissant", "bun", "cake", "tortilla", "pastry",
            "baguette",
        ],
    ),
    ("deli", 5, &["deli", "hummus", "salsa", "guacamole"]),
    (
        "beverages",
        30,
        &["juice", "soda", "water", "tea", "coffee", "beer", "wine", "beverage"],
    ),
    (
        "condiments",
        180,
        &[
            "ketchup", "mustard", "mayonnaise", "mayo", "jam", "jelly", "dressing", "syrup",
        ],
    ),
    (
        "pantry",
        365,
        &[
            "rice", "pasta", "flour", "sugar", "cereal", "bean", "lentil", "oats", "noodle",
            "cracker", "chip", "oil", "vinegar", "sauce", "spice",
        ],
    ),
    (
        "produce",
        7,
        &[
            "lettuce", "spinach", "watercress", "apple", "banana", "berry", "strawberry",
            "blueberry", "raspberry", "blackberry", "tomato", "carrot", "onion", "potato",
            "grape", "orange", "lemon", "pepper", "cucumber", "broccoli", "avocado", "mushroom",
            "melon", "watermelon", "eggplant", "fruit", "vegetable", "salad",
        ],
    ),
];

pub(crate) const DEFAULT_DAYS: u32 = 14;

/// `(key, fixed days, category)`. The longest matching key wins.
pub(crate) const OVERRIDES: &[(&str, u32, &str)] = &[
    ("honey", 730, "pantry"),
    ("uht milk", 90, "dairy"),
    ("parmesan", 60, "dairy"),
    ("ground beef", 2, "meat"),
    ("butter", 30, "dairy"),
    ("peanut butter", 180, "pantry"),
    ("hard boiled egg", 7, "eggs"),
    ("sourdough", 4, "bakery"),
    ("canned tuna", 1095, "pantry"),
];

/// `(packaging word, factor)`.
pub(crate) const PACKAGING: &[(&str, f64)] = &[
    ("frozen", 6.0),
    ("canned", 20.0),
    ("tinned", 20.0),
    ("vacuum", 3.0),
    ("uht", 12.0),
    ("shelf stable", 15.0),
    ("pickled", 12.0),
    ("smoked", 2.0),
    ("jarred", 10.0),
];

/// `(nutritional trait, factor)`.
pub(crate) const NUTRITIONAL: &[(&str, f64)] = &[
    ("organic", 0.8),
    ("preservative free", 0.7),
    ("no preservatives", 0.7),
    ("raw", 0.7),
    ("low sodium", 0.9),
    ("salted", 1.5),
    ("cured", 3.0),
    ("fermented", 2.0),
    ("pasteurized", 1.5),
    ("sweetened", 1.3),
    ("dried", 8.0),
];

/// Base days for items identified only by nutritional traits.
pub(crate) const NUTRITIONAL_BASE_DAYS: u32 = 10;

/// `(brand, factor)`.
pub(crate) const BRANDS: &[(&str, f64)] = &[
    ("fairlife", 3.0),
    ("lactaid", 2.5),
    ("horizon", 1.5),
    ("organic valley", 1.4),
    ("oscar mayer", 1.3),
    ("hillshire farm", 1.3),
    ("kraft", 1.2),
    ("dave's killer bread", 1.2),
    ("nature's own", 1.1),
    ("sara lee", 1.1),
    ("chobani", 1.1),
    ("tyson", 1.0),
    ("boar's head", 0.9),
];

/// Category table used only by brand analysis.
pub(crate) const BRAND_CATEGORIES: &[(&str, u32, &[&str])] = &[
    ("dairy", 7, &["milk", "yogurt", "cheese"]),
    ("meat", 4, &["chicken", "turkey", "hot dog", "bacon", "sausage"]),
    ("bakery", 6, &["bread", "bagel", "bun"]),
    ("deli", 6, &["sliced", "deli"]),
];

/// `(seasonal produce keyword, base days)`.
pub(crate) const SEASONAL_ITEMS: &[(&str, u32)] = &[
    ("pumpkin", 30),
    ("squash", 14),
    ("zucchini", 7),
    ("corn", 5),
    ("peach", 5),
    ("plum", 5),
    ("apricot", 5),
    ("cherry", 7),
    ("asparagus", 4),
    ("rhubarb", 7),
    ("persimmon", 7),
    ("fig", 5),
];

/// `(season, months, factor)`.
pub(crate) const SEASONS: &[(&str, &[u32], f64)] = &[
    ("winter", &[12, 1, 2], 1.2),
    ("spring", &[3, 4, 5], 1.0),
    ("summer", &[6, 7, 8], 0.8),
    ("autumn", &[9, 10, 11], 1.0),
];

const DATE: &str = r"(\d{1,2})[/.-](\d{1,2})[/.-](\d{4}|\d{2})";

/// `(name, regex, month group, day group, year group)`, tried in order.
pub(crate) fn date_patterns() -> Vec<(&'static str, String, usize, usize, usize)> {
    vec![
        (
            "generic_slash",
            r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b".to_string(),
            1,
            2,
            3,
        ),
        (
            "generic_dash",
            r"\b(\d{1,2})-(\d{1,2})-(\d{4}|\d{2})\b".to_string(),
            1,
            2,
            3,
        ),
        (
            "labeled_expiry",
            format!(r"\b(?:expiry|expires|exp)(?: date)?[:\s]+{DATE}"),
            1,
            2,
            3,
        ),
        (
            "labeled_best_before",
            format!(r"\bbest before[:\s]+{DATE}"),
            1,
            2,
            3,
        ),
        ("labeled_use_by", format!(r"\buse by[:\s]+{DATE}"), 1, 2, 3),
    ]
}

/// `(name, regex, days per unit)`, tried in order.
pub(crate) const DURATION_PATTERNS: &[(&str, &str, u32)] = &[
    ("expires_in_days", r"\bexpires in (\d+) days?\b", 1),
    ("expires_in_weeks", r"\bexpires in (\d+) weeks?\b", 7),
    ("expires_in_months", r"\bexpires in (\d+) months?\b", 30),
];
