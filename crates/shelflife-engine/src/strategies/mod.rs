//! The built-in estimation strategies, in chain order.

mod brand;
mod fallback;
mod keyword;
mod nutritional;
mod product_lookup;
mod seasonal;

pub use brand::BrandSpecificAnalysis;
pub use fallback::EnhancedFallback;
pub use keyword::AdvancedKeywordAnalysis;
pub use nutritional::NutritionalInference;
pub use product_lookup::ProductDatabaseLookup;
pub use seasonal::SeasonalAdjustment;

pub const METHOD_PRINTED_DATE: &str = "Product Database (Printed Date)";
pub const METHOD_PRODUCT_DATABASE: &str = "Product Database";
pub const METHOD_KEYWORD: &str = "Advanced Keyword Analysis";
pub const METHOD_BRAND: &str = "Brand-Specific Analysis";
pub const METHOD_NUTRITIONAL: &str = "Nutritional Inference";
pub const METHOD_SEASONAL: &str = "Seasonal Adjustment";
pub const METHOD_FALLBACK: &str = "Default Fallback";
