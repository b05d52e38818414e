//! Response types for the product search endpoint (`/cgi/search.pl?json=1`).

use serde::Deserialize;
use shelflife_core::ProductMetadata;

/// Envelope of a search response. Only the product list is consumed.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<OffProduct>,
}

/// One candidate product. Every field is optional in practice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffProduct {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub categories_tags: Vec<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub best_before_date: Option<String>,
    #[serde(default)]
    pub use_by_date: Option<String>,
}

impl From<OffProduct> for ProductMetadata {
    fn from(p: OffProduct) -> Self {
        // The database frequently returns "" for unknown fields.
        let present = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        ProductMetadata {
            product_name: present(p.product_name),
            brands: present(p.brands),
            categories_tags: p
                .categories_tags
                .into_iter()
                .filter(|t| !t.trim().is_empty())
                .collect(),
            expiration_date: present(p.expiration_date),
            best_before_date: present(p.best_before_date),
            use_by_date: present(p.use_by_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_tolerates_missing_products() {
        let resp: SearchResponse = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(resp.products.is_empty());
    }

    #[test]
    fn blank_fields_become_none() {
        let product: OffProduct = serde_json::from_str(
            r#"{"product_name": "Whole Milk", "brands": "", "expiration_date": "  ",
                "categories_tags": ["en:dairies", ""]}"#,
        )
        .unwrap();
        let meta = ProductMetadata::from(product);
        assert_eq!(meta.product_name.as_deref(), Some("Whole Milk"));
        assert!(meta.brands.is_none());
        assert!(meta.expiration_date.is_none());
        assert_eq!(meta.categories_tags, vec!["en:dairies"]);
    }
}
