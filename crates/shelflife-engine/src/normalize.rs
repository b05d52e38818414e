//! Descriptor normalization for keyword matching.

use shelflife_core::ItemDescriptor;

/// Lowercase, trim, and collapse internal whitespace.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// An [`ItemDescriptor`] with every field normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItem {
    pub name: String,
    pub brand: Option<String>,
    pub category_hint: Option<String>,
    /// Name followed by the brand (when not already part of the name).
    /// Strategies match keywords against this.
    pub text: String,
}

impl NormalizedItem {
    #[must_use]
    pub fn from_descriptor(descriptor: &ItemDescriptor) -> Self {
        let present = |s: Option<&String>| {
            s.map(|v| normalize_text(v))
                .filter(|v| !v.is_empty())
        };
        let name = normalize_text(&descriptor.name);
        let brand = present(descriptor.brand.as_ref());
        let category_hint = present(descriptor.category_hint.as_ref());

        let text = match &brand {
            Some(b) if !name.contains(b.as_str()) => format!("{name} {b}"),
            _ => name.clone(),
        };

        Self {
            name,
            brand,
            category_hint,
            text,
        }
    }

    /// Normalize a bare item name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::from_descriptor(&ItemDescriptor::new(name))
    }
}
