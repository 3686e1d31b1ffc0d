//! Human-readable rendering of API results

use crate::fees::{ApiKeyGrant, Category, CategoryFees, Docs, Fee, Metadata};
use crate::pagination::Page;
use std::fmt::Write;

/// One line per fee
pub fn fee_lines(fees: &[Fee]) -> String {
    let mut out = String::new();
    for fee in fees {
        let id = fee.id.map(|id| format!("#{id} ")).unwrap_or_default();
        let _ = writeln!(out, "  - {id}{}: {}", fee.name, fee.amount_display());
    }
    out
}

/// A page of fees with its position
pub fn fee_page(page: &Page<Fee>) -> String {
    let mut out = format!(
        "Retrieved {} fees (Page {} of {})\nTotal: {} fees\n",
        page.len(),
        page.meta.page,
        page.meta.page_total,
        page.meta.total
    );
    out.push_str(&fee_lines(&page.items));
    out
}

/// Details of a single fee
pub fn fee_detail(fee: &Fee) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Fee: {}", fee.name);
    let _ = writeln!(out, "Amount: {}", fee.amount_display());
    if let Some(description) = fee.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "Description: {description}");
    }
    if fee.subcategory.is_some() {
        let _ = writeln!(out, "Category: {}", fee.category_name().unwrap_or("N/A"));
        let _ = writeln!(out, "Subcategory: {}", fee.subcategory_name().unwrap_or("N/A"));
    }
    if fee.source.is_some() {
        let _ = writeln!(out, "Agency: {}", fee.agency_name().unwrap_or("N/A"));
    }
    out
}

/// Search results
pub fn search_results(query: &str, fees: &[Fee]) -> String {
    let mut out = format!("Found {} fees matching \"{query}\"\n", fees.len());
    out.push_str(&fee_lines(fees));
    out
}

/// Category list with fee counts
pub fn categories(categories: &[Category]) -> String {
    let mut out = format!("Found {} categories:\n", categories.len());
    for category in categories {
        let _ = writeln!(
            out,
            "  - {}: {} fees",
            category.display_name, category.fee_count
        );
    }
    out
}

/// API metadata
pub fn metadata(metadata: &Metadata) -> String {
    let stats = &metadata.statistics;
    let mut out = String::from("API Metadata:\n");
    let _ = writeln!(out, "  Version: {}", metadata.api_version);
    let _ = writeln!(out, "  Total Fees: {}", stats.total_fees);
    let _ = writeln!(out, "  Total Categories: {}", stats.total_categories);
    let _ = writeln!(out, "  Total Agencies: {}", stats.total_agencies);
    if let Some(n) = stats.total_subcategories {
        let _ = writeln!(out, "  Total Subcategories: {n}");
    }
    if let Some(n) = stats.total_sources {
        let _ = writeln!(out, "  Total Sources: {n}");
    }
    let updated = metadata
        .last_database_update
        .map_or_else(|| "N/A".to_string(), |t| t.to_rfc3339());
    let _ = writeln!(out, "  Last Update: {updated}");
    out
}

/// Documentation links
pub fn docs(docs: &Docs) -> String {
    let mut out = String::from("Documentation Links:\n");
    let _ = writeln!(out, "Repository: {}", docs.repository);
    let _ = writeln!(out, "API Reference: {}", docs.main_documentation.api_reference);
    let _ = writeln!(out, "Quick Start: {}", docs.main_documentation.quick_start);
    for (language, link) in &docs.code_examples {
        let _ = writeln!(out, "Example ({language}): {link}");
    }
    out
}

/// A freshly generated key
pub fn api_key(grant: &ApiKeyGrant) -> String {
    let mut out = String::from("API Key Generated Successfully!\n");
    let _ = writeln!(out, "API Key: {}", grant.api_key);
    if let Some(message) = &grant.message {
        let _ = writeln!(out, "Message: {message}");
    }
    out.push_str("IMPORTANT: Save this key immediately - you cannot retrieve it later!\n");
    out
}

/// A category and its fees
pub fn category_fees(result: &CategoryFees) -> String {
    let mut out = format!(
        "Category: {} (id {})\nShowing {} of {} fees\n",
        result.category.display_name,
        result.category.id,
        result.fees.len(),
        result.total
    );
    out.push_str(&fee_lines(&result.fees));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fee(value: serde_json::Value) -> Fee {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_fee_detail_with_relationships() {
        let fee = fee(json!({
            "id": 1,
            "name": "International Passport (32 pages)",
            "amount": 35000,
            "currency": "NGN",
            "subcategory": {"name": "Passports", "category": {"name": "Immigration"}},
            "source": {"agency": {"name": "NIS"}}
        }));

        assert_eq!(
            fee_detail(&fee),
            "Fee: International Passport (32 pages)\n\
             Amount: 35000 NGN\n\
             Category: Immigration\n\
             Subcategory: Passports\n\
             Agency: NIS\n"
        );
    }

    #[test]
    fn test_fee_detail_missing_names() {
        let fee = fee(json!({
            "name": "Stamp duty",
            "amount": 500,
            "currency": "NGN",
            "subcategory": {},
            "source": {}
        }));

        let rendered = fee_detail(&fee);
        assert!(rendered.contains("Category: N/A\n"));
        assert!(rendered.contains("Subcategory: N/A\n"));
        assert!(rendered.contains("Agency: N/A\n"));
    }

    #[test]
    fn test_fee_page() {
        let page: Page<Fee> = serde_json::from_value(json!({
            "items": [
                {"id": 4, "name": "NIN modification", "amount": 15000, "currency": "NGN"},
                {"id": 5, "name": "NIN slip reprint", "amount": 500, "currency": "NGN"}
            ],
            "meta": {"page": 1, "pageTotal": 3, "total": 42}
        }))
        .unwrap();

        assert_eq!(
            fee_page(&page),
            "Retrieved 2 fees (Page 1 of 3)\n\
             Total: 42 fees\n  \
             - #4 NIN modification: 15000 NGN\n  \
             - #5 NIN slip reprint: 500 NGN\n"
        );
    }

    #[test]
    fn test_categories() {
        let list: Vec<Category> = serde_json::from_value(json!([
            {"id": 1, "display_name": "Identity", "fee_count": 12}
        ]))
        .unwrap();
        assert_eq!(categories(&list), "Found 1 categories:\n  - Identity: 12 fees\n");
    }

    #[test]
    fn test_metadata_without_timestamp() {
        let meta: Metadata = serde_json::from_value(json!({
            "api_version": "1.0",
            "statistics": {"total_fees": 3, "total_categories": 2, "total_agencies": 1}
        }))
        .unwrap();
        let rendered = metadata(&meta);
        assert!(rendered.starts_with("API Metadata:\n  Version: 1.0\n"));
        assert!(rendered.ends_with("  Last Update: N/A\n"));
    }

    #[test]
    fn test_api_key() {
        let grant = ApiKeyGrant {
            success: true,
            api_key: "nga_123".to_string(),
            message: None,
        };
        let rendered = api_key(&grant);
        assert!(rendered.contains("API Key: nga_123\n"));
        assert!(rendered.contains("Save this key immediately"));
    }
}
