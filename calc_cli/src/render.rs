//! Plain-text rendering of the catalog, calculator details and field errors.

use calc_core::calculators::{catalog, in_category, CalculatorDef, Category};
use calc_core::form::FieldSpec;
use calc_core::{FieldError, Page};

pub fn catalog_table(category: Option<Category>) -> String {
    let mut out = String::new();
    let categories: Vec<Category> = match category {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    };
    let width = catalog().iter().map(|d| d.slug.len()).max().unwrap_or(0);

    for category in categories {
        out.push_str(&format!("{}\n", category.display_name()));
        for def in in_category(category) {
            out.push_str(&format!("  {:<width$}  {}\n", def.slug, def.name, width = width));
        }
        out.push('\n');
    }
    out
}

fn field_line(field: &FieldSpec) -> String {
    let mut line = format!("  {:<14} {} ({})", field.name, field.label, field.kind.display_name());
    let constraints = field.describe_constraints();
    if !constraints.is_empty() {
        line.push_str(&format!(" [{}]", constraints));
    }
    if let Some(default) = field.default_label() {
        line.push_str(&format!(" default: {}", default));
    }
    if let Some(help) = &field.help {
        line.push_str(&format!("\n  {:<14} {}", "", help));
    }
    line
}

pub fn calculator_details(def: &CalculatorDef) -> String {
    let mut out = format!("{} ({})\n", def.name, def.slug);
    out.push_str(&format!("Category: {}\n", def.category.display_name()));
    out.push_str(&format!("{}\n\n", def.description));
    out.push_str(&format!("Formula: {}\n", def.formula));
    if def.is_random() {
        out.push_str("Draws random values on every run.\n");
    }

    out.push_str("\nFields:\n");
    for field in &def.fields {
        out.push_str(&field_line(field));
        out.push('\n');
    }

    if !def.notes.is_empty() {
        out.push_str("\nNotes:\n");
        for note in &def.notes {
            out.push_str(&format!("  - {}\n", note));
        }
    }
    out
}

/// Current raw values, one `name = value` line per field.
pub fn field_values(page: &Page) -> Vec<String> {
    page.fields()
        .map(|field| {
            let raw = page.form().raw_value(&field.name).unwrap_or_default();
            format!("  {} ({}) = {}", field.name, field.label, raw)
        })
        .collect()
}

/// One line per error, labelled with the field it belongs to.
pub fn field_errors(page: &Page, errors: &[FieldError]) -> Vec<String> {
    errors
        .iter()
        .map(|error| {
            let label = page
                .form()
                .field(&error.field)
                .map(|f| f.label.as_str())
                .unwrap_or(error.field.as_str());
            format!("  ! {}: {}", label, error.message)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculators::find;

    #[test]
    fn test_catalog_table_filters() {
        let health = catalog_table(Some(Category::Health));
        assert!(health.starts_with(&format!("{}\n", Category::Health.display_name())));
        assert!(health.starts_with("Health & Fitness\n"));
        assert!(health.contains("body-fat"));
        assert!(!health.contains("password"));

        let all = catalog_table(None);
        assert!(all.contains("password"));
        assert!(all.contains(&format!("\n{}\n", Category::Text.display_name())));
    }

    #[test]
    fn test_details_list_fields() {
        let details = calculator_details(find("password").unwrap());
        assert!(details.contains("Password Generator (password)"));
        assert!(details.contains("length"));
        assert!(details.contains("Draws random values"));
        assert!(details.contains("Notes:"));
    }

    #[test]
    fn test_field_errors_use_labels() {
        let page = Page::open("tip").unwrap();
        let lines = field_errors(&page, &[FieldError::new("bill", "This field is required")]);
        assert_eq!(lines, vec!["  ! Bill amount: This field is required"]);
    }
}
