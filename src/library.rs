//! Search context for chat queries: a category filter or an explicit
//! document selection.

use crate::api::models::{ChatRequest, Document};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    EmployeeContracts,
    Nda,
    LoanAgreements,
    General,
}

impl Category {
    pub const VARIANTS: [Category; 5] = [
        Category::All,
        Category::EmployeeContracts,
        Category::Nda,
        Category::LoanAgreements,
        Category::General,
    ];

    /// Value sent to the backend.
    pub fn slug(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::EmployeeContracts => "employee_contracts",
            Category::Nda => "nda",
            Category::LoanAgreements => "loan_agreements",
            Category::General => "general",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All Contracts",
            Category::EmployeeContracts => "Employee Contracts",
            Category::Nda => "NDAs",
            Category::LoanAgreements => "Loan Agreements",
            Category::General => "General",
        }
    }

    /// `None` for [`Category::All`], which means "no filter".
    pub fn filter(self) -> Option<&'static str> {
        match self {
            Category::All => None,
            other => Some(other.slug()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts either the slug or the display label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::VARIANTS
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s) || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// What the next chat query searches over.
///
/// A non-empty document selection takes precedence over the category.
#[derive(Debug, Clone, Default)]
pub struct SearchScope {
    category: Category,
    selected: Vec<Document>,
}

impl SearchScope {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            selected: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn selected(&self) -> &[Document] {
        &self.selected
    }

    pub fn request(&self, query: &str) -> ChatRequest {
        if self.selected.is_empty() {
            ChatRequest {
                query: query.to_string(),
                category_filter: self.category.filter().map(str::to_string),
                doc_ids: None,
            }
        } else {
            ChatRequest {
                query: query.to_string(),
                category_filter: None,
                doc_ids: Some(self.selected.iter().map(|d| d.id).collect()),
            }
        }
    }

    /// Switches the category and drops any selection. Returns the notice to post.
    pub fn set_category(&mut self, category: Category) -> String {
        self.category = category;
        self.selected.clear();
        match category {
            Category::All => "Context reset: Searching All Contracts".to_string(),
            other => format!("Filter active: {}", other.label()),
        }
    }

    /// Locks the context to `docs`. Returns `None` for an empty selection.
    pub fn select(&mut self, docs: Vec<Document>) -> Option<String> {
        self.selected = docs;
        if self.selected.is_empty() {
            return None;
        }

        let count = self.selected.len();
        let names = self
            .selected
            .iter()
            .take(2)
            .map(|d| d.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let remaining = if count > 2 {
            format!(" + {} more", count - 2)
        } else {
            String::new()
        };
        let label = if count == 1 { "Contract" } else { "Contracts" };
        Some(format!("Context locked to {count} {label}: {names}{remaining}"))
    }

    pub fn clear_selection(&mut self) -> String {
        self.selected.clear();
        "Selection cleared. Reverted to global search.".to_string()
    }

    pub fn reset(&mut self) {
        self.category = Category::All;
        self.selected.clear();
    }
}

/// Picks the listed documents whose id appears in `ids`, keeping listing order.
pub fn select_by_ids(documents: &[Document], ids: &[i64]) -> Vec<Document> {
    documents
        .iter()
        .filter(|d| ids.contains(&d.id))
        .cloned()
        .collect()
}

pub fn upload_notice(file_name: &str) -> String {
    format!("Index updated: {} added.", file_name)
}

pub const NEW_CHAT_NOTICE: &str = "New chat started.";

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: i64, title: &str) -> Document {
        Document {
            id,
            title: title.to_string(),
            category: "general".into(),
            uploaded_at: "2024-01-01T00:00:00Z".into(),
            total_pages: 1,
            effective_date: None,
            expiry_date: None,
            file_url: None,
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("nda".parse::<Category>().unwrap(), Category::Nda);
        assert_eq!("NDAs".parse::<Category>().unwrap(), Category::Nda);
        assert_eq!(
            "Loan Agreements".parse::<Category>().unwrap(),
            Category::LoanAgreements
        );
        assert!("leases".parse::<Category>().is_err());
    }

    #[test]
    fn test_all_category_omits_filter() {
        let scope = SearchScope::default();
        let request = scope.request("q");
        assert_eq!(request.category_filter, None);
        assert_eq!(request.doc_ids, None);
    }

    #[test]
    fn test_category_filter_in_request() {
        let scope = SearchScope::new(Category::EmployeeContracts);
        let request = scope.request("q");
        assert_eq!(request.category_filter.as_deref(), Some("employee_contracts"));
        assert_eq!(request.doc_ids, None);
    }

    #[test]
    fn test_selection_wins_over_category() {
        let mut scope = SearchScope::new(Category::Nda);
        scope.select(vec![doc(4, "A"), doc(8, "B")]);
        let request = scope.request("q");
        assert_eq!(request.category_filter, None);
        assert_eq!(request.doc_ids, Some(vec![4, 8]));
    }

    #[test]
    fn test_set_category_notices() {
        let mut scope = SearchScope::default();
        scope.select(vec![doc(1, "A")]);
        assert_eq!(scope.set_category(Category::Nda), "Filter active: NDAs");
        assert!(scope.selected().is_empty());
        assert_eq!(
            scope.set_category(Category::All),
            "Context reset: Searching All Contracts"
        );
    }

    #[test]
    fn test_select_notices() {
        let mut scope = SearchScope::default();
        assert_eq!(scope.select(vec![]), None);
        assert_eq!(
            scope.select(vec![doc(1, "Lease")]).unwrap(),
            "Context locked to 1 Contract: Lease"
        );
        assert_eq!(
            scope.select(vec![doc(1, "Lease"), doc(2, "NDA")]).unwrap(),
            "Context locked to 2 Contracts: Lease, NDA"
        );
        assert_eq!(
            scope
                .select(vec![doc(1, "Lease"), doc(2, "NDA"), doc(3, "Loan"), doc(4, "MSA")])
                .unwrap(),
            "Context locked to 4 Contracts: Lease, NDA + 2 more"
        );
    }

    #[test]
    fn test_clear_and_reset() {
        let mut scope = SearchScope::new(Category::General);
        scope.select(vec![doc(1, "Lease")]);
        assert_eq!(
            scope.clear_selection(),
            "Selection cleared. Reverted to global search."
        );
        assert!(scope.selected().is_empty());
        assert_eq!(scope.category(), Category::General);

        scope.reset();
        assert_eq!(scope.category(), Category::All);
    }

    #[test]
    fn test_select_by_ids_keeps_listing_order() {
        let docs = vec![doc(1, "A"), doc(2, "B"), doc(3, "C")];
        let picked = select_by_ids(&docs, &[3, 1, 99]);
        let ids: Vec<i64> = picked.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_upload_notice() {
        assert_eq!(upload_notice("msa.pdf"), "Index updated: msa.pdf added.");
    }
}
