use serde::Serialize;

use crate::api::Query;
use crate::model::{ContractType, Seniority};

pub const DEFAULT_PER_PAGE: u32 = 50;

/// Current search and filter selections of the jobs browser.
///
/// Multi-valued filters are kept in selection order; that order is also the
/// order in which they are serialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub technologies: Vec<String>,
    pub seniority: Vec<Seniority>,
    pub contract_type: Vec<ContractType>,
    pub remote: bool,
    pub company: String,
    pub search: String,
}

/// Adds `value` if absent, removes it otherwise. Returns whether the value is
/// selected afterwards.
fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) -> bool {
    if let Some(idx) = values.iter().position(|v| *v == value) {
        values.remove(idx);
        false
    } else {
        values.push(value);
        true
    }
}

impl FilterState {
    pub fn toggle_technology(&mut self, tech: &str) -> bool {
        toggle(&mut self.technologies, tech.to_string())
    }

    pub fn toggle_seniority(&mut self, level: Seniority) -> bool {
        toggle(&mut self.seniority, level)
    }

    pub fn toggle_contract_type(&mut self, contract: ContractType) -> bool {
        toggle(&mut self.contract_type, contract)
    }

    pub fn is_technology_selected(&self, tech: &str) -> bool {
        self.technologies.iter().any(|t| t == tech)
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterState::default()
    }

    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    /// Appends the filter parameters; empty filters emit nothing.
    pub fn append_query(&self, query: &mut Query) {
        if !self.search.is_empty() {
            query.push(("search".to_string(), self.search.clone()));
        }
        if !self.company.is_empty() {
            query.push(("company".to_string(), self.company.clone()));
        }
        if self.remote {
            query.push(("remote".to_string(), "true".to_string()));
        }
        for tech in self.technologies.iter() {
            query.push(("technologies".to_string(), tech.clone()));
        }
        for level in self.seniority.iter() {
            query.push(("seniority".to_string(), level.as_str().to_string()));
        }
        for contract in self.contract_type.iter() {
            query.push(("contract_type".to_string(), contract.as_str().to_string()));
        }
    }
}

/// Pagination of the jobs browser. `current_page` and `total_pages` are
/// overwritten from every successful response; `per_page` is chosen here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub current_page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl PaginationState {
    pub fn new(per_page: u32) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
            total_pages: 1,
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page the "previous" control asks for, `None` while it is disabled.
    pub fn prev_page(&self) -> Option<u32> {
        self.can_go_prev().then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.can_go_next().then(|| self.current_page + 1)
    }

    pub fn set_per_page(&mut self, per_page: u32) {
        self.per_page = per_page.max(1);
        self.current_page = 1;
    }

    /// Takes the server's view of where we are.
    pub fn adopt(&mut self, page: u32, total_pages: u32) {
        self.current_page = page;
        self.total_pages = total_pages;
    }
}

/// Query for `/api/jobs`: `page`, `per_page`, then the filters.
pub fn jobs_query(filters: &FilterState, pagination: &PaginationState) -> Query {
    let mut query: Query = vec![
        ("page".to_string(), pagination.current_page.to_string()),
        ("per_page".to_string(), pagination.per_page.to_string()),
    ];
    filters.append_query(&mut query);
    query
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for one view. Only the most recently issued
/// ticket is current; completions holding an older ticket are stale.
#[derive(Clone, Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &Query) -> Vec<(&str, &str)> {
        query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn empty_filters_only_carry_pagination() {
        let query = jobs_query(&FilterState::default(), &PaginationState::default());
        assert_eq!(pairs(&query), vec![("page", "1"), ("per_page", "50")]);
    }

    #[test]
    fn filters_serialize_in_canonical_order() {
        let mut filters = FilterState {
            search: "backend".to_string(),
            company: "Acme".to_string(),
            remote: true,
            ..FilterState::default()
        };
        filters.toggle_technology("Rust");
        filters.toggle_technology("Go");
        filters.toggle_seniority(Seniority::Senior);
        filters.toggle_seniority(Seniority::Junior);
        filters.toggle_contract_type(ContractType::Cdi);

        let mut pagination = PaginationState::new(20);
        pagination.adopt(3, 7);

        let query = jobs_query(&filters, &pagination);
        assert_eq!(
            pairs(&query),
            vec![
                ("page", "3"),
                ("per_page", "20"),
                ("search", "backend"),
                ("company", "Acme"),
                ("remote", "true"),
                ("technologies", "Rust"),
                ("technologies", "Go"),
                ("seniority", "senior"),
                ("seniority", "junior"),
                ("contract_type", "cdi"),
            ]
        );
    }

    #[test]
    fn remote_false_is_omitted() {
        let filters = FilterState {
            remote: false,
            ..FilterState::default()
        };
        let query = jobs_query(&filters, &PaginationState::default());
        assert!(query.iter().all(|(k, _)| k != "remote"));
    }

    #[test]
    fn double_toggle_restores_previous_selection() {
        let mut filters = FilterState::default();
        filters.toggle_technology("Python");
        let before = filters.clone();

        assert!(filters.toggle_technology("Rust"));
        assert!(!filters.toggle_technology("Rust"));
        assert_eq!(filters, before);
    }

    #[test]
    fn reset_clears_everything() {
        let mut filters = FilterState {
            remote: true,
            company: "Acme".to_string(),
            search: "dev".to_string(),
            ..FilterState::default()
        };
        filters.toggle_technology("Rust");
        filters.toggle_contract_type(ContractType::Freelance);
        filters.reset();
        assert!(filters.is_empty());
    }

    #[test]
    fn pagination_walks_to_the_last_page() {
        let mut pagination = PaginationState::default();
        pagination.adopt(1, 5);
        assert!(!pagination.can_go_prev());
        assert!(pagination.can_go_next());

        while let Some(page) = pagination.next_page() {
            pagination.adopt(page, 5);
        }
        assert_eq!(pagination.current_page, 5);
        assert_eq!(pagination.total_pages, 5);
        assert_eq!(pagination.prev_page(), Some(4));
    }

    #[test]
    fn prev_is_disabled_on_first_page() {
        let pagination = PaginationState::default();
        assert_eq!(pagination.prev_page(), None);
        assert_eq!(pagination.next_page(), None);
    }

    #[test]
    fn changing_per_page_rewinds() {
        let mut pagination = PaginationState::default();
        pagination.adopt(4, 9);
        pagination.set_per_page(100);
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.per_page, 100);
        assert_eq!(pagination.total_pages, 9);
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(first < second);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
