/// Catalog query engine
///
/// Pure functions from (records, view state) to the derived view:
/// free-text search, class and subject filters, sort order, the class
/// facet list and the "load more" pagination cursor. Everything here is
/// a linear scan plus one stable sort, cheap enough to rerun on every
/// keystroke.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::data::CatalogRecord;

/// Cards shown initially and added per "Load More"
pub const PAGE_SIZE: usize = 21;

/// Class filter selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClassFilter {
    /// No class filter
    #[default]
    All,
    /// Keep records whose resolved class equals this value
    Only(String),
}

impl ClassFilter {
    fn matches(&self, record: &CatalogRecord) -> bool {
        match self {
            ClassFilter::All => true,
            ClassFilter::Only(class) => record.standard.as_deref() == Some(class.as_str()),
        }
    }
}

/// Entry in the class facet list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    All,
    Class(String),
}

impl Facet {
    pub fn label(&self) -> String {
        match self {
            Facet::All => "All".to_string(),
            Facet::Class(class) => format!("Class {}", class),
        }
    }

    pub fn filter(&self) -> ClassFilter {
        match self {
            Facet::All => ClassFilter::All,
            Facet::Class(class) => ClassFilter::Only(class.clone()),
        }
    }
}

/// Sort order of the visible records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    AZ,
}

impl SortOrder {
    pub const ALL: &'static [SortOrder] = &[SortOrder::Newest, SortOrder::Oldest, SortOrder::AZ];

    /// Stable sort in this order.
    ///
    /// Always a total order: undated records go after dated ones for both
    /// date orders, and keep their manifest order among themselves.
    fn sort(self, records: &mut [&CatalogRecord]) {
        match self {
            SortOrder::Newest => records.sort_by(|a, b| compare_dates(a, b, true)),
            SortOrder::Oldest => records.sort_by(|a, b| compare_dates(a, b, false)),
            SortOrder::AZ => records.sort_by_cached_key(|record| record.title.to_lowercase()),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
            SortOrder::AZ => "A-Z",
        };
        write!(f, "{}", label)
    }
}

fn compare_dates(a: &CatalogRecord, b: &CatalogRecord, descending: bool) -> Ordering {
    match (a.date, b.date) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// All user-controlled inputs of the catalog view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    pub class_filter: ClassFilter,
    pub subject: Option<String>,
    pub sort: SortOrder,
    /// Number of cards currently shown
    pub visible_count: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }
}

impl ViewState {
    pub fn with_page_size(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            search: String::new(),
            class_filter: ClassFilter::All,
            subject: None,
            sort: SortOrder::default(),
            visible_count: page_size,
            page_size,
        }
    }

    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.reset_pagination();
        }
    }

    /// Single-select: the chosen value replaces the current one
    pub fn select_class(&mut self, filter: ClassFilter) {
        if self.class_filter != filter {
            self.class_filter = filter;
            self.reset_pagination();
        }
    }

    /// Toggle: choosing the active class again clears the filter
    pub fn toggle_class(&mut self, class: String) {
        self.class_filter = match &self.class_filter {
            ClassFilter::Only(current) if *current == class => ClassFilter::All,
            _ => ClassFilter::Only(class),
        };
        self.reset_pagination();
    }

    /// Toggle: choosing the active subject again clears the filter
    pub fn toggle_subject(&mut self, subject: String) {
        self.subject = if self.subject.as_deref() == Some(subject.as_str()) {
            None
        } else {
            Some(subject)
        };
        self.reset_pagination();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        if self.sort != sort {
            self.sort = sort;
            self.reset_pagination();
        }
    }

    pub fn load_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(self.page_size);
    }

    /// Clear search, class and subject. Sort order is kept.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.class_filter = ClassFilter::All;
        self.subject = None;
        self.reset_pagination();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || self.class_filter != ClassFilter::All || self.subject.is_some()
    }

    /// "Recent Files" without a class filter, "Class 10" with one
    pub fn heading(&self) -> String {
        match &self.class_filter {
            ClassFilter::All => "Recent Files".to_string(),
            ClassFilter::Only(class) => format!("Class {}", class),
        }
    }

    fn reset_pagination(&mut self) {
        self.visible_count = self.page_size;
    }
}

/// Result of running the query engine
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    /// Filtered and sorted records (not yet paginated)
    pub records: Vec<&'a CatalogRecord>,
    /// Class facets computed from the whole catalog
    pub facets: Vec<Facet>,
}

impl<'a> CatalogView<'a> {
    /// Slice currently on screen
    pub fn page(&self, state: &ViewState) -> &[&'a CatalogRecord] {
        let end = state.visible_count.min(self.records.len());
        &self.records[..end]
    }

    /// Whether the "Load More" button should show
    pub fn has_more(&self, state: &ViewState) -> bool {
        state.visible_count < self.records.len()
    }

    pub fn count_label(&self) -> String {
        let count = self.records.len();
        if count == 1 {
            "1 Note Found".to_string()
        } else {
            format!("{} Notes Found", count)
        }
    }
}

/// Filter, sort and facet the catalog for the given view state
pub fn compute_view<'a>(records: &'a [CatalogRecord], state: &ViewState) -> CatalogView<'a> {
    let query = state.search.to_lowercase();

    let mut visible: Vec<&CatalogRecord> = records
        .iter()
        .filter(|record| {
            query.is_empty()
                || record.title.to_lowercase().contains(&query)
                || record.subject.to_lowercase().contains(&query)
        })
        .filter(|record| state.class_filter.matches(record))
        .filter(|record| match &state.subject {
            Some(subject) => record.subject == *subject,
            None => true,
        })
        .collect();

    // Ties keep manifest order
    state.sort.sort(&mut visible);

    CatalogView {
        records: visible,
        facets: facet_classes(records),
    }
}

/// "All" followed by every distinct non-blank class, highest first.
///
/// Classes that don't start with a number follow the numeric ones in
/// reverse text order.
pub fn facet_classes(records: &[CatalogRecord]) -> Vec<Facet> {
    let mut classes: Vec<&str> = records
        .iter()
        .filter_map(|record| record.standard.as_deref())
        .filter(|class| !class.trim().is_empty())
        .collect();

    classes.sort_by(|a, b| match (leading_number(a), leading_number(b)) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.cmp(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    });
    classes.dedup();

    std::iter::once(Facet::All)
        .chain(classes.into_iter().map(|class| Facet::Class(class.to_string())))
        .collect()
}

/// Integer prefix of a class value ("10" -> 10, "9A" -> 9, "KG" -> None)
fn leading_number(class: &str) -> Option<u64> {
    let digits: String = class
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{parse_date, RecordId};

    fn rec(title: &str, subject: &str, standard: Option<&str>, date: &str) -> CatalogRecord {
        CatalogRecord {
            id: RecordId::Given(title.to_string()),
            title: title.to_string(),
            subject: subject.to_string(),
            standard: standard.map(str::to_string),
            kind: "PDF".to_string(),
            date_raw: Some(date.to_string()),
            date: parse_date(date),
            link: None,
        }
    }

    fn sample() -> Vec<CatalogRecord> {
        vec![
            rec("Light and Shadows", "Science", Some("6"), "2024-01-10"),
            rec("Algebra Basics", "Maths", Some("10"), "2024-03-02"),
            rec("Grammar Drill", "English", Some("9"), "2023-11-20"),
            rec("Our Constitution", "Social Science", Some("10"), "bad date"),
            rec("Chemical Reactions", "Science", Some("10"), "2024-02-15"),
        ]
    }

    fn titles(view: &CatalogView<'_>) -> Vec<String> {
        view.records.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_search_matches_title_or_subject_case_insensitive() {
        let records = sample();
        let mut state = ViewState::default();
        state.set_search("SCIENCE".to_string());

        let view = compute_view(&records, &state);
        assert_eq!(view.records.len(), 3);
        assert!(view
            .records
            .iter()
            .all(|r| r.subject.to_lowercase().contains("science")));

        state.set_search("algebra".to_string());
        let view = compute_view(&records, &state);
        assert_eq!(titles(&view), vec!["Algebra Basics"]);
    }

    #[test]
    fn test_unmatched_search_keeps_facets() {
        let records = sample();
        let all = compute_view(&records, &ViewState::default());

        let mut state = ViewState::default();
        state.set_search("zzz-nothing".to_string());
        let view = compute_view(&records, &state);

        assert!(view.records.is_empty());
        assert_eq!(view.facets, all.facets);
        assert_eq!(view.count_label(), "0 Notes Found");
    }

    #[test]
    fn test_missing_title_and_subject_never_fail() {
        let mut records = sample();
        records.push(rec("", "", None, ""));
        let mut state = ViewState::default();
        state.set_search("a".to_string());
        let view = compute_view(&records, &state);
        assert!(view.records.iter().all(|r| !r.title.is_empty()));
    }

    #[test]
    fn test_class_filter_uses_string_equality() {
        let records = sample();
        let mut state = ViewState::default();
        state.select_class(ClassFilter::Only("10".to_string()));

        let view = compute_view(&records, &state);
        assert_eq!(view.records.len(), 3);
        assert!(view
            .records
            .iter()
            .all(|r| r.standard.as_deref() == Some("10")));

        // "1" must not match "10"
        state.select_class(ClassFilter::Only("1".to_string()));
        assert!(compute_view(&records, &state).records.is_empty());
    }

    #[test]
    fn test_subject_filter_is_exact() {
        let records = sample();
        let mut state = ViewState::default();
        state.toggle_subject("Science".to_string());
        let view = compute_view(&records, &state);
        assert_eq!(view.records.len(), 2);

        state.toggle_subject("Science".to_string());
        assert_eq!(state.subject, None);

        state.toggle_subject("science".to_string());
        assert!(compute_view(&records, &state).records.is_empty());
    }

    #[test]
    fn test_toggle_class_clears_on_second_press() {
        let mut state = ViewState::default();
        state.toggle_class("9".to_string());
        assert_eq!(state.class_filter, ClassFilter::Only("9".to_string()));
        state.toggle_class("10".to_string());
        assert_eq!(state.class_filter, ClassFilter::Only("10".to_string()));
        state.toggle_class("10".to_string());
        assert_eq!(state.class_filter, ClassFilter::All);
    }

    #[test]
    fn test_sort_newest_and_oldest_with_bad_dates() {
        let records = sample();
        let mut state = ViewState::default();

        let view = compute_view(&records, &state);
        assert_eq!(
            titles(&view),
            vec![
                "Algebra Basics",
                "Chemical Reactions",
                "Light and Shadows",
                "Grammar Drill",
                "Our Constitution",
            ]
        );

        state.set_sort(SortOrder::Oldest);
        let view = compute_view(&records, &state);
        assert_eq!(titles(&view)[0], "Grammar Drill");
        assert_eq!(titles(&view)[3], "Algebra Basics");
        assert_eq!(view.records.len(), records.len());
    }

    #[test]
    fn test_sort_a_z_is_stable() {
        let records = vec![
            rec("beta", "Maths", None, ""),
            rec("Alpha", "Maths", None, ""),
            rec("alpha", "Science", None, ""),
            rec("Gamma", "Maths", None, ""),
        ];
        let mut state = ViewState::default();
        state.set_sort(SortOrder::AZ);
        let view = compute_view(&records, &state);
        assert_eq!(titles(&view), vec!["Alpha", "alpha", "beta", "Gamma"]);
        assert_eq!(view.records[1].subject, "Science");
    }

    #[test]
    fn test_facets_all_first_then_numeric_descending() {
        let mut records = sample();
        records.push(rec("No class", "Maths", None, ""));
        records.push(rec("Blank class", "Maths", Some("  "), ""));
        records.push(rec("Five", "Maths", Some("5"), ""));

        let facets = facet_classes(&records);
        assert_eq!(
            facets,
            vec![
                Facet::All,
                Facet::Class("10".to_string()),
                Facet::Class("9".to_string()),
                Facet::Class("6".to_string()),
                Facet::Class("5".to_string()),
            ]
        );
        assert_eq!(facets[1].label(), "Class 10");
    }

    #[test]
    fn test_empty_catalog_degrades() {
        let view = compute_view(&[], &ViewState::default());
        assert!(view.records.is_empty());
        assert_eq!(view.facets, vec![Facet::All]);
        assert!(!view.has_more(&ViewState::default()));
    }

    #[test]
    fn test_pagination_grows_and_resets() {
        let records: Vec<CatalogRecord> = (0..50)
            .map(|i| rec(&format!("Note {}", i), "Maths", Some("8"), "2024-01-01"))
            .collect();
        let mut state = ViewState::default();

        for k in 0..4 {
            let view = compute_view(&records, &state);
            assert_eq!(view.page(&state).len(), records.len().min(21 + 21 * k));
            assert_eq!(view.has_more(&state), 21 + 21 * k < records.len());
            state.load_more();
        }

        state.set_search("Note".to_string());
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more();
        state.set_sort(SortOrder::AZ);
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more();
        state.select_class(ClassFilter::Only("8".to_string()));
        assert_eq!(state.visible_count, PAGE_SIZE);
    }

    #[test]
    fn test_reselecting_same_value_keeps_loaded_pages() {
        let mut state = ViewState::default();
        state.load_more();
        state.load_more();

        state.set_sort(SortOrder::Newest);
        assert_eq!(state.visible_count, 63);

        state.select_class(ClassFilter::All);
        assert_eq!(state.visible_count, 63);

        state.set_search(String::new());
        assert_eq!(state.visible_count, 63);

        state.set_sort(SortOrder::Oldest);
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more();
        state.select_class(ClassFilter::Only("9".to_string()));
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more();
        state.select_class(ClassFilter::Only("9".to_string()));
        assert_eq!(state.visible_count, 42);
    }

    #[test]
    fn test_clear_filters_keeps_sort() {
        let mut state = ViewState::default();
        state.set_search("x".to_string());
        state.toggle_class("9".to_string());
        state.toggle_subject("Maths".to_string());
        state.set_sort(SortOrder::AZ);
        assert!(state.has_active_filters());
        assert_eq!(state.heading(), "Class 9");

        state.clear_filters();
        assert!(!state.has_active_filters());
        assert_eq!(state.sort, SortOrder::AZ);
        assert_eq!(state.heading(), "Recent Files");
    }

    #[test]
    fn test_view_state_serializes() {
        let mut state = ViewState::default();
        state.toggle_class("10".to_string());
        let json = serde_json::to_string(&state).unwrap();
        let restored: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
