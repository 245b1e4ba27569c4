use github_user_search::query::{build_query, TERM_SEPARATOR};
use github_user_search::SearchFilters;

fn single_field_cases() -> Vec<SearchFilters> {
    vec![
        SearchFilters::default().with_username("octocat"),
        SearchFilters::default().with_location("Nairobi"),
        SearchFilters::default().with_min_repositories(0),
        SearchFilters::default().with_min_repositories(250),
        SearchFilters::default().with_username("  padded  "),
    ]
}

#[test]
fn one_field_yields_one_term_without_stray_separators() {
    for filters in single_field_cases() {
        let query = build_query(&filters);
        let q = query.as_str();
        assert!(!q.is_empty(), "{filters:?}");
        assert!(!q.contains(TERM_SEPARATOR), "{filters:?} -> {q}");
        assert_eq!(q, q.trim());
    }
}

#[test]
fn term_order_does_not_depend_on_construction_order() {
    let a = SearchFilters::default()
        .with_username("grace")
        .with_location("Arlington")
        .with_min_repositories(5);
    let b = SearchFilters::default()
        .with_min_repositories(5)
        .with_location("Arlington")
        .with_username("grace");
    let c = SearchFilters::from_input("grace", "Arlington", "5").unwrap();

    let expected = "grace+location:Arlington+repos:>5";
    for filters in [a, b, c] {
        assert_eq!(build_query(&filters).as_str(), expected);
    }
}

#[test]
fn empty_filters_build_an_empty_query() {
    assert_eq!(build_query(&SearchFilters::default()).as_str(), "");
}

#[test]
fn form_input_round_trips_into_the_documented_query() {
    let filters = SearchFilters::from_input("", "Berlin", "50").unwrap();
    assert_eq!(build_query(&filters).as_str(), "location:Berlin+repos:>50");
}
