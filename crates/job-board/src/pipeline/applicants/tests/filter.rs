use super::common::*;
use crate::pipeline::applicants::{ApplicationStatus, TransitionPolicy};
use crate::pipeline::query::{count_for_tab, filter, MemoizedFilter, Scope, Tab};
use std::sync::Arc;

#[test]
fn search_matches_position_and_job_title() {
    let store = sample_store(TransitionPolicy::Permissive);
    let result = filter(store.records(), &criteria(Tab::All, "software", Scope::All));

    assert_eq!(ids(&result), vec!["app-1", "app-2", "app-4", "app-7"]);
}

#[test]
fn search_is_case_insensitive_and_covers_skills() {
    let store = sample_store(TransitionPolicy::Permissive);
    let lower = filter(store.records(), &criteria(Tab::All, "react", Scope::All));
    let upper = filter(store.records(), &criteria(Tab::All, "REACT", Scope::All));

    assert_eq!(ids(&lower), vec!["app-1", "app-2"]);
    assert_eq!(ids(&lower), ids(&upper));
}

#[test]
fn blank_search_admits_everything() {
    let store = sample_store(TransitionPolicy::Permissive);
    let result = filter(store.records(), &criteria(Tab::All, "   ", Scope::All));
    assert_eq!(result.len(), store.len());
}

#[test]
fn tab_search_and_scope_combine() {
    let store = sample_store(TransitionPolicy::Permissive);

    let shortlisted = filter(
        store.records(),
        &criteria(Tab::Only(ApplicationStatus::Shortlisted), "", Scope::All),
    );
    assert_eq!(ids(&shortlisted), vec!["app-2", "app-7"]);

    let scoped = filter(
        store.records(),
        &criteria(
            Tab::Only(ApplicationStatus::Shortlisted),
            "java",
            Scope::from("job-1"),
        ),
    );
    assert_eq!(ids(&scoped), vec!["app-7"]);

    let other_job = filter(
        store.records(),
        &criteria(Tab::All, "", Scope::from("job-2")),
    );
    assert_eq!(ids(&other_job), vec!["app-3", "app-6"]);

    let nothing = filter(
        store.records(),
        &criteria(Tab::Only(ApplicationStatus::Hired), "", Scope::from("job-1")),
    );
    assert!(nothing.is_empty());
}

#[test]
fn filtering_is_idempotent_and_order_preserving() {
    let store = sample_store(TransitionPolicy::Permissive);
    let selection = criteria(Tab::All, "engineer", Scope::All);

    let once = filter(store.records(), &selection);
    let twice = filter(&once, &selection);

    assert_eq!(ids(&once), ids(&twice));
    assert!(once.iter().zip(twice.iter()).all(|(a, b)| Arc::ptr_eq(a, b)));

    let positions: Vec<usize> = once
        .iter()
        .map(|record| {
            store
                .records()
                .iter()
                .position(|candidate| Arc::ptr_eq(candidate, record))
                .expect("filtered record comes from the store")
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn sentinel_strings_parse_to_all() {
    assert_eq!("all".parse::<Tab<ApplicationStatus>>(), Ok(Tab::All));
    assert_eq!(
        "interview".parse::<Tab<ApplicationStatus>>(),
        Ok(Tab::Only(ApplicationStatus::Interview))
    );
    assert!("archived".parse::<Tab<ApplicationStatus>>().is_err());
    assert_eq!(Scope::from("all"), Scope::All);
    assert_eq!(Scope::from("job-3"), Scope::Only("job-3".to_string()));
}

#[test]
fn tab_counts_cover_every_record() {
    let store = sample_store(TransitionPolicy::Permissive);
    let records = store.records();

    let per_status: usize = ApplicationStatus::ordered()
        .into_iter()
        .map(|status| count_for_tab(records, Tab::Only(status)))
        .sum();
    assert_eq!(per_status, count_for_tab(records, Tab::All));
    assert_eq!(count_for_tab(records, Tab::All), 8);
}

#[test]
fn memoized_filter_recomputes_after_store_changes() {
    let mut store = sample_store(TransitionPolicy::Permissive);
    let mut memo = MemoizedFilter::new();
    let selection = criteria(Tab::Only(ApplicationStatus::Pending), "", Scope::All);

    let first: Vec<_> = memo
        .get(store.version(), store.records(), &selection)
        .to_vec();
    assert_eq!(ids(&first), vec!["app-1", "app-6"]);

    let cached = memo.get(store.version(), store.records(), &selection);
    assert!(Arc::ptr_eq(&first[0], &cached[0]));

    store.update_status(&id("app-1"), ApplicationStatus::Reviewed);
    let refreshed = memo.get(store.version(), store.records(), &selection);
    assert_eq!(ids(refreshed), vec!["app-6"]);

    let broader = criteria(Tab::All, "", Scope::All);
    assert_eq!(memo.get(store.version(), store.records(), &broader).len(), 8);
}
