//! End-to-end behaviour of the filter and sort pipeline.

use auditlog_seeker::{
    filter, process, sort, AuditAction, AuditLogEntry, Evaluator, Mask, Property, SortOrder,
    UserInfo,
};
use chrono::{TimeZone, Utc};

// ============================================================================
// Fixtures
// ============================================================================

fn user(first: Option<&str>, last: Option<&str>, username: &str) -> UserInfo {
    UserInfo {
        username: Some(username.to_string()),
        user_id: Some(format!("id-{username}")),
        first_name: first.map(str::to_string),
        last_name: last.map(str::to_string),
        email: Some(format!("{username}@example.com")),
    }
}

fn history() -> Vec<AuditLogEntry> {
    let at = |day: u32, hour: u32| Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap();
    vec![
        AuditLogEntry::new(AuditAction::ExperimentCreated)
            .with_user(user(Some("Jane"), Some("Doe"), "jdoe"))
            .with_experiment("exp-1", "Checkout Flow")
            .with_application("shop")
            .with_time(at(5, 4)),
        AuditLogEntry::new(AuditAction::BucketCreated)
            .with_user(user(Some("bob"), Some("Stone"), "bstone"))
            .with_experiment("exp-1", "Checkout Flow")
            .with_bucket("control")
            .with_application("shop")
            .with_time(at(4, 9)),
        AuditLogEntry::new(AuditAction::ExperimentChanged)
            .with_user(user(None, Some("Anon"), "anon"))
            .with_experiment("exp-2", "Search, Ranking")
            .with_application("search")
            .with_change("state", Some("DRAFT"), Some("RUNNING"))
            .with_time(at(3, 14)),
        AuditLogEntry::new(AuditAction::BucketCreated)
            .with_user(user(Some("Alice"), None, "alice"))
            .with_experiment("exp-2", "Search, Ranking")
            .with_bucket("treatment")
            .with_application("search")
            .with_time(at(2, 23)),
    ]
}

fn usernames(entries: &[AuditLogEntry]) -> Vec<&str> {
    entries
        .iter()
        .map(|e| e.user.username.as_deref().unwrap_or("-"))
        .collect()
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn blank_mask_and_order_return_input() {
    assert_eq!(process(history(), "", ""), history());
}

#[test]
fn default_order_is_not_resorted() {
    let mut shuffled = history();
    shuffled.swap(0, 3);
    assert_eq!(process(shuffled.clone(), "", "-time"), shuffled);
    assert_eq!(sort(shuffled.clone(), "-time"), shuffled);
}

#[test]
fn action_filter_keeps_relative_order() {
    let result = filter(history(), "action=bucket_created");
    assert_eq!(usernames(&result), vec!["bstone", "alice"]);
}

#[test]
fn field_tokens_combine_with_and() {
    let result = filter(history(), "app=search,action=bucket");
    assert_eq!(usernames(&result), vec!["alice"]);
}

#[test]
fn commas_inside_values_are_literal() {
    let result = filter(history(), "experiment=search, ranking");
    assert_eq!(usernames(&result), vec!["anon", "alice"]);

    let result = filter(history(), "experiment=search, ranking,bucket=treat");
    assert_eq!(usernames(&result), vec!["alice"]);
}

#[test]
fn full_text_searches_every_field() {
    assert_eq!(usernames(&filter(history(), "stone")), vec!["bstone"]);
    assert_eq!(usernames(&filter(history(), "EXP-2")), vec!["anon", "alice"]);
    assert_eq!(usernames(&filter(history(), "started")), vec!["anon"]);
}

#[test]
fn full_text_combines_with_field_tokens() {
    let result = filter(history(), "checkout,action=created");
    assert_eq!(usernames(&result), vec!["jdoe", "bstone"]);
}

#[test]
fn negated_full_text() {
    let result = filter(history(), "\\-checkout");
    assert_eq!(usernames(&result), vec!["anon", "alice"]);
}

#[test]
fn negated_field_token() {
    let result = filter(history(), "app=\\-shop");
    assert_eq!(usernames(&result), vec!["anon", "alice"]);

    let result = filter(history(), "bucket=\\-control");
    assert_eq!(usernames(&result), vec!["jdoe", "anon", "alice"]);
}

#[test]
fn time_filter_honours_offset() {
    // 04:00 UTC is 09:00 in UTC+5; 09:00 UTC is 14:00.
    let result = filter(history(), "time={+0500}09:00");
    assert_eq!(usernames(&result), vec!["jdoe"]);

    let result = filter(history(), "time=09:00");
    assert_eq!(usernames(&result), vec!["bstone"]);
}

#[test]
fn fullname_matches_joined_names() {
    assert_eq!(usernames(&filter(history(), "fullname=jane doe")), vec!["jdoe"]);
    assert_eq!(usernames(&filter(history(), "user=bob st")), vec!["bstone"]);
}

#[test]
fn unknown_key_matches_nothing() {
    assert!(filter(history(), "nickname=j").is_empty());
}

#[test]
fn two_equals_anywhere_empties_result() {
    assert!(process(history(), "app=shop,bucket=a=b", "firstname").is_empty());
    assert!(process(history(), "x=y=z", "").is_empty());
    assert!(process(history(), "checkout,attr=state=1", "").is_empty());
}

#[test]
fn token_without_value_is_ignored() {
    assert_eq!(filter(history(), "app=").len(), history().len());
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn sort_by_first_name_puts_missing_last() {
    let result = sort(history(), "firstname");
    assert_eq!(usernames(&result), vec!["alice", "bstone", "jdoe", "anon"]);

    let result = sort(history(), "-firstname");
    assert_eq!(usernames(&result), vec!["jdoe", "bstone", "alice", "anon"]);
}

#[test]
fn sort_by_time_ascending() {
    let result = sort(history(), "time");
    assert_eq!(usernames(&result), vec!["alice", "anon", "bstone", "jdoe"]);
}

#[test]
fn multi_key_sort() {
    let result = sort(history(), "app,-time");
    assert_eq!(usernames(&result), vec!["anon", "alice", "jdoe", "bstone"]);
}

#[test]
fn ties_keep_input_order() {
    let result = sort(history(), "experiment");
    assert_eq!(usernames(&result), vec!["jdoe", "bstone", "anon", "alice"]);
}

#[test]
fn sort_by_description() {
    let result = sort(history(), "desc");
    // created bucket control, created bucket treatment, created experiment,
    // started experiment
    assert_eq!(usernames(&result), vec!["bstone", "alice", "jdoe", "anon"]);
}

#[test]
fn filter_then_sort() {
    let result = process(history(), "action=created", "-username");
    assert_eq!(usernames(&result), vec!["jdoe", "bstone", "alice"]);
}

// ============================================================================
// Parsed forms
// ============================================================================

#[test]
fn parsed_mask_and_order_can_be_reused() {
    let mask = Mask::parse("app=shop").unwrap();
    let order = SortOrder::parse("-bucket");
    let evaluator = Evaluator::new();

    let mut entries: Vec<_> = history()
        .into_iter()
        .filter(|e| evaluator.matches_mask(e, &mask))
        .collect();
    order.sort(&mut entries);

    assert_eq!(usernames(&entries), vec!["bstone", "jdoe"]);
    assert_eq!(order.terms()[0].property, Property::Bucket);
}
