//! Property-based tests for dashboard selection
//!
//! Tests invariants:
//! - Selecting a listed id shows exactly that record in the analysis panel
//! - Selecting an unlisted id changes nothing
//! - Replacing the list never clears or alters the selection

use proptest::prelude::*;

use crate::core::dashboard::{AnalysisDetails, AnalysisPanel, DashboardEvent, DashboardState};
use crate::core::threat::Severity;
use crate::tests::common::{arb_records, create_test_record};

proptest! {
    #[test]
    fn prop_select_shows_exactly_that_record(
        (records, pick) in arb_records(20)
            .prop_filter("non-empty", |r| !r.is_empty())
            .prop_flat_map(|r| { let len = r.len(); (Just(r), 0..len) })
    ) {
        let target = records[pick].clone();
        let state = DashboardState::new(records).apply(DashboardEvent::Select(target.id.clone()));

        prop_assert_eq!(state.selected(), Some(&target));
        prop_assert_eq!(
            state.analysis(),
            AnalysisPanel::Details(AnalysisDetails::from_record(&target))
        );
    }

    #[test]
    fn prop_unknown_id_is_noop(records in arb_records(20), id in "[a-z]{1,8}") {
        // Generated ids are numeric, so alphabetic ids never match
        let state = DashboardState::new(records);
        let after = state.clone().apply(DashboardEvent::Select(id));
        prop_assert_eq!(after, state);
    }

    #[test]
    fn prop_replace_keeps_selection(
        first in arb_records(10).prop_filter("non-empty", |r| !r.is_empty()),
        second in arb_records(10),
    ) {
        let target = first[0].clone();
        let state = DashboardState::new(first)
            .apply(DashboardEvent::Select(target.id.clone()))
            .apply(DashboardEvent::Replace(second.clone()));

        prop_assert_eq!(state.threats(), second.as_slice());
        prop_assert_eq!(state.selected(), Some(&target));
    }
}

#[test]
fn test_later_select_overrides_earlier() {
    let records = vec![
        create_test_record("a", Severity::High),
        create_test_record("b", Severity::Low),
    ];
    let state = DashboardState::new(records)
        .apply(DashboardEvent::Select("a".into()))
        .apply(DashboardEvent::Select("b".into()));
    assert_eq!(state.selected().map(|t| t.id.as_str()), Some("b"));
}
