//! Property-based tests for the overview tally
//!
//! Tests invariants:
//! - Each count is bounded by the number of records
//! - The four counts sum to the records that are not `Safe`
//! - Order of records does not matter

use proptest::prelude::*;

use crate::core::tally::SeverityTally;
use crate::core::threat::Severity;
use crate::tests::common::arb_records;

proptest! {
    #[test]
    fn prop_total_is_records_minus_safe(records in arb_records(40)) {
        let tally = SeverityTally::from_records(&records);
        let safe = records.iter().filter(|r| r.severity == Severity::Safe).count();
        prop_assert!(tally.total() <= records.len());
        prop_assert_eq!(tally.total(), records.len() - safe);
    }

    #[test]
    fn prop_count_matches_filter(records in arb_records(40)) {
        let tally = SeverityTally::from_records(&records);
        for severity in Severity::TALLIED {
            let expected = records.iter().filter(|r| r.severity == severity).count();
            prop_assert_eq!(tally.count(severity), expected);
        }
        prop_assert_eq!(tally.count(Severity::Safe), 0);
    }

    #[test]
    fn prop_tally_ignores_order(mut records in arb_records(40)) {
        let before = SeverityTally::from_records(&records);
        records.reverse();
        prop_assert_eq!(SeverityTally::from_records(&records), before);
    }
}
