//! Property-based tests for severity tiers and category glyphs
//!
//! Tests invariants:
//! - `tier_for` is total and idempotent
//! - Labels outside the alert set fall back to `Safe`
//! - Category labels outside the known set get the fallback glyph

use proptest::prelude::*;

use crate::core::threat::{Glyph, Severity, ThreatCategory};
use crate::tests::common::arb_severity;

const KNOWN_SEVERITIES: [&str; 4] = ["critical", "high", "medium", "low"];
const KNOWN_CATEGORIES: [&str; 4] = ["malware", "ddos", "network", "ids"];

proptest! {
    #[test]
    fn prop_tier_for_is_idempotent(label in ".{0,24}") {
        let tier = Severity::tier_for(&label);
        prop_assert_eq!(Severity::tier_for(tier.as_str()), tier);
    }

    #[test]
    fn prop_unknown_severity_is_safe(label in "[a-zA-Z]{0,16}") {
        prop_assume!(!KNOWN_SEVERITIES.contains(&label.as_str()));
        prop_assert_eq!(Severity::tier_for(&label), Severity::Safe);
    }

    #[test]
    fn prop_severity_label_roundtrips(severity in arb_severity()) {
        prop_assert_eq!(Severity::tier_for(severity.as_str()), severity);
        prop_assert_eq!(severity.as_str().parse::<Severity>(), Ok(severity));
    }

    #[test]
    fn prop_unknown_category_gets_fallback_glyph(label in ".{0,24}") {
        prop_assume!(!KNOWN_CATEGORIES.contains(&label.to_lowercase().as_str()));
        prop_assert_eq!(Glyph::for_category(&label), Glyph::Activity);
        prop_assert_eq!(ThreatCategory::from(label).glyph(), Glyph::Activity);
    }

    #[test]
    fn prop_lenient_severity_never_fails(label in ".{0,24}") {
        let json = serde_json::to_string(&label).unwrap();
        prop_assert!(serde_json::from_str::<Severity>(&json).is_ok());
    }
}
