//! Property-based tests for threatwatch
//!
//! Property tests verify invariants that hold for all inputs, using the
//! proptest framework.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `severity_props`: severity tiers and category glyphs
//!   - `tier_for` is total and idempotent
//!   - Unknown labels map to `Safe` / the fallback glyph
//!
//! - `tally_props`: overview card counts
//!   - Counts never exceed the record count
//!   - Sum equals records minus `Safe` records
//!
//! - `dashboard_props`: selection and reload
//!   - Selecting a known id shows exactly that record
//!   - Unknown ids leave the state untouched
//!   - Replacing the list keeps the selection snapshot
//!
//! ## Configuration
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod dashboard_props;
mod severity_props;
mod tally_props;
