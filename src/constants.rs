//! Application-wide constants
//!
//! Naming conventions for test files and the defaults used when the
//! environment does not override them.

// =============================================================================
// TEST FILE CONVENTIONS
// =============================================================================

/// Extension of the input half of a test pair (`<name>.in`)
pub const INPUT_EXTENSION: &str = "in";

/// Extension of the expected-output half of a test pair (`<name>.out`)
pub const OUTPUT_EXTENSION: &str = "out";

// =============================================================================
// RUN DEFAULTS
// =============================================================================

/// Default tests directory, relative to the working directory
pub const DEFAULT_TESTS_DIR: &str = "tests";

/// Extension of the executable located by `--auto`
pub const DEFAULT_AUTO_EXTENSION: &str = "exe";

/// Wall-clock time after which a case counts as overtime (milliseconds)
pub const DEFAULT_OVERTIME_MS: u64 = 1000;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "thetacheck=warn";

// =============================================================================
// COMPARISON
// =============================================================================

/// Decimal digits the numeric difference is rounded to before comparison
pub const NUMERIC_ROUND_DIGITS: i32 = 10;

/// Decimal digits kept when printing per-case timings
pub const TIMING_REPORT_DIGITS: i32 = 4;

/// Placeholder shown in verbose output when no expected output exists
pub const NO_EXPECTED_PLACEHOLDER: &str = "[[None given]]";
