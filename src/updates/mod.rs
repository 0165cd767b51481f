//! Update checking.
//!
//! This module provides:
//! - Version comparison against the registry's latest release
//! - Registry lookup over HTTP
//! - Local version discovery
//! - The throttled [`UpdateChecker`] that ties them together

pub mod checker;
pub mod clock;
pub mod provider;
pub mod registry;
pub mod version;

pub use checker::{
    plan_check, CheckOutcome, CheckPlan, CheckStatus, UpdateChecker, UpdateResult,
    THROTTLE_WINDOW_MS,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use provider::{extract_version, CommandVersionProvider, StaticVersion, VersionProvider};
pub use registry::{parse_latest, FetchError, NpmRegistry, RegistryClient};
pub use version::{is_update_needed, VERSION};
