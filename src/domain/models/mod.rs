pub mod access_tier;
pub mod object;
pub mod run;
pub mod tier_policy;

pub use access_tier::AccessTier;
pub use object::StorageObjectRef;
pub use run::{DEFAULT_MAX_OBJECTS, RunConfig, RunSummary, Selection};
pub use tier_policy::TierPolicy;
