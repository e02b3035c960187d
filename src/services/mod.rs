mod object_provider;
mod tier_pipeline;
mod transition_executor;

pub use object_provider::ObjectProvider;
pub use tier_pipeline::{TierPipeline, TierRunError};
pub use transition_executor::{FixOutcome, TransitionExecutor};
