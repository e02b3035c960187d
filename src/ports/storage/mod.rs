mod tier_store;

pub use tier_store::TierStore;
