//! Weights for pallet-clad-compliance.
//!
//! Hand-estimated; regenerate from `benchmarking.rs` before production use. Batch calls
//! scale linearly with the number of accounts.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet-clad-compliance.
pub trait WeightInfo {
    fn create_policy() -> Weight;
    fn set_whitelist_required() -> Weight;
    fn set_whitelist(n: u32) -> Weight;
    fn set_blacklist(n: u32) -> Weight;
}

impl WeightInfo for () {
    /// Storage: `CladCompliance::NextPolicyId` (r:1 w:1), `CladCompliance::Policies` (r:0 w:1)
    fn create_policy() -> Weight {
        Weight::from_parts(15_000_000, 1_500)
            .saturating_add(RocksDbWeight::get().reads(1_u64))
            .saturating_add(RocksDbWeight::get().writes(2_u64))
    }
    /// Storage: `CladCompliance::Policies` (r:1 w:1)
    fn set_whitelist_required() -> Weight {
        Weight::from_parts(12_000_000, 3_500)
            .saturating_add(RocksDbWeight::get().reads(1_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
    /// Storage: `CladCompliance::Policies` (r:1 w:0), `CladCompliance::Whitelist` (r:0 w:n),
    /// `CladCompliance::Blacklist` (r:0 w:n)
    fn set_whitelist(n: u32) -> Weight {
        Weight::from_parts(10_000_000, 3_500)
            .saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(1_u64))
            .saturating_add(RocksDbWeight::get().writes((2_u64).saturating_mul(n.into())))
    }
    /// Storage: `CladCompliance::Policies` (r:1 w:0), `CladCompliance::Blacklist` (r:0 w:n),
    /// `CladCompliance::Whitelist` (r:0 w:n)
    fn set_blacklist(n: u32) -> Weight {
        Weight::from_parts(10_000_000, 3_500)
            .saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(n.into()))
            .saturating_add(RocksDbWeight::get().reads(1_u64))
            .saturating_add(RocksDbWeight::get().writes((2_u64).saturating_mul(n.into())))
    }
}
