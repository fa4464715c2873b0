//! Weights for pallet-clad-access.
//!
//! Hand-estimated until benchmark output replaces them.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet-clad-access.
pub trait WeightInfo {
    fn grant_role() -> Weight;
    fn revoke_role() -> Weight;
}

impl WeightInfo for () {
    fn grant_role() -> Weight {
        Weight::from_parts(12_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(2_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
    fn revoke_role() -> Weight {
        Weight::from_parts(12_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(2_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
}
