//! Weights for pallet-clad-factory.
//!
//! Hand-estimated until benchmark output replaces them.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet-clad-factory.
pub trait WeightInfo {
    fn create_factory() -> Weight;
    fn create_instance() -> Weight;
    fn upgrade_implementation() -> Weight;
}

impl WeightInfo for () {
    /// Storage: `CladFactory::NextFactoryId` (r:1 w:1), `CladFactory::Factories` (r:0 w:1),
    /// `CladAccess::Roles` (r:3 w:3)
    fn create_factory() -> Weight {
        Weight::from_parts(30_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(4_u64))
            .saturating_add(RocksDbWeight::get().writes(5_u64))
    }
    /// Storage: `CladFactory::Factories` (r:2 w:0), `CladAccess::Roles` (r:6 w:5),
    /// `CladToken::NextLedgerId` (r:1 w:1), `CladToken::Ledgers` (r:1 w:1),
    /// `CladToken::Metadata` (r:0 w:1)
    fn create_instance() -> Weight {
        Weight::from_parts(70_000_000, 6_000)
            .saturating_add(RocksDbWeight::get().reads(10_u64))
            .saturating_add(RocksDbWeight::get().writes(8_u64))
    }
    /// Storage: `CladFactory::Factories` (r:1 w:1), `CladAccess::Roles` (r:1 w:0)
    fn upgrade_implementation() -> Weight {
        Weight::from_parts(15_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(2_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
}
