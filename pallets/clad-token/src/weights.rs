//! Weights for pallet-clad-token.
//!
//! Hand-estimated. Every call reads the ledger and its implementation slot; balance
//! changes add up to three compliance screens (policy, blacklist, whitelist each).

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

/// Weight functions needed for pallet-clad-token.
pub trait WeightInfo {
    fn initialize() -> Weight;
    fn set_metadata() -> Weight;
    fn set_compliance() -> Weight;
    fn set_paused() -> Weight;
    fn mint() -> Weight;
    fn burn() -> Weight;
    fn transfer() -> Weight;
    fn transfer_from() -> Weight;
    fn approve() -> Weight;
}

impl WeightInfo for () {
    /// Storage: `CladToken::Ledgers` (r:1 w:1), `CladToken::Metadata` (r:0 w:1),
    /// `CladAccess::Roles` (r:5 w:5)
    fn initialize() -> Weight {
        Weight::from_parts(40_000_000, 4_000)
            .saturating_add(RocksDbWeight::get().reads(7_u64))
            .saturating_add(RocksDbWeight::get().writes(7_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:1 w:0), `CladToken::Metadata` (r:1 w:1),
    /// `CladAccess::Roles` (r:1 w:0)
    fn set_metadata() -> Weight {
        Weight::from_parts(18_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(4_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:2 w:1), `CladAccess::Roles` (r:1 w:0)
    fn set_compliance() -> Weight {
        Weight::from_parts(16_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(4_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:2 w:1), `CladAccess::Roles` (r:1 w:0)
    fn set_paused() -> Weight {
        Weight::from_parts(15_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(4_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:2 w:1), `CladToken::Balances` (r:1 w:1),
    /// `CladAccess::Roles` (r:1 w:0), compliance (r:6 w:0)
    fn mint() -> Weight {
        Weight::from_parts(30_000_000, 6_000)
            .saturating_add(RocksDbWeight::get().reads(11_u64))
            .saturating_add(RocksDbWeight::get().writes(2_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:2 w:1), `CladToken::Balances` (r:1 w:1),
    /// `CladAccess::Roles` (r:1 w:0), compliance (r:6 w:0)
    fn burn() -> Weight {
        Weight::from_parts(30_000_000, 6_000)
            .saturating_add(RocksDbWeight::get().reads(11_u64))
            .saturating_add(RocksDbWeight::get().writes(2_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:2 w:0), `CladToken::Balances` (r:2 w:2),
    /// compliance (r:6 w:0)
    fn transfer() -> Weight {
        Weight::from_parts(32_000_000, 6_000)
            .saturating_add(RocksDbWeight::get().reads(11_u64))
            .saturating_add(RocksDbWeight::get().writes(2_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:2 w:0), `CladToken::Allowances` (r:1 w:1),
    /// `CladToken::Balances` (r:3 w:2), compliance (r:9 w:0)
    fn transfer_from() -> Weight {
        Weight::from_parts(40_000_000, 7_000)
            .saturating_add(RocksDbWeight::get().reads(16_u64))
            .saturating_add(RocksDbWeight::get().writes(3_u64))
    }
    /// Storage: `CladToken::Ledgers` (r:2 w:0), `CladToken::Allowances` (r:0 w:1)
    fn approve() -> Weight {
        Weight::from_parts(14_000_000, 3_600)
            .saturating_add(RocksDbWeight::get().reads(3_u64))
            .saturating_add(RocksDbWeight::get().writes(1_u64))
    }
}
