use crate as pallet_clad_compliance;
use frame_support::derive_impl;
use sp_runtime::{traits::IdentityLookup, BuildStorage};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Compliance: pallet_clad_compliance,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
}

impl pallet_clad_compliance::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

/// Stand-in for a ledger's sovereign account.
pub const LEDGER: u64 = 100;
pub const OTHER_LEDGER: u64 = 200;

pub const OWNER: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CHARLIE: u64 = 4;

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// Create the first policy (id 0), bound to `LEDGER` and owned by `OWNER`.
pub fn new_policy() -> u32 {
    assert_eq!(pallet_clad_compliance::NextPolicyId::<Test>::get(), 0);
    frame_support::assert_ok!(Compliance::create_policy(RuntimeOrigin::signed(OWNER), LEDGER, OWNER));
    0
}
