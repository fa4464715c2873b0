use crate as pallet_clad_token;
use clad_primitives::{FactoryId, ImplementationSlot, LedgerInit, LedgerInstantiator};
use frame_support::{assert_ok, derive_impl, parameter_types};
use sp_core::H256;
use sp_runtime::{traits::IdentityLookup, BuildStorage};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Access: pallet_clad_access,
        Compliance: pallet_clad_compliance,
        Token: pallet_clad_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
}

impl pallet_clad_access::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

impl pallet_clad_compliance::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

/// The only slot that exists in this runtime.
pub const SLOT: FactoryId = 7;

parameter_types! {
    pub StandardImplementation: H256 = H256::repeat_byte(1);
    pub storage SlotContent: H256 = H256::repeat_byte(1);
}

/// A single mutable slot standing in for the factory pallet.
pub struct MockSlot;
impl ImplementationSlot<H256> for MockSlot {
    fn implementation(slot: FactoryId) -> Option<H256> {
        (slot == SLOT).then(SlotContent::get)
    }
}

impl pallet_clad_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Roles = Access;
    type Compliance = Compliance;
    type Slot = MockSlot;
    type Implementations = pallet_clad_token::StandardOnly<StandardImplementation>;
    type WeightInfo = ();
}

pub const ADMIN: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CHARLIE: u64 = 4;
pub const POLICY_OWNER: u64 = 9;

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}

pub fn init(admin: u64, compliance: Option<u32>) -> LedgerInit<u64> {
    LedgerInit {
        name: b"Sovereign Bond".to_vec(),
        symbol: b"SBT".to_vec(),
        decimals: 6,
        admin,
        compliance,
    }
}

/// Create and initialize a ledger administered by `ADMIN`, without a policy.
pub fn new_ledger() -> u32 {
    <Token as LedgerInstantiator<u64>>::instantiate(SLOT, init(ADMIN, None))
        .expect("slot resolves")
}

/// Create a ledger bound to a fresh policy owned by `POLICY_OWNER`.
///
/// The policy is created first, bound to the account the next ledger will get.
pub fn new_ledger_with_policy() -> (u32, u32) {
    let ledger = pallet_clad_token::NextLedgerId::<Test>::get();
    let policy = Compliance::do_create_policy(Token::ledger_account(ledger), POLICY_OWNER)
        .expect("non-null accounts");
    let created = <Token as LedgerInstantiator<u64>>::instantiate(SLOT, init(ADMIN, Some(policy)))
        .expect("slot resolves");
    assert_eq!(created, ledger);
    (ledger, policy)
}

/// Mint as `ADMIN`.
pub fn mint_to(ledger: u32, to: u64, amount: u128) {
    assert_ok!(Token::mint(RuntimeOrigin::signed(ADMIN), ledger, to, amount));
}
