//! Full stack: access control, compliance, ledgers and factories wired together.

use crate as pallet_clad_factory;
use clad_primitives::{Balance, LedgerId};
use frame_support::{derive_impl, parameter_types};
use pallet_clad_token::{LedgerImplementation, ResolveImplementation, StandardOnly};
use sp_core::H256;
use sp_runtime::{traits::IdentityLookup, BuildStorage, DispatchError, DispatchResult};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Access: pallet_clad_access,
        Compliance: pallet_clad_compliance,
        Token: pallet_clad_token,
        Factory: pallet_clad_factory,
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

parameter_types! {
    pub StandardV1: H256 = H256::repeat_byte(1);
    pub StrictV2: H256 = H256::repeat_byte(2);
}

/// Rejects zero-amount transfers
pub const ZERO_TRANSFER: DispatchError = DispatchError::Other("zero-amount transfer");

/// Second-generation behaviour: the standard ledger, minus zero-amount transfers.
pub struct StrictLedger;

impl LedgerImplementation<Test> for StrictLedger {
    fn version(&self) -> u32 {
        2
    }

    fn transfer(&self, ledger: LedgerId, who: &u64, to: u64, amount: Balance) -> DispatchResult {
        if amount == 0 {
            return Err(ZERO_TRANSFER);
        }
        Token::do_transfer(ledger, who, to, amount)
    }
}

pub struct StrictOnly;

impl ResolveImplementation<Test> for StrictOnly {
    fn resolve(implementation: &H256) -> Option<Box<dyn LedgerImplementation<Test>>> {
        if *implementation == StrictV2::get() {
            Some(Box::new(StrictLedger))
        } else {
            None
        }
    }
}

impl pallet_clad_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Roles = Access;
    type Compliance = Compliance;
    type Slot = Factory;
    type Implementations = (StandardOnly<StandardV1>, StrictOnly);
    type WeightInfo = ();
}

impl pallet_clad_factory::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type FactoryOrigin = frame_system::EnsureSigned<u64>;
    type Roles = Access;
    type Ledgers = Token;
    type WeightInfo = ();
}

/// Holds every role on factory 0.
pub const FACTORY_ADMIN: u64 = 1;
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

/// Factory 0 is built at genesis on `StandardV1`, administered by `FACTORY_ADMIN`.
pub fn new_test_ext_with_factory() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_clad_factory::GenesisConfig::<Test> {
        factories: vec![(StandardV1::get(), FACTORY_ADMIN)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// Create a ledger from factory 0 as `FACTORY_ADMIN`, administered by `admin`.
pub fn create_instance(admin: u64, compliance: Option<u32>) -> LedgerId {
    Factory::do_create_instance(
        0,
        &FACTORY_ADMIN,
        clad_primitives::LedgerInit {
            name: b"Sovereign Bond".to_vec(),
            symbol: b"SBT".to_vec(),
            decimals: 6,
            admin,
            compliance,
        },
    )
    .expect("factory 0 exists and FACTORY_ADMIN deploys")
}
