//! Ledger instance factories.
//!
//! A factory owns one shared implementation slot: a cell holding the hash of the ledger
//! behaviour in force. Every ledger the factory creates is bound to that slot and reads
//! it on each call, so [`Pallet::upgrade_implementation`] changes all of them at once.
//!
//! Roles on a factory (`AdminGrantor`, `Deployer`, `Upgrader`) are scoped by the
//! factory's sovereign account. They confer nothing on the ledgers it creates: only the
//! admin named at creation holds roles there.

#![cfg_attr(not(feature = "std"), no_std)]
// `Config` still declares `RuntimeEvent` explicitly.
#![allow(deprecated)]

use clad_primitives::{
    account_from_digest, is_null_account, FactoryId, ImplementationSlot, LedgerId, LedgerInit,
    LedgerInstantiator, PolicyId, Role, RoleStore,
};
use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::EnsureOrigin};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::Hash as HashT;
use sp_std::prelude::*;

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

const LOG_TARGET: &str = "runtime::clad-factory";

/// Domain tag hashed with the factory id to derive its sovereign account.
const FACTORY_ACCOUNT_TAG: &[u8; 12] = b"clad/factory";

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[derive(Clone, Encode, Decode, PartialEq, Eq, Debug, TypeInfo, MaxEncodedLen)]
    pub struct FactoryDetails<Hash> {
        /// Implementation every instance of this factory dispatches to.
        pub implementation: Hash,
    }

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Who may construct factories.
        type FactoryOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        type Roles: RoleStore<Self::AccountId>;

        /// Allocates and initializes ledgers bound to a factory's slot.
        type Ledgers: LedgerInstantiator<Self::AccountId>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Id handed to the next factory created
    #[pallet::storage]
    pub type NextFactoryId<T> = StorageValue<_, FactoryId, ValueQuery>;

    /// The shared implementation slot of each factory
    #[pallet::storage]
    pub type Factories<T: Config> =
        StorageMap<_, Blake2_128Concat, FactoryId, FactoryDetails<T::Hash>, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        FactoryCreated { factory: FactoryId, implementation: T::Hash, admin: T::AccountId },
        /// A ledger was created and initialized from the factory
        InstanceCreated {
            factory: FactoryId,
            ledger: LedgerId,
            name: Vec<u8>,
            symbol: Vec<u8>,
            decimals: u8,
            admin: T::AccountId,
            compliance: Option<PolicyId>,
        },
        /// The shared implementation changed for every instance of the factory
        ImplementationUpgraded { factory: FactoryId, old: T::Hash, new: T::Hash },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The implementation is the null hash.
        InvalidImplementation,
        /// A required account is the null account.
        ZeroAddress,
        UnknownFactory,
        /// The caller does not hold the given role on this factory.
        Unauthorized(Role),
        FactoryIdOverflow,
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Factories to construct at genesis, as (implementation, admin)
        pub factories: Vec<(T::Hash, T::AccountId)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            for (implementation, admin) in &self.factories {
                Pallet::<T>::do_create_factory(*implementation, admin.clone())
                    .expect("genesis factory needs a non-null implementation and admin");
            }
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Construct a factory whose slot points at `implementation`.
        ///
        /// `admin` receives `AdminGrantor`, `Deployer` and `Upgrader` on the factory.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::create_factory())]
        pub fn create_factory(
            origin: OriginFor<T>,
            implementation: T::Hash,
            admin: T::AccountId,
        ) -> DispatchResult {
            T::FactoryOrigin::ensure_origin(origin)?;
            Self::do_create_factory(implementation, admin)?;
            Ok(())
        }

        /// Create a ledger bound to the factory's slot and initialize it. Requires
        /// `Deployer`.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::create_instance())]
        pub fn create_instance(
            origin: OriginFor<T>,
            factory: FactoryId,
            name: Vec<u8>,
            symbol: Vec<u8>,
            decimals: u8,
            admin: T::AccountId,
            compliance: Option<PolicyId>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let init = LedgerInit { name, symbol, decimals, admin, compliance };
            Self::do_create_instance(factory, &who, init)?;
            Ok(())
        }

        /// Point the factory's slot at `new`. Every instance created by the factory
        /// dispatches to it from the next call on. Requires `Upgrader`.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::upgrade_implementation())]
        pub fn upgrade_implementation(
            origin: OriginFor<T>,
            factory: FactoryId,
            new: T::Hash,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(factory, Role::Upgrader, &who)?;
            ensure!(new != T::Hash::default(), Error::<T>::InvalidImplementation);

            let old = Factories::<T>::try_mutate(factory, |maybe_details| {
                let details = maybe_details.as_mut().ok_or(Error::<T>::UnknownFactory)?;
                Ok::<_, DispatchError>(core::mem::replace(&mut details.implementation, new))
            })?;
            log::info!(target: LOG_TARGET, "factory {factory}: implementation {old:?} -> {new:?}");
            Self::deposit_event(Event::ImplementationUpgraded { factory, old, new });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        pub fn do_create_factory(
            implementation: T::Hash,
            admin: T::AccountId,
        ) -> Result<FactoryId, DispatchError> {
            ensure!(implementation != T::Hash::default(), Error::<T>::InvalidImplementation);
            ensure!(!is_null_account(&admin), Error::<T>::ZeroAddress);

            let factory = NextFactoryId::<T>::get();
            let next = factory.checked_add(1).ok_or(Error::<T>::FactoryIdOverflow)?;
            NextFactoryId::<T>::put(next);
            Factories::<T>::insert(factory, FactoryDetails { implementation });

            let scope = Self::factory_account(factory);
            for role in Role::FACTORY {
                T::Roles::grant_role(&scope, role, &admin);
            }

            log::info!(target: LOG_TARGET, "factory {factory} created, admin {admin:?}");
            Self::deposit_event(Event::FactoryCreated { factory, implementation, admin });
            Ok(factory)
        }

        /// Create and initialize a ledger as `who`, returning its id.
        pub fn do_create_instance(
            factory: FactoryId,
            who: &T::AccountId,
            init: LedgerInit<T::AccountId>,
        ) -> Result<LedgerId, DispatchError> {
            Self::ensure_role(factory, Role::Deployer, who)?;
            ensure!(!is_null_account(&init.admin), Error::<T>::ZeroAddress);

            let ledger = T::Ledgers::instantiate(factory, init.clone())?;

            log::info!(
                target: LOG_TARGET,
                "factory {factory}: ledger {ledger} created for {:?}",
                init.admin,
            );
            let LedgerInit { name, symbol, decimals, admin, compliance } = init;
            Self::deposit_event(Event::InstanceCreated {
                factory,
                ledger,
                name,
                symbol,
                decimals,
                admin,
                compliance,
            });
            Ok(ledger)
        }

        fn ensure_role(factory: FactoryId, role: Role, who: &T::AccountId) -> DispatchResult {
            ensure!(Factories::<T>::contains_key(factory), Error::<T>::UnknownFactory);
            ensure!(
                T::Roles::has_role(&Self::factory_account(factory), role, who),
                Error::<T>::Unauthorized(role)
            );
            Ok(())
        }

        /// Sovereign account of a factory: the scope of its roles.
        pub fn factory_account(factory: FactoryId) -> T::AccountId {
            let digest = T::Hashing::hash_of(&(FACTORY_ACCOUNT_TAG, factory));
            account_from_digest(digest.as_ref())
        }

        pub fn factory(factory: FactoryId) -> Option<FactoryDetails<T::Hash>> {
            Factories::<T>::get(factory)
        }

        /// Sovereign account of a ledger created by any factory.
        pub fn instance_account(ledger: LedgerId) -> T::AccountId {
            T::Ledgers::ledger_account(ledger)
        }
    }
}

impl<T: Config> ImplementationSlot<T::Hash> for Pallet<T> {
    fn implementation(slot: FactoryId) -> Option<T::Hash> {
        Factories::<T>::get(slot).map(|details| details.implementation)
    }
}
