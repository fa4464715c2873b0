//! Scoped role-based access control.
//!
//! Every ledger and factory owns a sovereign account that acts as its *scope*. Roles
//! are granted per `(scope, role, account)`; whoever holds [`Role::AdminGrantor`] in a
//! scope may grant or revoke any role in that same scope and nowhere else.
//!
//! Other pallets reach this store through [`clad_primitives::RoleStore`], which skips
//! the caller checks performed by the dispatchables here.

#![cfg_attr(not(feature = "std"), no_std)]
// `Config` still declares `RuntimeEvent` explicitly.
#![allow(deprecated)]

use clad_primitives::{Role, RoleStore};
use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

const LOG_TARGET: &str = "runtime::clad-access";

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Role grants keyed by scope, role and holder.
    #[pallet::storage]
    pub type Roles<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, Role>,
            NMapKey<Blake2_128Concat, T::AccountId>,
        ),
        (),
        OptionQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// `account` now holds `role` in `scope`
        RoleGranted { scope: T::AccountId, role: Role, account: T::AccountId },
        /// `account` no longer holds `role` in `scope`
        RoleRevoked { scope: T::AccountId, role: Role, account: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The caller does not hold the given role in the target scope.
        Unauthorized(Role),
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Grant `role` in `scope` to `account`. Requires `AdminGrantor` in `scope`.
        ///
        /// Granting a role the account already holds succeeds without an event.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::grant_role())]
        pub fn grant_role(
            origin: OriginFor<T>,
            scope: T::AccountId,
            role: Role,
            account: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(&scope, Role::AdminGrantor, &who)?;
            Self::do_grant_role(&scope, role, &account);
            Ok(())
        }

        /// Revoke `role` in `scope` from `account`. Requires `AdminGrantor` in `scope`.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::revoke_role())]
        pub fn revoke_role(
            origin: OriginFor<T>,
            scope: T::AccountId,
            role: Role,
            account: T::AccountId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(&scope, Role::AdminGrantor, &who)?;
            Self::do_revoke_role(&scope, role, &account);
            Ok(())
        }

        /// Drop one of the caller's own roles.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::revoke_role())]
        pub fn renounce_role(origin: OriginFor<T>, scope: T::AccountId, role: Role) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::do_revoke_role(&scope, role, &who);
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        pub fn has_role(scope: &T::AccountId, role: Role, who: &T::AccountId) -> bool {
            Roles::<T>::contains_key((scope, role, who))
        }

        pub fn ensure_role(scope: &T::AccountId, role: Role, who: &T::AccountId) -> DispatchResult {
            ensure!(Self::has_role(scope, role, who), Error::<T>::Unauthorized(role));
            Ok(())
        }

        /// Returns `false` when the grant was already in place.
        pub fn do_grant_role(scope: &T::AccountId, role: Role, account: &T::AccountId) -> bool {
            if Self::has_role(scope, role, account) {
                return false;
            }
            Roles::<T>::insert((scope, role, account), ());
            log::debug!(target: LOG_TARGET, "granted {role:?} in {scope:?} to {account:?}");
            Self::deposit_event(Event::RoleGranted {
                scope: scope.clone(),
                role,
                account: account.clone(),
            });
            true
        }

        /// Returns `false` when there was nothing to revoke.
        pub fn do_revoke_role(scope: &T::AccountId, role: Role, account: &T::AccountId) -> bool {
            if !Self::has_role(scope, role, account) {
                return false;
            }
            Roles::<T>::remove((scope, role, account));
            log::debug!(target: LOG_TARGET, "revoked {role:?} in {scope:?} from {account:?}");
            Self::deposit_event(Event::RoleRevoked {
                scope: scope.clone(),
                role,
                account: account.clone(),
            });
            true
        }
    }
}

impl<T: Config> RoleStore<T::AccountId> for Pallet<T> {
    fn has_role(scope: &T::AccountId, role: Role, who: &T::AccountId) -> bool {
        Roles::<T>::contains_key((scope, role, who))
    }

    fn grant_role(scope: &T::AccountId, role: Role, who: &T::AccountId) {
        Self::do_grant_role(scope, role, who);
    }

    fn revoke_role(scope: &T::AccountId, role: Role, who: &T::AccountId) {
        Self::do_revoke_role(scope, role, who);
    }
}
