//! Compliance policies for Clad ledgers.
//!
//! A policy owns a whitelist, a blacklist and an enforcement flag
//! (`whitelist_required`). It is bound at creation to exactly one ledger, identified by
//! that ledger's sovereign account, and answers compliance queries from that ledger only.
//!
//! Evaluation order for an account:
//!
//! 1. blacklisted: rejected, whatever else is true;
//! 2. `whitelist_required` and not whitelisted: rejected;
//! 3. otherwise: compliant.
//!
//! The setters keep the two lists mutually exclusive per account: whitelisting clears a
//! blacklist entry and blacklisting clears a whitelist entry.

#![cfg_attr(not(feature = "std"), no_std)]
// `Config` still declares `RuntimeEvent` explicitly.
#![allow(deprecated)]

use clad_primitives::{is_null_account, ComplianceCheck, ComplianceError, PolicyId};
use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::prelude::*;

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

const LOG_TARGET: &str = "runtime::clad-compliance";

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    /// A policy and the one ledger it answers to. `ledger` and `owner` never change.
    #[derive(Clone, Encode, Decode, PartialEq, Eq, Debug, TypeInfo, MaxEncodedLen)]
    pub struct PolicyDetails<AccountId> {
        pub ledger: AccountId,
        pub owner: AccountId,
        pub whitelist_required: bool,
    }

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Id handed to the next policy created
    #[pallet::storage]
    pub type NextPolicyId<T> = StorageValue<_, PolicyId, ValueQuery>;

    #[pallet::storage]
    pub type Policies<T: Config> =
        StorageMap<_, Blake2_128Concat, PolicyId, PolicyDetails<T::AccountId>, OptionQuery>;

    /// Whitelisted accounts per policy
    #[pallet::storage]
    pub type Whitelist<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        PolicyId,
        Blake2_128Concat,
        T::AccountId,
        bool,
        ValueQuery,
    >;

    /// Blacklisted accounts per policy
    #[pallet::storage]
    pub type Blacklist<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        PolicyId,
        Blake2_128Concat,
        T::AccountId,
        bool,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Policy created and bound to a ledger
        PolicyCreated { policy: PolicyId, ledger: T::AccountId, owner: T::AccountId },
        /// Enforcement mode changed
        WhitelistRequiredSet { policy: PolicyId, old: bool, new: bool },
        /// Whitelist membership set for one account
        WhitelistUpdated { policy: PolicyId, account: T::AccountId, allowed: bool },
        /// Blacklist membership set for one account
        BlacklistUpdated { policy: PolicyId, account: T::AccountId, blocked: bool },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The ledger reference is the null account.
        InvalidLedgerReference,
        /// The owner is the null account.
        InvalidOwner,
        UnknownPolicy,
        /// Only the policy owner may change it.
        NotOwner,
        /// Only the bound ledger may ask for a compliance check.
        NotLedgerCaller,
        /// The account is blacklisted, or not whitelisted while a whitelist is required.
        NotCompliant,
        PolicyIdOverflow,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Create a policy bound to `ledger` and owned by `owner`.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::create_policy())]
        pub fn create_policy(
            origin: OriginFor<T>,
            ledger: T::AccountId,
            owner: T::AccountId,
        ) -> DispatchResult {
            ensure_signed(origin)?;
            Self::do_create_policy(ledger, owner)?;
            Ok(())
        }

        /// Switch whitelist enforcement on or off. Owner only.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_whitelist_required())]
        pub fn set_whitelist_required(
            origin: OriginFor<T>,
            policy: PolicyId,
            required: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Policies::<T>::try_mutate(policy, |maybe_details| -> DispatchResult {
                let details = maybe_details.as_mut().ok_or(Error::<T>::UnknownPolicy)?;
                ensure!(details.owner == who, Error::<T>::NotOwner);

                let old = details.whitelist_required;
                details.whitelist_required = required;
                Self::deposit_event(Event::WhitelistRequiredSet { policy, old, new: required });
                Ok(())
            })
        }

        /// Set whitelist membership for every account in the batch. Owner only.
        ///
        /// `allowed = true` also clears the account's blacklist entry. One event per
        /// entry, in input order.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_whitelist(accounts.len() as u32))]
        pub fn set_whitelist(
            origin: OriginFor<T>,
            policy: PolicyId,
            accounts: Vec<T::AccountId>,
            allowed: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_owner(policy, &who)?;

            for account in accounts {
                if allowed {
                    Whitelist::<T>::insert(policy, &account, true);
                    Blacklist::<T>::remove(policy, &account);
                } else {
                    Whitelist::<T>::remove(policy, &account);
                }
                Self::deposit_event(Event::WhitelistUpdated { policy, account, allowed });
            }
            Ok(())
        }

        /// Set blacklist membership for every account in the batch. Owner only.
        ///
        /// `blocked = true` also clears the account's whitelist entry. One event per
        /// entry, in input order.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_blacklist(accounts.len() as u32))]
        pub fn set_blacklist(
            origin: OriginFor<T>,
            policy: PolicyId,
            accounts: Vec<T::AccountId>,
            blocked: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_owner(policy, &who)?;

            for account in accounts {
                if blocked {
                    Blacklist::<T>::insert(policy, &account, true);
                    Whitelist::<T>::remove(policy, &account);
                } else {
                    Blacklist::<T>::remove(policy, &account);
                }
                Self::deposit_event(Event::BlacklistUpdated { policy, account, blocked });
            }
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        pub fn do_create_policy(
            ledger: T::AccountId,
            owner: T::AccountId,
        ) -> Result<PolicyId, DispatchError> {
            ensure!(!is_null_account(&ledger), Error::<T>::InvalidLedgerReference);
            ensure!(!is_null_account(&owner), Error::<T>::InvalidOwner);

            let policy = NextPolicyId::<T>::get();
            let next = policy.checked_add(1).ok_or(Error::<T>::PolicyIdOverflow)?;
            NextPolicyId::<T>::put(next);

            Policies::<T>::insert(
                policy,
                PolicyDetails { ledger: ledger.clone(), owner: owner.clone(), whitelist_required: false },
            );
            log::info!(target: LOG_TARGET, "policy {policy} created for ledger {ledger:?}");
            Self::deposit_event(Event::PolicyCreated { policy, ledger, owner });
            Ok(policy)
        }

        /// Compliance check as seen by a dispatch path: a rejection is
        /// [`Error::NotCompliant`].
        pub fn do_check_compliance(
            policy: PolicyId,
            caller: &T::AccountId,
            who: &T::AccountId,
        ) -> DispatchResult {
            ensure!(Self::screen(policy, caller, who)?, Error::<T>::NotCompliant);
            Ok(())
        }

        /// `Ok(false)` when the policy rejects `who`; `Err` when the question itself is
        /// invalid (unknown policy, caller other than the bound ledger).
        pub(crate) fn screen(
            policy: PolicyId,
            caller: &T::AccountId,
            who: &T::AccountId,
        ) -> Result<bool, DispatchError> {
            let details = Policies::<T>::get(policy).ok_or(Error::<T>::UnknownPolicy)?;
            ensure!(details.ledger == *caller, Error::<T>::NotLedgerCaller);

            if Blacklist::<T>::get(policy, who) {
                log::debug!(target: LOG_TARGET, "policy {policy}: {who:?} is blacklisted");
                return Ok(false);
            }
            if details.whitelist_required && !Whitelist::<T>::get(policy, who) {
                log::debug!(target: LOG_TARGET, "policy {policy}: {who:?} is not whitelisted");
                return Ok(false);
            }
            Ok(true)
        }

        fn ensure_owner(policy: PolicyId, who: &T::AccountId) -> DispatchResult {
            let details = Policies::<T>::get(policy).ok_or(Error::<T>::UnknownPolicy)?;
            ensure!(details.owner == *who, Error::<T>::NotOwner);
            Ok(())
        }

        pub fn policy(policy: PolicyId) -> Option<PolicyDetails<T::AccountId>> {
            Policies::<T>::get(policy)
        }

        pub fn is_whitelisted(policy: PolicyId, who: &T::AccountId) -> bool {
            Whitelist::<T>::get(policy, who)
        }

        pub fn is_blacklisted(policy: PolicyId, who: &T::AccountId) -> bool {
            Blacklist::<T>::get(policy, who)
        }

        pub fn whitelist_required(policy: PolicyId) -> bool {
            Policies::<T>::get(policy).map(|details| details.whitelist_required).unwrap_or(false)
        }
    }
}

impl<T: Config> ComplianceCheck<T::AccountId> for Pallet<T> {
    fn check_compliance(
        policy: PolicyId,
        caller: &T::AccountId,
        who: &T::AccountId,
    ) -> Result<(), ComplianceError> {
        match Self::screen(policy, caller, who) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ComplianceError::NotCompliant),
            Err(e) => Err(ComplianceError::Unavailable(e)),
        }
    }
}
