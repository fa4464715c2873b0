//! Permissioned fungible ledgers.
//!
//! The pallet hosts any number of independent ledger instances. Each instance has its
//! own balances, allowances, metadata, pause flag and optional compliance binding, and
//! its own sovereign account (see [`Pallet::ledger_account`]) which scopes its roles and
//! identifies it to its compliance policy.
//!
//! Instances do not carry behaviour. An instance is bound to a shared implementation
//! slot at allocation; every call reads the slot and resolves the current
//! [`LedgerImplementation`] before doing anything else.
//!
//! Every balance change (mint, burn, transfer, transfer_from) passes the mutation gate
//! first:
//!
//! 1. the ledger must not be paused;
//! 2. the sending side, if any, must be compliant;
//! 3. the receiving side, if any, must be compliant;
//! 4. an operator who is neither sender nor recipient must be compliant too.
//!
//! Compliance is skipped entirely while no policy is bound.

#![cfg_attr(not(feature = "std"), no_std)]
// `Config` still declares `RuntimeEvent` explicitly.
#![allow(deprecated)]

use clad_primitives::{
    account_from_digest, is_null_account, Balance, ComplianceCheck, ComplianceError, FactoryId,
    ImplementationSlot, LedgerId, LedgerInit, LedgerInstantiator, PolicyId, Role, RoleStore,
};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, PalletError};
use frame_system::{ensure_signed, pallet_prelude::*};
use scale_info::TypeInfo;
use sp_runtime::traits::Hash as HashT;
use sp_std::{boxed::Box, prelude::*};

pub use pallet::*;

pub mod implementation;
pub use implementation::{LedgerImplementation, ResolveImplementation, StandardLedger, StandardOnly};

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

const LOG_TARGET: &str = "runtime::clad-token";

/// Domain tag hashed with the ledger id to derive its sovereign account.
const LEDGER_ACCOUNT_TAG: &[u8; 11] = b"clad/ledger";

pub type NameOf = BoundedVec<u8, ConstU32<64>>;
pub type SymbolOf = BoundedVec<u8, ConstU32<16>>;

/// Which party of a value movement a compliance rejection refers to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    PalletError,
)]
pub enum Party {
    /// The account whose balance decreases.
    Sender,
    /// The account whose balance increases.
    Recipient,
    /// The caller acting on someone else's balance.
    Operator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo)]
pub enum LedgerStatus {
    /// Allocated, `initialize` not yet run.
    Uninitialized,
    Initialized,
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo)]
pub struct LedgerDetails {
    /// Shared implementation slot the ledger dispatches through.
    pub slot: FactoryId,
    pub status: LedgerStatus,
    pub paused: bool,
    pub compliance: Option<PolicyId>,
    pub total_supply: Balance,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo)]
pub struct LedgerMetadata {
    pub name: NameOf,
    pub symbol: SymbolOf,
    pub decimals: u8,
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Where ledger roles live, scoped by the ledger's sovereign account.
        type Roles: RoleStore<Self::AccountId>;

        /// Policy engine consulted by the mutation gate.
        type Compliance: ComplianceCheck<Self::AccountId>;

        /// Shared implementation slots, read on every call.
        type Slot: ImplementationSlot<Self::Hash>;

        /// Turns the hash found in a slot into behaviour.
        type Implementations: ResolveImplementation<Self>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Id handed to the next ledger allocated
    #[pallet::storage]
    pub type NextLedgerId<T> = StorageValue<_, LedgerId, ValueQuery>;

    #[pallet::storage]
    pub type Ledgers<T> = StorageMap<_, Blake2_128Concat, LedgerId, LedgerDetails, OptionQuery>;

    /// Token name, symbol and decimals per ledger
    #[pallet::storage]
    pub type Metadata<T> = StorageMap<_, Blake2_128Concat, LedgerId, LedgerMetadata, ValueQuery>;

    /// Account balances per ledger
    #[pallet::storage]
    pub type Balances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        LedgerId,
        Blake2_128Concat,
        T::AccountId,
        Balance,
        ValueQuery,
    >;

    /// Remaining allowance per ledger, keyed by (owner, spender)
    #[pallet::storage]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        LedgerId,
        Blake2_128Concat,
        (T::AccountId, T::AccountId),
        Balance,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Ledger initialized
        Initialized { ledger: LedgerId },
        NameChanged { ledger: LedgerId, old: Vec<u8>, new: Vec<u8> },
        SymbolChanged { ledger: LedgerId, old: Vec<u8>, new: Vec<u8> },
        DecimalsChanged { ledger: LedgerId, old: u8, new: u8 },
        /// Compliance binding changed; `None` means no policy
        ComplianceChanged { ledger: LedgerId, old: Option<PolicyId>, new: Option<PolicyId> },
        Paused { ledger: LedgerId, account: T::AccountId },
        Unpaused { ledger: LedgerId, account: T::AccountId },
        /// Value moved. `from` is `None` on mint, `to` is `None` on burn.
        Transferred {
            ledger: LedgerId,
            from: Option<T::AccountId>,
            to: Option<T::AccountId>,
            amount: Balance,
        },
        /// Allowance set to `amount`, either by approval or by spending
        Approval { ledger: LedgerId, owner: T::AccountId, spender: T::AccountId, amount: Balance },
    }

    #[pallet::error]
    pub enum Error<T> {
        UnknownLedger,
        AlreadyInitialized,
        NotInitialized,
        /// The caller does not hold the given role on this ledger.
        Unauthorized(Role),
        /// The new value equals the stored one.
        ValueUnchanged,
        LedgerPaused,
        /// The bound policy rejected the given party.
        NotCompliant(Party),
        InsufficientBalance,
        InsufficientAllowance,
        Overflow,
        /// Name longer than 64 bytes.
        NameTooLong,
        /// Symbol longer than 16 bytes.
        SymbolTooLong,
        /// The ledger's slot is missing or holds an implementation nobody can resolve.
        ImplementationUnavailable,
        LedgerIdOverflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Run one-time setup on an allocated ledger.
        ///
        /// Ledgers created through [`LedgerInstantiator::instantiate`] are initialized in
        /// the same step, so this only ever succeeds on a ledger allocated on its own.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::initialize())]
        pub fn initialize(
            origin: OriginFor<T>,
            ledger: LedgerId,
            name: Vec<u8>,
            symbol: Vec<u8>,
            decimals: u8,
            admin: T::AccountId,
            compliance: Option<PolicyId>,
        ) -> DispatchResult {
            ensure_signed(origin)?;
            let init = LedgerInit { name, symbol, decimals, admin, compliance };
            Self::resolve_implementation(ledger)?.initialize(ledger, init)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_metadata())]
        pub fn set_name(origin: OriginFor<T>, ledger: LedgerId, name: Vec<u8>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.set_name(ledger, &who, name)
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_metadata())]
        pub fn set_symbol(
            origin: OriginFor<T>,
            ledger: LedgerId,
            symbol: Vec<u8>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.set_symbol(ledger, &who, symbol)
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_metadata())]
        pub fn set_decimals(origin: OriginFor<T>, ledger: LedgerId, decimals: u8) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.set_decimals(ledger, &who, decimals)
        }

        /// Bind, rebind or unbind (`None`) the compliance policy.
        ///
        /// The policy is not validated here; a bad reference surfaces on the next balance
        /// change.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_compliance())]
        pub fn set_compliance(
            origin: OriginFor<T>,
            ledger: LedgerId,
            compliance: Option<PolicyId>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.set_compliance(ledger, &who, compliance)
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::set_paused())]
        pub fn pause(origin: OriginFor<T>, ledger: LedgerId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.pause(ledger, &who)
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::set_paused())]
        pub fn unpause(origin: OriginFor<T>, ledger: LedgerId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.unpause(ledger, &who)
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(
            origin: OriginFor<T>,
            ledger: LedgerId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.mint(ledger, &who, to, amount)
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(
            origin: OriginFor<T>,
            ledger: LedgerId,
            from: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.burn(ledger, &who, from, amount)
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(
            origin: OriginFor<T>,
            ledger: LedgerId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.transfer(ledger, &who, to, amount)
        }

        /// Move `amount` from `owner` to `to` out of the caller's allowance.
        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            ledger: LedgerId,
            owner: T::AccountId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.transfer_from(ledger, &who, owner, to, amount)
        }

        /// Set the allowance of `spender` over the caller's balance to exactly `amount`.
        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(
            origin: OriginFor<T>,
            ledger: LedgerId,
            spender: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::resolve_implementation(ledger)?.approve(ledger, &who, spender, amount)
        }
    }

    impl<T: Config> Pallet<T> {
        /// Allocate an uninitialized ledger bound to `slot`.
        pub fn do_allocate(slot: FactoryId) -> Result<LedgerId, DispatchError> {
            let ledger = NextLedgerId::<T>::get();
            let next = ledger.checked_add(1).ok_or(Error::<T>::LedgerIdOverflow)?;
            NextLedgerId::<T>::put(next);

            Ledgers::<T>::insert(
                ledger,
                LedgerDetails {
                    slot,
                    status: LedgerStatus::Uninitialized,
                    paused: false,
                    compliance: None,
                    total_supply: 0,
                },
            );
            Ok(ledger)
        }

        pub fn do_initialize(ledger: LedgerId, init: LedgerInit<T::AccountId>) -> DispatchResult {
            let name: NameOf = init.name.try_into().map_err(|_| Error::<T>::NameTooLong)?;
            let symbol: SymbolOf = init.symbol.try_into().map_err(|_| Error::<T>::SymbolTooLong)?;

            Ledgers::<T>::try_mutate(ledger, |maybe_details| -> DispatchResult {
                let details = maybe_details.as_mut().ok_or(Error::<T>::UnknownLedger)?;
                ensure!(details.status == LedgerStatus::Uninitialized, Error::<T>::AlreadyInitialized);
                details.status = LedgerStatus::Initialized;
                details.compliance = init.compliance;
                Ok(())
            })?;
            Metadata::<T>::insert(ledger, LedgerMetadata { name, symbol, decimals: init.decimals });

            let scope = Self::ledger_account(ledger);
            for role in Role::LEDGER {
                T::Roles::grant_role(&scope, role, &init.admin);
            }
            if let Some(policy) = init.compliance {
                Self::deposit_event(Event::ComplianceChanged { ledger, old: None, new: Some(policy) });
            }

            log::info!(target: LOG_TARGET, "ledger {ledger} initialized, admin {:?}", init.admin);
            Self::deposit_event(Event::Initialized { ledger });
            Ok(())
        }

        pub fn do_set_name(ledger: LedgerId, who: &T::AccountId, name: Vec<u8>) -> DispatchResult {
            Self::ensure_initialized(ledger)?;
            Self::ensure_role(ledger, Role::Configurer, who)?;
            let new: NameOf = name.try_into().map_err(|_| Error::<T>::NameTooLong)?;

            let old = Metadata::<T>::try_mutate(ledger, |meta| -> Result<NameOf, DispatchError> {
                ensure!(meta.name != new, Error::<T>::ValueUnchanged);
                Ok(core::mem::replace(&mut meta.name, new.clone()))
            })?;
            Self::deposit_event(Event::NameChanged {
                ledger,
                old: old.into_inner(),
                new: new.into_inner(),
            });
            Ok(())
        }

        pub fn do_set_symbol(
            ledger: LedgerId,
            who: &T::AccountId,
            symbol: Vec<u8>,
        ) -> DispatchResult {
            Self::ensure_initialized(ledger)?;
            Self::ensure_role(ledger, Role::Configurer, who)?;
            let new: SymbolOf = symbol.try_into().map_err(|_| Error::<T>::SymbolTooLong)?;

            let old = Metadata::<T>::try_mutate(ledger, |meta| -> Result<SymbolOf, DispatchError> {
                ensure!(meta.symbol != new, Error::<T>::ValueUnchanged);
                Ok(core::mem::replace(&mut meta.symbol, new.clone()))
            })?;
            Self::deposit_event(Event::SymbolChanged {
                ledger,
                old: old.into_inner(),
                new: new.into_inner(),
            });
            Ok(())
        }

        pub fn do_set_decimals(ledger: LedgerId, who: &T::AccountId, new: u8) -> DispatchResult {
            Self::ensure_initialized(ledger)?;
            Self::ensure_role(ledger, Role::Configurer, who)?;

            let old = Metadata::<T>::try_mutate(ledger, |meta| -> Result<u8, DispatchError> {
                ensure!(meta.decimals != new, Error::<T>::ValueUnchanged);
                Ok(core::mem::replace(&mut meta.decimals, new))
            })?;
            Self::deposit_event(Event::DecimalsChanged { ledger, old, new });
            Ok(())
        }

        pub fn do_set_compliance(
            ledger: LedgerId,
            who: &T::AccountId,
            new: Option<PolicyId>,
        ) -> DispatchResult {
            Self::ensure_initialized(ledger)?;
            Self::ensure_role(ledger, Role::Configurer, who)?;

            let old = Self::mutate_details(ledger, |details| {
                ensure!(details.compliance != new, Error::<T>::ValueUnchanged);
                Ok(core::mem::replace(&mut details.compliance, new))
            })?;
            log::info!(target: LOG_TARGET, "ledger {ledger}: compliance {old:?} -> {new:?}");
            Self::deposit_event(Event::ComplianceChanged { ledger, old, new });
            Ok(())
        }

        /// Set the pause flag. Re-asserting the current state is allowed and still
        /// emits the event.
        pub fn do_set_paused(ledger: LedgerId, who: &T::AccountId, paused: bool) -> DispatchResult {
            Self::ensure_initialized(ledger)?;
            Self::ensure_role(ledger, Role::Pauser, who)?;

            Self::mutate_details(ledger, |details| {
                details.paused = paused;
                Ok(())
            })?;
            log::info!(target: LOG_TARGET, "ledger {ledger}: paused = {paused}");
            let account = who.clone();
            if paused {
                Self::deposit_event(Event::Paused { ledger, account });
            } else {
                Self::deposit_event(Event::Unpaused { ledger, account });
            }
            Ok(())
        }

        pub fn do_mint(
            ledger: LedgerId,
            who: &T::AccountId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let details = Self::ensure_initialized(ledger)?;
            Self::ensure_role(ledger, Role::Minter, who)?;
            Self::ensure_can_move(ledger, &details, None, Some(&to), who)?;

            Self::mutate_details(ledger, |details| {
                details.total_supply =
                    details.total_supply.checked_add(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })?;
            Balances::<T>::try_mutate(ledger, &to, |balance| -> DispatchResult {
                *balance = balance.checked_add(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })?;
            Self::deposit_event(Event::Transferred { ledger, from: None, to: Some(to), amount });
            Ok(())
        }

        pub fn do_burn(
            ledger: LedgerId,
            who: &T::AccountId,
            from: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let details = Self::ensure_initialized(ledger)?;
            Self::ensure_role(ledger, Role::Burner, who)?;
            Self::ensure_can_move(ledger, &details, Some(&from), None, who)?;

            Balances::<T>::try_mutate(ledger, &from, |balance| -> DispatchResult {
                *balance = balance.checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
                Ok(())
            })?;
            Self::mutate_details(ledger, |details| {
                // Supply always covers any single balance.
                details.total_supply = details.total_supply.saturating_sub(amount);
                Ok(())
            })?;
            Self::deposit_event(Event::Transferred { ledger, from: Some(from), to: None, amount });
            Ok(())
        }

        pub fn do_transfer(
            ledger: LedgerId,
            who: &T::AccountId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let details = Self::ensure_initialized(ledger)?;
            Self::ensure_can_move(ledger, &details, Some(who), Some(&to), who)?;
            Self::move_balance(ledger, who, &to, amount)
        }

        /// Allowance first, then the mutation gate, then the balance.
        pub fn do_transfer_from(
            ledger: LedgerId,
            spender: &T::AccountId,
            owner: T::AccountId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let details = Self::ensure_initialized(ledger)?;
            let remaining = Allowances::<T>::get(ledger, (&owner, spender))
                .checked_sub(amount)
                .ok_or(Error::<T>::InsufficientAllowance)?;
            Self::ensure_can_move(ledger, &details, Some(&owner), Some(&to), spender)?;
            ensure!(Self::balance_of(ledger, &owner) >= amount, Error::<T>::InsufficientBalance);

            Self::write_allowance(ledger, owner.clone(), spender.clone(), remaining);
            Self::move_balance(ledger, &owner, &to, amount)
        }

        /// Allowances move no value: neither the pause flag nor compliance applies.
        pub fn do_approve(
            ledger: LedgerId,
            owner: &T::AccountId,
            spender: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            Self::ensure_initialized(ledger)?;
            Self::write_allowance(ledger, owner.clone(), spender, amount);
            Ok(())
        }

        fn write_allowance(
            ledger: LedgerId,
            owner: T::AccountId,
            spender: T::AccountId,
            amount: Balance,
        ) {
            Allowances::<T>::insert(ledger, (&owner, &spender), amount);
            Self::deposit_event(Event::Approval { ledger, owner, spender, amount });
        }

        /// Debit `from` and credit `to`. Debit first, so a self-transfer nets to zero.
        fn move_balance(
            ledger: LedgerId,
            from: &T::AccountId,
            to: &T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            Balances::<T>::try_mutate(ledger, from, |balance| -> DispatchResult {
                *balance = balance.checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
                Ok(())
            })?;
            Balances::<T>::try_mutate(ledger, to, |balance| -> DispatchResult {
                *balance = balance.checked_add(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })?;
            Self::deposit_event(Event::Transferred {
                ledger,
                from: Some(from.clone()),
                to: Some(to.clone()),
                amount,
            });
            Ok(())
        }

        /// The mutation gate: pause flag, then sender, recipient and operator compliance.
        fn ensure_can_move(
            ledger: LedgerId,
            details: &LedgerDetails,
            from: Option<&T::AccountId>,
            to: Option<&T::AccountId>,
            operator: &T::AccountId,
        ) -> DispatchResult {
            ensure!(!details.paused, Error::<T>::LedgerPaused);

            let Some(policy) = details.compliance else {
                return Ok(());
            };
            let caller = Self::ledger_account(ledger);
            if let Some(from) = from {
                Self::screen(policy, &caller, from, Party::Sender)?;
            }
            if let Some(to) = to {
                Self::screen(policy, &caller, to, Party::Recipient)?;
            }
            if from != Some(operator) && to != Some(operator) && !is_null_account(operator) {
                Self::screen(policy, &caller, operator, Party::Operator)?;
            }
            Ok(())
        }

        fn screen(
            policy: PolicyId,
            caller: &T::AccountId,
            who: &T::AccountId,
            party: Party,
        ) -> DispatchResult {
            T::Compliance::check_compliance(policy, caller, who).map_err(|e| match e {
                ComplianceError::NotCompliant => {
                    log::debug!(
                        target: LOG_TARGET,
                        "policy {policy} rejected {party:?} {who:?}",
                    );
                    Error::<T>::NotCompliant(party).into()
                },
                ComplianceError::Unavailable(e) => e,
            })
        }

        fn ensure_role(ledger: LedgerId, role: Role, who: &T::AccountId) -> DispatchResult {
            ensure!(
                T::Roles::has_role(&Self::ledger_account(ledger), role, who),
                Error::<T>::Unauthorized(role)
            );
            Ok(())
        }

        fn ensure_initialized(ledger: LedgerId) -> Result<LedgerDetails, DispatchError> {
            let details = Ledgers::<T>::get(ledger).ok_or(Error::<T>::UnknownLedger)?;
            ensure!(details.status == LedgerStatus::Initialized, Error::<T>::NotInitialized);
            Ok(details)
        }

        fn mutate_details<R>(
            ledger: LedgerId,
            f: impl FnOnce(&mut LedgerDetails) -> Result<R, DispatchError>,
        ) -> Result<R, DispatchError> {
            Ledgers::<T>::try_mutate(ledger, |maybe_details| {
                f(maybe_details.as_mut().ok_or(Error::<T>::UnknownLedger)?)
            })
        }

        /// Behaviour currently installed in the ledger's slot.
        pub fn resolve_implementation(
            ledger: LedgerId,
        ) -> Result<Box<dyn LedgerImplementation<T>>, DispatchError> {
            let details = Ledgers::<T>::get(ledger).ok_or(Error::<T>::UnknownLedger)?;
            T::Slot::implementation(details.slot)
                .and_then(|implementation| T::Implementations::resolve(&implementation))
                .ok_or_else(|| {
                    log::warn!(
                        target: LOG_TARGET,
                        "ledger {ledger}: slot {} has no usable implementation",
                        details.slot,
                    );
                    Error::<T>::ImplementationUnavailable.into()
                })
        }

        /// Sovereign account of a ledger: its role scope and its identity towards
        /// compliance policies.
        pub fn ledger_account(ledger: LedgerId) -> T::AccountId {
            let digest = T::Hashing::hash_of(&(LEDGER_ACCOUNT_TAG, ledger));
            account_from_digest(digest.as_ref())
        }

        pub fn ledger(ledger: LedgerId) -> Option<LedgerDetails> {
            Ledgers::<T>::get(ledger)
        }

        pub fn balance_of(ledger: LedgerId, who: &T::AccountId) -> Balance {
            Balances::<T>::get(ledger, who)
        }

        pub fn allowance(ledger: LedgerId, owner: &T::AccountId, spender: &T::AccountId) -> Balance {
            Allowances::<T>::get(ledger, (owner, spender))
        }

        pub fn total_supply(ledger: LedgerId) -> Balance {
            Ledgers::<T>::get(ledger).map(|details| details.total_supply).unwrap_or_default()
        }

        pub fn token_name(ledger: LedgerId) -> Vec<u8> {
            Metadata::<T>::get(ledger).name.into_inner()
        }

        pub fn token_symbol(ledger: LedgerId) -> Vec<u8> {
            Metadata::<T>::get(ledger).symbol.into_inner()
        }

        pub fn decimals(ledger: LedgerId) -> u8 {
            Metadata::<T>::get(ledger).decimals
        }

        pub fn is_paused(ledger: LedgerId) -> bool {
            Ledgers::<T>::get(ledger).is_some_and(|details| details.paused)
        }

        pub fn compliance_of(ledger: LedgerId) -> Option<PolicyId> {
            Ledgers::<T>::get(ledger).and_then(|details| details.compliance)
        }

        pub fn is_initialized(ledger: LedgerId) -> bool {
            Ledgers::<T>::get(ledger).is_some_and(|details| details.status == LedgerStatus::Initialized)
        }

        /// Version of the implementation the ledger would dispatch to right now.
        pub fn implementation_version(ledger: LedgerId) -> Option<u32> {
            Self::resolve_implementation(ledger).ok().map(|implementation| implementation.version())
        }
    }

    #[cfg(any(feature = "try-runtime", test))]
    impl<T: Config> Pallet<T> {
        /// Every ledger's supply equals the sum of its balances.
        pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
            for (ledger, details) in Ledgers::<T>::iter() {
                let held = Balances::<T>::iter_prefix_values(ledger)
                    .fold(0u128, |sum, balance| sum.saturating_add(balance));
                ensure!(held == details.total_supply, "ledger supply does not match its balances");
            }
            Ok(())
        }
    }
}

impl<T: Config> LedgerInstantiator<T::AccountId> for Pallet<T> {
    fn instantiate(slot: FactoryId, init: LedgerInit<T::AccountId>) -> Result<LedgerId, DispatchError> {
        frame_support::storage::with_storage_layer(|| {
            let ledger = Self::do_allocate(slot)?;
            Self::resolve_implementation(ledger)?.initialize(ledger, init)?;
            Ok(ledger)
        })
    }

    fn ledger_account(ledger: LedgerId) -> T::AccountId {
        Pallet::<T>::ledger_account(ledger)
    }
}
