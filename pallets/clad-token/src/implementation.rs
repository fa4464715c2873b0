//! Swappable ledger behaviour.
//!
//! A ledger never embeds its behaviour. Every call looks up the implementation hash
//! installed in the ledger's slot and resolves it here, at dispatch time. Replacing the
//! hash in a slot therefore changes every ledger bound to that slot at once, with no
//! per-ledger migration.

use crate::{Config, Pallet};
use clad_primitives::{Balance, LedgerId, LedgerInit, PolicyId};
use frame_support::{dispatch::DispatchResult, traits::Get};
use sp_std::{boxed::Box, marker::PhantomData, prelude::*};

/// Behaviour of a ledger, one method per operation.
///
/// The default bodies are the standard semantics. An upgraded implementation
/// overrides the methods it changes and delegates the rest.
pub trait LedgerImplementation<T: Config> {
    /// Reported through [`Pallet::implementation_version`].
    fn version(&self) -> u32;

    fn initialize(&self, ledger: LedgerId, init: LedgerInit<T::AccountId>) -> DispatchResult {
        Pallet::<T>::do_initialize(ledger, init)
    }

    fn set_name(&self, ledger: LedgerId, who: &T::AccountId, name: Vec<u8>) -> DispatchResult {
        Pallet::<T>::do_set_name(ledger, who, name)
    }

    fn set_symbol(&self, ledger: LedgerId, who: &T::AccountId, symbol: Vec<u8>) -> DispatchResult {
        Pallet::<T>::do_set_symbol(ledger, who, symbol)
    }

    fn set_decimals(&self, ledger: LedgerId, who: &T::AccountId, decimals: u8) -> DispatchResult {
        Pallet::<T>::do_set_decimals(ledger, who, decimals)
    }

    fn set_compliance(
        &self,
        ledger: LedgerId,
        who: &T::AccountId,
        compliance: Option<PolicyId>,
    ) -> DispatchResult {
        Pallet::<T>::do_set_compliance(ledger, who, compliance)
    }

    fn pause(&self, ledger: LedgerId, who: &T::AccountId) -> DispatchResult {
        Pallet::<T>::do_set_paused(ledger, who, true)
    }

    fn unpause(&self, ledger: LedgerId, who: &T::AccountId) -> DispatchResult {
        Pallet::<T>::do_set_paused(ledger, who, false)
    }

    fn mint(
        &self,
        ledger: LedgerId,
        who: &T::AccountId,
        to: T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Pallet::<T>::do_mint(ledger, who, to, amount)
    }

    fn burn(
        &self,
        ledger: LedgerId,
        who: &T::AccountId,
        from: T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Pallet::<T>::do_burn(ledger, who, from, amount)
    }

    fn transfer(
        &self,
        ledger: LedgerId,
        who: &T::AccountId,
        to: T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Pallet::<T>::do_transfer(ledger, who, to, amount)
    }

    fn transfer_from(
        &self,
        ledger: LedgerId,
        who: &T::AccountId,
        owner: T::AccountId,
        to: T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Pallet::<T>::do_transfer_from(ledger, who, owner, to, amount)
    }

    fn approve(
        &self,
        ledger: LedgerId,
        who: &T::AccountId,
        spender: T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Pallet::<T>::do_approve(ledger, who, spender, amount)
    }
}

/// The standard ledger: every operation uses the default semantics.
pub struct StandardLedger;

impl<T: Config> LedgerImplementation<T> for StandardLedger {
    fn version(&self) -> u32 {
        1
    }
}

/// Maps an implementation hash to the behaviour it names.
pub trait ResolveImplementation<T: Config> {
    fn resolve(implementation: &T::Hash) -> Option<Box<dyn LedgerImplementation<T>>>;
}

/// Resolves nothing. Every ledger call fails with `ImplementationUnavailable`.
impl<T: Config> ResolveImplementation<T> for () {
    fn resolve(_: &T::Hash) -> Option<Box<dyn LedgerImplementation<T>>> {
        None
    }
}

/// Try `A` first, then `B`.
impl<T: Config, A: ResolveImplementation<T>, B: ResolveImplementation<T>> ResolveImplementation<T>
    for (A, B)
{
    fn resolve(implementation: &T::Hash) -> Option<Box<dyn LedgerImplementation<T>>> {
        A::resolve(implementation).or_else(|| B::resolve(implementation))
    }
}

/// Resolves the hash given by `Id` to [`StandardLedger`] and nothing else.
pub struct StandardOnly<Id>(PhantomData<Id>);

impl<T: Config, Id: Get<T::Hash>> ResolveImplementation<T> for StandardOnly<Id> {
    fn resolve(implementation: &T::Hash) -> Option<Box<dyn LedgerImplementation<T>>> {
        if *implementation == Id::get() {
            Some(Box::new(StandardLedger))
        } else {
            None
        }
    }
}
