//! Shared vocabulary for the Clad ledger pallets.
//!
//! The access-control, compliance, ledger and factory pallets never name each other
//! directly. Each one consumes its collaborators through the traits below and the
//! runtime decides which concrete pallet sits behind every seam.

#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::PalletError;
use scale_info::TypeInfo;
use sp_runtime::{traits::TrailingZeroInput, DispatchError};
use sp_std::prelude::*;

/// Identifier of a ledger instance.
pub type LedgerId = u32;

/// Identifier of a compliance policy instance.
pub type PolicyId = u32;

/// Identifier of an instance factory (and of its shared implementation slot).
pub type FactoryId = u32;

/// Fungible quantity held by a principal.
pub type Balance = u128;

/// Capability tags checked on privileged operations.
///
/// Roles are always held *within a scope*: the sovereign account of the ledger or
/// factory they apply to. Holding `Minter` on one ledger says nothing about another.
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
pub enum Role {
    /// May grant and revoke every role in its scope.
    AdminGrantor,
    /// May change metadata and the compliance binding.
    Configurer,
    Minter,
    Burner,
    Pauser,
    /// May create instances from a factory.
    Deployer,
    /// May swap a factory's shared implementation.
    Upgrader,
}

impl Role {
    /// Roles handed to the admin of a freshly initialized ledger.
    pub const LEDGER: [Role; 5] =
        [Role::AdminGrantor, Role::Configurer, Role::Minter, Role::Burner, Role::Pauser];

    /// Roles handed to the admin of a freshly constructed factory.
    pub const FACTORY: [Role; 3] = [Role::AdminGrantor, Role::Deployer, Role::Upgrader];
}

/// The null principal: the account decoded from an all-zero input.
pub fn null_account<AccountId: Decode>() -> AccountId {
    AccountId::decode(&mut TrailingZeroInput::zeroes())
        .expect("infinite length input; no invalid inputs for type; qed")
}

/// Whether `who` is the null principal.
pub fn is_null_account<AccountId: Decode + PartialEq>(who: &AccountId) -> bool {
    *who == null_account::<AccountId>()
}

/// Decode an account from a hash digest. Used to give ledgers and factories a
/// deterministic sovereign account.
pub fn account_from_digest<AccountId: Decode>(digest: &[u8]) -> AccountId {
    AccountId::decode(&mut TrailingZeroInput::new(digest))
        .expect("infinite length input; no invalid inputs for type; qed")
}

/// Role store primitive.
///
/// Implementations perform no caller checks; the consuming pallet decides who may
/// reach `grant_role`/`revoke_role`.
pub trait RoleStore<AccountId> {
    fn has_role(scope: &AccountId, role: Role, who: &AccountId) -> bool;
    fn grant_role(scope: &AccountId, role: Role, who: &AccountId);
    fn revoke_role(scope: &AccountId, role: Role, who: &AccountId);
}

/// Why a compliance check did not pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComplianceError {
    /// The policy evaluated and rejected the account.
    NotCompliant,
    /// The policy could not be evaluated (unknown policy, wrong caller, ...).
    Unavailable(DispatchError),
}

/// Single-method compliance capability consumed by the ledger.
pub trait ComplianceCheck<AccountId> {
    /// Screen `who` against `policy`. `caller` is the identity asking; policies only
    /// answer the ledger they are bound to.
    fn check_compliance(
        policy: PolicyId,
        caller: &AccountId,
        who: &AccountId,
    ) -> Result<(), ComplianceError>;
}

/// No policy engine at all: every account passes.
impl<AccountId> ComplianceCheck<AccountId> for () {
    fn check_compliance(_: PolicyId, _: &AccountId, _: &AccountId) -> Result<(), ComplianceError> {
        Ok(())
    }
}

/// Read side of a shared implementation slot.
pub trait ImplementationSlot<Implementation> {
    /// The implementation currently installed in `slot`, if the slot exists.
    fn implementation(slot: FactoryId) -> Option<Implementation>;
}

/// Initialization payload for a ledger instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerInit<AccountId> {
    pub name: Vec<u8>,
    pub symbol: Vec<u8>,
    pub decimals: u8,
    pub admin: AccountId,
    pub compliance: Option<PolicyId>,
}

/// Instance-creation primitive.
pub trait LedgerInstantiator<AccountId> {
    /// Allocate a ledger bound to `slot` and run `init` against it. Either both
    /// happen or neither does.
    fn instantiate(slot: FactoryId, init: LedgerInit<AccountId>) -> Result<LedgerId, DispatchError>;

    /// Sovereign account of a ledger.
    fn ledger_account(ledger: LedgerId) -> AccountId;
}
