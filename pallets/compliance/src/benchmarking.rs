//! Benchmarking setup for pallet-clad-compliance

use super::*;

#[allow(unused)]
use crate::Pallet as Compliance;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

/// Policy 0, bound to a benchmark ledger account and owned by `owner`.
fn setup_policy<T: Config>(owner: &T::AccountId) -> PolicyId {
    let ledger: T::AccountId = account("ledger", 0, 0);
    Pallet::<T>::do_create_policy(ledger, owner.clone()).expect("non-null accounts")
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn create_policy() {
        let caller: T::AccountId = whitelisted_caller();
        let ledger: T::AccountId = account("ledger", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), ledger.clone(), caller.clone());

        assert_eq!(Policies::<T>::get(0).map(|p| p.ledger), Some(ledger));
    }

    #[benchmark]
    fn set_whitelist_required() {
        let owner: T::AccountId = whitelisted_caller();
        let policy = setup_policy::<T>(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), policy, true);

        assert!(Pallet::<T>::whitelist_required(policy));
    }

    #[benchmark]
    fn set_whitelist(n: Linear<1, 1_000>) {
        let owner: T::AccountId = whitelisted_caller();
        let policy = setup_policy::<T>(&owner);
        let accounts: Vec<T::AccountId> = (0..n).map(|i| account("member", i, 0)).collect();
        // Worst case: every entry also clears a blacklist entry.
        for who in &accounts {
            Blacklist::<T>::insert(policy, who, true);
        }
        let last = accounts.last().cloned().expect("n >= 1");

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), policy, accounts, true);

        assert!(Pallet::<T>::is_whitelisted(policy, &last));
        assert!(!Pallet::<T>::is_blacklisted(policy, &last));
    }

    #[benchmark]
    fn set_blacklist(n: Linear<1, 1_000>) {
        let owner: T::AccountId = whitelisted_caller();
        let policy = setup_policy::<T>(&owner);
        let accounts: Vec<T::AccountId> = (0..n).map(|i| account("member", i, 0)).collect();
        for who in &accounts {
            Whitelist::<T>::insert(policy, who, true);
        }
        let last = accounts.last().cloned().expect("n >= 1");

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), policy, accounts, true);

        assert!(Pallet::<T>::is_blacklisted(policy, &last));
        assert!(!Pallet::<T>::is_whitelisted(policy, &last));
    }

    impl_benchmark_test_suite!(Compliance, crate::mock::new_test_ext(), crate::mock::Test);
}
