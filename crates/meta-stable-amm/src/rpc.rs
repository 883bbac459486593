//! Read-only queries over pools, backing the runtime APIs.

use super::*;
use crate::fees::current_withdraw_fee;

impl<T: Config> Pallet<T> {
    pub fn get_virtual_price(pool_id: T::PoolId) -> Balance {
        if let Some(pool) = Self::pools(pool_id) {
            return Self::read_local_view(&pool)
                .and_then(|(pool, base_virtual_price)| Ok(Self::pool_virtual_price(pool, base_virtual_price)?))
                .unwrap_or_default();
        };
        Balance::default()
    }

    pub fn get_a(pool_id: T::PoolId) -> Balance {
        Self::get_a_precise_by_id(pool_id) / A_PRECISION
    }

    pub fn get_a_precise_by_id(pool_id: T::PoolId) -> Balance {
        if let Some(pool) = Self::pools(pool_id) {
            return Self::current_a(pool.info()).unwrap_or_default();
        };
        Balance::default()
    }

    pub fn get_currencies(pool_id: T::PoolId) -> Vec<T::CurrencyId> {
        if let Some(pool) = Self::pools(pool_id) {
            return pool.into_info().currency_ids;
        };
        Vec::new()
    }

    pub fn get_currency_index(pool_id: T::PoolId, currency_id: T::CurrencyId) -> Option<u32> {
        let pool = Self::pools(pool_id)?;
        pool.info()
            .currency_ids
            .iter()
            .position(|c| *c == currency_id)
            .map(|i| i as u32)
    }

    pub fn get_currency(pool_id: T::PoolId, index: u32) -> Option<T::CurrencyId> {
        let pool = Self::pools(pool_id)?;
        pool.info().currency_ids.get(index as usize).copied()
    }

    pub fn get_lp_currency(pool_id: T::PoolId) -> Option<T::CurrencyId> {
        Self::pools(pool_id).map(|pool| pool.info().lp_currency_id)
    }

    pub fn get_currency_precision_multipliers(pool_id: T::PoolId) -> Vec<Balance> {
        if let Some(pool) = Self::pools(pool_id) {
            return pool.into_info().token_multipliers;
        };
        Vec::new()
    }

    pub fn get_currency_balances(pool_id: T::PoolId) -> Vec<Balance> {
        if let Some(pool) = Self::pools(pool_id) {
            return pool.into_info().balances;
        };
        Vec::new()
    }

    pub fn get_number_of_currencies(pool_id: T::PoolId) -> u32 {
        if let Some(pool) = Self::pools(pool_id) {
            return pool.info().currency_ids.len() as u32;
        };
        0
    }

    /// Admin fees of currency `currency_index` waiting in the pool account.
    pub fn get_admin_balance(pool_id: T::PoolId, currency_index: usize) -> Option<Balance> {
        let pool = Self::pools(pool_id)?;
        let pool = pool.info();
        let reserve = pool.balances.get(currency_index)?;

        T::MultiCurrency::free_balance(pool.currency_ids[currency_index], &pool.account).checked_sub(*reserve)
    }

    pub fn get_admin_balances(pool_id: T::PoolId) -> Vec<Balance> {
        let mut balances = Vec::new();
        if let Some(pool) = Self::pools(pool_id) {
            for (i, _) in pool.info().currency_ids.iter().enumerate() {
                balances.push(Self::get_admin_balance(pool_id, i).unwrap_or_default());
            }
        };
        balances
    }

    /// Unix time of the last deposit of `who` into the pool, 0 if there never was one.
    pub fn get_deposit_timestamp(pool_id: T::PoolId, who: &T::AccountId) -> u64 {
        DepositTimestamps::<T>::get(pool_id, who)
    }

    /// Withdraw fee rate `who` would be charged right now.
    pub fn get_withdraw_fee(pool_id: T::PoolId, who: &T::AccountId) -> Number {
        Self::pools(pool_id)
            .and_then(|pool| {
                current_withdraw_fee(
                    pool.info().default_withdraw_fee,
                    WithdrawFeeMultipliers::<T>::get(pool_id, who),
                    DepositTimestamps::<T>::get(pool_id, who),
                    Self::now(),
                )
                .ok()
            })
            .unwrap_or_default()
    }

    pub fn calculate_swap(pool_id: T::PoolId, i: usize, j: usize, dx: Balance) -> Result<Balance, DispatchError> {
        let pool = Self::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)?;
        let (pool, base_virtual_price) = Self::read_local_view(&pool)?;
        let (dy, _) = Self::calculate_local_swap(pool, base_virtual_price, i, j, dx)?;
        Ok(dy)
    }

    /// Shares minted by depositing `amounts`, or burnt by withdrawing them when `deposit` is
    /// false. Withdrawals include the withdraw fee `who` currently owes.
    pub fn calculate_currency_amount(
        pool_id: T::PoolId,
        who: &T::AccountId,
        amounts: &[Balance],
        deposit: bool,
    ) -> Result<Balance, DispatchError> {
        let general_pool = Self::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)?;
        let (pool, base_virtual_price) = Self::read_local_view(&general_pool)?;
        let withdraw_fee = Self::withdraw_fee_of(pool_id, pool, who)?;
        Ok(Self::calculate_local_currency_amount(
            pool,
            base_virtual_price,
            amounts,
            deposit,
            withdraw_fee,
        )?)
    }

    pub fn calculate_remove_liquidity(
        pool_id: T::PoolId,
        who: &T::AccountId,
        amount: Balance,
    ) -> Result<Vec<Balance>, DispatchError> {
        let pool = Self::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)?;
        let pool = pool.info();
        let withdraw_fee = Self::withdraw_fee_of(pool_id, pool, who)?;
        Ok(Self::calculate_local_remove_liquidity(pool, amount, withdraw_fee)?)
    }

    pub fn calculate_remove_liquidity_one_currency(
        pool_id: T::PoolId,
        who: &T::AccountId,
        amount: Balance,
        index: u32,
    ) -> Result<Balance, DispatchError> {
        let general_pool = Self::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)?;
        let (pool, base_virtual_price) = Self::read_local_view(&general_pool)?;
        let withdraw_fee = Self::withdraw_fee_of(pool_id, pool, who)?;
        let (dy, _) = Self::calculate_local_remove_liquidity_one_currency(
            pool,
            base_virtual_price,
            amount,
            index as usize,
            withdraw_fee,
        )?;
        Ok(dy)
    }
}
