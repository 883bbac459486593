use super::*;

pub trait ValidateCurrency<CurrencyId> {
    fn validate_pooled_currency(a: &[CurrencyId]) -> bool;
    fn validate_pool_lp_currency(a: CurrencyId) -> bool;
}

pub trait StablePoolLpCurrencyIdGenerate<CurrencyId, PoolId> {
    fn generate_by_pool_id(pool_id: PoolId) -> CurrencyId;
}

/// Pricing and liquidity of a pool, as seen by a meta pool routing through it.
pub trait StableAmmApi<PoolId, CurrencyId, AccountId, Balance> {
    fn stable_amm_get_virtual_price(pool_id: PoolId) -> Result<Balance, DispatchError>;

    fn stable_amm_calculate_swap_amount(
        pool_id: PoolId,
        i: usize,
        j: usize,
        in_balance: Balance,
    ) -> Result<Balance, DispatchError>;

    /// Shares minted by depositing, or burnt by withdrawing, `amounts` as `who`.
    fn stable_amm_calculate_currency_amount(
        pool_id: PoolId,
        who: &AccountId,
        amounts: &[Balance],
        deposit: bool,
    ) -> Result<Balance, DispatchError>;

    fn stable_amm_calculate_remove_liquidity_one_currency(
        pool_id: PoolId,
        who: &AccountId,
        amount: Balance,
        index: u32,
    ) -> Result<Balance, DispatchError>;

    fn add_liquidity(
        who: &AccountId,
        pool_id: PoolId,
        amounts: &[Balance],
        min_mint_amount: Balance,
        to: &AccountId,
    ) -> Result<Balance, DispatchError>;

    fn swap(
        who: &AccountId,
        pool_id: PoolId,
        from_index: u32,
        to_index: u32,
        in_amount: Balance,
        min_out_amount: Balance,
        to: &AccountId,
    ) -> Result<Balance, DispatchError>;

    fn remove_liquidity_one_currency(
        who: &AccountId,
        pool_id: PoolId,
        lp_amount: Balance,
        index: u32,
        min_amount: Balance,
        to: &AccountId,
    ) -> Result<Balance, DispatchError>;
}

impl<T: Config> StableAmmApi<T::PoolId, T::CurrencyId, T::AccountId, Balance> for Pallet<T> {
    fn stable_amm_get_virtual_price(pool_id: T::PoolId) -> Result<Balance, DispatchError> {
        let pool = Self::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)?;
        let (pool, base_virtual_price) = Self::read_local_view(&pool)?;
        Ok(Self::pool_virtual_price(pool, base_virtual_price)?)
    }

    fn stable_amm_calculate_swap_amount(
        pool_id: T::PoolId,
        i: usize,
        j: usize,
        in_balance: Balance,
    ) -> Result<Balance, DispatchError> {
        Self::calculate_swap(pool_id, i, j, in_balance)
    }

    fn stable_amm_calculate_currency_amount(
        pool_id: T::PoolId,
        who: &T::AccountId,
        amounts: &[Balance],
        deposit: bool,
    ) -> Result<Balance, DispatchError> {
        Self::calculate_currency_amount(pool_id, who, amounts, deposit)
    }

    fn stable_amm_calculate_remove_liquidity_one_currency(
        pool_id: T::PoolId,
        who: &T::AccountId,
        amount: Balance,
        index: u32,
    ) -> Result<Balance, DispatchError> {
        Self::calculate_remove_liquidity_one_currency(pool_id, who, amount, index)
    }

    #[transactional]
    fn add_liquidity(
        who: &T::AccountId,
        pool_id: T::PoolId,
        amounts: &[Balance],
        min_mint_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        Self::inner_add_liquidity(who, pool_id, amounts, min_mint_amount, to)
    }

    #[transactional]
    fn swap(
        who: &T::AccountId,
        pool_id: T::PoolId,
        from_index: u32,
        to_index: u32,
        in_amount: Balance,
        min_out_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        Self::inner_swap(
            who,
            pool_id,
            from_index as usize,
            to_index as usize,
            in_amount,
            min_out_amount,
            to,
        )
    }

    #[transactional]
    fn remove_liquidity_one_currency(
        who: &T::AccountId,
        pool_id: T::PoolId,
        lp_amount: Balance,
        index: u32,
        min_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        Self::inner_remove_liquidity_one_currency(pool_id, who, lp_amount, index, min_amount, to)
    }
}
