use super::*;
use crate::{
    math::{mul_div, MathError},
    router::UnderlyingIndex,
    traits::StableAmmApi,
};

impl<T: Config> Pallet<T> {
    fn underlying_currency(meta_pool: &MetaPoolOf<T>, index: UnderlyingIndex) -> T::CurrencyId {
        match index {
            UnderlyingIndex::Local(i) => meta_pool.info.currency_ids[i],
            UnderlyingIndex::Base(i) => meta_pool.base_currencies[i],
        }
    }

    fn base_lp_index(meta_pool: &MetaPoolOf<T>) -> Result<usize, Error<T>> {
        meta_pool
            .info
            .currency_ids
            .len()
            .checked_sub(1)
            .ok_or(Error::<T>::InvalidBasePool)
    }

    fn meta_pool_of(pool_id: T::PoolId, base_pool_id: T::PoolId) -> Result<MetaPoolOf<T>, Error<T>> {
        match Self::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)? {
            Pool::Meta(mp) => {
                ensure!(mp.base_pool_id == base_pool_id, Error::<T>::MismatchParameter);
                Ok(mp)
            }
            Pool::Base(_) => Err(Error::<T>::InvalidPoolId),
        }
    }

    pub(crate) fn inner_swap_underlying(
        who: &T::AccountId,
        pool_id: T::PoolId,
        in_index: usize,
        out_index: usize,
        dx: Balance,
        min_dy: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> Result<Balance, DispatchError> {
            let meta_pool = match optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)? {
                Pool::Meta(mp) => mp,
                Pool::Base(_) => return Err(Error::<T>::InvalidPoolId.into()),
            };
            let base_virtual_price = Self::update_base_virtual_price(pool_id, meta_pool)?;

            let from = Self::resolve_underlying(meta_pool, in_index)?;
            let into = Self::resolve_underlying(meta_pool, out_index)?;
            ensure!(from != into, Error::<T>::SwapSameCurrency);

            let account = meta_pool.info.account.clone();
            let base_pool_id = meta_pool.base_pool_id;
            let base_lp_index = Self::base_lp_index(meta_pool)?;
            let currency_in = Self::underlying_currency(meta_pool, from);
            let currency_out = Self::underlying_currency(meta_pool, into);

            let in_amount = Self::do_transfer_in(currency_in, who, &account, dx)?;

            let out_amount = if let (UnderlyingIndex::Base(i), UnderlyingIndex::Base(j)) = (from, into) {
                let out_before = T::MultiCurrency::free_balance(currency_out, &account);
                <Self as StableAmmApi<_, _, _, Balance>>::swap(
                    &account,
                    base_pool_id,
                    i as u32,
                    j as u32,
                    in_amount,
                    min_dy,
                    &account,
                )?;
                T::MultiCurrency::free_balance(currency_out, &account)
                    .checked_sub(out_before)
                    .ok_or(Error::<T>::Arithmetic)?
            } else {
                let (meta_i, meta_dx) = match from {
                    UnderlyingIndex::Local(i) => (i, in_amount),
                    UnderlyingIndex::Base(i) => {
                        let mut base_amounts = vec![Zero::zero(); meta_pool.base_currencies.len()];
                        base_amounts[i] = in_amount;
                        let minted = <Self as StableAmmApi<_, _, _, Balance>>::add_liquidity(
                            &account,
                            base_pool_id,
                            &base_amounts,
                            0,
                            &account,
                        )?;
                        (base_lp_index, minted)
                    }
                };
                let meta_j = match into {
                    UnderlyingIndex::Local(j) => j,
                    UnderlyingIndex::Base(_) => base_lp_index,
                };

                let (dy, admin_fee) =
                    Self::calculate_local_swap(&meta_pool.info, Some(base_virtual_price), meta_i, meta_j, meta_dx)?;

                let balances = &mut meta_pool.info.balances;
                balances[meta_i] = balances[meta_i].checked_add(meta_dx).ok_or(Error::<T>::Arithmetic)?;
                balances[meta_j] = balances[meta_j]
                    .checked_sub(dy)
                    .and_then(|n| n.checked_sub(admin_fee))
                    .ok_or(Error::<T>::Arithmetic)?;

                match into {
                    UnderlyingIndex::Local(_) => dy,
                    UnderlyingIndex::Base(j) => {
                        let out_before = T::MultiCurrency::free_balance(currency_out, &account);
                        <Self as StableAmmApi<_, _, _, Balance>>::remove_liquidity_one_currency(
                            &account,
                            base_pool_id,
                            dy,
                            j as u32,
                            0,
                            &account,
                        )?;
                        T::MultiCurrency::free_balance(currency_out, &account)
                            .checked_sub(out_before)
                            .ok_or(Error::<T>::Arithmetic)?
                    }
                }
            };

            ensure!(out_amount >= min_dy, Error::<T>::AmountSlippage);
            T::MultiCurrency::transfer(currency_out, &account, to, out_amount)?;

            log::trace!(
                target: LOG_TARGET,
                "pool {:?}: swapped {} of underlying #{} for {} of underlying #{}",
                pool_id,
                in_amount,
                in_index,
                out_amount,
                out_index
            );
            Self::deposit_event(Event::CurrencyExchangeUnderlying {
                pool_id,
                account: who.clone(),
                in_amount,
                out_amount,
                currency_index_from: in_index as u32,
                currency_index_to: out_index as u32,
                to: to.clone(),
            });
            Ok(out_amount)
        })
    }

    /// Output of swapping `dx` between two underlying currencies of a meta pool.
    ///
    /// Deposits into the base pool are valued without their imbalance fee, half the base
    /// pool swap fee is deducted instead. The result may differ slightly from what
    /// `swap_meta_pool_underlying` pays out.
    pub fn calculate_meta_swap_underlying(
        pool_id: T::PoolId,
        in_index: usize,
        out_index: usize,
        dx: Balance,
    ) -> Result<Balance, DispatchError> {
        let meta_pool = match Self::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)? {
            Pool::Meta(mp) => mp,
            Pool::Base(_) => return Err(Error::<T>::InvalidPoolId.into()),
        };
        let base_virtual_price = Self::read_base_virtual_price(&meta_pool)?;

        let from = Self::resolve_underlying(&meta_pool, in_index)?;
        let into = Self::resolve_underlying(&meta_pool, out_index)?;
        ensure!(from != into, Error::<T>::SwapSameCurrency);

        let base_pool_id = meta_pool.base_pool_id;
        if let (UnderlyingIndex::Base(i), UnderlyingIndex::Base(j)) = (from, into) {
            return Self::stable_amm_calculate_swap_amount(base_pool_id, i, j, dx);
        }

        let info = &meta_pool.info;
        let base_lp_index = Self::base_lp_index(&meta_pool)?;
        let xp = Self::normalized_balances(info, &info.balances, Some(base_virtual_price))?;

        let (meta_i, x) = match from {
            UnderlyingIndex::Local(i) => {
                let x = dx
                    .checked_mul(info.token_multipliers[i])
                    .and_then(|n| n.checked_add(xp[i]))
                    .ok_or(Error::<T>::Arithmetic)?;
                (i, x)
            }
            UnderlyingIndex::Base(i) => {
                let mut base_amounts = vec![Zero::zero(); meta_pool.base_currencies.len()];
                base_amounts[i] = dx;
                let base_lp_amount =
                    Self::stable_amm_calculate_currency_amount(base_pool_id, &info.account, &base_amounts, true)?;
                let base_fee = Self::pools(base_pool_id)
                    .ok_or(Error::<T>::InvalidBasePool)?
                    .info()
                    .fee;

                let x = base_lp_amount
                    .checked_mul(info.token_multipliers[base_lp_index])
                    .ok_or(MathError::Overflow)
                    .and_then(|n| mul_div(n, base_virtual_price, BASE_VIRTUAL_PRICE_PRECISION))
                    .map_err(Error::<T>::from)?;
                let half_fee = mul_div(x, base_fee, FEE_DENOMINATOR * 2).map_err(Error::<T>::from)?;
                let x = x
                    .checked_sub(half_fee)
                    .and_then(|n| n.checked_add(xp[base_lp_index]))
                    .ok_or(Error::<T>::Arithmetic)?;
                (base_lp_index, x)
            }
        };
        let meta_j = match into {
            UnderlyingIndex::Local(j) => j,
            UnderlyingIndex::Base(_) => base_lp_index,
        };

        let (dy, _) = Self::swap_to_normalized(info, Some(base_virtual_price), &xp, meta_i, meta_j, x)?;
        match into {
            UnderlyingIndex::Local(_) => Ok(dy),
            UnderlyingIndex::Base(j) => {
                Self::stable_amm_calculate_remove_liquidity_one_currency(base_pool_id, &info.account, dy, j as u32)
            }
        }
    }

    pub(crate) fn inner_add_pool_and_base_pool_liquidity(
        who: &T::AccountId,
        pool_id: T::PoolId,
        base_pool_id: T::PoolId,
        mut meta_amounts: Vec<Balance>,
        base_amounts: &[Balance],
        min_to_mint: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        let meta_pool = Self::meta_pool_of(pool_id, base_pool_id)?;
        ensure!(
            meta_amounts.len() == meta_pool.info.currency_ids.len(),
            Error::<T>::MismatchParameter
        );
        ensure!(
            base_amounts.len() == meta_pool.base_currencies.len(),
            Error::<T>::MismatchParameter
        );

        let base_lp_index = Self::base_lp_index(&meta_pool)?;
        meta_amounts[base_lp_index] = if base_amounts.iter().any(|amount| !amount.is_zero()) {
            <Self as StableAmmApi<_, _, _, Balance>>::add_liquidity(who, base_pool_id, base_amounts, 0, who)?
        } else {
            Zero::zero()
        };

        Self::inner_add_liquidity(who, pool_id, &meta_amounts, min_to_mint, to)
    }

    /// Returns the amounts of the base pool currencies paid out.
    pub(crate) fn inner_remove_pool_and_base_pool_liquidity(
        who: &T::AccountId,
        pool_id: T::PoolId,
        base_pool_id: T::PoolId,
        amount: Balance,
        min_amounts_meta: &[Balance],
        min_amounts_base: &[Balance],
        to: &T::AccountId,
    ) -> Result<Vec<Balance>, DispatchError> {
        let meta_pool = Self::meta_pool_of(pool_id, base_pool_id)?;
        let base_lp_currency = meta_pool.info.currency_ids[Self::base_lp_index(&meta_pool)?];

        let base_lp_before = T::MultiCurrency::free_balance(base_lp_currency, who);
        Self::inner_remove_liquidity(pool_id, who, amount, min_amounts_meta, who)?;
        let base_lp_amount = T::MultiCurrency::free_balance(base_lp_currency, who)
            .checked_sub(base_lp_before)
            .ok_or(Error::<T>::Arithmetic)?;

        Self::inner_remove_liquidity(base_pool_id, who, base_lp_amount, min_amounts_base, to)
    }

    pub(crate) fn inner_remove_pool_and_base_pool_liquidity_one_currency(
        who: &T::AccountId,
        pool_id: T::PoolId,
        base_pool_id: T::PoolId,
        amount: Balance,
        i: u32,
        min_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        let meta_pool = Self::meta_pool_of(pool_id, base_pool_id)?;
        let base_lp_index = Self::base_lp_index(&meta_pool)?;
        let base_lp_currency = meta_pool.info.currency_ids[base_lp_index];

        let base_lp_before = T::MultiCurrency::free_balance(base_lp_currency, who);
        Self::inner_remove_liquidity_one_currency(pool_id, who, amount, base_lp_index as u32, 0, who)?;
        let base_lp_amount = T::MultiCurrency::free_balance(base_lp_currency, who)
            .checked_sub(base_lp_before)
            .ok_or(Error::<T>::Arithmetic)?;

        Self::inner_remove_liquidity_one_currency(base_pool_id, who, base_lp_amount, i, min_amount, to)
    }
}
