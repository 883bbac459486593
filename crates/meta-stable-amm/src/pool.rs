//! Liquidity and swap operations on the currencies a pool holds itself.
//!
//! Base pools and meta pools share these. A meta pool passes the virtual price of the base pool
//! LP currency it keeps in its last slot, a base pool passes `None`.

use super::*;
use crate::{
    amplification::a_precise,
    fees::charge_imbalance_fees,
    math::{apply_rate, compute_d, compute_y, compute_y_d, fee_per_token, meta_xp, mul_div, xp},
};

impl<T: Config> Pallet<T> {
    pub(crate) fn inner_create_pool(
        currency_ids: &[T::CurrencyId],
        currency_decimals: Vec<u32>,
        a: Number,
        fee: Number,
        admin_fee: Number,
        admin_fee_receiver: &T::AccountId,
        lp_currency_symbol: Vec<u8>,
    ) -> Result<(BasePoolOf<T>, T::PoolId), DispatchError> {
        ensure!(currency_ids.len() >= MIN_POOL_CURRENCIES, Error::<T>::TooFewCurrencies);
        ensure!(currency_ids.len() <= MAX_POOL_CURRENCIES, Error::<T>::TooManyCurrencies);
        ensure!(
            T::EnsurePoolAsset::validate_pooled_currency(currency_ids),
            Error::<T>::InvalidPooledCurrency
        );
        for (i, currency_id) in currency_ids.iter().enumerate() {
            ensure!(!currency_ids[..i].contains(currency_id), Error::<T>::DuplicateCurrency);
        }

        ensure!(currency_ids.len() == currency_decimals.len(), Error::<T>::MismatchParameter);
        ensure!(!a.is_zero(), Error::<T>::ExceedThreshold);
        ensure!(a < MAX_A, Error::<T>::ExceedMaxA);
        ensure!(fee <= MAX_SWAP_FEE, Error::<T>::ExceedMaxFee);
        ensure!(admin_fee <= MAX_ADMIN_FEE, Error::<T>::ExceedMaxAdminFee);

        let mut token_multipliers = Vec::with_capacity(currency_decimals.len());
        for decimal in currency_decimals.iter() {
            ensure!(*decimal <= POOL_TOKEN_COMMON_DECIMALS, Error::<T>::InvalidCurrencyDecimal);
            let multiplier = checked_pow(Balance::from(10u32), (POOL_TOKEN_COMMON_DECIMALS - decimal) as usize)
                .ok_or(Error::<T>::Arithmetic)?;
            token_multipliers.push(multiplier);
        }

        let pool_id = Self::next_pool_id();
        let lp_currency_id = T::LpGenerate::generate_by_pool_id(pool_id);

        ensure!(
            Self::lp_currencies(lp_currency_id).is_none(),
            Error::<T>::LpCurrencyAlreadyUsed
        );
        ensure!(
            T::EnsurePoolAsset::validate_pool_lp_currency(lp_currency_id),
            Error::<T>::InvalidLpCurrency
        );

        let account = T::PalletId::get().into_sub_account_truncating(pool_id);
        frame_system::Pallet::<T>::inc_providers(&account);
        let a_with_precision = a.checked_mul(A_PRECISION).ok_or(Error::<T>::Arithmetic)?;

        let symbol: PoolSymbolOf<T> = lp_currency_symbol
            .try_into()
            .map_err(|_| Error::<T>::BadPoolCurrencySymbol)?;

        Ok((
            BasePool {
                currency_ids: currency_ids.to_vec(),
                lp_currency_id,
                token_multipliers,
                balances: vec![Zero::zero(); currency_ids.len()],
                fee,
                admin_fee,
                default_withdraw_fee: Zero::zero(),
                initial_a: a_with_precision,
                future_a: a_with_precision,
                initial_a_time: 0,
                future_a_time: 0,
                account,
                admin_fee_receiver: admin_fee_receiver.clone(),
                lp_currency_symbol: symbol,
            },
            pool_id,
        ))
    }

    pub(crate) fn current_a(pool: &BasePoolOf<T>) -> Result<Number, Error<T>> {
        Ok(a_precise(pool, Self::now())?)
    }

    /// `balances` in common precision, the base pool LP slot valued at `base_virtual_price`.
    pub(crate) fn normalized_balances(
        pool: &BasePoolOf<T>,
        balances: &[Balance],
        base_virtual_price: Option<Balance>,
    ) -> Result<Vec<Balance>, Error<T>> {
        Ok(match base_virtual_price {
            Some(virtual_price) => meta_xp(balances, &pool.token_multipliers, virtual_price)?,
            None => xp(balances, &pool.token_multipliers)?,
        })
    }

    pub(crate) fn invariant(
        pool: &BasePoolOf<T>,
        balances: &[Balance],
        base_virtual_price: Option<Balance>,
        amp: Number,
    ) -> Result<Balance, Error<T>> {
        let normalized = Self::normalized_balances(pool, balances, base_virtual_price)?;
        Ok(compute_d(&normalized, amp)?)
    }

    /// Value of one LP share in BASE_VIRTUAL_PRICE_PRECISION, zero while nothing is minted.
    pub(crate) fn pool_virtual_price(
        pool: &BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
    ) -> Result<Balance, Error<T>> {
        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        if total_supply.is_zero() {
            return Ok(Zero::zero());
        }

        let d = Self::invariant(pool, &pool.balances, base_virtual_price, Self::current_a(pool)?)?;
        Ok(mul_div(d, BASE_VIRTUAL_PRICE_PRECISION, total_supply)?)
    }

    /// The virtual price to value currency `index` at, if it is the base pool LP slot.
    fn base_lp_price(pool: &BasePoolOf<T>, base_virtual_price: Option<Balance>, index: usize) -> Option<Balance> {
        base_virtual_price.filter(|_| index + 1 == pool.currency_ids.len())
    }

    /// Output amount and admin fee, both in currency `j`, of swapping `dx` of currency `i`.
    pub(crate) fn calculate_local_swap(
        pool: &BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        i: usize,
        j: usize,
        dx: Balance,
    ) -> Result<(Balance, Balance), Error<T>> {
        let n_currencies = pool.currency_ids.len();
        ensure!(i != j, Error::<T>::SwapSameCurrency);
        ensure!(i < n_currencies && j < n_currencies, Error::<T>::CurrencyIndexOutRange);

        let normalized_balances = Self::normalized_balances(pool, &pool.balances, base_virtual_price)?;

        let mut x = dx
            .checked_mul(pool.token_multipliers[i])
            .ok_or(Error::<T>::Arithmetic)?;
        if let Some(virtual_price) = Self::base_lp_price(pool, base_virtual_price, i) {
            x = mul_div(x, virtual_price, BASE_VIRTUAL_PRICE_PRECISION)?;
        }
        let x = x.checked_add(normalized_balances[i]).ok_or(Error::<T>::Arithmetic)?;

        Self::swap_to_normalized(pool, base_virtual_price, &normalized_balances, i, j, x)
    }

    /// Output amount and admin fee, both in currency `j`, once the normalized balance of
    /// currency `i` moved to `x`.
    pub(crate) fn swap_to_normalized(
        pool: &BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        normalized_balances: &[Balance],
        i: usize,
        j: usize,
        x: Balance,
    ) -> Result<(Balance, Balance), Error<T>> {
        let amp = Self::current_a(pool)?;
        let y = compute_y(amp, i, j, x, normalized_balances)?;

        let mut dy = normalized_balances[j]
            .checked_sub(y)
            .and_then(|n| n.checked_sub(One::one()))
            .ok_or(Error::<T>::Arithmetic)?;
        if let Some(virtual_price) = Self::base_lp_price(pool, base_virtual_price, j) {
            dy = mul_div(dy, BASE_VIRTUAL_PRICE_PRECISION, virtual_price)?;
        }

        let dy_fee = apply_rate(dy, pool.fee)?;
        let multiplier = pool.token_multipliers[j];
        let out_amount = dy
            .checked_sub(dy_fee)
            .and_then(|n| n.checked_div(multiplier))
            .ok_or(Error::<T>::Arithmetic)?;
        let admin_fee = apply_rate(dy_fee, pool.admin_fee)?
            .checked_div(multiplier)
            .ok_or(Error::<T>::Arithmetic)?;

        Ok((out_amount, admin_fee))
    }

    /// Amounts paid out for burning `amount` shares in a balanced withdrawal.
    pub(crate) fn calculate_local_remove_liquidity(
        pool: &BasePoolOf<T>,
        amount: Balance,
        withdraw_fee: Number,
    ) -> Result<Vec<Balance>, Error<T>> {
        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        ensure!(!total_supply.is_zero(), Error::<T>::InsufficientLpReserve);
        ensure!(amount <= total_supply, Error::<T>::InsufficientReserve);

        let amount = Self::after_withdraw_fee(amount, withdraw_fee)?;
        pool.balances
            .iter()
            .map(|balance| mul_div(*balance, amount, total_supply).map_err(Error::<T>::from))
            .collect()
    }

    /// Amount of currency `index` paid out for burning `amount` shares, and the swap fee kept
    /// by the pool.
    pub(crate) fn calculate_local_remove_liquidity_one_currency(
        pool: &BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        amount: Balance,
        index: usize,
        withdraw_fee: Number,
    ) -> Result<(Balance, Balance), Error<T>> {
        let n_currencies = pool.currency_ids.len();
        ensure!(index < n_currencies, Error::<T>::CurrencyIndexOutRange);
        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        ensure!(!total_supply.is_zero(), Error::<T>::InsufficientLpReserve);
        ensure!(amount <= total_supply, Error::<T>::InsufficientReserve);

        let amp = Self::current_a(pool)?;
        let xp = Self::normalized_balances(pool, &pool.balances, base_virtual_price)?;
        let d0 = compute_d(&xp, amp)?;
        let d1 = d0
            .checked_sub(mul_div(amount, d0, total_supply)?)
            .ok_or(Error::<T>::Arithmetic)?;
        let mut new_y = compute_y_d(amp, index, &xp, d1)?;

        let fee_per_token = fee_per_token(pool.fee, n_currencies)?;
        let mut xp_reduced = Vec::with_capacity(n_currencies);
        for (i, x) in xp.iter().enumerate() {
            let ideal = mul_div(*x, d1, d0)?;
            let expected_dx = if i == index {
                ideal.checked_sub(new_y)
            } else {
                x.checked_sub(ideal)
            }
            .ok_or(Error::<T>::Arithmetic)?;
            xp_reduced.push(
                x.checked_sub(apply_rate(expected_dx, fee_per_token)?)
                    .ok_or(Error::<T>::Arithmetic)?,
            );
        }

        let mut dy = xp_reduced[index]
            .checked_sub(compute_y_d(amp, index, &xp_reduced, d1)?)
            .ok_or(Error::<T>::Arithmetic)?;
        let mut xp_index = xp[index];
        if let Some(virtual_price) = Self::base_lp_price(pool, base_virtual_price, index) {
            dy = mul_div(dy, BASE_VIRTUAL_PRICE_PRECISION, virtual_price)?;
            new_y = mul_div(new_y, BASE_VIRTUAL_PRICE_PRECISION, virtual_price)?;
            xp_index = mul_div(xp_index, BASE_VIRTUAL_PRICE_PRECISION, virtual_price)?;
        }

        let multiplier = pool.token_multipliers[index];
        let dy = dy
            .checked_sub(One::one())
            .and_then(|n| n.checked_div(multiplier))
            .ok_or(Error::<T>::Arithmetic)?;
        let swap_fee = xp_index
            .checked_sub(new_y)
            .and_then(|n| n.checked_div(multiplier))
            .and_then(|n| n.checked_sub(dy))
            .ok_or(Error::<T>::Arithmetic)?;

        Ok((Self::after_withdraw_fee(dy, withdraw_fee)?, swap_fee))
    }

    /// Shares minted for a deposit of `amounts`, or burnt for a withdrawal of them.
    ///
    /// Imbalance fees are not taken into account. Withdrawals are grossed up by `withdraw_fee`.
    pub(crate) fn calculate_local_currency_amount(
        pool: &BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        amounts: &[Balance],
        deposit: bool,
        withdraw_fee: Number,
    ) -> Result<Balance, Error<T>> {
        ensure!(pool.currency_ids.len() == amounts.len(), Error::<T>::MismatchParameter);
        let amp = Self::current_a(pool)?;
        let d0 = Self::invariant(pool, &pool.balances, base_virtual_price, amp)?;

        let mut new_balances = pool.balances.clone();
        for (balance, amount) in new_balances.iter_mut().zip(amounts.iter()) {
            *balance = if deposit {
                balance.checked_add(*amount)
            } else {
                balance.checked_sub(*amount)
            }
            .ok_or(Error::<T>::InsufficientReserve)?;
        }
        let d1 = Self::invariant(pool, &new_balances, base_virtual_price, amp)?;

        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        if total_supply.is_zero() {
            // first depositor take it all
            return Ok(d1);
        }

        let diff = if deposit { d1.checked_sub(d0) } else { d0.checked_sub(d1) }.ok_or(Error::<T>::Arithmetic)?;
        let amount = mul_div(diff, total_supply, d0)?;
        if deposit {
            return Ok(amount);
        }

        let rate = FEE_DENOMINATOR
            .checked_sub(withdraw_fee)
            .ok_or(Error::<T>::Arithmetic)?;
        Ok(mul_div(amount, FEE_DENOMINATOR, rate)?)
    }

    /// Shares burnt for withdrawing exactly `amounts`.
    ///
    /// Returns the burn amount before rounding up and the withdraw fee, the imbalance fees, the
    /// invariant after the withdrawal and the balances the pool accounts for afterwards.
    pub(crate) fn calculate_local_remove_liquidity_imbalance(
        pool: &BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        amounts: &[Balance],
        total_supply: Balance,
    ) -> Result<(Balance, Vec<Balance>, Balance, Vec<Balance>), Error<T>> {
        let n_currencies = pool.currency_ids.len();
        ensure!(amounts.len() == n_currencies, Error::<T>::MismatchParameter);
        let amp = Self::current_a(pool)?;
        let d0 = Self::invariant(pool, &pool.balances, base_virtual_price, amp)?;

        let mut new_balances = pool.balances.clone();
        for (balance, amount) in new_balances.iter_mut().zip(amounts.iter()) {
            *balance = balance.checked_sub(*amount).ok_or(Error::<T>::InsufficientReserve)?;
        }
        let d1 = Self::invariant(pool, &new_balances, base_virtual_price, amp)?;

        let (fees, accounted) = charge_imbalance_fees(
            &pool.balances,
            &mut new_balances,
            d0,
            d1,
            fee_per_token(pool.fee, n_currencies)?,
            pool.admin_fee,
        )?;
        let d2 = Self::invariant(pool, &new_balances, base_virtual_price, amp)?;

        let burn_amount = d0
            .checked_sub(d2)
            .ok_or(Error::<T>::Arithmetic)
            .and_then(|diff| Ok(mul_div(diff, total_supply, d0)?))?;

        Ok((burn_amount, fees, d2, accounted))
    }

    pub(crate) fn do_transfer_in(
        currency_id: T::CurrencyId,
        from: &T::AccountId,
        to: &T::AccountId,
        amount: Balance,
    ) -> Result<Balance, Error<T>> {
        let to_prior_balance = T::MultiCurrency::free_balance(currency_id, to);
        T::MultiCurrency::transfer(currency_id, from, to, amount).map_err(|_| Error::<T>::InsufficientReserve)?;
        let to_new_balance = T::MultiCurrency::free_balance(currency_id, to);

        to_new_balance
            .checked_sub(to_prior_balance)
            .ok_or(Error::<T>::Arithmetic)
    }

    pub(crate) fn local_add_liquidity(
        who: &T::AccountId,
        pool_id: T::PoolId,
        pool: &mut BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        amounts: &[Balance],
        min_mint_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        let n_currencies = pool.currency_ids.len();
        ensure!(n_currencies == amounts.len(), Error::<T>::MismatchParameter);

        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        let amp = Self::current_a(pool)?;
        let d0 = if total_supply.is_zero() {
            Zero::zero()
        } else {
            Self::invariant(pool, &pool.balances, base_virtual_price, amp)?
        };

        let mut new_balances = pool.balances.clone();
        for (i, amount) in amounts.iter().enumerate() {
            if total_supply.is_zero() {
                ensure!(!amount.is_zero(), Error::<T>::RequireAllCurrencies);
            }
            if amount.is_zero() {
                continue;
            }
            let received = Self::do_transfer_in(pool.currency_ids[i], who, &pool.account, *amount)?;
            new_balances[i] = new_balances[i].checked_add(received).ok_or(Error::<T>::Arithmetic)?;
        }

        let d1 = Self::invariant(pool, &new_balances, base_virtual_price, amp)?;
        ensure!(d1 > d0, Error::<T>::CheckDFailed);

        let (mint_amount, fees, new_d) = if total_supply.is_zero() {
            pool.balances = new_balances;
            (d1, vec![Zero::zero(); n_currencies], d1)
        } else {
            let (fees, accounted) = charge_imbalance_fees(
                &pool.balances,
                &mut new_balances,
                d0,
                d1,
                fee_per_token(pool.fee, n_currencies).map_err(Error::<T>::from)?,
                pool.admin_fee,
            )
            .map_err(Error::<T>::from)?;
            pool.balances = accounted;

            let d2 = Self::invariant(pool, &new_balances, base_virtual_price, amp)?;
            let minted = d2
                .checked_sub(d0)
                .ok_or(Error::<T>::Arithmetic)
                .and_then(|diff| Ok(mul_div(total_supply, diff, d0)?))?;
            (minted, fees, d2)
        };

        ensure!(min_mint_amount <= mint_amount, Error::<T>::AmountSlippage);

        Self::update_withdraw_fee(pool_id, pool, to, mint_amount)?;
        T::MultiCurrency::deposit(pool.lp_currency_id, to, mint_amount)?;

        log::trace!(
            target: LOG_TARGET,
            "pool {:?}: {:?} supplied {:?}, minted {} to {:?}",
            pool_id,
            who,
            amounts,
            mint_amount,
            to
        );
        Self::deposit_event(Event::AddLiquidity {
            pool_id,
            who: who.clone(),
            to: to.clone(),
            supply_amounts: amounts.to_vec(),
            fees,
            new_d,
            mint_amount,
        });
        Ok(mint_amount)
    }

    pub(crate) fn local_swap(
        who: &T::AccountId,
        pool_id: T::PoolId,
        pool: &mut BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        i: usize,
        j: usize,
        in_amount: Balance,
        out_min_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        let n_currencies = pool.currency_ids.len();
        ensure!(i != j, Error::<T>::SwapSameCurrency);
        ensure!(i < n_currencies && j < n_currencies, Error::<T>::CurrencyIndexOutRange);

        let in_amount = Self::do_transfer_in(pool.currency_ids[i], who, &pool.account, in_amount)?;
        let (out_amount, admin_fee) = Self::calculate_local_swap(pool, base_virtual_price, i, j, in_amount)?;

        ensure!(out_amount >= out_min_amount, Error::<T>::AmountSlippage);

        pool.balances[i] = pool.balances[i].checked_add(in_amount).ok_or(Error::<T>::Arithmetic)?;
        pool.balances[j] = pool.balances[j]
            .checked_sub(out_amount)
            .and_then(|n| n.checked_sub(admin_fee))
            .ok_or(Error::<T>::Arithmetic)?;

        T::MultiCurrency::transfer(pool.currency_ids[j], &pool.account, to, out_amount)
            .map_err(|_| Error::<T>::InsufficientReserve)?;

        log::trace!(
            target: LOG_TARGET,
            "pool {:?}: swapped {} of #{} for {} of #{}",
            pool_id,
            in_amount,
            i,
            out_amount,
            j
        );
        Self::deposit_event(Event::CurrencyExchange {
            pool_id,
            who: who.clone(),
            to: to.clone(),
            in_index: i as u32,
            in_amount,
            out_index: j as u32,
            out_amount,
        });

        Ok(out_amount)
    }

    pub(crate) fn local_remove_liquidity(
        who: &T::AccountId,
        pool_id: T::PoolId,
        pool: &mut BasePoolOf<T>,
        lp_amount: Balance,
        min_amounts: &[Balance],
        to: &T::AccountId,
    ) -> Result<Vec<Balance>, DispatchError> {
        ensure!(!lp_amount.is_zero(), Error::<T>::InvalidTransaction);
        ensure!(
            lp_amount <= T::MultiCurrency::free_balance(pool.lp_currency_id, who),
            Error::<T>::InsufficientSupply
        );
        ensure!(pool.currency_ids.len() == min_amounts.len(), Error::<T>::MismatchParameter);

        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        let withdraw_fee = Self::withdraw_fee_of(pool_id, pool, who)?;
        let amounts = Self::calculate_local_remove_liquidity(pool, lp_amount, withdraw_fee)?;

        let mut fees = Vec::with_capacity(amounts.len());
        for (i, amount) in amounts.iter().enumerate() {
            ensure!(*amount >= min_amounts[i], Error::<T>::AmountSlippage);
            let share = mul_div(pool.balances[i], lp_amount, total_supply).map_err(Error::<T>::from)?;
            fees.push(share.saturating_sub(*amount));

            pool.balances[i] = pool.balances[i].checked_sub(*amount).ok_or(Error::<T>::Arithmetic)?;
            T::MultiCurrency::transfer(pool.currency_ids[i], &pool.account, to, *amount)?;
        }

        T::MultiCurrency::withdraw(pool.lp_currency_id, who, lp_amount)?;

        log::trace!(
            target: LOG_TARGET,
            "pool {:?}: {:?} burnt {} for {:?}",
            pool_id,
            who,
            lp_amount,
            amounts
        );
        Self::deposit_event(Event::RemoveLiquidity {
            pool_id,
            who: who.clone(),
            to: to.clone(),
            amounts: amounts.clone(),
            fees,
            new_total_supply: total_supply.saturating_sub(lp_amount),
        });
        Ok(amounts)
    }

    pub(crate) fn local_remove_liquidity_one_currency(
        who: &T::AccountId,
        pool_id: T::PoolId,
        pool: &mut BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        lp_amount: Balance,
        index: usize,
        min_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        ensure!(!lp_amount.is_zero(), Error::<T>::InvalidTransaction);
        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        ensure!(total_supply > Zero::zero(), Error::<T>::InsufficientLpReserve);
        ensure!(
            T::MultiCurrency::free_balance(pool.lp_currency_id, who) >= lp_amount && lp_amount <= total_supply,
            Error::<T>::InsufficientSupply
        );
        ensure!(index < pool.currency_ids.len(), Error::<T>::CurrencyIndexOutRange);

        let withdraw_fee = Self::withdraw_fee_of(pool_id, pool, who)?;
        let (dy, swap_fee) = Self::calculate_local_remove_liquidity_one_currency(
            pool,
            base_virtual_price,
            lp_amount,
            index,
            withdraw_fee,
        )?;
        ensure!(dy >= min_amount, Error::<T>::AmountSlippage);

        let admin_fee = apply_rate(swap_fee, pool.admin_fee).map_err(Error::<T>::from)?;
        pool.balances[index] = pool.balances[index]
            .checked_sub(dy)
            .and_then(|n| n.checked_sub(admin_fee))
            .ok_or(Error::<T>::Arithmetic)?;

        T::MultiCurrency::withdraw(pool.lp_currency_id, who, lp_amount)?;
        T::MultiCurrency::transfer(pool.currency_ids[index], &pool.account, to, dy)?;

        log::trace!(
            target: LOG_TARGET,
            "pool {:?}: {:?} burnt {} for {} of #{}",
            pool_id,
            who,
            lp_amount,
            dy,
            index
        );
        Self::deposit_event(Event::RemoveLiquidityOneCurrency {
            pool_id,
            who: who.clone(),
            to: to.clone(),
            out_index: index as u32,
            burn_amount: lp_amount,
            out_amount: dy,
        });
        Ok(dy)
    }

    pub(crate) fn local_remove_liquidity_imbalance(
        who: &T::AccountId,
        pool_id: T::PoolId,
        pool: &mut BasePoolOf<T>,
        base_virtual_price: Option<Balance>,
        amounts: &[Balance],
        max_burn_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        let total_supply = T::MultiCurrency::total_issuance(pool.lp_currency_id);
        ensure!(total_supply > Zero::zero(), Error::<T>::InsufficientLpReserve);
        ensure!(amounts.len() == pool.currency_ids.len(), Error::<T>::MismatchParameter);
        ensure!(!max_burn_amount.is_zero(), Error::<T>::InvalidTransaction);
        ensure!(
            max_burn_amount <= T::MultiCurrency::free_balance(pool.lp_currency_id, who),
            Error::<T>::InsufficientSupply
        );

        let withdraw_fee = Self::withdraw_fee_of(pool_id, pool, who)?;
        let (burn_amount, fees, new_d, accounted) =
            Self::calculate_local_remove_liquidity_imbalance(pool, base_virtual_price, amounts, total_supply)?;
        ensure!(!burn_amount.is_zero(), Error::<T>::InvalidTransaction);

        let rate = FEE_DENOMINATOR
            .checked_sub(withdraw_fee)
            .ok_or(Error::<T>::Arithmetic)?;
        let burn_amount = burn_amount
            .checked_add(One::one())
            .ok_or(Error::<T>::Arithmetic)
            .and_then(|n| Ok(mul_div(n, FEE_DENOMINATOR, rate)?))?;
        ensure!(burn_amount <= max_burn_amount, Error::<T>::AmountSlippage);

        pool.balances = accounted;
        T::MultiCurrency::withdraw(pool.lp_currency_id, who, burn_amount)?;
        for (i, amount) in amounts.iter().enumerate() {
            if !amount.is_zero() {
                T::MultiCurrency::transfer(pool.currency_ids[i], &pool.account, to, *amount)?;
            }
        }

        log::trace!(
            target: LOG_TARGET,
            "pool {:?}: {:?} burnt {} for {:?}",
            pool_id,
            who,
            burn_amount,
            amounts
        );
        Self::deposit_event(Event::RemoveLiquidityImbalance {
            pool_id,
            who: who.clone(),
            to: to.clone(),
            amounts: amounts.to_vec(),
            fees,
            new_d,
            new_total_supply: total_supply.saturating_sub(burn_amount),
        });
        Ok(burn_amount)
    }
}
