//! Imbalance fees and the per-depositor withdraw fee.

use super::*;
use crate::math::{apply_rate, distance, mul_div, MathError, MathResult};
use orml_traits::currency::OnTransfer;
use sp_std::marker::PhantomData;

/// Charges `fee_per_token` on how far each of `new_balances` lands from its ideal share
/// `d1 * old / d0`.
///
/// `new_balances` is reduced by the fees in place. Returns the fees and the balances to
/// account for the pool, which keep the LP part of the fees but not the admin part.
pub fn charge_imbalance_fees(
    old_balances: &[Balance],
    new_balances: &mut [Balance],
    d0: Balance,
    d1: Balance,
    fee_per_token: Number,
    admin_fee: Number,
) -> MathResult<(Vec<Balance>, Vec<Balance>)> {
    if old_balances.len() != new_balances.len() {
        return Err(MathError::LengthMismatch);
    }

    let mut fees = Vec::with_capacity(old_balances.len());
    let mut accounted = Vec::with_capacity(old_balances.len());
    for (old, new) in old_balances.iter().zip(new_balances.iter_mut()) {
        let ideal = mul_div(d1, *old, d0)?;
        let fee = apply_rate(distance(ideal, *new), fee_per_token)?;
        let balance = new
            .checked_sub(apply_rate(fee, admin_fee)?)
            .ok_or(MathError::Overflow)?;
        *new = new.checked_sub(fee).ok_or(MathError::Overflow)?;
        fees.push(fee);
        accounted.push(balance);
    }

    Ok((fees, accounted))
}

/// Withdraw fee rate owed at `now` by a depositor whose last deposit happened at
/// `deposit_timestamp`. Falls linearly to zero over WITHDRAW_FEE_DECAY_TIME.
pub fn current_withdraw_fee(
    default_withdraw_fee: Number,
    multiplier: Number,
    deposit_timestamp: u64,
    now: u64,
) -> MathResult<Number> {
    let end = deposit_timestamp
        .checked_add(WITHDRAW_FEE_DECAY_TIME)
        .ok_or(MathError::Overflow)?;
    if end <= now {
        return Ok(Zero::zero());
    }
    let time_left = U256::from(end - now);

    U256::from(default_withdraw_fee)
        .checked_mul(U256::from(multiplier))
        .and_then(|n| n.checked_mul(time_left))
        .and_then(|n| n.checked_div(U256::from(WITHDRAW_FEE_DECAY_TIME)))
        .and_then(|n| n.checked_div(U256::from(FEE_DENOMINATOR)))
        .ok_or(MathError::Overflow)
        .and_then(crate::math::to_balance)
}

/// Multiplier of a position of `balance` shares, currently charged `current_fee`, after
/// `minted` new shares join it.
///
/// The result weights the residual fee of the old shares against the full default fee of
/// the new ones, so topping up never resets the whole position to the default fee.
pub fn next_withdraw_fee_multiplier(
    default_withdraw_fee: Number,
    current_fee: Number,
    balance: Balance,
    minted: Balance,
) -> MathResult<Number> {
    if default_withdraw_fee.is_zero() {
        return Ok(FEE_DENOMINATOR);
    }

    let numerator = U256::from(balance)
        .checked_mul(U256::from(current_fee))
        .and_then(|n| n.checked_add(U256::from(minted).checked_mul(U256::from(default_withdraw_fee))?))
        .and_then(|n| n.checked_mul(U256::from(FEE_DENOMINATOR)))
        .ok_or(MathError::Overflow)?;
    let denominator = U256::from(minted)
        .checked_add(U256::from(balance))
        .and_then(|n| n.checked_mul(U256::from(default_withdraw_fee)))
        .ok_or(MathError::Overflow)?;

    numerator
        .checked_div(denominator)
        .ok_or(MathError::Overflow)
        .and_then(crate::math::to_balance)
}

impl<T: Config> Pallet<T> {
    pub(crate) fn withdraw_fee_of(
        pool_id: T::PoolId,
        pool: &BasePoolOf<T>,
        who: &T::AccountId,
    ) -> Result<Number, Error<T>> {
        Ok(current_withdraw_fee(
            pool.default_withdraw_fee,
            WithdrawFeeMultipliers::<T>::get(pool_id, who),
            DepositTimestamps::<T>::get(pool_id, who),
            Self::now(),
        )?)
    }

    /// Blends `minted` incoming shares into the withdraw fee state of `who`.
    ///
    /// Must run before the shares are credited.
    pub(crate) fn update_withdraw_fee(
        pool_id: T::PoolId,
        pool: &BasePoolOf<T>,
        who: &T::AccountId,
        minted: Balance,
    ) -> DispatchResult {
        if minted.is_zero() {
            return Ok(());
        }

        let current_fee = Self::withdraw_fee_of(pool_id, pool, who)?;
        let balance = T::MultiCurrency::free_balance(pool.lp_currency_id, who);
        let multiplier = next_withdraw_fee_multiplier(pool.default_withdraw_fee, current_fee, balance, minted)
            .map_err(Error::<T>::from)?;

        WithdrawFeeMultipliers::<T>::insert(pool_id, who, multiplier);
        DepositTimestamps::<T>::insert(pool_id, who, Self::now());
        Ok(())
    }

    /// Share of `amount` left to a withdrawer charged `withdraw_fee`.
    pub(crate) fn after_withdraw_fee(amount: Balance, withdraw_fee: Number) -> Result<Balance, Error<T>> {
        let rate = FEE_DENOMINATOR
            .checked_sub(withdraw_fee)
            .ok_or(Error::<T>::Arithmetic)?;
        Ok(apply_rate(amount, rate)?)
    }
}

/// Keeps the withdraw fee of pool LP currencies attached to the shares when they move
/// between accounts.
pub struct LpTransferHook<T>(PhantomData<T>);

impl<T: Config> OnTransfer<T::AccountId, T::CurrencyId, Balance> for LpTransferHook<T> {
    fn on_transfer(currency_id: T::CurrencyId, _from: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
        let pool_id = match Pallet::<T>::lp_currencies(currency_id) {
            Some(pool_id) => pool_id,
            None => return Ok(()),
        };
        let pool = Pallet::<T>::pools(pool_id).ok_or(Error::<T>::InvalidPoolId)?;
        Pallet::<T>::update_withdraw_fee(pool_id, pool.info(), to, amount)
    }
}
