//! Amplification coefficient schedule.
//!
//! A moves linearly from `initial_a` to `future_a` between `initial_a_time` and
//! `future_a_time`. Both endpoints are stored multiplied by `A_PRECISION`.

use crate::{
    math::{MathError, MathResult},
    primitives::*,
    Config, Error,
};
use frame_support::ensure;
use sp_core::U256;
use sp_runtime::DispatchError;

/// Current A of the pool (scaled by A_PRECISION) at unix time `now`.
pub fn a_precise<C, A, S>(pool: &BasePool<C, A, S>, now: u64) -> MathResult<Number> {
    if now >= pool.future_a_time {
        return Ok(pool.future_a);
    }

    let initial_a = U256::from(pool.initial_a);
    let future_a = U256::from(pool.future_a);
    let elapsed = U256::from(now.checked_sub(pool.initial_a_time).ok_or(MathError::Overflow)?);
    let duration = U256::from(
        pool.future_a_time
            .checked_sub(pool.initial_a_time)
            .ok_or(MathError::Overflow)?,
    );

    let a = if pool.future_a > pool.initial_a {
        future_a
            .checked_sub(initial_a)
            .and_then(|n| n.checked_mul(elapsed))
            .and_then(|n| n.checked_div(duration))
            .and_then(|n| initial_a.checked_add(n))
    } else {
        initial_a
            .checked_sub(future_a)
            .and_then(|n| n.checked_mul(elapsed))
            .and_then(|n| n.checked_div(duration))
            .and_then(|n| initial_a.checked_sub(n))
    }
    .ok_or(MathError::Overflow)?;

    crate::math::to_balance(a)
}

/// Starts ramping A towards `future_a` (unscaled), reached at `future_a_time`.
///
/// Returns the scaled `(initial_a, future_a)` committed to the pool.
pub(crate) fn begin_ramp<T: Config, C, A, S>(
    pool: &mut BasePool<C, A, S>,
    future_a: Number,
    future_a_time: u64,
    now: u64,
) -> Result<(Number, Number), DispatchError> {
    ensure!(
        now >= pool.initial_a_time.checked_add(DAY).ok_or(Error::<T>::Arithmetic)?,
        Error::<T>::RampADelay
    );
    ensure!(
        future_a_time >= now.checked_add(MIN_RAMP_TIME).ok_or(Error::<T>::Arithmetic)?,
        Error::<T>::MinRampTime
    );
    ensure!(future_a > 0 && future_a < MAX_A, Error::<T>::ExceedThreshold);

    let initial_a_precise = a_precise(pool, now).map_err(Error::<T>::from)?;
    let future_a_precise = future_a.checked_mul(A_PRECISION).ok_or(Error::<T>::Arithmetic)?;

    if future_a_precise < initial_a_precise {
        ensure!(
            future_a_precise.checked_mul(MAX_A_CHANGE).ok_or(Error::<T>::Arithmetic)? >= initial_a_precise,
            Error::<T>::ExceedMaxAChange
        );
    } else {
        ensure!(
            future_a_precise <= initial_a_precise.checked_mul(MAX_A_CHANGE).ok_or(Error::<T>::Arithmetic)?,
            Error::<T>::ExceedMaxAChange
        );
    }

    pool.initial_a = initial_a_precise;
    pool.future_a = future_a_precise;
    pool.initial_a_time = now;
    pool.future_a_time = future_a_time;

    Ok((initial_a_precise, future_a_precise))
}

/// Freezes A at its current value. Returns that value.
pub(crate) fn stop_ramp<T: Config, C, A, S>(pool: &mut BasePool<C, A, S>, now: u64) -> Result<Number, DispatchError> {
    ensure!(pool.future_a_time > now, Error::<T>::AlreadyStoppedRampA);

    let current_a = a_precise(pool, now).map_err(Error::<T>::from)?;
    pool.initial_a = current_a;
    pool.future_a = current_a;
    pool.initial_a_time = now;
    pool.future_a_time = now;

    Ok(current_a)
}
