//! StableSwap solvers over normalized balances.
//!
//! Everything here is free of storage access so that the pallet and the pure tests share the
//! same code. Intermediate products are computed in `U256`.

use crate::primitives::{Balance, Number, A_PRECISION, BASE_VIRTUAL_PRICE_PRECISION, FEE_DENOMINATOR, MAX_ITERATION};
use sp_core::U256;
use sp_std::{ops::Sub, vec::Vec};

pub(crate) const LOG_TARGET: &str = "meta-stable-amm";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MathError {
    /// Overflow, underflow or division by zero.
    Overflow,
    /// Slices that must be index aligned have different lengths.
    LengthMismatch,
    /// The same index was used on both sides of a trade.
    SameIndex,
    IndexOutOfRange,
    /// The D iteration did not settle within MAX_ITERATION rounds.
    InvariantNotConverge,
    /// The Y iteration did not settle within MAX_ITERATION rounds.
    BalanceNotConverge,
}

pub type MathResult<T> = Result<T, MathError>;

pub(crate) fn to_balance(n: U256) -> MathResult<Balance> {
    TryInto::<Balance>::try_into(n).map_err(|_| MathError::Overflow)
}

/// `a * b / c` without intermediate overflow.
pub fn mul_div(a: Balance, b: Balance, c: Balance) -> MathResult<Balance> {
    U256::from(a)
        .checked_mul(U256::from(b))
        .and_then(|n| n.checked_div(U256::from(c)))
        .ok_or(MathError::Overflow)
        .and_then(to_balance)
}

pub fn distance<N: PartialOrd + Sub<Output = N>>(x: N, y: N) -> N {
    if x > y {
        x - y
    } else {
        y - x
    }
}

pub fn sum_of(balances: &[Balance]) -> MathResult<Balance> {
    balances
        .iter()
        .try_fold(Balance::default(), |acc, b| acc.checked_add(*b))
        .ok_or(MathError::Overflow)
}

/// Scales every balance to POOL_TOKEN_COMMON_DECIMALS.
pub fn xp(balances: &[Balance], multipliers: &[Balance]) -> MathResult<Vec<Balance>> {
    if balances.len() != multipliers.len() {
        return Err(MathError::LengthMismatch);
    }
    balances
        .iter()
        .zip(multipliers.iter())
        .map(|(b, m)| b.checked_mul(*m).ok_or(MathError::Overflow))
        .collect()
}

/// Like [`xp`], but the last slot (the base pool LP currency) is also valued at the base
/// pool's virtual price.
pub fn meta_xp(balances: &[Balance], multipliers: &[Balance], base_virtual_price: Balance) -> MathResult<Vec<Balance>> {
    let mut xp = xp(balances, multipliers)?;
    let last = xp.len().checked_sub(1).ok_or(MathError::LengthMismatch)?;
    xp[last] = mul_div(xp[last], base_virtual_price, BASE_VIRTUAL_PRICE_PRECISION)?;
    Ok(xp)
}

/// Computes the invariant D of normalized balances `xp` for `amp` (scaled by A_PRECISION).
pub fn compute_d(xp: &[Balance], amp: Number) -> MathResult<Balance> {
    let n_currencies = U256::from(xp.len() as u64);
    let sum = sum_of(xp)?;
    if sum == Balance::default() {
        return Ok(Balance::default());
    }

    let mut d = U256::from(sum);
    let ann = U256::from(amp).checked_mul(n_currencies).ok_or(MathError::Overflow)?;
    let a_precision = U256::from(A_PRECISION);

    for _ in 0..MAX_ITERATION {
        let mut d_p = d;
        for x in xp.iter() {
            d_p = d_p
                .checked_mul(d)
                .and_then(|n| n.checked_div(U256::from(*x).checked_mul(n_currencies)?))
                .ok_or(MathError::Overflow)?;
        }
        let d_prev = d;

        let numerator = ann
            .checked_mul(U256::from(sum))
            .and_then(|n| n.checked_div(a_precision))
            .and_then(|n| n.checked_add(d_p.checked_mul(n_currencies)?))
            .and_then(|n| n.checked_mul(d))
            .ok_or(MathError::Overflow)?;

        let denominator = ann
            .checked_sub(a_precision)
            .and_then(|n| n.checked_mul(d))
            .and_then(|n| n.checked_div(a_precision))
            .and_then(|n| n.checked_add(n_currencies.checked_add(U256::one())?.checked_mul(d_p)?))
            .ok_or(MathError::Overflow)?;

        d = numerator.checked_div(denominator).ok_or(MathError::Overflow)?;

        if distance(d, d_prev) <= U256::one() {
            return to_balance(d);
        }
    }

    log::warn!(target: LOG_TARGET, "invariant did not converge, amp {:?} xp {:?}", amp, xp);
    Err(MathError::InvariantNotConverge)
}

fn solve_y(c: U256, b: U256, d: U256) -> MathResult<Balance> {
    newton_y(c, b, d, MAX_ITERATION)
}

/// Runs the Newton step `y = (y^2 + c) / (2y + b - d)` starting from `y = d`, for at most
/// `max_rounds` rounds.
fn newton_y(c: U256, b: U256, d: U256, max_rounds: u32) -> MathResult<Balance> {
    let mut y = d;
    for _ in 0..max_rounds {
        let y_prev = y;
        y = y
            .checked_mul(y)
            .and_then(|n| n.checked_add(c))
            .and_then(|n| n.checked_div(U256::from(2u32).checked_mul(y)?.checked_add(b)?.checked_sub(d)?))
            .ok_or(MathError::Overflow)?;
        if distance(y, y_prev) <= U256::one() {
            return to_balance(y);
        }
    }

    log::warn!(target: LOG_TARGET, "balance did not converge, d {:?}", d);
    Err(MathError::BalanceNotConverge)
}

/// Solves for the normalized balance of `j` once the normalized balance of `i` becomes `x`,
/// keeping the invariant of `xp`.
pub fn compute_y(amp: Number, i: usize, j: usize, x: Balance, xp: &[Balance]) -> MathResult<Balance> {
    let n = xp.len();
    if i == j {
        return Err(MathError::SameIndex);
    }
    if i >= n || j >= n {
        return Err(MathError::IndexOutOfRange);
    }

    let n_currencies = U256::from(n as u64);
    let ann = U256::from(amp).checked_mul(n_currencies).ok_or(MathError::Overflow)?;
    let d = U256::from(compute_d(xp, amp)?);
    let mut c = d;
    let mut sum = U256::zero();

    for (k, balance) in xp.iter().enumerate() {
        if k == j {
            continue;
        }
        let x_k = if k == i { x } else { *balance };
        sum = sum.checked_add(U256::from(x_k)).ok_or(MathError::Overflow)?;
        c = c
            .checked_mul(d)
            .and_then(|c| c.checked_div(U256::from(x_k).checked_mul(n_currencies)?))
            .ok_or(MathError::Overflow)?;
    }

    let a_precision = U256::from(A_PRECISION);
    c = c
        .checked_mul(d)
        .and_then(|c| c.checked_mul(a_precision))
        .and_then(|c| c.checked_div(ann.checked_mul(n_currencies)?))
        .ok_or(MathError::Overflow)?;
    let b = d
        .checked_mul(a_precision)
        .and_then(|n| n.checked_div(ann))
        .and_then(|n| n.checked_add(sum))
        .ok_or(MathError::Overflow)?;

    solve_y(c, b, d)
}

/// Solves for the normalized balance of `i` that, with every other balance of `xp`
/// unchanged, yields the invariant `d`.
pub fn compute_y_d(amp: Number, i: usize, xp: &[Balance], d: Balance) -> MathResult<Balance> {
    let n = xp.len();
    if i >= n {
        return Err(MathError::IndexOutOfRange);
    }

    let n_currencies = U256::from(n as u64);
    let ann = U256::from(amp).checked_mul(n_currencies).ok_or(MathError::Overflow)?;
    let d = U256::from(d);
    let mut c = d;
    let mut sum = U256::zero();

    for (k, x) in xp.iter().enumerate() {
        if k == i {
            continue;
        }
        sum = sum.checked_add(U256::from(*x)).ok_or(MathError::Overflow)?;
        c = c
            .checked_mul(d)
            .and_then(|c| c.checked_div(U256::from(*x).checked_mul(n_currencies)?))
            .ok_or(MathError::Overflow)?;
    }

    let a_precision = U256::from(A_PRECISION);
    c = c
        .checked_mul(d)
        .and_then(|c| c.checked_mul(a_precision))
        .and_then(|c| c.checked_div(ann.checked_mul(n_currencies)?))
        .ok_or(MathError::Overflow)?;
    let b = d
        .checked_mul(a_precision)
        .and_then(|n| n.checked_div(ann))
        .and_then(|n| n.checked_add(sum))
        .ok_or(MathError::Overflow)?;

    solve_y(c, b, d)
}

/// Imbalance fee rate applied per currency: `fee * n / (4 * (n - 1))`.
pub fn fee_per_token(fee: Number, n_currencies: usize) -> MathResult<Number> {
    let n = n_currencies as Number;
    let denominator = n.checked_sub(1).and_then(|n| n.checked_mul(4)).ok_or(MathError::Overflow)?;
    fee.checked_mul(n)
        .and_then(|n| n.checked_div(denominator))
        .ok_or(MathError::Overflow)
}

/// `amount * rate / FEE_DENOMINATOR`.
pub fn apply_rate(amount: Balance, rate: Number) -> MathResult<Balance> {
    mul_div(amount, rate, FEE_DENOMINATOR)
}
