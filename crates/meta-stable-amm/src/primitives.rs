use codec::{Decode, Encode};
use frame_support::pallet_prelude::*;
use sp_std::vec::Vec;

pub type Balance = u128;
pub type Number = Balance;

pub const FEE_DENOMINATOR: Number = 10_000_000_000;
pub const MAX_SWAP_FEE: Number = 100_000_000; // 1%
pub const MAX_ADMIN_FEE: Number = 10_000_000_000; // 100%
pub const MAX_WITHDRAW_FEE: Number = 100_000_000; // 1%

/// Time over which the withdraw fee of a deposit falls to zero.
pub const WITHDRAW_FEE_DECAY_TIME: u64 = 4 * WEEK;

pub const POOL_TOKEN_COMMON_DECIMALS: u32 = 18;
pub const BASE_VIRTUAL_PRICE_PRECISION: Balance = 1_000_000_000_000_000_000;

/// Scales A so that the solvers do not lose precision on integer division.
pub const A_PRECISION: Number = 100;
/// Upper bound (exclusive) of the unscaled A.
pub const MAX_A: Number = 1_000_000;
pub const MAX_A_CHANGE: Number = 2;

pub const MAX_ITERATION: u32 = 256;

pub const MIN_POOL_CURRENCIES: usize = 2;
pub const MAX_POOL_CURRENCIES: usize = 32;

pub const MINUTE: u64 = 60;
pub const DAY: u64 = 86_400;
pub const WEEK: u64 = 7 * DAY;
pub const MIN_RAMP_TIME: u64 = 14 * DAY;
pub const BASE_CACHE_EXPIRE_TIME: u64 = 10 * MINUTE;

#[derive(Encode, Decode, Clone, Default, PartialEq, Eq, Debug, TypeInfo)]
pub struct BasePool<CurrencyId, AccountId, BoundString> {
    pub currency_ids: Vec<CurrencyId>,
    pub lp_currency_id: CurrencyId,
    /// Multiplier of currency i to reach POOL_TOKEN_COMMON_DECIMALS.
    pub token_multipliers: Vec<Balance>,
    /// Accounted balances. The pool account also holds the uncollected admin fees on top.
    pub balances: Vec<Balance>,
    pub fee: Number,
    /// Share of the swap fee kept for the admin.
    pub admin_fee: Number,
    /// Withdraw fee charged right after a deposit, decaying to zero.
    pub default_withdraw_fee: Number,
    /// A multiplied with A_PRECISION.
    pub initial_a: Number,
    pub future_a: Number,
    pub initial_a_time: u64,
    pub future_a_time: u64,
    pub account: AccountId,
    pub admin_fee_receiver: AccountId,
    pub lp_currency_symbol: BoundString,
}

#[derive(Encode, Decode, Clone, Default, PartialEq, Eq, Debug, TypeInfo)]
pub struct MetaPool<PoolId, CurrencyId, AccountId, BoundString> {
    pub base_pool_id: PoolId,
    /// Cached virtual price of the base pool LP currency.
    pub base_virtual_price: Balance,
    pub base_cache_last_updated: u64,
    pub base_currencies: Vec<CurrencyId>,

    pub info: BasePool<CurrencyId, AccountId, BoundString>,
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, TypeInfo)]
pub enum Pool<PoolId, CurrencyId, AccountId, BoundString> {
    Base(BasePool<CurrencyId, AccountId, BoundString>),
    Meta(MetaPool<PoolId, CurrencyId, AccountId, BoundString>),
}

impl<PoolId, CurrencyId, AccountId, BoundString> Pool<PoolId, CurrencyId, AccountId, BoundString> {
    pub fn info(&self) -> &BasePool<CurrencyId, AccountId, BoundString> {
        match self {
            Pool::Base(bp) => bp,
            Pool::Meta(mp) => &mp.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut BasePool<CurrencyId, AccountId, BoundString> {
        match self {
            Pool::Base(bp) => bp,
            Pool::Meta(mp) => &mut mp.info,
        }
    }

    pub fn into_info(self) -> BasePool<CurrencyId, AccountId, BoundString> {
        match self {
            Pool::Base(bp) => bp,
            Pool::Meta(mp) => mp.info,
        }
    }

    pub fn as_meta(&self) -> Option<&MetaPool<PoolId, CurrencyId, AccountId, BoundString>> {
        match self {
            Pool::Base(_) => None,
            Pool::Meta(mp) => Some(mp),
        }
    }
}
