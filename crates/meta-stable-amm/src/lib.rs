//! # Meta Stable AMM Pallet
//!
//! StableSwap pools over currencies of different precision, following the Curve V1 design.
//!
//! There are two kinds of pool:
//! - Base: pairs two or more stable currencies.
//! - Meta: pairs stable currencies with the LP currency of a base pool. Trades and deposits in
//!   the base pool's currencies are routed through the base pool.
//!
//! ## Overview
//!
//! This pallet provides functionality for:
//!
//! - Creating pools
//! - Adding / removing liquidity
//! - Swapping currencies, directly or through the base pool
//! - Ramping of A
//! - Collecting admin fees
//!
//! ### Terminology
//!
//! - **Amplification Coefficient:** Determines a pool's tolerance for imbalance.
//! - **Swap Fee:** The fee taken from the output currency.
//! - **Admin Fee:** The share of the swap fee claimable by the pool's fee receiver.
//! - **Withdraw Fee:** A fee on removing liquidity shortly after a deposit. It decays linearly to
//!   zero over four weeks.
//! - **Virtual Price:** The value of one LP share in units of the pooled currencies.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod amplification;
pub mod fees;
pub mod math;
pub mod primitives;
pub mod rpc;
pub mod traits;

mod meta_pool;
mod pool;
mod router;
mod weights;

pub mod benchmarking;

#[cfg(test)]
mod mock;

#[cfg(test)]
mod meta_pool_tests;

use frame_support::{
    dispatch::{Codec, DispatchResult},
    pallet_prelude::*,
    traits::UnixTime,
    transactional, PalletId,
};
use math::{MathError, LOG_TARGET};
use orml_traits::MultiCurrency;
use sp_arithmetic::traits::{checked_pow, AtLeast32BitUnsigned, CheckedAdd, One, Zero};
use sp_core::U256;
use sp_runtime::traits::{AccountIdConversion, StaticLookup};
use sp_std::{vec, vec::Vec};

pub use fees::LpTransferHook;
pub use pallet::*;
pub use primitives::*;
pub use router::UnderlyingIndex;
use traits::{StablePoolLpCurrencyIdGenerate, ValidateCurrency};
pub use weights::WeightInfo;

#[allow(type_alias_bounds)]
type AccountIdOf<T: Config> = <T as frame_system::Config>::AccountId;

#[allow(type_alias_bounds)]
pub type PoolSymbolOf<T: Config> = BoundedVec<u8, <T as Config>::PoolCurrencySymbolLimit>;

#[allow(type_alias_bounds)]
pub type BasePoolOf<T: Config> = BasePool<<T as Config>::CurrencyId, AccountIdOf<T>, PoolSymbolOf<T>>;

#[allow(type_alias_bounds)]
pub type MetaPoolOf<T: Config> =
    MetaPool<<T as Config>::PoolId, <T as Config>::CurrencyId, AccountIdOf<T>, PoolSymbolOf<T>>;

#[allow(type_alias_bounds)]
pub type PoolOf<T: Config> = Pool<<T as Config>::PoolId, <T as Config>::CurrencyId, AccountIdOf<T>, PoolSymbolOf<T>>;

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_system::pallet_prelude::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// The currency ID type
        type CurrencyId: Parameter + Member + Copy + MaybeSerializeDeserialize + Ord + TypeInfo + MaxEncodedLen;

        /// Custody of the pooled currencies and the ledger of the LP currencies.
        type MultiCurrency: MultiCurrency<AccountIdOf<Self>, CurrencyId = Self::CurrencyId, Balance = Balance>;

        /// The pool ID type
        type PoolId: Parameter + Codec + Copy + Ord + AtLeast32BitUnsigned + Zero + One + Default;

        /// Decides which currencies may be pooled or used as LP currency.
        type EnsurePoolAsset: ValidateCurrency<Self::CurrencyId>;

        type LpGenerate: StablePoolLpCurrencyIdGenerate<Self::CurrencyId, Self::PoolId>;

        /// Unix time of the current block.
        type TimeProvider: UnixTime;

        #[pallet::constant]
        type PoolCurrencySymbolLimit: Get<u32>;

        /// This pallet ID.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::without_storage_info]
    #[pallet::generate_store(pub(super) trait Store)]
    pub struct Pallet<T>(_);

    /// The id of next pool
    #[pallet::storage]
    #[pallet::getter(fn next_pool_id)]
    pub type NextPoolId<T: Config> = StorageValue<_, T::PoolId, ValueQuery>;

    /// Info of a pool.
    #[pallet::storage]
    #[pallet::getter(fn pools)]
    pub type Pools<T: Config> = StorageMap<_, Blake2_128Concat, T::PoolId, PoolOf<T>>;

    /// The pool id corresponding to lp currency
    #[pallet::storage]
    #[pallet::getter(fn lp_currencies)]
    pub type LpCurrencies<T: Config> = StorageMap<_, Blake2_128Concat, T::CurrencyId, T::PoolId>;

    /// Unix time of an account's last deposit into a pool.
    #[pallet::storage]
    pub type DepositTimestamps<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, T::PoolId, Blake2_128Concat, T::AccountId, u64, ValueQuery>;

    /// Scales the default withdraw fee of an account's position in a pool.
    #[pallet::storage]
    pub type WithdrawFeeMultipliers<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, T::PoolId, Blake2_128Concat, T::AccountId, Number, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A pool was created.
        CreatePool {
            pool_id: T::PoolId,
            currency_ids: Vec<T::CurrencyId>,
            lp_currency_id: T::CurrencyId,
            a: Number,
            account: T::AccountId,
            admin_fee_receiver: T::AccountId,
        },
        /// A pool's admin_fee_receiver was updated.
        UpdateAdminFeeReceiver {
            pool_id: T::PoolId,
            admin_fee_receiver: T::AccountId,
        },
        /// Supply some liquidity to a pool.
        AddLiquidity {
            pool_id: T::PoolId,
            who: T::AccountId,
            to: T::AccountId,
            supply_amounts: Vec<Balance>,
            fees: Vec<Balance>,
            new_d: Balance,
            mint_amount: Balance,
        },
        /// Swap a amounts of currency to get other.
        CurrencyExchange {
            pool_id: T::PoolId,
            who: T::AccountId,
            to: T::AccountId,
            in_index: u32,
            in_amount: Balance,
            out_index: u32,
            out_amount: Balance,
        },
        /// Swap between the underlying currencies of a meta pool.
        CurrencyExchangeUnderlying {
            pool_id: T::PoolId,
            account: T::AccountId,
            in_amount: Balance,
            out_amount: Balance,
            currency_index_from: u32,
            currency_index_to: u32,
            to: T::AccountId,
        },
        /// Remove some liquidity from a pool.
        RemoveLiquidity {
            pool_id: T::PoolId,
            who: T::AccountId,
            to: T::AccountId,
            amounts: Vec<Balance>,
            fees: Vec<Balance>,
            new_total_supply: Balance,
        },
        /// Remove some liquidity from a pool to get only one currency.
        RemoveLiquidityOneCurrency {
            pool_id: T::PoolId,
            who: T::AccountId,
            to: T::AccountId,
            out_index: u32,
            burn_amount: Balance,
            out_amount: Balance,
        },
        /// Remove liquidity from a pool with specify the amounts of currencies to be obtained.
        RemoveLiquidityImbalance {
            pool_id: T::PoolId,
            who: T::AccountId,
            to: T::AccountId,
            amounts: Vec<Balance>,
            fees: Vec<Balance>,
            new_d: Balance,
            new_total_supply: Balance,
        },
        /// A pool's swap fee parameters was updated
        NewSwapFee { pool_id: T::PoolId, new_swap_fee: Number },
        /// A pool's admin fee parameters was updated
        NewAdminFee { pool_id: T::PoolId, new_admin_fee: Number },
        /// A pool's default withdraw fee was updated.
        NewDefaultWithdrawFee {
            pool_id: T::PoolId,
            new_withdraw_fee: Number,
        },
        /// A pool's 'A' was ramped.
        RampA {
            pool_id: T::PoolId,
            initial_a_precise: Number,
            future_a_precise: Number,
            now: u64,
            future_a_time: u64,
        },
        /// A pool's ramping A was stopped.
        StopRampA {
            pool_id: T::PoolId,
            current_a: Number,
            now: u64,
        },
        /// A pool's admin fee was collected.
        CollectProtocolFee {
            pool_id: T::PoolId,
            currency_id: T::CurrencyId,
            fee_amount: Balance,
        },
        /// A meta pool refreshed its cached virtual price of the base pool.
        BaseVirtualPriceUpdated {
            pool_id: T::PoolId,
            base_pool_id: T::PoolId,
            virtual_price: Balance,
        },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The currency id can't join stable amm pool.
        InvalidPooledCurrency,
        /// The currency id can't become the lp currency id of stable amm pool.
        InvalidLpCurrency,
        /// The parameters of a call are contradictory.
        MismatchParameter,
        /// The decimal of currency is invalid when create pool.
        InvalidCurrencyDecimal,
        /// The pool id is invalid.
        InvalidPoolId,
        /// The base pool mismatch this pool.
        InvalidBasePool,
        /// The error generate by some arithmetic function.
        Arithmetic,
        /// The call already expired.
        Deadline,
        /// The caller does not have enough currencies.
        InsufficientSupply,
        /// The pool does not have enough currencies.
        InsufficientReserve,
        /// The new d below then older.
        CheckDFailed,
        /// Slippage is too large.
        AmountSlippage,
        /// Forbid swap same currency.
        SwapSameCurrency,
        /// The index of currency id bigger the length of pool's currencies;
        CurrencyIndexOutRange,
        /// The pool does not have enough lp currency.
        InsufficientLpReserve,
        /// The setting value exceed threshold.
        ExceedThreshold,
        /// The A of this pool is already ramped in current period.
        RampADelay,
        /// The value of feature_a_time is too small.
        MinRampTime,
        /// Forbid change A of a pool bigger than MAX_A.
        ExceedMaxAChange,
        /// The ramping A of this pool is already stopped.
        AlreadyStoppedRampA,
        /// The fee parameter exceeds MAX_SWAP_FEE when create pool.
        ExceedMaxFee,
        /// The admin fee parameter exceeds MAX_ADMIN_FEE when create pool.
        ExceedMaxAdminFee,
        /// The withdraw fee parameter exceeds MAX_WITHDRAW_FEE.
        ExceedMaxWithdrawFee,
        /// The A parameter exceed MAX_A when create pool.
        ExceedMaxA,
        /// The lp currency id is already used when create pool.
        LpCurrencyAlreadyUsed,
        /// Require all currencies of this pool when first supply.
        RequireAllCurrencies,
        /// The symbol of created pool maybe exceed length limit.
        BadPoolCurrencySymbol,
        /// The transaction change nothing.
        InvalidTransaction,
        /// The base pool lp currency is invalid when create meta pool.
        InvalidBasePoolLpCurrency,
        /// A currency appears twice in a pool.
        DuplicateCurrency,
        /// A pool needs at least MIN_POOL_CURRENCIES currencies.
        TooFewCurrencies,
        /// A pool holds at most MAX_POOL_CURRENCIES currencies.
        TooManyCurrencies,
        /// The invariant D did not converge.
        InvariantNotConverge,
        /// The balance solver did not converge.
        BalanceNotConverge,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Create a stable amm pool.
        ///
        /// Only admin can create pool.
        ///
        /// # Argument
        ///
        /// - `currency_ids`: The currencies will be join the created pool.
        /// - `currency_decimals`: The currencies corresponding decimals.
        /// - `a`: The initial A of created pool.
        /// - `fee`: The swap fee of created pool.
        /// - `admin_fee`: The admin fee of created pool.
        /// - `admin_fee_receiver`: The admin fee receiver of created pool.
        /// - `lp_currency_symbol`: The symbol of created pool lp currency.
        #[pallet::weight(T::WeightInfo::create_base_pool())]
        #[transactional]
        pub fn create_base_pool(
            origin: OriginFor<T>,
            currency_ids: Vec<T::CurrencyId>,
            currency_decimals: Vec<u32>,
            a: Number,
            fee: Number,
            admin_fee: Number,
            admin_fee_receiver: T::AccountId,
            lp_currency_symbol: Vec<u8>,
        ) -> DispatchResult {
            ensure_root(origin)?;

            let (new_pool, pool_id) = Self::inner_create_pool(
                &currency_ids,
                currency_decimals,
                a,
                fee,
                admin_fee,
                &admin_fee_receiver,
                lp_currency_symbol,
            )?;

            Self::insert_pool(pool_id, Pool::Base(new_pool), currency_ids, a, admin_fee_receiver)
        }

        /// Create a stable amm meta pool.
        ///
        /// Only admin can create pool. The last currency must be the lp currency of an existing
        /// base pool.
        ///
        /// # Argument
        ///
        /// - `currency_ids`: The currencies will be join the created pool.
        /// - `currency_decimals`: The currencies corresponding decimals.
        /// - `a`: The initial A of created pool.
        /// - `fee`: The swap fee of created pool.
        /// - `admin_fee`: The admin fee of created pool.
        /// - `admin_fee_receiver`: The admin fee receiver of created pool.
        /// - `lp_currency_symbol`: The symbol of created pool lp currency.
        #[pallet::weight(T::WeightInfo::create_meta_pool())]
        #[transactional]
        pub fn create_meta_pool(
            origin: OriginFor<T>,
            currency_ids: Vec<T::CurrencyId>,
            currency_decimals: Vec<u32>,
            a: Number,
            fee: Number,
            admin_fee: Number,
            admin_fee_receiver: T::AccountId,
            lp_currency_symbol: Vec<u8>,
        ) -> DispatchResult {
            ensure_root(origin)?;
            let base_pool_lp_currency = currency_ids.last().ok_or(Error::<T>::TooFewCurrencies)?;
            let base_pool_id =
                Self::lp_currencies(base_pool_lp_currency).ok_or(Error::<T>::InvalidBasePoolLpCurrency)?;

            let base_pool = match Self::pools(base_pool_id) {
                Some(Pool::Base(bp)) => bp,
                _ => return Err(Error::<T>::InvalidBasePool.into()),
            };
            let base_virtual_price = Self::pool_virtual_price(&base_pool, None)?;
            ensure!(!base_virtual_price.is_zero(), Error::<T>::InvalidBasePool);

            let (info, pool_id) = Self::inner_create_pool(
                &currency_ids,
                currency_decimals,
                a,
                fee,
                admin_fee,
                &admin_fee_receiver,
                lp_currency_symbol,
            )?;

            let meta_pool = MetaPool {
                base_pool_id,
                base_virtual_price,
                base_cache_last_updated: Self::now(),
                base_currencies: base_pool.currency_ids,
                info,
            };

            Self::insert_pool(pool_id, Pool::Meta(meta_pool), currency_ids, a, admin_fee_receiver)
        }

        /// Supply amounts of currencies to the pool.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `amounts`: Supply amounts of currencies.
        /// - `min_mint_amount`: The min amount of lp currency get.
        /// - `to`: The receiver of the lp currency.
        /// - `deadline`: Height of the cutoff block of this transaction
        #[pallet::weight(T::WeightInfo::add_liquidity())]
        #[transactional]
        pub fn add_liquidity(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            amounts: Vec<Balance>,
            min_mint_amount: Balance,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_add_liquidity(&who, pool_id, &amounts, min_mint_amount, &to)?;

            Ok(())
        }

        /// Swap a amounts of currencies to get other.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `from_index`: The index of swap currency id.
        /// - `to_index`: The index of receive currency id.
        /// - `in_amount`: The amounts of currencies swap.
        /// - `min_out_amount`: The min amount of receive currency.
        /// - `to`: The receiver of the output.
        /// - `deadline`: Height of the cutoff block of this transaction
        #[pallet::weight(T::WeightInfo::swap())]
        #[transactional]
        pub fn swap(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            from_index: u32,
            to_index: u32,
            in_amount: Balance,
            min_out_amount: Balance,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_swap(
                &who,
                pool_id,
                from_index as usize,
                to_index as usize,
                in_amount,
                min_out_amount,
                &to,
            )?;

            Ok(())
        }

        /// Remove liquidity from a pool.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `lp_amount`: The amounts of lp currency.
        /// - `min_amounts`: The min amounts of pool's currencies to get.
        /// - `to`: The receiver of the currencies.
        /// - `deadline`: Height of the cutoff block of this transaction
        #[pallet::weight(T::WeightInfo::remove_liquidity())]
        #[transactional]
        pub fn remove_liquidity(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            lp_amount: Balance,
            min_amounts: Vec<Balance>,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_remove_liquidity(pool_id, &who, lp_amount, &min_amounts, &to)?;

            Ok(())
        }

        /// Remove liquidity from a pool to get one currency.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `lp_amount`: The amounts of lp currency.
        /// - `index`: The index of receive currency.
        /// - `min_amount`: The min amounts of received currency;
        /// - `to`: The receiver of the currency.
        /// - `deadline`: Height of the cutoff block of this transaction
        #[pallet::weight(T::WeightInfo::remove_liquidity_one_currency())]
        #[transactional]
        pub fn remove_liquidity_one_currency(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            lp_amount: Balance,
            index: u32,
            min_amount: Balance,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_remove_liquidity_one_currency(pool_id, &who, lp_amount, index, min_amount, &to)?;

            Ok(())
        }

        /// Remove liquidity from a pool to the specify amounts of currencies.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `amounts`: The specify amounts of receive currencies.
        /// - `max_burn_amount`: The max amount of burned lp currency.
        /// - `to`: The receiver of the currencies.
        /// - `deadline`: Height of the cutoff block of this transaction
        #[pallet::weight(T::WeightInfo::remove_liquidity_imbalance())]
        #[transactional]
        pub fn remove_liquidity_imbalance(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            amounts: Vec<Balance>,
            max_burn_amount: Balance,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_remove_liquidity_imbalance(&who, pool_id, &amounts, max_burn_amount, &to)?;

            Ok(())
        }

        /// Supply amounts of currencies to the pool which contains the lp currency of the base
        /// pool.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `base_pool_id`: The id of base pool.
        /// - `meta_amounts`: Supply amounts of currencies to pool. The last element is replaced by
        ///   the lp currency minted in the base pool.
        /// - `base_amounts`: Supply amounts of currencies to base pool.
        /// - `min_to_mint`: The min amount of pool lp currency get.
        /// - `to`: The receiver of the lp currency.
        /// - `deadline`: Height of the cutoff block of this transaction.
        #[pallet::weight(T::WeightInfo::add_pool_and_base_pool_liquidity())]
        #[transactional]
        pub fn add_pool_and_base_pool_liquidity(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            base_pool_id: T::PoolId,
            meta_amounts: Vec<Balance>,
            base_amounts: Vec<Balance>,
            min_to_mint: Balance,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_add_pool_and_base_pool_liquidity(
                &who,
                pool_id,
                base_pool_id,
                meta_amounts,
                &base_amounts,
                min_to_mint,
                &to,
            )?;

            Ok(())
        }

        /// Remove liquidity from a pool which contains the lp currency of the base pool.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `base_pool_id`: The id of base pool.
        /// - `amount`: The amounts of lp currency to burn.
        /// - `min_amounts_meta`: The min amounts of pool's currencies to get.
        /// - `min_amounts_base`: The min amounts of basic pool's currencies to get.
        /// - `to`: The receiver of the currencies.
        /// - `deadline`: Height of the cutoff block of this transaction.
        #[pallet::weight(T::WeightInfo::remove_pool_and_base_pool_liquidity())]
        #[transactional]
        pub fn remove_pool_and_base_pool_liquidity(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            base_pool_id: T::PoolId,
            amount: Balance,
            min_amounts_meta: Vec<Balance>,
            min_amounts_base: Vec<Balance>,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_remove_pool_and_base_pool_liquidity(
                &who,
                pool_id,
                base_pool_id,
                amount,
                &min_amounts_meta,
                &min_amounts_base,
                &to,
            )?;

            Ok(())
        }

        /// Remove liquidity from a pool which contains the lp currency of the base pool
        /// to get one currency.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `base_pool_id`: The id of base pool.
        /// - `amount`: The amounts of lp currency to burn.
        /// - `i`: The index of target currency in basic pool.
        /// - `min_amount`: The min amounts of received currency.
        /// - `to`: The receiver of the currency.
        /// - `deadline`: Height of the cutoff block of this transaction.
        #[pallet::weight(T::WeightInfo::remove_pool_and_base_pool_liquidity_one_currency())]
        #[transactional]
        pub fn remove_pool_and_base_pool_liquidity_one_currency(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            base_pool_id: T::PoolId,
            amount: Balance,
            i: u32,
            min_amount: Balance,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_remove_pool_and_base_pool_liquidity_one_currency(
                &who,
                pool_id,
                base_pool_id,
                amount,
                i,
                min_amount,
                &to,
            )?;

            Ok(())
        }

        /// Swap between any two currencies underlying a meta pool.
        ///
        /// Indices below the position of the base pool lp currency address the meta pool's own
        /// currencies, the following ones address the base pool's currencies.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of the meta pool.
        /// - `in_index`: The underlying index of the input currency.
        /// - `out_index`: The underlying index of the output currency.
        /// - `dx`: The amount of the input currency.
        /// - `min_dy`: The min amount of the output currency.
        /// - `to`: The receiver of the output.
        /// - `deadline`: Height of the cutoff block of this transaction.
        #[pallet::weight(T::WeightInfo::swap_meta_pool_underlying())]
        #[transactional]
        pub fn swap_meta_pool_underlying(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            in_index: u32,
            out_index: u32,
            dx: Balance,
            min_dy: Balance,
            to: T::AccountId,
            deadline: T::BlockNumber,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_deadline(deadline)?;

            Self::inner_swap_underlying(&who, pool_id, in_index as usize, out_index as usize, dx, min_dy, &to)?;

            Ok(())
        }

        /// Update admin fee receiver of the pool.
        ///
        /// Only called by admin.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `fee_receiver`: The new admin fee receiver of this pool.
        #[pallet::weight(T::WeightInfo::update_fee_receiver())]
        #[transactional]
        pub fn update_fee_receiver(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            fee_receiver: <T::Lookup as StaticLookup>::Source,
        ) -> DispatchResult {
            ensure_root(origin)?;
            let admin_fee_receiver = T::Lookup::lookup(fee_receiver)?;
            Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> DispatchResult {
                let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
                pool.info_mut().admin_fee_receiver = admin_fee_receiver.clone();

                Self::deposit_event(Event::UpdateAdminFeeReceiver {
                    pool_id,
                    admin_fee_receiver,
                });
                Ok(())
            })
        }

        /// Update fee of the pool.
        ///
        /// Only called by admin.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `new_swap_fee`: The new swap fee of this pool.
        #[pallet::weight(T::WeightInfo::set_swap_fee())]
        #[transactional]
        pub fn set_swap_fee(origin: OriginFor<T>, pool_id: T::PoolId, new_swap_fee: Number) -> DispatchResult {
            ensure_root(origin)?;
            Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> DispatchResult {
                let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
                ensure!(new_swap_fee <= MAX_SWAP_FEE, Error::<T>::ExceedThreshold);

                pool.info_mut().fee = new_swap_fee;
                log::debug!(target: LOG_TARGET, "pool {:?}: swap fee set to {}", pool_id, new_swap_fee);

                Self::deposit_event(Event::NewSwapFee { pool_id, new_swap_fee });
                Ok(())
            })
        }

        /// Update admin fee of the pool.
        ///
        /// Only called by admin.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `new_admin_fee`: The new admin fee of this pool.
        #[pallet::weight(T::WeightInfo::set_admin_fee())]
        #[transactional]
        pub fn set_admin_fee(origin: OriginFor<T>, pool_id: T::PoolId, new_admin_fee: Number) -> DispatchResult {
            ensure_root(origin)?;
            Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> DispatchResult {
                let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
                ensure!(new_admin_fee <= MAX_ADMIN_FEE, Error::<T>::ExceedThreshold);

                pool.info_mut().admin_fee = new_admin_fee;
                log::debug!(target: LOG_TARGET, "pool {:?}: admin fee set to {}", pool_id, new_admin_fee);

                Self::deposit_event(Event::NewAdminFee { pool_id, new_admin_fee });
                Ok(())
            })
        }

        /// Update the withdraw fee charged right after a deposit.
        ///
        /// Only called by admin. Positions keep the multiplier they were given on deposit.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `new_withdraw_fee`: The new default withdraw fee of this pool.
        #[pallet::weight(T::WeightInfo::set_default_withdraw_fee())]
        #[transactional]
        pub fn set_default_withdraw_fee(
            origin: OriginFor<T>,
            pool_id: T::PoolId,
            new_withdraw_fee: Number,
        ) -> DispatchResult {
            ensure_root(origin)?;
            Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> DispatchResult {
                let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
                ensure!(new_withdraw_fee <= MAX_WITHDRAW_FEE, Error::<T>::ExceedMaxWithdrawFee);

                pool.info_mut().default_withdraw_fee = new_withdraw_fee;
                log::debug!(
                    target: LOG_TARGET,
                    "pool {:?}: default withdraw fee set to {}",
                    pool_id,
                    new_withdraw_fee
                );

                Self::deposit_event(Event::NewDefaultWithdrawFee {
                    pool_id,
                    new_withdraw_fee,
                });
                Ok(())
            })
        }

        /// Start ramping up or down A parameter towards given future_a and future_a_time
        ///
        /// Only called by admin.
        /// Checks if the change is too rapid, and commits the new A value only when it falls under
        /// the limit range.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        /// - `future_a`: The new A to ramp towards.
        /// - `future_a_time`: Unix timestamp when the new A should be reached
        #[pallet::weight(T::WeightInfo::ramp_a())]
        #[transactional]
        pub fn ramp_a(origin: OriginFor<T>, pool_id: T::PoolId, future_a: Number, future_a_time: u64) -> DispatchResult {
            ensure_root(origin)?;
            let now = Self::now();
            Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> DispatchResult {
                let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
                let (initial_a_precise, future_a_precise) =
                    amplification::begin_ramp::<T, _, _, _>(pool.info_mut(), future_a, future_a_time, now)?;
                log::debug!(
                    target: LOG_TARGET,
                    "pool {:?}: ramping A from {} to {} until {}",
                    pool_id,
                    initial_a_precise,
                    future_a_precise,
                    future_a_time
                );

                Self::deposit_event(Event::RampA {
                    pool_id,
                    initial_a_precise,
                    future_a_precise,
                    now,
                    future_a_time,
                });
                Ok(())
            })
        }

        /// Stop ramping A parameter.
        ///
        /// Only called by admin.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        #[pallet::weight(T::WeightInfo::stop_ramp_a())]
        #[transactional]
        pub fn stop_ramp_a(origin: OriginFor<T>, pool_id: T::PoolId) -> DispatchResult {
            ensure_root(origin)?;
            let now = Self::now();
            Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> DispatchResult {
                let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
                let current_a = amplification::stop_ramp::<T, _, _, _>(pool.info_mut(), now)?;
                log::debug!(target: LOG_TARGET, "pool {:?}: A frozen at {}", pool_id, current_a);

                Self::deposit_event(Event::StopRampA {
                    pool_id,
                    current_a,
                    now,
                });
                Ok(())
            })
        }

        /// Withdraw the admin fee from pool to admin fee receiver.
        ///
        /// Can called by anyone.
        ///
        /// # Argument
        ///
        /// - `pool_id`: The id of pool.
        #[pallet::weight(T::WeightInfo::withdraw_admin_fee())]
        #[transactional]
        pub fn withdraw_admin_fee(origin: OriginFor<T>, pool_id: T::PoolId) -> DispatchResult {
            ensure_signed(origin)?;

            Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> DispatchResult {
                let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?.info();

                for (i, reserve) in pool.balances.iter().enumerate() {
                    let balance = T::MultiCurrency::free_balance(pool.currency_ids[i], &pool.account)
                        .checked_sub(*reserve)
                        .ok_or(Error::<T>::Arithmetic)?;

                    if !balance.is_zero() {
                        T::MultiCurrency::transfer(
                            pool.currency_ids[i],
                            &pool.account,
                            &pool.admin_fee_receiver,
                            balance,
                        )?;
                    }
                    Self::deposit_event(Event::CollectProtocolFee {
                        pool_id,
                        currency_id: pool.currency_ids[i],
                        fee_amount: balance,
                    });
                }
                Ok(())
            })
        }
    }
}

impl<T> From<MathError> for Error<T> {
    fn from(error: MathError) -> Self {
        match error {
            MathError::Overflow => Error::<T>::Arithmetic,
            MathError::LengthMismatch => Error::<T>::MismatchParameter,
            MathError::SameIndex => Error::<T>::SwapSameCurrency,
            MathError::IndexOutOfRange => Error::<T>::CurrencyIndexOutRange,
            MathError::InvariantNotConverge => Error::<T>::InvariantNotConverge,
            MathError::BalanceNotConverge => Error::<T>::BalanceNotConverge,
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Unix time of the current block in seconds.
    pub(crate) fn now() -> u64 {
        T::TimeProvider::now().as_secs()
    }

    fn ensure_deadline(deadline: T::BlockNumber) -> DispatchResult {
        let now = frame_system::Pallet::<T>::block_number();
        ensure!(deadline > now, Error::<T>::Deadline);
        Ok(())
    }

    fn insert_pool(
        pool_id: T::PoolId,
        pool: PoolOf<T>,
        currency_ids: Vec<T::CurrencyId>,
        a: Number,
        admin_fee_receiver: T::AccountId,
    ) -> DispatchResult {
        let lp_currency_id = pool.info().lp_currency_id;
        let account = pool.info().account.clone();

        LpCurrencies::<T>::insert(lp_currency_id, pool_id);

        NextPoolId::<T>::try_mutate(|next_pool_id| -> DispatchResult {
            *next_pool_id = next_pool_id.checked_add(&One::one()).ok_or(Error::<T>::Arithmetic)?;
            Ok(())
        })?;

        Pools::<T>::try_mutate(pool_id, |pool_info| -> DispatchResult {
            ensure!(pool_info.is_none(), Error::<T>::InvalidPoolId);
            *pool_info = Some(pool);

            Self::deposit_event(Event::CreatePool {
                pool_id,
                currency_ids,
                lp_currency_id,
                a,
                account,
                admin_fee_receiver,
            });
            Ok(())
        })
    }

    pub(crate) fn inner_add_liquidity(
        who: &T::AccountId,
        pool_id: T::PoolId,
        amounts: &[Balance],
        min_mint_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> Result<Balance, DispatchError> {
            let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
            let (pool, base_virtual_price) = Self::refresh_local_view(pool_id, pool)?;
            Self::local_add_liquidity(who, pool_id, pool, base_virtual_price, amounts, min_mint_amount, to)
        })
    }

    pub(crate) fn inner_swap(
        who: &T::AccountId,
        pool_id: T::PoolId,
        i: usize,
        j: usize,
        in_amount: Balance,
        out_min_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        ensure!(i != j, Error::<T>::SwapSameCurrency);

        Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> Result<Balance, DispatchError> {
            let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
            let (pool, base_virtual_price) = Self::refresh_local_view(pool_id, pool)?;
            Self::local_swap(who, pool_id, pool, base_virtual_price, i, j, in_amount, out_min_amount, to)
        })
    }

    pub(crate) fn inner_remove_liquidity(
        pool_id: T::PoolId,
        who: &T::AccountId,
        lp_amount: Balance,
        min_amounts: &[Balance],
        to: &T::AccountId,
    ) -> Result<Vec<Balance>, DispatchError> {
        Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> Result<Vec<Balance>, DispatchError> {
            let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
            Self::local_remove_liquidity(who, pool_id, pool.info_mut(), lp_amount, min_amounts, to)
        })
    }

    pub(crate) fn inner_remove_liquidity_one_currency(
        pool_id: T::PoolId,
        who: &T::AccountId,
        lp_amount: Balance,
        index: u32,
        min_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> Result<Balance, DispatchError> {
            let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
            let (pool, base_virtual_price) = Self::refresh_local_view(pool_id, pool)?;
            Self::local_remove_liquidity_one_currency(
                who,
                pool_id,
                pool,
                base_virtual_price,
                lp_amount,
                index as usize,
                min_amount,
                to,
            )
        })
    }

    pub(crate) fn inner_remove_liquidity_imbalance(
        who: &T::AccountId,
        pool_id: T::PoolId,
        amounts: &[Balance],
        max_burn_amount: Balance,
        to: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
        Pools::<T>::try_mutate_exists(pool_id, |optioned_pool| -> Result<Balance, DispatchError> {
            let pool = optioned_pool.as_mut().ok_or(Error::<T>::InvalidPoolId)?;
            let (pool, base_virtual_price) = Self::refresh_local_view(pool_id, pool)?;
            Self::local_remove_liquidity_imbalance(
                who,
                pool_id,
                pool,
                base_virtual_price,
                amounts,
                max_burn_amount,
                to,
            )
        })
    }
}
