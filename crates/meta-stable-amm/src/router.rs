//! Addressing of a meta pool's underlying currencies and its view of the base pool.
//!
//! A meta pool keeps the base pool LP currency in its last slot. The underlying index space
//! replaces that slot by the base pool's currencies, so with local currencies `[A, B, LP]` and
//! base currencies `[X, Y, Z]` the underlying indices are `[A, B, X, Y, Z]`.

use super::*;
use crate::traits::StableAmmApi;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnderlyingIndex {
    /// A currency held by the meta pool itself.
    Local(usize),
    /// A currency of the base pool.
    Base(usize),
}

impl UnderlyingIndex {
    /// Maps an underlying index of a meta pool with `local_len` currencies, the last one being
    /// the LP currency of a base pool with `base_len` currencies.
    pub fn resolve(index: usize, local_len: usize, base_len: usize) -> Option<Self> {
        let base_lp_index = local_len.checked_sub(1)?;
        if index < base_lp_index {
            Some(UnderlyingIndex::Local(index))
        } else if index < base_lp_index.checked_add(base_len)? {
            Some(UnderlyingIndex::Base(index - base_lp_index))
        } else {
            None
        }
    }
}

impl<T: Config> Pallet<T> {
    pub(crate) fn resolve_underlying(meta_pool: &MetaPoolOf<T>, index: usize) -> Result<UnderlyingIndex, Error<T>> {
        UnderlyingIndex::resolve(
            index,
            meta_pool.info.currency_ids.len(),
            meta_pool.base_currencies.len(),
        )
        .ok_or(Error::<T>::CurrencyIndexOutRange)
    }

    /// Virtual price of the base pool LP currency, refreshing the cache once it expired.
    pub(crate) fn update_base_virtual_price(
        pool_id: T::PoolId,
        meta_pool: &mut MetaPoolOf<T>,
    ) -> Result<Balance, DispatchError> {
        let now = Self::now();
        let expire_at = meta_pool
            .base_cache_last_updated
            .checked_add(BASE_CACHE_EXPIRE_TIME)
            .ok_or(Error::<T>::Arithmetic)?;
        if now > expire_at {
            let virtual_price = Self::stable_amm_get_virtual_price(meta_pool.base_pool_id)?;
            meta_pool.base_virtual_price = virtual_price;
            meta_pool.base_cache_last_updated = now;

            log::trace!(
                target: LOG_TARGET,
                "pool {:?}: base pool {:?} virtual price refreshed to {}",
                pool_id,
                meta_pool.base_pool_id,
                virtual_price
            );
            Self::deposit_event(Event::BaseVirtualPriceUpdated {
                pool_id,
                base_pool_id: meta_pool.base_pool_id,
                virtual_price,
            });
        }
        Ok(meta_pool.base_virtual_price)
    }

    /// Virtual price of the base pool LP currency as the next mutating call would see it,
    /// without touching the cache.
    pub(crate) fn read_base_virtual_price(meta_pool: &MetaPoolOf<T>) -> Result<Balance, DispatchError> {
        let expire_at = meta_pool
            .base_cache_last_updated
            .checked_add(BASE_CACHE_EXPIRE_TIME)
            .ok_or(Error::<T>::Arithmetic)?;
        if Self::now() > expire_at {
            Self::stable_amm_get_virtual_price(meta_pool.base_pool_id)
        } else {
            Ok(meta_pool.base_virtual_price)
        }
    }

    /// The pool's own currencies together with the base pool LP price they are valued at,
    /// `None` for base pools.
    pub(crate) fn refresh_local_view(
        pool_id: T::PoolId,
        pool: &mut PoolOf<T>,
    ) -> Result<(&mut BasePoolOf<T>, Option<Balance>), DispatchError> {
        match pool {
            Pool::Base(bp) => Ok((bp, None)),
            Pool::Meta(mp) => {
                let base_virtual_price = Self::update_base_virtual_price(pool_id, mp)?;
                Ok((&mut mp.info, Some(base_virtual_price)))
            }
        }
    }

    pub(crate) fn read_local_view(pool: &PoolOf<T>) -> Result<(&BasePoolOf<T>, Option<Balance>), DispatchError> {
        match pool {
            Pool::Base(bp) => Ok((bp, None)),
            Pool::Meta(mp) => Ok((&mp.info, Some(Self::read_base_virtual_price(mp)?))),
        }
    }
}
