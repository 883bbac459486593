#![allow(unused_parens)]
#![allow(unused_imports)]

use frame_support::weights::{constants::RocksDbWeight as DbWeight, Weight};

pub trait WeightInfo {
    fn create_base_pool() -> Weight;
    fn create_meta_pool() -> Weight;
    fn add_liquidity() -> Weight;
    fn swap() -> Weight;
    fn remove_liquidity() -> Weight;
    fn remove_liquidity_one_currency() -> Weight;
    fn remove_liquidity_imbalance() -> Weight;
    fn add_pool_and_base_pool_liquidity() -> Weight;
    fn remove_pool_and_base_pool_liquidity() -> Weight;
    fn remove_pool_and_base_pool_liquidity_one_currency() -> Weight;
    fn swap_meta_pool_underlying() -> Weight;
    fn withdraw_admin_fee() -> Weight;
    fn update_fee_receiver() -> Weight;
    fn set_swap_fee() -> Weight;
    fn set_admin_fee() -> Weight;
    fn set_default_withdraw_fee() -> Weight;
    fn ramp_a() -> Weight;
    fn stop_ramp_a() -> Weight;
}

impl WeightInfo for () {
    fn create_base_pool() -> Weight {
        Weight::from_ref_time(35_000_000_u64)
            .saturating_add(DbWeight::get().reads(2_u64))
            .saturating_add(DbWeight::get().writes(4_u64))
    }
    fn create_meta_pool() -> Weight {
        Weight::from_ref_time(48_000_000_u64)
            .saturating_add(DbWeight::get().reads(5_u64))
            .saturating_add(DbWeight::get().writes(4_u64))
    }
    fn add_liquidity() -> Weight {
        Weight::from_ref_time(180_000_000_u64)
            .saturating_add(DbWeight::get().reads(11_u64))
            .saturating_add(DbWeight::get().writes(10_u64))
    }
    fn swap() -> Weight {
        Weight::from_ref_time(95_000_000_u64)
            .saturating_add(DbWeight::get().reads(6_u64))
            .saturating_add(DbWeight::get().writes(5_u64))
    }
    fn remove_liquidity() -> Weight {
        Weight::from_ref_time(120_000_000_u64)
            .saturating_add(DbWeight::get().reads(10_u64))
            .saturating_add(DbWeight::get().writes(9_u64))
    }
    fn remove_liquidity_one_currency() -> Weight {
        Weight::from_ref_time(110_000_000_u64)
            .saturating_add(DbWeight::get().reads(7_u64))
            .saturating_add(DbWeight::get().writes(5_u64))
    }
    fn remove_liquidity_imbalance() -> Weight {
        Weight::from_ref_time(160_000_000_u64)
            .saturating_add(DbWeight::get().reads(10_u64))
            .saturating_add(DbWeight::get().writes(9_u64))
    }
    fn add_pool_and_base_pool_liquidity() -> Weight {
        Weight::from_ref_time(340_000_000_u64)
            .saturating_add(DbWeight::get().reads(20_u64))
            .saturating_add(DbWeight::get().writes(18_u64))
    }
    fn remove_pool_and_base_pool_liquidity() -> Weight {
        Weight::from_ref_time(240_000_000_u64)
            .saturating_add(DbWeight::get().reads(18_u64))
            .saturating_add(DbWeight::get().writes(16_u64))
    }
    fn remove_pool_and_base_pool_liquidity_one_currency() -> Weight {
        Weight::from_ref_time(220_000_000_u64)
            .saturating_add(DbWeight::get().reads(12_u64))
            .saturating_add(DbWeight::get().writes(10_u64))
    }
    fn swap_meta_pool_underlying() -> Weight {
        Weight::from_ref_time(290_000_000_u64)
            .saturating_add(DbWeight::get().reads(16_u64))
            .saturating_add(DbWeight::get().writes(14_u64))
    }
    fn withdraw_admin_fee() -> Weight {
        Weight::from_ref_time(60_000_000_u64)
            .saturating_add(DbWeight::get().reads(5_u64))
            .saturating_add(DbWeight::get().writes(4_u64))
    }
    fn update_fee_receiver() -> Weight {
        Weight::from_ref_time(22_000_000_u64)
            .saturating_add(DbWeight::get().reads(1_u64))
            .saturating_add(DbWeight::get().writes(1_u64))
    }
    fn set_swap_fee() -> Weight {
        Weight::from_ref_time(21_000_000_u64)
            .saturating_add(DbWeight::get().reads(1_u64))
            .saturating_add(DbWeight::get().writes(1_u64))
    }
    fn set_admin_fee() -> Weight {
        Weight::from_ref_time(21_000_000_u64)
            .saturating_add(DbWeight::get().reads(1_u64))
            .saturating_add(DbWeight::get().writes(1_u64))
    }
    fn set_default_withdraw_fee() -> Weight {
        Weight::from_ref_time(21_000_000_u64)
            .saturating_add(DbWeight::get().reads(1_u64))
            .saturating_add(DbWeight::get().writes(1_u64))
    }
    fn ramp_a() -> Weight {
        Weight::from_ref_time(25_000_000_u64)
            .saturating_add(DbWeight::get().reads(2_u64))
            .saturating_add(DbWeight::get().writes(1_u64))
    }
    fn stop_ramp_a() -> Weight {
        Weight::from_ref_time(24_000_000_u64)
            .saturating_add(DbWeight::get().reads(2_u64))
            .saturating_add(DbWeight::get().writes(1_u64))
    }
}
