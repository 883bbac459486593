use frame_support::{assert_noop, assert_ok};
use frame_system::RawOrigin;
use sp_runtime::DispatchError::BadOrigin;

use super::{
    base_pool_tests::setup_test_base_pool,
    mock::{CurrencyId::*, *},
    traits::StableAmmApi,
    *,
};

const INITIAL_A_VALUE: Balance = 50;
const SWAP_FEE: Balance = 10_000_000;
const ADMIN_FEE: Balance = 0;

const BASE_POOL_ID: PoolId = 0;
const META_POOL_ID: PoolId = 1;
const BASE_LP: CurrencyId = StableLPV2(BASE_POOL_ID);
const META_LP: CurrencyId = StableLPV2(META_POOL_ID);

fn create_meta_pool(currency_ids: Vec<CurrencyId>, decimals: Vec<u32>) -> DispatchResult {
    StableAmm::create_meta_pool(
        RawOrigin::Root.into(),
        currency_ids,
        decimals,
        INITIAL_A_VALUE,
        SWAP_FEE,
        ADMIN_FEE,
        CHARLIE,
        Vec::from("meta_pool_lp"),
    )
}

/// Base pool 0 over TOKEN1 and TOKEN2, meta pool 1 over TOKEN3, TOKEN4 and the LP currency of
/// pool 0. ALICE supplies one unit of everything to both.
fn setup_test_meta_pool() {
    setup_test_base_pool();
    assert_ok!(create_meta_pool(
        vec![TOKEN3, TOKEN4, BASE_LP],
        vec![TOKEN3_DECIMAL, TOKEN4_DECIMAL, STABLE_LP_DECIMAL],
    ));
    assert_ok!(StableAmm::add_liquidity(
        RawOrigin::Signed(ALICE).into(),
        META_POOL_ID,
        vec![TOKEN3_UNIT, TOKEN4_UNIT, LP_UNIT],
        0,
        ALICE,
        DEADLINE,
    ));
}

fn meta_pool(pool_id: PoolId) -> MetaPoolOf<Test> {
    match StableAmm::pools(pool_id) {
        Some(Pool::Meta(mp)) => mp,
        _ => panic!("pool {} is not a meta pool", pool_id),
    }
}

#[test]
fn create_meta_pool_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_base_pool();
        assert_ok!(create_meta_pool(
            vec![TOKEN3, TOKEN4, BASE_LP],
            vec![TOKEN3_DECIMAL, TOKEN4_DECIMAL, STABLE_LP_DECIMAL],
        ));

        assert_eq!(StableAmm::next_pool_id(), 2);
        assert_eq!(StableAmm::lp_currencies(META_LP), Some(META_POOL_ID));

        let pool = meta_pool(META_POOL_ID);
        assert_eq!(pool.base_pool_id, BASE_POOL_ID);
        assert_eq!(pool.base_virtual_price, BASE_VIRTUAL_PRICE_PRECISION);
        assert_eq!(pool.base_cache_last_updated, START);
        assert_eq!(pool.base_currencies, vec![TOKEN1, TOKEN2]);
        assert_eq!(pool.info.currency_ids, vec![TOKEN3, TOKEN4, BASE_LP]);
        assert_eq!(pool.info.lp_currency_id, META_LP);
        assert_eq!(
            pool.info.token_multipliers,
            vec![1_000_000_000_000, 1_000_000_000_000, 1]
        );
        assert_eq!(pool.info.admin_fee_receiver, CHARLIE);
    });
}

#[test]
fn create_meta_pool_with_invalid_base_should_not_work() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            StableAmm::create_meta_pool(
                RawOrigin::Signed(ALICE).into(),
                vec![TOKEN3, BASE_LP],
                vec![TOKEN3_DECIMAL, STABLE_LP_DECIMAL],
                INITIAL_A_VALUE,
                SWAP_FEE,
                ADMIN_FEE,
                CHARLIE,
                Vec::from("meta_pool_lp"),
            ),
            BadOrigin
        );
        assert_noop!(create_meta_pool(vec![], vec![]), Error::<Test>::TooFewCurrencies);
        // no pool issues this lp currency yet
        assert_noop!(
            create_meta_pool(vec![TOKEN3, BASE_LP], vec![TOKEN3_DECIMAL, STABLE_LP_DECIMAL]),
            Error::<Test>::InvalidBasePoolLpCurrency
        );
        assert_noop!(
            create_meta_pool(vec![TOKEN3, TOKEN1], vec![TOKEN3_DECIMAL, TOKEN1_DECIMAL]),
            Error::<Test>::InvalidBasePoolLpCurrency
        );

        // a base pool without liquidity has no price
        assert_ok!(StableAmm::create_base_pool(
            RawOrigin::Root.into(),
            vec![TOKEN1, TOKEN2],
            vec![TOKEN1_DECIMAL, TOKEN2_DECIMAL],
            INITIAL_A_VALUE,
            SWAP_FEE,
            ADMIN_FEE,
            CHARLIE,
            Vec::from("stable_pool_lp"),
        ));
        assert_noop!(
            create_meta_pool(vec![TOKEN3, BASE_LP], vec![TOKEN3_DECIMAL, STABLE_LP_DECIMAL]),
            Error::<Test>::InvalidBasePool
        );
    });
}

#[test]
fn meta_pool_cannot_be_a_base_pool() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();
        assert_noop!(
            create_meta_pool(vec![TOKEN1, META_LP], vec![TOKEN1_DECIMAL, STABLE_LP_DECIMAL]),
            Error::<Test>::InvalidBasePool
        );
    });
}

#[test]
fn meta_pool_add_liquidity_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_eq!(get_user_balance(META_LP, &ALICE), 3 * LP_UNIT);
        assert_eq!(get_user_balance(BASE_LP, &ALICE), LP_UNIT);
        assert_eq!(get_user_balance(BASE_LP, &meta_pool(META_POOL_ID).info.account), LP_UNIT);
        assert_eq!(StableAmm::get_virtual_price(META_POOL_ID), BASE_VIRTUAL_PRICE_PRECISION);
        assert_eq!(
            StableAmm::get_currency_balances(META_POOL_ID),
            vec![TOKEN3_UNIT, TOKEN4_UNIT, LP_UNIT]
        );
    });
}

#[test]
fn meta_pool_swap_with_base_lp_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        let calculated = StableAmm::calculate_swap(META_POOL_ID, 0, 2, TOKEN3_UNIT / 10).unwrap_or_default();
        assert_eq!(calculated, 99_702_611_562_565_289);

        assert_ok!(StableAmm::swap(
            RawOrigin::Signed(BOB).into(),
            META_POOL_ID,
            0,
            2,
            TOKEN3_UNIT / 10,
            calculated,
            BOB,
            DEADLINE,
        ));
        assert_eq!(get_user_balance(BASE_LP, &BOB), calculated);
    });
}

#[test]
fn swap_underlying_with_incorrect_params_should_not_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_noop!(
            StableAmm::swap_meta_pool_underlying(
                RawOrigin::Signed(BOB).into(),
                META_POOL_ID,
                0,
                0,
                TOKEN3_UNIT,
                0,
                BOB,
                DEADLINE
            ),
            Error::<Test>::SwapSameCurrency
        );
        assert_noop!(
            StableAmm::swap_meta_pool_underlying(
                RawOrigin::Signed(BOB).into(),
                META_POOL_ID,
                0,
                4,
                TOKEN3_UNIT,
                0,
                BOB,
                DEADLINE
            ),
            Error::<Test>::CurrencyIndexOutRange
        );
        assert_noop!(
            StableAmm::swap_meta_pool_underlying(
                RawOrigin::Signed(BOB).into(),
                BASE_POOL_ID,
                0,
                1,
                TOKEN1_UNIT,
                0,
                BOB,
                DEADLINE
            ),
            Error::<Test>::InvalidPoolId
        );
        assert_noop!(
            StableAmm::swap_meta_pool_underlying(
                RawOrigin::Signed(BOB).into(),
                META_POOL_ID,
                0,
                1,
                TOKEN3_UNIT / 10,
                99_703,
                BOB,
                DEADLINE
            ),
            Error::<Test>::AmountSlippage
        );
        assert_noop!(
            StableAmm::swap_meta_pool_underlying(
                RawOrigin::Signed(BOB).into(),
                META_POOL_ID,
                2,
                3,
                TOKEN1_UNIT / 10,
                99_702_611_562_565_290,
                BOB,
                DEADLINE
            ),
            Error::<Test>::AmountSlippage
        );
        assert!(StableAmm::calculate_meta_swap_underlying(META_POOL_ID, 1, 1, TOKEN4_UNIT).is_err());
        assert!(StableAmm::calculate_meta_swap_underlying(BASE_POOL_ID, 0, 1, TOKEN1_UNIT).is_err());
    });
}

#[test]
fn swap_underlying_between_meta_currencies_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        let expected = 99_702;
        assert_eq!(
            StableAmm::calculate_meta_swap_underlying(META_POOL_ID, 0, 1, TOKEN3_UNIT / 10).unwrap_or_default(),
            expected
        );

        let before = get_user_token_balances(&[TOKEN3, TOKEN4], &BOB);
        assert_ok!(StableAmm::swap_meta_pool_underlying(
            RawOrigin::Signed(BOB).into(),
            META_POOL_ID,
            0,
            1,
            TOKEN3_UNIT / 10,
            expected,
            BOB,
            DEADLINE,
        ));
        let after = get_user_token_balances(&[TOKEN3, TOKEN4], &BOB);

        assert_eq!(before[0] - after[0], TOKEN3_UNIT / 10);
        assert_eq!(after[1] - before[1], expected);
        assert_eq!(
            StableAmm::get_currency_balances(META_POOL_ID),
            vec![1_100_000, 900_298, LP_UNIT]
        );

        System::assert_last_event(RuntimeEvent::StableAMM(crate::Event::CurrencyExchangeUnderlying {
            pool_id: META_POOL_ID,
            account: BOB,
            in_amount: TOKEN3_UNIT / 10,
            out_amount: expected,
            currency_index_from: 0,
            currency_index_to: 1,
            to: BOB,
        }));
    });
}

#[test]
fn swap_underlying_from_meta_to_base_currency_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        let expected = 99_601_469_370_545_188;
        assert_eq!(
            StableAmm::calculate_meta_swap_underlying(META_POOL_ID, 0, 2, TOKEN3_UNIT / 10).unwrap_or_default(),
            expected
        );

        let before = get_user_balance(TOKEN1, &BOB);
        assert_ok!(StableAmm::swap_meta_pool_underlying(
            RawOrigin::Signed(BOB).into(),
            META_POOL_ID,
            0,
            2,
            TOKEN3_UNIT / 10,
            expected,
            BOB,
            DEADLINE,
        ));
        assert_eq!(get_user_balance(TOKEN1, &BOB) - before, expected);

        // the base lp currency bought in the meta pool is burnt in the base pool
        assert_eq!(
            StableAmm::get_currency_balances(META_POOL_ID),
            vec![1_100_000, TOKEN4_UNIT, 900_297_388_437_434_711]
        );
        assert_eq!(
            StableAmm::get_currency_balances(BASE_POOL_ID),
            vec![900_398_530_629_454_812, TOKEN2_UNIT]
        );
        assert_eq!(
            <Tokens as MultiCurrency<AccountId>>::total_issuance(BASE_LP),
            1_900_297_388_437_434_711
        );
        let meta_account = meta_pool(META_POOL_ID).info.account;
        assert_eq!(get_user_balance(BASE_LP, &meta_account), 900_297_388_437_434_711);
        assert_eq!(get_user_balance(TOKEN1, &meta_account), 0);
    });
}

#[test]
fn swap_underlying_from_base_to_meta_currency_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_eq!(
            StableAmm::calculate_meta_swap_underlying(META_POOL_ID, 2, 0, TOKEN1_UNIT / 10).unwrap_or_default(),
            99_606
        );

        let before = get_user_token_balances(&[TOKEN1, TOKEN3], &BOB);
        assert_ok!(StableAmm::swap_meta_pool_underlying(
            RawOrigin::Signed(BOB).into(),
            META_POOL_ID,
            2,
            0,
            TOKEN1_UNIT / 10,
            0,
            BOB,
            DEADLINE,
        ));
        let after = get_user_token_balances(&[TOKEN1, TOKEN3], &BOB);

        assert_eq!(before[0] - after[0], TOKEN1_UNIT / 10);
        assert_eq!(after[1] - before[1], 99_606);

        // the base currency was deposited into the base pool first
        assert_eq!(
            StableAmm::get_currency_balances(BASE_POOL_ID),
            vec![1_100_000_000_000_000_000, TOKEN2_UNIT]
        );
        assert_eq!(
            StableAmm::get_currency_balances(META_POOL_ID),
            vec![900_394, TOKEN4_UNIT, 1_099_903_210_555_972_582]
        );
    });
}

#[test]
fn swap_underlying_between_base_currencies_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        let expected = 99_702_611_562_565_289;
        assert_eq!(
            StableAmm::calculate_meta_swap_underlying(META_POOL_ID, 2, 3, TOKEN1_UNIT / 10).unwrap_or_default(),
            StableAmm::calculate_swap(BASE_POOL_ID, 0, 1, TOKEN1_UNIT / 10).unwrap_or_default()
        );

        let before = get_user_token_balances(&[TOKEN1, TOKEN2], &BOB);
        assert_ok!(StableAmm::swap_meta_pool_underlying(
            RawOrigin::Signed(BOB).into(),
            META_POOL_ID,
            2,
            3,
            TOKEN1_UNIT / 10,
            expected,
            BOB,
            DEADLINE,
        ));
        let after = get_user_token_balances(&[TOKEN1, TOKEN2], &BOB);

        assert_eq!(before[0] - after[0], TOKEN1_UNIT / 10);
        assert_eq!(after[1] - before[1], expected);

        // only the base pool moves
        assert_eq!(
            StableAmm::get_currency_balances(BASE_POOL_ID),
            vec![1_100_000_000_000_000_000, 900_297_388_437_434_711]
        );
        assert_eq!(
            StableAmm::get_currency_balances(META_POOL_ID),
            vec![TOKEN3_UNIT, TOKEN4_UNIT, LP_UNIT]
        );
    });
}

#[test]
fn base_virtual_price_cache_should_expire() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_ok!(StableAmm::swap(
            RawOrigin::Signed(BOB).into(),
            BASE_POOL_ID,
            0,
            1,
            TOKEN1_UNIT / 10,
            0,
            BOB,
            DEADLINE,
        ));
        let base_virtual_price = 1_000_050_005_862_349_911;
        assert_eq!(StableAmm::get_virtual_price(BASE_POOL_ID), base_virtual_price);

        mine_block_with_timestamp(START + BASE_CACHE_EXPIRE_TIME);
        assert_eq!(StableAmm::get_virtual_price(META_POOL_ID), BASE_VIRTUAL_PRICE_PRECISION);
        assert_ok!(StableAmm::swap(
            RawOrigin::Signed(BOB).into(),
            META_POOL_ID,
            0,
            1,
            TOKEN3_UNIT / 10,
            0,
            BOB,
            DEADLINE,
        ));
        assert_eq!(meta_pool(META_POOL_ID).base_virtual_price, BASE_VIRTUAL_PRICE_PRECISION);
        assert_eq!(meta_pool(META_POOL_ID).base_cache_last_updated, START);

        mine_block_with_timestamp(START + BASE_CACHE_EXPIRE_TIME + 1);
        // queries see the fresh price without touching the cache
        assert_eq!(
            StableAmm::stable_amm_get_virtual_price(META_POOL_ID).unwrap_or_default(),
            StableAmm::get_virtual_price(META_POOL_ID)
        );
        assert_eq!(meta_pool(META_POOL_ID).base_virtual_price, BASE_VIRTUAL_PRICE_PRECISION);

        assert_ok!(StableAmm::swap(
            RawOrigin::Signed(BOB).into(),
            META_POOL_ID,
            1,
            0,
            TOKEN4_UNIT / 10,
            0,
            BOB,
            DEADLINE,
        ));
        let pool = meta_pool(META_POOL_ID);
        assert_eq!(pool.base_virtual_price, base_virtual_price);
        assert_eq!(pool.base_cache_last_updated, START + BASE_CACHE_EXPIRE_TIME + 1);
        assert!(System::events().iter().any(|record| record.event
            == RuntimeEvent::StableAMM(crate::Event::BaseVirtualPriceUpdated {
                pool_id: META_POOL_ID,
                base_pool_id: BASE_POOL_ID,
                virtual_price: base_virtual_price,
            })));
    });
}

#[test]
fn meta_pool_virtual_price_should_follow_base_pool() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_ok!(StableAmm::swap(
            RawOrigin::Signed(BOB).into(),
            BASE_POOL_ID,
            0,
            1,
            TOKEN1_UNIT / 10,
            0,
            BOB,
            DEADLINE,
        ));
        assert_eq!(StableAmm::get_virtual_price(META_POOL_ID), BASE_VIRTUAL_PRICE_PRECISION);

        mine_block_with_timestamp(START + BASE_CACHE_EXPIRE_TIME + 1);
        assert_eq!(StableAmm::get_virtual_price(META_POOL_ID), 1_000_016_668_615_335_554);
    });
}

#[test]
fn add_pool_and_base_pool_liquidity_with_incorrect_params_should_not_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_noop!(
            StableAmm::add_pool_and_base_pool_liquidity(
                RawOrigin::Signed(ALICE).into(),
                META_POOL_ID,
                META_POOL_ID,
                vec![TOKEN3_UNIT, 0, 0],
                vec![TOKEN1_UNIT, TOKEN2_UNIT],
                0,
                ALICE,
                DEADLINE
            ),
            Error::<Test>::MismatchParameter
        );
        assert_noop!(
            StableAmm::add_pool_and_base_pool_liquidity(
                RawOrigin::Signed(ALICE).into(),
                BASE_POOL_ID,
                BASE_POOL_ID,
                vec![TOKEN1_UNIT, 0],
                vec![TOKEN1_UNIT, TOKEN2_UNIT],
                0,
                ALICE,
                DEADLINE
            ),
            Error::<Test>::InvalidPoolId
        );
        assert_noop!(
            StableAmm::add_pool_and_base_pool_liquidity(
                RawOrigin::Signed(ALICE).into(),
                META_POOL_ID,
                BASE_POOL_ID,
                vec![TOKEN3_UNIT, 0],
                vec![TOKEN1_UNIT, TOKEN2_UNIT],
                0,
                ALICE,
                DEADLINE
            ),
            Error::<Test>::MismatchParameter
        );
        assert_noop!(
            StableAmm::add_pool_and_base_pool_liquidity(
                RawOrigin::Signed(ALICE).into(),
                META_POOL_ID,
                BASE_POOL_ID,
                vec![TOKEN3_UNIT, 0, 0],
                vec![TOKEN1_UNIT],
                0,
                ALICE,
                DEADLINE
            ),
            Error::<Test>::MismatchParameter
        );
    });
}

#[test]
fn add_pool_and_base_pool_liquidity_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        let base_lp_before = get_user_balance(BASE_LP, &ALICE);
        let meta_lp_before = get_user_balance(META_LP, &ALICE);

        let estimate = StableAmm::calculate_currency_amount(
            META_POOL_ID,
            &ALICE,
            &[TOKEN3_UNIT / 10, 0, LP_UNIT / 5],
            true,
        )
        .unwrap_or_default();
        assert_eq!(estimate, 299_820_300_201_264_104);

        assert_noop!(
            StableAmm::add_pool_and_base_pool_liquidity(
                RawOrigin::Signed(ALICE).into(),
                META_POOL_ID,
                BASE_POOL_ID,
                vec![TOKEN3_UNIT / 10, 0, 0],
                vec![TOKEN1_UNIT / 10, TOKEN2_UNIT / 10],
                estimate,
                ALICE,
                DEADLINE
            ),
            Error::<Test>::AmountSlippage
        );

        // the last meta amount is replaced by the base lp currency minted
        assert_ok!(StableAmm::add_pool_and_base_pool_liquidity(
            RawOrigin::Signed(ALICE).into(),
            META_POOL_ID,
            BASE_POOL_ID,
            vec![TOKEN3_UNIT / 10, 0, LP_UNIT],
            vec![TOKEN1_UNIT / 10, TOKEN2_UNIT / 10],
            0,
            ALICE,
            DEADLINE,
        ));

        let minted = 299_745_770_461_678_083;
        assert_eq!(get_user_balance(META_LP, &ALICE) - meta_lp_before, minted);
        assert_eq!(get_user_balance(BASE_LP, &ALICE), base_lp_before);
        assert_eq!(
            StableAmm::get_currency_balances(META_POOL_ID),
            vec![1_100_000, TOKEN4_UNIT, 1_200_000_000_000_000_000]
        );
        assert_eq!(
            StableAmm::get_currency_balances(BASE_POOL_ID),
            vec![1_100_000_000_000_000_000, 1_100_000_000_000_000_000]
        );

        assert!(System::events().iter().any(|record| matches!(
            &record.event,
            RuntimeEvent::StableAMM(crate::Event::AddLiquidity { pool_id, supply_amounts, fees, mint_amount, .. })
                if *pool_id == META_POOL_ID
                    && supply_amounts == &vec![TOKEN3_UNIT / 10, 0, LP_UNIT / 5]
                    && fees == &vec![0, 37, 37_522_462_474_841]
                    && *mint_amount == minted
        )));
    });
}

#[test]
fn remove_pool_and_base_pool_liquidity_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_noop!(
            StableAmm::remove_pool_and_base_pool_liquidity(
                RawOrigin::Signed(ALICE).into(),
                META_POOL_ID,
                META_POOL_ID,
                LP_UNIT / 10,
                vec![0, 0, 0],
                vec![0, 0],
                BOB,
                DEADLINE
            ),
            Error::<Test>::MismatchParameter
        );
        assert_noop!(
            StableAmm::remove_pool_and_base_pool_liquidity(
                RawOrigin::Signed(ALICE).into(),
                META_POOL_ID,
                BASE_POOL_ID,
                LP_UNIT / 10,
                vec![0, 0, 0],
                vec![16_666_666_666_666_667, 0],
                BOB,
                DEADLINE
            ),
            Error::<Test>::AmountSlippage
        );

        let alice_before = get_user_token_balances(&[TOKEN3, TOKEN4, BASE_LP, META_LP], &ALICE);
        let bob_before = get_user_token_balances(&[TOKEN1, TOKEN2], &BOB);
        assert_ok!(StableAmm::remove_pool_and_base_pool_liquidity(
            RawOrigin::Signed(ALICE).into(),
            META_POOL_ID,
            BASE_POOL_ID,
            LP_UNIT / 10,
            vec![33_333, 33_333, 0],
            vec![16_666_666_666_666_666, 16_666_666_666_666_666],
            BOB,
            DEADLINE,
        ));
        let alice_after = get_user_token_balances(&[TOKEN3, TOKEN4, BASE_LP, META_LP], &ALICE);
        let bob_after = get_user_token_balances(&[TOKEN1, TOKEN2], &BOB);

        // the meta pool's own currencies stay with the caller
        assert_eq!(alice_after[0] - alice_before[0], 33_333);
        assert_eq!(alice_after[1] - alice_before[1], 33_333);
        assert_eq!(alice_after[2], alice_before[2]);
        assert_eq!(alice_before[3] - alice_after[3], LP_UNIT / 10);

        assert_eq!(bob_after[0] - bob_before[0], 16_666_666_666_666_666);
        assert_eq!(bob_after[1] - bob_before[1], 16_666_666_666_666_666);
        assert_eq!(
            <Tokens as MultiCurrency<AccountId>>::total_issuance(BASE_LP),
            1_966_666_666_666_666_667
        );
    });
}

#[test]
fn remove_pool_and_base_pool_liquidity_one_currency_should_work() {
    new_test_ext().execute_with(|| {
        setup_test_meta_pool();

        assert_noop!(
            StableAmm::remove_pool_and_base_pool_liquidity_one_currency(
                RawOrigin::Signed(ALICE).into(),
                BASE_POOL_ID,
                BASE_POOL_ID,
                LP_UNIT / 10,
                1,
                0,
                ALICE,
                DEADLINE
            ),
            Error::<Test>::InvalidPoolId
        );

        let expected = 99_779_343_733_247_422;
        assert_noop!(
            StableAmm::remove_pool_and_base_pool_liquidity_one_currency(
                RawOrigin::Signed(ALICE).into(),
                META_POOL_ID,
                BASE_POOL_ID,
                LP_UNIT / 10,
                1,
                expected + 1,
                ALICE,
                DEADLINE
            ),
            Error::<Test>::AmountSlippage
        );

        let before = get_user_token_balances(&[TOKEN2, BASE_LP, META_LP], &ALICE);
        assert_ok!(StableAmm::remove_pool_and_base_pool_liquidity_one_currency(
            RawOrigin::Signed(ALICE).into(),
            META_POOL_ID,
            BASE_POOL_ID,
            LP_UNIT / 10,
            1,
            expected,
            ALICE,
            DEADLINE,
        ));
        let after = get_user_token_balances(&[TOKEN2, BASE_LP, META_LP], &ALICE);

        assert_eq!(after[0] - before[0], expected);
        assert_eq!(after[1], before[1]);
        assert_eq!(before[2] - after[2], LP_UNIT / 10);
        assert_eq!(
            StableAmm::get_currency_balances(META_POOL_ID)[2],
            LP_UNIT - 99_880_763_700_555_899
        );
    });
}
