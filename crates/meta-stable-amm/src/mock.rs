use super::*;
use crate as stable_amm;
use crate::{
    traits::{StablePoolLpCurrencyIdGenerate, ValidateCurrency},
    Config, Pallet,
};

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{
    pallet_prelude::GenesisBuild,
    parameter_types,
    traits::{ConstU32, Everything},
    PalletId,
};
use orml_traits::{currency::MutationHooks, parameter_type_with_key, MultiCurrency};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_core::H256;
use sp_runtime::{
    testing::Header,
    traits::{BlakeTwo256, IdentityLookup, Zero},
    RuntimeDebug,
};
use sp_std::marker::PhantomData;

type UncheckedExtrinsic = frame_system::mocking::MockUncheckedExtrinsic<Test>;
type Block = frame_system::mocking::MockBlock<Test>;

parameter_types! {
    pub const ExistentialDeposit: u64 = 1;

    pub const BlockHashCount: u64 = 250;
    pub const StableAmmPalletId: PalletId = PalletId(*b"mod/samm");
    pub const MaxReserves: u32 = 50;
    pub const MinimumPeriod: Moment = SLOT_DURATION / 2;
    pub const PoolCurrencySymbolLimit: u32 = 50;
}

parameter_type_with_key! {
    pub ExistentialDeposits: |_currency_id: CurrencyId| -> Balance {
        Zero::zero()
    };
}

pub type AccountId = u128;
pub type TokenSymbol = u8;
pub type PoolId = u32;

#[derive(
    Serialize, Deserialize, Encode, Decode, Eq, PartialEq, Copy, Clone, RuntimeDebug, PartialOrd, MaxEncodedLen, Ord, TypeInfo,
)]
pub enum CurrencyId {
    Forbidden(TokenSymbol),
    Token(TokenSymbol),
    StableLPV2(PoolId),
}

impl frame_system::Config for Test {
    type BaseCallFilter = Everything;
    type RuntimeOrigin = RuntimeOrigin;
    type Index = u64;
    type RuntimeCall = RuntimeCall;
    type BlockNumber = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = AccountId;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Header = Header;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = BlockHashCount;
    type DbWeight = ();
    type Version = ();
    type AccountData = pallet_balances::AccountData<u128>;
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type PalletInfo = PalletInfo;
    type BlockWeights = ();
    type BlockLength = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

pub struct CurrencyHooks<T>(PhantomData<T>);
impl<T: stable_amm::Config> MutationHooks<T::AccountId, T::CurrencyId, Balance> for CurrencyHooks<T> {
    type OnDust = ();
    type OnSlash = ();
    type PreDeposit = ();
    type PostDeposit = ();
    type PreTransfer = LpTransferHook<T>;
    type PostTransfer = ();
    type OnNewTokenAccount = ();
    type OnKilledTokenAccount = ();
}

impl orml_tokens::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Balance = Balance;
    type Amount = i128;
    type CurrencyId = CurrencyId;
    type WeightInfo = ();
    type ExistentialDeposits = ExistentialDeposits;
    type CurrencyHooks = CurrencyHooks<Test>;
    type MaxLocks = ();
    type DustRemovalWhitelist = Everything;
    type MaxReserves = MaxReserves;
    type ReserveIdentifier = [u8; 8];
}

impl pallet_balances::Config for Test {
    type Balance = u128;
    type DustRemoval = ();
    type RuntimeEvent = RuntimeEvent;
    type ExistentialDeposit = ExistentialDeposit;
    type AccountStore = frame_system::Pallet<Test>;
    type WeightInfo = ();
    type MaxLocks = ();
    type MaxReserves = MaxReserves;
    type ReserveIdentifier = [u8; 8];
}

pub type Moment = u64;
pub const MILLISECS_PER_BLOCK: Moment = 12000;
pub const SLOT_DURATION: Moment = MILLISECS_PER_BLOCK;

impl pallet_timestamp::Config for Test {
    type MinimumPeriod = MinimumPeriod;
    type Moment = u64;
    type OnTimestampSet = ();
    type WeightInfo = ();
}

impl Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type CurrencyId = CurrencyId;
    type MultiCurrency = Tokens;
    type PoolId = PoolId;
    type EnsurePoolAsset = EnsurePoolAssetImpl<Tokens>;
    type LpGenerate = PoolLpGenerate;
    type TimeProvider = Timestamp;
    type PoolCurrencySymbolLimit = PoolCurrencySymbolLimit;
    type PalletId = StableAmmPalletId;
    type WeightInfo = ();
}

pub struct EnsurePoolAssetImpl<Local>(PhantomData<Local>);

pub struct PoolLpGenerate;

impl StablePoolLpCurrencyIdGenerate<CurrencyId, PoolId> for PoolLpGenerate {
    fn generate_by_pool_id(pool_id: PoolId) -> CurrencyId {
        CurrencyId::StableLPV2(pool_id)
    }
}

impl<Local> ValidateCurrency<CurrencyId> for EnsurePoolAssetImpl<Local>
where
    Local: MultiCurrency<AccountId, Balance = u128, CurrencyId = CurrencyId>,
{
    fn validate_pooled_currency(currencies: &[CurrencyId]) -> bool {
        !currencies
            .iter()
            .any(|currency| matches!(currency, CurrencyId::Forbidden(_)))
    }

    fn validate_pool_lp_currency(currency_id: CurrencyId) -> bool {
        if let CurrencyId::Token(_) = currency_id {
            return false;
        }

        Local::total_issuance(currency_id).is_zero()
    }
}

frame_support::construct_runtime!(
    pub enum Test where
        Block = Block,
        NodeBlock = Block,
        UncheckedExtrinsic = UncheckedExtrinsic,
    {
        System: frame_system::{Pallet, Call, Config, Storage, Event<T>} = 0,
        Timestamp: pallet_timestamp::{Pallet, Call, Storage, Inherent} = 1,

        Balances: pallet_balances::{Pallet, Call, Storage, Config<T>, Event<T>} = 8,
        StableAMM: stable_amm::{Pallet, Call, Storage, Event<T>} = 9,
        Tokens: orml_tokens::{Pallet, Storage, Event<T>, Config<T>} = 11,
    }
);

pub type StableAmm = Pallet<Test>;
pub const ALICE: u128 = 1;
pub const BOB: u128 = 2;
pub const CHARLIE: u128 = 3;

pub const TOKEN1_SYMBOL: u8 = 1;
pub const TOKEN2_SYMBOL: u8 = 2;
pub const TOKEN3_SYMBOL: u8 = 3;
pub const TOKEN4_SYMBOL: u8 = 4;

pub const TOKEN1: CurrencyId = CurrencyId::Token(TOKEN1_SYMBOL);
pub const TOKEN2: CurrencyId = CurrencyId::Token(TOKEN2_SYMBOL);
pub const TOKEN3: CurrencyId = CurrencyId::Token(TOKEN3_SYMBOL);
pub const TOKEN4: CurrencyId = CurrencyId::Token(TOKEN4_SYMBOL);

pub const STABLE_LP_DECIMAL: u32 = 18;
pub const TOKEN1_DECIMAL: u32 = 18;
pub const TOKEN2_DECIMAL: u32 = 18;
pub const TOKEN3_DECIMAL: u32 = 6;
pub const TOKEN4_DECIMAL: u32 = 6;

pub const TOKEN1_UNIT: u128 = 1_000_000_000_000_000_000;
pub const TOKEN2_UNIT: u128 = 1_000_000_000_000_000_000;
pub const TOKEN3_UNIT: u128 = 1_000_000;
pub const TOKEN4_UNIT: u128 = 1_000_000;
pub const LP_UNIT: u128 = 1_000_000_000_000_000_000;

/// Unix time (seconds) every test starts at.
pub const START: u64 = 1_700_000_000;
pub const DEADLINE: u64 = u64::MAX;

pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::default()
        .build_storage::<Test>()
        .unwrap();
    pallet_balances::GenesisConfig::<Test> {
        balances: vec![(ALICE, u128::MAX)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    orml_tokens::GenesisConfig::<Test> {
        balances: vec![
            (ALICE, TOKEN1, TOKEN1_UNIT * 1_00_000_000),
            (ALICE, TOKEN2, TOKEN2_UNIT * 1_00_000_000),
            (ALICE, TOKEN3, TOKEN3_UNIT * 1_00_000_000),
            (ALICE, TOKEN4, TOKEN4_UNIT * 1_00_000_000),
            (BOB, TOKEN1, TOKEN1_UNIT * 1_00),
            (BOB, TOKEN2, TOKEN2_UNIT * 1_00),
            (BOB, TOKEN3, TOKEN3_UNIT * 1_00),
            (BOB, TOKEN4, TOKEN4_UNIT * 1_00),
            (CHARLIE, TOKEN1, TOKEN1_UNIT * 1_00_000_000),
            (CHARLIE, TOKEN2, TOKEN2_UNIT * 1_00_000_000),
            (CHARLIE, TOKEN3, TOKEN3_UNIT * 1_00_000_000),
            (CHARLIE, TOKEN4, TOKEN4_UNIT * 1_00_000_000),
        ],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: sp_io::TestExternalities = t.into();
    ext.execute_with(|| {
        System::set_block_number(1);
        set_block_timestamp(START);
    });
    ext
}

pub fn mine_block_with_timestamp(timestamp: u64) {
    System::set_block_number(System::block_number() + 1);
    set_block_timestamp(timestamp);
}

// timestamp in second
pub fn set_block_timestamp(timestamp: u64) {
    Timestamp::set_timestamp(timestamp * 1000);
}

pub fn get_user_token_balances(currencies: &[CurrencyId], user: &AccountId) -> Vec<Balance> {
    currencies
        .iter()
        .map(|currency_id| get_user_balance(*currency_id, user))
        .collect()
}

pub fn get_user_balance(currency_id: CurrencyId, user: &AccountId) -> Balance {
    <Test as Config>::MultiCurrency::free_balance(currency_id, user)
}

pub fn pool_info(pool_id: PoolId) -> BasePoolOf<Test> {
    StableAmm::pools(pool_id).unwrap().into_info()
}
