use {
    crate::{AssetStandard, InteropConfig},
    karst_storage::{Item, Map},
    karst_types::{Addr, NativeAddr},
};

/// Interop layer configuration.
pub const CONFIG: Item<InteropConfig> = Item::new("config");

/// Account associations, native address => EVM address.
///
/// Together with [`NATIVE_ADDRESSES`] this forms one bijection; the two maps
/// are only ever written together, through
/// [`set_association`](crate::set_association).
pub const EVM_ADDRESSES: Map<NativeAddr, Addr> = Map::new("evm_addr");

/// Account associations, EVM address => native address. The reverse rows of
/// [`EVM_ADDRESSES`].
pub const NATIVE_ADDRESSES: Map<Addr, NativeAddr> = Map::new("native_addr");

/// Identifiers of the stored code templates from which native-side pointer
/// contracts are instantiated: standard => code id.
///
/// Only the EVM-originated standards (`Erc20`, `Erc721`, `Erc1155`) ever
/// have a row here. No row means no code has been stored yet for that
/// standard, which is a normal state, not an error.
pub const POINTER_CODE_IDS: Map<AssetStandard, u64> = Map::new("pointer_code_id");

/// The CW20 pointer version upgrade schedule: activation height => version.
///
/// CW20 pointer logic is upgradeable independently of a binary release, so
/// its current version is a function of the query's block height rather
/// than a compile-time constant. Written by the upgrade flow.
pub const CW20_VERSION_SCHEDULE: Map<u64, u32> = Map::new("cw20_version");
