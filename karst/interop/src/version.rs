use {
    crate::{AssetStandard, CW20_VERSION_SCHEDULE, InteropError, InteropResult, POINTER_CODE_IDS},
    karst_storage::Bound,
    karst_types::{BlockInfo, Order, StdResult, Storage},
};

/// Schema versions of the pointer contract code shipped in this binary, one
/// per asset standard. A version bump means newly-registered pointers of
/// that standard get the new code; existing pointers keep the version they
/// were created at.
pub const NATIVE_POINTER_VERSION: u32 = 1;
pub const CW721_POINTER_VERSION: u32 = 2;
pub const CW1155_POINTER_VERSION: u32 = 1;
pub const ERC20_POINTER_VERSION: u32 = 2;
pub const ERC721_POINTER_VERSION: u32 = 2;
pub const ERC1155_POINTER_VERSION: u32 = 1;

/// The CW20 pointer version in effect when the upgrade schedule is empty.
/// Unlike the other standards, CW20 pointer logic upgrades activate at a
/// chain height rather than with a binary release; see
/// [`CW20_VERSION_SCHEDULE`].
pub const CW20_POINTER_BASE_VERSION: u32 = 1;

/// The current pointer schema version of an asset standard.
///
/// Uniformly a function of `(standard, snapshot)`: most standards ignore the
/// snapshot, but CW20's version depends on the query's block height, so
/// callers must not cache the result across heights. Never fails for a
/// well-formed standard with uncorrupted state.
pub fn current_version(
    storage: &dyn Storage,
    block: BlockInfo,
    standard: AssetStandard,
) -> StdResult<u32> {
    match standard {
        AssetStandard::Native => Ok(NATIVE_POINTER_VERSION),
        AssetStandard::Cw20 => {
            // The highest version whose activation height is at or below
            // this snapshot. The schedule is written in ascending
            // height-and-version order, so the latest activated row wins.
            let scheduled = CW20_VERSION_SCHEDULE
                .values(
                    storage,
                    None,
                    Some(Bound::Inclusive(block.height)),
                    Order::Descending,
                )
                .next()
                .transpose()?;

            Ok(scheduled.map_or(CW20_POINTER_BASE_VERSION, |version| {
                version.max(CW20_POINTER_BASE_VERSION)
            }))
        },
        AssetStandard::Cw721 => Ok(CW721_POINTER_VERSION),
        AssetStandard::Cw1155 => Ok(CW1155_POINTER_VERSION),
        AssetStandard::Erc20 => Ok(ERC20_POINTER_VERSION),
        AssetStandard::Erc721 => Ok(ERC721_POINTER_VERSION),
        AssetStandard::Erc1155 => Ok(ERC1155_POINTER_VERSION),
    }
}

/// The identifier of the stored code template from which new native-side
/// pointers of this standard are instantiated.
///
/// `Ok(None)` both for standards that don't use a code template and for
/// template standards whose code simply hasn't been stored yet; neither is
/// an error.
pub fn stored_code_id(storage: &dyn Storage, standard: AssetStandard) -> StdResult<Option<u64>> {
    if !standard.uses_code_template() {
        return Ok(None);
    }

    POINTER_CODE_IDS.may_load(storage, standard)
}

/// Record the stored code template for a standard. Invoked by the
/// deployment flow after storing new pointer code; the query surface never
/// calls this. Overwriting is allowed: storing upgraded code replaces the
/// template new pointers are instantiated from.
pub fn store_code_id(
    storage: &mut dyn Storage,
    standard: AssetStandard,
    code_id: u64,
) -> InteropResult<()> {
    if !standard.uses_code_template() {
        return Err(InteropError::invalid_argument(format!(
            "standard {standard} does not use a stored code template"
        )));
    }

    POINTER_CODE_IDS.save(storage, standard, &code_id)?;

    Ok(())
}

/// Schedule a CW20 pointer version upgrade to activate at the given height.
/// Invoked by the upgrade flow. The schedule must stay monotonic in both
/// axes: each new row must activate no earlier, and carry no lower a
/// version, than every row already scheduled.
pub fn schedule_cw20_version(
    storage: &mut dyn Storage,
    activation_height: u64,
    version: u32,
) -> InteropResult<()> {
    let latest = CW20_VERSION_SCHEDULE
        .range(storage, None, None, Order::Descending)
        .next()
        .transpose()?;

    if let Some((height, scheduled)) = latest {
        if activation_height < height || version < scheduled {
            return Err(InteropError::invalid_argument(format!(
                "upgrade schedule must not regress: got version {version} at height \
                 {activation_height}, after version {scheduled} at height {height}"
            )));
        }
    }

    CW20_VERSION_SCHEDULE.save(storage, activation_height, &version)?;

    Ok(())
}

// ----------------------------------- tests -----------------------------------
