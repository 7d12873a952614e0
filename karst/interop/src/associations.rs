use {
    crate::{EVM_ADDRESSES, NATIVE_ADDRESSES},
    karst_types::{Addr, NativeAddr, StdError, StdResult, Storage},
};

/// Look up the EVM account associated with a native address. `Ok(None)` if
/// the address has no association, which is a normal state for any account
/// that has never used the EVM environment.
pub fn evm_by_native(storage: &dyn Storage, native: NativeAddr) -> StdResult<Option<Addr>> {
    EVM_ADDRESSES.may_load(storage, native)
}

/// Look up the native account associated with an EVM address. `Ok(None)` if
/// the address has no association.
pub fn native_by_evm(storage: &dyn Storage, evm: Addr) -> StdResult<Option<NativeAddr>> {
    NATIVE_ADDRESSES.may_load(storage, evm)
}

/// Record an account association, writing both directions of the mapping.
///
/// Invoked by the association flow when an account first proves control of
/// its counterpart; the query surface never calls this. Associations form a
/// bijection and are immutable once created: binding an address already
/// bound in either direction is an error, and no removal exists.
pub fn set_association(
    storage: &mut dyn Storage,
    native: NativeAddr,
    evm: Addr,
) -> StdResult<()> {
    if EVM_ADDRESSES.has(storage, native) {
        return Err(StdError::duplicate_data::<NativeAddr>(native.as_ref()));
    }

    if NATIVE_ADDRESSES.has(storage, evm) {
        return Err(StdError::duplicate_data::<Addr>(evm.as_ref()));
    }

    EVM_ADDRESSES.save(storage, native, &evm)?;
    NATIVE_ADDRESSES.save(storage, evm, &native)?;

    Ok(())
}

// ----------------------------------- tests -----------------------------------
