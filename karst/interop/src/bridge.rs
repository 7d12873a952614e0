use {
    crate::{CONFIG, Evm, GasTracker, InteropError, InteropResult, QueryCtx},
    hex_literal::hex,
    karst_types::{Addr, Binary, Buffer, StorageWrapper},
};

/// The sandbox account fixed as the caller of every bridged static call.
///
/// The requesting user's identity never enters the call: this is a
/// diagnostic read path, not a transaction, so it must not be able to
/// impersonate any address inside the EVM environment.
pub const BRIDGE_SANDBOX: Addr =
    Addr::from_array(hex!("6b727374000000000000000000000000696e7470"));

/// The result of a bridged static call.
///
/// Carries the explicit budget the call ran under next to the amount spent,
/// so gas accounting stays visible to the caller instead of living in
/// shared ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCallOutcome {
    pub output: Binary,
    pub gas_limit: u64,
    pub gas_used: u64,
}

/// Execute one read-only call into the EVM environment.
///
/// The gas budget is, in order of precedence: the caller's explicit limit;
/// the configured multiplier applied to the query's remaining ambient
/// budget; the multiplier applied to the configured baseline, when the
/// ambient budget is limitless or already exhausted. A static call never
/// runs unbounded.
///
/// The engine executes against a write buffer over the snapshot which is
/// dropped, never committed, so no state mutation survives the call,
/// whether it succeeds or fails.
pub fn static_call<E>(
    ctx: &QueryCtx,
    evm: &E,
    target: &str,
    data: &[u8],
    gas_limit: Option<u64>,
) -> InteropResult<StaticCallOutcome>
where
    E: Evm,
{
    // Rejected before any gas is charged or state is read.
    if target.is_empty() {
        return Err(InteropError::invalid_argument(
            "cannot use static call to create contracts",
        ));
    }

    let target: Addr = target.parse().map_err(InteropError::invalid_argument)?;

    let gas_limit = match gas_limit {
        Some(limit) => limit,
        None => {
            let cfg = CONFIG.load(ctx.storage)?;
            match ctx.gas_tracker.remaining() {
                Some(remaining) if remaining > 0 => cfg.scale_gas(remaining),
                _ => cfg.scale_gas(cfg.query_gas_baseline),
            }
        },
    };

    // Each call gets its own tracker and its own sandbox; nothing is shared
    // with concurrently executing calls.
    let gas_tracker = GasTracker::new_limited(gas_limit);
    let mut sandbox = Buffer::new(StorageWrapper::new(ctx.storage), None);

    #[cfg(feature = "tracing")]
    tracing::debug!(contract = %target, gas_limit, "Bridged static call");

    let result = evm.static_call(
        ctx.block,
        &mut sandbox,
        gas_tracker.clone(),
        BRIDGE_SANDBOX,
        target,
        data,
    );

    // Discard the sandbox together with every write the engine buffered.
    drop(sandbox);

    let output = result.map_err(InteropError::from)?;

    Ok(StaticCallOutcome {
        output: output.into(),
        gas_limit,
        gas_used: gas_tracker.used(),
    })
}

// ----------------------------------- tests -----------------------------------
