use {
    crate::{AssetStandard, Evm, EvmError, EvmResult, GasTracker},
    karst_types::{Addr, BlockInfo, NativeAddr, Storage},
    std::collections::BTreeMap,
};

/// Flat gas charged by [`MockEvm`] for any call, mirroring the engine's
/// base call cost.
pub const MOCK_CALL_FLAT_GAS: u64 = 21_000;

/// Gas charged by [`MockEvm`] per byte of call data.
pub const MOCK_CALL_GAS_PER_BYTE: u64 = 16;

/// What a mock contract sees when called.
pub struct MockCallCtx<'a> {
    pub block: BlockInfo,
    pub sender: Addr,
    pub storage: &'a mut dyn Storage,
}

/// A mock contract: a plain function over the call context and call data.
pub type MockContract = fn(MockCallCtx, &[u8]) -> EvmResult<Vec<u8>>;

/// An in-process stand-in for the EVM engine, hosting mock contracts at
/// fixed addresses.
#[derive(Default, Clone)]
pub struct MockEvm {
    contracts: BTreeMap<Addr, MockContract>,
}

impl MockEvm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contract(mut self, address: Addr, contract: MockContract) -> Self {
        self.contracts.insert(address, contract);
        self
    }
}

impl Evm for MockEvm {
    fn static_call(
        &self,
        block: BlockInfo,
        storage: &mut dyn Storage,
        gas_tracker: GasTracker,
        sender: Addr,
        target: Addr,
        data: &[u8],
    ) -> EvmResult<Vec<u8>> {
        gas_tracker.consume(MOCK_CALL_FLAT_GAS, "base call cost")?;
        gas_tracker.consume(data.len() as u64 * MOCK_CALL_GAS_PER_BYTE, "call data")?;

        // Calling an address with no code behind it succeeds with empty
        // output, as in the real engine.
        let Some(contract) = self.contracts.get(&target) else {
            return Ok(Vec::new());
        };

        contract(
            MockCallCtx {
                block,
                sender,
                storage,
            },
            data,
        )
    }
}

/// A mock contract that echoes its call data back.
pub fn echo_contract(_ctx: MockCallCtx, data: &[u8]) -> EvmResult<Vec<u8>> {
    Ok(data.to_vec())
}

/// A mock contract that reverts, with its call data as the revert output.
pub fn reverting_contract(_ctx: MockCallCtx, data: &[u8]) -> EvmResult<Vec<u8>> {
    Err(EvmError::revert(data))
}

/// A mock contract that returns the caller's address, for asserting the
/// bridge pins the sandbox identity.
pub fn sender_reporting_contract(ctx: MockCallCtx, _data: &[u8]) -> EvmResult<Vec<u8>> {
    Ok(ctx.sender.as_ref().to_vec())
}

/// A mock contract that writes to its state, for asserting the bridge
/// discards the sandbox.
pub fn mutating_contract(ctx: MockCallCtx, _data: &[u8]) -> EvmResult<Vec<u8>> {
    ctx.storage.write(b"intruder", b"was here");
    Ok(Vec::new())
}

/// A well-formed `(pointee, pointer)` display-form pair for an asset
/// standard, distinct per index.
pub fn sample_asset(standard: AssetStandard, index: u8) -> (String, String) {
    match standard {
        AssetStandard::Native => (
            format!("factory/token{index}"),
            Addr::mock(index).to_string(),
        ),
        AssetStandard::Cw20 | AssetStandard::Cw721 | AssetStandard::Cw1155 => (
            NativeAddr::mock(index).to_string(),
            Addr::mock(index).to_string(),
        ),
        AssetStandard::Erc20 | AssetStandard::Erc721 | AssetStandard::Erc1155 => (
            Addr::mock(index).to_string(),
            NativeAddr::mock(index).to_string(),
        ),
    }
}
