use {
    karst_interop::{
        AssetStandard, BRIDGE_SANDBOX, CONFIG, GasTracker, InteropConfig, InteropError,
        InteropQuerier, MOCK_CALL_FLAT_GAS, MOCK_CALL_GAS_PER_BYTE, MockEvm, echo_contract,
        mutating_contract, register_pointer, reverting_contract, sample_asset,
        schedule_cw20_version, sender_reporting_contract, set_association, store_code_id,
    },
    karst_types::{
        Addr, BlockInfo, InteropQuery, JsonDeExt, JsonSerExt, MockStorage, NativeAddr, StdError,
        Storage,
    },
    std::str::FromStr,
    strum::IntoEnumIterator,
};

fn setup_storage() -> MockStorage {
    let mut storage = MockStorage::new();

    CONFIG
        .save(&mut storage, &InteropConfig {
            static_call_gas_multiplier: 10_000,
            query_gas_baseline: 1_000_000,
        })
        .unwrap();

    storage
}

fn querier<'a>(storage: &'a MockStorage, evm: &'a MockEvm, height: u64) -> InteropQuerier<'a, MockEvm> {
    InteropQuerier::new(
        storage,
        BlockInfo::mock(height),
        GasTracker::new_limitless(),
        evm,
    )
}

#[test]
fn pointer_round_trip_through_the_facade() {
    let mut storage = setup_storage();
    let evm = MockEvm::new();

    // One registered pair per standard.
    for standard in AssetStandard::iter() {
        let (pointee, pointer) = sample_asset(standard, 1);
        register_pointer(&mut storage, BlockInfo::mock(1), standard, &pointee, &pointer).unwrap();
    }

    let querier = querier(&storage, &evm, 1);

    for standard in AssetStandard::iter() {
        let (pointee, _) = sample_asset(standard, 1);

        let resp = querier
            .query(InteropQuery::pointer(standard.tag(), pointee.clone()))
            .unwrap()
            .as_pointer();
        assert!(resp.exists, "{standard}: pointer should exist");
        let pointer = resp.pointer.unwrap();

        // Resolving the returned pointer yields the original pointee.
        let resp = querier
            .query(InteropQuery::pointee(standard.tag(), pointer))
            .unwrap()
            .as_pointee();
        assert!(resp.exists, "{standard}: pointee should exist");
        assert_eq!(resp.pointee.unwrap(), pointee);
    }
}

#[test]
fn unregistered_keys_are_data_not_errors() {
    let storage = setup_storage();
    let evm = MockEvm::new();
    let querier = querier(&storage, &evm, 1);

    for standard in AssetStandard::iter() {
        let (pointee, pointer) = sample_asset(standard, 7);

        let resp = querier
            .query(InteropQuery::pointer(standard.tag(), pointee))
            .unwrap()
            .as_pointer();
        assert!(!resp.exists);
        assert_eq!(resp.pointer, None);
        assert_eq!(resp.version, None);

        let resp = querier
            .query(InteropQuery::pointee(standard.tag(), pointer))
            .unwrap()
            .as_pointee();
        assert!(!resp.exists);
    }
}

#[test]
fn association_scenario() {
    let mut storage = setup_storage();
    let evm = MockEvm::new();

    let native = NativeAddr::mock(1);
    let evm_addr = Addr::from_str("0xdef0000000000000000000000000000000000001").unwrap();
    set_association(&mut storage, native, evm_addr).unwrap();

    let querier = querier(&storage, &evm, 1);

    // Forward lookup; input in mixed case, response in canonical lowercase.
    let resp = querier
        .query(InteropQuery::evm_address(native.to_string()))
        .unwrap()
        .as_evm_address();
    assert!(resp.associated);
    assert_eq!(
        resp.evm_address.unwrap().to_string(),
        "0xdef0000000000000000000000000000000000001",
    );

    let resp = querier
        .query(InteropQuery::native_address(
            "0xDEF0000000000000000000000000000000000001",
        ))
        .unwrap()
        .as_native_address();
    assert!(resp.associated);
    assert_eq!(resp.native_address, Some(native));

    // A well-formed address that was never associated: data, not an error.
    let resp = querier
        .query(InteropQuery::native_address(
            "0x0000000000000000000000000000000000000099",
        ))
        .unwrap()
        .as_native_address();
    assert!(!resp.associated);
    assert_eq!(resp.native_address, None);
}

#[test]
fn erc20_pointer_scenario() {
    let mut storage = setup_storage();
    let evm = MockEvm::new();

    // An ERC20 asset with a registered native-side pointer. The binary's
    // ERC20 pointer version is 2, so the record is stamped with 2.
    let token = "0x00000000000000000000000000000000000a11ce";
    let cw_pointer = NativeAddr::mock(33);
    register_pointer(
        &mut storage,
        BlockInfo::mock(1),
        AssetStandard::Erc20,
        token,
        &cw_pointer.to_string(),
    )
    .unwrap();

    let querier = querier(&storage, &evm, 1);

    let resp = querier
        .query(InteropQuery::pointer(AssetStandard::Erc20.tag(), token))
        .unwrap()
        .as_pointer();
    assert!(resp.exists);
    assert_eq!(resp.pointer, Some(cw_pointer.to_string()));
    assert_eq!(resp.version, Some(2));

    // The same call for a never-registered token.
    let resp = querier
        .query(InteropQuery::pointer(
            AssetStandard::Erc20.tag(),
            "0x000000000000000000000000000000000000b0b0",
        ))
        .unwrap()
        .as_pointer();
    assert!(!resp.exists);
}

#[test]
fn pointer_version_is_monotonic_across_snapshots() {
    let mut storage = setup_storage();
    let evm = MockEvm::new();

    schedule_cw20_version(&mut storage, 100, 2).unwrap();
    schedule_cw20_version(&mut storage, 300, 3).unwrap();

    let mut last = 0;
    for height in [0, 50, 100, 150, 300, 1_000] {
        let version = querier(&storage, &evm, height)
            .query(InteropQuery::pointer_version(AssetStandard::Cw20.tag()))
            .unwrap()
            .as_pointer_version()
            .version;
        assert!(version >= last, "version decreased at height {height}");
        last = version;
    }
}

#[test]
fn code_id_sentinel_and_population() {
    let mut storage = setup_storage();
    let evm = MockEvm::new();

    // Never stored: absent, not an error.
    let resp = querier(&storage, &evm, 1)
        .query(InteropQuery::pointer_version(AssetStandard::Erc721.tag()))
        .unwrap()
        .as_pointer_version();
    assert_eq!(resp.code_id, None);

    store_code_id(&mut storage, AssetStandard::Erc721, 7).unwrap();

    let resp = querier(&storage, &evm, 1)
        .query(InteropQuery::pointer_version(AssetStandard::Erc721.tag()))
        .unwrap()
        .as_pointer_version();
    assert_eq!(resp.code_id, Some(7));

    // Standards without a code template never report one.
    let resp = querier(&storage, &evm, 1)
        .query(InteropQuery::pointer_version(AssetStandard::Cw721.tag()))
        .unwrap()
        .as_pointer_version();
    assert_eq!(resp.code_id, None);
}

#[test]
fn static_call_runs_under_the_sandbox_identity() {
    let storage = setup_storage();
    let target = Addr::mock(5);
    let evm = MockEvm::new().with_contract(target, sender_reporting_contract);

    let resp = querier(&storage, &evm, 1)
        .query(InteropQuery::static_call(target.to_string(), vec![], None))
        .unwrap()
        .as_static_call();

    assert_eq!(resp.data.as_ref(), BRIDGE_SANDBOX.as_ref());
}

#[test]
fn static_call_leaves_no_state_behind() {
    let storage = setup_storage();
    let target = Addr::mock(5);
    let evm = MockEvm::new().with_contract(target, mutating_contract);

    let resp = querier(&storage, &evm, 1)
        .query(InteropQuery::static_call(target.to_string(), vec![], None))
        .unwrap()
        .as_static_call();
    assert!(resp.data.is_empty());

    // The write the contract performed died with the sandbox.
    assert_eq!(storage.read(b"intruder"), None);
}

#[test]
fn revert_is_not_an_empty_success() {
    let storage = setup_storage();
    let target = Addr::mock(5);
    let evm = MockEvm::new().with_contract(target, reverting_contract);

    let err = querier(&storage, &evm, 1)
        .query(InteropQuery::static_call(
            target.to_string(),
            b"abort!".to_vec(),
            None,
        ))
        .unwrap_err();

    let InteropError::ExecutionReverted { output } = err else {
        panic!("expecting ExecutionReverted, got: {err}");
    };
    assert_eq!(output.as_ref(), b"abort!");
}

#[test]
fn static_call_gas_is_isolated_per_call() {
    let storage = setup_storage();
    let evm = MockEvm::new();

    // Two calls against the same querier: each runs under its own budget,
    // so the second is not affected by what the first consumed.
    let querier = querier(&storage, &evm, 1);

    let first = querier
        .query(InteropQuery::static_call(
            Addr::mock(6).to_string(),
            vec![0; 64],
            Some(MOCK_CALL_FLAT_GAS + 64 * MOCK_CALL_GAS_PER_BYTE),
        ))
        .unwrap()
        .as_static_call();
    assert_eq!(first.gas_used, MOCK_CALL_FLAT_GAS + 64 * MOCK_CALL_GAS_PER_BYTE);

    let second = querier
        .query(InteropQuery::static_call(
            Addr::mock(6).to_string(),
            vec![],
            Some(MOCK_CALL_FLAT_GAS),
        ))
        .unwrap()
        .as_static_call();
    assert_eq!(second.gas_used, MOCK_CALL_FLAT_GAS);
}

#[test]
fn out_of_gas_reports_no_partial_output() {
    let storage = setup_storage();
    let target = Addr::mock(5);
    let evm = MockEvm::new().with_contract(target, echo_contract);

    let err = querier(&storage, &evm, 1)
        .query(InteropQuery::static_call(
            target.to_string(),
            b"payload".to_vec(),
            Some(1),
        ))
        .unwrap_err();

    assert!(matches!(
        err,
        InteropError::Std(StdError::OutOfGas { .. }),
    ));
}

#[test]
fn queries_survive_a_wire_round_trip() {
    let mut storage = setup_storage();
    let evm = MockEvm::new();

    let (pointee, pointer) = sample_asset(AssetStandard::Cw20, 2);
    register_pointer(
        &mut storage,
        BlockInfo::mock(1),
        AssetStandard::Cw20,
        &pointee,
        &pointer,
    )
    .unwrap();

    // Serialize the request as the RPC layer would, deserialize, execute.
    let raw = InteropQuery::pointer(AssetStandard::Cw20.tag(), pointee)
        .to_json_vec()
        .unwrap();
    let req = raw.deserialize_json().unwrap();

    let resp = querier(&storage, &evm, 1).query(req).unwrap().as_pointer();
    assert!(resp.exists);
    assert_eq!(resp.pointer, Some(pointer));
}
