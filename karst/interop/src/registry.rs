use {
    crate::{AssetStandard, InteropError, InteropResult, current_version},
    borsh::{BorshDeserialize, BorshSerialize},
    karst_storage::Map,
    karst_types::{Addr, BlockInfo, NativeAddr, StdError, StdResult, Storage},
    std::str::FromStr,
};

/// One row of a pointer registry.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct PointerRecord {
    /// Raw key of the row's counterpart: the pointer address in a forward
    /// row, the pointee key in a reverse row.
    pub counterpart: Vec<u8>,
    /// Schema version the pointer was created at. Fixed at creation; does
    /// not retroactively track upgrades.
    pub version: u32,
}

/// The resolver pair of one asset standard: its forward (pointee => pointer)
/// and reverse (pointer => pointee) tables, together with the codecs of its
/// two key spaces.
///
/// Keys are stored in canonical raw form (a denom's UTF-8 bytes for the
/// native standard, an address's 20 raw bytes otherwise), so lookups are
/// insensitive to display-form differences such as hex casing.
pub struct PointerResolver {
    pub standard: AssetStandard,
    forward: Map<'static, Vec<u8>, PointerRecord>,
    reverse: Map<'static, Vec<u8>, PointerRecord>,
    parse_pointee: fn(&str) -> InteropResult<Vec<u8>>,
    format_pointee: fn(&[u8]) -> StdResult<String>,
    parse_pointer: fn(&str) -> InteropResult<Vec<u8>>,
    format_pointer: fn(&[u8]) -> StdResult<String>,
}

/// The resolver table, indexed by the standard's tag.
///
/// Pointee and pointer key spaces per standard:
///
/// | standard | pointee          | pointer         |
/// | -------- | ---------------- | --------------- |
/// | native   | bank denom       | EVM address     |
/// | cw20     | native address   | EVM address     |
/// | cw721    | native address   | EVM address     |
/// | cw1155   | native address   | EVM address     |
/// | erc20    | EVM address      | native address  |
/// | erc721   | EVM address      | native address  |
/// | erc1155  | EVM address      | native address  |
pub const RESOLVERS: [PointerResolver; 7] = [
    PointerResolver {
        standard: AssetStandard::Native,
        forward: Map::new("pointer/native"),
        reverse: Map::new("pointee/native"),
        parse_pointee: parse_denom,
        format_pointee: format_denom,
        parse_pointer: parse_evm_addr,
        format_pointer: format_evm_addr,
    },
    PointerResolver {
        standard: AssetStandard::Cw20,
        forward: Map::new("pointer/cw20"),
        reverse: Map::new("pointee/cw20"),
        parse_pointee: parse_native_addr,
        format_pointee: format_native_addr,
        parse_pointer: parse_evm_addr,
        format_pointer: format_evm_addr,
    },
    PointerResolver {
        standard: AssetStandard::Cw721,
        forward: Map::new("pointer/cw721"),
        reverse: Map::new("pointee/cw721"),
        parse_pointee: parse_native_addr,
        format_pointee: format_native_addr,
        parse_pointer: parse_evm_addr,
        format_pointer: format_evm_addr,
    },
    PointerResolver {
        standard: AssetStandard::Cw1155,
        forward: Map::new("pointer/cw1155"),
        reverse: Map::new("pointee/cw1155"),
        parse_pointee: parse_native_addr,
        format_pointee: format_native_addr,
        parse_pointer: parse_evm_addr,
        format_pointer: format_evm_addr,
    },
    PointerResolver {
        standard: AssetStandard::Erc20,
        forward: Map::new("pointer/erc20"),
        reverse: Map::new("pointee/erc20"),
        parse_pointee: parse_evm_addr,
        format_pointee: format_evm_addr,
        parse_pointer: parse_native_addr,
        format_pointer: format_native_addr,
    },
    PointerResolver {
        standard: AssetStandard::Erc721,
        forward: Map::new("pointer/erc721"),
        reverse: Map::new("pointee/erc721"),
        parse_pointee: parse_evm_addr,
        format_pointee: format_evm_addr,
        parse_pointer: parse_native_addr,
        format_pointer: format_native_addr,
    },
    PointerResolver {
        standard: AssetStandard::Erc1155,
        forward: Map::new("pointer/erc1155"),
        reverse: Map::new("pointee/erc1155"),
        parse_pointee: parse_evm_addr,
        format_pointee: format_evm_addr,
        parse_pointer: parse_native_addr,
        format_pointer: format_native_addr,
    },
];

/// Look up the resolver pair of a standard.
pub fn resolver(standard: AssetStandard) -> &'static PointerResolver {
    &RESOLVERS[standard.tag() as usize]
}

impl PointerResolver {
    /// Resolve the pointer of a pointee. `Ok(None)` when no pointer is
    /// registered, which is a normal outcome: asset-bridging tooling polls
    /// this while waiting for a deployment to land.
    pub fn resolve_pointer(
        &self,
        storage: &dyn Storage,
        pointee: &str,
    ) -> InteropResult<Option<(String, u32)>> {
        if pointee.is_empty() {
            return Err(InteropError::invalid_argument("must specify a pointee"));
        }

        let pointee_raw = (self.parse_pointee)(pointee)?;

        let Some(record) = self.forward.may_load(storage, pointee_raw)? else {
            return Ok(None);
        };

        let pointer = (self.format_pointer)(&record.counterpart)?;

        Ok(Some((pointer, record.version)))
    }

    /// Resolve the original pointee of a pointer. The mirror of
    /// [`resolve_pointer`](Self::resolve_pointer).
    pub fn resolve_pointee(
        &self,
        storage: &dyn Storage,
        pointer: &str,
    ) -> InteropResult<Option<(String, u32)>> {
        if pointer.is_empty() {
            return Err(InteropError::invalid_argument("must specify a pointer"));
        }

        let pointer_raw = (self.parse_pointer)(pointer)?;

        let Some(record) = self.reverse.may_load(storage, pointer_raw)? else {
            return Ok(None);
        };

        let pointee = (self.format_pointee)(&record.counterpart)?;

        Ok(Some((pointee, record.version)))
    }
}

/// Record a newly deployed pointer contract, writing both the forward and
/// the reverse row at the standard's current version. Returns that version.
///
/// Invoked by the pointer deployment flow; the query surface never calls
/// this. Registries are bijective and append-only: a pointee or pointer
/// already registered in its table is rejected, and no removal exists.
pub fn register_pointer(
    storage: &mut dyn Storage,
    block: BlockInfo,
    standard: AssetStandard,
    pointee: &str,
    pointer: &str,
) -> InteropResult<u32> {
    if pointee.is_empty() {
        return Err(InteropError::invalid_argument("must specify a pointee"));
    }

    if pointer.is_empty() {
        return Err(InteropError::invalid_argument("must specify a pointer"));
    }

    let entry = resolver(standard);
    let pointee_raw = (entry.parse_pointee)(pointee)?;
    let pointer_raw = (entry.parse_pointer)(pointer)?;

    if entry.forward.has(storage, pointee_raw.clone()) {
        return Err(StdError::duplicate_data::<PointerRecord>(&pointee_raw).into());
    }

    if entry.reverse.has(storage, pointer_raw.clone()) {
        return Err(StdError::duplicate_data::<PointerRecord>(&pointer_raw).into());
    }

    let version = current_version(storage, block, standard)?;

    entry.forward.save(storage, pointee_raw.clone(), &PointerRecord {
        counterpart: pointer_raw.clone(),
        version,
    })?;
    entry.reverse.save(storage, pointer_raw, &PointerRecord {
        counterpart: pointee_raw,
        version,
    })?;

    Ok(version)
}

// -------------------------------- key codecs ---------------------------------

/// A bank denom: one or more non-empty alphanumeric parts separated by `/`.
fn parse_denom(s: &str) -> InteropResult<Vec<u8>> {
    let well_formed = s
        .split('/')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));

    if s.is_empty() || !well_formed {
        return Err(InteropError::invalid_argument(format!(
            "not a valid denom: `{s}`"
        )));
    }

    Ok(s.as_bytes().to_vec())
}

fn format_denom(raw: &[u8]) -> StdResult<String> {
    String::from_utf8(raw.to_vec()).map_err(|err| StdError::deserialize::<String, _>("utf8", err))
}

fn parse_native_addr(s: &str) -> InteropResult<Vec<u8>> {
    NativeAddr::from_str(s)
        .map(|addr| addr.as_ref().to_vec())
        .map_err(InteropError::invalid_argument)
}

fn format_native_addr(raw: &[u8]) -> StdResult<String> {
    NativeAddr::try_from(raw).map(|addr| addr.to_string())
}

fn parse_evm_addr(s: &str) -> InteropResult<Vec<u8>> {
    Addr::from_str(s)
        .map(|addr| addr.as_ref().to_vec())
        .map_err(InteropError::invalid_argument)
}

fn format_evm_addr(raw: &[u8]) -> StdResult<String> {
    Addr::try_from(raw).map(|addr| addr.to_string())
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::testing::sample_asset,
        karst_types::MockStorage,
        strum::IntoEnumIterator,
        test_case::test_case,
    };

    #[test]
    fn table_is_indexed_by_tag() {
        for standard in AssetStandard::iter() {
            assert_eq!(resolver(standard).standard, standard);
        }
    }

    #[test]
    fn round_trip_every_standard() {
        let mut storage = MockStorage::new();
        let block = BlockInfo::mock(1);

        for standard in AssetStandard::iter() {
            let (pointee, pointer) = sample_asset(standard, 1);
            let entry = resolver(standard);

            register_pointer(&mut storage, block, standard, &pointee, &pointer).unwrap();

            let (resolved_pointer, _) = entry
                .resolve_pointer(&storage, &pointee)
                .unwrap()
                .unwrap();
            assert_eq!(resolved_pointer, pointer);

            let (resolved_pointee, _) = entry
                .resolve_pointee(&storage, &resolved_pointer)
                .unwrap()
                .unwrap();
            assert_eq!(resolved_pointee, pointee);
        }
    }

    #[test]
    fn unregistered_keys_resolve_to_none() {
        let storage = MockStorage::new();

        for standard in AssetStandard::iter() {
            let (pointee, pointer) = sample_asset(standard, 9);
            let entry = resolver(standard);

            assert_eq!(entry.resolve_pointer(&storage, &pointee).unwrap(), None);
            assert_eq!(entry.resolve_pointee(&storage, &pointer).unwrap(), None);
        }
    }

    #[test]
    fn lookups_are_case_insensitive_over_hex_keys() {
        let mut storage = MockStorage::new();
        let standard = AssetStandard::Erc20;

        register_pointer(
            &mut storage,
            BlockInfo::mock(1),
            standard,
            "0xdeadbeef00000000000000000000000000000000",
            &NativeAddr::mock(1).to_string(),
        )
        .unwrap();

        // Same pointee, different casing.
        let resolved = resolver(standard)
            .resolve_pointer(&storage, "0xDEADBEEF00000000000000000000000000000000")
            .unwrap();
        assert!(resolved.is_some());
    }

    #[test]
    fn duplicate_registrations_are_rejected() {
        let mut storage = MockStorage::new();
        let block = BlockInfo::mock(1);
        let standard = AssetStandard::Cw20;

        let (pointee, pointer) = sample_asset(standard, 1);
        register_pointer(&mut storage, block, standard, &pointee, &pointer).unwrap();

        // Same pointee, different pointer.
        let (_, other_pointer) = sample_asset(standard, 2);
        assert!(
            register_pointer(&mut storage, block, standard, &pointee, &other_pointer).is_err()
        );

        // Different pointee, same pointer.
        let (other_pointee, _) = sample_asset(standard, 2);
        assert!(
            register_pointer(&mut storage, block, standard, &other_pointee, &pointer).is_err()
        );

        // An entirely fresh pair is fine.
        let (fresh_pointee, fresh_pointer) = sample_asset(standard, 3);
        register_pointer(&mut storage, block, standard, &fresh_pointee, &fresh_pointer).unwrap();
    }

    #[test]
    fn registration_stamps_the_current_version() {
        let mut storage = MockStorage::new();
        let standard = AssetStandard::Cw20;

        crate::schedule_cw20_version(&mut storage, 100, 2).unwrap();

        // Registered before the upgrade activates: version 1.
        let (pointee_a, pointer_a) = sample_asset(standard, 1);
        let version =
            register_pointer(&mut storage, BlockInfo::mock(50), standard, &pointee_a, &pointer_a)
                .unwrap();
        assert_eq!(version, 1);

        // Registered after: version 2. The earlier record keeps version 1.
        let (pointee_b, pointer_b) = sample_asset(standard, 2);
        let version =
            register_pointer(&mut storage, BlockInfo::mock(150), standard, &pointee_b, &pointer_b)
                .unwrap();
        assert_eq!(version, 2);

        let entry = resolver(standard);
        let (_, version_a) = entry.resolve_pointer(&storage, &pointee_a).unwrap().unwrap();
        assert_eq!(version_a, 1);
    }

    #[test_case(""; "empty")]
    #[test_case("not-an-address"; "garbage")]
    #[test_case("0x1234"; "truncated hex")]
    fn malformed_pointee_is_invalid_argument(pointee: &str) {
        let storage = MockStorage::new();

        let err = resolver(AssetStandard::Erc20)
            .resolve_pointer(&storage, pointee)
            .unwrap_err();
        assert!(matches!(err, InteropError::InvalidArgument { .. }));
    }

    #[test]
    fn denoms_are_validated() {
        let storage = MockStorage::new();
        let entry = resolver(AssetStandard::Native);

        assert!(entry.resolve_pointer(&storage, "ukarst").unwrap().is_none());
        assert!(
            entry
                .resolve_pointer(&storage, "factory/ukarst/sub")
                .unwrap()
                .is_none()
        );

        for bad in ["", "/", "u karst", "factory//sub", "ukarst/"] {
            assert!(matches!(
                entry.resolve_pointer(&storage, bad),
                Err(InteropError::InvalidArgument { .. }),
            ));
        }
    }
}
