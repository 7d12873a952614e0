use {
    crate::{Addr, Binary, NativeAddr},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    serde_with::skip_serializing_none,
};

/// A query request to the interop layer.
///
/// Asset standards travel as raw `u8` tags rather than a typed enum, the
/// same way they travel over the wire: an out-of-range tag must reach the
/// facade, which answers it with an "unsupported standard" error instead of
/// a transport-level decoding failure.
///
/// Addresses travel as strings; the facade parses and validates them, so a
/// malformed address is an invalid-argument error rather than a decoding
/// failure.
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteropQuery {
    /// The native-environment account associated with an EVM address.
    NativeAddress(QueryNativeAddressRequest),
    /// The EVM account associated with a native address.
    EvmAddress(QueryEvmAddressRequest),
    /// Execute a read-only, gas-bounded call into the EVM environment.
    StaticCall(QueryStaticCallRequest),
    /// The shadow contract representing an asset in the other environment.
    Pointer(QueryPointerRequest),
    /// The current schema version (and stored code id, where applicable) of
    /// an asset standard's pointer contracts.
    PointerVersion(QueryPointerVersionRequest),
    /// The original asset a shadow contract represents.
    Pointee(QueryPointeeRequest),
}

impl InteropQuery {
    pub fn native_address<A>(evm_address: A) -> Self
    where
        A: Into<String>,
    {
        QueryNativeAddressRequest {
            evm_address: evm_address.into(),
        }
        .into()
    }

    pub fn evm_address<A>(native_address: A) -> Self
    where
        A: Into<String>,
    {
        QueryEvmAddressRequest {
            native_address: native_address.into(),
        }
        .into()
    }

    pub fn static_call<A, B>(target: A, data: B, gas_limit: Option<u64>) -> Self
    where
        A: Into<String>,
        B: Into<Binary>,
    {
        QueryStaticCallRequest {
            target: target.into(),
            data: data.into(),
            gas_limit,
        }
        .into()
    }

    pub fn pointer<K>(standard: u8, pointee: K) -> Self
    where
        K: Into<String>,
    {
        QueryPointerRequest {
            standard,
            pointee: pointee.into(),
        }
        .into()
    }

    pub fn pointer_version(standard: u8) -> Self {
        QueryPointerVersionRequest { standard }.into()
    }

    pub fn pointee<A>(standard: u8, pointer: A) -> Self
    where
        A: Into<String>,
    {
        QueryPointeeRequest {
            standard,
            pointer: pointer.into(),
        }
        .into()
    }
}

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryNativeAddressRequest {
    pub evm_address: String,
}

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryEvmAddressRequest {
    pub native_address: String,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryStaticCallRequest {
    /// The contract to call. Contract creation is not permitted on this
    /// path, so the target is required.
    pub target: String,
    pub data: Binary,
    /// An explicit gas budget for the call. If unset, the bridge derives
    /// one from the query context.
    pub gas_limit: Option<u64>,
}

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryPointerRequest {
    pub standard: u8,
    /// Canonical identifier of the original asset: a denom for the native
    /// standard, a contract address otherwise.
    pub pointee: String,
}

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryPointerVersionRequest {
    pub standard: u8,
}

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryPointeeRequest {
    pub standard: u8,
    pub pointer: String,
}

macro_rules! impl_from_request {
    ($($variant:ident => $request:ty),+ $(,)?) => {
        $(impl From<$request> for InteropQuery {
            fn from(request: $request) -> Self {
                Self::$variant(request)
            }
        })+
    };
}

impl_from_request! {
    NativeAddress  => QueryNativeAddressRequest,
    EvmAddress     => QueryEvmAddressRequest,
    StaticCall     => QueryStaticCallRequest,
    Pointer        => QueryPointerRequest,
    PointerVersion => QueryPointerVersionRequest,
    Pointee        => QueryPointeeRequest,
}

// --------------------------------- responses ---------------------------------

#[skip_serializing_none]
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryNativeAddressResponse {
    pub native_address: Option<NativeAddr>,
    pub associated: bool,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryEvmAddressResponse {
    pub evm_address: Option<Addr>,
    pub associated: bool,
}

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryStaticCallResponse {
    pub data: Binary,
    /// Gas spent by the call, out of the explicit budget it ran under.
    pub gas_used: u64,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryPointerResponse {
    /// Display form of the pointer address: hex for EVM-side pointers,
    /// bech32 for native-side pointers.
    pub pointer: Option<String>,
    pub version: Option<u32>,
    pub exists: bool,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryPointerVersionResponse {
    pub version: u32,
    /// Identifier of the stored code template, for standards whose pointers
    /// are instantiated from one; `None` if no code has been stored yet.
    pub code_id: Option<u64>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryPointeeResponse {
    pub pointee: Option<String>,
    pub version: Option<u32>,
    pub exists: bool,
}

#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteropQueryResponse {
    NativeAddress(QueryNativeAddressResponse),
    EvmAddress(QueryEvmAddressResponse),
    StaticCall(QueryStaticCallResponse),
    Pointer(QueryPointerResponse),
    PointerVersion(QueryPointerVersionResponse),
    Pointee(QueryPointeeResponse),
}

macro_rules! impl_response_casters {
    ($($as_fn:ident => $variant:ident / $response:ty),+ $(,)?) => {
        impl InteropQueryResponse {
            $(pub fn $as_fn(self) -> $response {
                let Self::$variant(resp) = self else {
                    panic!("InteropQueryResponse is not {}", stringify!($variant));
                };
                resp
            })+
        }
    };
}

impl_response_casters! {
    as_native_address  => NativeAddress / QueryNativeAddressResponse,
    as_evm_address     => EvmAddress / QueryEvmAddressResponse,
    as_static_call     => StaticCall / QueryStaticCallResponse,
    as_pointer         => Pointer / QueryPointerResponse,
    as_pointer_version => PointerVersion / QueryPointerVersionResponse,
    as_pointee         => Pointee / QueryPointeeResponse,
}

// ----------------------------------- tests -----------------------------------
