use {
    crate::{
        AssetStandard, Evm, GasTracker, InteropError, InteropResult, QueryCtx, current_version,
        evm_by_native, native_by_evm, resolver, static_call, stored_code_id,
    },
    karst_types::{
        Addr, BlockInfo, InteropQuery, InteropQueryResponse, NativeAddr, QueryEvmAddressRequest,
        QueryEvmAddressResponse, QueryNativeAddressRequest, QueryNativeAddressResponse,
        QueryPointeeRequest, QueryPointeeResponse, QueryPointerRequest, QueryPointerResponse,
        QueryPointerVersionRequest, QueryPointerVersionResponse, QueryStaticCallRequest,
        QueryStaticCallResponse, Storage,
    },
    std::str::FromStr,
};

/// Answers interop queries over one state snapshot.
///
/// Holds borrowed handles only: the snapshot and the engine are owned and
/// lifetime-managed by the caller, never duplicated into the facade. The
/// facade validates request structure, delegates each operation to exactly
/// one registry or bridge function, and flattens the result into the
/// response shape; it performs no business logic of its own.
pub struct InteropQuerier<'a, E> {
    ctx: QueryCtx<'a>,
    evm: &'a E,
}

impl<'a, E> InteropQuerier<'a, E>
where
    E: Evm,
{
    pub fn new(
        storage: &'a dyn Storage,
        block: BlockInfo,
        gas_tracker: GasTracker,
        evm: &'a E,
    ) -> Self {
        Self {
            ctx: QueryCtx::new(storage, block, gas_tracker),
            evm,
        }
    }

    pub fn query(&self, req: InteropQuery) -> InteropResult<InteropQueryResponse> {
        #[cfg(feature = "tracing")]
        tracing::trace!(query = ?req, "Processing interop query");

        match req {
            InteropQuery::NativeAddress(req) => self
                .query_native_address(req)
                .map(InteropQueryResponse::NativeAddress),
            InteropQuery::EvmAddress(req) => self
                .query_evm_address(req)
                .map(InteropQueryResponse::EvmAddress),
            InteropQuery::StaticCall(req) => self
                .query_static_call(req)
                .map(InteropQueryResponse::StaticCall),
            InteropQuery::Pointer(req) => {
                self.query_pointer(req).map(InteropQueryResponse::Pointer)
            },
            InteropQuery::PointerVersion(req) => self
                .query_pointer_version(req)
                .map(InteropQueryResponse::PointerVersion),
            InteropQuery::Pointee(req) => {
                self.query_pointee(req).map(InteropQueryResponse::Pointee)
            },
        }
    }

    fn query_native_address(
        &self,
        req: QueryNativeAddressRequest,
    ) -> InteropResult<QueryNativeAddressResponse> {
        if req.evm_address.is_empty() {
            return Err(InteropError::invalid_argument("must specify an EVM address"));
        }

        let evm_addr =
            Addr::from_str(&req.evm_address).map_err(InteropError::invalid_argument)?;
        let native_address = native_by_evm(self.ctx.storage, evm_addr)?;

        Ok(QueryNativeAddressResponse {
            associated: native_address.is_some(),
            native_address,
        })
    }

    fn query_evm_address(
        &self,
        req: QueryEvmAddressRequest,
    ) -> InteropResult<QueryEvmAddressResponse> {
        if req.native_address.is_empty() {
            return Err(InteropError::invalid_argument(
                "must specify a native address",
            ));
        }

        let native_addr =
            NativeAddr::from_str(&req.native_address).map_err(InteropError::invalid_argument)?;
        let evm_address = evm_by_native(self.ctx.storage, native_addr)?;

        Ok(QueryEvmAddressResponse {
            associated: evm_address.is_some(),
            evm_address,
        })
    }

    fn query_static_call(
        &self,
        req: QueryStaticCallRequest,
    ) -> InteropResult<QueryStaticCallResponse> {
        let outcome = static_call(&self.ctx, self.evm, &req.target, &req.data, req.gas_limit)?;

        Ok(QueryStaticCallResponse {
            data: outcome.output,
            gas_used: outcome.gas_used,
        })
    }

    fn query_pointer(&self, req: QueryPointerRequest) -> InteropResult<QueryPointerResponse> {
        if req.pointee.is_empty() {
            return Err(InteropError::invalid_argument("must specify a pointee"));
        }

        let standard = decode_standard(req.standard)?;

        let resp = match resolver(standard).resolve_pointer(self.ctx.storage, &req.pointee)? {
            Some((pointer, version)) => QueryPointerResponse {
                pointer: Some(pointer),
                version: Some(version),
                exists: true,
            },
            None => QueryPointerResponse {
                pointer: None,
                version: None,
                exists: false,
            },
        };

        Ok(resp)
    }

    fn query_pointer_version(
        &self,
        req: QueryPointerVersionRequest,
    ) -> InteropResult<QueryPointerVersionResponse> {
        let standard = decode_standard(req.standard)?;

        Ok(QueryPointerVersionResponse {
            version: current_version(self.ctx.storage, self.ctx.block, standard)?,
            code_id: stored_code_id(self.ctx.storage, standard)?,
        })
    }

    fn query_pointee(&self, req: QueryPointeeRequest) -> InteropResult<QueryPointeeResponse> {
        if req.pointer.is_empty() {
            return Err(InteropError::invalid_argument("must specify a pointer"));
        }

        let standard = decode_standard(req.standard)?;

        let resp = match resolver(standard).resolve_pointee(self.ctx.storage, &req.pointer)? {
            Some((pointee, version)) => QueryPointeeResponse {
                pointee: Some(pointee),
                version: Some(version),
                exists: true,
            },
            None => QueryPointeeResponse {
                pointee: None,
                version: None,
                exists: false,
            },
        };

        Ok(resp)
    }
}

fn decode_standard(tag: u8) -> InteropResult<AssetStandard> {
    AssetStandard::from_tag(tag).ok_or(InteropError::unsupported_standard(tag))
}

// ----------------------------------- tests -----------------------------------
