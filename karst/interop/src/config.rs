use {
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Chain-level configuration of the interop layer.
///
/// Written by the genesis and upgrade flows; read-only here.
#[derive(Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct InteropConfig {
    /// Multiplier applied when deriving a static call's gas limit from the
    /// query context, in parts per myriad (10,000 = 1.0x). Stored as an
    /// integer ratio because consensus state must not hold floats.
    pub static_call_gas_multiplier: u64,
    /// The budget baseline the multiplier is applied to when the query
    /// context carries no usable gas budget of its own. A static call never
    /// runs with an unlimited budget.
    pub query_gas_baseline: u64,
}

impl InteropConfig {
    pub const MULTIPLIER_DENOMINATOR: u64 = 10_000;

    /// Apply the configured multiplier to a budget, saturating at `u64::MAX`.
    pub fn scale_gas(&self, budget: u64) -> u64 {
        // 128-bit intermediate so a large budget times a >1x multiplier
        // cannot overflow.
        let scaled = (budget as u128 * self.static_call_gas_multiplier as u128)
            / Self::MULTIPLIER_DENOMINATOR as u128;
        scaled.min(u64::MAX as u128) as u64
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case(10_000, 500_000, 500_000; "identity")]
    #[test_case(5_000, 500_000, 250_000; "half")]
    #[test_case(30_000, 500_000, 1_500_000; "three times")]
    #[test_case(10_000, 0, 0; "zero budget")]
    fn scaling_gas(multiplier: u64, budget: u64, expect: u64) {
        let cfg = InteropConfig {
            static_call_gas_multiplier: multiplier,
            query_gas_baseline: 0,
        };
        assert_eq!(cfg.scale_gas(budget), expect);
    }

    #[test]
    fn scaling_saturates_instead_of_overflowing() {
        let cfg = InteropConfig {
            static_call_gas_multiplier: 20_000,
            query_gas_baseline: 0,
        };
        assert_eq!(cfg.scale_gas(u64::MAX), u64::MAX);
    }
}
