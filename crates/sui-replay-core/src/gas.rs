//! Gas report construction.
//!
//! Costs come from `effects.gasUsed` as MIST literals and are converted to
//! SUI for display. Metering figures come from `gasStatus.V2` and are copied
//! as-is: they are counts and per-unit prices, not MIST amounts.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use serde::Serialize;
use sui_replay_types::wire;

use crate::error::{ReplayError, Result};
use crate::normalize::optional_integer;
use crate::units::{parse_amount, scale_amount, SUI_DECIMALS};

/// Gas costs and metering for one replayed transaction.
///
/// Every field is optional: a value the replayer did not report is unknown,
/// and must not be displayed as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GasReport {
    /// computation + storage - rebate; negative when the rebate exceeds the costs
    pub total_cost: Option<BigDecimal>,
    pub computation_cost: Option<BigDecimal>,
    pub storage_cost: Option<BigDecimal>,
    pub storage_rebate: Option<BigDecimal>,
    pub non_refundable_storage_fee: Option<BigDecimal>,

    /// Gas price paid, in MIST per gas unit
    pub gas_price: Option<u64>,
    /// Reference gas price of the epoch, in MIST per gas unit
    pub reference_gas_price: Option<u64>,
    pub stack_height_high_water_mark: Option<u64>,
    pub stack_size_high_water_mark: Option<u64>,
    pub instructions_executed: Option<u64>,

    pub gas_budget: Option<u64>,
    pub storage_gas_price: Option<u64>,
    pub gas_model_version: Option<u64>,
}

/// Builder for [`GasReport`].
#[derive(Debug, Clone)]
pub struct GasReportBuilder {
    decimal_places: u32,
}

impl Default for GasReportBuilder {
    fn default() -> Self {
        Self {
            decimal_places: SUI_DECIMALS,
        }
    }
}

impl GasReportBuilder {
    /// Create a new builder converting MIST to SUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of decimal places of the display unit.
    pub fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    /// Build the report from the effects' gas usage and the replayer's gas status.
    pub fn build(&self, gas_used: &wire::GasUsed, gas_status: &wire::GasStatus) -> Result<GasReport> {
        let v2 = gas_status
            .v2
            .as_ref()
            .ok_or(ReplayError::UnsupportedGasStatus)?;

        let computation = parse_optional(&gas_used.computation_cost)?;
        let storage = parse_optional(&gas_used.storage_cost)?;
        let rebate = parse_optional(&gas_used.storage_rebate)?;
        let non_refundable = parse_optional(&gas_used.non_refundable_storage_fee)?;

        // Sum in the integer domain so rebate ≈ cost cannot leave rounding residue
        let total = match (&computation, &storage, &rebate) {
            (Some(c), Some(s), Some(r)) => Some(c + s - r),
            _ => None,
        };

        let meter = v2.gas_status.clone().unwrap_or_default();
        let places = self.decimal_places;
        let scale = |v: Option<BigInt>| v.map(|v| scale_amount(v, places));

        Ok(GasReport {
            total_cost: scale(total),
            computation_cost: scale(computation),
            storage_cost: scale(storage),
            storage_rebate: scale(rebate),
            non_refundable_storage_fee: scale(non_refundable),
            gas_price: optional_integer("gasPrice", v2.gas_price.as_ref())?,
            reference_gas_price: optional_integer(
                "referenceGasPrice",
                v2.reference_gas_price.as_ref(),
            )?,
            stack_height_high_water_mark: optional_integer(
                "stackHeightHighWaterMark",
                meter.stack_height_high_water_mark.as_ref(),
            )?,
            stack_size_high_water_mark: optional_integer(
                "stackSizeHighWaterMark",
                meter.stack_size_high_water_mark.as_ref(),
            )?,
            instructions_executed: optional_integer(
                "instructionsExecuted",
                meter.instructions_executed.as_ref(),
            )?,
            gas_budget: optional_integer("gasBudget", v2.gas_budget.as_ref())?,
            storage_gas_price: optional_integer("storageGasPrice", v2.storage_gas_price.as_ref())?,
            gas_model_version: optional_integer(
                "gasModelVersion",
                meter.gas_model_version.as_ref(),
            )?,
        })
    }
}

/// Build a MIST → SUI gas report.
pub fn build(gas_used: &wire::GasUsed, gas_status: &wire::GasStatus) -> Result<GasReport> {
    GasReportBuilder::new().build(gas_used, gas_status)
}

fn parse_optional(amount: &Option<sui_replay_types::encoding::AmountText>) -> Result<Option<BigInt>> {
    amount.as_ref().map(|a| parse_amount(a.as_str())).transpose()
}
