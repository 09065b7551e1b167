//! Packing of integrator/resolver fees and the resolver whitelist into the
//! order extension consumed by the fee-taker contract.

use crate::{
    error::{OrderError, ValidationError, ValidationErrors},
    extension::Extension,
};
use alloy::primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// Bytes of an address that make it into the whitelist encoding: the
/// lower 80 bits.
const WHITELIST_ADDRESS_BYTES: usize = 10;
/// The packed fee parameter always occupies 48 bits.
const FEE_PARAMETER_BYTES: usize = 6;

/// A fee paid to the integrator that routed the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntegratorFee {
    /// The integrator receiving the fee.
    pub integrator: Address,
    /// The protocol address sharing the fee.
    pub protocol: Address,
    /// Fee in basis points. At most 6553, since it is stored as bps * 10
    /// in 16 bits.
    pub fee: u64,
    /// Integrator's share of the fee in hundredths of a percent. Stored
    /// divided by 100, so at most 25500.
    pub share: u64,
}

/// A fee paid to the resolver that fills the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolverFee {
    /// Where the resolver fee is sent.
    pub receiver: Address,
    /// Fee in basis points, at most 6553.
    pub fee: u64,
    /// Percentage discount for whitelisted resolvers. Stored inverted as
    /// `100 - discount`, so at most 100.
    pub whitelist_discount: u64,
}

/// Pack fee parameters into the protocol's 48-bit layout:
/// `integratorFee*10` in bits 32-47, `integratorShare/100` in bits 24-31,
/// `resolverFee*10` in bits 8-23, `100-whitelistDiscount` in bits 0-7.
pub fn pack_fee_parameter(
    integrator: Option<&IntegratorFee>,
    resolver: Option<&ResolverFee>,
) -> Result<u64, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    // The times-ten scaling can overflow u64 before the 16-bit range
    // check sees the value.
    let mut scaled_fee = |name, fee: u64| match fee.checked_mul(10) {
        Some(scaled) => scaled,
        None => {
            errors.push(ValidationError::FieldOutOfRange { name, value: fee, max: 0xffff / 10 });
            0
        }
    };
    let integrator_fee = integrator.map_or(0, |fee| scaled_fee("integratorFee", fee.fee));
    let resolver_fee = resolver.map_or(0, |fee| scaled_fee("resolverFee", fee.fee));
    let integrator_share = integrator.map_or(0, |fee| fee.share / 100);
    let resolver_discount = match resolver {
        Some(fee) if fee.whitelist_discount > 100 => {
            errors.push(ValidationError::FieldOutOfRange {
                name: "whitelistDiscount",
                value: fee.whitelist_discount,
                max: 100,
            });
            0
        }
        Some(fee) => 100 - fee.whitelist_discount,
        None => 0,
    };

    for (name, value, max) in [
        ("integratorFee", integrator_fee, 0xffff),
        ("integratorShare", integrator_share, 0xff),
        ("resolverFee", resolver_fee, 0xffff),
    ] {
        if value > max {
            errors.push(ValidationError::FieldOutOfRange { name, value, max });
        }
    }
    errors.into_result()?;

    Ok((integrator_fee << 32) | (integrator_share << 24) | (resolver_fee << 8) | resolver_discount)
}

/// Encode a resolver whitelist: a one-byte count followed by the lower
/// 80 bits of each address in order. An empty whitelist encodes to zero
/// bytes.
pub fn encode_whitelist(whitelist: &[Address]) -> Result<Vec<u8>, ValidationError> {
    if whitelist.is_empty() {
        return Ok(Vec::new());
    }
    if whitelist.len() > 255 {
        return Err(ValidationError::WhitelistTooLarge(whitelist.len()));
    }

    let mut out = Vec::with_capacity(1 + whitelist.len() * WHITELIST_ADDRESS_BYTES);
    out.push(whitelist.len() as u8);
    for address in whitelist {
        out.extend_from_slice(&address.as_slice()[Address::len_bytes() - WHITELIST_ADDRESS_BYTES..]);
    }
    Ok(out)
}

/// The 6-byte packed fee parameter followed by the encoded whitelist.
fn fee_and_whitelist(
    whitelist: &[Address],
    integrator: Option<&IntegratorFee>,
    resolver: Option<&ResolverFee>,
) -> Result<Vec<u8>, ValidationErrors> {
    let fee = pack_fee_parameter(integrator, resolver)?;
    let encoded = encode_whitelist(whitelist).map_err(ValidationErrors::from)?;

    let mut out = Vec::with_capacity(FEE_PARAMETER_BYTES + encoded.len());
    out.extend_from_slice(&fee.to_be_bytes()[8 - FEE_PARAMETER_BYTES..]);
    out.extend_from_slice(&encoded);
    Ok(out)
}

/// Parameters for [`build_fee_extension`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeExtensionParams {
    /// The fee-taker contract that interprets the packed data.
    pub extension_target: Address,
    /// Fee for the integrator, if any.
    pub integrator_fee: Option<IntegratorFee>,
    /// Fee for the resolver, if any.
    pub resolver_fee: Option<ResolverFee>,
    /// Resolvers eligible for the whitelist discount. Sorted before
    /// packing, so input order does not matter.
    pub whitelist: Vec<Address>,
    /// Maker permit as asset address plus permit calldata.
    pub maker_permit: Option<(Address, Bytes)>,
    /// Receiver of the maker asset when it is not the maker.
    pub custom_receiver: Option<Address>,
    /// Extra interaction calldata run by the extension target after the
    /// fee transfer.
    pub extra_interaction: Bytes,
    /// Opaque trailer appended to the extension.
    pub custom_data: Bytes,
}

/// The post-interaction payload: a receiver flag byte, the fee receivers,
/// the packed fee-and-whitelist block, and the optional extra interaction.
fn fee_post_interaction_data(params: &FeeExtensionParams, whitelist: &[Address]) -> Result<Vec<u8>, ValidationErrors> {
    let custom_receiver = params.custom_receiver.filter(|addr| !addr.is_zero());

    let mut out = Vec::new();
    out.push(if custom_receiver.is_some() { 0x01 } else { 0x00 });
    out.extend_from_slice(
        params.integrator_fee.map_or(Address::ZERO, |fee| fee.integrator).as_slice(),
    );
    out.extend_from_slice(
        params.resolver_fee.map_or(Address::ZERO, |fee| fee.receiver).as_slice(),
    );
    if let Some(receiver) = custom_receiver {
        out.extend_from_slice(receiver.as_slice());
    }
    out.extend_from_slice(&fee_and_whitelist(
        whitelist,
        params.integrator_fee.as_ref(),
        params.resolver_fee.as_ref(),
    )?);
    if !params.extension_target.is_zero() && !params.extra_interaction.is_empty() {
        out.extend_from_slice(params.extension_target.as_slice());
        out.extend_from_slice(&params.extra_interaction);
    }
    Ok(out)
}

/// Build the full fee-taker extension.
///
/// The whitelist is sorted, the fee-and-whitelist block lands in both
/// amount-data slots prefixed by the extension target, and the
/// post-interaction carries the target plus the fee payload.
pub fn build_fee_extension(params: &FeeExtensionParams) -> Result<Extension, OrderError> {
    let mut whitelist = params.whitelist.clone();
    whitelist.sort_unstable();

    let amount_data = fee_and_whitelist(
        &whitelist,
        params.integrator_fee.as_ref(),
        params.resolver_fee.as_ref(),
    )?;
    let post_interaction = fee_post_interaction_data(params, &whitelist)?;

    let mut builder = Extension::builder()
        .making_amount_data(params.extension_target, &amount_data)
        .taking_amount_data(params.extension_target, &amount_data)
        .post_interaction(params.extension_target, &post_interaction)
        .custom_data(params.custom_data.clone());
    if let Some((asset, calldata)) = &params.maker_permit {
        builder = builder.maker_permit(*asset, calldata.clone());
    }
    Ok(builder.build()?)
}
