use crate::{
    error::{EncodingError, OrderError},
    order::OrderData,
    signature::CompactSignature,
    taker_traits::TakerTraits,
};
use alloy::{
    primitives::{Bytes, U256},
    sol_types::SolCall,
};
use oneinch_bindings::AggregationRouterV6::{fillOrderArgsCall, fillOrderCall};

/// Router calldata to fill `order` for `amount`.
///
/// Plain orders go through `fillOrder` with the compact signature. Orders
/// carrying an extension must go through `fillOrderArgs`, so taker traits
/// are required for those; the order's extension is spliced into the
/// traits before packing so the args blob always matches the order.
pub fn fill_order_calldata(
    order: &OrderData,
    signature: &[u8],
    amount: U256,
    taker_traits: Option<TakerTraits>,
) -> Result<Bytes, OrderError> {
    let compact = CompactSignature::from_raw(signature).map_err(OrderError::Encoding)?;

    if order.extension.is_empty() {
        let call = fillOrderCall {
            order: order.to_order(),
            r: compact.r,
            vs: compact.vs,
            amount,
            takerTraits: U256::ZERO,
        };
        return Ok(call.abi_encode().into());
    }

    let mut traits = taker_traits.ok_or(OrderError::Encoding(EncodingError::MissingTakerTraits))?;
    traits.extension = order.extension.clone();
    let encoded = traits.encode()?;

    let call = fillOrderArgsCall {
        order: order.to_order(),
        r: compact.r,
        vs: compact.vs,
        amount,
        takerTraits: encoded.trait_flags,
        args: encoded.args,
    };
    Ok(call.abi_encode().into())
}
