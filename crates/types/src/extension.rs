use crate::error::EncodingError;
use alloy::primitives::{keccak256, Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// Number of interaction slots in an extension.
const SLOTS: usize = 8;
/// The offset header: one 4-byte cumulative length per slot.
const HEADER_LEN: usize = 32;

/// The variable-length companion blob to an order.
///
/// Eight interaction slots plus trailing custom data. On the wire the blob
/// is a 32-byte header of cumulative slot lengths followed by the slot
/// bytes back to back; an extension with nothing in it encodes to zero
/// bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Replaces the tail of the maker asset address for proxy tokens.
    pub maker_asset_suffix: Bytes,
    /// Replaces the tail of the taker asset address for proxy tokens.
    pub taker_asset_suffix: Bytes,
    /// Calldata for dynamic making-amount calculation.
    pub making_amount_data: Bytes,
    /// Calldata for dynamic taking-amount calculation.
    pub taking_amount_data: Bytes,
    /// Predicate calldata gating the fill.
    pub predicate: Bytes,
    /// Maker permit: the maker asset address followed by permit calldata.
    pub maker_permit: Bytes,
    /// Maker pre-interaction calldata.
    pub pre_interaction: Bytes,
    /// Maker post-interaction calldata.
    pub post_interaction: Bytes,
    /// Opaque trailer, not covered by the offset header.
    pub custom_data: Bytes,
}

impl Extension {
    /// Start building an extension.
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    /// Whether every slot and the custom data are empty.
    pub fn is_empty(&self) -> bool {
        self.slots().iter().all(|slot| slot.is_empty()) && self.custom_data.is_empty()
    }

    fn slots(&self) -> [&Bytes; SLOTS] {
        [
            &self.maker_asset_suffix,
            &self.taker_asset_suffix,
            &self.making_amount_data,
            &self.taking_amount_data,
            &self.predicate,
            &self.maker_permit,
            &self.pre_interaction,
            &self.post_interaction,
        ]
    }

    /// Encode to wire bytes. An empty extension encodes to zero bytes.
    pub fn encode(&self) -> Bytes {
        if self.is_empty() {
            return Bytes::new();
        }

        let slots = self.slots();
        let total: usize = slots.iter().map(|slot| slot.len()).sum();

        let mut out = Vec::with_capacity(HEADER_LEN + total + self.custom_data.len());
        out.resize(HEADER_LEN, 0);

        // Cumulative slot lengths, slot 0 in the lowest 4 bytes of the
        // header word and slot 7 in the highest.
        let mut cumulative = 0u32;
        for (i, slot) in slots.iter().enumerate() {
            cumulative += slot.len() as u32;
            let at = (SLOTS - 1 - i) * 4;
            out[at..at + 4].copy_from_slice(&cumulative.to_be_bytes());
        }
        for slot in slots {
            out.extend_from_slice(slot);
        }
        out.extend_from_slice(&self.custom_data);
        out.into()
    }

    /// Decode wire bytes. Zero bytes decode to the empty extension.
    pub fn decode(data: &[u8]) -> Result<Self, EncodingError> {
        if data.is_empty() {
            return Ok(Self::default());
        }
        if data.len() < HEADER_LEN {
            return Err(EncodingError::MalformedExtension("shorter than the offset header"));
        }

        let (header, body) = data.split_at(HEADER_LEN);
        let mut offsets = [0usize; SLOTS];
        for (i, offset) in offsets.iter_mut().enumerate() {
            let at = (SLOTS - 1 - i) * 4;
            let word: [u8; 4] = header[at..at + 4].try_into().map_err(
                |_| EncodingError::MalformedExtension("truncated offset header"),
            )?;
            *offset = u32::from_be_bytes(word) as usize;
        }

        let mut previous = 0usize;
        for offset in offsets {
            if offset < previous || offset > body.len() {
                return Err(EncodingError::MalformedExtension("inconsistent offsets"));
            }
            previous = offset;
        }

        let slot = |i: usize| -> Bytes {
            let start = if i == 0 { 0 } else { offsets[i - 1] };
            Bytes::copy_from_slice(&body[start..offsets[i]])
        };

        Ok(Self {
            maker_asset_suffix: slot(0),
            taker_asset_suffix: slot(1),
            making_amount_data: slot(2),
            taking_amount_data: slot(3),
            predicate: slot(4),
            maker_permit: slot(5),
            pre_interaction: slot(6),
            post_interaction: slot(7),
            custom_data: Bytes::copy_from_slice(&body[offsets[SLOTS - 1]..]),
        })
    }

    /// Keccak hash of the encoded bytes, used to bind the order salt to
    /// the extension.
    pub fn hash(&self) -> B256 {
        keccak256(self.encode())
    }
}

/// Builder for [`Extension`] that keeps the maker permit well formed.
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    extension: Extension,
    permit_asset: Option<Address>,
    permit_calldata: Bytes,
}

impl ExtensionBuilder {
    /// Set the maker asset suffix.
    pub fn maker_asset_suffix(mut self, data: Bytes) -> Self {
        self.extension.maker_asset_suffix = data;
        self
    }

    /// Set the taker asset suffix.
    pub fn taker_asset_suffix(mut self, data: Bytes) -> Self {
        self.extension.taker_asset_suffix = data;
        self
    }

    /// Set the making-amount calldata: the getter contract address
    /// followed by its extra data.
    pub fn making_amount_data(mut self, target: Address, data: &[u8]) -> Self {
        self.extension.making_amount_data = prefixed(target, data);
        self
    }

    /// Set the taking-amount calldata.
    pub fn taking_amount_data(mut self, target: Address, data: &[u8]) -> Self {
        self.extension.taking_amount_data = prefixed(target, data);
        self
    }

    /// Set the predicate calldata.
    pub fn predicate(mut self, data: Bytes) -> Self {
        self.extension.predicate = data;
        self
    }

    /// Set the maker permit. The on-chain decoder strips the first 20
    /// bytes of the slot as the asset address, so both parts are required.
    pub fn maker_permit(mut self, asset: Address, permit_calldata: Bytes) -> Self {
        self.permit_asset = Some(asset);
        self.permit_calldata = permit_calldata;
        self
    }

    /// Set the pre-interaction: target address followed by its data.
    pub fn pre_interaction(mut self, target: Address, data: &[u8]) -> Self {
        self.extension.pre_interaction = prefixed(target, data);
        self
    }

    /// Set the post-interaction.
    pub fn post_interaction(mut self, target: Address, data: &[u8]) -> Self {
        self.extension.post_interaction = prefixed(target, data);
        self
    }

    /// Set the custom data trailer.
    pub fn custom_data(mut self, data: Bytes) -> Self {
        self.extension.custom_data = data;
        self
    }

    /// Finish, validating the maker permit slot.
    pub fn build(self) -> Result<Extension, EncodingError> {
        let mut extension = self.extension;
        match (self.permit_asset, self.permit_calldata.is_empty()) {
            (None, true) => {}
            (None, false) => return Err(EncodingError::PermitRequiresMakerAsset),
            (Some(_), true) => return Err(EncodingError::MakerAssetRequiresPermit),
            (Some(asset), false) => {
                extension.maker_permit = prefixed(asset, &self.permit_calldata);
            }
        }
        Ok(extension)
    }
}

fn prefixed(target: Address, data: &[u8]) -> Bytes {
    let mut out = Vec::with_capacity(Address::len_bytes() + data.len());
    out.extend_from_slice(target.as_slice());
    out.extend_from_slice(data);
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn encodes_single_byte_slots() {
        let extension = Extension {
            maker_asset_suffix: vec![0x01].into(),
            taker_asset_suffix: vec![0x02].into(),
            making_amount_data: vec![0x03].into(),
            taking_amount_data: vec![0x04].into(),
            predicate: vec![0x05].into(),
            maker_permit: vec![0x06].into(),
            pre_interaction: vec![0x07].into(),
            post_interaction: vec![0x08].into(),
            custom_data: Bytes::new(),
        };
        assert_eq!(
            hex::encode_prefixed(extension.encode()),
            "0x00000008000000070000000600000005000000040000000300000002000000010102030405060708"
        );
    }

    #[test]
    fn empty_extension_encodes_to_nothing() {
        assert!(Extension::default().encode().is_empty());
        assert_eq!(Extension::decode(&[]).unwrap(), Extension::default());
    }

    #[test]
    fn decode_round_trips() {
        let extension = Extension {
            predicate: vec![0xaa; 40].into(),
            post_interaction: vec![0xbb; 60].into(),
            custom_data: vec![0xcc; 5].into(),
            ..Default::default()
        };
        let decoded = Extension::decode(&extension.encode()).unwrap();
        assert_eq!(decoded, extension);
    }

    #[test]
    fn short_input_is_malformed() {
        assert_eq!(
            Extension::decode(&[0u8; 31]),
            Err(EncodingError::MalformedExtension("shorter than the offset header"))
        );
    }

    #[test]
    fn decreasing_offsets_are_malformed() {
        let mut data = vec![0u8; 34];
        // slot 0 claims 2 bytes, slot 1 claims a cumulative total of 1
        data[31] = 2;
        data[27] = 1;
        assert!(Extension::decode(&data).is_err());
    }

    #[test]
    fn permit_without_asset_is_rejected() {
        let builder = ExtensionBuilder {
            permit_calldata: vec![0x01].into(),
            ..Default::default()
        };
        assert_eq!(builder.build(), Err(EncodingError::PermitRequiresMakerAsset));
    }

    #[test]
    fn asset_without_permit_is_rejected() {
        let err = Extension::builder()
            .maker_permit(address!("0x111111111117dc0aa78b770fa6a738034120c302"), Bytes::new())
            .build()
            .unwrap_err();
        assert_eq!(err, EncodingError::MakerAssetRequiresPermit);
    }

    #[test]
    fn permit_slot_carries_the_asset_prefix() {
        let asset = address!("0x111111111117dc0aa78b770fa6a738034120c302");
        let extension = Extension::builder()
            .maker_permit(asset, vec![0xde, 0xad].into())
            .build()
            .unwrap();
        assert_eq!(&extension.maker_permit[..20], asset.as_slice());
        assert_eq!(&extension.maker_permit[20..], &[0xde, 0xad]);
    }

    #[test]
    fn custom_data_trails_without_an_offset() {
        let extension = Extension {
            maker_asset_suffix: vec![0x01].into(),
            custom_data: vec![0xff, 0xfe].into(),
            ..Default::default()
        };
        let encoded = extension.encode();
        assert_eq!(encoded.len(), 32 + 1 + 2);
        assert_eq!(Extension::decode(&encoded).unwrap(), extension);
    }
}
