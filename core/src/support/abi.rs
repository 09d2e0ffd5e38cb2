//! Minimal Solidity ABI codec for the handful of types the contracts here use.

use crate::Error;
use ethnum::U256;

const WORD: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum AbiValue {
    Uint(U256),
    Address(String),
    AddressArray(Vec<String>),
}

impl AbiValue {
    fn is_dynamic(&self) -> bool {
        matches!(self, AbiValue::AddressArray(_))
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::Uint(value)
    }
}

/// Encodes `selector` followed by the arguments as 0x-prefixed calldata.
pub fn encode_call(selector: [u8; 4], args: &[AbiValue]) -> Result<String, Error> {
    let mut head = Vec::with_capacity(args.len() * WORD);
    let mut tail = Vec::new();

    for arg in args {
        if arg.is_dynamic() {
            let offset = args.len() * WORD + tail.len();
            head.extend_from_slice(&uint_word(U256::from(offset as u64)));
            encode_into(arg, &mut tail)?;
        } else {
            encode_into(arg, &mut head)?;
        }
    }

    let mut calldata = selector.to_vec();
    calldata.extend(head);
    calldata.extend(tail);
    Ok(to_hex(&calldata))
}

fn encode_into(value: &AbiValue, out: &mut Vec<u8>) -> Result<(), Error> {
    match value {
        AbiValue::Uint(value) => out.extend_from_slice(&uint_word(*value)),
        AbiValue::Address(address) => out.extend_from_slice(&address_word(address)?),
        AbiValue::AddressArray(addresses) => {
            out.extend_from_slice(&uint_word(U256::from(addresses.len() as u64)));
            for address in addresses {
                out.extend_from_slice(&address_word(address)?);
            }
        }
    }
    Ok(())
}

fn uint_word(value: U256) -> [u8; WORD] {
    value.to_be_bytes()
}

fn address_word(address: &str) -> Result<[u8; WORD], Error> {
    let bytes = from_hex(address)?;
    if bytes.len() != 20 {
        return Err(Error::abi(format!("invalid address: {address}")));
    }
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(&bytes);
    Ok(word)
}

fn word_at(data: &[u8], index: usize) -> Result<[u8; WORD], Error> {
    let start = index * WORD;
    data.get(start..start + WORD)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| Error::abi(format!("missing word {index}")))
}

/// Reads the `index`th static word of return data as a `uint256`.
pub fn decode_uint(data: &str, index: usize) -> Result<U256, Error> {
    let bytes = from_hex(data)?;
    Ok(U256::from_be_bytes(word_at(&bytes, index)?))
}

/// Reads the `index`th static word of return data as an `address`.
pub fn decode_address(data: &str, index: usize) -> Result<String, Error> {
    let bytes = from_hex(data)?;
    let word = word_at(&bytes, index)?;
    Ok(to_hex(&word[12..]))
}

/// Decodes return data holding a single dynamic `string`.
///
/// Older tokens return `bytes32` for `symbol()` and `name()`; a payload of
/// exactly one word is read that way, with trailing NULs trimmed.
pub fn decode_string(data: &str) -> Result<String, Error> {
    let bytes = from_hex(data)?;
    if bytes.len() == WORD {
        return decode_bytes32_string(&bytes);
    }

    let offset = word_as_usize(&bytes, 0)?;
    if offset % WORD != 0 {
        return Err(Error::abi("misaligned string offset"));
    }

    let length = word_as_usize(&bytes, offset / WORD)?;
    let raw = offset
        .checked_add(WORD)
        .and_then(|start| Some((start, start.checked_add(length)?)))
        .and_then(|(start, end)| bytes.get(start..end))
        .ok_or_else(|| Error::abi("string out of bounds"))?;

    String::from_utf8(raw.to_vec()).map_err(Error::abi)
}

fn decode_bytes32_string(word: &[u8]) -> Result<String, Error> {
    let end = word.iter().rposition(|byte| *byte != 0).map_or(0, |last| last + 1);
    String::from_utf8(word[..end].to_vec()).map_err(Error::abi)
}

fn word_as_usize(data: &[u8], index: usize) -> Result<usize, Error> {
    let value = U256::from_be_bytes(word_at(data, index)?);
    u64::try_from(value)
        .ok()
        .and_then(|value| usize::try_from(value).ok())
        .ok_or_else(|| Error::abi(format!("word {index} does not fit in usize")))
}

pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn from_hex(value: &str) -> Result<Vec<u8>, Error> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|error| Error::abi(format!("invalid hex {value}: {error}")))
}

/// Formats a quantity the way JSON-RPC expects it.
pub fn to_quantity(value: U256) -> String {
    format!("{value:#x}")
}

pub fn from_quantity(value: &str) -> Result<U256, Error> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(Error::abi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const SPENDER: &str = "0xd9e1cE17f2641f24aE83637ab66a2cca9C378B9F";

    #[test]
    fn test_encode_static_arguments() {
        let calldata = encode_call(
            hex!("095ea7b3"),
            &[
                AbiValue::Address(SPENDER.to_string()),
                AbiValue::Uint(U256::new(1000)),
            ],
        )
        .unwrap();

        assert_eq!(
            calldata,
            concat!(
                "0x095ea7b3",
                "000000000000000000000000d9e1ce17f2641f24ae83637ab66a2cca9c378b9f",
                "00000000000000000000000000000000000000000000000000000000000003e8",
            )
        );
    }

    #[test]
    fn test_encode_address_array_goes_to_tail() {
        let calldata = encode_call(
            hex!("7ff36ab5"),
            &[
                AbiValue::Uint(U256::new(1)),
                AbiValue::AddressArray(vec![SPENDER.to_string(), SPENDER.to_string()]),
                AbiValue::Address(SPENDER.to_string()),
                AbiValue::Uint(U256::new(2)),
            ],
        )
        .unwrap();
        let bytes = from_hex(&calldata).unwrap();
        let args = &bytes[4..];

        // head is 4 words; the array starts right after it
        assert_eq!(U256::from_be_bytes(word_at(args, 1).unwrap()), U256::new(128));
        assert_eq!(U256::from_be_bytes(word_at(args, 4).unwrap()), U256::new(2));
        assert_eq!(args.len(), 7 * WORD);
    }

    #[test]
    fn test_decode_words() {
        let data = concat!(
            "0x",
            "000000000000000000000000000000000000000000000000000000000000002a",
            "000000000000000000000000d9e1ce17f2641f24ae83637ab66a2cca9c378b9f",
        );
        assert_eq!(decode_uint(data, 0), Ok(U256::new(42)));
        assert_eq!(
            decode_address(data, 1),
            Ok(SPENDER.to_lowercase())
        );
        assert!(decode_uint(data, 2).is_err());
    }

    #[test]
    fn test_decode_string() {
        let data = concat!(
            "0x",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "5355534849000000000000000000000000000000000000000000000000000000",
        );
        assert_eq!(decode_string(data), Ok("SUSHI".to_string()));
    }

    #[test]
    fn test_decode_bytes32_symbol() {
        let data = "0x4d4b520000000000000000000000000000000000000000000000000000000000";
        assert_eq!(decode_string(data), Ok("MKR".to_string()));
    }

    #[test]
    fn test_decode_string_rejects_oversized_length() {
        let data = concat!(
            "0x",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            "5355534849000000000000000000000000000000000000000000000000000000",
        );
        assert!(decode_string(data).is_err());

        let data = concat!(
            "0x",
            "0000000000000000000000000000000000000000000000000000000000000020",
            "000000000000000000000000000000000000000000000000ffffffffffffffff",
            "5355534849000000000000000000000000000000000000000000000000000000",
        );
        assert!(decode_string(data).is_err());
    }

    #[test]
    fn test_invalid_hex_is_an_error() {
        assert!(from_hex("0xé0").is_err());
        assert!(from_hex("0xabc").is_err());
        assert!(from_hex("0xzz").is_err());
        assert_eq!(from_hex("0xAbCd"), Ok(vec![0xab, 0xcd]));
        assert_eq!(to_hex(&[0xab, 0x01]), "0xab01");
    }

    #[test]
    fn test_quantities() {
        assert_eq!(to_quantity(U256::new(255)), "0xff");
        assert_eq!(to_quantity(U256::ZERO), "0x0");
        assert_eq!(from_quantity("0x1bc16d674ec80000"), Ok(U256::new(2_000_000_000_000_000_000)));
        assert_eq!(from_quantity("0x"), Ok(U256::ZERO));
    }
}
