use super::BencodeValue;
use crate::error::Result;
use std::io::Write;

/// Encode a BencodeValue into its canonical byte representation.
///
/// The same value always produces identical bytes: dictionary entries are
/// emitted in ascending byte-wise key order and integer literals carry no
/// leading zeros or plus sign.
pub fn encode(value: &BencodeValue) -> Vec<u8> {
    let mut result = Vec::new();
    encode_into(value, &mut result);
    result
}

/// Encode a BencodeValue and write the canonical bytes to a writer.
pub fn encode_to<W: Write>(writer: &mut W, value: &BencodeValue) -> Result<()> {
    let encoded = encode(value);
    writer.write_all(&encoded)?;
    Ok(())
}

fn encode_into(value: &BencodeValue, output: &mut Vec<u8>) {
    match value {
        BencodeValue::Integer(i) => {
            output.push(b'i');
            output.extend_from_slice(i.to_string().as_bytes());
            output.push(b'e');
        }
        BencodeValue::String(s) => {
            output.extend_from_slice(s.len().to_string().as_bytes());
            output.push(b':');
            output.extend_from_slice(s);
        }
        BencodeValue::List(list) => {
            output.push(b'l');
            for item in list {
                encode_into(item, output);
            }
            output.push(b'e');
        }
        BencodeValue::Dict(dict) => {
            // BTreeMap iteration yields keys in ascending byte order
            output.push(b'd');
            for (key, value) in dict {
                output.extend_from_slice(key.len().to_string().as_bytes());
                output.push(b':');
                output.extend_from_slice(key);
                encode_into(value, output);
            }
            output.push(b'e');
        }
    }
}
