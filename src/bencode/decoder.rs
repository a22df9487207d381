use super::BencodeValue;
use crate::error::{BentoolsError, Result};
use std::collections::BTreeMap;

/// Maximum nesting depth accepted by the decoder.
///
/// Torrent metadata nests three or four levels deep; the limit exists so
/// adversarial input fails with an error instead of overflowing the stack.
const MAX_DEPTH: usize = 128;

/// Decode bencoded data into a BencodeValue.
///
/// Exactly one top-level value is consumed; trailing bytes are ignored.
/// The parse is lenient about non-canonical literals (`007`, `-0`), but
/// output produced by [`super::encode`] is always canonical.
pub fn decode(data: &[u8]) -> Result<BencodeValue> {
    let mut pos = 0;
    decode_value(data, &mut pos, 0)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue> {
    if depth > MAX_DEPTH {
        return Err(BentoolsError::Grammar(format!(
            "nesting deeper than {} levels",
            MAX_DEPTH
        )));
    }

    if *pos >= data.len() {
        return Err(BentoolsError::TruncatedInput(
            "expected a value, got end of input".to_string(),
        ));
    }

    match data[*pos] {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_string(data, pos),
        c => Err(BentoolsError::Grammar(format!(
            "invalid start byte {:#04x} at offset {}",
            c, *pos
        ))),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<BencodeValue> {
    *pos += 1; // Skip 'i'

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BentoolsError::TruncatedInput(
            "integer missing 'e' terminator".to_string(),
        ));
    }

    let num = std::str::from_utf8(&data[start..*pos])
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            BentoolsError::MalformedLiteral(format!(
                "integer literal {:?} does not parse",
                String::from_utf8_lossy(&data[start..*pos])
            ))
        })?;

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::Integer(num))
}

fn decode_string(data: &[u8], pos: &mut usize) -> Result<BencodeValue> {
    let start = *pos;
    while *pos < data.len() && data[*pos] != b':' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BentoolsError::TruncatedInput(
            "byte string length missing ':' delimiter".to_string(),
        ));
    }

    let len = std::str::from_utf8(&data[start..*pos])
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| {
            BentoolsError::MalformedLiteral(format!(
                "length literal {:?} does not parse",
                String::from_utf8_lossy(&data[start..*pos])
            ))
        })?;

    *pos += 1; // Skip ':'

    if len > data.len() - *pos {
        return Err(BentoolsError::TruncatedInput(format!(
            "byte string declares {} bytes, only {} remain",
            len,
            data.len() - *pos
        )));
    }

    let string = data[*pos..*pos + len].to_vec();
    *pos += len;

    Ok(BencodeValue::String(string))
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue> {
    *pos += 1; // Skip 'l'

    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth + 1)?);
    }

    if *pos >= data.len() {
        return Err(BentoolsError::TruncatedInput(
            "list missing 'e' terminator".to_string(),
        ));
    }

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<BencodeValue> {
    *pos += 1; // Skip 'd'

    let mut dict = BTreeMap::new();

    while *pos < data.len() && data[*pos] != b'e' {
        // Keys are always byte strings, never dispatched by start byte
        if !data[*pos].is_ascii_digit() {
            return Err(BentoolsError::Grammar(format!(
                "dictionary key must be a byte string, got start byte {:#04x}",
                data[*pos]
            )));
        }

        let key = match decode_string(data, pos)? {
            BencodeValue::String(k) => k,
            _ => unreachable!("decode_string only returns byte strings"),
        };

        let value = decode_value(data, pos, depth + 1)?;
        // Duplicate keys overwrite: last occurrence wins
        dict.insert(key, value);
    }

    if *pos >= data.len() {
        return Err(BentoolsError::TruncatedInput(
            "dictionary missing 'e' terminator".to_string(),
        ));
    }

    *pos += 1; // Skip 'e'

    Ok(BencodeValue::Dict(dict))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_integers() {
        assert_eq!(decode(b"i0e").unwrap(), BencodeValue::Integer(0));
        assert_eq!(decode(b"i-145e").unwrap(), BencodeValue::Integer(-145));
        assert_eq!(
            decode(b"i11435223524e").unwrap(),
            BencodeValue::Integer(11435223524)
        );
    }

    #[test]
    fn test_decode_strings() {
        assert_eq!(decode(b"0:").unwrap(), BencodeValue::String(Vec::new()));
        assert_eq!(
            decode(b"4:test").unwrap(),
            BencodeValue::String(b"test".to_vec())
        );
    }

    #[test]
    fn test_decode_string_with_nul_bytes() {
        assert_eq!(
            decode(b"3:\x00a\x00").unwrap(),
            BencodeValue::String(b"\x00a\x00".to_vec())
        );
    }

    #[test]
    fn test_decode_lists() {
        assert_eq!(decode(b"le").unwrap(), BencodeValue::List(Vec::new()));
        assert_eq!(
            decode(b"li12e4:teste").unwrap(),
            BencodeValue::List(vec![
                BencodeValue::Integer(12),
                BencodeValue::String(b"test".to_vec()),
            ])
        );
    }

    #[test]
    fn test_decode_dict() {
        let decoded = decode(b"d3:onei12e3:two4:teste").unwrap();
        assert_eq!(decoded.dict_get_int(b"one"), Some(12));
        assert_eq!(decoded.dict_get_str(b"two"), Some("test"));
    }

    #[test]
    fn test_decode_nested() {
        let decoded = decode(b"lli1ei2eed3:key5:valueee").unwrap();
        let outer = decoded.as_list().unwrap();
        let inner = outer[0].as_list().unwrap();
        assert_eq!(inner[1].as_integer(), Some(2));
        assert_eq!(outer[1].dict_get_str(b"key"), Some("value"));
    }

    #[test]
    fn test_truncated_integer() {
        assert!(matches!(
            decode(b"i0"),
            Err(BentoolsError::TruncatedInput(_))
        ));
    }

    #[test]
    fn test_truncated_string() {
        assert!(matches!(
            decode(b"10:short"),
            Err(BentoolsError::TruncatedInput(_))
        ));
        assert!(matches!(
            decode(b"4"),
            Err(BentoolsError::TruncatedInput(_))
        ));
    }

    #[test]
    fn test_truncated_list() {
        assert!(matches!(
            decode(b"li1e"),
            Err(BentoolsError::TruncatedInput(_))
        ));
    }

    #[test]
    fn test_truncated_dict() {
        // second pair cut off after its key
        assert!(matches!(
            decode(b"d3:onei12e3:two"),
            Err(BentoolsError::TruncatedInput(_))
        ));
    }

    #[test]
    fn test_grammar_errors() {
        assert!(matches!(decode(b"l-e"), Err(BentoolsError::Grammar(_))));
        assert!(matches!(decode(b"x"), Err(BentoolsError::Grammar(_))));
        assert!(matches!(decode(b"di1ei2ee"), Err(BentoolsError::Grammar(_))));
    }

    #[test]
    fn test_malformed_literals() {
        assert!(matches!(
            decode(b"i12a4e"),
            Err(BentoolsError::MalformedLiteral(_))
        ));
        assert!(matches!(
            decode(b"ie"),
            Err(BentoolsError::MalformedLiteral(_))
        ));
    }

    #[test]
    fn test_lenient_non_canonical_literals() {
        // leading zeros and -0 are accepted on decode; only output is canonical
        assert_eq!(decode(b"i007e").unwrap(), BencodeValue::Integer(7));
        assert_eq!(decode(b"i-0e").unwrap(), BencodeValue::Integer(0));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        assert_eq!(decode(b"i42etrailing").unwrap(), BencodeValue::Integer(42));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let decoded = decode(b"d3:keyi1e3:keyi2ee").unwrap();
        assert_eq!(decoded.dict_get_int(b"key"), Some(2));
        assert_eq!(decoded.as_dict().unwrap().len(), 1);
    }

    #[test]
    fn test_depth_limit() {
        let mut deep = vec![b'l'; MAX_DEPTH + 2];
        deep.extend(vec![b'e'; MAX_DEPTH + 2]);
        assert!(matches!(decode(&deep), Err(BentoolsError::Grammar(_))));
    }

    #[test]
    fn test_deep_but_legal_nesting() {
        let mut input = vec![b'l'; MAX_DEPTH];
        input.extend(vec![b'e'; MAX_DEPTH]);
        assert!(decode(&input).is_ok());
    }
}
