use crate::error::{BentoolsError, Result};
use std::collections::BTreeMap;

/// Represents a bencoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BencodeValue {
    /// Integer: i<number>e
    Integer(i64),
    /// Byte string: <length>:<contents>
    String(Vec<u8>),
    /// List: l<values>e
    List(Vec<BencodeValue>),
    /// Dictionary: d<key-value pairs>e (keys are sorted)
    Dict(BTreeMap<Vec<u8>, BencodeValue>),
}

impl BencodeValue {
    /// Try to get this value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BencodeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a byte string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BencodeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UTF-8 string
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Try to get this value as a list
    pub fn as_list(&self) -> Option<&[BencodeValue]> {
        match self {
            BencodeValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Try to get this value as a dictionary
    pub fn as_dict(&self) -> Option<&BTreeMap<Vec<u8>, BencodeValue>> {
        match self {
            BencodeValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Get a value from a dictionary by key
    pub fn dict_get(&self, key: &[u8]) -> Option<&BencodeValue> {
        self.as_dict()?.get(key)
    }

    /// Get a string value from a dictionary by key
    pub fn dict_get_str(&self, key: &[u8]) -> Option<&str> {
        self.dict_get(key)?.as_str()
    }

    /// Get an integer value from a dictionary by key
    pub fn dict_get_int(&self, key: &[u8]) -> Option<i64> {
        self.dict_get(key)?.as_integer()
    }

    /// Project this value onto generic JSON containers.
    ///
    /// Byte strings are converted with lossy UTF-8, so the projection is
    /// one-way: re-encoding goes through [`BencodeValue::from_json`], which
    /// rebuilds typed values. Dictionary keys come out in canonical order
    /// since the backing map is already key-sorted.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            BencodeValue::Integer(i) => serde_json::Value::from(*i),
            BencodeValue::String(s) => {
                serde_json::Value::String(String::from_utf8_lossy(s).into_owned())
            }
            BencodeValue::List(list) => {
                serde_json::Value::Array(list.iter().map(|v| v.to_json()).collect())
            }
            BencodeValue::Dict(dict) => serde_json::Value::Object(
                dict.iter()
                    .map(|(k, v)| (String::from_utf8_lossy(k).into_owned(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Rebuild a typed value from generic JSON containers.
    ///
    /// Fails with an unsupported-value error for JSON kinds that have no
    /// bencode counterpart (null, booleans, non-integral numbers).
    pub fn from_json(json: &serde_json::Value) -> Result<BencodeValue> {
        match json {
            serde_json::Value::Number(n) => {
                let i = n.as_i64().ok_or_else(|| {
                    BentoolsError::UnsupportedValue(format!(
                        "number {} is not a 64-bit integer",
                        n
                    ))
                })?;
                Ok(BencodeValue::Integer(i))
            }
            serde_json::Value::String(s) => Ok(BencodeValue::String(s.as_bytes().to_vec())),
            serde_json::Value::Array(items) => {
                let list = items
                    .iter()
                    .map(BencodeValue::from_json)
                    .collect::<Result<Vec<_>>>()?;
                Ok(BencodeValue::List(list))
            }
            serde_json::Value::Object(map) => {
                let mut dict = BTreeMap::new();
                for (k, v) in map {
                    dict.insert(k.as_bytes().to_vec(), BencodeValue::from_json(v)?);
                }
                Ok(BencodeValue::Dict(dict))
            }
            other => Err(BentoolsError::UnsupportedValue(format!(
                "JSON value {} has no bencode representation",
                other
            ))),
        }
    }
}
