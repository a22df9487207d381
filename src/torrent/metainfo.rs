use crate::bencode::{encode, BencodeValue};
use crate::error::{BentoolsError, Result};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// The "info" dictionary of a .torrent file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Length of the file in bytes
    pub length: i64,
    /// Suggested name for the file
    pub name: String,
    /// Number of bytes in each piece
    #[serde(rename = "piece length")]
    pub piece_length: i64,
    /// Concatenated SHA1 hashes of all pieces (hex in the JSON form)
    #[serde(with = "hex_bytes")]
    pub pieces: Vec<u8>,
}

/// All the information in a .torrent file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torrent {
    /// URL of the tracker
    pub announce: String,
    /// Free-form comment from the torrent author
    pub comment: String,
    /// Creation time as unix seconds
    #[serde(rename = "creation date")]
    pub creation_date: i64,
    /// HTTP seed URLs
    pub httpseeds: Vec<String>,
    /// Information about the torrent contents
    pub info: Info,
}

impl Info {
    fn from_bencode(value: &BencodeValue) -> Result<Self> {
        let dict = value
            .as_dict()
            .ok_or_else(|| BentoolsError::InvalidTorrent("'info' must be a dict".to_string()))?;

        let length = value
            .dict_get_int(b"length")
            .ok_or_else(|| BentoolsError::InvalidTorrent("missing 'length' field".to_string()))?;

        let name = value
            .dict_get_str(b"name")
            .ok_or_else(|| BentoolsError::InvalidTorrent("missing 'name' field".to_string()))?
            .to_string();

        let piece_length = value.dict_get_int(b"piece length").ok_or_else(|| {
            BentoolsError::InvalidTorrent("missing 'piece length' field".to_string())
        })?;

        let pieces = dict
            .get(b"pieces".as_ref())
            .and_then(|v| v.as_bytes())
            .ok_or_else(|| BentoolsError::InvalidTorrent("missing 'pieces' field".to_string()))?
            .to_vec();

        Ok(Info {
            length,
            name,
            piece_length,
            pieces,
        })
    }

    fn to_bencode(&self) -> BencodeValue {
        let mut dict = BTreeMap::new();
        dict.insert(b"length".to_vec(), BencodeValue::Integer(self.length));
        dict.insert(
            b"name".to_vec(),
            BencodeValue::String(self.name.as_bytes().to_vec()),
        );
        dict.insert(
            b"piece length".to_vec(),
            BencodeValue::Integer(self.piece_length),
        );
        dict.insert(b"pieces".to_vec(), BencodeValue::String(self.pieces.clone()));
        BencodeValue::Dict(dict)
    }
}

impl Torrent {
    /// Build a Torrent from a decoded bencode dict.
    ///
    /// A missing key or a value of the wrong kind is an invalid-torrent
    /// error, never a codec error.
    pub fn from_bencode(value: &BencodeValue) -> Result<Self> {
        if value.as_dict().is_none() {
            return Err(BentoolsError::InvalidTorrent(
                "torrent must be a dict".to_string(),
            ));
        }

        let announce = value
            .dict_get_str(b"announce")
            .ok_or_else(|| BentoolsError::InvalidTorrent("missing 'announce' field".to_string()))?
            .to_string();

        let comment = value
            .dict_get_str(b"comment")
            .ok_or_else(|| BentoolsError::InvalidTorrent("missing 'comment' field".to_string()))?
            .to_string();

        let creation_date = value.dict_get_int(b"creation date").ok_or_else(|| {
            BentoolsError::InvalidTorrent("missing 'creation date' field".to_string())
        })?;

        let httpseeds = value
            .dict_get(b"httpseeds")
            .and_then(|v| v.as_list())
            .ok_or_else(|| BentoolsError::InvalidTorrent("missing 'httpseeds' field".to_string()))?
            .iter()
            .map(|v| {
                v.as_str().map(String::from).ok_or_else(|| {
                    BentoolsError::InvalidTorrent("httpseeds entry must be a string".to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let info = Info::from_bencode(value.dict_get(b"info").ok_or_else(|| {
            BentoolsError::InvalidTorrent("missing 'info' field".to_string())
        })?)?;

        Ok(Torrent {
            announce,
            comment,
            creation_date,
            httpseeds,
            info,
        })
    }

    /// Rebuild the canonical bencode dict for this torrent
    pub fn to_bencode(&self) -> BencodeValue {
        let seeds = self
            .httpseeds
            .iter()
            .map(|s| BencodeValue::String(s.as_bytes().to_vec()))
            .collect();

        let mut dict = BTreeMap::new();
        dict.insert(
            b"announce".to_vec(),
            BencodeValue::String(self.announce.as_bytes().to_vec()),
        );
        dict.insert(
            b"comment".to_vec(),
            BencodeValue::String(self.comment.as_bytes().to_vec()),
        );
        dict.insert(
            b"creation date".to_vec(),
            BencodeValue::Integer(self.creation_date),
        );
        dict.insert(b"httpseeds".to_vec(), BencodeValue::List(seeds));
        dict.insert(b"info".to_vec(), self.info.to_bencode());
        BencodeValue::Dict(dict)
    }

    /// SHA1 hash of the canonically encoded info dict
    pub fn info_hash(&self) -> [u8; 20] {
        let mut hasher = Sha1::new();
        hasher.update(encode(&self.info.to_bencode()));
        let hash = hasher.finalize();

        let mut result = [0u8; 20];
        result.copy_from_slice(&hash);
        result
    }

    /// Get the info hash as a hex string
    pub fn info_hash_hex(&self) -> String {
        hex::encode(self.info_hash())
    }

    /// Human-readable JSON summary with the pieces payload elided
    pub fn summary(&self) -> String {
        let mut elided = self.clone();
        elided.info.pieces = Vec::new();
        serde_json::to_string_pretty(&elided).unwrap_or_default()
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}
