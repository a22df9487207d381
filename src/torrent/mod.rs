mod metainfo;

pub use metainfo::Torrent;

use crate::bencode::decode;
use crate::error::Result;
use std::path::Path;
use tokio::fs;

/// Load and parse a .torrent file
pub async fn load_torrent_file<P: AsRef<Path>>(path: P) -> Result<Torrent> {
    let data = fs::read(path).await?;
    parse_torrent(&data)
}

/// Parse torrent data from bytes
pub fn parse_torrent(data: &[u8]) -> Result<Torrent> {
    let value = decode(data)?;
    Torrent::from_bencode(&value)
}

#[cfg(test)]
mod tests {
    use super::metainfo::Info;
    use super::*;

    #[tokio::test]
    async fn test_load_torrent_file() {
        let torrent = Torrent {
            announce: "http://tracker.example.org/announce".to_string(),
            comment: "sample".to_string(),
            creation_date: 1700000000,
            httpseeds: vec!["http://seed.example.org".to_string()],
            info: Info {
                length: 4,
                name: "file.bin".to_string(),
                piece_length: 4,
                pieces: vec![0u8; 20],
            },
        };

        let dir = std::env::temp_dir().join("bentools-test-load");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("sample.torrent");
        tokio::fs::write(&path, crate::bencode::encode(&torrent.to_bencode()))
            .await
            .unwrap();

        let loaded = load_torrent_file(&path).await.unwrap();
        assert_eq!(loaded, torrent);
    }
}
