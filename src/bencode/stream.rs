use super::{decode, encode_to, BencodeValue};
use crate::error::Result;
use std::io::{Read, Write};

/// Reads one bencode value from an arbitrary byte source.
///
/// The whole source is buffered into memory before parsing; incremental
/// decoding of unbounded streams is out of scope (metadata files are small).
pub struct Decoder<R: Read> {
    reader: R,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder { reader }
    }

    /// Read the source to its end and decode one value from it.
    pub fn decode(mut self) -> Result<BencodeValue> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        decode(&data)
    }
}

/// Writes bencode values to an arbitrary byte sink.
pub struct Encoder<W: Write> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Encoder { writer }
    }

    /// Encode a value and write the full canonical buffer in one operation.
    pub fn encode(&mut self, value: &BencodeValue) -> Result<()> {
        encode_to(&mut self.writer, value)
    }
}
