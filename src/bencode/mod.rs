mod decoder;
mod encoder;
mod stream;
mod value;

pub use decoder::decode;
pub use encoder::{encode, encode_to};
pub use stream::{Decoder, Encoder};
pub use value::BencodeValue;
