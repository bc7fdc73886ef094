//! Frame encodings for commands and events.
//!
//! Two interchangeable codecs:
//! - `JsonCodec`: text frames, readable, what browser clients speak
//! - `BinaryCodec`: compact bincode frames
//!
//! Both share the serde shape of `Command` and `ServerEvent`. Enums are
//! externally tagged so the same derive works for both formats.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::CodecError;

/// A wire encoding.
pub trait WireCodec {
    /// Encoded frame type.
    type Frame;

    /// Encode a value into one frame.
    fn encode<T: Serialize>(value: &T) -> Result<Self::Frame, CodecError>;

    /// Decode one frame.
    fn decode<T: DeserializeOwned>(frame: &Self::Frame) -> Result<T, CodecError>;
}

/// JSON text frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl WireCodec for JsonCodec {
    type Frame = String;

    fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode<T: DeserializeOwned>(frame: &String) -> Result<T, CodecError> {
        Ok(serde_json::from_str(frame)?)
    }
}

/// Bincode binary frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryCodec;

impl WireCodec for BinaryCodec {
    type Frame = Vec<u8>;

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(value)?)
    }

    fn decode<T: DeserializeOwned>(frame: &Vec<u8>) -> Result<T, CodecError> {
        Ok(bincode::deserialize(frame)?)
    }
}
