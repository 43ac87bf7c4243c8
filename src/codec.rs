use bytes::{Buf, BufMut};
use tonic::{
    codec::{BufferSettings, Codec, DecodeBuf, Decoder, EncodeBuf, Encoder},
    Status,
};

/// A [`Codec`] that carries raw UTF-8 text: message bodies go on the wire
/// verbatim, with no structured schema.
#[derive(Debug, Clone, Default)]
pub struct TextCodec;

#[derive(Debug)]
pub struct TextEncoder;

impl Encoder for TextEncoder {
    type Item = String;
    type Error = Status;

    fn encode(&mut self, item: Self::Item, buf: &mut EncodeBuf<'_>) -> Result<(), Self::Error> {
        buf.put_slice(item.as_bytes());
        Ok(())
    }

    fn buffer_settings(&self) -> BufferSettings {
        Default::default()
    }
}

#[derive(Debug)]
pub struct TextDecoder;

impl Decoder for TextDecoder {
    type Item = String;
    type Error = Status;

    fn decode(&mut self, buf: &mut DecodeBuf<'_>) -> Result<Option<Self::Item>, Self::Error> {
        // An empty message is the empty string.
        let bytes = buf.copy_to_bytes(buf.remaining());
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| Status::invalid_argument("message payload is not valid UTF-8"))?;
        Ok(Some(text))
    }

    fn buffer_settings(&self) -> BufferSettings {
        Default::default()
    }
}

impl Codec for TextCodec {
    type Encode = String;
    type Decode = String;
    type Encoder = TextEncoder;
    type Decoder = TextDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        TextEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        TextDecoder
    }
}
