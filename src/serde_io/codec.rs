use std::io::Cursor;

use serde::{Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Value};

use crate::error::{CodecError, CodecResult};

/// Кодек одного формата: `Value` <-> байты.
///
/// Кодеки не трогают файловую систему и не логируют; этим занимается
/// [`Gateway`](super::Gateway).
pub trait Codec: Send + Sync {
    /// Имя формата для логов и ошибок.
    fn name(&self) -> &'static str;

    /// Суффикс файла без точки.
    fn extension(&self) -> &'static str {
        self.name()
    }

    fn encode(
        &self,
        value: &Value,
    ) -> CodecResult<Vec<u8>>;

    fn decode(
        &self,
        bytes: &[u8],
    ) -> CodecResult<Value>;
}

/// MessagePack через `rmp-serde`.
///
/// Объекты пишутся как map со строковыми ключами, такой файл читает любая
/// реализация msgpack. Байты после первого значения считаются ошибкой.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl Codec for MsgPackCodec {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    fn encode(
        &self,
        value: &Value,
    ) -> CodecResult<Vec<u8>> {
        Ok(rmp_serde::to_vec(value)?)
    }

    fn decode(
        &self,
        bytes: &[u8],
    ) -> CodecResult<Value> {
        let mut cursor = Cursor::new(bytes);
        let value = Value::deserialize(&mut rmp_serde::Deserializer::new(&mut cursor))?;
        let trailing = bytes.len().saturating_sub(cursor.position() as usize);
        if trailing > 0 {
            return Err(CodecError::MsgPackTrailing { trailing });
        }
        Ok(value)
    }
}

/// JSON с отступом в два пробела.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(
        &self,
        value: &Value,
    ) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(128);
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"  "));
        value.serialize(&mut ser)?;
        Ok(buf)
    }

    fn decode(
        &self,
        bytes: &[u8],
    ) -> CodecResult<Value> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "000000001F": [1, 2, 3],
            "ctg": {"len": 12345, "phased": true, "cov": 31.5},
            "empty": null,
            "neg": -42,
        })
    }

    #[test]
    fn test_msgpack_roundtrip_keeps_order() {
        let value = sample();
        let bytes = MsgPackCodec.encode(&value).unwrap();
        let back = MsgPackCodec.decode(&bytes).unwrap();
        assert_eq!(back, value);

        let keys: Vec<_> = back.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["000000001F", "ctg", "empty", "neg"]);
    }

    #[test]
    fn test_msgpack_small_map_is_fixmap() {
        let bytes = MsgPackCodec.encode(&json!({"a": 1})).unwrap();
        // fixmap(1), fixstr(1) "a", positive fixint 1
        assert_eq!(bytes, [0x81, 0xa1, b'a', 0x01]);
    }

    #[test]
    fn test_json_two_space_indent() {
        let bytes = JsonCodec.encode(&json!({"a": [1, 2]})).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let value = sample();
        let bytes = JsonCodec.encode(&value).unwrap();
        assert_eq!(JsonCodec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let value = sample();
        for codec in [&MsgPackCodec as &dyn Codec, &JsonCodec] {
            assert_eq!(codec.encode(&value).unwrap(), codec.encode(&value).unwrap());
        }
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            JsonCodec.decode(b"{\"a\": "),
            Err(CodecError::Json(_))
        ));
        // 0xc1 is never used in msgpack
        assert!(matches!(
            MsgPackCodec.decode(&[0xc1]),
            Err(CodecError::MsgPackDecode(_))
        ));
        assert!(MsgPackCodec.decode(&[]).is_err());
    }

    #[test]
    fn test_decode_trailing_msgpack_rejected() {
        // fixarray [1], затем мусор
        assert!(matches!(
            MsgPackCodec.decode(&[0x91, 0x01, 0xc1, 0x02]),
            Err(CodecError::MsgPackTrailing { trailing: 2 })
        ));
        // два склеенных значения
        assert!(matches!(
            MsgPackCodec.decode(&[0x91, 0x01, 0x91, 0x02]),
            Err(CodecError::MsgPackTrailing { trailing: 2 })
        ));
        assert_eq!(MsgPackCodec.decode(&[0x91, 0x01]).unwrap(), json!([1]));
    }

    #[test]
    fn test_decode_trailing_json_rejected() {
        assert!(JsonCodec.decode(b"[1] [2]").is_err());
        assert_eq!(JsonCodec.decode(b"  [1]\n").unwrap(), json!([1]));
    }
}
