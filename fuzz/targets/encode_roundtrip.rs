#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Number, Value};
use unzip_io::serde_io::Format;

/// Произвольное значение из `Unstructured`, глубина ограничена.
fn arb_value(
    u: &mut Unstructured<'_>,
    depth: usize,
) -> arbitrary::Result<Value> {
    let max = if depth == 0 { 3 } else { 5 };
    Ok(match u.int_in_range::<u8>(0..=max)? {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => match u.int_in_range::<u8>(0..=2)? {
            0 => Value::Number(Number::from(u.arbitrary::<i64>()?)),
            1 => Value::Number(Number::from(u.arbitrary::<u64>()?)),
            // дроби, кратные 1/8, печатаются в JSON без потерь
            _ => Number::from_f64(f64::from(u.arbitrary::<i32>()?) / 8.0)
                .map_or(Value::Null, Value::Number),
        },
        3 => Value::String(u.arbitrary()?),
        4 => {
            let len = u.int_in_range::<usize>(0..=8)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arb_value(u, depth - 1)?);
            }
            Value::Array(items)
        }
        _ => {
            let len = u.int_in_range::<usize>(0..=8)?;
            let mut map = Map::new();
            for _ in 0..len {
                let key: String = u.arbitrary()?;
                map.insert(key, arb_value(u, depth - 1)?);
            }
            Value::Object(map)
        }
    })
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(value) = arb_value(&mut u, 4) else {
        return;
    };

    for format in Format::ALL {
        let codec = format.codec();
        let bytes = codec.encode(&value).expect("encoding must not fail");
        let back = codec.decode(&bytes).expect("own output must decode");
        assert_eq!(back, value, "roundtrip mismatch for {format}");

        // Детерминированность: повторное кодирование даёт те же байты
        assert_eq!(codec.encode(&back).expect("re-encode"), bytes);
    }
});
