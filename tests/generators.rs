//! Генераторы значений для property-based тестов сериализации.
//!
//! Значения должны быть представимы и в msgpack, и в JSON: ключи только
//! строки, числа конечные. Дробные числа берутся кратными 1/8, чтобы
//! текстовое представление читалось обратно без потерь.

use std::ops::Range;

use proptest::{prelude::*, string::string_regex};
use serde_json::{Map, Number, Value};

const KEYS: Range<usize> = 0..8;
const ITEMS: Range<usize> = 0..8;

/// Строки: ASCII, имена контигов и произвольный юникод.
pub fn string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        string_regex("[a-zA-Z0-9_.-]{1,16}").unwrap(),
        string_regex("[0-9]{9}[FR]").unwrap(),
        any::<String>(),
    ]
}

/// Числа: граничные целые и конечные дробные.
pub fn number_strategy() -> impl Strategy<Value = Number> {
    prop_oneof![
        Just(Number::from(0)),
        Just(Number::from(i64::MIN)),
        Just(Number::from(i64::MAX)),
        Just(Number::from(u64::MAX)),
        any::<i64>().prop_map(Number::from),
        any::<u64>().prop_map(Number::from),
        (-1_000_000i64..1_000_000).prop_filter_map("finite", |n| Number::from_f64(n as f64 / 8.0)),
    ]
}

/// Листовые значения.
pub fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number_strategy().prop_map(Value::Number),
        string_strategy().prop_map(Value::String),
    ]
}

/// Вложенные массивы и объекты ограниченной глубины.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), ITEMS).prop_map(Value::Array),
            prop::collection::vec((string_strategy(), inner), KEYS)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Верхний уровень, как у файлов пайплайна: объект или массив.
pub fn document_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec((string_strategy(), value_strategy()), KEYS)
            .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        prop::collection::vec(value_strategy(), ITEMS).prop_map(Value::Array),
    ]
}
