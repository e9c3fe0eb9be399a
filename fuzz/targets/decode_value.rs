#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use unzip_io::serde_io::Format;

#[derive(Debug, Arbitrary)]
enum FuzzFormat {
    MsgPack,
    Json,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    format: FuzzFormat,
}

impl From<FuzzFormat> for Format {
    fn from(f: FuzzFormat) -> Self {
        match f {
            FuzzFormat::MsgPack => Format::MsgPack,
            FuzzFormat::Json => Format::Json,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let codec = Format::from(input.format).codec();

    // Декодер не должен паниковать ни на каких байтах.
    let Ok(value) = codec.decode(&input.data) else {
        return;
    };

    // Раз декодировалось, значение обязано закодироваться обратно и дать то же.
    let bytes = codec.encode(&value).expect("decoded value must re-encode");
    let again = codec.decode(&bytes).expect("re-encoded bytes must decode");
    assert_eq!(again, value);
});
