#![no_main]
use libfuzzer_sys::fuzz_target;
use bitlz::{decode, BitstreamWriter, DecoderParams};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let params = DecoderParams::new(u32::from(data[0] % 12), u32::from(data[1] % 8));
    let mut writer = BitstreamWriter::new(params);

    // Pairs of bytes: even tag byte -> literal, odd -> back-reference
    for pair in data[2..].chunks_exact(2) {
        if pair[0] % 2 == 0 {
            writer.literal(pair[1]);
        } else {
            writer.back_reference(u64::from(pair[0] >> 1), u64::from(pair[1]));
        }
    }
    let bits = writer.finish();
    if bits.is_empty() {
        return;
    }

    let full = decode(bits.as_bytes(), params.offset_bits, params.length_bits);
    assert!(full.is_complete());

    // Cutting the stream anywhere keeps a prefix of the full output
    let cut = bits.len() / 2;
    let partial = decode(&bits.as_bytes()[..cut], params.offset_bits, params.length_bits);
    assert!(full.output.starts_with(&partial.output));
});
