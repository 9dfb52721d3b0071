#![no_main]
use libfuzzer_sys::fuzz_target;
use bitlz::decode;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // Widths capped so back-reference lengths stay bounded
    let offset_bits = u32::from(data[0] % 24);
    let length_bits = u32::from(data[1] % 12);

    let bits = &data[2..];
    let decoded = decode(bits, offset_bits, length_bits);

    assert!(decoded.output.iter().all(|b| (32..=126).contains(b)));
    if let Some(e) = decoded.error {
        assert!(e.position() <= bits.len());
    }
});
