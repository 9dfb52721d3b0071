//! WASM bindings for bitlz.
//!
//! Provides a browser-compatible API for decoding and scoring bitstreams.

use wasm_bindgen::prelude::*;

use crate::bitstream;
use crate::decompress::decode;
use crate::entropy;

/// Decode a bitstream string.
///
/// Returns `{ output: string, error: string | null, position: number | null }`.
/// Partial output is kept when `error` is set.
#[wasm_bindgen(js_name = decodeBitstream)]
pub fn decode_bitstream(bits: &str, offset_bits: u32, length_bits: u32) -> JsValue {
    let decoded = decode(bits.as_bytes(), offset_bits, length_bits);

    let (error, position) = match decoded.error {
        Some(e) => (
            JsValue::from_str(&e.to_string()),
            JsValue::from_f64(e.position() as f64),
        ),
        None => (JsValue::NULL, JsValue::NULL),
    };

    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &"output".into(), &JsValue::from_str(&decoded.text()));
    let _ = js_sys::Reflect::set(&obj, &"error".into(), &error);
    let _ = js_sys::Reflect::set(&obj, &"position".into(), &position);
    obj.into()
}

/// Encode text as 8 bits per byte, MSB first.
#[wasm_bindgen(js_name = generateBitstream)]
pub fn generate_bitstream(text: &str) -> String {
    bitstream::generate_bitstream(text.as_bytes())
}

/// Shannon entropy of the UTF-8 bytes of `text`, in bits per symbol.
#[wasm_bindgen(js_name = shannonEntropy)]
pub fn shannon_entropy(text: &str) -> f64 {
    entropy::shannon_entropy(text.as_bytes())
}
