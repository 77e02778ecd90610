//! Size ceiling for inline image payloads in a final answer.
//!
//! The reviewer is told to keep any base64 PNG under the ceiling. The check
//! here lets callers verify it after the fact.

use serde_json::Value;

/// Ceiling for one encoded image string, in bytes
pub const DEFAULT_IMAGE_BUDGET_BYTES: usize = 100_000;

const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";
/// Base64 of the 8-byte PNG signature
const PNG_BASE64_MAGIC: &str = "iVBORw0KGgo";

/// Length of the largest embedded image payload exceeding `budget`, if any.
///
/// JSON answers are walked value by value: a string counts as an image when it
/// is a `data:image/...;base64,` URI or bare base64 starting with the PNG
/// signature. Answers that are not JSON are scanned for data URIs.
pub fn oversized_image_payload(answer: &str, budget: usize) -> Option<usize> {
    let mut lengths = Vec::new();
    match serde_json::from_str::<Value>(answer) {
        Ok(value) => collect_json_payloads(&value, &mut lengths),
        Err(_) => collect_raw_payloads(answer, &mut lengths),
    }
    lengths.into_iter().filter(|len| *len > budget).max()
}

fn collect_json_payloads(value: &Value, out: &mut Vec<usize>) {
    match value {
        Value::String(s) => {
            if is_image_string(s) {
                out.push(s.len());
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_json_payloads(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_json_payloads(v, out)),
        _ => {}
    }
}

fn is_image_string(s: &str) -> bool {
    if s.starts_with(DATA_URI_PREFIX) && s.contains(BASE64_MARKER) {
        return true;
    }
    s.starts_with(PNG_BASE64_MAGIC) && s.bytes().all(is_base64_byte)
}

fn collect_raw_payloads(text: &str, out: &mut Vec<usize>) {
    let mut rest = text;
    while let Some(start) = rest.find(DATA_URI_PREFIX) {
        let candidate = &rest[start..];
        let Some(marker) = candidate.find(BASE64_MARKER) else {
            break;
        };
        let payload_start = marker + BASE64_MARKER.len();
        let payload_len = candidate[payload_start..]
            .bytes()
            .take_while(|b| is_base64_byte(*b))
            .count();
        out.push(payload_start + payload_len);
        rest = &candidate[payload_start + payload_len..];
    }
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}
