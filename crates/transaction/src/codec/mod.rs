// Path: crates/transaction/src/codec/mod.rs
//! Typed binary codec for contract arguments.
//!
//! A self-describing, length-prefixed format over a closed set of ten value
//! kinds, consumed by the contract virtual machine. The encoding is
//! canonical: map entries are ordered by byte-wise ascending key before
//! encoding, so two logically equal maps always produce identical bytes
//! (and therefore identical hashes).
//!
//! Wire layout:
//!
//! | tag | kind    | header                              | body                 |
//! |-----|---------|-------------------------------------|----------------------|
//! | 0   | Null    | tag + length(=0)                    | -                    |
//! | 1   | Bool    | tag + length(=1)                    | 1 byte               |
//! | 2   | Int32   | tag + length(=4)                    | 4 bytes BE           |
//! | 3   | Int64   | tag + length(=8)                    | 8 bytes BE           |
//! | 4   | String  | tag + length                        | UTF-8 bytes          |
//! | 5   | Bytes   | tag + length                        | raw bytes            |
//! | 6   | Array   | tag + element count + total size    | child encodings      |
//! | 7   | Map     | tag + entry count + total size      | key/value encodings  |
//! | 8   | Float32 | tag + length(=4)                    | IEEE-754 BE bits     |
//! | 9   | Float64 | tag + length(=8)                    | IEEE-754 BE bits     |
//!
//! Scalar headers are 5 bytes, container headers are 9; all integers in
//! headers and bodies are big-endian. Decoders branch on the tag before
//! interpreting the rest of the header.

use meridian_types::error::CodecError;
use std::collections::BTreeMap;

const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_INT32: u8 = 2;
const TAG_INT64: u8 = 3;
const TAG_STRING: u8 = 4;
const TAG_BYTES: u8 = 5;
const TAG_ARRAY: u8 = 6;
const TAG_MAP: u8 = 7;
const TAG_FLOAT32: u8 = 8;
const TAG_FLOAT64: u8 = 9;

const SCALAR_HEADER: usize = 5;
const CONTAINER_HEADER: usize = 9;

/// A value the contract virtual machine understands.
///
/// The kind set is closed: encoding is total over this enum, so an
/// "unsupported kind" can only occur on the decode side, as an unknown tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Map keys are restricted to strings; the B-tree keeps them in the
    /// byte-wise ascending order the canonical encoding requires.
    Map(BTreeMap<String, Value>),
    Float32(f32),
    Float64(f64),
}

impl Value {
    fn tag(&self) -> u8 {
        match self {
            Value::Null => TAG_NULL,
            Value::Bool(_) => TAG_BOOL,
            Value::Int32(_) => TAG_INT32,
            Value::Int64(_) => TAG_INT64,
            Value::String(_) => TAG_STRING,
            Value::Bytes(_) => TAG_BYTES,
            Value::Array(_) => TAG_ARRAY,
            Value::Map(_) => TAG_MAP,
            Value::Float32(_) => TAG_FLOAT32,
            Value::Float64(_) => TAG_FLOAT64,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

/// Encode a value into its canonical binary form.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(value, &mut out);
    out
}

fn encode_into(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => {
            out.push(TAG_NULL);
            out.extend_from_slice(&0u32.to_be_bytes());
        }
        Value::Bool(v) => {
            out.push(TAG_BOOL);
            out.extend_from_slice(&1u32.to_be_bytes());
            out.push(u8::from(*v));
        }
        Value::Int32(v) => {
            out.push(TAG_INT32);
            out.extend_from_slice(&4u32.to_be_bytes());
            out.extend_from_slice(&v.to_be_bytes());
        }
        Value::Int64(v) => {
            out.push(TAG_INT64);
            out.extend_from_slice(&8u32.to_be_bytes());
            out.extend_from_slice(&v.to_be_bytes());
        }
        Value::String(v) => {
            out.push(TAG_STRING);
            out.extend_from_slice(&(v.len() as u32).to_be_bytes());
            out.extend_from_slice(v.as_bytes());
        }
        Value::Bytes(v) => {
            out.push(TAG_BYTES);
            out.extend_from_slice(&(v.len() as u32).to_be_bytes());
            out.extend_from_slice(v);
        }
        Value::Float32(v) => {
            out.push(TAG_FLOAT32);
            out.extend_from_slice(&4u32.to_be_bytes());
            out.extend_from_slice(&v.to_bits().to_be_bytes());
        }
        Value::Float64(v) => {
            out.push(TAG_FLOAT64);
            out.extend_from_slice(&8u32.to_be_bytes());
            out.extend_from_slice(&v.to_bits().to_be_bytes());
        }
        Value::Array(items) => {
            out.push(TAG_ARRAY);
            out.extend_from_slice(&(items.len() as u32).to_be_bytes());
            let size_pos = out.len();
            out.extend_from_slice(&[0u8; 4]);
            let body_start = out.len();
            for item in items {
                encode_into(item, out);
            }
            let total = (out.len() - body_start) as u32;
            out[size_pos..size_pos + 4].copy_from_slice(&total.to_be_bytes());
        }
        Value::Map(entries) => {
            out.push(TAG_MAP);
            out.extend_from_slice(&(entries.len() as u32).to_be_bytes());
            let size_pos = out.len();
            out.extend_from_slice(&[0u8; 4]);
            let body_start = out.len();
            // BTreeMap iteration is already byte-wise ascending by key.
            for (key, val) in entries {
                encode_into(&Value::String(key.clone()), out);
                encode_into(val, out);
            }
            let total = (out.len() - body_start) as u32;
            out[size_pos..size_pos + 4].copy_from_slice(&total.to_be_bytes());
        }
    }
}

/// Decode a value from its binary form.
///
/// Scalar, string and bytes values must fill the buffer exactly; container
/// values must declare a body that fits. Any inconsistency fails the whole
/// call with the offending offset - no partial results.
pub fn decode(data: &[u8]) -> Result<Value, CodecError> {
    let (value, consumed) = decode_value(data, 0)?;
    // Terminal values own the whole buffer; trailing bytes after a
    // container are tolerated, matching the at-least contract of the
    // container header.
    if !matches!(value, Value::Array(_) | Value::Map(_)) && consumed != data.len() {
        return Err(CodecError::LengthMismatch {
            kind: "value",
            offset: 0,
            declared: consumed - SCALAR_HEADER,
            actual: data.len() - SCALAR_HEADER,
        });
    }
    Ok(value)
}

/// Read the type tag of an encoded value without decoding it.
pub fn peek_tag(data: &[u8]) -> Result<u8, CodecError> {
    data.first().copied().ok_or(CodecError::Truncated {
        offset: 0,
        need: 1,
        have: 0,
    })
}

/// Decode the value starting at `offset`, returning it and the number of
/// bytes it occupied.
fn decode_value(data: &[u8], offset: usize) -> Result<(Value, usize), CodecError> {
    let header = slice(data, offset, SCALAR_HEADER)?;
    let tag = header[0];
    let declared = u32::from_be_bytes(header[1..5].try_into().expect("header is 5 bytes")) as usize;

    match tag {
        TAG_NULL => {
            expect_len("null", offset, declared, 0)?;
            Ok((Value::Null, SCALAR_HEADER))
        }
        TAG_BOOL => {
            expect_len("bool", offset, declared, 1)?;
            let body = slice(data, offset + SCALAR_HEADER, 1)?;
            Ok((Value::Bool(body[0] != 0), SCALAR_HEADER + 1))
        }
        TAG_INT32 => {
            expect_len("int32", offset, declared, 4)?;
            let body = slice(data, offset + SCALAR_HEADER, 4)?;
            let v = i32::from_be_bytes(body.try_into().expect("4-byte slice"));
            Ok((Value::Int32(v), SCALAR_HEADER + 4))
        }
        TAG_INT64 => {
            expect_len("int64", offset, declared, 8)?;
            let body = slice(data, offset + SCALAR_HEADER, 8)?;
            let v = i64::from_be_bytes(body.try_into().expect("8-byte slice"));
            Ok((Value::Int64(v), SCALAR_HEADER + 8))
        }
        TAG_STRING => {
            let body = slice(data, offset + SCALAR_HEADER, declared)?;
            let text = std::str::from_utf8(body)
                .map_err(|_| CodecError::InvalidUtf8 { offset })?
                .to_string();
            Ok((Value::String(text), SCALAR_HEADER + declared))
        }
        TAG_BYTES => {
            let body = slice(data, offset + SCALAR_HEADER, declared)?;
            Ok((Value::Bytes(body.to_vec()), SCALAR_HEADER + declared))
        }
        TAG_FLOAT32 => {
            expect_len("float32", offset, declared, 4)?;
            let body = slice(data, offset + SCALAR_HEADER, 4)?;
            let bits = u32::from_be_bytes(body.try_into().expect("4-byte slice"));
            Ok((Value::Float32(f32::from_bits(bits)), SCALAR_HEADER + 4))
        }
        TAG_FLOAT64 => {
            expect_len("float64", offset, declared, 8)?;
            let body = slice(data, offset + SCALAR_HEADER, 8)?;
            let bits = u64::from_be_bytes(body.try_into().expect("8-byte slice"));
            Ok((Value::Float64(f64::from_bits(bits)), SCALAR_HEADER + 8))
        }
        TAG_ARRAY => {
            let (count, total) = container_header(data, offset)?;
            let body_start = offset + CONTAINER_HEADER;
            let mut cursor = body_start;
            let mut items = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                let (item, used) = decode_child(data, cursor, body_start + total)?;
                items.push(item);
                cursor += used;
            }
            expect_len("array body", offset, total, cursor - body_start)?;
            Ok((Value::Array(items), CONTAINER_HEADER + total))
        }
        TAG_MAP => {
            let (count, total) = container_header(data, offset)?;
            let body_start = offset + CONTAINER_HEADER;
            let mut cursor = body_start;
            let mut entries = BTreeMap::new();
            for _ in 0..count {
                let key_tag = peek_child_tag(data, cursor)?;
                if key_tag != TAG_STRING {
                    return Err(CodecError::NonStringKey {
                        tag: key_tag,
                        offset: cursor,
                    });
                }
                let (key, used) = decode_child(data, cursor, body_start + total)?;
                cursor += used;
                let Value::String(key) = key else {
                    unreachable!("tag checked above");
                };
                let (val, used) = decode_child(data, cursor, body_start + total)?;
                cursor += used;
                entries.insert(key, val);
            }
            expect_len("map body", offset, total, cursor - body_start)?;
            Ok((Value::Map(entries), CONTAINER_HEADER + total))
        }
        other => Err(CodecError::UnknownTag { tag: other, offset }),
    }
}

/// Decode a child value, keeping it inside the parent's declared body.
fn decode_child(
    data: &[u8],
    offset: usize,
    body_end: usize,
) -> Result<(Value, usize), CodecError> {
    if offset >= body_end {
        return Err(CodecError::Truncated {
            offset,
            need: SCALAR_HEADER,
            have: body_end.saturating_sub(offset),
        });
    }
    let (value, used) = decode_value(data, offset)?;
    if offset + used > body_end {
        return Err(CodecError::Truncated {
            offset,
            need: used,
            have: body_end - offset,
        });
    }
    Ok((value, used))
}

fn peek_child_tag(data: &[u8], offset: usize) -> Result<u8, CodecError> {
    data.get(offset).copied().ok_or(CodecError::Truncated {
        offset,
        need: 1,
        have: 0,
    })
}

fn container_header(data: &[u8], offset: usize) -> Result<(usize, usize), CodecError> {
    let header = slice(data, offset, CONTAINER_HEADER)?;
    let count = u32::from_be_bytes(header[1..5].try_into().expect("header is 9 bytes")) as usize;
    let total = u32::from_be_bytes(header[5..9].try_into().expect("header is 9 bytes")) as usize;
    // The body must be present in full before any child is touched.
    slice(data, offset + CONTAINER_HEADER, total)?;
    Ok((count, total))
}

fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], CodecError> {
    let end = offset.checked_add(len).ok_or(CodecError::Truncated {
        offset,
        need: len,
        have: data.len().saturating_sub(offset),
    })?;
    if end > data.len() {
        return Err(CodecError::Truncated {
            offset,
            need: len,
            have: data.len().saturating_sub(offset),
        });
    }
    Ok(&data[offset..end])
}

fn expect_len(
    kind: &'static str,
    offset: usize,
    declared: usize,
    actual: usize,
) -> Result<(), CodecError> {
    if declared != actual {
        return Err(CodecError::LengthMismatch {
            kind,
            offset,
            declared,
            actual,
        });
    }
    Ok(())
}
