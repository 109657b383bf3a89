//! Frame model and protobuf codec for host ↔ engine message passing.
//!
//! Every message that crosses from the host context into the engine context
//! (or back) is a [`Frame`] encoded to bytes. Encoding gives the transport
//! value semantics: the receiver always owns a fresh copy and nothing is
//! shared between contexts. Payloads stay flexible (`serde_json::Value`) so
//! the command grammar is parsed by the engine, not by the transport.
//!
//! [`message`] layers typed host/worker messages over the raw frame.

pub mod message;

pub use message::{HostMessage, LogLevel, WorkerMessage};

use std::time::{SystemTime, UNIX_EPOCH};

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error returned by [`decode_frame`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireFrame`.
    #[error("failed to decode protobuf frame: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The frame decoded but carries no syscall, so it cannot be routed.
    #[error("frame {seq} has an empty syscall")]
    EmptySyscall { seq: u64 },
}

/// A single message on the host ↔ engine channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Sender-local sequence number; strictly increasing per sender.
    pub seq: u64,
    /// Milliseconds since the Unix epoch when the frame was created.
    pub ts: i64,
    /// Namespaced operation name, e.g. `"engine:execute"`.
    pub syscall: String,
    /// Arbitrary JSON payload.
    pub data: Value,
}

impl Frame {
    /// Create a frame stamped with the current time.
    pub fn new(seq: u64, syscall: impl Into<String>, data: Value) -> Self {
        Self { seq, ts: now_ms(), syscall: syscall.into(), data }
    }
}

/// Current time as milliseconds since Unix epoch.
fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Encode a frame into protobuf bytes.
#[must_use]
pub fn encode_frame(frame: &Frame) -> Vec<u8> {
    let wire = WireFrame {
        seq: frame.seq,
        ts: frame.ts,
        syscall: frame.syscall.clone(),
        data: Some(json_to_proto_value(&frame.data)),
    };

    let mut out = Vec::with_capacity(wire.encoded_len());
    // Encoding into a growable Vec cannot run out of space.
    wire.encode(&mut out).unwrap_or_default();
    out
}

/// Decode protobuf bytes into a frame.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes and
/// [`CodecError::EmptySyscall`] for frames that cannot be routed.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame, CodecError> {
    let wire = WireFrame::decode(bytes)?;
    if wire.syscall.is_empty() {
        return Err(CodecError::EmptySyscall { seq: wire.seq });
    }
    Ok(Frame {
        seq: wire.seq,
        ts: wire.ts,
        syscall: wire.syscall,
        data: wire
            .data
            .map_or(Value::Object(Map::new()), |v| proto_to_json_value(&v)),
    })
}

fn json_to_proto_value(value: &Value) -> prost_types::Value {
    let kind = match value {
        Value::Null => {
            prost_types::value::Kind::NullValue(prost_types::NullValue::NullValue as i32)
        }
        Value::Bool(v) => prost_types::value::Kind::BoolValue(*v),
        Value::Number(v) => prost_types::value::Kind::NumberValue(v.as_f64().unwrap_or(0.0)),
        Value::String(v) => prost_types::value::Kind::StringValue(v.clone()),
        Value::Array(v) => prost_types::value::Kind::ListValue(prost_types::ListValue {
            values: v.iter().map(json_to_proto_value).collect(),
        }),
        Value::Object(v) => prost_types::value::Kind::StructValue(prost_types::Struct {
            fields: v
                .iter()
                .map(|(k, v)| (k.clone(), json_to_proto_value(v)))
                .collect(),
        }),
    };

    prost_types::Value { kind: Some(kind) }
}

/// Numbers come back as integers when they are integral and in range, so
/// integer fields such as `pointerId` survive the round trip.
fn proto_to_json_value(value: &prost_types::Value) -> Value {
    let Some(kind) = &value.kind else {
        return Value::Null;
    };

    match kind {
        prost_types::value::Kind::NullValue(_) => Value::Null,
        prost_types::value::Kind::NumberValue(v) => number_to_json(*v),
        prost_types::value::Kind::StringValue(v) => Value::String(v.clone()),
        prost_types::value::Kind::BoolValue(v) => Value::Bool(*v),
        prost_types::value::Kind::StructValue(v) => Value::Object(
            v.fields
                .iter()
                .map(|(k, v)| (k.clone(), proto_to_json_value(v)))
                .collect(),
        ),
        prost_types::value::Kind::ListValue(v) => {
            Value::Array(v.values.iter().map(proto_to_json_value).collect())
        }
    }
}

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn number_to_json(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
        return Value::from(v as i64);
    }
    serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
}

#[derive(Clone, PartialEq, Message)]
struct WireFrame {
    #[prost(uint64, tag = "1")]
    seq: u64,
    #[prost(int64, tag = "2")]
    ts: i64,
    #[prost(string, tag = "3")]
    syscall: String,
    #[prost(message, optional, tag = "4")]
    data: Option<prost_types::Value>,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
