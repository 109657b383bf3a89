use super::*;

fn sample_frame() -> Frame {
    Frame {
        seq: 42,
        ts: 1_700_000_000_000,
        syscall: "engine:execute".to_owned(),
        data: serde_json::json!({
            "type": "startStroke",
            "id": "s1",
            "x": 1.25,
            "size": 4,
            "tags": ["a", "b"],
            "nested": {"k": "v"},
            "nil": null,
            "flag": true
        }),
    }
}

#[test]
fn encode_decode_round_trip_preserves_frame() {
    let frame = sample_frame();
    let bytes = encode_frame(&frame);
    let decoded = decode_frame(&bytes).expect("decode should succeed");
    assert_eq!(decoded, frame);
}

#[test]
fn encode_frame_outputs_non_empty_binary() {
    assert!(!encode_frame(&sample_frame()).is_empty());
}

#[test]
fn integral_numbers_decode_as_integers() {
    let frame = Frame::new(1, "engine:pointer", serde_json::json!({"pointerId": 7, "x": -3}));
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert!(decoded.data["pointerId"].is_i64());
    assert_eq!(decoded.data["pointerId"], 7);
    assert_eq!(decoded.data["x"], -3);
}

#[test]
fn fractional_numbers_stay_floats() {
    let frame = Frame::new(1, "engine:pointer", serde_json::json!({"x": 0.5}));
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.data["x"].as_f64(), Some(0.5));
    assert!(!decoded.data["x"].is_i64());
}

#[test]
fn float_fields_written_as_whole_numbers_still_read_as_f64() {
    let frame = Frame::new(1, "scene:state", serde_json::json!({"width": 50.0}));
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.data["width"].as_f64(), Some(50.0));
}

#[test]
fn decode_rejects_garbage_bytes() {
    let err = decode_frame(&[0xff, 0xff, 0xff]).expect_err("garbage should not decode");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_rejects_empty_syscall() {
    let frame = Frame::new(9, "", serde_json::json!({}));
    let err = decode_frame(&encode_frame(&frame)).expect_err("empty syscall");
    assert!(matches!(err, CodecError::EmptySyscall { seq: 9 }));
}

#[test]
fn new_stamps_current_time() {
    let frame = Frame::new(0, "engine:ready", serde_json::json!({}));
    assert!(frame.ts > 0);
}

#[test]
fn decoded_copy_is_independent_of_source() {
    let mut frame = sample_frame();
    let bytes = encode_frame(&frame);
    frame.data["id"] = serde_json::json!("mutated");
    let decoded = decode_frame(&bytes).expect("decode");
    assert_eq!(decoded.data["id"], "s1");
}
