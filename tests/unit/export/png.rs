use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn encodes_a_png_with_straight_alpha() {
    let png = encode_png(&frame(vec![100, 50, 0, 128, 45, 212, 191, 255], true)).unwrap();
    assert_eq!(png[..8], PNG_SIGNATURE);

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [199, 100, 0, 128]);
    assert_eq!(decoded.get_pixel(1, 0).0, [45, 212, 191, 255]);
}

#[test]
fn straight_frames_are_written_as_is() {
    let png = encode_png(&frame(vec![100, 50, 0, 128, 0, 0, 0, 0], false)).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [100, 50, 0, 128]);
}

#[test]
fn short_buffers_are_rejected() {
    let err = encode_png(&frame(vec![0; 4], true)).unwrap_err();
    assert!(matches!(err, LoomError::Export(_)));
}
