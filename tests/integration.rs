use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use reference_maps::{loader, Error, MapKind, StudioSession};

/// Encode a synthetic image as PNG bytes, the form an upload arrives in.
fn png_fixture(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// Black background with a white block filling the center 50%.
fn white_on_black(width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    for y in height / 4..height * 3 / 4 {
        for x in width / 4..width * 3 / 4 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    img
}

#[test]
fn upload_downsamples_and_generates_all_three_maps() {
    let mut session = StudioSession::new();
    let src = RgbaImage::from_pixel(600, 400, Rgba([128, 128, 128, 255]));
    session.set_source(png_fixture(&src)).unwrap();

    assert!(session.has_source());
    for kind in MapKind::ALL {
        let map = session.map(kind).unwrap();
        assert_eq!((map.width(), map.height()), (300, 200));
    }
}

#[test]
fn small_sources_keep_their_resolution() {
    let mut session = StudioSession::new();
    let src = RgbaImage::from_pixel(120, 90, Rgba([50, 60, 70, 255]));
    session.set_source(png_fixture(&src)).unwrap();

    let map = session.map(MapKind::Mask).unwrap();
    assert_eq!((map.width(), map.height()), (120, 90));
}

#[test]
fn every_map_is_fully_opaque() {
    let mut session = StudioSession::new();
    session
        .set_source(png_fixture(&white_on_black(200, 150)))
        .unwrap();

    for kind in MapKind::ALL {
        let map = session.map(kind).unwrap();
        for px in map.image().pixels() {
            assert_eq!(px[3], 255, "{kind} map must have alpha 255 everywhere");
        }
    }
}

#[test]
fn uniform_gray_source_masks_to_itself() {
    let mut session = StudioSession::new();
    let src = RgbaImage::from_pixel(80, 80, Rgba([128, 128, 128, 255]));
    session.set_source(png_fixture(&src)).unwrap();

    // Zero distance everywhere: the mask is the working buffer unchanged.
    let mask = session.map(MapKind::Mask).unwrap();
    assert_eq!(mask.image().as_raw(), src.as_raw());
}

#[test]
fn white_subject_on_black_background_masks_cleanly() {
    let mut session = StudioSession::new();
    let src = white_on_black(100, 100);
    session.set_source(png_fixture(&src)).unwrap();

    let mask = session.map(MapKind::Mask).unwrap().image().clone();
    for (x, y, px) in src.enumerate_pixels() {
        let expected = if px[0] == 255 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        };
        assert_eq!(*mask.get_pixel(x, y), expected, "mismatch at ({x},{y})");
    }
}

#[test]
fn regenerating_one_kind_leaves_the_others_byte_identical() {
    let mut session = StudioSession::new();
    session
        .set_source(png_fixture(&white_on_black(150, 100)))
        .unwrap();

    let depth_before = session.map(MapKind::Depth).unwrap().image().clone();
    let mask_before = session.map(MapKind::Mask).unwrap().image().clone();

    session.regenerate(MapKind::Noise).unwrap();

    let depth_after = session.map(MapKind::Depth).unwrap().image();
    let mask_after = session.map(MapKind::Mask).unwrap().image();
    assert_eq!(depth_before.as_raw(), depth_after.as_raw());
    assert_eq!(mask_before.as_raw(), mask_after.as_raw());
}

#[test]
fn regenerated_grain_differs_between_runs() {
    let mut session = StudioSession::new();
    session
        .set_source(png_fixture(&RgbaImage::from_pixel(
            200,
            200,
            Rgba([128, 128, 128, 255]),
        )))
        .unwrap();

    let first = session.map(MapKind::Noise).unwrap().image().clone();
    session.regenerate(MapKind::Noise).unwrap();
    let second = session.map(MapKind::Noise).unwrap().image();

    // 40k pixels of independent jitter: a collision would be astronomical.
    assert_ne!(first.as_raw(), second.as_raw());
}

#[test]
fn deterministic_kinds_regenerate_identically() {
    let mut session = StudioSession::new();
    session
        .set_source(png_fixture(&white_on_black(120, 120)))
        .unwrap();

    let before = session.map(MapKind::Mask).unwrap().image().clone();
    session.regenerate(MapKind::Mask).unwrap();
    let after = session.map(MapKind::Mask).unwrap().image();
    assert_eq!(before.as_raw(), after.as_raw());
}

#[test]
fn failed_upload_leaves_existing_maps_untouched() {
    let mut session = StudioSession::new();
    session
        .set_source(png_fixture(&white_on_black(90, 90)))
        .unwrap();
    let depth_before = session.map(MapKind::Depth).unwrap().image().clone();

    let err = session.set_source(b"not an image".to_vec()).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));

    assert!(session.has_source());
    let depth_after = session.map(MapKind::Depth).unwrap().image();
    assert_eq!(depth_before.as_raw(), depth_after.as_raw());
}

#[test]
fn clearing_the_source_discards_the_map_set() {
    let mut session = StudioSession::new();
    session
        .set_source(png_fixture(&white_on_black(90, 90)))
        .unwrap();
    session.toggle_active(MapKind::Depth);

    session.clear_source();
    assert!(!session.has_source());
    assert!(session.maps().is_none());

    // Flags are preferences, not derived state.
    assert!(!session.is_active(MapKind::Depth));
    assert!(session.is_active(MapKind::Mask));

    let err = session.regenerate(MapKind::Depth).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingSource {
            kind: MapKind::Depth
        }
    ));
}

#[test]
fn artifacts_encode_as_png_data_urls() {
    let mut session = StudioSession::new();
    session
        .set_source(png_fixture(&white_on_black(64, 48)))
        .unwrap();

    let artifact = session.map(MapKind::Depth).unwrap();
    let url = artifact.data_url().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));

    // The embedded PNG must decode back to the artifact's dimensions.
    let png = artifact.encode_png().unwrap();
    let decoded = loader::load_working_buffer(&png).unwrap();
    assert_eq!(decoded.dimensions(), (64, 48));
}

#[test]
fn working_buffer_preserves_aspect_within_rounding() {
    for (w, h) in [(600_u32, 400_u32), (333, 500), (1920, 1080), (257, 257)] {
        let (tw, th) = loader::fit_within(w, h, loader::MAX_SIZE);
        assert!(tw.max(th) <= 300);
        assert_eq!(tw.max(th), 300.min(w.max(h)));

        let src_ratio = f64::from(w) / f64::from(h);
        let out_ratio = f64::from(tw) / f64::from(th);
        // Within one pixel of rounding tolerance on the scaled axis.
        let tolerance = src_ratio / f64::from(th.min(tw));
        assert!(
            (src_ratio - out_ratio).abs() <= tolerance,
            "{w}x{h} -> {tw}x{th} distorts aspect"
        );
    }
}
