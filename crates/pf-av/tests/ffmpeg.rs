//! Tests against the real ffmpeg/ffprobe binaries.
//!
//! Every test returns early when the tools are not on `PATH`. Fixtures are
//! synthesized in memory with the `image` crate.

use std::io::Cursor;
use std::process::Command;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat as Encoding, RgbImage};

use pf_av::{compress, convert_png_to_jpeg, probe_format, probe_size, resize, FfmpegTool};
use pf_core::{Dimensions, Error, ImageFormat};

fn tool() -> Option<FfmpegTool> {
    let tool = FfmpegTool::from_path();
    if tool.is_none() {
        eprintln!("ffmpeg/ffprobe not found on PATH; skipping");
    }
    tool
}

fn has_encoder(name: &str) -> bool {
    Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).contains(name))
        .unwrap_or(false)
}

/// A gradient with deterministic noise, so lossy encoders have work to do.
fn fixture(encoding: Encoding, width: u32, height: u32) -> Bytes {
    let mut seed: u32 = 0x1234_5678;
    let img = RgbImage::from_fn(width, height, |x, y| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let noise = (seed >> 24) as u8 / 4;
        image::Rgb([
            ((x * 255 / width) as u8).wrapping_add(noise),
            ((y * 255 / height) as u8).wrapping_add(noise),
            (((x + y) * 127 / (width + height)) as u8).wrapping_add(noise),
        ])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, encoding)
        .expect("failed to encode fixture");
    Bytes::from(buf.into_inner())
}

fn all_fixtures() -> Vec<(Bytes, ImageFormat)> {
    vec![
        (fixture(Encoding::Bmp, 120, 80), ImageFormat::Bmp),
        (fixture(Encoding::Jpeg, 120, 80), ImageFormat::Mjpeg),
        (fixture(Encoding::Png, 120, 80), ImageFormat::Png),
        (fixture(Encoding::WebP, 120, 80), ImageFormat::Webp),
    ]
}

#[tokio::test]
async fn probes_format_of_every_fixture() {
    let Some(tool) = tool() else { return };
    for (data, want) in all_fixtures() {
        let got = probe_format(&tool, data).await.unwrap();
        assert_eq!(got, want);
    }
}

#[tokio::test]
async fn probes_size() {
    let Some(tool) = tool() else { return };
    for (w, h) in [(100, 100), (100, 62), (62, 100)] {
        let data = fixture(Encoding::Png, w, h);
        let size = probe_size(&tool, data).await.unwrap();
        assert_eq!(size, Dimensions::new(w, h));
    }
}

#[tokio::test]
async fn probing_is_repeatable() {
    let Some(tool) = tool() else { return };
    let data = fixture(Encoding::Jpeg, 90, 45);

    let first = probe_format(&tool, data.clone()).await.unwrap();
    let second = probe_format(&tool, data.clone()).await.unwrap();
    assert_eq!(first, second);

    let first = probe_size(&tool, data.clone()).await.unwrap();
    let second = probe_size(&tool, data).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn garbage_is_a_probe_error() {
    let Some(tool) = tool() else { return };
    let err = probe_format(&tool, Bytes::from_static(b"definitely not an image"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Probe(_)), "{err}");
}

#[tokio::test]
async fn converts_png_to_jpeg_keeping_size() {
    let Some(tool) = tool() else { return };
    for (w, h) in [(100, 100), (100, 62), (62, 100)] {
        let out = convert_png_to_jpeg(&tool, fixture(Encoding::Png, w, h))
            .await
            .unwrap();
        assert_eq!(out.content_type(), "image/jpeg");
        assert_eq!(probe_format(&tool, out.data.clone()).await.unwrap(), ImageFormat::Mjpeg);
        assert_eq!(probe_size(&tool, out.data).await.unwrap(), Dimensions::new(w, h));
    }
}

#[tokio::test]
async fn convert_rejects_non_png() {
    let Some(tool) = tool() else { return };
    for (data, format) in all_fixtures() {
        if format == ImageFormat::Png {
            continue;
        }
        let err = convert_png_to_jpeg(&tool, data).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }), "{format}: {err}");
    }
}

#[tokio::test]
async fn resizes_to_exact_target_in_same_format() {
    let Some(tool) = tool() else { return };
    let webp_encoder = has_encoder("libwebp");

    for (data, format) in all_fixtures() {
        if format == ImageFormat::Webp && !webp_encoder {
            continue;
        }
        for target in [Dimensions::new(40, 70), Dimensions::new(70, 40)] {
            let out = resize(&tool, data.clone(), target).await.unwrap();
            assert_eq!(out.format, format);
            assert_eq!(probe_format(&tool, out.data.clone()).await.unwrap(), format);
            assert_eq!(probe_size(&tool, out.data).await.unwrap(), target);
        }
    }
}

/// Compress `data` at levels 1, 3 and 5, checking that format and size
/// survive and that every step produces strictly fewer bytes.
async fn assert_shrinks_as_level_rises(
    tool: &FfmpegTool,
    data: Bytes,
    format: ImageFormat,
    size: Dimensions,
) {
    let mut sizes = Vec::new();
    for level in [1, 3, 5] {
        let out = compress(tool, data.clone(), level).await.unwrap();
        assert_eq!(out.format, format);
        assert_eq!(out.content_type(), format.mime_type());
        assert_eq!(probe_format(tool, out.data.clone()).await.unwrap(), format);
        assert_eq!(probe_size(tool, out.data.clone()).await.unwrap(), size);
        sizes.push(out.data.len());
    }
    assert!(sizes[0] > sizes[1], "{format}: level 1 {} <= level 3 {}", sizes[0], sizes[1]);
    assert!(sizes[1] > sizes[2], "{format}: level 3 {} <= level 5 {}", sizes[1], sizes[2]);
}

#[tokio::test]
async fn jpeg_shrinks_as_level_rises() {
    let Some(tool) = tool() else { return };
    let data = fixture(Encoding::Jpeg, 256, 256);
    assert_shrinks_as_level_rises(&tool, data, ImageFormat::Mjpeg, Dimensions::new(256, 256)).await;
}

#[tokio::test]
async fn png_shrinks_as_level_rises() {
    let Some(tool) = tool() else { return };
    let data = fixture(Encoding::Png, 256, 192);
    assert_shrinks_as_level_rises(&tool, data, ImageFormat::Png, Dimensions::new(256, 192)).await;
}

#[tokio::test]
async fn webp_shrinks_as_level_rises() {
    let Some(tool) = tool() else { return };
    if !has_encoder("libwebp") {
        eprintln!("ffmpeg built without libwebp; skipping");
        return;
    }
    // Level 3 maps to compression_level 3.5, which ffmpeg rounds to method 4.
    let data = fixture(Encoding::WebP, 256, 192);
    assert_shrinks_as_level_rises(&tool, data, ImageFormat::Webp, Dimensions::new(256, 192)).await;
}

#[tokio::test]
async fn bitmap_cannot_be_compressed() {
    let Some(tool) = tool() else { return };
    let err = compress(&tool, fixture(Encoding::Bmp, 32, 32), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }), "{err}");
}
