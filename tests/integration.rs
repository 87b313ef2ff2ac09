// SPDX-License-Identifier: MPL-2.0
use image_rs::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use meme_studio::error::Error;
use meme_studio::media::annotate::{self, TextOverlaySpec};
use meme_studio::media::filter::{BlurRadius, FilterChain, FilterPercent};
use meme_studio::providers::aggregator::merge_outcomes;
use meme_studio::providers::{MemeRecord, Provider};
use meme_studio::storage::{KeyValueStore, ViewHistory, HISTORY_CAP};
use meme_studio::ui::export;
use tempfile::tempdir;

fn solid_image(width: u32, height: u32, pixel: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)))
}

#[test]
fn committed_filters_are_baked_into_pixels() {
    // Committing a filter chain leaves no live display effect: the output
    // of apply() fed back through an identity chain is byte-identical.
    let base = solid_image(16, 16, [120, 60, 30, 255]);
    let chain = FilterChain {
        brightness: FilterPercent::new(150),
        contrast: FilterPercent::new(80),
        saturation: FilterPercent::new(120),
        blur: BlurRadius::new(2),
    };

    let committed = chain.apply(&base);
    let redisplayed = FilterChain::default().apply(&committed);
    assert_eq!(
        committed.to_rgba8().as_raw(),
        redisplayed.to_rgba8().as_raw()
    );
}

#[test]
fn apply_text_outputs_source_resolution_for_any_preview_scale() {
    let base = solid_image(640, 480, [10, 20, 30, 255]);
    let overlay = TextOverlaySpec {
        content: "WHEN IT COMPILES\nON THE FIRST TRY".to_string(),
        ..TextOverlaySpec::default()
    };

    // Preview at 1/4 size: output still matches the natural resolution.
    let result = annotate::apply_text(&base, &overlay, &FilterChain::default(), (160.0, 120.0))
        .expect("apply_text should succeed");
    assert_eq!(result.dimensions(), (640, 480));
}

#[test]
fn half_width_display_maps_ten_to_twenty() {
    let scale = annotate::scale_factors((400, 300), (200.0, 150.0));
    let mapped = annotate::scale_position((10.0, 10.0), scale);
    assert!((mapped.0 - 20.0).abs() < 0.001);
    assert!((mapped.1 - 20.0).abs() < 0.001);
}

#[test]
fn whitespace_caption_leaves_image_unmodified() {
    let base = solid_image(32, 32, [1, 2, 3, 255]);
    let overlay = TextOverlaySpec {
        content: " \n\t ".to_string(),
        ..TextOverlaySpec::default()
    };

    let result = annotate::apply_text(&base, &overlay, &FilterChain::default(), (32.0, 32.0));
    assert!(matches!(result, Err(Error::Validation(_))));
    // The base itself was only borrowed; nothing could have mutated it.
    assert_eq!(base.to_rgba8().get_pixel(0, 0).0, [1, 2, 3, 255]);
}

#[test]
fn opening_150_images_keeps_exactly_100_newest_first() {
    let dir = tempdir().expect("create temp dir");
    let store = KeyValueStore::with_base_dir(dir.path().to_path_buf());
    let mut history = ViewHistory::default();

    for i in 0..150i64 {
        history.record_at(&store, &format!("https://example.com/{i}.png"), "meme", i);
    }

    assert_eq!(history.len(), HISTORY_CAP);
    let timestamps: Vec<i64> = history.entries().iter().map(|e| e.timestamp_ms).collect();
    let mut sorted = timestamps.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(timestamps, sorted, "entries must be newest first");
    assert_eq!(timestamps[0], 149);

    // And the bound survives a reload from disk.
    let reloaded = ViewHistory::load(&store);
    assert_eq!(reloaded.len(), HISTORY_CAP);
}

#[test]
fn aggregate_of_two_failures_and_two_successes_yields_twenty_records() {
    let ten = |provider: Provider| -> Vec<MemeRecord> {
        (0..10)
            .map(|n| MemeRecord {
                url: format!("https://example.com/{provider}/{n}.png"),
                title: format!("{n}"),
                provider,
            })
            .collect()
    };

    let merged = merge_outcomes(vec![
        (Provider::Imgflip, Ok(ten(Provider::Imgflip))),
        (Provider::Reddit, Err(Error::Network("down".to_string()))),
        (Provider::Tenor, Err(Error::Network("403".to_string()))),
        (Provider::Memegen, Ok(ten(Provider::Memegen))),
    ]);

    assert_eq!(merged.len(), 20);
}

#[test]
fn exported_png_round_trips_through_the_decoder() {
    let base = solid_image(24, 12, [200, 100, 50, 255]);
    let overlay = TextOverlaySpec {
        content: "ok".to_string(),
        ..TextOverlaySpec::default()
    };

    let flattened = annotate::apply_text(&base, &overlay, &FilterChain::default(), (24.0, 12.0))
        .expect("apply_text should succeed");
    let bytes = export::encode_png(&flattened).expect("encode");
    let decoded = image_rs::load_from_memory(&bytes).expect("decode");
    assert_eq!(decoded.dimensions(), (24, 12));
}

#[test]
fn kv_store_survives_corrupt_entries() {
    let dir = tempdir().expect("create temp dir");
    let store = KeyValueStore::with_base_dir(dir.path().to_path_buf());

    store.set("history", &vec!["ok".to_string()]);
    std::fs::write(
        dir.path().join("meme_studio_history.cbor"),
        b"garbage bytes",
    )
    .expect("corrupt the entry");

    let fallback: Vec<String> = store.get("history", Vec::new());
    assert!(fallback.is_empty(), "corrupt data must fail soft");
}
