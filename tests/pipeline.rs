use std::fs;

use hlsphere::{PlotPipeline, PointBudget};
use image::{Rgb, RgbImage};

fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

#[test]
fn solid_color_image_plots_every_grid_cell() {
    // 64×64 at the default budget samples at stride 1: 4096 points.
    let image = RgbImage::from_pixel(64, 64, Rgb([200, 40, 40]));
    let output = PlotPipeline::new()
        .export_image(false)
        .run(&image, "solid")
        .unwrap();
    assert_eq!(output.points, 64 * 64);
    assert_eq!(output.image, None);
    assert_eq!(output.video, None);
}

#[test]
fn all_white_image_plots_nothing() {
    let image = RgbImage::from_pixel(64, 64, Rgb([255, 255, 255]));
    let output = PlotPipeline::new()
        .export_image(false)
        .run(&image, "blank")
        .unwrap();
    assert_eq!(output.points, 0);
}

#[test]
fn tiny_image_still_runs() {
    let image = RgbImage::from_pixel(1, 1, Rgb([0, 128, 0]));
    let output = PlotPipeline::new()
        .export_image(false)
        .point_budget(PointBudget::from_clamped(1))
        .run(&image, "tiny")
        .unwrap();
    assert_eq!(output.points, 1);
}

#[test]
fn still_export_writes_a_decodable_png() {
    let dir = std::env::temp_dir().join(format!("hlsphere-it-still-{}", std::process::id()));
    let image = gradient_image(120, 80);

    let output = PlotPipeline::new()
        .resolution(320, 180)
        .output_dir(&dir)
        .run(&image, "shots/test run.png")
        .unwrap();

    let path = output.image.expect("still export requested");
    assert_eq!(
        path,
        dir.join("hlsphere_shots-test-run-png.png"),
        "description must be sanitized into the file name"
    );
    let exported = image::open(&path).unwrap().into_rgb8();
    assert_eq!(exported.dimensions(), (320, 180));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn frame_sequence_export_numbers_frames() {
    let dir = std::env::temp_dir().join(format!("hlsphere-it-frames-{}", std::process::id()));
    let image = gradient_image(32, 32);

    // Two azimuth steps per revolution: four frames, no muxing.
    let output = PlotPipeline::new()
        .resolution(64, 64)
        .export_image(false)
        .export_frames(true)
        .convert_to_video(false)
        .frame_count(2)
        .output_dir(&dir)
        .run(&image, "anim")
        .unwrap();

    assert_eq!(output.video, None);
    for index in 0..4 {
        let frame = dir.join(format!("hlsphere_anim_{index:05}.png"));
        assert!(frame.is_file(), "missing frame {}", frame.display());
    }
    assert!(!dir.join("hlsphere_anim_00004.png").exists());

    fs::remove_dir_all(dir).unwrap();
}
