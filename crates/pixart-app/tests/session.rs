//! Session integration tests
//!
//! Drives a session through host events against a real raster surface.

use std::io::Cursor;

use pixart_app::{
    Ignored, InputEvent, MemoryDownloads, MouseButton, Outcome, Session, SessionError,
    load_image_bytes,
};
use pixart_grid::{Color, GridModel, RasterImage, Size};
use pixart_render::{PixmapSurface, RenderError, Surface};

type TestSession = Session<PixmapSurface, MemoryDownloads>;

fn session(size: Size) -> TestSession {
    let model = GridModel::new(size).unwrap();
    let surface = PixmapSurface::new(size).unwrap();
    Session::new(model, surface, MemoryDownloads::new()).unwrap()
}

fn with_image(size: Size, image: RasterImage) -> TestSession {
    let mut s = session(size);
    let ticket = s.begin_image_load();
    s.handle(InputEvent::ImageDecoded { ticket, result: Ok(image) }).unwrap();
    s
}

fn pixel(s: &TestSession, x: u32, y: u32) -> Color {
    s.compositor().surface().sample_pixel(x, y).unwrap()
}

fn png_bytes(width: u32, height: u32, color: Color) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([color.r, color.g, color.b, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

// ============================================================================
// Image loading
// ============================================================================

#[test]
fn test_wide_image_fits_and_tiles() {
    let s = with_image(Size::new(600, 600), RasterImage::solid(1200, 600, Color::RED).unwrap());

    assert_eq!(s.model().surface_size(), Size::new(600, 300));
    assert_eq!(s.compositor().surface().size(), Size::new(600, 300));
    assert_eq!(s.model().cells().len(), 1800);
    assert_eq!(s.model().cell_size(), 10);
}

#[test]
fn test_decoded_bytes_clamp_cell_size() {
    let mut s = session(Size::new(600, 600));
    let ticket = s.begin_image_load();
    let result = smol::block_on(load_image_bytes(png_bytes(64, 32, Color::BLUE)));

    s.handle(InputEvent::ImageDecoded { ticket, result }).unwrap();

    // Range for 64x32 is [1, 3]
    assert_eq!(s.model().cell_size(), 3);
    assert_eq!(s.model().surface_size(), Size::new(63, 30));
    assert_eq!(s.controls().slider_max, 3);
}

#[test]
fn test_decode_failure_is_atomic() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(300, 200, Color::RED).unwrap());
    let before = s.model().clone();
    let pixels = s.compositor().surface().data().to_vec();

    let ticket = s.begin_image_load();
    let result = smol::block_on(load_image_bytes(b"definitely not a png".to_vec()));
    let err = s.handle(InputEvent::ImageDecoded { ticket, result }).unwrap_err();

    assert!(matches!(err, SessionError::Render(RenderError::DecodeFailure(_))));
    assert_eq!(s.model().surface_size(), before.surface_size());
    assert_eq!(s.model().cells(), before.cells());
    assert_eq!(s.model().background_image(), before.background_image());
    assert_eq!(s.compositor().surface().data(), &pixels[..]);
}

#[test]
fn test_superseded_load_is_dropped() {
    let mut s = session(Size::new(600, 600));
    let slow = s.begin_image_load();
    let fast = s.begin_image_load();

    s.handle(InputEvent::ImageDecoded { ticket: fast, result: Ok(RasterImage::solid(200, 100, Color::GREEN).unwrap()) })
        .unwrap();
    let outcome = s
        .handle(InputEvent::ImageDecoded { ticket: slow, result: Ok(RasterImage::solid(500, 500, Color::RED).unwrap()) })
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored(Ignored::SupersededLoad));
    assert_eq!(s.model().surface_size(), Size::new(200, 100));
}

// ============================================================================
// Size slider
// ============================================================================

#[test]
fn test_invalid_slider_values_change_nothing() {
    let mut s = session(Size::new(100, 100));
    let before = s.model().clone();
    let pixels = s.compositor().surface().data().to_vec();

    for cell_size in [0, 11] {
        let err = s.handle(InputEvent::SliderInput(cell_size)).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    assert_eq!(s.model().configuration(), before.configuration());
    assert_eq!(s.model().cells(), before.cells());
    assert_eq!(s.model().surface_size(), Size::new(100, 100));
    assert_eq!(s.compositor().surface().data(), &pixels[..]);
}

#[test]
fn test_slider_release_refits_to_image() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(1200, 600, Color::RED).unwrap());

    s.handle(InputEvent::SliderInput(7)).unwrap();
    s.handle(InputEvent::SliderRelease).unwrap();

    assert_eq!(s.model().cell_size(), 7);
    assert_eq!(s.model().surface_size(), Size::new(595, 294));
    assert_eq!(s.compositor().surface().size(), Size::new(595, 294));
    assert_eq!(s.model().cells().len(), 85 * 42);
}

#[test]
fn test_slider_discards_generated_fills() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::RED).unwrap());
    s.handle(InputEvent::GeneratePixelArt).unwrap();
    assert!(s.model().paint_fill_enabled());

    s.handle(InputEvent::SliderInput(5)).unwrap();
    assert!(!s.model().paint_fill_enabled());
    assert!(s.model().cells().iter().all(|c| c.fill.is_none()));
}

// ============================================================================
// Grid lines
// ============================================================================

#[test]
fn test_toggle_twice_restores_pixels() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::GREEN).unwrap());
    let original = s.compositor().surface().data().to_vec();

    s.handle(InputEvent::ToggleGridLines).unwrap();
    assert_eq!(s.controls().grid_toggle_label, "Grid Hidden");
    assert_ne!(s.compositor().surface().data(), &original[..]);

    s.handle(InputEvent::ToggleGridLines).unwrap();
    assert_eq!(s.controls().grid_toggle_label, "Grid Visible");
    assert_eq!(s.compositor().surface().data(), &original[..]);
}

#[test]
fn test_hidden_grid_shows_only_image() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::GREEN).unwrap());
    s.set_grid_lines_visible(false).unwrap();

    assert_eq!(pixel(&s, 10, 10), Color::GREEN);
    assert_eq!(pixel(&s, 50, 50), Color::GREEN);
}

// ============================================================================
// Generate
// ============================================================================

#[test]
fn test_generate_without_image_is_ignored() {
    let mut s = session(Size::new(100, 100));
    let outcome = s.handle(InputEvent::GeneratePixelArt).unwrap();
    assert_eq!(outcome, Outcome::Ignored(Ignored::NoActiveImage));
    assert!(!s.controls().generate_enabled);
}

#[test]
fn test_generate_fills_cells_and_restores_lines() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::BLUE).unwrap());

    s.handle(InputEvent::GeneratePixelArt).unwrap();

    assert!(s.model().grid_lines_visible());
    assert!(s.model().cells().iter().all(|c| c.fill == Some(Color::BLUE)));
    assert_eq!(pixel(&s, 15, 15), Color::BLUE);
}

#[test]
fn test_generate_matches_transparent_pixels_as_shown() {
    let clear = RasterImage::from_rgba(vec![0; 200 * 200 * 4], 200, 200).unwrap();
    let mut s = with_image(Size::new(600, 600), clear);
    s.set_grid_lines_visible(false).unwrap();
    let shown = pixel(&s, 15, 15);

    s.handle(InputEvent::GeneratePixelArt).unwrap();

    assert_eq!(shown, Color::WHITE);
    assert!(s.model().cells().iter().all(|c| c.fill == Some(shown)));
    assert_eq!(pixel(&s, 15, 15), shown);
}

#[test]
fn test_fill_rendering_can_be_switched() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::BLUE).unwrap());
    s.handle(InputEvent::ColorPicked(Color::RED)).unwrap();
    s.handle(InputEvent::click(15.0, 15.0)).unwrap();
    assert_eq!(pixel(&s, 15, 15), Color::RED);

    s.set_paint_fill_enabled(false).unwrap();
    assert_eq!(pixel(&s, 15, 15), Color::BLUE);
    assert!(s.model().cells().iter().any(|c| c.fill == Some(Color::RED)));

    s.set_paint_fill_enabled(true).unwrap();
    assert_eq!(pixel(&s, 15, 15), Color::RED);
}

// ============================================================================
// Click to paint
// ============================================================================

#[test]
fn test_click_without_image_is_noop() {
    let mut s = session(Size::new(100, 100));
    s.handle(InputEvent::ColorPicked(Color::RED)).unwrap();
    let pixels = s.compositor().surface().data().to_vec();

    assert!(s.model().hit_test(15.0, 15.0).is_some());
    let outcome = s.handle(InputEvent::click(15.0, 15.0)).unwrap();

    assert_eq!(outcome, Outcome::Ignored(Ignored::NoActiveImage));
    assert!(s.model().cells().iter().all(|c| c.fill.is_none()));
    assert_eq!(s.compositor().surface().data(), &pixels[..]);
}

#[test]
fn test_click_gates() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::WHITE).unwrap());

    assert_eq!(
        s.handle(InputEvent::click(15.0, 15.0)).unwrap(),
        Outcome::Ignored(Ignored::NoColorSelected)
    );

    s.handle(InputEvent::color_picked("#00ff00").unwrap()).unwrap();
    let secondary = InputEvent::Click { x: 15.0, y: 15.0, button: MouseButton::Secondary };
    assert_eq!(s.handle(secondary).unwrap(), Outcome::Ignored(Ignored::NonPrimaryButton));
    assert_eq!(
        s.handle(InputEvent::click(10.0, 15.0)).unwrap(),
        Outcome::Ignored(Ignored::NoCellHit)
    );
    assert!(s.model().cells().iter().all(|c| c.fill.is_none()));
}

#[test]
fn test_click_paints_one_cell() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::WHITE).unwrap());
    s.handle(InputEvent::color_picked("rgb(255, 0, 0)").unwrap()).unwrap();

    let Outcome::Painted(id) = s.handle(InputEvent::click(15.0, 15.0)).unwrap() else {
        panic!("expected a painted cell");
    };

    let cell = s.model().cell(id).unwrap();
    assert_eq!((cell.x(), cell.y()), (10, 10));
    assert_eq!(cell.fill, Some(Color::RED));
    assert_eq!(s.model().cells().iter().filter(|c| c.fill.is_some()).count(), 1);
    assert!(s.model().grid_lines_visible());
    assert_eq!(pixel(&s, 15, 15), Color::RED);
    assert_eq!(pixel(&s, 25, 25), Color::WHITE);
}

#[test]
fn test_paint_after_generate_overrides_sample() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::BLUE).unwrap());
    s.handle(InputEvent::GeneratePixelArt).unwrap();
    s.handle(InputEvent::ColorPicked(Color::RED)).unwrap();

    s.handle(InputEvent::click(55.0, 5.0)).unwrap();

    assert_eq!(pixel(&s, 55, 5), Color::RED);
    assert_eq!(pixel(&s, 45, 5), Color::BLUE);
}

// ============================================================================
// Clear and save
// ============================================================================

#[test]
fn test_clear_image() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(100, 100, Color::BLUE).unwrap());
    s.handle(InputEvent::GeneratePixelArt).unwrap();

    s.handle(InputEvent::ClearImage).unwrap();

    let controls = s.controls();
    assert!(!controls.generate_enabled);
    assert!(!controls.clear_enabled);
    assert!(!s.model().has_background_image());
    assert!(s.model().cells().iter().all(|c| c.fill.is_none()));
    assert_eq!(pixel(&s, 15, 15), Color::WHITE);
}

#[test]
fn test_save_delivers_png() {
    let mut s = with_image(Size::new(600, 600), RasterImage::solid(300, 150, Color::RED).unwrap());

    let outcome = s.handle(InputEvent::SaveImage).unwrap();

    let (filename, bytes) = s.downloads().last().unwrap();
    assert_eq!(filename, "pixel-art.png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(outcome, Outcome::Exported { filename: filename.clone(), bytes: bytes.len() });

    let decoded = image::load_from_memory(bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (300, 150));
}

#[test]
fn test_controls_follow_model() {
    let mut s = session(Size::new(200, 100));
    let controls = s.controls();
    assert_eq!((controls.slider_min, controls.slider_max, controls.slider_value), (1, 10, 10));
    assert_eq!(controls.selected_color, None);

    s.handle(InputEvent::ColorPicked(Color::BLUE)).unwrap();
    s.handle(InputEvent::SliderInput(4)).unwrap();

    let controls = s.controls();
    assert_eq!(controls.slider_value, 4);
    assert_eq!(controls.selected_color, Some(Color::BLUE));
}
