use salary_dash::core::Viewport;
use salary_dash::render::{
    BRIGHTER_FACTOR, CategoryPalette, CirclePrimitive, Color, LinePrimitive, NullRenderer,
    PolylinePrimitive, RectPrimitive, RenderFrame, Renderer, SequentialPalette, SvgRenderer,
    TextHAlign, TextPrimitive,
};

fn sample_frame() -> RenderFrame {
    let mut frame = RenderFrame::new(Viewport::new(200, 100))
        .with_line(LinePrimitive::new(0.0, 90.0, 200.0, 90.0, 1.0, Color::BLACK))
        .with_rect(RectPrimitive::new(10.0, 10.0, 20.0, 40.0, Color::WHITE).with_key("EN-0"))
        .with_text(TextPrimitive::new(
            "R&D",
            100.0,
            20.0,
            12.0,
            Color::BLACK,
            TextHAlign::Center,
        ));
    frame.polylines.push(
        PolylinePrimitive::new(vec![(0.0, 0.0), (50.0, 50.0)], 1.0, Color::BLACK)
            .with_visibility(false)
            .with_key("record-0"),
    );
    frame
        .circles
        .push(CirclePrimitive::new(40.0, 40.0, 4.0, Color::WHITE).with_key("S-2021"));
    frame
}

#[test]
fn null_renderer_counts_visible_primitives() {
    let mut renderer = NullRenderer::default();
    renderer.render(&sample_frame()).expect("valid frame");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_circle_count, 1);
    assert_eq!(renderer.last_visible_polyline_count, 0);
}

#[test]
fn invalid_geometry_is_rejected_before_drawing() {
    let mut frame = sample_frame();
    frame.rects.push(RectPrimitive::new(0.0, 0.0, f64::NAN, 1.0, Color::BLACK));
    assert!(NullRenderer::default().render(&frame).is_err());

    let frame = RenderFrame::new(Viewport::new(0, 100));
    assert!(SvgRenderer::new().render(&frame).is_err());

    let mut frame = sample_frame();
    frame
        .polylines
        .push(PolylinePrimitive::new(vec![(0.0, f64::INFINITY)], 1.0, Color::BLACK));
    assert!(frame.validate().is_err());
}

#[test]
fn svg_document_keeps_keys_and_hides_filtered_lines() {
    let mut renderer = SvgRenderer::new();
    renderer.render(&sample_frame()).expect("svg");
    let svg = renderer.document();

    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100""#));
    assert!(svg.contains(r#"data-key="EN-0""#));
    assert!(svg.contains(r#"data-key="S-2021""#));
    assert!(svg.contains(r#"data-key="record-0" style="display:none""#));
    assert!(svg.contains("R&amp;D"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn gradient_rects_emit_defs() {
    let palette = SequentialPalette::viridis((0.0, 100.0)).expect("viridis");
    let frame = RenderFrame::new(Viewport::new(300, 50)).with_rect(
        RectPrimitive::new(50.0, 20.0, 200.0, 10.0, Color::WHITE)
            .with_gradient(palette.gradient_stops(10)),
    );
    let mut renderer = SvgRenderer::new();
    renderer.render(&frame).expect("svg");
    let svg = renderer.into_document();
    assert!(svg.contains("<defs>"));
    assert!(svg.contains(r#"fill="url(#gradient-0)""#));
    assert_eq!(svg.matches("<stop").count(), 11);
}

#[test]
fn brighter_scales_channels_and_saturates() {
    let color = Color::from_hex("#ff6361").expect("hex");
    let bright = color.brighter(0.5);
    let factor = BRIGHTER_FACTOR.powf(0.5);
    assert_eq!(bright.red, 1.0);
    assert!((bright.green - color.green * factor).abs() < 1e-12);
    assert_eq!(bright.alpha, color.alpha);
    assert_eq!(color.brighter(0.0), color);
}

#[test]
fn hex_colors_round_trip_and_reject_garbage() {
    let color = Color::from_hex("#58508d").expect("hex");
    assert_eq!(color.to_hex(), "#58508d");
    assert!(Color::from_hex("#zz0000").is_err());
    assert!(Color::from_hex("#5850").is_err());
}

#[test]
fn category_palette_falls_back_for_unknown_categories() {
    let sizes = CategoryPalette::company_sizes().expect("palette");
    assert_eq!(sizes.color("S"), Color::from_hex("#0000ff").expect("hex"));
    assert_eq!(sizes.color("XL"), sizes.fallback());
    assert!(!sizes.contains("XL"));
    let order: Vec<&str> = sizes.categories().collect();
    assert_eq!(order, vec!["S", "M", "L"]);
}

#[test]
fn viridis_covers_domain_and_grays_out_missing_values() {
    let palette = SequentialPalette::viridis((0.0, 100.0)).expect("viridis");
    assert_eq!(palette.color(0.0).to_hex(), "#440154");
    assert_eq!(palette.color(100.0).to_hex(), "#fde725");
    assert_eq!(palette.color(250.0), palette.color(100.0), "clamped");
    assert_eq!(palette.color(f64::NAN).to_hex(), "#808080");

    let flat = SequentialPalette::viridis((50.0, 50.0)).expect("viridis");
    assert_eq!(flat.color(50.0), flat.interpolate(0.5));
}
