use super::*;

#[test]
fn mirror_tiling_ping_pongs() {
    assert_eq!(TileMode::Mirror.apply(1.25), 0.75);
    assert_eq!(TileMode::Mirror.apply(-0.25), 0.25);
    assert_eq!(TileMode::Repeat.apply(1.25), 0.25);
    assert_eq!(TileMode::Clamp.apply(1.25), 1.0);
}

#[test]
fn stops_interpolate_between_neighbours() {
    let stops = GradientStops::even(&[Color::BLACK, Color::WHITE]);
    let mid = stops.color_at(0.5);
    assert!((mid.r - 0.5).abs() < 1e-6);
    assert_eq!(stops.color_at(-1.0), Color::BLACK);
    assert_eq!(stops.color_at(2.0), Color::WHITE);
}

#[test]
fn stops_reject_unsorted_offsets() {
    let bad = vec![
        ColorStop {
            offset: 0.6,
            color: Color::BLACK,
        },
        ColorStop {
            offset: 0.2,
            color: Color::WHITE,
        },
    ];
    assert!(GradientStops::new(bad).is_err());
    assert!(GradientStops::new(Vec::new()).is_err());
}

#[test]
fn vertical_gradient_runs_top_to_bottom() {
    let fill = FillSource::vertical(Color::BLACK, Color::WHITE, 0.0, 10.0);
    let b = fill.render(1, 10);
    assert!(b.pixel(0, 0)[0] < 20);
    assert!(b.pixel(0, 9)[0] > 235);
}

#[test]
fn radial_gradient_reaches_outer_colour_at_radius() {
    let g = RadialGradient {
        center: Point::new(0.0, 0.0),
        radius: 10.0,
        stops: GradientStops::even(&[Color::WHITE, Color::BLACK]),
        tile: TileMode::Clamp,
    };
    assert_eq!(g.color_at(Point::new(0.0, 0.0)), Color::WHITE);
    assert_eq!(g.color_at(Point::new(20.0, 0.0)), Color::BLACK);
}

#[test]
fn pixel_source_is_top_left_aligned() {
    let src = Arc::new(PixelBuffer::filled(2, 2, Color::WHITE));
    let b = FillSource::Pixels(src).render(3, 3);
    assert_eq!(b.pixel(1, 1)[3], 255);
    assert_eq!(b.pixel(2, 2)[3], 0);
}
