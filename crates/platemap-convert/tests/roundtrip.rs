//! Round-trip properties of the position codec.

use proptest::prelude::*;

use platemap_convert::{convert, parse_position, render_position};
use platemap_model::{CellValue, PlateSize, PositionFormat};

fn any_size() -> impl Strategy<Value = PlateSize> {
    prop::sample::select(PlateSize::ALL.to_vec())
}

fn any_format() -> impl Strategy<Value = PositionFormat> {
    prop::sample::select(vec![
        PositionFormat::LetterNumber,
        PositionFormat::Sequential,
        PositionFormat::RowColumn,
    ])
}

fn any_well() -> impl Strategy<Value = (PlateSize, u32)> {
    any_size().prop_flat_map(|size| (Just(size), 1..=size.wells()))
}

proptest! {
    /// convert(convert(v, A, B), B, A) == v for every valid well and
    /// notation pair, on every supported plate size.
    #[test]
    fn conversion_round_trips((size, index) in any_well(), from in any_format(), to in any_format()) {
        let geometry = size.geometry();
        let coord = parse_position(
            &CellValue::Number(f64::from(index)),
            PositionFormat::Sequential,
            geometry,
        )
        .expect("index within plate");
        let original = render_position(coord, from, geometry).expect("render source notation");

        let there = convert(&original, from, to, geometry).expect("forward conversion");
        let back = convert(&there, to, from, geometry).expect("reverse conversion");
        prop_assert_eq!(back, original);
    }

    /// Identity conversion never alters the value.
    #[test]
    fn identity_conversion_is_a_no_op((size, index) in any_well(), format in any_format()) {
        let geometry = size.geometry();
        let coord = parse_position(
            &CellValue::Number(f64::from(index)),
            PositionFormat::Sequential,
            geometry,
        )
        .expect("index within plate");
        let value = render_position(coord, format, geometry).expect("render notation");
        prop_assert_eq!(convert(&value, format, format, geometry).expect("identity"), value);
    }

    /// Parsing then rendering in the same notation reproduces the
    /// canonical serialization.
    #[test]
    fn parse_render_is_stable((size, index) in any_well(), format in any_format()) {
        let geometry = size.geometry();
        let coord = parse_position(
            &CellValue::Number(f64::from(index)),
            PositionFormat::Sequential,
            geometry,
        )
        .expect("index within plate");
        let rendered = render_position(coord, format, geometry).expect("render notation");
        let reparsed = parse_position(&rendered, format, geometry).expect("reparse");
        prop_assert_eq!(reparsed, coord);
    }
}
