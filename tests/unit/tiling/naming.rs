use super::*;

#[test]
fn suffix_puts_rows_first() {
    let grid = TileGrid::new(3, 2).unwrap();
    assert_eq!(region_suffix(3, 1, grid), "_region_1x3_2x3");
}

#[test]
fn parses_still_and_animation_names() {
    let still = TileImageName::parse("car_region_2x1_2x3.png").unwrap();
    assert_eq!(still.prefix, "car");
    assert_eq!((still.tile_number_x, still.tile_number_y), (1, 2));
    assert_eq!(still.grid, TileGrid::new(3, 2).unwrap());
    assert_eq!(still.frame, None);
    assert_eq!(still.extension, "png");

    let anim = TileImageName::parse("shot-a_region_1x1_1x2-00012.exr").unwrap();
    assert_eq!(anim.prefix, "shot-a");
    assert_eq!(anim.frame, Some(12));
    assert_eq!(anim.to_string(), "shot-a_region_1x1_1x2-00012.exr");
}

#[test]
fn rejects_non_tile_names() {
    for name in [
        "car.png",
        "car_region_.png",
        "car_region_1x1.png",
        "car_region_3x1_2x2.png",
        "car_region_0x1_2x2.png",
        "car_region_1x1_0x2.png",
        "noext_region_1x1_1x1",
    ] {
        assert!(TileImageName::parse(name).is_none(), "accepted {name}");
    }
}
