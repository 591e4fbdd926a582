use super::*;

#[test]
fn every_menu_id_maps_to_its_command() {
    let cases = [
        ("play-pause", ControlCmd::PlayPause),
        ("stop", ControlCmd::Stop),
        ("prev", ControlCmd::Prev),
        ("next", ControlCmd::Next),
        ("volume-up", ControlCmd::VolumeUp),
        ("volume-down", ControlCmd::VolumeDown),
        ("show", ControlCmd::Show),
        ("quit", ControlCmd::Quit),
    ];
    for (id, expected) in cases {
        assert_eq!(command_for_menu_id(id), Some(expected), "id {id}");
    }
}

#[test]
fn unknown_menu_ids_map_to_nothing() {
    assert_eq!(command_for_menu_id(""), None);
    assert_eq!(command_for_menu_id("shuffle"), None);
}

#[test]
fn icon_bitmap_has_expected_size_and_content() {
    let size = 64u32;
    let rgba = icon_rgba(size);
    assert_eq!(rgba.len(), (size * size * 4) as usize);

    let opaque = rgba.chunks_exact(4).filter(|px| px[3] == 0xff).count();
    let total = (size * size) as usize;
    // The glyph covers some of the icon but not all of it.
    assert!(opaque > total / 20);
    assert!(opaque < total / 2);
}

#[test]
fn icon_bitmap_scales_with_requested_size() {
    let rgba = icon_rgba(16);
    assert_eq!(rgba.len(), 16 * 16 * 4);
    assert!(rgba.chunks_exact(4).any(|px| px[3] == 0xff));
}
