use storyfx::{PhraseContent, VfxStyle, parse_storyboard};

const DOC: &str = include_str!("data/storyboard.json");

#[test]
fn fixture_flattens_blocks_in_order() {
    let phrases = parse_storyboard(DOC).unwrap();
    let ids: Vec<&str> = phrases.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p_open", "p_drop", "p_swap", "middle_2", "p_end"]);
    for p in &phrases {
        p.validate().unwrap();
    }
}

#[test]
fn fixture_fields_map_with_defaults() {
    let phrases = parse_storyboard(DOC).unwrap();

    let open = &phrases[0];
    assert_eq!(open.font_size, 55.0);
    assert!((open.position.y - 80.0).abs() < 1e-9);
    assert_eq!(open.sfx_gain, Some(-6.0));
    assert_eq!(open.total_duration, 2.5);

    let drop = &phrases[1];
    assert_eq!(drop.vfx_style, VfxStyle::HeavyDrop);
    assert_eq!(drop.font_color, "#ffcc00");
    assert_eq!(drop.sfx_gain, Some(0.0));
    assert_eq!(drop.font_size, 19.0 * 2.5);

    let swap = &phrases[2];
    assert_eq!(swap.vfx_style, VfxStyle::WordSwapper);
    let bx = swap.box_vertices.unwrap();
    assert!((bx.width_pct() - 80.0).abs() < 1e-9);

    assert_eq!(
        phrases[3].content,
        PhraseContent::Sequence(vec!["step inside".into(), "stay a while".into()])
    );
    assert_eq!(phrases[4].vfx_style, VfxStyle::Fade);
}

#[test]
fn missing_timeline_is_a_storyboard_error() {
    let err = parse_storyboard(r#"{"blocks":[]}"#).unwrap_err();
    assert!(err.to_string().starts_with("storyboard error:"));
}
