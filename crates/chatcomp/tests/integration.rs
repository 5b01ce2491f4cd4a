use chatcomp::{
    render, render_json, Component, RenderError, Renderer, StyleTransform, TermWriter,
    Translations,
};

fn lang() -> Translations {
    [
        ("chat.type.text", "<%s> %s"),
        ("chat.type.announcement", "[%s] %s"),
        ("multiplayer.player.joined", "%s joined the game"),
        ("commands.give.success", "Gave %2$s %1$s"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_player_chat_message() {
    let json = r#"{
        "translate": "chat.type.text",
        "with": [
            {"color": "yellow", "text": "Alex"},
            "anyone up for mining?"
        ]
    }"#;

    let translations = lang();
    let rendered = render_json(json, Some(&translations)).unwrap();
    assert_eq!(rendered.styled, "<$eAlex> anyone up for mining?");
    assert_eq!(rendered.plain, "<Alex> anyone up for mining?");
}

#[test]
fn test_join_message_with_extra() {
    let json = r#"{
        "color": "yellow",
        "translate": "multiplayer.player.joined",
        "with": ["Steve"],
        "extra": [{"color": "gray", "text": " (first time)"}]
    }"#;

    let translations = lang();
    let rendered = render_json(json, Some(&translations)).unwrap();
    assert_eq!(rendered.styled, "$eSteve joined the game$7 (first time)$r");
    assert_eq!(rendered.plain, "Steve joined the game (first time)");
}

#[test]
fn test_positional_arguments() {
    let translations = lang();
    let rendered = render_json(
        r#"{"translate": "commands.give.success", "with": [64, "Notch"]}"#,
        Some(&translations),
    )
    .unwrap();
    assert_eq!(rendered.plain, "Gave Notch 64");
}

#[test]
fn test_legacy_server_list_style() {
    // Arrays of plain and colored fragments, as sent in server descriptions.
    let json = r#"[
        {"text": "A ", "color": "gold"},
        {"text": "Minecraft", "color": "bold"},
        " Server"
    ]"#;
    let rendered = render_json(json, None).unwrap();
    assert_eq!(rendered.styled, "$6A $lMinecraft Server");
    assert_eq!(rendered.plain, "A Minecraft Server");
}

#[test]
fn test_missing_provider_degrades() {
    let rendered = render_json(
        r#"{"translate": "chat.type.text", "with": ["Alex", "hi"]}"#,
        None,
    )
    .unwrap();
    assert_eq!(rendered.plain, "Alex hi");
}

#[test]
fn test_unknown_color_in_extra_does_not_stop_rendering() {
    let rendered = render_json(
        r#"{"text": "a", "extra": [{"color": "chartreuse", "text": "b"}, {"color": "red", "text": "c"}]}"#,
        None,
    )
    .unwrap();
    assert_eq!(rendered.styled, "ab$r$cc$r");
}

#[test]
fn test_unsupported_shape_fails_whole_render() {
    let err = render_json(r#"{"text": "ok", "extra": ["fine", true]}"#, None).unwrap_err();
    match err {
        RenderError::Unsupported { path, found } => {
            assert_eq!(path, "/extra/1");
            assert_eq!(found, "boolean");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_invalid_json() {
    let err = render_json("{not json", None).unwrap_err();
    assert!(matches!(err, RenderError::Json(_)));
}

#[test]
fn test_depth_limit_from_json() {
    let json = format!("{}\"x\"{}", "[".repeat(20), "]".repeat(20));
    let component = Component::from_json_str(&json).unwrap();

    assert!(Renderer::new().render(&component).is_ok());
    let err = Renderer::new().max_depth(5).render(&component).unwrap_err();
    assert!(matches!(err, RenderError::DepthExceeded { limit: 5 }));
}

#[test]
fn test_closure_provider() {
    let component = Component::from_json_str(r#"{"translate": "k", "with": ["v"]}"#).unwrap();
    let upper = |key: &str| format!("{}=%s", key.to_uppercase());
    let rendered = render(&component, Some(&upper)).unwrap();
    assert_eq!(rendered.plain, "K=v");
}

#[test]
fn test_translations_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en_us.json");
    std::fs::write(&path, r#"{"death.attack.fall": "%s hit the ground too hard"}"#).unwrap();

    let translations = Translations::from_path(&path).unwrap();
    let rendered = render_json(
        r#"{"translate": "death.attack.fall", "with": ["Steve"]}"#,
        Some(&translations),
    )
    .unwrap();
    assert_eq!(rendered.plain, "Steve hit the ground too hard");
}

#[test]
fn test_output_modes() {
    let rendered = render_json(r#"{"color": "dark_red", "text": "danger"}"#, None).unwrap();

    let keep = TermWriter::new(StyleTransform::Keep);
    assert_eq!(keep.write(&rendered), "$4danger");

    let remove = TermWriter::new(StyleTransform::Remove);
    assert_eq!(remove.write(&rendered), "danger");

    let apply = TermWriter::new(StyleTransform::Apply).force_styling(true);
    let output = apply.write(&rendered);
    assert!(output.contains("\x1b[31m"));
    assert!(output.contains("danger"));
    assert!(!output.contains("$4"));
}
