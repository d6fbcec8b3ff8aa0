use custom_chrome::color::Color;
use custom_chrome::settings::ChromeSettings;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn save_then_load_keeps_every_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chrome.json");
    let settings = ChromeSettings {
        title_bar_height: 32,
        border_width: 0,
        title_bar_color: Color::rgb(0x12, 0x34, 0x56),
        fade_out_ms: 0,
        maximize_box: false,
        log_file: Some("chrome.log".into()),
        ..ChromeSettings::default()
    };
    settings.save(path.to_str().unwrap()).unwrap();

    let loaded = ChromeSettings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, settings);
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"#123456\""));
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chrome.json");
    std::fs::write(
        &path,
        r##"{ "title_bar_color": "#FFFFFF", "resizable": false, "fade_in_ms": 100 }"##,
    )
    .unwrap();

    let settings = ChromeSettings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings.title_bar_color, Color::WHITE);
    assert!(!settings.resizable);
    assert_eq!(settings.fade_in(), Duration::from_millis(100));
    assert_eq!(settings.fade_out(), Duration::from_millis(200));
    assert_eq!(settings.title_bar_height, 28);
    assert_eq!(settings.border_color, Color::DARK_SLATE_GRAY);
    assert!(settings.control_box);
}

#[test]
fn empty_or_missing_file_is_the_default() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "  \n").unwrap();
    assert_eq!(
        ChromeSettings::load(empty.to_str().unwrap()).unwrap(),
        ChromeSettings::default()
    );

    let missing = dir.path().join("missing.json");
    assert_eq!(
        ChromeSettings::load(missing.to_str().unwrap()).unwrap(),
        ChromeSettings::default()
    );
}

#[test]
fn bad_colors_are_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chrome.json");
    std::fs::write(&path, r#"{ "border_color": "teal" }"#).unwrap();
    let err = ChromeSettings::load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("invalid color"), "{err}");
}

#[test]
fn control_box_gates_every_button() {
    let settings = ChromeSettings {
        control_box: false,
        ..ChromeSettings::default()
    };
    assert!(!settings.shows_minimize());
    assert!(!settings.shows_maximize());
    assert!(!settings.shows_close());

    let settings = ChromeSettings {
        minimize_box: false,
        ..ChromeSettings::default()
    };
    assert!(!settings.shows_minimize());
    assert!(settings.shows_maximize());
    assert!(settings.shows_close());
}
