use super::*;
use serde_json::json;

#[test]
fn parses_long_and_short_hex() {
    assert_eq!(
        "#FFB6C1".parse::<BackgroundColor>().unwrap(),
        BackgroundColor::rgb(0xFF, 0xB6, 0xC1)
    );
    assert_eq!(
        "ffb6c1".parse::<BackgroundColor>().unwrap(),
        BackgroundColor::rgb(0xFF, 0xB6, 0xC1)
    );
    assert_eq!(
        "#0f8".parse::<BackgroundColor>().unwrap(),
        BackgroundColor::rgb(0x00, 0xFF, 0x88)
    );
}

#[test]
fn rejects_malformed_hex() {
    assert!("#12345".parse::<BackgroundColor>().is_err());
    assert!("#GGGGGG".parse::<BackgroundColor>().is_err());
    assert!("".parse::<BackgroundColor>().is_err());
    assert!("#ééé".parse::<BackgroundColor>().is_err());
}

#[test]
fn serde_uses_hex_strings() {
    let c: BackgroundColor = serde_json::from_value(json!("#ffffff")).unwrap();
    assert_eq!(c, BackgroundColor::WHITE);
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#FFFFFF"));
    assert!(serde_json::from_value::<BackgroundColor>(json!("nope")).is_err());
}
