//! Tests for the headless wizard run.

use spotlight_signup::{EligibilityReport, WalkRequest, walk};
use spotlight_wizard::{Catalog, Field, RegistrationRules, Step};

fn request(game: &str, theme: &str, description: &str) -> WalkRequest {
    WalkRequest::new(
        "13800000000".to_string(),
        "abc".to_string(),
        Some(game.to_string()),
        Some(theme.to_string()),
        Some(description.to_string()),
    )
}

#[test]
fn test_walk_registers_game() {
    let snapshot = walk(
        Catalog::sample(),
        RegistrationRules::default(),
        &request("game-1", "重力", "一个关于重力玩法的创新设计"),
    )
    .expect("valid run");

    assert_eq!(snapshot.step, Step::Complete);
    let json = serde_json::to_value(&snapshot).expect("serializable");
    assert_eq!(json["step"], "complete");
    assert_eq!(json["contactInfo"]["wechat"], "abc");
    assert_eq!(json["selectedGame"]["id"], "game-1");
    assert_eq!(json["selectedGame"]["theme"], "重力");
    assert_eq!(json["selectedGame"]["isRegistered"], true);
}

#[test]
fn test_walk_rejects_ineligible_game() {
    let err = walk(
        Catalog::sample(),
        RegistrationRules::default(),
        &request("game-3", "重力", "一个关于重力玩法的创新设计"),
    )
    .expect_err("ineligible");
    assert_eq!(
        err.field_errors().and_then(|e| e.get(Field::Game)),
        Some("game not eligible: needs TapPlay or mini-game integration")
    );
}

#[test]
fn test_walk_rejects_bad_contact_first() {
    let bad = WalkRequest::new("123".to_string(), String::new(), None, None, None);
    let err = walk(Catalog::sample(), RegistrationRules::default(), &bad).expect_err("bad contact");
    let errors = err.field_errors().expect("field errors");
    assert!(errors.contains(Field::Phone));
    assert!(errors.contains(Field::Wechat));
}

#[test]
fn test_report_matches_walk_outcomes() {
    let report = EligibilityReport::build(&Catalog::sample());
    for row in report.rows() {
        let result = walk(
            Catalog::sample(),
            RegistrationRules::default(),
            &request(row.game().id().as_str(), "萌宠", "a pet that grows with every level"),
        );
        assert_eq!(result.is_ok(), row.is_selectable(), "{}", row.game().id());
    }
}
