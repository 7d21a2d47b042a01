//! Tests for the registration wizard session.

use spotlight_wizard::{
    Catalog, ContactInfo, EligibilityIssue, Field, GameId, GameRecord, GameStatus, GameType, RecordingHooks,
    Registration, RegistrationRules, Step, Wizard, WizardError, WorkflowRequest,
};

fn wizard() -> Wizard<RecordingHooks> {
    Wizard::new(Catalog::sample(), RegistrationRules::default(), RecordingHooks::new())
}

fn with_contact() -> Wizard<RecordingHooks> {
    let mut wizard = wizard();
    wizard
        .submit_contact_info(ContactInfo::new("13800000000", "abc"))
        .expect("valid contact");
    wizard
}

#[test]
fn test_tapplay_online_game_full_flow() {
    let mut wizard = wizard();
    assert_eq!(wizard.step(), Step::NeedsContactInfo);

    let contact = ContactInfo::new("13800000000", "abc");
    wizard.submit_contact_info(contact.clone()).expect("valid contact");
    assert_eq!(wizard.step(), Step::NeedsGameRegistration);
    assert_eq!(wizard.contact_info(), Some(&contact));

    wizard
        .register_game(Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"))
        .expect("valid registration");
    assert_eq!(wizard.step(), Step::Complete);

    let selected = wizard.selected_game().expect("selected game");
    assert_eq!(selected.id(), &GameId::from("game-1"));
    assert!(selected.is_registered());
    assert_eq!(selected.theme(), Some("重力"));
    assert_eq!(selected.description(), Some("一个关于重力玩法的创新设计"));
}

#[test]
fn test_other_type_game_is_rejected() {
    let mut wizard = with_contact();
    let game = wizard
        .games()
        .iter()
        .find(|g| g.game_type() == GameType::Other)
        .cloned()
        .expect("sample has an Other game");
    assert!(!game.is_eligible());
    assert_eq!(game.eligibility_issue(), Some(EligibilityIssue::NeedsIntegration));
    assert_eq!(
        game.eligibility_issue().map(|i| i.to_string()).as_deref(),
        Some("needs TapPlay or mini-game integration")
    );

    let before = wizard.state().clone();
    let result = wizard.register_game(Registration::new(game.id().clone(), "重力", "一个关于重力玩法的创新设计"));
    assert!(result.is_err());
    assert_eq!(wizard.state(), &before);
}

#[test]
fn test_phone_format() {
    let mut wizard = wizard();
    for bad in ["12345678901", "1380000000", "138000000000", "23800000000", "1380000000a", ""] {
        let err = wizard
            .submit_contact_info(ContactInfo::new(bad, "abc"))
            .expect_err("bad phone");
        assert!(err.field_errors().is_some_and(|e| e.contains(Field::Phone)), "{bad}");
        assert_eq!(wizard.step(), Step::NeedsContactInfo);
    }
    for good in ["13000000000", "19999999999", "15912345678"] {
        let mut wizard = self::wizard();
        assert!(wizard.submit_contact_info(ContactInfo::new(good, "abc")).is_ok(), "{good}");
    }
}

#[test]
fn test_contact_errors_are_collected() {
    let mut wizard = wizard();
    let err = wizard
        .submit_contact_info(ContactInfo::new("", ""))
        .expect_err("both empty");
    let errors = err.field_errors().expect("field errors");
    assert_eq!(errors.get(Field::Phone), Some("phone required"));
    assert_eq!(errors.get(Field::Wechat), Some("wechat required"));
}

#[test]
fn test_registration_is_noop_on_invalid_input() {
    let mut wizard = with_contact();
    wizard
        .register_game(Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"))
        .expect("first registration");
    wizard.change_game().expect("fold back");
    let before = wizard.state().clone();

    let cases = [
        Registration::new("game-2", "", "一个关于重力玩法的创新设计"),
        Registration::new("game-2", "重力", "太短了"),
        Registration::new("game-2", "not a theme", "一个关于重力玩法的创新设计"),
        Registration::new("game-1", "缝合", "stitched together again"),
        Registration::new("game-3", "重力", "一个关于重力玩法的创新设计"),
        Registration::new("game-4", "重力", "一个关于重力玩法的创新设计"),
        Registration::new("game-5", "重力", "一个关于重力玩法的创新设计"),
        Registration::new("missing", "重力", "一个关于重力玩法的创新设计"),
    ];
    for registration in cases {
        assert!(wizard.register_game(registration.clone()).is_err(), "{registration}");
        assert_eq!(wizard.state(), &before);
    }
}

#[test]
fn test_description_counts_characters_not_bytes() {
    let mut wizard = with_contact();
    // Ten CJK characters, thirty bytes.
    let ten_chars = "一二三四五六七八九十";
    assert!(wizard.check_registration(&Registration::new("game-1", "重力", &ten_chars[..27])).is_err());
    assert!(wizard.register_game(Registration::new("game-1", "重力", ten_chars)).is_ok());
}

#[test]
fn test_register_before_contact_is_wrong_step() {
    let mut wizard = wizard();
    let result = wizard.register_game(Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"));
    assert!(matches!(
        result,
        Err(WizardError::WrongStep {
            expected: Step::NeedsGameRegistration,
            actual: Step::NeedsContactInfo,
        })
    ));
}

#[test]
fn test_register_twice_without_change_is_wrong_step() {
    let mut wizard = with_contact();
    wizard
        .register_game(Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"))
        .expect("valid registration");
    let result = wizard.register_game(Registration::new("game-2", "盲盒", "every level is a surprise box"));
    assert!(matches!(result, Err(WizardError::WrongStep { actual: Step::Complete, .. })));
}

#[test]
fn test_change_game_folds_registration_back() {
    let mut wizard = with_contact();
    wizard
        .register_game(Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"))
        .expect("valid registration");
    wizard.change_game().expect("change game");

    assert_eq!(wizard.step(), Step::NeedsGameRegistration);
    assert!(wizard.selected_game().is_none());
    assert!(wizard.contact_info().is_some());

    let ids: Vec<_> = wizard.selectable_games().map(|g| g.id().as_str().to_string()).collect();
    assert_eq!(ids, ["game-2"]);
    let registered: Vec<_> = wizard.registered_games().map(GameRecord::id).cloned().collect();
    assert_eq!(registered, [GameId::from("game-1")]);

    let again = wizard.register_game(Registration::new("game-1", "缝合", "stitched together again"));
    let err = again.expect_err("already registered");
    assert_eq!(
        err.field_errors().and_then(|e| e.get(Field::Game)),
        Some("game already registered")
    );
}

#[test]
fn test_second_registration_after_continue() {
    let mut wizard = with_contact();
    wizard
        .register_game(Registration::new("game-1", "重力", "一个关于重力玩法的创新设计"))
        .expect("first registration");
    wizard.continue_with_another_game().expect("continue");
    wizard
        .register_game(Registration::new("game-2", "萌宠", "raise a pet that learns your tricks"))
        .expect("second registration");

    assert_eq!(wizard.step(), Step::Complete);
    assert_eq!(wizard.selected_game().and_then(GameRecord::theme), Some("萌宠"));
    assert_eq!(wizard.registered_games().count(), 1);
}

#[test]
fn test_change_game_from_every_state_with_contact() {
    let mut wizard = with_contact();
    wizard.change_game().expect("idempotent at game step");
    assert_eq!(wizard.step(), Step::NeedsGameRegistration);

    wizard
        .register_game(Registration::new("game-2", "盲盒", "every level is a surprise box"))
        .expect("valid registration");
    wizard.change_game().expect("from complete");
    assert_eq!(wizard.step(), Step::NeedsGameRegistration);
    assert!(wizard.selected_game().is_none());
}

#[test]
fn test_edit_contact_at_complete_keeps_selection() {
    let mut wizard = with_contact();
    wizard
        .register_game(Registration::new("game-2", "盲盒", "every level is a surprise box"))
        .expect("valid registration");
    let selected = wizard.selected_game().cloned();

    wizard
        .submit_contact_info(ContactInfo::new("13900000000", "new_wechat"))
        .expect("valid edit");
    assert_eq!(wizard.step(), Step::Complete);
    assert_eq!(wizard.selected_game().cloned(), selected);
    assert_eq!(wizard.contact_info().map(|c| c.wechat().as_str()), Some("new_wechat"));
}

#[test]
fn test_workflow_requests_reach_hooks() {
    let mut wizard = with_contact();
    let before = wizard.state().clone();
    wizard.request_create_game();
    wizard.request(WorkflowRequest::IntegrateGame);
    assert_eq!(
        wizard.hooks().requests(),
        [WorkflowRequest::CreateGame, WorkflowRequest::IntegrateGame]
    );
    assert_eq!(wizard.state(), &before);
}

#[test]
fn test_custom_rules_and_catalog() {
    let catalog = Catalog::new(vec![GameRecord::new(
        "solo",
        "Solo",
        GameType::MiniGame,
        GameStatus::Online,
    )])
    .expect("unique ids");
    let rules = RegistrationRules::new(["Space"], 3);
    let mut wizard = Wizard::new(catalog, rules, RecordingHooks::new());
    wizard
        .submit_contact_info(ContactInfo::new("13800000000", "abc"))
        .expect("valid contact");

    assert!(wizard.register_game(Registration::new("solo", "重力", "long enough")).is_err());
    assert!(wizard.register_game(Registration::new("solo", "Space", "abc")).is_ok());
}
