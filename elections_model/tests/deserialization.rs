use elections_model::types::{Call, Chamber, Level, Party, RaceMeta, RawResult};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_result_with_text_flags() {
    let json = load_fixture("result.json");
    let result: RawResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result.id, "42-polid-1746-state-1");
    assert_eq!(result.statepostal, "PA");
    assert_eq!(result.level, Some(Level::State));
    assert_eq!(result.winner, Some(true));
    assert_eq!(result.incumbent, Some(false));
    assert_eq!(result.runoff, None);
    assert_eq!(result.electtotal, Some(20));
    assert_eq!(result.votepct, Some(0.4858));
    assert_eq!(
        result.electiondate,
        chrono::NaiveDate::from_ymd_opt(2016, 11, 8)
    );
    assert!(result.raw_winner());
    assert!(result.is_presidential());
    assert!(!result.is_chamber_race());
}

#[test]
fn deserialize_result_missing_fields_default() {
    let result: RawResult = serde_json::from_str(r#"{"id": "1", "statepostal": "AK"}"#).unwrap();
    assert_eq!(result.level, None);
    assert_eq!(result.effective_level(), Level::State);
    assert!(result.is_callable());
    assert!(!result.raw_winner());
}

#[test]
fn deserialize_result_rejects_bad_flag() {
    let err = serde_json::from_str::<RawResult>(r#"{"id": "1", "statepostal": "AK", "winner": "maybe"}"#);
    assert!(err.is_err());
}

#[test]
fn county_levels_are_uncallable() {
    assert!(!Level::County.is_callable());
    assert!(!Level::Township.is_callable());
    assert!(Level::District.is_callable());
    assert!(Level::National.is_callable());
    assert_eq!("township".parse::<Level>().unwrap(), Level::Township);
    assert!("precinct".parse::<Level>().is_err());
}

#[test]
fn call_serializes_camel_case_without_id() {
    let call = Call::new("abc").with_override_winner(true);
    let value = serde_json::to_value(&call).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"acceptAp": true, "overrideWinner": true})
    );
}

#[test]
fn meta_serializes_published_fields_only() {
    let meta = RaceMeta {
        result_id: "abc".to_string(),
        poll_closing: Some("8:00 PM".to_string()),
        first_results: Some("8:00 PM".to_string()),
        current_party: Some("GOP".to_string()),
        race_type: Some("open".to_string()),
        order: Some(3),
    };
    let value = serde_json::to_value(&meta).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "pollClosing": "8:00 PM",
            "firstResults": "8:00 PM",
            "currentParty": "GOP"
        })
    );
}

#[test]
fn party_codes_round_trip_through_from_str() {
    assert_eq!("GOP".parse::<Party>().unwrap(), Party::Gop);
    assert_eq!("BFA".parse::<Party>().unwrap(), Party::Bfa);
    assert!("Con".parse::<Party>().is_err());
    assert_eq!(Party::Grn.to_string(), "Grn");
}

#[test]
fn chamber_sizes() {
    assert_eq!(Chamber::Senate.total_seats(), 100);
    assert_eq!(Chamber::Senate.majority(), 51);
    assert_eq!(Chamber::House.total_seats(), 435);
    assert_eq!(Chamber::House.majority(), 218);
    assert_eq!("House".parse::<Chamber>().unwrap(), Chamber::House);
}
