use wellcheck_instruments::instruments::self_compassion::TableRevision;
use wellcheck_instruments::scoring::Responses;
use wellcheck_instruments::{all_instruments, get_instrument};

#[test]
fn registry_lists_both_instruments() {
    let ids: Vec<String> = all_instruments(TableRevision::Original)
        .iter()
        .map(|i| i.id().to_string())
        .collect();
    assert_eq!(ids, vec!["self_compassion", "dass21"]);
}

#[test]
fn lookup_accepts_legacy_ids() {
    let instrument = get_instrument("dass-21", TableRevision::Original).unwrap();
    assert_eq!(instrument.name(), "DASS-21");
    assert!(get_instrument("phq9", TableRevision::Original).is_none());
}

#[test]
fn question_metadata_exposes_reversed_and_unscored_items() {
    let instrument = get_instrument("self_compassion", TableRevision::Original).unwrap();
    let questions = instrument.questions();
    assert_eq!(questions.len(), 26);
    assert_eq!(questions[0].subscale_id, None);
    assert_eq!(questions[2].subscale_id.as_deref(), Some("self_judgment"));
    assert!(questions[2].reversed);
    assert_eq!(questions.iter().filter(|q| q.reversed).count(), 10);

    let revised = get_instrument("self_compassion", TableRevision::Revised).unwrap();
    assert_eq!(revised.questions()[0].subscale_id.as_deref(), Some("self_kindness"));
}

#[test]
fn scale_labels_cover_every_value() {
    for instrument in all_instruments(TableRevision::Original) {
        let scale = instrument.scale();
        for value in scale.min..=scale.max {
            assert!(scale.label(value).is_some(), "{} {value}", instrument.id());
        }
        assert_eq!(scale.labels.len(), usize::from(scale.max - scale.min + 1));
    }
    let dass = get_instrument("dass21", TableRevision::Original).unwrap();
    assert_eq!(dass.scale().label(0), Some("No me ha pasado nada de esto"));
}

#[test]
fn validate_answers_reports_each_bad_entry() {
    let dass = get_instrument("dass21", TableRevision::Original).unwrap();
    let answers = Responses::from([(1, 2), (2, 7), (40, 1)]);

    let errors = dass.validate_answers(&answers);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].question_id, 2);
    assert!(errors[0].message.contains("outside [0, 3]"));
    assert_eq!(errors[1].question_id, 40);
    assert!(errors[1].message.contains("no question 40"));
}

#[test]
fn structured_input_lists_every_band() {
    let dass = get_instrument("dass21", TableRevision::Original).unwrap();
    let answers: Responses = (1..=21).map(|id| (id, 1)).collect();
    let evaluation = dass.evaluate(&answers).unwrap();

    let text = dass.to_structured_input(&evaluation);
    assert!(text.starts_with("## DASS-21\n\n"));
    assert!(text.contains("- Depression: 14 (Moderate), lower is better\n"));
    assert!(text.contains("- Anxiety: 16 (Severe), lower is better\n"));
    assert!(text.contains("- Stress: 12 (Normal), lower is better\n"));
}

#[test]
fn self_compassion_structured_input_leads_with_composite() {
    let scs = get_instrument("self_compassion", TableRevision::Original).unwrap();
    let answers: Responses = (1..=26).map(|id| (id, 3)).collect();
    let evaluation = scs.evaluate(&answers).unwrap();

    let text = scs.to_structured_input(&evaluation);
    let first_line = text.lines().nth(2).unwrap();
    assert_eq!(first_line, "- Self-Compassion: 3 (Moderate)");
    assert!(text.contains("- Isolation: 3 (Moderate), lower is better"));
}

#[test]
fn evaluation_is_tagged_by_instrument() {
    let dass = get_instrument("dass21", TableRevision::Original).unwrap();
    let answers: Responses = (1..=21).map(|id| (id, 0)).collect();
    let json = serde_json::to_value(dass.evaluate(&answers).unwrap()).unwrap();
    assert_eq!(json["instrument"], "dass21");
    assert_eq!(json["depression"]["score"], 0);
    assert_eq!(json["depression"]["severity"], "normal");
}

#[test]
fn elevated_dass_results_carry_a_referral_line() {
    let dass = get_instrument("dass21", TableRevision::Original).unwrap();

    let elevated = dass.evaluate(&(1..=21).map(|id| (id, 1)).collect()).unwrap();
    assert!(elevated.suggests_referral());
    assert!(dass
        .to_structured_input(&elevated)
        .contains("Professional support is recommended."));

    let normal = dass.evaluate(&(1..=21).map(|id| (id, 0)).collect()).unwrap();
    assert!(!normal.suggests_referral());
    assert!(!dass
        .to_structured_input(&normal)
        .contains("Professional support"));
}

#[test]
fn self_compassion_never_suggests_referral() {
    let scs = get_instrument("self_compassion", TableRevision::Original).unwrap();
    let evaluation = scs.evaluate(&(1..=26).map(|id| (id, 1)).collect()).unwrap();
    assert!(!evaluation.suggests_referral());
}
