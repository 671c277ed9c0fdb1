//! End-to-end rule compilation and application scenarios

use soundlaw_core::{
    analyse, get_phonology, syllabify, to_digraphs, to_single, ApplyContext, ApplyOptions, Error,
    Mechanic, NotationError, Pipeline, Position, Rule, RuleSet, SpellingMode,
};
use std::sync::Arc;

const SYNCOPE: &str = "[{ptkpʰkʰbdgm}V₁{rl}V́₁-] > [{ptkpʰkʰbdgm}ø{rl}V́₁-]";

#[test]
fn test_galadriel_syllables() {
    assert_eq!(syllabify("Galadriel"), vec!["Ga", "lad", "ri", "el"]);
}

#[test]
fn test_talan_stress() {
    let syllables = analyse("talan");
    assert!(syllables[0].stressed);
    assert!(!syllables[1].stressed);
}

#[test]
fn test_liquid_assimilation() {
    let rule = Rule::compile("[ln] > [ll]").unwrap();
    assert_eq!(rule.apply("olna"), "olla");
    assert_eq!(rule.apply("ondo"), "ondo");
}

#[test]
fn test_coindexed_syncope() {
    let rule = Rule::compile(SYNCOPE).unwrap();
    assert_eq!(rule.position(), Position::Initial);
    assert_eq!(rule.apply("barándā"), "brandā");
    assert_eq!(rule.apply("kalánt-"), "klant-");
}

#[test]
fn test_coindex_rejects_differing_vowels() {
    let rule = Rule::compile(SYNCOPE).unwrap();
    for word in ["barínda", "kelánt-", "toránda"] {
        assert_eq!(rule.apply(word), word, "{word} should not change");
    }
}

#[test]
fn test_final_rule_never_matches_word_start() {
    let rule = Rule::compile("[-{ptk}] > [-{bdg}]").unwrap();
    assert_eq!(rule.position(), Position::Final);
    assert_eq!(rule.apply("pelep"), "peleb");
    assert_eq!(rule.apply("pela"), "pela");
}

#[test]
fn test_anchored_rules_skip_whole_word_matches() {
    assert_eq!(Rule::compile("[-p] > [-b]").unwrap().apply("p"), "p");
    assert_eq!(Rule::compile("[p-] > [b-]").unwrap().apply("p"), "p");
    assert_eq!(Rule::compile("[-pa] > [-ba]").unwrap().apply("pa"), "pa");
    assert_eq!(Rule::compile("[-pa] > [-ba]").unwrap().apply("epa"), "eba");
}

#[test]
fn test_coindex_conflict_moves_to_next_offset() {
    let rule = Rule::compile("[V₁lV₁] > [V₁rV₁]").unwrap();
    assert_eq!(rule.position(), Position::Any);
    // a-l-o fails the coindex check, o-l-o at offset 2 binds
    assert_eq!(rule.apply("alolo"), "aloro");
    assert_eq!(rule.apply("alolu"), "alolu");
}

#[test]
fn test_initial_rule_never_matches_elsewhere() {
    let rule = Rule::compile("[{ptk}-] > [{bdg}-]").unwrap();
    assert_eq!(rule.position(), Position::Initial);
    assert_eq!(rule.apply("pelep"), "belep");
    assert_eq!(rule.apply("elep"), "elep");
}

#[test]
fn test_round_trip_spellings() {
    for word in ["ithil", "thorondor", "galadh"] {
        assert_eq!(to_digraphs(&to_single(word)), word);
    }
    // Alternate spelling comes back canonical
    assert_eq!(to_digraphs(&to_single("whin")), "hwin");
}

#[test]
fn test_decomposed_notation_matches_composed_word() {
    let decomposed = "[-a\u{0301}] > [-a]";
    let rule = Rule::compile(decomposed).unwrap();
    assert_eq!(rule.apply("talá"), "tala");
}

#[test]
fn test_malformed_rules_fail_at_compile_time() {
    let cases = [
        ("[ab] > [a]", "slot"),
        ("[a|b] > [a]", "segments"),
        ("[{ptk}] > [{bd}]", "replacements"),
        ("[ab", "'>'"),
    ];
    for (notation, fragment) in cases {
        let err = Rule::compile(notation).unwrap_err();
        assert!(
            err.to_string().contains(fragment),
            "{notation}: {err} should mention {fragment}"
        );
    }
    assert!(matches!(
        Rule::compile("[a-b] > [a-b]"),
        Err(Error::Notation(NotationError::InteriorWildcard { .. }))
    ));
}

#[test]
fn test_telerin_tables() {
    let telerin = get_phonology("telerin").unwrap();
    let rule = Rule::compile_with("[-kʰ] > [-χ]", Arc::clone(&telerin)).unwrap();

    // χ is not a stand-in in these tables, so it stays as written
    assert_eq!(rule.apply("ekʰ"), "eχ");
}

#[test]
fn test_pipeline_mixes_rules_and_mechanics() {
    let set = RuleSet::from_toml_str(&format!(
        r#"
[[rules]]
name = "syncope"
notation = "{SYNCOPE}"
"#
    ))
    .unwrap();
    let mut pipeline = set.pipeline(soundlaw_core::default_phonology()).unwrap();
    pipeline.push(Mechanic::new("final-a-loss", |word, _| {
        word.strip_suffix('ā').unwrap_or(word).to_string()
    }));

    let derivation = pipeline.run("barándā");
    assert_eq!(derivation.output, "brand");
    let names: Vec<&str> = derivation.steps.iter().map(|s| s.rule.as_str()).collect();
    assert_eq!(names, vec!["syncope", "final-a-loss"]);
}

#[test]
fn test_prosodic_stress_through_pipeline() {
    let rule = Rule::compile("[V́] > [V̄]").unwrap();
    let pipeline = Pipeline::default()
        .with_options(ApplyOptions {
            stress_from_analysis: true,
        })
        .with(rule);
    assert_eq!(pipeline.run("talan").output, "tālan");

    let context = ApplyContext::new(soundlaw_core::default_phonology(), SpellingMode::Digraph);
    let rule = Rule::compile("[V́] > [V̄]").unwrap();
    assert_eq!(rule.apply_with("talan", &context), "talan");
}
