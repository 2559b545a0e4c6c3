use placement_backend::models::resume_analysis::SectionFlags;
use placement_backend::services::analysis_service::text_excerpt;
use placement_backend::services::ats_service::{
    build_suggestions, calculate_score, detect_sections, keyword_report, match_keywords,
    SKILL_VOCABULARY,
};

fn filler(words: usize) -> String {
    vec!["resume"; words].join(" ")
}

#[test]
fn score_stays_within_bounds_for_assorted_inputs() {
    let samples = [
        String::new(),
        "short".to_string(),
        filler(5000),
        format!("{}\n{}", filler(200), filler(200)),
        "education experience skills projects email javascript python react docker sql aws git"
            .repeat(50),
    ];
    for text in &samples {
        let sections = detect_sections(text);
        let found = match_keywords(text);
        let score = calculate_score(text, &sections, found.len());
        assert!((0..=100).contains(&score), "score {} out of bounds", score);
    }
}

#[test]
fn length_bucket_boundaries() {
    let none = SectionFlags::default();
    // no newline, so the formatting component is always the 5-point floor
    assert_eq!(calculate_score(&filler(0), &none, 0), 10);
    assert_eq!(calculate_score(&filler(299), &none, 0), 10);
    assert_eq!(calculate_score(&filler(300), &none, 0), 20);
    assert_eq!(calculate_score(&filler(1000), &none, 0), 20);
    assert_eq!(calculate_score(&filler(1001), &none, 0), 15);
}

#[test]
fn keyword_density_boundaries() {
    let none = SectionFlags::default();
    assert_eq!(calculate_score("", &none, 0), 10);
    assert_eq!(calculate_score("", &none, 10), 40);
    // density is capped at ten matches
    assert_eq!(calculate_score("", &none, 35), 40);
    assert_eq!(calculate_score("", &none, 5), 25);
}

#[test]
fn formatting_bonus_needs_newline_and_length() {
    let none = SectionFlags::default();
    let multiline_long = format!("{}\n{}", "a".repeat(300), "b".repeat(300));
    assert_eq!(calculate_score(&multiline_long, &none, 0), 20);

    let single_block_long = "a".repeat(600);
    assert_eq!(calculate_score(&single_block_long, &none, 0), 10);

    let multiline_short = "a\nb";
    assert_eq!(calculate_score(multiline_short, &none, 0), 10);
}

#[test]
fn detection_is_stable_across_repeated_calls() {
    let text = "Education at a university.\nWork experience with python and docker.";
    let first = detect_sections(text);
    for _ in 0..5 {
        assert_eq!(detect_sections(text), first);
        assert_eq!(match_keywords(text), match_keywords(text));
    }
}

// A complete resume: every section present, plenty of keywords, word count in
// the preferred band, real line structure. Nothing should be suggested.
#[test]
fn strong_resume_scores_high_with_no_suggestions() {
    let mut text = String::new();
    text.push_str("Contact: email jane@example.com, phone +91 55501, linkedin.com/in/jane\n");
    text.push_str("Education: B.Tech degree, State University\n");
    text.push_str("Experience: software intern, two years of work\n");
    text.push_str("Skills: javascript, python, react, docker, sql, aws\n");
    text.push_str("Projects: developed and built a placement portal\n");
    text.push_str(&filler(300));

    let sections = detect_sections(&text);
    assert!(sections.has_contact_info);
    assert!(sections.has_education);
    assert!(sections.has_experience);
    assert!(sections.has_skills);
    assert!(sections.has_projects);

    let found = match_keywords(&text);
    assert!(found.contains(&"javascript".to_string()));
    assert!(found.contains(&"python".to_string()));
    assert!(found.len() >= 5);
    // found order follows the vocabulary declaration, not text order
    let positions: Vec<usize> = found
        .iter()
        .map(|f| SKILL_VOCABULARY.iter().position(|v| v == f).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let score = calculate_score(&text, &sections, found.len());
    assert!(score >= 60, "expected a strong score, got {}", score);
    assert!(build_suggestions(&sections, found.len(), score).is_empty());
}

// Whitespace-only extraction (e.g. a scanned PDF): every signal bottoms out.
#[test]
fn empty_text_hits_the_score_floor_with_full_suggestions() {
    let text = "";
    let sections = detect_sections(text);
    assert_eq!(sections, SectionFlags::default());

    let found = match_keywords(text);
    assert!(found.is_empty());

    let score = calculate_score(text, &sections, found.len());
    assert_eq!(score, 10);

    let suggestions = build_suggestions(&sections, found.len(), score);
    assert_eq!(suggestions.len(), 8);
    assert!(suggestions[0].contains("contact"));
    assert!(suggestions[4].contains("projects"));
    assert!(suggestions[5].contains("keywords"));
    assert!(suggestions[7].contains("Quantify"));
}

#[test]
fn missing_list_is_vocabulary_minus_found_capped_at_ten() {
    let report = keyword_report(match_keywords("python and rust, nothing else"));
    assert!(report.found.contains(&"python".to_string()));
    assert!(report.found.contains(&"rust".to_string()));
    assert_eq!(report.missing.len(), 10);
    for keyword in &report.missing {
        assert!(!report.found.contains(keyword));
    }
    // missing preserves vocabulary order as well
    let positions: Vec<usize> = report
        .missing
        .iter()
        .map(|m| SKILL_VOCABULARY.iter().position(|v| v == m).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn retained_text_is_a_character_safe_prefix() {
    let text = format!("{}é{}", "a".repeat(999), "tail that is dropped");
    let excerpt = text_excerpt(&text, 1000);
    assert_eq!(excerpt.chars().count(), 1000);
    assert!(excerpt.ends_with('é'));
}
