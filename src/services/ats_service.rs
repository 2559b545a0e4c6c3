use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume_analysis::{FormattingReport, KeywordReport, SectionFlags};

/// Reference skill vocabulary. Matching order and the "missing" derivation
/// both follow this declaration order.
pub const SKILL_VOCABULARY: [&str; 35] = [
    "javascript",
    "typescript",
    "python",
    "java",
    "c++",
    "c#",
    "go",
    "rust",
    "sql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "git",
    "ci/cd",
    "rest api",
    "graphql",
    "agile",
    "leadership",
    "communication",
];

const MISSING_KEYWORD_CAP: usize = 10;

const KEYWORD_TIPS: [&str; 3] = [
    "Mirror the wording of the job description for key skills",
    "List concrete technologies rather than broad categories",
    "Keep your skills section near the top of the resume",
];

struct SectionPatterns {
    contact: Regex,
    education: Regex,
    experience: Regex,
    skills: Regex,
    projects: Regex,
}

static SECTION_PATTERNS: LazyLock<SectionPatterns> = LazyLock::new(|| SectionPatterns {
    contact: Regex::new("email|phone|linkedin|github").expect("contact pattern"),
    education: Regex::new("education|degree|university|college|bachelor|master")
        .expect("education pattern"),
    experience: Regex::new("experience|work|employment|intern|job").expect("experience pattern"),
    skills: Regex::new("skills|technologies|tools|proficient").expect("skills pattern"),
    projects: Regex::new("project|developed|built|created|implemented").expect("projects pattern"),
});

/// Subset of the vocabulary present in the text, as a case-insensitive
/// substring match. Deliberately permissive: "java" also matches inside
/// "javascript", the same crude containment real ATS scanners apply.
pub fn match_keywords(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|keyword| haystack.contains(**keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Vocabulary entries absent from `found`, in vocabulary order, capped at 10.
pub fn missing_keywords(found: &[String]) -> Vec<String> {
    SKILL_VOCABULARY
        .iter()
        .filter(|keyword| !found.iter().any(|f| f == *keyword))
        .take(MISSING_KEYWORD_CAP)
        .map(|keyword| keyword.to_string())
        .collect()
}

pub fn keyword_report(found: Vec<String>) -> KeywordReport {
    let missing = missing_keywords(&found);
    KeywordReport {
        found,
        missing,
        suggestions: KEYWORD_TIPS.iter().map(|tip| tip.to_string()).collect(),
    }
}

/// Five independent structural signals, each a substring-style pattern match
/// over the lowercased text.
pub fn detect_sections(text: &str) -> SectionFlags {
    let haystack = text.to_lowercase();
    let patterns = &*SECTION_PATTERNS;
    SectionFlags {
        has_contact_info: patterns.contact.is_match(&haystack),
        has_education: patterns.education.is_match(&haystack),
        has_experience: patterns.experience.is_match(&haystack),
        has_skills: patterns.skills.is_match(&haystack),
        has_projects: patterns.projects.is_match(&haystack),
    }
}

/// Weighted 0-100 score: 40 points for section completeness, 30 for keyword
/// density (capped at 10 matches), 15/10/5 for length buckets and 15/5 for
/// the formatting heuristic. Empty text bottoms out at 10.
pub fn calculate_score(text: &str, sections: &SectionFlags, found_keywords: usize) -> i32 {
    let section_points = f64::from(sections.present_count()) / 5.0 * 40.0;
    let keyword_points = (found_keywords as f64 / 10.0).min(1.0) * 30.0;

    let words = word_count(text);
    let length_points = if (300..=1000).contains(&words) {
        15.0
    } else if words > 1000 {
        10.0
    } else {
        5.0
    };

    let formatting_points = if is_well_formatted(text) { 15.0 } else { 5.0 };

    let total = section_points + keyword_points + length_points + formatting_points;
    (total.round() as i32).clamp(0, 100)
}

pub fn formatting_report(text: &str) -> FormattingReport {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if !text.contains('\n') {
        issues.push("No line breaks detected; the resume reads as a single block".to_string());
        suggestions.push("Separate sections with clear line breaks".to_string());
    }
    if text.chars().count() <= 500 {
        issues.push("Resume body is very short".to_string());
        suggestions.push("Expand your experience and project descriptions".to_string());
    }

    FormattingReport {
        score: if is_well_formatted(text) { 15 } else { 5 },
        issues,
        suggestions,
    }
}

/// Improvement suggestions in a fixed order: one per absent section (contact,
/// education, experience, skills, projects), then the keyword nudge below 5
/// matches, then two generic tips below a score of 60.
pub fn build_suggestions(sections: &SectionFlags, found_keywords: usize, score: i32) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !sections.has_contact_info {
        suggestions.push(
            "Add contact information such as an email address, phone number and LinkedIn profile"
                .to_string(),
        );
    }
    if !sections.has_education {
        suggestions.push("Add an education section listing your degree and university".to_string());
    }
    if !sections.has_experience {
        suggestions.push("Add a work experience or internship section".to_string());
    }
    if !sections.has_skills {
        suggestions
            .push("Add a dedicated skills section listing the technologies you know".to_string());
    }
    if !sections.has_projects {
        suggestions.push("Add a projects section describing what you have built".to_string());
    }

    if found_keywords < 5 {
        suggestions.push(
            "Add more role-relevant keywords: the languages, frameworks and tools you work with"
                .to_string(),
        );
    }
    if score < 60 {
        suggestions.push(
            "Use action verbs such as developed, built and implemented to describe your work"
                .to_string(),
        );
        suggestions
            .push("Quantify achievements with concrete numbers wherever possible".to_string());
    }

    suggestions
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_well_formatted(text: &str) -> bool {
    text.contains('\n') && text.chars().count() > 500
}
