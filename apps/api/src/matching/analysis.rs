//! Text analysis shared by the resume and the job description:
//! technical skills, years of experience, and required-qualification sentences.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Canonical spelling of every skill the matcher knows.
const SKILLS: &[&str] = &[
    "Python",
    "Java",
    "SQL",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "JavaScript",
    "TypeScript",
    "C++",
    "Ruby",
    "PHP",
    "HTML",
    "CSS",
    "REST",
    "API",
    "ML",
    "AI",
    "DevOps",
    "CI/CD",
    "Git",
    "Agile",
    "Scrum",
    "Rust",
    "Kafka",
    "PostgreSQL",
    "Terraform",
    "Linux",
];

const QUALIFICATION_KEYWORDS: &[&str] = &["required", "must have", "qualification", "requirement"];

static SKILL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let mut sorted: Vec<&str> = SKILLS.to_vec();
    // Longest first so "JavaScript" wins over "Java" at the same position
    sorted.sort_by_key(|s| std::cmp::Reverse(s.len()));
    let escaped: Vec<String> = sorted.iter().map(|s| regex::escape(s)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})", escaped.join("|"))).expect("skill pattern should compile")
});

static YEARS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").expect("years pattern should compile")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern should compile"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("sentence pattern should compile"));

/// Collapses runs of whitespace into single spaces and trims.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Technical skills in canonical spelling, de-duplicated, in first-appearance order.
pub fn technical_skills(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut skills = Vec::new();

    for m in SKILL_PATTERN.find_iter(text) {
        // The pattern only anchors the start; reject matches that run into a word
        let next = text[m.end()..].chars().next();
        if next.is_some_and(|c| c.is_alphanumeric() || c == '_') {
            continue;
        }
        let Some(canonical) = canonical_skill(m.as_str()) else {
            continue;
        };
        if seen.insert(canonical) {
            skills.push(canonical.to_string());
        }
    }
    skills
}

fn canonical_skill(found: &str) -> Option<&'static str> {
    SKILLS
        .iter()
        .copied()
        .find(|skill| skill.eq_ignore_ascii_case(found))
}

/// Every "N years" / "N+ yrs" figure, in order of appearance.
pub fn years_of_experience(text: &str) -> Vec<u32> {
    YEARS_PATTERN
        .captures_iter(text)
        .filter_map(|cap| cap.get(1)?.as_str().parse().ok())
        .collect()
}

/// Sentences that state a requirement.
pub fn required_qualifications(text: &str) -> Vec<String> {
    let cleaned = collapse_whitespace(text);
    split_sentences(&cleaned)
        .into_iter()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            QUALIFICATION_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(str::to_string)
        .collect()
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        // Keep the terminating punctuation, drop the whitespace
        let end = m.start() + 1;
        sentences.push(text[start..end].trim());
        start = m.end();
    }
    if start < text.len() {
        sentences.push(text[start..].trim());
    }
    sentences.retain(|s| !s.is_empty());
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_canonicalized_and_deduplicated() {
        let skills = technical_skills("python, PYTHON and Kubernetes; also docker");
        assert_eq!(skills, vec!["Python", "Kubernetes", "Docker"]);
    }

    #[test]
    fn test_javascript_not_reported_as_java() {
        assert_eq!(technical_skills("Senior JavaScript developer"), vec!["JavaScript"]);
    }

    #[test]
    fn test_symbol_skills() {
        let skills = technical_skills("Built C++ services, Node.js APIs and CI/CD pipelines.");
        assert_eq!(skills, vec!["C++", "Node.js", "CI/CD"]);
    }

    #[test]
    fn test_skill_prefix_of_longer_word_is_ignored() {
        // "Rusty" and "Gitter" are not skills
        assert!(technical_skills("Rusty Gitter").is_empty());
    }

    #[test]
    fn test_years_of_experience() {
        let years = years_of_experience("5 years of Rust, 3+ yrs Go, and 1 year of Kotlin");
        assert_eq!(years, vec![5, 3, 1]);
    }

    #[test]
    fn test_required_qualifications() {
        let jd = "We build payments.  Python is required!\nMust have 3 years of SQL. Nice to have: Go.";
        assert_eq!(
            required_qualifications(jd),
            vec!["Python is required!", "Must have 3 years of SQL."]
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }
}
