//! Regex + gazetteer recognizer tuned for resumes.
//!
//! Recognizes people, organizations, places, and dates with pattern matching.
//! All patterns compile once per process on first use.

use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::{labels, resolve_spans, Entity, EntityRecognizer, RecognizeError, Span};

pub struct RegexRecognizer;

impl RegexRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous extraction; never fails.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut spans = Vec::new();

        collect_dates(text, &mut spans);
        collect_organizations(text, &mut spans);
        collect_locations(text, &mut spans);
        collect_persons(text, &mut spans);

        resolve_spans(text, spans)
    }
}

impl Default for RegexRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityRecognizer for RegexRecognizer {
    fn backend_id(&self) -> &str {
        "regex"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognizeError> {
        Ok(self.extract(text))
    }
}

// ============================================================================
// Dates
// ============================================================================

const MONTH: &str = r"(?:January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)";

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // March 3, 2021 / Jan. 2020
        Regex::new(&format!(
            r"\b{MONTH}\.?(?:[ \t]+\d{{1,2}},?)?[ \t]+(?:19|20)\d{{2}}\b"
        ))
        .expect("month date pattern should compile"),
        // 06/2019
        Regex::new(r"\b(?:0?[1-9]|1[0-2])/(?:19|20)\d{2}\b")
            .expect("numeric date pattern should compile"),
        // 2019
        Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern should compile"),
    ]
});

fn collect_dates(text: &str, spans: &mut Vec<Span>) {
    for pattern in DATE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            spans.push(Span::new(m.start(), m.end(), labels::DATE));
        }
    }
}

// ============================================================================
// Organizations
// ============================================================================

const CAP_WORD: &str = r"[A-Z][A-Za-z0-9&'\-]*";

static ORG_SUFFIXES: &[&str] = &[
    "Incorporated",
    "Inc",
    "Corporation",
    "Corp",
    "LLC",
    "LLP",
    "Ltd",
    "Limited",
    "Company",
    "Co",
    "Group",
    "Holdings",
    "Technologies",
    "Technology",
    "Labs",
    "Systems",
    "Solutions",
    "Partners",
    "Consulting",
    "Bank",
    "Foundation",
    "Institute",
    "University",
    "College",
    "Agency",
    "Studios",
    "Ventures",
];

static KNOWN_ORGS: &[&str] = &[
    "Google",
    "Microsoft",
    "Amazon",
    "Apple",
    "Meta",
    "Facebook",
    "Netflix",
    "IBM",
    "Oracle",
    "Intel",
    "Nvidia",
    "Salesforce",
    "Adobe",
    "Uber",
    "Airbnb",
    "Stripe",
    "Tesla",
    "Spotify",
    "LinkedIn",
    "Twitter",
    "GitHub",
    "Shopify",
    "Deloitte",
    "Accenture",
    "McKinsey",
    "Goldman Sachs",
    "JPMorgan",
    "Morgan Stanley",
    "NASA",
    "MIT",
];

/// Function words that start a capitalized run without belonging to the name.
static LEADING_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "The", "A", "An", "At", "In", "For", "With", "And", "From", "By", "As", "I", "We", "Our",
        "My", "Joined", "Worked", "Led", "Managed", "Built", "Founded",
    ]
    .into_iter()
    .collect()
});

static ORG_BY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b{CAP_WORD}(?:[ \t]+(?:&[ \t]+)?{CAP_WORD})*[ \t]+{}\b",
        alternation(ORG_SUFFIXES)
    ))
    .expect("org suffix pattern should compile")
});

static ORG_BY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:University|Bank|Institute|College|School|Department|Bureau|Ministry)[ \t]+of[ \t]+(?:the[ \t]+)?{CAP_WORD}(?:[ \t]+{CAP_WORD})*"
    ))
    .expect("org prefix pattern should compile")
});

static ORG_GAZETTEER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{}\b", alternation(KNOWN_ORGS)))
        .expect("org gazetteer pattern should compile")
});

fn collect_organizations(text: &str, spans: &mut Vec<Span>) {
    for m in ORG_BY_SUFFIX.find_iter(text) {
        let start = trim_leading_stopwords(text, m.start(), m.end());
        let name = &text[start..m.end()];
        // A bare suffix ("The Company") is not a name
        if ORG_SUFFIXES.contains(&name) {
            continue;
        }
        spans.push(Span::new(start, m.end(), labels::ORG));
    }

    for m in ORG_BY_PREFIX.find_iter(text) {
        spans.push(Span::new(m.start(), m.end(), labels::ORG));
    }

    for m in ORG_GAZETTEER.find_iter(text) {
        spans.push(Span::new(m.start(), m.end(), labels::ORG));
    }
}

/// Advances `start` past leading function words inside `text[start..end]`.
fn trim_leading_stopwords(text: &str, mut start: usize, end: usize) -> usize {
    loop {
        let rest = &text[start..end];
        let Some(word_len) = rest.find(|c: char| c == ' ' || c == '\t') else {
            return start;
        };
        if !LEADING_STOPWORDS.contains(&rest[..word_len]) {
            return start;
        }
        let gap = rest[word_len..].len() - rest[word_len..].trim_start().len();
        start += word_len + gap;
    }
}

// ============================================================================
// Locations
// ============================================================================

static KNOWN_PLACES: &[&str] = &[
    // US states
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    // Countries
    "United States",
    "USA",
    "Canada",
    "Mexico",
    "Brazil",
    "Argentina",
    "United Kingdom",
    "UK",
    "Ireland",
    "France",
    "Germany",
    "Spain",
    "Portugal",
    "Italy",
    "Netherlands",
    "Belgium",
    "Switzerland",
    "Austria",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Poland",
    "Ukraine",
    "India",
    "China",
    "Japan",
    "Singapore",
    "Australia",
    "New Zealand",
    "Nigeria",
    "Kenya",
    "South Africa",
    "Egypt",
    "Israel",
    // Cities
    "San Francisco",
    "Los Angeles",
    "San Diego",
    "San Jose",
    "Seattle",
    "Portland",
    "Austin",
    "Dallas",
    "Houston",
    "Denver",
    "Chicago",
    "Boston",
    "Atlanta",
    "Miami",
    "Toronto",
    "Vancouver",
    "Montreal",
    "London",
    "Paris",
    "Berlin",
    "Munich",
    "Amsterdam",
    "Dublin",
    "Madrid",
    "Barcelona",
    "Stockholm",
    "Zurich",
    "Warsaw",
    "Bangalore",
    "Bengaluru",
    "Mumbai",
    "Delhi",
    "Hyderabad",
    "Beijing",
    "Shanghai",
    "Shenzhen",
    "Tokyo",
    "Seoul",
    "Sydney",
    "Melbourne",
    "Lagos",
    "Nairobi",
    "Tel Aviv",
];

static PLACE_GAZETTEER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{}\b", alternation(KNOWN_PLACES)))
        .expect("place gazetteer pattern should compile")
});

fn collect_locations(text: &str, spans: &mut Vec<Span>) {
    for m in PLACE_GAZETTEER.find_iter(text) {
        spans.push(Span::new(m.start(), m.end(), labels::GPE));
    }
}

// ============================================================================
// Persons
// ============================================================================

static FIRST_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
        "Charles", "Christopher", "Daniel", "Matthew", "Anthony", "Mark", "Donald", "Steven",
        "Paul", "Andrew", "Joshua", "Kenneth", "Kevin", "Brian", "George", "Timothy", "Ronald",
        "Edward", "Jason", "Jeffrey", "Ryan", "Jacob", "Gary", "Nicholas", "Eric", "Jonathan",
        "Stephen", "Larry", "Justin", "Scott", "Brandon", "Benjamin", "Samuel", "Gregory",
        "Alexander", "Patrick", "Frank", "Raymond", "Jack", "Dennis", "Jerry", "Tyler", "Aaron",
        "Adam", "Nathan", "Henry", "Peter", "Zachary", "Kyle", "Ethan", "Noah", "Liam", "Lucas",
        "Oliver", "Alex", "Sam", "Chris", "Mike", "Dave", "Tom", "Ben", "Mary", "Patricia",
        "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah", "Karen", "Lisa",
        "Nancy", "Betty", "Sandra", "Ashley", "Kimberly", "Emily", "Donna", "Michelle", "Carol",
        "Amanda", "Melissa", "Deborah", "Stephanie", "Rebecca", "Sharon", "Laura", "Cynthia",
        "Amy", "Kathleen", "Angela", "Anna", "Emma", "Olivia", "Sophia", "Isabella", "Ava",
        "Mia", "Charlotte", "Amelia", "Hannah", "Rachel", "Julia", "Grace", "Jane", "Alice",
        "Claire", "Maria", "Sofia", "Elena", "Lucia", "Ana", "Carlos", "Jose", "Luis", "Juan",
        "Miguel", "Pedro", "Ahmed", "Mohammed", "Ali", "Omar", "Fatima", "Wei", "Li", "Chen",
        "Hiroshi", "Yuki", "Raj", "Rahul", "Amit", "Anil", "Arjun", "Neha", "Pooja", "Ananya",
        "Ivan", "Olga", "Dmitri", "Hans", "Klaus", "Pierre", "Jean", "Marie", "Giulia", "Marco",
    ]
    .into_iter()
    .collect()
});

/// Words that disqualify a line from being a resume header name.
static HEADER_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "Resume",
        "Curriculum",
        "Vitae",
        "Summary",
        "Profile",
        "Objective",
        "Experience",
        "Education",
        "Skills",
        "Contact",
        "Projects",
        "References",
    ]
    .into_iter()
    .collect()
});

static HONORIFIC_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:Mr|Mrs|Ms|Dr|Prof)\.?[ \t]+([A-Z][a-z]+(?:[ \t]+[A-Z]\.)?(?:[ \t]+[A-Z][a-z]+(?:-[A-Z][a-z]+)?)?)",
    )
    .expect("honorific pattern should compile")
});

static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[A-Z][a-z]+(?:-[A-Z][a-z]+)?(?:[ \t]+(?:[A-Z]\.[ \t]+)?[A-Z][a-z]+(?:-[A-Z][a-z]+)?)*",
    )
    .expect("capitalized run pattern should compile")
});

static NAME_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z][a-z]+(?:-[A-Z][a-z]+)?|[A-Z]\.)$").expect("name word pattern should compile")
});

fn collect_persons(text: &str, spans: &mut Vec<Span>) {
    for cap in HONORIFIC_NAME.captures_iter(text) {
        if let Some(name) = cap.get(1) {
            spans.push(Span::new(name.start(), name.end(), labels::PERSON));
        }
    }

    for run in CAPITALIZED_RUN.find_iter(text) {
        collect_given_name_spans(run.start(), run.as_str(), spans);
    }

    if let Some((start, end)) = header_name(text) {
        spans.push(Span::new(start, end, labels::PERSON));
    }
}

/// Within one capitalized run, emits `Given Surname` or `Given X. Surname`
/// wherever the first token is a known given name.
fn collect_given_name_spans(offset: usize, run: &str, spans: &mut Vec<Span>) {
    let words = word_offsets(run);
    let mut i = 0;
    while i + 1 < words.len() {
        let (start, first) = words[i];
        if !FIRST_NAMES.contains(first) {
            i += 1;
            continue;
        }
        let is_initial = |w: &str| w.len() == 2 && w.ends_with('.');
        let last = if is_initial(words[i + 1].1) && i + 2 < words.len() {
            i + 2
        } else {
            i + 1
        };
        let (last_start, last_word) = words[last];
        if is_initial(last_word) || ORG_SUFFIXES.contains(&last_word) {
            i += 1;
            continue;
        }
        spans.push(Span::new(
            offset + start,
            offset + last_start + last_word.len(),
            labels::PERSON,
        ));
        i = last + 1;
    }
}

/// A first non-blank line made of 2–4 name-shaped words is the candidate's name.
fn header_name(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            offset += line.len() + 1;
            continue;
        }

        let words: Vec<&str> = trimmed.split_whitespace().collect();
        let plausible = (2..=4).contains(&words.len())
            && words.iter().all(|w| NAME_WORD.is_match(w))
            && !words
                .iter()
                .any(|w| HEADER_STOPWORDS.contains(w) || ORG_SUFFIXES.contains(w));
        if !plausible {
            return None;
        }

        let start = offset + (line.len() - line.trim_start().len());
        return Some((start, start + trimmed.len()));
    }
    None
}

// ============================================================================
// Helpers
// ============================================================================

/// Builds a non-capturing alternation, longest literal first so that
/// leftmost-first matching prefers "New York" over "York".
fn alternation(words: &[&str]) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let escaped: Vec<String> = sorted.iter().map(|w| regex::escape(w)).collect();
    format!("(?:{})", escaped.join("|"))
}

/// Whitespace-separated words with their byte offsets.
fn word_offsets(s: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(st)) => {
                words.push((st, &s[st..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        words.push((st, &s[st..]));
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        RegexRecognizer::new()
            .extract(text)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    fn pair(text: &str, label: &str) -> (String, String) {
        (text.to_string(), label.to_string())
    }

    #[test]
    fn test_person_and_org_in_sentence() {
        assert_eq!(
            pairs("John Smith works at Acme Corp."),
            vec![pair("John Smith", "PERSON"), pair("Acme Corp", "ORG")]
        );
    }

    #[test]
    fn test_entities_in_order_of_appearance() {
        let text = "Worked at Google in Seattle from Jan 2019 to March 2021 with Dr. Jane Doe.";
        assert_eq!(
            pairs(text),
            vec![
                pair("Google", "ORG"),
                pair("Seattle", "GPE"),
                pair("Jan 2019", "DATE"),
                pair("March 2021", "DATE"),
                pair("Jane Doe", "PERSON"),
            ]
        );
    }

    #[test]
    fn test_header_line_is_a_person() {
        let text = "Priya Raman\nBackend Engineer at Stripe\n";
        assert_eq!(
            pairs(text),
            vec![pair("Priya Raman", "PERSON"), pair("Stripe", "ORG")]
        );
    }

    #[test]
    fn test_section_heading_is_not_a_header_name() {
        let text = "Professional Experience\nEngineer at Stripe";
        let entities = pairs(text);
        assert!(entities.iter().all(|(_, label)| label != "PERSON"));
    }

    #[test]
    fn test_universities() {
        let text = "B.S. from University of Texas, 2015; M.S. Stanford University";
        assert_eq!(
            pairs(text),
            vec![
                pair("University of Texas", "ORG"),
                pair("2015", "DATE"),
                pair("Stanford University", "ORG"),
            ]
        );
    }

    #[test]
    fn test_leading_article_trimmed_from_org() {
        let entities = pairs("The Walt Disney Company announced layoffs");
        assert_eq!(entities, vec![pair("Walt Disney Company", "ORG")]);
    }

    #[test]
    fn test_bare_suffix_is_not_an_org() {
        assert!(pairs("the role at The Company was fun").is_empty());
    }

    #[test]
    fn test_multiword_place_beats_shorter_match() {
        assert_eq!(
            pairs("Relocated to New York last spring"),
            vec![pair("New York", "GPE")]
        );
    }

    #[test]
    fn test_numeric_date_beats_bare_year() {
        assert_eq!(pairs("Since 06/2019 remote"), vec![pair("06/2019", "DATE")]);
    }

    #[test]
    fn test_middle_initial_included() {
        assert_eq!(
            pairs("Reported to Robert J. Oppenheim daily"),
            vec![pair("Robert J. Oppenheim", "PERSON")]
        );
    }

    #[test]
    fn test_every_occurrence_is_reported() {
        let entities = pairs("Google, then Google again");
        assert_eq!(entities, vec![pair("Google", "ORG"), pair("Google", "ORG")]);
    }

    #[test]
    fn test_empty_text() {
        assert!(pairs("").is_empty());
        assert!(pairs("   \n  ").is_empty());
    }

    #[test]
    fn test_word_offsets() {
        assert_eq!(word_offsets(" ab  c"), vec![(1, "ab"), (5, "c")]);
    }

    #[tokio::test]
    async fn test_trait_matches_direct_extraction() {
        let text = "Sarah Connor joined Cyberdyne Systems in 1984.";
        let recognizer = RegexRecognizer::new();
        let via_trait = recognizer.recognize(text).await.unwrap();
        assert_eq!(via_trait, recognizer.extract(text));
        assert_eq!(recognizer.backend_id(), "regex");
        assert_eq!(
            via_trait,
            vec![
                Entity {
                    text: "Sarah Connor".to_string(),
                    label: "PERSON".to_string()
                },
                Entity {
                    text: "Cyberdyne Systems".to_string(),
                    label: "ORG".to_string()
                },
                Entity {
                    text: "1984".to_string(),
                    label: "DATE".to_string()
                },
            ]
        );
    }
}
