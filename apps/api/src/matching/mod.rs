//! Job matching: compares a resume against an optional job description.
//!
//! Pure-Rust keyword scoring: technical-skill overlap plus overlap of recognized
//! entity texts. Deterministic and independent of the recognizer backend.
//!
//! Scoring:
//! 1. skills_match = |job skills ∩ resume skills| / |job skills|
//! 2. entity_match = |job entities ∩ resume entities| / |job entities| (lower-cased text)
//! 3. overall = (skills_match + entity_match) / 2
//!
//! All three are reported as percentages rounded to two decimals; an empty job
//! side scores 0.

pub mod analysis;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::analysis::{
    collapse_whitespace, required_qualifications, technical_skills, years_of_experience,
};
use crate::ner::Entity;

/// Full match report returned alongside the processed resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub overall_match_score: f64,
    pub skills_match_score: f64,
    pub entity_match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>, // required by the job, absent from the resume
    pub matched_entities: Vec<String>,
    pub required_qualifications: Vec<String>,
    pub years_experience: Vec<u32>, // as stated in the resume
    pub recommendation: String,
}

/// Scores `resume_text` against `job_description`.
/// `resume_entities` and `job_entities` come from the same recognizer.
pub fn compute_match(
    resume_text: &str,
    resume_entities: &[Entity],
    job_description: &str,
    job_entities: &[Entity],
) -> MatchReport {
    let resume_clean = collapse_whitespace(resume_text);
    let job_clean = collapse_whitespace(job_description);

    let resume_skills: HashSet<String> = technical_skills(&resume_clean).into_iter().collect();
    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = technical_skills(&job_clean)
        .into_iter()
        .partition(|skill| resume_skills.contains(skill));

    let resume_entity_texts = lowercase_texts(resume_entities);
    let job_entity_texts = ordered_lowercase_texts(job_entities);
    let matched_entities: Vec<String> = job_entity_texts
        .iter()
        .filter(|t| resume_entity_texts.contains(*t))
        .cloned()
        .collect();

    let skills_ratio = ratio(matched_skills.len(), matched_skills.len() + missing_skills.len());
    let entity_ratio = ratio(matched_entities.len(), job_entity_texts.len());

    let overall_match_score = round2((skills_ratio + entity_ratio) * 50.0);
    let recommendation = build_recommendation(overall_match_score, &missing_skills);

    MatchReport {
        overall_match_score,
        skills_match_score: round2(skills_ratio * 100.0),
        entity_match_score: round2(entity_ratio * 100.0),
        matched_skills,
        missing_skills,
        matched_entities,
        required_qualifications: required_qualifications(job_description),
        years_experience: years_of_experience(&resume_clean),
        recommendation,
    }
}

fn lowercase_texts(entities: &[Entity]) -> HashSet<String> {
    entities.iter().map(|e| e.text.to_lowercase()).collect()
}

/// Lower-cased, de-duplicated entity texts in first-appearance order.
fn ordered_lowercase_texts(entities: &[Entity]) -> Vec<String> {
    let mut seen = HashSet::new();
    entities
        .iter()
        .map(|e| e.text.to_lowercase())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds a human-readable recommendation string from score and missing skills.
fn build_recommendation(score: f64, missing_skills: &[String]) -> String {
    let top_gaps: Vec<&str> = missing_skills.iter().take(3).map(String::as_str).collect();

    if score >= 80.0 {
        "Strong match. The resume covers the key requirements of this job.".to_string()
    } else if score >= 50.0 {
        if top_gaps.is_empty() {
            format!("Moderate match ({score}/100).")
        } else {
            format!(
                "Moderate match ({score}/100). Consider highlighting: {}.",
                top_gaps.join(", ")
            )
        }
    } else if top_gaps.is_empty() {
        format!("Low match ({score}/100).")
    } else {
        format!(
            "Low match ({score}/100). Missing skills: {}.",
            top_gaps.join(", ")
        )
    }
}
