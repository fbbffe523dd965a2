//! Deterministic per-section scoring of an answered aptitude test.
//! Pure functions, no model call — the LLM only ever sees the rendered
//! summary lines, never the raw answers.

use serde::Serialize;

use crate::aptitude::{AnswerSet, AptitudeQuestion};

/// Per-section tally of correct answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionScore {
    pub section: String,
    pub correct: u32,
    pub total: u32,
}

impl SectionScore {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

/// Tallies answers per section, in order of first section appearance.
///
/// A question counts as correct only when its id (as a string key) is
/// present in `answers` and the stored value equals `correct_option`.
/// Missing keys and mismatched values count as incorrect, never as errors.
pub fn score_by_section(questions: &[AptitudeQuestion], answers: &AnswerSet) -> Vec<SectionScore> {
    let mut scores: Vec<SectionScore> = Vec::new();

    for question in questions {
        let index = match scores.iter().position(|s| s.section == question.section) {
            Some(i) => i,
            None => {
                scores.push(SectionScore {
                    section: question.section.clone(),
                    correct: 0,
                    total: 0,
                });
                scores.len() - 1
            }
        };

        scores[index].total += 1;
        if answers.get(&question.id.to_string()).copied() == Some(question.correct_option) {
            scores[index].correct += 1;
        }
    }

    scores
}

/// Renders one human-readable line per section:
/// `"{section}: {correct}/{total} correct ({percentage:.1}%)"`.
pub fn performance_summary(scores: &[SectionScore]) -> String {
    scores
        .iter()
        .map(|s| {
            format!(
                "{}: {}/{} correct ({:.1}%)",
                s.section,
                s.correct,
                s.total,
                s.percentage()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aptitude::Difficulty;
    use std::collections::HashMap;

    fn question(id: u32, section: &str, correct_option: u32) -> AptitudeQuestion {
        AptitudeQuestion {
            id,
            section: section.to_string(),
            question: format!("Question {id}?"),
            options: vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            correct_option,
            difficulty: Difficulty::Medium,
            why_this_question: "Probes reasoning".to_string(),
        }
    }

    fn answers(pairs: &[(&str, u32)]) -> AnswerSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_one_right_one_wrong_in_same_section() {
        let questions = vec![question(1, "Science", 2), question(2, "Science", 0)];
        let scores = score_by_section(&questions, &answers(&[("1", 2), ("2", 1)]));

        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].section, "Science");
        assert_eq!(scores[0].correct, 1);
        assert_eq!(scores[0].total, 2);
        assert!((scores[0].percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_answer_counts_as_incorrect() {
        let questions = vec![question(1, "Science", 2), question(2, "Science", 0)];
        let scores = score_by_section(&questions, &answers(&[("1", 2)]));

        assert_eq!(scores[0].correct, 1);
        assert_eq!(scores[0].total, 2);
    }

    #[test]
    fn test_empty_answers_scores_zero_without_error() {
        let questions = vec![question(1, "STEM", 0)];
        let scores = score_by_section(&questions, &AnswerSet::new());

        assert_eq!(scores[0].correct, 0);
        assert_eq!(scores[0].total, 1);
    }

    #[test]
    fn test_unknown_answer_keys_are_ignored() {
        let questions = vec![question(1, "STEM", 0)];
        let scores = score_by_section(&questions, &answers(&[("1", 0), ("99", 3)]));

        assert_eq!(scores[0].correct, 1);
        assert_eq!(scores[0].total, 1);
    }

    #[test]
    fn test_sections_keep_first_appearance_order() {
        let questions = vec![
            question(1, "Humanities", 0),
            question(2, "Science", 0),
            question(3, "Humanities", 0),
            question(4, "Commerce", 0),
        ];
        let scores = score_by_section(&questions, &AnswerSet::new());

        let sections: Vec<&str> = scores.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(sections, vec!["Humanities", "Science", "Commerce"]);
        assert_eq!(scores[0].total, 2);
    }

    #[test]
    fn test_performance_summary_format() {
        let questions = vec![question(1, "Science", 2), question(2, "Science", 0)];
        let scores = score_by_section(&questions, &answers(&[("1", 2), ("2", 1)]));

        assert_eq!(performance_summary(&scores), "Science: 1/2 correct (50.0%)");
    }

    #[test]
    fn test_performance_summary_one_line_per_section() {
        let questions = vec![question(1, "STEM", 0), question(2, "Business", 1)];
        let scores = score_by_section(&questions, &answers(&[("1", 0), ("2", 1)]));
        let summary = performance_summary(&scores);

        assert_eq!(
            summary,
            "STEM: 1/1 correct (100.0%)\nBusiness: 1/1 correct (100.0%)"
        );
    }

    #[test]
    fn test_percentage_of_empty_section_is_zero() {
        let score = SectionScore {
            section: "Creative".to_string(),
            correct: 0,
            total: 0,
        };
        assert_eq!(score.percentage(), 0.0);
    }
}
