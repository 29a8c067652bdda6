use crate::engine::scoring;
use crate::session::quiz::Attempt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub word: String,
    pub attempt_text: String,
    pub correct: bool,
}

impl ReportRow {
    pub fn verdict(&self) -> &'static str {
        if self.correct {
            "\u{2713} Correct"
        } else {
            "\u{2717} Incorrect"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseReport {
    pub rows: Vec<ReportRow>,
    pub correct_count: usize,
    pub total_count: usize,
    pub percent_correct: u32,
}

impl ExerciseReport {
    pub fn from_attempts(attempts: &[Attempt]) -> Self {
        let rows: Vec<ReportRow> = attempts
            .iter()
            .map(|a| ReportRow {
                word: a.item.word.clone(),
                attempt_text: a.attempt_text.clone(),
                correct: scoring::attempt_is_correct(a),
            })
            .collect();
        let correct_count = scoring::correct_count(attempts);
        let total_count = attempts.len();

        Self {
            rows,
            correct_count,
            total_count,
            percent_correct: scoring::percent_correct(correct_count, total_count),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Well done for your attempt. Out of a total of {} questions, you had {} ({}%) correct attempts.",
            self.total_count, self.correct_count, self.percent_correct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Stage;
    use crate::engine::selection::test_support::entry;

    fn attempt(word: &str, text: &str) -> Attempt {
        Attempt {
            item: entry(word, "C", Stage::General),
            attempt_text: text.to_string(),
        }
    }

    #[test]
    fn totals_and_summary() {
        let report = ExerciseReport::from_attempts(&[attempt("one", "one"), attempt("two", "tw")]);
        assert_eq!(report.total_count, 2);
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.percent_correct, 50);
        assert!(report.summary().contains("Out of a total of 2 questions"));
        assert!(report.summary().contains("1 (50%)"));
    }

    #[test]
    fn rows_keep_attempt_order_and_literal_text() {
        let report = ExerciseReport::from_attempts(&[
            attempt("Photosynthesis", " photosynthesis "),
            attempt("enzyme", ""),
            attempt("velocity", "Velosity"),
        ]);
        let words: Vec<&str> = report.rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["Photosynthesis", "enzyme", "velocity"]);

        assert!(report.rows[0].correct);
        assert_eq!(report.rows[0].attempt_text, " photosynthesis ");
        assert!(!report.rows[1].correct);
        assert_eq!(report.rows[1].attempt_text, "");
        assert_eq!(report.rows[2].verdict(), "\u{2717} Incorrect");
    }

    #[test]
    fn empty_report_scores_zero() {
        let report = ExerciseReport::from_attempts(&[]);
        assert_eq!(report.percent_correct, 0);
        assert!(report.rows.is_empty());
    }
}
