//! Tabular presentation of a generated quiz.

use crate::core::quiz::Quiz;

/// One row of the question table shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRow {
    pub mcq: String,
    /// All options joined as `"a: ... || b: ..."`.
    pub choices: String,
    pub correct: String,
}

/// Flatten a quiz into display rows.
///
/// Rows are ordered by question key: numeric keys first in numeric order (so
/// `"10"` sorts after `"2"`), then any non-numeric keys in lexicographic
/// order.
pub fn quiz_rows(quiz: &Quiz) -> Vec<QuizRow> {
    let mut keys: Vec<&String> = quiz.keys().collect();
    keys.sort_by_key(|key| match key.parse::<u64>() {
        Ok(n) => (0u8, n, String::new()),
        Err(_) => (1u8, 0, (*key).clone()),
    });

    keys.into_iter()
        .map(|key| {
            let item = &quiz[key];
            let choices = item
                .options
                .iter()
                .map(|(option, text)| format!("{option}: {text}"))
                .collect::<Vec<_>>()
                .join(" || ");
            QuizRow {
                mcq: item.mcq.clone(),
                choices,
                correct: item.correct.clone(),
            }
        })
        .collect()
}

/// Render rows as plain text for the CLI.
pub fn render_rows(rows: &[QuizRow]) -> String {
    let mut buf = String::new();
    for (index, row) in rows.iter().enumerate() {
        buf.push_str(&format!("{}. {}\n", index + 1, row.mcq));
        buf.push_str(&format!("   {}\n", row.choices));
        buf.push_str(&format!("   answer: {}\n", row.correct));
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{quiz_item, sample_quiz};

    #[test]
    fn rows_join_options_with_separator() {
        let rows = quiz_rows(&sample_quiz());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].choices, "a: ocean || b: desert || c: forest");
        assert_eq!(rows[0].correct, "b");
    }

    #[test]
    fn rows_order_keys_numerically() {
        let mut quiz = Quiz::new();
        quiz.insert("10".to_string(), quiz_item("tenth question"));
        quiz.insert("2".to_string(), quiz_item("second question"));
        quiz.insert("1".to_string(), quiz_item("first question"));

        let rows = quiz_rows(&quiz);
        let mcqs: Vec<&str> = rows.iter().map(|row| row.mcq.as_str()).collect();
        assert_eq!(
            mcqs,
            vec!["first question", "second question", "tenth question"]
        );
    }

    #[test]
    fn rows_place_non_numeric_keys_after_numeric_ones() {
        let mut quiz = Quiz::new();
        quiz.insert("bonus".to_string(), quiz_item("bonus question"));
        quiz.insert("10".to_string(), quiz_item("tenth question"));
        quiz.insert("extra".to_string(), quiz_item("extra question"));
        quiz.insert("2".to_string(), quiz_item("second question"));

        let rows = quiz_rows(&quiz);
        let mcqs: Vec<&str> = rows.iter().map(|row| row.mcq.as_str()).collect();
        assert_eq!(
            mcqs,
            vec![
                "second question",
                "tenth question",
                "bonus question",
                "extra question"
            ]
        );
    }

    #[test]
    fn render_rows_numbers_questions() {
        let rendered = render_rows(&quiz_rows(&sample_quiz()));
        assert!(rendered.starts_with("1. "));
        assert!(rendered.contains("\n2. "));
        assert!(rendered.contains("answer: b"));
    }
}
