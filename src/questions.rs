//! Quiz question bank
//!
//! The bank is plain data: the stock eight general-knowledge questions ship
//! with the crate, and a host can supply its own set as JSON.

use serde::{Deserialize, Serialize};

/// Answer options per question
pub const OPTIONS: usize = 4;

/// One quiz question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: [String; OPTIONS],
    /// Index of the right option, always < `OPTIONS`
    pub correct: usize,
}

impl Question {
    pub fn new(prompt: &str, options: [&str; OPTIONS], correct: usize) -> Self {
        debug_assert!(correct < OPTIONS);
        Self {
            prompt: prompt.to_string(),
            options: options.map(str::to_string),
            correct,
        }
    }
}

/// Parse a host-supplied bank, rejecting out-of-range answer indices
pub fn bank_from_json(json: &str) -> serde_json::Result<Vec<Question>> {
    use serde::de::Error;

    let bank: Vec<Question> = serde_json::from_str(json)?;
    for (i, question) in bank.iter().enumerate() {
        if question.correct >= OPTIONS {
            return Err(serde_json::Error::custom(format!(
                "question {i}: correct index {} out of range",
                question.correct
            )));
        }
    }
    Ok(bank)
}

/// The stock eight-question bank
pub fn default_bank() -> Vec<Question> {
    vec![
        Question::new(
            "Which planet is the largest in the solar system?",
            ["Earth", "Jupiter", "Saturn", "Neptune"],
            1,
        ),
        Question::new("How many continents are there on Earth?", ["5", "6", "7", "8"], 2),
        Question::new(
            "Which programming language did Guido van Rossum create?",
            ["JavaScript", "Python", "Ruby", "Java"],
            1,
        ),
        Question::new("In which year was Google founded?", ["1996", "1998", "2000", "2002"], 1),
        Question::new(
            "What is the tallest mountain in the world?",
            ["K2", "Elbrus", "Everest", "Kilimanjaro"],
            2,
        ),
        Question::new(
            "How many players does a football team field?",
            ["9", "10", "11", "12"],
            2,
        ),
        Question::new(
            "Which element has the symbol Au?",
            ["Silver", "Gold", "Aluminium", "Argon"],
            1,
        ),
        Question::new("What is the capital of Japan?", ["Kyoto", "Osaka", "Tokyo", "Nagoya"], 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bank_is_well_formed() {
        let bank = default_bank();
        assert_eq!(bank.len(), 8);
        for question in &bank {
            assert!(question.correct < OPTIONS);
            assert!(!question.prompt.is_empty());
        }
    }

    #[test]
    fn test_bank_round_trips_through_json() {
        let json = serde_json::to_string(&default_bank()).unwrap();
        let bank = bank_from_json(&json).unwrap();
        assert_eq!(bank.len(), 8);
        assert_eq!(bank[0].correct, 1);
    }

    #[test]
    fn test_out_of_range_answer_is_rejected() {
        let json = r#"[{"prompt": "?", "options": ["a", "b", "c", "d"], "correct": 4}]"#;
        assert!(bank_from_json(json).is_err());
    }
}
