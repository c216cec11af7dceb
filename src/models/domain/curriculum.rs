use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Curriculum phase. Each phase covers a fixed set of grades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Phase {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Phase {
    pub const ALL: [Phase; 6] = [Phase::A, Phase::B, Phase::C, Phase::D, Phase::E, Phase::F];

    pub fn grades(self) -> &'static [&'static str] {
        match self {
            Phase::A => &["1", "2"],
            Phase::B => &["3", "4"],
            Phase::C => &["5", "6"],
            Phase::D => &["7", "8", "9"],
            Phase::E => &["10"],
            Phase::F => &["11", "12"],
        }
    }

    pub fn accepts_grade(self, grade: &str) -> bool {
        self.grades().contains(&grade.trim())
    }

    /// Multiple-choice letters offered in this phase, in letter order.
    pub fn option_letters(self) -> &'static [char] {
        match self {
            Phase::E | Phase::F => &['A', 'B', 'C', 'D', 'E'],
            _ => &['A', 'B', 'C', 'D'],
        }
    }

    pub fn option_count(self) -> usize {
        self.option_letters().len()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
            Phase::D => "D",
            Phase::E => "E",
            Phase::F => "F",
        };
        f.write_str(letter)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum QuestionType {
    #[serde(rename = "Pilihan Ganda")]
    MultipleChoice,
    #[serde(rename = "Essay")]
    Essay,
    #[serde(rename = "Isian Singkat")]
    ShortAnswer,
}

impl QuestionType {
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Pilihan Ganda",
            QuestionType::Essay => "Essay",
            QuestionType::ShortAnswer => "Isian Singkat",
        }
    }

    /// Longer wording used in the prompt's per-question specification lines.
    pub fn prompt_description(self, option_count: usize) -> String {
        match self {
            QuestionType::MultipleChoice => {
                format!("Pilihan Ganda ({} opsi, 1 kunci jawaban)", option_count)
            }
            QuestionType::Essay => "Essay (Uraian)".to_string(),
            QuestionType::ShortAnswer => "Isian Singkat (Jawaban 1 kata/frasa)".to_string(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pilihan Ganda" => Ok(QuestionType::MultipleChoice),
            "Essay" => Ok(QuestionType::Essay),
            "Isian Singkat" => Ok(QuestionType::ShortAnswer),
            other => Err(format!("unknown question type '{}'", other)),
        }
    }
}

// Bloom's taxonomy tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum CognitiveLevel {
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
}

impl CognitiveLevel {
    pub fn label(self) -> &'static str {
        match self {
            CognitiveLevel::C1 => "C1",
            CognitiveLevel::C2 => "C2",
            CognitiveLevel::C3 => "C3",
            CognitiveLevel::C4 => "C4",
            CognitiveLevel::C5 => "C5",
            CognitiveLevel::C6 => "C6",
        }
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CognitiveLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C1" => Ok(CognitiveLevel::C1),
            "C2" => Ok(CognitiveLevel::C2),
            "C3" => Ok(CognitiveLevel::C3),
            "C4" => Ok(CognitiveLevel::C4),
            "C5" => Ok(CognitiveLevel::C5),
            "C6" => Ok(CognitiveLevel::C6),
            other => Err(format!("unknown cognitive level '{}'", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DifficultyBand {
    Low,
    Medium,
    High,
}

impl DifficultyBand {
    pub const ALL: [DifficultyBand; 3] =
        [DifficultyBand::Low, DifficultyBand::Medium, DifficultyBand::High];

    pub fn levels(self) -> [CognitiveLevel; 2] {
        match self {
            DifficultyBand::Low => [CognitiveLevel::C1, CognitiveLevel::C2],
            DifficultyBand::Medium => [CognitiveLevel::C3, CognitiveLevel::C4],
            DifficultyBand::High => [CognitiveLevel::C5, CognitiveLevel::C6],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyBand::Low => "LOTS (C1-C2)",
            DifficultyBand::Medium => "MOTS (C3-C4)",
            DifficultyBand::High => "HOTS (C5-C6)",
        }
    }
}
