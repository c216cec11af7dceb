use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::domain::curriculum::{CognitiveLevel, QuestionType};

/// One requested question: which type it is and at which cognitive level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    pub question_type: QuestionType,
    pub cognitive_level: CognitiveLevel,
}

/// A generated question as returned by the generation service.
///
/// Every field is optional on the wire. Missing or `null` text renders as an
/// empty string, and an unrecognised type or level literal is treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    #[serde(rename = "nomor", default, deserialize_with = "lenient_number")]
    pub number: Option<u32>,
    #[serde(rename = "tipe_soal", default, deserialize_with = "lenient_label")]
    pub question_type: Option<QuestionType>,
    #[serde(rename = "cp_pembelajaran", default, deserialize_with = "null_as_default")]
    pub learning_outcome: String,
    #[serde(rename = "indikator_soal", default, deserialize_with = "null_as_default")]
    pub indicator: String,
    #[serde(rename = "capaian_kognitif", default, deserialize_with = "lenient_label")]
    pub cognitive_level: Option<CognitiveLevel>,
    #[serde(rename = "pertanyaan", default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(rename = "opsi_jawaban", default, deserialize_with = "null_as_default")]
    pub options: AnswerOptions,
    #[serde(rename = "kunci_jawaban", default, deserialize_with = "null_as_default")]
    pub answer_key: String,
}

impl QuestionRecord {
    pub fn type_label(&self) -> &'static str {
        self.question_type.map(QuestionType::label).unwrap_or("")
    }

    pub fn level_label(&self) -> &'static str {
        self.cognitive_level.map(CognitiveLevel::label).unwrap_or("")
    }

    pub fn number_label(&self) -> String {
        self.number.map(|n| n.to_string()).unwrap_or_default()
    }
}

/// Lettered answer options. Holds up to five letters; how many are active
/// depends on the phase the exam was generated for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerOptions {
    #[serde(rename = "A", default, skip_serializing_if = "Option::is_none")]
    pub a: Option<String>,
    #[serde(rename = "B", default, skip_serializing_if = "Option::is_none")]
    pub b: Option<String>,
    #[serde(rename = "C", default, skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
    #[serde(rename = "D", default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(rename = "E", default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

impl AnswerOptions {
    pub fn get(&self, letter: char) -> Option<&str> {
        let slot = match letter {
            'A' => &self.a,
            'B' => &self.b,
            'C' => &self.c,
            'D' => &self.d,
            'E' => &self.e,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Options present for the given letters, in the order the letters are given.
    pub fn present<'a>(
        &'a self,
        letters: &'a [char],
    ) -> impl Iterator<Item = (char, &'a str)> + 'a {
        letters
            .iter()
            .filter_map(move |&letter| self.get(letter).map(|text| (letter, text)))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|label| label.parse().ok()))
}

/// Accepts `1`, `1.0`, `"1"` and `"1.0"`; anything else is treated as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let whole = |value: f64| {
        (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value))
            .then_some(value as u32)
    };

    let number = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| n.as_f64().and_then(whole)),
        Some(Value::String(text)) => {
            let text = text.trim();
            text.parse::<u32>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    };
    Ok(number)
}
