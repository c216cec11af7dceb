use schemars::{generate::SchemaSettings, JsonSchema};
use serde_json::{Map, Value};

use crate::{
    constants::exam_prompt::{
        ANSWER_KEY_DESCRIPTION, COGNITIVE_LEVEL_DESCRIPTION, GENERATOR_ROLE,
        INDICATOR_DESCRIPTION, JSON_ONLY_INSTRUCTION, NUMBER_DESCRIPTION,
        QUESTIONS_DESCRIPTION, QUESTION_DESCRIPTION, QUESTION_TYPE_DESCRIPTION,
        RESPONSE_ROOT_FIELD, RESPONSE_SCHEMA_NAME,
    },
    models::{
        domain::{CognitiveLevel, Phase, QuestionSpec, QuestionType},
        dto::request::GenerateExamRequestDto,
    },
    services::generation_service::GenerationRequest,
};

/// Keywords stripped from generated schemas; the generation endpoint only
/// understands a subset of JSON Schema.
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "$schema",
    "title",
    "format",
    "default",
    "minimum",
    "maximum",
    "definitions",
    "$defs",
];

#[derive(JsonSchema)]
#[allow(dead_code)]
struct FourOptions {
    #[schemars(rename = "A")]
    a: Option<String>,
    #[schemars(rename = "B")]
    b: Option<String>,
    #[schemars(rename = "C")]
    c: Option<String>,
    #[schemars(rename = "D")]
    d: Option<String>,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct FiveOptions {
    #[schemars(rename = "A")]
    a: Option<String>,
    #[schemars(rename = "B")]
    b: Option<String>,
    #[schemars(rename = "C")]
    c: Option<String>,
    #[schemars(rename = "D")]
    d: Option<String>,
    #[schemars(rename = "E")]
    e: Option<String>,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct GeneratedQuestionShape<O> {
    #[schemars(rename = "nomor")]
    number: u32,
    #[schemars(rename = "tipe_soal")]
    question_type: QuestionType,
    #[schemars(rename = "cp_pembelajaran")]
    learning_outcome: String,
    #[schemars(rename = "indikator_soal")]
    indicator: String,
    #[schemars(rename = "capaian_kognitif")]
    cognitive_level: CognitiveLevel,
    #[schemars(rename = "pertanyaan")]
    question: String,
    #[schemars(rename = "opsi_jawaban")]
    options: Option<O>,
    #[schemars(rename = "kunci_jawaban")]
    answer_key: String,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct GeneratedExamShape<O> {
    #[schemars(rename = "soal_dan_kisi_kisi")]
    questions: Vec<GeneratedQuestionShape<O>>,
}

/// Instruction text for one exam request.
pub fn build_prompt(request: &GenerateExamRequestDto, specs: &[QuestionSpec]) -> String {
    let phase = request.phase;
    let option_count = phase.option_count();
    let letters = letter_list(phase);
    let grade = request.grade.trim();

    let spec_lines = specs
        .iter()
        .map(|spec| {
            format!(
                "- Tipe: {}, Kognitif: {}",
                spec.question_type.prompt_description(option_count),
                spec.cognitive_level
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{role}

**Tujuan:** Membuat {total} soal untuk {subject} Kelas {grade} (Fase {phase}).
**Sub Materi:** {sub_topics}.
**Capaian Pembelajaran (CP) Rujukan:** \"{outcome}\"

**Spesifikasi Soal:**
{spec_lines}

**Instruksi Khusus:**
1. Pastikan setiap soal unik dan sesuai dengan Tipe Soal dan Capaian Kognitif (C1-C6) yang diminta, serta **sesuai untuk tingkat Kelas {grade}**.
2. Untuk Pilihan Ganda, berikan {option_count} opsi ({letters}) dan tentukan kunci jawabannya.
3. Untuk semua tipe soal, sertakan Jawaban atau Kunci Jawaban.
4. Buatlah indikator soal yang spesifik untuk setiap soal.
5. {json_only}",
        role = GENERATOR_ROLE,
        total = specs.len(),
        subject = request.subject.trim(),
        sub_topics = request.sub_topics.join(", "),
        outcome = request.learning_outcome.trim(),
        json_only = JSON_ONLY_INSTRUCTION,
    )
}

/// Response schema for one exam request. Multiple-choice options are sized by phase.
pub fn build_schema(phase: Phase, subject: &str) -> Value {
    let mut schema = if phase.option_count() == 5 {
        root_schema::<GeneratedExamShape<FiveOptions>>()
    } else {
        root_schema::<GeneratedExamShape<FourOptions>>()
    };

    let letters = phase.option_letters();
    let last_letter = letters.last().copied().unwrap_or('D');
    let item = format!("/properties/{}/items/properties", RESPONSE_ROOT_FIELD);

    set_description(
        &mut schema,
        &format!("/properties/{}", RESPONSE_ROOT_FIELD),
        QUESTIONS_DESCRIPTION.to_string(),
    );
    set_description(&mut schema, &format!("{}/nomor", item), NUMBER_DESCRIPTION.to_string());
    set_description(
        &mut schema,
        &format!("{}/tipe_soal", item),
        QUESTION_TYPE_DESCRIPTION.to_string(),
    );
    set_description(
        &mut schema,
        &format!("{}/capaian_kognitif", item),
        COGNITIVE_LEVEL_DESCRIPTION.to_string(),
    );
    set_description(
        &mut schema,
        &format!("{}/cp_pembelajaran", item),
        format!(
            "Capaian Pembelajaran yang sudah disesuaikan dengan {} dan disalin secara singkat.",
            subject.trim()
        ),
    );
    set_description(
        &mut schema,
        &format!("{}/indikator_soal", item),
        INDICATOR_DESCRIPTION.to_string(),
    );
    set_description(
        &mut schema,
        &format!("{}/pertanyaan", item),
        QUESTION_DESCRIPTION.to_string(),
    );
    set_description(
        &mut schema,
        &format!("{}/opsi_jawaban", item),
        format!(
            "Hanya untuk Pilihan Ganda. Berisi {} opsi (A sampai {}).",
            letters.len(),
            last_letter
        ),
    );
    set_description(
        &mut schema,
        &format!("{}/kunci_jawaban", item),
        ANSWER_KEY_DESCRIPTION.to_string(),
    );

    schema
}

pub fn build_generation_request(
    request: &GenerateExamRequestDto,
    specs: &[QuestionSpec],
) -> GenerationRequest {
    GenerationRequest {
        prompt: build_prompt(request, specs),
        schema_name: RESPONSE_SCHEMA_NAME.to_string(),
        schema: build_schema(request.phase, &request.subject),
    }
}

fn letter_list(phase: Phase) -> String {
    phase
        .option_letters()
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn root_schema<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let mut value = generator.into_root_schema_for::<T>().to_value();
    sanitize(&mut value);
    value
}

/// Drops unsupported keywords and folds nullable unions into their non-null
/// type; optional fields are expressed by leaving them out of `required`.
fn sanitize(value: &mut Value) {
    match value {
        Value::Object(map) => {
            while fold_nullable_any_of(map) {}
            for keyword in UNSUPPORTED_KEYWORDS {
                map.remove(*keyword);
            }
            collapse_nullable_type(map);

            for child in map.values_mut() {
                sanitize(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sanitize),
        _ => {}
    }
}

fn fold_nullable_any_of(map: &mut Map<String, Value>) -> bool {
    let Some(Value::Array(variants)) = map.get("anyOf") else {
        return false;
    };
    if variants.len() != 2 {
        return false;
    }

    let mut non_null = variants
        .iter()
        .filter(|v| v.get("type").and_then(Value::as_str) != Some("null"));
    let Some(Value::Object(inner)) = non_null.next().cloned() else {
        return false;
    };
    if non_null.next().is_some() {
        return false;
    }

    map.remove("anyOf");
    for (key, val) in inner {
        map.entry(key).or_insert(val);
    }
    true
}

fn collapse_nullable_type(map: &mut Map<String, Value>) {
    let Some(Value::Array(types)) = map.get("type") else {
        return;
    };

    let non_null: Vec<&Value> = types.iter().filter(|t| t.as_str() != Some("null")).collect();
    if let [only] = non_null.as_slice() {
        let only = (*only).clone();
        map.insert("type".to_string(), only);
    }
}

fn set_description(schema: &mut Value, pointer: &str, description: String) {
    match schema.pointer_mut(pointer) {
        Some(Value::Object(map)) => {
            map.insert("description".to_string(), Value::String(description));
        }
        _ => log::warn!("Response schema has no object at {}", pointer),
    }
}
