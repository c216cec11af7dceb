use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        CognitiveLevel, DifficultyBand, DifficultyCounts, QuestionSpec, QuestionType, TypeCounts,
    },
};

/// Levels for one band, alternating between its two levels starting at the lower one.
pub fn band_levels(band: DifficultyBand, count: u32) -> Vec<CognitiveLevel> {
    let levels = band.levels();
    (0..count as usize)
        .map(|i| levels[i % levels.len()])
        .collect()
}

/// Low band levels, then medium, then high.
pub fn level_sequence(difficulty: &DifficultyCounts) -> Vec<CognitiveLevel> {
    let mut sequence = band_levels(DifficultyBand::Low, difficulty.low);
    sequence.extend(band_levels(DifficultyBand::Medium, difficulty.medium));
    sequence.extend(band_levels(DifficultyBand::High, difficulty.high));
    sequence
}

/// All multiple choice first, then essay, then short answer.
pub fn type_sequence(types: &TypeCounts) -> Vec<QuestionType> {
    let runs = [
        (QuestionType::MultipleChoice, types.multiple_choice),
        (QuestionType::Essay, types.essay),
        (QuestionType::ShortAnswer, types.short_answer),
    ];

    runs.iter()
        .flat_map(|&(question_type, count)| std::iter::repeat(question_type).take(count as usize))
        .collect()
}

/// Pairs each requested type with a cognitive level, positionally.
///
/// Both distributions must describe the same non-zero number of questions;
/// otherwise nothing is paired and a validation error is returned.
pub fn split(types: &TypeCounts, difficulty: &DifficultyCounts) -> AppResult<Vec<QuestionSpec>> {
    let total = types.total();

    if total == 0 {
        return Err(AppError::ValidationError(
            "Total soal adalah 0. Atur jumlah soal terlebih dahulu.".to_string(),
        ));
    }

    if difficulty.total() != total {
        return Err(AppError::ValidationError(format!(
            "Total soal kesukaran ({}) harus sama dengan total soal dibuat ({})",
            difficulty.total(),
            total
        )));
    }

    let specs = type_sequence(types)
        .into_iter()
        .zip(level_sequence(difficulty))
        .map(|(question_type, cognitive_level)| QuestionSpec {
            question_type,
            cognitive_level,
        })
        .collect();

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use CognitiveLevel::*;

    fn types(multiple_choice: u32, essay: u32, short_answer: u32) -> TypeCounts {
        TypeCounts {
            multiple_choice,
            essay,
            short_answer,
        }
    }

    fn difficulty(low: u32, medium: u32, high: u32) -> DifficultyCounts {
        DifficultyCounts { low, medium, high }
    }

    #[test]
    fn band_levels_alternate_round_robin() {
        assert_eq!(band_levels(DifficultyBand::Low, 5), vec![C1, C2, C1, C2, C1]);
        assert_eq!(band_levels(DifficultyBand::High, 1), vec![C5]);
        assert!(band_levels(DifficultyBand::Medium, 0).is_empty());
    }

    #[test]
    fn split_matches_reference_scenario() {
        let specs = split(&types(5, 2, 3), &difficulty(3, 4, 3)).expect("counts are consistent");

        let levels: Vec<CognitiveLevel> = specs.iter().map(|s| s.cognitive_level).collect();
        assert_eq!(levels, vec![C1, C2, C1, C3, C4, C3, C4, C5, C6, C5]);

        let kinds: Vec<QuestionType> = specs.iter().map(|s| s.question_type).collect();
        let mut expected = vec![QuestionType::MultipleChoice; 5];
        expected.extend(vec![QuestionType::Essay; 2]);
        expected.extend(vec![QuestionType::ShortAnswer; 3]);
        assert_eq!(kinds, expected);
    }

    #[test]
    fn split_rejects_mismatched_totals() {
        let err = split(&types(5, 2, 3), &difficulty(3, 4, 2)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = split(&types(1, 0, 0), &difficulty(1, 1, 0)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn split_rejects_zero_total() {
        let err = split(&types(0, 0, 0), &difficulty(0, 0, 0)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn split_handles_single_band() {
        let specs = split(&types(0, 3, 0), &difficulty(0, 0, 3)).expect("counts are consistent");
        assert!(specs.iter().all(|s| s.question_type == QuestionType::Essay));
        assert_eq!(
            specs.iter().map(|s| s.cognitive_level).collect::<Vec<_>>(),
            vec![C5, C6, C5]
        );
    }
}
