use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType, Table, TableCell, TableRow};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ExamMetadata, ExamSession, QuestionRecord, QuestionType},
};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const BLUEPRINT_HEADER: [&str; 6] = [
    "No.",
    "Nomor Soal",
    "Capaian Pembelajaran",
    "Indikator Soal",
    "Capaian Kognitif (C1-C6)",
    "Tipe Soal",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBlock {
    /// Level 0 is the document title.
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Paragraph whose label is set in bold.
    Labeled { label: String, value: String },
    PageBreak,
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Word-processor neutral description of an exported exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamDocument {
    pub file_name: String,
    pub blocks: Vec<DocumentBlock>,
}

impl ExamDocument {
    pub fn blueprint(&self) -> Option<(&[String], &[Vec<String>])> {
        self.blocks.iter().find_map(|block| match block {
            DocumentBlock::Table { header, rows } => Some((header.as_slice(), rows.as_slice())),
            _ => None,
        })
    }
}

pub fn build_exam_document(records: &[QuestionRecord], metadata: &ExamMetadata) -> ExamDocument {
    let mut blocks = vec![
        DocumentBlock::Heading {
            level: 0,
            text: format!(
                "Soal {} Kelas {} - Fase {}",
                metadata.subject, metadata.grade, metadata.phase
            ),
        },
        DocumentBlock::Paragraph(format!("Materi: {}", metadata.topic)),
        DocumentBlock::Paragraph("-".repeat(80)),
        DocumentBlock::Heading {
            level: 1,
            text: "Daftar Soal".to_string(),
        },
    ];

    let letters = metadata.phase.option_letters();
    for record in records {
        if let Some(question_type) = record.question_type {
            blocks.push(DocumentBlock::Heading {
                level: 3,
                text: format!("{}. {}", record.number.unwrap_or(0), question_type.label()),
            });
            blocks.push(DocumentBlock::Paragraph(record.question.clone()));

            let answer_label = match question_type {
                QuestionType::MultipleChoice => {
                    blocks.extend(
                        record
                            .options
                            .present(letters)
                            .map(|(letter, text)| {
                                DocumentBlock::Paragraph(format!("  {}. {}", letter, text))
                            }),
                    );
                    "Kunci Jawaban:"
                }
                QuestionType::Essay | QuestionType::ShortAnswer => "Jawaban:",
            };
            blocks.push(DocumentBlock::Labeled {
                label: answer_label.to_string(),
                value: record.answer_key.clone(),
            });
        }
        blocks.push(DocumentBlock::Paragraph(String::new()));
    }

    blocks.push(DocumentBlock::PageBreak);
    blocks.push(DocumentBlock::Heading {
        level: 1,
        text: "Kisi-Kisi Soal".to_string(),
    });
    blocks.push(DocumentBlock::Table {
        header: BLUEPRINT_HEADER.iter().map(|h| h.to_string()).collect(),
        rows: blueprint_rows(records),
    });

    ExamDocument {
        file_name: metadata.file_name(),
        blocks,
    }
}

/// The first column is a fresh 1-based index, independent of `nomor`.
fn blueprint_rows(records: &[QuestionRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            vec![
                (i + 1).to_string(),
                record.number_label(),
                record.learning_outcome.clone(),
                record.indicator.clone(),
                record.level_label().to_string(),
                record.type_label().to_string(),
            ]
        })
        .collect()
}

pub fn render_docx(document: &ExamDocument) -> AppResult<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(heading_style("Title", "Title", 44))
        .add_style(heading_style("Heading1", "Heading 1", 32))
        .add_style(heading_style("Heading3", "Heading 3", 24));

    for block in &document.blocks {
        docx = match block {
            DocumentBlock::Heading { level, text } => docx.add_paragraph(
                Paragraph::new()
                    .style(heading_style_id(*level))
                    .add_run(Run::new().add_text(text)),
            ),
            DocumentBlock::Paragraph(text) => {
                docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
            }
            DocumentBlock::Labeled { label, value } => docx.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("  {}", label)).bold())
                    .add_run(Run::new().add_text(format!(" {}", value))),
            ),
            DocumentBlock::PageBreak => {
                docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            }
            DocumentBlock::Table { header, rows } => {
                let mut table_rows = vec![table_row(header, true)];
                table_rows.extend(rows.iter().map(|row| table_row(row, false)));
                docx.add_table(Table::new(table_rows))
            }
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| AppError::InternalError(format!("Failed to write document: {}", e)))?;

    Ok(buffer.into_inner())
}

/// Builds and renders the download for a stored session.
pub fn export_session(session: &ExamSession) -> AppResult<(String, Vec<u8>)> {
    let document = build_exam_document(&session.records, &session.metadata);
    let bytes = render_docx(&document)?;

    log::info!(
        "Rendered {} ({} questions, {} bytes)",
        document.file_name,
        session.records.len(),
        bytes.len()
    );

    Ok((document.file_name, bytes))
}

fn heading_style(id: &str, name: &str, size: usize) -> Style {
    Style::new(id, StyleType::Paragraph).name(name).size(size).bold()
}

fn heading_style_id(level: u8) -> &'static str {
    match level {
        0 => "Title",
        1 | 2 => "Heading1",
        _ => "Heading3",
    }
}

fn table_row(cells: &[String], bold: bool) -> TableRow {
    TableRow::new(
        cells
            .iter()
            .map(|text| {
                let run = Run::new().add_text(text);
                let run = if bold { run.bold() } else { run };
                TableCell::new().add_paragraph(Paragraph::new().add_run(run))
            })
            .collect(),
    )
}
