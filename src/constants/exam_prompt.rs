/// Name of the array field wrapping every generated question.
pub const RESPONSE_ROOT_FIELD: &str = "soal_dan_kisi_kisi";

/// Name under which the response schema is registered with the generation service.
pub const RESPONSE_SCHEMA_NAME: &str = "soal_dan_kisi_kisi";

pub const GENERATOR_ROLE: &str = "Anda adalah generator soal dan kisi-kisi profesional berbasis Taksonomi Bloom (C1-C6).
Tugas Anda adalah menghasilkan soal dan kisi-kisi dalam format JSON yang spesifik.";

pub const JSON_ONLY_INSTRUCTION: &str =
    "JAWAB HANYA DALAM SATU BLOK JSON. JANGAN BERIKAN TEKS PENJELASAN APAPUN DI LUAR BLOK JSON.";

pub const QUESTIONS_DESCRIPTION: &str = "Daftar semua soal, kisi-kisi, dan jawabannya.";
pub const NUMBER_DESCRIPTION: &str = "Nomor urut soal, dimulai dari 1.";
pub const QUESTION_TYPE_DESCRIPTION: &str = "Tipe soal sesuai permintaan.";
pub const COGNITIVE_LEVEL_DESCRIPTION: &str =
    "Capaian kognitif Taksonomi Bloom (C1-C6) sesuai permintaan.";
pub const INDICATOR_DESCRIPTION: &str = "Indikator soal spesifik dan terukur.";
pub const QUESTION_DESCRIPTION: &str = "Teks lengkap pertanyaan soal.";
pub const ANSWER_KEY_DESCRIPTION: &str = "Jawaban yang benar.";
