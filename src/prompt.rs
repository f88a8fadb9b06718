//! Prompt template for book summaries.

use crate::summary::{Language, SummaryRequest};

/// Build the full prompt sent to the model for one summarization request
pub fn build_prompt(request: &SummaryRequest) -> String {
    format!(
        r#"Kamu adalah asisten perpustakaan profesional. Buat ringkasan buku {language}.

INFORMASI BUKU:
{text}

INSTRUKSI:
1. Panjang: {min}-{max} karakter
2. Fokus: plot utama, konflik, karakter, tema
3. JANGAN ungkap spoiler atau ending
4. Tulis 2-3 paragraf mengalir
5. Mulai langsung tanpa pembukaan seperti "Buku ini bercerita..."

CONTOH FORMAT:
Sophie Amundsen adalah gadis 14 tahun yang menerima surat misterius berisi pertanyaan filosofis. Melalui korespondensi dengan filsuf Alberto Knox, ia memulai perjalanan intelektual menjelajahi sejarah pemikiran dari Yunani Kuno hingga modern.

Konflik muncul ketika Sophie menyadari realitas di sekitarnya mungkin tidak seperti yang terlihat. Ia dan Alberto menghadapi eksistensi mereka sebagai bagian dari cerita yang ditulis orang lain, mempertanyakan hakikat kebebasan dan identitas.

Sekarang buat ringkasan:"#,
        language = language_instruction(request.language),
        text = request.text,
        min = request.min_length,
        max = request.max_length,
    )
}

/// Phrase naming the output language inside the prompt
pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::Indonesian => "dalam Bahasa Indonesia",
        Language::English => "in English",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_branch() {
        let prompt = build_prompt(&SummaryRequest::new("A wizard boy attends a magic school"));
        assert!(prompt.contains("Buat ringkasan buku dalam Bahasa Indonesia."));
        assert!(!prompt.contains("in English"));
    }

    #[test]
    fn test_english_branch() {
        let request = SummaryRequest::new("A wizard boy").with_language(Language::English);
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Buat ringkasan buku in English."));
        assert!(!prompt.contains("Bahasa Indonesia"));
    }

    #[test]
    fn test_exactly_two_branches() {
        let id = build_prompt(&SummaryRequest::new("x").with_language(Language::from("id")));
        let en = build_prompt(&SummaryRequest::new("x").with_language(Language::from("en")));
        let other = build_prompt(&SummaryRequest::new("x").with_language(Language::from("jv")));
        assert_ne!(id, en);
        assert_eq!(en, other);
    }

    #[test]
    fn test_length_band_and_text_are_embedded() {
        let request = SummaryRequest::new("Sophie's World").with_length(120, 340);
        let prompt = build_prompt(&request);
        assert!(prompt.contains("1. Panjang: 120-340 karakter"));
        assert!(prompt.contains("INFORMASI BUKU:\nSophie's World\n"));
    }

    #[test]
    fn test_default_band() {
        let prompt = build_prompt(&SummaryRequest::new("x"));
        assert!(prompt.contains("1. Panjang: 200-500 karakter"));
    }
}
