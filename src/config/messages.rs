use serde::Deserialize;

/// 利用者向けメッセージの言語。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

/// エラー表示として出力欄に出すメッセージ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub no_file: &'static str,
    pub invalid_file_type: &'static str,
    pub image_load_failed: &'static str,
    pub pdf_load_failed: &'static str,
    pub no_barcode_found: &'static str,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Messages {
                no_file: "no file",
                invalid_file_type: "invalid file type",
                image_load_failed: "could not load the image",
                pdf_load_failed: "could not load the PDF",
                no_barcode_found: "no barcode found",
            },
            Locale::PtBr => Messages {
                no_file: "nenhum arquivo",
                invalid_file_type: "tipo de arquivo inválido",
                image_load_failed: "não foi possível carregar a imagem",
                pdf_load_failed: "não foi possível carregar o PDF",
                no_barcode_found: "nenhum código de barras encontrado",
            },
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_locale(Locale::En)
    }
}
