use std::collections::BTreeMap;

/// Catalog of languages the synthesis service accepts: code -> display name.
///
/// Populated once at startup from the language directory endpoint. When that
/// fetch fails (or returns garbage) the built-in table below is used instead,
/// so the catalog is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: BTreeMap<String, String>,
}

/// Language used to pre-select the form, matching the service default.
pub const DEFAULT_LANGUAGE: &str = "zh";

impl LanguageCatalog {
    /// Build a catalog from a directory listing. Returns `None` for an empty
    /// map so callers fall back rather than end up with nothing to offer.
    pub fn from_listing(languages: BTreeMap<String, String>) -> Option<Self> {
        if languages.is_empty() {
            return None;
        }
        Some(Self { languages })
    }

    /// The built-in table used when the directory cannot be reached.
    pub fn fallback() -> Self {
        let languages = [
            ("zh", "中文"),
            ("en", "English"),
            ("ja", "日本語"),
            ("ko", "한국어"),
            ("fr", "Français"),
            ("es", "Español"),
        ]
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

        Self { languages }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Display name for a code, falling back to the code itself so the UI
    /// always has something to render.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.languages
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.languages
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Example sentence for a language code. Codes without an entry get the
/// Chinese example, as the original form did.
pub fn example_text(code: &str) -> &'static str {
    match code {
        "zh" => "你好，这是一个文字转语音的演示。",
        "en" => "Hello, this is a text-to-speech demonstration.",
        "ja" => "こんにちは、これはテキスト読み上げのデモンストレーションです。",
        "ko" => "안녕하세요, 이것은 텍스트 음성 변환 데모입니다.",
        "fr" => "Bonjour, ceci est une démonstration de synthèse vocale.",
        "es" => "Hola, esta es una demostración de texto a voz.",
        _ => example_text("zh"),
    }
}
