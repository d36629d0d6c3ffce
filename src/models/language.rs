use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Hi,
    As,
}

impl std::str::FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "hi" => Ok(Self::Hi),
            "as" => Ok(Self::As),
            other => Err(format!("unsupported language code '{other}'")),
        }
    }
}

/// Selectable locale descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub code: LanguageCode,
    pub name: String,
    pub native_name: String,
}

impl Language {
    pub fn from_code(code: LanguageCode) -> Self {
        let (name, native_name) = match code {
            LanguageCode::En => ("English", "English"),
            LanguageCode::Hi => ("Hindi", "हिन्दी"),
            LanguageCode::As => ("Assamese", "অসমীয়া"),
        };
        Self {
            code,
            name: name.to_string(),
            native_name: native_name.to_string(),
        }
    }

    pub fn supported() -> [Language; 3] {
        [
            Self::from_code(LanguageCode::En),
            Self::from_code(LanguageCode::Hi),
            Self::from_code(LanguageCode::As),
        ]
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::from_code(LanguageCode::En)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        let l = Language::default();
        assert_eq!(l.code, LanguageCode::En);
        assert_eq!(l.native_name, "English");
    }

    #[test]
    fn test_supported_codes_parse() {
        for l in Language::supported() {
            let code = serde_json::to_value(l.code).unwrap();
            let parsed: LanguageCode = code.as_str().unwrap().parse().unwrap();
            assert_eq!(parsed, l.code);
        }
        assert!("fr".parse::<LanguageCode>().is_err());
    }
}
