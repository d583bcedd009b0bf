//! Language display name to ISO 639-1 code lookup

use std::collections::HashMap;

/// Code returned when a display name is not recognized
pub const UNDETERMINED: &str = "und";

/// English display names of the ISO 639-1 languages
pub static ISO_639_1: &[(&str, &str)] = &[
    ("Afar", "aa"),
    ("Abkhazian", "ab"),
    ("Avestan", "ae"),
    ("Afrikaans", "af"),
    ("Akan", "ak"),
    ("Amharic", "am"),
    ("Aragonese", "an"),
    ("Arabic", "ar"),
    ("Assamese", "as"),
    ("Avaric", "av"),
    ("Aymara", "ay"),
    ("Azerbaijani", "az"),
    ("Bashkir", "ba"),
    ("Belarusian", "be"),
    ("Bulgarian", "bg"),
    ("Bislama", "bi"),
    ("Bambara", "bm"),
    ("Bengali", "bn"),
    ("Tibetan", "bo"),
    ("Breton", "br"),
    ("Bosnian", "bs"),
    ("Catalan", "ca"),
    ("Chechen", "ce"),
    ("Chamorro", "ch"),
    ("Corsican", "co"),
    ("Cree", "cr"),
    ("Czech", "cs"),
    ("Church Slavic", "cu"),
    ("Chuvash", "cv"),
    ("Welsh", "cy"),
    ("Danish", "da"),
    ("German", "de"),
    ("Divehi", "dv"),
    ("Dzongkha", "dz"),
    ("Ewe", "ee"),
    ("Greek", "el"),
    ("English", "en"),
    ("Esperanto", "eo"),
    ("Spanish", "es"),
    ("Estonian", "et"),
    ("Basque", "eu"),
    ("Persian", "fa"),
    ("Fulah", "ff"),
    ("Finnish", "fi"),
    ("Fijian", "fj"),
    ("Faroese", "fo"),
    ("French", "fr"),
    ("Western Frisian", "fy"),
    ("Irish", "ga"),
    ("Scottish Gaelic", "gd"),
    ("Galician", "gl"),
    ("Guarani", "gn"),
    ("Gujarati", "gu"),
    ("Manx", "gv"),
    ("Hausa", "ha"),
    ("Hebrew", "he"),
    ("Hindi", "hi"),
    ("Hiri Motu", "ho"),
    ("Croatian", "hr"),
    ("Haitian Creole", "ht"),
    ("Hungarian", "hu"),
    ("Armenian", "hy"),
    ("Herero", "hz"),
    ("Interlingua", "ia"),
    ("Indonesian", "id"),
    ("Interlingue", "ie"),
    ("Igbo", "ig"),
    ("Sichuan Yi", "ii"),
    ("Inupiaq", "ik"),
    ("Ido", "io"),
    ("Icelandic", "is"),
    ("Italian", "it"),
    ("Inuktitut", "iu"),
    ("Japanese", "ja"),
    ("Javanese", "jv"),
    ("Georgian", "ka"),
    ("Kongo", "kg"),
    ("Kikuyu", "ki"),
    ("Kuanyama", "kj"),
    ("Kazakh", "kk"),
    ("Kalaallisut", "kl"),
    ("Khmer", "km"),
    ("Kannada", "kn"),
    ("Korean", "ko"),
    ("Kanuri", "kr"),
    ("Kashmiri", "ks"),
    ("Kurdish", "ku"),
    ("Komi", "kv"),
    ("Cornish", "kw"),
    ("Kyrgyz", "ky"),
    ("Latin", "la"),
    ("Luxembourgish", "lb"),
    ("Ganda", "lg"),
    ("Limburgish", "li"),
    ("Lingala", "ln"),
    ("Lao", "lo"),
    ("Lithuanian", "lt"),
    ("Luba-Katanga", "lu"),
    ("Latvian", "lv"),
    ("Malagasy", "mg"),
    ("Marshallese", "mh"),
    ("Maori", "mi"),
    ("Macedonian", "mk"),
    ("Malayalam", "ml"),
    ("Mongolian", "mn"),
    ("Marathi", "mr"),
    ("Malay", "ms"),
    ("Maltese", "mt"),
    ("Burmese", "my"),
    ("Nauru", "na"),
    ("Norwegian Bokmål", "nb"),
    ("North Ndebele", "nd"),
    ("Nepali", "ne"),
    ("Ndonga", "ng"),
    ("Dutch", "nl"),
    ("Norwegian Nynorsk", "nn"),
    ("Norwegian", "no"),
    ("South Ndebele", "nr"),
    ("Navajo", "nv"),
    ("Chichewa", "ny"),
    ("Occitan", "oc"),
    ("Ojibwa", "oj"),
    ("Oromo", "om"),
    ("Odia", "or"),
    ("Ossetian", "os"),
    ("Punjabi", "pa"),
    ("Pali", "pi"),
    ("Polish", "pl"),
    ("Pashto", "ps"),
    ("Portuguese", "pt"),
    ("Quechua", "qu"),
    ("Romansh", "rm"),
    ("Kirundi", "rn"),
    ("Romanian", "ro"),
    ("Russian", "ru"),
    ("Kinyarwanda", "rw"),
    ("Sanskrit", "sa"),
    ("Sardinian", "sc"),
    ("Sindhi", "sd"),
    ("Northern Sami", "se"),
    ("Sango", "sg"),
    ("Sinhala", "si"),
    ("Slovak", "sk"),
    ("Slovenian", "sl"),
    ("Samoan", "sm"),
    ("Shona", "sn"),
    ("Somali", "so"),
    ("Albanian", "sq"),
    ("Serbian", "sr"),
    ("Swati", "ss"),
    ("Southern Sotho", "st"),
    ("Sundanese", "su"),
    ("Swedish", "sv"),
    ("Swahili", "sw"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Tajik", "tg"),
    ("Thai", "th"),
    ("Tigrinya", "ti"),
    ("Turkmen", "tk"),
    ("Tagalog", "tl"),
    ("Tswana", "tn"),
    ("Tonga", "to"),
    ("Turkish", "tr"),
    ("Tsonga", "ts"),
    ("Tatar", "tt"),
    ("Twi", "tw"),
    ("Tahitian", "ty"),
    ("Uyghur", "ug"),
    ("Ukrainian", "uk"),
    ("Urdu", "ur"),
    ("Uzbek", "uz"),
    ("Venda", "ve"),
    ("Vietnamese", "vi"),
    ("Volapük", "vo"),
    ("Walloon", "wa"),
    ("Wolof", "wo"),
    ("Xhosa", "xh"),
    ("Yiddish", "yi"),
    ("Yoruba", "yo"),
    ("Zhuang", "za"),
    ("Chinese", "zh"),
    ("Zulu", "zu"),
];

/// Resolves language display names to ISO 639-1 codes
///
/// Lookup is on the trimmed name and ignores case. Names missing from
/// the table resolve to [`UNDETERMINED`]; resolution never fails.
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    codes: HashMap<String, String>,
}

impl LanguageResolver {
    /// Create a resolver from a table of `(display name, code)` pairs
    ///
    /// Entries with an empty code are skipped so that a resolved code is
    /// never empty.
    pub fn new<I, N, C>(table: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: Into<String>,
    {
        let codes = table
            .into_iter()
            .filter_map(|(name, code)| {
                let code: String = code.into();
                let code = code.trim();
                if code.is_empty() {
                    return None;
                }
                Some((normalize_name(name.as_ref()), code.to_string()))
            })
            .collect();

        Self { codes }
    }

    /// Resolve a display name (e.g. "English") to its code (e.g. "en")
    ///
    /// Matching is looser than an exact table lookup: surrounding
    /// whitespace is ignored and case is folded, so `" english"` and
    /// `"ENGLISH"` both resolve to `"en"`.
    pub fn resolve(&self, display_name: &str) -> &str {
        self.codes
            .get(&normalize_name(display_name))
            .map(String::as_str)
            .unwrap_or(UNDETERMINED)
    }

    /// Number of known display names
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for LanguageResolver {
    fn default() -> Self {
        Self::new(ISO_639_1.iter().copied())
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
