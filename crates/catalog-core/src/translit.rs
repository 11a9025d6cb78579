//! # Transliteration
//!
//! Maps Cyrillic text to a Latin, identifier-friendly form. The table covers
//! the Russian alphabet plus the Tajik letters `ғ`, `қ`, `ҳ`, `ҷ`. Soft and
//! hard signs disappear.
//!
//! The table is built once on first use and never mutated, so concurrent
//! callers share it without locking.

use std::collections::HashMap;
use std::sync::LazyLock;

use unicode_script::{Script, UnicodeScript};

/// Replacement for every letter the transliterator knows about.
///
/// Letters are listed uppercase first, then lowercase.
pub const TRANSLIT_TABLE: &[(char, &str)] = &[
    ('А', "A"), ('а', "a"),
    ('Б', "B"), ('б', "b"),
    ('В', "V"), ('в', "v"),
    ('Г', "G"), ('г', "g"),
    ('Д', "D"), ('д', "d"),
    ('Е', "E"), ('е', "e"),
    ('Ё', "Yo"), ('ё', "yo"),
    ('Ж', "Zh"), ('ж', "zh"),
    ('З', "Z"), ('з', "z"),
    ('И', "I"), ('и', "i"),
    ('Й', "J"), ('й', "j"),
    ('К', "K"), ('к', "k"),
    ('Л', "L"), ('л', "l"),
    ('М', "M"), ('м', "m"),
    ('Н', "N"), ('н', "n"),
    ('О', "O"), ('о', "o"),
    ('П', "P"), ('п', "p"),
    ('Р', "R"), ('р', "r"),
    ('С', "S"), ('с', "s"),
    ('Т', "T"), ('т', "t"),
    ('У', "U"), ('у', "u"),
    ('Ф', "F"), ('ф', "f"),
    ('Х', "Kh"), ('х', "kh"),
    ('Ц', "Ts"), ('ц', "ts"),
    ('Ч', "Ch"), ('ч', "ch"),
    ('Ш', "Sh"), ('ш', "sh"),
    ('Щ', "Shch"), ('щ', "shch"),
    ('Ъ', ""), ('ъ', ""),
    ('Ы', "Y"), ('ы', "y"),
    ('Ь', ""), ('ь', ""),
    ('Э', "E"), ('э', "e"),
    ('Ю', "Yu"), ('ю', "yu"),
    ('Я', "Ya"), ('я', "ya"),
    // Tajik
    ('Ғ', "G"), ('ғ', "g"),
    ('Қ', "Q"), ('қ', "q"),
    ('Ҳ', "H"), ('ҳ', "h"),
    ('Ҷ', "J"), ('ҷ', "j"),
];

static TABLE: LazyLock<HashMap<char, &'static str>> =
    LazyLock::new(|| TRANSLIT_TABLE.iter().copied().collect());

/// Returns true if `c` belongs to the Cyrillic script.
///
/// Combining marks shared between scripts (script `Inherited`) do not count.
pub fn is_cyrillic(c: char) -> bool {
    c.script() == Script::Cyrillic
}

/// Returns true if `text` contains at least one Cyrillic character.
pub fn contains_cyrillic(text: &str) -> bool {
    text.chars().any(is_cyrillic)
}

/// Transliterate `text` character by character.
///
/// Text without any Cyrillic character is returned unchanged. Cyrillic
/// characters missing from [`TRANSLIT_TABLE`] are copied through as-is,
/// as is everything outside the script.
///
/// ```
/// use catalog_core::transliterate;
///
/// assert_eq!(transliterate("Пылесосы"), "Pylesosy");
/// assert_eq!(transliterate("ҷой"), "joj");
/// assert_eq!(transliterate("cpu"), "cpu");
/// ```
pub fn transliterate(text: &str) -> String {
    if !contains_cyrillic(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match TABLE.get(&c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ascii_is_returned_unchanged() {
        assert_eq!(transliterate("Test"), "Test");
        assert_eq!(transliterate("Apple A-series"), "Apple A-series");
        assert_eq!(transliterate(""), "");
    }

    #[test]
    fn russian_words() {
        assert_eq!(transliterate("Смартфоны"), "Smartfony");
        assert_eq!(transliterate("Электроника"), "Elektronika");
        assert_eq!(transliterate("гарантия"), "garantiya");
        assert_eq!(transliterate("батарея"), "batareya");
        assert_eq!(transliterate("мощность"), "moshchnost");
        assert_eq!(transliterate("цвет"), "tsvet");
    }

    #[test]
    fn digraphs_keep_case() {
        assert_eq!(transliterate("Щука"), "Shchuka");
        assert_eq!(transliterate("щи"), "shchi");
        assert_eq!(transliterate("Жук"), "Zhuk");
        assert_eq!(transliterate("Хлеб"), "Khleb");
        assert_eq!(transliterate("Ёж"), "Yozh");
    }

    #[test]
    fn signs_are_dropped() {
        assert_eq!(transliterate("объём"), "obyom");
        assert_eq!(transliterate("ь"), "");
        assert_eq!(transliterate("Ъ"), "");
    }

    #[test]
    fn tajik_letters() {
        assert_eq!(transliterate("Ғ ғ Қ қ Ҳ ҳ Ҷ ҷ"), "G g Q q H h J j");
        assert_eq!(transliterate("тоҷикӣ"), "tojikӣ");
    }

    #[test]
    fn mixed_text_keeps_non_cyrillic() {
        assert_eq!(transliterate("ram_память 16"), "ram_pamyat 16");
    }

    #[test]
    fn unmapped_cyrillic_passes_through() {
        // Ukrainian yi is Cyrillic but not in the table.
        assert_eq!(transliterate("ї"), "ї");
        assert!(is_cyrillic('ї'));
    }

    #[test]
    fn script_classification() {
        // Supplement, Extended-A/B/C/D.
        for c in ['Ԁ', '\u{2DE0}', '\u{A640}', '\u{1C80}', '\u{1E030}', '\u{1E08F}'] {
            assert!(is_cyrillic(c), "U+{:04X} should be Cyrillic", c as u32);
        }
        // Greek, CJK, Latin-1 and a combining mark shared across scripts.
        for c in ['α', 'Ω', '中', 'é', 'ß', '\u{0485}'] {
            assert!(!is_cyrillic(c), "U+{:04X} should not be Cyrillic", c as u32);
        }
    }

    #[test]
    fn non_cyrillic_scripts_are_untouched() {
        assert_eq!(transliterate("Ηλεκτρονικά 电子产品 café"), "Ηλεκτρονικά 电子产品 café");
        assert_eq!(transliterate("ноутбук ασ"), "noutbuk ασ");
    }

    #[test]
    fn table_entries_are_cyrillic_and_latin() {
        for (c, latin) in TRANSLIT_TABLE {
            assert!(is_cyrillic(*c), "{c} should be Cyrillic");
            assert!(latin.is_ascii(), "{latin} should be ASCII");
            assert!(latin.len() <= 4);
        }
    }

    #[test]
    fn table_has_no_duplicate_keys() {
        assert_eq!(TABLE.len(), TRANSLIT_TABLE.len());
    }

    proptest! {
        /// Text without Cyrillic characters is an identity.
        #[test]
        fn identity_without_cyrillic(s in "[ -~α-ωΑ-Ω一-龥À-ÿ]{0,40}") {
            prop_assert_eq!(transliterate(&s), s);
        }

        /// Same for arbitrary printable text that happens to have no Cyrillic.
        #[test]
        fn identity_for_any_non_cyrillic_text(
            s in "\\PC{0,40}".prop_filter("no Cyrillic", |s| !contains_cyrillic(s)),
        ) {
            prop_assert_eq!(transliterate(&s), s);
        }

        /// A second pass never changes already transliterated text.
        #[test]
        fn idempotent(s in "[а-яА-ЯёЁғқҳҷa-z0-9 _]{0,40}") {
            let once = transliterate(&s);
            prop_assert_eq!(transliterate(&once), once.clone());
            prop_assert!(!contains_cyrillic(&once));
        }
    }
}
