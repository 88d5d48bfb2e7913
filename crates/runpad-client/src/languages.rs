//! Static list of languages offered for submissions.
//!
//! Ids are the execution service's language ids and are forwarded unmodified.
//! The list is only used for display and lookup; any id may be submitted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub id: i64,
    pub name: &'static str,
}

pub const DEFAULT_LANGUAGE_ID: i64 = 52;

pub const DEFAULT_SOURCE: &str = r#"#include<stdio.h>

int main(void) {
    puts("Hello World!");
    return 0;
}"#;

pub static LANGUAGES: &[LanguageOption] = &[
    LanguageOption { id: 52, name: "C" },
    LanguageOption { id: 54, name: "C++ (GCC 9.2.0)" },
    LanguageOption { id: 60, name: "Go (1.13.5)" },
    LanguageOption { id: 62, name: "Java (OpenJDK 13.0.1)" },
    LanguageOption { id: 63, name: "JavaScript (Node.js 12.14.0)" },
    LanguageOption { id: 71, name: "Python (3.8.1)" },
    LanguageOption { id: 73, name: "Rust (1.40.0)" },
];

pub fn find_language(id: i64) -> Option<&'static LanguageOption> {
    LANGUAGES.iter().find(|language| language.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_listed() {
        let language = find_language(DEFAULT_LANGUAGE_ID).unwrap();
        assert_eq!(language.name, "C");
    }

    #[test]
    fn test_language_ids_are_unique() {
        let mut ids: Vec<i64> = LANGUAGES.iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), LANGUAGES.len());
    }

    #[test]
    fn test_unknown_language() {
        assert!(find_language(-1).is_none());
    }
}
