//! Identifier case conversion.
//!
//! Shared by the case helpers (`camelCase`, `pascalCase`, `kebabCase`,
//! `snakeCase`) and by model context construction, so that a model named
//! `user-profile` yields the same `UserProfile` in both places.
//!
//! | Input            | camel         | Pascal        | kebab          | snake          |
//! |------------------|---------------|---------------|----------------|----------------|
//! | `user-profile`   | `userProfile` | `UserProfile` | `user-profile` | `user_profile` |
//! | `UserProfile`    | `userProfile` | `UserProfile` | `user-profile` | `user_profile` |
//! | `HTTPRequest`    | `httpRequest` | `HttpRequest` | `http-request` | `http_request` |

/// Convert a string to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in split_words(s).iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert a string to PascalCase.
///
/// ## Rules
///
/// 1. Split on word boundaries
/// 2. Capitalize first letter of each word
/// 3. Join without separator
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to snake_case.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert an identifier to a human label: `firstName` -> `First Name`.
pub fn to_title_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            // to_uppercase handles Unicode correctly (e.g., "ß" -> "SS")
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, `.`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` or `2B` → split before `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        // Rule 1
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // Rule 2: "myApp" → "my" + "App"
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // Rule 3: "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_from_kebab() {
        assert_eq!(to_pascal_case("user-profile"), "UserProfile");
    }

    #[test]
    fn kebab_from_pascal() {
        assert_eq!(to_kebab_case("UserProfile"), "user-profile");
    }

    #[test]
    fn camel_from_snake() {
        assert_eq!(to_camel_case("user_profile"), "userProfile");
        assert_eq!(to_camel_case("UserProfile"), "userProfile");
    }

    #[test]
    fn snake_from_camel() {
        assert_eq!(to_snake_case("userProfileId"), "user_profile_id");
    }

    #[test]
    fn acronyms_are_one_word() {
        assert_eq!(to_pascal_case("HTTPRequest"), "HttpRequest");
        assert_eq!(to_kebab_case("XMLHttpRequest"), "xml-http-request");
    }

    #[test]
    fn digits_end_a_word_before_uppercase() {
        assert_eq!(to_kebab_case("address2Line"), "address2-line");
    }

    #[test]
    fn natural_language_input() {
        assert_eq!(to_pascal_case("my awesome  app"), "MyAwesomeApp");
        assert_eq!(to_title_case("firstName"), "First Name");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_snake_case("--"), "");
    }
}
