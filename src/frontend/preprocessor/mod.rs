use log::trace;
use regex::{Captures, Regex};

/// literals are matched first so that comment markers inside them are left untouched
const COMMENT_PATTERN: &str = r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)'|//[^\n]*|(?s:/\*.*?\*/)"#;

/// replace all comments with whitespace, keeping newlines and the length of the source code,
/// so that byte offsets reported by the parser are valid locations in the original file
pub fn clean_comments(source_code: String) -> String {
    let pattern = Regex::new(COMMENT_PATTERN).unwrap();
    let mut removed = 0usize;
    let clean = pattern.replace_all(&source_code, |caps: &Captures| {
        let matched = &caps[0];
        if matched.starts_with('"') || matched.starts_with('\'') {
            String::from(matched)
        } else {
            removed += 1;
            matched.chars()
                .map(|c| if c == '\n' { String::from("\n") } else { " ".repeat(c.len_utf8()) })
                .collect::<String>()
        }
    }).into_owned();
    trace!("removed {} comments", removed);
    clean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comment_is_blanked() {
        let code = String::from("int x; // comment\nint y;");
        let clean = clean_comments(code.clone());
        assert_eq!(clean, "int x;           \nint y;");
        assert_eq!(clean.len(), code.len());
    }

    #[test]
    fn block_comment_keeps_newlines() {
        let code = String::from("a /* one\ntwo */ b");
        assert_eq!(clean_comments(code), "a       \n       b");
    }

    #[test]
    fn comment_markers_inside_strings_are_kept() {
        let code = String::from("printf(\"// not a comment /* */\"); // gone");
        assert_eq!(clean_comments(code), "printf(\"// not a comment /* */\");        ");
    }
}
