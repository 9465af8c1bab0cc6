//! Just enough of a PHP lexer to read literal assignments out of core files
//! such as `wp-admin/includes/update-core.php` and `wp-includes/version.php`.
//!
//! Comments are skipped, quoted strings are unescaped, everything else is
//! reduced to words and punctuation. Heredocs and interpolation are not
//! understood.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Variable(String),
    Word(String),
    Str(String),
    Punct(char),
}

/// Returns the string elements of `$variable = array( ... );` (or the
/// short `[ ... ]` form), in source order. Keys of keyed entries are skipped
/// and nested arrays are ignored.
pub(crate) fn extract_string_array(source: &str, variable: &str) -> Option<Vec<String>> {
    let tokens = tokenize(source);
    let start = find_assignment(&tokens, variable)?;

    let (open_len, close) = match (tokens.get(start), tokens.get(start + 1)) {
        (Some(Token::Word(word)), Some(Token::Punct('('))) if word.eq_ignore_ascii_case("array") => (2, ')'),
        (Some(Token::Punct('[')), _) => (1, ']'),
        _ => return None,
    };

    let body = &tokens[start + open_len..];
    let mut depth = 0usize;
    let mut values = Vec::new();
    for (idx, token) in body.iter().enumerate() {
        match token {
            Token::Punct('(' | '[') => depth += 1,
            Token::Punct(c @ (')' | ']')) => {
                if depth == 0 {
                    return (*c == close).then_some(values);
                }
                depth -= 1;
            }
            Token::Str(value) if depth == 0 => {
                let is_key = matches!(
                    (body.get(idx + 1), body.get(idx + 2)),
                    (Some(Token::Punct('=')), Some(Token::Punct('>')))
                );
                if !is_key {
                    values.push(value.clone());
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns the literal from `$variable = '...';`.
pub(crate) fn extract_string_assignment(source: &str, variable: &str) -> Option<String> {
    let tokens = tokenize(source);
    let start = find_assignment(&tokens, variable)?;
    match tokens.get(start) {
        Some(Token::Str(value)) => Some(value.clone()),
        _ => None,
    }
}

/// Index of the first token after `$variable =`.
fn find_assignment(tokens: &[Token], variable: &str) -> Option<usize> {
    tokens.windows(3).position(|w| {
        matches!(&w[0], Token::Variable(name) if name == variable)
            && w[1] == Token::Punct('=')
            && !matches!(w[2], Token::Punct('=' | '>'))
    })
    .map(|idx| idx + 2)
}

fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '#' if chars.peek() != Some(&'[') => skip_line(&mut chars),
            '/' if chars.peek() == Some(&'/') => skip_line(&mut chars),
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                skip_block_comment(&mut chars);
            }
            '\'' => tokens.push(Token::Str(single_quoted(&mut chars))),
            '"' => tokens.push(Token::Str(double_quoted(&mut chars))),
            '$' => {
                let name = take_word(&mut chars, String::new());
                tokens.push(if name.is_empty() { Token::Punct('$') } else { Token::Variable(name) });
            }
            c if is_word_char(c) => tokens.push(Token::Word(take_word(&mut chars, c.to_string()))),
            c => tokens.push(Token::Punct(c)),
        }
    }
    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn take_word(chars: &mut Peekable<Chars<'_>>, mut word: String) -> String {
    while let Some(&c) = chars.peek() {
        if !is_word_char(c) {
            break;
        }
        word.push(c);
        chars.next();
    }
    word
}

fn skip_line(chars: &mut Peekable<Chars<'_>>) {
    for c in chars.by_ref() {
        if c == '\n' {
            break;
        }
    }
}

fn skip_block_comment(chars: &mut Peekable<Chars<'_>>) {
    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'/') {
            chars.next();
            break;
        }
    }
}

// Only \' and \\ are escapes inside single quotes.
fn single_quoted(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\'' => break,
            '\\' => match chars.peek() {
                Some(&next @ ('\'' | '\\')) => {
                    value.push(next);
                    chars.next();
                }
                _ => value.push('\\'),
            },
            c => value.push(c),
        }
    }
    value
}

fn double_quoted(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => {
                let escaped = match chars.peek() {
                    Some('n') => Some('\n'),
                    Some('t') => Some('\t'),
                    Some('r') => Some('\r'),
                    Some(&c @ ('"' | '\\' | '$')) => Some(c),
                    _ => None,
                };
                match escaped {
                    Some(c) => {
                        value.push(c);
                        chars.next();
                    }
                    None => value.push('\\'),
                }
            }
            c => value.push(c),
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPDATE_CORE: &str = r#"<?php
/**
 * Stores files to be deleted.
 *
 * $_old_files = array( 'not/this.php' );
 */
global $_old_files;

$_old_files = array(
	// 2.0
	'wp-admin/import-b2.php',
	'wp-admin/import-blogger.php', # trailing comment
	/* 2.1 */
	"wp-admin/link-categories.php",
	'wp-includes/js/tinymce/plugins/wordpress/langs/it\'s.js',
);

$_new_bundled_files = array(
	'plugins/akismet/' => '2.0',
);
"#;

    #[test]
    fn extracts_old_files_in_order_skipping_comments() {
        let files = extract_string_array(UPDATE_CORE, "_old_files").unwrap();
        assert_eq!(
            files,
            vec![
                "wp-admin/import-b2.php",
                "wp-admin/import-blogger.php",
                "wp-admin/link-categories.php",
                "wp-includes/js/tinymce/plugins/wordpress/langs/it's.js",
            ]
        );
    }

    #[test]
    fn skips_keys_of_keyed_arrays() {
        let bundled = extract_string_array(UPDATE_CORE, "_new_bundled_files").unwrap();
        assert_eq!(bundled, vec!["2.0"]);
    }

    #[test]
    fn short_array_syntax_and_duplicates() {
        let source = "<?php $_old_files = ['a.php', 'b.php', 'a.php'];";
        let files = extract_string_array(source, "_old_files").unwrap();
        assert_eq!(files, vec!["a.php", "b.php", "a.php"]);
    }

    #[test]
    fn missing_or_unterminated_array_is_none() {
        assert!(extract_string_array("<?php $other = array('x');", "_old_files").is_none());
        assert!(extract_string_array("<?php $_old_files = array('x', ", "_old_files").is_none());
        assert!(extract_string_array("<?php if ($_old_files == 'x') {}", "_old_files").is_none());
    }

    #[test]
    fn reads_version_literal() {
        let source = "<?php\n/** The WordPress version string. */\n$wp_version = '6.4.2';\n$wp_db_version = 56657;\n";
        assert_eq!(extract_string_assignment(source, "wp_version").as_deref(), Some("6.4.2"));
        assert_eq!(extract_string_assignment(source, "wp_db_version"), None);
    }

    #[test]
    fn double_quoted_escapes() {
        let source = r#"<?php $x = "a\"b\\c\$d\q";"#;
        assert_eq!(extract_string_assignment(source, "x").as_deref(), Some("a\"b\\c$d\\q"));
    }
}
