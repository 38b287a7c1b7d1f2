use std::path::Path;

use crate::errors::LaunchError;

/// Longest single argument Linux accepts (`MAX_ARG_STRLEN`); `sh -c` gets the
/// whole command as one argument.
pub const POSIX_MAX_COMMAND: usize = 128 * 1024;

/// `CreateProcessW` command line limit, in UTF-16 units.
pub const WINDOWS_MAX_COMMAND: usize = 32_767;

const EXPLICIT_RELATIVE: &str = "./";

/// Prefixes `./` unless already present. Safe to apply repeatedly.
pub fn ensure_explicit_relative(command: &str) -> String {
    if command.starts_with(EXPLICIT_RELATIVE) {
        command.to_string()
    } else {
        let mut out = String::with_capacity(command.len() + EXPLICIT_RELATIVE.len());
        out.push_str(EXPLICIT_RELATIVE);
        out.push_str(command);
        out
    }
}

/// Quotes `word` for a POSIX shell when it holds anything outside the portable
/// safe set. Plain paths come back unchanged.
pub fn quote(word: &str) -> String {
    if !word.is_empty() && word.chars().all(is_safe) {
        return word.to_string();
    }

    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');
    for ch in word.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

fn is_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '/' | '-' | '+' | ':' | ',' | '@' | '%' | '=')
}

/// Length of the Windows command line for `program` and `args`, in UTF-16
/// units. Words with whitespace (and empty words) are counted with quotes.
pub fn command_line_len(program: &Path, args: &[String]) -> usize {
    let program = program.to_string_lossy();
    std::iter::once(program.as_ref())
        .chain(args.iter().map(String::as_str))
        .map(|word| {
            let quotes = if word.is_empty() || word.contains([' ', '\t']) { 2 } else { 0 };
            word.encode_utf16().count() + quotes
        })
        .sum::<usize>()
        + args.len()
}

pub fn check_length(len: usize, max: usize) -> Result<(), LaunchError> {
    if len > max {
        return Err(LaunchError::CommandTooLong { len, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_relative_is_idempotent() {
        let once = ensure_explicit_relative("jre/bin/java -jar app.jar");
        assert_eq!(once, "./jre/bin/java -jar app.jar");
        let twice = ensure_explicit_relative(&once);
        assert_eq!(twice, once);
    }

    #[test]
    fn explicit_relative_keeps_long_commands_whole() {
        let long = format!("jre/bin/java {} -jar app.jar", "-Dx=y ".repeat(4096));
        let prefixed = ensure_explicit_relative(&long);
        assert_eq!(prefixed.len(), long.len() + 2);
        assert!(prefixed.ends_with("-jar app.jar"));
    }

    #[test]
    fn safe_words_are_not_quoted() {
        assert_eq!(quote("/opt/games/lionheart"), "/opt/games/lionheart");
        assert_eq!(quote("lionheart-pc-1.3.0.jar"), "lionheart-pc-1.3.0.jar");
    }

    #[test]
    fn metacharacters_are_quoted() {
        assert_eq!(quote("/home/me/My Games"), "'/home/me/My Games'");
        assert_eq!(quote("a;rm -rf ~"), "'a;rm -rf ~'");
        assert_eq!(quote("it's"), "'it'\\''s'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn command_line_len_counts_utf16_units() {
        let args = vec!["-splash:ü.png".to_string(), "two words".to_string()];
        let len = command_line_len(Path::new("C:/Spiele/java.exe"), &args);
        // 18 + 1 + 13 + 1 + (9 + 2)
        assert_eq!(len, 44);
    }

    #[test]
    fn length_limit_is_inclusive() {
        assert!(check_length(10, 10).is_ok());
        assert!(matches!(
            check_length(11, 10),
            Err(LaunchError::CommandTooLong { len: 11, max: 10 })
        ));
    }
}
