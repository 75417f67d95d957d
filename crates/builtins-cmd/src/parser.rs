//! Command string parser
//!
//! Parses builtin command strings into `ParsedCommand` values.
//!
//! # Supported Syntax
//!
//! - Bare commands: `Quit`
//! - Parameter lists: `Skin.SetString(MyLabel,Hello)`
//! - Nested calls kept as one parameter: `PlayerControl(seekpercentage(50))`
//! - Quoted parameters: `Notification("A,B","C")`
//! - Escapes inside quotes: `SetProperty(label,"say \"hi\"")`
//!
//! Parsing never fails. Unbalanced input reads up to the end of the string and
//! anything after the closing parenthesis is ignored.

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::{opt, rest},
    sequence::{pair, preceded},
    IResult,
};

use crate::args::ParsedCommand;

/// Parse a command string
///
/// # Example
/// ```
/// use builtins_cmd::parse_command;
///
/// let cmd = parse_command("PlayerControl(seekpercentage(50))");
/// assert_eq!(cmd.name, "PlayerControl");
/// assert_eq!(cmd.params, vec!["seekpercentage(50)".to_string()]);
/// ```
pub fn parse_command(input: &str) -> ParsedCommand {
    let Some(open) = find_open_paren(input) else {
        return ParsedCommand::new(input.trim());
    };

    let name = input[..open].trim();
    let after = &input[open + 1..];
    let body = match find_matching_paren(after) {
        Some(close) => {
            let trailing = after[close + 1..].trim();
            if !trailing.is_empty() {
                log::debug!("ignoring text after command '{}': '{}'", name, trailing);
            }
            &after[..close]
        }
        None => after,
    };

    ParsedCommand {
        name: name.to_string(),
        params: split_params(body),
    }
}

/// Format a parsed command back to a command string
///
/// Parameters that would not survive a re-parse as bare text are quoted.
pub fn format_command(cmd: &ParsedCommand) -> String {
    let mut s = cmd.name.clone();
    if cmd.params.is_empty() {
        return s;
    }

    s.push('(');
    for (i, param) in cmd.params.iter().enumerate() {
        if i > 0 {
            s.push(',');
        }
        if needs_quotes(param) {
            s.push('"');
            for c in param.chars() {
                if c == '"' || c == '\\' {
                    s.push('\\');
                }
                s.push(c);
            }
            s.push('"');
        } else {
            s.push_str(param);
        }
    }
    s.push(')');
    s
}

/// Split a nested call parameter such as `seekpercentage(50)`
///
/// Returns the keyword and, when an opening parenthesis is present, the text
/// between it and the trailing closing parentheses.
pub fn split_call(input: &str) -> (&str, Option<&str>) {
    let parsed: IResult<&str, (&str, Option<&str>)> =
        pair(take_till(|c: char| c == '('), opt(preceded(char('('), rest)))(input);

    match parsed {
        Ok((_, (keyword, inner))) => (keyword, inner.map(|s| s.trim_end_matches(')'))),
        Err(_) => (input, None),
    }
}

/// Find the first `(` that is not preceded by a backslash
fn find_open_paren(input: &str) -> Option<usize> {
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Find the `)` that closes an already opened group, respecting quotes
fn find_matching_paren(input: &str) -> Option<usize> {
    let mut depth: usize = 1;
    let mut in_quotes = false;
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        if in_quotes {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
        } else {
            match c {
                '"' => in_quotes = true,
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
    }

    None
}

/// Split an argument body on top-level commas
fn split_params(body: &str) -> Vec<String> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let mut params = Vec::new();
    let mut depth: usize = 0;
    let mut in_quotes = false;
    let mut start = 0;
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        if in_quotes {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                params.push(clean_param(&body[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(clean_param(&body[start..]));

    params
}

/// Trim a raw parameter, drop quote delimiters and unescape quoted spans
fn clean_param(raw: &str) -> String {
    let raw = raw.trim();
    let mut result = String::with_capacity(raw.len());
    let mut in_quotes = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '\\' => match chars.peek() {
                    Some(&next) if next == '"' || next == '\\' => {
                        result.push(next);
                        chars.next();
                    }
                    _ => result.push('\\'),
                },
                '"' => in_quotes = false,
                _ => result.push(c),
            }
        } else if c == '"' {
            in_quotes = true;
        } else {
            result.push(c);
        }
    }

    result
}

fn needs_quotes(param: &str) -> bool {
    param.is_empty()
        || param.trim() != param
        || param.contains(|c: char| matches!(c, ',' | '(' | ')' | '"' | '\\'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(cmd: &ParsedCommand) -> Vec<&str> {
        cmd.params.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_bare_command() {
        let cmd = parse_command("  Quit ");
        assert_eq!(cmd.name, "Quit");
        assert!(cmd.params.is_empty());
    }

    #[test]
    fn test_command_with_params() {
        let cmd = parse_command("Skin.SetString(MyLabel,Hello)");
        assert_eq!(cmd.name, "Skin.SetString");
        assert_eq!(params(&cmd), vec!["MyLabel", "Hello"]);
    }

    #[test]
    fn test_empty_list_differs_from_empty_params() {
        assert!(parse_command("Foo()").params.is_empty());
        assert_eq!(params(&parse_command("Foo(,)")), vec!["", ""]);
        assert_eq!(params(&parse_command("Foo(\"\")")), vec![""]);
    }

    #[test]
    fn test_nested_call_is_one_param() {
        let cmd = parse_command("PlayerControl(seekpercentage(50))");
        assert_eq!(cmd.name, "PlayerControl");
        assert_eq!(params(&cmd), vec!["seekpercentage(50)"]);

        let cmd = parse_command("PlayerControl(partymode(special://a,b.xsp))");
        assert_eq!(params(&cmd), vec!["partymode(special://a,b.xsp)"]);
    }

    #[test]
    fn test_quoted_commas() {
        let cmd = parse_command(r#"Notification("A,B","C")"#);
        assert_eq!(params(&cmd), vec!["A,B", "C"]);
    }

    #[test]
    fn test_escaped_quotes_and_parens_in_quotes() {
        let cmd = parse_command(r#"SetProperty(label,"say \"hi\" (now)")"#);
        assert_eq!(params(&cmd), vec!["label", r#"say "hi" (now)"#]);

        let cmd = parse_command(r#"RunScript("C:\\scripts\\x.py")"#);
        assert_eq!(params(&cmd), vec![r"C:\scripts\x.py"]);
    }

    #[test]
    fn test_backslash_outside_quotes_is_literal() {
        let cmd = parse_command(r"RunScript(C:\scripts\x.py,arg)");
        assert_eq!(params(&cmd), vec![r"C:\scripts\x.py", "arg"]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let cmd = parse_command("Notification( Title , Body )");
        assert_eq!(params(&cmd), vec!["Title", "Body"]);

        let cmd = parse_command(r#"Notification(" padded ",x)"#);
        assert_eq!(params(&cmd), vec![" padded ", "x"]);
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        let cmd = parse_command("ActivateWindow(Home) junk");
        assert_eq!(cmd.name, "ActivateWindow");
        assert_eq!(params(&cmd), vec!["Home"]);
    }

    #[test]
    fn test_unbalanced_reads_to_end() {
        let cmd = parse_command("ActivateWindow(Videos,foo");
        assert_eq!(params(&cmd), vec!["Videos", "foo"]);
    }

    #[test]
    fn test_format_round_trip() {
        let original = ParsedCommand::new("Notification")
            .with_param("A,B")
            .with_param("")
            .with_param(r#"quote " and \ slash"#)
            .with_param(" spaced ")
            .with_param("plain");
        let text = format_command(&original);
        assert_eq!(parse_command(&text), original);

        let bare = ParsedCommand::new("Quit");
        assert_eq!(format_command(&bare), "Quit");
        assert_eq!(parse_command(&format_command(&bare)), bare);
    }

    #[test]
    fn test_split_call() {
        assert_eq!(split_call("seekpercentage(50)"), ("seekpercentage", Some("50")));
        assert_eq!(split_call("seekpercentage"), ("seekpercentage", None));
        assert_eq!(split_call("partymode()"), ("partymode", Some("")));
        assert_eq!(split_call("play"), ("play", None));
    }
}
