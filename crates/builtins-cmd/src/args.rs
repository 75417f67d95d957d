//! Parsed command type and parameter accessors
//!
//! Parameters are kept as the literal strings the caller supplied. Handlers
//! convert them on demand with the lenient numeric rules command strings have
//! always used: a parameter that does not start with a number reads as zero.

use std::fmt;

use nom::{
    character::complete::{digit1, one_of, space0},
    combinator::{opt, recognize},
    number::complete::recognize_float,
    sequence::{pair, preceded},
    IResult,
};

/// A parsed command with its name and ordered parameters
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCommand {
    /// The command name as written by the caller (case preserved)
    pub name: String,
    /// Parameters in order, unquoted and unescaped
    pub params: Vec<String>,
}

impl ParsedCommand {
    /// Create a new parsed command with no parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Lower-cased command name used for registry matching
    pub fn normalized_name(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    /// Get the number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no parameters were supplied
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get a parameter by index (0-based)
    pub fn get(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Get a parameter by index, with default
    pub fn get_or<'a>(&'a self, index: usize, default: &'a str) -> &'a str {
        self.get(index).unwrap_or(default)
    }

    /// First parameter, or the empty string when there is none
    pub fn first(&self) -> &str {
        self.get_or(0, "")
    }

    /// Parameters from `index` onward
    pub fn rest(&self, index: usize) -> &[String] {
        self.params.get(index..).unwrap_or(&[])
    }

    /// Case-insensitive comparison of a parameter against a keyword
    pub fn param_is(&self, index: usize, keyword: &str) -> bool {
        self.get(index)
            .is_some_and(|p| p.eq_ignore_ascii_case(keyword))
    }

    /// True when the parameter reads as `"true"` (any case)
    pub fn get_bool(&self, index: usize) -> bool {
        self.param_is(index, "true")
    }

    /// Parameter as integer, zero when missing or not numeric
    pub fn get_int(&self, index: usize) -> i32 {
        self.get(index).map(atoi).unwrap_or(0)
    }

    /// Parameter as float, zero when missing or not numeric
    pub fn get_float(&self, index: usize) -> f64 {
        self.get(index).map(atof).unwrap_or(0.0)
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::parser::format_command(self))
    }
}

fn leading_int(input: &str) -> IResult<&str, &str> {
    preceded(space0, recognize(pair(opt(one_of("+-")), digit1)))(input)
}

fn leading_float(input: &str) -> IResult<&str, &str> {
    preceded(space0, recognize_float)(input)
}

/// Read the leading integer of `s`, zero when it does not start with one
///
/// Values beyond the `i32` range saturate.
pub fn atoi(s: &str) -> i32 {
    match leading_int(s) {
        Ok((_, digits)) => match digits.parse::<i64>() {
            Ok(v) => v.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            Err(_) if digits.starts_with('-') => i32::MIN,
            Err(_) => i32::MAX,
        },
        Err(_) => 0,
    }
}

/// Read the leading decimal number of `s`, zero when it does not start with one
pub fn atof(s: &str) -> f64 {
    leading_float(s)
        .ok()
        .and_then(|(_, num)| num.parse().ok())
        .unwrap_or(0.0)
}

/// `s` without `prefix`, compared ASCII case-insensitively
pub fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoi_reads_leading_digits() {
        assert_eq!(atoi("42"), 42);
        assert_eq!(atoi("  -7abc"), -7);
        assert_eq!(atoi("+3"), 3);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("99999999999"), i32::MAX);
    }

    #[test]
    fn test_atof_reads_leading_number() {
        assert_eq!(atof("50"), 50.0);
        assert_eq!(atof("12.5)"), 12.5);
        assert_eq!(atof("x"), 0.0);
        assert_eq!(atof("-1e2"), -100.0);
    }

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(strip_prefix_ignore_case("PlayOffset=3", "playoffset="), Some("3"));
        assert_eq!(strip_prefix_ignore_case("beginslide", "beginslide="), None);
    }

    #[test]
    fn test_parsed_command_accessors() {
        let cmd = ParsedCommand::new("Skin.SetBool")
            .with_param("MyFlag")
            .with_param("TRUE");

        assert_eq!(cmd.normalized_name(), "skin.setbool");
        assert_eq!(cmd.first(), "MyFlag");
        assert!(cmd.get_bool(1));
        assert!(cmd.param_is(1, "true"));
        assert_eq!(cmd.get(2), None);
        assert_eq!(cmd.get_int(2), 0);
        assert_eq!(cmd.rest(1), &["TRUE".to_string()]);
        assert!(cmd.rest(5).is_empty());
    }
}
