//! Parsers for the optimizer's standard output.
//!
//! `Lines` is the exchange format of this crate: one integer per line.
//! `Legacy` reads the array literal the bundled Julia optimizer prints on its
//! second line, e.g. `... [66, 102, 253, 1236, 1514])`.
//!
//! 优化器标准输出的解析器。`Lines` 是本库的交换格式：每行一个整数。
//! `Legacy` 读取自带的 Julia 优化器在第二行打印的数组字面量。

use crate::error::{Error, Result};

/// How an optimizer prints its breakpoints.
///
/// 优化器输出断点的格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One integer per line. Blank lines and lines starting with `#` are skipped.
    /// 每行一个整数。空行和以 `#` 开头的行会被跳过。
    #[default]
    Lines,
    /// A bracketed, comma-separated list on the second line.
    /// 第二行上用方括号包围、逗号分隔的列表。
    Legacy,
}

impl OutputFormat {
    pub fn parse(self, stdout: &str) -> Result<Vec<u32>> {
        match self {
            OutputFormat::Lines => parse_lines(stdout),
            OutputFormat::Legacy => parse_legacy(stdout),
        }
    }
}

pub fn parse_lines(stdout: &str) -> Result<Vec<u32>> {
    let values = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_token)
        .collect::<Result<Vec<_>>>()?;
    if values.is_empty() {
        return Err(Error::MalformedOutput("no breakpoints in output".into()));
    }
    Ok(values)
}

pub fn parse_legacy(stdout: &str) -> Result<Vec<u32>> {
    let line = stdout.lines().nth(1).ok_or_else(|| {
        Error::MalformedOutput(format!(
            "expected at least two lines of output, got {}",
            stdout.lines().count()
        ))
    })?;
    let open = line
        .find('[')
        .ok_or_else(|| Error::MalformedOutput(format!("no '[' on second line: {line:?}")))?;
    let list = &line[open + 1..];
    let close = list
        .find(']')
        .ok_or_else(|| Error::MalformedOutput(format!("no ']' after '[' on second line: {line:?}")))?;
    let list = list[..close].trim();
    if list.is_empty() {
        return Err(Error::MalformedOutput("empty breakpoint list".into()));
    }
    list.split(',').map(|token| parse_token(token.trim())).collect()
}

fn parse_token(token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|_| Error::MalformedOutput(format!("{token:?} is not a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_julia_output() {
        let stdout = "Optimal breakpoints found\n\
                      (objective = 12.5, sizes = [66, 102, 253, 1236, 1514])\n";
        assert_eq!(
            parse_legacy(stdout).unwrap(),
            vec![66, 102, 253, 1236, 1514]
        );
    }

    #[test]
    fn test_parse_legacy_keeps_printed_order() {
        let stdout = "header\n[1514, 66]\n";
        assert_eq!(parse_legacy(stdout).unwrap(), vec![1514, 66]);
    }

    #[test]
    fn test_parse_legacy_single_line_is_malformed() {
        let err = parse_legacy("[66, 102]\n").unwrap_err();
        assert!(matches!(err, Error::MalformedOutput(_)));
    }

    #[test]
    fn test_parse_legacy_missing_brackets_is_malformed() {
        assert!(matches!(
            parse_legacy("header\n66, 102\n"),
            Err(Error::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_legacy("header\n[66, 102\n"),
            Err(Error::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_parse_legacy_bad_token_is_malformed() {
        for stdout in ["h\n[66, abc]", "h\n[66, -3]", "h\n[66.5]", "h\n[]", "h\n[66,, 102]"] {
            assert!(
                matches!(parse_legacy(stdout), Err(Error::MalformedOutput(_))),
                "{stdout:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_lines() {
        let stdout = "# breakpoints\n66\n\n102\n  253  \n1514\n";
        assert_eq!(parse_lines(stdout).unwrap(), vec![66, 102, 253, 1514]);
    }

    #[test]
    fn test_parse_lines_rejects_empty_and_garbage() {
        assert!(matches!(parse_lines(""), Err(Error::MalformedOutput(_))));
        assert!(matches!(parse_lines("# nothing\n"), Err(Error::MalformedOutput(_))));
        assert!(matches!(parse_lines("66\n1e3\n"), Err(Error::MalformedOutput(_))));
    }

    #[test]
    fn test_format_dispatch() {
        assert_eq!(OutputFormat::default(), OutputFormat::Lines);
        assert_eq!(OutputFormat::Lines.parse("5\n7").unwrap(), vec![5, 7]);
        assert_eq!(OutputFormat::Legacy.parse("x\n[5, 7]").unwrap(), vec![5, 7]);
    }
}
