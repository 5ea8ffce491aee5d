use std::io::BufRead;

use anyhow::{Context, bail};

/// Password from `--password`, or from the first stdin line with
/// `--password-stdin`.
pub fn resolve(flag: Option<&str>, from_stdin: bool) -> anyhow::Result<String> {
    let password = match (flag, from_stdin) {
        (Some(password), _) => password.to_string(),
        (None, true) => read_lines(std::io::stdin().lock(), 1)?
            .into_iter()
            .next()
            .unwrap_or_default(),
        (None, false) => bail!("a password is required: pass --password or --password-stdin"),
    };

    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

/// Read exactly `count` lines.
pub fn read_lines<R: BufRead>(reader: R, count: usize) -> anyhow::Result<Vec<String>> {
    let lines = reader
        .lines()
        .take(count)
        .collect::<Result<Vec<_>, _>>()
        .context("failed to read stdin")?;

    if lines.len() < count {
        bail!("expected {count} line(s) on stdin, got {}", lines.len());
    }
    Ok(lines)
}
