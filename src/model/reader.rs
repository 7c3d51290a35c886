//! Reader for the classic NRP text instance format.
//!
//! # Main file
//!
//! ```text
//! <levels>
//! <requirements on level 1>
//! <cost> <cost> ...
//! ...                                  (one count/cost pair per level)
//! <dependencies>
//! <source> <target>                    (1-based; source must be built with target)
//! ...
//! <customers>
//! <profit> <n> <r1> ... <rn>           (1-based requirement indices)
//! ...
//! ```
//!
//! # Risk file (`<name>-risk.txt`, optional)
//!
//! ```text
//! <requirements>
//! <expected cost> <min cost> <max cost>
//! ...
//! <customers>
//! <expected profit> <min profit> <max profit>
//! ...
//! ```

use std::path::Path;
use std::str::{FromStr, Lines};

use tracing::debug;

use super::project::{Project, ProjectBuilder};
use crate::error::{NrpError, Result};

/// Parses an instance from its main file text and optional risk file text.
pub fn read_instance(name: &str, main: &str, risk: Option<&str>) -> Result<Project> {
    let mut builder = ProjectBuilder::new(name);
    let mut lines = LineReader::new(main);

    read_requirements(&mut lines, &mut builder)?;
    read_dependencies(&mut lines, &mut builder)?;
    read_customers(&mut lines, &mut builder)?;

    if let Some(risk) = risk {
        let mut lines = LineReader::new(risk);
        read_cost_estimates(&mut lines, &mut builder)?;
        read_profit_estimates(&mut lines, &mut builder)?;
    }

    let project = builder.build()?;
    debug!(
        instance = name,
        requirements = project.requirement_count(),
        customers = project.customer_count(),
        with_risk = risk.is_some(),
        "instance loaded"
    );
    Ok(project)
}

/// Loads `path` and, when present, the sibling `<stem>-risk.txt` file.
///
/// The instance name is the file stem.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let main = std::fs::read_to_string(path)?;
    let risk_path = path.with_file_name(format!("{name}-risk.txt"));
    let risk = if risk_path.exists() {
        Some(std::fs::read_to_string(&risk_path)?)
    } else {
        None
    };

    read_instance(&name, &main, risk.as_deref())
}

struct LineReader<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    /// Next non-empty line, split into tokens.
    fn next_tokens(&mut self) -> Result<Vec<&'a str>> {
        for raw in self.lines.by_ref() {
            self.line += 1;
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            if !tokens.is_empty() {
                return Ok(tokens);
            }
        }
        Err(self.error("unexpected end of file"))
    }

    fn next_count(&mut self) -> Result<usize> {
        let tokens = self.next_tokens()?;
        if tokens.len() != 1 {
            return Err(self.error(format!("expected a single count, found {} fields", tokens.len())));
        }
        self.parse(tokens[0])
    }

    fn parse<T: FromStr>(&self, token: &str) -> Result<T> {
        token
            .parse()
            .map_err(|_| self.error(format!("invalid number `{token}`")))
    }

    /// Converts a 1-based index token to 0-based.
    fn parse_index(&self, token: &str) -> Result<usize> {
        let index: usize = self.parse(token)?;
        index
            .checked_sub(1)
            .ok_or_else(|| self.error("indices are 1-based, found 0"))
    }

    fn error(&self, message: impl Into<String>) -> NrpError {
        NrpError::Parse {
            line: self.line,
            message: message.into(),
        }
    }
}

fn read_requirements(lines: &mut LineReader<'_>, builder: &mut ProjectBuilder) -> Result<()> {
    let levels = lines.next_count()?;
    for level in 0..levels {
        let count = lines.next_count()?;
        let costs = lines.next_tokens()?;
        if costs.len() != count {
            return Err(lines.error(format!(
                "level {} declares {count} requirements but lists {} costs",
                level + 1,
                costs.len()
            )));
        }
        for token in costs {
            let cost: i64 = lines.parse(token)?;
            builder.add_requirement(cost);
        }
    }
    Ok(())
}

fn read_dependencies(lines: &mut LineReader<'_>, builder: &mut ProjectBuilder) -> Result<()> {
    let count = lines.next_count()?;
    for _ in 0..count {
        let tokens = lines.next_tokens()?;
        if tokens.len() != 2 {
            return Err(lines.error("dependency lines need exactly two fields"));
        }
        let source = lines.parse_index(tokens[0])?;
        let target = lines.parse_index(tokens[1])?;
        builder.add_precedence(source, target);
    }
    Ok(())
}

fn read_customers(lines: &mut LineReader<'_>, builder: &mut ProjectBuilder) -> Result<()> {
    let count = lines.next_count()?;
    for _ in 0..count {
        let tokens = lines.next_tokens()?;
        if tokens.len() < 3 {
            return Err(lines.error("customer lines need at least three fields"));
        }
        let profit: i64 = lines.parse(tokens[0])?;
        let declared: usize = lines.parse(tokens[1])?;
        if tokens.len() != declared + 2 {
            return Err(lines.error(format!(
                "customer declares {declared} requirements but lists {}",
                tokens.len() - 2
            )));
        }
        let requirements = tokens[2..]
            .iter()
            .map(|t| lines.parse_index(t))
            .collect::<Result<Vec<usize>>>()?;
        builder.add_customer(profit, requirements);
    }
    Ok(())
}

fn read_estimate_line(lines: &mut LineReader<'_>) -> Result<(i64, f64, f64)> {
    let tokens = lines.next_tokens()?;
    if tokens.len() != 3 {
        return Err(lines.error("estimate lines need exactly three fields"));
    }
    Ok((
        lines.parse(tokens[0])?,
        lines.parse(tokens[1])?,
        lines.parse(tokens[2])?,
    ))
}

fn read_cost_estimates(lines: &mut LineReader<'_>, builder: &mut ProjectBuilder) -> Result<()> {
    let count = lines.next_count()?;
    if count != builder.requirement_count() {
        return Err(lines.error(format!(
            "risk file lists {count} requirements, instance has {}",
            builder.requirement_count()
        )));
    }
    for r in 0..count {
        let (expected, min, max) = read_estimate_line(lines)?;
        if builder.requirement_cost(r) != Some(expected) {
            return Err(lines.error(format!("expected cost mismatch for requirement #{}", r + 1)));
        }
        builder.set_requirement_cost_estimates(r, min, max);
    }
    Ok(())
}

fn read_profit_estimates(lines: &mut LineReader<'_>, builder: &mut ProjectBuilder) -> Result<()> {
    let count = lines.next_count()?;
    if count != builder.customer_count() {
        return Err(lines.error(format!(
            "risk file lists {count} customers, instance has {}",
            builder.customer_count()
        )));
    }
    for c in 0..count {
        let (expected, min, max) = read_estimate_line(lines)?;
        if builder.customer_profit(c) != Some(expected) {
            return Err(lines.error(format!("expected profit mismatch for customer #{}", c + 1)));
        }
        builder.set_customer_profit_estimates(c, min, max);
    }
    Ok(())
}
