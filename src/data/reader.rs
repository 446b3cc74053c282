use crate::error::{GaCoreError, Result};
use crate::types::Expression;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads stored expressions from a text file, one per line.
///
/// Each non-blank line holds a single expression as a JSON array, e.g.
/// `["add", ["multiply", 3, 4], 5]`. Blank lines are skipped and do not count
/// towards line indices.
pub struct ExpressionReader {
    path: PathBuf,
}

impl ExpressionReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the expression at 0-based `index`
    pub fn read_one(&self, index: usize) -> Result<Expression> {
        let contents = fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = expression_lines(&contents).collect();
        let line = lines.get(index).ok_or(GaCoreError::MissingExpression {
            index,
            available: lines.len(),
        })?;
        Self::parse(line)
    }

    pub fn read_all(&self) -> Result<Vec<Expression>> {
        let contents = fs::read_to_string(&self.path)?;
        let expressions = expression_lines(&contents)
            .map(Self::parse)
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "Read {} expressions from {}",
            expressions.len(),
            self.path.display()
        );
        Ok(expressions)
    }

    pub fn parse(text: &str) -> Result<Expression> {
        Ok(serde_json::from_str(text.trim())?)
    }
}

fn expression_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents.lines().filter(|line| !line.trim().is_empty())
}
