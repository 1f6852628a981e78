//! Minimal Dockerfile reader.

use serde::Serialize;

use crate::error::{ArtifactError, ArtifactResult};

/// One Dockerfile instruction such as `RUN pip install -r requirements.txt`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Instruction {
    keyword: String,
    arguments: String,
    line: usize,
}

impl Instruction {
    /// Returns the uppercased instruction keyword.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns the argument text with continuations joined.
    #[must_use]
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    /// Returns the one-based line on which the instruction starts.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// Parsed build descriptor of a tool.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Dockerfile {
    instructions: Vec<Instruction>,
}

impl Dockerfile {
    /// Parses Dockerfile text.
    ///
    /// Blank lines and `#` comments are skipped; a trailing `\` continues the
    /// instruction on the next line.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidDockerfile`] when an instruction
    /// keyword is not alphabetic or a continuation runs off the end.
    pub fn parse(text: &str) -> ArtifactResult<Self> {
        let mut instructions = Vec::new();
        let mut pending: Option<(usize, String)> = None;

        for (index, raw) in text.lines().enumerate() {
            let number = index + 1;
            let line = raw.trim();
            if line.starts_with('#') || (line.is_empty() && pending.is_none()) {
                continue;
            }

            let (start, mut buffer) = pending.take().unwrap_or((number, String::new()));
            if let Some(body) = line.strip_suffix('\\') {
                buffer.push_str(body.trim_end());
                buffer.push(' ');
                pending = Some((start, buffer));
                continue;
            }

            buffer.push_str(line);
            instructions.push(parse_instruction(start, buffer.trim())?);
        }

        if let Some((start, _)) = pending {
            return Err(ArtifactError::InvalidDockerfile {
                line: start,
                reason: "line continuation reaches end of file".into(),
            });
        }

        Ok(Self { instructions })
    }

    /// Returns every instruction in file order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the instructions using `keyword` (case-insensitive).
    pub fn find<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Instruction> + 'a {
        self.instructions
            .iter()
            .filter(move |instruction| instruction.keyword.eq_ignore_ascii_case(keyword))
    }

    /// Returns the image named by the first `FROM` instruction.
    #[must_use]
    pub fn base_image(&self) -> Option<&str> {
        self.find("FROM")
            .next()
            .and_then(|instruction| instruction.arguments.split_whitespace().next())
    }
}

fn parse_instruction(line: usize, text: &str) -> ArtifactResult<Instruction> {
    let (keyword, arguments) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ArtifactError::InvalidDockerfile {
            line,
            reason: format!("`{keyword}` is not an instruction keyword"),
        });
    }
    Ok(Instruction {
        keyword: keyword.to_ascii_uppercase(),
        arguments: arguments.trim().to_owned(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCKERFILE: &str = "\
# syntax=docker/dockerfile:1
FROM python:3.11-slim AS base

WORKDIR /tool
COPY requirements.txt .
run pip install \\
    --no-cache-dir \\
    -r requirements.txt
CMD [\"python\", \"tool.py\"]
";

    #[test]
    fn parses_instructions() {
        let dockerfile = Dockerfile::parse(DOCKERFILE).unwrap();

        let keywords: Vec<_> = dockerfile.instructions().iter().map(Instruction::keyword).collect();
        assert_eq!(keywords, ["FROM", "WORKDIR", "COPY", "RUN", "CMD"]);
        assert_eq!(dockerfile.base_image(), Some("python:3.11-slim"));

        let run = dockerfile.find("run").next().expect("run");
        assert_eq!(run.arguments(), "pip install --no-cache-dir -r requirements.txt");
        assert_eq!(run.line(), 6);
    }

    #[test]
    fn rejects_bad_keyword() {
        let err = Dockerfile::parse("FROM x\n[bad] y\n").expect_err("bad keyword");
        assert!(matches!(err, ArtifactError::InvalidDockerfile { line: 2, .. }));
    }

    #[test]
    fn rejects_dangling_continuation() {
        let err = Dockerfile::parse("RUN echo \\").expect_err("dangling");
        assert!(matches!(err, ArtifactError::InvalidDockerfile { line: 1, .. }));
    }
}
