//! Input sources for the command loop.

use std::collections::VecDeque;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Yields one command line at a time; `None` at end of input.
#[async_trait]
pub trait InputSource: Send {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>>;
}

pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputSource for StdinSource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        self.lines.next_line().await.context("reading stdin")
    }
}

/// Lines loaded up front from a script file (or given directly in tests).
pub struct ScriptSource {
    lines: VecDeque<String>,
}

impl ScriptSource {
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }

    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading script {}", path.display()))?;
        Ok(Self::new(raw.lines().map(str::to_string)))
    }
}

#[async_trait]
impl InputSource for ScriptSource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
