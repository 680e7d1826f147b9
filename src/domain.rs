//! Domain models: difficulty tiers, resolved problems, advice modes, target languages
//! and the validated prompt request handed to the composer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, DirectoryError};

/// Catalog difficulty tier. The catalog encodes it as 1/2/3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
  Easy = 1,
  Medium = 2,
  Hard = 3,
}

impl Difficulty {
  pub fn label(self) -> &'static str {
    match self {
      Difficulty::Easy => "Easy",
      Difficulty::Medium => "Medium",
      Difficulty::Hard => "Hard",
    }
  }

  /// Badge color used by the front-end.
  pub fn color(self) -> &'static str {
    match self {
      Difficulty::Easy => "#00b894",
      Difficulty::Medium => "#fdcb6e",
      Difficulty::Hard => "#ff7675",
    }
  }
}

impl TryFrom<i64> for Difficulty {
  type Error = DirectoryError;

  fn try_from(tier: i64) -> Result<Self, Self::Error> {
    match tier {
      1 => Ok(Difficulty::Easy),
      2 => Ok(Difficulty::Medium),
      3 => Ok(Difficulty::Hard),
      other => Err(DirectoryError::InvalidDifficulty(other)),
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// A problem resolved from the catalog. Lives for one lookup/advice cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemRecord {
  pub id: u32,
  pub title: String,
  pub slug: String,
  pub difficulty: Difficulty,
}

/// Which kind of advice the user asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceMode {
  Hint,
  EasySolution,
  OptimalSolution,
}

impl AdviceMode {
  pub fn needs_language(self) -> bool {
    !matches!(self, AdviceMode::Hint)
  }

  /// Section title shown above the generated text.
  pub fn heading(self) -> &'static str {
    match self {
      AdviceMode::Hint => "Problem-Solving Suggestions",
      AdviceMode::EasySolution => "Easy and Descriptive Solution",
      AdviceMode::OptimalSolution => "Full Optimal Solution",
    }
  }

  /// Text shown in place of model output when generation fails.
  pub fn fallback_text(self) -> &'static str {
    match self {
      AdviceMode::Hint => "Unable to generate suggestions at this time.",
      AdviceMode::EasySolution => "Unable to generate an easy solution at this time.",
      AdviceMode::OptimalSolution => "Unable to generate an optimal solution at this time.",
    }
  }
}

/// Languages offered for solutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
  Python,
  Java,
  Cpp,
  JavaScript,
}

impl Language {
  pub const ALL: [Language; 4] = [Language::Python, Language::Java, Language::Cpp, Language::JavaScript];

  pub fn name(self) -> &'static str {
    match self {
      Language::Python => "Python",
      Language::Java => "Java",
      Language::Cpp => "C++",
      Language::JavaScript => "JavaScript",
    }
  }

  /// Lowercased name, used by the front-end as a syntax-highlighting hint.
  pub fn code_fence(self) -> String {
    self.name().to_lowercase()
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Language {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "python" | "py" => Ok(Language::Python),
      "java" => Ok(Language::Java),
      "c++" | "cpp" => Ok(Language::Cpp),
      "javascript" | "js" => Ok(Language::JavaScript),
      _ => Err(AppError::InvalidRequest(format!(
        "unsupported language '{}'; expected one of Python, Java, C++, JavaScript",
        s.trim()
      ))),
    }
  }
}

/// Validated input for the prompt composer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptRequest {
  pub problem: ProblemRecord,
  pub mode: AdviceMode,
  pub language: Option<Language>,
}

impl PromptRequest {
  /// Solution modes require a language; hints accept (and ignore) one.
  pub fn new(problem: ProblemRecord, mode: AdviceMode, language: Option<Language>) -> Result<Self, AppError> {
    if mode.needs_language() && language.is_none() {
      return Err(AppError::InvalidRequest(format!(
        "a target language is required for {}",
        mode.heading().to_lowercase()
      )));
    }
    Ok(Self { problem, mode, language })
  }
}
