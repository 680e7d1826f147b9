//! Prompt composition: one template per advice mode, filled with the problem's
//! title, difficulty label and (for solutions) the target language.

use crate::config::Prompts;
use crate::domain::{AdviceMode, PromptRequest};
use crate::util::fill_template;

/// Build the instruction text for the model. Pure and deterministic.
pub fn compose(prompts: &Prompts, request: &PromptRequest) -> String {
  let title = request.problem.title.as_str();
  let difficulty = request.problem.difficulty.label();

  match request.mode {
    // The hint never mentions a language, even if one was picked.
    AdviceMode::Hint => fill_template(&prompts.hint, &[("title", title), ("difficulty", difficulty)]),
    AdviceMode::EasySolution | AdviceMode::OptimalSolution => {
      let tpl = if request.mode == AdviceMode::EasySolution { &prompts.easy_solution } else { &prompts.optimal_solution };
      let language = request.language.map(|l| l.name()).unwrap_or_default();
      fill_template(tpl, &[("title", title), ("difficulty", difficulty), ("language", language)])
    }
  }
}
