use crate::error::TemplateError;
use duplex_expr::{EvalContext, Evaluator};
use duplex_syntax::ast::expr::Expression;
use std::sync::Arc;

/// One conjunct of a slot guard: a branch condition and the truth value it
/// must take for the slot's branch to be the rendered one.
#[derive(Debug, Clone)]
pub struct GuardTerm {
    pub condition: Arc<Expression>,
    pub condition_text: String,
    pub expected: bool,
}

/// The conjunction of branch conditions guarding a slot.
///
/// A top-level slot carries an empty guard, which always holds. A slot in
/// the i-th arm of a block requires every earlier arm's condition false
/// and its own condition true; an ELSE body requires every arm false.
/// Nested blocks chain their terms onto the enclosing guard, so a guard
/// holds exactly when rendering reaches the slot.
#[derive(Debug, Clone, Default)]
pub struct Guard {
    terms: Vec<GuardTerm>,
}

impl Guard {
    pub(crate) fn root() -> Self {
        Guard { terms: Vec::new() }
    }

    pub(crate) fn and(&self, condition: Arc<Expression>, condition_text: &str, expected: bool) -> Self {
        let mut terms = self.terms.clone();
        terms.push(GuardTerm {
            condition,
            condition_text: condition_text.to_string(),
            expected,
        });
        Guard { terms }
    }

    /// True when every term evaluates to its expected truth value. Terms
    /// are checked outermost first and evaluation stops at the first
    /// mismatch, mirroring the order rendering tests conditions in.
    pub fn holds(&self, ctx: &EvalContext) -> Result<bool, TemplateError> {
        for term in &self.terms {
            let truth = term.condition.evaluate_bool(ctx).map_err(|source| {
                TemplateError::ConditionEvaluation {
                    expr_text: term.condition_text.clone(),
                    source,
                }
            })?;
            if truth != term.expected {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn is_always_true(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[GuardTerm] {
        &self.terms
    }
}
