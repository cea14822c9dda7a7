use crate::error::TemplateError;
use crate::guard::Guard;
use crate::prepared::PreparedQuery;
use crate::render::{Renderer, render_all};
use crate::segment::{Segment, SlotEntry, SlotSource};
use duplex_expr::{EvalContext, Evaluator, FunctionRegistry};
use model::{ParamMap, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// A template compiled once and rendered many times.
///
/// Compilation fixes the segment tree and the slot table. [`render`]
/// produces the SQL for one set of arguments, substituting each emitted
/// placeholder with its colon-prefixed slot name; [`prepare`] additionally
/// evaluates the bind values for the emitted slots. The per-slot value
/// producers are available independently through [`params`].
///
/// [`render`]: CompiledTemplate::render
/// [`prepare`]: CompiledTemplate::prepare
/// [`params`]: CompiledTemplate::params
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    source: String,
    segments: Vec<Segment>,
    params: HashMap<String, ParamValue>,
    order: Vec<String>,
    functions: Arc<FunctionRegistry>,
}

impl CompiledTemplate {
    pub(crate) fn from_parts(
        source: &str,
        segments: Vec<Segment>,
        slots: Vec<SlotEntry>,
        functions: Arc<FunctionRegistry>,
    ) -> Self {
        let mut params = HashMap::with_capacity(slots.len());
        let mut order = Vec::with_capacity(slots.len());
        for slot in slots {
            order.push(slot.name.clone());
            params.insert(
                slot.name,
                ParamValue {
                    source: slot.source,
                    guard: slot.guard,
                    functions: functions.clone(),
                },
            );
        }
        CompiledTemplate {
            source: source.to_string(),
            segments,
            params,
            order,
            functions,
        }
    }

    /// A template compiled with dynamic SQL disabled: the source renders
    /// verbatim and carries no slots.
    pub(crate) fn new_static(source: &str, functions: Arc<FunctionRegistry>) -> Self {
        CompiledTemplate {
            source: source.to_string(),
            segments: vec![Segment::Static(source.to_string())],
            params: HashMap::new(),
            order: Vec::new(),
            functions,
        }
    }

    /// Renders the SQL for one set of arguments. The output is the static
    /// text of every taken branch with each placeholder replaced by `:pN`.
    pub fn render(&self, params: &ParamMap) -> Result<String, TemplateError> {
        let ctx = EvalContext::new(params, &self.functions);
        let mut renderer = Renderer::new(&ctx);
        render_all(&self.segments, &mut renderer)?;
        let (sql, _) = renderer.finish();
        Ok(sql)
    }

    /// Renders the SQL and evaluates a bind value for every slot the
    /// rendering emitted, in emission order.
    pub fn prepare(&self, params: &ParamMap) -> Result<PreparedQuery, TemplateError> {
        let ctx = EvalContext::new(params, &self.functions);
        let mut renderer = Renderer::new(&ctx);
        render_all(&self.segments, &mut renderer)?;
        let (statement, emitted) = renderer.finish();
        let mut binds = Vec::with_capacity(emitted.len());
        for name in emitted {
            let param = self
                .params
                .get(&name)
                .ok_or_else(|| TemplateError::UnknownParam(name.clone()))?;
            // Rendering already settled the branch, so the guard is not
            // re-checked here.
            let value = param.produce(&ctx)?;
            binds.push((name, value));
        }
        Ok(PreparedQuery::new(statement, binds))
    }

    /// The value producer for every slot in the template, taken or not.
    pub fn params(&self) -> &HashMap<String, ParamValue> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Evaluates one slot's guarded value. `Ok(None)` means the slot's
    /// branch is not taken under these arguments.
    pub fn param_value(&self, name: &str, params: &ParamMap) -> Result<Option<Value>, TemplateError> {
        let param = self
            .params
            .get(name)
            .ok_or_else(|| TemplateError::UnknownParam(name.to_string()))?;
        param.value(params)
    }

    /// Slot names in the order their placeholders appear in the source.
    pub fn slot_names(&self) -> &[String] {
        &self.order
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }
}

/// The guarded value producer for one slot.
#[derive(Debug, Clone)]
pub struct ParamValue {
    source: SlotSource,
    guard: Guard,
    functions: Arc<FunctionRegistry>,
}

impl ParamValue {
    /// Evaluates the slot's guard, then its value. `Ok(None)` when a
    /// guarding branch is not taken, so evaluating every slot of a
    /// template is safe regardless of which branches the arguments select.
    pub fn value(&self, params: &ParamMap) -> Result<Option<Value>, TemplateError> {
        let ctx = EvalContext::new(params, &self.functions);
        if !self.guard.holds(&ctx)? {
            return Ok(None);
        }
        self.produce(&ctx).map(Some)
    }

    pub(crate) fn produce(&self, ctx: &EvalContext) -> Result<Value, TemplateError> {
        match &self.source {
            SlotSource::Arg(name) => Ok(ctx.arg(name)),
            SlotSource::Expr { expr, text } => expr.evaluate(ctx).map_err(|source| {
                TemplateError::ExpressionEvaluation {
                    expr_text: text.clone(),
                    source,
                }
            }),
        }
    }

    pub fn source(&self) -> &SlotSource {
        &self.source
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }
}
