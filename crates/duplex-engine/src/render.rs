use crate::error::TemplateError;
use crate::segment::{Alternative, Segment};
use duplex_expr::{EvalContext, Evaluator};

/// A segment that can write itself into the rendering buffer.
pub(crate) trait Render {
    fn render(&self, renderer: &mut Renderer) -> Result<(), TemplateError>;
}

/// Accumulates the SQL string and the emitted slot names while walking the
/// segment tree against one set of arguments.
pub(crate) struct Renderer<'a> {
    pub sql: String,
    pub emitted: Vec<String>,
    pub ctx: &'a EvalContext<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(ctx: &'a EvalContext<'a>) -> Self {
        Renderer {
            sql: String::new(),
            emitted: Vec::new(),
            ctx,
        }
    }

    /// Consumes the renderer and returns the final SQL and the slot names
    /// in emission order.
    pub fn finish(self) -> (String, Vec<String>) {
        (self.sql, self.emitted)
    }

    fn add_slot(&mut self, name: &str) {
        self.sql.push(':');
        self.sql.push_str(name);
        self.emitted.push(name.to_string());
    }
}

pub(crate) fn render_all(segments: &[Segment], renderer: &mut Renderer) -> Result<(), TemplateError> {
    for segment in segments {
        segment.render(renderer)?;
    }
    Ok(())
}

impl Render for Segment {
    fn render(&self, renderer: &mut Renderer) -> Result<(), TemplateError> {
        match self {
            Segment::Static(text) => {
                renderer.sql.push_str(text);
                Ok(())
            }
            Segment::Slot { name, .. } => {
                renderer.add_slot(name);
                Ok(())
            }
            Segment::Alternative(alternative) => alternative.render(renderer),
        }
    }
}

impl Render for Alternative {
    fn render(&self, renderer: &mut Renderer) -> Result<(), TemplateError> {
        for branch in &self.branches {
            let taken = branch.condition.evaluate_bool(renderer.ctx).map_err(|source| {
                TemplateError::ConditionEvaluation {
                    expr_text: branch.condition_text.clone(),
                    source,
                }
            })?;
            if taken {
                return render_all(&branch.segments, renderer);
            }
        }
        match &self.else_segments {
            Some(segments) => render_all(segments, renderer),
            None => Ok(()),
        }
    }
}
