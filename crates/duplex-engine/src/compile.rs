use crate::error::TemplateError;
use crate::factor::collect_factors;
use crate::segment::SegmentBuilder;
use crate::template::CompiledTemplate;
use duplex_expr::FunctionRegistry;
use duplex_syntax::ast::expr::{Expression, ExpressionKind};
use duplex_syntax::ast::node::TemplateAst;
use duplex_syntax::ast::visitor::{AstVisitor, walk_expression};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Compilation settings shared by [`compile_with`] and the builder facade.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// When false, directives are left uninterpreted and the template
    /// renders verbatim with no slots.
    pub dynamic: bool,
    /// Functions callable from directive expressions.
    pub functions: Arc<FunctionRegistry>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            dynamic: true,
            functions: Arc::new(FunctionRegistry::new()),
        }
    }
}

/// Compiles a template with the default options: dynamic SQL and the
/// builtin function set. `declared` lists the argument names expressions
/// may reference; referencing anything else fails here rather than at
/// render time.
pub fn compile(source: &str, declared: &[&str]) -> Result<CompiledTemplate, TemplateError> {
    compile_with(source, declared, &CompileOptions::default())
}

pub fn compile_with(
    source: &str,
    declared: &[&str],
    options: &CompileOptions,
) -> Result<CompiledTemplate, TemplateError> {
    if !options.dynamic {
        return Ok(CompiledTemplate::new_static(source, options.functions.clone()));
    }
    let ast = duplex_syntax::parse(source)?;
    validate_references(&ast, declared, &options.functions)?;
    let factors = collect_factors(&ast, source)?;
    let (segments, slots) = SegmentBuilder::new(source, &factors).build();
    debug!(
        slots = slots.len(),
        segments = segments.len(),
        "template compiled"
    );
    Ok(CompiledTemplate::from_parts(
        source,
        segments,
        slots,
        options.functions.clone(),
    ))
}

/// Checks every expression in the template against the declared argument
/// names and the function registry, stopping at the first offender.
fn validate_references(
    ast: &TemplateAst,
    declared: &[&str],
    functions: &FunctionRegistry,
) -> Result<(), TemplateError> {
    let mut checker = ReferenceChecker {
        declared: declared.iter().copied().collect(),
        functions,
        error: None,
    };
    checker.visit_template(ast);
    match checker.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

struct ReferenceChecker<'a> {
    declared: HashSet<&'a str>,
    functions: &'a FunctionRegistry,
    error: Option<TemplateError>,
}

impl AstVisitor for ReferenceChecker<'_> {
    fn visit_expression(&mut self, expr: &Expression) {
        if self.error.is_some() {
            return;
        }
        walk_expression(expr, &mut |sub| {
            if self.error.is_some() {
                return;
            }
            match &sub.kind {
                ExpressionKind::Identifier(name) => {
                    if !self.declared.contains(name.as_str()) {
                        self.error = Some(TemplateError::UndeclaredArgument {
                            name: name.clone(),
                            span: sub.span,
                        });
                    }
                }
                ExpressionKind::Path(path) => {
                    if !self.declared.contains(path.root()) {
                        self.error = Some(TemplateError::UndeclaredArgument {
                            name: path.root().to_string(),
                            span: sub.span,
                        });
                    }
                }
                ExpressionKind::FunctionCall { name, .. } => {
                    if !self.functions.has_function(name) {
                        self.error = Some(TemplateError::UnknownFunction {
                            name: name.clone(),
                            span: sub.span,
                        });
                    }
                }
                _ => {}
            }
        });
    }
}
