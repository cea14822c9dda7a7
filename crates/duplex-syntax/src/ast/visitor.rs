use crate::ast::{
    expr::{Expression, ExpressionKind},
    node::{Conditional, Node, Placeholder, SqlText, TemplateAst},
};

/// Visitor trait for AST traversal
pub trait AstVisitor {
    fn visit_template(&mut self, template: &TemplateAst) {
        for node in &template.nodes {
            self.visit_node(node);
        }
    }

    fn visit_node(&mut self, node: &Node) {
        match node {
            Node::SqlText(text) => self.visit_sql_text(text),
            Node::Placeholder(placeholder) => self.visit_placeholder(placeholder),
            Node::Conditional(conditional) => self.visit_conditional(conditional),
        }
    }

    fn visit_sql_text(&mut self, _text: &SqlText) {}

    fn visit_placeholder(&mut self, placeholder: &Placeholder) {
        self.visit_expression(&placeholder.expr);
    }

    fn visit_conditional(&mut self, conditional: &Conditional) {
        for branch in &conditional.branches {
            self.visit_expression(&branch.condition);
            for node in &branch.nodes {
                self.visit_node(node);
            }
        }
        if let Some(else_branch) = &conditional.else_branch {
            for node in &else_branch.nodes {
                self.visit_node(node);
            }
        }
    }

    fn visit_expression(&mut self, _expr: &Expression) {}
}

/// Walks every sub-expression of an expression tree, outermost first.
pub fn walk_expression<F: FnMut(&Expression)>(expr: &Expression, f: &mut F) {
    f(expr);
    match &expr.kind {
        ExpressionKind::Binary { left, right, .. } => {
            walk_expression(left, f);
            walk_expression(right, f);
        }
        ExpressionKind::Unary { operand, .. } => walk_expression(operand, f),
        ExpressionKind::FunctionCall { arguments, .. } => {
            for arg in arguments {
                walk_expression(arg, f);
            }
        }
        ExpressionKind::IsNull(inner)
        | ExpressionKind::IsNotNull(inner)
        | ExpressionKind::Grouped(inner) => walk_expression(inner, f),
        ExpressionKind::Literal(_) | ExpressionKind::Identifier(_) | ExpressionKind::Path(_) => {}
    }
}
