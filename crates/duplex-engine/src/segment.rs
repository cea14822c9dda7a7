use crate::factor::{ConditionalFactor, Factor};
use crate::guard::Guard;
use duplex_syntax::ast::expr::Expression;
use std::fmt;
use std::sync::Arc;

/// A compiled piece of the template. Rendering walks the segments in
/// order; an alternative renders the body of its first taken arm.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Verbatim SQL copied from the source.
    Static(String),
    /// A placeholder, rendered as the colon-prefixed slot name.
    Slot { name: String, source: SlotSource },
    /// A compiled IF/ELSEIF/ELSE block.
    Alternative(Alternative),
}

/// Where a slot's bind value comes from.
#[derive(Debug, Clone)]
pub enum SlotSource {
    /// Bind placeholder: the named argument, passed through unchanged.
    Arg(String),
    /// Expression placeholder: evaluated against the arguments.
    Expr { expr: Arc<Expression>, text: String },
}

impl fmt::Display for SlotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSource::Arg(name) => write!(f, "{name}"),
            SlotSource::Expr { text, .. } => write!(f, "{text}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Alternative {
    pub branches: Vec<AlternativeBranch>,
    pub else_segments: Option<Vec<Segment>>,
}

#[derive(Debug, Clone)]
pub struct AlternativeBranch {
    pub condition: Arc<Expression>,
    pub condition_text: String,
    pub segments: Vec<Segment>,
}

/// A slot registered while building segments: its generated name, value
/// source, and the guard recording which branches must be taken for the
/// slot to be emitted.
#[derive(Debug, Clone)]
pub(crate) struct SlotEntry {
    pub name: String,
    pub source: SlotSource,
    pub guard: Guard,
}

/// Turns the sorted factor list into the segment tree, slicing static text
/// out of the source and numbering slots in document order.
///
/// A single cursor is threaded through the whole build. Entering a region
/// clamps it forward past the marker text that opened the region, and
/// factors whose start lies behind it have already been consumed by an
/// enclosing block, so the one flat factor list serves every level of the
/// recursion.
pub(crate) struct SegmentBuilder<'a> {
    source: &'a str,
    factors: &'a [Factor],
    counter: usize,
    slots: Vec<SlotEntry>,
}

impl<'a> SegmentBuilder<'a> {
    pub fn new(source: &'a str, factors: &'a [Factor]) -> Self {
        SegmentBuilder {
            source,
            factors,
            counter: 0,
            slots: Vec::new(),
        }
    }

    pub fn build(mut self) -> (Vec<Segment>, Vec<SlotEntry>) {
        let mut cursor = 0;
        let segments = self.region(0, self.source.len(), &mut cursor, &Guard::root());
        (segments, self.slots)
    }

    fn region(
        &mut self,
        start: usize,
        end: usize,
        cursor: &mut usize,
        guard: &Guard,
    ) -> Vec<Segment> {
        let mut segments = Vec::new();
        if *cursor < start {
            *cursor = start;
        }
        let factors = self.factors;
        for factor in factors {
            let span = factor.span();
            if span.start < start || span.end > end {
                continue;
            }
            if span.start < *cursor {
                continue;
            }
            if span.start > *cursor {
                segments.push(Segment::Static(self.source[*cursor..span.start].to_string()));
            }
            match factor {
                Factor::Bind { name, .. } => {
                    segments.push(self.slot(SlotSource::Arg(name.clone()), guard));
                }
                Factor::Expr { expr, text, .. } => {
                    let source = SlotSource::Expr {
                        expr: expr.clone(),
                        text: text.clone(),
                    };
                    segments.push(self.slot(source, guard));
                }
                Factor::Conditional(block) => {
                    segments.push(self.alternative(block, cursor, guard));
                }
            }
            *cursor = span.end;
        }
        if *cursor < end {
            segments.push(Segment::Static(self.source[*cursor..end].to_string()));
            *cursor = end;
        }
        segments
    }

    fn slot(&mut self, source: SlotSource, guard: &Guard) -> Segment {
        self.counter += 1;
        let name = format!("p{}", self.counter);
        self.slots.push(SlotEntry {
            name: name.clone(),
            source: source.clone(),
            guard: guard.clone(),
        });
        Segment::Slot { name, source }
    }

    fn alternative(
        &mut self,
        block: &ConditionalFactor,
        cursor: &mut usize,
        guard: &Guard,
    ) -> Segment {
        let mut branches = Vec::with_capacity(block.branches.len());
        let mut prior = guard.clone();
        for branch in &block.branches {
            let arm_guard = prior.and(branch.condition.clone(), &branch.condition_text, true);
            let segments = self.region(branch.body.start, branch.body.end, cursor, &arm_guard);
            branches.push(AlternativeBranch {
                condition: branch.condition.clone(),
                condition_text: branch.condition_text.clone(),
                segments,
            });
            prior = prior.and(branch.condition.clone(), &branch.condition_text, false);
        }
        let else_segments = block
            .else_body
            .map(|body| self.region(body.start, body.end, cursor, &prior));
        Segment::Alternative(Alternative {
            branches,
            else_segments,
        })
    }
}
