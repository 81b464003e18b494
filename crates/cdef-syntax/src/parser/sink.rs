//! Sink for converting parser events into a [`LightTree`].
//!
//! Forward-parent chains (left operands wrapped after the fact by
//! `precede`) are resolved here, trivia are attached to the enclosing node,
//! and collapsible wrappers are elided by the tree builder.

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::tree::{LightTree, TreeBuilder};

/// Builds a light tree from parser events.
pub(crate) struct Sink {
    events: Vec<Event>,
    builder: TreeBuilder,
}

impl Sink {
    /// Creates a new sink.
    pub(crate) fn new(tokens: Vec<Token>, text: &str, events: Vec<Event>) -> Self {
        Self {
            events,
            builder: TreeBuilder::new(text, tokens),
        }
    }

    /// Consumes the sink and returns the tree.
    pub(crate) fn finish(mut self) -> LightTree {
        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    let mut kinds = vec![kind];
                    let mut idx = i;
                    let mut fp = forward_parent;

                    while let Some(fp_idx) = fp {
                        idx += fp_idx;
                        if let Event::Start {
                            kind,
                            forward_parent,
                        } = std::mem::replace(&mut self.events[idx], Event::Placeholder)
                        {
                            kinds.push(kind);
                            fp = forward_parent;
                        } else {
                            break;
                        }
                    }

                    self.builder.eat_trivia();
                    for kind in kinds.into_iter().rev() {
                        self.builder.start_node(kind);
                    }
                }
                Event::Token => {
                    self.builder.eat_trivia();
                    self.builder.token();
                }
                Event::Finish => {
                    if self.builder.depth() == 1 {
                        self.builder.eat_rest();
                    }
                    self.builder.finish_node();
                }
                Event::Placeholder => {}
            }
        }

        self.builder.finish()
    }
}
