use crate::cursor::NodeCursor;
use crate::event::NodeEvent;
use crate::parser::ParseError;
use crate::tree::{XmlContent, XmlDocument, XmlNode};

/// Walks an already-parsed [`XmlDocument`] in document order.
///
/// Elements without children are reported as self-closing.
pub struct TreeCursor<'a> {
    document: &'a XmlDocument,
    stage: Stage,
    stack: Vec<Frame<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Declaration,
    Root,
    Walking,
    Done,
}

struct Frame<'a> {
    node: &'a XmlNode,
    next_child: usize,
}

impl<'a> TreeCursor<'a> {
    pub fn new(document: &'a XmlDocument) -> Self {
        Self {
            document,
            stage: Stage::Declaration,
            stack: Vec::new(),
        }
    }

    fn enter(&mut self, node: &'a XmlNode) -> NodeEvent {
        let is_empty = node.children.is_empty();
        if !is_empty {
            self.stack.push(Frame {
                node,
                next_child: 0,
            });
        }
        NodeEvent::ElementStart(node.start_event(is_empty))
    }
}

impl NodeCursor for TreeCursor<'_> {
    fn advance(&mut self) -> Result<Option<NodeEvent>, ParseError> {
        loop {
            match self.stage {
                Stage::Declaration => {
                    self.stage = Stage::Root;
                    if self.document.declaration {
                        return Ok(Some(NodeEvent::Declaration));
                    }
                }
                Stage::Root => {
                    self.stage = Stage::Walking;
                    let document = self.document;
                    return Ok(Some(self.enter(&document.root)));
                }
                Stage::Walking => {
                    let Some(frame) = self.stack.last_mut() else {
                        self.stage = Stage::Done;
                        continue;
                    };
                    let node = frame.node;
                    let index = frame.next_child;
                    frame.next_child += 1;

                    return Ok(Some(match node.children.get(index) {
                        Some(XmlContent::Element(child)) => self.enter(child),
                        Some(XmlContent::Text(text)) => NodeEvent::Text(text.clone()),
                        None => {
                            self.stack.pop();
                            NodeEvent::ElementEnd
                        }
                    }));
                }
                Stage::Done => return Ok(None),
            }
        }
    }
}
