//! Dispatch between the two tree representations
//!
//! Both walks are bottom-up: children are converted first and handed to the
//! hook registered for the parent's type. Types without a hook pass their
//! converted children through and the wrapper is dropped.

use crate::context::ConversionContext;
use crate::document::{Attrs, DocNode, Mark};
use crate::error::ConvertError;
use crate::registry::{Registry, Subject};
use mdoc_mdast::{Node as MdNode, Root};

/// Converts between mdast and the document tree using a registry
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    registry: &'a Registry,
}

impl<'a> Converter<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Convert an mdast tree to a document tree rooted at `doc`
    pub fn to_document(&self, root: Root) -> Result<DocNode, ConvertError> {
        let root = MdNode::Root(root);
        let mut ctx = ConversionContext::new();
        let mut nodes = self.node_to_document(&root, 0, &mut ctx)?;

        if nodes.len() == 1 && nodes[0].node_type == "doc" {
            return Ok(nodes.remove(0));
        }
        self.registry.schema().node("doc", Attrs::new(), nodes)
    }

    fn node_to_document(
        &self,
        node: &MdNode,
        index: usize,
        ctx: &mut ConversionContext,
    ) -> Result<Vec<DocNode>, ConvertError> {
        ctx.enter(node.kind(), index);
        let outer_level = match node {
            MdNode::Heading(h) => Some(ctx.set_heading_level(Some(h.depth))),
            _ => None,
        };

        let result = self.convert_with_hook(node, ctx);

        if let Some(level) = outer_level {
            ctx.set_heading_level(level);
        }
        ctx.leave();
        result
    }

    fn convert_with_hook(
        &self,
        node: &MdNode,
        ctx: &mut ConversionContext,
    ) -> Result<Vec<DocNode>, ConvertError> {
        let mut children = Vec::new();
        for (i, child) in node.children().iter().enumerate() {
            children.extend(self.node_to_document(child, i, ctx)?);
        }

        match self
            .registry
            .for_markdown_kind(node.kind())
            .and_then(|entry| entry.from_markdown)
        {
            Some(hook) => hook(node, self.registry.schema(), children, ctx),
            None => {
                tracing::debug!(kind = node.kind(), "No handler for mdast kind, passing children through");
                Ok(children)
            }
        }
    }

    /// Convert a document tree to mdast
    pub fn to_markdown_ast(&self, doc: &DocNode) -> Root {
        let mut children = Vec::new();
        for node in self.node_to_markdown(doc) {
            match node {
                MdNode::Root(root) => children.extend(root.children),
                other => children.push(other),
            }
        }
        Root::new(children)
    }

    fn node_to_markdown(&self, node: &DocNode) -> Vec<MdNode> {
        let children = self.content_to_markdown(&node.content);

        match self
            .registry
            .transform(&node.node_type)
            .and_then(|entry| entry.to_markdown)
        {
            Some(hook) => hook(Subject::Node(node), children),
            None => {
                tracing::debug!(node_type = %node.node_type, "No handler for document type, passing children through");
                children
            }
        }
    }

    fn content_to_markdown(&self, content: &[DocNode]) -> Vec<MdNode> {
        let schema = self.registry.schema();
        let items: Vec<(&DocNode, Vec<&Mark>)> = content
            .iter()
            .map(|node| (node, schema.ordered_marks(node)))
            .collect();
        self.marked_run(&items)
    }

    /// Convert siblings, wrapping runs that share a mark in a single mdast
    /// node for that mark.
    ///
    /// Each item carries the marks not yet applied by an enclosing run. A
    /// mark the next sibling also carries is preferred, so `a` (italic)
    /// followed by `b` (bold, italic) nests as `*a **b***`.
    fn marked_run(&self, items: &[(&DocNode, Vec<&Mark>)]) -> Vec<MdNode> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < items.len() {
            let (node, marks) = &items[i];
            if marks.is_empty() {
                out.extend(self.node_to_markdown(node));
                i += 1;
                continue;
            }

            let mark = marks
                .iter()
                .find(|m| items.get(i + 1).is_some_and(|(_, next)| next.contains(*m)))
                .unwrap_or(&marks[0]);

            let mut end = i;
            while end < items.len() && items[end].1.contains(mark) {
                end += 1;
            }

            let inner: Vec<(&DocNode, Vec<&Mark>)> = items[i..end]
                .iter()
                .map(|(n, ms)| (*n, ms.iter().filter(|m| *m != mark).copied().collect()))
                .collect();
            let children = self.marked_run(&inner);
            out.extend(self.mark_to_markdown(mark, children));
            i = end;
        }
        out
    }

    fn mark_to_markdown(&self, mark: &Mark, children: Vec<MdNode>) -> Vec<MdNode> {
        match self
            .registry
            .transform(&mark.mark_type)
            .and_then(|entry| entry.to_markdown)
        {
            Some(hook) => hook(Subject::Mark(mark), children),
            None => {
                tracing::debug!(mark_type = %mark.mark_type, "No handler for mark type, passing children through");
                children
            }
        }
    }
}

#[cfg(test)]
mod tests;
