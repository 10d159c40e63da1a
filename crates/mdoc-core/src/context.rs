//! Per-conversion state for the mdast → document walk

/// One enclosing mdast node: its kind and its index among its siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub kind: &'static str,
    pub index: usize,
}

/// Ancestry of the node being converted.
///
/// Created fresh for each top-level conversion. The last frame is the node
/// whose hook is running.
#[derive(Debug, Clone, Default)]
pub struct ConversionContext {
    frames: Vec<Frame>,
    heading_level: Option<u8>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enter(&mut self, kind: &'static str, index: usize) {
        self.frames.push(Frame { kind, index });
    }

    pub(crate) fn leave(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn set_heading_level(&mut self, level: Option<u8>) -> Option<u8> {
        std::mem::replace(&mut self.heading_level, level)
    }

    /// Frame of the node being converted
    pub fn current(&self) -> Option<Frame> {
        self.frames.last().copied()
    }

    /// Frame `depth` levels up; 0 is the node being converted
    pub fn ancestor(&self, depth: usize) -> Option<Frame> {
        self.frames
            .len()
            .checked_sub(depth + 1)
            .map(|i| self.frames[i])
    }

    /// Whether a strict ancestor has the given kind
    pub fn within(&self, kind: &str) -> bool {
        let len = self.frames.len().saturating_sub(1);
        self.frames[..len].iter().any(|f| f.kind == kind)
    }

    /// Level of the enclosing heading, if any
    pub fn heading_level(&self) -> Option<u8> {
        self.heading_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors() {
        let mut ctx = ConversionContext::new();
        ctx.enter("root", 0);
        ctx.enter("table", 2);
        ctx.enter("tableRow", 0);
        ctx.enter("tableCell", 1);

        assert_eq!(ctx.current(), Some(Frame { kind: "tableCell", index: 1 }));
        assert_eq!(ctx.ancestor(1), Some(Frame { kind: "tableRow", index: 0 }));
        assert_eq!(ctx.ancestor(3).map(|f| f.kind), Some("root"));
        assert_eq!(ctx.ancestor(4), None);
        assert!(ctx.within("table"));
        assert!(!ctx.within("tableCell"));

        ctx.leave();
        assert_eq!(ctx.current().map(|f| f.kind), Some("tableRow"));
        assert_eq!(ctx.ancestor(2).map(|f| f.kind), Some("root"));
        assert_eq!(ctx.ancestor(3), None);
    }

    #[test]
    fn test_heading_level_restores() {
        let mut ctx = ConversionContext::new();
        let outer = ctx.set_heading_level(Some(2));
        assert_eq!(ctx.heading_level(), Some(2));
        ctx.set_heading_level(outer);
        assert_eq!(ctx.heading_level(), None);
    }
}
