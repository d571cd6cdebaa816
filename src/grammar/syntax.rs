use crate::*;

/// The query-shaped constructs a dialect reports to the surveyor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    /// A top-level statement.
    Statement(QueryType),
    /// A parenthesized query; the span excludes the parentheses.
    Subquery,
    /// `name [(columns)] AS (query)`; the span starts at the name.
    CommonTableExpression,
    /// A named table source with its unquoted name parts and optional alias.
    TableReference { name: Vec<String>, alias: Option<String> },
    /// A parenthesized query used as a table source.
    DerivedTable { alias: Option<String> },
}

impl Construct {
    pub const fn is_query(&self) -> bool {
        matches!(
            self,
            Construct::Statement(_) | Construct::Subquery | Construct::CommonTableExpression
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub construct: Construct,
    pub location: TokenLocation,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(construct: Construct, location: TokenLocation, children: Vec<SyntaxNode>) -> Self {
        Self {
            construct,
            location,
            children,
        }
    }

    fn walk(&self, visitor: &mut (impl SyntaxVisitor + ?Sized)) {
        visitor.enter(self);
        for child in &self.children {
            child.walk(visitor);
        }
        visitor.exit(self);
    }
}

/// Root nodes in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    pub nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new(nodes: Vec<SyntaxNode>) -> Self {
        Self { nodes }
    }

    /// Depth-first traversal; `enter` before a node's children, `exit` after.
    pub fn walk(&self, visitor: &mut (impl SyntaxVisitor + ?Sized)) {
        for node in &self.nodes {
            node.walk(visitor);
        }
    }
}

pub trait SyntaxVisitor {
    fn enter(&mut self, node: &SyntaxNode);
    fn exit(&mut self, node: &SyntaxNode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl SyntaxVisitor for Recorder {
        fn enter(&mut self, node: &SyntaxNode) {
            self.0.push(format!("enter {}", node.location.start_offset));
        }

        fn exit(&mut self, node: &SyntaxNode) {
            self.0.push(format!("exit {}", node.location.start_offset));
        }
    }

    #[test]
    fn walk_is_depth_first() {
        let leaf = SyntaxNode::new(Construct::Subquery, TokenLocation::new(1, 1, 5, 8), vec![]);
        let root = SyntaxNode::new(
            Construct::Statement(QueryType::Select),
            TokenLocation::new(1, 1, 0, 9),
            vec![leaf],
        );
        let other = SyntaxNode::new(
            Construct::Statement(QueryType::Delete),
            TokenLocation::new(1, 1, 11, 20),
            vec![],
        );
        let mut recorder = Recorder::default();
        SyntaxTree::new(vec![root, other]).walk(&mut recorder);
        assert_eq!(
            recorder.0,
            vec!["enter 0", "enter 5", "exit 5", "exit 0", "enter 11", "exit 11"]
        );
    }
}
