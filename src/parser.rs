// Copyright (C) Brian G. Milnes 2025

//! Python parser front end
//!
//! Wraps tree-sitter-python and rejects any tree containing ERROR or MISSING
//! nodes, so callers only ever see syntactically valid files.

pub mod parser {
    use tree_sitter::{Node, Parser, Tree};

    use crate::error::error::{UpgradeError, UpgradeResult};

    /// Parse Python source into a syntax tree
    pub fn parse_source(source: &str) -> UpgradeResult<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| UpgradeError::ParserInit(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| UpgradeError::ParserInit("parser produced no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let culprit = first_error(root).unwrap_or(root);
            let position = culprit.start_position();
            let message = if culprit.is_missing() {
                format!("missing `{}`", culprit.kind())
            } else {
                "invalid syntax".to_string()
            };
            return Err(UpgradeError::Parse {
                line: position.row + 1,
                column: position.column,
                message,
            });
        }

        Ok(tree)
    }

    /// Depth-first search for the leftmost ERROR or MISSING node
    fn first_error(node: Node<'_>) -> Option<Node<'_>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error() {
                if let Some(found) = first_error(child) {
                    return Some(found);
                }
            }
        }
        None
    }
}
