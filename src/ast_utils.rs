// Copyright (C) Brian G. Milnes 2025

//! Syntax tree traversal utilities
//!
//! Provides common functions for walking and querying tree-sitter trees

pub mod ast_utils {
    use tree_sitter::Node;

    use crate::tokens::tokens::Offset;

    /// Find all nodes of a specific kind, in preorder
    pub fn find_nodes<'t>(root: Node<'t>, kind: &str) -> Vec<Node<'t>> {
        find_nodes_where(root, |node| node.kind() == kind)
    }

    /// Find all nodes matching a predicate, in preorder
    pub fn find_nodes_where<'t, F>(root: Node<'t>, predicate: F) -> Vec<Node<'t>>
    where
        F: Fn(&Node<'t>) -> bool,
    {
        let mut results = Vec::new();
        let mut cursor = root.walk();

        loop {
            let node = cursor.node();
            if predicate(&node) {
                results.push(node);
            }
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return results;
                }
            }
        }
    }

    /// Get the source text of a node
    pub fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
        node.utf8_text(source.as_bytes()).unwrap_or("")
    }

    /// Position of a node's first byte as (1-indexed line, byte column)
    pub fn node_offset(node: Node<'_>) -> Offset {
        let position = node.start_position();
        Offset::new(position.row + 1, position.column)
    }

    /// Named children that carry meaning, i.e. everything except comments
    pub fn significant_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    /// True when the node begins a logical line: only blanks precede it on its
    /// physical line and the previous line does not continue into it
    pub fn starts_line(node: Node<'_>, source: &str) -> bool {
        let start = node.start_byte();
        let line_start = source[..start].rfind('\n').map_or(0, |newline| newline + 1);
        let blank_prefix = source[line_start..start]
            .chars()
            .all(|c| matches!(c, ' ' | '\t' | '\x0c'));
        blank_prefix && !continued_from_previous_line(node, source, line_start)
    }

    /// The line before `line_start` ends in a backslash continuation
    fn continued_from_previous_line(node: Node<'_>, source: &str, line_start: usize) -> bool {
        let Some(previous) = source[..line_start].strip_suffix('\n') else {
            return false;
        };
        let previous = previous.strip_suffix('\r').unwrap_or(previous);
        if !previous.ends_with('\\') {
            return false;
        }

        // A backslash that ends a comment continues nothing
        let backslash = previous.len() - 1;
        let mut root = node;
        while let Some(parent) = root.parent() {
            root = parent;
        }
        root.descendant_for_byte_range(backslash, backslash + 1)
            .map_or(true, |covering| covering.kind() != "comment")
    }
}
