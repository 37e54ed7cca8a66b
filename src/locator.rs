// Copyright (C) Brian G. Milnes 2025

//! Finds `return Success(...)` / `return Skip(...)` sites in a syntax tree
//!
//! Only positions leave this module; the tree itself is never edited.

pub mod locator {
    use tree_sitter::{Node, Tree};

    use crate::ast_utils::ast_utils::{node_offset, node_text, significant_children, starts_line};
    use crate::tokens::tokens::Offset;

    /// Result constructors whose keyword arguments move onto the context
    pub const SENTINEL_CALLS: [&str; 2] = ["Success", "Skip"];

    /// A qualifying return statement paired with the callee of its call
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ReturnSite {
        pub statement: Offset,
        pub callee: Offset,
    }

    /// Tree walk collecting return sites
    pub struct FindAssignment<'s> {
        source: &'s str,
        pub sites: Vec<ReturnSite>,
        /// Qualifying returns that share their line with an earlier statement
        pub skipped: Vec<Offset>,
    }

    impl<'s> FindAssignment<'s> {
        pub fn new(source: &'s str) -> Self {
            FindAssignment {
                source,
                sites: Vec::new(),
                skipped: Vec::new(),
            }
        }

        pub fn visit(&mut self, node: Node<'_>) {
            if node.kind() == "return_statement" {
                self.visit_return(node);
            }
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                self.visit(child);
            }
        }

        fn visit_return(&mut self, node: Node<'_>) {
            let Some(call) = returned_call(node) else {
                return;
            };
            let Some(callee) = sentinel_callee(call, self.source) else {
                return;
            };

            if !starts_line(node, self.source) {
                self.skipped.push(node_offset(node));
                return;
            }
            self.sites.push(ReturnSite {
                statement: node_offset(node),
                callee: node_offset(callee),
            });
        }
    }

    /// Locate every qualifying return site, in source order
    pub fn locate<'s>(tree: &Tree, source: &'s str) -> FindAssignment<'s> {
        let mut visitor = FindAssignment::new(source);
        visitor.visit(tree.root_node());
        visitor
    }

    /// The call a return statement returns, looking through redundant parentheses
    fn returned_call(node: Node<'_>) -> Option<Node<'_>> {
        let mut value = *significant_children(node).first()?;
        while value.kind() == "parenthesized_expression" {
            value = *significant_children(value).first()?;
        }
        (value.kind() == "call").then_some(value)
    }

    /// Callee of `Success(...)`/`Skip(...)` when it takes keyword arguments only
    fn sentinel_callee<'t>(call: Node<'t>, source: &str) -> Option<Node<'t>> {
        let function = call.child_by_field_name("function")?;
        if function.kind() != "identifier" || !SENTINEL_CALLS.contains(&node_text(function, source)) {
            return None;
        }

        let arguments = call.child_by_field_name("arguments")?;
        if arguments.kind() != "argument_list" {
            return None;
        }
        // Positional arguments and `*`/`**` spreads disqualify the call
        let args = significant_children(arguments);
        let keywords_only = !args.is_empty() && args.iter().all(|arg| arg.kind() == "keyword_argument");
        keywords_only.then_some(function)
    }
}
