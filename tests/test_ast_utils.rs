// Copyright (C) Brian G. Milnes 2025

//! Tests for syntax tree helpers

use codemods::{find_nodes, node_offset, node_text, parse_source, significant_children, starts_line, Offset};

#[test]
fn test_find_nodes_in_source_order() {
    let source = "def a():\n    return 1\n\ndef b():\n    if x:\n        return 2\n";
    let tree = parse_source(source).unwrap();
    let returns = find_nodes(tree.root_node(), "return_statement");
    let texts: Vec<_> = returns.iter().map(|node| node_text(*node, source)).collect();
    assert_eq!(texts, vec!["return 1", "return 2"]);
    assert_eq!(node_offset(returns[1]), Offset::new(6, 8));
}

#[test]
fn test_significant_children_skip_comments() {
    let source = "f(\n    a=1,  # first\n    b=2,\n)\n";
    let tree = parse_source(source).unwrap();
    let lists = find_nodes(tree.root_node(), "argument_list");
    let kinds: Vec<_> = significant_children(lists[0]).iter().map(|node| node.kind()).collect();
    assert_eq!(kinds, vec!["keyword_argument", "keyword_argument"]);
}

#[test]
fn test_starts_line() {
    let source = "if x: return 1\nwhile y:\n    return 2\n";
    let tree = parse_source(source).unwrap();
    let returns = find_nodes(tree.root_node(), "return_statement");
    assert_eq!(returns.len(), 2);
    assert!(!starts_line(returns[0], source));
    assert!(starts_line(returns[1], source));
}
