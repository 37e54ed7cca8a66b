// Copyright (C) Brian G. Milnes 2025

//! Dependencies upgrade: contrib imports and injector-based view classes
//!
//! Matches are found in the syntax tree and applied as byte-range edits from
//! the END of the file to the START, so earlier offsets stay valid and every
//! untouched byte is kept.

pub mod dependencies {
    use std::ops::Range;

    use tree_sitter::Node;

    use crate::ast_utils::ast_utils::{find_nodes, node_offset, node_text, significant_children};
    use crate::error::error::{UpgradeError, UpgradeResult};
    use crate::fixer::fixer::Outcome;
    use crate::parser::parser::parse_source;

    /// `(module, name)` of a `from module import name` statement
    pub type ImportPair = (&'static str, &'static str);

    pub const MIGRATE_FROM_IMPORT: [(ImportPair, ImportPair); 1] = [(
        ("dependencies.contrib.rest_framework", "model_view_set"),
        ("rest_framework.viewsets", "ModelViewSet"),
    )];

    /// Decorator name to the view class replacing the `Injector` base
    pub const MIGRATE_DRF_CLASS_INJECTOR: [(&str, &str); 1] = [("model_view_set", "ModelViewSet")];

    pub const INJECTOR_BASE: &str = "Injector";

    #[derive(Debug)]
    struct Edit {
        range: Range<usize>,
        replacement: String,
    }

    pub fn upgrade(source: &str) -> UpgradeResult<String> {
        Ok(upgrade_with_notes(source)?.output)
    }

    pub fn upgrade_with_notes(source: &str) -> UpgradeResult<Outcome> {
        let mut notes = Vec::new();
        let code = migrate_from_import(source, &MIGRATE_FROM_IMPORT, &mut notes)?;
        let code = migrate_drf_class_injector(&code, &MIGRATE_DRF_CLASS_INJECTOR, &mut notes)?;
        Ok(Outcome { output: code, notes })
    }

    /// Rewrite `from <old module> import <old name>` to the new pair
    pub fn migrate_from_import(
        source: &str,
        migrate_map: &[(ImportPair, ImportPair)],
        notes: &mut Vec<String>,
    ) -> UpgradeResult<String> {
        let tree = parse_source(source)?;
        let mut edits = Vec::new();

        for node in find_nodes(tree.root_node(), "import_from_statement") {
            let Some(module) = node.child_by_field_name("module_name") else {
                continue;
            };
            let mut cursor = node.walk();
            let names: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
            let [name] = names.as_slice() else {
                continue;
            };

            let found = migrate_map.iter().find(|(old, _)| {
                node_text(module, source) == old.0 && node_text(*name, source) == old.1
            });
            if let Some((old, new)) = found {
                notes.push(format!(
                    "{}: from {} import {} -> from {} import {}",
                    node_offset(node),
                    old.0,
                    old.1,
                    new.0,
                    new.1
                ));
                edits.push(Edit { range: module.byte_range(), replacement: new.0.to_string() });
                edits.push(Edit { range: name.byte_range(), replacement: new.1.to_string() });
            }
        }

        apply_edits(source, edits)
    }

    /// For `@<old>`-decorated classes based on `Injector` alone, drop the
    /// decorator and swap the base for the replacement class
    pub fn migrate_drf_class_injector(
        source: &str,
        migrate_map: &[(&str, &str)],
        notes: &mut Vec<String>,
    ) -> UpgradeResult<String> {
        let tree = parse_source(source)?;
        let mut edits = Vec::new();

        for node in find_nodes(tree.root_node(), "decorated_definition") {
            let Some(class) = node.child_by_field_name("definition") else {
                continue;
            };
            if class.kind() != "class_definition" {
                continue;
            }
            let Some(bases) = class.child_by_field_name("superclasses") else {
                continue;
            };
            let base = match significant_children(bases).as_slice() {
                [base] if base.kind() == "identifier" && node_text(*base, source) == INJECTOR_BASE => *base,
                _ => continue,
            };

            let decorators: Vec<Node> = significant_children(node)
                .into_iter()
                .filter(|child| child.kind() == "decorator")
                .collect();

            for (old, new) in migrate_map {
                let Some(decorator) = decorators.iter().find(|dec| decorator_name(**dec, source) == *old) else {
                    continue;
                };
                // Up to the next sibling so the decorator's line ending goes too
                let end = decorator
                    .next_sibling()
                    .map_or(decorator.end_byte(), |next| next.start_byte());
                notes.push(format!("{}: @{old} on {INJECTOR_BASE} class -> {new} base", node_offset(class)));
                edits.push(Edit { range: decorator.start_byte()..end, replacement: String::new() });
                edits.push(Edit { range: base.byte_range(), replacement: new.to_string() });
                break;
            }
        }

        apply_edits(source, edits)
    }

    /// Decorator text without `@` and surrounding blanks
    fn decorator_name<'s>(decorator: Node<'_>, source: &'s str) -> &'s str {
        node_text(decorator, source).trim().trim_start_matches('@').trim()
    }

    /// Apply non-overlapping edits from the end of the file to the start
    fn apply_edits(source: &str, mut edits: Vec<Edit>) -> UpgradeResult<String> {
        edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));

        let mut result = source.to_string();
        let mut floor = source.len();
        for edit in edits {
            if edit.range.end > floor {
                return Err(UpgradeError::invariant(format!(
                    "edit at bytes {:?} overlaps a later edit",
                    edit.range
                )));
            }
            result.replace_range(edit.range.clone(), &edit.replacement);
            floor = edit.range.start;
        }
        Ok(result)
    }
}
