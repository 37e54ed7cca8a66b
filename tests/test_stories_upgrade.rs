// Copyright (C) Brian G. Milnes 2025

//! Tests for the stories upgrade

use codemods::stories::stories::{upgrade, upgrade_with_notes};
use codemods::{parse_source, UpgradeError};

fn assert_upgrade(before: &str, after: &str) {
    let upgraded = upgrade(before).unwrap();
    assert_eq!(upgraded, after);
    // tree-sitter is lenient about indentation, so this only catches gross breakage
    assert!(parse_source(&upgraded).is_ok(), "tree-sitter reports errors in:\n{upgraded}");
    assert_eq!(upgrade(&upgraded).unwrap(), upgraded);
}

#[test]
fn test_migrate_ctx_assignment() {
    for returned_class in ["Success", "Skip"] {
        let before = format!(
            r#"
from stories import story, {returned_class}

class Action:
    @story
    def do(I):
        I.one

    def one(self, ctx):
        return {returned_class}(foo=1)
"#
        );
        let after = format!(
            r#"
from stories import story, {returned_class}

class Action:
    @story
    def do(I):
        I.one

    def one(self, ctx):
        ctx.foo = 1
        return {returned_class}()
"#
        );
        assert_upgrade(&before, &after);
    }
}

#[test]
fn test_argument_order_is_preserved() {
    assert_upgrade(
        "def one(self, ctx):\n    return Success(foo=1, bar=2)\n",
        "def one(self, ctx):\n    ctx.foo = 1\n    ctx.bar = 2\n    return Success()\n",
    );
}

#[test]
fn test_indentation_follows_each_return() {
    let before = r#"
def one(self, ctx):
    if ctx.flag:
        return Skip(reason="flag")
    return Success(foo=1)
"#;
    let after = r#"
def one(self, ctx):
    if ctx.flag:
        ctx.reason = "flag"
        return Skip()
    ctx.foo = 1
    return Success()
"#;
    assert_upgrade(before, after);
}

#[test]
fn test_tab_indentation_is_copied() {
    assert_upgrade(
        "def one(self, ctx):\n\treturn Success(foo=1)\n",
        "def one(self, ctx):\n\tctx.foo = 1\n\treturn Success()\n",
    );
}

#[test]
fn test_nested_values_are_carried_verbatim() {
    let before = r#"
def one(self, ctx):
    return Success(
        items=[x * 2 for x in ctx.values if x],
        table={"a": (1, 2), "b": [3, 4]},
        total=sum(ctx.values, start=0),
        label="(, ]",
    )
"#;
    let after = r#"
def one(self, ctx):
    ctx.items = [x * 2 for x in ctx.values if x]
    ctx.table = {"a": (1, 2), "b": [3, 4]}
    ctx.total = sum(ctx.values, start=0)
    ctx.label = "(, ]"
    return Success()
"#;
    assert_upgrade(before, after);
}

#[test]
fn test_multiline_arguments_with_comment_line() {
    let before = r#"
class Action:
    def one(self, ctx):
        return Success(
            foo=1,
            # the bar is a list
            bar=[
                1,
                2,
            ],
        )

    def two(self, ctx):
        pass
"#;
    let after = r#"
class Action:
    def one(self, ctx):
        ctx.foo = 1
        ctx.bar = [
                1,
                2,
            ]
        return Success()

    def two(self, ctx):
        pass
"#;
    assert_upgrade(before, after);
}

#[test]
fn test_multiline_value_is_parenthesized() {
    let before = "def one(self, ctx):\n    return Success(\n        total=ctx.a\n        + ctx.b,\n    )\n";
    let after = "def one(self, ctx):\n    ctx.total = (ctx.a\n        + ctx.b)\n    return Success()\n";
    assert_upgrade(before, after);
}

#[test]
fn test_zero_keyword_call_is_unchanged() {
    let source = "def one(self, ctx):\n    return Success()\n";
    assert_eq!(upgrade(source).unwrap(), source);
}

#[test]
fn test_non_qualifying_names_are_unchanged() {
    let source = "def one(self, ctx):\n    if ctx.x:\n        return Failure(foo=1)\n    return Result(foo=1)\n";
    assert_eq!(upgrade(source).unwrap(), source);
}

#[test]
fn test_spread_arguments_are_unchanged() {
    let source = "def one(self, ctx):\n    return Success(foo=1, **extra)\n";
    assert_eq!(upgrade(source).unwrap(), source);
}

#[test]
fn test_untouched_file_is_byte_identical() {
    let source = "# comment   \r\nx  =  [1,2 ,3]\t# trailing\r\n\r\n\r\ndef f( a ):\r\n    return  a\r\n";
    assert_eq!(upgrade(source).unwrap(), source);
}

#[test]
fn test_crlf_line_endings_are_kept() {
    assert_upgrade(
        "def one(self, ctx):\r\n    return Success(foo=1, bar=2)\r\n",
        "def one(self, ctx):\r\n    ctx.foo = 1\r\n    ctx.bar = 2\r\n    return Success()\r\n",
    );
}

#[test]
fn test_parenthesized_return_value() {
    assert_upgrade(
        "def one(self, ctx):\n    return (Success(foo=1))\n",
        "def one(self, ctx):\n    ctx.foo = 1\n    return (Success())\n",
    );
}

#[test]
fn test_trailing_comment_after_call_is_kept() {
    assert_upgrade(
        "def one(self, ctx):\n    return Success(foo=1)  # done\n",
        "def one(self, ctx):\n    ctx.foo = 1\n    return Success()  # done\n",
    );
}

#[test]
fn test_many_sites_in_one_file() {
    let before = r#"
class Action:
    def one(self, ctx):
        return Success(a=1)

    def two(self, ctx):
        if ctx.a:
            return Skip(b=2, c=3)
        return Success(d=4)
"#;
    let after = r#"
class Action:
    def one(self, ctx):
        ctx.a = 1
        return Success()

    def two(self, ctx):
        if ctx.a:
            ctx.b = 2
            ctx.c = 3
            return Skip()
        ctx.d = 4
        return Success()
"#;
    assert_upgrade(before, after);
}

#[test]
fn test_return_sharing_a_line_is_left_alone() {
    let before = "def one(self, ctx):\n    if ctx.x: return Success(foo=1)\n    return Success(bar=2)\n";
    let after = "def one(self, ctx):\n    if ctx.x: return Success(foo=1)\n    ctx.bar = 2\n    return Success()\n";
    assert_upgrade(before, after);

    let outcome = upgrade_with_notes(before).unwrap();
    assert!(outcome.notes.iter().any(|note| note.starts_with("2:14:")));
    assert!(outcome.notes.iter().any(|note| note == "rewrote 1 return site(s)"));
}

#[test]
fn test_invalid_source_is_a_parse_error() {
    let err = upgrade("def one(self, ctx)\n    return Success(foo=1\n").unwrap_err();
    assert!(matches!(err, UpgradeError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_return_continued_from_previous_line_is_left_alone() {
    let source = "def f(self, ctx):\n    if ctx.x: \\\n        return Success(a=1)\n";
    let outcome = upgrade_with_notes(source).unwrap();
    assert_eq!(outcome.output, source);
    assert!(outcome.notes.iter().any(|note| note.starts_with("3:8:")));
    assert!(!outcome.notes.iter().any(|note| note.starts_with("rewrote")));
}

#[test]
fn test_continuation_inside_statements_around_return() {
    let before = "def f(self, ctx):\n    total = 1 + \\\n        2\n    # path C:\\\n    return Success(a=total)\n";
    let after = "def f(self, ctx):\n    total = 1 + \\\n        2\n    # path C:\\\n    ctx.a = total\n    return Success()\n";
    assert_eq!(upgrade(before).unwrap(), after);
    assert_eq!(upgrade(after).unwrap(), after);
}
