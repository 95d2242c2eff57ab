use pretty_assertions::assert_eq;
use razor_core::{
    logic_block::{protect, restore},
    normalize, Diagnostic, NormalizerConfig, RazorError, RewriteError, SyntaxNormalizer,
};

const COMPLEX: &str = r#"@* page header *@
<h1>@Html.Raw(Model.Title)</h1>
@{
    var total = Model.Items.Count;
    var style = { color: "red" };
}
@foreach(var item in Model.Items) {
    @if (item.Tags.Any()) {
        <ul>
        @foreach(var tag in item.Tags) {
            <li>@tag</li>
        }
        </ul>
    } else {
        <em>none</em>
    }
}
@*VASH_IGNORE_START*@
@Html.Partial("Legacy", new { id = 1 })
@*VASH_IGNORE_END*@
<footer>@total items</footer>"#;

const COMPLEX_NORMALIZED: &str = r#"
<h1>@Html.raw(Model.Title)</h1>
@{
    var total = Model.Items.length;
    var style = { color: "red" };
}
@Html.foreach(Model.Items, function(item) {
    @if (item.Tags.length>0) {
        <ul>
        @Html.foreach(item.Tags, function(tag) {
            <li>@tag</li>
        })
        </ul>
    } else {
        <em>none</em>
    }
})

<footer>@total items</footer>"#;

fn default_normalizer() -> SyntaxNormalizer {
    SyntaxNormalizer::new(&NormalizerConfig::default()).unwrap()
}

#[test]
fn test_complex_template() {
    let normalized = default_normalizer().normalize(COMPLEX).unwrap();
    assert_eq!(normalized.text, COMPLEX_NORMALIZED);
    assert!(normalized.diagnostics.is_empty());
}

#[test]
fn test_output_has_no_placeholders() {
    let normalized = default_normalizer().normalize(COMPLEX).unwrap();
    assert!(!normalized.text.contains('\u{E000}'));
}

#[test]
fn test_loop_rewrite_example() {
    let normalized = default_normalizer()
        .normalize("@foreach(var item in list) { <p>@item</p> }")
        .unwrap();
    assert_eq!(normalized.text, "@Html.foreach(list, function(item) { <p>@item</p> })");
}

#[test]
fn test_missing_in_keyword_produces_no_output() {
    let result = default_normalizer().normalize("@foreach(item) { x }");
    assert!(matches!(result, Err(RewriteError::LoopSyntax { .. })));
}

#[test]
fn test_missing_var_is_reported_not_thrown() {
    let normalized = default_normalizer()
        .normalize("<ul>@foreach(user in Model.Users) { <li>@user.Name</li> }</ul>")
        .unwrap();
    assert_eq!(
        normalized.text,
        "<ul>@Html.foreach(Model.Users, function(user) { <li>@user.Name</li> })</ul>"
    );
    assert!(matches!(
        normalized.diagnostics.as_slice(),
        [Diagnostic::MissingVariable { variable, .. }] if variable == "user"
    ));
}

#[test]
fn test_unclosed_loop_aborts_whole_call() {
    let err = normalize(
        "@foreach(var a in as) { ok } @foreach(var b in bs) { never closed",
        &NormalizerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RazorError::Rewrite(RewriteError::MalformedBlock { .. })
    ));
}

#[test]
fn test_no_constructs_is_identity() {
    let text = "<div class=\"{ literal }\">plain { text }</div>\n";
    assert_eq!(default_normalizer().normalize(text).unwrap().text, text);
}

#[test]
fn test_custom_ignore_markers_with_newlines() {
    let config = NormalizerConfig {
        ignore_start: "<!--skip-->".to_string(),
        ignore_end: "<!--/skip-->".to_string(),
        ..Default::default()
    };
    let normalized = normalize("1<!--skip-->2\n@foreach(x) {\n3<!--/skip-->", &config).unwrap();
    assert_eq!(normalized.text, "1");
}

#[test]
fn test_sibling_logic_blocks() {
    let text = "@{ A { x } } @{ B { y } }";
    let protected = protect(text).unwrap();
    let (first, second) = protected.split_at(protected.find(" \u{E000}logic-open").unwrap());
    assert!(first.ends_with("\u{E000}logic-close\u{E000}"));
    assert_eq!(second.matches("logic-close").count(), 1);
    assert_eq!(restore(&protected), text);
}

#[test]
fn test_nested_logic_block_collapse() {
    let protected = protect("@{ if(a){ if(b){ c } } }").unwrap();
    assert_eq!(protected.matches("logic-close").count(), 1);
    assert!(protected.contains("if(a){ if(b){ c } } "));
}
