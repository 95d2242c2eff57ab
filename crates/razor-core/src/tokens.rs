/// C# members and helpers that Vash spells differently, applied in order
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("Html.Raw", "Html.raw"),
    (".Length", ".length"),
    (".Count", ".length"),
    (".Any()", ".length>0"),
    ("string.IsNullOrEmpty", "Html.StringIsNullOrEmpty"),
    ("String.IsNullOrEmpty", "Html.StringIsNullOrEmpty"),
    ("string.IsNullOrWhiteSpace", "Html.StringIsNullOrWhiteSpace"),
    ("String.IsNullOrWhiteSpace", "Html.StringIsNullOrWhiteSpace"),
];

/// Apply every literal replacement in [`REPLACEMENTS`]
pub fn rewrite(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csharp_members() {
        assert_eq!(rewrite("Html.Raw()"), "Html.raw()");
        assert_eq!(rewrite("a.Length"), "a.length");
        assert_eq!(rewrite("b.Count"), "b.length");
        assert_eq!(rewrite("b.Any()"), "b.length>0");
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(
            rewrite("@if(string.IsNullOrEmpty(Model.A)) { x }"),
            "@if(Html.StringIsNullOrEmpty(Model.A)) { x }"
        );
        assert_eq!(
            rewrite("String.IsNullOrWhiteSpace(name)"),
            "Html.StringIsNullOrWhiteSpace(name)"
        );
        assert_eq!(rewrite("Html.StringIsNullOrEmpty(a)"), "Html.StringIsNullOrEmpty(a)");
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(rewrite("a.length + html.Raw"), "a.length + html.Raw");
    }
}
