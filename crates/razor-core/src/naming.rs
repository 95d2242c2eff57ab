//! Template naming derived from file paths.
//!
//! Templates live in module directories nested under a directory type, e.g.
//! `app/pg/home/tmpl/Index.vash` is module `home` of type `pg` and is cached
//! as `pg_home/Index`.

/// Convert Windows separators to `/`
pub fn slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Last path component, optionally without its extension
pub fn file_name(path: &str, include_ext: bool) -> String {
    let path = slash(path);
    let name = path.rsplit('/').next().unwrap_or("");
    if include_ext {
        return name.to_string();
    }
    match name.rfind('.') {
        Some(dot) => name[..dot].to_string(),
        None => name.to_string(),
    }
}

/// First directory after a `<dir_type>/` path component, with the file name
/// appended on request.
///
/// A file directly inside the type directory has no module, so only the file
/// name (or nothing) is returned.
pub fn module_name(path: &str, dir_type: &str, include_file_name: bool) -> String {
    let path = slash(path);
    let full_file_name = file_name(&path, true);
    let file = if include_file_name {
        file_name(&path, false)
    } else {
        String::new()
    };

    let prefix = format!("{dir_type}/");
    let relative = match path.find(&format!("/{prefix}")) {
        Some(index) => &path[index + prefix.len() + 1..],
        None => match path.strip_prefix(&prefix) {
            Some(relative) => relative,
            None => return file,
        },
    };
    if relative == full_file_name {
        return file;
    }

    let module = relative.split('/').next().unwrap_or("");
    match (module.is_empty(), file.is_empty()) {
        (false, false) => format!("{module}/{file}"),
        (false, true) => module.to_string(),
        (true, _) => file,
    }
}

/// First of `dir_types` found as a whole directory in `path`, else `default`
pub fn dir_type_from_path<S: AsRef<str>>(path: &str, dir_types: &[S], default: &str) -> String {
    let path = slash(path);
    dir_types
        .iter()
        .map(AsRef::as_ref)
        .find(|t| path.contains(&format!("/{t}/")))
        .unwrap_or(default)
        .to_string()
}

/// Cache key for a template, e.g. `pg_home/Index`
pub fn template_name(path: &str, dir_type: &str) -> String {
    format!("{dir_type}_{}", module_name(path, dir_type, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_without_extension() {
        assert_eq!(file_name("example\\windows\\file.js", false), "file");
        assert_eq!(file_name("example/unix/file.js", false), "file");
    }

    #[test]
    fn test_file_name_with_extension() {
        assert_eq!(file_name("example\\windows\\file.js", true), "file.js");
        assert_eq!(file_name("example/unix/file.js", true), "file.js");
        assert_eq!(file_name("README", false), "README");
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("app/pg/home/tmpl/Index.vash", "pg", true), "home/Index");
        assert_eq!(module_name("app/pg/home/tmpl/Index.vash", "pg", false), "home");
    }

    #[test]
    fn test_module_name_without_module_directory() {
        assert_eq!(module_name("app/glb/_Layout.vash", "glb", true), "_Layout");
        assert_eq!(module_name("app/glb/_Layout.vash", "glb", false), "");
    }

    #[test]
    fn test_dir_type_from_path() {
        let types: &[&str] = &["pg", "wg", "glb"];
        assert_eq!(dir_type_from_path("dev/app/wg/header/tmpl/Index.vash", types, "pg"), "wg");
        assert_eq!(dir_type_from_path("dev\\app\\glb\\_Layout.vash", types, "pg"), "glb");
        assert_eq!(dir_type_from_path("dev/app/xxxx/header/tmpl/Index.vash", types, "pg"), "pg");
    }

    #[test]
    fn test_module_name_matches_whole_directory() {
        assert_eq!(module_name("/tmp/xpg/app/pg/about/Index.vash", "pg", true), "about/Index");
        assert_eq!(module_name("pg/about/Index.vash", "pg", true), "about/Index");
        assert_eq!(module_name("app/other/Index.vash", "pg", true), "Index");
    }

    #[test]
    fn test_template_name() {
        assert_eq!(template_name("app/wg/appHeader/navItem.vash", "wg"), "wg_appHeader/navItem");
    }
}
