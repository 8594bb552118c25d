//! Name utilities: stripping type decoration down to a bare
//! nominal type name, import-path matching, and import alias parsing.

use std::sync::OnceLock;

use regex::Regex;

/// Built-in scalar type names that never produce a `Returns`/type-reference
/// edge.
const BUILTINS: &[&str] = &[
    "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
    "uint64", "float32", "float64", "bool", "byte", "rune", "error", "any", "void", "never",
    "unknown", "number", "boolean", "undefined", "null", "None", "str", "int", "float", "bytes",
    "object",
];

fn generic_brackets_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_.]*)<.*>$").unwrap())
}

/// Strip pointer/array/map/channel/generic decoration from a type
/// annotation, returning the bare nominal type name. Returns an empty
/// string for built-in scalar types.
///
/// Handles: `*T`, `&T`, `[]T`, `map[K]T`, `<-chan T`/`chan<- T`/`chan T`,
/// `Optional[T]`, `Promise<T>`, and generic parameter brackets `T<U>`/`T[U]`.
pub fn extract_type_name(annotation: &str) -> String {
    let mut s = annotation.trim();

    loop {
        let before = s;
        s = s.trim();
        s = s.trim_start_matches('*').trim_start_matches('&').trim();
        if let Some(rest) = s.strip_prefix("[]") {
            s = rest.trim();
            continue;
        }
        if let Some(rest) = s.strip_prefix("map[") {
            if let Some(close) = rest.find(']') {
                s = rest[close + 1..].trim();
                continue;
            }
        }
        if let Some(rest) = s.strip_prefix("<-chan") {
            s = rest.trim();
            continue;
        }
        if let Some(rest) = s.strip_prefix("chan<-") {
            s = rest.trim();
            continue;
        }
        if let Some(rest) = s.strip_prefix("chan") {
            if rest.starts_with(' ') {
                s = rest.trim();
                continue;
            }
        }
        if let Some(rest) = s.strip_prefix("Optional[") {
            if rest.ends_with(']') {
                s = &rest[..rest.len() - 1];
                continue;
            }
        }
        if let Some(rest) = s.strip_prefix("Promise<") {
            if rest.ends_with('>') {
                s = &rest[..rest.len() - 1];
                continue;
            }
        }
        if before == s {
            break;
        }
    }

    // Strip one level of trailing generic parameters: `Foo<Bar>` -> `Foo`,
    // `Foo[Bar]` -> `Foo` (Go generics).
    if let Some(caps) = generic_brackets_re().captures(s) {
        s = caps.get(1).map(|m| m.as_str()).unwrap_or(s);
    } else if let Some(idx) = s.find('[') {
        if s.ends_with(']') && idx > 0 {
            s = &s[..idx];
        }
    }

    let s = s.trim();
    if s.is_empty() || BUILTINS.contains(&s) {
        String::new()
    } else {
        s.to_string()
    }
}

/// POSIX dirname: everything before the last `/`, or `"."` if there is none.
pub fn extract_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ".",
    }
}

const STRIPPABLE_EXTENSIONS: &[&str] = &[".py", ".pyi", ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"];

/// Strip a known extension and collapse an `__init__`/`index` filename into
/// its parent directory, the way a module system resolves a package entry
/// point. `"pkg/__init__.py"` -> `"pkg"`, `"router/index.ts"` -> `"router"`.
fn normalize_module_path(path: &str) -> String {
    let mut p = path.to_string();
    for ext in STRIPPABLE_EXTENSIONS {
        if let Some(stripped) = p.strip_suffix(ext) {
            p = stripped.to_string();
            break;
        }
    }
    let file_stem = p.rsplit('/').next().unwrap_or(&p);
    if file_stem == "__init__" || file_stem == "index" {
        p = extract_dir(&p).to_string();
    }
    p
}

/// Whether `file_path` is the file that `import_path` refers to, after
/// extension stripping and `__init__`/`index` collapsing, treating `/` and
/// `.` as interchangeable path separators.
///
/// Avoids prefix/suffix pollution: `"utils.py"` must not match an import of
/// `"my_utils"`, and `"my_utils.py"` must not match an import of `"utils"`.
pub fn matches_import_path(file_path: &str, import_path: &str) -> bool {
    let normalized_file = normalize_module_path(file_path);
    let file_dotted = normalized_file.trim_start_matches('/').replace('/', ".");
    let file_slashed = normalized_file.trim_start_matches('/').replace('.', "/");

    let import_trimmed = import_path.trim_start_matches("./").trim_start_matches('/');
    let import_dotted = import_trimmed.replace('/', ".");
    let import_slashed = import_trimmed.replace('.', "/");

    file_dotted == import_dotted
        || file_slashed == import_slashed
        || file_dotted.ends_with(&format!(".{import_dotted}"))
        || file_slashed.ends_with(&format!("/{import_slashed}"))
}

/// Parse `"X as Y"` into `(local = "Y", original = "X")`. If there is no
/// `" as "`, the local and original names are the same.
pub fn parse_aliased_name(spec: &str) -> (String, String) {
    match spec.split_once(" as ") {
        Some((original, local)) => (local.trim().to_string(), original.trim().to_string()),
        None => (spec.trim().to_string(), spec.trim().to_string()),
    }
}

/// PascalCase the last non-index path segment of a relative import path,
/// e.g. `"./router/route"` -> `"Route"`. Returns an empty string for
/// external modules (paths without a leading `.`).
pub fn semantic_name_from_import_path(import_path: &str) -> String {
    if !import_path.starts_with('.') {
        return String::new();
    }
    let trimmed = import_path.trim_end_matches('/');
    let mut segment = trimmed.rsplit('/').next().unwrap_or("");
    if segment == "index" || segment.is_empty() {
        let dir = extract_dir(trimmed);
        segment = dir.rsplit('/').next().unwrap_or(dir);
    }
    to_pascal_case(segment)
}

fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Whether `s` looks like a PascalCase identifier. Used to skip lowercase
/// identifiers and non-PascalCase strings when extracting decorator
/// argument references.
pub fn is_pascal_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_pointer_and_generic() {
        assert_eq!(extract_type_name("*UserService"), "UserService");
        assert_eq!(extract_type_name("[]Widget"), "Widget");
        assert_eq!(extract_type_name("map[string]Widget"), "Widget");
        assert_eq!(extract_type_name("Optional[Handler]"), "Handler");
        assert_eq!(extract_type_name("Promise<Response>"), "Response");
        assert_eq!(extract_type_name("Container<Widget>"), "Container");
    }

    #[test]
    fn test_builtins_strip_to_empty() {
        for b in ["string", "int", "bool", "error", "number"] {
            assert_eq!(extract_type_name(b), "", "builtin {b} should strip to empty");
        }
    }

    #[test]
    fn test_matches_import_path_no_prefix_pollution() {
        assert!(matches_import_path("src/utils.py", "./utils"));
        assert!(!matches_import_path("src/my_utils.py", "./utils"));
        assert!(!matches_import_path("src/utils.py", "./my_utils"));
    }

    #[test]
    fn test_matches_import_path_index_collapses_to_dir() {
        assert!(matches_import_path("lib/router/index.js", "./router"));
    }

    #[test]
    fn test_parse_aliased_name() {
        assert_eq!(parse_aliased_name("X as Y"), ("Y".to_string(), "X".to_string()));
        assert_eq!(parse_aliased_name("Z"), ("Z".to_string(), "Z".to_string()));
    }

    #[test]
    fn test_semantic_name_from_import_path() {
        assert_eq!(semantic_name_from_import_path("./router/route"), "Route");
        assert_eq!(semantic_name_from_import_path("lodash"), "");
        assert_eq!(semantic_name_from_import_path("./router/index"), "Router");
    }

    #[test]
    fn test_is_pascal_case() {
        assert!(is_pascal_case("UserService"));
        assert!(!is_pascal_case("userService"));
        assert!(!is_pascal_case("user_service"));
    }
}
