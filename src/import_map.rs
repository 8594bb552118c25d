//! Per-file import-name map, used by the call-site extractor's
//! import-aware resolution strategy.

use std::collections::HashMap;

use crate::input::Import;
use crate::names::parse_aliased_name;

/// Where a locally-bound name came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub module_path: String,
    pub original_name: String,
    pub is_commonjs: bool,
}

/// `local_name -> binding` for one file. Named-import entries take
/// precedence over whole-module aliases bound to the same local name.
pub type ImportNameMap = HashMap<String, ImportBinding>;

/// Build the import-name map for one file's imports.
pub fn build_import_map(imports: &[Import]) -> ImportNameMap {
    let mut map = ImportNameMap::new();

    // Pass 1: whole-module aliases (including CommonJS requires), lowest
    // precedence so named imports can override them below.
    for import in imports {
        if import.names.is_empty() {
            if let Some(alias) = &import.alias {
                let (local, original) = parse_aliased_name(alias);
                map.entry(local).or_insert(ImportBinding {
                    module_path: import.path.clone(),
                    original_name: original,
                    is_commonjs: import.is_commonjs,
                });
            } else if import.is_commonjs {
                // `require('./path')` with no destructure and no alias binds
                // nothing locally; nothing to register.
            }
        }
    }

    // Pass 2: named imports (`from X import Y, Z as W`) — always win.
    for import in imports {
        for raw_name in &import.names {
            let (local, original) = parse_aliased_name(raw_name);
            map.insert(
                local,
                ImportBinding {
                    module_path: import.path.clone(),
                    original_name: original,
                    is_commonjs: import.is_commonjs,
                },
            );
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Location;

    fn loc() -> Location {
        Location { line: 1, col: 0 }
    }

    #[test]
    fn test_named_import_entries() {
        let imports = vec![Import {
            path: "./route".into(),
            alias: None,
            names: vec!["Y".into(), "Z as W".into()],
            is_commonjs: false,
            location: loc(),
        }];
        let map = build_import_map(&imports);
        assert_eq!(map["Y"].module_path, "./route");
        assert_eq!(map["W"].original_name, "Z");
    }

    #[test]
    fn test_commonjs_whole_module_alias() {
        let imports = vec![Import {
            path: "./route".into(),
            alias: Some("Route".into()),
            names: vec![],
            is_commonjs: true,
            location: loc(),
        }];
        let map = build_import_map(&imports);
        assert_eq!(map["Route"].module_path, "./route");
        assert_eq!(map["Route"].original_name, "Route");
    }

    #[test]
    fn test_named_import_takes_precedence_over_whole_module_alias() {
        let imports = vec![
            Import {
                path: "./whole_module".into(),
                alias: Some("X".into()),
                names: vec![],
                is_commonjs: true,
                location: loc(),
            },
            Import {
                path: "./named_module".into(),
                alias: None,
                names: vec!["X".into()],
                is_commonjs: false,
                location: loc(),
            },
        ];
        let map = build_import_map(&imports);
        assert_eq!(map.len(), 1);
        assert_eq!(map["X"].module_path, "./named_module");
    }
}
