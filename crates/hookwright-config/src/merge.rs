//! Layered TOML merging.

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Set a dotted `path` (e.g. `"verify.command"`) to `value`, creating
/// intermediate tables as needed. Non-table intermediates are replaced.
pub fn set_path(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut segments = path.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if !current.is_table() {
            *current = toml::Value::Table(toml::Table::new());
        }
        let toml::Value::Table(table) = current else {
            return;
        };

        if segments.peek().is_none() {
            table.insert(segment.to_owned(), value);
            return;
        }

        current = table
            .entry(segment.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_deep_merge_tables_merge_scalars_replace() {
        let mut base = parse(
            r#"
            [verify]
            command = "bin/verify"
            args = ["--all"]
            notify = true
        "#,
        );
        let overlay = parse(
            r#"
            [verify]
            command = "make"
            args = ["check"]
        "#,
        );

        deep_merge(&mut base, &overlay);

        assert_eq!(base["verify"]["command"].as_str(), Some("make"));
        assert_eq!(base["verify"]["notify"].as_bool(), Some(true));
        let args = base["verify"]["args"].as_array().unwrap();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].as_str(), Some("check"));
    }

    #[test]
    fn test_set_path_creates_tables() {
        let mut root = toml::Value::Table(toml::Table::new());
        set_path(
            &mut root,
            "optimizer.config_path",
            toml::Value::String("x.json".into()),
        );
        assert_eq!(root["optimizer"]["config_path"].as_str(), Some("x.json"));
    }

    #[test]
    fn test_set_path_overwrites_existing() {
        let mut root = parse("[logging]\nlevel = \"info\"\n");
        set_path(&mut root, "logging.level", toml::Value::String("debug".into()));
        assert_eq!(root["logging"]["level"].as_str(), Some("debug"));
    }
}
