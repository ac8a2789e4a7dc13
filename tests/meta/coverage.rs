//! Checks that `tests/unit` mirrors `src` file for file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module files carry no logic of their own
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    /// Relative paths of every `.rs` file and directory below `dir`
    fn walk(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(io::Error::other)?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                found.insert(relative);
                walk(&path, base, found)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.insert(relative);
            }
        }
        Ok(())
    }

    fn tree(root: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let root = Path::new(root);
        if let Err(error) = walk(root, root, &mut found) {
            panic!("failed to scan {}: {error}", root.display());
        }
        found
    }

    #[test]
    fn test_every_source_file_has_unit_tests() {
        let tests = tree("tests/unit");
        let missing: Vec<String> = tree("src")
            .into_iter()
            .filter(|path| !is_exempt(path) && !tests.contains(path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_every_unit_test_has_a_source_file() {
        let sources = tree("src");
        let orphaned: Vec<String> = tree("tests/unit")
            .into_iter()
            .filter(|path| !path.ends_with("mod.rs") && !sources.contains(path))
            .map(|path| format!("  - tests/unit/{path}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files with no source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    #[test]
    fn test_unit_files_are_declared_and_contain_tests() {
        let mut problems = Vec::new();

        for path in tree("tests/unit") {
            let full = Path::new("tests/unit").join(&path);
            if full.is_dir() || path.ends_with("mod.rs") {
                continue;
            }

            let content = fs::read_to_string(&full).unwrap_or_default();
            if !content.contains("#[test]") {
                problems.push(format!("  - {path} has no #[test] functions"));
            }

            // An undeclared file is never compiled, so its tests never run
            let stem = full.file_stem().unwrap_or_default().to_string_lossy();
            let module_file = full.with_file_name("mod.rs");
            let declared = fs::read_to_string(&module_file)
                .unwrap_or_default()
                .lines()
                .any(|line| line.trim() == format!("mod {stem};"));
            if !declared {
                problems.push(format!("  - {path} is not declared in its mod.rs"));
            }
        }

        assert!(problems.is_empty(), "{}", problems.join("\n"));
    }
}
