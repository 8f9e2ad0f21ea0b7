//! Directory layout summary.

use crate::analyze::DirectoryStructure;
use crate::model::TreeEntry;

const TEST_DIRS: [&str; 4] = ["test", "tests", "__tests__", "spec"];
const DOCKER_FILES: [&str; 3] = ["Dockerfile", "docker-compose.yml", "docker-compose.yaml"];

/// Summarizes the layout of a repository tree.
///
/// A directory named like a test directory counts at any depth. Other
/// flags look at a fixed root directory and everything beneath it.
#[must_use]
pub fn analyze_directory_structure(tree: &[TreeEntry]) -> DirectoryStructure {
    let dirs: Vec<&str> = tree.iter().filter(|e| e.is_dir()).map(|e| e.path.as_str()).collect();
    let files: Vec<&str> = tree.iter().filter(|e| e.is_file()).map(|e| e.path.as_str()).collect();

    let mut top_level_dirs: Vec<String> =
        dirs.iter().filter(|d| !d.contains('/')).map(|d| (*d).to_string()).collect();
    top_level_dirs.sort();

    DirectoryStructure {
        has_src: dirs.iter().any(|d| under(d, "src")),
        has_tests: dirs.iter().any(|d| is_test_dir(d)),
        has_docs: dirs.iter().any(|d| under(d, "docs")),
        has_docker: files.iter().any(|f| DOCKER_FILES.contains(f)),
        has_ci: dirs.iter().any(|d| under(d, ".github")),
        has_config: files.iter().any(|f| is_dotfile_config(f)),
        top_level_dirs,
        total_files: files.len(),
        total_dirs: dirs.len(),
    }
}

/// `path` is `root` or lies beneath it.
fn under(path: &str, root: &str) -> bool {
    path.strip_prefix(root).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_test_dir(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path);
    TEST_DIRS.contains(&name) || under(path, "test")
}

fn is_dotfile_config(path: &str) -> bool {
    path.starts_with('.')
        && (path.ends_with("rc") || path.ends_with(".json") || path.ends_with(".yml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifies_key_directories_and_files() {
        let tree = vec![
            TreeEntry::dir("src"),
            TreeEntry::dir("test"),
            TreeEntry::dir("docs"),
            TreeEntry::dir(".github"),
            TreeEntry::dir(".github/workflows"),
            TreeEntry::file("Dockerfile", 120),
            TreeEntry::file(".eslintrc", 40),
            TreeEntry::file("src/index.js", 300),
        ];
        let s = analyze_directory_structure(&tree);
        assert!(s.has_src && s.has_tests && s.has_docs && s.has_ci && s.has_docker && s.has_config);
        assert_eq!(s.top_level_dirs, vec![".github", "docs", "src", "test"]);
        assert_eq!((s.total_files, s.total_dirs), (3, 5));
    }

    #[test]
    fn empty_tree_has_no_flags() {
        let s = analyze_directory_structure(&[]);
        assert_eq!(s, DirectoryStructure::default());
    }

    #[test]
    fn nested_test_directories_count() {
        let s = analyze_directory_structure(&[
            TreeEntry::dir("pkg"),
            TreeEntry::dir("pkg/__tests__"),
        ]);
        assert!(s.has_tests);
        assert_eq!(s.top_level_dirs, vec!["pkg"]);

        let s = analyze_directory_structure(&[TreeEntry::dir("testing")]);
        assert!(!s.has_tests);
    }

    #[test]
    fn prefix_rules_require_a_path_boundary() {
        let s = analyze_directory_structure(&[
            TreeEntry::dir("srcs"),
            TreeEntry::dir("documentation"),
            TreeEntry::dir(".githooks"),
        ]);
        assert!(!s.has_src && !s.has_docs && !s.has_ci);
    }

    #[test]
    fn docker_and_config_only_match_files() {
        let s = analyze_directory_structure(&[
            TreeEntry::dir("Dockerfile"),
            TreeEntry::dir(".vscrc"),
            TreeEntry::file("docker/Dockerfile", 10),
            TreeEntry::file("README.md", 10),
        ]);
        assert!(!s.has_docker);
        assert!(!s.has_config);

        let s = analyze_directory_structure(&[
            TreeEntry::file("docker-compose.yaml", 10),
            TreeEntry::file(".prettierrc.json", 10),
        ]);
        assert!(s.has_docker && s.has_config);
    }
}
