//! Integration tests for CLI wiring.
//!
//! These tests validate that the CLI is a thin adapter over the library
//! with proper stream separation and exit codes.

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use std::path::Path;
    use std::process::{Command, Output};
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn run(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_symref"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run symref binary")
    }

    #[test]
    fn test_cli_successful_scan() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "src/pages/api/orders/route.ts",
            "import { foo } from 'x';\nfoo();\nobj.foo();\n",
        );

        let output = run(&[dir.path().to_str().unwrap(), "foo", "database"]);

        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let refs: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
        let refs = refs.as_array().expect("stdout is a JSON array");
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0]["type"], "import");
        assert_eq!(refs[1]["type"], "direct-call");
        assert_eq!(refs[2]["type"], "method-call");
        assert!(refs.iter().all(|r| r["category"] == "api"));
        for reference in refs {
            let keys: Vec<_> = reference.as_object().unwrap().keys().cloned().collect();
            assert_eq!(keys.len(), 5);
            for key in ["file", "line", "type", "category", "context"] {
                assert!(reference.get(key).is_some(), "missing {}", key);
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Finding references to 'foo' (domain: database)"));
        assert!(stderr.contains("Source files matched: 1"));
        assert!(stderr.contains("References found: 3"));
        assert!(stderr.contains("By type:"));
        assert!(stderr.contains("By category:"));
    }

    #[test]
    fn test_cli_missing_root_fails_without_json() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let output = run(&[missing.to_str().unwrap(), "foo", "database"]);

        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("does not exist"));
        assert!(stderr.contains("Usage"));
    }

    #[test]
    fn test_cli_wrong_argument_count_fails() {
        let output = run(&["only-root"]);
        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        assert!(!output.stderr.is_empty());
    }

    #[test]
    fn test_cli_reports_parse_failures_on_stderr() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "one.ts", "foo();\n");
        write(dir.path(), "two.ts", "foo();\n");
        write(dir.path(), "broken.ts", "export const = foo((;\n");

        let output = run(&[dir.path().to_str().unwrap(), "foo", "database"]);

        assert!(output.status.success());
        let refs: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(refs.as_array().unwrap().len(), 2);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("broken.ts"));
    }

    #[test]
    fn test_cli_all_files_failing_exits_nonzero() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "broken.ts", "export const = foo((;\n");

        let output = run(&[dir.path().to_str().unwrap(), "foo", "database"]);

        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_cli_report_flag_includes_summary() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/modules/domain/billing/pay.ts", "foo();\n");

        let output = run(&[dir.path().to_str().unwrap(), "foo", "billing", "--report"]);

        assert!(output.status.success());
        let report: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["references"].as_array().unwrap().len(), 1);
        assert_eq!(report["summary"]["countsByCategory"]["service"], 1);
        assert_eq!(report["summary"]["countsByType"]["callback"], 0);
    }

    #[test]
    fn test_cli_output_is_repeatable() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.ts", "foo();\nconst f = foo;\n");
        write(dir.path(), "a.ts", "import foo from 'x';\n");

        let root = dir.path().to_str().unwrap();
        let first = run(&[root, "foo", "database"]);
        let second = run(&[root, "foo", "database", "--jobs", "1"]);

        assert!(first.status.success());
        assert_eq!(first.stdout, second.stdout);
    }
}
