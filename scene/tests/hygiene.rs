//! Hygiene: enforces coding standards at test time
//!
//! These tests scan the scene crate's production sources for constructs the
//! engine must not contain. The facade is total, so anything that can panic
//! or swallow an error without a look is budgeted (ideally zero). Engine state
//! is per instance, so process-wide mutable state is budgeted too. If you must
//! add one, fix an existing one first; budgets never grow.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    path: PathBuf,
    content: String,
}

/// A forbidden pattern and how many occurrences are tolerated.
struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, why: "panics across the facade" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, why: "panics across the facade" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, why: "panics across the facade" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, why: "panics across the facade" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, why: "unfinished stub" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub" };
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, why: "drops a result unseen" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, why: "drops an error unseen" };
const STATIC_MUT: Budget = Budget { pattern: "static mut", max: 0, why: "counters belong to the store" };
const PRINTLN: Budget = Budget { pattern: "println!(", max: 0, why: "use tracing" };
const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, why: "dead code should be deleted" };

/// Production `.rs` files under `src/`, skipping `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_source = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_source || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

fn enforce(budget: &Budget) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let hits: Vec<(String, usize)> = files
        .iter()
        .map(|f| (f.path.display().to_string(), f.content.matches(budget.pattern).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let found: usize = hits.iter().map(|(_, n)| n).sum();

    let listing = hits.iter().map(|(p, n)| format!("  {p}: {n}")).collect::<Vec<_>>().join("\n");
    assert!(
        found <= budget.max,
        "`{}` budget exceeded ({}): found {found}, max {}.\n{listing}",
        budget.pattern,
        budget.why,
        budget.max,
    );
}

#[test]
fn unwrap_budget() {
    enforce(&UNWRAP);
}

#[test]
fn expect_budget() {
    enforce(&EXPECT);
}

#[test]
fn panic_budget() {
    enforce(&PANIC);
}

#[test]
fn unreachable_budget() {
    enforce(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    enforce(&TODO);
}

#[test]
fn unimplemented_budget() {
    enforce(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    enforce(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    enforce(&DOT_OK);
}

#[test]
fn static_mut_budget() {
    enforce(&STATIC_MUT);
}

#[test]
fn println_budget() {
    enforce(&PRINTLN);
}

#[test]
fn allow_dead_code_budget() {
    enforce(&ALLOW_DEAD_CODE);
}
