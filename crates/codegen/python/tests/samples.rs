//! End-to-end translation of the demonstration programs.

use rhizome_lispython_codegen_python::loader::{declared_coding, is_lispython};
use rhizome_lispython_codegen_python::samples::{
    CLASSES, FUNCTIONS, LAMBDA, LOOPS, SAMPLES, TAGGED_MODULE,
};
use rhizome_lispython_codegen_python::{
    EmitOptions, LoadError, Loaded, load_file, load_source, translate,
};
use std::io::Write;
use std::process::{Command, Stdio};

// =============================================================================
// Test Helpers
// =============================================================================

fn assert_lines(actual: &str, expected: &[&str]) {
    let expected = expected.join("\n");
    assert_eq!(actual, expected, "\n--- got ---\n{}", actual);
}

fn load_tagged(source: &str) -> String {
    match load_source(source, &EmitOptions::default()).expect("load failed") {
        Loaded::Translated(python) => python,
        Loaded::Native(_) => panic!("expected the source to be translated"),
    }
}

// =============================================================================
// Samples
// =============================================================================

#[test]
fn test_functions_sample() {
    assert_lines(
        &translate(FUNCTIONS.source).unwrap(),
        &[
            "def test(x):",
            "    print(\"hi\", x + 2)",
            "",
            "def mkthing(y):",
            "    if y >= 16:",
            "        return 2 / y",
            "",
            "    return 2 * y",
            "",
            "test(mkthing(25))",
            "",
        ],
    );
}

#[test]
fn test_loops_sample() {
    assert_lines(
        &translate(LOOPS.source).unwrap(),
        &[
            "s = 0",
            "m = 1",
            "for i in xrange(1, 10):",
            "    s = s + i",
            "    m = m * i",
            "",
            "print(s, m)",
            "",
        ],
    );
}

#[test]
fn test_lambda_sample() {
    assert_lines(
        &translate(LAMBDA.source).unwrap(),
        &["(lambda x: x * x)(4)", ""],
    );
}

#[test]
fn test_classes_sample() {
    assert_lines(
        &translate(CLASSES.source).unwrap(),
        &[
            "class Quak(object):",
            "    def __init__(self, x):",
            "        self.x = x",
            "",
            "    def quak(self):",
            "        return 2 * self.x",
            "",
            "",
            "q = Quak(4)",
            "print(q.quak())",
            "",
        ],
    );
}

#[test]
fn test_tagged_module_sample() {
    assert_lines(
        &load_tagged(TAGGED_MODULE.source),
        &[
            "class MegaTest(object):",
            "    def __init__(self, a):",
            "        self.items = range(a, a * 2)",
            "",
            "    def inner_test(self):",
            "        sq = lambda x: x * x",
            "        bee = list()",
            "        for i in self.items:",
            "            bee.append(sq(i) + test_fun(i, 5))",
            "",
            "        return sum(bee)",
            "",
            "    def test(self):",
            "        print(\"hello, world %d\" % self.inner_test())",
            "",
            "",
            "def test_fun(a, b):",
            "    if a > b:",
            "        print(\"greater\")",
            "        return 1",
            "    else:",
            "        print(\"lesser\")",
            "        return 0",
            "",
            "",
            "megatest = MegaTest(4)",
            "",
        ],
    );
}

#[test]
fn test_all_samples_indent_in_whole_units() {
    for sample in SAMPLES {
        let python = if is_lispython(sample.source) {
            load_tagged(sample.source)
        } else {
            translate(sample.source).unwrap()
        };
        for line in python.lines() {
            let indent = line.len() - line.trim_start().len();
            assert_eq!(indent % 4, 0, "{}: {:?}", sample.name, line);
            assert!(
                line.is_empty() || !line.trim().is_empty(),
                "{}: padded blank line",
                sample.name
            );
        }
    }
}

// =============================================================================
// Generated programs
// =============================================================================

const EXPRESSIONS: &[&str] = &[
    "x",
    "\"s\"",
    "()",
    "(g)",
    "(g () y)",
    "(+ a (* b c))",
    "((lambda (y) y) 1)",
    "(lambda () ())",
];

const TEMPLATES: &[&str] = &[
    "(f {e} {e})",
    "(= r {e})",
    "(def h () (return {e}))",
    "(def h (a b) (= r {e}) (return {e}))",
    "(def h ())",
    "(while {e} (f {e}))",
    "(while {e})",
    "(if {e} ((f {e})) ((return {e})))",
    "(if {e} () ())",
    "(for (i j) {e} (print i {e}))",
    "(class C (object) (def m (self) (return {e})) (def n (self)))",
    "(def h () (while {e} (if {e} ((break)) ((continue)))))",
];

fn generated_programs() -> Vec<String> {
    TEMPLATES
        .iter()
        .flat_map(|template| EXPRESSIONS.iter().map(move |e| template.replace("{e}", e)))
        .collect()
}

/// Structural checks that hold for any valid translation.
fn assert_well_formed(source: &str, python: &str) {
    for bad in ["(, ", ", )", ", ,", "(,"] {
        assert!(!python.contains(bad), "{:?} in output of {}:\n{}", bad, source, python);
    }
    let lines: Vec<&str> = python.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        let indent = line.len() - line.trim_start().len();
        assert_eq!(indent % 4, 0, "{}: {:?}", source, line);
        if line.ends_with(':') {
            let body = lines[idx + 1..]
                .iter()
                .find(|l| !l.trim().is_empty())
                .unwrap_or_else(|| panic!("{}: block without body", source));
            let body_indent = body.len() - body.trim_start().len();
            assert_eq!(body_indent, indent + 4, "{}: {:?}", source, body);
        }
    }
}

/// Ask a local Python to parse `python`. Returns `None` when no interpreter
/// is installed.
fn python_accepts(python: &str) -> Option<bool> {
    let mut child = Command::new("python3")
        .args(["-c", "import ast, sys; ast.parse(sys.stdin.read())"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(python.as_bytes())
        .ok()?;
    Some(child.wait().ok()?.success())
}

#[test]
fn test_generated_programs_are_well_formed() {
    for source in generated_programs() {
        let python = translate(&source).expect("translate failed");
        assert_well_formed(&source, &python);
    }
}

#[test]
fn test_generated_programs_parse_as_python() {
    let mut sources = generated_programs();
    sources.extend(
        SAMPLES
            .iter()
            .filter(|sample| !is_lispython(sample.source))
            .map(|sample| sample.source.to_string()),
    );
    for source in sources {
        let python = translate(&source).expect("translate failed");
        match python_accepts(&python) {
            Some(accepted) => assert!(accepted, "python rejected {}:\n{}", source, python),
            None => return,
        }
    }
}

// =============================================================================
// Loader
// =============================================================================

#[test]
fn test_declared_coding() {
    assert_eq!(declared_coding("# coding: lispython\n(f)"), Some("lispython"));
    assert_eq!(
        declared_coding("#!/usr/bin/env python\n# -*- coding: lispython -*-\n"),
        Some("lispython")
    );
    assert_eq!(declared_coding("# vim: set fileencoding=utf-8 :"), Some("utf-8"));
    assert_eq!(declared_coding("x = 1\n# coding: lispython\n"), None);
    assert_eq!(declared_coding("# just a comment\n\n# coding: lispython\n"), None);
    assert_eq!(declared_coding(""), None);
}

#[test]
fn test_untagged_source_is_native() {
    let loaded = load_source("print(1)\n", &EmitOptions::default()).unwrap();
    assert_eq!(loaded, Loaded::Native("print(1)\n".into()));
    assert!(!loaded.is_translated());
}

#[test]
fn test_tagged_source_with_shebang() {
    let source = "#!/usr/bin/env python\n# -*- coding: lispython -*-\n\n(print \"hi\")\n";
    assert_eq!(load_tagged(source), "print(\"hi\")\n");
}

#[test]
fn test_tagged_source_syntax_error() {
    let err = load_source("# coding: lispython\n(print", &EmitOptions::default()).unwrap_err();
    assert!(err.to_string().starts_with("syntax error"));
}

#[test]
fn test_load_file() {
    let path = std::env::temp_dir().join(format!("lispython-load-{}.py", std::process::id()));
    std::fs::write(&path, "# coding: lispython\n(def f () (return 1))\n").unwrap();
    let loaded = load_file(&path, &EmitOptions::default()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(
        loaded,
        Loaded::Translated("def f():\n    return 1\n\n".into())
    );
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("lispython-definitely-missing.py");
    let err = load_file(&path, &EmitOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
