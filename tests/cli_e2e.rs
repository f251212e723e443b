use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const YI_SOURCE: &str = r#"package yi

import "errors"

// Token is an opaque credential.
type Token struct{ value string }

type Kind int

type secret int

// Valid reports whether t is usable.
func (t Token) Valid() bool { return t.value != "" }

// Issue makes a token.
func Issue(name string, ttl int) (Token, error) {
	if name == "" {
		return Token{}, errors.New("empty")
	}
	return Token{name}, nil
}

func helper() {}
"#;

fn bin(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gocopycat"));
    cmd.current_dir(cwd).env_remove("GOPATH").env_remove("RUST_LOG");
    cmd
}

fn run(cwd: &Path, args: &[&str]) -> Output {
    bin(cwd).args(args).output().expect("run gocopycat")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("utf8 stderr")
}

/// Golden test: verify exact output for a known input
#[test]
fn e2e_stream_golden_output_exact() {
    let temp_dir = TempDir::new().expect("temp dir");
    let src = temp_dir.path().join("yi");
    fs::create_dir(&src).expect("mkdir");
    fs::write(src.join("yi.go"), YI_SOURCE).expect("write");

    let output = run(temp_dir.path(), &["--dir", src.to_str().unwrap()]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));

    let expected = "\
// Token is an opaque credential.
type Token = yi.Token

type Kind = yi.Kind

// Issue makes a token.
func Issue(name string, ttl int) (Token, error) {
\tyi.Issue(name, ttl)
}
";
    assert_eq!(stdout(&output), expected);
}

#[test]
fn e2e_methods_and_unexported_never_emitted() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(
        temp_dir.path().join("t.go"),
        "package t\n\ntype T struct{}\n\nfunc (T) Exported() {}\nfunc (t *T) Other(x int) {}\nfunc hidden() {}\n",
    )
    .expect("write");

    let output = run(temp_dir.path(), &["-d", "."]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "type T = t.T\n");
}

#[test]
fn e2e_pkg_filter_selects_one_package() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(temp_dir.path().join("a.go"), "package alpha\n\ntype A int\n").expect("write");
    fs::write(temp_dir.path().join("b.go"), "package beta\n\ntype B int\n").expect("write");

    let all = run(temp_dir.path(), &["-d", "."]);
    assert_eq!(stdout(&all), "type A = alpha.A\n\ntype B = beta.B\n");

    let beta = run(temp_dir.path(), &["-d", ".", "--pkg", "beta"]);
    assert!(beta.status.success());
    assert_eq!(stdout(&beta), "type B = beta.B\n");

    let none = run(temp_dir.path(), &["-d", ".", "--pkg", "gamma"]);
    assert!(none.status.success());
    assert_eq!(stdout(&none), "");
}

#[test]
fn e2e_file_mode_writes_one_file_per_source() {
    let temp_dir = TempDir::new().expect("temp dir");
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    fs::create_dir(&src).expect("mkdir src");
    fs::create_dir(&out).expect("mkdir out");
    fs::write(src.join("one.go"), "package lib\n\ntype One int\n").expect("write");
    fs::write(
        src.join("two.go"),
        "package lib\n\nfunc Two(a, b string) string { return a + b }\n",
    )
    .expect("write");

    let output = run(
        temp_dir.path(),
        &[
            "--from",
            src.to_str().unwrap(),
            "--to",
            out.to_str().unwrap(),
            "--import-path",
            "example.org/lib",
            "--package-name",
            "facade",
        ],
    );
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output), "");

    let one = fs::read_to_string(out.join("one.go")).expect("read one");
    let two = fs::read_to_string(out.join("two.go")).expect("read two");
    assert_eq!(
        one,
        "package facade\n\nimport \"example.org/lib\"\n\ntype One = lib.One\n"
    );
    assert_eq!(
        two,
        "package facade\n\nimport \"example.org/lib\"\n\nfunc Two(a, b string) string {\n\tlib.Two(a, b)\n}\n"
    );
}

#[test]
fn e2e_import_path_derived_from_gopath() {
    let temp_dir = TempDir::new().expect("temp dir");
    let gopath = temp_dir.path().join("go");
    let src = gopath.join("src/example.org/pkg");
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&src).expect("mkdir src");
    fs::create_dir(&out).expect("mkdir out");
    fs::write(src.join("pkg.go"), "package pkg\n\ntype P int\n").expect("write");

    let output = bin(temp_dir.path())
        .env("GOPATH", &gopath)
        .args(["-d", src.to_str().unwrap(), "-t", out.to_str().unwrap()])
        .output()
        .expect("run gocopycat");
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));

    let generated = fs::read_to_string(out.join("pkg.go")).expect("read");
    assert_eq!(
        generated,
        "package pkg\n\nimport \"example.org/pkg\"\n\ntype P = pkg.P\n"
    );
}

#[test]
fn e2e_source_outside_gopath_fails() {
    let temp_dir = TempDir::new().expect("temp dir");
    let gopath = temp_dir.path().join("go");
    let src = temp_dir.path().join("elsewhere");
    let out = temp_dir.path().join("out");
    fs::create_dir_all(gopath.join("src")).expect("mkdir gopath");
    fs::create_dir(&src).expect("mkdir src");
    fs::create_dir(&out).expect("mkdir out");
    fs::write(src.join("x.go"), "package x\n\ntype X int\n").expect("write");

    let output = run(
        temp_dir.path(),
        &[
            "-d",
            src.to_str().unwrap(),
            "-t",
            out.to_str().unwrap(),
            "--gopath",
            gopath.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("is not under workspace root"));
    assert!(!out.join("x.go").exists());
}

#[test]
fn e2e_syntax_error_exits_nonzero() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(temp_dir.path().join("bad.go"), "package bad\n\nfunc F( {\n").expect("write");

    let output = run(temp_dir.path(), &["-d", "."]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Syntax error"));
    assert_eq!(stdout(&output), "");
}

#[test]
fn e2e_missing_destination_exits_nonzero() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(temp_dir.path().join("a.go"), "package a\n\ntype A int\n").expect("write");

    let output = run(
        temp_dir.path(),
        &["-d", ".", "-t", "no/such/dir", "--no-import"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to create"));
}

#[test]
fn e2e_output_is_deterministic() {
    let temp_dir = TempDir::new().expect("temp dir");
    for (name, pkg) in [("z.go", "zeta"), ("m.go", "mu"), ("a.go", "alpha")] {
        fs::write(
            temp_dir.path().join(name),
            format!("package {pkg}\n\ntype T int\n\nfunc F(x T) T {{ return x }}\n"),
        )
        .expect("write");
    }

    let first = run(temp_dir.path(), &["-d", "."]);
    let second = run(temp_dir.path(), &["-d", "."]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(stdout(&first).starts_with("type T = alpha.T\n"));
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(
        temp_dir.path().join("d.go"),
        "package d\n\n// D is documented.\ntype D int\n\nfunc Sum(xs ...int) int { return 0 }\n",
    )
    .expect("write");
    fs::write(
        temp_dir.path().join("gocopycat.toml"),
        "[output]\ncomments = false\nspread_variadic = true\n",
    )
    .expect("write config");

    let output = run(temp_dir.path(), &["-d", "."]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "type D = d.D\n\nfunc Sum(xs ...int) int {\n\td.Sum(xs...)\n}\n"
    );
}

#[test]
fn e2e_generic_alias_is_accepted_and_reprocessable() {
    let temp_dir = TempDir::new().expect("temp dir");
    let src = temp_dir.path().join("p");
    fs::create_dir(&src).expect("mkdir");
    fs::write(
        src.join("p.go"),
        "package p\n\ntype List[T any] []T\n\ntype A[T any] = List[T]\n",
    )
    .expect("write");

    let first = run(temp_dir.path(), &["-d", src.to_str().unwrap()]);
    assert!(first.status.success(), "stderr:\n{}", stderr(&first));
    let facade = stdout(&first);
    assert_eq!(facade, "type List[T any] = p.List[T]\ntype A[T any] = p.A[T]\n");

    // The generated facade is itself valid input
    let again = temp_dir.path().join("q");
    fs::create_dir(&again).expect("mkdir");
    fs::write(again.join("q.go"), format!("package q\n\n{facade}")).expect("write");

    let second = run(temp_dir.path(), &["-d", again.to_str().unwrap()]);
    assert!(second.status.success(), "stderr:\n{}", stderr(&second));
    assert_eq!(
        stdout(&second),
        "type List[T any] = q.List[T]\ntype A[T any] = q.A[T]\n"
    );
}

#[test]
fn e2e_group_doc_and_trailing_comment_kept() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(
        temp_dir.path().join("g.go"),
        "package g\n\n// Group doc.\ntype (\n\tA int\n\tB int // trailing\n)\n",
    )
    .expect("write");

    let output = run(temp_dir.path(), &["-d", "."]);
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "// Group doc.\ntype A = g.A\n\ntype B = g.B // trailing\n"
    );

    let bare = run(temp_dir.path(), &["-d", ".", "--no-comments"]);
    assert_eq!(stdout(&bare), "type A = g.A\ntype B = g.B\n");
}
