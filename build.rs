use std::process::Command;

/// Commit metadata shown by `copywriter --version`. Both are optional at
/// compile time, so builds from a source archive get the plain version.
const BUILD_INFO: [(&str, &[&str]); 2] = [
  ("GIT_HASH", &["rev-parse", "--short", "HEAD"]),
  ("GIT_DATE", &["log", "-1", "--format=%cs"]),
];

fn main() {
  for (variable, args) in BUILD_INFO {
    if let Some(value) = git_output(args) {
      println!("cargo:rustc-env={variable}={value}");
    }
  }

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}

/// Runs git and returns its trimmed stdout, or `None` if git is missing,
/// fails, or prints nothing.
fn git_output(args: &[&str]) -> Option<String> {
  let output = Command::new("git").args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }

  let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
  (!value.is_empty()).then_some(value)
}
