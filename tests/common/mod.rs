#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// An SDK-style project file with a single `<Copyright>` element.
pub fn sdk_project(copyright: &str) -> String {
  format!(
    "<Project Sdk=\"Microsoft.NET.Sdk\">\n\
     \x20 <PropertyGroup>\n\
     \x20   <TargetFramework>net8.0</TargetFramework>\n\
     \x20   <Authors>Ben Hutchison</Authors>\n\
     \x20   <Copyright>{copyright}</Copyright>\n\
     \x20 </PropertyGroup>\n\
     </Project>\n"
  )
}

/// An `AssemblyInfo.cs` file with a single `AssemblyCopyright` attribute.
pub fn assembly_info(copyright: &str) -> String {
  format!(
    "using System.Reflection;\n\
     \n\
     [assembly: AssemblyTitle(\"Sample\")]\n\
     [assembly: AssemblyCopyright(\"{copyright}\")]\n\
     [assembly: AssemblyVersion(\"1.0.0.0\")]\n"
  )
}

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Reads a file written by a test.
pub fn read_file(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
