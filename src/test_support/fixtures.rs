//! Test fixtures for conan-enabled projects.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::requirement::MANIFEST_NAME;
use crate::util::config::TOOLCHAIN_FILE;

/// Render a `conanfile.txt` requiring `requires`.
pub fn manifest(requires: &[&str]) -> String {
    let mut out = String::from("[requires]\n");
    for req in requires {
        out.push_str(req);
        out.push('\n');
    }
    out.push_str("\n[generators]\nCMakeToolchain\n");
    out
}

/// Render toolchain file contents listing the given directories.
pub fn toolchain_contents(include_dirs: &[PathBuf], lib_dirs: &[PathBuf]) -> String {
    let quoted = |dirs: &[PathBuf]| {
        dirs.iter()
            .map(|d| format!("\"{}\"", d.display()))
            .collect::<Vec<_>>()
            .join(" ")
    };

    format!(
        "# Conan automatically generated toolchain file\n\
         include_guard()\n\
         set(CMAKE_INCLUDE_PATH {})\n\
         set(CMAKE_LIBRARY_PATH {})\n",
        quoted(include_dirs),
        quoted(lib_dirs)
    )
}

/// A temporary workspace holding one conan project and a fake installed
/// package with `include` and `lib` directories.
pub struct ConanFixture {
    pub tmp: TempDir,
    /// Canonical path of `tmp`.
    root: PathBuf,
    pub project_dir: PathBuf,
    pub include_dir: PathBuf,
    pub lib_dir: PathBuf,
}

impl ConanFixture {
    /// Project with `conanfile.txt` requiring `requires`; no toolchain yet.
    pub fn new(requires: &[&str]) -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let project_dir = root.join("app");
        let include_dir = root.join("pkg/include");
        let lib_dir = root.join("pkg/lib");

        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::create_dir_all(&include_dir).unwrap();
        std::fs::create_dir_all(&lib_dir).unwrap();
        std::fs::write(project_dir.join(MANIFEST_NAME), manifest(requires)).unwrap();

        ConanFixture {
            tmp,
            root,
            project_dir,
            include_dir,
            lib_dir,
        }
    }

    /// Toolchain file contents pointing at the fixture's package.
    pub fn toolchain(&self) -> String {
        toolchain_contents(&[self.include_dir.clone()], &[self.lib_dir.clone()])
    }

    /// Write the toolchain file as if `conan install` had already run.
    pub fn write_toolchain(&self) {
        let path = self.toolchain_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, self.toolchain()).unwrap();
    }

    pub fn toolchain_path(&self) -> PathBuf {
        self.project_dir.join(TOOLCHAIN_FILE)
    }

    /// Package store root inside the fixture.
    pub fn store(&self) -> PathBuf {
        self.root.join("store")
    }

    /// Create `<store>/<name>/<version>/package/<hash>/{include,lib}`.
    pub fn add_store_package(&self, name: &str, version: &str) -> PathBuf {
        let hash = self
            .store()
            .join(name)
            .join(version)
            .join("package")
            .join("5ab84d6acfe1f23c4fae0ab88f26e3a396351ac9");
        std::fs::create_dir_all(hash.join("include")).unwrap();
        std::fs::create_dir_all(hash.join("lib")).unwrap();
        hash
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
