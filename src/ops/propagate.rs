//! Broadcasting discovered search paths through the project graph.

use crate::core::artifact::ToolchainArtifact;
use crate::core::project::Application;
use crate::util::fs::normalize_path;

/// Number of directories that reached the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    pub include_dirs: usize,
    pub lib_dirs: usize,
}

/// Add every existing include directory, then every existing library
/// directory, to the project and to each of its reverse dependents.
///
/// Directories are handed on as their canonical path. Order is preserved
/// and nothing is deduplicated.
pub fn propagate(app: &mut dyn Application, artifact: &ToolchainArtifact) -> PropagationSummary {
    let mut summary = PropagationSummary::default();

    for dir in &artifact.include_dirs {
        if !dir.is_dir() {
            tracing::debug!("skipping missing include dir {}", dir.display());
            continue;
        }
        let dir = normalize_path(dir);
        app.add_include(&dir);
        for rep in app.revendencies() {
            rep.add_include(&dir);
        }
        summary.include_dirs += 1;
    }

    for dir in &artifact.lib_dirs {
        if !dir.is_dir() {
            tracing::debug!("skipping missing lib dir {}", dir.display());
            continue;
        }
        let dir = normalize_path(dir);
        app.add_libpath(&dir);
        for rep in app.revendencies() {
            rep.add_libpath(&dir);
        }
        summary.lib_dirs += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use crate::core::project::PathSink;
    use tempfile::TempDir;

    /// Records every call, in order, across the project and its dependents.
    struct Recorder {
        dir: PathBuf,
        log: Vec<String>,
        dependents: Vec<Dependent>,
    }

    struct Dependent {
        name: &'static str,
        log: Vec<String>,
    }

    impl PathSink for Dependent {
        fn add_include(&mut self, dir: &Path) {
            self.log.push(format!("{} inc {}", self.name, dir.display()));
        }
        fn add_libpath(&mut self, dir: &Path) {
            self.log.push(format!("{} lib {}", self.name, dir.display()));
        }
    }

    impl PathSink for Recorder {
        fn add_include(&mut self, dir: &Path) {
            self.log.push(format!("self inc {}", dir.display()));
        }
        fn add_libpath(&mut self, dir: &Path) {
            self.log.push(format!("self lib {}", dir.display()));
        }
    }

    impl Application for Recorder {
        fn project_dir(&self) -> &Path {
            &self.dir
        }
        fn revendencies(&mut self) -> Vec<&mut dyn PathSink> {
            self.dependents
                .iter_mut()
                .map(|d| d as &mut dyn PathSink)
                .collect()
        }
    }

    fn make_dirs(root: &Path, names: &[&str]) -> Vec<PathBuf> {
        let root = root.canonicalize().unwrap();
        names
            .iter()
            .map(|n| {
                let dir = root.join(n);
                std::fs::create_dir_all(&dir).unwrap();
                dir
            })
            .collect()
    }

    #[test]
    fn test_includes_before_libs_everywhere() {
        let tmp = TempDir::new().unwrap();
        let inc = make_dirs(tmp.path(), &["inc1", "inc2"]);
        let lib = make_dirs(tmp.path(), &["lib1"]);

        let mut app = Recorder {
            dir: tmp.path().to_path_buf(),
            log: Vec::new(),
            dependents: vec![
                Dependent {
                    name: "a",
                    log: Vec::new(),
                },
                Dependent {
                    name: "b",
                    log: Vec::new(),
                },
            ],
        };
        let artifact = ToolchainArtifact {
            include_dirs: inc.clone(),
            lib_dirs: lib.clone(),
        };

        let summary = propagate(&mut app, &artifact);
        assert_eq!(
            summary,
            PropagationSummary {
                include_dirs: 2,
                lib_dirs: 1
            }
        );

        let d = |p: &PathBuf| p.display().to_string();
        assert_eq!(
            app.log,
            vec![
                format!("self inc {}", d(&inc[0])),
                format!("self inc {}", d(&inc[1])),
                format!("self lib {}", d(&lib[0])),
            ]
        );
        for dep in &app.dependents {
            assert_eq!(
                dep.log,
                vec![
                    format!("{} inc {}", dep.name, d(&inc[0])),
                    format!("{} inc {}", dep.name, d(&inc[1])),
                    format!("{} lib {}", dep.name, d(&lib[0])),
                ]
            );
        }
    }

    #[test]
    fn test_missing_dirs_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let inc = make_dirs(tmp.path(), &["include"]);

        let mut app = Recorder {
            dir: tmp.path().to_path_buf(),
            log: Vec::new(),
            dependents: Vec::new(),
        };
        let artifact = ToolchainArtifact {
            include_dirs: vec![tmp.path().join("gone"), inc[0].clone()],
            lib_dirs: vec![tmp.path().join("lib")],
        };

        let summary = propagate(&mut app, &artifact);
        assert_eq!(
            summary,
            PropagationSummary {
                include_dirs: 1,
                lib_dirs: 0
            }
        );
        assert_eq!(app.log.len(), 1);
    }

    #[test]
    fn test_repeated_propagation_is_not_deduplicated() {
        let tmp = TempDir::new().unwrap();
        let inc = make_dirs(tmp.path(), &["include"]);

        let mut app = Recorder {
            dir: tmp.path().to_path_buf(),
            log: Vec::new(),
            dependents: Vec::new(),
        };
        let artifact = ToolchainArtifact {
            include_dirs: inc,
            lib_dirs: Vec::new(),
        };

        propagate(&mut app, &artifact);
        propagate(&mut app, &artifact);
        assert_eq!(app.log.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_dependents_receive_canonical_path() {
        let tmp = TempDir::new().unwrap();
        let real = make_dirs(tmp.path(), &["pkg/include"]).remove(0);
        let link = tmp.path().join("include-link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut app = Recorder {
            dir: tmp.path().join("app"),
            log: Vec::new(),
            dependents: vec![Dependent {
                name: "consumer",
                log: Vec::new(),
            }],
        };
        let artifact = ToolchainArtifact {
            include_dirs: vec![link, real.join("../include")],
            lib_dirs: Vec::new(),
        };

        propagate(&mut app, &artifact);

        let expected = format!("consumer inc {}", real.display());
        assert_eq!(app.dependents[0].log, vec![expected.clone(), expected]);
        assert_eq!(app.log[0], format!("self inc {}", real.display()));
    }
}
