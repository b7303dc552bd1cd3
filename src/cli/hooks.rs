//! Git hook installation and management.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::change_id;
use crate::cli::legacy::{self, Migration};
use crate::config::HooksConfig;
use crate::error::Error;
use crate::random::SecureRandom;
use crate::repo;

/// Hook directory relative to the repository root.
pub const HOOK_PATH: &str = ".git/hooks/";

/// Handler run by `hook-invoke <name>` with the arguments git passed the hook.
pub type HookHandler = fn(&[String], &dyn SecureRandom) -> Result<(), Error>;

/// A hook managed by git-review.
pub struct HookSpec {
    pub name: &'static str,
    /// `HOOK_PATH` followed by `name`.
    pub relative_path: &'static str,
    pub handler: HookHandler,
}

impl HookSpec {
    /// Absolute path of the hook file under `root`.
    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path)
    }
}

/// Managed hooks, in install order.
pub const HOOKS: &[HookSpec] = &[HookSpec {
    name: "commit-msg",
    relative_path: ".git/hooks/commit-msg",
    handler: change_id::handle,
}];

/// Look up a managed hook by name.
pub fn find_hook(name: &str) -> Option<&'static HookSpec> {
    HOOKS.iter().find(|spec| spec.name == name)
}

/// Dispatcher script installed for hook `name`.
pub fn render_dispatcher(command: &str, name: &str) -> String {
    format!("#!/bin/sh\nexec {command} hook-invoke {name} \"$@\"\n")
}

/// Settings for a hook install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Diagnostic level; above zero, existing hooks are checked for drift.
    pub verbose: u8,
    /// Command the dispatcher scripts exec.
    pub command: String,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            command: HooksConfig::default().command,
        }
    }
}

/// What an install run did.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Hooks written in this run.
    pub installed: Vec<String>,
    /// Hooks already present and left untouched.
    pub existing: Vec<String>,
    /// Hooks whose legacy script was deleted.
    pub legacy_removed: Vec<String>,
    /// Non-fatal diagnostics.
    pub notes: Vec<String>,
}

/// Install git-review hooks in the repository containing the current directory.
pub fn install_hook(options: &InstallOptions) -> Result<InstallReport, Error> {
    let root = repo::repo_root()?;
    install_hooks_at(&root, options)
}

/// Install git-review hooks in the repository rooted at `root`.
///
/// Existing hook files belong to the user and are never rewritten, except
/// for an exact copy of the legacy Gerrit `commit-msg` script, which is
/// replaced. Running this twice leaves the tree unchanged the second time.
pub fn install_hooks_at(root: &Path, options: &InstallOptions) -> Result<InstallReport, Error> {
    let mut report = InstallReport::default();

    for spec in HOOKS {
        let path = spec.path(root);

        if spec.name == "commit-msg" {
            match legacy::remove_legacy_hook(&path) {
                Migration::Removed => report.legacy_removed.push(spec.name.to_string()),
                Migration::Failed(e) => report
                    .notes
                    .push(format!("checking old commit-msg hook: {e}")),
                Migration::Absent | Migration::Kept => {}
            }
        }

        let content = render_dispatcher(&options.command, spec.name);

        match fs::metadata(&path) {
            Ok(_) => {
                if options.verbose > 0 {
                    if let Some(note) = check_existing(&path, &content) {
                        info!("{note}");
                        report.notes.push(note);
                    }
                }
                debug!(hook = spec.name, "Hook already present");
                report.existing.push(spec.name.to_string());
                continue;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::CheckHook(e)),
        }

        info!(hook = spec.name, "Installing {} hook", spec.name);
        write_hook(&path, &content).map_err(Error::WriteHook)?;
        report.installed.push(spec.name.to_string());
    }

    Ok(report)
}

/// Compare an existing hook with the dispatcher we would have written.
fn check_existing(path: &Path, expected: &str) -> Option<String> {
    match fs::read(path) {
        Err(e) => Some(format!("reading hook: {e}")),
        Ok(data) if data != expected.as_bytes() => Some(format!(
            "unexpected hook content in {}",
            path.display()
        )),
        Ok(_) => None,
    }
}

/// Write a hook script readable, writable and executable by the owner only.
///
/// Fails if the file appeared since it was checked.
fn write_hook(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o700);
    }

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::legacy::LEGACY_COMMIT_MSG_HOOK;
    use tempfile::TempDir;

    fn git_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git").join("hooks")).unwrap();
        temp
    }

    fn commit_msg_path(root: &Path) -> PathBuf {
        root.join(".git").join("hooks").join("commit-msg")
    }

    #[test]
    fn test_registry_paths_match_names() {
        for spec in HOOKS {
            assert_eq!(spec.relative_path, format!("{HOOK_PATH}{}", spec.name));
        }
        assert!(find_hook("commit-msg").is_some());
        assert!(find_hook("pre-push").is_none());
    }

    #[test]
    fn test_dispatcher_script() {
        assert_eq!(
            render_dispatcher("git-review", "commit-msg"),
            "#!/bin/sh\nexec git-review hook-invoke commit-msg \"$@\"\n"
        );
    }

    #[test]
    fn test_install_fresh() {
        let temp = git_repo();

        let report = install_hooks_at(temp.path(), &InstallOptions::default()).unwrap();

        assert_eq!(report.installed, vec!["commit-msg"]);
        let content = fs::read_to_string(commit_msg_path(temp.path())).unwrap();
        assert_eq!(content, render_dispatcher("git-review", "commit-msg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_install_owner_only_executable() {
        use std::os::unix::fs::PermissionsExt;
        let temp = git_repo();

        install_hooks_at(temp.path(), &InstallOptions::default()).unwrap();

        let mode = fs::metadata(commit_msg_path(temp.path()))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(mode & 0o100, 0o100);
    }

    #[test]
    fn test_install_twice_is_idempotent() {
        let temp = git_repo();
        let options = InstallOptions {
            verbose: 1,
            ..InstallOptions::default()
        };

        install_hooks_at(temp.path(), &options).unwrap();
        let path = commit_msg_path(temp.path());
        let first = fs::read(&path).unwrap();
        let first_perms = fs::metadata(&path).unwrap().permissions();

        let report = install_hooks_at(temp.path(), &options).unwrap();

        assert!(report.installed.is_empty());
        assert_eq!(report.existing, vec!["commit-msg"]);
        assert!(report.notes.is_empty());
        assert_eq!(fs::read(&path).unwrap(), first);
        assert_eq!(fs::metadata(&path).unwrap().permissions(), first_perms);
    }

    #[test]
    fn test_existing_hook_preserved() {
        let temp = git_repo();
        let path = commit_msg_path(temp.path());
        fs::write(&path, "#!/bin/sh\necho custom\n").unwrap();

        let report = install_hooks_at(temp.path(), &InstallOptions::default()).unwrap();

        assert!(report.installed.is_empty());
        assert!(report.notes.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\necho custom\n");
    }

    #[test]
    fn test_existing_hook_mismatch_noted_when_verbose() {
        let temp = git_repo();
        let path = commit_msg_path(temp.path());
        fs::write(&path, "#!/bin/sh\necho custom\n").unwrap();
        let options = InstallOptions {
            verbose: 1,
            ..InstallOptions::default()
        };

        let report = install_hooks_at(temp.path(), &options).unwrap();

        assert_eq!(report.notes.len(), 1);
        assert!(report.notes[0].starts_with("unexpected hook content in"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\necho custom\n");
    }

    #[test]
    fn test_legacy_hook_replaced() {
        let temp = git_repo();
        let path = commit_msg_path(temp.path());
        fs::write(&path, LEGACY_COMMIT_MSG_HOOK).unwrap();

        let report = install_hooks_at(temp.path(), &InstallOptions::default()).unwrap();

        assert_eq!(report.legacy_removed, vec!["commit-msg"]);
        assert_eq!(report.installed, vec!["commit-msg"]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            render_dispatcher("git-review", "commit-msg")
        );
    }

    #[test]
    fn test_modified_legacy_hook_kept() {
        let temp = git_repo();
        let path = commit_msg_path(temp.path());
        let custom = format!("{LEGACY_COMMIT_MSG_HOOK}\n");
        fs::write(&path, &custom).unwrap();

        let report = install_hooks_at(temp.path(), &InstallOptions::default()).unwrap();

        assert!(report.legacy_removed.is_empty());
        assert!(report.installed.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), custom);
    }

    #[test]
    fn test_missing_hooks_dir_created() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        let report = install_hooks_at(temp.path(), &InstallOptions::default()).unwrap();

        assert_eq!(report.installed, vec!["commit-msg"]);
        assert!(commit_msg_path(temp.path()).is_file());
    }

    #[test]
    fn test_custom_command() {
        let temp = git_repo();
        let options = InstallOptions {
            verbose: 0,
            command: "/usr/local/bin/git-review".to_string(),
        };

        install_hooks_at(temp.path(), &options).unwrap();

        let content = fs::read_to_string(commit_msg_path(temp.path())).unwrap();
        assert_eq!(
            content,
            "#!/bin/sh\nexec /usr/local/bin/git-review hook-invoke commit-msg \"$@\"\n"
        );
    }

    #[test]
    fn test_check_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        // `.git` is a file, so looking up `.git/hooks/commit-msg` fails with ENOTDIR.
        fs::write(temp.path().join(".git"), "gitdir: elsewhere\n").unwrap();

        let result = install_hooks_at(temp.path(), &InstallOptions::default());

        assert!(matches!(result, Err(Error::CheckHook(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_failure_is_fatal() {
        use std::os::unix::fs::PermissionsExt;
        let temp = git_repo();
        let hooks_dir = temp.path().join(".git").join("hooks");
        fs::set_permissions(&hooks_dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind root; nothing to check there.
        let canary = hooks_dir.join(".writable");
        if fs::write(&canary, "").is_ok() {
            fs::remove_file(&canary).unwrap();
            fs::set_permissions(&hooks_dir, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = install_hooks_at(temp.path(), &InstallOptions::default());
        fs::set_permissions(&hooks_dir, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(Error::WriteHook(_))));
        assert!(!commit_msg_path(temp.path()).exists());
    }

    #[test]
    fn test_write_refuses_existing_file() {
        let temp = git_repo();
        let path = commit_msg_path(temp.path());
        fs::write(&path, "#!/bin/sh\necho custom\n").unwrap();

        let err = write_hook(&path, "#!/bin/sh\n").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\necho custom\n");
    }
}
