//! Executable shell scripts standing in for the Nix prefetch tools.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Write `#!/bin/sh` + `body` to `dir/name`, mark it executable, return its path.
pub fn script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

/// A `nix-hash` stand-in that records its arguments to `dir/hash.args` and prints `out`.
pub fn nix_hash(dir: &Path, out: &str) -> String {
    script(
        dir,
        "fake-nix-hash",
        &format!(
            "echo \"$@\" > {}/hash.args\necho '{}'",
            dir.display(),
            out
        ),
    )
}
