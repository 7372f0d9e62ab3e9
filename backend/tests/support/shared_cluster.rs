//! Process-wide embedded PostgreSQL cluster shared by a test binary.
//!
//! `pg-embed-setup-unpriv` leaks its cluster guard for the process lifetime.
//! Under nextest every binary is its own process, and a postmaster left
//! running blocks the next binary from bootstrapping on the same data
//! directory, so this wrapper serialises bootstrap across processes and stops
//! the postmaster from an `atexit` hook.

#[cfg(unix)]
use std::ffi::CString;
#[cfg(unix)]
use std::os::unix::ffi::OsStrExt;
#[cfg(unix)]
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::sync::OnceLock;
#[cfg(unix)]
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

#[cfg(unix)]
use color_eyre::eyre::eyre;
#[cfg(unix)]
use pg_embedded_setup_unpriv::BootstrapError;
use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle};

const BOOTSTRAP_RETRIES: usize = 5;
const BOOTSTRAP_RETRY_DELAY: Duration = Duration::from_millis(500);
const STABLE_PASSWORD: &str = "pokedex_embedded_test";
#[cfg(unix)]
const PROCESS_LOCK_FILE: &str = "pokedex-pg-embedded-shared-cluster.lock";

#[cfg(unix)]
static POSTMASTER_PID: AtomicI32 = AtomicI32::new(0);
#[cfg(unix)]
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
#[cfg(unix)]
static PROCESS_LOCK_FD: OnceLock<i32> = OnceLock::new();

/// Shared cluster for this test binary, bootstrapped on first use.
pub fn shared_cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    #[cfg(unix)]
    acquire_process_lock()?;

    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => {
                #[cfg(unix)]
                register_exit_cleanup(handle);
                return Ok(handle);
            }
            Err(error) if attempt >= BOOTSTRAP_RETRIES => return Err(error),
            Err(_) => {
                std::thread::sleep(BOOTSTRAP_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting logins.
///
/// `initdb` only runs when the data directory is new; later processes must
/// present the password chosen by the first one.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster library spawns threads and at most
        // once per process behind the shared handle's mutex.
        unsafe {
            std::env::set_var("PG_PASSWORD", STABLE_PASSWORD);
        }
    }
}

/// Hold an exclusive `flock` on a temp-dir lock file for the process lifetime.
#[cfg(unix)]
fn acquire_process_lock() -> BootstrapResult<()> {
    if PROCESS_LOCK_FD.get().is_some() {
        return Ok(());
    }

    let lock_path = std::env::temp_dir().join(PROCESS_LOCK_FILE);
    let path = CString::new(lock_path.as_os_str().as_bytes()).map_err(|error| {
        BootstrapError::from(eyre!(
            "encode cluster lock path '{}': {error}",
            lock_path.display()
        ))
    })?;

    // SAFETY: `path` is NUL-terminated and outlives the call.
    let fd = unsafe { libc::open(path.as_ptr(), libc::O_CREAT | libc::O_RDWR, 0o600) };
    if fd < 0 {
        let error = std::io::Error::last_os_error();
        return Err(BootstrapError::from(eyre!(
            "open cluster lock '{}': {error}",
            lock_path.display()
        )));
    }

    // SAFETY: `fd` was returned by `open` above.
    if unsafe { libc::flock(fd, libc::LOCK_EX) } != 0 {
        let error = std::io::Error::last_os_error();
        // SAFETY: `fd` is valid and unused elsewhere.
        unsafe {
            libc::close(fd);
        }
        return Err(BootstrapError::from(eyre!(
            "lock cluster lock '{}': {error}",
            lock_path.display()
        )));
    }

    if PROCESS_LOCK_FD.set(fd).is_err() {
        // SAFETY: another caller stored its descriptor first; this one is ours.
        unsafe {
            libc::close(fd);
        }
    }
    Ok(())
}

#[cfg(unix)]
fn read_postmaster_pid(data_dir: &Path) -> Option<i32> {
    let dir = cap_std::fs::Dir::open_ambient_dir(data_dir, cap_std::ambient_authority()).ok()?;
    let content = dir.read_to_string("postmaster.pid").ok()?;
    content.lines().next()?.trim().parse().ok()
}

/// Stop the postmaster with SIGTERM, escalating to SIGKILL after five seconds.
///
/// Only signals when `postmaster.pid` still names the recorded process.
#[cfg(unix)]
extern "C" fn stop_postmaster_on_exit() {
    let recorded = POSTMASTER_PID.load(Ordering::Relaxed);
    if recorded <= 0 {
        return;
    }
    let pid = match DATA_DIR.get().and_then(|dir| read_postmaster_pid(dir)) {
        Some(current) if current == recorded => current,
        _ => return,
    };

    // SAFETY: `pid` matches the live postmaster.pid entry.
    if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
        return;
    }
    for _ in 0..50 {
        std::thread::sleep(Duration::from_millis(100));
        // SAFETY: signal 0 only checks for existence.
        if unsafe { libc::kill(pid, 0) } != 0 {
            return;
        }
    }
    // SAFETY: same pid; graceful shutdown timed out.
    unsafe {
        libc::kill(pid, libc::SIGKILL);
    }
}

#[cfg(unix)]
fn register_exit_cleanup(handle: &ClusterHandle) {
    let data_dir = &handle.settings().data_dir;
    let Some(pid) = read_postmaster_pid(data_dir) else {
        return;
    };
    if POSTMASTER_PID
        .compare_exchange(0, pid, Ordering::Relaxed, Ordering::Relaxed)
        .is_err()
    {
        return;
    }
    let _ = DATA_DIR.set(data_dir.clone());

    // SAFETY: the handler is a plain `extern "C"` fn reading atomics.
    let rc = unsafe { libc::atexit(stop_postmaster_on_exit) };
    if rc != 0 {
        eprintln!("pg-embed: atexit registration failed (rc={rc}); postmaster {pid} may outlive the tests");
    }
}
