use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::model::{LinuxNative, NativeApp};

/// How long a package-manager listing may run before it is abandoned and
/// the next manager in the list is tried.
const LISTING_TIMEOUT: Duration = Duration::from_secs(30);

struct PackageManager {
    name: &'static str,
    list_command: &'static [&'static str],
    parse: fn(&str) -> Vec<NativeApp>,
}

/// Ordered list of package managers. The first one whose listing exits
/// successfully wins; outputs are never merged across managers.
const MANAGERS: &[PackageManager] = &[
    PackageManager { name: "dpkg", list_command: &["dpkg", "-l"], parse: parse_dpkg_output },
    PackageManager {
        name: "rpm",
        list_command: &["rpm", "-qa", "--queryformat", "%{NAME} %{VERSION} %{SIZE}\n"],
        parse: parse_rpm_output,
    },
];

pub fn enumerate(verbose: bool) -> Vec<NativeApp> {
    for manager in MANAGERS {
        match run_listing(manager.list_command) {
            Some(output) => {
                let apps = (manager.parse)(&output);
                if verbose {
                    eprintln!("{}: {} packages", manager.name, apps.len());
                }
                return apps;
            }
            None => {
                if verbose {
                    eprintln!("Skipping {}: listing failed or timed out", manager.name);
                }
            }
        }
    }
    Vec::new()
}

/// Run a listing command, bounded by [`LISTING_TIMEOUT`]. Returns stdout on
/// a successful exit, `None` on spawn failure, non-zero exit, or timeout.
fn run_listing(command: &[&str]) -> Option<String> {
    run_listing_with_timeout(command, LISTING_TIMEOUT)
}

fn run_listing_with_timeout(command: &[&str], timeout: Duration) -> Option<String> {
    let (program, args) = command.split_first()?;
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    // Drain stdout on a separate thread so a listing bigger than the pipe
    // buffer cannot stall the child while we poll for its exit.
    let mut stdout = child.stdout.take()?;
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf);
        buf
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = reader.join().unwrap_or_default();
                return if status.success() {
                    Some(String::from_utf8_lossy(&stdout).into_owned())
                } else {
                    None
                };
            }
            Ok(None) if Instant::now() >= deadline => {
                // Hung listing: kill and reap it before trying the next
                // manager.
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Ok(None) => thread::sleep(Duration::from_millis(25)),
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
        }
    }
}

/// Parse `dpkg -l` output: five header lines, then `ii name version arch
/// description` rows. dpkg does not report installed size here, so size
/// stays 0.
fn parse_dpkg_output(output: &str) -> Vec<NativeApp> {
    let mut apps = Vec::new();
    for line in output.lines().skip(5) {
        if !line.starts_with("ii") {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }
        let name = parts[1].to_string();
        apps.push(NativeApp::Linux(LinuxNative {
            remove_command: format!("sudo apt remove {name}"),
            name,
            version: parts[2].to_string(),
            size_bytes: 0,
            manager: "dpkg".to_string(),
        }));
    }
    apps
}

/// Parse `rpm -qa` output in our `NAME VERSION SIZE` query format.
fn parse_rpm_output(output: &str) -> Vec<NativeApp> {
    let mut apps = Vec::new();
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }
        let name = parts[0].to_string();
        let size_bytes = parts[2].parse::<u64>().unwrap_or(0);
        apps.push(NativeApp::Linux(LinuxNative {
            remove_command: format!("sudo rpm -e {name}"),
            name,
            version: parts[1].to_string(),
            size_bytes,
            manager: "rpm".to_string(),
        }));
    }
    apps
}
