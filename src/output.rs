// src/output.rs
// =============================================================================
// Everything that touches the results/ directory.
//
// - split_domain: host -> subdomain / domain / public suffix (via `psl`)
// - output_paths: <fqdn>_<YYYYMMDDHHMMSS>.txt and its _ignored_words sibling
// - prepare_output_dir: creates the directory, reports permission problems
// - write_wordlist: one word per line, UTF-8
// =============================================================================

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use url::{Host, Url};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("permission denied while creating output directory {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A host split along the Public Suffix List
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: Option<String>,
    pub domain: String,
    pub suffix: String,
}

impl DomainParts {
    /// The parts joined back together, e.g. "www.example.co.uk"
    pub fn fqdn(&self) -> String {
        [
            self.subdomain.as_deref().unwrap_or(""),
            self.domain.as_str(),
            self.suffix.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
    }
}

// Splits the host of a URL into subdomain, domain and suffix
//
// Examples:
//   https://www.example.co.uk/ -> (Some("www"), "example", "co.uk")
//   http://localhost:8080/     -> (None, "localhost", "")
//   http://127.0.0.1/          -> (None, "127.0.0.1", "")
//
// Returns None for URLs without a host.
pub fn split_domain(url: &Url) -> Option<DomainParts> {
    let host = match url.host()? {
        Host::Domain(host) => host.trim_end_matches('.').to_string(),
        Host::Ipv4(addr) => return Some(whole_host(addr.to_string())),
        Host::Ipv6(addr) => return Some(whole_host(addr.to_string())),
    };

    let Some(registrable) = psl::domain(host.as_bytes()) else {
        return Some(whole_host(host.clone()));
    };

    let registrable_str = String::from_utf8_lossy(registrable.as_bytes()).into_owned();
    let suffix = String::from_utf8_lossy(registrable.suffix().as_bytes()).into_owned();

    let domain = registrable_str
        .strip_suffix(&suffix)
        .map(|d| d.trim_end_matches('.'))
        .unwrap_or(&registrable_str)
        .to_string();

    let subdomain = host
        .strip_suffix(&registrable_str)
        .map(|s| s.trim_end_matches('.'))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(DomainParts {
        subdomain,
        domain,
        suffix,
    })
}

// Hosts with no registrable domain keep their whole name
fn whole_host(host: String) -> DomainParts {
    DomainParts {
        subdomain: None,
        domain: host,
        suffix: String::new(),
    }
}

/// Where one run writes its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub keywords: PathBuf,
    pub ignored: PathBuf,
}

// Builds <dir>/<fqdn>_<timestamp>.txt and <dir>/<fqdn>_<timestamp>_ignored_words.txt
pub fn output_paths(dir: &Path, parts: &DomainParts, now: DateTime<Local>) -> OutputPaths {
    let stem = format!(
        "{}_{}",
        file_safe(&parts.fqdn()),
        now.format("%Y%m%d%H%M%S")
    );

    OutputPaths {
        keywords: dir.join(format!("{stem}.txt")),
        ignored: dir.join(format!("{stem}_ignored_words.txt")),
    }
}

// IPv6 hosts contain ':' which is not portable in file names
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// Creates the output directory; an existing directory is fine
pub fn prepare_output_dir(dir: &Path) -> Result<(), OutputError> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(OutputError::PermissionDenied(dir.to_path_buf()))
        }
        Err(source) => Err(OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

// Writes one word per line, newline-terminated
pub fn write_wordlist<I, S>(path: &Path, words: I) -> Result<(), OutputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let write = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for word in words {
            writeln!(writer, "{}", word.as_ref())?;
        }
        writer.flush()
    };

    write().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why the Public Suffix List?
//    - "co.uk" is a suffix just like "com", so splitting on the last dot
//      would call "co.uk" the domain of www.example.co.uk
//
// 2. Why BufWriter?
//    - Each writeln! would otherwise be its own system call
//
// 3. Why match on e.kind()?
//    - io::Error carries an ErrorKind, letting us single out
//      PermissionDenied for its own message and exit code
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    // Reads a wordlist back the way a consumer would: one entry per line
    fn read_wordlist(path: &Path) -> BTreeSet<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "keyword-spider-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn parts(url: &str) -> DomainParts {
        split_domain(&Url::parse(url).unwrap()).unwrap()
    }

    #[test]
    fn test_split_simple_domain() {
        let p = parts("https://example.com/page");
        assert_eq!(p.subdomain, None);
        assert_eq!(p.domain, "example");
        assert_eq!(p.suffix, "com");
        assert_eq!(p.fqdn(), "example.com");
    }

    #[test]
    fn test_split_multi_label_suffix() {
        let p = parts("https://shop.www.example.co.uk/");
        assert_eq!(p.subdomain.as_deref(), Some("shop.www"));
        assert_eq!(p.domain, "example");
        assert_eq!(p.suffix, "co.uk");
        assert_eq!(p.fqdn(), "shop.www.example.co.uk");
    }

    #[test]
    fn test_split_ip_and_localhost() {
        assert_eq!(parts("http://127.0.0.1:8080/").fqdn(), "127.0.0.1");
        assert_eq!(parts("http://localhost/").fqdn(), "localhost");
    }

    #[test]
    fn test_output_paths() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let paths = output_paths(Path::new("results"), &parts("https://www.example.com/"), now);

        assert_eq!(
            paths.keywords,
            Path::new("results").join("www.example.com_20240309140507.txt")
        );
        assert_eq!(
            paths.ignored,
            Path::new("results").join("www.example.com_20240309140507_ignored_words.txt")
        );
    }

    #[test]
    fn test_ipv6_file_name_is_safe() {
        let now = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let paths = output_paths(Path::new("out"), &parts("http://[::1]:3000/"), now);
        let name = paths.keywords.file_name().unwrap().to_string_lossy().into_owned();
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_prepare_output_dir_is_idempotent() {
        let dir = scratch_dir("prepare");
        prepare_output_dir(&dir).unwrap();
        prepare_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
        fs::remove_dir_all(&dir).unwrap();
    }

    // Root ignores directory permissions, so the check only means something
    // for an unprivileged user; the test returns early otherwise.
    #[cfg(unix)]
    #[test]
    fn test_prepare_output_dir_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch_dir("readonly");
        fs::create_dir_all(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        let privileged = fs::create_dir(dir.join("write-check")).is_ok();
        let result = prepare_output_dir(&dir.join("results"));

        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        if privileged {
            return;
        }
        assert!(matches!(result, Err(OutputError::PermissionDenied(_))));
    }

    #[test]
    fn test_prepare_output_dir_over_a_file() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let result = prepare_output_dir(&file.join("results"));
        assert!(matches!(result, Err(OutputError::CreateDir { .. })));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_wordlist_round_trip() {
        let dir = scratch_dir("roundtrip");
        prepare_output_dir(&dir).unwrap();
        let path = dir.join("words.txt");

        let words: BTreeSet<String> = ["alpha", "Beta", "grüße", "admin@example.com"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        write_wordlist(&path, &words).unwrap();

        assert_eq!(read_wordlist(&path), words);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_wordlist() {
        let dir = scratch_dir("empty");
        prepare_output_dir(&dir).unwrap();
        let path = dir.join("words.txt");

        write_wordlist(&path, Vec::<String>::new()).unwrap();

        assert!(read_wordlist(&path).is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }
}
