/// Scanner module: recursive file enumeration.
///
/// Uses `jwalk`'s rayon-backed parallel traversal to list every regular file
/// under a root. No filtering by extension is done here: whether a file is a
/// DICOM container is decided by the extractor, which classifies anything
/// else as a skipped file.
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Traversal switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerateOptions {
    /// Skip dot-prefixed files and do not descend into dot-prefixed directories.
    pub skip_hidden: bool,
    /// Follow symbolic links. When `false`, links are neither listed nor traversed.
    pub follow_links: bool,
    /// Threads used by the walker. `0` means one per logical CPU.
    pub threads: usize,
}

/// Result of walking one root.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Regular files reachable from the root, in traversal order.
    pub files: Vec<PathBuf>,
    /// Directories or entries that could not be read.
    pub walk_errors: u64,
    /// Wall-clock time spent walking.
    pub duration: Duration,
}

impl Enumeration {
    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sort the file list so independent walks can be compared.
    pub fn sort(&mut self) {
        self.files.sort_unstable();
    }
}

/// Recursively list every regular file under `root`.
///
/// A missing root yields an empty enumeration rather than an error. Read
/// errors on individual directories are counted and logged; the walk
/// continues past them.
pub fn enumerate_files(root: &Path, options: EnumerateOptions) -> Enumeration {
    let start = Instant::now();

    if !root.exists() {
        debug!("Root {} does not exist, nothing to enumerate", root.display());
        return Enumeration {
            duration: start.elapsed(),
            ..Enumeration::default()
        };
    }

    let threads = if options.threads == 0 {
        num_cpus::get()
    } else {
        options.threads
    };

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(options.skip_hidden)
        .follow_links(options.follow_links)
        .parallelism(jwalk::Parallelism::RayonNewPool(threads));

    let mut files = Vec::new();
    let mut walk_errors: u64 = 0;

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                walk_errors += 1;
                let err_path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                warn!("Cannot read {err_path}: {err}");
                continue;
            }
        };

        if entry.file_type().is_file() {
            files.push(entry.path());
        }
    }

    let duration = start.elapsed();
    info!(
        "Enumerated {} files under {} in {:?} ({} walk errors)",
        files.len(),
        root.display(),
        duration,
        walk_errors
    );

    Enumeration {
        files,
        walk_errors,
        duration,
    }
}
