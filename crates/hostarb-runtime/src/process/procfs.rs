//! `statm`-based process inspection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hostarb_core::domain::ResidentMemory;
use hostarb_core::ports::{ProbeError, ProcessInspector, ProcessLookupError};

use crate::system::page_size;

const DEFAULT_PROC_ROOT: &str = "/proc";

/// Reads `<root>/<pid>/statm` and scales its page counts to bytes.
#[derive(Debug, Clone)]
pub struct ProcfsProcessInspector {
    root: PathBuf,
    page_size: u64,
}

impl ProcfsProcessInspector {
    /// Inspector over the live `/proc` using the host page size.
    pub fn new() -> Result<Self, ProbeError> {
        Ok(Self::with_root(DEFAULT_PROC_ROOT, page_size()?))
    }

    /// Inspector over an arbitrary procfs-shaped tree.
    pub fn with_root(root: impl Into<PathBuf>, page_size: u64) -> Self {
        Self {
            root: root.into(),
            page_size,
        }
    }

    fn statm_path(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string()).join("statm")
    }
}

/// Parse `size resident shared text lib data dt`, scaled by `page_size`.
fn parse_statm(content: &str, page_size: u64) -> Option<ResidentMemory> {
    let pages: Vec<u64> = content
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    let fields: [u64; 7] = pages.get(..7)?.try_into().ok()?;
    let [size, resident, shared, text, lib, data, dirty] = fields;
    let bytes = |pages: u64| pages.saturating_mul(page_size);

    Some(ResidentMemory {
        rss: bytes(resident),
        vms: bytes(size),
        shared: bytes(shared),
        text: bytes(text),
        lib: bytes(lib),
        data: bytes(data),
        dirty: bytes(dirty),
    })
}

fn unreadable(pid: u32, path: &Path, reason: impl std::fmt::Display) -> ProcessLookupError {
    ProcessLookupError::Unreadable {
        pid,
        reason: format!("{}: {reason}", path.display()),
    }
}

#[async_trait]
impl ProcessInspector for ProcfsProcessInspector {
    async fn resident_memory(&self, pid: u32) -> Result<ResidentMemory, ProcessLookupError> {
        let path = self.statm_path(pid);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProcessLookupError::NotFound(pid)
            } else {
                unreadable(pid, &path, e)
            }
        })?;

        parse_statm(&content, self.page_size)
            .ok_or_else(|| unreadable(pid, &path, "malformed statm"))
    }
}
