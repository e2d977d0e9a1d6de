//! Host page size.

use hostarb_core::ports::ProbeError;

/// Bytes per memory page, from `sysconf(_SC_PAGESIZE)`.
#[cfg(unix)]
pub fn page_size() -> Result<u64, ProbeError> {
    use nix::unistd::{SysconfVar, sysconf};

    match sysconf(SysconfVar::PAGE_SIZE) {
        Ok(Some(size)) => u64::try_from(size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| ProbeError::PageSizeFailed(format!("invalid page size {size}"))),
        Ok(None) => Err(ProbeError::PageSizeFailed(
            "PAGE_SIZE not reported".to_string(),
        )),
        Err(e) => Err(ProbeError::PageSizeFailed(e.to_string())),
    }
}

/// Bytes per memory page. Non-Unix hosts are assumed to use 4 KiB pages.
#[cfg(not(unix))]
pub fn page_size() -> Result<u64, ProbeError> {
    Ok(4096)
}
