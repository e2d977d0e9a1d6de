//! ZFS ARC size lookup from the kstat file.

use std::path::Path;

use tracing::{debug, warn};

/// Where ZFS on Linux publishes ARC statistics.
pub const DEFAULT_ARCSTATS_PATH: &str = "/proc/spl/kstat/zfs/arcstats";

/// Current ARC size and its configured floor, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArcSizes {
    pub size: u64,
    pub c_min: u64,
}

/// Parse the `name type data` table of an arcstats kstat.
///
/// Unknown or malformed rows are ignored.
pub fn parse_arcstats(content: &str) -> ArcSizes {
    let mut sizes = ArcSizes::default();
    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name), Some(_kind), Some(data)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let Ok(value) = data.parse::<u64>() else {
            continue;
        };
        match name {
            "size" => sizes.size = value,
            "c_min" => sizes.c_min = value,
            _ => {}
        }
    }
    sizes
}

/// ARC sizes from `path`, or zeros when ZFS is not loaded.
pub fn read_arc_sizes(path: &Path) -> ArcSizes {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_arcstats(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No ARC kstats, assuming no ZFS");
            ArcSizes::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read ARC kstats");
            ArcSizes::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
13 1 0x01 123 33456 5437281011 9834787456221
name                            type data
hits                            4    918273
misses                          4    1234
c_min                           4    1054081536
c_max                           4    16865304576
size                            4    7349923456
";

    #[test]
    fn test_parse_sample() {
        let sizes = parse_arcstats(SAMPLE);
        assert_eq!(sizes.size, 7_349_923_456);
        assert_eq!(sizes.c_min, 1_054_081_536);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_arcstats("size 4\nc_min x y\n"), ArcSizes::default());
    }

    #[test]
    fn test_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_arc_sizes(&dir.path().join("nope")), ArcSizes::default());
    }
}
