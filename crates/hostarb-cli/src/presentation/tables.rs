//! Table and value formatting for CLI output.

use std::fmt::Write as _;

use hostarb_core::DisplayDeviceView;

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable byte count using binary units.
///
/// ```rust
/// use hostarb_cli::presentation::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1536 * 1024 * 1024), "1.50 GiB");
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Render display devices as a fixed-width table.
pub fn display_devices_table(devices: &[DisplayDeviceView]) -> String {
    let mut out = format!(
        "{:<6} {:<6} {:<16} {:<4} {:<10} {:<5} {}\n",
        "ID", "PORT", "BIND", "WEB", "RESOLUTION", "WAIT", "PASSWORD"
    );
    for d in devices {
        let _ = writeln!(
            out,
            "{:<6} {:<6} {:<16} {:<4} {:<10} {:<5} {}",
            d.id,
            format_optional(d.port.as_ref(), "-"),
            d.bind,
            yes_no(d.web),
            d.resolution,
            yes_no(d.wait),
            yes_no(d.password_configured),
        );
    }
    out
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
