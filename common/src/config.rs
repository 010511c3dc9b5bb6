use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);
pub const MAX_PARALLEL_PROBES: usize = 30;
pub const DEVICE_PORTS: [u16; 2] = [80, 81];
pub const NAME_PREFIX: &str = "FD";

/// Runtime knobs shared by the scanner and the CLI.
pub struct Config {
    /// Upper bound for a single probe, connect and response included.
    pub probe_timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub max_parallel_probes: usize,
    /// Ports the holder firmware serves its report on.
    pub device_ports: Vec<u16>,
    /// Case-insensitive name prefix separating holders from every other
    /// HTTP speaker on the subnet.
    pub name_prefix: String,
    /// Directories searched for freshly sliced output.
    pub gcode_dirs: Vec<PathBuf>,
    /// 0 = full output, 1 = terse, 2 = results only.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: PROBE_TIMEOUT,
            max_parallel_probes: MAX_PARALLEL_PROBES,
            device_ports: DEVICE_PORTS.to_vec(),
            name_prefix: NAME_PREFIX.to_string(),
            gcode_dirs: default_gcode_dirs(),
            quiet: 0,
        }
    }
}

/// Conventional slicer output folders under the user's profile. The slicer
/// writes these only on Windows; elsewhere the watch list starts empty and
/// is filled from the command line.
fn default_gcode_dirs() -> Vec<PathBuf> {
    if !cfg!(windows) {
        return Vec::new();
    }
    let Some(home) = env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) else {
        return Vec::new();
    };
    let home = PathBuf::from(home);
    vec![
        home.join("AppData/Local/Temp/crealityprint_model"),
        home.join("AppData/Roaming/Creality/Creative3D/5.0/GCodes"),
    ]
}
