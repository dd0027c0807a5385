use std::path::Path;

/// Camera-use authorization, resolved before capture starts.
///
/// Denied access is not an error value anywhere in the pipeline: a denied
/// camera starts nothing and its stream simply stays empty. Callers that
/// want to know why can ask the access value itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraAccess {
    Granted,
    Denied,
}

impl CameraAccess {
    /// Probe a device node for access.
    ///
    /// Granted means the node exists and this process may open it for
    /// reading. A missing node, a permission error, or any other open
    /// failure resolves to Denied; the reason is logged at debug and then
    /// forgotten.
    pub fn probe(device: impl AsRef<Path>) -> CameraAccess {
        let device = device.as_ref();
        match std::fs::OpenOptions::new().read(true).open(device) {
            Ok(_) => CameraAccess::Granted,
            Err(err) => {
                log::debug!("camera access denied for {}: {}", device.display(), err);
                CameraAccess::Denied
            }
        }
    }

    pub fn is_granted(self) -> bool {
        self == CameraAccess::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_node_is_denied() {
        let access = CameraAccess::probe("/dev/nonexistent_camera_node");
        assert_eq!(access, CameraAccess::Denied);
    }

    #[test]
    fn test_probe_readable_path_is_granted() {
        // Any readable file stands in for a device node here.
        let path = std::env::temp_dir().join(format!("spotter-access-{}", std::process::id()));
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(CameraAccess::probe(&path), CameraAccess::Granted);
        std::fs::remove_file(&path).ok();
    }
}
