//! Camera index probing.

use super::capture::CameraCapture;

/// Return the camera indexes in `0..max_tested` that can be opened.
///
/// An index counts as usable only when the device opens *and* delivers a
/// single frame. Failed indexes are excluded silently, never reported as
/// errors, and no retry is attempted. The handle is released after each
/// probe regardless of outcome.
pub fn list_camera_indexes(max_tested: u32) -> Vec<u32> {
    (0..max_tested).filter(|&i| index_is_usable(i)).collect()
}

fn index_is_usable(index: u32) -> bool {
    match CameraCapture::open(index) {
        Ok(mut capture) => capture.read_frame().is_ok(),
        Err(e) => {
            log::debug!("probe: camera index {} unusable: {}", index, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_zero_indexes_is_empty() {
        assert!(list_camera_indexes(0).is_empty());
    }

    #[test]
    fn test_probe_results_are_ascending_and_bounded() {
        let max_tested = 3;
        let indexes = list_camera_indexes(max_tested);
        assert!(indexes.len() <= max_tested as usize);
        assert!(indexes.windows(2).all(|w| w[0] < w[1]));
        assert!(indexes.iter().all(|&i| i < max_tested));
    }
}
