//! Binarization regression test
//!
//! Grayscale conversion and thresholding on synthetic disks:
//!   1. A two-level disk converts to exactly its two gray levels
//!   2. The automatic threshold falls between the levels and the mask
//!      covers the disk area
//!   3. A fixed threshold above both levels empties the mask
//!   4. A uniform white image is all foreground at threshold 0
//!   5. A uniform black image gives an empty mask
//!
//! Run with:
//! ```
//! cargo test -p paintbynum-color --test binarize_reg
//! ```

use paintbynum_color::{ThresholdMode, binarize, compute_otsu_threshold, convert_to_gray};
use paintbynum_test::{RegParams, make_disk_image, make_uniform_image};

#[test]
fn binarize_reg() {
    let mut rp = RegParams::new("binarize");

    let pixs = make_disk_image(60, 60, (30.0, 30.0), 12.0, (220, 220, 220), (30, 30, 30))
        .expect("make disk");
    let gray = convert_to_gray(&pixs).expect("convert_to_gray");
    rp.compare_values(8.0, gray.depth().bits() as f64, 0.0);
    rp.compare_values(220.0, gray.get_pixel(30, 30).unwrap() as f64, 0.0);
    rp.compare_values(30.0, gray.get_pixel(0, 0).unwrap() as f64, 0.0);

    // --- automatic threshold splits the two levels ---
    let t = compute_otsu_threshold(&gray).expect("otsu");
    rp.compare_values(1.0, if (30..220).contains(&t) { 1.0 } else { 0.0 }, 0.0);
    let (mask, used) = binarize(&gray, ThresholdMode::Auto).expect("binarize auto");
    rp.compare_values(t as f64, used as f64, 0.0);
    let disk_area = gray.data().iter().filter(|&&v| v == 220).count();
    rp.compare_values(disk_area as f64, mask.count_nonzero() as f64, 0.0);

    // --- fixed threshold above both levels empties the mask ---
    let (mask, _) = binarize(&gray, ThresholdMode::Fixed(250)).expect("binarize fixed");
    rp.compare_values(0.0, mask.count_nonzero() as f64, 0.0);

    // --- uniform white: every pixel is foreground ---
    let white = convert_to_gray(&make_uniform_image(10, 10, (255, 255, 255)).unwrap()).unwrap();
    let (mask, t) = binarize(&white, ThresholdMode::Auto).expect("binarize white");
    rp.compare_values(0.0, t as f64, 0.0);
    rp.compare_values(100.0, mask.count_nonzero() as f64, 0.0);

    // --- uniform black: nothing is foreground ---
    let black = convert_to_gray(&make_uniform_image(10, 10, (0, 0, 0)).unwrap()).unwrap();
    let (mask, _) = binarize(&black, ThresholdMode::Auto).expect("binarize black");
    rp.compare_values(0.0, mask.count_nonzero() as f64, 0.0);

    assert!(rp.cleanup());
}
