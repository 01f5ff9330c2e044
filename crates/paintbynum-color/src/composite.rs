//! Rendering a label map through a color table

use crate::{ColorResult, ColorTable};
use paintbynum_core::{LabelMap, Pix, PixMut, PixelDepth, color};

/// Fill color for boundary, background and uncolored pixels (black)
pub const DEFAULT_FILL: u32 = color::compose_rgb(0, 0, 0);

/// Render `labels` as a 32-bit RGB image.
///
/// Pixels whose label is a region id with a table entry take that color;
/// everything else stays [`DEFAULT_FILL`].
pub fn render_labels(labels: &LabelMap, table: &ColorTable) -> ColorResult<Pix> {
    let mut out = PixMut::new(labels.width(), labels.height(), PixelDepth::Bit32)?;
    out.fill(DEFAULT_FILL);
    let mut painted = 0usize;
    for (dst, &l) in out.data_mut().iter_mut().zip(labels.data()) {
        if labels.is_region(l)
            && let Some(c) = table.get(l)
        {
            *dst = c;
            painted += 1;
        }
    }
    log::debug!(
        "composite: {} of {} pixels painted",
        painted,
        labels.data().len()
    );
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintbynum_core::{BACKGROUND_LABEL, BOUNDARY_LABEL};

    #[test]
    fn test_sentinels_render_default() {
        let labels =
            LabelMap::from_data(3, 1, 1, vec![1, BOUNDARY_LABEL, BACKGROUND_LABEL]).unwrap();
        let mut table = ColorTable::new();
        table.insert(1, color::compose_rgb(9, 8, 7));
        // entries for sentinels are ignored
        table.insert(BOUNDARY_LABEL, color::compose_rgb(255, 0, 0));
        table.insert(BACKGROUND_LABEL, color::compose_rgb(0, 255, 0));

        let out = render_labels(&labels, &table).unwrap();
        assert_eq!(out.get_rgb(0, 0), Some((9, 8, 7)));
        assert_eq!(out.get_pixel(1, 0), Some(DEFAULT_FILL));
        assert_eq!(out.get_pixel(2, 0), Some(DEFAULT_FILL));
    }

    #[test]
    fn test_empty_table_renders_fill() {
        let labels = LabelMap::from_data(2, 2, 0, vec![BACKGROUND_LABEL; 4]).unwrap();
        let out = render_labels(&labels, &ColorTable::new()).unwrap();
        assert!(out.data().iter().all(|&p| p == DEFAULT_FILL));
    }
}
