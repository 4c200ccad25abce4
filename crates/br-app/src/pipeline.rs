use anyhow::Result;
use br_braille::decoder::decode_text;
use br_braille::encoder::{DotParams, render};
use br_core::cell::{DOTS_PER_CELL_X, DOTS_PER_CELL_Y, checked_grid_pixel_size};
use br_core::config::RenderConfig;
use br_core::error::CoreError;
use br_core::frame::FrameBuffer;
use br_core::traits::{DebugSink, DebugStage};
use br_source::image::decode_image;
use br_source::resize::resize_frame;

/// Aspect ratio of the source, in whole cells (columns per row).
///
/// `None` when the source does not fill a single cell in either direction.
#[must_use]
pub fn source_aspect(width: u32, height: u32) -> Option<f64> {
    let cols = width / DOTS_PER_CELL_X;
    let rows = height / DOTS_PER_CELL_Y;
    (cols > 0 && rows > 0).then(|| f64::from(cols) / f64::from(rows))
}

/// Resolve the cell grid for a `width × height` source.
///
/// Both dimensions configured → used as-is. One dimension → the other
/// follows the source aspect. None → `default_width` columns.
///
/// # Errors
/// [`CoreError::InvalidDimensions`] when a dimension must be derived from
/// a source smaller than one cell.
pub fn resolve_grid(
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> Result<(u32, u32), CoreError> {
    let aspect =
        || source_aspect(width, height).ok_or(CoreError::InvalidDimensions { width, height });
    match (config.width, config.height) {
        (Some(cols), Some(rows)) => Ok((cols, rows)),
        (None, Some(rows)) => Ok(((f64::from(rows) * aspect()?).round() as u32, rows)),
        (cols, None) => {
            let cols = cols.unwrap_or(config.default_width);
            Ok((cols, (f64::from(cols) / aspect()?).round() as u32))
        }
    }
}

/// Turn raw input bytes into the frame to render.
///
/// # Errors
/// Decode failures, or a strict-mode parse error.
pub fn load_source(bytes: &[u8], from_text: bool, config: &RenderConfig) -> Result<FrameBuffer> {
    if from_text {
        let text = String::from_utf8_lossy(bytes);
        Ok(decode_text(&text, config.parse_mode)?)
    } else {
        decode_image(bytes)
    }
}

/// Full render: decode, fit to the grid, apply contrast, emit Braille text.
///
/// # Errors
/// Any decode, dimension or resampling failure. A grid whose pixel size
/// does not fit in a `u32` is [`CoreError::InvalidDimensions`].
pub fn run(
    bytes: &[u8],
    from_text: bool,
    config: &RenderConfig,
    mut sink: Option<&mut dyn DebugSink>,
) -> Result<String> {
    let source = load_source(bytes, from_text, config)?;
    if from_text && let Some(sink) = sink.as_mut() {
        sink.capture(DebugStage::Parsed, &source);
    }
    let (cols, rows) = resolve_grid(source.width, source.height, config)?;
    let Some((out_w, out_h)) = checked_grid_pixel_size(cols, rows) else {
        return Err(CoreError::InvalidDimensions {
            width: cols,
            height: rows,
        }
        .into());
    };
    let scaling = (source.width, source.height) != (out_w, out_h);

    log::debug!(
        "inCols: {:.2}, inRows: {:.2}, inW: {}, inH: {}",
        f64::from(source.width) / f64::from(DOTS_PER_CELL_X),
        f64::from(source.height) / f64::from(DOTS_PER_CELL_Y),
        source.width,
        source.height
    );
    log::debug!("outCols: {cols}, outRows: {rows}, outW: {out_w}, outH: {out_h}");
    log::debug!(
        "threshold: {}, contrast: {}, scaling: {}",
        config.threshold,
        config.contrast,
        if scaling { config.scaling.as_str() } else { "none" }
    );

    let pixels = if scaling {
        resize_frame(&source, out_w, out_h, config.scaling)?
    } else {
        source
    };

    Ok(render(pixels, cols, rows, &DotParams::from(config), sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y)));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[derive(Default)]
    struct Stages(Vec<DebugStage>);

    impl DebugSink for Stages {
        fn capture(&mut self, stage: DebugStage, _frame: &FrameBuffer) {
            self.0.push(stage);
        }
    }

    #[test]
    fn default_width_keeps_aspect() {
        let config = RenderConfig::default();
        assert_eq!(resolve_grid(160, 80, &config).unwrap(), (80, 20));
        // odd remainders are dropped before the ratio
        assert_eq!(resolve_grid(161, 83, &config).unwrap(), (80, 20));
    }

    #[test]
    fn single_dimension_derives_the_other() {
        let only_h = RenderConfig {
            height: Some(10),
            ..RenderConfig::default()
        };
        assert_eq!(resolve_grid(160, 80, &only_h).unwrap(), (40, 10));
        let only_w = RenderConfig {
            width: Some(5),
            ..RenderConfig::default()
        };
        // 5 / 2 = 2.5 rounds away from zero
        assert_eq!(resolve_grid(8, 8, &only_w).unwrap(), (5, 3));
    }

    #[test]
    fn both_dimensions_ignore_aspect() {
        let config = RenderConfig {
            width: Some(7),
            height: Some(3),
            ..RenderConfig::default()
        };
        assert_eq!(resolve_grid(1, 1, &config).unwrap(), (7, 3));
    }

    #[test]
    fn tiny_sources_cannot_derive() {
        let config = RenderConfig::default();
        assert!(matches!(
            resolve_grid(1, 100, &config),
            Err(CoreError::InvalidDimensions { .. })
        ));
        assert!(source_aspect(2, 3).is_none());
        assert_eq!(source_aspect(2, 4), Some(1.0));
    }

    #[test]
    fn renders_png_at_native_size() {
        // top-left quarter white
        let bytes = png(4, 4, |x, y| {
            if x < 2 && y < 2 { [255; 4] } else { [0, 0, 0, 255] }
        });
        let config = RenderConfig {
            width: Some(2),
            height: Some(1),
            ..RenderConfig::default()
        };
        assert_eq!(run(&bytes, false, &config, None).unwrap(), "⠛⠀\n");
    }

    #[test]
    fn output_shape_after_resampling() {
        let bytes = png(33, 17, |x, y| [(x * 7) as u8, (y * 13) as u8, 90, 255]);
        let config = RenderConfig {
            width: Some(12),
            ..RenderConfig::default()
        };
        let text = run(&bytes, false, &config, None).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // 33/2=16 cells by 17/4=4 cells: aspect 4, 12 cols → 3 rows
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() == 12));
    }

    #[test]
    fn text_round_trips_through_the_pipeline() {
        let art = "⣿⠀⡇\n⠉⢸⠁\n";
        let config = RenderConfig {
            width: Some(3),
            ..RenderConfig::default()
        };
        assert_eq!(run(art.as_bytes(), true, &config, None).unwrap(), art);
    }

    #[test]
    fn strict_text_mode_surfaces_errors() {
        let config = RenderConfig {
            parse_mode: br_core::config::ParseMode::Strict,
            ..RenderConfig::default()
        };
        let err = run(b"abc\n", true, &config, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidGlyph { .. })
        ));
    }

    #[test]
    fn debug_stages_in_order() {
        let config = RenderConfig {
            width: Some(1),
            contrast: 20,
            ..RenderConfig::default()
        };
        let mut stages = Stages::default();
        let _ = run("⣿\n".as_bytes(), true, &config, Some(&mut stages)).unwrap();
        assert_eq!(
            stages.0,
            vec![DebugStage::Parsed, DebugStage::Contrast, DebugStage::Luminance]
        );
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let bytes = png(2, 4, |_, _| [255; 4]);
        let config = RenderConfig {
            width: Some(u32::MAX),
            height: Some(1),
            ..RenderConfig::default()
        };
        let err = run(&bytes, false, &config, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidDimensions {
                width: u32::MAX,
                height: 1
            })
        ));
    }

    #[test]
    fn garbage_input_fails() {
        assert!(run(b"definitely not a picture", false, &RenderConfig::default(), None).is_err());
    }
}
