use crate::foundation::core::{Rect, Size};

/// Portrait 1080x1920, assumed until the base video reports its own size.
pub const DEFAULT_VIDEO_SIZE: Size = Size::new(1080.0, 1920.0);

/// Largest rect with the video's aspect that fits inside `container`, centered.
///
/// A missing or degenerate video size falls back to [`DEFAULT_VIDEO_SIZE`].
/// An empty container yields an empty rect at the origin.
pub fn fit_canvas(container: Size, video: Option<Size>) -> Rect {
    if !(container.width > 0.0 && container.height > 0.0) {
        return Rect::ZERO;
    }

    let video = video
        .filter(|v| v.width > 0.0 && v.height > 0.0)
        .unwrap_or(DEFAULT_VIDEO_SIZE);
    let video_aspect = video.width / video.height;
    let container_aspect = container.width / container.height;

    let size = if container_aspect > video_aspect {
        Size::new(container.height * video_aspect, container.height)
    } else {
        Size::new(container.width, container.width / video_aspect)
    };
    let x0 = (container.width - size.width) / 2.0;
    let y0 = (container.height - size.height) / 2.0;
    Rect::from_origin_size((x0, y0), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wide_container_pillarboxes_portrait_video() {
        let r = fit_canvas(Size::new(1920.0, 1080.0), None);
        assert!(approx(r.height(), 1080.0));
        assert!(approx(r.width(), 1080.0 * 1080.0 / 1920.0));
        assert!(approx(r.x0 + r.x1, 1920.0));
        assert!(approx(r.y0, 0.0));
    }

    #[test]
    fn tall_container_letterboxes_landscape_video() {
        let r = fit_canvas(Size::new(400.0, 800.0), Some(Size::new(1600.0, 900.0)));
        assert!(approx(r.width(), 400.0));
        assert!(approx(r.height(), 225.0));
        assert!(approx(r.y0, (800.0 - 225.0) / 2.0));
    }

    #[test]
    fn degenerate_sizes_do_not_produce_nan() {
        let r = fit_canvas(Size::new(400.0, 800.0), Some(Size::new(0.0, 0.0)));
        assert!(approx(r.width(), 400.0));
        assert!(approx(r.height(), 400.0 * 1920.0 / 1080.0));
        assert_eq!(fit_canvas(Size::new(0.0, 100.0), None), Rect::ZERO);
    }
}
