use crate::composition::model::Phrase;

/// Width cap, in percent of the canvas, for phrases without a bounding box.
pub const DEFAULT_MAX_WIDTH_PCT: f64 = 90.0;

/// Single-line text box limits for one phrase.
///
/// Text never wraps or scrolls; overflow is cut with an ellipsis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BoxConstraint {
    pub max_width_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height_pct: Option<f64>,
    pub single_line: bool,
    pub ellipsis: bool,
}

impl Default for BoxConstraint {
    fn default() -> Self {
        Self {
            max_width_pct: DEFAULT_MAX_WIDTH_PCT,
            max_height_pct: None,
            single_line: true,
            ellipsis: true,
        }
    }
}

impl BoxConstraint {
    pub fn for_phrase(phrase: &Phrase) -> Self {
        let Some(bx) = phrase.box_vertices else {
            return Self::default();
        };
        let height = bx.height_pct();
        Self {
            max_width_pct: bx.width_pct(),
            max_height_pct: (height.is_finite() && height > 0.0).then_some(height),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::model::BoxVertices;
    use crate::foundation::core::Point;

    #[test]
    fn defaults_to_ninety_percent_width() {
        let p = Phrase::new("p", "hi", 0.0, 1.0);
        let c = BoxConstraint::for_phrase(&p);
        assert_eq!(c.max_width_pct, 90.0);
        assert_eq!(c.max_height_pct, None);
        assert!(c.single_line && c.ellipsis);
    }

    #[test]
    fn box_vertices_cap_width_and_height() {
        let mut p = Phrase::new("p", "hi", 0.0, 1.0);
        p.box_vertices = Some(BoxVertices {
            top_left: Point::new(0.25, 0.5),
            top_right: Point::new(0.75, 0.5),
            bottom_right: Point::new(0.75, 0.75),
            bottom_left: Point::new(0.25, 0.75),
        });
        let c = BoxConstraint::for_phrase(&p);
        assert!((c.max_width_pct - 50.0).abs() < 1e-9);
        assert!((c.max_height_pct.unwrap_or_default() - 25.0).abs() < 1e-9);
    }
}
