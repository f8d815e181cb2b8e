use kurbo::{Affine, BezPath};
use turtlescript::Drawing;

#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Width and height of the image, in pixels.
    pub size: u32,
    pub stroke_width: f64,
}

impl Default for SvgOptions {
    fn default() -> SvgOptions {
        SvgOptions {
            size: 500,
            stroke_width: 1.0,
        }
    }
}

/// The segments of a drawing as one path, in a coordinate system where the top-left corner of
/// the bounds is at the origin and y points down.
pub fn path(drawing: &Drawing) -> BezPath {
    let b = drawing.bounds;
    let mut path = BezPath::new();
    for line in drawing.lines() {
        path.move_to(line.p0);
        path.line_to(line.p1);
    }
    path.apply_affine(Affine::new([1.0, 0.0, 0.0, -1.0, -b.left, b.top]));
    path
}

pub fn render(drawing: &Drawing, opts: &SvgOptions) -> String {
    let b = drawing.bounds;
    let view = b.to_rect();
    if view.width() <= 0.0 || view.height() <= 0.0 {
        log::warn!("bounds {b} enclose no area, the image will be empty");
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {w} {h}" preserveAspectRatio="none">
  <rect x="0" y="0" width="{w}" height="{h}" fill="white"/>
  <path d="{d}" fill="none" stroke="black" stroke-width="{sw}" vector-effect="non-scaling-stroke"/>
</svg>
"#,
        size = opts.size,
        w = view.width(),
        h = view.height(),
        d = path(drawing).to_svg(),
        sw = opts.stroke_width,
    )
}
