//! Mandelbrot escape-time evaluation

use serde::{Deserialize, Serialize};

/// Sums produced by one render
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MandelbrotSummary {
    /// Sum of escape ratios over every pixel
    pub ratio_sum: f64,
    /// Sum after mapping each ratio `v` to `sqrt(v) * sin(v)`
    pub shaped_sum: f64,
    pub pixels: usize,
}

/// Iterate `z = z² + c` from zero and return `iterations / max_iter`
///
/// A point that never leaves the radius-2 disc returns `1.0`.
pub fn escape_ratio(x0: f64, y0: f64, max_iter: u32) -> f64 {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut iter = 0;

    while x * x + y * y <= 4.0 && iter < max_iter {
        let xtemp = x * x - y * y + x0;
        y = 2.0 * x * y + y0;
        x = xtemp;
        iter += 1;
    }

    f64::from(iter) / f64::from(max_iter)
}

/// Evaluate a `width x height` grid spanning `[-2, 2)` on both axes
pub fn render(width: usize, height: usize, max_iter: u32) -> MandelbrotSummary {
    let mut values = vec![0.0f64; width * height];
    let (w, h) = (width as f64, height as f64);

    for py in 0..height {
        for px in 0..width {
            let x0 = (px as f64 - w / 2.0) * 4.0 / w;
            let y0 = (py as f64 - h / 2.0) * 4.0 / h;
            values[py * width + px] = escape_ratio(x0, y0, max_iter);
        }
    }

    let mut summary = MandelbrotSummary {
        pixels: values.len(),
        ..Default::default()
    };
    for v in values.iter_mut() {
        summary.ratio_sum += *v;
        *v = v.sqrt() * v.sin();
        summary.shaped_sum += *v;
    }
    summary
}
