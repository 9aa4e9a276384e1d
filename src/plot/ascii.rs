//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! The risk-by-age chart draws overall CVD risk against age for:
//! - the subject's own factors: `*` line
//! - the reference factors for the same demographics: `.` line
//! - markers: `A` (chronological age), `V` (vascular age)

use crate::domain::RisksFactors;
use crate::engine::{VASCULAR_AGE_RANGE, vascular_age};
use crate::models::overall_risk;
use crate::tables::reference_risks_factors;

/// One polyline on the grid.
struct Series {
    points: Vec<(f64, f64)>,
    ch: char,
}

/// A single labelled point drawn over the lines.
struct Mark {
    x: f64,
    y: f64,
    ch: char,
}

/// Render overall CVD risk vs age for a subject and their reference profile.
pub fn render_risk_by_age(factors: &RisksFactors, width: usize, height: usize) -> String {
    let Some(subject) = risk_by_age(factors) else {
        return "Plot unavailable: overall CVD risk needs gender, lipids, SBP, smoking, diabetes and body size.\n"
            .to_string();
    };
    let reference = risk_by_age(&reference_risks_factors(factors)).unwrap_or_default();

    let mut marks = Vec::new();
    if let Some(v) = vascular_age(factors) {
        if let Some(y) = value_at(&reference, v) {
            marks.push(Mark { x: f64::from(v), y, ch: 'V' });
        }
    }
    if let Some(age) = factors.age {
        if let Some(y) = value_at(&subject, age) {
            marks.push(Mark { x: f64::from(age), y, ch: 'A' });
        }
    }

    let series = [Series { points: subject, ch: '*' }, Series { points: reference, ch: '.' }];
    let (lo, hi) = VASCULAR_AGE_RANGE;
    let mut out = render_plot(&series, &marks, f64::from(lo), f64::from(hi), width, height);
    out.push_str("Legend: * subject  . reference  A age  V vascular age\n");
    out
}

/// Overall risk at every whole age of the domain, or `None` when the factor
/// set cannot produce one.
fn risk_by_age(factors: &RisksFactors) -> Option<Vec<(f64, f64)>> {
    let (lo, hi) = VASCULAR_AGE_RANGE;
    (lo..=hi)
        .map(|a| overall_risk(&factors.with_age(a)).map(|r| (f64::from(a), r)))
        .collect()
}

fn value_at(curve: &[(f64, f64)], age: i32) -> Option<f64> {
    let x = f64::from(age);
    curve.iter().find(|(a, _)| *a == x).map(|&(_, y)| y)
}

fn render_plot(series: &[Series], marks: &[Mark], x_min: f64, x_max: f64, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    // Risks are never negative, so the axis always starts at zero.
    let y_top = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .chain(marks.iter().map(|m| m.y))
        .filter(|y| y.is_finite())
        .fold(0.0, f64::max);
    let y_max = if y_top > 0.0 { y_top * 1.05 } else { 1.0 };

    let mut grid = vec![vec![' '; width]; height];

    // Earlier series win where lines overlap.
    for s in series {
        draw_curve(&mut grid, &s.points, s.ch, x_min, x_max, y_max);
    }
    for m in marks {
        let x = map_x(m.x, x_min, x_max, width);
        let y = map_y(m.y, y_max, height);
        grid[y][x] = m.ch;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: age=[{x_min:.0}, {x_max:.0}] years | risk=[0.0%, {:.1}%]\n",
        y_max * 100.0
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = (y / y_max).clamp(0.0, 1.0);
    // y_max is row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], ch: char, x_min: f64, x_max: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let gx = map_x(x, x_min, x_max, width);
        let gy = map_y(y, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, gx, gy, ch),
            None if grid[gy][gx] == ' ' => grid[gy][gx] = ch,
            None => {}
        }
        prev = Some((gx, gy));
    }
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Race};

    #[test]
    fn plot_golden_snapshot_small() {
        let series = [Series {
            points: vec![(0.0, 0.0), (9.0, 1.0)],
            ch: '-',
        }];
        let marks = [Mark { x: 0.0, y: 0.0, ch: 'A' }];
        let txt = render_plot(&series, &marks, 0.0, 9.0, 10, 5);
        let expected = concat!(
            "Plot: age=[0, 9] years | risk=[0.0%, 105.0%]\n",
            "        --\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "A-        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn chart_marks_age_and_vascular_age() {
        let f = RisksFactors {
            is_smoker: Some(true),
            hypertension_treatment: Some(false),
            has_diabetes: Some(false),
            ..RisksFactors::demographic(50, Gender::Male, "US", Some(Race::White))
                .with_cholesterol(240.0)
                .with_cholesterol_hdl(40.0)
                .with_sbp(150.0)
                .with_body(178.0, 90.0)
        };
        let txt = render_risk_by_age(&f, 60, 15);
        // header + grid + legend
        assert_eq!(txt.lines().count(), 1 + 15 + 1);
        let grid: String = txt.lines().skip(1).take(15).collect();
        assert!(grid.contains('A'));
        assert!(grid.contains('V'));
        assert!(grid.contains('*'));
    }

    #[test]
    fn incomplete_factors_explain_why_there_is_no_plot() {
        let f = RisksFactors::demographic(50, Gender::Male, "US", None);
        assert!(render_risk_by_age(&f, 60, 15).starts_with("Plot unavailable"));
    }
}
