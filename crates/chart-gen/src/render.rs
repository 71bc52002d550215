//! Low-level plotters renderers shared by the chart writer.

use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;
use report_core::ReportError;

const CHART_SIZE: (u32, u32) = (1000, 500);
const WIDE_CHART_SIZE: (u32, u32) = (1200, 600);

/// Line color choices for multi-series charts.
#[derive(Debug, Clone, Copy)]
pub enum SeriesStyle {
    Red,
    Blue,
    Green,
}

impl SeriesStyle {
    fn color(&self) -> RGBColor {
        match self {
            SeriesStyle::Red => RGBColor(214, 39, 40),
            SeriesStyle::Blue => RGBColor(31, 119, 180),
            SeriesStyle::Green => RGBColor(44, 160, 44),
        }
    }
}

/// A named series ready to draw.
pub struct LabeledSeries {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<(NaiveDate, f64)>,
}

fn chart_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::ChartError(e.to_string())
}

/// Date and padded value ranges for a set of points; empty input is an
/// error so callers never emit an axis-less chart.
fn ranges(
    points: &[&[(NaiveDate, f64)]],
    include_zero: bool,
) -> Result<(std::ops::Range<NaiveDate>, std::ops::Range<f64>), ReportError> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut values: Vec<f64> = Vec::new();
    for series in points {
        for &(d, v) in *series {
            dates.push(d);
            values.push(v);
        }
    }

    let (&d_min, &d_max) = match (dates.iter().min(), dates.iter().max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(ReportError::ChartError("no data to chart".to_string())),
    };

    let mut v_min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut v_max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if include_zero {
        v_min = v_min.min(0.0);
        v_max = v_max.max(0.0);
    }
    let pad = ((v_max - v_min).abs() * 0.05).max(1.0);

    let d_max = if d_min == d_max {
        d_max + chrono::Duration::days(1)
    } else {
        d_max
    };

    Ok((d_min..d_max, (v_min - pad)..(v_max + pad)))
}

/// Single-series line chart with a dashed zero axis when the data spans it.
pub fn line_with_zero_axis(
    path: &Path,
    title: &str,
    y_desc: &str,
    points: &[(NaiveDate, f64)],
) -> Result<(), ReportError> {
    let (x_range, y_range) = ranges(&[points], false)?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .y_desc(y_desc)
        .light_line_style(WHITE.mix(0.7))
        .draw()
        .map_err(chart_err)?;

    if y_range.start < 0.0 && y_range.end > 0.0 {
        chart
            .draw_series(LineSeries::new(
                [(x_range.start, 0.0), (x_range.end, 0.0)],
                BLACK.mix(0.5),
            ))
            .map_err(chart_err)?;
    }

    let color = SeriesStyle::Blue.color();
    chart
        .draw_series(LineSeries::new(points.iter().cloned(), color.stroke_width(2)))
        .map_err(chart_err)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(d, v)| Circle::new((d, v), 3, color.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

/// Area chart shaded red above zero and green below, with the series line
/// drawn on top.
pub fn signed_area(
    path: &Path,
    title: &str,
    y_desc: &str,
    points: &[(NaiveDate, f64)],
) -> Result<(), ReportError> {
    let (x_range, y_range) = ranges(&[points], true)?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .y_desc(y_desc)
        .light_line_style(WHITE.mix(0.7))
        .draw()
        .map_err(chart_err)?;

    let red = SeriesStyle::Red.color();
    let green = SeriesStyle::Green.color();

    chart
        .draw_series(AreaSeries::new(
            points.iter().map(|&(d, v)| (d, v.max(0.0))),
            0.0,
            red.mix(0.15),
        ))
        .map_err(chart_err)?;
    chart
        .draw_series(AreaSeries::new(
            points.iter().map(|&(d, v)| (d, v.min(0.0))),
            0.0,
            green.mix(0.15),
        ))
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            [(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.mix(0.5),
        ))
        .map_err(chart_err)?;
    chart
        .draw_series(LineSeries::new(points.iter().cloned(), red.stroke_width(2)))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

/// Two series on independent y-axes sharing the date axis.
pub fn dual_axis(
    path: &Path,
    title: &str,
    left_desc: &str,
    right_desc: &str,
    left: &[(NaiveDate, f64)],
    right: &[(NaiveDate, f64)],
) -> Result<(), ReportError> {
    let (x_range, left_range) = ranges(&[left], true)?;
    let (_, right_range) = ranges(&[right], false)?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), left_range)
        .map_err(chart_err)?
        .set_secondary_coord(x_range, right_range);

    chart
        .configure_mesh()
        .y_desc(left_desc)
        .light_line_style(WHITE.mix(0.7))
        .draw()
        .map_err(chart_err)?;
    chart
        .configure_secondary_axes()
        .y_desc(right_desc)
        .draw()
        .map_err(chart_err)?;

    let gray = RGBColor(127, 127, 127);
    chart
        .draw_series(AreaSeries::new(left.iter().cloned(), 0.0, gray.mix(0.4)))
        .map_err(chart_err)?
        .label(left_desc.to_string())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], gray));

    let orange = RGBColor(255, 127, 14);
    chart
        .draw_secondary_series(LineSeries::new(right.iter().cloned(), orange.stroke_width(2)))
        .map_err(chart_err)?
        .label(right_desc.to_string())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], orange));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.4))
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}

/// Several labeled lines on one chart with a legend and a zero axis.
pub fn multi_line(
    path: &Path,
    title: &str,
    y_desc: &str,
    serieses: &[LabeledSeries],
) -> Result<(), ReportError> {
    let slices: Vec<&[(NaiveDate, f64)]> =
        serieses.iter().map(|s| s.points.as_slice()).collect();
    let (x_range, y_range) = ranges(&slices, true)?;

    let root = BitMapBackend::new(path, WIDE_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .y_desc(y_desc)
        .light_line_style(WHITE.mix(0.7))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            [(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.mix(0.6),
        ))
        .map_err(chart_err)?;

    for series in serieses {
        if series.points.is_empty() {
            continue;
        }
        let color = series.style.color();
        chart
            .draw_series(LineSeries::new(
                series.points.iter().cloned(),
                color.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label(series.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.4))
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)
}
