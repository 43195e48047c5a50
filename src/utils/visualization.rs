//! Visualization utilities for primitive_designer
//!
//! Collects line and point series and renders them with gnuplot onto a
//! single set of axes.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::error::{DesignerError, DesignerResult};
use crate::common::{Point2D, Pose2D, WorldExtent};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const MAGENTA: &str = "#FF00FF";
    pub const ORANGE: &str = "#FFA500";
    pub const GRAY: &str = "#808080";
    pub const LIGHT_GRAY: &str = "#CCCCCC";

    // Semantic colors
    pub const MINOR_GRID: &str = LIGHT_GRAY;
    pub const MAJOR_GRID: &str = GRAY;
    pub const AXIS: &str = BLACK;
    pub const START: &str = GREEN;
    pub const GOAL: &str = RED;
    pub const GUIDE: &str = BLUE;
    pub const MOTION: &str = MAGENTA;
    pub const LATTICE_GOAL: &str = ORANGE;
    pub const UNREACHABLE: &str = GRAY;
}

/// Style for line rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::MOTION.to_string(),
            line_width: 2.0,
            caption: String::new(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

#[derive(Debug, Clone)]
enum Series {
    Lines {
        x: Vec<f64>,
        y: Vec<f64>,
        style: PathStyle,
    },
    Points {
        x: Vec<f64>,
        y: Vec<f64>,
        style: PointStyle,
    },
}

/// Main visualizer struct
pub struct Visualizer {
    series: Vec<Series>,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            title: String::new(),
            x_label: "X [m]".to_string(),
            y_label: "Y [m]".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    /// Visualizer whose axes are fixed to `extent`
    pub fn for_extent(extent: &WorldExtent) -> Self {
        let mut vis = Self::new();
        vis.set_x_range(extent.min.x, extent.max.x)
            .set_y_range(extent.min.y, extent.max.y);
        vis
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set X axis range
    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    /// Set Y axis range
    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Number of series queued for drawing
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Plot a polyline through `points`
    pub fn plot_polyline(&mut self, points: &[Point2D], style: &PathStyle) -> &mut Self {
        self.series.push(Series::Lines {
            x: points.iter().map(|p| p.x).collect(),
            y: points.iter().map(|p| p.y).collect(),
            style: style.clone(),
        });
        self
    }

    /// Plot the positions of a pose sequence as a line strip
    pub fn plot_motion(&mut self, motion: &[Pose2D], style: &PathStyle) -> &mut Self {
        let points: Vec<Point2D> = motion.iter().map(|p| p.position()).collect();
        self.plot_polyline(&points, style)
    }

    /// Plot a single point
    pub fn plot_point(&mut self, point: Point2D, style: &PointStyle) -> &mut Self {
        self.series.push(Series::Points {
            x: vec![point.x],
            y: vec![point.y],
            style: style.clone(),
        });
        self
    }

    /// Finalize and show the plot
    pub fn show(&mut self) -> DesignerResult<()> {
        let mut figure = self.render();
        figure
            .show()
            .map(|_| ())
            .map_err(|e| DesignerError::Visualization(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> DesignerResult<()> {
        let mut figure = self.render();
        figure
            .save_to_png(path, width, height)
            .map_err(|e| DesignerError::Visualization(e.to_string()))
    }

    /// Save plot to SVG file
    pub fn save_svg(&mut self, path: &str, width: u32, height: u32) -> DesignerResult<()> {
        let mut figure = self.render();
        figure
            .save_to_svg(path, width, height)
            .map_err(|e| DesignerError::Visualization(e.to_string()))
    }

    fn render(&self) -> Figure {
        let mut figure = Figure::new();
        let axes = figure.axes2d();

        for series in &self.series {
            match series {
                Series::Lines { x, y, style } => {
                    axes.lines(
                        x,
                        y,
                        &[
                            Caption(style.caption.as_str()),
                            Color(style.color.as_str()),
                            LineWidth(style.line_width),
                        ],
                    );
                }
                Series::Points { x, y, style } => {
                    axes.points(
                        x,
                        y,
                        &[
                            Caption(style.caption.as_str()),
                            Color(style.color.as_str()),
                            PointSymbol(style.symbol),
                            PointSize(style.size),
                        ],
                    );
                }
            }
        }

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }

        figure
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}
