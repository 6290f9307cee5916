//! Output sinks for point clouds, reference spheres and intensity maps
//!
//! Rendering happens outside this crate. A [`RenderSink`] receives the data a
//! plotter needs; [`TextSink`] writes it as plain text records:
//!
//! ```text
//! points <n>
//! <x> <y> <z>          (n lines)
//! sphere <cx> <cy> <cz> <radius>
//! heatmap <numpix> <x_label> <y_label>
//! <v0> <v1> ...        (numpix lines, row-major)
//! ```

use std::io::Write;

use super::satellite::IntensityImage;
use crate::simulation::error::Result;
use crate::simulation::states::NVec3;

pub trait RenderSink {
    fn point_cloud(&mut self, points: &[NVec3]) -> Result<()>;
    fn reference_sphere(&mut self, center: NVec3, radius: f64) -> Result<()>;
    fn heat_map(&mut self, image: &IntensityImage, x_label: &str, y_label: &str) -> Result<()>;
}

pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flush and hand back the writer
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn point_cloud(&mut self, points: &[NVec3]) -> Result<()> {
        writeln!(self.out, "points {}", points.len())?;
        for p in points {
            writeln!(self.out, "{} {} {}", p.x, p.y, p.z)?;
        }
        Ok(())
    }

    fn reference_sphere(&mut self, center: NVec3, radius: f64) -> Result<()> {
        writeln!(self.out, "sphere {} {} {} {}", center.x, center.y, center.z, radius)?;
        Ok(())
    }

    fn heat_map(&mut self, image: &IntensityImage, x_label: &str, y_label: &str) -> Result<()> {
        // labels are single tokens in the record header
        let x_label = x_label.replace(char::is_whitespace, "_");
        let y_label = y_label.replace(char::is_whitespace, "_");
        writeln!(self.out, "heatmap {} {x_label} {y_label}", image.numpix())?;
        for row in image.rows() {
            let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(self.out, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
