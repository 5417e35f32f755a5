//! Text and CSV output for the CLI frontend.
//!
//! Everything writes to an arbitrary [`Write`] sink so the binary can target
//! stdout or a file; log output goes to stderr separately.

use std::io::{self, Write};

use crate::analysis::{StabilityCircle, StabilityReport, Trajectory};
use crate::error::{GenstabError, Result};

fn output_error(e: io::Error) -> GenstabError {
    GenstabError::OutputError {
        message: e.to_string(),
    }
}

/// CSV writer for trajectories.
pub struct TrajectoryWriter<W: Write> {
    out: W,
}

impl<W: Write> TrajectoryWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write `t,voltage,stable` rows with a header line.
    pub fn write(&mut self, trajectory: &Trajectory) -> Result<()> {
        writeln!(self.out, "t,voltage,stable").map_err(output_error)?;
        for sample in trajectory {
            writeln!(self.out, "{:.2},{:.6},{}", sample.t, sample.voltage, sample.stable)
                .map_err(output_error)?;
        }
        Ok(())
    }

    /// Flush the output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(output_error)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Write a stability report.
pub fn write_report<W: Write>(out: &mut W, report: &StabilityReport) -> Result<()> {
    writeln!(out, "{}", report).map_err(output_error)?;
    if report.is_singular() {
        writeln!(out, "note            : singular point, treat as unstable").map_err(output_error)?;
    }
    Ok(())
}

/// Write the boundary circle followed by one line per voltage contour.
pub fn write_contours<W: Write>(
    out: &mut W,
    boundary: &StabilityCircle,
    contours: &[(f64, StabilityCircle)],
) -> Result<()> {
    writeln!(out, "boundary : {}", boundary).map_err(output_error)?;
    for (k, circle) in contours {
        writeln!(out, "k={:<6} : {}", k, circle).map_err(output_error)?;
    }
    Ok(())
}

/// One-line summary of a trajectory, for logs.
pub fn summarize(trajectory: &Trajectory) -> String {
    let last = trajectory.final_voltage().unwrap_or(f64::NAN);
    let peak = trajectory.peak_voltage().unwrap_or(f64::NAN);
    format!(
        "{} samples, {}, final {:.4} pu, peak {:.4} pu",
        trajectory.len(),
        if trajectory.is_stable() { "stable" } else { "unstable" },
        last,
        peak
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{simulate, stability_boundary, voltage_contours};
    use crate::network::OperatingPoint;
    use crate::params::ParameterSet;

    #[test]
    fn test_trajectory_csv() {
        let traj = simulate(OperatingPoint::new(0.1, 0.15), &ParameterSet::default());
        let mut writer = TrajectoryWriter::new(Vec::new());
        writer.write(&traj).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), traj.len() + 1);
        assert_eq!(lines[0], "t,voltage,stable");
        assert_eq!(lines[1], "0.00,1.000000,true");
        assert!(lines[401].starts_with("8.00,"));
    }

    #[test]
    fn test_contour_listing() {
        let params = ParameterSet::default();
        let mut out = Vec::new();
        write_contours(
            &mut out,
            &stability_boundary(&params),
            &voltage_contours(&params, &[1.0, 2.0]),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("boundary : center=(G=0.000000, Bc=0.167869)"));
    }

    #[test]
    fn test_singular_report_note() {
        let report = StabilityReport::evaluate(OperatingPoint::new(0.0, 1.0 / 5.3), &ParameterSet::default());
        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("voltage ratio   : singular"));
        assert!(text.contains("treat as unstable"));
    }
}
