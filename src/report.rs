//! Stdout report of a filter design.
//!
//! Each computation prints a settings summary, the tap coefficients with 11
//! fractional digits (one per line), and an end marker, so that the
//! coefficients can be copied out of the terminal for comparison and
//! verification.

use crate::spec::FilterSpec;
use std::io::{self, Write};

/// Writes the report for a design to an arbitrary writer.
pub fn write_report<W: Write>(w: &mut W, spec: &FilterSpec, taps: &[f64]) -> io::Result<()> {
    writeln!(w, "----------settings----------")?;
    writeln!(w, "{}", settings_line(spec))?;
    writeln!(w, "----------filter coef----------")?;
    writeln!(w)?;
    for tap in taps {
        writeln!(w, "{tap:.11}")?;
    }
    writeln!(w)?;
    writeln!(w, "-----------end-----------")?;
    Ok(())
}

/// Prints the report for a design to stdout.
pub fn print_report(spec: &FilterSpec, taps: &[f64]) -> io::Result<()> {
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), spec, taps)
}

/// One-line summary of the design settings.
pub fn settings_line(spec: &FilterSpec) -> String {
    format!(
        "rate={} SPS cutoff={} Hz tranwidth={} Hz taps={}",
        hz(spec.sample_rate()),
        hz(spec.cutoff()),
        hz(spec.transition_width()),
        spec.num_taps()
    )
}

// Frequencies print with an explicit fractional part ("8000.0", "1234.56").
fn hz(value: f64) -> String {
    if value == value.trunc() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn settings_line_format() {
        let spec = FilterSpec::new(8000.0, 1000.0, 200.0, 31).unwrap();
        assert_eq!(
            settings_line(&spec),
            "rate=8000.0 SPS cutoff=1000.0 Hz tranwidth=200.0 Hz taps=31"
        );
        let spec = FilterSpec::new(8000.0, 1234.56, 200.5, 7).unwrap();
        assert_eq!(
            settings_line(&spec),
            "rate=8000.0 SPS cutoff=1234.56 Hz tranwidth=200.5 Hz taps=7"
        );
    }

    #[test]
    fn report_structure() {
        let spec = FilterSpec::new(8000.0, 1000.0, 200.0, 3).unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &spec, &[0.25, 0.5, 0.25]).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "----------settings----------",
                "rate=8000.0 SPS cutoff=1000.0 Hz tranwidth=200.0 Hz taps=3",
                "----------filter coef----------",
                "",
                "0.25000000000",
                "0.50000000000",
                "0.25000000000",
                "",
                "-----------end-----------",
            ]
        );
    }
}
