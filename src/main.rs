use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};
use remez_fir_calc::{
    FilterSpec, ResponseCurve, design_lowpass, evaluate_response,
    input::{self, Field},
    report,
};

/// Number of frequency points evaluated for the response plot.
const RESPONSE_POINTS: usize = 2000;

/// Plotted gain range in dB. The evaluator itself never clamps; −∞ dB points
/// are drawn at the bottom of this range.
const GAIN_DB_MIN: f64 = -80.0;
const GAIN_DB_MAX: f64 = 5.0;

fn main() -> eframe::Result {
    env_logger::init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 500.0])
            .with_title("FIR filter calculator (Parks-McClellan Remez)"),
        ..Default::default()
    };
    eframe::run_native(
        "remez-fir-calc",
        options,
        Box::new(|_cc| Ok(Box::new(FirCalcApp::default()))),
    )
}

/// A single-line text field that only admits numeric keystrokes.
struct NumericField {
    field: Field,
    label: &'static str,
    text: String,
}

impl NumericField {
    fn new(field: Field, label: &'static str) -> NumericField {
        NumericField {
            field,
            label,
            text: String::new(),
        }
    }

    /// Shows the field. An edit whose inserted fragment is not numeric is
    /// reverted, leaving the field unchanged, and a diagnostic is logged.
    fn show(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.label(self.label);
            let before = self.text.clone();
            let response = ui.add(egui::TextEdit::singleline(&mut self.text).desired_width(120.0));
            if response.changed()
                && let Some(fragment) = input::inserted_fragment(&before, &self.text)
                && !input::fragment_is_numeric(fragment)
            {
                log::warn!("rejected input {fragment:?} in {} field", self.field);
                self.text = before;
            }
        });
    }
}

/// Last successful computation, kept for redraws.
struct DesignView {
    nyquist: f64,
    curve: ResponseCurve,
}

struct FirCalcApp {
    rate: NumericField,
    cutoff: NumericField,
    tranwidth: NumericField,
    taps: NumericField,
    error: Option<String>,
    view: Option<DesignView>,
}

impl Default for FirCalcApp {
    fn default() -> FirCalcApp {
        FirCalcApp {
            rate: NumericField::new(Field::SampleRate, "sampling rate (Hz)"),
            cutoff: NumericField::new(Field::Cutoff, "cut off (Hz)"),
            tranwidth: NumericField::new(Field::TransitionWidth, "transition width (Hz)"),
            taps: NumericField::new(Field::Taps, "number of taps"),
            error: None,
            view: None,
        }
    }
}

impl FirCalcApp {
    /// One design+evaluate+report cycle, run to completion on the UI thread.
    fn calculate(&mut self) {
        self.error = None;
        match self.run_design() {
            Ok(view) => self.view = Some(view),
            Err(err) => {
                log::debug!("calculation failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    fn run_design(&self) -> Result<DesignView, Box<dyn std::error::Error>> {
        let spec = input::parse_spec(
            &self.rate.text,
            &self.cutoff.text,
            &self.tranwidth.text,
            &self.taps.text,
        )?;
        let design = design_lowpass(&spec)?;
        report::print_report(&spec, &design.taps)?;
        let curve = evaluate_response(&design.taps, RESPONSE_POINTS, spec.sample_rate())?;
        Ok(DesignView {
            nyquist: spec.nyquist(),
            curve,
        })
    }

    /// Tap count hint for the current frequencies, when they parse.
    fn taps_hint(&self) -> Option<usize> {
        let rate: f64 = self.rate.text.trim().parse().ok()?;
        let cutoff: f64 = self.cutoff.text.trim().parse().ok()?;
        let tranwidth: f64 = self.tranwidth.text.trim().parse().ok()?;
        let spec = FilterSpec::new(rate, cutoff, tranwidth, 1).ok()?;
        Some(spec.suggested_num_taps(0.01, 0.001))
    }
}

impl eframe::App for FirCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("FIR filter design with the Remez exchange algorithm");
            ui.separator();

            ui.horizontal(|ui| {
                self.rate.show(ui);
                self.cutoff.show(ui);
                self.tranwidth.show(ui);
                self.taps.show(ui);
            });
            ui.label("transition width is the frequency span from pass band to stop band");
            if let Some(hint) = self.taps_hint() {
                ui.label(format!("suggested number of taps: {hint}"));
            }

            if ui.button("CALCULATE").clicked() {
                self.calculate();
            }
            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::RED, error);
            }

            if let Some(view) = &self.view {
                ui.separator();
                Plot::new("frequency_response")
                    .x_axis_label("Frequency (Hz)")
                    .y_axis_label("Gain (dB)")
                    .show(ui, |plot_ui| {
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [0.0, GAIN_DB_MIN],
                            [view.nyquist, GAIN_DB_MAX],
                        ));
                        let points: PlotPoints = view
                            .curve
                            .points
                            .iter()
                            .map(|&(freq, gain)| {
                                let gain = if gain.is_finite() {
                                    gain
                                } else {
                                    GAIN_DB_MIN - 20.0
                                };
                                [freq, gain]
                            })
                            .collect();
                        plot_ui.line(Line::new("Frequency Response", points));
                    });
            }
        });
    }
}
