use super::features::ControllerFeedback;

/// Averages of the windows seen during one reporting span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisReport {
    pub from_sec: u64,
    pub to_sec: u64,
    pub windows: usize,
    pub avg_rms: f64,
    pub avg_zcr: f64,
}

/// Per-second loudness log for `--analyze`.
///
/// Windows are recorded as the stream consumes them; `tick` is called after
/// each processed block with the current stream time and emits a report when
/// a whole-second boundary has been crossed.
#[derive(Debug, Default)]
pub struct AnalysisLog {
    last_mark: u64,
    rms_acc: f64,
    zcr_acc: f64,
    count: usize,
    reports: Vec<AnalysisReport>,
}

impl AnalysisLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, feedback: ControllerFeedback) {
        self.rms_acc += feedback.rms as f64;
        self.zcr_acc += feedback.zcr as f64;
        self.count += 1;
    }

    pub fn tick(&mut self, time_secs: f64) -> Option<AnalysisReport> {
        let current = time_secs.floor().max(0.0) as u64;
        if current == self.last_mark {
            return None;
        }
        let report = self.flush_to(current);
        self.last_mark = current;
        report
    }

    /// Report whatever is left after the last whole second.
    pub fn finish(&mut self, time_secs: f64) -> Option<AnalysisReport> {
        let end = time_secs.ceil().max(0.0) as u64;
        let report = self.flush_to(end.max(self.last_mark));
        self.last_mark = end;
        report
    }

    pub fn reports(&self) -> &[AnalysisReport] {
        &self.reports
    }

    fn flush_to(&mut self, to_sec: u64) -> Option<AnalysisReport> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let report = AnalysisReport {
            from_sec: self.last_mark,
            to_sec,
            windows: self.count,
            avg_rms: self.rms_acc / n,
            avg_zcr: self.zcr_acc / n,
        };
        log::info!(
            "[analyze] t={}s..{}s, avg RMS={:.4}, avg ZCR={:.4} ({} windows)",
            report.from_sec,
            report.to_sec,
            report.avg_rms,
            report.avg_zcr,
            report.windows
        );
        self.rms_acc = 0.0;
        self.zcr_acc = 0.0;
        self.count = 0;
        self.reports.push(report);
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fb(rms: f32, zcr: f32) -> ControllerFeedback {
        ControllerFeedback { rms, zcr }
    }

    #[test]
    fn reports_on_second_boundaries() {
        let mut log = AnalysisLog::new();
        log.record(fb(0.2, 0.1));
        log.record(fb(0.4, 0.3));
        assert!(log.tick(0.5).is_none());

        let report = log.tick(1.01).expect("crossed one second");
        assert_eq!((report.from_sec, report.to_sec), (0, 1));
        assert_eq!(report.windows, 2);
        assert!((report.avg_rms - 0.3).abs() < 1e-6);
        assert!((report.avg_zcr - 0.2).abs() < 1e-6);

        assert!(log.tick(1.5).is_none());
    }

    #[test]
    fn empty_spans_are_skipped_but_advance_the_mark() {
        let mut log = AnalysisLog::new();
        assert!(log.tick(1.2).is_none());
        log.record(fb(0.5, 0.5));
        let report = log.tick(2.1).unwrap();
        assert_eq!((report.from_sec, report.to_sec), (1, 2));
    }

    #[test]
    fn finish_flushes_the_tail() {
        let mut log = AnalysisLog::new();
        log.record(fb(0.1, 0.0));
        assert!(log.tick(0.9).is_none());
        let report = log.finish(0.9).unwrap();
        assert_eq!((report.from_sec, report.to_sec), (0, 1));
        assert_eq!(log.reports().len(), 1);
        assert!(log.finish(0.9).is_none());
    }
}
