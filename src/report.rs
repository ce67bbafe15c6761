use crate::data::{Employee, Error, Report, ReportRow};
use std::collections::HashMap;

/// A report strategy: turns the loaded records into a finished report.
pub(crate) type ReportHandler = Box<dyn Fn(&[Employee]) -> Report>;

/// Dispatches a report-type key to the strategy producing it. Built-in
/// reports are registered at construction; callers can add or replace
/// handlers at runtime without touching the dispatch itself.
pub(crate) struct ReportRegistry {
    handlers: HashMap<String, ReportHandler>,
}

impl ReportRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
        };
        registry.register("performance", Box::new(performance_report));
        registry
    }

    /// Registers `handler` under `key`, silently replacing any previous one.
    pub fn register(&mut self, key: &str, handler: ReportHandler) {
        self.handlers.insert(key.to_string(), handler);
    }

    pub fn generate(&self, kind: &str, employees: &[Employee]) -> Result<Report, Error> {
        let handler = self
            .handlers
            .get(kind)
            .ok_or_else(|| Error::UnknownReport(kind.to_string()))?;
        Ok(handler(employees))
    }
}

/// Mean `performance` per `position`, best first.
fn performance_report(employees: &[Employee]) -> Report {
    // Accumulate in encounter order so equal means tie-break on first appearance.
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for employee in employees {
        let entry = sums.entry(&employee.position).or_insert_with(|| {
            order.push(&employee.position);
            (0.0, 0)
        });
        entry.0 += employee.performance;
        entry.1 += 1;
    }
    let mut rows: Vec<ReportRow> = order
        .into_iter()
        .map(|position| {
            let (sum, count) = sums[position];
            ReportRow {
                group: position.to_string(),
                metric: round2(sum / count as f64),
            }
        })
        .collect();
    // Stable sort, so ties keep the encounter order set up above.
    rows.sort_by(|a, b| b.metric.total_cmp(&a.metric));
    Report {
        columns: ["position", "performance"],
        rows,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
