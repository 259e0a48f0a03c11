//! Purpose: Build the per-variant timing summary from a parsed report tree.
//! Exports: `SummaryOptions`, `NullPolicy`, `metric_key`, `summarize`, default variant list.
//! Role: Glue between `find_key` and output; decides the shape of each variant entry.
//! Invariants: Output keys are exactly the declared variants, in declared order.
//! Invariants: Matched values are copied unmodified; misses become `{}`.
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::find::{find_key, find_key_skipping_null};

pub const DEFAULT_METRIC: &str = "AssembleBilinearOperator";

pub const DEFAULT_VARIANTS: &[&str] = &[
    "Legacy",
    "Coo",
    "CooSort",
    "Coo_Gpu",
    "CooSort_Gpu",
    "Csr",
    "Csr_Gpu",
    "CsrNodeWise",
    "CsrBuildLess",
];

/// How a metric bound to `null` in the report is summarized.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NullPolicy {
    /// Emit the `null` under the metric field.
    #[default]
    Present,
    /// Skip `null` bindings during the search; a nested `null` lets the
    /// enclosing level continue with its remaining entries.
    Missing,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SummaryOptions {
    pub metric: String,
    pub variants: Vec<String>,
    pub sub_metrics: Vec<String>,
    pub null_policy: NullPolicy,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            metric: DEFAULT_METRIC.to_string(),
            variants: DEFAULT_VARIANTS.iter().map(|v| v.to_string()).collect(),
            sub_metrics: Vec::new(),
            null_policy: NullPolicy::Present,
        }
    }
}

impl SummaryOptions {
    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = metric.into();
        self
    }

    pub fn with_sub_metrics<I, S>(mut self, sub_metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_metrics = sub_metrics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_null_policy(mut self, null_policy: NullPolicy) -> Self {
        self.null_policy = null_policy;
        self
    }
}

/// Report key holding `metric` for `variant`, e.g. `AssembleBilinearOperator_Csr`.
pub fn metric_key(metric: &str, variant: &str) -> String {
    format!("{metric}_{variant}")
}

pub fn summarize(tree: &Value, options: &SummaryOptions) -> Map<String, Value> {
    let mut out = Map::new();
    for variant in &options.variants {
        if out.contains_key(variant) {
            continue;
        }
        let key = metric_key(&options.metric, variant);
        let entry = match lookup(tree, &key, options.null_policy) {
            Some(found) => {
                debug!(variant = %variant, key = %key, "metric found");
                variant_entry(found, options)
            }
            None => {
                debug!(variant = %variant, key = %key, "metric missing");
                Map::new()
            }
        };
        out.insert(variant.clone(), Value::Object(entry));
    }
    out
}

fn lookup<'a>(tree: &'a Value, key: &str, null_policy: NullPolicy) -> Option<&'a Value> {
    match null_policy {
        NullPolicy::Present => find_key(tree, key),
        NullPolicy::Missing => find_key_skipping_null(tree, key),
    }
}

fn variant_entry(found: &Value, options: &SummaryOptions) -> Map<String, Value> {
    let mut entry = Map::new();
    entry.insert(options.metric.clone(), found.clone());
    for sub in &options.sub_metrics {
        if entry.contains_key(sub) {
            continue;
        }
        if let Some(value) = lookup(found, sub, options.null_policy) {
            entry.insert(sub.clone(), value.clone());
        }
    }
    entry
}
