//! Best-effort results for aggregate reads.
//!
//! Aggregate endpoints run several independent queries. A failing query does
//! not abort the request: its slot falls back to an empty value and the
//! failure is recorded as a [`Warning`], so callers can tell a complete
//! answer from a degraded one without looking at the HTTP status.

use serde::Serialize;
use tracing::warn;

use crate::error::{CatalogError, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Partial<T> {
    pub data: T,
    pub warnings: Vec<Warning>,
}

impl<T> Partial<T> {
    pub fn complete(data: T) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Partial<U> {
        Partial {
            data: f(self.data),
            warnings: self.warnings,
        }
    }
}

/// Collects warnings while the pieces of a [`Partial`] are gathered.
#[derive(Debug, Default)]
pub struct WarningLog {
    warnings: Vec<Warning>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwrap `result`, or record the failure under `context` and fall back
    /// to `T::default()`.
    pub fn take<T: Default>(
        &mut self,
        context: &str,
        result: Result<T, CatalogError>,
    ) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                self.record(context, &err);
                T::default()
            }
        }
    }

    pub fn record(&mut self, context: &str, err: &CatalogError) {
        warn!(context, error = %err, "partial result degraded");
        self.warnings.push(Warning {
            kind: err.kind(),
            message: format!("{context}: {err}"),
        });
    }

    pub fn finish<T>(self, data: T) -> Partial<T> {
        Partial {
            data,
            warnings: self.warnings,
        }
    }
}
