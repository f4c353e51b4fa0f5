//! Multi-level bucket aggregation for dashboard widgets.
//!
//! Records are grouped stage by stage into bucket levels (terms, numeric
//! histogram, date histogram, explicit ranges), split levels are routed into
//! series/rows/chart partitions, and metrics reduce each group to one number
//! per label.
//!
//! ```
//! use tally::aggregations::{extract, run, AggregationPolicy, BucketDefinition, Metric};
//! use tally::Record;
//!
//! let records = vec![
//!     Record::new().with("cat", "A").with("v", 10.0),
//!     Record::new().with("cat", "A").with("v", 20.0),
//!     Record::new().with("cat", "B").with("v", 30.0),
//! ];
//! let result = run(&records, &[BucketDefinition::terms("cat")]);
//! assert_eq!(result.labels, vec!["A", "B"]);
//!
//! let sum = Metric::new("v", AggregationPolicy::Sum);
//! assert_eq!(extract(&result, &records, &sum), vec![30.0, 30.0]);
//! ```

pub mod aggregations;
pub mod config;
pub mod error;
pub mod kpi;
pub mod record;
pub mod request;

pub use config::Config;
pub use error::{Error, Result};
pub use record::{Record, Value};
pub use request::DashboardRequest;
